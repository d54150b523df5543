pub mod ddb_book_repository;
pub mod memory_book_repository;

use std::collections::HashMap;
use async_trait::async_trait;
use crate::books::domain::model::BookEntity;
use crate::core::library::LibraryResult;
use crate::core::repository::Repository;

#[async_trait]
pub(crate) trait BookRepository: Repository<BookEntity> {
    async fn find_one_and_delete_by_isbn(&self, isbn: &str) -> LibraryResult<BookEntity> {
        let predicate = HashMap::from([
            ("isbn".to_string(), isbn.to_string()),
        ]);
        self.find_one_and_delete(&predicate).await
    }
}
