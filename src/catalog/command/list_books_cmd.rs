use std::sync::Arc;
use async_trait::async_trait;
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct ListBooksCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl ListBooksCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct ListBooksCommandRequest {}

// the response is the bare array of books
pub(crate) type ListBooksCommandResponse = Vec<BookDto>;

#[async_trait]
impl Command<ListBooksCommandRequest, ListBooksCommandResponse> for ListBooksCommand {
    async fn execute(&self, _req: ListBooksCommandRequest) -> Result<ListBooksCommandResponse, CommandError> {
        self.catalog_service.list_books().await.map_err(CommandError::from)
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
    use crate::catalog::command::list_books_cmd::{ListBooksCommand, ListBooksCommandRequest};
    use crate::catalog::factory;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;
    use crate::core::repository::{RepositoryStore, StoreStatus};

    #[tokio::test]
    async fn test_should_run_list_books() {
        let svc = factory::create_catalog_service(&Configuration::new(RepositoryStore::Memory), StoreStatus::new())
            .await.expect("should create catalog service");
        let add_cmd = AddBookCommand::new(svc.clone());
        let list_cmd = ListBooksCommand::new(svc);

        let empty = list_cmd.execute(ListBooksCommandRequest::default()).await.expect("should list books");
        assert!(empty.is_empty());

        let _ = add_cmd.execute(AddBookCommandRequest::new("Dune", "001", "Herbert", 412))
            .await.expect("should add book");
        let _ = add_cmd.execute(AddBookCommandRequest::new("Emma", "002", "Austen", 320))
            .await.expect("should add book");
        let books = list_cmd.execute(ListBooksCommandRequest::default()).await.expect("should list books");
        assert_eq!(2, books.len());
        assert_eq!("001", books[0].isbn.as_str());
        assert_eq!("002", books[1].isbn.as_str());
    }
}
