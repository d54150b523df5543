use async_trait::async_trait;
use tracing::{info, warn};
use crate::books::domain::model::BookEntity;
use crate::books::dto::BookDto;
use crate::books::repository::BookRepository;
use crate::catalog::domain::CatalogService;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;

pub(crate) struct CatalogServiceImpl {
    book_repository: Box<dyn BookRepository>,
}

impl CatalogServiceImpl {
    pub(crate) fn new(book_repository: Box<dyn BookRepository>) -> Self {
        Self {
            book_repository,
        }
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn list_books(&self) -> LibraryResult<Vec<BookDto>> {
        let books = self.book_repository.find_all().await.map_err(|err| {
            warn!(retryable = err.retryable(), "failed to list books: {}", err);
            err
        })?;
        Ok(books.iter().map(BookDto::from).collect())
    }

    async fn add_book(&self, book: &BookDto) -> LibraryResult<BookDto> {
        let _ = self.book_repository.create(&BookEntity::from(book)).await.map_err(|err| {
            warn!(retryable = err.retryable(), isbn = book.isbn.as_str(), "failed to add book: {}", err);
            err
        })?;
        info!(book_id = book.book_id.as_str(), isbn = book.isbn.as_str(), "added book");
        Ok(book.clone())
    }

    async fn remove_book_by_isbn(&self, isbn: &str) -> LibraryResult<BookDto> {
        match self.book_repository.find_one_and_delete_by_isbn(isbn).await {
            Ok(entity) => {
                info!(book_id = entity.book_id.as_str(), isbn, "deleted book");
                Ok(BookDto::from(&entity))
            }
            Err(LibraryError::NotFound { .. }) => {
                Err(LibraryError::not_found("Book not found"))
            }
            Err(err) => {
                warn!(retryable = err.retryable(), isbn, "failed to delete book: {}", err);
                Err(err)
            }
        }
    }
}

impl From<&BookEntity> for BookDto {
    fn from(other: &BookEntity) -> Self {
        Self {
            book_id: other.book_id.to_string(),
            name: other.name.to_string(),
            isbn: other.isbn.to_string(),
            author: other.author.to_string(),
            pages: other.pages,
            created_at: other.created_at,
        }
    }
}

impl From<&BookDto> for BookEntity {
    fn from(other: &BookDto) -> Self {
        Self {
            book_id: other.book_id.to_string(),
            name: other.name.to_string(),
            isbn: other.isbn.to_string(),
            author: other.author.to_string(),
            pages: other.pages,
            created_at: other.created_at,
        }
    }
}
