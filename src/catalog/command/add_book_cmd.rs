use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::core::library::{LibraryError, LibraryResult};

pub(crate) struct AddBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl AddBookCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

// AddBookCommandRequest is the create payload; every field is optional so that
// missing fields surface as validation errors instead of parse errors.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct AddBookCommandRequest {
    pub(crate) name: Option<String>,
    pub(crate) isbn: Option<String>,
    pub(crate) author: Option<String>,
    pub(crate) pages: Option<Value>,
}

impl AddBookCommandRequest {
    pub fn new(name: &str, isbn: &str, author: &str, pages: i64) -> Self {
        Self {
            name: Some(name.to_string()),
            isbn: Some(isbn.to_string()),
            author: Some(author.to_string()),
            pages: Some(Value::from(pages)),
        }
    }

    pub fn build_book(&self) -> LibraryResult<BookDto> {
        let name = required_string("name", &self.name)?;
        let isbn = required_string("isbn", &self.isbn)?;
        let author = required_string("author", &self.author)?;
        let pages = required_pages(&self.pages)?;
        Ok(BookDto::new(name, isbn, author, pages))
    }
}

fn required_string<'a>(field: &str, value: &'a Option<String>) -> LibraryResult<&'a str> {
    match value.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(LibraryError::validation(format!("{} is required", field).as_str(), Some(field.to_string()))),
    }
}

// pages accepts a JSON integer or a string holding one, as html forms post numbers as text
fn required_pages(value: &Option<Value>) -> LibraryResult<i64> {
    let pages = match value {
        None | Some(Value::Null) => {
            return Err(LibraryError::validation("pages is required", Some("pages".to_string())));
        }
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) if s.trim().is_empty() => {
            return Err(LibraryError::validation("pages is required", Some("pages".to_string())));
        }
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        Some(_) => None,
    };
    match pages {
        Some(n) if n > 0 => Ok(n),
        Some(_) => Err(LibraryError::validation("pages must be greater than 0", Some("pages".to_string()))),
        None => Err(LibraryError::validation("pages must be a number", Some("pages".to_string()))),
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AddBookCommandResponse {
    pub message: String,
    pub book: BookDto,
}

impl AddBookCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            message: "Successfully added book".to_string(),
            book,
        }
    }
}

#[async_trait]
impl Command<AddBookCommandRequest, AddBookCommandResponse> for AddBookCommand {
    async fn execute(&self, req: AddBookCommandRequest) -> Result<AddBookCommandResponse, CommandError> {
        let book = req.build_book()?;
        self.catalog_service.add_book(&book).await.map_err(CommandError::from).map(AddBookCommandResponse::new)
    }
}
