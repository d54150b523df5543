use chrono::{NaiveDateTime, Utc};
use uuid::Uuid;
use serde::{Deserialize, Serialize};
use crate::utils::date::serializer;

// BookDto is a data transfer object for Catalog service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct BookDto {
    pub book_id: String,
    pub name: String,
    pub isbn: String,
    pub author: String,
    pub pages: i64,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
}

impl BookDto {
    pub fn new(name: &str, isbn: &str, author: &str, pages: i64) -> BookDto {
        BookDto {
            book_id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            isbn: isbn.to_string(),
            author: author.to_string(),
            pages,
            created_at: Utc::now().naive_utc(),
        }
    }
}
