use chrono::{NaiveDateTime, Utc};
use uuid::Uuid;
use serde::{Deserialize, Serialize};
use crate::books::domain::Book;
use crate::core::domain::Identifiable;
use crate::utils::date::store_serializer;

// BookEntity is the persisted form of a book in the catalog collection; book_id is
// assigned by the service when the record is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct BookEntity {
    pub book_id: String,
    pub name: String,
    pub isbn: String,
    pub author: String,
    pub pages: i64,
    #[serde(with = "store_serializer")]
    pub created_at: NaiveDateTime,
}

impl BookEntity {
    pub fn new(name: &str, isbn: &str, author: &str, pages: i64) -> Self {
        Self {
            book_id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            isbn: isbn.to_string(),
            author: author.to_string(),
            pages,
            created_at: Utc::now().naive_utc(),
        }
    }
}

impl Identifiable for BookEntity {
    fn id(&self) -> String {
        self.book_id.to_string()
    }
}

impl Book for BookEntity {
    fn attribute(&self, name: &str) -> Option<String> {
        match name {
            "book_id" => Some(self.book_id.clone()),
            "name" => Some(self.name.clone()),
            "isbn" => Some(self.isbn.clone()),
            "author" => Some(self.author.clone()),
            "pages" => Some(self.pages.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::books::domain::Book;
    use crate::books::domain::model::BookEntity;
    use crate::core::domain::Identifiable;

    #[tokio::test]
    async fn test_should_build_books() {
        let book = BookEntity::new("Dune", "001", "Herbert", 412);
        assert_eq!("001", book.isbn.as_str());
        assert_eq!("Dune", book.name.as_str());
        assert_eq!(412, book.pages);
        assert_eq!(book.book_id, book.id());
        assert_ne!(book.book_id, BookEntity::new("Dune", "001", "Herbert", 412).book_id);
    }

    #[tokio::test]
    async fn test_should_expose_attributes() {
        let book = BookEntity::new("Dune", "001", "Herbert", 412);
        assert_eq!(Some("Herbert".to_string()), book.attribute("author"));
        assert_eq!(Some("412".to_string()), book.attribute("pages"));
        assert_eq!(None, book.attribute("publisher"));
    }

    #[tokio::test]
    async fn test_should_serialize_store_layout() {
        let book = BookEntity::new("Dune", "001", "Herbert", 412);
        let val = serde_json::to_value(&book).expect("should serialize");
        let created_at = val["created_at"].as_str().expect("should be string");
        assert!(!created_at.contains('+'));
        let loaded: BookEntity = serde_json::from_value(val).expect("should deserialize");
        assert_eq!(book, loaded);
    }
}
