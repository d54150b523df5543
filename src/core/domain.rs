use std::env;
use std::fmt::Display;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use crate::core::repository::RepositoryStore;

// Identifiable defines common traits that can be shared by persistent objects
pub trait Identifiable : Sync + Send {
    fn id(&self) -> String;
}

pub(crate) const DEFAULT_PORT: u16 = 3300;
pub(crate) const DEFAULT_DYNAMODB_ENDPOINT: &str = "http://localhost:8000";
pub(crate) const DEFAULT_BOOKS_TABLE: &str = "books";
pub(crate) const DEFAULT_PUBLIC_DIR: &str = "public";

// Configuration abstracts config options for the bookstore service
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub(crate) struct Configuration {
    pub port: u16,
    pub store: RepositoryStore,
    pub dynamodb_endpoint: String,
    pub books_table: String,
    pub public_dir: String,
    pub lambda: bool,
}

impl Configuration {
    pub fn new(store: RepositoryStore) -> Self {
        Configuration {
            port: DEFAULT_PORT,
            store,
            dynamodb_endpoint: DEFAULT_DYNAMODB_ENDPOINT.to_string(),
            books_table: DEFAULT_BOOKS_TABLE.to_string(),
            public_dir: DEFAULT_PUBLIC_DIR.to_string(),
            lambda: false,
        }
    }

    // load reads the configuration from environment, falling back to defaults
    pub fn load() -> Result<Self, String> {
        Ok(Configuration {
            port: try_load("PORT", DEFAULT_PORT.to_string().as_str())?,
            store: try_load("STORE", "local")?,
            dynamodb_endpoint: try_load("DYNAMODB_ENDPOINT", DEFAULT_DYNAMODB_ENDPOINT)?,
            books_table: try_load("BOOKS_TABLE", DEFAULT_BOOKS_TABLE)?,
            public_dir: try_load("PUBLIC_DIR", DEFAULT_PUBLIC_DIR)?,
            lambda: env::var("AWS_LAMBDA_RUNTIME_API").is_ok(),
        })
    }

    pub fn socket_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, String>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    raw.parse().map_err(|e| {
        warn!("Invalid {key} value: {e}");
        format!("invalid {} value {:?}: {}", key, raw, e)
    })
}

#[cfg(test)]
mod tests {
    use crate::core::domain::{Configuration, try_load};
    use crate::core::repository::RepositoryStore;

    #[tokio::test]
    async fn test_should_build_config() {
        let config = Configuration::new(RepositoryStore::Memory);
        assert_eq!(3300, config.port);
        assert_eq!("books", config.books_table.as_str());
        assert_eq!("public", config.public_dir.as_str());
        assert_eq!("0.0.0.0:3300", config.socket_addr());
        assert!(!config.lambda);
    }

    #[tokio::test]
    async fn test_should_use_default_for_missing_key() {
        let port: u16 = try_load("BOOKSTORE_TEST_UNSET_PORT", "8080").expect("should parse default");
        assert_eq!(8080, port);
    }

    #[tokio::test]
    async fn test_should_reject_invalid_value() {
        let res: Result<u16, String> = try_load("BOOKSTORE_TEST_UNSET_PORT", "not-a-port");
        assert!(res.is_err());
    }
}
