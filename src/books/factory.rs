use tracing::{info, warn};
use crate::books::repository::BookRepository;
use crate::books::repository::ddb_book_repository::DDBBookRepository;
use crate::books::repository::memory_book_repository::MemoryBookRepository;
use crate::core::domain::Configuration;
use crate::core::library::LibraryResult;
use crate::core::repository::{RepositoryStore, StoreStatus};
use crate::utils::ddb::{build_db_client, create_table, describe_table};

// create_book_repository connects to the configured store and verifies it is reachable
// before handing out the repository; status is marked connected on success.
pub(crate) async fn create_book_repository(config: &Configuration, status: StoreStatus) -> LibraryResult<Box<dyn BookRepository>> {
    let table_name = config.books_table.as_str();
    let index_name = format!("{}_ndx", table_name);
    match config.store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(config.store, config.dynamodb_endpoint.as_str()).await;
            let table_status = describe_table(&client, table_name).await?;
            info!("connected to dynamodb table {} ({:?})", table_name, table_status);
            status.mark_connected();
            Ok(Box::new(DDBBookRepository::new(client, table_name, index_name.as_str(), status)))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(config.store, config.dynamodb_endpoint.as_str()).await;
            if let Err(err) = create_table(&client, table_name, "book_id", "isbn").await {
                // usually the table already exists, describe_table tells otherwise
                warn!("could not create {} table: {}", table_name, err);
            }
            let table_status = describe_table(&client, table_name).await?;
            info!("connected to local dynamodb table {} ({:?})", table_name, table_status);
            status.mark_connected();
            Ok(Box::new(DDBBookRepository::new(client, table_name, index_name.as_str(), status)))
        }
        RepositoryStore::Memory => {
            info!("using in-memory book store");
            status.mark_connected();
            Ok(Box::new(MemoryBookRepository::new(status)))
        }
    }
}
