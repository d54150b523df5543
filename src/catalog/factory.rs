use std::sync::Arc;
use crate::books::factory;
use crate::catalog::domain::CatalogService;
use crate::catalog::domain::service::CatalogServiceImpl;
use crate::core::domain::Configuration;
use crate::core::library::LibraryResult;
use crate::core::repository::StoreStatus;

pub(crate) async fn create_catalog_service(config: &Configuration, status: StoreStatus) -> LibraryResult<Arc<dyn CatalogService>> {
    let book_repo = factory::create_book_repository(config, status).await?;
    Ok(Arc::new(CatalogServiceImpl::new(book_repo)))
}
