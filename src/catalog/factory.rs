use sqlx::AnyPool;
use crate::books::factory;
use crate::catalog::domain::CatalogService;
use crate::catalog::domain::service::CatalogServiceImpl;
use crate::core::domain::Configuration;
use crate::gateway::factory::create_publisher;

pub(crate) fn create_catalog_service(config: &Configuration, pool: AnyPool) -> Box<dyn CatalogService> {
    let book_repo = factory::create_book_repository(pool);
    let publisher = create_publisher(config.gateway_publisher());
    Box::new(CatalogServiceImpl::new(config, book_repo, publisher))
}
