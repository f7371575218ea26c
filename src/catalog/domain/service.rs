use async_trait::async_trait;
use crate::books::domain::Book;
use crate::books::domain::model::BookEntity;
use crate::books::dto::BookDto;
use crate::books::repository::BookRepository;
use crate::catalog::domain::CatalogService;
use crate::core::domain::Configuration;
use crate::core::events::DomainEvent;
use crate::core::library::{LibraryError, LibraryResult};
use crate::gateway::events::EventPublisher;

const EVENT_NAME: &str = "books";

pub(crate) struct CatalogServiceImpl {
    book_repository: Box<dyn BookRepository>,
    events_publisher: Box<dyn EventPublisher>,
}

impl CatalogServiceImpl {
    pub(crate) fn new(_config: &Configuration, book_repository: Box<dyn BookRepository>,
                      events_publisher: Box<dyn EventPublisher>) -> Self {
        Self {
            book_repository,
            events_publisher,
        }
    }

    // the row is already committed, a lost event is logged and never fails the request
    async fn publish(&self, event: serde_json::Result<DomainEvent>) {
        let res = match event {
            Ok(event) => self.events_publisher.publish(&event).await,
            Err(err) => Err(LibraryError::from(err)),
        };
        if let Err(err) = res {
            tracing::warn!(error = %err, "failed to publish domain event");
        }
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn add_book(&self, book: &BookDto) -> LibraryResult<BookDto> {
        let created = self.book_repository.create(&BookEntity::from(book)).await.map(|b| BookDto::from(&b))?;
        tracing::debug!(isbn = created.isbn(), title = created.title(), "book added");
        self.publish(DomainEvent::added(EVENT_NAME, created.isbn(), &created)).await;
        Ok(created)
    }

    async fn remove_book(&self, isbn: &str) -> LibraryResult<()> {
        let _ = self.book_repository.delete(isbn).await?;
        tracing::debug!(isbn, "book removed");
        self.publish(DomainEvent::deleted(EVENT_NAME, isbn, &isbn)).await;
        Ok(())
    }

    async fn update_book(&self, book: &BookDto) -> LibraryResult<BookDto> {
        let updated = self.book_repository.update(&BookEntity::from(book)).await.map(|b| BookDto::from(&b))?;
        tracing::debug!(isbn = updated.isbn(), title = updated.title(), "book updated");
        self.publish(DomainEvent::updated(EVENT_NAME, updated.isbn(), &updated)).await;
        Ok(updated)
    }

    async fn find_book_by_isbn(&self, isbn: &str) -> LibraryResult<BookDto> {
        self.book_repository.get(isbn).await.map(|b| BookDto::from(&b))
    }

    async fn find_books(&self) -> LibraryResult<Vec<BookDto>> {
        let res = self.book_repository.list().await?;
        Ok(res.iter().map(BookDto::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::books::factory::create_book_repository;
    use crate::catalog::domain::CatalogService;
    use crate::catalog::domain::service::CatalogServiceImpl;
    use crate::core::library::LibraryError;
    use crate::utils::fixtures::{seeded_pool, test_book_dto, test_config, FailingPublisher, MemoryPublisher, SEEDED_ISBN};

    #[tokio::test]
    async fn test_should_keep_write_when_publish_fails() {
        let catalog_svc = CatalogServiceImpl::new(
            &test_config(),
            create_book_repository(seeded_pool().await),
            Box::new(FailingPublisher::default()));

        let added = catalog_svc.add_book(&test_book_dto("isbn", "test book")).await.expect("should add book");
        assert_eq!("isbn", added.isbn.as_str());
        let loaded = catalog_svc.find_book_by_isbn("isbn").await.expect("should return book");
        assert_eq!(added, loaded);
        catalog_svc.remove_book(SEEDED_ISBN).await.expect("should remove book");
    }

    async fn build_service() -> (CatalogServiceImpl, MemoryPublisher) {
        let publisher = MemoryPublisher::default();
        let svc = CatalogServiceImpl::new(
            &test_config(),
            create_book_repository(seeded_pool().await),
            Box::new(publisher.clone()));
        (svc, publisher)
    }

    #[tokio::test]
    async fn test_should_add_book() {
        let (catalog_svc, publisher) = build_service().await;

        let book = test_book_dto("isbn", "test book");
        let added = catalog_svc.add_book(&book).await.expect("should add book");
        assert_eq!(book, added);

        let loaded = catalog_svc.find_book_by_isbn(book.isbn.as_str()).await.expect("should return book");
        assert_eq!(book, loaded);
        assert_eq!(vec!["Added:isbn"], publisher.recorded());
    }

    #[tokio::test]
    async fn test_should_not_publish_failed_add() {
        let (catalog_svc, publisher) = build_service().await;

        let book = test_book_dto(SEEDED_ISBN, "duplicate");
        let res = catalog_svc.add_book(&book).await;
        assert!(matches!(res, Err(LibraryError::DuplicateKey { .. })));
        assert!(publisher.recorded().is_empty());
    }

    #[tokio::test]
    async fn test_should_update_book() {
        let (catalog_svc, publisher) = build_service().await;

        let mut book = catalog_svc.find_book_by_isbn(SEEDED_ISBN).await.expect("should return book");
        book.title = "new title".to_string();
        book.author = "new author".to_string();
        let updated = catalog_svc.update_book(&book).await.expect("should update book");
        assert_eq!(book, updated);
        assert_eq!(vec!["Updated:123"], publisher.recorded());
    }

    #[tokio::test]
    async fn test_should_find_books() {
        let (catalog_svc, _) = build_service().await;

        let _ = catalog_svc.add_book(&test_book_dto("isbn981", "test book")).await.expect("should add book");
        let res = catalog_svc.find_books().await.expect("should return books");
        assert_eq!(2, res.len());
    }

    #[tokio::test]
    async fn test_should_remove_book() {
        let (catalog_svc, publisher) = build_service().await;

        catalog_svc.remove_book(SEEDED_ISBN).await.expect("should remove book");

        let loaded = catalog_svc.find_book_by_isbn(SEEDED_ISBN).await;
        assert!(matches!(loaded, Err(LibraryError::NotFound { .. })));
        let removed_again = catalog_svc.remove_book(SEEDED_ISBN).await;
        assert!(matches!(removed_again, Err(LibraryError::NotFound { .. })));
        assert_eq!(vec!["Deleted:123"], publisher.recorded());
    }
}
