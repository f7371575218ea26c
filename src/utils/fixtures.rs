use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use serde_json::{json, Value};
use sqlx::AnyPool;
use crate::books::domain::model::BookEntity;
use crate::books::dto::BookDto;
use crate::core::controller::AppState;
use crate::core::domain::Configuration;
use crate::core::events::DomainEvent;
use crate::core::library::LibraryError;
use crate::gateway::events::EventPublisher;
use crate::utils::sql::{build_pool, create_table};

// Every fixture opens its own in-memory database, so tests never observe each other's rows
// and teardown is simply dropping the pool.

pub(crate) const SEEDED_ISBN: &str = "123";

const SEED_BOOK: &str = "INSERT INTO books (isbn, amazon_url, author, language, pages, publisher, title, year) \
    VALUES ('123', 'https://amazon.com/test', 'Poe', 'English', 123, 'Test Publisher', 'A Test Book', 2021)";

pub(crate) fn test_config() -> Configuration {
    Configuration::new("sqlite::memory:")
}

pub(crate) async fn empty_pool() -> AnyPool {
    let pool = build_pool(&test_config()).await.expect("should open in-memory store");
    create_table(&pool).await.expect("should create books table");
    pool
}

pub(crate) async fn seeded_pool() -> AnyPool {
    let pool = empty_pool().await;
    sqlx::query(SEED_BOOK).execute(&pool).await.expect("should seed book");
    pool
}

pub(crate) async fn seeded_state() -> AppState {
    AppState::new(test_config(), seeded_pool().await)
}

pub(crate) fn test_book_entity(isbn: &str, title: &str) -> BookEntity {
    BookEntity {
        isbn: isbn.to_string(),
        amazon_url: format!("https://amazon.com/dp/{}", isbn),
        author: "Poe".to_string(),
        language: "English".to_string(),
        pages: 123,
        publisher: "Test Publisher".to_string(),
        title: title.to_string(),
        year: 2021,
    }
}

pub(crate) fn test_book_dto(isbn: &str, title: &str) -> BookDto {
    BookDto::from(&test_book_entity(isbn, title))
}

pub(crate) fn new_book_json() -> Value {
    json!({
        "isbn": "111",
        "amazon_url": "https://amazon.com",
        "author": "Testing",
        "language": "english",
        "pages": 1000,
        "publisher": "Test Publisher",
        "title": "New Book",
        "year": 2015
    })
}

// MemoryPublisher records "<kind>:<key>" for every published event
#[derive(Debug, Default, Clone)]
pub(crate) struct MemoryPublisher {
    pub(crate) events: Arc<Mutex<Vec<String>>>,
}

impl MemoryPublisher {
    pub(crate) fn recorded(&self) -> Vec<String> {
        self.events.lock().expect("events lock").clone()
    }
}

#[async_trait]
impl EventPublisher for MemoryPublisher {
    async fn publish(&self, event: &DomainEvent) -> Result<(), LibraryError> {
        self.events.lock().expect("events lock").push(format!("{:?}:{}", event.kind, event.key));
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub(crate) struct FailingPublisher {}

#[async_trait]
impl EventPublisher for FailingPublisher {
    async fn publish(&self, _event: &DomainEvent) -> Result<(), LibraryError> {
        Err(LibraryError::unavailable("event topic unreachable", None, true))
    }
}
