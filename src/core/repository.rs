use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::library::LibraryResult;

// Every call maps to exactly one SQL statement.
#[async_trait]
pub trait Repository<Entity>: Sync + Send {
    // create an entity, failing with DuplicateKey if its id is taken
    async fn create(&self, entity: &Entity) -> LibraryResult<Entity>;

    // replaces the non-key fields of an existing entity
    async fn update(&self, entity: &Entity) -> LibraryResult<Entity>;

    // get an entity
    async fn get(&self, id: &str) -> LibraryResult<Entity>;

    // delete an entity, failing with NotFound if nothing was removed
    async fn delete(&self, id: &str) -> LibraryResult<usize>;

    // all entities in a stable order
    async fn list(&self) -> LibraryResult<Vec<Entity>>;
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub enum RepositoryStore {
    Postgres,
    Sqlite,
}

impl RepositoryStore {
    pub fn from_url(url: &str) -> Self {
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            RepositoryStore::Postgres
        } else {
            RepositoryStore::Sqlite
        }
    }

    pub fn is_in_memory(url: &str) -> bool {
        url.starts_with("sqlite::memory:") || url.contains("mode=memory")
    }
}
