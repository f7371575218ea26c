use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::utils::date::{serializer};

// DomainEventType defines type of event for domain changes
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub enum DomainEventType {
    Added,
    Updated,
    Deleted,
}

// DomainEvent records a single committed change to a book
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct DomainEvent {
    pub event_id: String,
    pub name: String,
    pub key: String,
    pub kind: DomainEventType,
    pub json_data: String,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
}

impl DomainEvent {
    pub fn added<T: Serialize>(name: &str, key: &str, data: &T) -> serde_json::Result<Self> {
        Self::build(name, key, DomainEventType::Added, data)
    }

    pub fn updated<T: Serialize>(name: &str, key: &str, data: &T) -> serde_json::Result<Self> {
        Self::build(name, key, DomainEventType::Updated, data)
    }

    pub fn deleted<T: Serialize>(name: &str, key: &str, data: &T) -> serde_json::Result<Self> {
        Self::build(name, key, DomainEventType::Deleted, data)
    }

    fn build<T: Serialize>(name: &str, key: &str, kind: DomainEventType, data: &T) -> serde_json::Result<Self> {
        Ok(DomainEvent {
            event_id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            key: key.to_string(),
            kind,
            json_data: serde_json::to_string(data)?,
            created_at: Utc::now().naive_utc(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use crate::core::events::{DomainEvent, DomainEventType};

    #[tokio::test]
    async fn test_should_build_added() {
        let data = HashMap::from([("isbn", "123")]);
        let event = DomainEvent::added("books", "123", &data).expect("build event");
        assert_eq!("books", event.name.as_str());
        assert_eq!("123", event.key.as_str());
        assert_eq!(DomainEventType::Added, event.kind);
        assert_eq!(r#"{"isbn":"123"}"#, event.json_data.as_str());
    }

    #[tokio::test]
    async fn test_should_build_updated() {
        let event = DomainEvent::updated("books", "123", &"title").expect("build event");
        assert_eq!(DomainEventType::Updated, event.kind);
        assert_eq!(r#""title""#, event.json_data.as_str());
    }

    #[tokio::test]
    async fn test_should_build_deleted() {
        let first = DomainEvent::deleted("books", "123", &"123").expect("build event");
        let second = DomainEvent::deleted("books", "123", &"123").expect("build event");
        assert_eq!(DomainEventType::Deleted, first.kind);
        assert_ne!(first.event_id, second.event_id);
    }
}
