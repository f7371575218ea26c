use async_trait::async_trait;
use crate::core::events::DomainEvent;
use crate::core::library::LibraryError;
use crate::gateway::events::EventPublisher;

// LogPublisher writes each domain event as a structured log line
#[derive(Debug)]
pub struct LogPublisher {
    topic: String,
}

impl LogPublisher {
    pub(crate) fn new(topic: &str) -> Self {
        Self {
            topic: topic.to_string(),
        }
    }
}

#[async_trait]
impl EventPublisher for LogPublisher {
    async fn publish(&self, event: &DomainEvent) -> Result<(), LibraryError> {
        tracing::info!(
            topic = self.topic.as_str(),
            event_id = event.event_id.as_str(),
            name = event.name.as_str(),
            key = event.key.as_str(),
            kind = ?event.kind,
            data = event.json_data.as_str(),
            "domain event");
        Ok(())
    }
}

#[derive(Debug)]
pub struct DiscardPublisher {}

#[async_trait]
impl EventPublisher for DiscardPublisher {
    async fn publish(&self, _event: &DomainEvent) -> Result<(), LibraryError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::core::events::DomainEvent;
    use crate::gateway::factory::create_publisher;
    use crate::gateway::GatewayPublisherVia;

    #[tokio::test]
    async fn test_should_publish_to_logs() {
        let event = DomainEvent::added("books", "123", &"123").expect("build event");
        let publisher = create_publisher(GatewayPublisherVia::Logs);
        publisher.publish(&event).await.expect("should publish");
    }

    #[tokio::test]
    async fn test_should_discard_events() {
        let event = DomainEvent::deleted("books", "123", &"123").expect("build event");
        let publisher = create_publisher(GatewayPublisherVia::Discard);
        publisher.publish(&event).await.expect("should discard");
    }
}
