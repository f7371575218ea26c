use crate::gateway::events::EventPublisher;
use crate::gateway::GatewayPublisherVia;
use crate::gateway::logs::publisher::{DiscardPublisher, LogPublisher};

pub(crate) fn create_publisher(via: GatewayPublisherVia) -> Box<dyn EventPublisher> {
    match via {
        GatewayPublisherVia::Logs => Box::new(LogPublisher::new("books")),
        GatewayPublisherVia::Discard => Box::new(DiscardPublisher {}),
    }
}
