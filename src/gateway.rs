pub mod events;
pub mod logs;
pub mod factory;

#[derive(Debug, PartialEq, Clone, Copy)]
pub(crate) enum GatewayPublisherVia {
    Logs,
    Discard,
}
