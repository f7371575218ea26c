use std::env;
use serde::{Deserialize, Serialize};
use crate::core::repository::RepositoryStore;
use crate::gateway::GatewayPublisherVia;

// Identifiable defines common traits that can be shared by persistent objects
pub trait Identifiable : Sync + Send {
    fn id(&self) -> String;
}

// RuntimeMode selects how the binary receives HTTP requests
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub enum RuntimeMode {
    Http,
    Lambda,
}

impl From<String> for RuntimeMode {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "lambda" => RuntimeMode::Lambda,
            "http" => RuntimeMode::Http,
            other => {
                tracing::warn!(runtime = other, "unknown runtime mode, serving over http");
                RuntimeMode::Http
            }
        }
    }
}

pub const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";

// Configuration abstracts config options for the books service
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Configuration {
    pub database_url: String,
    pub listen_addr: String,
    pub runtime: RuntimeMode,
    pub publish_events: bool,
}

impl Configuration {
    pub fn new(database_url: &str) -> Self {
        Configuration {
            database_url: database_url.to_string(),
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            runtime: RuntimeMode::Http,
            publish_events: true,
        }
    }

    pub fn from_env() -> Self {
        let database_url = env::var("BOOKS_DATABASE_URL")
            .or_else(|_| env::var("DATABASE_URL"))
            .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let listen_addr = env::var("BOOKS_LISTEN_ADDR")
            .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string());
        let runtime = env::var("BOOKS_RUNTIME")
            .map(RuntimeMode::from)
            .unwrap_or(RuntimeMode::Http);
        let publish_events = env::var("BOOKS_EVENTS")
            .map(|v| v.to_lowercase() != "none")
            .unwrap_or(true);
        Configuration {
            database_url,
            listen_addr,
            runtime,
            publish_events,
        }
    }

    pub fn store(&self) -> RepositoryStore {
        RepositoryStore::from_url(self.database_url.as_str())
    }

    pub(crate) fn gateway_publisher(&self) -> GatewayPublisherVia {
        if self.publish_events {
            GatewayPublisherVia::Logs
        } else {
            GatewayPublisherVia::Discard
        }
    }
}
