use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

/// A reachable server address, as published for client discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Publish/resolve pair for the server's reachable address.
///
/// The deployed system fronted the listener with a tunnel and wrote the
/// public address to a hosted key-value store. Both live behind this trait,
/// so the protocol core runs and tests against a fixed address without the
/// tunnel. The server publishes once at startup; clients resolve once at
/// startup.
#[async_trait]
pub trait EndpointDirectory: Send + Sync {
    async fn publish(&self, endpoint: &Endpoint) -> Result<()>;

    async fn resolve(&self) -> Result<Endpoint>;
}

/// Directory fixed at construction time, for static deployments and tests.
pub struct FixedDirectory {
    endpoint: Endpoint,
}

impl FixedDirectory {
    pub fn new(endpoint: Endpoint) -> Self {
        Self { endpoint }
    }
}

#[async_trait]
impl EndpointDirectory for FixedDirectory {
    async fn publish(&self, endpoint: &Endpoint) -> Result<()> {
        info!("Published endpoint {}", endpoint.addr());
        Ok(())
    }

    async fn resolve(&self) -> Result<Endpoint> {
        Ok(self.endpoint.clone())
    }
}
