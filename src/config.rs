use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub engine: EngineConfig,
    pub notify: NotifyConfig,
    pub discovery: DiscoveryConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub tcp: TcpConfig,
}

#[derive(Debug, Deserialize)]
pub struct TcpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct EngineConfig {
    /// Model loaded at startup, before any `load_model` command.
    pub default_model: String,
}

#[derive(Debug, Deserialize)]
pub struct NotifyConfig {
    pub nats_url: String,
    /// Transcript subjects are `<prefix>.<mode subject>`.
    pub subject_prefix: String,
}

#[derive(Debug, Deserialize)]
pub struct DiscoveryConfig {
    /// Address published for clients, which may differ from the bind
    /// address when the listener sits behind a tunnel.
    pub advertise_host: String,
    pub advertise_port: u16,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
