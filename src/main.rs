use std::sync::Arc;

use anyhow::Result;
use scribe_relay::{
    serve, CannedLoader, Config, Dispatcher, Endpoint, EndpointDirectory, FixedDirectory,
    ModelHost, NatsNotifier, NoopNotifier, Notifier, SessionRegistry,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cfg = Config::load("config/scribe-relay")?;

    info!("{} v0.1.0", cfg.service.name);
    info!(
        "TCP server will bind to {}:{}",
        cfg.service.tcp.bind, cfg.service.tcp.port
    );

    let host = Arc::new(ModelHost::new(Box::new(CannedLoader), &cfg.engine.default_model).await?);
    let registry = Arc::new(SessionRegistry::new());

    // The side-channel is best-effort end to end: if the broker is down at
    // startup the server still serves transcription.
    let notifier: Arc<dyn Notifier> =
        match NatsNotifier::connect(&cfg.notify.nats_url, cfg.notify.subject_prefix.clone()).await {
            Ok(notifier) => Arc::new(notifier),
            Err(e) => {
                warn!("Notification side-channel unavailable: {}", e);
                Arc::new(NoopNotifier)
            }
        };

    let advertised = Endpoint {
        host: cfg.discovery.advertise_host.clone(),
        port: cfg.discovery.advertise_port,
    };
    let directory = FixedDirectory::new(advertised.clone());
    directory.publish(&advertised).await?;

    let dispatcher = Arc::new(Dispatcher::new(host, registry, notifier));

    let addr = format!("{}:{}", cfg.service.tcp.bind, cfg.service.tcp.port);
    serve(&addr, dispatcher).await
}
