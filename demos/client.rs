// Example: send one command to a running scribe-relay server
//
// The client resolves the server address through the endpoint directory the
// way a deployed client would, sends a single framed command, and prints the
// JSON response.
//
// Usage:
//   cargo run --example client -- --command load_model --model-name base
//   cargo run --example client -- --audio-file sample.wav --mode create

use anyhow::Result;
use base64::Engine;
use clap::Parser;
use scribe_relay::{
    receive_message, send_message, Config, Endpoint, EndpointDirectory, FixedDirectory, Mode,
    Request,
};
use tokio::net::TcpStream;
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "client")]
#[command(about = "Send one command to a scribe-relay server")]
struct Args {
    /// Command to run (load_model, detect_language, transcribe, translate)
    #[arg(short, long, default_value = "transcribe")]
    command: String,

    /// Path to an audio file to submit inline
    #[arg(short, long)]
    audio_file: Option<String>,

    /// URL of an audio file to submit by reference
    #[arg(long)]
    audio_url: Option<String>,

    /// Forwarding mode (document, chat, create)
    #[arg(short, long, default_value = "document")]
    mode: String,

    /// Model name, for load_model
    #[arg(long)]
    model_name: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let args = Args::parse();
    let cfg = Config::load("config/scribe-relay")?;

    // Resolve the server address through the directory seam.
    let directory = FixedDirectory::new(Endpoint {
        host: cfg.discovery.advertise_host.clone(),
        port: cfg.discovery.advertise_port,
    });
    let endpoint = directory.resolve().await?;

    info!("Connecting to {}", endpoint.addr());
    let mut stream = TcpStream::connect(endpoint.addr()).await?;

    let audio_data = match &args.audio_file {
        Some(path) => {
            let bytes = tokio::fs::read(path).await?;
            Some(base64::engine::general_purpose::STANDARD.encode(bytes))
        }
        None => None,
    };

    let mode = match args.mode.as_str() {
        "chat" => Mode::Chat,
        "create" => Mode::Create,
        _ => Mode::Document,
    };

    let request = Request {
        command: args.command,
        audio_data,
        audio_url: args.audio_url,
        mode,
        model_name: args.model_name,
    };

    send_message(&mut stream, &request).await?;

    match receive_message(&mut stream).await? {
        Some(response) => println!("{}", serde_json::to_string_pretty(&response)?),
        None => info!("Server closed the connection without responding"),
    }

    Ok(())
}
