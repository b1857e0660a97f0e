//! Document Q&A server binary
//!
//! Run with: cargo run -p doc-reader --bin doc-reader-server -- --config doc-reader.toml

use clap::Parser;
use doc_reader::{config::DocReaderConfig, server::DocReaderServer};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(version, about = "Upload documents and ask questions about them")]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "DOC_READER_CONFIG")]
    config: Option<PathBuf>,

    /// Host address to bind
    #[arg(long, env = "DOC_READER_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "DOC_READER_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "doc_reader=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    // Load configuration
    let mut config = DocReaderConfig::load(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    tracing::info!("Configuration loaded");
    tracing::info!("  - Backend: {:?}", config.backend.provider);
    tracing::info!("  - Max upload size: {} bytes", config.server.max_upload_size);

    let server = DocReaderServer::new(config)?;

    println!("\nServer starting...");
    println!("  API: http://{}", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("\nEndpoints:");
    println!("  POST   /documents                - Upload a document or image");
    println!("  GET    /documents                - List documents");
    println!("  POST   /documents/:id/question   - Ask about one document");
    println!("  POST   /documents/cross-check    - Compare 2-5 documents");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
