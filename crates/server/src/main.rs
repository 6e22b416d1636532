use anyhow::Context;
use atxtraffic::{Config, Dataset};
use atxtraffic_server::run_server;
use clap::Parser;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 8052)]
    port: u16,

    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Incident CSV loaded at startup
    #[arg(short, long, default_value = "atxtraffic.csv")]
    data: PathBuf,

    /// Query configuration (.json or .toml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn load_config(path: &Path) -> anyhow::Result<Config> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => Config::from_toml(&text)?,
        _ => Config::from_json(&text)?,
    };
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "atxtraffic_server=info,atxtraffic=info,info".into()),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            info!("Using config {}", path.display());
            load_config(path)?
        }
        None => Config::default(),
    };

    info!("Loading Austin traffic data from {}", args.data.display());
    let dataset = Dataset::builder()
        .path(&args.data)
        .config(config)
        .build()
        .with_context(|| format!("loading dataset {}", args.data.display()))?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for ctrl_c signal: {}", e);
            std::future::pending::<()>().await;
        }
    };

    run_server(listener, Arc::new(dataset), shutdown).await?;

    Ok(())
}
