use anyhow::{Context, Result};
use clap::Parser;
use sat_downloader::settings::Settings;
use sat_downloader::web::{self, AppState};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Serves the satellite data search form.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// TOML file with server settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on, overrides the settings file
    #[arg(short, long)]
    listen: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_ref())
        .with_context(|| format!("loading settings from {:?}", args.config))?;
    if let Some(listen) = args.listen {
        settings.listen = listen;
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .context("invalid log level")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let app = web::router(AppState::new());

    info!("Satellite Data Downloader listening on http://{}", settings.listen);
    let listener = tokio::net::TcpListener::bind(settings.listen).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
