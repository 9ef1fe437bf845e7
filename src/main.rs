use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::info;

use m3u_tuner::{
    config::{Config, LogFormat, defaults::DEFAULT_CONFIG_FILE},
    lineup::UrlMode,
    observability::{TunerMetrics, init_logging},
    web::{AppState, WebServer, shutdown_signal},
};

#[derive(Parser)]
#[command(name = "m3u-tuner")]
#[command(version)]
#[command(about = "Expose an M3U playlist as a network tuner that DVR clients can discover")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Configuration file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE, global = true)]
    config: String,

    /// Listening IP address
    #[arg(short = 'H', long, value_name = "IP", global = true)]
    host: Option<String>,

    /// Listening port
    #[arg(short, long, value_name = "PORT", global = true)]
    port: Option<u16>,

    /// Externally reachable base URL
    #[arg(long, value_name = "URL", env = "M3U_TUNER_BASE_URL", global = true)]
    base_url: Option<String>,

    /// Lineup URL mode (direct or indirect)
    #[arg(long, value_name = "MODE", global = true)]
    url_mode: Option<UrlMode>,

    /// Log level
    #[arg(short = 'v', long, global = true)]
    log_level: Option<String>,

    /// Log format (text or json)
    #[arg(long, value_name = "FORMAT", global = true)]
    log_format: Option<LogFormat>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the tuner HTTP service (default)
    Serve,
    /// Fetch the playlist once and write the lineup JSON
    ExportLineup {
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Cli {
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.web.host = host.clone();
        }
        if let Some(port) = self.port {
            config.web.port = port;
        }
        if let Some(base_url) = &self.base_url {
            config.web.base_url = Some(base_url.clone());
        }
        if let Some(url_mode) = self.url_mode {
            config.lineup.url_mode = url_mode;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = self.log_format {
            config.logging.format = format;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let created = Config::write_default_if_missing(&cli.config)?;
    let mut config = Config::load_from_file(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config))?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    init_logging(&config.logging)?;
    info!("Starting M3U Tuner v{}", env!("CARGO_PKG_VERSION"));
    if created {
        info!("Created default config file: {}", cli.config);
    }
    info!("Configuration loaded from: {}", cli.config);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::ExportLineup { output } => export_lineup(config, output).await,
    }
}

async fn serve(config: Config) -> Result<()> {
    let state = AppState::from_config(&config, TunerMetrics::new())?;
    info!(
        "Lineup URL mode: {}, base URL: {}",
        config.lineup.url_mode,
        state.emulator.base_url()
    );
    let server = WebServer::new(&config, state)?;

    let cancellation_token = CancellationToken::new();
    let signal_token = cancellation_token.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        signal_token.cancel();
    });

    let (ready_tx, ready_rx) = tokio::sync::oneshot::channel();
    let server_handle = tokio::spawn(
        server.serve_with_cancellation(ready_tx, cancellation_token),
    );

    match ready_rx.await {
        Ok(Ok(addr)) => info!("Tuner ready at http://{}", addr),
        Ok(Err(e)) => return Err(e),
        Err(_) => anyhow::bail!("Web server exited before it started listening"),
    }

    server_handle.await??;
    info!("Shutdown complete");
    Ok(())
}

async fn export_lineup(config: Config, output: Option<PathBuf>) -> Result<()> {
    let state = AppState::from_config(&config, TunerMetrics::new())?;
    let emulator = &state.emulator;

    let index = emulator
        .load_lineup()
        .await
        .with_context(|| format!("Failed to fetch playlist from {}", emulator.source().describe()))?;
    let json = serde_json::to_string_pretty(&index.to_response(emulator.base_url()))?;

    match output {
        Some(path) => {
            tokio::fs::write(&path, json)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {} lineup entries to {}", index.len(), path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
