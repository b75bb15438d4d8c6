//! airq-service - Air quality query service.
//!
//! Run with: `cargo run -p airq-service`

use std::io::Read;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use axum::Router;
use clap::{Parser, Subcommand};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use airq_service::{AppState, Config, GatewayEvent, Locale, api, gateway};
use airq_store::Store;

/// airq-service - Read-only query API over stored air quality observations.
#[derive(Parser, Debug)]
#[command(name = "airq-service")]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to configuration file.
    #[arg(short, long, global = true, env = "AIRQ_CONFIG")]
    config: Option<PathBuf>,

    /// Bind address (overrides config).
    #[arg(short, long, global = true, env = "AIRQ_BIND")]
    bind: Option<String>,

    /// Database path (overrides config).
    #[arg(short, long, global = true, env = "AIRQ_DATABASE")]
    database: Option<PathBuf>,

    /// Message and table language (overrides config).
    #[arg(short, long, global = true, env = "AIRQ_LOCALE", value_enum)]
    locale: Option<Locale>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server in the foreground (default behavior).
    Run,

    /// Resolve a single gateway event and print the reply as JSON.
    Invoke {
        /// Event file; reads stdin when omitted.
        #[arg(long)]
        event: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to stderr so `invoke` output stays clean.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("airq_service=info".parse()?)
                .add_directive("tower_http=debug".parse()?),
        )
        .init();

    let config = load_config(&args)?;

    match args.command {
        Some(Command::Invoke { event }) => invoke(config, event).await,
        Some(Command::Run) | None => run_server(config).await,
    }
}

/// Load the config file, apply CLI and environment overrides, validate.
fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };

    if let Some(bind) = &args.bind {
        config.server.bind = bind.clone();
    }
    if let Some(db_path) = &args.database {
        config.storage.path = db_path.clone();
    }
    if let Some(locale) = args.locale {
        config.display.locale = locale;
    }

    config.validate()?;
    Ok(config)
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    let store = Store::open(&config.storage.path)?;
    let state = AppState::new(store, &config);

    let app = Router::new()
        .merge(api::router())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("invalid bind address '{}'", config.server.bind))?;

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn invoke(config: Config, event_path: Option<PathBuf>) -> anyhow::Result<()> {
    let raw = match &event_path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read event file {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read event from stdin")?;
            buf
        }
    };
    let event: GatewayEvent = serde_json::from_str(&raw).context("malformed gateway event")?;

    let store = Store::open(&config.storage.path)?;
    let state = AppState::new(store, &config);

    let response = gateway::invoke(&state.resolver, &event).await;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
