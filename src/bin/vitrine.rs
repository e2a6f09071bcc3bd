//! Vitrine server binary.
//!
//! Loads the lexicon and product catalog, then serves the product search
//! API over HTTP.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use vitrine::catalog::MemoryCatalog;
use vitrine::http::{AppState, StoreSettings, router};
use vitrine::interpret::{Lexicon, QueryInterpreter};

#[derive(Debug, Parser)]
#[command(name = "vitrine", version = vitrine::VERSION, about = "Product search API server")]
struct VitrineArgs {
    /// Address to bind.
    #[arg(long, env = "VITRINE_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on.
    #[arg(long, env = "VITRINE_PORT", default_value_t = 3000)]
    port: u16,

    /// Lexicon JSON file; built-in dictionaries are used when omitted.
    #[arg(long, env = "VITRINE_LEXICON")]
    lexicon: Option<PathBuf>,

    /// Products JSON file (array of products) to load at startup.
    #[arg(long, env = "VITRINE_PRODUCTS")]
    products: Option<PathBuf>,

    /// Per-attempt catalog store timeout in milliseconds.
    #[arg(long, default_value_t = 5000)]
    store_timeout_ms: u64,

    /// Increase log verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = VitrineArgs::parse();

    let default_level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("vitrine={default_level}"))),
        )
        .init();

    let lexicon = match &args.lexicon {
        Some(path) => {
            Lexicon::load_from_file(path).context("failed to load lexicon")?
        }
        None => Lexicon::default(),
    };
    let interpreter = Arc::new(QueryInterpreter::new(Arc::new(lexicon)));

    let store = match &args.products {
        Some(path) => MemoryCatalog::load_from_file(path).context("failed to load products")?,
        None => MemoryCatalog::new(),
    };
    tracing::info!(products = store.len(), "catalog loaded");

    let state = AppState {
        store: Arc::new(store),
        interpreter,
        settings: StoreSettings {
            timeout: Duration::from_millis(args.store_timeout_ms),
            ..Default::default()
        },
    };

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, router(state))
        .await
        .context("server error")?;

    Ok(())
}
