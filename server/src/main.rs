use anyhow::Result;
use axum::Router;
use clap::Parser;
use furqan_core::SearchEngine;
use furqan_corpus::CachePaths;
use furqan_server::build_app;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Cache directory for the raw corpus downloads
    #[arg(long, default_value = "./quran_cache")]
    cache_dir: String,
    /// Directory with the built frontend assets
    #[arg(long, default_value = "./build")]
    static_dir: String,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 5000)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    // The corpus and index are fully built before the listener opens; no
    // request ever sees a partially built engine.
    let corpus = furqan_corpus::load_corpus(&CachePaths::new(&args.cache_dir)).await?;
    tracing::info!(num_verses = corpus.len(), "corpus loaded");
    let engine = Arc::new(SearchEngine::new(corpus));

    let app: Router = build_app(engine, &args.static_dir)?;
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
