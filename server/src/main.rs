use anyhow::Result;
use clap::Parser;
use server::build_app;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

/// HTTP search API over a directory of .txt documents.
///
/// Mutating endpoints need `X-ADMIN-TOKEN` to match `ADMIN_TOKEN`;
/// `CORS_ALLOW_ORIGIN` restricts origins; `RUST_LOG` sets the log filter.
#[derive(Parser)]
#[command(name = "server")]
struct Args {
    /// Database directory holding one .txt file per document
    #[arg(long, default_value = "./db")]
    db: String,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;

    // Indexing the whole db reads every document; keep it off the runtime.
    let db = args.db;
    let app = tokio::task::spawn_blocking(move || build_app(db)).await??;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "search api listening");
    axum::serve(listener, app).await?;
    Ok(())
}
