use std::net::SocketAddr;
use std::path::PathBuf;

use agenda_core::EventStore;
use anyhow::{Context, Result};
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};

use agenda::routes;
use agenda::singleton;
use agenda::state::AppState;

const DEFAULT_PORT: u16 = 4280;

#[derive(Parser)]
#[command(name = "agenda")]
#[command(about = "Personal calendar with a web UI on localhost")]
struct Cli {
    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Snapshot file to read and write (defaults to the platform data dir)
    #[arg(long)]
    data_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let path = match cli.data_file {
        Some(path) => path,
        None => EventStore::default_path()?,
    };

    // Ensure only one instance writes this snapshot
    let _lock = singleton::acquire(&path)?;

    let store = EventStore::open(&path)
        .with_context(|| format!("Failed to load events from {}", path.display()))?;
    println!(
        "agenda: {} afspraken geladen uit {}",
        store.events().len(),
        path.display()
    );

    let state = AppState::new(store);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::router().with_state(state).layer(cors);

    let addr = SocketAddr::from(([127, 0, 0, 1], cli.port));
    println!("agenda listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
