use std::{
    error::Error,
    fs::OpenOptions,
    io,
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use axum::{
    Router,
    extract::{FromRef, MatchedPath, Request},
};
use axum_server::Handle;
use clap::Parser;
use rusqlite::Connection;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use transaction_dashboard::{
    AppState, DEFAULT_SEED_URL, PaginationConfig, SeedState, build_router, graceful_shutdown,
    load_seed_data, seed_source_from_location,
};

/// The REST API server for the product transaction dashboard.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long, env = "DB_PATH", default_value = "transactions.db")]
    db_path: String,

    /// The address to serve the API from.
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    host: IpAddr,

    /// The port to serve the API from.
    #[arg(short, long, env = "PORT", default_value_t = 5000)]
    port: u16,

    /// The URL or file path of the JSON seed data.
    #[arg(long, env = "SEED_SOURCE", default_value = DEFAULT_SEED_URL)]
    seed_source: String,

    /// Serve the transactions already in the database instead of loading the seed data on start up.
    #[arg(long)]
    skip_seed: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    setup_logging()?;

    let conn = Connection::open(&args.db_path)?;
    let seed_source = seed_source_from_location(&args.seed_source)?;
    let state = AppState::new(conn, seed_source, PaginationConfig::default())?;

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    if args.skip_seed {
        tracing::info!("Skipping seed data, serving transactions in {}", args.db_path);
        state.readiness.mark_ready();
    } else {
        tokio::spawn(load_seed_data_when_listening(
            SeedState::from_ref(&state),
            handle.clone(),
        ));
    }

    let router = add_tracing_layer(build_router(state));

    let addr = SocketAddr::new(args.host, args.port);
    tracing::info!("HTTP server listening on {}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await?;

    Ok(())
}

/// Load the seed data once the server has bound its address so that clients
/// get a 503 response rather than a refused connection while the data loads.
async fn load_seed_data_when_listening(state: SeedState, handle: Handle<SocketAddr>) {
    if handle.listening().await.is_none() {
        return;
    }

    if let Err(error) = load_seed_data(&state).await {
        tracing::error!(
            "Could not load seed data, retry with the initialize endpoint: {}",
            error
        );
    }
}

fn setup_logging() -> io::Result<()> {
    let stdout_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_filter(stdout_filter);

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("debug.log")?;

    let debug_log = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(Arc::new(log_file))
        .with_filter(filter::LevelFilter::DEBUG);

    tracing_subscriber::registry()
        .with(stdout_log)
        .with(debug_log)
        .init();

    Ok(())
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but errors are
        // logged where they are converted into responses.
        .on_failure(());

    router.layer(tracing_layer)
}
