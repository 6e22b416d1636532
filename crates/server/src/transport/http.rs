//! HTTP transport: route table and server loop.

use crate::handler::{self, AppState};
use atxtraffic::Dataset;
use axum::Router;
use axum::routing::get;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Build the API router over a loaded dataset.
pub fn router(dataset: Arc<Dataset>) -> Router {
    Router::new()
        .route("/", get(handler::index))
        .route("/head", get(handler::head))
        .route("/shape", get(handler::shape))
        .route("/columns", get(handler::columns))
        .route("/info", get(handler::info))
        .route("/describe", get(handler::describe))
        .route("/UniqueValues", get(handler::unique_values))
        .route(
            "/FilterByValueAndYear",
            get(handler::filter_by_value_and_year),
        )
        .route("/ByHourRange", get(handler::by_hour_range))
        .route("/Nearby", get(handler::nearby))
        .route("/RushHourUT", get(handler::rush_hour))
        .fallback(handler::not_found)
        .with_state(AppState::new(dataset))
}

/// Serve the API on `listener` until `shutdown` resolves.
///
/// # Errors
/// Returns an error if the listener address cannot be read or the server
/// fails while accepting connections.
pub async fn run_server(
    listener: TcpListener,
    dataset: Arc<Dataset>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let (rows, columns) = dataset.shape();
    info!(
        "atxtraffic HTTP server listening on {} ({} rows, {} columns)",
        listener.local_addr()?,
        rows,
        columns
    );

    axum::serve(listener, router(dataset))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server stopped");
    Ok(())
}
