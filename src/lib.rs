//! A backend for a product sales dashboard.
//!
//! The database is seeded from a remote JSON dataset of product transactions.
//! This library provides a read-only REST API that lists, filters and
//! aggregates those transactions as JSON for tables and charts.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
mod dashboard;
mod database_id;
mod db;
pub mod endpoints;
mod error;
mod logging;
pub mod pagination;
mod routing;
mod transaction;

pub use app_state::AppState;
pub use dashboard::{
    CategoryCount, CombinedData, PriceRange, PriceRangeCount, Statistics, get_bar_chart,
    get_combined_data, get_pie_chart, get_statistics,
};
pub use database_id::TransactionId;
pub use db::{close as close_db, initialize as initialize_db};
pub use error::Error;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use transaction::{
    DEFAULT_SEED_URL, NewTransaction, Transaction, insert_transactions, list_transactions,
    parse_seed_documents,
};

/// How long in-flight requests get to finish after a shutdown signal.
const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_secs(1);

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
        },
    }

    handle.graceful_shutdown(Some(SHUTDOWN_GRACE_PERIOD));
}
