//! Seeding the database from the remote product transaction dataset.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::Serialize;

use crate::{AppState, Error, db::with_connection};

use super::core::{NewTransaction, insert_transactions};

/// Where the product transaction dataset is fetched from by default.
pub const DEFAULT_SEED_URL: &str = "https://s3.amazonaws.com/roxiler.com/product_transaction.json";

/// The state needed to seed the database.
#[derive(Debug, Clone)]
pub struct SeedState {
    /// The database connection for storing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The URL of the JSON dataset.
    pub seed_url: String,
    /// The client used to fetch the dataset.
    pub http_client: reqwest::Client,
}

impl FromRef<AppState> for SeedState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            seed_url: state.seed_url.clone(),
            http_client: state.http_client.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SeedResponse {
    message: &'static str,
    count: usize,
}

/// A route handler that fetches the dataset and inserts every record into the database.
pub async fn get_seed_endpoint(State(state): State<SeedState>) -> Response {
    match seed(&state).await {
        Ok(count) => Json(SeedResponse {
            message: "Database seeded successfully",
            count,
        })
        .into_response(),
        Err(error) => error.into_message_response("Error seeding database"),
    }
}

/// Fetch the dataset from [SeedState::seed_url] and insert all of its records.
///
/// Records are appended, seeding twice stores every record twice.
///
/// # Errors
/// Returns:
/// - [Error::FetchError] if the dataset cannot be fetched or is not a JSON array,
/// - [Error::InvalidDocument] if a record in the dataset is malformed,
/// - or [Error::SqlError] if the records cannot be inserted.
pub(crate) async fn seed(state: &SeedState) -> Result<usize, Error> {
    let documents = fetch_seed_documents(&state.http_client, &state.seed_url).await?;
    let transactions = parse_seed_documents(documents)?;

    let count = with_connection(state.db_connection.clone(), move |connection| {
        insert_transactions(&transactions, connection)
    })
    .await?;

    tracing::info!("Seeded database with {count} transactions from {}", state.seed_url);

    Ok(count)
}

/// Fetch the JSON array at `url`.
///
/// # Errors
/// Returns [Error::FetchError] if the request fails, the server does not
/// respond with a success status, or the body is not a JSON array.
pub(crate) async fn fetch_seed_documents(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<serde_json::Value>, Error> {
    let documents = client
        .get(url)
        .send()
        .await
        .inspect_err(|error| tracing::error!("could not reach {url}: {error}"))?
        .error_for_status()?
        .json::<Vec<serde_json::Value>>()
        .await?;

    Ok(documents)
}

/// Validate every document in the dataset.
///
/// # Errors
/// Returns [Error::InvalidDocument] for the first malformed document.
pub fn parse_seed_documents(
    documents: Vec<serde_json::Value>,
) -> Result<Vec<NewTransaction>, Error> {
    documents
        .into_iter()
        .enumerate()
        .map(|(index, document)| NewTransaction::from_document(index, document))
        .collect()
}
