//! Listing transactions filtered by month of sale and free-text search.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use rusqlite::{Connection, named_params};
use serde::Deserialize;

use crate::{
    AppState, Error,
    db::with_connection,
    pagination::{Pagination, PaginationConfig, deserialize_page_number},
};

use super::core::{MONTH_FILTER, TRANSACTION_COLUMNS, Transaction, map_transaction_row};

/// The state needed to list transactions.
#[derive(Debug, Clone)]
pub struct TransactionsState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The config that controls how to page the results.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for TransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// The query string parameters for listing transactions.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsQuery {
    /// Only include transactions whose date of sale contains this text.
    pub month: Option<String>,
    /// Only include transactions whose title, description or price contains this text.
    pub search: Option<String>,
    /// The page to return, starting from 1.
    #[serde(default, deserialize_with = "deserialize_page_number")]
    pub page: Option<u64>,
    /// The number of transactions per page.
    #[serde(default, deserialize_with = "deserialize_page_number")]
    pub per_page: Option<u64>,
}

/// A route handler that returns a page of transactions as a JSON array.
pub async fn get_transactions_endpoint(
    State(state): State<TransactionsState>,
    Query(query): Query<TransactionsQuery>,
) -> Response {
    let pagination = Pagination::resolve(query.page, query.per_page, &state.pagination_config);
    let month = query.month.unwrap_or_default();
    let search = query.search.unwrap_or_default();

    let result = with_connection(state.db_connection, move |connection| {
        list_transactions(&month, &search, pagination, connection)
    })
    .await;

    match result {
        Ok(transactions) => Json(transactions).into_response(),
        Err(error) => error.into_message_response("Error fetching transactions"),
    }
}

/// Get a page of transactions ordered by ID.
///
/// A transaction is included when its date of sale contains `month` and its
/// title, description or price contains `search`. Both checks ignore case and
/// an empty string matches every transaction.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn list_transactions(
    month: &str,
    search: &str,
    pagination: Pagination,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let query = format!(
        "SELECT {TRANSACTION_COLUMNS} FROM product_transaction
        WHERE {MONTH_FILTER}
        AND (
            :search = ''
            OR instr(unicode_lower(title), unicode_lower(:search)) > 0
            OR instr(unicode_lower(description), unicode_lower(:search)) > 0
            OR instr(CAST(price AS TEXT), :search) > 0
        )
        ORDER BY id ASC
        LIMIT :limit OFFSET :offset"
    );

    connection
        .prepare(&query)?
        .query_map(
            named_params! {
                ":month": month,
                ":search": search,
                ":limit": pagination.limit(),
                ":offset": pagination.offset(),
            },
            map_transaction_row,
        )?
        .collect::<Result<Vec<Transaction>, rusqlite::Error>>()
        .map_err(|error| error.into())
}
