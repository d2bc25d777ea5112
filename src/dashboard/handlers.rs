//! Dashboard HTTP handlers.
//!
//! Every handler takes an optional `month` query parameter and responds with
//! JSON, or with a 500 and a fixed message if the database query fails.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState,
    db::with_connection,
    pagination::{Pagination, PaginationConfig},
};

use super::{
    bar_chart::get_bar_chart, combined::get_combined_data, pie_chart::get_pie_chart,
    statistics::get_statistics,
};

/// The state needed for the dashboard endpoints.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// Controls the size of the transaction page in the combined data.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// The query string for the dashboard endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    /// Only include transactions whose date of sale contains this text.
    pub month: Option<String>,
}

/// A route handler for the sales statistics of a month.
pub async fn get_statistics_endpoint(
    State(state): State<DashboardState>,
    Query(query): Query<MonthQuery>,
) -> Response {
    let month = query.month.unwrap_or_default();

    match with_connection(state.db_connection, move |connection| {
        get_statistics(&month, connection)
    })
    .await
    {
        Ok(statistics) => Json(statistics).into_response(),
        Err(error) => error.into_message_response("Error fetching statistics"),
    }
}

/// A route handler for the price range histogram of a month.
pub async fn get_bar_chart_endpoint(
    State(state): State<DashboardState>,
    Query(query): Query<MonthQuery>,
) -> Response {
    let month = query.month.unwrap_or_default();

    match with_connection(state.db_connection, move |connection| {
        get_bar_chart(&month, connection)
    })
    .await
    {
        Ok(bar_chart_data) => Json(bar_chart_data).into_response(),
        Err(error) => error.into_message_response("Error fetching bar chart data"),
    }
}

/// A route handler for the category distribution of a month.
pub async fn get_pie_chart_endpoint(
    State(state): State<DashboardState>,
    Query(query): Query<MonthQuery>,
) -> Response {
    let month = query.month.unwrap_or_default();

    match with_connection(state.db_connection, move |connection| {
        get_pie_chart(&month, connection)
    })
    .await
    {
        Ok(pie_chart_data) => Json(pie_chart_data).into_response(),
        Err(error) => error.into_message_response("Error fetching pie chart data"),
    }
}

/// A route handler for the transactions, statistics and charts of a month in one response.
pub async fn get_combined_data_endpoint(
    State(state): State<DashboardState>,
    Query(query): Query<MonthQuery>,
) -> Response {
    let month = query.month.unwrap_or_default();
    let pagination = Pagination::first_page(&state.pagination_config);

    match get_combined_data(state.db_connection, month, pagination).await {
        Ok(combined_data) => Json(combined_data).into_response(),
        Err(error) => error.into_message_response("Error fetching combined data"),
    }
}
