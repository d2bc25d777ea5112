//! Implements a struct that holds the state of the REST server.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use rusqlite::Connection;

use crate::{Error, db::initialize, pagination::PaginationConfig};

/// How long to wait for the seed dataset before giving up.
const SEED_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,

    /// The config that controls how to page transaction listings.
    pub pagination_config: PaginationConfig,

    /// The URL of the JSON dataset used to seed the database.
    pub seed_url: String,

    /// The HTTP client used to fetch the seed dataset.
    pub http_client: reqwest::Client,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized or the HTTP client cannot be built.
    pub fn new(
        db_connection: Connection,
        seed_url: &str,
        pagination_config: PaginationConfig,
    ) -> Result<Self, Error> {
        initialize(&db_connection)?;

        let http_client = reqwest::Client::builder()
            .timeout(SEED_REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            db_connection: Arc::new(Mutex::new(db_connection)),
            pagination_config,
            seed_url: seed_url.to_owned(),
            http_client,
        })
    }
}
