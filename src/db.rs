//! Database initialization and access to the shared connection.

use std::sync::{Arc, Mutex};

use rusqlite::{
    Connection, TransactionBehavior, Transaction as SqlTransaction, functions::FunctionFlags,
};

use crate::{Error, transaction::create_transaction_table};

/// Create all of the database tables for the application and register the
/// SQL functions the queries rely on.
///
/// Safe to call on an existing database: tables that already exist are left untouched.
///
/// # Errors
/// Returns an error if a table cannot be created or if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    register_functions(connection)?;

    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

/// Register `unicode_lower(text)`.
///
/// SQLite's built-in `lower` only folds ASCII letters.
fn register_functions(connection: &Connection) -> Result<(), Error> {
    connection.create_scalar_function(
        "unicode_lower",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |context| {
            let text = context.get::<Option<String>>(0)?;
            Ok(text.map(|text| text.to_lowercase()))
        },
    )?;

    Ok(())
}

/// Run `query` against the shared connection on the blocking thread pool.
///
/// SQLite calls block, so they are moved off the async workers. The lock is
/// held only for the duration of `query`.
///
/// # Errors
/// Returns [Error::DatabaseLockError] if the lock is poisoned,
/// [Error::BlockingTaskFailed] if the task panicked, or whatever `query` returns.
pub(crate) async fn with_connection<T, F>(
    db_connection: Arc<Mutex<Connection>>,
    query: F,
) -> Result<T, Error>
where
    F: FnOnce(&Connection) -> Result<T, Error> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let connection = db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        query(&connection)
    })
    .await
    .map_err(|error| {
        tracing::error!("database task did not complete: {error}");
        Error::BlockingTaskFailed(error.to_string())
    })?
}

/// Close the database connection once the server has stopped.
///
/// If another handle to the connection is still alive the connection is left
/// open and will be closed when the last handle is dropped.
///
/// # Errors
/// Returns an error if the lock is poisoned or SQLite fails to close the connection.
pub fn close(db_connection: Arc<Mutex<Connection>>) -> Result<(), Error> {
    let mutex = match Arc::try_unwrap(db_connection) {
        Ok(mutex) => mutex,
        Err(_) => {
            tracing::warn!("database connection is still in use, skipping explicit close");
            return Ok(());
        }
    };

    let connection = mutex
        .into_inner()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    connection.close().map_err(|(_, error)| error.into())
}
