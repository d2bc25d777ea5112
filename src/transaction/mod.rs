//! Product transaction records.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `NewTransaction` for records that are about to be stored
//! - Database functions for creating the table and bulk inserting records
//! - The seed loader that fills the database from the remote dataset
//! - The filtered, paginated transaction listing

mod core;
mod query;
mod seed;

pub use self::core::{
    NewTransaction, Transaction, create_transaction_table, insert_transactions,
};
pub use query::{get_transactions_endpoint, list_transactions};
pub use seed::{DEFAULT_SEED_URL, get_seed_endpoint, parse_seed_documents};

pub(crate) use self::core::MONTH_FILTER;

#[cfg(test)]
pub use self::core::{count_transactions, map_transaction_row};
