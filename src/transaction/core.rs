//! Defines the core data models and database queries for product transactions.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};

use crate::{Error, database_id::TransactionId};

// ============================================================================
// MODELS
// ============================================================================

/// A product listing together with whether, and when, it was sold.
///
/// Records are created by seeding and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID assigned by the database.
    pub id: TransactionId,
    /// The product name.
    pub title: String,
    /// A longer text description of the product.
    pub description: String,
    /// The sale price, never negative.
    pub price: f64,
    /// The product category, e.g. "electronics".
    pub category: String,
    /// A URL to an image of the product.
    pub image: String,
    /// Whether the product was sold.
    pub sold: bool,
    /// The date of sale exactly as it was received, e.g. "2021-11-27T20:29:54+05:30".
    pub date_of_sale: String,
}

/// A transaction that has not been stored yet.
///
/// Deserializes from the documents in the seed dataset. Fields the store
/// does not keep, such as the dataset's own `id`, are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    /// The product name.
    pub title: String,
    /// A longer text description of the product.
    #[serde(default)]
    pub description: String,
    /// The sale price.
    pub price: f64,
    /// The product category.
    pub category: String,
    /// A URL to an image of the product.
    #[serde(default)]
    pub image: String,
    /// Whether the product was sold.
    pub sold: bool,
    /// The date of sale.
    pub date_of_sale: String,
}

impl NewTransaction {
    /// Create a new transaction with an empty description and image.
    pub fn build(title: &str, price: f64, category: &str, sold: bool, date_of_sale: &str) -> Self {
        Self {
            title: title.to_owned(),
            description: String::new(),
            price,
            category: category.to_owned(),
            image: String::new(),
            sold,
            date_of_sale: date_of_sale.to_owned(),
        }
    }

    /// Set the description of the transaction.
    #[cfg(test)]
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }

    /// Parse and validate the seed document at position `index`.
    ///
    /// # Errors
    /// Returns [Error::InvalidDocument] if a required field is missing or has
    /// the wrong type, or if the price is negative or not a finite number.
    pub fn from_document(index: usize, document: serde_json::Value) -> Result<Self, Error> {
        let transaction: Self =
            serde_json::from_value(document).map_err(|error| Error::InvalidDocument {
                index,
                reason: error.to_string(),
            })?;

        if !transaction.price.is_finite() || transaction.price < 0.0 {
            return Err(Error::InvalidDocument {
                index,
                reason: format!("price must be a non-negative number, got {}", transaction.price),
            });
        }

        Ok(transaction)
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// The columns of a [Transaction] in the order [map_transaction_row] expects.
pub(crate) const TRANSACTION_COLUMNS: &str =
    "id, title, description, price, category, image, sold, date_of_sale";

/// SQL condition matching rows whose date of sale contains the `:month`
/// parameter, ignoring case. An empty `:month` matches every row.
pub(crate) const MONTH_FILTER: &str =
    "(:month = '' OR instr(unicode_lower(date_of_sale), unicode_lower(:month)) > 0)";

/// Insert `transactions` as new records in a single database transaction.
///
/// Either all of the transactions are inserted or none are. Nothing is
/// deduplicated, inserting the same transactions twice stores them twice.
///
/// # Errors
/// Returns [Error::SqlError] if any insert fails.
pub fn insert_transactions(
    transactions: &[NewTransaction],
    connection: &Connection,
) -> Result<usize, Error> {
    let sql_transaction = connection.unchecked_transaction()?;

    {
        let mut statement = sql_transaction.prepare(
            "INSERT INTO product_transaction (title, description, price, category, image, sold, date_of_sale)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )?;

        for transaction in transactions {
            statement.execute((
                &transaction.title,
                &transaction.description,
                transaction.price,
                &transaction.category,
                &transaction.image,
                transaction.sold,
                &transaction.date_of_sale,
            ))?;
        }
    }

    sql_transaction.commit()?;

    Ok(transactions.len())
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
#[cfg(test)]
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM product_transaction;", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS product_transaction (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                price REAL NOT NULL CHECK (price >= 0),
                category TEXT NOT NULL,
                image TEXT NOT NULL,
                sold INTEGER NOT NULL,
                date_of_sale TEXT NOT NULL
                )",
        (),
    )?;

    // Every read filters on the date of sale.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_product_transaction_date_of_sale
            ON product_transaction(date_of_sale);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        price: row.get(3)?,
        category: row.get(4)?,
        image: row.get(5)?,
        sold: row.get(6)?,
        date_of_sale: row.get(7)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod model_tests {
    use serde_json::json;

    use crate::{Error, transaction::NewTransaction};

    #[test]
    fn parses_seed_document() {
        let document = json!({
            "id": 1,
            "title": "Fjallraven  - Foldsack No. 1 Backpack, Fits 15 Laptops",
            "price": 329.85,
            "description": "Your perfect pack for everyday use",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
            "sold": false,
            "dateOfSale": "2021-11-27T20:29:54+05:30"
        });

        let got = NewTransaction::from_document(0, document).expect("Could not parse document");

        assert_eq!(got.title, "Fjallraven  - Foldsack No. 1 Backpack, Fits 15 Laptops");
        assert_eq!(got.price, 329.85);
        assert_eq!(got.category, "men's clothing");
        assert!(!got.sold);
        assert_eq!(got.date_of_sale, "2021-11-27T20:29:54+05:30");
    }

    #[test]
    fn optional_fields_default_to_empty() {
        let document = json!({
            "title": "A",
            "price": 50,
            "category": "X",
            "sold": true,
            "dateOfSale": "2022-03-01"
        });

        let got = NewTransaction::from_document(0, document).expect("Could not parse document");

        assert_eq!(got, NewTransaction::build("A", 50.0, "X", true, "2022-03-01"));
    }

    #[test]
    fn rejects_missing_field() {
        let document = json!({"title": "A", "price": 50, "category": "X", "sold": true});

        let got = NewTransaction::from_document(3, document);

        assert!(
            matches!(got, Err(Error::InvalidDocument { index: 3, .. })),
            "want InvalidDocument at index 3, got {got:?}"
        );
    }

    #[test]
    fn rejects_wrong_type() {
        let document = json!({
            "title": "A",
            "price": "fifty",
            "category": "X",
            "sold": true,
            "dateOfSale": "2022-03-01"
        });

        assert!(matches!(
            NewTransaction::from_document(0, document),
            Err(Error::InvalidDocument { .. })
        ));
    }

    #[test]
    fn rejects_negative_price() {
        let document = json!({
            "title": "A",
            "price": -1.5,
            "category": "X",
            "sold": true,
            "dateOfSale": "2022-03-01"
        });

        assert!(matches!(
            NewTransaction::from_document(0, document),
            Err(Error::InvalidDocument { .. })
        ));
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let transaction = crate::transaction::Transaction {
            id: 1,
            title: "A".to_owned(),
            description: "desc".to_owned(),
            price: 50.0,
            category: "X".to_owned(),
            image: String::new(),
            sold: true,
            date_of_sale: "2022-03-01".to_owned(),
        };

        let got = serde_json::to_value(&transaction).unwrap();

        assert_eq!(
            got,
            json!({
                "id": 1,
                "title": "A",
                "description": "desc",
                "price": 50.0,
                "category": "X",
                "image": "",
                "sold": true,
                "dateOfSale": "2022-03-01"
            })
        );
    }
}
