//! Summary statistics for the transactions sold in a month.

use rusqlite::{Connection, named_params};
use serde::{Deserialize, Serialize};

use crate::{Error, transaction::MONTH_FILTER};

/// Sales totals over the transactions that match a month filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// The sum of the price of every matching transaction, 0 if there are none.
    pub total_sale_amount: f64,
    /// The number of matching transactions that were sold.
    pub total_sold_items: u32,
    /// The number of matching transactions that were not sold.
    pub total_not_sold_items: u32,
}

/// Calculate the [Statistics] for transactions whose date of sale contains `month`.
///
/// An empty `month` includes every transaction.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn get_statistics(month: &str, connection: &Connection) -> Result<Statistics, Error> {
    let query = format!(
        "SELECT
            COALESCE(SUM(price), 0.0),
            COALESCE(SUM(CASE WHEN sold THEN 1 ELSE 0 END), 0),
            COALESCE(SUM(CASE WHEN sold THEN 0 ELSE 1 END), 0)
        FROM product_transaction
        WHERE {MONTH_FILTER}"
    );

    connection
        .query_row(&query, named_params! {":month": month}, |row| {
            Ok(Statistics {
                total_sale_amount: row.get(0)?,
                total_sold_items: row.get(1)?,
                total_not_sold_items: row.get(2)?,
            })
        })
        .map_err(|error| error.into())
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::{
        db::initialize,
        transaction::{NewTransaction, insert_transactions},
    };

    use super::{Statistics, get_statistics};

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn calculates_totals_for_month() {
        let conn = get_test_connection();
        let transactions = vec![
            NewTransaction::build("A", 50.0, "X", true, "2022-03-01"),
            NewTransaction::build("B", 150.0, "Y", false, "2022-03-15"),
            NewTransaction::build("C", 999.0, "Y", true, "2022-04-15"),
        ];
        insert_transactions(&transactions, &conn).unwrap();

        let got = get_statistics("03", &conn).unwrap();

        assert_eq!(
            got,
            Statistics {
                total_sale_amount: 200.0,
                total_sold_items: 1,
                total_not_sold_items: 1,
            }
        );
    }

    #[test]
    fn empty_month_includes_everything() {
        let conn = get_test_connection();
        let transactions = vec![
            NewTransaction::build("A", 10.5, "X", true, "2022-03-01"),
            NewTransaction::build("B", 20.25, "Y", true, "2022-05-15"),
            NewTransaction::build("C", 30.0, "Y", false, "2023-11-15"),
        ];
        insert_transactions(&transactions, &conn).unwrap();

        let got = get_statistics("", &conn).unwrap();

        assert_eq!(got.total_sale_amount, 60.75);
        assert_eq!(got.total_sold_items + got.total_not_sold_items, 3);
    }

    #[test]
    fn no_matches_is_all_zero() {
        let conn = get_test_connection();
        insert_transactions(
            &[NewTransaction::build("A", 50.0, "X", true, "2022-03-01")],
            &conn,
        )
        .unwrap();

        let got = get_statistics("2030", &conn).unwrap();

        assert_eq!(
            got,
            Statistics {
                total_sale_amount: 0.0,
                total_sold_items: 0,
                total_not_sold_items: 0,
            }
        );
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let statistics = Statistics {
            total_sale_amount: 200.0,
            total_sold_items: 1,
            total_not_sold_items: 1,
        };

        assert_eq!(
            serde_json::to_value(statistics).unwrap(),
            serde_json::json!({
                "totalSaleAmount": 200.0,
                "totalSoldItems": 1,
                "totalNotSoldItems": 1
            })
        );
    }
}
