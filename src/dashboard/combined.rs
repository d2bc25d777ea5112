//! Combines the transaction listing, statistics and both charts into one response.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use serde::Serialize;

use crate::{
    Error,
    db::with_connection,
    pagination::Pagination,
    transaction::{Transaction, list_transactions},
};

use super::{
    bar_chart::{PriceRangeCount, get_bar_chart},
    pie_chart::{CategoryCount, get_pie_chart},
    statistics::{Statistics, get_statistics},
};

/// Everything the dashboard needs for a month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedData {
    /// The first page of transactions for the month.
    pub transactions: Vec<Transaction>,
    /// The sales totals for the month.
    pub statistics: Statistics,
    /// The price range histogram for the month.
    pub bar_chart_data: Vec<PriceRangeCount>,
    /// The category distribution for the month.
    pub pie_chart_data: Vec<CategoryCount>,
}

/// Run the listing, statistics and chart queries for `month` concurrently.
///
/// The transactions are limited to `pagination` and are not filtered by a search term.
///
/// # Errors
/// Returns the first error from any of the queries. No partial data is returned.
pub async fn get_combined_data(
    db_connection: Arc<Mutex<Connection>>,
    month: String,
    pagination: Pagination,
) -> Result<CombinedData, Error> {
    let month = Arc::<str>::from(month);

    let transactions = {
        let month = month.clone();
        with_connection(db_connection.clone(), move |connection| {
            list_transactions(&month, "", pagination, connection)
        })
    };
    let statistics = {
        let month = month.clone();
        with_connection(db_connection.clone(), move |connection| {
            get_statistics(&month, connection)
        })
    };
    let bar_chart_data = {
        let month = month.clone();
        with_connection(db_connection.clone(), move |connection| {
            get_bar_chart(&month, connection)
        })
    };
    let pie_chart_data = with_connection(db_connection, move |connection| {
        get_pie_chart(&month, connection)
    });

    join_combined_data(transactions, statistics, bar_chart_data, pie_chart_data).await
}

/// Wait for all four parts of the combined data, failing as soon as one of them fails.
async fn join_combined_data(
    transactions: impl Future<Output = Result<Vec<Transaction>, Error>>,
    statistics: impl Future<Output = Result<Statistics, Error>>,
    bar_chart_data: impl Future<Output = Result<Vec<PriceRangeCount>, Error>>,
    pie_chart_data: impl Future<Output = Result<Vec<CategoryCount>, Error>>,
) -> Result<CombinedData, Error> {
    let (transactions, statistics, bar_chart_data, pie_chart_data) =
        tokio::try_join!(transactions, statistics, bar_chart_data, pie_chart_data)?;

    Ok(CombinedData {
        transactions,
        statistics,
        bar_chart_data,
        pie_chart_data,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;
    use serde_json::json;

    use crate::{
        Error,
        dashboard::{
            bar_chart::PriceRangeCount, pie_chart::CategoryCount, statistics::Statistics,
        },
        db::initialize,
        pagination::{Pagination, PaginationConfig},
        transaction::{NewTransaction, Transaction, insert_transactions},
    };

    use super::{get_combined_data, join_combined_data};

    fn get_test_connection() -> Arc<Mutex<Connection>> {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        insert_transactions(
            &[
                NewTransaction::build("A", 50.0, "X", true, "2022-03-01"),
                NewTransaction::build("B", 150.0, "Y", false, "2022-03-15"),
                NewTransaction::build("C", 950.0, "Z", false, "2022-04-15"),
            ],
            &conn,
        )
        .unwrap();
        Arc::new(Mutex::new(conn))
    }

    #[tokio::test]
    async fn combines_all_parts_for_month() {
        let conn = get_test_connection();

        let got = get_combined_data(
            conn,
            "03".to_owned(),
            Pagination::first_page(&PaginationConfig::default()),
        )
        .await
        .expect("Could not get combined data");

        let titles: Vec<_> = got.transactions.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["A", "B"]);
        assert_eq!(
            got.statistics,
            Statistics {
                total_sale_amount: 200.0,
                total_sold_items: 1,
                total_not_sold_items: 1,
            }
        );
        assert_eq!(
            serde_json::to_value(&got.bar_chart_data).unwrap(),
            json!([{"_id": "0-100", "count": 1}, {"_id": "101-200", "count": 1}])
        );
        assert_eq!(
            serde_json::to_value(&got.pie_chart_data).unwrap(),
            json!([{"X": 1}, {"Y": 1}])
        );
    }

    #[tokio::test]
    async fn transactions_are_limited_to_page() {
        let conn = get_test_connection();
        let pagination = Pagination {
            page: 1,
            per_page: 2,
        };

        let got = get_combined_data(conn, String::new(), pagination).await.unwrap();

        assert_eq!(got.transactions.len(), 2);
        assert_eq!(
            got.statistics.total_sold_items + got.statistics.total_not_sold_items,
            3
        );
    }

    #[tokio::test]
    async fn failing_part_fails_everything() {
        let got = join_combined_data(
            async { Ok(Vec::<Transaction>::new()) },
            async { Err::<Statistics, _>(Error::DatabaseLockError) },
            async { Ok(Vec::<PriceRangeCount>::new()) },
            async { Ok(Vec::<CategoryCount>::new()) },
        )
        .await;

        assert_eq!(got, Err(Error::DatabaseLockError));
    }

    #[tokio::test]
    async fn store_failure_fails_everything() {
        let conn = get_test_connection();
        conn.lock()
            .unwrap()
            .execute("DROP TABLE product_transaction", ())
            .unwrap();

        let got = get_combined_data(
            conn,
            "03".to_owned(),
            Pagination::first_page(&PaginationConfig::default()),
        )
        .await;

        assert!(matches!(got, Err(Error::SqlError(_))), "got {got:?}");
    }
}
