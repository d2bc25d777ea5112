//! Category distribution for the pie chart.

use rusqlite::{Connection, named_params};
use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::{Error, transaction::MONTH_FILTER};

/// The number of transactions in a category.
///
/// Serializes as a single-key object, e.g. `{"electronics": 3}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    /// The category label.
    pub category: String,
    /// How many transactions have this category.
    pub count: u32,
}

impl Serialize for CategoryCount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.category, &self.count)?;
        map.end()
    }
}

/// Count the transactions whose date of sale contains `month` per category.
///
/// Each category present among the matches appears once, ordered by name.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn get_pie_chart(month: &str, connection: &Connection) -> Result<Vec<CategoryCount>, Error> {
    let query = format!(
        "SELECT category, COUNT(*) FROM product_transaction
        WHERE {MONTH_FILTER}
        GROUP BY category
        ORDER BY category ASC"
    );

    connection
        .prepare(&query)?
        .query_map(named_params! {":month": month}, |row| {
            Ok(CategoryCount {
                category: row.get(0)?,
                count: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<CategoryCount>, rusqlite::Error>>()
        .map_err(|error| error.into())
}
