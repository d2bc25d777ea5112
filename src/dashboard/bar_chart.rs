//! Price range histogram for the bar chart.

use std::collections::BTreeMap;

use rusqlite::{Connection, named_params};
use serde::{Deserialize, Serialize};

use crate::{Error, transaction::MONTH_FILTER};

/// One of the fixed price buckets: `[0, 100]`, `(100, 200]`, ..., `(800, 900]`, `(900, ∞)`.
///
/// Buckets are ordered by price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PriceRange(u8);

impl PriceRange {
    const WIDTH: f64 = 100.0;
    /// Index of the open ended bucket.
    const LAST: u8 = 9;

    /// The bucket that `price` falls into. Upper bounds are inclusive.
    pub fn for_price(price: f64) -> Self {
        if price <= Self::WIDTH {
            return Self(0);
        }

        let upper_bound_multiple = (price / Self::WIDTH).ceil();

        if upper_bound_multiple > Self::LAST as f64 {
            Self(Self::LAST)
        } else {
            Self(upper_bound_multiple as u8 - 1)
        }
    }

    /// The label shown on the chart, e.g. "101-200" or "901-above".
    pub fn label(&self) -> String {
        let lower = self.0 as u32 * 100;

        match self.0 {
            0 => "0-100".to_owned(),
            Self::LAST => format!("{}-above", lower + 1),
            _ => format!("{}-{}", lower + 1, lower + 100),
        }
    }

    /// Whether `price` lies inside this bucket.
    #[cfg(test)]
    pub fn contains(&self, price: f64) -> bool {
        let lower = self.0 as f64 * Self::WIDTH;
        let upper = lower + Self::WIDTH;

        match self.0 {
            0 => (0.0..=Self::WIDTH).contains(&price),
            Self::LAST => price > lower,
            _ => price > lower && price <= upper,
        }
    }
}

/// The number of transactions in a price range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRangeCount {
    /// The [PriceRange::label] of the bucket.
    #[serde(rename = "_id")]
    pub range: String,
    /// How many transactions fell into the bucket.
    pub count: u32,
}

/// Count the transactions whose date of sale contains `month` in each price range.
///
/// Only ranges with at least one transaction are returned, ordered by price.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn get_bar_chart(month: &str, connection: &Connection) -> Result<Vec<PriceRangeCount>, Error> {
    let query = format!("SELECT price FROM product_transaction WHERE {MONTH_FILTER}");

    let prices = connection
        .prepare(&query)?
        .query_map(named_params! {":month": month}, |row| row.get(0))?
        .collect::<Result<Vec<f64>, rusqlite::Error>>()?;

    Ok(count_by_price_range(&prices))
}

/// Groups prices into [PriceRange]s, skipping empty ranges.
fn count_by_price_range(prices: &[f64]) -> Vec<PriceRangeCount> {
    let mut counts: BTreeMap<PriceRange, u32> = BTreeMap::new();

    for &price in prices {
        *counts.entry(PriceRange::for_price(price)).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(range, count)| PriceRangeCount {
            range: range.label(),
            count,
        })
        .collect()
}
