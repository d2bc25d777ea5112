//! Dashboard module
//!
//! Provides the summary statistics, the price range bar chart, the category
//! pie chart and the combined view of all three with a page of transactions.
//! Everything is filtered by the month of sale.

mod bar_chart;
mod combined;
mod handlers;
mod pie_chart;
mod statistics;

pub use bar_chart::{PriceRange, PriceRangeCount, get_bar_chart};
pub use combined::{CombinedData, get_combined_data};
pub use handlers::{
    get_bar_chart_endpoint, get_combined_data_endpoint, get_pie_chart_endpoint,
    get_statistics_endpoint,
};
pub use pie_chart::{CategoryCount, get_pie_chart};
pub use statistics::{Statistics, get_statistics};
