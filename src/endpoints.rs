//! The API endpoints URIs.

/// The route for seeding the database from the remote dataset.
pub const SEED: &str = "/api/seed";
/// The route for listing transactions.
pub const TRANSACTIONS: &str = "/api/transactions";
/// The route for the sales statistics of a month.
pub const STATISTICS: &str = "/api/statistics";
/// The route for the price range histogram of a month.
pub const BAR_CHART: &str = "/api/bar-chart";
/// The route for the category distribution of a month.
pub const PIE_CHART: &str = "/api/pie-chart";
/// The route for the transactions, statistics and charts of a month in one response.
pub const COMBINED_DATA: &str = "/api/combined-data";
