//! The API endpoints URIs.

/// The route for listing and searching the transactions sold in a month.
pub const TRANSACTIONS: &str = "/api/transactions";
/// [TRANSACTIONS] with a trailing slash, which some clients send.
pub const TRANSACTIONS_TRAILING_SLASH: &str = "/api/transactions/";
/// The route to reload the transactions from the seed source.
pub const INITIALIZE: &str = "/api/transactions/initialize";
/// The route for the sales totals of a month.
pub const STATISTICS: &str = "/api/transactions/statistics";
/// The route for the price histogram of a month.
pub const BAR_CHART: &str = "/api/transactions/bar-chart";
/// The route for the category breakdown of a month.
pub const PIE_CHART: &str = "/api/transactions/pie-chart";
/// The route for the statistics, price histogram and category breakdown of a month.
pub const COMBINED_RESPONSE: &str = "/api/transactions/combined-response";
/// The route for checking the server is up.
pub const HEALTH: &str = "/api/health";
