//! Dashboard module
//!
//! Aggregates the transactions sold in a month for the dashboard charts:
//! sales statistics, a price histogram and a breakdown by category.

mod category;
mod combined;
mod handlers;
mod price_range;
mod statistics;

pub use category::{CategoryCount, get_category_counts};
pub use combined::{DashboardSummary, get_dashboard_summary};
pub use handlers::{
    get_bar_chart_endpoint, get_combined_endpoint, get_pie_chart_endpoint, get_statistics_endpoint,
};
pub use price_range::{PRICE_RANGES, PriceRange, PriceRangeCount, get_price_range_counts};
pub use statistics::{SalesStatistics, get_sales_statistics};
