//! All of the dashboard data for a month in one response.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    dashboard::{
        category::{CategoryCount, get_category_counts},
        price_range::{PriceRangeCount, get_price_range_counts},
        statistics::{SalesStatistics, get_sales_statistics},
    },
    month::SaleMonth,
};

/// The statistics, price histogram and category breakdown for a month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// The sales totals.
    pub statistics: SalesStatistics,
    /// The transaction count for each price range.
    pub bar_chart: Vec<PriceRangeCount>,
    /// The transaction count for each category.
    pub pie_chart: Vec<CategoryCount>,
}

/// Get the statistics, price histogram and category breakdown for `month`.
///
/// Pass the connection while holding its lock so that all three are
/// computed from the same data.
///
/// # Errors
/// Returns [Error::SqlError] if any of the queries fail.
pub fn get_dashboard_summary(
    month: SaleMonth,
    connection: &Connection,
) -> Result<DashboardSummary, Error> {
    Ok(DashboardSummary {
        statistics: get_sales_statistics(month, connection)?,
        bar_chart: get_price_range_counts(month, connection)?,
        pie_chart: get_category_counts(month, connection)?,
    })
}

#[cfg(test)]
mod tests {
    use time::{Month, macros::datetime};

    use crate::{
        SaleMonth,
        dashboard::{
            category::get_category_counts, price_range::get_price_range_counts,
            statistics::get_sales_statistics,
        },
        test_utils::{get_test_connection, insert_test_transaction},
    };

    use super::get_dashboard_summary;

    #[test]
    fn matches_individual_queries() {
        let conn = get_test_connection();
        insert_test_transaction(&conn, 50.0, true, "A", datetime!(2022-01-05 10:00 UTC));
        insert_test_transaction(&conn, 150.0, false, "B", datetime!(2021-01-20 10:00 UTC));
        insert_test_transaction(&conn, 999.0, true, "A", datetime!(2022-02-01 10:00 UTC));
        let month = SaleMonth::new(Month::January);

        let got = get_dashboard_summary(month, &conn).unwrap();

        assert_eq!(got.statistics, get_sales_statistics(month, &conn).unwrap());
        assert_eq!(got.bar_chart, get_price_range_counts(month, &conn).unwrap());
        assert_eq!(got.pie_chart, get_category_counts(month, &conn).unwrap());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let conn = get_test_connection();

        let got = get_dashboard_summary(SaleMonth::default(), &conn).unwrap();
        let json = serde_json::to_value(&got).unwrap();

        assert_eq!(json["statistics"]["totalSales"], 0.0);
        assert_eq!(json["statistics"]["totalNotSoldItems"], 0);
        assert_eq!(json["barChart"].as_array().map(Vec::len), Some(10));
        assert_eq!(json["pieChart"], serde_json::json!([]));
    }
}
