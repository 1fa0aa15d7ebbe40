//! The breakdown of the transactions sold in a month by category.

use rusqlite::{Connection, named_params};
use serde::{Deserialize, Serialize};

use crate::{Error, month::SaleMonth, transaction::SALE_MONTH_FILTER};

/// The number of transactions in a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    /// The name of the category.
    pub category: String,
    /// The number of transactions in the month with this category.
    pub count: u32,
}

/// Count the transactions in `month`, of any year, for each category.
///
/// Only categories with at least one transaction in the month are returned,
/// sorted by name.
///
/// # Errors
/// Returns [Error::SqlError] if there is an SQL error.
pub fn get_category_counts(
    month: SaleMonth,
    connection: &Connection,
) -> Result<Vec<CategoryCount>, Error> {
    connection
        .prepare_cached(&format!(
            "SELECT category, COUNT(id) FROM product_transaction
             WHERE {SALE_MONTH_FILTER}
             GROUP BY category
             ORDER BY category ASC"
        ))?
        .query_map(named_params! { ":month": month.number() }, |row| {
            Ok(CategoryCount {
                category: row.get(0)?,
                count: row.get(1)?,
            })
        })?
        .map(|count_result| count_result.map_err(Error::from))
        .collect()
}
