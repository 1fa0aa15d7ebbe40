//! The price histogram for the transactions sold in a month.

use rusqlite::{Connection, named_params};
use serde::{Deserialize, Serialize};

use crate::{Error, month::SaleMonth, transaction::SALE_MONTH_FILTER};

/// A bucket of the price histogram.
///
/// A price is in the range when `min <= price <= max`, or `min <= price` if
/// there is no `max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    /// The name of the range shown to clients, e.g. "101-200".
    pub label: &'static str,
    /// The lowest price in the range.
    pub min: f64,
    /// The highest price in the range, `None` for the open-ended last range.
    pub max: Option<f64>,
}

impl PriceRange {
    /// Whether `price` falls in this range.
    pub fn contains(&self, price: f64) -> bool {
        self.min <= price && self.max.is_none_or(|max| price <= max)
    }
}

const fn range(label: &'static str, min: f64, max: f64) -> PriceRange {
    PriceRange {
        label,
        min,
        max: Some(max),
    }
}

/// The ten buckets of the price histogram, in the order they are returned.
///
/// The bounds are whole numbers, so a price with cents between two buckets,
/// e.g. 100.5, is not in any bucket.
pub const PRICE_RANGES: [PriceRange; 10] = [
    range("0-100", 0.0, 100.0),
    range("101-200", 101.0, 200.0),
    range("201-300", 201.0, 300.0),
    range("301-400", 301.0, 400.0),
    range("401-500", 401.0, 500.0),
    range("501-600", 501.0, 600.0),
    range("601-700", 601.0, 700.0),
    range("701-800", 701.0, 800.0),
    range("801-900", 801.0, 900.0),
    PriceRange {
        label: "901-above",
        min: 901.0,
        max: None,
    },
];

/// The number of transactions with a price in a [PriceRange].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRangeCount {
    /// The label of the price range.
    pub range: String,
    /// The number of transactions in the month with a price in the range.
    pub count: u32,
}

/// Count the transactions in `month`, of any year, that fall in each of the
/// [PRICE_RANGES].
///
/// All ten ranges are always returned in order, with a count of zero for
/// empty ranges.
///
/// # Errors
/// Returns [Error::SqlError] if there is an SQL error.
pub fn get_price_range_counts(
    month: SaleMonth,
    connection: &Connection,
) -> Result<Vec<PriceRangeCount>, Error> {
    let mut statement = connection.prepare_cached(&format!(
        "SELECT COUNT(id) FROM product_transaction
         WHERE {SALE_MONTH_FILTER}
         AND price >= :min AND (:max IS NULL OR price <= :max)"
    ))?;

    PRICE_RANGES
        .iter()
        .map(|range| -> Result<PriceRangeCount, Error> {
            let count = statement.query_row(
                named_params! {
                    ":month": month.number(),
                    ":min": range.min,
                    ":max": range.max,
                },
                |row| row.get(0),
            )?;

            Ok(PriceRangeCount {
                range: range.label.to_owned(),
                count,
            })
        })
        .collect()
}
