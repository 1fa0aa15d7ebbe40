//! The paginated search over the transactions sold in a month.

use rusqlite::{Connection, named_params};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    month::SaleMonth,
    pagination::Page,
    transaction::{SALE_MONTH_FILTER, TRANSACTION_COLUMNS, Transaction, map_transaction_row},
};

/// Defines which transactions [search_transactions] returns.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionSearch {
    /// Only transactions sold in this month, of any year, are included.
    pub month: SaleMonth,
    /// Which page of the matching transactions to return.
    pub page: Page,
    /// Text that must appear in either the title or description, ignoring case.
    /// An empty string matches every transaction.
    pub text: String,
}

/// One page of the transactions matching a [TransactionSearch].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionPage {
    /// The transactions on the requested page.
    pub transactions: Vec<Transaction>,
    /// The number of matching transactions across all pages.
    pub total: u32,
}

/// Get a page of the transactions sold in a month, optionally filtered by text
/// in the title or description.
///
/// Transactions are ordered by date of sale and then ID so that the pages are
/// stable between requests. The text search never matches the price.
///
/// The caller should hold the database lock for the whole call so that the
/// total and the page are taken from the same data.
///
/// # Errors
/// Returns [Error::SqlError] if there is an SQL error.
pub fn search_transactions(
    search: &TransactionSearch,
    connection: &Connection,
) -> Result<TransactionPage, Error> {
    // `instr` matches the needle literally, and an empty needle matches every row.
    let needle = search.text.to_lowercase();
    let where_clause = format!(
        "WHERE {SALE_MONTH_FILTER} \
         AND (instr(unicode_lower(title), :needle) > 0 \
              OR instr(unicode_lower(description), :needle) > 0)"
    );

    let total = connection
        .prepare(&format!(
            "SELECT COUNT(id) FROM product_transaction {where_clause}"
        ))?
        .query_row(
            named_params! { ":month": search.month.number(), ":needle": needle },
            |row| row.get(0),
        )?;

    let limit = i64::try_from(search.page.size()).unwrap_or(i64::MAX);
    let offset = i64::try_from(search.page.offset()).unwrap_or(i64::MAX);

    let transactions = connection
        .prepare(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM product_transaction {where_clause} \
             ORDER BY date_of_sale ASC, id ASC \
             LIMIT :limit OFFSET :offset"
        ))?
        .query_map(
            named_params! {
                ":month": search.month.number(),
                ":needle": needle,
                ":limit": limit,
                ":offset": offset,
            },
            map_transaction_row,
        )?
        .map(|transaction_result| transaction_result.map_err(Error::from))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        "Found {total} transactions for {} matching {:?}, returning {} from page {}",
        search.month,
        search.text,
        transactions.len(),
        search.page.number()
    );

    Ok(TransactionPage {
        transactions,
        total,
    })
}
