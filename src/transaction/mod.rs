//! Product transactions.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - Database functions for storing and bulk replacing transactions
//! - The paginated, month filtered search and its endpoint

mod core;
mod list_endpoint;
mod search;

pub use core::{
    Transaction, TransactionBuilder, count_transactions, create_transaction_table,
    replace_all_transactions,
};
pub use list_endpoint::get_transactions_endpoint;
pub use search::{TransactionPage, TransactionSearch, search_transactions};

pub(crate) use core::{SALE_MONTH_FILTER, TRANSACTION_COLUMNS, map_transaction_row};

#[cfg(test)]
pub use core::insert_transaction;
