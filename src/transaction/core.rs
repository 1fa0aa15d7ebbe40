//! Defines the core data model and database queries for transactions.

use rusqlite::{Connection, Row, named_params, types::Type};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset};
use uuid::Uuid;

use crate::{Error, month::SaleMonth};

// ============================================================================
// MODELS
// ============================================================================

/// A product sale, i.e. an item that was listed and either sold or not.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction, a UUID generated when the transaction was imported.
    pub id: String,
    /// The name of the product.
    pub title: String,
    /// A text description of the product.
    pub description: String,
    /// The price of the product. Never negative.
    pub price: f64,
    /// The product category, e.g. "electronics".
    pub category: String,
    /// Whether the product was sold.
    pub sold: bool,
    /// When the product was sold, in UTC.
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_sale: OffsetDateTime,
    /// The URL of an image of the product.
    pub image: String,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(title: &str, price: f64, date_of_sale: OffsetDateTime) -> TransactionBuilder {
        TransactionBuilder {
            title: title.to_owned(),
            description: String::new(),
            price,
            category: String::new(),
            sold: false,
            date_of_sale,
            image: String::new(),
        }
    }

    /// The month the transaction was sold in.
    pub fn sale_month(&self) -> SaleMonth {
        SaleMonth::of(self.date_of_sale)
    }
}

/// A builder for creating [Transaction] instances.
///
/// Optional fields default to empty strings and `sold` defaults to false.
/// Call [TransactionBuilder::finalize] to assign an ID and create the [Transaction].
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    title: String,
    description: String,
    price: f64,
    category: String,
    sold: bool,
    date_of_sale: OffsetDateTime,
    image: String,
}

impl TransactionBuilder {
    /// Set the description for the transaction.
    pub fn description(mut self, description: &str) -> Self {
        description.clone_into(&mut self.description);
        self
    }

    /// Set the category for the transaction.
    pub fn category(mut self, category: &str) -> Self {
        category.clone_into(&mut self.category);
        self
    }

    /// Set whether the product was sold.
    pub fn sold(mut self, sold: bool) -> Self {
        self.sold = sold;
        self
    }

    /// Set the image URL for the transaction.
    pub fn image(mut self, image: &str) -> Self {
        image.clone_into(&mut self.image);
        self
    }

    /// Create the transaction with a new random ID.
    ///
    /// The date of sale is converted to UTC.
    pub fn finalize(self) -> Transaction {
        Transaction {
            id: Uuid::new_v4().to_string(),
            title: self.title,
            description: self.description,
            price: self.price,
            category: self.category,
            sold: self.sold,
            date_of_sale: self.date_of_sale.to_offset(UtcOffset::UTC),
            image: self.image,
        }
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// A SQL condition that selects transactions sold in the month bound to the `:month` parameter.
///
/// The date of sale is stored as a unix timestamp, so the month is taken in UTC.
pub(crate) const SALE_MONTH_FILTER: &str =
    "CAST(strftime('%m', date_of_sale, 'unixepoch') AS INTEGER) = :month";

/// The columns read by [map_transaction_row], in order.
pub(crate) const TRANSACTION_COLUMNS: &str =
    "id, title, description, price, category, sold, date_of_sale, image";

/// Insert a single transaction into the database.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error,
/// e.g. a transaction with the same ID already exists.
pub fn insert_transaction(
    transaction: &Transaction,
    connection: &Connection,
) -> Result<(), Error> {
    connection
        .prepare_cached(
            "INSERT INTO product_transaction
                (id, title, description, price, category, sold, date_of_sale, image)
             VALUES (:id, :title, :description, :price, :category, :sold, :date_of_sale, :image)",
        )?
        .execute(named_params! {
            ":id": transaction.id,
            ":title": transaction.title,
            ":description": transaction.description,
            ":price": transaction.price,
            ":category": transaction.category,
            ":sold": transaction.sold,
            ":date_of_sale": transaction.date_of_sale.unix_timestamp(),
            ":image": transaction.image,
        })?;

    Ok(())
}

/// Replace every transaction in the database with `transactions`.
///
/// The existing transactions are deleted and the new ones inserted in a single
/// database transaction, so if any insert fails the previous transactions are kept.
///
/// Returns the number of transactions inserted.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn replace_all_transactions(
    transactions: &[Transaction],
    connection: &Connection,
) -> Result<usize, Error> {
    let tx = connection.unchecked_transaction()?;

    let deleted = tx.execute("DELETE FROM product_transaction", ())?;
    tracing::debug!("Deleted {deleted} transactions");

    for transaction in transactions {
        insert_transaction(transaction, &tx)?;
    }

    tx.commit()?;
    tracing::info!("Replaced {deleted} transactions with {}", transactions.len());

    Ok(transactions.len())
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM product_transaction;", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS product_transaction (
                id TEXT PRIMARY KEY NOT NULL,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                price REAL NOT NULL CHECK (price >= 0),
                category TEXT NOT NULL,
                sold INTEGER NOT NULL DEFAULT 0 CHECK (sold IN (0, 1)),
                date_of_sale INTEGER NOT NULL,
                image TEXT NOT NULL
                )",
        (),
    )?;

    // Listing pages are ordered by date of sale.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_product_transaction_date
            ON product_transaction(date_of_sale, id);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
///
/// The row must contain the columns listed in [TRANSACTION_COLUMNS], in order.
pub(crate) fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let timestamp: i64 = row.get(6)?;
    let date_of_sale = OffsetDateTime::from_unix_timestamp(timestamp).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(6, Type::Integer, error.into())
    })?;

    Ok(Transaction {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        price: row.get(3)?,
        category: row.get(4)?,
        sold: row.get(5)?,
        date_of_sale,
        image: row.get(7)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================
