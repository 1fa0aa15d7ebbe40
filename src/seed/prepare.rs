//! Checks seed records and converts them into transactions.

use std::sync::OnceLock;

use regex::Regex;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::{
    Error,
    seed::source::{SeedPrice, SeedRecord},
    transaction::Transaction,
};

const IMAGE_URL_PATTERN: &str = r#"^(http|https)://[^ "]+$"#;

fn image_url_regex() -> &'static Regex {
    static IMAGE_URL_REGEX: OnceLock<Regex> = OnceLock::new();

    IMAGE_URL_REGEX.get_or_init(|| {
        Regex::new(IMAGE_URL_PATTERN).expect("the image URL pattern is a valid regex")
    })
}

/// Convert every seed record into a transaction with a new ID.
///
/// Records without a sale date are dated `now`, and records without a sold
/// flag are not sold.
///
/// # Errors
/// Returns [Error::InvalidSeedRecord] for the first record that has an empty
/// title, description or category, a price that is negative or not a number, a sale date
/// that is not an RFC 3339 date-time, or an image that is not an HTTP URL.
/// No transactions are returned if any record is invalid.
pub fn prepare_transactions(
    records: Vec<SeedRecord>,
    now: OffsetDateTime,
) -> Result<Vec<Transaction>, Error> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            prepare_transaction(record, now)
                .map_err(|reason| Error::InvalidSeedRecord { index, reason })
        })
        .collect()
}

fn prepare_transaction(record: SeedRecord, now: OffsetDateTime) -> Result<Transaction, String> {
    if record.title.trim().is_empty() {
        return Err("title is empty".to_owned());
    }

    if record.description.trim().is_empty() {
        return Err("description is empty".to_owned());
    }

    if record.category.trim().is_empty() {
        return Err("category is empty".to_owned());
    }

    let price = parse_price(&record.price)?;

    let date_of_sale = match record.date_of_sale.as_deref() {
        Some(date) => OffsetDateTime::parse(date, &Rfc3339)
            .map_err(|error| format!("date of sale {date:?} is not an RFC 3339 date: {error}"))?,
        None => now,
    };

    if !image_url_regex().is_match(&record.image) {
        return Err(format!("image {:?} is not an HTTP URL", record.image));
    }

    Ok(Transaction::build(&record.title, price, date_of_sale)
        .description(&record.description)
        .category(&record.category)
        .sold(record.sold.unwrap_or(false))
        .image(&record.image)
        .finalize())
}

fn parse_price(price: &SeedPrice) -> Result<f64, String> {
    let value = match price {
        SeedPrice::Number(value) => *value,
        SeedPrice::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("price {text:?} is not a number"))?,
    };

    if !value.is_finite() {
        return Err(format!("price {value} is not a finite number"));
    }

    if value < 0.0 {
        return Err(format!("price {value} is negative"));
    }

    Ok(value)
}
