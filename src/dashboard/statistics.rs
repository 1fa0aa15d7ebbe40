//! Summary statistics for the transactions sold in a month.

use rusqlite::{Connection, named_params};
use serde::{Deserialize, Serialize};

use crate::{Error, month::SaleMonth, transaction::SALE_MONTH_FILTER};

/// The sales totals for a month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesStatistics {
    /// The sum of the prices of every transaction in the month, sold or not.
    pub total_sales: f64,
    /// The number of transactions in the month that were sold.
    pub total_sold_items: u32,
    /// The number of transactions in the month that were not sold.
    pub total_not_sold_items: u32,
}

/// Get the sales totals for the transactions in `month`, of any year.
///
/// Every total is zero if there are no transactions in the month.
///
/// # Errors
/// Returns [Error::SqlError] if there is an SQL error.
pub fn get_sales_statistics(
    month: SaleMonth,
    connection: &Connection,
) -> Result<SalesStatistics, Error> {
    // Any non-zero `sold` counts as sold.
    connection
        .prepare_cached(&format!(
            "SELECT COALESCE(SUM(price), 0.0),
                    COALESCE(SUM(sold != 0), 0),
                    COALESCE(SUM(sold = 0), 0)
             FROM product_transaction
             WHERE {SALE_MONTH_FILTER}"
        ))?
        .query_row(named_params! { ":month": month.number() }, |row| {
            Ok(SalesStatistics {
                total_sales: row.get(0)?,
                total_sold_items: row.get(1)?,
                total_not_sold_items: row.get(2)?,
            })
        })
        .map_err(Error::from)
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use time::{Month, macros::datetime};

    use crate::{
        SaleMonth,
        test_utils::{get_test_connection, insert_test_transaction},
    };

    use super::{SalesStatistics, get_sales_statistics};

    #[test]
    fn totals_for_month() {
        let conn = get_test_connection();
        insert_test_transaction(&conn, 50.0, true, "A", datetime!(2022-01-05 10:00 UTC));
        insert_test_transaction(&conn, 150.0, false, "B", datetime!(2021-01-20 10:00 UTC));
        insert_test_transaction(&conn, 999.0, true, "A", datetime!(2022-02-01 10:00 UTC));

        let got = get_sales_statistics(SaleMonth::new(Month::January), &conn).unwrap();

        assert_eq!(
            got,
            SalesStatistics {
                total_sales: 200.0,
                total_sold_items: 1,
                total_not_sold_items: 1,
            }
        );
    }

    #[test]
    fn empty_month_is_all_zero() {
        let conn = get_test_connection();
        insert_test_transaction(&conn, 50.0, true, "A", datetime!(2022-01-05 10:00 UTC));

        let got = get_sales_statistics(SaleMonth::new(Month::July), &conn).unwrap();

        assert_eq!(
            got,
            SalesStatistics {
                total_sales: 0.0,
                total_sold_items: 0,
                total_not_sold_items: 0,
            }
        );
    }

    #[test]
    fn sold_and_not_sold_add_up_to_month_total() {
        let conn = get_test_connection();
        for day in 1..=17 {
            let date = datetime!(2022-05-01 12:00 UTC).replace_day(day).unwrap();
            insert_test_transaction(&conn, day as f64, day % 4 == 0, "A", date);
        }

        let got = get_sales_statistics(SaleMonth::new(Month::May), &conn).unwrap();

        assert_eq!(got.total_sold_items, 4);
        assert_eq!(got.total_sold_items + got.total_not_sold_items, 17);
        assert_eq!(got.total_sales, (1..=17).sum::<u32>() as f64);
    }

    #[test]
    fn counts_any_non_zero_sold_flag_as_sold() {
        // A table created by an older schema, without the check on `sold`.
        let conn = Connection::open_in_memory().unwrap();
        conn.execute(
            "CREATE TABLE product_transaction (
                id TEXT PRIMARY KEY NOT NULL,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                price REAL NOT NULL,
                category TEXT NOT NULL,
                sold INTEGER NOT NULL DEFAULT 0,
                date_of_sale INTEGER NOT NULL,
                image TEXT NOT NULL
            )",
            (),
        )
        .unwrap();
        let january = datetime!(2022-01-05 10:00 UTC).unix_timestamp();
        for (id, sold) in [("a", 2), ("b", -1), ("c", 0)] {
            conn.execute(
                "INSERT INTO product_transaction
                    (id, title, description, price, category, sold, date_of_sale, image)
                 VALUES (?1, 'Lamp', 'A lamp', 10.0, 'home', ?2, ?3, '')",
                (id, sold, january),
            )
            .unwrap();
        }

        let got = get_sales_statistics(SaleMonth::new(Month::January), &conn).unwrap();

        assert_eq!(
            got,
            SalesStatistics {
                total_sales: 30.0,
                total_sold_items: 2,
                total_not_sold_items: 1,
            }
        );
    }
}
