//! The month used to filter transactions by when they were sold.
//!
//! Only the month of a transaction's date of sale is used, the year is ignored.
//! So "March" selects the transactions sold in March 2021, March 2022 and so on.

use std::{fmt, str::FromStr};

use time::{Month, OffsetDateTime, UtcOffset};

use crate::Error;

const MONTH_NAMES: [(&str, Month); 12] = [
    ("january", Month::January),
    ("february", Month::February),
    ("march", Month::March),
    ("april", Month::April),
    ("may", Month::May),
    ("june", Month::June),
    ("july", Month::July),
    ("august", Month::August),
    ("september", Month::September),
    ("october", Month::October),
    ("november", Month::November),
    ("december", Month::December),
];

/// A calendar month, independent of year, that transactions are filtered by.
///
/// Parse from either a month name ("March", case-insensitive) or a month
/// number ("3"). Defaults to January.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaleMonth(Month);

impl Default for SaleMonth {
    fn default() -> Self {
        Self(Month::January)
    }
}

impl SaleMonth {
    /// Create a sale month from a calendar month.
    pub fn new(month: Month) -> Self {
        Self(month)
    }

    /// Parse the month from an optional query parameter.
    ///
    /// A missing or blank month selects the default month, January.
    ///
    /// # Errors
    /// Returns [Error::InvalidMonth] if `month` is not a month name or a number from 1 to 12.
    pub fn parse_or_default(month: Option<&str>) -> Result<Self, Error> {
        match month.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(month) => month.parse(),
        }
    }

    /// The month that `date_time` falls in, in UTC.
    pub fn of(date_time: OffsetDateTime) -> Self {
        Self(date_time.to_offset(UtcOffset::UTC).month())
    }

    /// The month number, from 1 for January to 12 for December.
    pub fn number(self) -> u8 {
        u8::from(self.0)
    }

    /// The calendar month.
    pub fn month(self) -> Month {
        self.0
    }
}

impl FromStr for SaleMonth {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let trimmed = text.trim();

        // `u8::from_str` also accepts a leading `+`, which is not a month.
        if !trimmed.is_empty() && trimmed.bytes().all(|byte| byte.is_ascii_digit()) {
            return trimmed
                .parse::<u8>()
                .ok()
                .and_then(|number| Month::try_from(number).ok())
                .map(Self)
                .ok_or_else(|| Error::InvalidMonth(text.to_owned()));
        }

        MONTH_NAMES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(trimmed))
            .map(|&(_, month)| Self(month))
            .ok_or_else(|| Error::InvalidMonth(text.to_owned()))
    }
}

impl fmt::Display for SaleMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use time::{Month, macros::datetime};

    use crate::Error;

    use super::SaleMonth;

    #[test]
    fn parses_every_month_name() {
        let names = [
            "January",
            "February",
            "March",
            "April",
            "May",
            "June",
            "July",
            "August",
            "September",
            "October",
            "November",
            "December",
        ];

        for (index, name) in names.iter().enumerate() {
            let month: SaleMonth = name.parse().expect("Could not parse month name");

            assert_eq!(month.number() as usize, index + 1, "wrong number for {name}");
        }
    }

    #[test]
    fn month_names_are_case_insensitive() {
        for name in ["march", "MARCH", "mArCh", "  March "] {
            assert_eq!(
                name.parse::<SaleMonth>(),
                Ok(SaleMonth::new(Month::March)),
                "{name:?}"
            );
        }
    }

    #[test]
    fn parses_month_numbers() {
        assert_eq!("1".parse::<SaleMonth>(), Ok(SaleMonth::new(Month::January)));
        assert_eq!(
            "09".parse::<SaleMonth>(),
            Ok(SaleMonth::new(Month::September))
        );
        assert_eq!(
            "12".parse::<SaleMonth>(),
            Ok(SaleMonth::new(Month::December))
        );
    }

    #[test]
    fn rejects_out_of_range_numbers() {
        for text in ["0", "13", "255"] {
            assert_eq!(
                text.parse::<SaleMonth>(),
                Err(Error::InvalidMonth(text.to_owned()))
            );
        }
    }

    #[test]
    fn rejects_unknown_names() {
        for text in ["Smarch", "Jan", "January 2024", "-1", "+3", " +12 ", "1.5"] {
            assert_eq!(
                text.parse::<SaleMonth>(),
                Err(Error::InvalidMonth(text.to_owned())),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn missing_or_blank_month_defaults_to_january() {
        let january = SaleMonth::new(Month::January);

        assert_eq!(SaleMonth::parse_or_default(None), Ok(january));
        assert_eq!(SaleMonth::parse_or_default(Some("")), Ok(january));
        assert_eq!(SaleMonth::parse_or_default(Some("   ")), Ok(january));
    }

    #[test]
    fn parse_or_default_rejects_invalid_month() {
        assert_eq!(
            SaleMonth::parse_or_default(Some("Octember")),
            Err(Error::InvalidMonth("Octember".to_owned()))
        );
    }

    #[test]
    fn month_of_date_uses_utc() {
        // 20:29 on the 30th of November in India is still November in UTC,
        // but 02:00 on the 1st of December is the 30th of November in UTC.
        assert_eq!(
            SaleMonth::of(datetime!(2021-11-30 20:29:54 +05:30)),
            SaleMonth::new(Month::November)
        );
        assert_eq!(
            SaleMonth::of(datetime!(2021-12-01 02:00:00 +05:30)),
            SaleMonth::new(Month::November)
        );
    }

    #[test]
    fn displays_month_name() {
        assert_eq!(SaleMonth::new(Month::July).to_string(), "July");
    }
}
