//! Filter values supplied by a navigation request.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};

/// A single filter value or an ordered collection of values.
///
/// Values inside a collection are alternatives for the same parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FilterValue {
    /// Free text, as typed or selected by the user.
    Text(String),
    /// Integer value.
    Number(i64),
    /// Calendar date.
    Date(NaiveDate),
    /// Ordered alternatives.
    List(Vec<Self>),
}

impl FilterValue {
    /// Returns true when the value carries no constraint: blank text or an empty list.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Number(_) | Self::Date(_) => false,
        }
    }

    /// Returns the value as text.
    ///
    /// Numbers use their decimal form, dates `YYYY-MM-DD`, lists their items joined by
    /// `,`.
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Returns the value as an integer.
    ///
    /// Text that does not parse yields 0 so that malformed input degrades instead of
    /// failing. Dates yield epoch milliseconds at the start of the day (UTC).
    pub fn to_number(&self) -> i64 {
        match self {
            Self::Number(n) => *n,
            Self::Text(text) => text.trim().parse().unwrap_or(0),
            Self::Date(date) => date_to_millis(*date),
            Self::List(items) if items.len() == 1 => items[0].to_number(),
            Self::List(_) => 0,
        }
    }
}

/// Converts a date to epoch milliseconds at 00:00 UTC.
pub fn date_to_millis(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp_millis()
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(n) => write!(f, "{n}"),
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::List(items) => {
                let parts: Vec<String> = items.iter().map(ToString::to_string).collect();
                f.write_str(&parts.join(","))
            }
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<NaiveDate> for FilterValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl<T: Into<Self>> From<Vec<T>> for FilterValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}
