use async_graphql::{ComplexObject, ID, SimpleObject};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// How a date that could not be parsed is rendered.
pub const INVALID_DATE: &str = "Invalid Date";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SimpleObject)]
#[graphql(complex)]
pub struct Event {
    /// The unique identifier for this event.
    pub id: ID,

    pub title: String,
    pub description: String,
    pub price: f64,

    /// RFC 3339 timestamp in UTC with millisecond precision.
    pub date: String,
}

#[ComplexObject]
impl Event {
    /// The identifier under the document store's field name.
    #[graphql(name = "_id")]
    async fn store_id(&self) -> ID {
        self.id.clone()
    }
}

/// Render a stored date the way clients receive it, e.g.
/// `2024-01-01T00:00:00.000Z`.
pub fn format_date(date: Option<DateTime<Utc>>) -> String {
    match date {
        Some(date) => date.to_rfc3339_opts(SecondsFormat::Millis, true),
        None => INVALID_DATE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_format_date_midnight() {
        let date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_date(Some(date)), "2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_format_date_keeps_milliseconds() {
        let date = Utc.timestamp_millis_opt(1_704_067_200_123).unwrap();
        assert_eq!(format_date(Some(date)), "2024-01-01T00:00:00.123Z");
    }

    #[test]
    fn test_format_invalid_date() {
        assert_eq!(format_date(None), INVALID_DATE);
    }
}
