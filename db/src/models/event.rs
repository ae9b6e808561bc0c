use std::fmt::Display;

use chrono::{DateTime, TimeZone, Utc};
use eventbook_common::views::{Event, format_date};
use mongodb::bson::{self, oid::ObjectId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DbEvent {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub title: String,

    pub description: String,

    pub price: f64,

    /// When the event takes place. `None` is the invalid date produced by
    /// unparseable input, stored as `null`.
    #[serde(default)]
    pub date: Option<bson::DateTime>,

    /// The user this event is attributed to.
    pub creator: ObjectId,
}

impl Display for DbEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DbEvent {{ id: {:?}, title: {}, creator: {} }}",
            self.id, self.title, self.creator
        )
    }
}

impl DbEvent {
    /// Build an event that has not been stored yet.
    pub fn new(
        title: String,
        description: String,
        price: f64,
        date: Option<DateTime<Utc>>,
        creator: ObjectId,
    ) -> Self {
        Self {
            id: None,
            title,
            description,
            price,
            date: date.map(|d| bson::DateTime::from_millis(d.timestamp_millis())),
            creator,
        }
    }

    pub fn date(&self) -> Option<DateTime<Utc>> {
        self.date
            .and_then(|d| Utc.timestamp_millis_opt(d.timestamp_millis()).single())
    }
}

impl From<DbEvent> for Event {
    fn from(value: DbEvent) -> Self {
        let date = format_date(value.date());
        Self {
            id: value
                .id
                .map(|oid| oid.to_hex())
                .unwrap_or_else(|| "unknown".into())
                .into(),
            title: value.title,
            description: value.description,
            price: value.price,
            date,
        }
    }
}

#[cfg(test)]
mod tests {
    use mongodb::bson::{Bson, doc};

    use super::*;

    fn sample(date: Option<DateTime<Utc>>) -> DbEvent {
        DbEvent::new(
            "Meetup".into(),
            "Tech talk".into(),
            10.5,
            date,
            ObjectId::parse_str("676d34a7e7675c4abb68bf51").unwrap(),
        )
    }

    #[test]
    fn test_event_view_conversion() {
        let mut event = sample(Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()));
        let id = ObjectId::new();
        event.id = Some(id);

        let view: Event = event.into();
        assert_eq!(view.id.as_str(), id.to_hex());
        assert_eq!(view.title, "Meetup");
        assert_eq!(view.description, "Tech talk");
        assert_eq!(view.price, 10.5);
        assert_eq!(view.date, "2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_event_view_invalid_date() {
        let view: Event = sample(None).into();
        assert_eq!(view.date, "Invalid Date");
        assert_eq!(view.id.as_str(), "unknown");
    }

    #[test]
    fn test_event_document_shape() {
        let event = sample(None);
        let document = bson::to_document(&event).unwrap();

        assert!(!document.contains_key("_id"));
        assert_eq!(document.get("date"), Some(&Bson::Null));
        assert_eq!(
            document.get_object_id("creator").unwrap().to_hex(),
            "676d34a7e7675c4abb68bf51"
        );
    }

    #[test]
    fn test_event_document_without_date_field() {
        let document = doc! {
            "_id": ObjectId::new(),
            "title": "Meetup",
            "description": "",
            "price": -3.0,
            "creator": ObjectId::new(),
        };

        let event: DbEvent = bson::from_document(document).unwrap();
        assert_eq!(event.date, None);
        assert_eq!(event.price, -3.0);
    }
}
