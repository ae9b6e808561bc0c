use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use eventbook_common::{caller::Caller, params::EventInput, views::Event};
use eventbook_db::{
    models::DbEvent,
    storage::{EventStore, Storage, UserStore, parse_object_id},
};
use tracing::{debug, error, instrument};

use crate::error::ApiError;

/// Date-time layouts without an offset. These are read as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Minute-precision date-time with an explicit offset, e.g. `2024-01-01T10:00+02:00`.
const OFFSET_MINUTES_FORMAT: &str = "%Y-%m-%dT%H:%M%:z";

/// Read a date the lenient way clients expect: RFC 3339 (seconds optional),
/// RFC 2822, a date-time without an offset (UTC), or a bare `YYYY-MM-DD`,
/// `YYYY-MM` or `YYYY` (midnight UTC on the first day).
///
/// Anything else is the invalid date, `None`. It is not an error.
pub fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(date) = DateTime::parse_from_rfc3339(input) {
        return Some(date.with_timezone(&Utc));
    }

    if let Ok(date) = DateTime::parse_from_rfc2822(input) {
        return Some(date.with_timezone(&Utc));
    }

    let with_offset = match input.strip_suffix(['Z', 'z']) {
        Some(rest) => format!("{rest}+00:00"),
        None => input.to_string(),
    };
    if let Ok(date) = DateTime::parse_from_str(&with_offset, OFFSET_MINUTES_FORMAT) {
        return Some(date.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(date) = NaiveDateTime::parse_from_str(input, format) {
            return Some(date.and_utc());
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_partial_date(input))
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|date| date.and_utc())
}

/// `YYYY` or `YYYY-MM`, pinned to the first day.
fn parse_partial_date(input: &str) -> Option<NaiveDate> {
    let is_digits = |s: &str, len: usize| s.len() == len && s.bytes().all(|b| b.is_ascii_digit());

    let (year, month) = match input.split_once('-') {
        Some((year, month)) => (year, Some(month)),
        None => (input, None),
    };

    if !is_digits(year, 4) {
        return None;
    }

    let month = match month {
        Some(month) if is_digits(month, 2) => month.parse().ok()?,
        Some(_) => return None,
        None => 1,
    };

    NaiveDate::from_ymd_opt(year.parse().ok()?, month, 1)
}

#[instrument(skip(db))]
pub async fn list_events(db: &dyn Storage) -> Result<Vec<Event>, ApiError> {
    let events = EventStore::list(db).await?;
    debug!(count = events.len(), "Listed events");

    Ok(events.into_iter().map(Into::into).collect())
}

/// Create an event attributed to `caller` and link it to their user record.
///
/// The event is written before the creator is looked up. If the creator is
/// missing the call fails with [`ApiError::UserNotFound`] and the event is
/// left in place, unlinked.
#[instrument(skip(db, input), fields(title = %input.title))]
pub async fn create_event(
    db: &dyn Storage,
    caller: &Caller,
    input: EventInput,
) -> Result<Event, ApiError> {
    let result = run_create_event(db, caller, input).await;

    if let Err(e) = &result {
        error!(error = %e, "Failed to create event");
    }

    result
}

async fn run_create_event(
    db: &dyn Storage,
    caller: &Caller,
    input: EventInput,
) -> Result<Event, ApiError> {
    // 1. Build the event for the caller
    let creator =
        parse_object_id(caller.user_id()?).map_err(|e| ApiError::bad_user_input(e.to_string()))?;
    let event = DbEvent::new(
        input.title,
        input.description,
        input.price,
        parse_date(&input.date),
        creator,
    );

    // 2. Persist it
    let created = EventStore::create(db, event).await?;
    let event_id = created
        .id
        .ok_or_else(|| anyhow::anyhow!("Stored event has no id"))?;

    debug!(event = %created, "Event created");

    // 3. Find the creator
    let mut user = UserStore::get(db, creator)
        .await?
        .ok_or(ApiError::UserNotFound)?;

    // 4. Link the event to them
    UserStore::append_created_event(db, &mut user, event_id).await?;

    debug!(user_id = %creator, "Event linked to creator");

    // 5. Hand back what step 2 stored
    Ok(created.into())
}
