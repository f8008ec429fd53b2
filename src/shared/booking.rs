/**
 * Booking Types
 *
 * Booking records, the request body that creates them, and the parsing
 * rules for the scheduled date.
 *
 * # Schedule Parsing
 *
 * The `date` field accepts, in order of preference:
 * 1. A full ISO-8601 date-time (`2024-03-01T10:30`, seconds and fraction optional,
 *    `T` or space separator)
 * 2. An RFC 3339 timestamp with offset, converted to UTC
 * 3. A bare date (`2024-03-01`), scheduled at midnight
 *
 * Anything else is rejected with `SharedError::InvalidDate`.
 *
 * # Identifiers
 *
 * Booking ids are `BOOK-` followed by ten uppercase hex characters taken
 * from a random v4 UUID.
 */

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;
use crate::shared::user::normalize_email;

/// Prefix of every booking id
pub const BOOKING_ID_PREFIX: &str = "BOOK-";

const BOOKING_ID_HEX_LEN: usize = 10;

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// A persisted booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub booking_id: String,
    pub user_email: String,
    pub service_name: String,
    /// Scheduled slot, no zone attached
    pub date_time: NaiveDateTime,
    /// Free-form display time chosen by the customer
    pub time: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/bookings`
///
/// Every field is optional at the serde level so that absent fields surface
/// as `MissingField` instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl BookingRequest {
    /// Validate the request and build the booking owned by `owner_email`
    ///
    /// Generates a fresh booking id and stamps `created_at` with the current
    /// time. Stores persist the result as-is.
    ///
    /// # Errors
    ///
    /// * `MissingField` - `serviceName` or `date` absent or blank
    /// * `InvalidDate` - `date` matched none of the accepted formats
    pub fn into_booking(self, owner_email: &str) -> Result<Booking, SharedError> {
        let service_name = required(self.service_name, "serviceName")?;
        let date = required(self.date, "date")?;
        let date_time = parse_schedule(&date)?;

        Ok(Booking {
            booking_id: generate_booking_id(),
            user_email: normalize_email(owner_email),
            service_name,
            date_time,
            time: optional(self.time),
            address: optional(self.address),
            phone: optional(self.phone),
            notes: optional(self.notes),
            created_at: Utc::now(),
        })
    }
}

fn required(value: Option<String>, field: &str) -> Result<String, SharedError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(SharedError::missing_field(field)),
    }
}

fn optional(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parse a booking date input into a naive date-time
pub fn parse_schedule(input: &str) -> Result<NaiveDateTime, SharedError> {
    let input = input.trim();

    for format in DATE_TIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(parsed);
        }
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Ok(parsed.naive_utc());
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|_| SharedError::invalid_date(input))
}

/// New booking id: `BOOK-` plus ten uppercase hex characters
pub fn generate_booking_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("{}{}", BOOKING_ID_PREFIX, hex[..BOOKING_ID_HEX_LEN].to_uppercase())
}

/// Whether `id` has the shape produced by `generate_booking_id`
pub fn is_booking_id(id: &str) -> bool {
    id.strip_prefix(BOOKING_ID_PREFIX).is_some_and(|hex| {
        hex.len() == BOOKING_ID_HEX_LEN
            && hex.chars().all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
    })
}
