/**
 * Firestore Document Encoding
 *
 * Conversion between domain records and the Firestore REST representation,
 * where every field is wrapped in a typed value (`{"stringValue": "..."}`).
 *
 * Field names match what the service has always written:
 * - `users/{email}`: `name`, `email`, `password_hash`, `createdAt`
 * - `bookings/{bookingId}`: `bookingId`, `userEmail`, `serviceName`,
 *   `dateTime`, `time`, `address`, `phone`, `notes`, `createdAt`
 * - `services/{id}`: `id`, `name`, `description`
 *
 * Timestamps are stored as ISO-8601 strings. Older records carry naive UTC
 * timestamps without an offset; both forms are accepted on read.
 */

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::backend::storage::error::StoreError;
use crate::shared::booking::parse_schedule;
use crate::shared::{Booking, NewUser, ServiceEntry, UserId, UserRecord};

/// A document as returned by the REST API
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Full resource name, `projects/.../documents/{collection}/{id}`
    pub name: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
    pub update_time: Option<String>,
}

impl Document {
    /// Last path segment of the resource name
    pub fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or_default()
    }

    fn string(&self, key: &str) -> Option<&str> {
        self.fields.get(key)?.get("stringValue")?.as_str()
    }

    fn required_string(&self, key: &str) -> Result<String, StoreError> {
        self.string(key)
            .map(str::to_string)
            .ok_or_else(|| StoreError::decode(format!("{} is missing field '{}'", self.name, key)))
    }

    fn optional_string(&self, key: &str) -> Option<String> {
        self.string(key).map(str::to_string)
    }

    fn integer(&self, key: &str) -> Option<i64> {
        let value = self.fields.get(key)?;
        if let Some(raw) = value.get("integerValue") {
            // The REST API sends int64 as a JSON string.
            return raw.as_str().and_then(|s| s.parse().ok()).or_else(|| raw.as_i64());
        }
        if let Some(raw) = value.get("doubleValue") {
            return raw.as_f64().map(|f| f as i64);
        }
        self.string(key).and_then(|s| s.trim().parse().ok())
    }

    fn timestamp(&self, key: &str) -> Result<DateTime<Utc>, StoreError> {
        let raw = self
            .fields
            .get(key)
            .and_then(|v| v.get("timestampValue").or_else(|| v.get("stringValue")))
            .and_then(Value::as_str)
            .ok_or_else(|| StoreError::decode(format!("{} is missing field '{}'", self.name, key)))?;
        parse_timestamp(raw)
            .ok_or_else(|| StoreError::decode(format!("{} has unreadable '{}': {}", self.name, key, raw)))
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

fn string_value(value: &str) -> Value {
    json!({ "stringValue": value })
}

fn optional_value(value: Option<&str>) -> Value {
    match value {
        Some(v) => string_value(v),
        None => json!({ "nullValue": null }),
    }
}

fn timestamp_string(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Request body for a new `users` document
pub fn user_body(user: &NewUser, created_at: DateTime<Utc>) -> Value {
    json!({
        "fields": {
            "name": string_value(&user.name),
            "email": string_value(&user.email),
            "password_hash": string_value(&user.password_hash),
            "createdAt": string_value(&timestamp_string(created_at)),
        }
    })
}

pub fn user_from_document(doc: &Document) -> Result<UserRecord, StoreError> {
    let email = doc.optional_string("email").unwrap_or_else(|| doc.id().to_string());
    Ok(UserRecord {
        id: UserId::Key(email.clone()),
        name: doc.optional_string("name").unwrap_or_default(),
        email,
        password_hash: doc.required_string("password_hash")?,
        created_at: doc.timestamp("createdAt")?,
    })
}

/// Request body for a new `bookings` document
pub fn booking_body(booking: &Booking) -> Value {
    json!({
        "fields": {
            "bookingId": string_value(&booking.booking_id),
            "userEmail": string_value(&booking.user_email),
            "serviceName": string_value(&booking.service_name),
            "dateTime": string_value(&booking.date_time.format("%Y-%m-%dT%H:%M:%S%.f").to_string()),
            "time": optional_value(booking.time.as_deref()),
            "address": optional_value(booking.address.as_deref()),
            "phone": optional_value(booking.phone.as_deref()),
            "notes": optional_value(booking.notes.as_deref()),
            "createdAt": string_value(&timestamp_string(booking.created_at)),
        }
    })
}

pub fn booking_from_document(doc: &Document) -> Result<Booking, StoreError> {
    let raw_schedule = doc.required_string("dateTime")?;
    let date_time = parse_schedule(&raw_schedule)
        .map_err(|_| StoreError::decode(format!("{} has unreadable dateTime: {}", doc.name, raw_schedule)))?;

    Ok(Booking {
        booking_id: doc.optional_string("bookingId").unwrap_or_else(|| doc.id().to_string()),
        user_email: doc.required_string("userEmail")?,
        service_name: doc.required_string("serviceName")?,
        date_time,
        time: doc.optional_string("time"),
        address: doc.optional_string("address"),
        phone: doc.optional_string("phone"),
        notes: doc.optional_string("notes"),
        created_at: doc.timestamp("createdAt")?,
    })
}

/// `position` (1-based) stands in for a missing `id` field
pub fn service_from_document(doc: &Document, position: usize) -> Result<ServiceEntry, StoreError> {
    let id = doc
        .integer("id")
        .and_then(|id| u32::try_from(id).ok())
        .unwrap_or(position as u32);
    Ok(ServiceEntry::new(
        id,
        doc.required_string("name")?,
        doc.optional_string("description").unwrap_or_default(),
    ))
}
