//! Database value parsing utilities
//!
//! Provides error-safe parsing of stored values.

use chrono::{DateTime, Utc};
use rusqlite::Error as SqlError;
use uuid::Uuid;

use crate::models::{HotelStatus, Role, RoomStatus};

/// Parse a UUID from a database string column
pub fn parse_uuid(s: &str) -> Result<Uuid, SqlError> {
    Uuid::parse_str(s).map_err(|e| {
        SqlError::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Parse a DateTime from an RFC3339 string
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, SqlError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            SqlError::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })
}

fn conversion_failure(msg: String) -> SqlError {
    SqlError::FromSqlConversionFailure(
        0,
        rusqlite::types::Type::Text,
        msg.into(),
    )
}

/// Parse an account role from its stored text
pub fn role_from_str(s: &str) -> Result<Role, SqlError> {
    match s {
        "USER" => Ok(Role::User),
        "ADMIN" => Ok(Role::Admin),
        other => Err(conversion_failure(format!("unknown role: {other}"))),
    }
}

/// Parse a hotel status from its stored text
pub fn hotel_status_from_str(s: &str) -> Result<HotelStatus, SqlError> {
    match s {
        "DRAFT" => Ok(HotelStatus::Draft),
        "PENDING" => Ok(HotelStatus::Pending),
        "APPROVED" => Ok(HotelStatus::Approved),
        "OFFLINE" => Ok(HotelStatus::Offline),
        other => Err(conversion_failure(format!("unknown hotel status: {other}"))),
    }
}

/// Parse a room status from its stored text
pub fn room_status_from_str(s: &str) -> Result<RoomStatus, SqlError> {
    match s {
        "ON" => Ok(RoomStatus::On),
        "OFF" => Ok(RoomStatus::Off),
        other => Err(conversion_failure(format!("unknown room status: {other}"))),
    }
}

/// Parse a JSON-encoded string list column (hotel tags, room facilities)
pub fn parse_string_list(s: &str) -> Result<Vec<String>, SqlError> {
    serde_json::from_str(s).map_err(|e| {
        SqlError::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Encode a string list for storage
pub fn encode_string_list(list: &[String]) -> String {
    // Vec<String> serialization cannot fail
    serde_json::to_string(list).unwrap_or_else(|_| "[]".to_string())
}

/// Extension trait for converting rusqlite Results to Option
pub trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>, SqlError>;
}

impl<T> OptionalExt<T> for Result<T, SqlError> {
    fn optional(self) -> Result<Option<T>, SqlError> {
        match self {
            Ok(v) => Ok(Some(v)),
            Err(SqlError::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
