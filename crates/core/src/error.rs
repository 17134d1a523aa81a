//! Error types for Stayhub Core

use thiserror::Error;

use crate::models::HotelStatus;
use crate::workflow::ReviewAction;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Cannot {action} a hotel in {status} status")]
    InvalidTransition {
        status: HotelStatus,
        action: ReviewAction,
    },

    #[error("Hotel is {0}, not approved; rooms can only be added to approved hotels")]
    HotelNotApproved(HotelStatus),

    #[error("Insufficient stock: {stock} on hand, adjustment of {delta} would go negative")]
    InsufficientStock { stock: i64, delta: i64 },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
