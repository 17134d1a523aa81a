//! Room model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Room availability status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomStatus {
    On,
    Off,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::On => "ON",
            RoomStatus::Off => "OFF",
        }
    }
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A bookable room type within a hotel
///
/// Rooms have no owner of their own; ownership is resolved through the
/// parent hotel's `owner_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: i64,
    pub hotel_id: i64,
    pub name: String,
    pub price: f64,
    pub stock: i64,
    pub description: Option<String>,
    pub facilities: Vec<String>,
    pub status: RoomStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when creating a room; new rooms start On
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewRoom {
    pub name: String,
    pub price: f64,
    pub stock: i64,
    pub description: Option<String>,
    pub facilities: Vec<String>,
}

impl NewRoom {
    pub fn new(name: impl Into<String>, price: f64, stock: i64) -> Self {
        Self {
            name: name.into(),
            price,
            stock,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_room_fields(Some(&self.name), Some(self.price), Some(self.stock))
    }
}

/// Partial update to a room; only supplied fields change
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomPatch {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub description: Option<String>,
    pub facilities: Option<Vec<String>>,
    pub status: Option<RoomStatus>,
}

impl RoomPatch {
    pub fn validate(&self) -> Result<()> {
        validate_room_fields(self.name.as_deref(), self.price, self.stock)
    }

    pub fn apply(&self, room: &mut Room) {
        if let Some(name) = &self.name {
            room.name = name.clone();
        }
        if let Some(price) = self.price {
            room.price = price;
        }
        if let Some(stock) = self.stock {
            room.stock = stock;
        }
        if let Some(description) = &self.description {
            room.description = Some(description.clone());
        }
        if let Some(facilities) = &self.facilities {
            room.facilities = facilities.clone();
        }
        if let Some(status) = self.status {
            room.status = status;
        }
    }
}

fn validate_room_fields(name: Option<&str>, price: Option<f64>, stock: Option<i64>) -> Result<()> {
    if let Some(name) = name {
        if name.trim().len() < 2 || name.len() > 100 {
            return Err(Error::Validation(
                "room name must be 2-100 characters".into(),
            ));
        }
    }
    if let Some(price) = price {
        if price < 0.0 {
            return Err(Error::Validation("price must not be negative".into()));
        }
    }
    if let Some(stock) = stock {
        if stock < 0 {
            return Err(Error::Validation("stock must not be negative".into()));
        }
    }
    Ok(())
}
