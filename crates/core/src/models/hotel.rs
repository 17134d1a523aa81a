//! Hotel model and lifecycle status

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Hotel lifecycle status
///
/// Draft -> Pending (owner submits) -> Approved (admin) or back to Draft
/// (admin rejects). Approved hotels can be taken Offline by their owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HotelStatus {
    Draft,
    Pending,
    Approved,
    Offline,
}

impl HotelStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HotelStatus::Draft => "DRAFT",
            HotelStatus::Pending => "PENDING",
            HotelStatus::Approved => "APPROVED",
            HotelStatus::Offline => "OFFLINE",
        }
    }
}

impl std::fmt::Display for HotelStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A hotel listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hotel {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub address: String,
    pub description: Option<String>,
    pub star: Option<String>,
    pub tags: Vec<String>,
    pub price: Option<f64>,
    pub promo: Option<String>,
    pub cover_image: Option<String>,
    pub intro: Option<String>,
    pub status: HotelStatus,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when creating a hotel
///
/// Status and owner are never taken from input: creation forces
/// `Draft` and stamps the creating actor as owner.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewHotel {
    pub name: String,
    pub city: String,
    pub address: String,
    pub description: Option<String>,
    pub star: Option<String>,
    pub tags: Vec<String>,
    pub price: Option<f64>,
    pub promo: Option<String>,
    pub cover_image: Option<String>,
    pub intro: Option<String>,
}

impl NewHotel {
    pub fn new(name: impl Into<String>, city: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            city: city.into(),
            address: address.into(),
            ..Default::default()
        }
    }

    /// Check field bounds before persisting
    pub fn validate(&self) -> Result<()> {
        validate_hotel_fields(Some(&self.name), Some(&self.city), Some(&self.address), self.price)
    }
}

/// Partial update to a hotel; only supplied fields change
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HotelPatch {
    pub name: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
    pub star: Option<String>,
    pub tags: Option<Vec<String>>,
    pub price: Option<f64>,
    pub promo: Option<String>,
    pub cover_image: Option<String>,
    pub intro: Option<String>,
}

impl HotelPatch {
    pub fn validate(&self) -> Result<()> {
        validate_hotel_fields(
            self.name.as_deref(),
            self.city.as_deref(),
            self.address.as_deref(),
            self.price,
        )
    }

    /// Changing name, city, or address sends the hotel back to review
    pub fn touches_basic_info(&self) -> bool {
        self.name.is_some() || self.city.is_some() || self.address.is_some()
    }

    /// Apply supplied fields onto an existing hotel
    pub fn apply(&self, hotel: &mut Hotel) {
        if let Some(name) = &self.name {
            hotel.name = name.clone();
        }
        if let Some(city) = &self.city {
            hotel.city = city.clone();
        }
        if let Some(address) = &self.address {
            hotel.address = address.clone();
        }
        if let Some(description) = &self.description {
            hotel.description = Some(description.clone());
        }
        if let Some(star) = &self.star {
            hotel.star = Some(star.clone());
        }
        if let Some(tags) = &self.tags {
            hotel.tags = tags.clone();
        }
        if let Some(price) = self.price {
            hotel.price = Some(price);
        }
        if let Some(promo) = &self.promo {
            hotel.promo = Some(promo.clone());
        }
        if let Some(cover_image) = &self.cover_image {
            hotel.cover_image = Some(cover_image.clone());
        }
        if let Some(intro) = &self.intro {
            hotel.intro = Some(intro.clone());
        }
    }
}

fn validate_hotel_fields(
    name: Option<&str>,
    city: Option<&str>,
    address: Option<&str>,
    price: Option<f64>,
) -> Result<()> {
    if let Some(name) = name {
        if name.trim().len() < 2 || name.len() > 100 {
            return Err(Error::Validation(
                "hotel name must be 2-100 characters".into(),
            ));
        }
    }
    if let Some(city) = city {
        if city.trim().is_empty() || city.len() > 50 {
            return Err(Error::Validation("city must be 1-50 characters".into()));
        }
    }
    if let Some(address) = address {
        if address.trim().len() < 5 || address.len() > 200 {
            return Err(Error::Validation(
                "address must be 5-200 characters".into(),
            ));
        }
    }
    if let Some(price) = price {
        if price < 0.0 {
            return Err(Error::Validation("price must not be negative".into()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_applies_only_supplied_fields() {
        let mut hotel = Hotel {
            id: 1,
            name: "Harbor View".into(),
            city: "Xiamen".into(),
            address: "1 Seaside Road".into(),
            description: Some("old".into()),
            star: None,
            tags: vec!["sea".into()],
            price: Some(420.0),
            promo: None,
            cover_image: None,
            intro: None,
            status: HotelStatus::Approved,
            owner_id: 7,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let patch = HotelPatch {
            description: Some("renovated".into()),
            price: Some(399.0),
            ..Default::default()
        };
        patch.apply(&mut hotel);

        assert_eq!(hotel.name, "Harbor View");
        assert_eq!(hotel.description.as_deref(), Some("renovated"));
        assert_eq!(hotel.price, Some(399.0));
        assert!(!patch.touches_basic_info());
    }

    #[test]
    fn test_basic_info_detection() {
        let patch = HotelPatch {
            city: Some("Quanzhou".into()),
            ..Default::default()
        };
        assert!(patch.touches_basic_info());
    }

    #[test]
    fn test_validation_bounds() {
        assert!(NewHotel::new("A", "Xiamen", "1 Seaside Road").validate().is_err());
        assert!(NewHotel::new("Harbor View", "", "1 Seaside Road").validate().is_err());
        assert!(NewHotel::new("Harbor View", "Xiamen", "1 Rd").validate().is_err());

        let mut ok = NewHotel::new("Harbor View", "Xiamen", "1 Seaside Road");
        ok.price = Some(-1.0);
        assert!(ok.validate().is_err());
        ok.price = Some(420.0);
        assert!(ok.validate().is_ok());
    }
}
