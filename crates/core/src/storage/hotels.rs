//! Hotel storage operations

use chrono::Utc;
use rusqlite::{params, params_from_iter, Connection, ToSql};
use tracing::instrument;

use super::parse::{encode_string_list, hotel_status_from_str, parse_datetime, parse_string_list, OptionalExt};
use crate::error::Result;
use crate::models::{Hotel, HotelStatus, NewHotel};

/// Filters for hotel listing queries
///
/// The status filter is set by the catalog layer (approved-only for the
/// public read path); the rest mirror the search surface of the API.
#[derive(Debug, Clone, Default)]
pub struct HotelFilter {
    pub city: Option<String>,
    pub keyword: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub tag: Option<String>,
    pub status: Option<HotelStatus>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// One page of hotel results
#[derive(Debug, Clone)]
pub struct HotelPage {
    pub items: Vec<Hotel>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

pub struct HotelStore<'a> {
    conn: &'a Connection,
}

impl<'a> HotelStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Create a new hotel in Draft status owned by `owner_id`
    #[instrument(skip(self, hotel), fields(hotel_name = %hotel.name))]
    pub fn create(&self, hotel: &NewHotel, owner_id: i64) -> Result<Hotel> {
        let now = Utc::now();
        self.conn.execute(
            "INSERT INTO hotels (name, city, address, description, star, tags, price, promo,
                                 cover_image, intro, status, owner_id, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            params![
                hotel.name,
                hotel.city,
                hotel.address,
                hotel.description,
                hotel.star,
                encode_string_list(&hotel.tags),
                hotel.price,
                hotel.promo,
                hotel.cover_image,
                hotel.intro,
                HotelStatus::Draft.as_str(),
                owner_id,
                now.to_rfc3339(),
                now.to_rfc3339(),
            ],
        )?;

        Ok(Hotel {
            id: self.conn.last_insert_rowid(),
            name: hotel.name.clone(),
            city: hotel.city.clone(),
            address: hotel.address.clone(),
            description: hotel.description.clone(),
            star: hotel.star.clone(),
            tags: hotel.tags.clone(),
            price: hotel.price,
            promo: hotel.promo.clone(),
            cover_image: hotel.cover_image.clone(),
            intro: hotel.intro.clone(),
            status: HotelStatus::Draft,
            owner_id,
            created_at: now,
            updated_at: now,
        })
    }

    /// Find hotel by ID
    #[instrument(skip(self))]
    pub fn find_by_id(&self, id: i64) -> Result<Option<Hotel>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {COLUMNS} FROM hotels WHERE id = ?1"
        ))?;

        let hotel = stmt.query_row(params![id], row_to_hotel).optional()?;

        Ok(hotel)
    }

    /// Update a hotel's fields and status, stamping updated_at
    ///
    /// owner_id and created_at are never rewritten.
    #[instrument(skip(self, hotel), fields(hotel_id = %hotel.id))]
    pub fn update(&self, hotel: &Hotel) -> Result<()> {
        self.conn.execute(
            "UPDATE hotels SET name = ?1, city = ?2, address = ?3, description = ?4, star = ?5,
                               tags = ?6, price = ?7, promo = ?8, cover_image = ?9, intro = ?10,
                               status = ?11, updated_at = ?12
             WHERE id = ?13",
            params![
                hotel.name,
                hotel.city,
                hotel.address,
                hotel.description,
                hotel.star,
                encode_string_list(&hotel.tags),
                hotel.price,
                hotel.promo,
                hotel.cover_image,
                hotel.intro,
                hotel.status.as_str(),
                Utc::now().to_rfc3339(),
                hotel.id,
            ],
        )?;
        Ok(())
    }

    /// Update only the status column
    #[instrument(skip(self))]
    pub fn update_status(&self, hotel_id: i64, status: HotelStatus) -> Result<()> {
        self.conn.execute(
            "UPDATE hotels SET status = ?1, updated_at = ?2 WHERE id = ?3",
            params![status.as_str(), Utc::now().to_rfc3339(), hotel_id],
        )?;
        Ok(())
    }

    /// Delete a hotel; rooms cascade via foreign key
    #[instrument(skip(self))]
    pub fn delete(&self, hotel_id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM hotels WHERE id = ?1", params![hotel_id])?;
        Ok(())
    }

    /// List hotels matching the filter, newest first, paginated
    #[instrument(skip(self, filter))]
    pub fn list(&self, filter: &HotelFilter) -> Result<HotelPage> {
        let mut clauses: Vec<String> = Vec::new();
        let mut values: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(status) = filter.status {
            clauses.push(format!("status = ?{}", values.len() + 1));
            values.push(Box::new(status.as_str()));
        }
        if let Some(city) = &filter.city {
            clauses.push(format!("city = ?{}", values.len() + 1));
            values.push(Box::new(city.clone()));
        }
        if let Some(keyword) = &filter.keyword {
            clauses.push(format!("name LIKE ?{}", values.len() + 1));
            values.push(Box::new(format!("%{keyword}%")));
        }
        if filter.min_price.is_some() || filter.max_price.is_some() {
            clauses.push(format!(
                "price BETWEEN ?{} AND ?{}",
                values.len() + 1,
                values.len() + 2
            ));
            values.push(Box::new(filter.min_price.unwrap_or(0.0)));
            values.push(Box::new(filter.max_price.unwrap_or(999_999.0)));
        }
        if let Some(tag) = &filter.tag {
            // Tags are stored as a JSON array; match the quoted element
            clauses.push(format!("tags LIKE ?{}", values.len() + 1));
            values.push(Box::new(format!("%{}%", serde_json::to_string(tag)?)));
        }

        let where_sql = if clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", clauses.join(" AND "))
        };

        let total: u64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM hotels{where_sql}"),
            params_from_iter(values.iter().map(|v| v.as_ref())),
            |row| row.get(0),
        )?;

        let page = filter.page.unwrap_or(1).max(1);
        let limit = filter.limit.unwrap_or(10).clamp(1, 100);
        let offset = (page as u64 - 1) * limit as u64;

        let mut stmt = self.conn.prepare(&format!(
            "SELECT {COLUMNS} FROM hotels{where_sql}
             ORDER BY created_at DESC, id DESC
             LIMIT {limit} OFFSET {offset}"
        ))?;

        let items = stmt
            .query_map(params_from_iter(values.iter().map(|v| v.as_ref())), row_to_hotel)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let total_pages = total.div_ceil(limit as u64) as u32;

        Ok(HotelPage {
            items,
            total,
            page,
            limit,
            total_pages,
        })
    }
}

const COLUMNS: &str = "id, name, city, address, description, star, tags, price, promo, \
                       cover_image, intro, status, owner_id, created_at, updated_at";

fn row_to_hotel(row: &rusqlite::Row<'_>) -> std::result::Result<Hotel, rusqlite::Error> {
    Ok(Hotel {
        id: row.get(0)?,
        name: row.get(1)?,
        city: row.get(2)?,
        address: row.get(3)?,
        description: row.get(4)?,
        star: row.get(5)?,
        tags: parse_string_list(&row.get::<_, String>(6)?)?,
        price: row.get(7)?,
        promo: row.get(8)?,
        cover_image: row.get(9)?,
        intro: row.get(10)?,
        status: hotel_status_from_str(&row.get::<_, String>(11)?)?,
        owner_id: row.get(12)?,
        created_at: parse_datetime(&row.get::<_, String>(13)?)?,
        updated_at: parse_datetime(&row.get::<_, String>(14)?)?,
    })
}
