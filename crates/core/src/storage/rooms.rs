//! Room storage operations

use chrono::Utc;
use rusqlite::{params, Connection};
use tracing::instrument;

use super::parse::{encode_string_list, parse_datetime, parse_string_list, room_status_from_str, OptionalExt};
use crate::error::Result;
use crate::models::{NewRoom, Room, RoomStatus};

pub struct RoomStore<'a> {
    conn: &'a Connection,
}

impl<'a> RoomStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Create a new room under a hotel; new rooms start On
    #[instrument(skip(self, room), fields(room_name = %room.name))]
    pub fn create(&self, room: &NewRoom, hotel_id: i64) -> Result<Room> {
        let now = Utc::now();
        self.conn.execute(
            "INSERT INTO rooms (hotel_id, name, price, stock, description, facilities, status,
                                created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                hotel_id,
                room.name,
                room.price,
                room.stock,
                room.description,
                encode_string_list(&room.facilities),
                RoomStatus::On.as_str(),
                now.to_rfc3339(),
                now.to_rfc3339(),
            ],
        )?;

        Ok(Room {
            id: self.conn.last_insert_rowid(),
            hotel_id,
            name: room.name.clone(),
            price: room.price,
            stock: room.stock,
            description: room.description.clone(),
            facilities: room.facilities.clone(),
            status: RoomStatus::On,
            created_at: now,
            updated_at: now,
        })
    }

    /// Find room by ID
    #[instrument(skip(self))]
    pub fn find_by_id(&self, id: i64) -> Result<Option<Room>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {COLUMNS} FROM rooms WHERE id = ?1"
        ))?;

        let room = stmt.query_row(params![id], row_to_room).optional()?;

        Ok(room)
    }

    /// Update a room's fields, stamping updated_at
    #[instrument(skip(self, room), fields(room_id = %room.id))]
    pub fn update(&self, room: &Room) -> Result<()> {
        self.conn.execute(
            "UPDATE rooms SET name = ?1, price = ?2, stock = ?3, description = ?4,
                              facilities = ?5, status = ?6, updated_at = ?7
             WHERE id = ?8",
            params![
                room.name,
                room.price,
                room.stock,
                room.description,
                encode_string_list(&room.facilities),
                room.status.as_str(),
                Utc::now().to_rfc3339(),
                room.id,
            ],
        )?;
        Ok(())
    }

    /// Overwrite the stock count only
    #[instrument(skip(self))]
    pub fn update_stock(&self, room_id: i64, stock: i64) -> Result<()> {
        self.conn.execute(
            "UPDATE rooms SET stock = ?1, updated_at = ?2 WHERE id = ?3",
            params![stock, Utc::now().to_rfc3339(), room_id],
        )?;
        Ok(())
    }

    /// Delete a room
    #[instrument(skip(self))]
    pub fn delete(&self, room_id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM rooms WHERE id = ?1", params![room_id])?;
        Ok(())
    }

    /// List bookable rooms for a hotel
    ///
    /// Only On-status rooms, cheapest first; insertion order breaks ties.
    #[instrument(skip(self))]
    pub fn list_for_hotel(&self, hotel_id: i64) -> Result<Vec<Room>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {COLUMNS} FROM rooms
             WHERE hotel_id = ?1 AND status = 'ON'
             ORDER BY price ASC, id ASC"
        ))?;

        let rooms = stmt
            .query_map(params![hotel_id], row_to_room)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rooms)
    }

    /// Count rooms under a hotel, any status
    #[instrument(skip(self))]
    pub fn count_for_hotel(&self, hotel_id: i64) -> Result<u64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM rooms WHERE hotel_id = ?1",
            params![hotel_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

const COLUMNS: &str =
    "id, hotel_id, name, price, stock, description, facilities, status, created_at, updated_at";

fn row_to_room(row: &rusqlite::Row<'_>) -> std::result::Result<Room, rusqlite::Error> {
    Ok(Room {
        id: row.get(0)?,
        hotel_id: row.get(1)?,
        name: row.get(2)?,
        price: row.get(3)?,
        stock: row.get(4)?,
        description: row.get(5)?,
        facilities: parse_string_list(&row.get::<_, String>(6)?)?,
        status: room_status_from_str(&row.get::<_, String>(7)?)?,
        created_at: parse_datetime(&row.get::<_, String>(8)?)?,
        updated_at: parse_datetime(&row.get::<_, String>(9)?)?,
    })
}
