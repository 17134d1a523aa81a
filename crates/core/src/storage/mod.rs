//! SQLite storage layer for Stayhub

mod hotels;
mod migrations;
mod parse;
mod rooms;
mod traits;
mod users;

use uuid::Uuid;

use crate::error::Result;
use crate::models::{Hotel, HotelStatus, NewHotel, NewRoom, Role, Room, Session, User};
use rusqlite::Connection;
use std::path::Path;
use tracing::instrument;

pub use hotels::{HotelFilter, HotelPage, HotelStore};
pub use rooms::RoomStore;
pub use traits::{HotelRepository, RoomRepository, Storage, UserRepository};
pub use users::UserStore;

/// Main database handle
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create database at the given path
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON")?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Open in-memory database (for testing)
    #[instrument]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON")?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initialize database schema via migrations
    fn init(&self) -> Result<()> {
        migrations::run_migrations(&self.conn)?;
        Ok(())
    }

    /// Get current schema version
    pub fn schema_version(&self) -> u32 {
        self.conn
            .query_row("SELECT MAX(version) FROM schema_migrations", [], |row| {
                row.get(0)
            })
            .unwrap_or(0)
    }

    /// Get user store
    pub fn users(&self) -> UserStore<'_> {
        UserStore::new(&self.conn)
    }

    /// Get hotel store
    pub fn hotels(&self) -> HotelStore<'_> {
        HotelStore::new(&self.conn)
    }

    /// Get room store
    pub fn rooms(&self) -> RoomStore<'_> {
        RoomStore::new(&self.conn)
    }
}

// Implement repository traits for Database
// This enables using Database through the trait interface

impl UserRepository for Database {
    fn create_user(&self, username: &str, password_hash: &str, role: Role) -> Result<User> {
        self.users().create(username, password_hash, role)
    }

    fn find_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.users().find_by_id(id)
    }

    fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.users().find_by_username(username)
    }

    fn create_session(&self, session: &Session) -> Result<()> {
        self.users().create_session(session)
    }

    fn find_valid_session(&self, session_id: Uuid) -> Result<Option<Session>> {
        self.users().find_valid_session(session_id)
    }

    fn delete_session(&self, session_id: Uuid) -> Result<()> {
        self.users().delete_session(session_id)
    }

    fn cleanup_expired_sessions(&self) -> Result<u64> {
        self.users().cleanup_expired_sessions()
    }
}

impl HotelRepository for Database {
    fn create_hotel(&self, hotel: &NewHotel, owner_id: i64) -> Result<Hotel> {
        self.hotels().create(hotel, owner_id)
    }

    fn find_hotel_by_id(&self, id: i64) -> Result<Option<Hotel>> {
        self.hotels().find_by_id(id)
    }

    fn update_hotel(&self, hotel: &Hotel) -> Result<()> {
        self.hotels().update(hotel)
    }

    fn update_hotel_status(&self, hotel_id: i64, status: HotelStatus) -> Result<()> {
        self.hotels().update_status(hotel_id, status)
    }

    fn delete_hotel(&self, hotel_id: i64) -> Result<()> {
        self.hotels().delete(hotel_id)
    }

    fn list_hotels(&self, filter: &HotelFilter) -> Result<HotelPage> {
        self.hotels().list(filter)
    }
}

impl RoomRepository for Database {
    fn create_room(&self, room: &NewRoom, hotel_id: i64) -> Result<Room> {
        self.rooms().create(room, hotel_id)
    }

    fn find_room_by_id(&self, id: i64) -> Result<Option<Room>> {
        self.rooms().find_by_id(id)
    }

    fn update_room(&self, room: &Room) -> Result<()> {
        self.rooms().update(room)
    }

    fn update_room_stock(&self, room_id: i64, stock: i64) -> Result<()> {
        self.rooms().update_stock(room_id, stock)
    }

    fn delete_room(&self, room_id: i64) -> Result<()> {
        self.rooms().delete(room_id)
    }

    fn list_rooms_for_hotel(&self, hotel_id: i64) -> Result<Vec<Room>> {
        self.rooms().list_for_hotel(hotel_id)
    }

    fn count_rooms_for_hotel(&self, hotel_id: i64) -> Result<u64> {
        self.rooms().count_for_hotel(hotel_id)
    }
}
