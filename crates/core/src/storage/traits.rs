//! Storage repository traits
//!
//! These traits define the storage interface, allowing for different
//! implementations (SQLite, mock, future network backend). The catalog
//! layer is written against them so workflow logic stays storage-agnostic.

use uuid::Uuid;

use super::hotels::{HotelFilter, HotelPage};
use crate::error::Result;
use crate::models::{Hotel, HotelStatus, NewHotel, NewRoom, Role, Room, Session, User};

/// User repository operations
pub trait UserRepository {
    /// Create a new user
    fn create_user(&self, username: &str, password_hash: &str, role: Role) -> Result<User>;

    /// Find user by ID
    fn find_user_by_id(&self, id: i64) -> Result<Option<User>>;

    /// Find user by username
    fn find_user_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Create a session
    fn create_session(&self, session: &Session) -> Result<()>;

    /// Find a valid (non-expired) session
    fn find_valid_session(&self, session_id: Uuid) -> Result<Option<Session>>;

    /// Delete a session
    fn delete_session(&self, session_id: Uuid) -> Result<()>;

    /// Clean up expired sessions
    fn cleanup_expired_sessions(&self) -> Result<u64>;
}

/// Hotel repository operations
pub trait HotelRepository {
    /// Create a new hotel in Draft status
    fn create_hotel(&self, hotel: &NewHotel, owner_id: i64) -> Result<Hotel>;

    /// Find hotel by ID
    fn find_hotel_by_id(&self, id: i64) -> Result<Option<Hotel>>;

    /// Update a hotel
    fn update_hotel(&self, hotel: &Hotel) -> Result<()>;

    /// Update only a hotel's status
    fn update_hotel_status(&self, hotel_id: i64, status: HotelStatus) -> Result<()>;

    /// Delete a hotel (rooms cascade)
    fn delete_hotel(&self, hotel_id: i64) -> Result<()>;

    /// List hotels matching a filter, paginated
    fn list_hotels(&self, filter: &HotelFilter) -> Result<HotelPage>;
}

/// Room repository operations
pub trait RoomRepository {
    /// Create a new room under a hotel
    fn create_room(&self, room: &NewRoom, hotel_id: i64) -> Result<Room>;

    /// Find room by ID
    fn find_room_by_id(&self, id: i64) -> Result<Option<Room>>;

    /// Update a room
    fn update_room(&self, room: &Room) -> Result<()>;

    /// Overwrite a room's stock count
    fn update_room_stock(&self, room_id: i64, stock: i64) -> Result<()>;

    /// Delete a room
    fn delete_room(&self, room_id: i64) -> Result<()>;

    /// List On-status rooms for a hotel, cheapest first
    fn list_rooms_for_hotel(&self, hotel_id: i64) -> Result<Vec<Room>>;

    /// Count rooms under a hotel, any status
    fn count_rooms_for_hotel(&self, hotel_id: i64) -> Result<u64>;
}

/// Combined storage interface
///
/// Provides access to all repository operations.
/// Implementations may be backed by SQLite, mocks, or network.
pub trait Storage: UserRepository + HotelRepository + RoomRepository {}

// Blanket implementation: any type implementing all traits implements Storage
impl<T> Storage for T where T: UserRepository + HotelRepository + RoomRepository {}
