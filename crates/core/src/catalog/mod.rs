//! Catalog operations for hotels and rooms
//!
//! The mutation path is always load, authorize, transition, persist.
//! Services are written against the [`Storage`](crate::storage::Storage)
//! traits so they run unchanged over SQLite or an in-memory fake.

mod hotels;
mod rooms;

pub use hotels::HotelService;
pub use rooms::RoomService;
