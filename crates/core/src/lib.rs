//! Stayhub Core Library
//!
//! Core models, authorization policy, status workflow, and storage for
//! the Stayhub hotel catalog.

pub mod auth;
pub mod catalog;
pub mod error;
pub mod invariants;
pub mod models;
pub mod policy;
pub mod storage;
pub mod workflow;

pub use auth::AuthService;
pub use catalog::{HotelService, RoomService};
pub use error::{Error, Result};
pub use models::*;
pub use policy::AccessPolicy;
pub use storage::{
    Database, HotelFilter, HotelPage, HotelRepository, RoomRepository, Storage, UserRepository,
};
pub use workflow::ReviewAction;
