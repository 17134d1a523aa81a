//! Data models for Stayhub

mod user;
mod hotel;
mod room;

pub use user::*;
pub use hotel::*;
pub use room::*;
