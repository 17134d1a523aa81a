//! Developer guardrails and invariants
//!
//! Debug assertions for detecting impossible states during development.
//! These checks are compiled out in release builds.

use crate::models::{Hotel, Room, RoomStatus};

/// Validate that a hotel's state is internally consistent
pub fn assert_hotel_invariants(hotel: &Hotel) {
    debug_assert!(
        !hotel.name.trim().is_empty(),
        "Hotel {} has empty name",
        hotel.id
    );

    debug_assert!(
        hotel.owner_id > 0,
        "Hotel {} has invalid owner_id {}",
        hotel.id,
        hotel.owner_id
    );

    if let Some(price) = hotel.price {
        debug_assert!(
            price >= 0.0,
            "Hotel {} has negative price {}",
            hotel.id,
            price
        );
    }
}

/// Validate that a room's state is internally consistent
pub fn assert_room_invariants(room: &Room) {
    debug_assert!(
        room.stock >= 0,
        "Room {} has negative stock {}",
        room.id,
        room.stock
    );

    debug_assert!(
        room.price >= 0.0,
        "Room {} has negative price {}",
        room.id,
        room.price
    );

    debug_assert!(
        room.hotel_id > 0,
        "Room {} has invalid hotel_id {}",
        room.id,
        room.hotel_id
    );
}

/// Validate a public room listing: On-status only, cheapest first
pub fn assert_room_listing_invariants(rooms: &[Room]) {
    debug_assert!(
        rooms.iter().all(|r| r.status == RoomStatus::On),
        "Room listing contains Off-status rooms"
    );

    debug_assert!(
        rooms.windows(2).all(|w| w[0].price <= w[1].price),
        "Room listing is not sorted by ascending price"
    );
}
