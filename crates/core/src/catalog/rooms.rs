//! Room catalog operations
//!
//! Rooms have no owner of their own; every authorization check resolves
//! through the parent hotel.

use tracing::instrument;

use crate::error::{Error, Result};
use crate::models::{Actor, Hotel, HotelStatus, NewRoom, Room, RoomPatch};
use crate::policy::AccessPolicy;
use crate::storage::Storage;

/// Room CRUD and stock operations
pub struct RoomService<'a, S: Storage> {
    store: &'a S,
}

impl<'a, S: Storage> RoomService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Create a room under an approved hotel
    ///
    /// The approval gate is checked after authorization, so a stranger
    /// gets PermissionDenied rather than learning the hotel's status.
    #[instrument(skip(self, room), fields(room_name = %room.name))]
    pub fn create(&self, hotel_id: i64, room: &NewRoom, actor: Actor) -> Result<Room> {
        room.validate()?;

        let hotel = self.load_hotel(hotel_id)?;
        self.authorize(&hotel, actor)?;

        if hotel.status != HotelStatus::Approved {
            return Err(Error::HotelNotApproved(hotel.status));
        }

        self.store.create_room(room, hotel_id)
    }

    /// Fetch a room by id
    #[instrument(skip(self))]
    pub fn get(&self, id: i64) -> Result<Room> {
        self.load_room(id)
    }

    /// Update a room's fields
    #[instrument(skip(self, patch))]
    pub fn update(&self, id: i64, patch: &RoomPatch, actor: Actor) -> Result<Room> {
        patch.validate()?;

        let mut room = self.load_room(id)?;
        let hotel = self.load_hotel(room.hotel_id)?;
        self.authorize(&hotel, actor)?;

        patch.apply(&mut room);
        self.store.update_room(&room)?;

        self.load_room(id)
    }

    /// Delete a room
    #[instrument(skip(self))]
    pub fn delete(&self, id: i64, actor: Actor) -> Result<()> {
        let room = self.load_room(id)?;
        let hotel = self.load_hotel(room.hotel_id)?;
        self.authorize(&hotel, actor)?;
        self.store.delete_room(id)
    }

    /// List bookable rooms for a hotel (public read path)
    ///
    /// Only On-status rooms, cheapest first.
    #[instrument(skip(self))]
    pub fn list_for_hotel(&self, hotel_id: i64) -> Result<Vec<Room>> {
        self.store.list_rooms_for_hotel(hotel_id)
    }

    /// Adjust a room's stock by a signed delta, returning the new count
    ///
    /// Booking and cancellation flows are server-internal, so this is
    /// gated to admin actors. The stock is left untouched when the
    /// adjustment would go negative.
    #[instrument(skip(self))]
    pub fn adjust_stock(&self, id: i64, delta: i64, actor: Actor) -> Result<i64> {
        if !AccessPolicy::can_adjust_stock(actor) {
            return Err(Error::PermissionDenied(format!(
                "user {} may not adjust stock",
                actor.id
            )));
        }

        let room = self.load_room(id)?;
        // Checked arithmetic: an extreme delta must fail cleanly, not wrap
        let new_stock = room
            .stock
            .checked_add(delta)
            .ok_or_else(|| Error::Validation(format!("stock adjustment of {delta} is out of range")))?;
        if new_stock < 0 {
            return Err(Error::InsufficientStock {
                stock: room.stock,
                delta,
            });
        }

        self.store.update_room_stock(id, new_stock)?;
        Ok(new_stock)
    }

    fn load_room(&self, id: i64) -> Result<Room> {
        self.store
            .find_room_by_id(id)?
            .ok_or_else(|| Error::NotFound(format!("room {id}")))
    }

    fn load_hotel(&self, id: i64) -> Result<Hotel> {
        self.store
            .find_hotel_by_id(id)?
            .ok_or_else(|| Error::NotFound(format!("hotel {id}")))
    }

    fn authorize(&self, hotel: &Hotel, actor: Actor) -> Result<()> {
        if !AccessPolicy::can_mutate(actor, hotel.owner_id) {
            return Err(Error::PermissionDenied(format!(
                "user {} may not manage rooms of hotel {}",
                actor.id, hotel.id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::HotelService;
    use crate::models::{NewHotel, Role, RoomStatus};
    use crate::storage::Database;

    fn setup() -> (Database, Actor, Actor, Actor) {
        let db = Database::open_in_memory().unwrap();
        let owner = db.users().create("owner", "hash", Role::User).unwrap();
        let stranger = db.users().create("stranger", "hash", Role::User).unwrap();
        let admin = db.users().create("admin", "hash", Role::Admin).unwrap();
        (db, owner.actor(), stranger.actor(), admin.actor())
    }

    fn approved_hotel(db: &Database, owner: Actor) -> i64 {
        let hotels = HotelService::new(db);
        let hotel = hotels
            .create(&NewHotel::new("Harbor View", "Xiamen", "88 Harbor Street"), owner.id)
            .unwrap();
        hotels.submit_for_review(hotel.id, owner.id).unwrap();
        hotels.approve(hotel.id).unwrap();
        hotel.id
    }

    #[test]
    fn test_create_requires_approved_hotel() {
        let (db, owner, _, _) = setup();
        let hotels = HotelService::new(&db);
        let rooms = RoomService::new(&db);

        let hotel = hotels
            .create(&NewHotel::new("Harbor View", "Xiamen", "88 Harbor Street"), owner.id)
            .unwrap();
        let room = NewRoom::new("Twin Room", 299.0, 10);

        // Draft
        let err = rooms.create(hotel.id, &room, owner).unwrap_err();
        assert!(matches!(err, Error::HotelNotApproved(HotelStatus::Draft)));

        // Pending
        hotels.submit_for_review(hotel.id, owner.id).unwrap();
        let err = rooms.create(hotel.id, &room, owner).unwrap_err();
        assert!(matches!(err, Error::HotelNotApproved(HotelStatus::Pending)));

        // Approved, then Offline
        hotels.approve(hotel.id).unwrap();
        assert!(rooms.create(hotel.id, &room, owner).is_ok());

        hotels.offline(hotel.id, owner.id).unwrap();
        let err = rooms.create(hotel.id, &room, owner).unwrap_err();
        assert!(matches!(err, Error::HotelNotApproved(HotelStatus::Offline)));

        // Nothing extra was created along the way
        assert_eq!(db.rooms().count_for_hotel(hotel.id).unwrap(), 1);
    }

    #[test]
    fn test_create_authorization_precedes_approval_gate() {
        let (db, owner, stranger, admin) = setup();
        let rooms = RoomService::new(&db);
        let hotel_id = approved_hotel(&db, owner);

        let room = NewRoom::new("Twin Room", 299.0, 10);
        assert!(matches!(
            rooms.create(hotel_id, &room, stranger).unwrap_err(),
            Error::PermissionDenied(_)
        ));
        assert!(rooms.create(hotel_id, &room, admin).is_ok());
    }

    #[test]
    fn test_create_missing_hotel() {
        let (db, owner, _, _) = setup();
        let rooms = RoomService::new(&db);

        let err = rooms
            .create(42, &NewRoom::new("Twin Room", 299.0, 10), owner)
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_update_resolves_owner_through_hotel() {
        let (db, owner, stranger, admin) = setup();
        let rooms = RoomService::new(&db);
        let hotel_id = approved_hotel(&db, owner);
        let room = rooms
            .create(hotel_id, &NewRoom::new("Twin Room", 299.0, 10), owner)
            .unwrap();

        let patch = RoomPatch {
            price: Some(319.0),
            ..Default::default()
        };

        assert!(matches!(
            rooms.update(room.id, &patch, stranger).unwrap_err(),
            Error::PermissionDenied(_)
        ));

        let updated = rooms.update(room.id, &patch, owner).unwrap();
        assert_eq!(updated.price, 319.0);
        assert_eq!(updated.stock, 10);

        let patch = RoomPatch {
            status: Some(RoomStatus::Off),
            ..Default::default()
        };
        let updated = rooms.update(room.id, &patch, admin).unwrap();
        assert_eq!(updated.status, RoomStatus::Off);
    }

    #[test]
    fn test_delete_room() {
        let (db, owner, stranger, _) = setup();
        let rooms = RoomService::new(&db);
        let hotel_id = approved_hotel(&db, owner);
        let room = rooms
            .create(hotel_id, &NewRoom::new("Twin Room", 299.0, 10), owner)
            .unwrap();

        assert!(matches!(
            rooms.delete(room.id, stranger).unwrap_err(),
            Error::PermissionDenied(_)
        ));
        rooms.delete(room.id, owner).unwrap();
        assert!(matches!(rooms.get(room.id).unwrap_err(), Error::NotFound(_)));
    }

    #[test]
    fn test_adjust_stock_success_and_shortfall() {
        let (db, owner, _, admin) = setup();
        let rooms = RoomService::new(&db);
        let hotel_id = approved_hotel(&db, owner);
        let room = rooms
            .create(hotel_id, &NewRoom::new("Twin Room", 299.0, 5), owner)
            .unwrap();

        assert_eq!(rooms.adjust_stock(room.id, -3, admin).unwrap(), 2);

        let err = rooms.adjust_stock(room.id, -10, admin).unwrap_err();
        assert!(matches!(
            err,
            Error::InsufficientStock { stock: 2, delta: -10 }
        ));

        // Unchanged, not clamped
        assert_eq!(rooms.get(room.id).unwrap().stock, 2);

        assert_eq!(rooms.adjust_stock(room.id, 4, admin).unwrap(), 6);
    }

    #[test]
    fn test_adjust_stock_extreme_deltas_fail_cleanly() {
        let (db, owner, _, admin) = setup();
        let rooms = RoomService::new(&db);
        let hotel_id = approved_hotel(&db, owner);
        let room = rooms
            .create(hotel_id, &NewRoom::new("Twin Room", 299.0, 5), owner)
            .unwrap();

        // Deltas that would overflow the count must not wrap or panic
        let err = rooms.adjust_stock(room.id, i64::MAX, admin).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        let err = rooms.adjust_stock(room.id, i64::MIN, admin).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        assert_eq!(rooms.get(room.id).unwrap().stock, 5);
    }

    #[test]
    fn test_adjust_stock_is_admin_only() {
        let (db, owner, _, _) = setup();
        let rooms = RoomService::new(&db);
        let hotel_id = approved_hotel(&db, owner);
        let room = rooms
            .create(hotel_id, &NewRoom::new("Twin Room", 299.0, 5), owner)
            .unwrap();

        // Even the hotel owner cannot adjust stock directly
        let err = rooms.adjust_stock(room.id, -1, owner).unwrap_err();
        assert!(matches!(err, Error::PermissionDenied(_)));
        assert_eq!(rooms.get(room.id).unwrap().stock, 5);
    }

    #[test]
    fn test_listing_is_on_only_and_sorted() {
        let (db, owner, _, _) = setup();
        let rooms = RoomService::new(&db);
        let hotel_id = approved_hotel(&db, owner);

        let suite = rooms
            .create(hotel_id, &NewRoom::new("Suite", 899.0, 2), owner)
            .unwrap();
        rooms
            .create(hotel_id, &NewRoom::new("Twin Room", 299.0, 10), owner)
            .unwrap();
        rooms
            .create(hotel_id, &NewRoom::new("King Room", 459.0, 5), owner)
            .unwrap();

        let patch = RoomPatch {
            status: Some(RoomStatus::Off),
            ..Default::default()
        };
        rooms.update(suite.id, &patch, owner).unwrap();

        let listed = rooms.list_for_hotel(hotel_id).unwrap();
        let names: Vec<_> = listed.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Twin Room", "King Room"]);
    }
}
