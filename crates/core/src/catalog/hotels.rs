//! Hotel catalog operations

use tracing::instrument;

use crate::error::{Error, Result};
use crate::models::{Actor, Hotel, HotelPatch, HotelStatus, NewHotel};
use crate::policy::AccessPolicy;
use crate::storage::{HotelFilter, HotelPage, Storage};
use crate::workflow::{self, ReviewAction};

/// Hotel lifecycle and CRUD operations
pub struct HotelService<'a, S: Storage> {
    store: &'a S,
}

impl<'a, S: Storage> HotelService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Create a hotel owned by `owner_id`
    ///
    /// Status is forced to Draft and the owner to the creating actor,
    /// whatever the input claims.
    #[instrument(skip(self, hotel), fields(hotel_name = %hotel.name))]
    pub fn create(&self, hotel: &NewHotel, owner_id: i64) -> Result<Hotel> {
        hotel.validate()?;
        self.store.create_hotel(hotel, owner_id)
    }

    /// Fetch a hotel, applying the visibility rule
    ///
    /// Hidden listings are reported as not found rather than denied, so
    /// their existence does not leak to other users.
    #[instrument(skip(self))]
    pub fn get(&self, id: i64, viewer: Option<Actor>) -> Result<Hotel> {
        let hotel = self.load(id)?;
        if !AccessPolicy::can_view(viewer, hotel.status, hotel.owner_id) {
            return Err(Error::NotFound(format!("hotel {id}")));
        }
        Ok(hotel)
    }

    /// List hotels matching the filter
    ///
    /// Non-admin viewers only ever see approved listings; an admin may
    /// filter by any status or none.
    #[instrument(skip(self, filter))]
    pub fn list(&self, filter: &HotelFilter, viewer: Option<Actor>) -> Result<HotelPage> {
        let is_admin = viewer.map(|a| a.role.is_admin()).unwrap_or(false);
        if is_admin {
            return self.store.list_hotels(filter);
        }

        let mut public = filter.clone();
        public.status = Some(HotelStatus::Approved);
        self.store.list_hotels(&public)
    }

    /// Update a hotel's fields
    ///
    /// Edits to name, city, or address put the listing back into Pending.
    #[instrument(skip(self, patch))]
    pub fn update(&self, id: i64, patch: &HotelPatch, actor: Actor) -> Result<Hotel> {
        patch.validate()?;

        let mut hotel = self.load(id)?;
        self.authorize_mutation(&hotel, actor)?;

        patch.apply(&mut hotel);
        hotel.status = workflow::status_after_update(hotel.status, patch.touches_basic_info());
        self.store.update_hotel(&hotel)?;

        self.load(id)
    }

    /// Delete a hotel; its rooms go with it
    #[instrument(skip(self))]
    pub fn delete(&self, id: i64, actor: Actor) -> Result<()> {
        let hotel = self.load(id)?;
        self.authorize_mutation(&hotel, actor)?;
        self.store.delete_hotel(id)
    }

    /// Owner submits a draft for review
    #[instrument(skip(self))]
    pub fn submit_for_review(&self, id: i64, actor_id: i64) -> Result<Hotel> {
        self.owner_transition(id, actor_id, ReviewAction::Submit)
    }

    /// Admin approves a pending listing (caller has already verified the
    /// actor is an admin)
    #[instrument(skip(self))]
    pub fn approve(&self, id: i64) -> Result<Hotel> {
        self.apply_transition(self.load(id)?, ReviewAction::Approve)
    }

    /// Admin rejects a pending listing back to draft
    #[instrument(skip(self))]
    pub fn reject(&self, id: i64) -> Result<Hotel> {
        self.apply_transition(self.load(id)?, ReviewAction::Reject)
    }

    /// Owner confirms publication of an approved listing
    ///
    /// Observational only: verifies the listing is approved and owned by
    /// the caller, but stores nothing.
    #[instrument(skip(self))]
    pub fn publish(&self, id: i64, actor_id: i64) -> Result<()> {
        let hotel = self.load(id)?;
        self.authorize_owner(&hotel, actor_id)?;
        workflow::transition(hotel.status, ReviewAction::Publish)?;
        Ok(())
    }

    /// Owner takes a listing offline; re-offlining is a no-op success
    #[instrument(skip(self))]
    pub fn offline(&self, id: i64, actor_id: i64) -> Result<Hotel> {
        self.owner_transition(id, actor_id, ReviewAction::Offline)
    }

    fn load(&self, id: i64) -> Result<Hotel> {
        self.store
            .find_hotel_by_id(id)?
            .ok_or_else(|| Error::NotFound(format!("hotel {id}")))
    }

    fn authorize_mutation(&self, hotel: &Hotel, actor: Actor) -> Result<()> {
        if !AccessPolicy::can_mutate(actor, hotel.owner_id) {
            return Err(Error::PermissionDenied(format!(
                "user {} may not modify hotel {}",
                actor.id, hotel.id
            )));
        }
        Ok(())
    }

    fn authorize_owner(&self, hotel: &Hotel, actor_id: i64) -> Result<()> {
        if hotel.owner_id != actor_id {
            return Err(Error::PermissionDenied(format!(
                "user {actor_id} is not the owner of hotel {}",
                hotel.id
            )));
        }
        Ok(())
    }

    fn owner_transition(&self, id: i64, actor_id: i64, action: ReviewAction) -> Result<Hotel> {
        let hotel = self.load(id)?;
        self.authorize_owner(&hotel, actor_id)?;
        self.apply_transition(hotel, action)
    }

    fn apply_transition(&self, mut hotel: Hotel, action: ReviewAction) -> Result<Hotel> {
        let next = workflow::transition(hotel.status, action)?;
        self.store.update_hotel_status(hotel.id, next)?;
        hotel.status = next;
        Ok(hotel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::storage::Database;

    fn setup() -> (Database, Actor, Actor, Actor) {
        let db = Database::open_in_memory().unwrap();
        let owner = db.users().create("owner", "hash", Role::User).unwrap();
        let stranger = db.users().create("stranger", "hash", Role::User).unwrap();
        let admin = db.users().create("admin", "hash", Role::Admin).unwrap();
        (db, owner.actor(), stranger.actor(), admin.actor())
    }

    fn draft_hotel<S: Storage>(service: &HotelService<'_, S>, owner: Actor) -> Hotel {
        service
            .create(&NewHotel::new("Harbor View", "Xiamen", "88 Harbor Street"), owner.id)
            .unwrap()
    }

    #[test]
    fn test_create_forces_draft_and_owner() {
        let (db, owner, _, _) = setup();
        let service = HotelService::new(&db);

        let hotel = draft_hotel(&service, owner);
        assert_eq!(hotel.status, HotelStatus::Draft);
        assert_eq!(hotel.owner_id, owner.id);
    }

    #[test]
    fn test_review_cycle() {
        let (db, owner, _, _) = setup();
        let service = HotelService::new(&db);
        let hotel = draft_hotel(&service, owner);

        let hotel = service.submit_for_review(hotel.id, owner.id).unwrap();
        assert_eq!(hotel.status, HotelStatus::Pending);

        let hotel = service.approve(hotel.id).unwrap();
        assert_eq!(hotel.status, HotelStatus::Approved);

        service.publish(hotel.id, owner.id).unwrap();
        assert_eq!(
            service.get(hotel.id, None).unwrap().status,
            HotelStatus::Approved
        );
    }

    #[test]
    fn test_reject_returns_to_draft() {
        let (db, owner, _, _) = setup();
        let service = HotelService::new(&db);
        let hotel = draft_hotel(&service, owner);

        service.submit_for_review(hotel.id, owner.id).unwrap();
        let hotel = service.reject(hotel.id).unwrap();
        assert_eq!(hotel.status, HotelStatus::Draft);
    }

    #[test]
    fn test_submit_from_approved_fails_and_preserves_state() {
        let (db, owner, _, _) = setup();
        let service = HotelService::new(&db);
        let hotel = draft_hotel(&service, owner);

        service.submit_for_review(hotel.id, owner.id).unwrap();
        service.approve(hotel.id).unwrap();

        let err = service.submit_for_review(hotel.id, owner.id).unwrap_err();
        assert!(matches!(err, Error::InvalidTransition { .. }));

        let hotel = service.get(hotel.id, None).unwrap();
        assert_eq!(hotel.status, HotelStatus::Approved);
    }

    #[test]
    fn test_approve_requires_pending() {
        let (db, owner, _, _) = setup();
        let service = HotelService::new(&db);
        let hotel = draft_hotel(&service, owner);

        let err = service.approve(hotel.id).unwrap_err();
        assert!(matches!(err, Error::InvalidTransition { .. }));
    }

    #[test]
    fn test_mutation_authorization_matrix() {
        let (db, owner, stranger, admin) = setup();
        let service = HotelService::new(&db);
        let hotel = draft_hotel(&service, owner);

        let patch = HotelPatch {
            description: Some("renovated".into()),
            ..Default::default()
        };

        assert!(service.update(hotel.id, &patch, owner).is_ok());
        assert!(service.update(hotel.id, &patch, admin).is_ok());

        let err = service.update(hotel.id, &patch, stranger).unwrap_err();
        assert!(matches!(err, Error::PermissionDenied(_)));

        let err = service.delete(hotel.id, stranger).unwrap_err();
        assert!(matches!(err, Error::PermissionDenied(_)));
        assert!(service.delete(hotel.id, admin).is_ok());
    }

    #[test]
    fn test_basic_info_update_resets_status() {
        let (db, owner, _, _) = setup();
        let service = HotelService::new(&db);
        let hotel = draft_hotel(&service, owner);

        service.submit_for_review(hotel.id, owner.id).unwrap();
        service.approve(hotel.id).unwrap();

        // Non-basic edit keeps Approved
        let patch = HotelPatch {
            promo: Some("late summer deal".into()),
            ..Default::default()
        };
        let hotel = service.update(hotel.id, &patch, owner).unwrap();
        assert_eq!(hotel.status, HotelStatus::Approved);

        // Renaming sends it back to review
        let patch = HotelPatch {
            name: Some("Harbor View Grand".into()),
            ..Default::default()
        };
        let hotel = service.update(hotel.id, &patch, owner).unwrap();
        assert_eq!(hotel.status, HotelStatus::Pending);
    }

    #[test]
    fn test_visibility_rule() {
        let (db, owner, stranger, admin) = setup();
        let service = HotelService::new(&db);
        let hotel = draft_hotel(&service, owner);
        service.submit_for_review(hotel.id, owner.id).unwrap();

        // Pending: owner and admin see it, strangers and guests do not
        assert!(service.get(hotel.id, Some(owner)).is_ok());
        assert!(service.get(hotel.id, Some(admin)).is_ok());
        assert!(matches!(
            service.get(hotel.id, Some(stranger)).unwrap_err(),
            Error::NotFound(_)
        ));
        assert!(matches!(
            service.get(hotel.id, None).unwrap_err(),
            Error::NotFound(_)
        ));

        // Approved: public
        service.approve(hotel.id).unwrap();
        assert!(service.get(hotel.id, None).is_ok());
        assert!(service.get(hotel.id, Some(stranger)).is_ok());
    }

    #[test]
    fn test_list_is_approved_only_for_public() {
        let (db, owner, stranger, admin) = setup();
        let service = HotelService::new(&db);

        let a = draft_hotel(&service, owner);
        service.submit_for_review(a.id, owner.id).unwrap();
        service.approve(a.id).unwrap();
        service
            .create(&NewHotel::new("Hidden Draft", "Xiamen", "9 Station Road"), owner.id)
            .unwrap();

        let page = service.list(&HotelFilter::default(), None).unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].id, a.id);

        // The status filter cannot be abused by non-admins
        let sneaky = HotelFilter {
            status: Some(HotelStatus::Draft),
            ..Default::default()
        };
        let page = service.list(&sneaky, Some(stranger)).unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].id, a.id);

        // Admins see everything
        let page = service.list(&HotelFilter::default(), Some(admin)).unwrap();
        assert_eq!(page.total, 2);
    }

    #[test]
    fn test_offline_is_idempotent() {
        let (db, owner, _, _) = setup();
        let service = HotelService::new(&db);
        let hotel = draft_hotel(&service, owner);
        service.submit_for_review(hotel.id, owner.id).unwrap();
        service.approve(hotel.id).unwrap();

        let hotel = service.offline(hotel.id, owner.id).unwrap();
        assert_eq!(hotel.status, HotelStatus::Offline);

        // Second offline is a no-op success
        let hotel = service.offline(hotel.id, owner.id).unwrap();
        assert_eq!(hotel.status, HotelStatus::Offline);
    }

    #[test]
    fn test_publish_requires_owner_and_approved() {
        let (db, owner, stranger, _) = setup();
        let service = HotelService::new(&db);
        let hotel = draft_hotel(&service, owner);

        let err = service.publish(hotel.id, owner.id).unwrap_err();
        assert!(matches!(err, Error::InvalidTransition { .. }));

        service.submit_for_review(hotel.id, owner.id).unwrap();
        service.approve(hotel.id).unwrap();

        assert!(matches!(
            service.publish(hotel.id, stranger.id).unwrap_err(),
            Error::PermissionDenied(_)
        ));
        assert!(service.publish(hotel.id, owner.id).is_ok());
    }

    #[test]
    fn test_operations_on_missing_hotel() {
        let (db, owner, _, _) = setup();
        let service = HotelService::new(&db);

        assert!(matches!(
            service.get(42, Some(owner)).unwrap_err(),
            Error::NotFound(_)
        ));
        assert!(matches!(
            service.submit_for_review(42, owner.id).unwrap_err(),
            Error::NotFound(_)
        ));
        assert!(matches!(service.approve(42).unwrap_err(), Error::NotFound(_)));
    }
}
