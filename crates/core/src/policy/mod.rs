//! Authorization policy for hotel and room operations
//!
//! Pure predicates over (actor, resource owner, status). Every mutation
//! site in the catalog evaluates these before touching storage.

use crate::models::{Actor, HotelStatus, Role};

/// Access rules shared by hotel and room resources
pub struct AccessPolicy;

impl AccessPolicy {
    /// Can the actor mutate or delete a resource owned by `owner_id`?
    ///
    /// Admins can always; everyone else only their own resources. Rooms
    /// resolve `owner_id` through the parent hotel.
    pub fn can_mutate(actor: Actor, owner_id: i64) -> bool {
        match actor.role {
            Role::Admin => true,
            Role::User => actor.id == owner_id,
        }
    }

    /// Can the viewer see a hotel in the given status?
    ///
    /// Approved hotels are public. Otherwise only the owner and admins
    /// may see the listing. `None` is an unauthenticated viewer.
    pub fn can_view(viewer: Option<Actor>, status: HotelStatus, owner_id: i64) -> bool {
        if status == HotelStatus::Approved {
            return true;
        }
        match viewer {
            Some(actor) => match actor.role {
                Role::Admin => true,
                Role::User => actor.id == owner_id,
            },
            None => false,
        }
    }

    /// Stock adjustment is a server-internal operation, admin only
    pub fn can_adjust_stock(actor: Actor) -> bool {
        actor.role.is_admin()
    }
}
