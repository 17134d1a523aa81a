//! Hotel status workflow
//!
//! The review lifecycle for hotel listings. Owners draft and submit,
//! admins approve or reject, owners can take an approved listing offline.

use crate::error::{Error, Result};
use crate::models::HotelStatus;

/// Lifecycle actions on a hotel listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    /// Owner submits a draft for admin review
    Submit,
    /// Admin approves a pending listing
    Approve,
    /// Admin rejects a pending listing back to draft
    Reject,
    /// Owner confirms publication of an approved listing (observational,
    /// does not change stored status)
    Publish,
    /// Owner takes the listing offline
    Offline,
}

impl ReviewAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewAction::Submit => "submit",
            ReviewAction::Approve => "approve",
            ReviewAction::Reject => "reject",
            ReviewAction::Publish => "publish",
            ReviewAction::Offline => "offline",
        }
    }
}

impl std::fmt::Display for ReviewAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Compute the status an action produces, or reject it
///
/// Failed preconditions leave the caller's state untouched; the returned
/// error names the offending status and action.
pub fn transition(status: HotelStatus, action: ReviewAction) -> Result<HotelStatus> {
    match (status, action) {
        (HotelStatus::Draft, ReviewAction::Submit) => Ok(HotelStatus::Pending),
        (HotelStatus::Pending, ReviewAction::Approve) => Ok(HotelStatus::Approved),
        (HotelStatus::Pending, ReviewAction::Reject) => Ok(HotelStatus::Draft),
        // Publish is a no-op confirmation, only meaningful when approved
        (HotelStatus::Approved, ReviewAction::Publish) => Ok(HotelStatus::Approved),
        // Offline is always available to the owner, including re-offline
        (_, ReviewAction::Offline) => Ok(HotelStatus::Offline),
        (status, action) => Err(Error::InvalidTransition { status, action }),
    }
}

/// Status after an update to a hotel's fields
///
/// Edits to name, city, or address invalidate a previous review and send
/// the listing back to pending; other edits leave status alone.
pub fn status_after_update(status: HotelStatus, touches_basic_info: bool) -> HotelStatus {
    if touches_basic_info {
        HotelStatus::Pending
    } else {
        status
    }
}
