//! Authorization checks for donation operations
//!
//! Roles decide who may publish; ownership decides who may edit or close a
//! listing.

use tracing::warn;

use crate::domains::auth::models::{User, UserRole};
use crate::domains::donations::models::Donation;
use crate::error::{FoodShareError, Result};

/// Donors and admins publish listings; shelters only receive.
pub fn check_can_publish(user: &User) -> Result<()> {
    match user.role {
        UserRole::Donor | UserRole::Admin => Ok(()),
        UserRole::Shelter => Err(deny(user, "publish", "shelters cannot publish donations")),
    }
}

/// Edits and pickup confirmation belong to the listing's donor (or an admin).
pub fn check_can_manage(user: &User, donation: &Donation, action_name: &str) -> Result<()> {
    if user.is_admin() || donation.is_owned_by(user.id) {
        return Ok(());
    }
    Err(deny(user, action_name, "only the donor can change this listing"))
}

/// Anyone signed in may reserve, except the listing's own donor.
pub fn check_can_reserve(user: &User, donation: &Donation) -> Result<()> {
    if donation.is_owned_by(user.id) {
        return Err(deny(user, "reserve", "donors cannot reserve their own listing"));
    }
    Ok(())
}

fn deny(user: &User, action_name: &str, reason: &str) -> FoodShareError {
    warn!(
        member_id = %user.id,
        role = %user.role,
        action = %action_name,
        reason = %reason,
        "Authorization denied for donation operation"
    );
    FoodShareError::permission_denied(user.id, reason)
}
