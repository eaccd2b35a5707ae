//! Reserve and collect actions
//!
//! Both check permissions against a fresh copy of the listing, then let the
//! repository apply the transition (which enforces the forward-only order).

use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use super::authorization::{check_can_manage, check_can_reserve};
use crate::common::DonationId;
use crate::domains::auth::Session;
use crate::domains::donations::models::Donation;
use crate::error::Result;
use crate::kernel::{with_cancel, FoodShareKernel};

/// Reserve an available listing under the signed-in member's name.
#[instrument(skip(session, kernel, cancel))]
pub async fn reserve_donation(
    id: DonationId,
    session: &Session,
    kernel: &FoodShareKernel,
    cancel: &CancellationToken,
) -> Result<Donation> {
    let user = session.require_user()?;

    let donation = with_cancel(cancel, kernel.donations.get(id)).await?;
    check_can_reserve(user, &donation)?;

    let reserved = with_cancel(cancel, kernel.donations.reserve(id, &user.name)).await?;
    info!(donation_id = %id, reserved_by = %user.name, "Donation reserved");
    Ok(reserved)
}

/// Confirm pickup of a reserved listing. Donor or admin only.
#[instrument(skip(session, kernel, cancel))]
pub async fn collect_donation(
    id: DonationId,
    session: &Session,
    kernel: &FoodShareKernel,
    cancel: &CancellationToken,
) -> Result<Donation> {
    let user = session.require_user()?;

    let donation = with_cancel(cancel, kernel.donations.get(id)).await?;
    check_can_manage(user, &donation, "collect")?;

    let collected = with_cancel(cancel, kernel.donations.mark_collected(id)).await?;
    info!(donation_id = %id, "Donation collected");
    Ok(collected)
}
