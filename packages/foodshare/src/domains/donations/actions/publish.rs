//! Publishing and editing listings

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use super::authorization::{check_can_manage, check_can_publish};
use crate::common::DonationId;
use crate::domains::auth::Session;
use crate::domains::donations::models::{Donation, DonationUpdate, NewDonation};
use crate::error::Result;
use crate::kernel::{with_cancel, FoodShareKernel};

/// Publish a listing owned by the signed-in member.
#[instrument(skip(new, session, kernel, cancel), fields(title = %new.title))]
pub async fn create_donation(
    new: NewDonation,
    session: &Session,
    kernel: &FoodShareKernel,
    cancel: &CancellationToken,
) -> Result<Donation> {
    let user = session.require_user()?;
    check_can_publish(user)?;

    let donation = Donation::publish(new, user, Utc::now())?;
    let created = with_cancel(cancel, kernel.donations.create(donation)).await?;

    info!(donation_id = %created.id, donor_id = %user.id, "Donation published");
    Ok(created)
}

/// Edit the descriptive fields of a listing. Donor or admin only.
#[instrument(skip(update, session, kernel, cancel))]
pub async fn update_donation(
    id: DonationId,
    update: DonationUpdate,
    session: &Session,
    kernel: &FoodShareKernel,
    cancel: &CancellationToken,
) -> Result<Donation> {
    let user = session.require_user()?;
    update.validate()?;

    let donation = with_cancel(cancel, kernel.donations.get(id)).await?;
    check_can_manage(user, &donation, "update")?;

    with_cancel(cancel, kernel.donations.update(id, update)).await
}
