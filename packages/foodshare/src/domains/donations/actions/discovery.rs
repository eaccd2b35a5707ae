//! Browse and map-view queries
//!
//! Neither needs a signed-in member.

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use crate::domains::donations::models::{Donation, DonationFilter, FoodCategory};
use crate::domains::donations::ranking::{locate, nearby, rank_by_distance, Ranked, ReferenceLocation};
use crate::error::{FoodShareError, Result};
use crate::kernel::{with_cancel, FoodShareKernel};

/// Listings for the map view, nearest first.
#[derive(Debug, Clone, Serialize)]
pub struct MapView {
    /// Origin of the distances, and whether it is the fallback center
    pub reference: ReferenceLocation,
    pub listings: Vec<Ranked<Donation>>,
}

/// Listings matching `filter`, in publication order.
#[instrument(skip(kernel, cancel))]
pub async fn browse_donations(
    filter: &DonationFilter,
    kernel: &FoodShareKernel,
    cancel: &CancellationToken,
) -> Result<Vec<Donation>> {
    let found = with_cancel(cancel, kernel.donations.search(filter)).await?;
    debug!(count = found.len(), "Browse results");
    Ok(found)
}

/// Available listings (optionally one category) ranked by distance from the
/// viewer, or from the fallback center when the viewer's position is unknown.
///
/// With `radius_km`, listings farther away than that are dropped. The radius
/// must be finite and not negative.
#[instrument(skip(kernel, cancel))]
pub async fn discover_nearby(
    category: Option<FoodCategory>,
    radius_km: Option<f64>,
    kernel: &FoodShareKernel,
    cancel: &CancellationToken,
) -> Result<MapView> {
    if let Some(radius_km) = radius_km {
        if !radius_km.is_finite() || radius_km < 0.0 {
            return Err(FoodShareError::Validation(format!(
                "radius must be a non-negative number of kilometers, got {}",
                radius_km
            )));
        }
    }

    let reference = with_cancel(cancel, async {
        Ok(locate(kernel.location.as_ref(), kernel.fallback_reference).await)
    })
    .await?;

    let filter = DonationFilter::map_view(category);
    let candidates = with_cancel(cancel, kernel.donations.search(&filter)).await?;

    let listings = match radius_km {
        Some(radius_km) => nearby(reference.coordinates, candidates, radius_km),
        None => rank_by_distance(reference.coordinates, candidates),
    };
    debug!(
        count = listings.len(),
        fallback = reference.is_fallback(),
        "Map view ranked"
    );

    Ok(MapView {
        reference,
        listings,
    })
}
