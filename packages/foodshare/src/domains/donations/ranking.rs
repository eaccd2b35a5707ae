//! Proximity ranking for the map view.
//!
//! Given where the viewer is and a set of listings, attach the great-circle
//! distance to each listing and order them nearest first. Ranking is pure and
//! synchronous; deciding *which* listings to rank (filters) and *where* the
//! viewer is (location providers) happens in the caller.

use serde::Serialize;
use tracing::{debug, warn};

use crate::common::{calculate_distance_km, Coordinates, Locatable};
use crate::kernel::BaseLocationProvider;

/// An item together with its distance from the reference point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranked<T> {
    pub item: T,
    /// Great-circle distance from the reference, in kilometers. Never negative.
    pub distance_km: f64,
}

impl<T> Ranked<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Ranked<U> {
        Ranked {
            item: f(self.item),
            distance_km: self.distance_km,
        }
    }
}

/// Where the reference coordinate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceSource {
    /// Reported by the viewer's positioning source
    Device,
    /// Positioning was unavailable or denied; a fixed city center stands in
    Fallback,
}

/// The origin used for ranking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceLocation {
    pub coordinates: Coordinates,
    pub source: ReferenceSource,
}

impl ReferenceLocation {
    pub fn device(coordinates: Coordinates) -> Self {
        Self {
            coordinates,
            source: ReferenceSource::Device,
        }
    }

    pub fn fallback(coordinates: Coordinates) -> Self {
        Self {
            coordinates,
            source: ReferenceSource::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == ReferenceSource::Fallback
    }
}

/// Pick the ranking origin, falling back to São Paulo city center when the
/// viewer's position is unknown.
pub fn resolve_reference(observed: Option<Coordinates>) -> ReferenceLocation {
    resolve_reference_with(observed, Coordinates::SAO_PAULO_CENTER)
}

/// Like [`resolve_reference`] with a caller-chosen fallback.
pub fn resolve_reference_with(
    observed: Option<Coordinates>,
    fallback: Coordinates,
) -> ReferenceLocation {
    match observed {
        Some(coordinates) => ReferenceLocation::device(coordinates),
        None => ReferenceLocation::fallback(fallback),
    }
}

/// Ask a location provider where the viewer is.
///
/// Provider errors (denied permission, no fix) are treated like "unknown":
/// logged, then the fallback is used. Never fails.
pub async fn locate(provider: &dyn BaseLocationProvider, fallback: Coordinates) -> ReferenceLocation {
    let observed = match provider.current_location().await {
        Ok(observed) => observed,
        Err(e) => {
            warn!(error = %e, "Location lookup failed, using fallback reference");
            None
        }
    };

    let reference = resolve_reference_with(observed, fallback);
    if reference.is_fallback() {
        debug!(
            lat = reference.coordinates.latitude(),
            lng = reference.coordinates.longitude(),
            "Viewer location unknown, ranking from fallback center"
        );
    }
    reference
}

/// Rank items by distance from `reference`, nearest first.
///
/// Every input item appears exactly once in the output. Items at equal
/// distance keep their input order.
pub fn rank_by_distance<T, I>(reference: Coordinates, items: I) -> Vec<Ranked<T>>
where
    T: Locatable,
    I: IntoIterator<Item = T>,
{
    let mut ranked: Vec<Ranked<T>> = items
        .into_iter()
        .map(|item| {
            let distance_km = calculate_distance_km(reference, item.coordinates());
            Ranked { item, distance_km }
        })
        .collect();

    // `sort_by` is stable; distances are finite for validated coordinates.
    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    ranked
}

/// Rank, then keep only items within `radius_km` of the reference.
pub fn nearby<T, I>(reference: Coordinates, items: I, radius_km: f64) -> Vec<Ranked<T>>
where
    T: Locatable,
    I: IntoIterator<Item = T>,
{
    let mut ranked = rank_by_distance(reference, items);
    // Sorted ascending, so everything past the first out-of-range item is too.
    let within = ranked.partition_point(|r| r.distance_km <= radius_km);
    ranked.truncate(within);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::donations::data::mock_donations;
    use crate::domains::donations::models::DonationFilter;

    fn coords(lat: f64, lng: f64) -> Coordinates {
        Coordinates::new(lat, lng).unwrap()
    }

    fn is_sorted(ranked: &[Ranked<impl Sized>]) -> bool {
        ranked.windows(2).all(|w| w[0].distance_km <= w[1].distance_km)
    }

    #[test]
    fn test_rank_keeps_every_item() {
        let donations = mock_donations();
        let ranked = rank_by_distance(Coordinates::SAO_PAULO_CENTER, &donations);

        assert_eq!(ranked.len(), donations.len());
        for donation in &donations {
            assert_eq!(ranked.iter().filter(|r| r.item.id == donation.id).count(), 1);
        }
    }

    #[test]
    fn test_rank_sorted_nearest_first() {
        let donations = mock_donations();
        let ranked = rank_by_distance(Coordinates::SAO_PAULO_CENTER, &donations);

        assert!(is_sorted(&ranked));
        // Listing 1 sits exactly on the city center
        assert_eq!(ranked[0].item.title, "Frutas Frescas Variadas");
        assert!(ranked[0].distance_km.abs() < 1e-6);
    }

    #[test]
    fn test_rank_ties_keep_input_order() {
        let reference = coords(0.0, 0.0);
        // Same distance in four directions, then one nearer point
        let points = vec![
            ("north", coords(1.0, 0.0)),
            ("south", coords(-1.0, 0.0)),
            ("near", coords(0.1, 0.0)),
            ("north again", coords(1.0, 0.0)),
        ];

        struct Named(&'static str, Coordinates);
        impl Locatable for Named {
            fn coordinates(&self) -> Coordinates {
                self.1
            }
        }

        let ranked = rank_by_distance(
            reference,
            points.into_iter().map(|(name, c)| Named(name, c)),
        );
        let order: Vec<&str> = ranked.iter().map(|r| r.item.0).collect();
        assert_eq!(order, vec!["near", "north", "south", "north again"]);
    }

    #[test]
    fn test_rank_is_idempotent() {
        let donations = mock_donations();
        let reference = coords(-23.56, -46.65);

        let first: Vec<_> = rank_by_distance(reference, &donations)
            .into_iter()
            .map(|r| r.item.clone())
            .collect();
        let second: Vec<_> = rank_by_distance(reference, &first)
            .into_iter()
            .map(|r| r.item.id)
            .collect();

        let first_ids: Vec<_> = first.iter().map(|d| d.id).collect();
        assert_eq!(first_ids, second);
    }

    #[test]
    fn test_rank_empty() {
        let ranked = rank_by_distance(Coordinates::SAO_PAULO_CENTER, Vec::<Coordinates>::new());
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_rank_filtered_map_view() {
        let donations = mock_donations();
        let visible = DonationFilter::map_view(None).apply(&donations);
        let ranked = rank_by_distance(Coordinates::SAO_PAULO_CENTER, visible);

        assert_eq!(ranked.len(), 4);
        assert!(ranked.iter().all(|r| r.item.status.is_available()));
        assert!(is_sorted(&ranked));
    }

    #[test]
    fn test_nearby_applies_radius() {
        let donations = mock_donations();
        let ranked = nearby(Coordinates::SAO_PAULO_CENTER, &donations, 1.0);

        assert!(!ranked.is_empty());
        assert!(ranked.len() < donations.len());
        assert!(ranked.iter().all(|r| r.distance_km <= 1.0));
    }

    #[test]
    fn test_resolve_reference_fallback() {
        let reference = resolve_reference(None);
        assert!(reference.is_fallback());
        assert_eq!(reference.coordinates, Coordinates::SAO_PAULO_CENTER);

        let here = coords(-22.9068, -43.1729);
        let reference = resolve_reference(Some(here));
        assert_eq!(reference.source, ReferenceSource::Device);
        assert_eq!(reference.coordinates, here);
    }

    #[test]
    fn test_ranked_map_keeps_distance() {
        let ranked = Ranked {
            item: 3,
            distance_km: 1.5,
        };
        let mapped = ranked.map(|n| n * 2);
        assert_eq!(mapped.item, 6);
        assert_eq!(mapped.distance_km, 1.5);
    }
}
