use serde::{Deserialize, Serialize};

use crate::error::{FoodShareError, Result};

/// Mean Earth radius used for every distance in the marketplace.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A validated (latitude, longitude) pair in degrees.
///
/// Latitude is within [-90, 90] and longitude within [-180, 180]. Values are
/// checked once, when the pair is built, so everything downstream (the
/// proximity ranker in particular) can take them at face value.
///
/// Serialized as `{"lat": .., "lng": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LatLng", into = "LatLng")]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

/// Wire shape of [`Coordinates`]; validated on the way in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

impl Coordinates {
    /// São Paulo city center, the reference used when the viewer's position
    /// is unknown.
    pub const SAO_PAULO_CENTER: Coordinates = Coordinates {
        latitude: -23.5505,
        longitude: -46.6333,
    };

    /// Build a coordinate pair, rejecting out-of-range or non-finite values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);

        if !valid {
            return Err(FoodShareError::InvalidCoordinates {
                latitude,
                longitude,
            });
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other` in kilometers.
    pub fn distance_to(&self, other: &Coordinates) -> f64 {
        calculate_distance_km(*self, *other)
    }

    /// City-level copy of these coordinates (see [`coarsen_coords`]).
    pub fn coarsened(&self) -> Coordinates {
        let (latitude, longitude) = coarsen_coords(self.latitude, self.longitude);
        Coordinates {
            latitude,
            longitude,
        }
    }
}

impl TryFrom<LatLng> for Coordinates {
    type Error = FoodShareError;

    fn try_from(value: LatLng) -> Result<Self> {
        Coordinates::new(value.lat, value.lng)
    }
}

impl From<Coordinates> for LatLng {
    fn from(value: Coordinates) -> Self {
        LatLng {
            lat: value.latitude,
            lng: value.longitude,
        }
    }
}

/// Anything with a position on the map.
pub trait Locatable {
    fn coordinates(&self) -> Coordinates;
}

impl Locatable for Coordinates {
    fn coordinates(&self) -> Coordinates {
        *self
    }
}

impl<T: Locatable + ?Sized> Locatable for &T {
    fn coordinates(&self) -> Coordinates {
        (**self).coordinates()
    }
}

/// Calculate distance between two coordinates in kilometers
///
/// Uses the Haversine formula with a fixed Earth radius of 6371 km.
/// The result is never negative and is symmetric in its arguments.
pub fn calculate_distance_km(from: Coordinates, to: Coordinates) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let dlat = lat2 - lat1;
    let dlng = to.longitude.to_radians() - from.longitude.to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);

    // Rounding can push `a` a hair past 1 for antipodal points.
    let a = a.clamp(0.0, 1.0);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Coarsen coordinates to city-level precision for privacy
///
/// Rounds to 2 decimal places ≈ 1km precision (neighbourhood, not exact address).
pub fn coarsen_coords(lat: f64, lng: f64) -> (f64, f64) {
    ((lat * 100.0).round() / 100.0, (lng * 100.0).round() / 100.0)
}
