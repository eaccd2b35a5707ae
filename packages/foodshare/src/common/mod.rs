// Common types and utilities shared across the application

pub mod entity_ids;
pub mod geo;
pub mod id;

pub use entity_ids::{DonationId, MemberId};
pub use geo::{calculate_distance_km, coarsen_coords, Coordinates, Locatable};
pub use id::Id;
