//! Typed ID definitions for marketplace entities.

pub use super::id::Id;

/// Marker type for donation listings.
pub struct Donation;

/// Marker type for members (donors, shelters, admins).
pub struct Member;

/// Typed ID for donation listings.
pub type DonationId = Id<Donation>;

/// Typed ID for members.
pub type MemberId = Id<Member>;
