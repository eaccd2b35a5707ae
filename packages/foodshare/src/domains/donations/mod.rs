//! Donation listings: the model, discovery (filters + proximity ranking),
//! dashboards, and the operations that move a listing through its lifecycle.

pub mod actions;
pub mod dashboard;
pub mod data;
pub mod models;
pub mod ranking;

pub use dashboard::{Dashboard, DashboardSummary, Perspective};
pub use models::{
    Donation, DonationFilter, DonationStatus, DonationUpdate, FoodCategory, NewDonation,
};
pub use ranking::{
    locate, nearby, rank_by_distance, resolve_reference, resolve_reference_with, Ranked,
    ReferenceLocation, ReferenceSource,
};
