pub mod donation;
pub mod filter;

pub use donation::{Donation, DonationStatus, DonationUpdate, FoodCategory, NewDonation};
pub use filter::DonationFilter;
