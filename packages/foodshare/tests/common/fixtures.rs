//! Test fixtures for members and listings.

#![allow(dead_code)]

use chrono::{NaiveDate, Utc};
use foodshare_core::common::{Coordinates, DonationId, MemberId};
use foodshare_core::domains::auth::{User, UserRole};
use foodshare_core::domains::donations::{Donation, FoodCategory, NewDonation};

/// Listing 1 in the seed data, owned by member 1 and still available
pub const AVAILABLE_SEED: DonationId = DonationId::from_u128(1);
/// Listing 3, reserved by "Abrigo Esperança"
pub const RESERVED_SEED: DonationId = DonationId::from_u128(3);
/// Listing 6, already collected
pub const COLLECTED_SEED: DonationId = DonationId::from_u128(6);

pub const SHELTER_NAME: &str = "Abrigo Esperança";

pub fn coords(lat: f64, lng: f64) -> Coordinates {
    Coordinates::new(lat, lng).expect("test coordinates are in range")
}

pub fn shelter() -> User {
    User::new(
        MemberId::from_u128(500),
        SHELTER_NAME,
        "contato@abrigo.org",
        UserRole::Shelter,
    )
}

pub fn new_listing(title: &str) -> NewDonation {
    NewDonation::builder()
        .title(title)
        .category(FoodCategory::Bakery)
        .quantity("12 unidades")
        .expiry_date(NaiveDate::from_ymd_opt(2025, 10, 25).expect("valid date"))
        .location("Rua Augusta, São Paulo - SP")
        .coordinates(coords(-23.5540, -46.6560))
        .build()
}

/// An available listing at `at`, published by a donor outside the seed data.
pub fn published_at(title: &str, at: Coordinates) -> Donation {
    let donor = User::new(
        MemberId::from_u128(900),
        "Feira Livre",
        "feira@example.org",
        UserRole::Donor,
    );
    let new = NewDonation::builder()
        .title(title)
        .category(FoodCategory::Vegetables)
        .quantity("3 caixas")
        .expiry_date(NaiveDate::from_ymd_opt(2025, 10, 25).expect("valid date"))
        .location("Feira livre")
        .coordinates(at)
        .build();
    Donation::publish(new, &donor, Utc::now()).expect("fixture listing is valid")
}
