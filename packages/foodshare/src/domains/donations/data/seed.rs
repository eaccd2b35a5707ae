//! Seed listings for the in-memory repository, the CLI, and tests.
//!
//! Six donors around central São Paulo. Donor ids are 1..=6 and listing ids
//! 1..=6 (as `from_u128`), so the mock signed-in donor (member 1) owns
//! listing 1.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::common::{Coordinates, DonationId, MemberId};
use crate::domains::donations::models::{Donation, DonationStatus, FoodCategory};

struct SeedRow {
    id: u128,
    title: &'static str,
    category: FoodCategory,
    quantity: &'static str,
    expiry: (i32, u32, u32),
    image: &'static str,
    location: &'static str,
    lat_lng: (f64, f64),
    donor_name: &'static str,
    status: DonationStatus,
    reserved_by: Option<&'static str>,
    created_at: (i32, u32, u32, u32, u32),
}

const SEED: [SeedRow; 6] = [
    SeedRow {
        id: 1,
        title: "Frutas Frescas Variadas",
        category: FoodCategory::Fruits,
        quantity: "5kg",
        expiry: (2025, 10, 20),
        image: "/fresh-fruits-basket.png",
        location: "Padaria Central, São Paulo - SP",
        lat_lng: (-23.5505, -46.6333),
        donor_name: "Padaria Central",
        status: DonationStatus::Available,
        reserved_by: None,
        created_at: (2025, 10, 16, 10, 0),
    },
    SeedRow {
        id: 2,
        title: "Pães do Dia",
        category: FoodCategory::Bakery,
        quantity: "20 unidades",
        expiry: (2025, 10, 17),
        image: "/fresh-bread-loaves.jpg",
        location: "Supermercado Bom Preço, São Paulo - SP",
        lat_lng: (-23.5489, -46.6388),
        donor_name: "Supermercado Bom Preço",
        status: DonationStatus::Available,
        reserved_by: None,
        created_at: (2025, 10, 16, 8, 30),
    },
    SeedRow {
        id: 3,
        title: "Vegetais Orgânicos",
        category: FoodCategory::Vegetables,
        quantity: "8kg",
        expiry: (2025, 10, 19),
        image: "/organic-vegetables-display.png",
        location: "Restaurante Verde Vida, São Paulo - SP",
        lat_lng: (-23.5558, -46.6396),
        donor_name: "Restaurante Verde Vida",
        status: DonationStatus::Reserved,
        reserved_by: Some("Abrigo Esperança"),
        created_at: (2025, 10, 15, 14, 20),
    },
    SeedRow {
        id: 4,
        title: "Arroz e Feijão",
        category: FoodCategory::Grains,
        quantity: "10kg",
        expiry: (2026, 3, 15),
        image: "/rice-and-beans.jpg",
        location: "Mercado da Família, São Paulo - SP",
        lat_lng: (-23.5629, -46.6544),
        donor_name: "Mercado da Família",
        status: DonationStatus::Available,
        reserved_by: None,
        created_at: (2025, 10, 16, 9, 15),
    },
    SeedRow {
        id: 5,
        title: "Leite e Iogurtes",
        category: FoodCategory::Dairy,
        quantity: "15 litros",
        expiry: (2025, 10, 22),
        image: "/milk-and-yogurt.jpg",
        location: "Laticínios São João, São Paulo - SP",
        lat_lng: (-23.5475, -46.6361),
        donor_name: "Laticínios São João",
        status: DonationStatus::Available,
        reserved_by: None,
        created_at: (2025, 10, 16, 11, 0),
    },
    SeedRow {
        id: 6,
        title: "Frango Congelado",
        category: FoodCategory::Proteins,
        quantity: "12kg",
        expiry: (2025, 11, 30),
        image: "/frozen-chicken.png",
        location: "Açougue Premium, São Paulo - SP",
        lat_lng: (-23.552, -46.642),
        donor_name: "Açougue Premium",
        status: DonationStatus::Collected,
        reserved_by: Some("ONG Alimentar"),
        created_at: (2025, 10, 14, 16, 45),
    },
];

/// The seed listings, in publication-page order.
pub fn mock_donations() -> Vec<Donation> {
    SEED.iter().map(SeedRow::to_donation).collect()
}

impl SeedRow {
    fn to_donation(&self) -> Donation {
        let (year, month, day) = self.expiry;
        let (c_year, c_month, c_day, c_hour, c_minute) = self.created_at;
        let (lat, lng) = self.lat_lng;

        Donation {
            id: DonationId::from_u128(self.id),
            title: self.title.to_string(),
            category: self.category,
            quantity: self.quantity.to_string(),
            expiry_date: NaiveDate::from_ymd_opt(year, month, day)
                .expect("seed expiry dates are valid calendar dates"),
            image: Some(self.image.to_string()),
            location: self.location.to_string(),
            description: None,
            coordinates: Coordinates::new(lat, lng).expect("seed coordinates are in range"),
            donor_id: MemberId::from_u128(self.id),
            donor_name: self.donor_name.to_string(),
            status: self.status,
            reserved_by: self.reserved_by.map(str::to_string),
            created_at: utc(c_year, c_month, c_day, c_hour, c_minute),
        }
    }
}

fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .expect("seed timestamps are unambiguous in UTC")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_ids_are_unique() {
        let donations = mock_donations();
        let ids: HashSet<_> = donations.iter().map(|d| d.id).collect();
        assert_eq!(ids.len(), donations.len());
    }

    #[test]
    fn test_reserved_seeds_name_their_claimant() {
        for donation in mock_donations() {
            let claimed = donation.status != DonationStatus::Available;
            assert_eq!(claimed, donation.reserved_by.is_some(), "{}", donation.title);
        }
    }
}
