use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use typed_builder::TypedBuilder;

use crate::common::{Coordinates, DonationId, Locatable, MemberId};
use crate::domains::auth::models::User;
use crate::error::{FoodShareError, Result};

/// Kind of food on offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodCategory {
    Fruits,
    Vegetables,
    Grains,
    Dairy,
    Proteins,
    Bakery,
    Other,
}

impl FoodCategory {
    pub const ALL: [FoodCategory; 7] = [
        FoodCategory::Fruits,
        FoodCategory::Vegetables,
        FoodCategory::Grains,
        FoodCategory::Dairy,
        FoodCategory::Proteins,
        FoodCategory::Bakery,
        FoodCategory::Other,
    ];

    /// Human-readable label for listings and badges.
    pub fn label(&self) -> &'static str {
        match self {
            FoodCategory::Fruits => "Fruits",
            FoodCategory::Vegetables => "Vegetables",
            FoodCategory::Grains => "Grains",
            FoodCategory::Dairy => "Dairy",
            FoodCategory::Proteins => "Proteins",
            FoodCategory::Bakery => "Bakery",
            FoodCategory::Other => "Other",
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            FoodCategory::Fruits => "fruits",
            FoodCategory::Vegetables => "vegetables",
            FoodCategory::Grains => "grains",
            FoodCategory::Dairy => "dairy",
            FoodCategory::Proteins => "proteins",
            FoodCategory::Bakery => "bakery",
            FoodCategory::Other => "other",
        }
    }
}

impl fmt::Display for FoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FoodCategory {
    type Err = FoodShareError;

    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim().to_lowercase();
        FoodCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == needle)
            .ok_or_else(|| FoodShareError::Validation(format!("unknown food category: {}", s)))
    }
}

/// Where a listing is in its lifecycle.
///
/// Progression is forward only: available -> reserved -> collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DonationStatus {
    Available,
    Reserved,
    Collected,
}

impl DonationStatus {
    pub fn can_transition_to(&self, next: DonationStatus) -> bool {
        matches!(
            (self, next),
            (DonationStatus::Available, DonationStatus::Reserved)
                | (DonationStatus::Reserved, DonationStatus::Collected)
        )
    }

    pub fn is_available(&self) -> bool {
        *self == DonationStatus::Available
    }

    fn as_str(&self) -> &'static str {
        match self {
            DonationStatus::Available => "available",
            DonationStatus::Reserved => "reserved",
            DonationStatus::Collected => "collected",
        }
    }
}

impl fmt::Display for DonationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DonationStatus {
    type Err = FoodShareError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "available" => Ok(DonationStatus::Available),
            "reserved" => Ok(DonationStatus::Reserved),
            "collected" => Ok(DonationStatus::Collected),
            other => Err(FoodShareError::Validation(format!(
                "unknown donation status: {}",
                other
            ))),
        }
    }
}

/// A surplus-food listing published by a donor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    pub id: DonationId,
    pub title: String,
    pub category: FoodCategory,
    /// Free text, e.g. "5kg" or "20 units"
    pub quantity: String,
    pub expiry_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Free-text pickup address shown to recipients
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub coordinates: Coordinates,

    // Ownership
    pub donor_id: MemberId,
    pub donor_name: String,

    // Lifecycle
    pub status: DonationStatus,
    /// Name of the shelter holding the reservation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reserved_by: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl Donation {
    /// Publish a new listing on behalf of `donor`. Starts out available.
    pub fn publish(new: NewDonation, donor: &User, now: DateTime<Utc>) -> Result<Self> {
        new.validate()?;

        Ok(Self {
            id: DonationId::new(),
            title: new.title.trim().to_string(),
            category: new.category,
            quantity: new.quantity.trim().to_string(),
            expiry_date: new.expiry_date,
            image: new.image,
            location: new.location.trim().to_string(),
            description: new.description,
            coordinates: new.coordinates,
            donor_id: donor.id,
            donor_name: donor.name.clone(),
            status: DonationStatus::Available,
            reserved_by: None,
            created_at: now,
        })
    }

    /// Claim an available listing for `reserved_by`.
    pub fn reserve(&mut self, reserved_by: &str) -> Result<()> {
        let reserved_by = reserved_by.trim();
        if reserved_by.is_empty() {
            return Err(FoodShareError::Validation(
                "reserving party name is required".to_string(),
            ));
        }

        self.transition(DonationStatus::Reserved)?;
        self.reserved_by = Some(reserved_by.to_string());
        Ok(())
    }

    /// Record that the reserving party picked the food up.
    pub fn mark_collected(&mut self) -> Result<()> {
        self.transition(DonationStatus::Collected)
    }

    fn transition(&mut self, next: DonationStatus) -> Result<()> {
        if !self.status.can_transition_to(next) {
            return Err(FoodShareError::InvalidTransition {
                id: self.id,
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }

    /// Apply donor edits. Lifecycle fields are never touched here.
    pub fn apply_update(&mut self, update: DonationUpdate) -> Result<()> {
        update.validate()?;

        if let Some(title) = update.title {
            self.title = title.trim().to_string();
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity.trim().to_string();
        }
        if let Some(expiry_date) = update.expiry_date {
            self.expiry_date = expiry_date;
        }
        if let Some(location) = update.location {
            self.location = location.trim().to_string();
        }
        if let Some(coordinates) = update.coordinates {
            self.coordinates = coordinates;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        Ok(())
    }

    /// Past its expiry date (the expiry day itself still counts as good).
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expiry_date < today
    }

    pub fn is_owned_by(&self, member_id: MemberId) -> bool {
        self.donor_id == member_id
    }

    pub fn is_reserved_by(&self, name: &str) -> bool {
        self.reserved_by.as_deref() == Some(name)
    }
}

impl Locatable for Donation {
    fn coordinates(&self) -> Coordinates {
        self.coordinates
    }
}

/// Input for publishing a listing (the "new donation" form).
#[derive(Debug, Clone, TypedBuilder)]
pub struct NewDonation {
    #[builder(setter(into))]
    pub title: String,
    pub category: FoodCategory,
    #[builder(setter(into))]
    pub quantity: String,
    pub expiry_date: NaiveDate,
    #[builder(setter(into))]
    pub location: String,
    pub coordinates: Coordinates,
    #[builder(default, setter(strip_option, into))]
    pub description: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub image: Option<String>,
}

impl NewDonation {
    pub fn validate(&self) -> Result<()> {
        require_text("title", &self.title)?;
        require_text("quantity", &self.quantity)?;
        require_text("location", &self.location)
    }
}

/// Partial edit of a listing. `None` leaves the field as it is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DonationUpdate {
    pub title: Option<String>,
    pub category: Option<FoodCategory>,
    pub quantity: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub description: Option<String>,
}

impl DonationUpdate {
    pub fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            require_text("title", title)?;
        }
        if let Some(quantity) = &self.quantity {
            require_text("quantity", quantity)?;
        }
        if let Some(location) = &self.location {
            require_text("location", location)?;
        }
        Ok(())
    }
}

fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(FoodShareError::Validation(format!("{} is required", field)));
    }
    Ok(())
}
