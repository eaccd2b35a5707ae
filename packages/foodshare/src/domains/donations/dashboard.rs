//! Role-based dashboard: which listings a signed-in member sees, split into
//! what still needs attention and what is done.

use serde::Serialize;

use super::models::{Donation, DonationStatus};
use crate::domains::auth::models::User;

/// Whose side of a donation the viewer is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Perspective {
    /// Sees their own listings
    Donor,
    /// Shelters and admins: sees what they reserved plus everything still open
    Recipient,
}

impl Perspective {
    pub fn of(user: &User) -> Self {
        if user.is_donor() {
            Perspective::Donor
        } else {
            Perspective::Recipient
        }
    }
}

/// Counters shown on top of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DashboardSummary {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

/// A member's slice of the listings, in input order.
#[derive(Debug, Clone)]
pub struct Dashboard<'a> {
    perspective: Perspective,
    member_name: &'a str,
    listings: Vec<&'a Donation>,
}

impl<'a> Dashboard<'a> {
    pub fn for_user(user: &'a User, donations: &'a [Donation]) -> Self {
        let perspective = Perspective::of(user);
        let listings = donations
            .iter()
            .filter(|d| match perspective {
                Perspective::Donor => d.is_owned_by(user.id),
                Perspective::Recipient => d.is_reserved_by(&user.name) || d.status.is_available(),
            })
            .collect();

        Self {
            perspective,
            member_name: &user.name,
            listings,
        }
    }

    pub fn perspective(&self) -> Perspective {
        self.perspective
    }

    /// Every listing visible to the member
    pub fn listings(&self) -> &[&'a Donation] {
        &self.listings
    }

    /// Donor: not yet collected. Recipient: still open for reservation.
    pub fn active(&self) -> Vec<&'a Donation> {
        self.listings
            .iter()
            .copied()
            .filter(|d| match self.perspective {
                Perspective::Donor => d.status != DonationStatus::Collected,
                Perspective::Recipient => d.status.is_available(),
            })
            .collect()
    }

    /// Donor: collected. Recipient: reserved under the member's name.
    pub fn history(&self) -> Vec<&'a Donation> {
        self.listings
            .iter()
            .copied()
            .filter(|d| match self.perspective {
                Perspective::Donor => d.status == DonationStatus::Collected,
                Perspective::Recipient => d.is_reserved_by(self.member_name),
            })
            .collect()
    }

    pub fn summary(&self) -> DashboardSummary {
        DashboardSummary {
            total: self.listings.len(),
            active: self.active().len(),
            completed: self.history().len(),
        }
    }
}
