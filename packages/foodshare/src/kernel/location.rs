//! Location providers for environments without device geolocation.

use async_trait::async_trait;
use std::sync::RwLock;

use super::traits::BaseLocationProvider;
use crate::common::Coordinates;
use crate::error::Result;

/// Reports a position set by the caller (CLI flags, config, tests).
///
/// The position can be replaced at any time, which is how an explicit
/// "refresh my location" is modelled.
pub struct FixedLocationProvider {
    position: RwLock<Option<Coordinates>>,
}

impl FixedLocationProvider {
    pub fn new(position: Coordinates) -> Self {
        Self {
            position: RwLock::new(Some(position)),
        }
    }

    pub fn set(&self, position: Option<Coordinates>) {
        *self.position.write().unwrap() = position;
    }
}

#[async_trait]
impl BaseLocationProvider for FixedLocationProvider {
    async fn current_location(&self) -> Result<Option<Coordinates>> {
        Ok(*self.position.read().unwrap())
    }
}

/// No positioning source at all.
pub struct UnavailableLocationProvider;

#[async_trait]
impl BaseLocationProvider for UnavailableLocationProvider {
    async fn current_location(&self) -> Result<Option<Coordinates>> {
        Ok(None)
    }
}
