use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::common::Coordinates;
use crate::kernel::SimulatedLatency;

/// Directory used for the session record when none is configured.
pub const DEFAULT_SESSION_DIR: &str = ".foodshare";

/// Marketplace configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Where the session record lives. `None` keeps it in memory only.
    pub session_dir: Option<PathBuf>,
    pub simulated_latency: SimulatedLatency,
    /// Ranking origin when the viewer's position is unknown
    pub fallback_reference: Coordinates,
    /// Fixed viewer position standing in for device geolocation
    pub device_location: Option<Coordinates>,
    /// Map view cut-off; `None` ranks every available listing
    pub nearby_radius_km: Option<f64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            session_dir: Some(PathBuf::from(DEFAULT_SESSION_DIR)),
            simulated_latency: SimulatedLatency::prototype(),
            fallback_reference: Coordinates::SAO_PAULO_CENTER,
            device_location: None,
            nearby_radius_km: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup (the process environment in
    /// production, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let session_dir = lookup("FOODSHARE_SESSION_DIR")
            .map(PathBuf::from)
            .or(defaults.session_dir);

        // Unset keeps the prototype delays; 0 turns them off
        let simulated_latency = match parse::<u64>(&lookup, "FOODSHARE_SIMULATED_LATENCY_MS")? {
            Some(0) => SimulatedLatency::none(),
            Some(ms) => SimulatedLatency::uniform(Duration::from_millis(ms)),
            None => defaults.simulated_latency,
        };

        let fallback_reference = coordinates(&lookup, "FOODSHARE_DEFAULT_LAT", "FOODSHARE_DEFAULT_LNG")?
            .unwrap_or(defaults.fallback_reference);

        let device_location = coordinates(&lookup, "FOODSHARE_DEVICE_LAT", "FOODSHARE_DEVICE_LNG")?;

        let nearby_radius_km = lookup("FOODSHARE_NEARBY_RADIUS_KM")
            .map(|raw| {
                parse_radius_km(&raw)
                    .context("FOODSHARE_NEARBY_RADIUS_KM must be a non-negative number")
            })
            .transpose()?;

        Ok(Self {
            session_dir,
            simulated_latency,
            fallback_reference,
            device_location,
            nearby_radius_km,
        })
    }
}

/// Parse a map-view radius in kilometers: finite and not negative.
///
/// Shared by the environment and the `--radius-km` flag.
pub fn parse_radius_km(raw: &str) -> Result<f64> {
    let raw = raw.trim();
    let radius: f64 = raw
        .parse()
        .with_context(|| format!("radius {:?} is not a number", raw))?;
    if !radius.is_finite() || radius < 0.0 {
        bail!("radius must be a non-negative number of kilometers, got {}", raw);
    }
    Ok(radius)
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("{} must be a valid number", key))
        })
        .transpose()
}

/// Both halves of a coordinate pair, or neither.
fn coordinates(
    lookup: &impl Fn(&str) -> Option<String>,
    lat_key: &str,
    lng_key: &str,
) -> Result<Option<Coordinates>> {
    match (parse::<f64>(lookup, lat_key)?, parse::<f64>(lookup, lng_key)?) {
        (Some(lat), Some(lng)) => Coordinates::new(lat, lng)
            .map(Some)
            .with_context(|| format!("{}/{} out of range", lat_key, lng_key)),
        (None, None) => Ok(None),
        _ => bail!("{} and {} must be set together", lat_key, lng_key),
    }
}
