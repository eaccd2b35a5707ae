//! Typed errors for the marketplace core.
//!
//! Uses `thiserror` for library errors; the binary wraps these in `anyhow`.

use thiserror::Error;

use crate::common::{DonationId, MemberId};
use crate::domains::donations::models::DonationStatus;

/// Errors that can occur in marketplace operations.
#[derive(Debug, Error)]
pub enum FoodShareError {
    /// No donation with this id exists
    #[error("donation not found: {id}")]
    DonationNotFound { id: DonationId },

    /// Lifecycle only moves forward: available -> reserved -> collected
    #[error("donation {id} cannot move from {from} to {to}")]
    InvalidTransition {
        id: DonationId,
        from: DonationStatus,
        to: DonationStatus,
    },

    /// Latitude outside [-90, 90], longitude outside [-180, 180], or not finite
    #[error("invalid coordinates: ({latitude}, {longitude})")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    #[error("authentication required")]
    AuthenticationRequired,

    #[error("permission denied for member {member_id}: {reason}")]
    PermissionDenied { member_id: MemberId, reason: String },

    /// Input rejected before reaching a repository
    #[error("validation failed: {0}")]
    Validation(String),

    /// Session store I/O failed
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The caller abandoned the operation (e.g. navigated away)
    #[error("operation cancelled")]
    Cancelled,
}

impl FoodShareError {
    pub(crate) fn permission_denied(member_id: MemberId, reason: impl Into<String>) -> Self {
        Self::PermissionDenied {
            member_id,
            reason: reason.into(),
        }
    }
}

/// Result type alias for marketplace operations.
pub type Result<T> = std::result::Result<T, FoodShareError>;
