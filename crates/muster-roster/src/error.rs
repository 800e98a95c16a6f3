//! Roster-specific error types.

use muster_permissions::DenialReason;
use muster_types::RankError;
use thiserror::Error;

/// Errors that can occur during roster operations.
///
/// Everything except `Io` and `Serialization` is a validation outcome meant
/// to be shown to the user as-is.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error(transparent)]
    InvalidRank(#[from] RankError),

    #[error("Target not found: {identifier}")]
    TargetNotFound { identifier: String },

    #[error("Unknown actor: {username}")]
    UnknownActor { username: String },

    #[error("{name} already exists.")]
    DuplicateName { name: String },

    #[error("{0}")]
    PermissionDenied(#[from] DenialReason),

    #[error("{field} is required.")]
    EmptyInput { field: &'static str },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RosterError {
    /// True for user-facing validation outcomes, false for storage failures.
    pub fn is_validation(&self) -> bool {
        !matches!(self, RosterError::Io(_) | RosterError::Serialization(_))
    }
}
