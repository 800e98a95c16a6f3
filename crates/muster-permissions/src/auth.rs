//! Credential verification, kept separate from role resolution.

use muster_types::{ConfigError, Member, Roster};
use thiserror::Error;

/// Errors from credential checks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Username not found: {username}")]
    UnknownUser { username: String },

    #[error("Incorrect password.")]
    BadCredential,
}

/// Trait for turning credentials into an actor identity.
///
/// Implementations only establish *who* the actor is; the role is resolved
/// separately on every check.
pub trait CredentialVerifier: Send + Sync {
    fn verify<'a>(
        &self,
        roster: &'a Roster,
        username: &str,
        secret: &str,
    ) -> Result<&'a Member, AuthError>;
}

/// Shared-secret stand-in: any roster member presenting one of the accepted
/// secrets is authenticated.
#[derive(Debug, Clone)]
pub struct SharedSecretVerifier {
    secrets: Vec<String>,
}

impl SharedSecretVerifier {
    /// Build a verifier. Secrets compare trimmed and lower-cased.
    pub fn new<I, S>(secrets: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let secrets: Vec<String> = secrets
            .into_iter()
            .map(|s| normalize(s.as_ref()))
            .filter(|s| !s.is_empty())
            .collect();
        if secrets.is_empty() {
            return Err(ConfigError::MissingKey {
                key: "auth.shared_secrets (set MUSTER_SHARED_SECRETS or add to ~/.muster/config.toml)"
                    .into(),
            });
        }
        Ok(Self { secrets })
    }
}

impl CredentialVerifier for SharedSecretVerifier {
    fn verify<'a>(
        &self,
        roster: &'a Roster,
        username: &str,
        secret: &str,
    ) -> Result<&'a Member, AuthError> {
        let member = roster
            .find_by_username(username)
            .ok_or_else(|| AuthError::UnknownUser {
                username: username.trim().to_string(),
            })?;
        let presented = normalize(secret);
        if !self.secrets.iter().any(|s| *s == presented) {
            tracing::debug!(username = %member.username, "rejected credential");
            return Err(AuthError::BadCredential);
        }
        Ok(member)
    }
}

fn normalize(secret: &str) -> String {
    secret.trim().to_lowercase()
}
