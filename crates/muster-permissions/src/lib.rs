//! Role resolution and permission checks for Muster.
//!
//! Roles: LR / SNCO / PCO / HRO / JCOS / CIC
//! Actions: promote / demote / award_medal / add_member

pub mod auth;
pub mod engine;
pub mod resolver;
pub mod types;

pub use auth::{AuthError, CredentialVerifier, SharedSecretVerifier};
pub use engine::PermissionEngine;
pub use resolver::{RoleResolver, role_for_rank};
pub use types::*;
