//! Core types for the permission system.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Authority tier derived from a member's rank. Never stored on the member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Lower Rank: can take no administrative action.
    #[serde(rename = "LR", alias = "lr")]
    LowerRank,
    #[serde(rename = "SNCO", alias = "snco")]
    Snco,
    #[serde(rename = "PCO", alias = "pco")]
    Pco,
    #[serde(rename = "HRO", alias = "hro")]
    Hro,
    #[serde(rename = "JCOS", alias = "jcos")]
    Jcos,
    #[serde(rename = "CIC", alias = "cic")]
    Cic,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::LowerRank,
        Role::Snco,
        Role::Pco,
        Role::Hro,
        Role::Jcos,
        Role::Cic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::LowerRank => "LR",
            Role::Snco => "SNCO",
            Role::Pco => "PCO",
            Role::Hro => "HRO",
            Role::Jcos => "JCOS",
            Role::Cic => "CIC",
        }
    }

    /// JCOS and CIC bypass every check.
    pub fn is_unrestricted(self) -> bool {
        matches!(self, Role::Jcos | Role::Cic)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An administrative action on the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Promote,
    Demote,
    AwardMedal,
    AddMember,
}

impl Action {
    pub fn is_rank_change(self) -> bool {
        matches!(self, Action::Promote | Action::Demote)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Promote => "promote",
            Action::Demote => "demote",
            Action::AwardMedal => "award_medal",
            Action::AddMember => "add_member",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps one identity, by exact display name, to a fixed role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleOverride {
    pub name: String,
    pub role: Role,
}

impl RoleOverride {
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            role,
        }
    }

    /// Built-in table: the Joint Chief of Staff, then the commander-in-chief.
    pub fn defaults() -> Vec<RoleOverride> {
        vec![
            RoleOverride::new("Declan Benito", Role::Jcos),
            RoleOverride::new("Aldan Toba", Role::Cic),
        ]
    }
}

/// Why an action was refused. The display text is user-facing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DenialReason {
    #[error("Lower Rank users cannot perform that action.")]
    LowerRank,

    #[error("SNCOs can only modify enlisted ranks.")]
    SncoTargetNotEnlisted,

    #[error("SNCO role requires an enlisted actor.")]
    SncoActorNotEnlisted,

    #[error("SNCOs can only modify enlisted ranks below {actor_rank}.")]
    SncoTargetNotBelow { actor_rank: String },

    #[error("SNCOs can only set enlisted ranks.")]
    SncoProposedNotEnlisted,

    #[error("SNCOs cannot set a rank equal or above their own ({actor_rank}).")]
    SncoProposedNotBelow { actor_rank: String },

    #[error("SNCOs cannot perform that action.")]
    SncoActionNotAllowed,

    #[error("PCO must be an officer to modify officers.")]
    PcoActorNotOfficer,

    #[error("PCO can only modify officers below their rank.")]
    PcoTargetNotBelow,

    #[error("PCO must set an officer rank when modifying officers.")]
    PcoProposedNotOfficer,

    #[error("PCO cannot set an officer rank equal or above their own.")]
    PcoProposedNotBelow,

    #[error("HRO cannot modify O10.")]
    HroTargetTopRank,

    #[error("HRO cannot set O10.")]
    HroProposedTopRank,
}

/// The result of a permission check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionDecision {
    Allow,
    Deny { reason: DenialReason },
}

impl PermissionDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, PermissionDecision::Allow)
    }

    pub fn reason(&self) -> Option<&DenialReason> {
        match self {
            PermissionDecision::Allow => None,
            PermissionDecision::Deny { reason } => Some(reason),
        }
    }

    pub fn into_result(self) -> Result<(), DenialReason> {
        match self {
            PermissionDecision::Allow => Ok(()),
            PermissionDecision::Deny { reason } => Err(reason),
        }
    }
}

impl From<Result<(), DenialReason>> for PermissionDecision {
    fn from(result: Result<(), DenialReason>) -> Self {
        match result {
            Ok(()) => PermissionDecision::Allow,
            Err(reason) => PermissionDecision::Deny { reason },
        }
    }
}
