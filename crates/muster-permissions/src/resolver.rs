//! Role resolver: maps a member to its authority tier.

use crate::types::{Role, RoleOverride};
use muster_types::{Member, RankCode, Tier};

/// Resolves roles from the override table, then from rank.
#[derive(Debug, Clone)]
pub struct RoleResolver {
    overrides: Vec<RoleOverride>,
}

impl RoleResolver {
    /// Create a resolver with the given override table.
    ///
    /// Overrides are checked in order; the first entry whose name equals the
    /// member's display name wins.
    pub fn new(overrides: Vec<RoleOverride>) -> Self {
        Self { overrides }
    }

    pub fn overrides(&self) -> &[RoleOverride] {
        &self.overrides
    }

    /// Resolve a member's role. Total and side-effect free.
    pub fn resolve(&self, member: &Member) -> Role {
        self.overrides
            .iter()
            .find(|o| o.name == member.name)
            .map(|o| o.role)
            .unwrap_or_else(|| role_for_rank(member.rank))
    }
}

impl Default for RoleResolver {
    fn default() -> Self {
        Self::new(RoleOverride::defaults())
    }
}

/// Role implied by a rank alone.
///
/// O1–O5 → PCO, O6–O9 → HRO, O10 → CIC, E1–E7 → LR, E8–E9 → SNCO.
pub fn role_for_rank(rank: RankCode) -> Role {
    match (rank.tier(), rank.level()) {
        (Tier::Officer, 6..=9) => Role::Hro,
        (Tier::Officer, 1..=5) => Role::Pco,
        (Tier::Officer, _) => Role::Cic,
        (Tier::Enlisted, 8..=9) => Role::Snco,
        (Tier::Enlisted, _) => Role::LowerRank,
    }
}
