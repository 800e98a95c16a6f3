//! Permission engine, the entry point for permission checks.

use crate::resolver::RoleResolver;
use crate::types::*;
use muster_types::{Member, RankCode, Tier};

/// Decides whether an actor may perform an action on a target.
///
/// Holds no mutable state; safe to share across threads and call concurrently.
#[derive(Debug, Clone, Default)]
pub struct PermissionEngine {
    resolver: RoleResolver,
}

impl PermissionEngine {
    pub fn new(resolver: RoleResolver) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &RoleResolver {
        &self.resolver
    }

    /// Resolve a member's current role. Call this on every check; roles are
    /// never cached because rank changes move members between tiers.
    pub fn resolve_role(&self, member: &Member) -> Role {
        self.resolver.resolve(member)
    }

    /// Caller-level gate: Lower Rank members may take no action at all.
    pub fn gate(&self, role: Role, action: Action) -> Result<(), DenialReason> {
        if role == Role::LowerRank {
            tracing::debug!(%action, "Lower Rank actor rejected at gate");
            return Err(DenialReason::LowerRank);
        }
        Ok(())
    }

    /// Check whether `actor`, acting as `role`, may perform `action` on `target`.
    ///
    /// Evaluation order, first match wins:
    /// 1. LR is always denied.
    /// 2. JCOS and CIC are always allowed.
    /// 3. SNCO may only change enlisted ranks strictly below its own level,
    ///    and may take no other action.
    /// 4. PCO may change enlisted ranks freely and officer ranks strictly below
    ///    its own level; other actions are allowed.
    /// 5. HRO may change any rank except to or from O10; other actions are allowed.
    pub fn can_act(
        &self,
        actor: &Member,
        role: Role,
        target: &Member,
        action: Action,
        proposed: Option<RankCode>,
    ) -> PermissionDecision {
        let result = match role {
            Role::LowerRank => Err(DenialReason::LowerRank),
            Role::Jcos | Role::Cic => Ok(()),
            Role::Snco if action.is_rank_change() => snco_rank_change(actor, target, proposed),
            Role::Snco => Err(DenialReason::SncoActionNotAllowed),
            Role::Pco if action.is_rank_change() => pco_rank_change(actor, target, proposed),
            Role::Hro if action.is_rank_change() => hro_rank_change(target, proposed),
            Role::Pco | Role::Hro => Ok(()),
        };

        tracing::debug!(
            actor = %actor.username,
            %role,
            target = %target.username,
            %action,
            proposed = ?proposed.map(|r| r.to_string()),
            allowed = result.is_ok(),
            "permission check"
        );

        result.into()
    }

    /// Same as [`can_act`](Self::can_act), as a `Result`.
    pub fn authorize(
        &self,
        actor: &Member,
        role: Role,
        target: &Member,
        action: Action,
        proposed: Option<RankCode>,
    ) -> Result<(), DenialReason> {
        self.can_act(actor, role, target, action, proposed)
            .into_result()
    }
}

fn snco_rank_change(
    actor: &Member,
    target: &Member,
    proposed: Option<RankCode>,
) -> Result<(), DenialReason> {
    if target.rank.tier() != Tier::Enlisted {
        return Err(DenialReason::SncoTargetNotEnlisted);
    }
    if actor.rank.tier() != Tier::Enlisted {
        return Err(DenialReason::SncoActorNotEnlisted);
    }
    let actor_level = actor.rank.level();
    if target.rank.level() >= actor_level {
        return Err(DenialReason::SncoTargetNotBelow {
            actor_rank: actor.rank.to_string(),
        });
    }
    if let Some(new_rank) = proposed {
        if new_rank.tier() != Tier::Enlisted {
            return Err(DenialReason::SncoProposedNotEnlisted);
        }
        if new_rank.level() >= actor_level {
            return Err(DenialReason::SncoProposedNotBelow {
                actor_rank: actor.rank.to_string(),
            });
        }
    }
    Ok(())
}

fn pco_rank_change(
    actor: &Member,
    target: &Member,
    proposed: Option<RankCode>,
) -> Result<(), DenialReason> {
    match target.rank.tier() {
        Tier::Enlisted => Ok(()),
        Tier::Officer => {
            if actor.rank.tier() != Tier::Officer {
                return Err(DenialReason::PcoActorNotOfficer);
            }
            let actor_level = actor.rank.level();
            // Equal level is a denial
            if target.rank.level() >= actor_level {
                return Err(DenialReason::PcoTargetNotBelow);
            }
            if let Some(new_rank) = proposed {
                if new_rank.tier() != Tier::Officer {
                    return Err(DenialReason::PcoProposedNotOfficer);
                }
                if new_rank.level() >= actor_level {
                    return Err(DenialReason::PcoProposedNotBelow);
                }
            }
            Ok(())
        }
    }
}

fn hro_rank_change(target: &Member, proposed: Option<RankCode>) -> Result<(), DenialReason> {
    let top = Tier::Officer.max_level();
    if target.rank.is_officer() && target.rank.level() >= top {
        return Err(DenialReason::HroTargetTopRank);
    }
    if proposed.is_some_and(|r| r.is_officer() && r.level() >= top) {
        return Err(DenialReason::HroProposedTopRank);
    }
    Ok(())
}
