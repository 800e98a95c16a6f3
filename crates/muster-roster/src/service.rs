//! Roster service: runs authorized actions against the stored roster.

use crate::actions::{self, RankChange, Stamp};
use crate::error::RosterError;
use crate::store::RosterStore;
use muster_permissions::{Action, PermissionEngine, Role};
use muster_types::{Member, Roster};

/// Read-modify-write front end over a [`RosterStore`].
///
/// Every call loads the latest snapshot, applies one action, and writes the
/// whole document back only if the action succeeded.
pub struct RosterService {
    store: RosterStore,
    engine: PermissionEngine,
}

impl RosterService {
    pub fn new(store: RosterStore, engine: PermissionEngine) -> Self {
        Self { store, engine }
    }

    pub fn engine(&self) -> &PermissionEngine {
        &self.engine
    }

    pub fn store(&self) -> &RosterStore {
        &self.store
    }

    pub async fn load(&self) -> Result<Roster, RosterError> {
        self.store.load().await
    }

    pub async fn promote(
        &self,
        actor: &str,
        target: &str,
        new_rank: &str,
    ) -> Result<Member, RosterError> {
        self.change_rank(actor, target, new_rank, RankChange::Promote)
            .await
    }

    pub async fn demote(
        &self,
        actor: &str,
        target: &str,
        new_rank: &str,
    ) -> Result<Member, RosterError> {
        self.change_rank(actor, target, new_rank, RankChange::Demote)
            .await
    }

    async fn change_rank(
        &self,
        actor: &str,
        target: &str,
        new_rank: &str,
        change: RankChange,
    ) -> Result<Member, RosterError> {
        let mut roster = self.store.load().await?;
        let updated = actions::change_rank(
            &mut roster,
            &self.engine,
            actor,
            target,
            new_rank,
            change,
            Stamp::now(),
        )?;
        self.store.save(&mut roster).await?;
        Ok(updated)
    }

    pub async fn award_medal(
        &self,
        actor: &str,
        target: &str,
        medal: &str,
    ) -> Result<Member, RosterError> {
        let mut roster = self.store.load().await?;
        let updated =
            actions::award_medal(&mut roster, &self.engine, actor, target, medal, Stamp::now())?;
        self.store.save(&mut roster).await?;
        Ok(updated)
    }

    pub async fn add_member(
        &self,
        actor: &str,
        name: &str,
        rank: &str,
    ) -> Result<Member, RosterError> {
        let mut roster = self.store.load().await?;
        let added =
            actions::add_member(&mut roster, &self.engine, actor, name, rank, Stamp::now())?;
        self.store.save(&mut roster).await?;
        Ok(added)
    }

    /// Dry-run authorization; returns the actor's current role when allowed.
    pub async fn check(
        &self,
        actor: &str,
        target: &str,
        action: Action,
        proposed: Option<&str>,
    ) -> Result<Role, RosterError> {
        let roster = self.store.load().await?;
        actions::check(&roster, &self.engine, actor, target, action, proposed)
    }
}
