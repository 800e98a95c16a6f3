//! Roster actions applied to an in-memory snapshot.
//!
//! Each function validates everything before it touches the roster, so an
//! error always leaves the snapshot unchanged.

use crate::error::RosterError;
use chrono::{DateTime, NaiveDate, Utc};
use muster_permissions::{Action, PermissionEngine, Role};
use muster_types::{Event, EventAction, Member, RankCode, Roster, util};

/// Clock reading applied to a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stamp {
    /// Event timestamp.
    pub now: DateTime<Utc>,
    /// Calendar date written to `last_change` / `join_date`.
    pub today: NaiveDate,
}

impl Stamp {
    pub fn now() -> Self {
        Self {
            now: Utc::now(),
            today: util::today(),
        }
    }
}

/// Direction of a rank change. Only the recorded event differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankChange {
    Promote,
    Demote,
}

impl RankChange {
    pub fn action(self) -> Action {
        match self {
            RankChange::Promote => Action::Promote,
            RankChange::Demote => Action::Demote,
        }
    }

    fn event_action(self) -> EventAction {
        match self {
            RankChange::Promote => EventAction::Promote,
            RankChange::Demote => EventAction::Demote,
        }
    }

    /// Past-tense verb for messages.
    pub fn verb(self) -> &'static str {
        match self {
            RankChange::Promote => "promoted",
            RankChange::Demote => "demoted",
        }
    }
}

/// Look up the acting member and resolve its role from this snapshot.
pub fn resolve_actor(
    roster: &Roster,
    engine: &PermissionEngine,
    username: &str,
) -> Result<(Member, Role), RosterError> {
    let actor = roster
        .find_by_username(username)
        .cloned()
        .ok_or_else(|| RosterError::UnknownActor {
            username: username.trim().to_string(),
        })?;
    let role = engine.resolve_role(&actor);
    Ok((actor, role))
}

fn target_index(roster: &Roster, identifier: &str) -> Result<usize, RosterError> {
    roster
        .position_of_target(identifier)
        .ok_or_else(|| RosterError::TargetNotFound {
            identifier: identifier.trim().to_string(),
        })
}

/// Promote or demote `target` to `new_rank` on behalf of `actor_username`.
pub fn change_rank(
    roster: &mut Roster,
    engine: &PermissionEngine,
    actor_username: &str,
    target: &str,
    new_rank: &str,
    change: RankChange,
    stamp: Stamp,
) -> Result<Member, RosterError> {
    let (actor, role) = resolve_actor(roster, engine, actor_username)?;
    let idx = target_index(roster, target)?;
    let new_rank: RankCode = new_rank.parse()?;
    engine.authorize(
        &actor,
        role,
        &roster.members[idx],
        change.action(),
        Some(new_rank),
    )?;

    let member = &mut roster.members[idx];
    let old_rank = member.rank;
    member.rank = new_rank;
    member.last_change = Some(stamp.today);
    member.history.push(Event {
        action: change.event_action(),
        old_rank,
        new_rank,
        timestamp: stamp.now,
        actor: actor.username.clone(),
        medal: None,
    });

    tracing::info!(
        actor = %actor.username,
        target = %member.username,
        %old_rank,
        %new_rank,
        "{}",
        change.verb()
    );
    Ok(member.clone())
}

/// Append `medal` to `target`'s medals.
pub fn award_medal(
    roster: &mut Roster,
    engine: &PermissionEngine,
    actor_username: &str,
    target: &str,
    medal: &str,
    stamp: Stamp,
) -> Result<Member, RosterError> {
    let (actor, role) = resolve_actor(roster, engine, actor_username)?;
    engine.gate(role, Action::AwardMedal)?;
    let idx = target_index(roster, target)?;
    let medal = medal.trim();
    if medal.is_empty() {
        return Err(RosterError::EmptyInput {
            field: "Medal name",
        });
    }

    let member = &mut roster.members[idx];
    member.medals.push(medal.to_string());
    member.last_change = Some(stamp.today);
    member.history.push(Event {
        action: EventAction::MedalAward,
        old_rank: member.rank,
        new_rank: member.rank,
        timestamp: stamp.now,
        actor: actor.username.clone(),
        medal: Some(medal.to_string()),
    });

    tracing::info!(actor = %actor.username, target = %member.username, medal, "medal awarded");
    Ok(member.clone())
}

/// Enlist a new member named `name` at `rank`.
pub fn add_member(
    roster: &mut Roster,
    engine: &PermissionEngine,
    actor_username: &str,
    name: &str,
    rank: &str,
    stamp: Stamp,
) -> Result<Member, RosterError> {
    let (actor, role) = resolve_actor(roster, engine, actor_username)?;
    engine.gate(role, Action::AddMember)?;
    let name = name.trim();
    if name.is_empty() {
        return Err(RosterError::EmptyInput { field: "Name" });
    }
    if roster.find_by_name(name).is_some() {
        return Err(RosterError::DuplicateName {
            name: name.to_string(),
        });
    }
    let rank: RankCode = rank.parse()?;

    let member = Member::new(
        roster.next_id(),
        roster.derive_username(name),
        name,
        rank,
        stamp.today,
    );
    roster.members.push(member.clone());

    tracing::info!(actor = %actor.username, id = %member.id, username = %member.username, %rank, "member added");
    Ok(member)
}

/// Dry-run authorization of `action` against `target`, without mutating.
pub fn check(
    roster: &Roster,
    engine: &PermissionEngine,
    actor_username: &str,
    target: &str,
    action: Action,
    proposed: Option<&str>,
) -> Result<Role, RosterError> {
    let (actor, role) = resolve_actor(roster, engine, actor_username)?;
    let idx = target_index(roster, target)?;
    let proposed = proposed.map(str::parse::<RankCode>).transpose()?;
    engine.authorize(&actor, role, &roster.members[idx], action, proposed)?;
    Ok(role)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::default_roster;
    use muster_permissions::DenialReason;

    fn stamp() -> Stamp {
        Stamp {
            now: Utc::now(),
            today: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
        }
    }

    fn engine() -> PermissionEngine {
        PermissionEngine::default()
    }

    /// Seed roster plus an E8 (SNCO) and an O5 (PCO).
    fn roster() -> Roster {
        let mut r = default_roster();
        let e = engine();
        add_member(&mut r, &e, "Aldan_Toba", "Sam Sarge", "E8", stamp()).unwrap();
        add_member(&mut r, &e, "Aldan_Toba", "Pat Colonel", "O5", stamp()).unwrap();
        add_member(&mut r, &e, "Aldan_Toba", "Olly Captain", "O3", stamp()).unwrap();
        r
    }

    #[test]
    fn promote_records_history() {
        let mut r = roster();
        let updated = change_rank(
            &mut r,
            &engine(),
            "Sam_Sarge",
            "Luke Lafrancois",
            "e7",
            RankChange::Promote,
            stamp(),
        )
        .unwrap();

        assert_eq!(updated.rank.to_string(), "E7");
        assert_eq!(updated.last_change, Some(stamp().today));
        let event = updated.history.last().unwrap();
        assert_eq!(event.action, EventAction::Promote);
        assert_eq!(event.old_rank.to_string(), "E5");
        assert_eq!(event.new_rank.to_string(), "E7");
        assert_eq!(event.actor, "Sam_Sarge");
        assert_eq!(r.find_by_name("Luke Lafrancois").unwrap(), &updated);
    }

    #[test]
    fn denied_change_leaves_roster_untouched() {
        let mut r = roster();
        let before = r.clone();
        let err = change_rank(
            &mut r,
            &engine(),
            "Sam_Sarge",
            "Luke_Lafrancois",
            "E9",
            RankChange::Promote,
            stamp(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            RosterError::PermissionDenied(DenialReason::SncoProposedNotBelow { .. })
        ));
        assert_eq!(r, before);
    }

    #[test]
    fn pco_scenario_through_roster() {
        let mut r = roster();
        let e = engine();
        let err = change_rank(
            &mut r,
            &e,
            "Pat_Colonel",
            "Olly_Captain",
            "O6",
            RankChange::Promote,
            stamp(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            RosterError::PermissionDenied(DenialReason::PcoProposedNotBelow)
        ));
        let ok = change_rank(
            &mut r,
            &e,
            "Pat_Colonel",
            "Olly_Captain",
            "O4",
            RankChange::Promote,
            stamp(),
        )
        .unwrap();
        assert_eq!(ok.rank.to_string(), "O4");
    }

    #[test]
    fn demote_records_demote_event() {
        let mut r = roster();
        let updated = change_rank(
            &mut r,
            &engine(),
            "Declan_Benito",
            "Jayden Li",
            "O7",
            RankChange::Demote,
            stamp(),
        )
        .unwrap();
        assert_eq!(updated.history[0].action, EventAction::Demote);
        assert_eq!(updated.history[0].old_rank.to_string(), "O9");
    }

    #[test]
    fn invalid_rank_is_rejected_before_permission() {
        let mut r = roster();
        let err = change_rank(
            &mut r,
            &engine(),
            "Rhodes_Kentor",
            "Ethan_Long",
            "E10",
            RankChange::Promote,
            stamp(),
        )
        .unwrap_err();
        assert!(matches!(err, RosterError::InvalidRank(_)));
    }

    #[test]
    fn unknown_target_and_actor() {
        let mut r = roster();
        let e = engine();
        assert!(matches!(
            change_rank(&mut r, &e, "Aldan_Toba", "Nobody", "E2", RankChange::Promote, stamp()),
            Err(RosterError::TargetNotFound { .. })
        ));
        assert!(matches!(
            change_rank(&mut r, &e, "ghost", "Ethan_Long", "E3", RankChange::Promote, stamp()),
            Err(RosterError::UnknownActor { .. })
        ));
    }

    #[test]
    fn role_is_recomputed_after_promotion() {
        let mut r = roster();
        let e = engine();
        // E6 is Lower Rank and cannot act
        assert!(matches!(
            award_medal(&mut r, &e, "Henry_Wang", "Ethan_Long", "1", stamp()),
            Err(RosterError::PermissionDenied(DenialReason::LowerRank))
        ));
        change_rank(&mut r, &e, "Aldan_Toba", "Henry_Wang", "E8", RankChange::Promote, stamp())
            .unwrap();
        // Now an SNCO, the same member passes the gate
        let awarded =
            award_medal(&mut r, &e, "Henry_Wang", "Ethan_Long", "Golden Eagle", stamp()).unwrap();
        assert_eq!(awarded.medals, vec!["Golden Eagle".to_string()]);
    }

    #[test]
    fn award_medal_appends_event() {
        let mut r = roster();
        let updated = award_medal(
            &mut r,
            &engine(),
            "Marcus_Stephan",
            "quinn tompkins",
            "  Silver Shield ",
            stamp(),
        )
        .unwrap();
        assert_eq!(updated.medals, vec!["Silver Shield".to_string()]);
        let event = updated.history.last().unwrap();
        assert_eq!(event.action, EventAction::MedalAward);
        assert_eq!(event.old_rank, event.new_rank);
        assert_eq!(event.medal.as_deref(), Some("Silver Shield"));
        assert_eq!(r.stats().total_medals, 1);
    }

    #[test]
    fn award_medal_rejects_blank_name() {
        let mut r = roster();
        let before = r.clone();
        let err = award_medal(&mut r, &engine(), "Aldan_Toba", "Ethan_Long", "   ", stamp())
            .unwrap_err();
        assert!(matches!(err, RosterError::EmptyInput { .. }));
        assert_eq!(r, before);
    }

    #[test]
    fn add_member_derives_id_and_username() {
        let mut r = default_roster();
        let added = add_member(
            &mut r,
            &engine(),
            "Jayden_Li",
            "  Nia Park ",
            "o2",
            stamp(),
        )
        .unwrap();
        assert_eq!(added.id, "u-011");
        assert_eq!(added.username, "Nia_Park");
        assert_eq!(added.name, "Nia Park");
        assert_eq!(added.rank.to_string(), "O2");
        assert_eq!(added.join_date, stamp().today);
        assert_eq!(r.members.len(), 11);
    }

    #[test]
    fn add_member_duplicate_never_grows_roster() {
        let mut r = default_roster();
        let e = engine();
        for name in ["Henry Wang", "  henry wang", "HENRY WANG  "] {
            let err = add_member(&mut r, &e, "Aldan_Toba", name, "E1", stamp()).unwrap_err();
            assert!(matches!(err, RosterError::DuplicateName { .. }));
            assert_eq!(r.members.len(), 10);
        }
    }

    #[test]
    fn add_member_validation() {
        let mut r = default_roster();
        let e = engine();
        assert!(matches!(
            add_member(&mut r, &e, "Aldan_Toba", "  ", "E1", stamp()),
            Err(RosterError::EmptyInput { .. })
        ));
        assert!(matches!(
            add_member(&mut r, &e, "Aldan_Toba", "New Recruit", "Z1", stamp()),
            Err(RosterError::InvalidRank(_))
        ));
        assert!(matches!(
            add_member(&mut r, &e, "Ethan_Long", "New Recruit", "E1", stamp()),
            Err(RosterError::PermissionDenied(DenialReason::LowerRank))
        ));
        assert_eq!(r.members.len(), 10);
    }

    #[test]
    fn check_does_not_mutate() {
        let r = roster();
        let e = engine();
        let role = check(&r, &e, "Sam_Sarge", "Ethan_Long", Action::Promote, Some("E7")).unwrap();
        assert_eq!(role, Role::Snco);
        assert!(matches!(
            check(&r, &e, "Sam_Sarge", "Ethan_Long", Action::AwardMedal, None),
            Err(RosterError::PermissionDenied(DenialReason::SncoActionNotAllowed))
        ));
    }
}
