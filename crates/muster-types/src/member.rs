//! Roster records: members, their history events, and the roster document.

use crate::rank::RankCode;
use crate::util::{mdy, mdy_opt, timestamp};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Kind of change recorded in a member's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventAction {
    Promote,
    Demote,
    #[serde(rename = "medal")]
    MedalAward,
}

impl EventAction {
    pub fn as_str(self) -> &'static str {
        match self {
            EventAction::Promote => "promote",
            EventAction::Demote => "demote",
            EventAction::MedalAward => "medal",
        }
    }
}

/// One append-only history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub action: EventAction,
    pub old_rank: RankCode,
    pub new_rank: RankCode,
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
    /// Username of the member who performed the action.
    #[serde(rename = "by")]
    pub actor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medal: Option<String>,
}

/// A soldier on the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub username: String,
    pub name: String,
    pub rank: RankCode,
    #[serde(with = "mdy")]
    pub join_date: NaiveDate,
    #[serde(with = "mdy_opt", default)]
    pub last_change: Option<NaiveDate>,
    #[serde(default)]
    pub medals: Vec<String>,
    #[serde(default)]
    pub history: Vec<Event>,
}

impl Member {
    /// Create a member with no medals and no history.
    pub fn new(
        id: impl Into<String>,
        username: impl Into<String>,
        name: impl Into<String>,
        rank: RankCode,
        join_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            name: name.into(),
            rank,
            join_date,
            last_change: Some(join_date),
            medals: Vec::new(),
            history: Vec::new(),
        }
    }
}

/// Headcount and medal totals for a roster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RosterStats {
    pub officers: usize,
    pub enlisted: usize,
    pub total: usize,
    pub total_medals: usize,
}

/// The whole roster document.
///
/// Older files name the member list `units` and stamp the document with a
/// root `last_change` date; both are read and rewritten in the current shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    #[serde(alias = "units")]
    pub members: Vec<Member>,
    #[serde(alias = "last_change", with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

/// Case-insensitive comparison of trimmed strings.
pub fn same_identity(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

impl Roster {
    pub fn new(members: Vec<Member>) -> Self {
        Self {
            members,
            updated_at: Utc::now(),
        }
    }

    pub fn find_by_username(&self, username: &str) -> Option<&Member> {
        self.members
            .iter()
            .find(|m| same_identity(&m.username, username))
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| same_identity(&m.name, name))
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id.trim())
    }

    /// Resolve a target identifier: username first, then display name.
    pub fn find_target(&self, identifier: &str) -> Option<&Member> {
        self.position_of_target(identifier).map(|i| &self.members[i])
    }

    /// Index of the member `find_target` would return.
    pub fn position_of_target(&self, identifier: &str) -> Option<usize> {
        self.members
            .iter()
            .position(|m| same_identity(&m.username, identifier))
            .or_else(|| {
                self.members
                    .iter()
                    .position(|m| same_identity(&m.name, identifier))
            })
    }

    /// Next free `u-NNN` id, one above the highest numeric id present.
    pub fn next_id(&self) -> String {
        let highest = self
            .members
            .iter()
            .filter_map(|m| m.id.strip_prefix("u-"))
            .filter_map(|n| n.parse::<u32>().ok())
            .max()
            .unwrap_or(0);
        format!("u-{:03}", highest + 1)
    }

    /// Username derived from a display name, suffixed until unique.
    pub fn derive_username(&self, name: &str) -> String {
        let base = name.trim().replace(' ', "_");
        if self.find_by_username(&base).is_none() {
            return base;
        }
        let mut n = 2u32;
        loop {
            let candidate = format!("{base}_{n}");
            if self.find_by_username(&candidate).is_none() {
                return candidate;
            }
            n += 1;
        }
    }

    pub fn stats(&self) -> RosterStats {
        let officers = self.members.iter().filter(|m| m.rank.is_officer()).count();
        let enlisted = self.members.iter().filter(|m| m.rank.is_enlisted()).count();
        RosterStats {
            officers,
            enlisted,
            total: self.members.len(),
            total_medals: self.members.iter().map(|m| m.medals.len()).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: &str, name: &str, rank: &str) -> Member {
        Member::new(
            id,
            name.replace(' ', "_"),
            name,
            rank.parse().unwrap(),
            NaiveDate::from_ymd_opt(2025, 11, 19).unwrap(),
        )
    }

    fn roster() -> Roster {
        Roster::new(vec![
            member("u-001", "Aldan Toba", "O10"),
            member("u-002", "Henry Wang", "E6"),
            member("u-007", "Quinn Tompkins", "E5"),
        ])
    }

    #[test]
    fn lookups_ignore_case_and_whitespace() {
        let r = roster();
        assert_eq!(r.find_by_username("  henry_wang ").unwrap().id, "u-002");
        assert_eq!(r.find_by_name("HENRY WANG").unwrap().id, "u-002");
        assert!(r.find_by_name("Henry").is_none());
    }

    #[test]
    fn find_target_prefers_username() {
        let mut r = roster();
        // A member whose display name collides with another member's username
        r.members.push(member("u-008", "Henry_Wang", "E1"));
        r.members[3].username = "hw2".into();
        assert_eq!(r.find_target("Henry_Wang").unwrap().id, "u-002");
        assert_eq!(r.position_of_target("Henry_Wang"), Some(1));
        assert_eq!(r.find_target("hw2").unwrap().id, "u-008");
        assert_eq!(r.find_target("quinn tompkins").unwrap().id, "u-007");
        assert_eq!(r.position_of_target("quinn tompkins"), Some(2));
        assert!(r.find_target("nobody").is_none());
    }

    #[test]
    fn next_id_skips_past_highest() {
        assert_eq!(roster().next_id(), "u-008");
        assert_eq!(Roster::new(Vec::new()).next_id(), "u-001");
    }

    #[test]
    fn derive_username_suffixes_collisions() {
        let r = roster();
        assert_eq!(r.derive_username(" Ethan Long "), "Ethan_Long");
        assert_eq!(r.derive_username("henry wang"), "henry_wang_2");
    }

    #[test]
    fn stats_counts_tiers_and_medals() {
        let mut r = roster();
        r.members[1].medals.push("Silver Shield".into());
        r.members[1].medals.push("Golden Eagle".into());
        let stats = r.stats();
        assert_eq!(
            stats,
            RosterStats {
                officers: 1,
                enlisted: 2,
                total: 3,
                total_medals: 2,
            }
        );
    }

    #[test]
    fn deserializes_legacy_document_shape() {
        // Exactly what the old store wrote: `units`, a root `last_change`,
        // and no `updated_at`.
        let json = r#"{
            "units": [{
                "id": "u-009", "username": "Rhodes_Kentor", "name": "Rhodes Kentor",
                "rank": "E1", "join_date": "12/01/25", "last_change": "N/A",
                "medals": [], "history": []
            }],
            "last_change": "12/02/25"
        }"#;
        let r: Roster = serde_json::from_str(json).unwrap();
        assert_eq!(r.members.len(), 1);
        assert_eq!(r.members[0].last_change, None);
        assert_eq!(r.members[0].rank.to_string(), "E1");
        assert_eq!(
            r.updated_at.date_naive(),
            NaiveDate::from_ymd_opt(2025, 12, 2).unwrap()
        );

        let rewritten = serde_json::to_value(&r).unwrap();
        assert!(rewritten.get("members").is_some());
        assert!(rewritten.get("updated_at").is_some());
        assert!(rewritten.get("units").is_none());
    }

    #[test]
    fn deserializes_legacy_history_timestamps() {
        let json = r#"{
            "action": "promote", "old_rank": "E1", "new_rank": "E2",
            "timestamp": "2025-12-02T15:04:05.123456", "by": "Aldan_Toba"
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.action, EventAction::Promote);
        assert_eq!(event.timestamp.format("%H:%M:%S").to_string(), "15:04:05");
        assert_eq!(event.medal, None);
    }

    #[test]
    fn current_document_shape_still_loads() {
        let json = r#"{"members": [], "updated_at": "2025-12-02T00:00:00Z"}"#;
        let r: Roster = serde_json::from_str(json).unwrap();
        assert!(r.members.is_empty());
        assert_eq!(r.updated_at.to_rfc3339(), "2025-12-02T00:00:00+00:00");
    }

    #[test]
    fn event_serializes_actor_as_by() {
        let event = Event {
            action: EventAction::MedalAward,
            old_rank: "E5".parse().unwrap(),
            new_rank: "E5".parse().unwrap(),
            timestamp: Utc::now(),
            actor: "Aldan_Toba".into(),
            medal: Some("Silver Shield".into()),
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["action"], "medal");
        assert_eq!(value["by"], "Aldan_Toba");
        assert_eq!(value["medal"], "Silver Shield");
    }
}
