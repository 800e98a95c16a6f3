//! The founding roster written when no document exists yet.

use muster_types::{Member, RankCode, Roster, util};

// (id, name, rank, join date, last change)
type FounderRow = (&'static str, &'static str, &'static str, &'static str, &'static str);

const FOUNDERS: [FounderRow; 10] = [
    ("u-001", "Aldan Toba", "O10", "11/18/25", "11/20/25"),
    ("u-002", "Declan Benito", "O10", "11/19/25", "11/28/25"),
    ("u-003", "Jayden Li", "O9", "11/19/25", "11/20/25"),
    ("u-004", "Luca Lewis", "O8", "11/19/25", "11/20/25"),
    ("u-005", "Marcus Stephan", "O6", "11/19/25", "11/20/25"),
    ("u-006", "Henry Wang", "E6", "11/20/25", "11/24/25"),
    ("u-007", "Luke Lafrancois", "E5", "11/20/25", "11/24/25"),
    ("u-008", "Quinn Tompkins", "E5", "11/21/25", "11/24/25"),
    ("u-009", "Rhodes Kentor", "E1", "12/01/25", "N/A"),
    ("u-010", "Ethan Long", "E2", "12/01/25", "12/02/25"),
];

/// Build the default roster.
pub fn default_roster() -> Roster {
    Roster::new(founders(&FOUNDERS))
}

/// Build members from seed rows. A row that fails to parse is logged and
/// left out.
fn founders(rows: &[FounderRow]) -> Vec<Member> {
    rows.iter()
        .filter_map(|row| match founder(row) {
            Ok(member) => Some(member),
            Err(reason) => {
                tracing::warn!("Skipping seed member {} ({}): {}", row.1, row.0, reason);
                None
            }
        })
        .collect()
}

fn founder(&(id, name, rank, joined, changed): &FounderRow) -> Result<Member, String> {
    let rank = rank.parse::<RankCode>().map_err(|e| e.to_string())?;
    let join_date = util::parse_date(joined)
        .map_err(|e| format!("bad join date '{joined}': {e}"))?;
    let last_change = if changed == util::NO_DATE {
        None
    } else {
        Some(
            util::parse_date(changed)
                .map_err(|e| format!("bad last change '{changed}': {e}"))?,
        )
    };
    let mut member = Member::new(id, name.replace(' ', "_"), name, rank, join_date);
    member.last_change = last_change;
    Ok(member)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_has_every_founder() {
        let roster = default_roster();
        assert_eq!(roster.members.len(), FOUNDERS.len());
        let stats = roster.stats();
        assert_eq!(stats.officers, 5);
        assert_eq!(stats.enlisted, 5);
        assert_eq!(stats.total_medals, 0);
    }

    #[test]
    fn seed_usernames_replace_spaces() {
        let roster = default_roster();
        let aldan = roster.find_by_id("u-001").unwrap();
        assert_eq!(aldan.username, "Aldan_Toba");
        assert_eq!(aldan.rank.to_string(), "O10");
    }

    #[test]
    fn seed_keeps_missing_last_change() {
        let roster = default_roster();
        assert_eq!(roster.find_by_name("Rhodes Kentor").unwrap().last_change, None);
    }

    #[test]
    fn next_id_follows_seed() {
        assert_eq!(default_roster().next_id(), "u-011");
    }

    #[test]
    fn every_founder_row_parses() {
        for row in &FOUNDERS {
            assert!(founder(row).is_ok(), "{}", row.1);
        }
    }

    #[test]
    fn bad_rows_are_skipped_not_fatal() {
        let rows: [FounderRow; 3] = [
            ("u-001", "Aldan Toba", "O10", "11/18/25", "11/20/25"),
            ("u-002", "Typo Rank", "O11", "11/19/25", "11/20/25"),
            ("u-003", "Typo Date", "E4", "2025-11-19", "N/A"),
        ];
        assert!(founder(&rows[1]).unwrap_err().contains("O11"));
        assert!(founder(&rows[2]).unwrap_err().contains("join date"));

        let members = founders(&rows);
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].name, "Aldan Toba");
    }
}
