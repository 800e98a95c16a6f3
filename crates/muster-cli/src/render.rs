//! Plain-text rendering of roster views for the terminal.

use muster_permissions::PermissionEngine;
use muster_types::{MEDALS, Member, RankCode, Roster, RosterStats, UNIT_HISTORY, util};
use std::fmt::Write;

/// One line per member: id, rank, role, name, username, medal count.
pub fn roster_table(roster: &Roster, engine: &PermissionEngine, unit_name: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{unit_name} — {} members (updated {})",
        roster.members.len(),
        roster.updated_at.format("%Y-%m-%d %H:%M UTC")
    );
    let _ = writeln!(
        out,
        "  {:<6} {:<4} {:<24} {:<5} {:<20} {:<20} {:>6}",
        "ID", "RANK", "TITLE", "ROLE", "NAME", "USERNAME", "MEDALS"
    );
    for m in &roster.members {
        let _ = writeln!(
            out,
            "  {:<6} {:<4} {:<24} {:<5} {:<20} {:<20} {:>6}",
            m.id,
            m.rank.to_string(),
            m.rank.title(),
            engine.resolve_role(m).as_str(),
            m.name,
            m.username,
            m.medals.len()
        );
    }
    out
}

/// Full record for one member, including history.
pub fn member_detail(member: &Member, engine: &PermissionEngine) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", member.name, member.username);
    let _ = writeln!(out, "  ID:          {}", member.id);
    let _ = writeln!(
        out,
        "  Rank:        {} ({})",
        member.rank,
        member.rank.title()
    );
    let _ = writeln!(out, "  Role:        {}", engine.resolve_role(member));
    let _ = writeln!(out, "  Joined:      {}", util::format_date(member.join_date));
    let _ = writeln!(
        out,
        "  Last change: {}",
        util::format_opt_date(member.last_change)
    );

    if member.medals.is_empty() {
        let _ = writeln!(out, "  Medals:      none");
    } else {
        let _ = writeln!(out, "  Medals:");
        for medal in &member.medals {
            let _ = writeln!(out, "    - {medal}");
        }
    }

    if !member.history.is_empty() {
        let _ = writeln!(out, "  History:");
        for event in &member.history {
            let change = match &event.medal {
                Some(medal) => format!("awarded {medal}"),
                None => format!("{} → {}", event.old_rank, event.new_rank),
            };
            let _ = writeln!(
                out,
                "    {} {:<7} {} (by {})",
                event.timestamp.format("%Y-%m-%d %H:%M"),
                event.action.as_str(),
                change,
                event.actor
            );
        }
    }
    out
}

pub fn stats(stats: &RosterStats) -> String {
    format!(
        "Officers: {}  Enlisted: {}  Total: {}  Medals awarded: {}",
        stats.officers, stats.enlisted, stats.total, stats.total_medals
    )
}

pub fn rank_catalog() -> String {
    let mut out = String::new();
    for rank in RankCode::catalog() {
        let _ = writeln!(out, "  {:<4} {}", rank.to_string(), rank.title());
    }
    out
}

pub fn medal_catalog() -> String {
    let mut out = String::new();
    for (key, name) in MEDALS {
        let _ = writeln!(out, "  {key}  {name}");
    }
    out
}

/// The unit chronicle, indented to match the other views.
pub fn unit_history() -> String {
    let mut out = String::new();
    for line in UNIT_HISTORY.lines() {
        if line.is_empty() {
            out.push('\n');
        } else {
            let _ = writeln!(out, "  {line}");
        }
    }
    out
}
