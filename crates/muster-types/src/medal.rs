//! The medal catalog.

/// Catalog medals, keyed "1" through "9".
pub const MEDALS: [(&str, &str); 9] = [
    ("1", "Iron Valor Cross"),
    ("2", "Silver Shield"),
    ("3", "Golden Eagle"),
    ("4", "Sapphire Flame"),
    ("5", "Obsidian Spear"),
    ("6", "Emerald Banner"),
    ("7", "Phantom Strike Medal"),
    ("8", "Commander’s Flame"),
    ("9", "Recruiter’s Honor Medal"),
];

/// Resolve user input to a medal name.
///
/// A catalog key ("3") maps to its medal; anything else is taken as a
/// free-text medal name, trimmed.
pub fn resolve_medal(input: &str) -> String {
    let trimmed = input.trim();
    MEDALS
        .iter()
        .find(|(key, _)| *key == trimmed)
        .map(|(_, name)| (*name).to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_key_resolves_to_name() {
        assert_eq!(resolve_medal(" 3 "), "Golden Eagle");
    }

    #[test]
    fn free_text_passes_through() {
        assert_eq!(resolve_medal("  Bronze Star "), "Bronze Star");
        assert_eq!(resolve_medal("10"), "10");
    }
}
