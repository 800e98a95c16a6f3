//! Rank codes and the fixed rank catalog.
//!
//! A rank is written as a tier letter followed by a level: `E1`–`E9` for
//! enlisted ranks and `O1`–`O10` for officer ranks. Nothing outside those
//! 19 codes is a rank.

use crate::error::RankError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Enlisted or officer classification of a rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Enlisted,
    Officer,
}

impl Tier {
    /// The letter used in the textual rank code.
    pub fn letter(self) -> char {
        match self {
            Tier::Enlisted => 'E',
            Tier::Officer => 'O',
        }
    }

    /// Highest level that exists in this tier.
    pub fn max_level(self) -> u8 {
        match self {
            Tier::Enlisted => 9,
            Tier::Officer => 10,
        }
    }

    fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'E' => Some(Tier::Enlisted),
            'O' => Some(Tier::Officer),
            _ => None,
        }
    }
}

const ENLISTED_TITLES: [&str; 9] = [
    "Private",
    "Private First Class",
    "Specialist",
    "Corporal",
    "Sergeant",
    "Staff Sergeant",
    "Sergeant First Class",
    "Master Sergeant",
    "Sergeant Major",
];

const OFFICER_TITLES: [&str; 10] = [
    "Second Lieutenant",
    "First Lieutenant",
    "Captain",
    "Major",
    "Lieutenant Colonel",
    "Colonel",
    "Brigadier General",
    "Major General",
    "Lieutenant General",
    "General",
];

/// A validated rank from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RankCode {
    tier: Tier,
    level: u8,
}

impl RankCode {
    /// Build a rank, rejecting levels outside the tier's range.
    pub fn new(tier: Tier, level: u8) -> Result<Self, RankError> {
        if level == 0 || level > tier.max_level() {
            return Err(RankError::invalid(format!("{}{level}", tier.letter())));
        }
        Ok(Self { tier, level })
    }

    pub fn tier(self) -> Tier {
        self.tier
    }

    pub fn level(self) -> u8 {
        self.level
    }

    pub fn is_officer(self) -> bool {
        self.tier == Tier::Officer
    }

    pub fn is_enlisted(self) -> bool {
        self.tier == Tier::Enlisted
    }

    /// Human-readable rank title, e.g. "Staff Sergeant" for E6.
    pub fn title(self) -> &'static str {
        let idx = usize::from(self.level - 1);
        match self.tier {
            Tier::Enlisted => ENLISTED_TITLES[idx],
            Tier::Officer => OFFICER_TITLES[idx],
        }
    }

    /// All 19 catalog ranks, enlisted first, each tier in ascending order.
    pub fn catalog() -> impl Iterator<Item = RankCode> {
        let enlisted = (1..=Tier::Enlisted.max_level()).map(|level| RankCode {
            tier: Tier::Enlisted,
            level,
        });
        let officer = (1..=Tier::Officer.max_level()).map(|level| RankCode {
            tier: Tier::Officer,
            level,
        });
        enlisted.chain(officer)
    }
}

impl fmt::Display for RankCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.tier.letter(), self.level)
    }
}

impl FromStr for RankCode {
    type Err = RankError;

    /// Parse a rank code. Surrounding whitespace and letter case are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let tier = chars
            .next()
            .and_then(Tier::from_letter)
            .ok_or_else(|| RankError::invalid(trimmed))?;
        let digits = chars.as_str();
        // Reject signs and padding such as "E+5" or "E05"
        if digits.is_empty() || digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(RankError::invalid(trimmed));
        }
        let level: u8 = digits.parse().map_err(|_| RankError::invalid(trimmed))?;
        RankCode::new(tier, level).map_err(|_| RankError::invalid(trimmed))
    }
}

impl TryFrom<String> for RankCode {
    type Error = RankError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RankCode> for String {
    fn from(rank: RankCode) -> Self {
        rank.to_string()
    }
}
