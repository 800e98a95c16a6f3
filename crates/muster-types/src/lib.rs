//! Rank catalog, roster records, and error hierarchy for Muster.

pub mod chronicle;
pub mod error;
pub mod medal;
pub mod member;
pub mod rank;
pub mod util;

pub use chronicle::UNIT_HISTORY;
pub use error::{ConfigError, RankError};
pub use medal::{MEDALS, resolve_medal};
pub use member::{Event, EventAction, Member, Roster, RosterStats, same_identity};
pub use rank::{RankCode, Tier};
