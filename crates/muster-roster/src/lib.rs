//! Roster persistence and authorized roster actions for Muster.

pub mod actions;
pub mod error;
pub mod seed;
pub mod service;
pub mod store;

pub use actions::{RankChange, Stamp};
pub use error::RosterError;
pub use seed::default_roster;
pub use service::RosterService;
pub use store::RosterStore;
