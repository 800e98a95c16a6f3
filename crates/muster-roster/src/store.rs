//! Persistent roster storage backed by a single JSON document.

use crate::error::RosterError;
use crate::seed::default_roster;
use chrono::Utc;
use muster_types::Roster;
use std::path::{Path, PathBuf};

/// File name of the roster document inside the data directory.
pub const ROSTER_FILE: &str = "roster.json";

/// File-based roster store. The whole roster lives in one JSON document.
///
/// There is no locking: concurrent writers race and the last save wins.
pub struct RosterStore {
    path: PathBuf,
}

impl RosterStore {
    /// Create a new store, ensuring the data directory exists.
    pub async fn new(data_dir: PathBuf) -> Result<Self, RosterError> {
        tokio::fs::create_dir_all(&data_dir).await?;
        Ok(Self {
            path: data_dir.join(ROSTER_FILE),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the roster, writing the founding roster first if none exists.
    pub async fn load(&self) -> Result<Roster, RosterError> {
        if !self.path.exists() {
            let mut roster = default_roster();
            self.save(&mut roster).await?;
            tracing::info!(
                "Seeded roster with {} members at {}",
                roster.members.len(),
                self.path.display()
            );
            return Ok(roster);
        }
        let data = tokio::fs::read_to_string(&self.path).await?;
        let roster: Roster = serde_json::from_str(&data)?;
        Ok(roster)
    }

    /// Overwrite the stored document, stamping the last-modified time
    /// (atomic write: .tmp → rename).
    pub async fn save(&self, roster: &mut Roster) -> Result<(), RosterError> {
        roster.updated_at = Utc::now();
        let tmp_path = self.path.with_extension("tmp");
        let json = serde_json::to_string_pretty(roster)?;
        tokio::fs::write(&tmp_path, json).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}
