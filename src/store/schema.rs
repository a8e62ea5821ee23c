use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

/// The single persisted record: list position plus per-word mistake counts,
/// keyed by the dataset's stable word ids.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProgressData {
    pub schema_version: u32,
    pub index: usize,
    pub mistakes: HashMap<String, u32>,
    #[serde(default = "Utc::now")]
    pub saved_at: DateTime<Utc>,
}

impl Default for ProgressData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            index: 0,
            mistakes: HashMap::new(),
            saved_at: Utc::now(),
        }
    }
}

impl ProgressData {
    /// Check if loaded data has a stale schema version and needs reset.
    pub fn needs_reset(&self) -> bool {
        self.schema_version != SCHEMA_VERSION
    }
}
