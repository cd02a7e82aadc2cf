//! On-disk cassette layout.
//!
//! A cassette is one YAML document per port. Results are stored as
//! `{"ok": value}` or `{"err": "message"}`; downloads carry their body as
//! `{"status": 200, "body_hex": "..."}`.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One call made through a port, with what went in and what came back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Position in the recording, starting at 0.
    pub seq: u64,
    /// Port the call went through: `fs`, `http` or `llm`.
    pub port: String,
    /// Port method, e.g. `download`.
    pub method: String,
    /// Call arguments.
    pub input: serde_json::Value,
    /// Recorded return value.
    pub output: serde_json::Value,
}

impl Interaction {
    /// Whether the recorded call failed.
    #[must_use]
    pub fn is_err(&self) -> bool {
        self.output.get("err").is_some()
    }
}

/// Recorded interactions for one run, in call order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Label given when recording started.
    pub name: String,
    /// When recording finished.
    pub recorded_at: DateTime<Utc>,
    /// Repository the run was pointed at.
    pub source: String,
    /// Calls in the order they happened.
    pub interactions: Vec<Interaction>,
}

impl Cassette {
    /// Reads and parses a cassette file.
    ///
    /// # Errors
    ///
    /// Returns a message naming the file if it cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))
    }

    /// Serializes the cassette to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let yaml = serde_yaml::to_string(self).map_err(std::io::Error::other)?;
        std::fs::write(path, yaml)
    }

    /// Number of recorded calls per `port::method`, failures included.
    #[must_use]
    pub fn call_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for interaction in &self.interactions {
            *counts.entry(format!("{}::{}", interaction.port, interaction.method)).or_insert(0) += 1;
        }
        counts
    }
}
