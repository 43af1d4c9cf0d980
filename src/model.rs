use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

/// First 8 characters of a commit hash, or the whole string if shorter.
pub fn short_hash(hash: &str) -> &str {
    hash.get(..8).unwrap_or(hash)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitRecord {
    pub hash: String,
    pub subject: String,
}

impl CommitRecord {
    pub fn short_hash(&self) -> &str {
        short_hash(&self.hash)
    }

    /// Merge commits are identified by subject alone; their stats are never
    /// fetched.
    pub fn is_merge(&self) -> bool {
        self.subject.starts_with("Merge branch")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeStats {
    pub added: u64,
    pub deleted: u64,
}

impl ChangeStats {
    pub fn total(&self) -> u64 {
        self.added + self.deleted
    }

    /// Share of the change that is deletions, on a 0-100 scale. Defined as 0
    /// for an empty change.
    pub fn percent_deleted(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.deleted as f64 / total as f64 * 100.0
        }
    }
}

/// Scan configuration, fixed at startup. `since` is handed to git verbatim.
#[derive(Debug, Clone)]
pub struct Thresholds {
    pub since: String,
    pub min_lines: u64,
    pub min_pct: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedMatch {
    pub hash: String,
    pub author: String,
    pub added: u64,
    pub deleted: u64,
    pub percent_deleted: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository_path: String,
    pub since: String,
    pub min_lines: u64,
    pub min_pct: u32,
    pub matches: Vec<RedMatch>,
}
