//! Provenance attached to computed artifacts.

use std::process::Command;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// When and from which source revision a result was produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    /// ISO-8601 UTC timestamp, e.g. `2024-01-01T00:00:00Z`.
    pub timestamp_utc: String,
    /// Source revision, when one could be determined.
    pub git_sha: Option<String>,
}

impl Provenance {
    /// Captures the current time and the source revision, if any.
    pub fn capture() -> Self {
        Self {
            timestamp_utc: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
            git_sha: source_revision(),
        }
    }

    /// Builds a provenance record with a fixed timestamp and no revision.
    pub fn fixed(timestamp_utc: impl Into<String>) -> Self {
        Self {
            timestamp_utc: timestamp_utc.into(),
            git_sha: None,
        }
    }
}

/// Resolves the source revision from the build environment or `git`.
pub fn source_revision() -> Option<String> {
    if let Some(sha) = option_env!("GIT_COMMIT_HASH") {
        return Some(sha.to_string());
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .and_then(|out| {
            if out.status.success() {
                Some(String::from_utf8_lossy(&out.stdout).trim().to_string())
            } else {
                None
            }
        })
        .filter(|sha| !sha.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captured_timestamp_is_utc() {
        let prov = Provenance::capture();
        assert!(prov.timestamp_utc.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&prov.timestamp_utc).is_ok());
    }

    #[test]
    fn fixed_provenance_has_no_revision() {
        let prov = Provenance::fixed("1970-01-01T00:00:00Z");
        assert_eq!(prov.git_sha, None);
    }
}
