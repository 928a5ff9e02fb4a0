//! Scan configuration.
//!
//! Decides which loaded files are scanned for unused methods and how
//! failures are handled. Every loaded file is still a usage source,
//! whether or not it is scanned.

use serde::Deserialize;

/// Globs (relative to the source directory) selecting scan targets.
pub const DEFAULT_INCLUDE: &[&str] = &["**/*.ts"];

/// Globs (relative to the source directory) removed from the scan targets.
pub const DEFAULT_EXCLUDE: &[&str] = &["**/*.controller.ts", "**/*.d.ts"];

/// Configuration for one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScanConfig {
    /// Scan target include globs
    pub include: Vec<String>,
    /// Scan target exclude globs
    pub exclude: Vec<String>,
    /// Skip files that fail to parse and methods that fail to resolve
    /// instead of aborting the run.
    pub keep_going: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            include: DEFAULT_INCLUDE.iter().map(|p| p.to_string()).collect(),
            exclude: DEFAULT_EXCLUDE.iter().map(|p| p.to_string()).collect(),
            keep_going: false,
        }
    }
}

impl ScanConfig {
    /// Add exclusion globs on top of the current ones.
    pub fn with_excludes(mut self, patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.exclude.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Enable or disable keep-going mode.
    pub fn with_keep_going(mut self, enabled: bool) -> Self {
        self.keep_going = enabled;
        self
    }
}
