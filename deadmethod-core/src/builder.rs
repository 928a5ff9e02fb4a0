//! Builder pattern API for deadmethod analysis.
//!
//! Provides a fluent interface for configuring and running a scan:
//!
//! ```rust,ignore
//! use deadmethod_core::prelude::*;
//!
//! let result = DeadMethod::new("/path/to/project")
//!     .exclude(["**/*.spec.ts"])
//!     .keep_going(true)
//!     .analyze()?;
//!
//! for finding in &result.findings {
//!     println!("{}", finding);
//! }
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::config::ScanConfig;
use crate::detect::{find_unused_methods, Finding, ScanStats};
use crate::project::ProjectModel;
use crate::resolve::NameIndexResolver;
use crate::root::{absolutize, locate_project, ProjectLocation};

/// Builder for configuring an unused-method scan.
#[derive(Debug, Clone)]
pub struct DeadMethod {
    /// Project root or source directory, as given
    path: PathBuf,

    config: ScanConfig,
}

impl DeadMethod {
    /// Create a new analysis builder for the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: ScanConfig::default(),
        }
    }

    /// Add scan-target exclusion globs, relative to the source directory.
    pub fn exclude(mut self, patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.config = self.config.with_excludes(patterns);
        self
    }

    /// Skip files that fail to parse and methods that fail to resolve.
    pub fn keep_going(mut self, enabled: bool) -> Self {
        self.config = self.config.with_keep_going(enabled);
        self
    }

    /// Run Locate → Load → Scan.
    pub fn analyze(&self) -> Result<AnalysisResult> {
        let path = absolutize(&self.path)?;
        let location = locate_project(&path)?;
        tracing::info!(
            root = %location.root.display(),
            source_dir = %location.source_dir.display(),
            "Located project"
        );

        let model = ProjectModel::load(&location, &self.config)
            .with_context(|| format!("Failed to load project at {}", location.root.display()))?;

        let resolver = NameIndexResolver::new(&model);
        let scan = find_unused_methods(&model, &resolver, self.config.keep_going)
            .context("Failed to resolve method references")?;

        Ok(AnalysisResult {
            location,
            files_loaded: model.files.len(),
            findings: scan.findings,
            stats: scan.stats,
        })
    }
}

/// Result of running an unused-method scan.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub location: ProjectLocation,

    /// Files in the project model, scan targets or not
    pub files_loaded: usize,

    /// Unused methods in file, class, then method order
    pub findings: Vec<Finding>,

    pub stats: ScanStats,
}

impl AnalysisResult {
    pub fn has_findings(&self) -> bool {
        !self.findings.is_empty()
    }
}
