//! deadmethod-core: unused class method detection for TypeScript projects
//!
//! This library loads a TypeScript project the way its `tsconfig.json`
//! describes it, enumerates the methods of top-level classes, and reports
//! the public and protected instance methods that nothing references.
//!
//! # Features
//!
//! - **tsconfig-driven loading**: `files`, `include`, `exclude`, `extends`
//!   and `allowJs`, with JSONC comments and trailing commas
//! - **Import following**: relative imports pull in files outside the
//!   manifest's file set
//! - **Name-based resolution**: property access, destructuring, indexed
//!   access types and `typeof` queries count as usage
//! - **Inheritance aware**: overriding and overridden methods keep each
//!   other alive
//! - **Keep-going mode**: skip unparsable files instead of aborting
//!
//! # Quick Start
//!
//! Use the [`prelude`] module for convenient imports:
//!
//! ```rust,ignore
//! use deadmethod_core::prelude::*;
//!
//! let result = DeadMethod::new("/path/to/project").analyze()?;
//! print_plain(&result.findings)?;
//! ```
//!
//! # Module Organization
//!
//! - [`root`]: project and source directory location
//! - [`tsconfig`]: manifest reading and `extends` merging
//! - [`scan`]: deterministic file discovery and scan-target selection
//! - [`parse`]: oxc parsing into the owned [`model`]
//! - [`project`]: project loading and import following
//! - [`hierarchy`]: class inheritance graph
//! - [`resolve`]: method reference resolution
//! - [`detect`]: unused method detection
//! - [`report`]: plain text output
//! - [`builder`]: fluent builder API
//! - [`error`]: typed error handling

pub mod builder;
pub mod common;
pub mod config;
pub mod detect;
pub mod error;
pub mod hierarchy;
pub mod logging;
pub mod model;
pub mod parse;
pub mod prelude;
pub mod project;
pub mod report;
pub mod resolve;
pub mod root;
pub mod scan;
pub mod tsconfig;

// Common trait re-exports
pub use common::GraphTraversal;

// Re-export main types at crate root for convenience
pub use builder::{AnalysisResult, DeadMethod};
pub use config::ScanConfig;
pub use detect::{find_unused_methods, Finding, ScanResult, ScanStats};
pub use error::{DeadmethodError, DeadmethodResult, IoResultExt};
pub use logging::init_structured_logging;
pub use project::ProjectModel;
pub use report::{print_plain, write_plain};
pub use resolve::{MethodId, NameIndexResolver, ReferenceLocation, ReferenceResolver};
pub use root::{locate_project, ProjectLocation};
