//! Prelude module for convenient imports.
//!
//! Import commonly used types with a single line:
//!
//! ```rust,ignore
//! use deadmethod_core::prelude::*;
//! ```

// Core analysis types
pub use crate::error::{DeadmethodError, DeadmethodResult};
pub use crate::model::{ClassDecl, MethodDecl, ReferenceKind, SourceFile};

// Running a scan
pub use crate::builder::{AnalysisResult, DeadMethod};
pub use crate::config::ScanConfig;
pub use crate::detect::{find_unused_methods, Finding};
pub use crate::project::ProjectModel;
pub use crate::resolve::{NameIndexResolver, ReferenceResolver};

// Project location
pub use crate::root::{locate_project, ProjectLocation};

// Output
pub use crate::report::print_plain;
