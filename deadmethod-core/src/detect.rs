//! Unused method detection.

use std::fmt;
use std::path::PathBuf;

use crate::common::path_to_normalized_string;
use crate::error::DeadmethodResult;
use crate::project::ProjectModel;
use crate::resolve::{MethodId, ReferenceResolver};

/// An eligible method with no reference besides its own declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub class_name: String,
    pub method_name: String,
    /// Absolute path of the declaring file
    pub file: PathBuf,
    /// 1-based line of the method name
    pub line: usize,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{} in {}:{}",
            self.class_name,
            self.method_name,
            path_to_normalized_string(&self.file),
            self.line
        )
    }
}

/// Counters from one scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub files_scanned: usize,
    pub classes_scanned: usize,
    pub anonymous_classes: usize,
    pub methods_considered: usize,
    /// Private, static and constructors
    pub methods_skipped: usize,
    /// Resolution failed and keep-going was on
    pub methods_unresolved: usize,
    pub findings: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    pub findings: Vec<Finding>,
    pub stats: ScanStats,
}

/// Walk every class of every scan target and collect the eligible methods
/// the resolver finds no usage for.
///
/// Findings come in file, class, then method order. A resolution error is
/// returned unless `keep_going` is set, in which case the method is logged
/// and skipped.
pub fn find_unused_methods<R>(
    model: &ProjectModel,
    resolver: &R,
    keep_going: bool,
) -> DeadmethodResult<ScanResult>
where
    R: ReferenceResolver + ?Sized,
{
    let mut result = ScanResult::default();

    for (file_idx, file) in model.scan_targets() {
        result.stats.files_scanned += 1;

        for (class_idx, class) in file.classes.iter().enumerate() {
            let Some(class_name) = &class.name else {
                tracing::debug!(
                    file = %file.path.display(),
                    line = class.line,
                    "Skipping anonymous class"
                );
                result.stats.anonymous_classes += 1;
                continue;
            };
            result.stats.classes_scanned += 1;

            for (method_idx, method) in class.methods.iter().enumerate() {
                if !method.is_eligible() {
                    result.stats.methods_skipped += 1;
                    continue;
                }
                result.stats.methods_considered += 1;

                let id = MethodId {
                    file: file_idx,
                    class: class_idx,
                    method: method_idx,
                };
                let references = match resolver.find_references(id) {
                    Ok(references) => references,
                    Err(e) if keep_going && e.is_recoverable() => {
                        tracing::warn!(
                            class = %class_name,
                            method = %method.name,
                            error = %e,
                            "Skipping method that failed to resolve"
                        );
                        result.stats.methods_unresolved += 1;
                        continue;
                    }
                    Err(e) => return Err(e),
                };

                if references.iter().all(|r| r.is_declaration()) {
                    result.findings.push(Finding {
                        class_name: class_name.clone(),
                        method_name: method.name.clone(),
                        file: file.path.clone(),
                        line: method.line,
                    });
                }
            }
        }
    }

    result.stats.findings = result.findings.len();
    tracing::info!(
        files = result.stats.files_scanned,
        classes = result.stats.classes_scanned,
        methods = result.stats.methods_considered,
        skipped = result.stats.methods_skipped,
        unresolved = result.stats.methods_unresolved,
        findings = result.stats.findings,
        "Scan complete"
    );

    Ok(result)
}
