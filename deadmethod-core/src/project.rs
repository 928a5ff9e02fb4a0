//! Project loading.
//!
//! Reads the manifest, gathers its file set, parses every file and follows
//! relative imports to files the manifest does not list. The resulting
//! [`ProjectModel`] is built once and only read afterwards.

use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};

use path_clean::PathClean;

use crate::config::ScanConfig;
use crate::error::DeadmethodResult;
use crate::model::{SourceFile, DEFAULT_EXPORT};
use crate::parse::parse_file;
use crate::root::ProjectLocation;
use crate::scan::{gather_project_files, is_supported_source, ScanTargets};
use crate::tsconfig::TsConfig;

/// Suffixes tried, in order, for an extensionless relative specifier.
const TS_RESOLVE_SUFFIXES: &[&str] = &[".ts", ".tsx", ".d.ts", ".mts", ".cts"];
const JS_RESOLVE_SUFFIXES: &[&str] = &[".js", ".jsx", ".mjs", ".cjs"];

/// All parsed files of a project, in load order.
#[derive(Debug)]
pub struct ProjectModel {
    pub location: ProjectLocation,
    pub files: Vec<SourceFile>,
}

impl ProjectModel {
    /// Load every file the project's tsconfig describes, plus files reached
    /// through relative imports.
    ///
    /// With `config.keep_going`, files that fail to parse are logged and left
    /// out; otherwise the first parse failure is returned.
    pub fn load(location: &ProjectLocation, config: &ScanConfig) -> DeadmethodResult<Self> {
        let tsconfig = TsConfig::load_and_merge(&location.manifest)?;
        let targets = ScanTargets::new(&location.source_dir, config)?;
        let initial = gather_project_files(&tsconfig)?;

        let mut seen: HashSet<PathBuf> = initial.iter().cloned().collect();
        let mut queue: VecDeque<PathBuf> = initial.into_iter().collect();
        let mut files = Vec::new();
        let mut skipped = 0usize;

        while let Some(path) = queue.pop_front() {
            let mut file = match parse_file(&path) {
                Ok(file) => file,
                Err(e) if config.keep_going && e.is_recoverable() => {
                    tracing::warn!(file = %path.display(), error = %e, "Skipping file that failed to parse");
                    skipped += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };
            tracing::debug!(
                file = %path.display(),
                classes = file.classes.len(),
                references = file.member_refs.len(),
                "Parsed file"
            );

            if let Some(dir) = path.parent() {
                for request in &file.module_requests {
                    if let Some(resolved) = resolve_relative_import(dir, request, tsconfig.allow_js) {
                        if seen.insert(resolved.clone()) {
                            queue.push_back(resolved);
                        }
                    }
                }
            }

            file.is_scan_target = targets.is_target(&path);
            files.push(file);
        }

        link_default_imports(&mut files, tsconfig.allow_js);

        let model = Self {
            location: location.clone(),
            files,
        };
        tracing::info!(
            files = model.files.len(),
            targets = model.scan_targets().count(),
            skipped,
            "Loaded project"
        );
        Ok(model)
    }

    /// Files the method scanner walks, in load order.
    pub fn scan_targets(&self) -> impl Iterator<Item = (usize, &SourceFile)> {
        self.files
            .iter()
            .enumerate()
            .filter(|(_, file)| file.is_scan_target)
    }
}

/// Rewrite default import bindings of relative modules to the name the
/// target file default-exports, so `import Shape from "./base"` refers to
/// `export default class Base`.
fn link_default_imports(files: &mut [SourceFile], allow_js: bool) {
    let defaults: HashMap<PathBuf, String> = files
        .iter()
        .filter_map(|file| Some((file.path.clean(), file.default_export.clone()?)))
        .collect();
    if defaults.is_empty() {
        return;
    }

    for file in files.iter_mut() {
        let Some(dir) = file.path.parent().map(Path::to_path_buf) else {
            continue;
        };
        for binding in &mut file.imports {
            if binding.imported != DEFAULT_EXPORT {
                continue;
            }
            let target = resolve_relative_import(&dir, &binding.source, allow_js)
                .and_then(|resolved| defaults.get(&resolved));
            if let Some(name) = target {
                tracing::trace!(
                    file = %file.path.display(),
                    local = %binding.local,
                    class = %name,
                    "Linked default import"
                );
                binding.imported = name.clone();
            }
        }
    }
}

/// Resolve `./x` or `../x` from `dir` to a source file on disk.
///
/// Bare specifiers (packages) and anything inside `node_modules` are not
/// followed.
pub fn resolve_relative_import(dir: &Path, specifier: &str, allow_js: bool) -> Option<PathBuf> {
    if !(specifier.starts_with("./") || specifier.starts_with("../")) {
        return None;
    }
    let base = dir.join(specifier).clean();
    if base.components().any(|c| c.as_os_str() == "node_modules") {
        return None;
    }

    candidates(&base, allow_js)
        .into_iter()
        .find(|candidate| candidate.is_file() && is_supported_source(candidate, allow_js))
}

fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut name = base.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

fn candidates(base: &Path, allow_js: bool) -> Vec<PathBuf> {
    let mut out = vec![base.to_path_buf()];

    // ESM-style `./x.js` written for a `./x.ts` source
    let ext = base.extension().and_then(|e| e.to_str());
    let mapped: &[&str] = match ext {
        Some("js") | Some("jsx") => &[".ts", ".tsx", ".d.ts"],
        Some("mjs") => &[".mts", ".d.mts"],
        Some("cjs") => &[".cts", ".d.cts"],
        _ => &[],
    };
    let stem = base.with_extension("");
    out.extend(mapped.iter().map(|suffix| with_suffix(&stem, suffix)));

    let mut suffixes: Vec<&str> = TS_RESOLVE_SUFFIXES.to_vec();
    if allow_js {
        suffixes.extend_from_slice(JS_RESOLVE_SUFFIXES);
    }
    out.extend(suffixes.iter().map(|suffix| with_suffix(base, suffix)));
    out.extend(
        suffixes
            .iter()
            .map(|suffix| base.join(format!("index{suffix}"))),
    );
    out
}
