//! Deterministic file discovery.
//!
//! Two jobs:
//! - expand a resolved tsconfig into the project's file list on disk
//! - decide which loaded files are scan targets
//!
//! Walks are sorted so that in each directory files (by name) come before
//! subdirectories (by name), which keeps the finding order stable across
//! runs and platforms.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use walkdir::{DirEntry, WalkDir};

use crate::common::path_to_normalized_string;
use crate::config::ScanConfig;
use crate::error::{DeadmethodError, DeadmethodResult};
use crate::tsconfig::ResolvedTsConfig;

/// Directories never descended into.
const EXCLUDED_DIRS: &[&str] = &["node_modules", ".git"];

/// TypeScript source extensions (declaration files included).
const TS_EXTENSIONS: &[&str] = &["ts", "tsx", "mts", "cts"];

/// JavaScript source extensions, only with `allowJs`.
const JS_EXTENSIONS: &[&str] = &["js", "jsx", "mjs", "cjs"];

/// Checks if a file has an extension the project compiles.
pub fn is_supported_source(path: &Path, allow_js: bool) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            TS_EXTENSIONS.contains(&ext) || (allow_js && JS_EXTENSIONS.contains(&ext))
        })
}

#[inline]
fn has_wildcard(segment: &str) -> bool {
    segment.contains(['*', '?', '[', '{'])
}

/// Build a glob set where `*` does not cross `/`, as in tsconfig.
fn build_globset<'a>(patterns: impl IntoIterator<Item = &'a str>) -> DeadmethodResult<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| DeadmethodError::invalid_argument(format!("bad glob {pattern:?}: {e}")))?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| DeadmethodError::invalid_argument(e.to_string()))
}

/// Expand an include entry into a file glob.
///
/// An entry whose last segment has no wildcard and no extension, or that
/// names an existing directory, means "everything below it".
fn include_glob(pattern: &Path) -> String {
    let text = path_to_normalized_string(pattern);
    let last = text.rsplit('/').next().unwrap_or_default();
    let names_dir = !has_wildcard(last) && (!last.contains('.') || pattern.is_dir());
    if names_dir {
        format!("{}/**/*", text.trim_end_matches('/'))
    } else {
        text
    }
}

/// Directory a pattern's literal prefix points at; the walk starts there.
fn walk_base(pattern: &Path) -> PathBuf {
    let mut base = PathBuf::new();
    for component in pattern.components() {
        let segment = component.as_os_str().to_string_lossy();
        if has_wildcard(&segment) {
            return base;
        }
        base.push(component);
    }
    // Fully literal: the file's directory, or the directory itself
    if pattern.is_dir() {
        base
    } else {
        base.parent().map(Path::to_path_buf).unwrap_or(base)
    }
}

/// Files before directories, each group sorted by name.
fn files_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

/// Gathers the files a resolved tsconfig describes.
///
/// Order: explicit `files` first, then include matches in walk order.
/// Explicit files are kept even when an exclude pattern matches them.
/// Missing explicit files are logged and skipped.
pub fn gather_project_files(config: &ResolvedTsConfig) -> DeadmethodResult<Vec<PathBuf>> {
    let includes: Vec<String> = config.include.iter().map(|p| include_glob(p)).collect();
    let excludes: Vec<String> = config
        .exclude
        .iter()
        .map(|p| path_to_normalized_string(p).trim_end_matches('/').to_string())
        .flat_map(|p| [format!("{p}/**"), p])
        .collect();

    let include_set = build_globset(includes.iter().map(String::as_str))?;
    let exclude_set = build_globset(excludes.iter().map(String::as_str))?;

    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut files = Vec::new();

    for file in &config.files {
        if file.is_file() {
            if seen.insert(file.clone()) {
                files.push(file.clone());
            }
        } else {
            tracing::warn!(file = %file.display(), "File listed in tsconfig.json not found");
        }
    }

    let mut walked: Vec<PathBuf> = Vec::new();
    for pattern in &config.include {
        let base = walk_base(pattern);
        if !base.is_dir() || walked.iter().any(|done| base.starts_with(done)) {
            continue;
        }
        walked.push(base.clone());

        let walker = WalkDir::new(&base)
            .sort_by(files_first)
            .into_iter()
            // Prune whole subtrees before descending
            .filter_entry(|e| {
                if e.depth() == 0 || !e.file_type().is_dir() {
                    return true;
                }
                let skip_name = e
                    .file_name()
                    .to_str()
                    .is_some_and(|name| EXCLUDED_DIRS.contains(&name));
                !skip_name && !exclude_set.is_match(path_to_normalized_string(e.path()))
            });

        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| base.clone());
                let message = e.to_string();
                match e.into_io_error() {
                    Some(io) => DeadmethodError::io(path, io),
                    None => DeadmethodError::invalid_argument(message),
                }
            })?;
            let path = entry.path();
            if !entry.file_type().is_file() || !is_supported_source(path, config.allow_js) {
                continue;
            }
            let candidate = path_to_normalized_string(path);
            if include_set.is_match(&candidate)
                && !exclude_set.is_match(&candidate)
                && seen.insert(path.to_path_buf())
            {
                files.push(path.to_path_buf());
            }
        }
    }

    tracing::debug!(count = files.len(), "Gathered project files");
    Ok(files)
}

/// Selects scan targets among loaded files.
#[derive(Debug, Clone)]
pub struct ScanTargets {
    source_dir: PathBuf,
    include: GlobSet,
    exclude: GlobSet,
}

impl ScanTargets {
    /// Compile the scan config's globs, relative to `source_dir`.
    pub fn new(source_dir: &Path, config: &ScanConfig) -> DeadmethodResult<Self> {
        Ok(Self {
            source_dir: source_dir.to_path_buf(),
            include: build_globset(config.include.iter().map(String::as_str))?,
            exclude: build_globset(config.exclude.iter().map(String::as_str))?,
        })
    }

    /// Whether `path` is under the source directory, matches an include glob
    /// and matches no exclude glob.
    pub fn is_target(&self, path: &Path) -> bool {
        let Ok(relative) = path.strip_prefix(&self.source_dir) else {
            return false;
        };
        let relative = path_to_normalized_string(relative);
        self.include.is_match(&relative) && !self.exclude.is_match(&relative)
    }
}
