//! Project root detection for TypeScript projects.
//!
//! The command-line path names either the project root (the directory that
//! holds `tsconfig.json`) or the source directory directly below it.

use std::path::{Path, PathBuf};

use path_clean::PathClean;

use crate::error::{DeadmethodError, DeadmethodResult, IoResultExt};

/// File name of the project manifest.
pub const MANIFEST_FILE: &str = "tsconfig.json";

/// Source directory used when the path argument is the project root.
pub const DEFAULT_SOURCE_DIR: &str = "src";

/// Where the project lives and what part of it gets scanned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLocation {
    /// Directory containing the manifest
    pub root: PathBuf,
    /// Directory whose files are scanned for unused methods
    pub source_dir: PathBuf,
    /// Full path to `tsconfig.json`
    pub manifest: PathBuf,
}

/// Make a path absolute against the current directory and drop `.`/`..`
/// components lexically. Symlinks are left alone.
pub fn absolutize(path: &Path) -> DeadmethodResult<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().with_path(path)?.join(path)
    };
    Ok(absolute.clean())
}

/// Locate the project for a path argument.
///
/// Search strategy:
/// 1. `P/tsconfig.json` exists → root = P, source dir = `P/src`
/// 2. `parent(P)/tsconfig.json` exists → root = parent(P), source dir = P
/// 3. Otherwise → [`DeadmethodError::ManifestNotFound`]
///
/// The resolved source directory must exist, else
/// [`DeadmethodError::SourceDirMissing`].
pub fn locate_project(path: &Path) -> DeadmethodResult<ProjectLocation> {
    let input = absolutize(path)?;

    let (root, source_dir) = if input.join(MANIFEST_FILE).exists() {
        (input.clone(), input.join(DEFAULT_SOURCE_DIR))
    } else if let Some(parent) = input
        .parent()
        .filter(|parent| parent.join(MANIFEST_FILE).exists())
    {
        (parent.to_path_buf(), input.clone())
    } else {
        return Err(DeadmethodError::manifest_not_found(input));
    };

    if !source_dir.is_dir() {
        return Err(DeadmethodError::source_dir_missing(source_dir));
    }

    let manifest = root.join(MANIFEST_FILE);
    tracing::debug!(
        root = %root.display(),
        source_dir = %source_dir.display(),
        "Located project"
    );

    Ok(ProjectLocation {
        root,
        source_dir,
        manifest,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::atomic::{AtomicU64, Ordering};

    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn create_temp_dir(name: &str) -> PathBuf {
        let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let temp_dir = std::env::temp_dir()
            .join("deadmethod_root_test")
            .join(format!("{}_{}_{}", name, std::process::id(), id));
        if temp_dir.exists() {
            fs::remove_dir_all(&temp_dir).ok();
        }
        fs::create_dir_all(&temp_dir).unwrap();
        temp_dir
    }

    #[test]
    fn test_locate_from_project_root() {
        let root = create_temp_dir("from_root");
        fs::write(root.join("tsconfig.json"), "{}").unwrap();
        fs::create_dir_all(root.join("src")).unwrap();

        let location = locate_project(&root).unwrap();
        assert_eq!(location.root, root);
        assert_eq!(location.source_dir, root.join("src"));
        assert_eq!(location.manifest, root.join("tsconfig.json"));
    }

    #[test]
    fn test_locate_from_source_dir() {
        let root = create_temp_dir("from_src");
        fs::write(root.join("tsconfig.json"), "{}").unwrap();
        let lib = root.join("lib");
        fs::create_dir_all(&lib).unwrap();

        let location = locate_project(&lib).unwrap();
        assert_eq!(location.root, root);
        assert_eq!(location.source_dir, lib);
    }

    #[test]
    fn test_manifest_not_found() {
        let root = create_temp_dir("no_manifest");
        let nested = root.join("a");
        fs::create_dir_all(&nested).unwrap();

        let err = locate_project(&nested).unwrap_err();
        assert!(matches!(err, DeadmethodError::ManifestNotFound { .. }));
    }

    #[test]
    fn test_missing_src_dir() {
        let root = create_temp_dir("no_src");
        fs::write(root.join("tsconfig.json"), "{}").unwrap();

        let err = locate_project(&root).unwrap_err();
        match err {
            DeadmethodError::SourceDirMissing { path } => assert_eq!(path, root.join("src")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_manifest_in_dir_wins_over_parent() {
        let root = create_temp_dir("nested_manifest");
        fs::write(root.join("tsconfig.json"), "{}").unwrap();
        let app = root.join("app");
        fs::create_dir_all(app.join("src")).unwrap();
        fs::write(app.join("tsconfig.json"), "{}").unwrap();

        let location = locate_project(&app).unwrap();
        assert_eq!(location.root, app);
        assert_eq!(location.source_dir, app.join("src"));
    }

    #[test]
    fn test_absolutize_cleans_dot_segments() {
        let root = create_temp_dir("clean");
        let messy = root.join("src").join("..").join(".").join("lib");
        assert_eq!(absolutize(&messy).unwrap(), root.join("lib"));
    }
}
