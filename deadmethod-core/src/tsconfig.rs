//! tsconfig.json reader.
//!
//! Extracts the settings that decide which files belong to the project:
//! `files`, `include`, `exclude`, `compilerOptions.allowJs` and
//! `compilerOptions.outDir`, following `extends` chains. tsconfig files are
//! JSON with comments and trailing commas.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use path_clean::PathClean;
use serde::Deserialize;

use crate::error::{DeadmethodError, DeadmethodResult, IoResultExt};

/// Excludes applied when a config chain never sets `exclude`.
const DEFAULT_EXCLUDES: &[&str] = &["node_modules", "bower_components", "jspm_packages"];

/// Raw tsconfig.json contents (only the fields we read).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TsConfig {
    /// Base configuration(s) to inherit from
    pub extends: Option<Extends>,
    /// Explicit file list
    pub files: Option<Vec<String>>,
    /// Include globs
    pub include: Option<Vec<String>>,
    /// Exclude globs
    pub exclude: Option<Vec<String>>,
    /// Compiler options relevant to file selection
    pub compiler_options: Option<CompilerOptions>,
}

/// `extends` accepts one path or, since TypeScript 5.0, a list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Extends {
    One(String),
    Many(Vec<String>),
}

impl Extends {
    fn paths(&self) -> Vec<&str> {
        match self {
            Self::One(path) => vec![path.as_str()],
            Self::Many(paths) => paths.iter().map(String::as_str).collect(),
        }
    }
}

/// Compiler options that influence the project file set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    pub allow_js: Option<bool>,
    pub out_dir: Option<String>,
}

/// A config chain flattened into absolute paths and patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTsConfig {
    /// Directory of the top-level tsconfig.json
    pub config_dir: PathBuf,
    /// Explicit files, always part of the project
    pub files: Vec<PathBuf>,
    /// Absolute include patterns
    pub include: Vec<PathBuf>,
    /// Absolute exclude patterns
    pub exclude: Vec<PathBuf>,
    /// Whether JavaScript files belong to the project
    pub allow_js: bool,
}

/// Settings accumulated along an `extends` chain, already absolute.
#[derive(Debug, Default)]
struct Layer {
    files: Option<Vec<PathBuf>>,
    include: Option<Vec<PathBuf>>,
    exclude: Option<Vec<PathBuf>>,
    allow_js: Option<bool>,
    out_dir: Option<PathBuf>,
}

impl Layer {
    /// Settings present in `other` replace ours.
    fn overlay(&mut self, other: Layer) {
        if other.files.is_some() {
            self.files = other.files;
        }
        if other.include.is_some() {
            self.include = other.include;
        }
        if other.exclude.is_some() {
            self.exclude = other.exclude;
        }
        if other.allow_js.is_some() {
            self.allow_js = other.allow_js;
        }
        if other.out_dir.is_some() {
            self.out_dir = other.out_dir;
        }
    }
}

impl TsConfig {
    /// Parse a tsconfig.json file.
    pub fn from_file(path: &Path) -> DeadmethodResult<Self> {
        let content = fs::read_to_string(path).with_path(path)?;
        Self::parse_str(path, &content)
    }

    /// Parse tsconfig.json content; `path` is only used in error messages.
    pub fn parse_str(path: &Path, content: &str) -> DeadmethodResult<Self> {
        let content = strip_trailing_commas(&strip_json_comments(content));
        serde_json::from_str(&content).map_err(|e| DeadmethodError::config(path, e.to_string()))
    }

    /// Load a tsconfig.json with its `extends` chain and apply TypeScript's
    /// defaults for anything left unset.
    pub fn load_and_merge(path: &Path) -> DeadmethodResult<ResolvedTsConfig> {
        let mut visited = HashSet::new();
        let layer = Self::load_layer(path, &mut visited)?;
        let config_dir = path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf();

        let include = match (&layer.include, &layer.files) {
            (Some(include), _) => include.clone(),
            (None, Some(_)) => Vec::new(),
            (None, None) => vec![config_dir.join("**/*")],
        };

        let exclude = match layer.exclude {
            Some(exclude) => exclude,
            None => DEFAULT_EXCLUDES
                .iter()
                .map(|dir| config_dir.join(dir))
                .chain(layer.out_dir)
                .collect(),
        };

        Ok(ResolvedTsConfig {
            config_dir,
            files: layer.files.unwrap_or_default(),
            include,
            exclude,
            allow_js: layer.allow_js.unwrap_or(false),
        })
    }

    fn load_layer(path: &Path, visited: &mut HashSet<PathBuf>) -> DeadmethodResult<Layer> {
        let path = path.to_path_buf().clean();
        if !visited.insert(path.clone()) {
            return Err(DeadmethodError::config(
                &path,
                "Circular extends dependency detected",
            ));
        }

        let config = Self::from_file(&path)?;
        let config_dir = path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf();

        // 1. Inherit from base configs, later entries override earlier ones
        let mut layer = Layer::default();
        if let Some(extends) = &config.extends {
            for base in extends.paths() {
                match resolve_extends(&config_dir, base) {
                    Some(base_path) => layer.overlay(Self::load_layer(&base_path, visited)?),
                    None => tracing::warn!(
                        config = %path.display(),
                        extends = base,
                        "Base config not found, ignoring"
                    ),
                }
            }
        }

        // 2. Local settings resolve against this config's directory
        let absolute = |entries: &Vec<String>| -> Vec<PathBuf> {
            entries
                .iter()
                .map(|entry| config_dir.join(entry).clean())
                .collect()
        };
        let options = config.compiler_options.unwrap_or_default();
        layer.overlay(Layer {
            files: config.files.as_ref().map(absolute),
            include: config.include.as_ref().map(absolute),
            exclude: config.exclude.as_ref().map(absolute),
            allow_js: options.allow_js,
            out_dir: options.out_dir.map(|dir| config_dir.join(dir).clean()),
        });

        Ok(layer)
    }
}

/// Find the file an `extends` entry points to.
///
/// Relative and absolute entries resolve against the config directory;
/// anything else is looked up as a package in `node_modules` directories
/// from the config directory upwards.
fn resolve_extends(config_dir: &Path, entry: &str) -> Option<PathBuf> {
    let is_path = entry.starts_with("./") || entry.starts_with("../") || Path::new(entry).is_absolute();

    let candidates_for = |base: PathBuf| -> Vec<PathBuf> {
        let mut candidates = vec![base.clone()];
        if base.extension().is_none_or(|ext| ext != "json") {
            let mut with_json = base.clone().into_os_string();
            with_json.push(".json");
            candidates.push(PathBuf::from(with_json));
        }
        candidates.push(base.join("tsconfig.json"));
        candidates
    };

    if is_path {
        return candidates_for(config_dir.join(entry))
            .into_iter()
            .find(|candidate| candidate.is_file());
    }

    config_dir.ancestors().find_map(|dir| {
        candidates_for(dir.join("node_modules").join(entry))
            .into_iter()
            .find(|candidate| candidate.is_file())
    })
}

/// Strip `//` and `/* */` comments outside of string literals.
pub(crate) fn strip_json_comments(content: &str) -> String {
    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();
    let mut in_string = false;
    let mut escape_next = false;

    while let Some(ch) = chars.next() {
        if in_string {
            result.push(ch);
            if escape_next {
                escape_next = false;
            } else if ch == '\\' {
                escape_next = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match (ch, chars.peek()) {
            ('"', _) => {
                in_string = true;
                result.push(ch);
            }
            ('/', Some('/')) => {
                // Line comment: drop up to, but not including, the newline
                while let Some(&next) = chars.peek() {
                    if next == '\n' {
                        break;
                    }
                    chars.next();
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
            }
            _ => result.push(ch),
        }
    }

    result
}

/// Drop commas that directly precede a closing `}` or `]`.
pub(crate) fn strip_trailing_commas(content: &str) -> String {
    let chars: Vec<char> = content.chars().collect();
    let mut result = String::with_capacity(content.len());
    let mut in_string = false;
    let mut escape_next = false;

    for (i, &ch) in chars.iter().enumerate() {
        if in_string {
            if escape_next {
                escape_next = false;
            } else if ch == '\\' {
                escape_next = true;
            } else if ch == '"' {
                in_string = false;
            }
            result.push(ch);
            continue;
        }

        if ch == '"' {
            in_string = true;
        } else if ch == ',' {
            let next = chars[i + 1..].iter().find(|c| !c.is_whitespace());
            if matches!(next, Some('}') | Some(']')) {
                continue;
            }
        }
        result.push(ch);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn create_temp_dir(name: &str) -> PathBuf {
        let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir()
            .join("deadmethod_tsconfig_test")
            .join(format!("{}_{}_{}", name, std::process::id(), id));
        if dir.exists() {
            fs::remove_dir_all(&dir).ok();
        }
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn create_file(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_parse_jsonc() {
        let content = r#"{
            // project layout
            "include": ["src", /* generated */ "types",],
            "compilerOptions": {
                "outDir": "dist", // build output
                "allowJs": true,
            },
        }"#;
        let config = TsConfig::parse_str(Path::new("tsconfig.json"), content).unwrap();
        assert_eq!(
            config.include,
            Some(vec!["src".to_string(), "types".to_string()])
        );
        let options = config.compiler_options.unwrap();
        assert_eq!(options.out_dir.as_deref(), Some("dist"));
        assert_eq!(options.allow_js, Some(true));
    }

    #[test]
    fn test_comment_markers_inside_strings_survive() {
        let content = r#"{ "include": ["src/**/*", "a//b", "c/*d*/e"] }"#;
        let config = TsConfig::parse_str(Path::new("tsconfig.json"), content).unwrap();
        assert_eq!(
            config.include.unwrap(),
            vec!["src/**/*", "a//b", "c/*d*/e"]
        );
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let err = TsConfig::parse_str(Path::new("/p/tsconfig.json"), "{ include: }").unwrap_err();
        assert!(matches!(err, DeadmethodError::Config { .. }));
    }

    #[test]
    fn test_defaults_without_include_or_files() {
        let root = create_temp_dir("defaults");
        create_file(
            &root.join("tsconfig.json"),
            r#"{ "compilerOptions": { "outDir": "./build" } }"#,
        );

        let resolved = TsConfig::load_and_merge(&root.join("tsconfig.json")).unwrap();
        assert_eq!(resolved.include, vec![root.join("**/*")]);
        assert!(resolved.exclude.contains(&root.join("node_modules")));
        assert!(resolved.exclude.contains(&root.join("build")));
        assert!(resolved.files.is_empty());
        assert!(!resolved.allow_js);
    }

    #[test]
    fn test_files_only_means_no_include() {
        let root = create_temp_dir("files_only");
        create_file(&root.join("tsconfig.json"), r#"{ "files": ["main.ts"] }"#);

        let resolved = TsConfig::load_and_merge(&root.join("tsconfig.json")).unwrap();
        assert!(resolved.include.is_empty());
        assert_eq!(resolved.files, vec![root.join("main.ts")]);
    }

    #[test]
    fn test_extends_inherits_relative_to_base() {
        let root = create_temp_dir("extends");
        create_file(
            &root.join("config/base.json"),
            r#"{ "include": ["shared"], "compilerOptions": { "allowJs": true } }"#,
        );
        create_file(
            &root.join("app/tsconfig.json"),
            r#"{ "extends": "../config/base", "exclude": ["legacy"] }"#,
        );

        let resolved = TsConfig::load_and_merge(&root.join("app/tsconfig.json")).unwrap();
        assert_eq!(resolved.include, vec![root.join("config/shared")]);
        assert_eq!(resolved.exclude, vec![root.join("app/legacy")]);
        assert!(resolved.allow_js);
    }

    #[test]
    fn test_extends_array_later_wins() {
        let root = create_temp_dir("extends_array");
        create_file(&root.join("a.json"), r#"{ "include": ["a"] }"#);
        create_file(&root.join("b.json"), r#"{ "include": ["b"] }"#);
        create_file(
            &root.join("tsconfig.json"),
            r#"{ "extends": ["./a.json", "./b.json"] }"#,
        );

        let resolved = TsConfig::load_and_merge(&root.join("tsconfig.json")).unwrap();
        assert_eq!(resolved.include, vec![root.join("b")]);
    }

    #[test]
    fn test_extends_package_in_node_modules() {
        let root = create_temp_dir("extends_pkg");
        create_file(
            &root.join("node_modules/@tsconfig/base/tsconfig.json"),
            r#"{ "compilerOptions": { "allowJs": true } }"#,
        );
        create_file(
            &root.join("tsconfig.json"),
            r#"{ "extends": "@tsconfig/base" }"#,
        );

        let resolved = TsConfig::load_and_merge(&root.join("tsconfig.json")).unwrap();
        assert!(resolved.allow_js);
    }

    #[test]
    fn test_missing_base_is_ignored() {
        let root = create_temp_dir("missing_base");
        create_file(
            &root.join("tsconfig.json"),
            r#"{ "extends": "./nope.json", "include": ["src"] }"#,
        );

        let resolved = TsConfig::load_and_merge(&root.join("tsconfig.json")).unwrap();
        assert_eq!(resolved.include, vec![root.join("src")]);
    }

    #[test]
    fn test_circular_extends() {
        let root = create_temp_dir("circular");
        create_file(&root.join("a.json"), r#"{ "extends": "./b.json" }"#);
        create_file(&root.join("b.json"), r#"{ "extends": "./a.json" }"#);

        let err = TsConfig::load_and_merge(&root.join("a.json")).unwrap_err();
        assert!(err.to_string().contains("Circular"));
    }
}
