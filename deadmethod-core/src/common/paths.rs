//! Path string normalization.

use std::path::Path;

/// Normalize a path string to use forward slashes consistently.
///
/// Paths are used as report output and as glob match candidates, both of
/// which expect `/` separators on every platform.
#[inline]
pub fn normalize_path_string(path: &str) -> String {
    path.replace('\\', "/")
}

/// Convert a Path to a normalized string (forward slashes).
#[inline]
pub fn path_to_normalized_string(path: &Path) -> String {
    normalize_path_string(&path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backslashes_become_slashes() {
        assert_eq!(normalize_path_string(r"C:\work\src\a.ts"), "C:/work/src/a.ts");
    }

    #[test]
    fn test_unix_path_unchanged() {
        assert_eq!(
            path_to_normalized_string(Path::new("/work/src/a.ts")),
            "/work/src/a.ts"
        );
    }
}
