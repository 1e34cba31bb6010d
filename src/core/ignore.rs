use globset::{Glob, GlobSet, GlobSetBuilder};
use std::collections::HashSet;

/// Builds a `GlobSet` from a set of `.gitignore`-style patterns.
///
/// A trailing `/` marks a directory pattern and matches the directory plus
/// everything beneath it. Other patterns match a path component anywhere in
/// the tree. Blank lines and `#` comments are skipped; invalid globs are
/// logged and dropped.
pub fn build_globset_from_patterns(patterns: &HashSet<String>) -> GlobSet {
    let mut builder = GlobSetBuilder::new();

    for pattern in patterns {
        let trimmed_pattern = pattern.trim();
        if trimmed_pattern.is_empty() || trimmed_pattern.starts_with('#') {
            continue;
        }

        let globs = match trimmed_pattern.strip_suffix('/') {
            Some(dir_pattern) => vec![
                format!("**/{}", dir_pattern),
                format!("**/{}/**", dir_pattern),
            ],
            None => vec![format!("**/{}", trimmed_pattern)],
        };

        for glob in globs {
            match Glob::new(&glob) {
                Ok(glob) => {
                    builder.add(glob);
                }
                Err(e) => tracing::warn!("Ignoring invalid pattern {:?}: {}", trimmed_pattern, e),
            }
        }
    }

    builder.build().unwrap_or_else(|e| {
        tracing::error!("Failed to build glob set from patterns: {}", e);
        GlobSet::empty()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns(list: &[&str]) -> HashSet<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_directory_pattern_matches_contents() {
        let set = build_globset_from_patterns(&patterns(&[".git/"]));
        assert!(set.is_match("project/.git"));
        assert!(set.is_match("project/.git/objects/ab/cdef"));
        assert!(!set.is_match("project/src/git.txt"));
    }

    #[test]
    fn test_file_pattern_matches_anywhere() {
        let set = build_globset_from_patterns(&patterns(&["*.log", "# comment", "  "]));
        assert!(set.is_match("docs/deep/run.log"));
        assert!(!set.is_match("docs/run.txt"));
    }

    #[test]
    fn test_empty_patterns_match_nothing() {
        let set = build_globset_from_patterns(&HashSet::new());
        assert!(!set.is_match("anything.txt"));
    }
}
