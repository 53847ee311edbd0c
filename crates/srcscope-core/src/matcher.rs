//! Canonical path comparison and ancestor containment.
//!
//! Every comparison in srcscope happens on canonical paths: absolute,
//! symlink-resolved and free of `.`/`..` components. Paths that do not
//! exist (yet, or anymore) still get a stable canonical form so that a
//! deleted file can be recognised as belonging to a project directory.

use std::path::{Component, Path, PathBuf};

use crate::filter::PathFilter;

/// Canonicalize `path`, tolerating paths that do not exist.
///
/// Existing paths go through [`std::fs::canonicalize`]. For a missing
/// path the deepest existing ancestor, taken as written, is canonicalized
/// and the remaining components are applied on top of it one by one, so
/// a `..` after a symlink climbs out of the link target. A failed stat is
/// treated as "does not exist", so this never fails.
pub fn canonicalize_lossy(path: &Path) -> PathBuf {
    if let Ok(canonical) = std::fs::canonicalize(path) {
        return canonical;
    }

    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path.to_path_buf(),
        }
    };

    let components: Vec<Component<'_>> = absolute.components().collect();
    for existing in (1..components.len()).rev() {
        let ancestor: PathBuf = components[..existing].iter().collect();
        if let Ok(mut resolved) = std::fs::canonicalize(&ancestor) {
            for component in &components[existing..] {
                match component {
                    Component::CurDir => {}
                    Component::ParentDir => {
                        resolved.pop();
                    }
                    other => resolved.push(other.as_os_str()),
                }
            }
            return resolved;
        }
    }

    normalize_lexically(&absolute)
}

/// Resolve `.` and `..` without touching the filesystem.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the root stays at the root.
                if !matches!(
                    out.components().next_back(),
                    None | Some(Component::RootDir) | Some(Component::Prefix(_))
                ) {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Return `true` if `candidate` is `root` itself or lies somewhere below it.
///
/// Both sides are canonicalized first. Matching is per component, so
/// `/proj` contains `/proj/src/a.cpp` but not `/project/a.cpp`.
pub fn contains(root: &Path, candidate: &Path) -> bool {
    contains_canonical(&canonicalize_lossy(root), &canonicalize_lossy(candidate))
}

/// Same as [`contains`] for paths that are already canonical.
pub fn contains_canonical(root: &Path, candidate: &Path) -> bool {
    candidate.starts_with(root)
}

/// Return `true` if at least one filter matches `candidate`.
///
/// Filters carry no precedence; evaluation stops at the first match.
pub fn matches_any(filters: &[PathFilter], candidate: &Path) -> bool {
    filters.iter().any(|filter| filter.is_match(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_normalize_lexically_resolves_dots() {
        assert_eq!(
            normalize_lexically(Path::new("/proj/./src/../include/a.h")),
            PathBuf::from("/proj/include/a.h")
        );
        assert_eq!(normalize_lexically(Path::new("/../a")), PathBuf::from("/a"));
    }

    #[test]
    fn test_contains_is_reflexive() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.cpp");
        fs::write(&file, "").unwrap();

        assert!(contains(&file, &file));
        assert!(contains(temp.path(), temp.path()));
    }

    #[test]
    fn test_contains_nested_descendants() {
        let temp = TempDir::new().unwrap();
        let deep = temp.path().join("src/detail/impl");
        fs::create_dir_all(&deep).unwrap();
        fs::write(deep.join("x.cpp"), "").unwrap();

        assert!(contains(temp.path(), &deep.join("x.cpp")));
        assert!(contains(&temp.path().join("src"), &deep));
        assert!(!contains(&deep, temp.path()));
    }

    #[test]
    fn test_contains_requires_component_boundary() {
        assert!(contains_canonical(
            Path::new("/proj"),
            Path::new("/proj/a.cpp")
        ));
        assert!(!contains_canonical(
            Path::new("/proj"),
            Path::new("/project/a.cpp")
        ));
        assert!(!contains_canonical(
            Path::new("/proj/a.cpp"),
            Path::new("/proj/a.cpp.bak")
        ));
    }

    #[test]
    fn test_contains_missing_candidate_under_existing_root() {
        let temp = TempDir::new().unwrap();

        // Deleted files still resolve beneath their canonical parent.
        let gone = temp.path().join("removed/old.cpp");
        assert!(contains(temp.path(), &gone));
        assert!(canonicalize_lossy(&gone).ends_with("removed/old.cpp"));
    }

    #[cfg(unix)]
    #[test]
    fn test_contains_resolves_symlinks() {
        let temp = TempDir::new().unwrap();
        let real = temp.path().join("real");
        fs::create_dir_all(&real).unwrap();
        fs::write(real.join("a.cpp"), "").unwrap();
        let link = temp.path().join("link");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        assert!(contains(&real, &link.join("a.cpp")));
        assert_eq!(
            canonicalize_lossy(&link.join("a.cpp")),
            canonicalize_lossy(&real.join("a.cpp"))
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_missing_path_resolves_parent_dir_after_symlink() {
        let temp = TempDir::new().unwrap();
        let root = fs::canonicalize(temp.path()).unwrap();
        fs::create_dir_all(root.join("real/sub")).unwrap();
        fs::write(root.join("real/here.h"), "").unwrap();
        std::os::unix::fs::symlink(root.join("real/sub"), root.join("link")).unwrap();

        // `link/..` is `real`, for existing and missing files alike.
        assert_eq!(
            canonicalize_lossy(&root.join("link/../here.h")),
            root.join("real/here.h")
        );
        assert_eq!(
            canonicalize_lossy(&root.join("link/../gone.h")),
            root.join("real/gone.h")
        );
        assert!(contains(&root.join("real"), &root.join("link/../gone.h")));
    }

    #[test]
    fn test_missing_tail_with_dots_resolved_against_existing_ancestor() {
        let temp = TempDir::new().unwrap();
        let root = fs::canonicalize(temp.path()).unwrap();

        assert_eq!(
            canonicalize_lossy(&root.join("missing/./deeper/../x.h")),
            root.join("missing/x.h")
        );
    }

    #[test]
    fn test_matches_any_short_circuits_on_any_match() {
        let filters = vec![
            PathFilter::new("**/third_party/**").unwrap(),
            PathFilter::new("*/b.cpp").unwrap(),
        ];

        assert!(matches_any(&filters, Path::new("/proj/b.cpp")));
        assert!(matches_any(&filters, Path::new("/proj/third_party/z.cpp")));
        assert!(!matches_any(&filters, Path::new("/proj/a.cpp")));
        assert!(!matches_any(&[], Path::new("/proj/a.cpp")));
    }

    #[test]
    fn test_matches_any_order_independent() {
        let forward = vec![
            PathFilter::new("*.gen.cpp").unwrap(),
            PathFilter::new("/proj/build/**").unwrap(),
        ];
        let reversed: Vec<_> = forward.iter().rev().cloned().collect();

        for candidate in [
            "/proj/a.gen.cpp",
            "/proj/build/x.cpp",
            "/proj/src/main.cpp",
        ] {
            assert_eq!(
                matches_any(&forward, Path::new(candidate)),
                matches_any(&reversed, Path::new(candidate)),
                "filter order changed result for {candidate}"
            );
        }
    }
}
