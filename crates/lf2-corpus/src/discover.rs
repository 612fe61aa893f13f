//! Locating containers on disk.

use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// File extension of LF2 containers, compared case-insensitively.
pub const LF2_EXTENSION: &str = "lf2";

/// Whether `path` carries the `.lf2` extension in any case.
pub fn is_lf2(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(LF2_EXTENSION))
}

/// Every `.lf2` file under `dir`, recursively, sorted by path.
///
/// A symlink to a regular file is listed under its own path. Symlinked
/// directories are not descended into, and dangling links are skipped.
/// Any unreadable directory fails the whole walk.
pub fn discover(dir: impl AsRef<Path>) -> io::Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for entry in WalkDir::new(dir).follow_links(false).sort_by_file_name() {
        let entry = entry?;
        let kind = entry.file_type();
        let is_file = kind.is_file() || (kind.is_symlink() && entry.path().is_file());
        if is_file && is_lf2(entry.path()) {
            found.push(entry.into_path());
        }
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn extension_is_case_insensitive() {
        assert!(is_lf2(Path::new("a/B.LF2")));
        assert!(is_lf2(Path::new("c.Lf2")));
        assert!(!is_lf2(Path::new("c.lf")));
        assert!(!is_lf2(Path::new("lf2")));
    }

    #[test]
    fn finds_nested_files_sorted() {
        let root = tempfile::tempdir().unwrap();
        let sub = root.path().join("visual");
        fs::create_dir(&sub).unwrap();
        for p in [
            root.path().join("z.lf2"),
            root.path().join("notes.txt"),
            sub.join("A.LF2"),
            root.path().join("b.lf2"),
        ] {
            fs::write(p, b"").unwrap();
        }

        let found = discover(root.path()).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.strip_prefix(root.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            [
                PathBuf::from("b.lf2"),
                PathBuf::from("visual/A.LF2"),
                PathBuf::from("z.lf2"),
            ]
        );
    }

    #[test]
    fn missing_dir_is_an_error() {
        let root = tempfile::tempdir().unwrap();
        assert!(discover(root.path().join("absent")).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_files_are_listed_and_linked_dirs_skipped() {
        use std::os::unix::fs::symlink;

        let root = tempfile::tempdir().unwrap();
        let outside = tempfile::tempdir().unwrap();
        let target = outside.path().join("real.lf2");
        fs::write(&target, b"").unwrap();
        fs::write(outside.path().join("inner.lf2"), b"").unwrap();

        fs::write(root.path().join("plain.lf2"), b"").unwrap();
        symlink(&target, root.path().join("link.lf2")).unwrap();
        symlink(outside.path(), root.path().join("linked_dir")).unwrap();
        symlink(root.path().join("gone"), root.path().join("dangling.lf2")).unwrap();

        let found = discover(root.path()).unwrap();
        assert_eq!(
            found,
            [root.path().join("link.lf2"), root.path().join("plain.lf2")]
        );
    }
}
