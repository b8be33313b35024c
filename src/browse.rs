//! Directory listings for the file browser.
//!
//! Listing runs entirely on the HTTP worker thread; it touches the filesystem,
//! never the player. Access control happens here, before any `read_dir`: a
//! path the guard rejects is Forbidden no matter what it points at, and an
//! allowed path that cannot be read is NotFound without distinguishing why
//! (missing, unreadable, not a directory).

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{self, RemoteConfig};
use crate::guard::PathAccessGuard;

/// Classification of one listing row. Children that are neither directories
/// nor filter-matching files are omitted from listings entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Subdirectory, always listed, linked for further browsing.
    Dir,
    /// File matching the playable filter, linked for opening.
    Playable,
}

/// One row of a directory listing.
#[derive(Debug, Clone)]
pub struct PathEntry {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
}

/// One ancestor in the breadcrumb chain. Non-navigable crumbs fall outside
/// the guarded root and render as inert labels.
#[derive(Debug, Clone)]
pub struct Crumb {
    pub path: PathBuf,
    pub navigable: bool,
}

/// A successfully listed directory.
#[derive(Debug, Clone)]
pub struct Listing {
    /// The directory that was listed.
    pub path: PathBuf,
    /// Visible children, case-insensitively sorted by name.
    pub entries: Vec<PathEntry>,
    /// Ancestors from the filesystem root down to the immediate parent.
    pub breadcrumbs: Vec<Crumb>,
}

#[derive(Debug, thiserror::Error)]
pub enum BrowseError {
    #[error("path is outside the allowed root")]
    Forbidden,
    #[error("directory cannot be listed")]
    NotFound,
}

/// Lists directories under the guarded root.
#[derive(Debug, Clone)]
pub struct DirectoryBrowser {
    guard: PathAccessGuard,
    filter_pattern: String,
}

impl DirectoryBrowser {
    pub fn new(config: &RemoteConfig) -> Self {
        Self {
            guard: PathAccessGuard::new(config.path_restrict.clone()),
            filter_pattern: config.filter_pattern.clone(),
        }
    }

    /// The guard this browser checks paths against.
    pub fn guard(&self) -> &PathAccessGuard {
        &self.guard
    }

    /// List `path`, returning its visible children and breadcrumb chain.
    pub fn list(&self, path: &Path) -> Result<Listing, BrowseError> {
        let path_str = path.to_string_lossy();
        if !self.guard.is_allowed(&path_str) {
            log::info!("browse denied: {}", path.display());
            return Err(BrowseError::Forbidden);
        }

        let dir = fs::read_dir(path).map_err(|err| {
            log::debug!("browse failed: {}: {err}", path.display());
            BrowseError::NotFound
        })?;

        let mut entries = Vec::new();
        for child in dir.flatten() {
            let name = match child.file_name().into_string() {
                Ok(name) => name,
                Err(_) => continue, // non-UTF8 names are not linkable
            };
            if name.starts_with('.') {
                continue;
            }

            let full = path.join(&name);
            // metadata() follows symlinks, same as the classification a
            // player would apply when opening the target.
            let Ok(meta) = fs::metadata(&full) else {
                continue;
            };

            let kind = if meta.is_dir() {
                EntryKind::Dir
            } else if meta.is_file() && config::matches_filter(&name, &self.filter_pattern) {
                EntryKind::Playable
            } else {
                continue;
            };

            entries.push(PathEntry { name, path: full, kind });
        }
        entries.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

        Ok(Listing {
            breadcrumbs: self.breadcrumbs(path),
            path: path.to_path_buf(),
            entries,
        })
    }

    /// Ancestors of `path` from the filesystem root to its immediate parent,
    /// each marked navigable iff it passes the guard on its own.
    fn breadcrumbs(&self, path: &Path) -> Vec<Crumb> {
        let mut chain = Vec::new();
        let mut cursor = path;
        while let Some(parent) = cursor.parent() {
            chain.push(parent);
            cursor = parent;
        }
        chain.reverse();

        chain
            .into_iter()
            .map(|p| Crumb {
                navigable: self.guard.is_allowed(&p.to_string_lossy()),
                path: p.to_path_buf(),
            })
            .collect()
    }
}

/// Display name of a path: its final component, or `/` for the root itself.
pub fn base_name(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => "/".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    fn browser(root: &Path, filter: &str) -> DirectoryBrowser {
        DirectoryBrowser::new(&RemoteConfig {
            port: 0,
            default_media_path: root.to_string_lossy().into_owned(),
            filter_pattern: filter.to_string(),
            path_restrict: root.to_string_lossy().into_owned(),
        })
    }

    fn touch(path: &Path) {
        File::create(path).unwrap();
    }

    #[test]
    fn test_listing_filters_and_sorts() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        touch(&root.join("Zebra.avi"));
        touch(&root.join("apple.avi"));
        touch(&root.join("notes.txt"));
        touch(&root.join(".hidden.avi"));
        fs::create_dir(root.join("shows")).unwrap();

        let listing = browser(root, "*.avi").list(root).unwrap();

        let names: Vec<&str> = listing.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["apple.avi", "shows", "Zebra.avi"]);

        assert_eq!(listing.entries[0].kind, EntryKind::Playable);
        assert_eq!(listing.entries[1].kind, EntryKind::Dir);
    }

    #[test]
    fn test_non_matching_files_are_omitted_not_marked() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        touch(&root.join("a.txt"));
        touch(&root.join("b.mkv"));

        let listing = browser(root, "*.mkv").list(root).unwrap();
        assert_eq!(listing.entries.len(), 1);
        assert_eq!(listing.entries[0].name, "b.mkv");
    }

    #[test]
    fn test_directories_are_listed_regardless_of_filter() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir(root.join("not_a_movie")).unwrap();

        let listing = browser(root, "*.avi").list(root).unwrap();
        assert_eq!(listing.entries.len(), 1);
        assert_eq!(listing.entries[0].kind, EntryKind::Dir);
    }

    #[test]
    fn test_path_outside_root_is_forbidden() {
        let tmp = tempfile::tempdir().unwrap();
        let b = browser(&tmp.path().join("media"), "*");
        assert!(matches!(b.list(Path::new("/etc")), Err(BrowseError::Forbidden)));
    }

    #[test]
    fn test_missing_directory_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let b = browser(tmp.path(), "*");
        let missing = tmp.path().join("nope");
        assert!(matches!(b.list(&missing), Err(BrowseError::NotFound)));
    }

    #[test]
    fn test_plain_file_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("movie.avi");
        touch(&file);
        let b = browser(tmp.path(), "*");
        assert!(matches!(b.list(&file), Err(BrowseError::NotFound)));
    }

    #[test]
    fn test_breadcrumb_chain_root_to_parent() {
        let b = DirectoryBrowser::new(&RemoteConfig {
            port: 0,
            default_media_path: "/".into(),
            filter_pattern: "*".into(),
            path_restrict: "/".into(),
        });
        let crumbs = b.breadcrumbs(Path::new("/a/b/c"));
        let paths: Vec<&Path> = crumbs.iter().map(|c| c.path.as_path()).collect();
        assert_eq!(
            paths,
            vec![Path::new("/"), Path::new("/a"), Path::new("/a/b")]
        );
        assert!(crumbs.iter().all(|c| c.navigable));
    }

    #[test]
    fn test_breadcrumbs_outside_root_are_inert() {
        let b = DirectoryBrowser::new(&RemoteConfig {
            port: 0,
            default_media_path: "/home/media".into(),
            filter_pattern: "*".into(),
            path_restrict: "/home/media".into(),
        });
        let crumbs = b.breadcrumbs(Path::new("/home/media/shows/comedy"));
        let flags: Vec<bool> = crumbs.iter().map(|c| c.navigable).collect();
        // [/, /home, /home/media, /home/media/shows]
        assert_eq!(flags, vec![false, false, true, true]);
    }

    #[test]
    fn test_base_name_of_root_is_slash() {
        assert_eq!(base_name(Path::new("/")), "/");
        assert_eq!(base_name(Path::new("/a/b")), "b");
    }
}
