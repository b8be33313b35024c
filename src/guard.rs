//! Path confinement for the file browser.
//!
//! Every path that arrives over HTTP is checked against the configured
//! restriction root before the filesystem is touched. The check is purely
//! textual: prefix containment at a component boundary, plus rejection of any
//! `.` or `..` segment anywhere in the candidate. Symlinks are deliberately
//! not resolved; the guard defends against traversal in the request string,
//! not against links planted inside the allowed tree.

/// Validates candidate paths against a configured root.
#[derive(Debug, Clone)]
pub struct PathAccessGuard {
    root: String,
}

impl PathAccessGuard {
    pub fn new(root: impl Into<String>) -> Self {
        Self { root: root.into() }
    }

    /// Is `candidate` inside the allowed subtree?
    ///
    /// True iff `candidate` starts with the root, the match ends on a path
    /// separator boundary (so `/home/media2` is outside `/home/media`), and
    /// no segment of `candidate` is `.` or `..`. A root of `/` (or an empty
    /// root) allows every traversal-free path.
    pub fn is_allowed(&self, candidate: &str) -> bool {
        let root = self.root.as_str();

        if !candidate.starts_with(root) {
            return false;
        }
        if candidate.len() > root.len()
            && !root.is_empty()
            && !root.ends_with('/')
            && candidate.as_bytes()[root.len()] != b'/'
        {
            return false;
        }

        !candidate.split('/').any(|seg| seg == "." || seg == "..")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_itself_is_allowed() {
        let g = PathAccessGuard::new("/home/media");
        assert!(g.is_allowed("/home/media"));
    }

    #[test]
    fn test_children_are_allowed() {
        let g = PathAccessGuard::new("/home/media");
        assert!(g.is_allowed("/home/media/show"));
        assert!(g.is_allowed("/home/media/show/ep01.mkv"));
    }

    #[test]
    fn test_outside_root_is_rejected() {
        let g = PathAccessGuard::new("/home/media");
        assert!(!g.is_allowed("/etc"));
        assert!(!g.is_allowed("/home"));
        assert!(!g.is_allowed("/"));
    }

    #[test]
    fn test_sibling_with_shared_prefix_is_rejected() {
        // /home/media2 shares the string prefix but is a different directory
        let g = PathAccessGuard::new("/home/media");
        assert!(!g.is_allowed("/home/media2"));
        assert!(!g.is_allowed("/home/media2/file.avi"));
    }

    #[test]
    fn test_traversal_segments_are_rejected() {
        let g = PathAccessGuard::new("/home/media");
        assert!(!g.is_allowed("/home/media/../../etc/passwd"));
        assert!(!g.is_allowed("/home/media/./x"));
        assert!(!g.is_allowed("/home/media/.."));
    }

    #[test]
    fn test_slash_root_allows_everything() {
        // The prefix match degenerates here; make sure it does not turn into
        // a reject-everything or boundary-check bug.
        let g = PathAccessGuard::new("/");
        assert!(g.is_allowed("/"));
        assert!(g.is_allowed("/etc"));
        assert!(g.is_allowed("/home/media/show"));
        assert!(!g.is_allowed("/home/../etc"));
    }

    #[test]
    fn test_root_with_trailing_slash() {
        let g = PathAccessGuard::new("/home/media/");
        assert!(g.is_allowed("/home/media/"));
        assert!(g.is_allowed("/home/media/show"));
        assert!(!g.is_allowed("/home/other"));
    }

    #[test]
    fn test_empty_root_allows_everything() {
        let g = PathAccessGuard::new("");
        assert!(g.is_allowed("/anything/at/all"));
        assert!(!g.is_allowed("/anything/../at/all"));
    }
}
