//! Server configuration and playable-file filtering.
//!
//! `RemoteConfig` carries the four values the web remote needs: the port to
//! bind, the browser's confinement root, the initial browse directory and the
//! glob filter for playable files. It is immutable for the lifetime of a
//! server instance; reconfiguration means tearing the server down and starting
//! a new instance with a fresh config.
//!
//! Paths are kept as strings because the access guard's contract is defined
//! over the literal path text (see `guard`).

use crate::cli::Args;

/// Configuration for one web remote instance.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// TCP port the HTTP server binds.
    pub port: u16,

    /// Initial and fallback directory for the file browser.
    pub default_media_path: String,

    /// Semicolon-separated glob list selecting playable files, e.g.
    /// `*.m??;*.avi;*.og?`.
    pub filter_pattern: String,

    /// Root of the filesystem subtree the browser is confined to.
    pub path_restrict: String,
}

impl RemoteConfig {
    /// Build a config from parsed command-line arguments.
    ///
    /// The media home falls back to the restriction root when not given, so
    /// the browser always starts somewhere it is allowed to look.
    pub fn from_args(args: &Args) -> Self {
        let path_restrict = args.root.clone();
        let default_media_path = args
            .media_dir
            .clone()
            .unwrap_or_else(|| path_restrict.clone());

        Self {
            port: args.port,
            default_media_path,
            filter_pattern: args.filter.clone(),
            path_restrict,
        }
    }
}

/// Check a file name against a semicolon-separated glob list.
///
/// Matches the behavior of the usual "media file filter" config strings:
/// `*.avi;*.mkv` matches either pattern. Empty fragments and fragments that
/// fail to parse as globs never match.
pub fn matches_filter(name: &str, pattern: &str) -> bool {
    pattern
        .split(';')
        .filter(|p| !p.is_empty())
        .any(|p| glob::Pattern::new(p).map(|g| g.matches(name)).unwrap_or(false))
}
