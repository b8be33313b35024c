//! Request routing and action handlers.
//!
//! `WebApp` is the whole HTTP surface: a fixed table of exact paths, each
//! mapped to a handler. Handlers read query-string parameters only (no
//! bodies), cross into the event-loop thread through [`RpcHandle`] for every
//! player touch, and answer mutations with a redirect to the dashboard so a
//! page reload never repeats an action.
//!
//! Status-code conventions follow the original interface this reimplements:
//! a missing/invalid `rel` or `path` parameter is 404, a missing/invalid
//! `level` is 400. Inconsistent, but kept for compatibility with existing
//! bookmarks and frontends.

use std::path::PathBuf;
use std::process::Command;
use std::sync::Mutex;

use rouille::{router, Request, Response};

use crate::browse::{BrowseError, DirectoryBrowser};
use crate::config::RemoteConfig;
use crate::pages;
use crate::player::{PlayerControl, PlayerStatus, RemoteCommand, VOLUME_STEPS};
use crate::rpc::RpcHandle;

fn not_found() -> Response {
    Response::text("Not found").with_status_code(404)
}

fn forbidden() -> Response {
    Response::text("Forbidden").with_status_code(403)
}

fn bad_request() -> Response {
    Response::text("Bad request").with_status_code(400)
}

fn dash_redirect() -> Response {
    Response::redirect_302("/")
}

/// The web application: router, handlers and per-instance session state.
pub struct WebApp<P> {
    config: RemoteConfig,
    rpc: RpcHandle<P>,
    browser: DirectoryBrowser,
    /// Most recently browsed directory; fallback when `/browse` has no
    /// `path`. Last writer wins under concurrent requests, which only ever
    /// affects which directory a parameterless browse lands in.
    last_path: Mutex<PathBuf>,
}

/// Lock the session-state mutex, ignoring poisoning. The value is a plain
/// path that stays valid across a panicked writer, and a convenience default
/// must never turn later requests into 500s.
fn lock_ignore_poison<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl<P: PlayerControl + 'static> WebApp<P> {
    pub fn new(config: RemoteConfig, rpc: RpcHandle<P>) -> Self {
        Self {
            browser: DirectoryBrowser::new(&config),
            last_path: Mutex::new(PathBuf::from(&config.default_media_path)),
            rpc,
            config,
        }
    }

    /// Dispatch one request. Exact path match, query string ignored for
    /// routing; anything unknown is a plain-text 404.
    pub fn handle(&self, request: &Request) -> Response {
        log::debug!(
            "{} {} from {}",
            request.method(),
            request.raw_url(),
            request.remote_addr()
        );

        router!(request,
            (GET) ["/"] => { self.dashboard() },
            (GET) ["/about"] => { Response::html(pages::about_page()) },
            (GET) ["/style.css"] => {
                Response::from_data("text/css", pages::STYLE_CSS.as_bytes())
            },
            (GET) ["/browse"] => { self.browse(request) },
            (GET) ["/action_play"] => { self.invoke_and_redirect(|p| p.play()) },
            (GET) ["/action_pause"] => { self.invoke_and_redirect(|p| p.pause()) },
            (GET) ["/action_fs"] => { self.invoke_and_redirect(|p| p.toggle_fullscreen()) },
            (GET) ["/action_seek"] => { self.action_seek(request) },
            (GET) ["/action_volume"] => { self.action_volume(request) },
            (GET) ["/action_open"] => { self.action_open(request) },
            (GET) ["/action_ss_reset"] => { self.action_ss_reset() },
            _ => not_found()
        )
    }

    /// Map an rpc failure to a 500. The player raised on its own thread and
    /// the error crossed back to us; there is nothing to retry per-request.
    fn internal_error(err: impl std::fmt::Display) -> Response {
        log::error!("player call failed: {err}");
        Response::text("Internal error").with_status_code(500)
    }

    /// Run one parameterless player mutation and bounce back to `/`.
    fn invoke_and_redirect<F>(&self, f: F) -> Response
    where
        F: FnOnce(&mut P) -> anyhow::Result<()> + Send + 'static,
    {
        match self.rpc.call(f) {
            Ok(()) => dash_redirect(),
            Err(err) => Self::internal_error(err),
        }
    }

    /// Path: `/` — render the dashboard from one player-state snapshot.
    fn dashboard(&self) -> Response {
        let status = self.rpc.call(|p| {
            Ok(PlayerStatus {
                mrl: p.current_mrl(),
                paused: p.is_paused(),
                volume: p.volume(),
            })
        });
        match status {
            Ok(status) => Response::html(pages::dashboard(&status))
                .with_additional_header("Cache-Control", "no-cache"),
            Err(err) => Self::internal_error(err),
        }
    }

    /// Path: `/browse?path=<dir>` — list a directory under the guarded root.
    ///
    /// Without a `path` (or with an empty one) the listing resumes at the
    /// last successfully browsed directory.
    fn browse(&self, request: &Request) -> Response {
        let path = match request.get_param("path").filter(|p| !p.is_empty()) {
            Some(p) => PathBuf::from(p),
            None => lock_ignore_poison(&self.last_path).clone(),
        };

        match self.browser.list(&path) {
            Ok(listing) => {
                *lock_ignore_poison(&self.last_path) = listing.path.clone();
                Response::html(pages::browse_page(&listing, &self.config.default_media_path))
                    .with_additional_header("Cache-Control", "no-cache")
            }
            Err(BrowseError::Forbidden) => forbidden(),
            Err(BrowseError::NotFound) => not_found(),
        }
    }

    /// Path: `/action_seek?rel=<seconds>` — relative seek, seconds to ms.
    fn action_seek(&self, request: &Request) -> Response {
        let rel: f64 = match request.get_param("rel").and_then(|v| v.parse().ok()) {
            Some(v) => v,
            None => return not_found(),
        };
        self.invoke_and_redirect(move |p| p.seek_relative_ms(rel * 1000.0))
    }

    /// Path: `/action_volume?level=<n>` — stepped volume, clamped to range.
    fn action_volume(&self, request: &Request) -> Response {
        let level: i64 = match request.get_param("level").and_then(|v| v.parse().ok()) {
            Some(v) => v,
            None => return bad_request(),
        };
        let level = level.clamp(0, i64::from(VOLUME_STEPS));
        let fraction = level as f64 / f64::from(VOLUME_STEPS);
        self.invoke_and_redirect(move |p| p.set_volume(fraction))
    }

    /// Path: `/action_open?path=<file>` — replace current media, then play.
    fn action_open(&self, request: &Request) -> Response {
        let path = match request.get_param("path") {
            Some(p) => p,
            None => return not_found(),
        };
        if !self.browser.guard().is_allowed(&path) {
            log::info!("open denied: {path}");
            return forbidden();
        }

        let mrl = format!("file://{path}");
        // Two sequential calls; the first blocks until done, so the player
        // sees Replace strictly before Play.
        let replace = {
            let mrl = mrl.clone();
            self.rpc.call(move |p| p.remote_command(RemoteCommand::Replace, &mrl))
        };
        if let Err(err) = replace {
            return Self::internal_error(err);
        }
        self.invoke_and_redirect(move |p| p.remote_command(RemoteCommand::Play, &mrl))
    }

    /// Path: `/action_ss_reset` — best-effort screensaver/DPMS wake.
    ///
    /// Purely environmental; no player involvement and failures are never
    /// surfaced to the browser.
    fn action_ss_reset(&self) -> Response {
        for cmd in [
            &["xset", "dpms", "force", "on"][..],
            &["xdg-screensaver", "reset"][..],
        ] {
            match Command::new(cmd[0]).args(&cmd[1..]).status() {
                Ok(status) if status.success() => {}
                Ok(status) => log::debug!("{} exited with {status}", cmd[0]),
                Err(err) => log::debug!("{} failed to spawn: {err}", cmd[0]),
            }
        }
        dash_redirect()
    }
}
