//! HTTP server lifecycle.
//!
//! Owns the listening socket and the serving thread. Startup binds eagerly so
//! a bad port fails in the caller, not later in a detached thread; shutdown
//! is synchronous and only returns once the serving thread has exited and the
//! socket is closed, so the same port can be rebound immediately (the restart
//! path on reconfiguration depends on this).
//!
//! Request logging uses numeric peer addresses only; no reverse DNS happens
//! anywhere on the request path.

use std::net::SocketAddr;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::JoinHandle;

use anyhow::{anyhow, Result};
use rouille::Server;

use crate::player::PlayerControl;
use crate::server::WebApp;

/// A running web remote server.
pub struct WebServer {
    addr: SocketAddr,
    stop_tx: Sender<()>,
    join: JoinHandle<()>,
}

impl WebServer {
    /// Bind `port` on all interfaces and start serving `app` on a dedicated
    /// thread. Port 0 binds an ephemeral port; see [`WebServer::addr`].
    pub fn start<P>(port: u16, app: WebApp<P>) -> Result<Self>
    where
        P: PlayerControl + 'static,
    {
        let app = Arc::new(app);
        let server = Server::new(("0.0.0.0", port), move |request| app.handle(request))
            .map_err(|err| anyhow!("failed to bind web remote on port {port}: {err}"))?;

        let addr = server.server_addr();
        log::info!("web remote listening on http://{addr}/");

        let (join, stop_tx) = server.stoppable();
        Ok(Self { addr, stop_tx, join })
    }

    /// The actually bound address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Synchronous shutdown: signal the serving thread and wait for it to
    /// exit. On return the socket is released.
    pub fn stop(self) {
        // Send can only fail if the serving thread is already gone.
        let _ = self.stop_tx.send(());
        if self.join.join().is_err() {
            log::error!("web remote serving thread panicked during shutdown");
        } else {
            log::info!("web remote stopped");
        }
    }
}
