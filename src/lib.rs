//! couchctl - web remote control for a media player
//!
//! Re-exports all modules for use by binary targets and embedders. A host
//! application wires this up by creating an [`rpc`] channel, handing the
//! queue end to its event loop and starting a [`server::WebServer`] with the
//! handle end.

pub mod browse;
pub mod cli;
pub mod config;
pub mod guard;
pub mod pages;
pub mod player;
pub mod rpc;
pub mod server;

// Re-export the embedding surface
pub use browse::DirectoryBrowser;
pub use config::RemoteConfig;
pub use guard::PathAccessGuard;
pub use player::{PlayerControl, PlayerStatus, RemoteCommand, VOLUME_STEPS};
pub use rpc::{RpcError, RpcHandle, RpcQueue};
pub use server::{WebApp, WebServer};
