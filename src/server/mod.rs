//! Web remote HTTP server.
//!
//! # Purpose
//!
//! Serves the remote-control dashboard and file browser and translates
//! browser requests into player commands executed on the event-loop thread.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────┐      rpc::RpcHandle      ┌──────────────────────┐
//! │  HTTP server thread(s)  │ ── blocking closure ──▶  │  Event-loop thread   │
//! │  (rouille, sync)        │                          │  (owns the player)   │
//! │                         │                          │                      │
//! │  GET /action_play       │ ──▶ p.play() ──────────▶ │  runs, replies       │
//! │  GET /browse?path=…     │     (no rpc: fs only)    │                      │
//! └─────────────────────────┘                          └──────────────────────┘
//! ```
//!
//! - **rouille** — synchronous HTTP server, one dedicated serving thread
//! - **[`WebApp`]** — route table, action handlers, browse session state
//! - **[`WebServer`]** — socket/thread ownership with synchronous shutdown
//!
//! # Endpoints
//!
//! | Method | Path                | Description                         |
//! |--------|---------------------|-------------------------------------|
//! | GET    | `/`                 | Dashboard (status, transport links) |
//! | GET    | `/about`            | About page                          |
//! | GET    | `/style.css`        | Stylesheet                          |
//! | GET    | `/browse`           | File browser (`path` optional)      |
//! | GET    | `/action_play`      | Resume playback → 302 `/`           |
//! | GET    | `/action_pause`     | Pause → 302 `/`                     |
//! | GET    | `/action_fs`        | Toggle fullscreen → 302 `/`         |
//! | GET    | `/action_seek`      | Relative seek, `rel` seconds        |
//! | GET    | `/action_volume`    | Stepped volume, `level` 0–16        |
//! | GET    | `/action_open`      | Open a browsed file, `path`         |
//! | GET    | `/action_ss_reset`  | Screensaver/DPMS wake               |

mod app;
mod http;

pub use app::WebApp;
pub use http::WebServer;
