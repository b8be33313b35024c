use couchctl::cli::Args;
use couchctl::config::RemoteConfig;
use couchctl::player::{PlayerControl, RemoteCommand};
use couchctl::rpc;
use couchctl::server::{WebApp, WebServer};

use anyhow::Result;
use clap::Parser;
use log::{debug, info};
use std::time::Duration;

/// Stand-in player for running the remote without a real media player.
///
/// Keeps just enough state (current MRL, pause flag, volume) for the
/// dashboard to round-trip, and logs every command it receives. A real host
/// implements [`PlayerControl`] over its own playback engine instead.
struct DemoPlayer {
    mrl: Option<String>,
    paused: bool,
    volume: f64,
}

impl DemoPlayer {
    fn new() -> Self {
        Self {
            mrl: None,
            paused: false,
            volume: 0.5,
        }
    }
}

impl PlayerControl for DemoPlayer {
    fn current_mrl(&self) -> Option<String> {
        self.mrl.clone()
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn volume(&self) -> f64 {
        self.volume
    }

    fn set_volume(&mut self, fraction: f64) -> Result<()> {
        info!("demo player: volume -> {fraction:.3}");
        self.volume = fraction.clamp(0.0, 1.0);
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        info!("demo player: play");
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        info!("demo player: pause");
        self.paused = true;
        Ok(())
    }

    fn toggle_fullscreen(&mut self) -> Result<()> {
        info!("demo player: toggle fullscreen");
        Ok(())
    }

    fn seek_relative_ms(&mut self, offset_ms: f64) -> Result<()> {
        info!("demo player: seek {offset_ms:+.0} ms");
        Ok(())
    }

    fn remote_command(&mut self, command: RemoteCommand, mrl: &str) -> Result<()> {
        info!("demo player: {command:?} {mrl}");
        if let RemoteCommand::Replace = command {
            self.mrl = Some(mrl.to_string());
        }
        self.paused = false;
        Ok(())
    }
}

fn setup_logging(args: &Args) {
    let default_level = match args.verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    if let Some(log_path) = &args.log_file {
        let file = std::fs::File::create(log_path).expect("Failed to create log file");
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
            .format_timestamp_millis()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
            .format_timestamp_millis()
            .init();
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(&args);

    info!("couchctl starting...");
    debug!("command-line args: {args:?}");

    let config = RemoteConfig::from_args(&args);
    info!(
        "browse root: {} (media home: {}, filter: {})",
        config.path_restrict, config.default_media_path, config.filter_pattern
    );

    // The rpc queue end stays on this thread, which plays the role of the
    // player's event loop; the handle end goes to the HTTP workers.
    let (rpc_handle, rpc_queue) = rpc::channel();
    let server = WebServer::start(config.port, WebApp::new(config, rpc_handle))?;
    println!("couchctl dashboard: http://{}/", server.addr());

    let mut player = DemoPlayer::new();
    while rpc_queue.run_tick(&mut player, Duration::from_millis(100)) {
        // A real host would advance playback here each tick.
    }

    server.stop();
    Ok(())
}
