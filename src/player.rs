//! Player collaborator surface.
//!
//! The web remote never owns the player; it drives one through this trait,
//! and every call happens on the event-loop thread via `rpc`. The trait is
//! the narrow slice of a media player the dashboard needs: current media,
//! pause state, volume, transport control and MRL-based open.
//!
//! Volume is always a 0.0–1.0 fraction at this boundary; the HTTP layer's
//! stepped scale (see [`VOLUME_STEPS`]) is converted before the call.

use anyhow::Result;

/// Number of notches on the dashboard volume bar. HTTP `level` values are
/// clamped to `0..=VOLUME_STEPS` and stored as `level / VOLUME_STEPS`.
pub const VOLUME_STEPS: u32 = 16;

/// MRL-based remote commands, issued in sequence by the open handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteCommand {
    /// Replace the current media with the given MRL.
    Replace,
    /// Start playing the given MRL.
    Play,
}

/// Control surface of the media player, exercised only on its own
/// event-loop thread.
pub trait PlayerControl {
    /// MRL of the currently loaded media, if any.
    fn current_mrl(&self) -> Option<String>;

    /// Whether playback is currently paused.
    fn is_paused(&self) -> bool;

    /// Current volume as a 0.0–1.0 fraction.
    fn volume(&self) -> f64;

    /// Set volume to a 0.0–1.0 fraction.
    fn set_volume(&mut self, fraction: f64) -> Result<()>;

    /// Resume playback.
    fn play(&mut self) -> Result<()>;

    /// Pause playback.
    fn pause(&mut self) -> Result<()>;

    /// Toggle full-screen display.
    fn toggle_fullscreen(&mut self) -> Result<()>;

    /// Seek relative to the current position, in milliseconds (signed).
    fn seek_relative_ms(&mut self, offset_ms: f64) -> Result<()>;

    /// Issue an MRL-based remote command.
    fn remote_command(&mut self, command: RemoteCommand, mrl: &str) -> Result<()>;
}

/// Snapshot of player state for rendering the dashboard. Gathered in a
/// single rpc call so the page is internally consistent.
#[derive(Debug, Clone)]
pub struct PlayerStatus {
    pub mrl: Option<String>,
    pub paused: bool,
    pub volume: f64,
}

#[cfg(test)]
pub mod testing {
    //! Scripted stand-in player for handler and rpc tests.

    use super::*;

    /// Records every mutating call so tests can assert order and arguments.
    #[derive(Debug, Default)]
    pub struct StubPlayer {
        pub mrl: Option<String>,
        pub paused: bool,
        pub volume: f64,
        pub calls: Vec<String>,
        /// When set, every mutating call fails with this message.
        pub fail_with: Option<String>,
    }

    impl StubPlayer {
        fn record(&mut self, call: String) -> Result<()> {
            if let Some(msg) = &self.fail_with {
                anyhow::bail!("{msg}");
            }
            self.calls.push(call);
            Ok(())
        }
    }

    impl PlayerControl for StubPlayer {
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
            self.record(format!("volume {fraction}"))?;
            self.volume = fraction;
            Ok(())
        }

        fn play(&mut self) -> Result<()> {
            self.record("play".into())?;
            self.paused = false;
            Ok(())
        }

        fn pause(&mut self) -> Result<()> {
            self.record("pause".into())?;
            self.paused = true;
            Ok(())
        }

        fn toggle_fullscreen(&mut self) -> Result<()> {
            self.record("fullscreen".into())
        }

        fn seek_relative_ms(&mut self, offset_ms: f64) -> Result<()> {
            self.record(format!("seek {offset_ms}"))
        }

        fn remote_command(&mut self, command: RemoteCommand, mrl: &str) -> Result<()> {
            let verb = match command {
                RemoteCommand::Replace => "replace",
                RemoteCommand::Play => "remote-play",
            };
            self.record(format!("{verb} {mrl}"))?;
            self.mrl = Some(mrl.to_string());
            Ok(())
        }
    }
}
