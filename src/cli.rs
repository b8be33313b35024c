use clap::Parser;
use std::path::PathBuf;

/// Web remote control for a media player
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// TCP port for the web interface
    #[arg(short = 'p', long = "port", value_name = "PORT", default_value_t = 8099)]
    pub port: u16,

    /// Directory the file browser is confined to
    #[arg(short = 'r', long = "root", value_name = "DIR", default_value = "/")]
    pub root: String,

    /// Initial directory for the file browser (defaults to the root)
    #[arg(short = 'm', long = "media-dir", value_name = "DIR")]
    pub media_dir: Option<String>,

    /// Semicolon-separated glob patterns selecting playable files
    #[arg(
        short = 'f',
        long = "filter",
        value_name = "PATTERNS",
        default_value = "*.m??;*.avi;*.og?"
    )]
    pub filter: String,

    /// Enable debug logging to file instead of stderr
    #[arg(short = 'l', long = "log", value_name = "LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}
