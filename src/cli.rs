use clap::Parser;
use std::path::PathBuf;

/// Nexora console shell: a keyboard/gamepad-driven dashboard in the terminal
#[derive(Parser, Debug)]
#[command(version, about = "Nexora console shell")]
pub struct Cli {
    /// Jump straight past the boot sequence
    #[arg(long)]
    pub skip_boot: bool,

    /// Input poll interval in milliseconds
    #[arg(long, default_value_t = 50)]
    pub tick_ms: u64,

    /// Scene layout JSON overriding the built-in one
    #[arg(long)]
    pub scene: Option<PathBuf>,

    /// Log file path (structured tracing output)
    #[arg(long, default_value = "nexora-shell.log")]
    pub log_file: PathBuf,

    /// Print navigation cues to the log instead of staying silent
    #[arg(long)]
    pub log_cues: bool,
}
