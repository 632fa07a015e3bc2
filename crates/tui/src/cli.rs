//! Command-line argument parsing for hub-tui.
//!
//! Responsibilities:
//! - Define CLI argument structure using clap derive macros.
//! - Provide parsed CLI arguments to the main application.
//!
//! Does NOT handle:
//! - Configuration loading or validation (see `runtime::config`).
//! - Environment variable parsing (handled by `hub_config`).
//!
//! Invariants:
//! - CLI arguments are parsed once at startup via `Cli::parse()`.
//! - Every connection flag is optional; unset flags fall back to the environment.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for hub-tui.
///
/// Configuration precedence (highest to lowest):
/// 1. CLI arguments (e.g., --base-url, --user)
/// 2. Environment variables (e.g., HUB_BASE_URL, HUB_USER, HUB_API_TOKEN)
/// 3. `.env` file in the working directory
/// 4. Default values
#[derive(Debug, Parser)]
#[command(
    name = "hub-tui",
    about = "Terminal user interface for managing named notebook servers on a hub",
    version,
    after_help = "Examples:\n  HUB_API_TOKEN=... hub-tui --base-url https://hub.example.org/hub --user alice\n  hub-tui --vo myproject --systems cluster-a,cluster-b\n  hub-tui --log-dir /var/log/hub-tui --no-mouse\n"
)]
pub struct Cli {
    /// Hub URL including its prefix, e.g. https://hub.example.org/hub
    #[arg(long)]
    pub base_url: Option<String>,

    /// User whose servers are managed
    #[arg(long, short = 'u')]
    pub user: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long)]
    pub skip_verify: bool,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Active virtual organization sent with every start
    #[arg(long)]
    pub vo: Option<String>,

    /// Systems available in this session (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub systems: Option<Vec<String>>,

    /// Path of the persisted display state file
    #[arg(long)]
    pub state_path: Option<PathBuf>,

    /// Directory for log files
    #[arg(long, default_value = "logs")]
    pub log_dir: PathBuf,

    /// Disable mouse support
    #[arg(long)]
    pub no_mouse: bool,

    /// Start with fresh state, ignoring any persisted state
    #[arg(long)]
    pub fresh: bool,

    /// Service whose log handlers the logging screen manages (default: jhub)
    #[arg(long)]
    pub log_service: Option<String>,
}
