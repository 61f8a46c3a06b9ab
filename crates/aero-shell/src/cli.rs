//! Command-line interface definition using clap.

use std::path::PathBuf;

use aero_core::ShellConfig;
use clap::{Parser, Subcommand};

/// Aero Shell - tmux-backed tiles in your terminal
#[derive(Parser, Debug)]
#[command(name = "aero-shell")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// tmux session name (overrides AERO_SESSION)
    #[arg(long)]
    pub session: Option<String>,

    /// Profile store file (overrides AERO_STATE_FILE)
    #[arg(long)]
    pub state_file: Option<PathBuf>,

    /// Directory of launchable apps (overrides AERO_APPS_DIR)
    #[arg(long)]
    pub apps_dir: Option<PathBuf>,

    /// Timeout for each tmux command in milliseconds, 0 to disable
    #[arg(long)]
    pub tmux_timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Launch the interactive shell (default)
    Tui,

    /// Show tmux availability and session state
    Status,

    /// List launchable apps
    Apps,
}

impl Cli {
    /// Get log level based on verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Apply command-line overrides on top of `config`.
    pub fn apply(&self, config: &mut ShellConfig) {
        if let Some(session) = &self.session {
            config.session_name = session.clone();
        }
        if let Some(path) = &self.state_file {
            config.state_paths = vec![path.clone()];
        }
        if let Some(dir) = &self.apps_dir {
            config.apps_dirs = vec![dir.clone()];
        }
        if let Some(ms) = self.tmux_timeout_ms {
            config.command_timeout = (ms > 0).then(|| std::time::Duration::from_millis(ms));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_cli_parse_default() {
        let cli = Cli::try_parse_from(["aero-shell"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.log_level(), "warn");
    }

    #[test]
    fn test_cli_parse_verbose() {
        let cli = Cli::try_parse_from(["aero-shell", "-vv", "status"]).unwrap();
        assert_eq!(cli.log_level(), "debug");
        assert_eq!(cli.command, Some(Commands::Status));
    }

    #[test]
    fn test_apply_overrides() {
        let cli = Cli::try_parse_from([
            "aero-shell",
            "--session",
            "aero_test",
            "--state-file",
            "/tmp/profile.json",
            "--apps-dir",
            "/srv/apps",
            "--tmux-timeout-ms",
            "1500",
            "apps",
        ])
        .unwrap();

        let mut config = ShellConfig::default();
        cli.apply(&mut config);

        assert_eq!(config.session_name, "aero_test");
        assert_eq!(config.state_paths, vec![PathBuf::from("/tmp/profile.json")]);
        assert_eq!(config.apps_dirs, vec![PathBuf::from("/srv/apps")]);
        assert_eq!(config.command_timeout, Some(Duration::from_millis(1500)));
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let cli = Cli::try_parse_from(["aero-shell", "tui"]).unwrap();
        let mut config = ShellConfig::default();
        cli.apply(&mut config);
        assert_eq!(config, ShellConfig::default());
    }
}
