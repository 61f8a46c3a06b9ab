//! Aero Shell entry point.

use clap::Parser;

use aero_core::config::{self, ShellConfig};
use aero_shell::cli::{Cli, Commands};
use aero_shell::{commands, init_tracing, tui};

const LOG_FILE: &str = "aero-shell.log";

fn main() {
    // Load ~/.aero_shell/.env.local before reading AERO_* variables
    config::load_env();

    let cli = Cli::parse();

    let mut shell_config = ShellConfig::from_env();
    cli.apply(&mut shell_config);

    let command = cli.command.unwrap_or(Commands::Tui);

    // The TUI owns the terminal, so its logs go to a file
    let log_file = (command == Commands::Tui).then(|| config::logs_dir().join(LOG_FILE));
    init_tracing(cli.log_level(), log_file.as_deref());

    let result = match command {
        Commands::Tui => tui::run(shell_config),
        cmd => commands::execute(cmd, &shell_config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
