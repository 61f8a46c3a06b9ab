//! Non-interactive commands.

use std::io::{self, Write};
use std::path::Path;

use aero_core::{scan_apps, ShellConfig};
use aero_persistence::ProfileStore;
use aero_tmux::{session_exists, Gateway};

use crate::cli::Commands;

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Execute a non-interactive command.
pub fn execute(command: Commands, config: &ShellConfig) -> Result<()> {
    let mut out = io::stdout().lock();
    match command {
        Commands::Status => {
            let gateway = config.gateway();
            let available = gateway.is_available();
            let state_file = config.resolve_state_file()?;
            let apps_dir = config.resolve_apps_dir()?;
            write_status(&mut out, &gateway, available, config, &state_file, &apps_dir)
        }
        Commands::Apps => {
            let apps_dir = config.resolve_apps_dir()?;
            write_apps(&mut out, &apps_dir)
        }
        Commands::Tui => Err("the TUI is started from main".into()),
    }
}

/// Print tmux and session state.
pub fn write_status<G: Gateway, W: Write>(
    out: &mut W,
    gateway: &G,
    tmux_available: bool,
    config: &ShellConfig,
    state_file: &Path,
    apps_dir: &Path,
) -> Result<()> {
    let session = &config.session_name;
    writeln!(
        out,
        "tmux:     {} ({})",
        config.tmux_binary,
        if tmux_available { "available" } else { "not found" }
    )?;

    let session_state = if !tmux_available {
        "unknown"
    } else if session_exists(gateway, session) {
        "running"
    } else {
        "not started"
    };
    writeln!(out, "session:  {} ({})", session, session_state)?;

    let store = ProfileStore::new(state_file);
    let profile = match store.load() {
        Err(e) => format!("unreadable: {}", e),
        Ok(Some(p)) if store.is_onboarded() => format!("{} (set up)", p.username),
        Ok(_) => "not set up".to_string(),
    };
    writeln!(out, "profile:  {} [{}]", profile, state_file.display())?;
    writeln!(
        out,
        "apps:     {} found in {}",
        scan_apps(apps_dir).len(),
        apps_dir.display()
    )?;
    Ok(())
}

/// Print launchable apps, one per line.
pub fn write_apps<W: Write>(out: &mut W, apps_dir: &Path) -> Result<()> {
    let apps = scan_apps(apps_dir);
    if apps.is_empty() {
        writeln!(out, "No apps in {}", apps_dir.display())?;
        return Ok(());
    }
    for app in apps {
        let name = app
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        writeln!(out, "{:<20} {}", name, app.display())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aero_persistence::Profile;
    use aero_tmux::{FakeGateway, GatewayOutput};
    use std::os::unix::fs::PermissionsExt;

    fn output(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_status_running_session() {
        let dir = tempfile::tempdir().unwrap();
        let state_file = dir.path().join("profile.json");
        ProfileStore::new(&state_file)
            .save(&Profile::new("ada"))
            .unwrap();
        let gateway = FakeGateway::new();
        let config = ShellConfig::default();

        let text = output(|out| {
            write_status(out, &gateway, true, &config, &state_file, dir.path())
        });

        assert!(text.contains("session:  aero_home (running)"));
        assert!(text.contains("profile:  ada (set up)"));
        assert!(text.contains("apps:     0 found"));
        assert_eq!(gateway.calls(), vec!["has-session -t aero_home"]);
    }

    #[test]
    fn test_status_without_tmux_skips_session_check() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = FakeGateway::unavailable();
        let config = ShellConfig::default();

        let text = output(|out| {
            write_status(
                out,
                &gateway,
                false,
                &config,
                &dir.path().join("profile.json"),
                dir.path(),
            )
        });

        assert!(text.contains("tmux:     tmux (not found)"));
        assert!(text.contains("(unknown)"));
        assert!(text.contains("not set up"));
        assert!(gateway.calls().is_empty());
    }

    #[test]
    fn test_status_session_not_started() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = FakeGateway::new();
        gateway.push_response(
            "has-session",
            GatewayOutput::failure(1, "can't find session: aero_home"),
        );
        let config = ShellConfig::default();

        let text = output(|out| {
            write_status(
                out,
                &gateway,
                true,
                &config,
                &dir.path().join("profile.json"),
                dir.path(),
            )
        });
        assert!(text.contains("aero_home (not started)"));
    }

    #[test]
    fn test_status_blank_username_is_not_set_up() {
        let dir = tempfile::tempdir().unwrap();
        let state_file = dir.path().join("profile.json");
        ProfileStore::new(&state_file)
            .save(&Profile::new("   "))
            .unwrap();
        let gateway = FakeGateway::new();

        let text = output(|out| {
            write_status(out, &gateway, true, &ShellConfig::default(), &state_file, dir.path())
        });
        assert!(text.contains("profile:  not set up"));
    }

    #[test]
    fn test_status_corrupt_profile_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let state_file = dir.path().join("profile.json");
        std::fs::write(&state_file, "garbage").unwrap();
        let gateway = FakeGateway::new();

        let text = output(|out| {
            write_status(out, &gateway, true, &ShellConfig::default(), &state_file, dir.path())
        });
        assert!(text.contains("profile:  unreadable"));
    }

    #[test]
    fn test_apps_listing() {
        let dir = tempfile::tempdir().unwrap();
        let app = dir.path().join("editor");
        std::fs::write(&app, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&app, std::fs::Permissions::from_mode(0o755)).unwrap();

        let text = output(|out| write_apps(out, dir.path()));
        assert!(text.starts_with("editor"));
        assert!(text.contains(&app.display().to_string()));
    }

    #[test]
    fn test_apps_empty() {
        let dir = tempfile::tempdir().unwrap();
        let text = output(|out| write_apps(out, dir.path()));
        assert!(text.starts_with("No apps in"));
    }
}
