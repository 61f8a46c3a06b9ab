//! Shell configuration.
//!
//! All settings the orchestrator needs are gathered into an explicit
//! [`ShellConfig`] that is passed in at construction; nothing reads ambient
//! globals after startup.
//!
//! # Search Order
//!
//! Profile store (first existing file wins, otherwise the last candidate is
//! used and its parent directory created):
//!
//! ```text
//! /var/lib/aero_shell/profile.json
//! ~/.aero_shell/profile.json
//! ```
//!
//! Apps directory (first existing directory wins, otherwise the last
//! candidate is created):
//!
//! ```text
//! /opt/aero_apps
//! ~/.local/share/aero_apps
//! ```
//!
//! # Environment Variables
//!
//! - `AERO_SESSION`: tmux session name (default `aero_home`)
//! - `AERO_SHELL`: shell started in new panes (default `bash`)
//! - `AERO_TMUX`: tmux binary (default `tmux`)
//! - `AERO_TMUX_TIMEOUT_MS`: per-command timeout, `0` disables it
//! - `AERO_STATE_FILE`: use exactly this profile store path
//! - `AERO_APPS_DIR`: use exactly this apps directory (`~` is expanded)

use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use aero_tmux::{TmuxGateway, DEFAULT_TIMEOUT};
use tracing::debug;

/// Environment variable for the session name.
pub const SESSION_ENV: &str = "AERO_SESSION";

/// Environment variable for the pane shell.
pub const SHELL_ENV: &str = "AERO_SHELL";

/// Environment variable for the tmux binary.
pub const TMUX_ENV: &str = "AERO_TMUX";

/// Environment variable for the tmux command timeout in milliseconds.
pub const TIMEOUT_ENV: &str = "AERO_TMUX_TIMEOUT_MS";

/// Environment variable for the profile store path.
pub const STATE_FILE_ENV: &str = "AERO_STATE_FILE";

/// Environment variable for the apps directory.
pub const APPS_DIR_ENV: &str = "AERO_APPS_DIR";

/// Default tmux session name.
pub const DEFAULT_SESSION: &str = "aero_home";

/// Default shell for new panes.
pub const DEFAULT_SHELL: &str = "bash";

/// tmux key name that submits a line.
pub const DEFAULT_CONFIRM_KEY: &str = "C-m";

const SYSTEM_STATE_FILE: &str = "/var/lib/aero_shell/profile.json";
const SYSTEM_APPS_DIR: &str = "/opt/aero_apps";
const USER_STATE_DIR: &str = ".aero_shell";
const PROFILE_FILE: &str = "profile.json";
const USER_APPS_SUBDIR: &str = ".local/share/aero_apps";
const LOGS_SUBDIR: &str = "logs";

/// Get the per-user state directory (`~/.aero_shell`).
///
/// Falls back to `.aero_shell` in the current directory when no home
/// directory is available.
pub fn state_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(USER_STATE_DIR))
        .unwrap_or_else(|| PathBuf::from(USER_STATE_DIR))
}

/// Get the logs directory.
pub fn logs_dir() -> PathBuf {
    state_dir().join(LOGS_SUBDIR)
}

/// Get the `.env.local` file path.
pub fn env_file() -> PathBuf {
    state_dir().join(".env.local")
}

/// Load `~/.aero_shell/.env.local` into the process environment, if present.
///
/// Variables already set in the environment win.
pub fn load_env() {
    let path = env_file();
    if path.exists() {
        if let Err(e) = dotenvy::from_path(&path) {
            debug!(path = %path.display(), error = %e, "failed to load env file");
        }
    }
}

/// Configuration passed to the orchestrator and its collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// Name of the single shared tmux session.
    pub session_name: String,
    /// Shell started in every new pane.
    pub shell: String,
    /// tmux key sent after a dispatched command line.
    pub confirm_key: String,
    /// tmux binary name or path.
    pub tmux_binary: String,
    /// Timeout for one tmux invocation; `None` waits forever.
    pub command_timeout: Option<Duration>,
    /// Profile store candidates, in search order.
    pub state_paths: Vec<PathBuf>,
    /// Apps directory candidates, in search order.
    pub apps_dirs: Vec<PathBuf>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        let home = dirs::home_dir();
        let user_state = state_dir().join(PROFILE_FILE);
        let user_apps = home
            .map(|h| h.join(USER_APPS_SUBDIR))
            .unwrap_or_else(|| PathBuf::from(USER_APPS_SUBDIR));

        Self {
            session_name: DEFAULT_SESSION.to_string(),
            shell: DEFAULT_SHELL.to_string(),
            confirm_key: DEFAULT_CONFIRM_KEY.to_string(),
            tmux_binary: "tmux".to_string(),
            command_timeout: Some(DEFAULT_TIMEOUT),
            state_paths: vec![PathBuf::from(SYSTEM_STATE_FILE), user_state],
            apps_dirs: vec![PathBuf::from(SYSTEM_APPS_DIR), user_apps],
        }
    }
}

impl ShellConfig {
    /// Build a config from defaults plus process environment overrides.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build a config from defaults plus overrides read through `lookup`.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(session) = lookup(SESSION_ENV) {
            config.session_name = session;
        }
        if let Some(shell) = lookup(SHELL_ENV) {
            config.shell = shell;
        }
        if let Some(tmux) = lookup(TMUX_ENV) {
            config.tmux_binary = tmux;
        }
        if let Some(ms) = lookup(TIMEOUT_ENV).and_then(|v| v.trim().parse::<u64>().ok()) {
            config.command_timeout = (ms > 0).then(|| Duration::from_millis(ms));
        }
        if let Some(path) = lookup(STATE_FILE_ENV) {
            config.state_paths = vec![expand(&path)];
        }
        if let Some(dir) = lookup(APPS_DIR_ENV) {
            config.apps_dirs = vec![expand(&dir)];
        }
        config
    }

    /// Build the tmux gateway described by this config.
    pub fn gateway(&self) -> TmuxGateway {
        TmuxGateway::new(self.tmux_binary.clone(), self.command_timeout)
    }

    /// Resolve the profile store path using the search order.
    ///
    /// # Errors
    /// Returns an error if the fallback's parent directory cannot be created.
    pub fn resolve_state_file(&self) -> io::Result<PathBuf> {
        resolve_file(&self.state_paths)
    }

    /// Resolve the apps directory using the search order.
    ///
    /// # Errors
    /// Returns an error if the fallback directory cannot be created.
    pub fn resolve_apps_dir(&self) -> io::Result<PathBuf> {
        resolve_dir(&self.apps_dirs)
    }
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

/// First existing file among `candidates`, else the last one with its parent created.
pub fn resolve_file(candidates: &[PathBuf]) -> io::Result<PathBuf> {
    if let Some(found) = candidates.iter().find(|p| p.is_file()) {
        return Ok(found.clone());
    }
    let fallback = last(candidates)?;
    if let Some(parent) = fallback.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(fallback)
}

/// First existing directory among `candidates`, else the last one, created.
pub fn resolve_dir(candidates: &[PathBuf]) -> io::Result<PathBuf> {
    if let Some(found) = candidates.iter().find(|p| p.is_dir()) {
        return Ok(found.clone());
    }
    let fallback = last(candidates)?;
    fs::create_dir_all(&fallback)?;
    Ok(fallback)
}

fn last(candidates: &[PathBuf]) -> io::Result<PathBuf> {
    candidates
        .last()
        .cloned()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "no candidate paths"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ShellConfig::default();
        assert_eq!(config.session_name, "aero_home");
        assert_eq!(config.shell, "bash");
        assert_eq!(config.confirm_key, "C-m");
        assert_eq!(config.command_timeout, Some(DEFAULT_TIMEOUT));
        assert_eq!(config.state_paths[0], PathBuf::from("/var/lib/aero_shell/profile.json"));
        assert!(config.state_paths[1].ends_with(".aero_shell/profile.json"));
        assert_eq!(config.apps_dirs[0], PathBuf::from("/opt/aero_apps"));
        assert!(config.apps_dirs[1].ends_with(".local/share/aero_apps"));
    }

    #[test]
    fn test_env_overrides() {
        let config = ShellConfig::from_vars(vars(&[
            (SESSION_ENV, "aero_test"),
            (SHELL_ENV, "zsh"),
            (TIMEOUT_ENV, "250"),
            (STATE_FILE_ENV, "/tmp/aero/profile.json"),
            (APPS_DIR_ENV, "/srv/apps"),
        ]));
        assert_eq!(config.session_name, "aero_test");
        assert_eq!(config.shell, "zsh");
        assert_eq!(config.command_timeout, Some(Duration::from_millis(250)));
        assert_eq!(config.state_paths, vec![PathBuf::from("/tmp/aero/profile.json")]);
        assert_eq!(config.apps_dirs, vec![PathBuf::from("/srv/apps")]);
    }

    #[test]
    fn test_zero_timeout_disables_it() {
        let config = ShellConfig::from_vars(vars(&[(TIMEOUT_ENV, "0")]));
        assert_eq!(config.command_timeout, None);
    }

    #[test]
    fn test_blank_and_invalid_values_are_ignored() {
        let config = ShellConfig::from_vars(vars(&[(SESSION_ENV, "  "), (TIMEOUT_ENV, "soon")]));
        assert_eq!(config.session_name, DEFAULT_SESSION);
        assert_eq!(config.command_timeout, Some(DEFAULT_TIMEOUT));
    }

    #[test]
    fn test_resolve_file_prefers_first_existing() {
        let temp = tempfile::tempdir().unwrap();
        let system = temp.path().join("system/profile.json");
        let user = temp.path().join("user/profile.json");
        fs::create_dir_all(system.parent().unwrap()).unwrap();
        fs::write(&system, "{}").unwrap();

        let found = resolve_file(&[system.clone(), user]).unwrap();
        assert_eq!(found, system);
    }

    #[test]
    fn test_resolve_file_falls_back_to_last() {
        let temp = tempfile::tempdir().unwrap();
        let system = temp.path().join("system/profile.json");
        let user = temp.path().join("user/profile.json");

        let found = resolve_file(&[system, user.clone()]).unwrap();
        assert_eq!(found, user);
        assert!(user.parent().unwrap().is_dir());
        assert!(!user.exists());
    }

    #[test]
    fn test_resolve_dir() {
        let temp = tempfile::tempdir().unwrap();
        let system = temp.path().join("opt/aero_apps");
        let user = temp.path().join("share/aero_apps");

        assert_eq!(resolve_dir(&[system.clone(), user.clone()]).unwrap(), user);
        assert!(user.is_dir());

        fs::create_dir_all(&system).unwrap();
        assert_eq!(resolve_dir(&[system.clone(), user]).unwrap(), system);
    }

    #[test]
    fn test_resolve_with_no_candidates() {
        assert!(resolve_file(&[]).is_err());
        assert!(resolve_dir(&[]).is_err());
    }

    #[test]
    fn test_state_paths_names() {
        assert!(state_dir().ends_with(".aero_shell"));
        assert!(logs_dir().ends_with("logs"));
        assert!(env_file().ends_with(".env.local"));
    }
}
