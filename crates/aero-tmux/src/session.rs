//! Session lifecycle: make sure the named tmux session exists.

use tracing::{debug, warn};

use crate::{Gateway, Result, TmuxCommand, TmuxError};

/// Ensure a detached session named `name` exists, creating it if needed.
///
/// Issues `has-session` first; only when that fails is `new-session -d`
/// attempted. Calling this repeatedly once the session exists costs a single
/// query and mutates nothing.
///
/// # Errors
///
/// Returns `TmuxError::Unavailable` if tmux cannot be run at all, or
/// `TmuxError::SessionUnready` if creation failed.
pub fn try_ensure_session<G: Gateway + ?Sized>(gateway: &G, name: &str) -> Result<()> {
    let query = gateway.run(&TmuxCommand::HasSession {
        session: name.to_string(),
    });
    if query.success() {
        return Ok(());
    }

    debug!(session = %name, "session missing, creating tmux session");
    let created = gateway.run(&TmuxCommand::NewSession {
        session: name.to_string(),
    });
    if created.success() {
        return Ok(());
    }

    warn!(session = %name, code = created.code, stderr = %created.stderr.trim(), "failed to create tmux session");
    if created.is_tool_unavailable() {
        return Err(TmuxError::Unavailable(created.stderr));
    }
    Err(TmuxError::SessionUnready {
        session: name.to_string(),
        reason: created.stderr.trim().to_string(),
    })
}

/// Ensure the session exists; `true` means it is ready for use.
pub fn ensure_session<G: Gateway + ?Sized>(gateway: &G, name: &str) -> bool {
    try_ensure_session(gateway, name).is_ok()
}

/// Check if a session exists without creating it.
pub fn session_exists<G: Gateway + ?Sized>(gateway: &G, name: &str) -> bool {
    gateway
        .run(&TmuxCommand::HasSession {
            session: name.to_string(),
        })
        .success()
}

/// Set the `status-right` option on the session.
///
/// # Errors
///
/// Returns an error if tmux rejects the option or cannot be run.
pub fn set_status_right<G: Gateway + ?Sized>(gateway: &G, name: &str, value: &str) -> Result<()> {
    let cmd = TmuxCommand::SetOption {
        session: name.to_string(),
        option: "status-right".to_string(),
        value: value.to_string(),
    };
    gateway.run(&cmd).into_result(cmd.subcommand())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FakeGateway, GatewayOutput, EXIT_NOT_FOUND};

    #[test]
    fn test_creates_missing_session_then_only_queries() {
        let gateway = FakeGateway::new();
        gateway.push_response("has-session", GatewayOutput::failure(1, "can't find session"));

        assert!(ensure_session(&gateway, "aero_home"));
        assert_eq!(
            gateway.calls(),
            vec!["has-session -t aero_home", "new-session -d -s aero_home"]
        );

        gateway.clear_calls();
        assert!(ensure_session(&gateway, "aero_home"));
        assert_eq!(gateway.calls(), vec!["has-session -t aero_home"]);
    }

    #[test]
    fn test_repeated_calls_are_idempotent() {
        let gateway = FakeGateway::new();
        for _ in 0..5 {
            assert!(ensure_session(&gateway, "aero_home"));
        }
        assert_eq!(gateway.count("new-session"), 0);
        assert_eq!(gateway.count("has-session"), 5);
    }

    #[test]
    fn test_tool_unavailable() {
        let gateway = FakeGateway::unavailable();
        let result = try_ensure_session(&gateway, "aero_home");
        assert!(matches!(result, Err(TmuxError::Unavailable(_))));
        assert!(!ensure_session(&gateway, "aero_home"));
    }

    #[test]
    fn test_creation_failure_is_session_unready() {
        let gateway = FakeGateway::new();
        gateway.set_default("has-session", GatewayOutput::failure(1, "no server running"));
        gateway.set_default("new-session", GatewayOutput::failure(1, "duplicate session"));

        match try_ensure_session(&gateway, "aero_home") {
            Err(TmuxError::SessionUnready { session, reason }) => {
                assert_eq!(session, "aero_home");
                assert_eq!(reason, "duplicate session");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_set_status_right() {
        let gateway = FakeGateway::new();
        set_status_right(&gateway, "aero_home", "Aero | %H:%M").unwrap();
        assert_eq!(
            gateway.calls(),
            vec!["set-option -t aero_home status-right Aero | %H:%M"]
        );

        let gateway = FakeGateway::new();
        gateway.set_default("set-option", GatewayOutput::failure(EXIT_NOT_FOUND, "tmux not found"));
        assert!(set_status_right(&gateway, "aero_home", "x").is_err());
    }

    #[test]
    fn test_session_exists() {
        let gateway = FakeGateway::new();
        assert!(session_exists(&gateway, "aero_home"));
        gateway.set_default("has-session", GatewayOutput::failure(1, "can't find session"));
        assert!(!session_exists(&gateway, "aero_home"));
        assert_eq!(gateway.count("new-session"), 0);
    }
}
