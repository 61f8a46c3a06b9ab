//! tmux status bar text.

use aero_tmux::{set_status_right, Gateway, Result};

const BATTERY: &str = "#(cat /sys/class/power_supply/BAT*/capacity 2>/dev/null || echo N/A)";

/// Build the `status-right` value for the given clock format.
pub fn status_right(time_24: bool) -> String {
    let clock = if time_24 { "%H:%M" } else { "%I:%M %p" };
    format!("Aero | Battery: {} | %Y-%m-%d {}", BATTERY, clock)
}

/// Apply the status bar to `session`.
///
/// # Errors
/// Returns an error if tmux rejects the option or cannot be run.
pub fn apply_status<G: Gateway + ?Sized>(gateway: &G, session: &str, time_24: bool) -> Result<()> {
    set_status_right(gateway, session, &status_right(time_24))
}
