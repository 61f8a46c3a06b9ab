//! Terminal User Interface for Aero Shell.
//!
//! Provides:
//! - A first-run setup form (user name, clock format, interface nicknames)
//! - A home screen of tiles in two columns, each backed by a tmux pane
//! - An app picker that launches programs into the selected tile
//! - Footer with keybindings and a notice line

mod app;
mod events;
mod setup;
mod tiles;
mod ui;

pub use app::{App, AppPicker, Notice, TileView};
pub use events::{handle_key, run};
pub use setup::{SetupField, SetupForm};
pub use tiles::HOME_TILE_TITLE;

#[cfg(test)]
pub(crate) mod test_support {
    use aero_core::ShellConfig;
    use aero_persistence::{Profile, ProfileStore};
    use aero_tmux::FakeGateway;

    use super::App;

    /// App over a fake gateway that hands out panes `%1`, `%2`, ...
    pub fn test_app(onboarded: bool) -> (tempfile::TempDir, App<FakeGateway>) {
        test_app_with(onboarded, FakeGateway::new().with_auto_panes(1))
    }

    pub fn test_app_with(
        onboarded: bool,
        gateway: FakeGateway,
    ) -> (tempfile::TempDir, App<FakeGateway>) {
        let temp = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(temp.path().join("profile.json"));
        if onboarded {
            store.save(&Profile::new("ada")).unwrap();
        }
        let app = App::with_gateway(
            ShellConfig::default(),
            gateway,
            store,
            temp.path().join("apps"),
        );
        (temp, app)
    }
}
