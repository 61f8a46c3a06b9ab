//! Tile and app-launch operations on the home screen.

use std::path::PathBuf;

use aero_core::{
    apply_status, detect_network_interfaces, scan_apps, DispatchOutcome, Placement, TileId,
    TileState,
};
use aero_tmux::{Gateway, PaneId};
use tracing::{debug, warn};

use super::app::{App, AppPicker, TileView};

/// Title of the tile opened when the home screen appears.
pub const HOME_TILE_TITLE: &str = "Home Menu";

impl<G: Gateway> App<G> {
    /// Prepare the tmux session and open the home tile.
    ///
    /// Session problems are reported as notices; the UI keeps running
    /// without tmux.
    pub fn enter_home(&mut self) {
        match self.orchestrator.ensure_session() {
            Ok(()) => {
                let session = self.orchestrator.config().session_name.clone();
                if let Err(e) = apply_status(self.orchestrator.gateway(), &session, self.time_24()) {
                    warn!(session = %session, error = %e, "failed to set status bar");
                }
            }
            Err(e) => {
                warn!(error = %e, "tmux session unavailable");
                self.notify_error(format!("tmux unavailable: {}", e));
            }
        }

        self.network = detect_network_interfaces();
        if self.tiles.is_empty() {
            self.add_tile(HOME_TILE_TITLE, Placement::Left);
        }
    }

    /// Open a tile and try to give it a pane.
    ///
    /// The tile is shown even when no pane could be created.
    pub fn add_tile(&mut self, title: impl Into<String>, placement: Placement) -> TileId {
        let (id, pane) = self.orchestrator.open_tile(placement);
        if let Err(e) = pane {
            self.notify_error(format!("could not create terminal pane: {}", e));
        }
        self.tiles.push(TileView {
            id,
            title: title.into(),
            placement,
        });
        self.selected = Some(id);
        id
    }

    /// Split off a new terminal tile in `placement`'s column.
    pub fn split(&mut self, placement: Placement) {
        let n = self.tiles.len() + 1;
        self.add_tile(format!("Terminal {}", n), placement);
    }

    /// Close the selected tile and select the last remaining one.
    pub fn close_selected(&mut self) {
        let Some(id) = self.selected else {
            return;
        };
        let pane = self.orchestrator.close_pane(id);
        debug!(tile = %id, pane = ?pane, "tile closed");
        self.tiles.retain(|t| t.id != id);
        self.selected = self.tiles.last().map(|t| t.id);
    }

    /// Move the selection forward (`true`) or back through the tiles.
    pub fn cycle_selection(&mut self, forward: bool) {
        if self.tiles.is_empty() {
            self.selected = None;
            return;
        }
        let len = self.tiles.len();
        let current = self
            .selected
            .and_then(|id| self.tiles.iter().position(|t| t.id == id));
        let next = match (current, forward) {
            (None, _) => 0,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
        };
        self.selected = Some(self.tiles[next].id);
    }

    /// The selected tile's view.
    pub fn selected_tile(&self) -> Option<&TileView> {
        let id = self.selected?;
        self.tiles.iter().find(|t| t.id == id)
    }

    /// State and pane of a tile, for display.
    pub fn tile_status(&self, id: TileId) -> (TileState, Option<&PaneId>) {
        let state = self
            .orchestrator
            .tile_state(id)
            .unwrap_or(TileState::Unbound);
        (state, self.orchestrator.pane_for(id))
    }

    /// Scan the apps directory and show the picker.
    pub fn open_picker(&mut self) {
        let apps = scan_apps(&self.apps_dir);
        if apps.is_empty() {
            self.notify(format!("no apps in {}", self.apps_dir.display()));
            return;
        }
        self.picker = Some(AppPicker { apps, selected: 0 });
    }

    /// Move the picker highlight.
    pub fn picker_move(&mut self, down: bool) {
        if let Some(picker) = &mut self.picker {
            let len = picker.apps.len();
            if len == 0 {
                return;
            }
            picker.selected = if down {
                (picker.selected + 1) % len
            } else {
                (picker.selected + len - 1) % len
            };
        }
    }

    /// Launch the highlighted app in the selected tile.
    ///
    /// With no tile selected a new one is opened on the right.
    pub fn picker_select(&mut self) {
        let Some(picker) = self.picker.take() else {
            return;
        };
        let Some(program) = picker.apps.get(picker.selected).cloned() else {
            return;
        };
        self.launch(program);
    }

    /// Dispatch `program` to the selected tile.
    pub fn launch(&mut self, program: PathBuf) {
        let tile = match self.selected {
            Some(id) => id,
            None => {
                let title = app_title(&program);
                self.add_tile(title, Placement::Right)
            }
        };

        match self.orchestrator.dispatch(tile, &program) {
            Ok(DispatchOutcome::Sent { pane, .. }) => {
                if let Some(view) = self.tiles.iter_mut().find(|t| t.id == tile) {
                    view.title = app_title(&program);
                }
                self.notify(format!("launched {} in {}", program.display(), pane));
            }
            Ok(DispatchOutcome::DetachedWindow { reason }) => {
                self.notify_error(format!(
                    "{} opened in a separate tmux window: {}",
                    program.display(),
                    reason
                ));
            }
            Err(e) => {
                warn!(tile = %tile, program = %program.display(), error = %e, "launch failed");
                self.notify_error(format!("could not launch {}: {}", program.display(), e));
            }
        }
    }

    /// Unbind tiles whose panes died outside the shell.
    pub fn refresh_panes(&mut self) {
        match self.orchestrator.refresh_liveness() {
            Ok(stale) if stale.is_empty() => self.notify("all panes alive"),
            Ok(stale) => self.notify(format!("{} tile(s) lost their pane", stale.len())),
            Err(e) => self.notify_error(format!("could not list panes: {}", e)),
        }
    }
}

fn app_title(program: &std::path::Path) -> String {
    program
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| program.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::test_support::{test_app, test_app_with};
    use aero_tmux::{FakeGateway, GatewayOutput};
    use std::os::unix::fs::PermissionsExt;

    fn install_app(dir: &std::path::Path, name: &str) -> PathBuf {
        std::fs::create_dir_all(dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn test_home_tile_is_bound() {
        let (_temp, app) = test_app(true);
        let home = app.tiles[0].id;
        let (state, pane) = app.tile_status(home);
        assert_eq!(state, TileState::Bound);
        assert_eq!(pane.map(PaneId::as_str), Some("%1"));
    }

    #[test]
    fn test_split_and_close() {
        let (_temp, mut app) = test_app(true);
        app.split(Placement::Right);
        app.split(Placement::Left);
        assert_eq!(app.tiles.len(), 3);
        assert_eq!(app.column(Placement::Left).count(), 2);
        assert_eq!(app.orchestrator.registry().len(), 3);

        let last = app.tiles[2].id;
        assert_eq!(app.selected, Some(last));
        app.close_selected();

        assert_eq!(app.tiles.len(), 2);
        assert_eq!(app.selected, Some(app.tiles[1].id));
        assert_eq!(app.tile_status(last).0, TileState::Closed);
        assert_eq!(app.orchestrator.gateway().count("kill-pane"), 1);
    }

    #[test]
    fn test_split_without_tmux_keeps_unbound_tile() {
        let (_temp, mut app) = test_app_with(true, FakeGateway::unavailable());
        assert_eq!(app.tiles.len(), 1);
        assert!(app.current_notice().is_some_and(|n| n.is_error));

        app.split(Placement::Right);
        let id = app.tiles[1].id;
        assert_eq!(app.tile_status(id), (TileState::Unbound, None));
    }

    #[test]
    fn test_cycle_selection_wraps() {
        let (_temp, mut app) = test_app(true);
        app.split(Placement::Right);
        let first = app.tiles[0].id;
        let second = app.tiles[1].id;

        app.cycle_selection(true);
        assert_eq!(app.selected, Some(first));
        app.cycle_selection(false);
        assert_eq!(app.selected, Some(second));
    }

    #[test]
    fn test_picker_launches_into_selected_tile() {
        let (temp, mut app) = test_app(true);
        install_app(&temp.path().join("apps"), "editor");
        install_app(&temp.path().join("apps"), "files");

        app.open_picker();
        assert_eq!(app.picker.as_ref().map(|p| p.apps.len()), Some(2));
        app.picker_move(true);
        app.picker_select();

        assert!(app.picker.is_none());
        assert_eq!(app.tiles[0].title, "files");
        let calls = app.orchestrator.gateway().calls();
        let expected = format!(
            "send-keys -t %1 exec {} C-m",
            temp.path().join("apps/files").display()
        );
        assert!(calls.contains(&expected), "calls: {:?}", calls);
    }

    #[test]
    fn test_empty_apps_dir_shows_notice() {
        let (_temp, mut app) = test_app(true);
        app.open_picker();
        assert!(app.picker.is_none());
        assert!(app
            .current_notice()
            .is_some_and(|n| n.text.starts_with("no apps")));
    }

    #[test]
    fn test_launch_stale_pane_reports_error() {
        let (_temp, mut app) = test_app(true);
        app.orchestrator
            .gateway()
            .push_response("send-keys", GatewayOutput::failure(1, "can't find pane: %1"));

        app.launch(PathBuf::from("/opt/aero_apps/editor"));

        let notice = app.current_notice().unwrap();
        assert!(notice.is_error);
        assert_eq!(app.tile_status(app.tiles[0].id).0, TileState::Bound);
    }

    #[test]
    fn test_refresh_unbinds_dead_panes() {
        let (_temp, mut app) = test_app(true);
        app.split(Placement::Right);
        app.orchestrator
            .gateway()
            .push_response("list-panes", GatewayOutput::ok("%2\n"));

        app.refresh_panes();

        assert_eq!(app.tile_status(app.tiles[0].id).0, TileState::Unbound);
        assert_eq!(app.tile_status(app.tiles[1].id).0, TileState::Bound);
        assert!(app
            .current_notice()
            .is_some_and(|n| n.text == "1 tile(s) lost their pane"));
    }
}
