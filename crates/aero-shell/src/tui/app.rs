//! TUI application state.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use aero_core::{
    Navigation, NetworkInterface, Placement, Screen, ShellConfig, TileId, TileOrchestrator,
};
use aero_persistence::{Profile, ProfileStore};
use aero_tmux::{Gateway, TmuxGateway};
use tracing::warn;

use super::setup::SetupForm;

/// How long a notice stays in the status line.
pub const NOTICE_TTL: Duration = Duration::from_secs(6);

/// A tile as the presentation layer sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileView {
    /// Identity shared with the orchestrator.
    pub id: TileId,
    /// Title shown in the tile border.
    pub title: String,
    /// Column the tile lives in.
    pub placement: Placement,
}

/// A transient message for the status line.
#[derive(Debug, Clone)]
pub struct Notice {
    /// Message text.
    pub text: String,
    /// Whether this reports a failure.
    pub is_error: bool,
    /// When the notice was raised.
    pub raised_at: Instant,
}

impl Notice {
    /// An informational notice.
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
            raised_at: Instant::now(),
        }
    }

    /// A failure notice.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
            raised_at: Instant::now(),
        }
    }

    /// Whether the notice should still be shown.
    pub fn is_fresh(&self) -> bool {
        self.raised_at.elapsed() < NOTICE_TTL
    }
}

/// App picker overlay state.
#[derive(Debug, Clone, Default)]
pub struct AppPicker {
    /// Executables found in the apps directory.
    pub apps: Vec<PathBuf>,
    /// Highlighted entry.
    pub selected: usize,
}

/// TUI application state.
pub struct App<G: Gateway = TmuxGateway> {
    // Navigation and settings
    /// Setup vs. home screen
    pub nav: Navigation,
    /// Profile store
    pub store: ProfileStore,
    /// Loaded profile (None until setup completes)
    pub profile: Option<Profile>,
    /// First-run form state
    pub setup: SetupForm,

    // Tiles
    /// Tile and pane orchestration
    pub orchestrator: TileOrchestrator<G>,
    /// Tiles in layout order
    pub tiles: Vec<TileView>,
    /// Currently selected tile
    pub selected: Option<TileId>,

    // Apps
    /// Directory scanned for launchable apps
    pub apps_dir: PathBuf,
    /// Open app picker, if any
    pub picker: Option<AppPicker>,
    /// Interfaces shown in the header
    pub network: Vec<NetworkInterface>,

    // Runtime
    /// Most recent notice
    pub notice: Option<Notice>,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl App<TmuxGateway> {
    /// Create an app backed by the real tmux binary.
    pub fn new(config: ShellConfig, store: ProfileStore, apps_dir: PathBuf) -> Self {
        Self::with_orchestrator(TileOrchestrator::with_tmux(config), store, apps_dir)
    }
}

impl<G: Gateway> App<G> {
    /// Create an app with an explicit gateway.
    ///
    /// Goes straight to the home screen when a profile already exists.
    pub fn with_gateway(config: ShellConfig, gateway: G, store: ProfileStore, apps_dir: PathBuf) -> Self {
        Self::with_orchestrator(TileOrchestrator::new(config, gateway), store, apps_dir)
    }

    fn with_orchestrator(orchestrator: TileOrchestrator<G>, store: ProfileStore, apps_dir: PathBuf) -> Self {
        let profile = match store.load() {
            Ok(profile) => profile,
            Err(e) => {
                warn!(path = %store.path().display(), error = %e, "failed to load profile");
                None
            }
        };
        let onboarded = store.is_onboarded();

        let mut app = Self {
            nav: Navigation::start(onboarded),
            store,
            profile,
            setup: SetupForm::default(),
            orchestrator,
            tiles: Vec::new(),
            selected: None,
            apps_dir,
            picker: None,
            network: Vec::new(),
            notice: None,
            should_quit: false,
        };

        match app.nav.screen() {
            Screen::Home => app.enter_home(),
            Screen::Setup => app.setup.load_interfaces(),
        }
        app
    }

    /// Show an informational notice.
    pub fn notify(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice::info(text));
    }

    /// Show a failure notice.
    pub fn notify_error(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice::error(text));
    }

    /// The notice to display, if still fresh.
    pub fn current_notice(&self) -> Option<&Notice> {
        self.notice.as_ref().filter(|n| n.is_fresh())
    }

    /// Whether the status bar uses 24-hour time.
    pub fn time_24(&self) -> bool {
        self.profile.as_ref().map_or(true, |p| p.time_24)
    }

    /// Interfaces with their addresses, labelled by nickname where set.
    pub fn network_summary(&self) -> String {
        self.network
            .iter()
            .map(|iface| {
                let label = match &self.profile {
                    Some(profile) => profile.nic_label(&iface.name),
                    None => iface.name.as_str(),
                };
                format!("{} {}", label, iface.address)
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Tiles in one column, top to bottom.
    pub fn column(&self, placement: Placement) -> impl Iterator<Item = &TileView> {
        self.tiles.iter().filter(move |t| t.placement == placement)
    }
}
