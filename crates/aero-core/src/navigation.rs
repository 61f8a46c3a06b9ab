//! Top-level navigation: first-run setup or the home screen.

/// Screen currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// First-run setup form.
    #[default]
    Setup,
    /// Main screen with tiles.
    Home,
}

/// Two-state navigation flow.
///
/// Entering [`Screen::Home`] is the point where the caller initializes the
/// orchestrator (session plus first tile).
#[derive(Debug, Clone, Default)]
pub struct Navigation {
    screen: Screen,
}

impl Navigation {
    /// Start on `Home` when the user is onboarded, else on `Setup`.
    pub fn start(onboarded: bool) -> Self {
        let screen = if onboarded { Screen::Home } else { Screen::Setup };
        Self { screen }
    }

    /// Current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Leave setup for the home screen.
    ///
    /// Returns `true` when this call performed the transition.
    pub fn complete_setup(&mut self) -> bool {
        if self.screen == Screen::Home {
            return false;
        }
        self.screen = Screen::Home;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start() {
        assert_eq!(Navigation::start(false).screen(), Screen::Setup);
        assert_eq!(Navigation::start(true).screen(), Screen::Home);
    }

    #[test]
    fn test_complete_setup_once() {
        let mut nav = Navigation::start(false);
        assert!(nav.complete_setup());
        assert_eq!(nav.screen(), Screen::Home);
        assert!(!nav.complete_setup());
    }
}
