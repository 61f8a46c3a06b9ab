//! Event handling for the TUI.

use std::io::{self, Stdout};
use std::time::Duration;

use aero_core::{Placement, Screen, ShellConfig};
use aero_persistence::ProfileStore;
use aero_tmux::Gateway;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use super::app::App;
use super::setup::SetupField;
use super::ui;

/// Result type for TUI operations.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Initialize the terminal for TUI mode.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the TUI until the user quits.
pub fn run(config: ShellConfig) -> Result<()> {
    let state_file = config.resolve_state_file()?;
    let apps_dir = config.resolve_apps_dir()?;
    info!(
        session = %config.session_name,
        state_file = %state_file.display(),
        apps_dir = %apps_dir.display(),
        "starting shell"
    );

    let mut app = App::new(config, ProfileStore::new(state_file), apps_dir);

    let mut terminal = setup_terminal()?;
    let result = run_loop(&mut terminal, &mut app);
    restore_terminal(&mut terminal)?;
    result
}

fn run_loop<G: Gateway>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App<G>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    handle_key(app, key);
                }
            }
        }

        if app.should_quit {
            info!("shell exiting");
            return Ok(());
        }
    }
}

/// Apply one key press to the app.
pub fn handle_key<G: Gateway>(app: &mut App<G>, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.nav.screen() {
        Screen::Setup => handle_setup_key(app, key),
        Screen::Home if app.picker.is_some() => handle_picker_key(app, key),
        Screen::Home => handle_home_key(app, key),
    }
}

fn handle_setup_key<G: Gateway>(app: &mut App<G>, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Enter => app.finish_setup(),
        KeyCode::Tab | KeyCode::Down => app.setup.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.setup.focus_prev(),
        KeyCode::Left | KeyCode::Right if app.setup.focus == SetupField::Clock => {
            app.setup.toggle_clock()
        }
        KeyCode::Backspace => app.setup.backspace(),
        KeyCode::Char(c) if !ctrl => app.setup.insert_char(c),
        _ => {}
    }
}

fn handle_picker_key<G: Gateway>(app: &mut App<G>, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.picker = None,
        KeyCode::Enter => app.picker_select(),
        KeyCode::Up | KeyCode::Char('k') => app.picker_move(false),
        KeyCode::Down | KeyCode::Char('j') => app.picker_move(true),
        _ => {}
    }
}

fn handle_home_key<G: Gateway>(app: &mut App<G>, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('a') if ctrl => app.open_picker(),
        KeyCode::Char('d') if ctrl => app.close_selected(),
        // Ctrl+= / Ctrl+- as sent by most terminals
        KeyCode::Char('=') | KeyCode::Char('+') if ctrl => app.split(Placement::Right),
        KeyCode::Char('-') if ctrl => app.split(Placement::Left),
        KeyCode::Right if ctrl => app.split(Placement::Right),
        KeyCode::Left if ctrl => app.split(Placement::Left),
        KeyCode::Char(']') => app.split(Placement::Right),
        KeyCode::Char('[') => app.split(Placement::Left),
        KeyCode::Tab => app.cycle_selection(true),
        KeyCode::BackTab => app.cycle_selection(false),
        KeyCode::F(5) => app.refresh_panes(),
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::test_support::test_app;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_ctrl_c_quits_everywhere() {
        let (_temp, mut app) = test_app(false);
        handle_key(&mut app, ctrl('c'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_setup_typing_then_enter() {
        let (_temp, mut app) = test_app(false);
        for c in "ada".chars() {
            handle_key(&mut app, press(KeyCode::Char(c)));
        }
        handle_key(&mut app, press(KeyCode::Tab));
        handle_key(&mut app, press(KeyCode::Right));
        handle_key(&mut app, press(KeyCode::Enter));

        assert_eq!(app.nav.screen(), Screen::Home);
        let profile = app.profile.as_ref().unwrap();
        assert_eq!(profile.username, "ada");
        assert!(!profile.time_24);
    }

    #[test]
    fn test_q_on_setup_is_typed_not_quit() {
        let (_temp, mut app) = test_app(false);
        handle_key(&mut app, press(KeyCode::Char('q')));
        assert!(!app.should_quit);
        assert_eq!(app.setup.username, "q");
    }

    #[test]
    fn test_ctrl_chords_are_not_typed_into_setup() {
        let (_temp, mut app) = test_app(false);
        handle_key(&mut app, press(KeyCode::Char('a')));
        handle_key(&mut app, ctrl('a'));
        handle_key(&mut app, ctrl('d'));
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('B'), KeyModifiers::SHIFT));

        assert_eq!(app.setup.username, "aB");
        assert!(!app.should_quit);
    }

    #[test]
    fn test_home_split_keys() {
        let (_temp, mut app) = test_app(true);
        handle_key(&mut app, ctrl('='));
        handle_key(&mut app, ctrl('-'));
        handle_key(&mut app, press(KeyCode::Char(']')));

        assert_eq!(app.tiles.len(), 4);
        assert_eq!(app.column(Placement::Right).count(), 2);
        assert_eq!(app.column(Placement::Left).count(), 2);
    }

    #[test]
    fn test_home_close_key() {
        let (_temp, mut app) = test_app(true);
        handle_key(&mut app, ctrl('d'));
        assert!(app.tiles.is_empty());
        assert!(app.selected.is_none());
    }

    #[test]
    fn test_picker_esc_closes_overlay_only() {
        let (_temp, mut app) = test_app(true);
        app.picker = Some(crate::tui::AppPicker {
            apps: vec!["/opt/aero_apps/editor".into()],
            selected: 0,
        });
        handle_key(&mut app, press(KeyCode::Esc));
        assert!(app.picker.is_none());
        assert!(!app.should_quit);

        handle_key(&mut app, press(KeyCode::Esc));
        assert!(app.should_quit);
    }
}
