//! TUI rendering using ratatui.

use aero_core::{Placement, Screen, TileState};
use aero_tmux::Gateway;
use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::app::{App, AppPicker, TileView};
use super::setup::{SetupField, SetupForm};

/// Draw the TUI.
pub fn draw<G: Gateway>(frame: &mut Frame, app: &App<G>) {
    match app.nav.screen() {
        Screen::Setup => draw_setup(frame, app),
        Screen::Home => draw_home(frame, app),
    }
}

/// Draw the first-run setup form.
fn draw_setup<G: Gateway>(frame: &mut Frame, app: &App<G>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(8),    // Form
            Constraint::Length(1), // Notice / validation
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    let header = Paragraph::new(" Aero Shell - First-time setup ")
        .style(Style::default().bg(Color::Blue).fg(Color::White).add_modifier(Modifier::BOLD));
    frame.render_widget(header, chunks[0]);

    let form = Paragraph::new(setup_lines(&app.setup))
        .block(Block::default().borders(Borders::ALL).title(" Setup "));
    frame.render_widget(form, chunks[1]);

    let message = match &app.setup.error {
        Some(err) => Paragraph::new(format!(" {} ", err)).style(Style::default().fg(Color::Red)),
        None => Paragraph::new(""),
    };
    frame.render_widget(message, chunks[2]);

    let footer = Paragraph::new(" Tab/Up/Down field | Left/Right/Space clock | Enter save | Esc quit ")
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(footer, chunks[3]);
}

fn setup_lines(form: &SetupForm) -> Vec<Line<'static>> {
    let label = |field: SetupField, text: String| {
        let style = if form.focus == field {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Span::styled(text, style)
    };

    let cursor = |field: SetupField| if form.focus == field { "_" } else { "" };

    let mut lines = vec![
        Line::from(vec![
            label(SetupField::Username, " Username: ".to_string()),
            Span::raw(format!("{}{}", form.username, cursor(SetupField::Username))),
        ]),
        Line::from(vec![
            label(SetupField::Clock, " Clock:    ".to_string()),
            Span::raw(if form.time_24 { "24-hour" } else { "12-hour" }),
        ]),
        Line::from(""),
    ];

    if form.interfaces.is_empty() {
        lines.push(Line::from(Span::styled(
            " No network interfaces detected",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        lines.push(Line::from(" Network interfaces (optional nicknames):"));
        for (i, (iface, nick)) in form.interfaces.iter().zip(&form.nicknames).enumerate() {
            let field = SetupField::Nickname(i);
            lines.push(Line::from(vec![
                label(field, format!("   {:<10} {:<18} ", iface.name, iface.address)),
                Span::raw(format!("{}{}", nick, cursor(field))),
            ]));
        }
    }
    lines
}

/// Draw the home screen with its tile columns.
fn draw_home<G: Gateway>(frame: &mut Frame, app: &App<G>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(5),    // Tiles
            Constraint::Length(1), // Notice
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);
    draw_tiles(frame, app, chunks[1]);
    draw_notice(frame, app, chunks[2]);

    let footer = Paragraph::new(
        " Ctrl+A apps | Ctrl+= / ] split right | Ctrl+- / [ split left | Ctrl+D close | Tab select | F5 refresh | q quit ",
    )
    .style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(footer, chunks[3]);

    if let Some(picker) = &app.picker {
        draw_picker(frame, picker);
    }
}

fn draw_header<G: Gateway>(frame: &mut Frame, app: &App<G>, area: Rect) {
    let user = app.profile.as_ref().map_or("guest", |p| p.username.as_str());
    let clock = if app.time_24() { "%H:%M" } else { "%I:%M %p" };
    let mut header_text = format!(
        " Aero - {} @ {} | {} ",
        user,
        app.orchestrator.config().session_name,
        Local::now().format(clock)
    );
    let network = app.network_summary();
    if !network.is_empty() {
        header_text.push_str(&format!("| {} ", network));
    }
    let header = Paragraph::new(header_text)
        .style(Style::default().bg(Color::Blue).fg(Color::White).add_modifier(Modifier::BOLD));
    frame.render_widget(header, area);
}

fn draw_tiles<G: Gateway>(frame: &mut Frame, app: &App<G>, area: Rect) {
    if app.tiles.is_empty() {
        let empty = Paragraph::new(" No tiles open. Press ] to open a terminal. ")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    }

    let has_right = app.column(Placement::Right).next().is_some();
    let has_left = app.column(Placement::Left).next().is_some();
    let columns: Vec<Placement> = match (has_left, has_right) {
        (true, true) => vec![Placement::Left, Placement::Right],
        (true, false) => vec![Placement::Left],
        (false, _) => vec![Placement::Right],
    };

    let col_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, columns.len() as u32); columns.len()])
        .split(area);

    for (placement, col_area) in columns.into_iter().zip(col_areas.iter()) {
        let tiles: Vec<&TileView> = app.column(placement).collect();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Ratio(1, tiles.len() as u32); tiles.len()])
            .split(*col_area);
        for (tile, row) in tiles.into_iter().zip(rows.iter()) {
            draw_tile(frame, app, tile, *row);
        }
    }
}

fn draw_tile<G: Gateway>(frame: &mut Frame, app: &App<G>, tile: &TileView, area: Rect) {
    let (state, pane) = app.tile_status(tile.id);
    let selected = app.selected == Some(tile.id);

    let border = if selected {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let state_color = match state {
        TileState::Bound => Color::Green,
        TileState::Unbound => Color::Yellow,
        TileState::Closed => Color::DarkGray,
    };

    let pane_text = pane.map_or_else(|| "no pane".to_string(), |p| format!("pane {}", p));
    let body = vec![
        Line::from(vec![
            Span::styled(format!(" {} ", state.label()), Style::default().fg(state_color)),
            Span::raw(pane_text),
        ]),
        Line::from(Span::styled(
            format!(" {}", tile.id),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(format!(" {} ", tile.title));
    frame.render_widget(Paragraph::new(body).block(block), area);
}

fn draw_notice<G: Gateway>(frame: &mut Frame, app: &App<G>, area: Rect) {
    let Some(notice) = app.current_notice() else {
        return;
    };
    let color = if notice.is_error { Color::Red } else { Color::Green };
    let line = Paragraph::new(format!(" {} ", notice.text)).style(Style::default().fg(color));
    frame.render_widget(line, area);
}

fn draw_picker(frame: &mut Frame, picker: &AppPicker) {
    let area = centered_rect(50, 60, frame.area());
    frame.render_widget(Clear, area);

    let items: Vec<ListItem> = picker
        .apps
        .iter()
        .map(|path| {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            ListItem::new(Line::from(vec![
                Span::raw(format!(" {} ", name)),
                Span::styled(path.display().to_string(), Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Launch app (Enter run, Esc cancel) "),
        )
        .highlight_style(Style::default().bg(Color::Cyan).fg(Color::Black));

    let mut state = ListState::default();
    state.select(Some(picker.selected));
    frame.render_stateful_widget(list, area, &mut state);
}

/// A rectangle of `percent_x` by `percent_y` centered in `area`.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
