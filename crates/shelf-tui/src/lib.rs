// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table};
use shelf_app::{
    AppCommand, AppEvent, AppState, Column, DisplayRow, FilterState, Focus, Product,
    SEARCH_PLACEHOLDER, STOCK_TOGGLE_LABEL, header_count, product_count,
};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(120);
const STATUS_TTL: Duration = Duration::from_secs(4);
const CHECKBOX_ON: &str = "[x]";
const CHECKBOX_OFF: &str = "[ ]";
const FOCUS_MARK: &str = "›";

/// Where the view gets its products and where it reports filter changes.
pub trait AppRuntime {
    fn load_products(&mut self) -> Result<Vec<Product>>;
    fn filter_changed(&mut self, _filter: &FilterState, _visible_products: usize) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
}

#[derive(Debug, Default)]
struct ViewData {
    products: Vec<Product>,
    // Index into the visible products, headers excluded.
    selected_row: usize,
    status_token: u64,
}

/// Source of terminal events; `None` means nothing arrived before `timeout`.
trait EventSource {
    fn next_event(&mut self, timeout: Duration) -> Result<Option<Event>>;
}

struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    fn next_event(&mut self, timeout: Duration) -> Result<Option<Event>> {
        if !event::poll(timeout).context("poll event")? {
            return Ok(None);
        }
        event::read().context("read event").map(Some)
    }
}

pub fn run_app<R: AppRuntime>(state: &mut AppState, runtime: &mut R) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    if let Err(error) = execute!(io::stdout(), terminal::EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(error).context("enter alternate screen");
    }

    let result = Terminal::new(CrosstermBackend::new(io::stdout()))
        .context("create terminal")
        .and_then(|mut terminal| {
            run_event_loop(&mut terminal, &mut CrosstermEvents, state, runtime)
        });

    // Restore the terminal on every exit path, then report the loop error first.
    let restored = restore_terminal();
    result?;
    restored
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    Ok(())
}

fn run_event_loop<B: Backend, E: EventSource, R: AppRuntime>(
    terminal: &mut Terminal<B>,
    events: &mut E,
    state: &mut AppState,
    runtime: &mut R,
) -> Result<()> {
    let mut view_data = ViewData::default();
    let (internal_tx, internal_rx) = mpsc::channel();

    if let Err(error) = load_view_data(runtime, &mut view_data) {
        tracing::warn!(%error, "product load failed");
        state.dispatch(AppCommand::SetStatus(format!("load failed: {error}")));
    }

    loop {
        process_internal_events(state, &view_data, &internal_rx);

        terminal
            .draw(|frame| render(frame, state, &view_data))
            .context("draw frame")?;

        let Some(event) = events.next_event(POLL_INTERVAL)? else {
            continue;
        };
        if let Event::Key(key) = event
            && handle_key_event(state, runtime, &mut view_data, &internal_tx, key)
        {
            return Ok(());
        }
    }
}

fn load_view_data<R: AppRuntime>(runtime: &mut R, view_data: &mut ViewData) -> Result<()> {
    view_data.products = runtime.load_products()?;
    view_data.selected_row = 0;
    tracing::debug!(products = view_data.products.len(), "products loaded");
    Ok(())
}

fn process_internal_events(
    state: &mut AppState,
    view_data: &ViewData,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(STATUS_TTL);
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    state.dispatch(AppCommand::SetStatus(message.into()));
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

fn handle_key_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c')) {
        return true;
    }

    if key.code == KeyCode::F(1) {
        dispatch_and_sync(state, runtime, view_data, AppCommand::ToggleHelp, internal_tx);
        return false;
    }

    if state.help_visible {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
            dispatch_and_sync(state, runtime, view_data, AppCommand::ToggleHelp, internal_tx);
        }
        return false;
    }

    let command = match (key.code, state.focus) {
        (KeyCode::Char('s'), _) if ctrl => Some(AppCommand::ToggleInStockOnly),
        (KeyCode::Tab, _) => Some(AppCommand::FocusNext),
        (KeyCode::BackTab, _) => Some(AppCommand::FocusPrev),
        (KeyCode::Up, _) => {
            move_selection(state, view_data, -1);
            None
        }
        (KeyCode::Down, _) => {
            move_selection(state, view_data, 1);
            None
        }
        (KeyCode::Char('u'), Focus::Search) if ctrl => Some(AppCommand::ClearFilterText),
        (KeyCode::Esc, Focus::Search) => Some(AppCommand::ClearFilterText),
        (KeyCode::Backspace, Focus::Search) => Some(AppCommand::PopFilterChar),
        (KeyCode::Char(ch), Focus::Search)
            if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) =>
        {
            Some(AppCommand::PushFilterChar(ch))
        }
        (KeyCode::Char(' ') | KeyCode::Char('x') | KeyCode::Enter, Focus::StockToggle) => {
            Some(AppCommand::ToggleInStockOnly)
        }
        (KeyCode::Char('k'), Focus::StockToggle) => {
            move_selection(state, view_data, -1);
            None
        }
        (KeyCode::Char('j'), Focus::StockToggle) => {
            move_selection(state, view_data, 1);
            None
        }
        (KeyCode::Char('?'), Focus::StockToggle) => Some(AppCommand::ToggleHelp),
        (KeyCode::Esc, Focus::StockToggle) => Some(AppCommand::FocusPrev),
        _ => None,
    };

    if let Some(command) = command {
        dispatch_and_sync(state, runtime, view_data, command, internal_tx);
    }
    false
}

fn dispatch_and_sync<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    command: AppCommand,
    internal_tx: &Sender<InternalEvent>,
) {
    let events = state.dispatch(command);
    if events.iter().any(AppEvent::changes_rows) {
        let visible = product_count(&state.filter.apply(&view_data.products));
        view_data.selected_row = view_data.selected_row.min(visible.saturating_sub(1));
        tracing::debug!(
            filter_text = %state.filter.filter_text,
            in_stock_only = state.filter.in_stock_only,
            visible,
            "filter changed"
        );
        if let Err(error) = runtime.filter_changed(&state.filter, visible) {
            emit_status(
                state,
                view_data,
                internal_tx,
                format!("filter update failed: {error}"),
            );
            return;
        }
    }
    if events
        .iter()
        .any(|event| matches!(event, AppEvent::StatusUpdated(_)))
    {
        view_data.status_token = view_data.status_token.saturating_add(1);
        schedule_status_clear(internal_tx, view_data.status_token);
    }
}

fn move_selection(state: &AppState, view_data: &mut ViewData, delta: isize) {
    let visible = product_count(&state.filter.apply(&view_data.products));
    if visible == 0 {
        view_data.selected_row = 0;
        return;
    }
    let last = visible as isize - 1;
    let next = (view_data.selected_row as isize + delta).clamp(0, last);
    view_data.selected_row = next as usize;
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let search_style = if state.filter.filter_text.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };
    let search = Paragraph::new(search_text(state)).style(search_style).block(
        Block::default()
            .title("search")
            .borders(Borders::ALL)
            .border_style(focus_border_style(state, Focus::Search)),
    );
    frame.render_widget(search, layout[0]);

    let toggle = Paragraph::new(checkbox_text(state)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(focus_border_style(state, Focus::StockToggle)),
    );
    frame.render_widget(toggle, layout[1]);

    render_table(frame, layout[2], state, view_data);

    let status_widget = Paragraph::new(status_text(state))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status_widget, layout[3]);

    if state.help_visible {
        let area = centered_rect(70, 50, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn focus_border_style(state: &AppState, focus: Focus) -> Style {
    if state.focus == focus {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn render_table(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &AppState,
    view_data: &ViewData,
) {
    let rows = state.filter.apply(&view_data.products);

    let header = Row::new(Column::ALL.map(|column| {
        Cell::from(column.label()).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    }));

    let mut product_index = 0;
    let body = rows
        .iter()
        .map(|row| {
            let cells = row_cells(*row);
            match row {
                DisplayRow::CategoryHeader(_) => Row::new(cells.map(|text| {
                    Cell::from(text).style(
                        Style::default()
                            .fg(Color::Magenta)
                            .add_modifier(Modifier::BOLD),
                    )
                })),
                DisplayRow::Product(product) => {
                    let mut style = Style::default();
                    if !product.stocked {
                        style = style.fg(Color::Red);
                    }
                    if product_index == view_data.selected_row {
                        style = style.bg(Color::DarkGray);
                    }
                    product_index += 1;
                    Row::new(cells.map(|text| Cell::from(text).style(style)))
                }
            }
        })
        .collect::<Vec<_>>();

    let widths = [Constraint::Min(16), Constraint::Length(10)];
    let table = Table::new(body, widths)
        .header(header)
        .column_spacing(2)
        .block(
            Block::default()
                .title(table_title(&rows, view_data.products.len()))
                .borders(Borders::ALL),
        );
    frame.render_widget(table, area);
}

/// Cell text per column. A category label sits in the first column with the
/// rest blank, which reads as a row spanning the table.
fn row_cells(row: DisplayRow<'_>) -> [String; 2] {
    match row {
        DisplayRow::CategoryHeader(category) => [category.to_owned(), String::new()],
        DisplayRow::Product(product) => Column::ALL.map(|column| column.cell(product).to_owned()),
    }
}

fn table_title(rows: &[DisplayRow<'_>], total: usize) -> String {
    format!(
        "products {}/{} groups {}",
        product_count(rows),
        total,
        header_count(rows)
    )
}

fn search_text(state: &AppState) -> String {
    let mark = if state.focus == Focus::Search {
        FOCUS_MARK
    } else {
        " "
    };
    if state.filter.filter_text.is_empty() {
        format!("{mark} {SEARCH_PLACEHOLDER}")
    } else {
        format!("{mark} {}", state.filter.filter_text)
    }
}

fn checkbox_text(state: &AppState) -> String {
    let mark = if state.focus == Focus::StockToggle {
        FOCUS_MARK
    } else {
        " "
    };
    let checkbox = if state.filter.in_stock_only {
        CHECKBOX_ON
    } else {
        CHECKBOX_OFF
    };
    format!("{mark} {checkbox} {STOCK_TOGGLE_LABEL}")
}

fn status_text(state: &AppState) -> String {
    let focus = state.focus.label().to_uppercase();
    let default = match state.focus {
        Focus::Search => {
            "type to filter | bksp/esc/ctrl+u edit | tab focus | ctrl+s stock | up/down | F1 help | ctrl+q"
        }
        Focus::StockToggle => {
            "space/x toggle | tab focus | j/k up/down | ? help | esc search | ctrl+q"
        }
    };
    match &state.status_line {
        Some(status) => format!("{focus} | {status} | {default}"),
        None => format!("{focus} | {default}"),
    }
}

fn help_overlay_text() -> &'static str {
    "global: ctrl+q/ctrl+c quit | tab/shift+tab focus | ctrl+s toggle in-stock | up/down rows | F1 help\n\
search: type to filter names | backspace delete | ctrl+u or esc clear\n\
stock: space/x/enter toggle | j/k rows | ? help | esc back to search\n\
help: esc or ? close"
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
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
        .split(popup_layout[1])[1]
}
