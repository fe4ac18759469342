use crate::app::{App, Focus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const SIDEBAR_WIDTH: u16 = 24;

/// Terminal columns per board cell
const CELL_WIDTH: u16 = 2;

/// Max scroll for help content (generous to account for text wrapping on small screens)
pub const HELP_CONTENT_LINES: u16 = 40;

// UI color scheme
const BORDER_COLOR: Color = Color::Cyan;
const HIGHLIGHT_COLOR: Color = Color::Yellow;
const TEXT_COLOR: Color = Color::White;
const DIM_TEXT_COLOR: Color = Color::Gray;
const LIVE_COLOR: Color = Color::Green;
const DEAD_COLOR: Color = Color::DarkGray;

/// Creates a standard styled block with rounded borders
fn styled_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_COLOR))
        .title(title)
}

fn split_main(area: Rect) -> (Rect, Rect) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
        .split(area);
    (layout[0], layout[1])
}

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let (sidebar, board) = split_main(area);

    render_sidebar(frame, sidebar, app);
    render_board(frame, board, app);

    if app.show_help {
        render_help_overlay(frame, area, app);
    }
}

/// Board area inside its border, for mapping mouse clicks
pub fn board_inner(frame_area: Rect) -> Rect {
    let (_, board) = split_main(frame_area);
    styled_block("").inner(board)
}

/// Map a terminal position to the (row, col) of the cell drawn there
pub fn cell_at(inner: Rect, grid_size: usize, column: u16, row: u16) -> Option<(usize, usize)> {
    if column < inner.x || row < inner.y {
        return None;
    }
    let col = ((column - inner.x) / CELL_WIDTH) as usize;
    let r = (row - inner.y) as usize;
    let visible_cols = (inner.width / CELL_WIDTH) as usize;
    let visible_rows = inner.height as usize;
    if col < grid_size.min(visible_cols) && r < grid_size.min(visible_rows) {
        Some((r, col))
    } else {
        None
    }
}

fn render_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Status
            Constraint::Length(5), // Parameters
            Constraint::Min(8),    // Controls
        ])
        .split(area);

    render_status_box(frame, sections[0], app);
    render_params_box(frame, sections[1], app);
    render_controls_box(frame, sections[2]);
}

fn render_status_box(frame: &mut Frame, area: Rect, app: &App) {
    let block = styled_block(" Game of Life ");
    let state = app.controller.state();

    let (status_text, status_color) = if state.running {
        ("RUNNING", LIVE_COLOR)
    } else {
        ("IDLE", HIGHLIGHT_COLOR)
    };

    let content = vec![
        Line::from(Span::styled(
            format!("Generation: {}", state.generation),
            Style::default().fg(TEXT_COLOR),
        )),
        Line::from(Span::styled(
            format!("Live cells: {}", app.controller.grid().live_count()),
            Style::default().fg(TEXT_COLOR),
        )),
        Line::from(Span::styled(status_text, Style::default().fg(status_color))),
        Line::from(Span::styled(
            app.status.clone(),
            Style::default().fg(DIM_TEXT_COLOR),
        )),
    ];

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_params_box(frame: &mut Frame, area: Rect, app: &App) {
    let block = styled_block(" Parameters ");

    let make_line = |label: &str, value: String, focused: bool| {
        let prefix = if focused { "> " } else { "  " };
        let style = if focused {
            Style::default().fg(HIGHLIGHT_COLOR)
        } else {
            Style::default().fg(TEXT_COLOR)
        };
        Line::from(Span::styled(format!("{}{}: {}", prefix, label, value), style))
    };

    let settings = app.controller.settings();
    let content = vec![
        make_line(
            "Interval",
            format!("{} ms", settings.step_interval_ms),
            app.focus == Focus::Interval,
        ),
        make_line(
            "Size",
            format!("{}x{}", settings.map_size, settings.map_size),
            app.focus == Focus::Size,
        ),
        make_line(
            "Counts",
            if app.show_neighbors { "shown" } else { "hidden" }.to_string(),
            app.focus == Focus::Neighbors,
        ),
    ];

    frame.render_widget(Paragraph::new(content).block(block), area);
}

fn render_controls_box(frame: &mut Frame, area: Rect) {
    let key_style = Style::default().fg(HIGHLIGHT_COLOR);
    let desc_style = Style::default().fg(DIM_TEXT_COLOR);

    let make_control = |key: &'static str, desc: &'static str| -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("{:>5}", key), key_style),
            Span::styled(format!(" {}", desc), desc_style),
        ])
    };

    let content = vec![
        make_control("Space", "start/halt"),
        make_control("N", "single step"),
        make_control("Enter", "toggle cell"),
        make_control("+/-", "speed"),
        make_control("[/]", "grid size"),
        make_control("R", "reset"),
        make_control("C", "clear"),
        make_control("X", "randomize"),
        make_control("G", "neighbor counts"),
        make_control("W", "write config"),
        make_control("H", "help"),
        make_control("Q", "quit"),
    ];

    let paragraph = Paragraph::new(content).block(styled_block(" Controls "));
    frame.render_widget(paragraph, area);
}

/// Glyphs and style for one cell
fn cell_span(alive: bool, neighbors: u8, show_neighbors: bool, is_cursor: bool) -> Span<'static> {
    let text = if show_neighbors {
        format!("{:>2}", neighbors)
    } else if alive {
        "██".to_string()
    } else {
        " ·".to_string()
    };

    let mut style = match (alive, show_neighbors) {
        (true, true) => Style::default().fg(Color::Black).bg(LIVE_COLOR),
        (true, false) => Style::default().fg(LIVE_COLOR),
        (false, _) => Style::default().fg(DEAD_COLOR),
    };
    if is_cursor {
        style = style.bg(HIGHLIGHT_COLOR).add_modifier(Modifier::BOLD);
    }
    Span::styled(text, style)
}

fn render_board(frame: &mut Frame, area: Rect, app: &App) {
    let block = styled_block("");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let grid = app.controller.grid();
    let show_cursor = app.focus == Focus::Board;
    let mut rows: Vec<Vec<Span>> = vec![Vec::with_capacity(grid.size()); grid.size()];
    grid.for_each_cell(|r, c, alive, neighbors| {
        let is_cursor = show_cursor && app.cursor == (r, c);
        rows[r].push(cell_span(alive, neighbors, app.show_neighbors, is_cursor));
    });

    let lines: Vec<Line> = rows.into_iter().map(Line::from).collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_help_overlay(frame: &mut Frame, area: Rect, app: &App) {
    let help_width = 56.min(area.width.saturating_sub(4));
    let help_height = area.height.saturating_sub(4).min(30);
    let x = (area.width.saturating_sub(help_width)) / 2;
    let y = (area.height.saturating_sub(help_height)) / 2;

    let help_area = Rect {
        x: area.x + x,
        y: area.y + y,
        width: help_width,
        height: help_height,
    };

    // Clear the background
    frame.render_widget(Clear, help_area);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled("CONWAY'S GAME OF LIFE", Style::default().fg(BORDER_COLOR))),
        Line::from(""),
        Line::from("Each generation, a live cell with fewer than two or more than three live neighbors dies, a live cell with two or three survives, and a dead cell with exactly three is born."),
        Line::from(""),
        Line::from("The board does not wrap: border cells have fewer neighbors. The run halts by itself once a generation changes nothing or the last cell dies."),
        Line::from(""),
        Line::from(Span::styled("BOARD:", Style::default().fg(HIGHLIGHT_COLOR))),
        Line::from("Arrows move the cursor, Enter/T or a mouse click toggles a cell, G shows neighbor counts"),
        Line::from(""),
        Line::from(Span::styled("RUNNING:", Style::default().fg(HIGHLIGHT_COLOR))),
        Line::from("Space=Start/Halt, N=Single step, +/-=Speed"),
        Line::from(""),
        Line::from(Span::styled("BOARD SETUP:", Style::default().fg(HIGHLIGHT_COLOR))),
        Line::from("[/]=Grid size, R=Reset to starting shapes, C=Clear, X=Random board"),
        Line::from(""),
        Line::from(Span::styled("OTHER:", Style::default().fg(HIGHLIGHT_COLOR))),
        Line::from("Tab/Shift+Tab=Select parameter, Up/Down=Adjust, Esc=Back to board, W=Write config, Q=Quit"),
        Line::from(""),
    ];

    let content_height = content.len() as u16;
    let visible_height = help_height.saturating_sub(2); // minus borders
    let is_scrollable = content_height > visible_height;

    let title = if is_scrollable {
        " Help (J/K scroll, H to close) "
    } else {
        " Help (H to close) "
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(HIGHLIGHT_COLOR))
        .title(title);

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: true })
        .scroll((app.help_scroll, 0));

    frame.render_widget(paragraph, help_area);
}
