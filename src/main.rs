mod app;
mod config;
mod controller;
mod error;
mod grid;
mod neighbors;
mod patterns;
mod rules;
mod settings;
mod ui;

use app::{App, Focus};
use clap::Parser;
use config::AppConfig;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers, MouseButton, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(name = "life-simulator")]
#[command(about = "Conway's Game of Life on a finite grid in the terminal")]
struct Args {
    /// Grid edge length in cells (at least 9 for the starting shapes)
    #[arg(long)]
    size: Option<usize>,

    /// Milliseconds between generations while running
    #[arg(long)]
    interval: Option<u64>,

    /// Show neighbor counts on the board
    #[arg(long = "show-neighbors", default_value = "false")]
    show_neighbors: bool,

    /// Config file to load at startup and write with W
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write log output to this file instead of stderr
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

/// stderr shares the terminal with the UI, so it stays silent unless RUST_LOG asks
fn default_log_filter(log_file: Option<&Path>) -> &'static str {
    if log_file.is_some() {
        "info"
    } else {
        "off"
    }
}

fn init_logging(log_file: Option<&Path>) -> io::Result<()> {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_log_filter(log_file)),
    );
    if let Some(path) = log_file {
        let file = File::create(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

/// Config file if present, then CLI overrides
fn load_config(args: &Args, path: Option<&Path>) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let mut config = match path {
        Some(path) if path.exists() => {
            let config = AppConfig::load_from_file(path)?;
            log::info!("loaded config from {}", path.display());
            config
        }
        _ => AppConfig::default(),
    };

    if let Some(size) = args.size {
        config.settings.map_size = size;
    }
    if let Some(interval) = args.interval {
        config.settings.step_interval_ms = interval;
    }
    if args.show_neighbors {
        config.show_neighbors = true;
    }
    config.settings.validate()?;
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let config_path = args.config.clone().or_else(config::default_config_path);
    let config = load_config(&args, config_path.as_deref())?;

    // Build the app before touching the terminal so errors print normally
    let mut app = App::new(config, config_path)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, &mut app);

    // Cleanup
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        log::error!("terminal loop failed: {}", err);
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    // Poll often enough for short step intervals
    const FRAME_DURATION: Duration = Duration::from_millis(16);

    loop {
        // Render current state
        terminal.draw(|frame| ui::render(frame, app))?;

        // Poll for events with timeout
        if event::poll(FRAME_DURATION)? {
            let now = Instant::now();
            match event::read()? {
                Event::Key(key) => {
                    // Only process Press events
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }

                    // Handle Ctrl+C
                    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                        return Ok(());
                    }

                    match key.code {
                        // System controls
                        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                        KeyCode::Char(' ') => app.toggle_running(now),
                        KeyCode::Char('n') | KeyCode::Char('N') => app.step_once(),
                        KeyCode::Char('r') | KeyCode::Char('R') => app.reset(),
                        KeyCode::Char('c') | KeyCode::Char('C') => app.clear(),
                        KeyCode::Char('x') | KeyCode::Char('X') => app.randomize(),
                        KeyCode::Char('g') | KeyCode::Char('G') => app.toggle_neighbors(),
                        KeyCode::Char('w') | KeyCode::Char('W') => app.save_config(),
                        KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('?') => {
                            app.toggle_help()
                        }
                        KeyCode::Char('+') | KeyCode::Char('=') => {
                            app.faster(now);
                            app.focus = Focus::Interval;
                        }
                        KeyCode::Char('-') | KeyCode::Char('_') => {
                            app.slower(now);
                            app.focus = Focus::Interval;
                        }
                        KeyCode::Char('[') => {
                            app.shrink_grid();
                            app.focus = Focus::Size;
                        }
                        KeyCode::Char(']') => {
                            app.grow_grid();
                            app.focus = Focus::Size;
                        }
                        KeyCode::Enter | KeyCode::Char('t') | KeyCode::Char('T') => {
                            app.focus = Focus::Board;
                            app.toggle_at_cursor();
                        }

                        // Navigation
                        KeyCode::Tab => app.next_focus(),
                        KeyCode::BackTab => app.prev_focus(),
                        KeyCode::Up => {
                            if !app.show_help {
                                app.adjust_focused_up(now);
                            }
                        }
                        KeyCode::Down => {
                            if !app.show_help {
                                app.adjust_focused_down(now);
                            }
                        }
                        KeyCode::Left => {
                            app.focus = Focus::Board;
                            app.move_cursor(0, -1);
                        }
                        KeyCode::Right => {
                            app.focus = Focus::Board;
                            app.move_cursor(0, 1);
                        }
                        KeyCode::Esc => {
                            if app.show_help {
                                app.toggle_help();
                            } else if app.focus.is_param() {
                                app.focus = Focus::Board;
                            }
                        }
                        KeyCode::Char('j') | KeyCode::Char('J') => {
                            if app.show_help {
                                app.scroll_help_down(ui::HELP_CONTENT_LINES);
                            }
                        }
                        KeyCode::Char('k') | KeyCode::Char('K') => {
                            if app.show_help {
                                app.scroll_help_up();
                            }
                        }
                        _ => {}
                    }
                }
                Event::Mouse(mouse) => {
                    if mouse.kind == MouseEventKind::Down(MouseButton::Left) && !app.show_help {
                        let size = terminal.size()?;
                        let inner = ui::board_inner(Rect::new(0, 0, size.width, size.height));
                        let grid_size = app.controller.grid().size();
                        if let Some((row, col)) = ui::cell_at(inner, grid_size, mouse.column, mouse.row) {
                            app.focus = Focus::Board;
                            app.toggle_cell(row, col);
                        }
                    }
                }
                _ => {}
            }
        }

        // Run the periodic step trigger
        app.tick(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stderr_logging_silent_by_default() {
        assert_eq!(default_log_filter(None), "off");
        assert_eq!(default_log_filter(Some(Path::new("life.log"))), "info");
    }
}
