use crate::config::AppConfig;
use crate::controller::{SimulationController, SimulationEvent};
use crate::error::LifeError;
use std::path::PathBuf;
use std::time::Instant;

/// Density used by the randomize key
const RANDOM_DENSITY: f64 = 0.3;

/// Size selector step; keeps the center on the same parity
const SIZE_STEP: i32 = 2;

/// Focus state for the sidebar parameters
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Focus {
    /// Arrows move the board cursor
    #[default]
    Board,
    Interval,
    Size,
    Neighbors,
}

impl Focus {
    /// Tab cycles through the parameters
    pub fn next(&self) -> Focus {
        match self {
            Focus::Board => Focus::Interval,
            Focus::Interval => Focus::Size,
            Focus::Size => Focus::Neighbors,
            Focus::Neighbors => Focus::Board,
        }
    }

    pub fn prev(&self) -> Focus {
        match self {
            Focus::Board => Focus::Neighbors,
            Focus::Interval => Focus::Board,
            Focus::Size => Focus::Interval,
            Focus::Neighbors => Focus::Size,
        }
    }

    /// Check if focus is on a parameter (not the board)
    pub fn is_param(&self) -> bool {
        !matches!(self, Focus::Board)
    }
}

/// Main application state
pub struct App {
    pub controller: SimulationController,
    pub focus: Focus,
    /// (row, col) of the board cursor
    pub cursor: (usize, usize),
    pub show_neighbors: bool,
    pub show_help: bool,
    pub help_scroll: u16,
    /// Last notable event or error, shown in the status box
    pub status: String,
    pub config_path: Option<PathBuf>,
}

impl App {
    pub fn new(config: AppConfig, config_path: Option<PathBuf>) -> Result<Self, LifeError> {
        let controller = SimulationController::new(config.settings)?;
        let center = config.settings.map_size / 2;
        Ok(Self {
            controller,
            focus: Focus::Board,
            cursor: (center, center),
            show_neighbors: config.show_neighbors,
            show_help: false,
            help_scroll: 0,
            status: "press space to start".to_string(),
            config_path,
        })
    }

    /// Config snapshot for export
    pub fn config(&self) -> AppConfig {
        AppConfig {
            settings: self.controller.settings(),
            show_neighbors: self.show_neighbors,
            ..AppConfig::default()
        }
    }

    /// Run the periodic trigger for this frame
    pub fn tick(&mut self, now: Instant) {
        self.controller.tick(now);
        self.absorb_events();
    }

    /// Turn queued controller events into the status line
    fn absorb_events(&mut self) {
        for event in self.controller.drain_events() {
            match event {
                SimulationEvent::GenerationAdvanced(_) => {}
                SimulationEvent::Halted(reason) => self.status = reason.describe(),
                SimulationEvent::CellChanged { row, col } => {
                    self.status = format!("toggled ({}, {})", row, col);
                }
                SimulationEvent::GridResized(size) => {
                    self.status = format!("grid resized to {}x{}", size, size);
                }
            }
        }
    }

    /// Record the outcome of a user operation
    fn report(&mut self, result: Result<(), LifeError>) {
        match result {
            Ok(()) => self.absorb_events(),
            Err(err) => {
                log::warn!("operation rejected: {}", err);
                self.absorb_events();
                self.status = err.to_string();
            }
        }
    }

    /// Start or halt
    pub fn toggle_running(&mut self, now: Instant) {
        if self.controller.is_running() {
            self.controller.halt();
            self.absorb_events();
        } else {
            self.status = "running".to_string();
            let result = self.controller.start(now).map(|_| ());
            self.report(result);
        }
    }

    pub fn step_once(&mut self) {
        let result = self.controller.single_step().map(|_| ());
        self.report(result);
    }

    pub fn toggle_cell(&mut self, row: usize, col: usize) {
        let result = self.controller.toggle_cell(row, col).map(|_| ());
        if result.is_ok() {
            self.cursor = (row, col);
        }
        self.report(result);
    }

    pub fn toggle_at_cursor(&mut self) {
        let (row, col) = self.cursor;
        self.toggle_cell(row, col);
    }

    /// Move the cursor, clamped to the board
    pub fn move_cursor(&mut self, d_row: isize, d_col: isize) {
        let max = self.controller.grid().size() as isize - 1;
        let row = (self.cursor.0 as isize + d_row).clamp(0, max);
        let col = (self.cursor.1 as isize + d_col).clamp(0, max);
        self.cursor = (row as usize, col as usize);
    }

    fn clamp_cursor(&mut self) {
        let max = self.controller.grid().size() - 1;
        self.cursor = (self.cursor.0.min(max), self.cursor.1.min(max));
    }

    pub fn faster(&mut self, now: Instant) {
        let ms = self.controller.settings().faster_interval();
        let result = self.controller.set_interval(ms, now);
        self.report(result);
    }

    pub fn slower(&mut self, now: Instant) {
        let ms = self.controller.settings().slower_interval();
        let result = self.controller.set_interval(ms, now);
        self.report(result);
    }

    pub fn resize(&mut self, new_size: usize) {
        let result = self.controller.resize(new_size);
        self.clamp_cursor();
        self.report(result);
    }

    pub fn grow_grid(&mut self) {
        let size = self.controller.settings().adjusted_size(SIZE_STEP);
        self.resize(size);
    }

    pub fn shrink_grid(&mut self) {
        let size = self.controller.settings().adjusted_size(-SIZE_STEP);
        self.resize(size);
    }

    pub fn reset(&mut self) {
        let result = self.controller.reset();
        let reset = result.is_ok();
        self.report(result);
        if reset {
            self.status = "board reset".to_string();
        }
    }

    pub fn clear(&mut self) {
        self.controller.clear();
        self.absorb_events();
        self.status = "board cleared".to_string();
    }

    pub fn randomize(&mut self) {
        self.controller.randomize(RANDOM_DENSITY, &mut rand::thread_rng());
        self.absorb_events();
        self.status = "board randomized".to_string();
    }

    /// Show or hide neighbor counts on the board
    pub fn toggle_neighbors(&mut self) {
        self.show_neighbors = !self.show_neighbors;
    }

    /// Export the current config
    pub fn save_config(&mut self) {
        let Some(path) = self.config_path.clone() else {
            self.status = "no config path available".to_string();
            return;
        };
        match self.config().save_to_file(&path) {
            Ok(()) => {
                log::info!("config written to {}", path.display());
                self.status = format!("saved {}", path.display());
            }
            Err(err) => {
                log::warn!("failed to write config: {}", err);
                self.status = err.to_string();
            }
        }
    }

    /// Handle adjusting the currently focused parameter
    pub fn adjust_focused_up(&mut self, now: Instant) {
        match self.focus {
            Focus::Board => self.move_cursor(-1, 0),
            Focus::Interval => self.faster(now),
            Focus::Size => self.grow_grid(),
            Focus::Neighbors => self.toggle_neighbors(),
        }
    }

    pub fn adjust_focused_down(&mut self, now: Instant) {
        match self.focus {
            Focus::Board => self.move_cursor(1, 0),
            Focus::Interval => self.slower(now),
            Focus::Size => self.shrink_grid(),
            Focus::Neighbors => self.toggle_neighbors(),
        }
    }

    /// Cycle to next focus
    pub fn next_focus(&mut self) {
        self.focus = self.focus.next();
    }

    /// Navigate to previous parameter (Shift+Tab)
    pub fn prev_focus(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Toggle help overlay
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        if self.show_help {
            self.help_scroll = 0; // Reset scroll when opening
        }
    }

    pub fn scroll_help_up(&mut self) {
        self.help_scroll = self.help_scroll.saturating_sub(1);
    }

    pub fn scroll_help_down(&mut self, max_scroll: u16) {
        self.help_scroll = (self.help_scroll + 1).min(max_scroll);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SimulationSettings;

    fn app() -> App {
        App::new(AppConfig::default(), None).unwrap()
    }

    #[test]
    fn test_new_centers_cursor() {
        let app = app();
        assert_eq!(app.cursor, (14, 14));
        assert_eq!(app.focus, Focus::Board);
        assert!(!app.controller.is_running());
    }

    #[test]
    fn test_new_rejects_unseedable_size() {
        let config = AppConfig {
            settings: SimulationSettings {
                map_size: 4,
                step_interval_ms: 1000,
            },
            ..AppConfig::default()
        };
        assert!(App::new(config, None).is_err());
    }

    #[test]
    fn test_toggle_at_cursor() {
        let mut app = app();
        app.move_cursor(-14, -14);
        app.toggle_at_cursor();
        assert!(app.controller.grid().get(0, 0).unwrap().alive);
        assert_eq!(app.status, "toggled (0, 0)");
    }

    #[test]
    fn test_move_cursor_clamps() {
        let mut app = app();
        app.move_cursor(100, -100);
        assert_eq!(app.cursor, (28, 0));
    }

    #[test]
    fn test_shrink_clamps_cursor() {
        let mut app = app();
        app.move_cursor(100, 100);
        app.shrink_grid();
        assert_eq!(app.controller.grid().size(), 27);
        assert_eq!(app.cursor, (26, 26));
        assert_eq!(app.status, "grid resized to 27x27");
    }

    #[test]
    fn test_rejected_toggle_reports_error() {
        let mut app = app();
        app.toggle_cell(40, 0);
        assert!(app.status.contains("outside"));
        assert_eq!(app.cursor, (14, 14));
    }

    #[test]
    fn test_interval_adjustment() {
        let mut app = app();
        let now = Instant::now();
        app.focus = Focus::Interval;
        app.adjust_focused_up(now);
        assert_eq!(app.controller.state().step_interval_ms, 750);
        app.adjust_focused_down(now);
        app.adjust_focused_down(now);
        assert_eq!(app.controller.state().step_interval_ms, 1500);
    }

    #[test]
    fn test_toggle_running() {
        let mut app = app();
        let now = Instant::now();
        app.toggle_running(now);
        assert!(app.controller.is_running());
        assert_eq!(app.controller.state().generation, 2);
        app.toggle_running(now);
        assert!(!app.controller.is_running());
        assert_eq!(app.status, "halted");
    }

    #[test]
    fn test_focus_cycle() {
        let mut app = app();
        for _ in 0..4 {
            app.next_focus();
        }
        assert_eq!(app.focus, Focus::Board);
        app.prev_focus();
        assert_eq!(app.focus, Focus::Neighbors);
        assert!(app.focus.is_param());
    }

    #[test]
    fn test_config_snapshot() {
        let mut app = app();
        app.toggle_neighbors();
        app.grow_grid();
        let config = app.config();
        assert!(config.show_neighbors);
        assert_eq!(config.settings.map_size, 31);
        assert_eq!(config.version, 1);
    }
}
