use crate::error::LifeError;
use crate::grid::Grid;
use crate::neighbors;
use crate::patterns;
use crate::rules;
use crate::settings::{self, SimulationSettings};
use rand::Rng;
use std::time::{Duration, Instant};

/// Why the simulation stopped running
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HaltReason {
    /// Halt, resize, reset or clear requested by the user
    UserRequested,
    /// A generation flipped no cell
    Stable,
    /// A generation killed the last living cell
    Extinct,
    /// A step failed; the board is not advanced further
    Failed(LifeError),
}

impl HaltReason {
    pub fn describe(&self) -> String {
        match self {
            HaltReason::UserRequested => "halted".to_string(),
            HaltReason::Stable => "stable board, halted".to_string(),
            HaltReason::Extinct => "board cleared, halted".to_string(),
            HaltReason::Failed(err) => format!("step failed: {}", err),
        }
    }
}

/// Notifications for the presentation layer, drained after each operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationEvent {
    GenerationAdvanced(u64),
    Halted(HaltReason),
    CellChanged { row: usize, col: usize },
    GridResized(usize),
}

/// Result of a single step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The board changed; carries the new generation number
    Advanced(u64),
    Halted(HaltReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationState {
    /// 1 after a reset, +1 per step that changed the board
    pub generation: u64,
    pub running: bool,
    pub step_interval_ms: u64,
}

/// Periodic trigger handle; dropping it cancels the schedule
#[derive(Debug, Clone, Copy)]
struct Ticker {
    interval: Duration,
    next_due: Instant,
}

impl Ticker {
    fn new(interval_ms: u64, now: Instant) -> Self {
        let interval = Duration::from_millis(interval_ms);
        Self {
            interval,
            next_due: now + interval,
        }
    }

    /// Returns true once per elapsed period. A late poll fires once and
    /// re-arms from `now`; missed periods are dropped.
    fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due += self.interval;
        if self.next_due <= now {
            self.next_due = now + self.interval;
        }
        true
    }
}

/// Owns the board and drives generations
pub struct SimulationController {
    grid: Grid,
    state: SimulationState,
    ticker: Option<Ticker>,
    events: Vec<SimulationEvent>,
}

impl SimulationController {
    /// Build an idle controller with the default layout seeded
    pub fn new(settings: SimulationSettings) -> Result<Self, LifeError> {
        settings.validate()?;
        let grid = Self::seeded_grid(settings.map_size)?;
        Ok(Self {
            grid,
            state: SimulationState {
                generation: 1,
                running: false,
                step_interval_ms: settings.step_interval_ms,
            },
            ticker: None,
            events: Vec::new(),
        })
    }

    fn seeded_grid(size: usize) -> Result<Grid, LifeError> {
        let mut grid = Grid::new(size)?;
        patterns::seed(&mut grid, &patterns::default_layout(size))?;
        neighbors::recount_all(&mut grid);
        Ok(grid)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    /// Current settings, for export and the UI selectors
    pub fn settings(&self) -> SimulationSettings {
        SimulationSettings {
            map_size: self.grid.size(),
            step_interval_ms: self.state.step_interval_ms,
        }
    }

    /// Take every queued event
    pub fn drain_events(&mut self) -> Vec<SimulationEvent> {
        std::mem::take(&mut self.events)
    }

    fn stop(&mut self, reason: HaltReason) {
        self.state.running = false;
        self.ticker = None;
        log::info!(
            "simulation stopped at generation {}: {}",
            self.state.generation,
            reason.describe()
        );
        self.events.push(SimulationEvent::Halted(reason));
    }

    /// Advance one generation. Valid in any state.
    ///
    /// An unchanged board, or a board whose last cell just died, halts the
    /// simulation without counting a generation.
    pub fn single_step(&mut self) -> Result<StepOutcome, LifeError> {
        let changed = rules::step(&mut self.grid)?;
        neighbors::recount_all(&mut self.grid);

        let reason = if !changed {
            Some(HaltReason::Stable)
        } else if self.grid.is_empty() {
            Some(HaltReason::Extinct)
        } else {
            None
        };

        match reason {
            Some(reason) => {
                self.stop(reason.clone());
                Ok(StepOutcome::Halted(reason))
            }
            None => {
                self.state.generation += 1;
                log::debug!(
                    "generation {} ({} live cells)",
                    self.state.generation,
                    self.grid.live_count()
                );
                self.events
                    .push(SimulationEvent::GenerationAdvanced(self.state.generation));
                Ok(StepOutcome::Advanced(self.state.generation))
            }
        }
    }

    /// Idle -> Running. Steps once immediately, then every interval.
    /// Returns `Ok(None)` without doing anything if already running.
    pub fn start(&mut self, now: Instant) -> Result<Option<StepOutcome>, LifeError> {
        if self.state.running {
            return Ok(None);
        }
        self.state.running = true;
        log::info!(
            "simulation started at generation {}, every {} ms",
            self.state.generation,
            self.state.step_interval_ms
        );

        let outcome = match self.single_step() {
            Ok(outcome) => outcome,
            Err(err) => {
                self.stop(HaltReason::Failed(err.clone()));
                return Err(err);
            }
        };

        // The immediate step may already have halted a stable board
        if self.state.running {
            self.ticker = Some(Ticker::new(self.state.step_interval_ms, now));
        }
        Ok(Some(outcome))
    }

    /// Running -> Idle, cancelling the schedule. No-op if idle.
    pub fn halt(&mut self) {
        if self.state.running {
            self.stop(HaltReason::UserRequested);
        }
    }

    /// Periodic trigger, polled by the host loop. Performs at most one step.
    pub fn tick(&mut self, now: Instant) -> Option<StepOutcome> {
        if !self.state.running {
            return None;
        }
        let due = self.ticker.as_mut().is_some_and(|ticker| ticker.poll(now));
        if !due {
            return None;
        }

        match self.single_step() {
            Ok(outcome) => Some(outcome),
            Err(err) => {
                log::error!("scheduled step failed: {}", err);
                let reason = HaltReason::Failed(err);
                self.stop(reason.clone());
                Some(StepOutcome::Halted(reason))
            }
        }
    }

    /// Change the step interval; a running schedule restarts from `now`
    pub fn set_interval(&mut self, ms: u64, now: Instant) -> Result<(), LifeError> {
        settings::validate_interval(ms)?;
        self.state.step_interval_ms = ms;
        if self.state.running {
            self.ticker = Some(Ticker::new(ms, now));
        }
        log::info!("step interval set to {} ms", ms);
        Ok(())
    }

    /// Flip a cell and refresh the counts around it. Valid in any state.
    pub fn toggle_cell(&mut self, row: usize, col: usize) -> Result<bool, LifeError> {
        let alive = self.grid.toggle(row, col)?;
        neighbors::recount_around(&mut self.grid, row, col);
        self.events.push(SimulationEvent::CellChanged { row, col });
        Ok(alive)
    }

    /// Reallocate and reseed at a new size.
    ///
    /// The new board is built before anything is touched, so a size the
    /// default layout does not fit on is rejected with prior state intact.
    pub fn resize(&mut self, new_size: usize) -> Result<(), LifeError> {
        self.rebuild(new_size)?;
        log::info!("grid resized to {}x{}", new_size, new_size);
        self.events.push(SimulationEvent::GridResized(new_size));
        Ok(())
    }

    /// Discard the board and reseed the default layout at the current size
    pub fn reset(&mut self) -> Result<(), LifeError> {
        self.rebuild(self.grid.size())?;
        log::info!("board reset");
        Ok(())
    }

    fn rebuild(&mut self, size: usize) -> Result<(), LifeError> {
        settings::validate_size(size)?;
        let layout = patterns::default_layout(size);
        patterns::fits(&layout, size)?;

        self.halt();
        self.grid.resize(size)?;
        patterns::seed(&mut self.grid, &layout)?;
        neighbors::recount_all(&mut self.grid);
        self.state.generation = 1;
        Ok(())
    }

    /// Kill every cell
    pub fn clear(&mut self) {
        self.halt();
        patterns::clear(&mut self.grid);
        neighbors::recount_all(&mut self.grid);
        self.state.generation = 1;
        log::info!("board cleared");
    }

    /// Replace the board with random cells at the given density
    pub fn randomize<R: Rng>(&mut self, density: f64, rng: &mut R) {
        self.halt();
        patterns::clear(&mut self.grid);
        patterns::scatter(&mut self.grid, density, rng);
        neighbors::recount_all(&mut self.grid);
        self.state.generation = 1;
        log::info!(
            "board randomized ({} live cells)",
            self.grid.live_count()
        );
    }
}
