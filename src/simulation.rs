use crate::grid::Grid;
use crate::rules::{GameRules, Pattern};
use rand::{rngs::StdRng, Rng, SeedableRng};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    #[error("pattern {pattern} is too large for a {rows}x{cols} grid")]
    PatternTooLarge {
        pattern: Pattern,
        rows: usize,
        cols: usize,
    },
    #[error("pattern {pattern} does not fit at ({row}, {col}) on a {rows}x{cols} grid")]
    PatternOutOfBounds {
        pattern: Pattern,
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetMode {
    AllDead,
    AllAlive,
    Random,
}

/// Double-buffered Game of Life state.
///
/// A generation reads only `active` and writes only `scratch`; the two are then
/// swapped so the old active buffer is reused on the following step.
pub struct Simulation {
    active: Grid,
    scratch: Grid,
    rules: GameRules,
    rng: StdRng,
    generation: u64,
    revision: u64,
}

impl Simulation {
    /// Allocate an all-dead simulation with an entropy-seeded RNG.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::with_rng(rows, cols, StdRng::from_entropy())
    }

    /// Same as [`Simulation::new`] with a reproducible random sequence.
    pub fn with_seed(rows: usize, cols: usize, seed: u64) -> Self {
        Self::with_rng(rows, cols, StdRng::seed_from_u64(seed))
    }

    fn with_rng(rows: usize, cols: usize, rng: StdRng) -> Self {
        Self {
            active: Grid::new(rows, cols),
            scratch: Grid::new(rows, cols),
            rules: GameRules::conway(),
            rng,
            generation: 0,
            revision: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.active
    }

    /// `(rows, cols)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.active.rows(), self.active.cols())
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Bumped on every change to the active grid.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn population(&self) -> usize {
        self.active.population()
    }

    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.active.is_alive(row, col)
    }

    pub fn set(&mut self, row: usize, col: usize, alive: bool) {
        self.active.set(row, col, alive);
        self.revision += 1;
    }

    pub fn reset(&mut self, mode: ResetMode) {
        match mode {
            ResetMode::AllDead => self.active.fill(false),
            ResetMode::AllAlive => self.active.fill(true),
            ResetMode::Random => self.active.randomize(&mut self.rng),
        }
        self.revision += 1;
        log::info!("Grid reset ({:?}), population {}", mode, self.population());
    }

    /// Stamp `pattern` at a uniformly random offset where it fits entirely.
    /// Returns the chosen `(row, col)` offset.
    pub fn stamp_pattern(&mut self, pattern: Pattern) -> Result<(usize, usize), SimulationError> {
        let (rows, cols) = self.dimensions();
        if pattern.height() > rows || pattern.width() > cols {
            return Err(SimulationError::PatternTooLarge { pattern, rows, cols });
        }
        let row = self.rng.gen_range(0..=rows - pattern.height());
        let col = self.rng.gen_range(0..=cols - pattern.width());
        self.stamp_pattern_at(pattern, row, col)?;
        Ok((row, col))
    }

    /// Copy every pattern cell, dead ones included, with its top-left at `(row, col)`.
    pub fn stamp_pattern_at(&mut self, pattern: Pattern, row: usize, col: usize) -> Result<(), SimulationError> {
        let (rows, cols) = self.dimensions();
        let fits_rows = row.checked_add(pattern.height()).is_some_and(|end| end <= rows);
        let fits_cols = col.checked_add(pattern.width()).is_some_and(|end| end <= cols);
        if !(fits_rows && fits_cols) {
            return Err(SimulationError::PatternOutOfBounds { pattern, row, col, rows, cols });
        }

        for (dr, dc, value) in pattern.cells() {
            self.active.set(row + dr, col + dc, value == 1);
        }
        self.revision += 1;
        log::info!("Stamped {} at ({}, {})", pattern, row, col);
        Ok(())
    }

    pub fn count_live_neighbors(&self, row: usize, col: usize) -> u8 {
        self.active.count_live_neighbors(row, col)
    }

    pub fn next_state(&self, row: usize, col: usize) -> bool {
        let neighbors = self.count_live_neighbors(row, col);
        self.rules.next_state(self.active.is_alive(row, col), neighbors)
    }

    pub fn advance_generation(&mut self) {
        let (rows, cols) = self.dimensions();
        for row in 0..rows {
            for col in 0..cols {
                let alive = self.next_state(row, col);
                self.scratch.set(row, col, alive);
            }
        }
        std::mem::swap(&mut self.active, &mut self.scratch);
        self.generation += 1;
        self.revision += 1;
    }
}
