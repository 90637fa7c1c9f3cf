//! Rules module for Conway's Game of Life simulation
//!
//! This module contains the transition rule and the library of preset patterns
//! that can be stamped onto the grid.
mod patterns;

pub use patterns::Pattern;

/// Game of Life standard rules:
/// 1. Any live cell with fewer than two live neighbors dies (underpopulation)
/// 2. Any live cell with two or three live neighbors lives (survival)
/// 3. Any live cell with more than three live neighbors dies (overpopulation)
/// 4. Any dead cell with exactly three live neighbors becomes alive (reproduction)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRules {
    /// Minimum neighbors for a live cell to survive
    pub survival_min: u8,
    /// Maximum neighbors for a live cell to survive
    pub survival_max: u8,
    /// Number of neighbors for a dead cell to become alive
    pub birth_count: u8,
}

impl Default for GameRules {
    fn default() -> Self {
        Self::conway()
    }
}

impl GameRules {
    /// Conway's classic Game of Life (B3/S23)
    pub const fn conway() -> Self {
        Self {
            survival_min: 2,
            survival_max: 3,
            birth_count: 3,
        }
    }

    /// State of a cell in the next generation given its current state and live neighbor count.
    pub fn next_state(&self, alive: bool, neighbors: u8) -> bool {
        if alive {
            (self.survival_min..=self.survival_max).contains(&neighbors)
        } else {
            neighbors == self.birth_count
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn live_cell_dies_of_underpopulation() {
        let rules = GameRules::conway();
        assert!(!rules.next_state(true, 0));
        assert!(!rules.next_state(true, 1));
    }

    #[test]
    fn live_cell_survives_with_two_or_three() {
        let rules = GameRules::conway();
        assert!(rules.next_state(true, 2));
        assert!(rules.next_state(true, 3));
    }

    #[test]
    fn live_cell_dies_of_overpopulation() {
        let rules = GameRules::conway();
        for n in 4..=8 {
            assert!(!rules.next_state(true, n), "survived with {n} neighbors");
        }
    }

    #[test]
    fn dead_cell_born_only_with_exactly_three() {
        let rules = GameRules::conway();
        for n in 0..=8 {
            assert_eq!(rules.next_state(false, n), n == 3, "neighbors = {n}");
        }
    }

    #[test]
    fn default_is_conway() {
        assert_eq!(GameRules::default(), GameRules::conway());
    }
}
