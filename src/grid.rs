use rand::Rng;

pub const DEAD: u8 = 0;
pub const ALIVE: u8 = 1;

/// Fixed-size 2D array of binary cells, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

impl Grid {
    /// Create a grid with every cell dead
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![DEAD; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    /// Out-of-range coordinates read as dead.
    pub fn get(&self, row: usize, col: usize) -> u8 {
        if self.contains(row, col) {
            self.cells[self.index(row, col)]
        } else {
            DEAD
        }
    }

    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.get(row, col) == ALIVE
    }

    /// Writes are ignored outside the grid.
    pub fn set(&mut self, row: usize, col: usize, alive: bool) {
        if self.contains(row, col) {
            let idx = self.index(row, col);
            self.cells[idx] = if alive { ALIVE } else { DEAD };
        }
    }

    pub fn fill(&mut self, alive: bool) {
        let value = if alive { ALIVE } else { DEAD };
        self.cells.iter_mut().for_each(|cell| *cell = value);
    }

    /// Each cell independently alive with probability one half.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cells
            .iter_mut()
            .for_each(|cell| *cell = if rng.gen::<bool>() { ALIVE } else { DEAD });
    }

    /// Alive cells among the up-to-8 adjacent cells. Edges are hard boundaries.
    pub fn count_live_neighbors(&self, row: usize, col: usize) -> u8 {
        let row_start = row.saturating_sub(1);
        let row_end = row.saturating_add(1).min(self.rows.saturating_sub(1));
        let col_start = col.saturating_sub(1);
        let col_end = col.saturating_add(1).min(self.cols.saturating_sub(1));

        let mut count = 0;
        for r in row_start..=row_end {
            for c in col_start..=col_end {
                if (r, c) != (row, col) && self.is_alive(r, c) {
                    count += 1;
                }
            }
        }
        count
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell == ALIVE).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn new_grid_is_dead() {
        let grid = Grid::new(4, 7);
        assert_eq!(grid.cells().len(), 28);
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn set_and_get() {
        let mut grid = Grid::new(5, 5);
        grid.set(3, 4, true);
        assert!(grid.is_alive(3, 4));
        assert!(!grid.is_alive(4, 3));
        grid.set(3, 4, false);
        assert_eq!(grid.get(3, 4), DEAD);
    }

    #[test]
    fn out_of_range_access_is_ignored() {
        let mut grid = Grid::new(3, 3);
        grid.set(3, 0, true);
        grid.set(0, 3, true);
        assert_eq!(grid.population(), 0);
        assert_eq!(grid.get(10, 10), DEAD);
    }

    #[test]
    fn neighbors_in_interior() {
        let mut grid = Grid::new(3, 3);
        grid.fill(true);
        assert_eq!(grid.count_live_neighbors(1, 1), 8);
    }

    #[test]
    fn neighbors_do_not_wrap() {
        let mut grid = Grid::new(4, 4);
        grid.fill(true);
        assert_eq!(grid.count_live_neighbors(0, 0), 3);
        assert_eq!(grid.count_live_neighbors(0, 2), 5);
        assert_eq!(grid.count_live_neighbors(3, 3), 3);

        let mut grid = Grid::new(4, 4);
        grid.set(3, 3, true);
        grid.set(0, 3, true);
        grid.set(3, 0, true);
        assert_eq!(grid.count_live_neighbors(0, 0), 0);
    }

    #[test]
    fn neighbors_exclude_self() {
        let mut grid = Grid::new(3, 3);
        grid.set(1, 1, true);
        assert_eq!(grid.count_live_neighbors(1, 1), 0);
        assert_eq!(grid.count_live_neighbors(0, 0), 1);
    }

    #[test]
    fn neighbors_at_extreme_coordinates() {
        let mut grid = Grid::new(3, 3);
        grid.fill(true);
        assert_eq!(grid.count_live_neighbors(usize::MAX, usize::MAX), 0);
        assert_eq!(grid.count_live_neighbors(usize::MAX, 1), 0);
        assert_eq!(grid.count_live_neighbors(3, 1), 3);
    }

    #[test]
    fn single_row_and_column_grids() {
        let mut grid = Grid::new(1, 5);
        grid.fill(true);
        assert_eq!(grid.count_live_neighbors(0, 0), 1);
        assert_eq!(grid.count_live_neighbors(0, 2), 2);

        let mut grid = Grid::new(5, 1);
        grid.fill(true);
        assert_eq!(grid.count_live_neighbors(4, 0), 1);
    }

    #[test]
    fn randomize_produces_binary_mix() {
        let mut grid = Grid::new(100, 100);
        let mut rng = StdRng::seed_from_u64(7);
        grid.randomize(&mut rng);
        assert!(grid.cells().iter().all(|&cell| cell == DEAD || cell == ALIVE));
        let pop = grid.population();
        assert!(pop > 4000 && pop < 6000, "population {pop}");
    }

    #[test]
    fn fill_and_clear() {
        let mut grid = Grid::new(6, 8);
        grid.fill(true);
        assert_eq!(grid.population(), 48);
        grid.fill(false);
        assert_eq!(grid.population(), 0);
    }
}
