use thiserror::Error;

/// How a live cell is drawn inside its `cell_size` square
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellShape {
    Square,
    Circle,
}

impl CellShape {
    /// Value understood by the render shader
    pub fn shader_id(&self) -> u32 {
        match self {
            CellShape::Square => 0,
            CellShape::Circle => 1,
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("cell size must be at least one pixel")]
    ZeroCellSize,
    #[error("a {width}x{height} window holds no {cell_size}px cells")]
    EmptyGrid { width: u32, height: u32, cell_size: u32 },
}

/// Construction-time settings; nothing here changes while the window is open.
#[derive(Debug, Clone)]
pub struct Config {
    pub window_width: u32,
    pub window_height: u32,
    /// Side of one cell in physical pixels
    pub cell_size: u32,
    pub cell_shape: CellShape,
    /// Generations per second while running; 0 never advances
    pub ticks_per_second: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_width: 800,
            window_height: 600,
            cell_size: 6,
            cell_shape: CellShape::Circle,
            ticks_per_second: 10,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        let (rows, cols) = self.grid_dimensions();
        if rows == 0 || cols == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.window_width,
                height: self.window_height,
                cell_size: self.cell_size,
            });
        }
        Ok(())
    }

    /// `(rows, cols)` that fit in the window; partial cells are dropped.
    pub fn grid_dimensions(&self) -> (usize, usize) {
        if self.cell_size == 0 {
            return (0, 0);
        }
        (
            (self.window_height / self.cell_size) as usize,
            (self.window_width / self.cell_size) as usize,
        )
    }
}
