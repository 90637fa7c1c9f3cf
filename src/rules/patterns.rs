use std::fmt;

/// Cell rows of a pattern; every row has the same width.
type Cells = &'static [&'static [u8]];

const BLINKER: Cells = &[
    &[0, 0, 0],
    &[1, 1, 1],
    &[0, 0, 0],
];

const TOAD: Cells = &[
    &[0, 0, 0, 0],
    &[0, 1, 1, 1],
    &[1, 1, 1, 0],
    &[0, 0, 0, 0],
];

const BEACON: Cells = &[
    &[1, 1, 0, 0],
    &[1, 1, 0, 0],
    &[0, 0, 1, 1],
    &[0, 0, 1, 1],
];

const PULSAR: Cells = &[
    &[0, 0, 1, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0],
    &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    &[1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
    &[1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
    &[1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
    &[0, 0, 1, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0],
    &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    &[0, 0, 1, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0],
    &[1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
    &[1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
    &[1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
    &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    &[0, 0, 1, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0],
];

const PENTADECATHLON: Cells = &[
    &[0, 0, 1, 0, 0, 0, 0, 1, 0, 0],
    &[1, 1, 0, 1, 1, 1, 1, 0, 1, 1],
    &[0, 0, 1, 0, 0, 0, 0, 1, 0, 0],
];

const GLIDER: Cells = &[
    &[0, 0, 1],
    &[1, 0, 1],
    &[0, 1, 1],
];

const LIGHTWEIGHT_SPACESHIP: Cells = &[
    &[1, 0, 0, 1, 0],
    &[0, 0, 0, 0, 1],
    &[1, 0, 0, 0, 1],
    &[0, 1, 1, 1, 1],
];

const MIDDLEWEIGHT_SPACESHIP: Cells = &[
    &[0, 0, 0, 1, 0, 0],
    &[0, 1, 0, 0, 0, 1],
    &[1, 0, 0, 0, 0, 0],
    &[1, 0, 0, 0, 0, 1],
    &[1, 1, 1, 1, 1, 0],
];

#[rustfmt::skip]
const GOSPER_GLIDER_GUN: Cells = &[
    &[0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1,0,0,0,0,0,0,0,0,0,0,0],
    &[0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1,0,1,0,0,0,0,0,0,0,0,0,0,0],
    &[0,0,0,0,0,0,0,0,0,0,0,0,1,1,0,0,0,0,0,0,1,1,0,0,0,0,0,0,0,0,0,0,0,0,1,1],
    &[0,0,0,0,0,0,0,0,0,0,0,1,0,0,0,1,0,0,0,0,1,1,0,0,0,0,0,0,0,0,0,0,0,0,1,1],
    &[1,1,0,0,0,0,0,0,0,0,1,0,0,0,0,0,1,0,0,0,1,1,0,0,0,0,0,0,0,0,0,0,0,0,0,0],
    &[1,1,0,0,0,0,0,0,0,0,1,0,0,0,1,0,1,1,0,0,0,0,1,0,1,0,0,0,0,0,0,0,0,0,0,0],
    &[0,0,0,0,0,0,0,0,0,0,1,0,0,0,0,0,1,0,0,0,0,0,0,0,1,0,0,0,0,0,0,0,0,0,0,0],
    &[0,0,0,0,0,0,0,0,0,0,0,1,0,0,0,1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0],
    &[0,0,0,0,0,0,0,0,0,0,0,0,1,1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0],
];

/// Predefined patterns that can be stamped onto the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pattern {
    /// Period-2 oscillator
    Blinker,
    /// Period-2 oscillator
    Toad,
    /// Period-2 oscillator made of two blocks
    Beacon,
    /// Period-3 oscillator
    Pulsar,
    /// Period-15 oscillator
    Pentadecathlon,
    /// A diagonal spaceship
    Glider,
    /// A horizontal spaceship
    LightweightSpaceship,
    /// A slightly larger horizontal spaceship
    MiddleweightSpaceship,
    /// A pattern that emits a glider every 30 generations
    GosperGliderGun,
}

impl Pattern {
    /// Every pattern, in digit-key order (`1` is the first entry).
    pub const ALL: [Pattern; 9] = [
        Pattern::Blinker,
        Pattern::Toad,
        Pattern::Beacon,
        Pattern::Pulsar,
        Pattern::Pentadecathlon,
        Pattern::Glider,
        Pattern::LightweightSpaceship,
        Pattern::MiddleweightSpaceship,
        Pattern::GosperGliderGun,
    ];

    /// Pattern bound to a digit key, `1..=9`.
    pub fn from_digit(digit: u32) -> Option<Pattern> {
        match digit {
            1..=9 => Some(Self::ALL[digit as usize - 1]),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Pattern::Blinker => "Blinker",
            Pattern::Toad => "Toad",
            Pattern::Beacon => "Beacon",
            Pattern::Pulsar => "Pulsar",
            Pattern::Pentadecathlon => "Pentadecathlon",
            Pattern::Glider => "Glider",
            Pattern::LightweightSpaceship => "Lightweight spaceship",
            Pattern::MiddleweightSpaceship => "Middleweight spaceship",
            Pattern::GosperGliderGun => "Gosper glider gun",
        }
    }

    fn rows(&self) -> Cells {
        match self {
            Pattern::Blinker => BLINKER,
            Pattern::Toad => TOAD,
            Pattern::Beacon => BEACON,
            Pattern::Pulsar => PULSAR,
            Pattern::Pentadecathlon => PENTADECATHLON,
            Pattern::Glider => GLIDER,
            Pattern::LightweightSpaceship => LIGHTWEIGHT_SPACESHIP,
            Pattern::MiddleweightSpaceship => MIDDLEWEIGHT_SPACESHIP,
            Pattern::GosperGliderGun => GOSPER_GLIDER_GUN,
        }
    }

    pub fn height(&self) -> usize {
        self.rows().len()
    }

    pub fn width(&self) -> usize {
        self.rows().first().map_or(0, |row| row.len())
    }

    /// Every cell of the pattern's bounding box as `(row, col, value)`, dead cells included.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        self.rows().iter().enumerate().flat_map(|(row, values)| {
            values.iter().enumerate().map(move |(col, &value)| (row, col, value))
        })
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}x{})", self.name(), self.height(), self.width())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patterns_are_rectangular_and_binary() {
        for pattern in Pattern::ALL {
            let width = pattern.width();
            assert!(width > 0, "{pattern} is empty");
            for row in pattern.rows() {
                assert_eq!(row.len(), width, "{pattern} has a ragged row");
                assert!(row.iter().all(|&v| v <= 1), "{pattern} has a non-binary cell");
            }
        }
    }

    #[test]
    fn pattern_dimensions() {
        assert_eq!((Pattern::Blinker.height(), Pattern::Blinker.width()), (3, 3));
        assert_eq!((Pattern::Toad.height(), Pattern::Toad.width()), (4, 4));
        assert_eq!((Pattern::Beacon.height(), Pattern::Beacon.width()), (4, 4));
        assert_eq!((Pattern::Pulsar.height(), Pattern::Pulsar.width()), (13, 13));
        assert_eq!((Pattern::Pentadecathlon.height(), Pattern::Pentadecathlon.width()), (3, 10));
        assert_eq!((Pattern::Glider.height(), Pattern::Glider.width()), (3, 3));
        assert_eq!((Pattern::LightweightSpaceship.height(), Pattern::LightweightSpaceship.width()), (4, 5));
        assert_eq!((Pattern::MiddleweightSpaceship.height(), Pattern::MiddleweightSpaceship.width()), (5, 6));
        assert_eq!((Pattern::GosperGliderGun.height(), Pattern::GosperGliderGun.width()), (9, 36));
    }

    #[test]
    fn digits_map_to_patterns_in_order() {
        assert_eq!(Pattern::from_digit(1), Some(Pattern::Blinker));
        assert_eq!(Pattern::from_digit(6), Some(Pattern::Glider));
        assert_eq!(Pattern::from_digit(9), Some(Pattern::GosperGliderGun));
        assert_eq!(Pattern::from_digit(0), None);
        assert_eq!(Pattern::from_digit(10), None);
    }

    #[test]
    fn cells_cover_bounding_box() {
        let cells: Vec<_> = Pattern::Glider.cells().collect();
        assert_eq!(cells.len(), 9);
        assert_eq!(cells.iter().filter(|(_, _, v)| *v == 1).count(), 5);
        assert!(cells.contains(&(0, 2, 1)));
        assert!(cells.contains(&(0, 0, 0)));
    }

    #[test]
    fn gun_has_expected_population() {
        let live = Pattern::GosperGliderGun.cells().filter(|(_, _, v)| *v == 1).count();
        assert_eq!(live, 36);
    }
}
