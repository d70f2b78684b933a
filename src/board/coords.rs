//! Arena coordinates and geometry.
//!
//! The arena is a 28×28 grid clipped to a diamond: row `y` of the friendly
//! half (`y < 14`) spans `x` in `13-y ..= 14+y`, and the enemy half mirrors
//! it. The friendly side owns the bottom edge; mobile units travel upward,
//! so row index doubles as board depth in the evaluator.

/// Width and height of the (clipped) arena grid.
pub const GRID_SIZE: usize = 28;

/// Highest row/column index.
pub const FAR_ROW: u8 = 27;

/// Number of valid cells inside the diamond.
pub const CELL_COUNT: usize = 420;

/// A cell of the arena grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub x: u8,
    pub y: u8,
}

impl Coord {
    pub const fn new(x: u8, y: u8) -> Coord {
        Coord { x, y }
    }

    /// Returns true if the cell lies inside the diamond.
    pub const fn is_valid(self) -> bool {
        if self.x as usize >= GRID_SIZE || self.y as usize >= GRID_SIZE {
            return false;
        }
        let (x, y) = (self.x as i32, self.y as i32);
        if y < 14 {
            x >= 13 - y && x <= 14 + y
        } else {
            x >= y - 14 && x <= 41 - y
        }
    }

    /// Flat index into dense per-cell arrays (row-major over the full square).
    pub const fn index(self) -> usize {
        self.y as usize * GRID_SIZE + self.x as usize
    }

    /// True for cells on the friendly half of the arena.
    pub const fn is_friendly_half(self) -> bool {
        self.y < 14
    }

    /// The same cell seen from the opposing side: a vertical flip.
    /// Used to mirror the friendly rule set onto the opponent.
    pub const fn mirrored(self) -> Coord {
        Coord {
            x: self.x,
            y: FAR_ROW - self.y,
        }
    }

    /// True on the friendly deploy edge (the two bottom diagonals).
    pub const fn is_bottom_edge(self) -> bool {
        if !self.is_valid() || self.y >= 14 {
            return false;
        }
        self.x == 13 - self.y || self.x == 14 + self.y
    }

    /// True on the enemy deploy edge (the two top diagonals).
    pub const fn is_top_edge(self) -> bool {
        if !self.is_valid() || self.y < 14 {
            return false;
        }
        self.x == self.y - 14 || self.x == 41 - self.y
    }
}

/// Iterates every valid cell of the diamond in row-major order.
pub fn all_cells() -> impl Iterator<Item = Coord> {
    (0..GRID_SIZE as u8).flat_map(|y| {
        (0..GRID_SIZE as u8)
            .map(move |x| Coord::new(x, y))
            .filter(|c| c.is_valid())
    })
}

/// The 28 cells of the friendly deploy edge (both bottom diagonals),
/// left edge first, each ordered from the corner outward.
pub fn friendly_edge_cells() -> Vec<Coord> {
    let mut cells = Vec::with_capacity(GRID_SIZE);
    for y in 0..14u8 {
        cells.push(Coord::new(13 - y, y));
    }
    for y in 0..14u8 {
        cells.push(Coord::new(14 + y, y));
    }
    cells
}
