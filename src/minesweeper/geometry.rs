#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Board geometry: bounds checks and neighbourhood lookup.
//!
//! The knowledge base never hard-codes the board it reasons about. Instead it
//! asks a `Geometry` for the in-bounds neighbours of a cell, so the same engine
//! works on any rectangular board, or on the game board itself.

use crate::minesweeper::cell::Cell;
use itertools::iproduct;
use smallvec::SmallVec;

/// The 8-neighbourhood of a cell. Never longer than 8, so it lives on the stack.
pub type Neighbours = SmallVec<[Cell; 8]>;

/// Trait implemented by anything that knows the shape of a board.
pub trait Geometry {
    /// Number of rows.
    fn height(&self) -> usize;

    /// Number of columns.
    fn width(&self) -> usize;

    /// Returns `true` if `cell` lies on the board.
    fn contains(&self, cell: Cell) -> bool {
        cell.row < self.height() && cell.col < self.width()
    }

    /// Returns the in-bounds cells adjacent to `cell`, excluding `cell` itself.
    ///
    /// Cells on the edge or in a corner of the board have fewer than 8 neighbours.
    fn neighbours(&self, cell: Cell) -> Neighbours {
        let rows = cell.row.saturating_sub(1)..=(cell.row + 1).min(self.height().saturating_sub(1));
        let cols = cell.col.saturating_sub(1)..=(cell.col + 1).min(self.width().saturating_sub(1));

        iproduct!(rows, cols)
            .map(Cell::from)
            .filter(|&n| n != cell && self.contains(n))
            .collect()
    }

    /// Every cell on the board, in row-major order.
    fn cells(&self) -> impl Iterator<Item = Cell> {
        iproduct!(0..self.height(), 0..self.width()).map(Cell::from)
    }

    /// Total number of cells on the board.
    fn num_cells(&self) -> usize {
        self.height() * self.width()
    }
}

/// A plain rectangular board of `height` rows and `width` columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    /// Number of rows.
    pub height: usize,
    /// Number of columns.
    pub width: usize,
}

impl Dimensions {
    /// Creates a `height` by `width` board.
    #[must_use]
    pub const fn new(height: usize, width: usize) -> Self {
        Self { height, width }
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::new(8, 8)
    }
}

impl Geometry for Dimensions {
    fn height(&self) -> usize {
        self.height
    }

    fn width(&self) -> usize {
        self.width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interior_neighbours() {
        let dims = Dimensions::new(8, 8);
        let neighbours = dims.neighbours(Cell::new(1, 1));
        assert_eq!(neighbours.len(), 8);
        assert!(!neighbours.contains(&Cell::new(1, 1)));
        assert!(neighbours.contains(&Cell::new(0, 0)));
        assert!(neighbours.contains(&Cell::new(2, 2)));
    }

    #[test]
    fn test_corner_neighbours() {
        let dims = Dimensions::new(8, 8);
        let mut neighbours = dims.neighbours(Cell::new(7, 7)).to_vec();
        neighbours.sort();
        assert_eq!(
            neighbours,
            vec![Cell::new(6, 6), Cell::new(6, 7), Cell::new(7, 6)]
        );
    }

    #[test]
    fn test_edge_neighbours() {
        let dims = Dimensions::new(3, 5);
        assert_eq!(dims.neighbours(Cell::new(0, 2)).len(), 5);
        assert_eq!(dims.neighbours(Cell::new(2, 0)).len(), 3);
    }

    #[test]
    fn test_single_cell_board() {
        let dims = Dimensions::new(1, 1);
        assert!(dims.neighbours(Cell::new(0, 0)).is_empty());
    }

    #[test]
    fn test_contains() {
        let dims = Dimensions::new(2, 3);
        assert!(dims.contains(Cell::new(1, 2)));
        assert!(!dims.contains(Cell::new(2, 0)));
        assert!(!dims.contains(Cell::new(0, 3)));
    }

    #[test]
    fn test_cells() {
        let dims = Dimensions::new(2, 2);
        let cells: Vec<Cell> = dims.cells().collect();
        assert_eq!(
            cells,
            vec![
                Cell::new(0, 0),
                Cell::new(0, 1),
                Cell::new(1, 0),
                Cell::new(1, 1)
            ]
        );
        assert_eq!(dims.num_cells(), 4);
    }
}
