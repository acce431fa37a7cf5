#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The Minesweeper board the agent plays against.
//!
//! Mines are stored row-major in a `BitVec`. The board also records which cells
//! have been revealed and which have been flagged, so it can tell when the game
//! is over.

use crate::minesweeper::cell::Cell;
use crate::minesweeper::error::GameError;
use crate::minesweeper::geometry::{Dimensions, Geometry};
use bit_vec::BitVec;
use fastrand::Rng;
use rustc_hash::FxHashSet;
use tracing::debug;

/// A board with hidden mines, plus the cells revealed and flagged so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Minesweeper {
    dimensions: Dimensions,
    mines: BitVec,
    num_mines: usize,
    revealed: FxHashSet<Cell>,
    flagged: FxHashSet<Cell>,
}

impl Minesweeper {
    /// Places `num_mines` mines uniformly at random.
    ///
    /// # Errors
    ///
    /// `GameError::TooManyMines` if the board has fewer cells than `num_mines`.
    pub fn new(dimensions: Dimensions, num_mines: usize, rng: &mut Rng) -> Result<Self, GameError> {
        let cells = dimensions.num_cells();
        if num_mines > cells {
            return Err(GameError::TooManyMines {
                mines: num_mines,
                cells,
            });
        }

        let mut indices: Vec<usize> = (0..cells).collect();
        rng.shuffle(&mut indices);

        let mut mines = BitVec::from_elem(cells, false);
        for &i in &indices[..num_mines] {
            mines.set(i, true);
        }

        debug!(
            height = dimensions.height,
            width = dimensions.width,
            num_mines,
            "board generated"
        );

        Ok(Self::from_parts(dimensions, mines, num_mines))
    }

    /// Builds a board with mines at exactly the given cells.
    ///
    /// # Errors
    ///
    /// `GameError::OutOfBounds` if a mine lies off the board.
    pub fn with_mines(
        dimensions: Dimensions,
        mines: impl IntoIterator<Item = Cell>,
    ) -> Result<Self, GameError> {
        let mut bits = BitVec::from_elem(dimensions.num_cells(), false);
        for cell in mines {
            if !dimensions.contains(cell) {
                return Err(GameError::OutOfBounds { cell });
            }
            bits.set(cell.row * dimensions.width + cell.col, true);
        }

        let num_mines = bits.iter().filter(|&b| b).count();
        Ok(Self::from_parts(dimensions, bits, num_mines))
    }

    fn from_parts(dimensions: Dimensions, mines: BitVec, num_mines: usize) -> Self {
        Self {
            dimensions,
            mines,
            num_mines,
            revealed: FxHashSet::default(),
            flagged: FxHashSet::default(),
        }
    }

    /// The board's size.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Number of mines placed.
    #[must_use]
    pub const fn num_mines(&self) -> usize {
        self.num_mines
    }

    /// Whether `cell` holds a mine. Off-board cells never do.
    #[must_use]
    pub fn is_mine(&self, cell: Cell) -> bool {
        self.contains(cell) && self.mines.get(self.index(cell)).unwrap_or(false)
    }

    /// Every mine, in row-major order.
    pub fn mine_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells().filter(|&c| self.is_mine(c))
    }

    /// Number of mines among the in-bounds neighbours of `cell`, not counting `cell` itself.
    ///
    /// # Errors
    ///
    /// `GameError::OutOfBounds` if `cell` is off the board.
    pub fn nearby_mines(&self, cell: Cell) -> Result<usize, GameError> {
        self.check(cell)?;
        Ok(self
            .neighbours(cell)
            .into_iter()
            .filter(|&n| self.is_mine(n))
            .count())
    }

    /// Reveals `cell`. Returns its nearby mine count, or `None` if it is a mine.
    ///
    /// # Errors
    ///
    /// `GameError::OutOfBounds` if `cell` is off the board.
    pub fn reveal(&mut self, cell: Cell) -> Result<Option<usize>, GameError> {
        if self.is_mine(cell) {
            return Ok(None);
        }
        let count = self.nearby_mines(cell)?;
        self.revealed.insert(cell);
        Ok(Some(count))
    }

    /// Flags `cell` as a mine.
    ///
    /// # Errors
    ///
    /// `GameError::OutOfBounds` if `cell` is off the board.
    pub fn flag(&mut self, cell: Cell) -> Result<(), GameError> {
        self.check(cell)?;
        self.flagged.insert(cell);
        Ok(())
    }

    /// Cells flagged so far.
    #[must_use]
    pub const fn flagged(&self) -> &FxHashSet<Cell> {
        &self.flagged
    }

    /// Safe cells revealed so far.
    #[must_use]
    pub const fn revealed(&self) -> &FxHashSet<Cell> {
        &self.revealed
    }

    /// Every mine is flagged, and nothing else is.
    #[must_use]
    pub fn won(&self) -> bool {
        self.flagged.len() == self.num_mines && self.flagged.iter().all(|&c| self.is_mine(c))
    }

    /// Every safe cell has been revealed.
    #[must_use]
    pub fn cleared(&self) -> bool {
        self.revealed.len() + self.num_mines == self.num_cells()
    }

    const fn index(&self, cell: Cell) -> usize {
        cell.row * self.dimensions.width + cell.col
    }

    fn check(&self, cell: Cell) -> Result<(), GameError> {
        if self.contains(cell) {
            Ok(())
        } else {
            Err(GameError::OutOfBounds { cell })
        }
    }
}

impl Geometry for Minesweeper {
    fn height(&self) -> usize {
        self.dimensions.height
    }

    fn width(&self) -> usize {
        self.dimensions.width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Minesweeper {
        // X . .
        // X X .
        // . . .
        Minesweeper::with_mines(
            Dimensions::new(3, 3),
            [Cell::new(0, 0), Cell::new(1, 0), Cell::new(1, 1)],
        )
        .unwrap()
    }

    #[test]
    fn test_nearby_mines() {
        let game = board();
        assert_eq!(game.nearby_mines(Cell::new(0, 1)), Ok(3));
        assert_eq!(game.nearby_mines(Cell::new(1, 1)), Ok(2));
        assert_eq!(game.nearby_mines(Cell::new(2, 2)), Ok(1));
        assert_eq!(game.nearby_mines(Cell::new(0, 2)), Ok(1));
        assert_eq!(
            game.nearby_mines(Cell::new(3, 0)),
            Err(GameError::OutOfBounds {
                cell: Cell::new(3, 0)
            })
        );
    }

    #[test]
    fn test_is_mine() {
        let game = board();
        assert!(game.is_mine(Cell::new(1, 0)));
        assert!(!game.is_mine(Cell::new(2, 0)));
        assert!(!game.is_mine(Cell::new(9, 9)));
        assert_eq!(game.num_mines(), 3);
        assert_eq!(game.mine_cells().count(), 3);
    }

    #[test]
    fn test_random_placement() {
        let mut rng = Rng::with_seed(1);
        let game = Minesweeper::new(Dimensions::new(8, 8), 8, &mut rng).unwrap();
        assert_eq!(game.num_mines(), 8);
        assert_eq!(game.mine_cells().count(), 8);

        let mut rng = Rng::with_seed(1);
        let again = Minesweeper::new(Dimensions::new(8, 8), 8, &mut rng).unwrap();
        assert_eq!(game, again);
    }

    #[test]
    fn test_full_board() {
        let mut rng = Rng::with_seed(3);
        let game = Minesweeper::new(Dimensions::new(2, 2), 4, &mut rng).unwrap();
        assert_eq!(game.mine_cells().count(), 4);
    }

    #[test]
    fn test_too_many_mines() {
        let mut rng = Rng::with_seed(1);
        assert_eq!(
            Minesweeper::new(Dimensions::new(2, 2), 5, &mut rng),
            Err(GameError::TooManyMines { mines: 5, cells: 4 })
        );
    }

    #[test]
    fn test_with_mines_out_of_bounds() {
        assert_eq!(
            Minesweeper::with_mines(Dimensions::new(2, 2), [Cell::new(2, 0)]),
            Err(GameError::OutOfBounds {
                cell: Cell::new(2, 0)
            })
        );
    }

    #[test]
    fn test_reveal() {
        let mut game = board();
        assert_eq!(game.reveal(Cell::new(0, 0)), Ok(None));
        assert_eq!(game.reveal(Cell::new(2, 2)), Ok(Some(1)));
        assert!(game.revealed().contains(&Cell::new(2, 2)));
        assert!(!game.cleared());

        for cell in [(0, 1), (0, 2), (1, 2), (2, 0), (2, 1)] {
            game.reveal(Cell::from(cell)).unwrap();
        }
        assert!(game.cleared());
    }

    #[test]
    fn test_won() {
        let mut game = board();
        assert!(!game.won());

        game.flag(Cell::new(0, 0)).unwrap();
        game.flag(Cell::new(1, 0)).unwrap();
        assert!(!game.won());

        game.flag(Cell::new(1, 1)).unwrap();
        assert!(game.won());

        game.flag(Cell::new(2, 2)).unwrap();
        assert!(!game.won());
    }
}
