#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Error types for the knowledge base and the game board.

use crate::minesweeper::cell::Cell;
use thiserror::Error;

/// Errors raised while recording observations or propagating knowledge.
///
/// Input errors (`OutOfBounds`, `CountOutOfRange`, `ConflictingObservation`,
/// `ObservedMine`) are detected before any state is touched. The remaining
/// variants report an internal-consistency failure discovered mid-propagation,
/// after which the knowledge base should no longer be trusted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KnowledgeError {
    /// A cell that is not on the board.
    #[error("cell {cell} lies outside the {height}x{width} board")]
    OutOfBounds {
        /// The offending cell.
        cell: Cell,
        /// Board height.
        height: usize,
        /// Board width.
        width: usize,
    },

    /// More mines reported than the cell has neighbours.
    #[error("cell {cell} reported {count} nearby mines but has only {neighbours} neighbours")]
    CountOutOfRange {
        /// The observed cell.
        cell: Cell,
        /// The reported count.
        count: usize,
        /// In-bounds neighbours of `cell`.
        neighbours: usize,
    },

    /// A second observation of a cell disagreeing with the first.
    #[error("cell {cell} was already observed with count {previous}, now reported as {count}")]
    ConflictingObservation {
        /// The observed cell.
        cell: Cell,
        /// The count recorded first.
        previous: usize,
        /// The count now reported.
        count: usize,
    },

    /// An observation of a cell known to be a mine.
    #[error("cell {cell} was observed as safe but is already known to be a mine")]
    ObservedMine {
        /// The observed cell.
        cell: Cell,
    },

    /// A mark that would make a cell both safe and a mine, or leave some
    /// sentence unsatisfiable.
    #[error("cell {cell} cannot be both safe and a mine")]
    Contradiction {
        /// The cell being marked.
        cell: Cell,
    },

    /// A sentence with more mines than cells, or fewer than none.
    #[error("inconsistent sentence derived: {sentence}")]
    Inconsistent {
        /// The sentence, rendered.
        sentence: String,
    },

    /// Propagation still changing after the configured number of passes.
    #[error("propagation did not reach a fixed point within {passes} passes")]
    PropagationLimit {
        /// The limit that was hit.
        passes: usize,
    },
}

/// Result alias for knowledge base operations.
pub type KnowledgeResult<T> = Result<T, KnowledgeError>;

/// Errors raised while building or querying a game board.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// More mines requested than the board has cells.
    #[error("cannot place {mines} mines on a board of {cells} cells")]
    TooManyMines {
        /// Mines requested.
        mines: usize,
        /// Cells on the board.
        cells: usize,
    },

    /// A cell that is not on the board.
    #[error("cell {cell} lies outside the board")]
    OutOfBounds {
        /// The offending cell.
        cell: Cell,
    },
}

/// Errors surfaced while an agent plays a game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgentError {
    /// The knowledge base rejected an observation.
    #[error(transparent)]
    Knowledge(#[from] KnowledgeError),

    /// The board rejected a move.
    #[error(transparent)]
    Game(#[from] GameError),
}
