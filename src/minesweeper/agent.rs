#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! An agent that plays Minesweeper using a `KnowledgeBase`.
//!
//! Each turn the agent plays a cell it knows to be safe. Only when it knows of
//! none does it guess, picking uniformly among cells it has neither played nor
//! proven to be mines.

use crate::minesweeper::cell::Cell;
use crate::minesweeper::error::AgentError;
use crate::minesweeper::game::Minesweeper;
use crate::minesweeper::geometry::{Dimensions, Geometry};
use crate::minesweeper::knowledge::KnowledgeBase;
use fastrand::Rng;
use itertools::Itertools;
use tracing::{debug, info};

/// A move chosen by the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    /// A cell proven safe.
    Safe(Cell),
    /// A guess.
    Random(Cell),
}

impl Move {
    /// The cell to play.
    #[must_use]
    pub const fn cell(self) -> Cell {
        match self {
            Self::Safe(cell) | Self::Random(cell) => cell,
        }
    }
}

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Every mine flagged or every safe cell revealed.
    Won,
    /// The agent revealed a mine.
    Lost(Cell),
    /// No eligible move was left.
    Stuck,
}

/// Plays a game, choosing each move from what its knowledge base has proven.
#[derive(Debug, Clone)]
pub struct Agent<G: Geometry = Dimensions> {
    knowledge: KnowledgeBase<G>,
    rng: Rng,
}

impl<G: Geometry> Agent<G> {
    /// Creates an agent reasoning with `knowledge` and guessing with `rng`.
    pub fn new(knowledge: KnowledgeBase<G>, rng: Rng) -> Self {
        Self { knowledge, rng }
    }

    /// The agent's knowledge base.
    pub const fn knowledge(&self) -> &KnowledgeBase<G> {
        &self.knowledge
    }

    /// Mutable access to the knowledge base, for seeding it with facts.
    pub const fn knowledge_mut(&mut self) -> &mut KnowledgeBase<G> {
        &mut self.knowledge
    }

    /// The next cell to play: a known-safe cell if there is one, otherwise a guess.
    pub fn next_move(&mut self) -> Option<Move> {
        if let Some(cell) = self.knowledge.safe_move_candidate() {
            return Some(Move::Safe(cell));
        }

        let cells = self.knowledge.geometry().cells().collect_vec();
        self.knowledge
            .random_move_candidate(cells, &mut self.rng)
            .map(Move::Random)
    }

    /// Plays `game` to the end, feeding every revealed count back into the
    /// knowledge base and flagging every mine it proves.
    ///
    /// # Errors
    ///
    /// Any `KnowledgeError` raised while recording an observation, or a
    /// `GameError` if the knowledge base and the board disagree on geometry.
    pub fn play(&mut self, game: &mut Minesweeper) -> Result<Outcome, AgentError> {
        loop {
            let Some(mv) = self.next_move() else {
                info!(moves = self.knowledge.num_moves_made(), "no move left");
                return Ok(Outcome::Stuck);
            };

            let cell = mv.cell();
            let Some(count) = game.reveal(cell)? else {
                info!(?mv, moves = self.knowledge.num_moves_made(), "revealed a mine");
                return Ok(Outcome::Lost(cell));
            };

            debug!(?mv, count, "move played");
            self.knowledge.record_observation(cell, count)?;

            for &mine in self.knowledge.mines() {
                game.flag(mine)?;
            }

            if game.won() || game.cleared() {
                info!(moves = self.knowledge.num_moves_made(), "game won");
                return Ok(Outcome::Won);
            }
        }
    }
}
