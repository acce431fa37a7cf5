#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Minesweeper inference: sentences over board cells, a knowledge base that
//! propagates them to a fixed point, and an agent that plays with it.

/// The `agent` module plays a game by alternating safe moves and guesses.
pub mod agent;
/// The `cell` module defines board coordinates.
pub mod cell;
/// The `config` module holds the knowledge base settings.
pub mod config;
/// The `error` module defines the errors raised by the knowledge base, the board and the agent.
pub mod error;
/// The `game` module implements the board: mine placement, reveals and flags.
pub mod game;
/// The `geometry` module describes board shapes and neighbourhoods.
pub mod geometry;
/// The `knowledge` module implements the inference engine.
pub mod knowledge;
/// The `sentence` module implements the logical sentences the engine reasons with.
pub mod sentence;
