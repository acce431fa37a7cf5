#![deny(missing_docs)]
//! This crate provides a knowledge-based Minesweeper agent: logical sentences about
//! board cells, an inference engine that derives safe cells and mines from them,
//! and a game loop that plays with it.

/// The `minesweeper` module implements the sentence model, the knowledge base, the
/// game board and the playing agent.
pub mod minesweeper;
