#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The knowledge base: sentences about the board and the facts derived from them.
//!
//! Every revealed cell is reported through [`KnowledgeBase::record_observation`],
//! which turns the cell's neighbourhood and mine count into a new [`Sentence`]
//! and then propagates to a fixed point:
//!
//! 1.  **Known facts.** Each sentence whose count is zero proves its cells safe,
//!     and each sentence whose count equals its size proves its cells mines. The
//!     facts are read from a snapshot of the sentences and then applied to every
//!     sentence, shrinking them.
//! 2.  **Pruning.** Sentences left empty are dropped, as are sentences that have
//!     shrunk into duplicates of one another.
//! 3.  **Subset inference.** For sentences `A ⊆ B`, `B - A` holds exactly
//!     `B.count - A.count` mines. New sentences derived this way are appended.
//!
//! Passes repeat until one produces neither a fact nor a sentence. Every derived
//! sentence ranges over cells not yet known, and the set of known cells only
//! grows, so the loop terminates. [`KnowledgeConfig::max_passes`] bounds it anyway;
//! exceeding it is reported as an error.
//!
//! `safes` and `mines` are kept disjoint: marking a cell that would contradict an
//! existing fact or sentence fails with [`KnowledgeError::Contradiction`] before
//! any state changes.

use crate::minesweeper::cell::Cell;
use crate::minesweeper::config::{InferenceMode, KnowledgeConfig};
use crate::minesweeper::error::{KnowledgeError, KnowledgeResult};
use crate::minesweeper::geometry::{Dimensions, Geometry};
use crate::minesweeper::sentence::Sentence;
use fastrand::Rng;
use itertools::Itertools;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace, warn};

/// Counters collected over the lifetime of a knowledge base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InferenceStats {
    /// Observations accepted (repeats excluded).
    pub observations: usize,
    /// Propagation passes run.
    pub passes: usize,
    /// Sentences produced by subset inference.
    pub derived: usize,
    /// Sentences dropped as empty or duplicate.
    pub pruned: usize,
}

/// Knowledge about one game, reasoning over the board described by `G`.
#[derive(Debug, Clone)]
pub struct KnowledgeBase<G: Geometry = Dimensions> {
    geometry: G,
    config: KnowledgeConfig,
    /// Observed cells with the count reported for each. Its keys are the moves made.
    observations: FxHashMap<Cell, usize>,
    safes: FxHashSet<Cell>,
    mines: FxHashSet<Cell>,
    sentences: Vec<Sentence>,
    stats: InferenceStats,
}

impl<G: Geometry> KnowledgeBase<G> {
    /// An empty knowledge base for the board described by `geometry`.
    pub fn new(geometry: G, config: KnowledgeConfig) -> Self {
        Self {
            geometry,
            config,
            observations: FxHashMap::default(),
            safes: FxHashSet::default(),
            mines: FxHashSet::default(),
            sentences: Vec::new(),
            stats: InferenceStats::default(),
        }
    }

    /// Same as [`Self::new`] with the default configuration.
    pub fn with_defaults(geometry: G) -> Self {
        Self::new(geometry, KnowledgeConfig::default())
    }

    /// The board being reasoned about.
    pub const fn geometry(&self) -> &G {
        &self.geometry
    }

    /// The configuration given at construction.
    pub const fn config(&self) -> &KnowledgeConfig {
        &self.config
    }

    /// Counters collected so far.
    pub const fn stats(&self) -> InferenceStats {
        self.stats
    }

    /// Cells known to be safe.
    pub const fn safes(&self) -> &FxHashSet<Cell> {
        &self.safes
    }

    /// Cells known to be mines.
    pub const fn mines(&self) -> &FxHashSet<Cell> {
        &self.mines
    }

    /// Sentences that still carry information, in the order they were added.
    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    /// Every observed cell, in no particular order.
    pub fn moves_made(&self) -> impl Iterator<Item = Cell> + '_ {
        self.observations.keys().copied()
    }

    /// Number of observed cells.
    pub fn num_moves_made(&self) -> usize {
        self.observations.len()
    }

    /// Whether `cell` has been observed.
    pub fn is_move_made(&self, cell: Cell) -> bool {
        self.observations.contains_key(&cell)
    }

    /// Whether `cell` is known to be safe.
    pub fn is_known_safe(&self, cell: Cell) -> bool {
        self.safes.contains(&cell)
    }

    /// Whether `cell` is known to be a mine.
    pub fn is_known_mine(&self, cell: Cell) -> bool {
        self.mines.contains(&cell)
    }

    /// Records that `cell` was revealed safe with `count` mines among its neighbours,
    /// then propagates until nothing more can be concluded.
    ///
    /// Repeating an earlier observation with the same count changes nothing.
    ///
    /// # Errors
    ///
    /// - `OutOfBounds` if `cell` is not on the board.
    /// - `CountOutOfRange` if `count` exceeds the number of in-bounds neighbours.
    /// - `ConflictingObservation` if `cell` was observed before with another count.
    /// - `ObservedMine` if `cell` is already known to be a mine.
    /// - `Contradiction` or `Inconsistent` if the observation contradicts what is
    ///   already known.
    /// - `PropagationLimit` if propagation does not settle.
    pub fn record_observation(&mut self, cell: Cell, count: usize) -> KnowledgeResult<()> {
        if !self.geometry.contains(cell) {
            return Err(KnowledgeError::OutOfBounds {
                cell,
                height: self.geometry.height(),
                width: self.geometry.width(),
            });
        }

        let neighbours = self.geometry.neighbours(cell);
        if count > neighbours.len() {
            return Err(KnowledgeError::CountOutOfRange {
                cell,
                count,
                neighbours: neighbours.len(),
            });
        }

        match self.observations.get(&cell) {
            Some(&previous) if previous == count => {
                trace!(%cell, count, "repeat observation ignored");
                return Ok(());
            }
            Some(&previous) => {
                return Err(KnowledgeError::ConflictingObservation {
                    cell,
                    previous,
                    count,
                });
            }
            None => {}
        }

        if self.mines.contains(&cell) {
            return Err(KnowledgeError::ObservedMine { cell });
        }

        // Known mines come off the count, known safes are simply left out.
        let known_mines = neighbours.iter().filter(|&n| self.mines.contains(n)).count();
        let unknown = neighbours
            .iter()
            .copied()
            .filter(|n| !self.safes.contains(n) && !self.mines.contains(n))
            .collect_vec();

        let sentence = match count.checked_sub(known_mines) {
            Some(remaining) if remaining <= unknown.len() => Sentence::new(unknown, remaining),
            _ => {
                let err = KnowledgeError::Inconsistent {
                    sentence: format!(
                        "{cell} reports {count} mines with {known_mines} known and {} unknown neighbours",
                        unknown.len()
                    ),
                };
                warn!(%err, "observation contradicts known mines");
                return Err(err);
            }
        };

        self.mark_safe(cell)?;
        self.observations.insert(cell, count);
        self.stats.observations += 1;
        debug!(%cell, count, "observation recorded");

        self.insert_sentence(sentence);
        self.propagate()
    }

    /// Adds an externally known sentence and propagates.
    ///
    /// # Errors
    ///
    /// `OutOfBounds` for a cell off the board, `Inconsistent` if the sentence's
    /// count exceeds its size before or after known safes are dropped,
    /// `Contradiction` if it rules out a known mine, and any propagation error.
    /// Nothing is stored when validation fails.
    pub fn add_sentence(&mut self, sentence: Sentence) -> KnowledgeResult<()> {
        if let Some(&cell) = sentence.iter().find(|&&c| !self.geometry.contains(c)) {
            return Err(KnowledgeError::OutOfBounds {
                cell,
                height: self.geometry.height(),
                width: self.geometry.width(),
            });
        }

        if !sentence.is_consistent() {
            return Err(KnowledgeError::Inconsistent {
                sentence: sentence.to_string(),
            });
        }

        let mut sentence = sentence;
        for &cell in &self.safes {
            sentence.mark_safe(cell);
        }
        for &cell in &self.mines {
            if !sentence.mark_mine(cell) {
                return Err(KnowledgeError::Contradiction { cell });
            }
        }

        // Dropping known safes can leave more mines than cells.
        if !sentence.is_consistent() {
            let err = KnowledgeError::Inconsistent {
                sentence: sentence.to_string(),
            };
            warn!(%err, "sentence contradicts known safes");
            return Err(err);
        }

        self.insert_sentence(sentence);
        self.propagate()
    }

    /// Marks `cell` safe and removes it from every sentence.
    ///
    /// Does not propagate: sentences shrunk by the mark are only checked for new
    /// facts by the next observation, sentence, or call to [`Self::propagate`].
    ///
    /// # Errors
    ///
    /// `Contradiction` if `cell` is a known mine or some sentence needs it to be
    /// one. Nothing is changed in that case.
    pub fn mark_safe(&mut self, cell: Cell) -> KnowledgeResult<()> {
        if self.mines.contains(&cell) || !self.sentences.iter().all(|s| s.admits_safe(cell)) {
            warn!(%cell, "cell required to be a mine was marked safe");
            return Err(KnowledgeError::Contradiction { cell });
        }

        if self.safes.insert(cell) {
            trace!(%cell, "marked safe");
        }
        for sentence in &mut self.sentences {
            sentence.mark_safe(cell);
        }
        Ok(())
    }

    /// Marks `cell` a mine and removes it from every sentence, decrementing counts.
    /// Like [`Self::mark_safe`], it does not propagate.
    ///
    /// # Errors
    ///
    /// `Contradiction` if `cell` is known safe or some sentence rules out a mine
    /// there. Nothing is changed in that case.
    pub fn mark_mine(&mut self, cell: Cell) -> KnowledgeResult<()> {
        if self.safes.contains(&cell) || !self.sentences.iter().all(|s| s.admits_mine(cell)) {
            warn!(%cell, "cell required to be safe was marked a mine");
            return Err(KnowledgeError::Contradiction { cell });
        }

        if self.mines.insert(cell) {
            trace!(%cell, "marked mine");
        }
        for sentence in &mut self.sentences {
            sentence.mark_mine(cell);
        }
        Ok(())
    }

    /// A known-safe cell that has not been played yet, if any.
    ///
    /// Picks the smallest such cell so repeated queries agree.
    #[must_use]
    pub fn safe_move_candidate(&self) -> Option<Cell> {
        self.safes
            .iter()
            .filter(|&&c| !self.is_move_made(c))
            .min()
            .copied()
    }

    /// A uniformly random cell from `board_cells` that has not been played and is
    /// not a known mine. `None` when no such cell remains.
    pub fn random_move_candidate(
        &self,
        board_cells: impl IntoIterator<Item = Cell>,
        rng: &mut Rng,
    ) -> Option<Cell> {
        let candidates = board_cells
            .into_iter()
            .filter(|&c| !self.is_move_made(c) && !self.mines.contains(&c))
            .sorted()
            .dedup()
            .collect_vec();

        rng.choice(candidates)
    }

    fn insert_sentence(&mut self, sentence: Sentence) -> bool {
        if sentence.is_trivial() || self.sentences.contains(&sentence) {
            return false;
        }
        debug!(%sentence, "sentence added");
        self.sentences.push(sentence);
        true
    }

    /// Runs propagation passes until one concludes nothing new.
    ///
    /// Observations and added sentences propagate on their own. Call this after
    /// marking cells directly to bring the known facts up to date.
    ///
    /// # Errors
    ///
    /// `Contradiction` or `Inconsistent` if the sentences contradict each other,
    /// `PropagationLimit` if `max_passes` is exceeded.
    pub fn propagate(&mut self) -> KnowledgeResult<()> {
        for pass in 1..=self.config.max_passes {
            self.stats.passes += 1;

            let marked = self.apply_known_facts()?;
            self.prune();
            let derived = self.infer_subsets()?;

            trace!(
                pass,
                marked,
                derived,
                sentences = self.sentences.len(),
                "propagation pass"
            );

            if marked == 0 && derived == 0 {
                return Ok(());
            }
        }

        warn!(passes = self.config.max_passes, "propagation did not settle");
        Err(KnowledgeError::PropagationLimit {
            passes: self.config.max_passes,
        })
    }

    /// Applies every fact the current sentences state outright. Returns how many
    /// cells became known.
    fn apply_known_facts(&mut self) -> KnowledgeResult<usize> {
        let new_safes = self
            .sentences
            .iter()
            .flat_map(Sentence::known_safes)
            .filter(|c| !self.safes.contains(c))
            .unique()
            .collect_vec();
        let new_mines = self
            .sentences
            .iter()
            .flat_map(Sentence::known_mines)
            .filter(|c| !self.mines.contains(c))
            .unique()
            .collect_vec();

        let marked = new_safes.len() + new_mines.len();

        for cell in new_safes {
            self.mark_safe(cell)?;
        }
        for cell in new_mines {
            self.mark_mine(cell)?;
        }

        Ok(marked)
    }

    fn prune(&mut self) {
        let before = self.sentences.len();

        let mut kept: Vec<Sentence> = Vec::with_capacity(before);
        for sentence in self.sentences.drain(..) {
            if !sentence.is_trivial() && !kept.contains(&sentence) {
                kept.push(sentence);
            }
        }
        self.sentences = kept;

        debug_assert!(self.sentences.iter().all(Sentence::is_consistent));
        self.stats.pruned += before - self.sentences.len();
    }

    /// Runs one round of subset inference. Returns how many sentences were added.
    fn infer_subsets(&mut self) -> KnowledgeResult<usize> {
        let n = self.sentences.len();
        let pairs = match self.config.inference {
            InferenceMode::AllPairs => (0..n)
                .cartesian_product(0..n)
                .filter(|(i, j)| i != j)
                .collect_vec(),
            InferenceMode::NewestOnly => n
                .checked_sub(1)
                .map(|last| (0..last).flat_map(|i| [(i, last), (last, i)]).collect_vec())
                .unwrap_or_default(),
        };

        let mut derived: Vec<Sentence> = Vec::new();
        for (i, j) in pairs {
            let subset = &self.sentences[i];
            let superset = &self.sentences[j];
            if subset.is_empty() {
                continue;
            }

            let inferred = superset.difference(subset).inspect_err(|err| {
                warn!(%err, %subset, %superset, "subset inference found a contradiction");
            })?;

            if let Some(sentence) = inferred {
                if !self.sentences.contains(&sentence) && !derived.contains(&sentence) {
                    derived.push(sentence);
                }
            }
        }

        let added = derived.len();
        for sentence in derived {
            debug!(%sentence, "sentence derived");
            self.sentences.push(sentence);
        }
        self.stats.derived += added;

        Ok(added)
    }
}
