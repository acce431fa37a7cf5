#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Logical sentences about the board.
//!
//! A `Sentence` states that exactly `count` of its `cells` are mines. Sentences
//! shrink as facts become known: a cell confirmed safe is dropped, a cell
//! confirmed mine is dropped and takes one from the count. A sentence whose
//! count is zero proves all its cells safe, and one whose count equals its size
//! proves all its cells mines.

use crate::minesweeper::cell::Cell;
use crate::minesweeper::error::{KnowledgeError, KnowledgeResult};
use itertools::Itertools;
use rustc_hash::FxHashSet;
use std::fmt::{Display, Formatter};

/// "Exactly `count` of `cells` are mines."
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sentence {
    cells: FxHashSet<Cell>,
    count: usize,
}

impl Sentence {
    /// "Exactly `count` of `cells` are mines." Duplicate cells collapse.
    pub fn new(cells: impl IntoIterator<Item = Cell>, count: usize) -> Self {
        Self {
            cells: cells.into_iter().collect(),
            count,
        }
    }

    /// The cells the sentence ranges over.
    #[must_use]
    pub const fn cells(&self) -> &FxHashSet<Cell> {
        &self.cells
    }

    /// How many of the cells are mines.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the sentence ranges over no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `cell` is one of the sentence's cells.
    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Iterates over the cells in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Cells this sentence proves to be mines.
    ///
    /// Non-empty only when every cell is a mine (`count == len` and `count > 0`).
    #[must_use]
    pub fn known_mines(&self) -> FxHashSet<Cell> {
        if self.count > 0 && self.count == self.cells.len() {
            self.cells.clone()
        } else {
            FxHashSet::default()
        }
    }

    /// Cells this sentence proves to be safe.
    ///
    /// Non-empty only when `count == 0`, in which case it is exactly `cells`.
    #[must_use]
    pub fn known_safes(&self) -> FxHashSet<Cell> {
        if self.count == 0 {
            self.cells.clone()
        } else {
            FxHashSet::default()
        }
    }

    /// Removes `cell` and takes one from the count. No-op if `cell` is absent.
    ///
    /// Returns `false`, leaving the sentence untouched, if the count is already
    /// zero and so rules out a mine at `cell`.
    pub fn mark_mine(&mut self, cell: Cell) -> bool {
        if !self.contains(cell) {
            return true;
        }
        let Some(count) = self.count.checked_sub(1) else {
            return false;
        };

        self.cells.remove(&cell);
        self.count = count;
        true
    }

    /// Removes `cell`, leaving the count alone. No-op if `cell` is absent.
    pub fn mark_safe(&mut self, cell: Cell) {
        self.cells.remove(&cell);
    }

    /// Whether marking `cell` a mine keeps this sentence satisfiable.
    #[must_use]
    pub fn admits_mine(&self, cell: Cell) -> bool {
        !self.contains(cell) || self.count > 0
    }

    /// Whether marking `cell` safe keeps this sentence satisfiable.
    #[must_use]
    pub fn admits_safe(&self, cell: Cell) -> bool {
        !self.contains(cell) || self.count < self.cells.len()
    }

    /// `0 <= count <= |cells|`.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.count <= self.cells.len()
    }

    /// An empty sentence says nothing.
    #[must_use]
    pub fn is_trivial(&self) -> bool {
        self.cells.is_empty() && self.count == 0
    }

    /// Whether every cell of `self` is also a cell of `other`.
    #[must_use]
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.cells.is_subset(&other.cells)
    }

    /// Subset inference: if `subset.cells ⊆ self.cells`, the cells of `self`
    /// outside `subset` hold exactly `self.count - subset.count` mines.
    ///
    /// Returns `Ok(None)` when `subset` is not a subset of `self`, or when the
    /// derived sentence is trivial.
    ///
    /// # Errors
    ///
    /// `KnowledgeError::Inconsistent` if the derived count is negative or exceeds
    /// the number of remaining cells. Either means the two sentences contradict
    /// each other.
    pub fn difference(&self, subset: &Self) -> KnowledgeResult<Option<Self>> {
        if !subset.is_subset_of(self) {
            return Ok(None);
        }

        let cells: FxHashSet<Cell> = self.cells.difference(&subset.cells).copied().collect();

        let Some(count) = self.count.checked_sub(subset.count) else {
            return Err(KnowledgeError::Inconsistent {
                sentence: render(&cells, format!("-{}", subset.count - self.count)),
            });
        };

        if count > cells.len() {
            return Err(KnowledgeError::Inconsistent {
                sentence: render(&cells, count),
            });
        }

        let derived = Self { cells, count };
        Ok((!derived.is_trivial()).then_some(derived))
    }
}

fn render(cells: &FxHashSet<Cell>, count: impl Display) -> String {
    format!("{{{}}} = {count}", cells.iter().sorted().join(", "))
}

impl Display for Sentence {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", render(&self.cells, self.count))
    }
}

impl From<(Vec<Cell>, usize)> for Sentence {
    fn from((cells, count): (Vec<Cell>, usize)) -> Self {
        Self::new(cells, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(coords: &[(usize, usize)]) -> Vec<Cell> {
        coords.iter().copied().map(Cell::from).collect()
    }

    #[test]
    fn test_new_deduplicates() {
        let sentence = Sentence::new(cells(&[(0, 0), (0, 0), (0, 1)]), 1);
        assert_eq!(sentence.len(), 2);
        assert_eq!(sentence.count(), 1);
    }

    #[test]
    fn test_known_safes() {
        let sentence = Sentence::new(cells(&[(0, 0), (0, 1)]), 0);
        assert_eq!(sentence.known_safes(), sentence.cells().clone());
        assert!(sentence.known_mines().is_empty());

        let sentence = Sentence::new(cells(&[(0, 0), (0, 1)]), 1);
        assert!(sentence.known_safes().is_empty());
    }

    #[test]
    fn test_known_mines() {
        let sentence = Sentence::new(cells(&[(0, 0), (0, 1)]), 2);
        assert_eq!(sentence.known_mines(), sentence.cells().clone());
        assert!(sentence.known_safes().is_empty());

        let sentence = Sentence::new(cells(&[(0, 0), (0, 1)]), 1);
        assert!(sentence.known_mines().is_empty());
    }

    #[test]
    fn test_empty_sentence_knows_nothing() {
        let sentence = Sentence::default();
        assert!(sentence.known_mines().is_empty());
        assert!(sentence.known_safes().is_empty());
        assert!(sentence.is_trivial());
    }

    #[test]
    fn test_mark_mine() {
        let mut sentence = Sentence::new(cells(&[(0, 0), (0, 1), (1, 0)]), 2);
        assert!(sentence.mark_mine(Cell::new(0, 0)));
        assert_eq!(sentence.len(), 2);
        assert_eq!(sentence.count(), 1);

        sentence.mark_mine(Cell::new(0, 0));
        assert_eq!(sentence.len(), 2);
        assert_eq!(sentence.count(), 1);

        assert!(sentence.mark_mine(Cell::new(5, 5)));
        assert_eq!(sentence.count(), 1);
    }

    #[test]
    fn test_mark_mine_refused_when_count_is_zero() {
        let mut sentence = Sentence::new(cells(&[(0, 0), (0, 1)]), 0);
        assert!(!sentence.mark_mine(Cell::new(0, 0)));
        assert_eq!(sentence, Sentence::new(cells(&[(0, 0), (0, 1)]), 0));
        assert!(sentence.is_consistent());
    }

    #[test]
    fn test_mark_safe() {
        let mut sentence = Sentence::new(cells(&[(0, 0), (0, 1), (1, 0)]), 2);
        sentence.mark_safe(Cell::new(0, 1));
        assert_eq!(sentence.len(), 2);
        assert_eq!(sentence.count(), 2);
        assert_eq!(sentence.known_mines(), sentence.cells().clone());

        sentence.mark_safe(Cell::new(0, 1));
        assert_eq!(sentence.len(), 2);
    }

    #[test]
    fn test_single_mine_then_marked() {
        let x = Cell::new(3, 3);
        let mut sentence = Sentence::new([x], 1);
        assert_eq!(sentence.known_mines(), FxHashSet::from_iter([x]));

        sentence.mark_mine(x);
        assert!(sentence.is_empty());
        assert_eq!(sentence.count(), 0);
        assert!(sentence.known_safes().is_empty());
        assert!(sentence.known_mines().is_empty());
        assert!(sentence.is_trivial());
    }

    #[test]
    fn test_admits() {
        let safe = Sentence::new(cells(&[(0, 0)]), 0);
        assert!(!safe.admits_mine(Cell::new(0, 0)));
        assert!(safe.admits_safe(Cell::new(0, 0)));

        let mine = Sentence::new(cells(&[(0, 0)]), 1);
        assert!(mine.admits_mine(Cell::new(0, 0)));
        assert!(!mine.admits_safe(Cell::new(0, 0)));
        assert!(mine.admits_safe(Cell::new(4, 4)));
    }

    #[test]
    fn test_difference() {
        let a = Sentence::new(cells(&[(0, 0), (0, 1)]), 1);
        let b = Sentence::new(cells(&[(0, 0), (0, 1), (0, 2)]), 2);

        let derived = b.difference(&a).unwrap().unwrap();
        assert_eq!(derived, Sentence::new(cells(&[(0, 2)]), 1));
        assert_eq!(derived.known_mines(), FxHashSet::from_iter([Cell::new(0, 2)]));

        assert_eq!(a.difference(&b), Ok(None));
    }

    #[test]
    fn test_difference_of_equal_sets_is_trivial() {
        let a = Sentence::new(cells(&[(0, 0), (0, 1)]), 1);
        assert_eq!(a.difference(&a.clone()), Ok(None));
    }

    #[test]
    fn test_difference_negative_count() {
        let a = Sentence::new(cells(&[(0, 0)]), 1);
        let b = Sentence::new(cells(&[(0, 0), (0, 1)]), 0);
        assert!(matches!(
            b.difference(&a),
            Err(KnowledgeError::Inconsistent { .. })
        ));
    }

    #[test]
    fn test_difference_count_too_large() {
        let a = Sentence::new(cells(&[(0, 0), (0, 1)]), 0);
        let b = Sentence::new(cells(&[(0, 0), (0, 1), (0, 2)]), 2);
        assert_eq!(
            b.difference(&a),
            Err(KnowledgeError::Inconsistent {
                sentence: "{(0, 2)} = 2".to_string()
            })
        );
    }

    #[test]
    fn test_equality_ignores_order() {
        let a = Sentence::new(cells(&[(0, 0), (1, 1)]), 1);
        let b = Sentence::new(cells(&[(1, 1), (0, 0)]), 1);
        let c = Sentence::new(cells(&[(1, 1), (0, 0)]), 2);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_display() {
        let sentence = Sentence::new(cells(&[(1, 0), (0, 2)]), 1);
        assert_eq!(sentence.to_string(), "{(0, 2), (1, 0)} = 1");
    }
}
