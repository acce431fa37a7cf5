#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Knowledge base configuration.

use std::fmt::{Display, Formatter};

/// Upper bound on propagation passes per observation before the knowledge base
/// gives up and reports an internal failure. Propagation on a real board settles
/// in a handful of passes; hitting this means something is wrong.
pub const DEFAULT_MAX_PASSES: usize = 1024;

/// Which sentence pairs subset inference considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InferenceMode {
    /// Compare every ordered pair of sentences. Derives everything subset
    /// subtraction can derive.
    #[default]
    AllPairs,
    /// Only compare pairs involving the most recently added sentence.
    /// Cheaper, but misses conclusions that need two older sentences.
    NewestOnly,
}

impl Display for InferenceMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AllPairs => write!(f, "all-pairs"),
            Self::NewestOnly => write!(f, "newest-only"),
        }
    }
}

/// Settings threaded into a `KnowledgeBase` at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KnowledgeConfig {
    /// Maximum propagation passes per observation.
    pub max_passes: usize,
    /// Subset inference strategy.
    pub inference: InferenceMode,
}

impl KnowledgeConfig {
    /// Sets the propagation pass limit.
    #[must_use]
    pub const fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes;
        self
    }

    /// Sets the subset inference strategy.
    #[must_use]
    pub const fn with_inference(mut self, inference: InferenceMode) -> Self {
        self.inference = inference;
        self
    }
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            max_passes: DEFAULT_MAX_PASSES,
            inference: InferenceMode::default(),
        }
    }
}
