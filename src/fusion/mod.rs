//! Decision fusion: per-modality scores or votes → one verdict.
//!
//! The two engines disagree on the no-evidence case. One-shot
//! login fails closed; continuous monitoring fails open.

mod continuous;
mod engine;
mod verdict;

pub use continuous::{ContinuousFusionEngine, ModalityVote};
pub use engine::{DecisionFusionEngine, ModalityScore, ScoreSet};
pub use verdict::{accepts, AuthVerdict, ContinuousVerdict, INSUFFICIENT_DATA, NO_USABLE_DATA};
