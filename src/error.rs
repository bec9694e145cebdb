use thiserror::Error;

use crate::schedule::Weight;

/// Errors raised while building or solving a weighted interval schedule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An interval whose finish time is not strictly after its start time.
    #[error("invalid interval {id}: finish {finish} must be greater than start {start}")]
    InvalidInterval { id: usize, start: i64, finish: i64 },

    /// An interval carrying a negative weight.
    #[error("invalid interval {id}: weight {weight} must be non-negative")]
    NegativeWeight { id: usize, weight: Weight },

    /// The combined weight of all intervals does not fit in a `Weight`.
    #[error("total weight of the schedule overflows a 64-bit integer")]
    WeightOverflow,

    /// The exponential strategy was asked to solve more activities than it allows.
    #[error("recursive strategy accepts at most {limit} activities, got {len}")]
    RecursionLimit { len: usize, limit: usize },

    #[error("unknown strategy `{0}` (expected recursive, memoized or bottom-up)")]
    UnknownStrategy(String),
}

pub type Result<T> = std::result::Result<T, Error>;
