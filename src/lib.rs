//! Weighted interval scheduling.
//!
//! Given activities with start times, finish times and weights, select a subset
//! of mutually compatible activities with maximum total weight. The pipeline is
//! strictly forward:
//!
//! 1. [`build_schedule`] validates the input and sorts it by finish time.
//! 2. [`compute_compatibility`] finds, for every activity, the latest activity
//!    finishing no later than it starts.
//! 3. [`solve`] evaluates `OPT(j) = max(w_j + OPT(p(j)), OPT(j - 1))` with one
//!    of three [`Strategy`] variants.
//! 4. [`reconstruct`] walks the bottom-up [`DpTable`] back to a [`Solution`].
//!
//! ```
//! use winterval::{WeightedIntervalScheduler, Strategy};
//!
//! let scheduler = WeightedIntervalScheduler::new(&[
//!     (0, 6, 60),
//!     (1, 4, 50),
//!     (5, 7, 30),
//!     (3, 5, 20),
//! ])
//! .unwrap();
//!
//! assert_eq!(scheduler.solve(Strategy::Memoized).unwrap(), 80);
//! assert_eq!(scheduler.solve_with_reconstruction().ids(), vec![2, 3]);
//! ```

pub mod compatibility;
pub mod error;
pub mod evaluator;
pub mod reconstruct;
pub mod schedule;
pub mod solver;


pub use compatibility::{compute_compatibility, compute_compatibility_linear, CompatibilityTable};
pub use error::{Error, Result};
pub use evaluator::{
    build_dp_table, fill_memo, solve, solve_memoized, solve_recursive, DpTable, MemoTable, Strategy,
    MAX_RECURSIVE_ACTIVITIES,
};
pub use reconstruct::{reconstruct, Solution};
pub use schedule::{build_schedule, Activity, SortedSchedule, Weight};
pub use solver::{best_weighted_schedule, max_weighted_schedule, WeightedIntervalScheduler};
