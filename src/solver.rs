//! Solver context owning one schedule and its compatibility table.

use crate::compatibility::{compute_compatibility, CompatibilityTable};
use crate::error::Result;
use crate::evaluator::{build_dp_table, solve, DpTable, Strategy};
use crate::reconstruct::{reconstruct, Solution};
use crate::schedule::{build_schedule, SortedSchedule, Weight};

/// A schedule and its compatibility table, derived once and shared by every solve.
///
/// The scheduler keeps no caches between calls: each solve allocates its own
/// memo or DP table, so repeated calls return identical results and the
/// scheduler can be shared across threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedIntervalScheduler {
    schedule: SortedSchedule,
    compat: CompatibilityTable,
}

impl WeightedIntervalScheduler {
    /// Validates and sorts `(start, finish, weight)` triples, then indexes them.
    pub fn new(intervals: &[(i64, i64, Weight)]) -> Result<Self> {
        build_schedule(intervals).map(Self::from_schedule)
    }

    pub fn from_schedule(schedule: SortedSchedule) -> Self {
        let compat = compute_compatibility(&schedule);
        Self { schedule, compat }
    }

    pub fn schedule(&self) -> &SortedSchedule {
        &self.schedule
    }

    pub fn compatibility(&self) -> &CompatibilityTable {
        &self.compat
    }

    pub fn solve(&self, strategy: Strategy) -> Result<Weight> {
        solve(&self.schedule, &self.compat, strategy)
    }

    pub fn dp_table(&self) -> DpTable {
        build_dp_table(&self.schedule, &self.compat)
    }

    pub fn solve_with_reconstruction(&self) -> Solution {
        let dp = self.dp_table();
        reconstruct(&self.schedule, &self.compat, &dp)
    }
}

/// Computes the maximum total weight of a set of non-overlapping intervals.
///
/// # Examples
///
/// ```
/// use winterval::max_weighted_schedule;
///
/// let intervals = [(0, 3, 4), (1, 5, 2), (4, 6, 5), (5, 9, 6)];
///
/// // One optimal schedule is intervals 0 and 3 => weight = 4 + 6 = 10
/// assert_eq!(max_weighted_schedule(&intervals).unwrap(), 10);
/// ```
pub fn max_weighted_schedule(intervals: &[(i64, i64, Weight)]) -> Result<Weight> {
    WeightedIntervalScheduler::new(intervals)?.solve(Strategy::BottomUp)
}

/// Reconstructs an optimal schedule for Weighted Interval Scheduling.
///
/// If multiple schedules have the same weight, the one preferring later
/// finishing activities on ties is returned.
///
/// # Examples
///
/// ```
/// use winterval::best_weighted_schedule;
///
/// let intervals = [(0, 3, 4), (1, 5, 2), (4, 6, 5), (5, 9, 6)];
/// let best = best_weighted_schedule(&intervals).unwrap();
/// let total: i64 = best.selected.iter().map(|a| a.weight()).sum();
/// assert_eq!(total, 10);
/// ```
pub fn best_weighted_schedule(intervals: &[(i64, i64, Weight)]) -> Result<Solution> {
    Ok(WeightedIntervalScheduler::new(intervals)?.solve_with_reconstruction())
}
