//! Recurrence evaluator for `OPT(j) = max(w_j + OPT(p(j)), OPT(j - 1))`.
//!
//! Three interchangeable strategies evaluate the same recurrence:
//! - [`Strategy::Recursive`]: plain recursion, exponential, bounded to small inputs.
//! - [`Strategy::Memoized`]: top-down evaluation with a write-once memo table,
//!   driven by an explicit work-list instead of the call stack.
//! - [`Strategy::BottomUp`]: the canonical table used for reconstruction.
//!
//! All three must return the same optimal weight for every valid schedule.

use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use log::debug;

use crate::compatibility::CompatibilityTable;
use crate::error::{Error, Result};
use crate::schedule::{SortedSchedule, Weight};

/// Largest schedule [`solve_recursive`] accepts. The call tree doubles with
/// every activity when no two activities overlap.
pub const MAX_RECURSIVE_ACTIVITIES: usize = 20;

/// Which evaluation of the recurrence to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Recursive,
    Memoized,
    BottomUp,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Recursive, Strategy::Memoized, Strategy::BottomUp];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Recursive => "recursive",
            Strategy::Memoized => "memoized",
            Strategy::BottomUp => "bottom-up",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "recursive" => Ok(Strategy::Recursive),
            "memoized" => Ok(Strategy::Memoized),
            "bottom-up" | "bottomup" | "bottom_up" => Ok(Strategy::BottomUp),
            _ => Err(Error::UnknownStrategy(s.to_string())),
        }
    }
}

/// `dp[k]` is the optimal weight using only the first `k` sorted activities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DpTable {
    values: Vec<Weight>,
}

impl DpTable {
    /// Optimal weight over the whole schedule, `dp[n]`.
    pub fn optimal(&self) -> Weight {
        self.values.last().copied().unwrap_or(0)
    }

    /// Number of entries, always the schedule length plus one.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[Weight] {
        &self.values
    }
}

impl Index<usize> for DpTable {
    type Output = Weight;

    fn index(&self, k: usize) -> &Weight {
        &self.values[k]
    }
}

/// Per-activity cache for the top-down strategy. Each slot is written once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoTable {
    slots: Vec<Option<Weight>>,
}

impl MemoTable {
    fn new(n: usize) -> Self {
        Self {
            slots: vec![None; n],
        }
    }

    pub fn get(&self, j: usize) -> Option<Weight> {
        self.slots.get(j).copied().flatten()
    }

    fn insert(&mut self, j: usize, value: Weight) {
        debug_assert!(self.slots[j].is_none(), "memo slot {j} written twice");
        self.slots[j] = Some(value);
    }

    /// Number of activities whose optimum has been computed.
    pub fn computed(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}

/// Computes the two candidates for `dp[j]` (1-indexed) from the finished prefix
/// `dp[..j]`: the weight when activity `j - 1` is taken, and when it is skipped.
///
/// The reconstructor calls this too, so both sides compare the same numbers.
pub(crate) fn branch_weights(
    schedule: &SortedSchedule,
    compat: &CompatibilityTable,
    dp: &[Weight],
    j: usize,
) -> (Weight, Weight) {
    let index = j - 1;
    let include = schedule[index].weight() + compat[index].map_or(0, |i| dp[i + 1]);
    let exclude = dp[j - 1];
    (include, exclude)
}

/// Builds the bottom-up table.
///
/// # Panics
///
/// Panics if `compat` was not computed from `schedule`.
///
/// # Examples
///
/// ```
/// use winterval::{build_dp_table, build_schedule, compute_compatibility};
///
/// let schedule = build_schedule(&[(0, 3, 4), (1, 5, 2), (4, 6, 5), (5, 9, 6)]).unwrap();
/// let compat = compute_compatibility(&schedule);
/// let dp = build_dp_table(&schedule, &compat);
/// assert_eq!(dp.as_slice(), &[0, 4, 4, 9, 10]);
/// ```
pub fn build_dp_table(schedule: &SortedSchedule, compat: &CompatibilityTable) -> DpTable {
    let n = schedule.len();
    assert_eq!(
        compat.len(),
        n,
        "compatibility table does not match the schedule"
    );
    let mut values = Vec::with_capacity(n + 1);
    values.push(0);

    for j in 1..=n {
        let (include, exclude) = branch_weights(schedule, compat, &values, j);
        values.push(include.max(exclude));
    }

    DpTable { values }
}

/// Evaluates the recurrence by plain recursion.
///
/// # Errors
///
/// Returns [`Error::RecursionLimit`] for schedules longer than
/// [`MAX_RECURSIVE_ACTIVITIES`].
pub fn solve_recursive(schedule: &SortedSchedule, compat: &CompatibilityTable) -> Result<Weight> {
    let n = schedule.len();
    if n > MAX_RECURSIVE_ACTIVITIES {
        return Err(Error::RecursionLimit {
            len: n,
            limit: MAX_RECURSIVE_ACTIVITIES,
        });
    }
    Ok(opt_recursive(schedule, compat, n.checked_sub(1)))
}

fn opt_recursive(
    schedule: &SortedSchedule,
    compat: &CompatibilityTable,
    j: Option<usize>,
) -> Weight {
    let Some(j) = j else {
        return 0;
    };
    let include = schedule[j].weight() + opt_recursive(schedule, compat, compat[j]);
    let exclude = opt_recursive(schedule, compat, j.checked_sub(1));
    include.max(exclude)
}

/// Evaluates the recurrence top-down, computing each activity at most once.
pub fn solve_memoized(schedule: &SortedSchedule, compat: &CompatibilityTable) -> Weight {
    let memo = fill_memo(schedule, compat);
    schedule
        .len()
        .checked_sub(1)
        .and_then(|last| memo.get(last))
        .unwrap_or(0)
}

/// Runs the top-down evaluation from the last activity and returns the memo.
///
/// A frame stays on the work-list until both of its subproblems are cached,
/// so the list never holds more than about `2n` entries.
pub fn fill_memo(schedule: &SortedSchedule, compat: &CompatibilityTable) -> MemoTable {
    let n = schedule.len();
    let mut memo = MemoTable::new(n);
    let mut stack: Vec<usize> = n.checked_sub(1).into_iter().collect();

    while let Some(&j) = stack.last() {
        if memo.get(j).is_some() {
            stack.pop();
            continue;
        }

        let previous = j.checked_sub(1);
        let include_pending = compat[j].filter(|&i| memo.get(i).is_none());
        let exclude_pending = previous.filter(|&i| memo.get(i).is_none());

        if include_pending.is_none() && exclude_pending.is_none() {
            let include = schedule[j].weight() + compat[j].and_then(|i| memo.get(i)).unwrap_or(0);
            let exclude = previous.and_then(|i| memo.get(i)).unwrap_or(0);
            memo.insert(j, include.max(exclude));
            stack.pop();
        } else {
            stack.extend(exclude_pending);
            stack.extend(include_pending);
        }
    }

    memo
}

/// Evaluates the optimal weight with the chosen strategy.
///
/// # Examples
///
/// ```
/// use winterval::{build_schedule, compute_compatibility, solve, Strategy};
///
/// let schedule = build_schedule(&[(0, 3, 4), (1, 5, 2), (4, 6, 5), (5, 9, 6)]).unwrap();
/// let compat = compute_compatibility(&schedule);
/// for strategy in Strategy::ALL {
///     assert_eq!(solve(&schedule, &compat, strategy).unwrap(), 10);
/// }
/// ```
///
/// # Errors
///
/// Only [`Strategy::Recursive`] can fail, see [`solve_recursive`].
pub fn solve(
    schedule: &SortedSchedule,
    compat: &CompatibilityTable,
    strategy: Strategy,
) -> Result<Weight> {
    let weight = match strategy {
        Strategy::Recursive => solve_recursive(schedule, compat)?,
        Strategy::Memoized => solve_memoized(schedule, compat),
        Strategy::BottomUp => build_dp_table(schedule, compat).optimal(),
    };
    debug!(
        "{strategy} solve over {} activities: optimal weight {weight}",
        schedule.len()
    );
    Ok(weight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compatibility::compute_compatibility;
    use crate::schedule::build_schedule;

    fn prepared(intervals: &[(i64, i64, Weight)]) -> (SortedSchedule, CompatibilityTable) {
        let schedule = build_schedule(intervals).unwrap();
        let compat = compute_compatibility(&schedule);
        (schedule, compat)
    }

    #[test]
    fn test_textbook_dp_table() {
        let (schedule, compat) = prepared(&[
            (0, 6, 60),
            (1, 4, 50),
            (5, 7, 30),
            (3, 5, 20),
            (3, 9, 70),
            (5, 9, 40),
            (6, 10, 30),
            (8, 11, 20),
        ]);
        let dp = build_dp_table(&schedule, &compat);
        assert_eq!(dp.as_slice(), &[0, 50, 50, 60, 80, 80, 90, 90, 100]);
        assert_eq!(dp.len(), schedule.len() + 1);
        assert_eq!(dp.optimal(), 100);
    }

    #[test]
    fn test_strategies_agree_on_basic_input() {
        let (schedule, compat) = prepared(&[(0, 3, 4), (1, 5, 2), (4, 6, 5), (5, 9, 6)]);
        for strategy in Strategy::ALL {
            assert_eq!(solve(&schedule, &compat, strategy).unwrap(), 10, "{strategy}");
        }
    }

    #[test]
    fn test_empty_schedule() {
        let (schedule, compat) = prepared(&[]);
        for strategy in Strategy::ALL {
            assert_eq!(solve(&schedule, &compat, strategy).unwrap(), 0);
        }
        assert_eq!(build_dp_table(&schedule, &compat).as_slice(), &[0]);
    }

    #[test]
    fn test_zero_weights() {
        let (schedule, compat) = prepared(&[(0, 2, 0), (1, 3, 0)]);
        for strategy in Strategy::ALL {
            assert_eq!(solve(&schedule, &compat, strategy).unwrap(), 0);
        }
    }

    #[test]
    fn test_recursion_limit() {
        let intervals: Vec<_> = (0..=MAX_RECURSIVE_ACTIVITIES as i64)
            .map(|i| (i, i + 1, 1))
            .collect();
        let (schedule, compat) = prepared(&intervals);

        let err = solve(&schedule, &compat, Strategy::Recursive).unwrap_err();
        assert_eq!(
            err,
            Error::RecursionLimit {
                len: MAX_RECURSIVE_ACTIVITIES + 1,
                limit: MAX_RECURSIVE_ACTIVITIES
            }
        );

        let expected = intervals.len() as Weight;
        assert_eq!(solve(&schedule, &compat, Strategy::Memoized).unwrap(), expected);
        assert_eq!(solve(&schedule, &compat, Strategy::BottomUp).unwrap(), expected);
    }

    #[test]
    fn test_recursive_bound_is_twenty_activities() {
        assert_eq!(MAX_RECURSIVE_ACTIVITIES, 20);

        let chain = |n: i64| -> Vec<(i64, i64, Weight)> { (0..n).map(|i| (i, i + 1, 1)).collect() };

        let (schedule, compat) = prepared(&chain(20));
        assert_eq!(solve(&schedule, &compat, Strategy::Recursive).unwrap(), 20);

        let (schedule, compat) = prepared(&chain(21));
        assert_eq!(
            solve(&schedule, &compat, Strategy::Recursive).unwrap_err(),
            Error::RecursionLimit { len: 21, limit: 20 }
        );

        let (schedule, compat) = prepared(&chain(25));
        assert_eq!(
            solve(&schedule, &compat, Strategy::Recursive).unwrap_err(),
            Error::RecursionLimit { len: 25, limit: 20 }
        );
        assert_eq!(solve(&schedule, &compat, Strategy::BottomUp).unwrap(), 25);
    }

    #[test]
    #[should_panic(expected = "compatibility table does not match the schedule")]
    fn test_dp_table_rejects_foreign_compatibility() {
        let (schedule, _) = prepared(&[(0, 2, 1), (2, 4, 1)]);
        let (_, other_compat) = prepared(&[(0, 2, 1)]);
        build_dp_table(&schedule, &other_compat);
    }

    #[test]
    fn test_recursive_at_limit() {
        let intervals: Vec<_> = (0..MAX_RECURSIVE_ACTIVITIES as i64)
            .map(|i| (i, i + 2, i + 1))
            .collect();
        let (schedule, compat) = prepared(&intervals);
        assert_eq!(
            solve(&schedule, &compat, Strategy::Recursive).unwrap(),
            solve(&schedule, &compat, Strategy::BottomUp).unwrap()
        );
    }

    #[test]
    fn test_memoized_handles_long_chains() {
        // Deep enough to overflow a naive recursive evaluation.
        let n = 200_000_i64;
        let intervals: Vec<_> = (0..n).map(|i| (i, i + 1, 2)).collect();
        let (schedule, compat) = prepared(&intervals);
        assert_eq!(solve_memoized(&schedule, &compat), 2 * n);
    }

    #[test]
    fn test_memo_matches_dp_prefixes() {
        let (schedule, compat) = prepared(&[
            (0, 6, 60),
            (1, 4, 50),
            (5, 7, 30),
            (3, 5, 20),
            (3, 9, 70),
            (5, 9, 40),
            (6, 10, 30),
            (8, 11, 20),
        ]);
        let memo = fill_memo(&schedule, &compat);
        let dp = build_dp_table(&schedule, &compat);
        assert!(memo.computed() <= schedule.len());
        for j in 0..schedule.len() {
            if let Some(value) = memo.get(j) {
                assert_eq!(value, dp[j + 1], "memo slot {j}");
            }
        }
        assert_eq!(memo.get(schedule.len() - 1), Some(100));
    }

    #[test]
    fn test_strategy_parse_and_display() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.to_string().parse::<Strategy>().unwrap(), strategy);
        }
        assert_eq!("BottomUp".parse::<Strategy>().unwrap(), Strategy::BottomUp);
        assert_eq!(
            "greedy".parse::<Strategy>().unwrap_err(),
            Error::UnknownStrategy("greedy".to_string())
        );
    }
}
