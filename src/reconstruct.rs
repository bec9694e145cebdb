//! Recovers one optimal selection from a finished bottom-up table.

use log::{debug, trace};

use crate::compatibility::CompatibilityTable;
use crate::evaluator::{branch_weights, DpTable};
use crate::schedule::{Activity, SortedSchedule, Weight};

/// An optimal weight together with activities achieving it, in chronological order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Solution {
    pub weight: Weight,
    pub selected: Vec<Activity>,
}

impl Solution {
    /// Ids of the selected activities, in chronological order.
    pub fn ids(&self) -> Vec<usize> {
        self.selected.iter().map(Activity::id).collect()
    }
}

/// Walks the table backward from `dp[n]` to recover the selected activities.
///
/// At each step the include and exclude candidates are recomputed exactly as
/// the forward pass computed them; the activity is taken whenever including it
/// is at least as good, then the walk jumps to its compatible predecessor.
///
/// `dp` must have been built by [`build_dp_table`](crate::build_dp_table) from
/// the same schedule and compatibility table.
///
/// # Panics
///
/// Panics if `compat` does not have one entry per activity or `dp` does not
/// have `schedule.len() + 1` entries.
///
/// # Examples
///
/// ```
/// use winterval::{build_dp_table, build_schedule, compute_compatibility, reconstruct};
///
/// let schedule = build_schedule(&[(0, 3, 4), (1, 5, 2), (4, 6, 5), (5, 9, 6)]).unwrap();
/// let compat = compute_compatibility(&schedule);
/// let dp = build_dp_table(&schedule, &compat);
///
/// let solution = reconstruct(&schedule, &compat, &dp);
/// assert_eq!(solution.weight, 10);
/// assert_eq!(solution.ids(), vec![1, 4]);
/// ```
pub fn reconstruct(
    schedule: &SortedSchedule,
    compat: &CompatibilityTable,
    dp: &DpTable,
) -> Solution {
    assert_eq!(
        compat.len(),
        schedule.len(),
        "compatibility table does not match the schedule"
    );
    assert_eq!(
        dp.len(),
        schedule.len() + 1,
        "dp table does not match the schedule"
    );

    let mut selected = Vec::new();
    let mut j = schedule.len();

    while j > 0 {
        let (include, exclude) = branch_weights(schedule, compat, dp.as_slice(), j);
        if include >= exclude {
            let activity = schedule[j - 1];
            trace!("take {activity} (include {include} >= exclude {exclude})");
            selected.push(activity);
            j = compat[j - 1].map_or(0, |i| i + 1);
        } else {
            trace!("skip index {} (include {include} < exclude {exclude})", j - 1);
            j -= 1;
        }
    }

    selected.reverse();
    let solution = Solution {
        weight: dp.optimal(),
        selected,
    };
    debug!(
        "reconstructed {} of {} activities, weight {}",
        solution.selected.len(),
        schedule.len(),
        solution.weight
    );
    solution
}
