//! Compatibility index: the latest activity each activity can follow.

use std::fmt;
use std::ops::Index;

use log::debug;

use crate::schedule::SortedSchedule;

/// The table `p` where `p[j]` is the rightmost activity `i < j` with
/// `finish[i] <= start[j]`, or `None` if no earlier activity is compatible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompatibilityTable {
    p: Vec<Option<usize>>,
}

impl CompatibilityTable {
    pub fn len(&self) -> usize {
        self.p.len()
    }

    pub fn is_empty(&self) -> bool {
        self.p.is_empty()
    }

    pub fn get(&self, j: usize) -> Option<usize> {
        self.p.get(j).copied().flatten()
    }

    pub fn as_slice(&self) -> &[Option<usize>] {
        &self.p
    }

    /// Returns the table with `-1` standing for "no compatible activity".
    pub fn as_signed(&self) -> Vec<isize> {
        self.p
            .iter()
            .map(|entry| entry.map_or(-1, |i| i as isize))
            .collect()
    }
}

impl Index<usize> for CompatibilityTable {
    type Output = Option<usize>;

    fn index(&self, j: usize) -> &Option<usize> {
        &self.p[j]
    }
}

impl fmt::Display for CompatibilityTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (j, entry) in self.p.iter().enumerate() {
            match entry {
                Some(i) => writeln!(f, "p({j}) = {i}")?,
                None => writeln!(f, "p({j}) = -1")?,
            }
        }
        Ok(())
    }
}

/// Computes the compatibility table in O(n log n).
///
/// The schedule is sorted by finish time, so for each activity `j` the
/// qualifying predecessors form a prefix of `0..j` and a binary search over
/// finish times finds its end.
///
/// # Examples
///
/// ```
/// use winterval::{build_schedule, compute_compatibility};
///
/// let schedule = build_schedule(&[(0, 3, 4), (1, 5, 2), (4, 6, 5), (5, 9, 6)]).unwrap();
/// let p = compute_compatibility(&schedule);
/// assert_eq!(p.as_slice(), &[None, None, Some(0), Some(1)]);
/// ```
pub fn compute_compatibility(schedule: &SortedSchedule) -> CompatibilityTable {
    let activities = schedule.as_slice();
    let n = activities.len();
    let mut p = vec![None; n];

    for (j, current) in activities.iter().enumerate() {
        let start_j = current.start();
        let mut lo = 0_usize;
        let mut hi = j; // exclusive upper bound

        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if activities[mid].finish() <= start_j {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }

        // lo is the first index in 0..j finishing after start_j.
        p[j] = lo.checked_sub(1);
    }

    debug!("computed compatibility table for {n} activities");
    CompatibilityTable { p }
}

/// Computes the compatibility table by scanning backward from each activity.
///
/// O(n^2); serves as the reference that [`compute_compatibility`] must match.
pub fn compute_compatibility_linear(schedule: &SortedSchedule) -> CompatibilityTable {
    let activities = schedule.as_slice();
    let p = activities
        .iter()
        .enumerate()
        .map(|(j, current)| {
            (0..j)
                .rev()
                .find(|&i| activities[i].finish() <= current.start())
        })
        .collect();
    CompatibilityTable { p }
}
