//! Interval catalog: validated activities ordered by finish time.

use std::fmt;
use std::ops::Index;

use log::debug;

use crate::error::{Error, Result};

/// Weight domain shared by every table in the crate.
pub type Weight = i64;

/// Represents a single weighted activity to be scheduled.
///
/// Activities are immutable once created. The interval is treated as half-open,
/// so an activity finishing at `t` is compatible with one starting at `t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Activity {
    id: usize,
    start: i64,
    finish: i64,
    weight: Weight,
}

impl Activity {
    /// Creates a new `Activity`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInterval`] if `finish <= start` and
    /// [`Error::NegativeWeight`] if `weight < 0`.
    pub fn new(id: usize, start: i64, finish: i64, weight: Weight) -> Result<Self> {
        if finish <= start {
            return Err(Error::InvalidInterval { id, start, finish });
        }
        if weight < 0 {
            return Err(Error::NegativeWeight { id, weight });
        }
        Ok(Self {
            id,
            start,
            finish,
            weight,
        })
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn finish(&self) -> i64 {
        self.finish
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }

    /// Returns `true` if the two activities cannot both be scheduled.
    pub fn overlaps(&self, other: &Activity) -> bool {
        self.start < other.finish && other.start < self.finish
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Activity {}: [{}, {}] weight={}",
            self.id, self.start, self.finish, self.weight
        )
    }
}

/// Activities sorted ascending by finish time, ties kept in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortedSchedule {
    activities: Vec<Activity>,
    total_weight: Weight,
}

impl SortedSchedule {
    /// Builds a schedule from activities with caller-assigned ids.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WeightOverflow`] if the weights cannot be summed without
    /// overflowing. Every subset of the schedule weighs at most that sum, so no
    /// later stage has to check its arithmetic.
    pub fn from_activities(mut activities: Vec<Activity>) -> Result<Self> {
        let total_weight = activities
            .iter()
            .try_fold(0 as Weight, |acc, a| acc.checked_add(a.weight))
            .ok_or(Error::WeightOverflow)?;

        // `sort_by_key` is stable, which keeps equal-finish activities in input order.
        activities.sort_by_key(|a| a.finish);

        debug!(
            "built schedule of {} activities, total weight {}",
            activities.len(),
            total_weight
        );
        Ok(Self {
            activities,
            total_weight,
        })
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Activity> {
        self.activities.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Activity> {
        self.activities.iter()
    }

    pub fn as_slice(&self) -> &[Activity] {
        &self.activities
    }

    /// Sum of every activity's weight; an upper bound on any solution.
    pub fn total_weight(&self) -> Weight {
        self.total_weight
    }
}

impl Index<usize> for SortedSchedule {
    type Output = Activity;

    fn index(&self, index: usize) -> &Activity {
        &self.activities[index]
    }
}

impl<'a> IntoIterator for &'a SortedSchedule {
    type Item = &'a Activity;
    type IntoIter = std::slice::Iter<'a, Activity>;

    fn into_iter(self) -> Self::IntoIter {
        self.activities.iter()
    }
}

/// Validates `(start, finish, weight)` triples and sorts them by finish time.
///
/// Activities receive ids `1..=n` in input order.
///
/// # Examples
///
/// ```
/// use winterval::build_schedule;
///
/// let schedule = build_schedule(&[(0, 6, 60), (1, 4, 50)]).unwrap();
/// assert_eq!(schedule[0].id(), 2); // finishes first
/// assert_eq!(schedule[1].id(), 1);
/// ```
///
/// # Errors
///
/// Fails with [`Error::InvalidInterval`] on the first triple whose finish does
/// not exceed its start, [`Error::NegativeWeight`] on a negative weight, and
/// [`Error::WeightOverflow`] if the weights do not fit in a `Weight` together.
pub fn build_schedule(intervals: &[(i64, i64, Weight)]) -> Result<SortedSchedule> {
    let activities = intervals
        .iter()
        .enumerate()
        .map(|(i, &(start, finish, weight))| Activity::new(i + 1, start, finish, weight))
        .collect::<Result<Vec<_>>>()?;
    SortedSchedule::from_activities(activities)
}
