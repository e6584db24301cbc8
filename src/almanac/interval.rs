use std::fmt;

use itertools::Itertools;

use super::error::AlmanacError;

/// A half-open range `[start, end)` of almanac numbers.
///
/// Ordering is by `start`, then `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Interval {
    start: i64,
    end: i64,
}

impl Interval {
    pub fn new(start: i64, end: i64) -> Result<Self, AlmanacError> {
        if start > end {
            return Err(AlmanacError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    /// Builds `[start, start + len)`, the way the almanac writes its ranges.
    pub fn from_start_len(start: i64, len: i64) -> Result<Self, AlmanacError> {
        let end = start
            .checked_add(len)
            .ok_or(AlmanacError::Overflow { value: start, offset: len })?;
        Self::new(start, end)
    }

    /// Callers must already know that `start <= end`.
    pub(crate) fn span(start: i64, end: i64) -> Self {
        debug_assert!(start <= end, "[{start}, {end}) is inverted");
        Self { start, end }
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    pub fn len(&self) -> i64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, value: i64) -> bool {
        self.start <= value && value < self.end
    }

    /// True when both ranges share at least one integer. Empty ranges overlap nothing.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start.max(other.start) < self.end.min(other.end)
    }

    pub fn intersection(&self, other: &Interval) -> Option<Interval> {
        self.overlaps(other)
            .then(|| Self::span(self.start.max(other.start), self.end.min(other.end)))
    }

    pub fn shifted(&self, offset: i64) -> Result<Interval, AlmanacError> {
        let shift = |value: i64| {
            value
                .checked_add(offset)
                .ok_or(AlmanacError::Overflow { value, offset })
        };
        Ok(Self::span(shift(self.start)?, shift(self.end)?))
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// The ranges in flight between two pipeline stages.
///
/// Order carries no meaning, and ranges produced from different inputs may overlap.
/// Empty ranges are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntervalSet(Vec<Interval>);

impl IntervalSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, interval: Interval) {
        if !interval.is_empty() {
            self.0.push(interval);
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Interval> {
        self.0.iter()
    }

    /// Total length of all members, counting overlaps once per member.
    pub fn covered_len(&self) -> i64 {
        self.0.iter().map(Interval::len).sum()
    }

    pub fn contains(&self, value: i64) -> bool {
        self.0.iter().any(|interval| interval.contains(value))
    }

    /// Sorted copy with overlapping and touching members merged, so two sets covering
    /// the same integers compare equal.
    pub fn normalized(&self) -> IntervalSet {
        IntervalSet(
            self.0
                .iter()
                .copied()
                .sorted()
                .coalesce(|a, b| {
                    if b.start <= a.end {
                        Ok(Interval::span(a.start, a.end.max(b.end)))
                    } else {
                        Err((a, b))
                    }
                })
                .collect(),
        )
    }
}

impl FromIterator<Interval> for IntervalSet {
    fn from_iter<I: IntoIterator<Item = Interval>>(iter: I) -> Self {
        let mut set = IntervalSet::new();
        set.extend(iter);
        set
    }
}

impl Extend<Interval> for IntervalSet {
    fn extend<I: IntoIterator<Item = Interval>>(&mut self, iter: I) {
        for interval in iter {
            self.push(interval);
        }
    }
}

impl IntoIterator for IntervalSet {
    type Item = Interval;
    type IntoIter = std::vec::IntoIter<Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a IntervalSet {
    type Item = &'a Interval;
    type IntoIter = std::slice::Iter<'a, Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
