use chrono::{Local, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Days the host forbids as range endpoints or inside a range.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReservedSet {
    days: BTreeSet<NaiveDate>,
}

impl ReservedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the set from millisecond epoch timestamps, keeping the local
    /// calendar day of each.
    ///
    /// Timestamps are expected to be local midnights. Other instants are not
    /// normalized beyond taking the local day they fall in.
    pub fn from_timestamps_millis(timestamps: &[i64]) -> Self {
        timestamps
            .iter()
            .filter_map(|&ms| Local.timestamp_millis_opt(ms).single())
            .map(|dt| dt.date_naive())
            .collect()
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.days.contains(&day)
    }

    /// True when any reserved day lies in the inclusive span between `a`
    /// and `b`, in either order.
    pub fn any_between(&self, a: NaiveDate, b: NaiveDate) -> bool {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        self.days.range(lo..=hi).next().is_some()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.iter().copied()
    }
}

impl FromIterator<NaiveDate> for ReservedSet {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        ReservedSet {
            days: iter.into_iter().collect(),
        }
    }
}

/// The range reported to the host. `to` is only ever set together with a
/// `from` that is not after it.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Range {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl Range {
    pub fn is_empty(&self) -> bool {
        self.from.is_none()
    }

    pub fn is_complete(&self) -> bool {
        self.from.is_some() && self.to.is_some()
    }
}

/// Committed selection state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Empty,
    PendingEnd {
        from: NaiveDate,
    },
    Complete {
        from: NaiveDate,
        to: NaiveDate,
    },
}

impl Selection {
    pub fn range(&self) -> Range {
        match *self {
            Selection::Empty => Range::default(),
            Selection::PendingEnd { from } => Range {
                from: Some(from),
                to: None,
            },
            Selection::Complete { from, to } => Range {
                from: Some(from),
                to: Some(to),
            },
        }
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.range().from
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.range().to
    }

    /// Applies a click on `day`. Returns the range to report, or `None` when
    /// the click is ignored: `day` is reserved, or it would close a range
    /// spanning a reserved day.
    pub fn click(&mut self, day: NaiveDate, reserved: &ReservedSet) -> Option<Range> {
        if reserved.contains(day) {
            return None;
        }
        let next = match *self {
            Selection::PendingEnd { from } if day >= from => {
                if reserved.any_between(from, day) {
                    return None;
                }
                Selection::Complete { from, to: day }
            }
            Selection::Empty | Selection::PendingEnd { .. } | Selection::Complete { .. } => {
                Selection::PendingEnd { from: day }
            }
        };
        *self = next;
        Some(self.range())
    }

    /// Drops the selection. Always reports the empty range.
    pub fn clear(&mut self) -> Range {
        *self = Selection::Empty;
        self.range()
    }
}
