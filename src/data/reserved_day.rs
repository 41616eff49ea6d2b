use crate::calc::ReservedSet;
use crate::data::persistence::Persistable;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ReservedDay {
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ReservedDay {
    pub fn new(date: NaiveDate, note: Option<&str>) -> Self {
        ReservedDay {
            date,
            note: note.map(str::to_string),
        }
    }
}

#[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
pub struct ReservedDayData {
    pub reserved_days: Vec<ReservedDay>,
}

impl Persistable for ReservedDayData {
    fn filename() -> &'static str {
        "reserved_days.yaml"
    }
}

impl ReservedDayData {
    pub fn add(&mut self, day: ReservedDay) {
        self.reserved_days.push(day);
    }

    /// The days handed to the calendar widget.
    pub fn to_reserved_set(&self) -> ReservedSet {
        self.reserved_days.iter().map(|r| r.date).collect()
    }

    /// Entries ordered by date, for listing.
    pub fn sorted(&self) -> Vec<&ReservedDay> {
        let mut days: Vec<_> = self.reserved_days.iter().collect();
        days.sort_by_key(|r| r.date);
        days
    }
}
