use crate::calc::navigation::YearMonth;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Column labels, Sunday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

/// Where a grid cell's day comes from relative to the displayed month.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellPosition {
    /// Filler from the tail of the previous month.
    Leading,
    Current,
    /// Filler from the head of the next month.
    Trailing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    /// Day-of-month label shown in the cell.
    pub day: u32,
    pub position: CellPosition,
}

impl DayCell {
    pub fn is_filler(&self) -> bool {
        self.position != CellPosition::Current
    }

    /// Stable identifier for current-month cells (`day-16`). Filler cells
    /// have none, since their labels repeat across the grid.
    pub fn id(&self) -> Option<String> {
        match self.position {
            CellPosition::Current => Some(format!("day-{}", self.day)),
            CellPosition::Leading | CellPosition::Trailing => None,
        }
    }
}

/// The numbers a month grid is built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonthShape {
    /// Weekday of day 1, Sunday = 0.
    pub first_weekday: u32,
    pub days_in_month: u32,
    pub days_in_prev_month: u32,
    /// Weekday of the last day, Sunday = 0.
    pub last_weekday: u32,
}

impl MonthShape {
    pub fn of(month: YearMonth) -> Self {
        let days = days_in_month(month.year(), month.month());
        let prev = month.prev();
        let first_weekday = month.first_day().weekday().num_days_from_sunday();
        MonthShape {
            first_weekday,
            days_in_month: days,
            days_in_prev_month: days_in_month(prev.year(), prev.month()),
            last_weekday: (first_weekday + days - 1) % 7,
        }
    }

    pub fn leading_days(&self) -> u32 {
        self.first_weekday
    }

    pub fn trailing_days(&self) -> u32 {
        6 - self.last_weekday
    }
}

/// Every cell shown for one displayed month, in row-major order, seven per week.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthGrid {
    cells: Vec<DayCell>,
}

impl MonthGrid {
    pub fn build(month: YearMonth) -> Self {
        let shape = MonthShape::of(month);
        let prev = month.prev();
        let next = month.next();
        let mut cells = Vec::with_capacity(42);

        for x in (1..=shape.leading_days()).rev() {
            let day = shape.days_in_prev_month - x + 1;
            if let Some(date) = prev.day(day) {
                cells.push(DayCell {
                    date,
                    day,
                    position: CellPosition::Leading,
                });
            }
        }
        for day in 1..=shape.days_in_month {
            if let Some(date) = month.day(day) {
                cells.push(DayCell {
                    date,
                    day,
                    position: CellPosition::Current,
                });
            }
        }
        for day in 1..=shape.trailing_days() {
            if let Some(date) = next.day(day) {
                cells.push(DayCell {
                    date,
                    day,
                    position: CellPosition::Trailing,
                });
            }
        }

        MonthGrid { cells }
    }

    pub fn cells(&self) -> &[DayCell] {
        &self.cells
    }

    pub fn weeks(&self) -> std::slice::Chunks<'_, DayCell> {
        self.cells.chunks(7)
    }

    pub fn cell_for(&self, date: NaiveDate) -> Option<&DayCell> {
        self.cells.iter().find(|c| c.date == date)
    }
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if NaiveDate::from_ymd_opt(year, 2, 29).is_some() => 29,
        2 => 28,
        _ => 31,
    }
}
