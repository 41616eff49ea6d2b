//! A month-grid date-range picker for terminal UIs.
//!
//! The selection logic lives in [`calc`] and has no terminal dependency; the
//! [`ui::RangeCalendar`] widget wraps it for `ratatui` hosts.

pub mod calc;
pub mod data;
pub mod ui;
