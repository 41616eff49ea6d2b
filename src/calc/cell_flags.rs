use crate::calc::month_grid::{DayCell, MonthGrid};
use crate::calc::selection::{ReservedSet, Selection};
use chrono::NaiveDate;
use serde::Serialize;

/// Visual state of one day cell, derived fresh on every render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CellFlags {
    pub is_reserved: bool,
    pub is_range_start: bool,
    pub is_range_end: bool,
    pub is_in_selected_range: bool,
    pub is_in_hover_preview: bool,
    pub is_today: bool,
    pub is_outside_month: bool,
}

impl CellFlags {
    pub fn derive(
        cell: &DayCell,
        selection: &Selection,
        hover: Option<NaiveDate>,
        reserved: &ReservedSet,
        today: NaiveDate,
    ) -> Self {
        let day = cell.date;
        let is_in_selected_range = match *selection {
            Selection::Complete { from, to } => from <= day && day <= to,
            Selection::Empty | Selection::PendingEnd { .. } => false,
        };

        let is_in_hover_preview = match (*selection, hover) {
            (Selection::PendingEnd { from }, Some(hover)) => {
                let (lo, hi) = if from <= hover { (from, hover) } else { (hover, from) };
                lo <= day && day <= hi && !reserved.any_between(lo, hi)
            }
            _ => false,
        };

        CellFlags {
            is_reserved: reserved.contains(day),
            is_range_start: selection.start() == Some(day),
            is_range_end: selection.end() == Some(day),
            is_in_selected_range,
            is_in_hover_preview,
            is_today: day == today,
            is_outside_month: cell.is_filler(),
        }
    }

    /// Reserved cells never accept clicks.
    pub fn is_disabled(&self) -> bool {
        self.is_reserved
    }
}

/// A grid cell paired with its derived flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RenderedCell {
    #[serde(flatten)]
    pub cell: DayCell,
    #[serde(flatten)]
    pub flags: CellFlags,
}

pub fn render_cells(
    grid: &MonthGrid,
    selection: &Selection,
    hover: Option<NaiveDate>,
    reserved: &ReservedSet,
    today: NaiveDate,
) -> Vec<RenderedCell> {
    grid.cells()
        .iter()
        .map(|cell| RenderedCell {
            cell: *cell,
            flags: CellFlags::derive(cell, selection, hover, reserved, today),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::navigation::YearMonth;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn october() -> MonthGrid {
        MonthGrid::build(YearMonth::new(2026, 10).unwrap())
    }

    fn flags_on(cells: &[RenderedCell], date: NaiveDate) -> CellFlags {
        cells.iter().find(|c| c.cell.date == date).unwrap().flags
    }

    #[test]
    fn test_empty_selection_has_no_range_flags() {
        let cells = render_cells(
            &october(),
            &Selection::Empty,
            Some(d(2026, 10, 5)),
            &ReservedSet::new(),
            d(2026, 10, 16),
        );
        assert!(cells.iter().all(|c| !c.flags.is_range_start
            && !c.flags.is_range_end
            && !c.flags.is_in_selected_range
            && !c.flags.is_in_hover_preview));
    }

    #[test]
    fn test_today_and_outside_month() {
        let cells = render_cells(
            &october(),
            &Selection::Empty,
            None,
            &ReservedSet::new(),
            d(2026, 10, 16),
        );
        assert!(flags_on(&cells, d(2026, 10, 16)).is_today);
        assert_eq!(cells.iter().filter(|c| c.flags.is_today).count(), 1);
        assert!(flags_on(&cells, d(2026, 9, 30)).is_outside_month);
        assert!(!flags_on(&cells, d(2026, 10, 1)).is_outside_month);
    }

    #[test]
    fn test_reserved_cell_is_disabled() {
        let reserved: ReservedSet = [d(2026, 10, 9)].into_iter().collect();
        let cells = render_cells(&october(), &Selection::Empty, None, &reserved, d(2026, 10, 16));
        let flags = flags_on(&cells, d(2026, 10, 9));
        assert!(flags.is_reserved);
        assert!(flags.is_disabled());
        assert!(!flags_on(&cells, d(2026, 10, 10)).is_disabled());
    }

    #[test]
    fn test_complete_range_flags() {
        let sel = Selection::Complete { from: d(2026, 10, 5), to: d(2026, 10, 8) };
        let cells = render_cells(&october(), &sel, None, &ReservedSet::new(), d(2026, 10, 16));
        assert!(flags_on(&cells, d(2026, 10, 5)).is_range_start);
        assert!(flags_on(&cells, d(2026, 10, 8)).is_range_end);
        let in_range = cells.iter().filter(|c| c.flags.is_in_selected_range).count();
        assert_eq!(in_range, 4);
        assert!(!flags_on(&cells, d(2026, 10, 9)).is_in_selected_range);
    }

    #[test]
    fn test_complete_range_ignores_hover() {
        let sel = Selection::Complete { from: d(2026, 10, 5), to: d(2026, 10, 8) };
        let cells = render_cells(
            &october(),
            &sel,
            Some(d(2026, 10, 20)),
            &ReservedSet::new(),
            d(2026, 10, 16),
        );
        assert!(cells.iter().all(|c| !c.flags.is_in_hover_preview));
    }

    #[test]
    fn test_pending_start_is_not_in_selected_range() {
        let sel = Selection::PendingEnd { from: d(2026, 10, 5) };
        let cells = render_cells(&october(), &sel, None, &ReservedSet::new(), d(2026, 10, 16));
        let start = flags_on(&cells, d(2026, 10, 5));
        assert!(start.is_range_start);
        assert!(!start.is_in_selected_range);
        assert!(cells.iter().all(|c| !c.flags.is_in_hover_preview));
    }

    #[test]
    fn test_hover_preview_forward() {
        let sel = Selection::PendingEnd { from: d(2026, 10, 5) };
        let cells = render_cells(
            &october(),
            &sel,
            Some(d(2026, 10, 7)),
            &ReservedSet::new(),
            d(2026, 10, 16),
        );
        let preview: Vec<_> = cells
            .iter()
            .filter(|c| c.flags.is_in_hover_preview)
            .map(|c| c.cell.date)
            .collect();
        assert_eq!(preview, vec![d(2026, 10, 5), d(2026, 10, 6), d(2026, 10, 7)]);
    }

    #[test]
    fn test_hover_preview_backward_span() {
        let sel = Selection::PendingEnd { from: d(2026, 10, 5) };
        let cells = render_cells(
            &october(),
            &sel,
            Some(d(2026, 10, 3)),
            &ReservedSet::new(),
            d(2026, 10, 16),
        );
        assert_eq!(cells.iter().filter(|c| c.flags.is_in_hover_preview).count(), 3);
    }

    #[test]
    fn test_hover_preview_suppressed_across_reserved_day() {
        let reserved: ReservedSet = [d(2026, 10, 6)].into_iter().collect();
        let sel = Selection::PendingEnd { from: d(2026, 10, 5) };
        let cells = render_cells(&october(), &sel, Some(d(2026, 10, 8)), &reserved, d(2026, 10, 16));
        assert!(cells.iter().all(|c| !c.flags.is_in_hover_preview));
    }

    #[test]
    fn test_rendered_cell_json_is_flat() {
        let grid = october();
        let cells = render_cells(&grid, &Selection::Empty, None, &ReservedSet::new(), d(2026, 10, 16));
        let json = serde_json::to_value(cells[4]).unwrap();
        assert_eq!(json["date"], "2026-10-01");
        assert_eq!(json["day"], 1);
        assert_eq!(json["position"], "current");
        assert_eq!(json["is_today"], false);
    }
}
