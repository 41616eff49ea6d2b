use crate::calc::navigation::add_months;
use crate::calc::{
    render_cells, CellFlags, Direction, MonthGrid, Range, RenderedCell, ReservedSet, Selection,
    YearMonth, WEEKDAY_LABELS,
};
use crate::ui::month_header::{MonthHeader, HEADER_ROWS};
use chrono::{Duration, NaiveDate};
use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tracing::{debug, info};

// Day cell colors
const RESERVED_COLOR: Color = Color::Red;
const ENDPOINT_BG: Color = Color::Yellow;
const RANGE_BG: Color = Color::Indexed(153); // pale blue
const PREVIEW_BG: Color = Color::Rgb(40, 44, 52);

/// Columns per day cell: two digits and a gap.
pub const CELL_WIDTH: u16 = 3;
pub const GRID_WIDTH: u16 = 7 * CELL_WIDTH;
const FIRST_WEEK_ROW: u16 = HEADER_ROWS + 1;
/// Rows needed for the tallest month (six weeks).
pub const CALENDAR_HEIGHT: u16 = FIRST_WEEK_ROW + 6;

/// What a mouse position over the calendar points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitTarget {
    PreviousMonth,
    NextMonth,
    Day(NaiveDate),
}

type ChangeCallback<'a> = Box<dyn FnMut(Range) + 'a>;

/// Month-grid range picker.
///
/// Owns the selection, the hover day, a keyboard cursor and the displayed
/// month. The host supplies reserved days and an `on_change` callback, which
/// fires after every committed transition including [`RangeCalendar::clear`].
pub struct RangeCalendar<'a> {
    reserved: ReservedSet,
    selection: Selection,
    /// Pointer (or cursor) day, used only for the preview highlight.
    hover: Option<NaiveDate>,
    cursor: NaiveDate,
    displayed: YearMonth,
    today: NaiveDate,
    on_change: Option<ChangeCallback<'a>>,
    /// Area of the last render, for mouse hit-testing.
    area: Option<Rect>,
}

impl<'a> RangeCalendar<'a> {
    pub fn new(today: NaiveDate) -> Self {
        RangeCalendar {
            reserved: ReservedSet::new(),
            selection: Selection::Empty,
            hover: None,
            cursor: today,
            displayed: YearMonth::containing(today),
            today,
            on_change: None,
            area: None,
        }
    }

    pub fn with_reserved(mut self, reserved: ReservedSet) -> Self {
        self.reserved = reserved;
        self
    }

    pub fn with_reserved_days<I: IntoIterator<Item = NaiveDate>>(self, days: I) -> Self {
        self.with_reserved(days.into_iter().collect())
    }

    /// Starts the view on `month` instead of today's month.
    pub fn with_month(mut self, month: YearMonth) -> Self {
        self.displayed = month;
        if !month.contains(self.cursor) {
            self.cursor = month.first_day();
        }
        self
    }

    pub fn on_change<F: FnMut(Range) + 'a>(mut self, callback: F) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    /// Replaces the reserved days. The committed selection is left alone.
    pub fn set_reserved(&mut self, reserved: ReservedSet) {
        self.reserved = reserved;
    }

    pub fn reserved(&self) -> &ReservedSet {
        &self.reserved
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn range(&self) -> Range {
        self.selection.range()
    }

    pub fn displayed(&self) -> YearMonth {
        self.displayed
    }

    pub fn hover_day(&self) -> Option<NaiveDate> {
        self.hover
    }

    pub fn cursor(&self) -> NaiveDate {
        self.cursor
    }

    // ── Actions ───────────────────────────────────────────────────────────────

    /// Clicks `day`. Returns true when the selection changed and the host
    /// was notified.
    pub fn click(&mut self, day: NaiveDate) -> bool {
        match self.selection.click(day, &self.reserved) {
            Some(range) => {
                info!(from = ?range.from, to = ?range.to, "selection changed");
                self.notify(range);
                true
            }
            None => {
                debug!(%day, "click ignored");
                false
            }
        }
    }

    pub fn hover(&mut self, day: NaiveDate) {
        self.hover = Some(day);
    }

    /// Pointer left the grid: drop the preview.
    pub fn leave(&mut self) {
        self.hover = None;
    }

    /// Empties the selection and notifies the host.
    pub fn clear(&mut self) {
        self.hover = None;
        let range = self.selection.clear();
        info!("selection cleared");
        self.notify(range);
    }

    /// Moves the view one month. The cursor follows, clamped to the new
    /// month; the selection is untouched.
    pub fn navigate(&mut self, direction: Direction) {
        self.displayed = self.displayed.step(direction);
        let moved = add_months(self.cursor, direction.delta());
        self.cursor = if self.displayed.contains(moved) {
            moved
        } else {
            self.displayed.first_day()
        };
        debug!(month = %self.displayed, "navigated");
    }

    pub fn previous_month(&mut self) {
        self.navigate(Direction::Previous);
    }

    pub fn next_month(&mut self) {
        self.navigate(Direction::Next);
    }

    fn move_cursor(&mut self, days: i64) {
        if let Some(d) = self.cursor.checked_add_signed(Duration::days(days)) {
            self.cursor = d;
            self.hover = Some(d);
            if !self.displayed.contains(d) {
                self.displayed = YearMonth::containing(d);
            }
        }
    }

    fn notify(&mut self, range: Range) {
        if let Some(callback) = self.on_change.as_mut() {
            callback(range);
        }
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    /// Returns true if the key was consumed.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Left => self.move_cursor(-1),
            KeyCode::Right => self.move_cursor(1),
            KeyCode::Up => self.move_cursor(-7),
            KeyCode::Down => self.move_cursor(7),
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.click(self.cursor);
            }
            KeyCode::PageUp | KeyCode::Char('[') => self.previous_month(),
            KeyCode::PageDown | KeyCode::Char(']') => self.next_month(),
            KeyCode::Char('t') => {
                self.cursor = self.today;
                self.displayed = YearMonth::containing(self.today);
            }
            KeyCode::Esc => self.leave(),
            _ => return false,
        }
        true
    }

    /// Returns true if the event landed on the calendar.
    pub fn handle_mouse(&mut self, event: MouseEvent) -> bool {
        let target = self.hit_test(event.column, event.row);
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => match target {
                Some(HitTarget::PreviousMonth) => self.previous_month(),
                Some(HitTarget::NextMonth) => self.next_month(),
                Some(HitTarget::Day(day)) => {
                    self.cursor = day;
                    self.click(day);
                }
                None => return false,
            },
            MouseEventKind::Moved => match target {
                Some(HitTarget::Day(day)) => self.hover(day),
                Some(_) => self.leave(),
                None => {
                    self.leave();
                    return false;
                }
            },
            _ => return false,
        }
        true
    }

    /// Maps a terminal position to what was drawn there on the last render.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<HitTarget> {
        let area = self.area?;
        if column < area.x || row < area.y {
            return None;
        }
        let dx = column - area.x;
        let dy = row - area.y;
        if dx >= GRID_WIDTH.min(area.width) || dy >= area.height {
            return None;
        }
        if dy == 0 {
            return MonthHeader::trigger_at(dx).map(|direction| match direction {
                Direction::Previous => HitTarget::PreviousMonth,
                Direction::Next => HitTarget::NextMonth,
            });
        }
        if dy < FIRST_WEEK_ROW {
            return None;
        }
        let index = (dy - FIRST_WEEK_ROW) as usize * 7 + (dx / CELL_WIDTH) as usize;
        self.grid()
            .cells()
            .get(index)
            .map(|cell| HitTarget::Day(cell.date))
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    pub fn grid(&self) -> MonthGrid {
        MonthGrid::build(self.displayed)
    }

    /// Every displayed cell with its derived flags.
    pub fn cells(&self) -> Vec<RenderedCell> {
        render_cells(
            &self.grid(),
            &self.selection,
            self.hover,
            &self.reserved,
            self.today,
        )
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect) {
        self.area = Some(area);

        let mut lines = MonthHeader::new(self.displayed, self.today).lines();
        lines.push(Line::from(WEEKDAY_LABELS.join(" ")));

        for week in self.cells().chunks(7) {
            let mut spans = Vec::with_capacity(14);
            for rendered in week {
                let mut style = day_cell_style(&rendered.flags);
                if rendered.cell.date == self.cursor {
                    style = style.add_modifier(Modifier::UNDERLINED);
                }
                spans.push(Span::styled(format!("{:2}", rendered.cell.day), style));
                spans.push(Span::raw(" "));
            }
            lines.push(Line::from(spans));
        }

        f.render_widget(Paragraph::new(lines), area);
    }
}

/// Determines the `Style` for a day cell from its flags.
pub(crate) fn day_cell_style(flags: &CellFlags) -> Style {
    if flags.is_reserved {
        let mut s = Style::default()
            .fg(RESERVED_COLOR)
            .add_modifier(Modifier::CROSSED_OUT);
        if flags.is_outside_month {
            s = s.add_modifier(Modifier::DIM);
        }
        s
    } else if flags.is_range_start || flags.is_range_end {
        Style::default()
            .fg(Color::Black)
            .bg(ENDPOINT_BG)
            .add_modifier(Modifier::BOLD)
    } else if flags.is_in_selected_range {
        Style::default().fg(Color::Black).bg(RANGE_BG)
    } else if flags.is_in_hover_preview {
        Style::default().bg(PREVIEW_BG)
    } else if flags.is_today {
        Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    } else if flags.is_outside_month {
        Style::default().add_modifier(Modifier::DIM)
    } else {
        Style::default()
    }
}
