use crate::calc::{Direction, YearMonth};
use chrono::NaiveDate;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

/// Rows the header occupies above the weekday labels.
pub const HEADER_ROWS: u16 = 2;

const PREV_LABEL: &str = "<";
const NEXT_LABEL: &str = ">";
const TITLE_WIDTH: usize = 19;
const HEADER_WIDTH: usize = TITLE_WIDTH + 2;

/// Month title with previous/next affordances, and today's date below it.
pub struct MonthHeader {
    month: YearMonth,
    today: NaiveDate,
}

impl MonthHeader {
    pub fn new(month: YearMonth, today: NaiveDate) -> Self {
        MonthHeader { month, today }
    }

    pub fn title(&self) -> String {
        self.month.to_string()
    }

    pub fn today_label(&self) -> String {
        today_string(self.today)
    }

    pub fn lines(&self) -> Vec<Line<'static>> {
        let arrow = Style::default().add_modifier(Modifier::BOLD);
        vec![
            Line::from(vec![
                Span::styled(PREV_LABEL, arrow),
                Span::styled(
                    format!("{:^width$}", self.title(), width = TITLE_WIDTH),
                    Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                ),
                Span::styled(NEXT_LABEL, arrow),
            ]),
            Line::from(Span::styled(
                format!("{:^width$}", self.today_label(), width = HEADER_WIDTH),
                Style::default().add_modifier(Modifier::DIM),
            )),
        ]
    }

    /// Which trigger, if any, sits at `column` of the title row (relative to
    /// the header's left edge).
    pub fn trigger_at(column: u16) -> Option<Direction> {
        match column as usize {
            0 => Some(Direction::Previous),
            c if c == HEADER_WIDTH - 1 => Some(Direction::Next),
            _ => None,
        }
    }
}

/// `Fri Oct 16 2026`
pub fn today_string(date: NaiveDate) -> String {
    date.format("%a %b %d %Y").to_string()
}
