use crate::calc::{Range, ReservedSet, YearMonth};
use crate::data::AppSettings;
use crate::ui::range_calendar::{RangeCalendar, CALENDAR_HEIGHT, GRID_WIDTH};
use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{self, Event as CEvent, KeyCode, KeyEventKind, KeyModifiers, MouseEvent};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame, Terminal,
};
use std::cell::RefCell;
use std::io::Stdout;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration as StdDuration;

/// Demo host: feeds reserved days to the calendar and shows what it reports.
pub struct App {
    calendar: RangeCalendar<'static>,
    /// Last range reported through the change callback.
    selected: Rc<RefCell<Range>>,
    pub settings: AppSettings,
    reserved_count: usize,
    /// Absolute path to the data directory, shown in the footer.
    data_dir: PathBuf,
}

impl App {
    pub fn new(
        reserved: ReservedSet,
        settings: AppSettings,
        today: NaiveDate,
        start_month: Option<YearMonth>,
        data_dir: PathBuf,
    ) -> Self {
        let selected = Rc::new(RefCell::new(Range::default()));
        let sink = Rc::clone(&selected);
        let reserved_count = reserved.len();
        let mut calendar = RangeCalendar::new(today)
            .with_reserved(reserved)
            .on_change(move |range| *sink.borrow_mut() = range);
        if let Some(month) = start_month {
            calendar = calendar.with_month(month);
        }
        App {
            calendar,
            selected,
            settings,
            reserved_count,
            data_dir,
        }
    }

    pub fn selected(&self) -> Range {
        *self.selected.borrow()
    }

    /// Returns true if the app should quit.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Char('c') => self.calendar.clear(),
            _ => {
                self.calendar.handle_key(code);
            }
        }
        false
    }

    pub fn handle_mouse(&mut self, event: MouseEvent) {
        self.calendar.handle_mouse(event);
    }

    /// Text under the calendar: both dates once the range is complete.
    fn note_line(&self) -> Line<'static> {
        match self.selected() {
            Range {
                from: Some(from),
                to: Some(to),
            } => Line::from(vec![
                Span::styled("from: ", Style::default().add_modifier(Modifier::DIM)),
                Span::styled(
                    self.settings.format_date(from),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("   "),
                Span::styled("to: ", Style::default().add_modifier(Modifier::DIM)),
                Span::styled(
                    self.settings.format_date(to),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]),
            Range {
                from: Some(from),
                to: None,
            } => Line::from(Span::styled(
                format!("Pick an end day after {}", self.settings.format_date(from)),
                Style::default().fg(Color::DarkGray),
            )),
            _ => Line::from(Span::styled(
                "Pick a start day",
                Style::default().fg(Color::DarkGray),
            )),
        }
    }

    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(CALENDAR_HEIGHT + 2), // calendar + borders
                Constraint::Length(2),                   // selected range
                Constraint::Min(6),                      // help table + footer
            ])
            .split(f.area());

        let calendar_cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(GRID_WIDTH + 2), Constraint::Min(0)])
            .split(chunks[0]);
        let block = Block::default().borders(Borders::ALL).title(" Reserve ");
        let inner = block.inner(calendar_cols[0]);
        f.render_widget(block, calendar_cols[0]);
        self.calendar.render(f, inner);

        f.render_widget(Paragraph::new(self.note_line()), chunks[1]);

        self.render_help(f, chunks[2]);
    }

    fn render_help(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let key_rows: Vec<Row> = vec![
            Row::new(vec!["← → ↑ ↓", "Move cursor", "Enter/Space", "Pick day"]),
            Row::new(vec!["[ / PgUp", "Previous month", "] / PgDn", "Next month"]),
            Row::new(vec!["t", "Today", "Esc", "Hide preview"]),
            Row::new(vec!["c", "Clear selection", "q/Ctrl+C", "Quit"]),
            Row::new(vec!["Mouse", "Click / hover days", "< >", "Change month"]),
        ];

        let help_table = Table::new(
            key_rows,
            [
                Constraint::Length(12),
                Constraint::Length(20),
                Constraint::Length(12),
                Constraint::Length(20),
            ],
        )
        .block(Block::default().borders(Borders::NONE))
        .column_spacing(1);

        let help_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(5),    // help table
                Constraint::Length(1), // data dir footer
            ])
            .split(area);

        f.render_widget(help_table, help_chunks[0]);

        let footer = Paragraph::new(Line::from(vec![
            Span::styled("Data  ", Style::default().add_modifier(Modifier::DIM)),
            Span::styled(
                self.data_dir.to_string_lossy().to_string(),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled("   Reserved  ", Style::default().add_modifier(Modifier::DIM)),
            Span::styled(
                format!("{} day(s)", self.reserved_count),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        f.render_widget(footer, help_chunks[1]);
    }
}

// ── App event loop ────────────────────────────────────────────────────────────

pub fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;
        if event::poll(StdDuration::from_millis(16))? {
            match event::read()? {
                CEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.handle_key(key.code, key.modifiers) {
                        break;
                    }
                }
                CEvent::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }
    }
    Ok(())
}
