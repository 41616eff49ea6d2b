use anyhow::Result;
use chrono::Local;
use rangecal::calc::YearMonth;
use rangecal::data::{persistence::get_data_dir, AppSettings, Persistable, ReservedDayData};
use rangecal::ui::demo_view::{run_app, App};
use rangecal::ui::{restore_terminal, setup_terminal};
use tracing::info;

pub fn run(start_month: Option<YearMonth>) -> Result<()> {
    let settings = AppSettings::load()?;
    let reserved = ReservedDayData::load()?.to_reserved_set();
    info!(reserved = reserved.len(), "starting calendar demo");

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::event::DisableMouseCapture
        );
        original_hook(info);
    }));

    let mut terminal = setup_terminal()?;

    let today = Local::now().date_naive();
    let data_dir = get_data_dir().unwrap_or_else(|_| std::path::PathBuf::from("./config"));
    let mut app = App::new(reserved, settings, today, start_month, data_dir);

    let result = run_app(&mut terminal, &mut app);

    restore_terminal(&mut terminal)?;

    let range = app.selected();
    info!(from = ?range.from, to = ?range.to, "calendar demo closed");

    result
}
