use anyhow::Result;
use chrono::{Days, Local, NaiveDate};
use rangecal::data::{AppSettings, Persistable, ReservedDay, ReservedDayData};
use std::fs;
use std::path::Path;

pub fn run() -> Result<()> {
    let dir = rangecal::data::persistence::get_data_dir()?;
    fs::create_dir_all(&dir)?;
    run_in_dir(&dir, Local::now().date_naive())?;
    println!("Data files initialized successfully.");
    Ok(())
}

/// Writes all default data files into `dir`. Exposed for unit testing.
pub(crate) fn run_in_dir(dir: &Path, today: NaiveDate) -> Result<()> {
    AppSettings::default().save_to(dir)?;
    sample_reserved_days(today).save_to(dir)?;
    Ok(())
}

/// Two reserved days just after `today`, so the demo opens with something
/// to select around.
fn sample_reserved_days(today: NaiveDate) -> ReservedDayData {
    let mut data = ReservedDayData::default();
    for (offset, note) in [(2, "Booked"), (4, "Maintenance")] {
        if let Some(date) = today.checked_add_days(Days::new(offset)) {
            data.add(ReservedDay::new(date, Some(note)));
        }
    }
    data
}
