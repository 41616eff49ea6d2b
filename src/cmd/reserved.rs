use anyhow::Result;
use rangecal::data::{Persistable, ReservedDayData};

pub fn run(json: bool) -> Result<()> {
    let data = ReservedDayData::load()?;
    let mut out = std::io::stdout();
    if json {
        write_reserved_json(&data, &mut out)
    } else {
        write_reserved(&data, &mut out)
    }
}

pub(crate) fn write_reserved<W: std::io::Write>(data: &ReservedDayData, out: &mut W) -> Result<()> {
    writeln!(out, "Reserved days")?;
    writeln!(out, "---")?;
    writeln!(out, "  {:<14} {}", "Date", "Note")?;
    for r in data.sorted() {
        writeln!(
            out,
            "  {:<14} {}",
            r.date.format("%Y-%m-%d").to_string(),
            r.note.as_deref().unwrap_or("")
        )?;
    }
    writeln!(out, "---")?;
    writeln!(out, "Total: {} day(s)", data.reserved_days.len())?;
    Ok(())
}

pub(crate) fn write_reserved_json<W: std::io::Write>(
    data: &ReservedDayData,
    out: &mut W,
) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, &data.sorted())?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rangecal::data::ReservedDay;

    fn make_data(days: Vec<ReservedDay>) -> ReservedDayData {
        ReservedDayData { reserved_days: days }
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_write_reserved_empty() {
        let mut buf = Vec::new();
        write_reserved(&make_data(vec![]), &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("Total: 0 day(s)"));
    }

    #[test]
    fn test_write_reserved_sorted_with_notes() {
        let data = make_data(vec![
            ReservedDay::new(d(2023, 8, 11), None),
            ReservedDay::new(d(2023, 8, 9), Some("Booked")),
        ]);
        let mut buf = Vec::new();
        write_reserved(&data, &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        let first = out.find("2023-08-09").unwrap();
        let second = out.find("2023-08-11").unwrap();
        assert!(first < second);
        assert!(out.contains("Booked"));
        assert!(out.contains("Total: 2 day(s)"));
    }

    #[test]
    fn test_write_reserved_json() {
        let data = make_data(vec![ReservedDay::new(d(2023, 8, 9), Some("Booked"))]);
        let mut buf = Vec::new();
        write_reserved_json(&data, &mut buf).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed[0]["date"], "2023-08-09");
        assert_eq!(parsed[0]["note"], "Booked");
    }
}
