use anyhow::Result;
use chrono::{Local, NaiveDate};
use rangecal::calc::{
    render_cells, MonthGrid, RenderedCell, Selection, YearMonth, WEEKDAY_LABELS,
};
use rangecal::data::{Persistable, ReservedDayData};
use rangecal::ui::month_header::today_string;

const RESERVED_MARK: char = '*';
const TODAY_MARK: char = '#';

pub fn run(month: Option<YearMonth>, json: bool) -> Result<()> {
    let reserved = ReservedDayData::load()?.to_reserved_set();
    let today = Local::now().date_naive();
    let month = month.unwrap_or_else(|| YearMonth::containing(today));
    let grid = MonthGrid::build(month);
    let cells = render_cells(&grid, &Selection::Empty, None, &reserved, today);

    let mut out = std::io::stdout();
    if json {
        serde_json::to_writer_pretty(&mut out, &cells)?;
        println!();
        Ok(())
    } else {
        write_month(month, today, &cells, &mut out)
    }
}

/// Prints the month like `cal`, with reserved and today markers after the
/// day number. Filler days are left blank.
pub(crate) fn write_month<W: std::io::Write>(
    month: YearMonth,
    today: NaiveDate,
    cells: &[RenderedCell],
    out: &mut W,
) -> Result<()> {
    writeln!(out, "{:^28}", month.to_string())?;
    writeln!(out, "{:^28}", today_string(today))?;
    let header: String = WEEKDAY_LABELS.iter().map(|l| format!("{l:>3} ")).collect();
    writeln!(out, "{}", header.trim_end())?;

    for week in cells.chunks(7) {
        let line: String = week
            .iter()
            .map(|rc| {
                if rc.cell.is_filler() {
                    return "    ".to_string();
                }
                let mark = if rc.flags.is_reserved {
                    RESERVED_MARK
                } else if rc.flags.is_today {
                    TODAY_MARK
                } else {
                    ' '
                };
                format!("{:>3}{}", rc.cell.day, mark)
            })
            .collect();
        writeln!(out, "{}", line.trim_end())?;
    }

    writeln!(out)?;
    writeln!(out, "{RESERVED_MARK} reserved   {TODAY_MARK} today")?;
    Ok(())
}
