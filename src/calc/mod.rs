pub mod cell_flags;
pub mod month_grid;
pub mod navigation;
pub mod selection;

pub use cell_flags::{render_cells, CellFlags, RenderedCell};
pub use month_grid::{CellPosition, DayCell, MonthGrid, MonthShape, WEEKDAY_LABELS};
pub use navigation::{Direction, YearMonth};
pub use selection::{Range, ReservedSet, Selection};
