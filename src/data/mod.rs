pub mod app_settings;
pub mod persistence;
pub mod reserved_day;

pub use app_settings::AppSettings;
pub use persistence::Persistable;
pub use reserved_day::{ReservedDay, ReservedDayData};
