//! SQLite storage implementation for reports.

mod model;
mod repository;

pub use model::{report_location, ReportChangesDB, ReportDB, ReportIndexDB};
pub use repository::ReportRepository;
