pub mod period;

pub use period::{footer_date, report_file_name, AnalysisPeriod};
