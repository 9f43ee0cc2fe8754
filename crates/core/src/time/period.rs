use chrono::{DateTime, Datelike, NaiveDate, TimeZone};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Default for AnalysisPeriod {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(2025, 4, 8).unwrap_or_default(),
        }
    }
}

impl AnalysisPeriod {
    pub fn header_label(&self) -> String {
        format!(
            "{} {}{} - {}{}, {}",
            self.start.format("%B"),
            self.start.day(),
            ordinal_suffix(self.start.day()),
            self.end.day(),
            ordinal_suffix(self.end.day()),
            self.end.year()
        )
    }

    pub fn compact_label(&self) -> String {
        format!(
            "{} {}-{}, {}",
            self.start.format("%B"),
            self.start.day(),
            self.end.day(),
            self.end.year()
        )
    }

    pub fn start_price_label(&self) -> String {
        price_label(self.start)
    }

    pub fn end_price_label(&self) -> String {
        price_label(self.end)
    }
}

fn price_label(date: NaiveDate) -> String {
    format!("Price on {} {}", date.format("%b"), date.day())
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

pub fn report_file_name<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("tariff_report_{}.html", now.format("%Y%m%d"))
}

pub fn footer_date<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format("%B %d, %Y").to_string()
}
