use crate::domain::market::IndexRecord;
use crate::report::annotate::{Sentiment, SECTION_HEADER_CLASS};
use crate::report::html::escape;
use crate::stats::{sort_ascending, SortKey};
use crate::time::AnalysisPeriod;
use std::fmt::Write;

pub fn render_data_table(records: &[IndexRecord], period: &AnalysisPeriod) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "<h2 class=\"{SECTION_HEADER_CLASS}\">Global Market Indices Data</h2>"
    );
    let _ = writeln!(
        out,
        "<p>The table below provides detailed market data for global indices during the analysis period ({}).</p>",
        period.compact_label()
    );
    out.push_str("<table class=\"data-table\">\n<thead><tr>");
    for header in [
        "Country".to_string(),
        "Index".to_string(),
        "Ticker".to_string(),
        period.start_price_label(),
        period.end_price_label(),
        "Change (%)".to_string(),
    ] {
        let _ = write!(out, "<th>{}</th>", escape(&header));
    }
    out.push_str("</tr></thead>\n<tbody>\n");

    for record in sort_ascending(records, SortKey::PercentChange) {
        let _ = writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{:?}</td><td>{:?}</td><td class=\"{}\">{:.2}%</td></tr>",
            escape(&record.country),
            escape(&record.index),
            escape(&record.ticker),
            record.start_price,
            record.end_price,
            Sentiment::from_sign(record.percent_change).css_class(),
            record.percent_change,
        );
    }

    out.push_str("</tbody>\n</table>\n");
    out
}
