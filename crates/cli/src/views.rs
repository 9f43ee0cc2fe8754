use std::fmt::Write;
use tariff_core::domain::news::{countries, filter_news, CountryFilter};
use tariff_core::ingest::MarketContext;
use tariff_core::stats::{self, impact_rows, MarketSummary};
use tariff_core::time::AnalysisPeriod;

const BAR_WIDTH: usize = 30;

pub fn print_overview(ctx: &MarketContext, period: &AnalysisPeriod) {
    print!("{}", overview(ctx, period));
}

pub fn print_news(ctx: &MarketContext, country: &str) {
    print!("{}", news_feed(ctx, &CountryFilter::parse(country)));
}

pub fn print_countries(ctx: &MarketContext) {
    println!("All Countries");
    for country in countries(ctx.news().rows()) {
        println!("{country}");
    }
}

fn overview(ctx: &MarketContext, period: &AnalysisPeriod) -> String {
    let records = ctx.indices().rows();
    let Some(summary) = MarketSummary::from_records(records) else {
        return "No data available for analysis.\n".to_string();
    };

    let mut out = String::new();
    let _ = writeln!(out, "Analysis Period: {}", period.header_label());
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Most Affected   {:<20} {:>8.2}%",
        summary.most_affected.country, summary.most_affected.percent_change
    );
    let _ = writeln!(out, "Average Change  {:<20} {:>8.2}%", "", summary.average_change);
    let _ = writeln!(
        out,
        "Least Affected  {:<20} {:>8.2}%",
        summary.least_affected.country, summary.least_affected.percent_change
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Market Impact Overview");

    for row in impact_rows(records) {
        // Longer bars for harder-hit markets.
        let filled = ((1.0 - row.intensity) * BAR_WIDTH as f64).round() as usize;
        let _ = writeln!(
            out,
            "[{}] {:<16} {:<22} {:<width$} {:>6.1}%",
            stats::flag_code(&row.record.country),
            row.record.country,
            row.record.index,
            "#".repeat(filled),
            row.record.percent_change,
            width = BAR_WIDTH,
        );
    }
    out
}

fn news_feed(ctx: &MarketContext, filter: &CountryFilter) -> String {
    let items = filter_news(ctx.news().rows(), filter);
    if items.is_empty() {
        return "No news for this selection.\n".to_string();
    }

    let mut out = String::new();
    for item in items {
        let _ = writeln!(
            out,
            "[{}] {}  {}",
            stats::flag_code(&item.country),
            item.country,
            item.date
        );
        let _ = writeln!(out, "{}", item.title);
        let _ = writeln!(out, "Source: {}", item.source);
        let _ = writeln!(out, "{}", item.url);
        let _ = writeln!(out);
    }
    out
}
