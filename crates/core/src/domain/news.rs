use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const NEWS_COLUMNS: [&str; 5] = ["country", "date", "source", "title", "url"];

const ALL_COUNTRIES: &str = "All Countries";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsRecord {
    pub country: String,
    pub date: String,
    pub source: String,
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CountryFilter {
    #[default]
    All,
    Country(String),
}

impl CountryFilter {
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || s == ALL_COUNTRIES {
            Self::All
        } else {
            Self::Country(s.to_string())
        }
    }

    pub fn matches(&self, record: &NewsRecord) -> bool {
        match self {
            Self::All => true,
            Self::Country(c) => record.country == *c,
        }
    }
}

pub fn filter_news<'a>(records: &'a [NewsRecord], filter: &CountryFilter) -> Vec<&'a NewsRecord> {
    let mut out: Vec<&NewsRecord> = records.iter().filter(|r| filter.matches(r)).collect();
    out.sort_by(|a, b| b.date.cmp(&a.date));
    out
}

pub fn countries(records: &[NewsRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.country.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn news(country: &str, date: &str, title: &str) -> NewsRecord {
        NewsRecord {
            country: country.to_string(),
            date: date.to_string(),
            source: "Wire".to_string(),
            title: title.to_string(),
            url: format!("https://example.com/{title}"),
        }
    }

    fn feed() -> Vec<NewsRecord> {
        vec![
            news("China", "2025-04-03", "a"),
            news("Japan", "2025-04-07", "b"),
            news("China", "2025-04-08", "c"),
            news("Chinatown", "2025-04-09", "d"),
            news("China", "2025-04-05", "e"),
        ]
    }

    #[test]
    fn filters_by_exact_country_and_sorts_newest_first() {
        let records = feed();
        let out = filter_news(&records, &CountryFilter::Country("China".to_string()));
        let titles: Vec<&str> = out.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["c", "e", "a"]);
        assert!(out.iter().all(|r| r.country == "China"));
    }

    #[test]
    fn all_filter_keeps_every_row() {
        let records = feed();
        let out = filter_news(&records, &CountryFilter::All);
        assert_eq!(out.len(), records.len());
        assert_eq!(out[0].title, "d");
    }

    #[test]
    fn equal_dates_keep_source_order() {
        let records = vec![
            news("China", "2025-04-08", "first"),
            news("China", "2025-04-08", "second"),
        ];
        let out = filter_news(&records, &CountryFilter::All);
        assert_eq!(out[0].title, "first");
        assert_eq!(out[1].title, "second");
    }

    #[test]
    fn parses_all_countries_label() {
        assert_eq!(CountryFilter::parse("All Countries"), CountryFilter::All);
        assert_eq!(CountryFilter::parse(""), CountryFilter::All);
        assert_eq!(
            CountryFilter::parse(" China "),
            CountryFilter::Country("China".to_string())
        );
        assert_eq!(CountryFilter::parse("all"), CountryFilter::Country("all".to_string()));
    }

    #[test]
    fn countries_are_sorted_and_unique() {
        let records = feed();
        assert_eq!(countries(&records), vec!["China", "Chinatown", "Japan"]);
    }
}
