use crate::domain::market::IndexRecord;
use std::cmp::Ordering;

pub const DEGENERATE_NORMALIZED: f64 = 0.5;

pub fn extremes(records: &[IndexRecord]) -> Option<(f64, f64)> {
    let mut iter = records.iter().map(|r| r.percent_change);
    let first = iter.next()?;
    Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
}

pub fn mean_change(records: &[IndexRecord]) -> Option<f64> {
    if records.is_empty() {
        return None;
    }
    let sum: f64 = records.iter().map(|r| r.percent_change).sum();
    Some(sum / records.len() as f64)
}

/// A zero-width range has no meaningful position; it maps to
/// [`DEGENERATE_NORMALIZED`] instead of dividing by zero.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    let span = max - min;
    if span == 0.0 || !span.is_finite() {
        return DEGENERATE_NORMALIZED;
    }
    ((value - min) / span).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    PercentChange,
    Country,
    StartPrice,
    EndPrice,
}

impl SortKey {
    fn compare(self, a: &IndexRecord, b: &IndexRecord) -> Ordering {
        match self {
            Self::PercentChange => a.percent_change.total_cmp(&b.percent_change),
            Self::Country => a.country.cmp(&b.country),
            Self::StartPrice => a.start_price.total_cmp(&b.start_price),
            Self::EndPrice => a.end_price.total_cmp(&b.end_price),
        }
    }
}

pub fn sort_ascending(records: &[IndexRecord], key: SortKey) -> Vec<&IndexRecord> {
    let mut out: Vec<&IndexRecord> = records.iter().collect();
    out.sort_by(|a, b| key.compare(a, b));
    out
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarketSummary {
    pub most_affected: IndexRecord,
    pub least_affected: IndexRecord,
    pub average_change: f64,
    pub min_change: f64,
    pub max_change: f64,
}

impl MarketSummary {
    pub fn from_records(records: &[IndexRecord]) -> Option<Self> {
        let sorted = sort_ascending(records, SortKey::PercentChange);
        let most_affected = (*sorted.first()?).clone();
        let least_affected = (*sorted.last()?).clone();
        let (min_change, max_change) = extremes(records)?;
        let average_change = mean_change(records)?;
        Some(Self {
            most_affected,
            least_affected,
            average_change,
            min_change,
            max_change,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImpactRow<'a> {
    pub record: &'a IndexRecord,
    pub intensity: f64,
}

impl ImpactRow<'_> {
    pub fn color(&self) -> String {
        let g = (self.intensity * 255.0).floor() as u8;
        format!("rgba(255, {g}, {g}, 0.8)")
    }
}

pub fn impact_rows(records: &[IndexRecord]) -> Vec<ImpactRow<'_>> {
    let Some((min, max)) = extremes(records) else {
        return Vec::new();
    };
    sort_ascending(records, SortKey::PercentChange)
        .into_iter()
        .map(|record| ImpactRow {
            record,
            intensity: normalize(record.percent_change, min, max),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rec(country: &str, change: f64) -> IndexRecord {
        IndexRecord::new(country, format!("{country} Index"), "TCK", 100.0, 100.0 + change, change)
    }

    fn scenario() -> Vec<IndexRecord> {
        vec![rec("A", -2.5), rec("B", 1.0), rec("C", -10.0)]
    }

    #[test]
    fn three_row_scenario() {
        let rows = scenario();
        assert_eq!(extremes(&rows), Some((-10.0, 1.0)));

        let mean = mean_change(&rows).unwrap();
        assert!((mean - (-11.5 / 3.0)).abs() < 1e-12);
        assert!((mean - -3.83).abs() < 0.01);

        let order: Vec<f64> = sort_ascending(&rows, SortKey::PercentChange)
            .iter()
            .map(|r| r.percent_change)
            .collect();
        assert_eq!(order, vec![-10.0, -2.5, 1.0]);

        let n = normalize(-2.5, -10.0, 1.0);
        assert!((n - 7.5 / 11.0).abs() < 1e-12);
        assert!((n - 0.6818).abs() < 1e-4);
    }

    #[test]
    fn extremes_bound_every_value() {
        let rows = vec![rec("A", 3.2), rec("B", -7.7), rec("C", 0.0), rec("D", 12.4)];
        let (lo, hi) = extremes(&rows).unwrap();
        for r in &rows {
            assert!(lo <= r.percent_change && r.percent_change <= hi);
        }
    }

    #[test]
    fn empty_table_has_no_statistics() {
        assert_eq!(extremes(&[]), None);
        assert_eq!(mean_change(&[]), None);
        assert_eq!(MarketSummary::from_records(&[]), None);
        assert!(impact_rows(&[]).is_empty());
    }

    #[test]
    fn normalize_hits_endpoints_and_is_monotonic() {
        assert_eq!(normalize(-10.0, -10.0, 1.0), 0.0);
        assert_eq!(normalize(1.0, -10.0, 1.0), 1.0);

        let mut prev = f64::NEG_INFINITY;
        for step in 0..=110 {
            let v = -10.0 + step as f64 * 0.1;
            let n = normalize(v, -10.0, 1.0);
            assert!(n >= prev);
            assert!((0.0..=1.0).contains(&n));
            prev = n;
        }
    }

    #[test]
    fn normalize_degenerate_range_does_not_divide_by_zero() {
        assert_eq!(normalize(-4.0, -4.0, -4.0), DEGENERATE_NORMALIZED);
    }

    #[test]
    fn normalize_clamps_out_of_range_values() {
        assert_eq!(normalize(-20.0, -10.0, 1.0), 0.0);
        assert_eq!(normalize(5.0, -10.0, 1.0), 1.0);
    }

    #[test]
    fn sort_is_stable_for_ties() {
        let rows = vec![rec("first", -1.0), rec("other", -3.0), rec("second", -1.0)];
        let countries: Vec<&str> = sort_ascending(&rows, SortKey::PercentChange)
            .iter()
            .map(|r| r.country.as_str())
            .collect();
        assert_eq!(countries, vec!["other", "first", "second"]);
    }

    #[test]
    fn sorts_by_other_columns() {
        let rows = scenario();
        let countries: Vec<&str> = sort_ascending(&rows, SortKey::Country)
            .iter()
            .map(|r| r.country.as_str())
            .collect();
        assert_eq!(countries, vec!["A", "B", "C"]);

        let ends: Vec<f64> = sort_ascending(&rows, SortKey::EndPrice)
            .iter()
            .map(|r| r.end_price)
            .collect();
        assert_eq!(ends, vec![90.0, 97.5, 101.0]);
    }

    #[test]
    fn summary_picks_most_and_least_affected() {
        let rows = scenario();
        let summary = MarketSummary::from_records(&rows).unwrap();
        assert_eq!(summary.most_affected.country, "C");
        assert_eq!(summary.least_affected.country, "B");
        assert_eq!(summary.min_change, -10.0);
        assert_eq!(summary.max_change, 1.0);
    }

    #[test]
    fn impact_rows_shade_from_red_to_white() {
        let rows = scenario();
        let impact = impact_rows(&rows);
        assert_eq!(impact.len(), 3);
        assert_eq!(impact[0].color(), "rgba(255, 0, 0, 0.8)");
        assert_eq!(impact[1].color(), "rgba(255, 173, 173, 0.8)");
        assert_eq!(impact[2].color(), "rgba(255, 255, 255, 0.8)");
    }
}
