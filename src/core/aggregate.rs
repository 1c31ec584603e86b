//! Aggregation engine: totals, shares, trends, growth and rates
//!
//! Aggregates are computed over the authoritative collection (or a
//! sub-collection the caller selected), never over a paginated view. Every
//! function is pure and degenerate inputs produce sentinels instead of NaN or
//! infinities: a zero total gives 0% shares, a zero previous period gives
//! [`Growth::NoPriorData`], a zero denominator gives a rate of 0.

use crate::core::entity::Record;
use chrono::{Datelike, Days, NaiveDate};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Totals
// ============================================================================

/// Sum of `value_fn` over every record, non-finite values count as 0
pub fn sum<R>(records: &[R], value_fn: impl Fn(&R) -> f64) -> f64 {
    records.iter().map(value_fn).filter(|v| v.is_finite()).sum()
}

/// Sum of a numeric field; records without it contribute nothing
pub fn sum_field<R: Record>(records: &[R], field: &str) -> f64 {
    sum(records, |r| {
        r.field_value(field).and_then(|v| v.as_f64()).unwrap_or(0.0)
    })
}

/// Number of records satisfying `predicate`
pub fn count<R>(records: &[R], predicate: impl Fn(&R) -> bool) -> usize {
    records.iter().filter(|r| predicate(r)).count()
}

// ============================================================================
// Percentage breakdowns
// ============================================================================

/// One group of a percentage breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Share {
    pub group: String,
    pub value: f64,
    pub percentage: u32,
}

/// Integer percentages of `values`, summing to exactly 100 when the total is positive
///
/// Each percentage is the floor of its exact share; the points still missing
/// go to the largest remainders (earlier groups win ties). When plain
/// rounding already sums to 100 this agrees with `round()`. Negative and
/// non-finite values count as 0. A total of 0 yields all zeros.
pub fn percentages(values: &[f64]) -> Vec<u32> {
    let cleaned: Vec<f64> = values
        .iter()
        .map(|v| if v.is_finite() && *v > 0.0 { *v } else { 0.0 })
        .collect();
    let total: f64 = cleaned.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return vec![0; values.len()];
    }

    let exact: Vec<f64> = cleaned.iter().map(|v| v / total * 100.0).collect();
    let mut result: Vec<u32> = exact.iter().map(|e| e.floor() as u32).collect();
    let assigned: u32 = result.iter().sum();
    let missing = 100u32.saturating_sub(assigned) as usize;

    let mut by_remainder: Vec<usize> = (0..exact.len()).collect();
    by_remainder.sort_by(|&a, &b| {
        let ra = exact[a] - exact[a].floor();
        let rb = exact[b] - exact[b].floor();
        rb.total_cmp(&ra).then(a.cmp(&b))
    });
    for &index in by_remainder.iter().take(missing) {
        result[index] += 1;
    }

    result
}

/// Group records by `key_fn`, sum `value_fn` per group and attach percentages
///
/// Groups appear in the order they are first seen.
pub fn breakdown<R, K: ToString>(
    records: &[R],
    key_fn: impl Fn(&R) -> K,
    value_fn: impl Fn(&R) -> f64,
) -> Vec<Share> {
    let mut groups: IndexMap<String, f64> = IndexMap::new();
    for record in records {
        let value = value_fn(record);
        let entry = groups.entry(key_fn(record).to_string()).or_insert(0.0);
        if value.is_finite() {
            *entry += value;
        }
    }

    let values: Vec<f64> = groups.values().copied().collect();
    groups
        .into_iter()
        .zip(percentages(&values))
        .map(|((group, value), percentage)| Share {
            group,
            value,
            percentage,
        })
        .collect()
}

/// Breakdown where every record weighs 1
pub fn count_by<R, K: ToString>(records: &[R], key_fn: impl Fn(&R) -> K) -> Vec<Share> {
    breakdown(records, key_fn, |_| 1.0)
}

// ============================================================================
// Time-bucketed trends
// ============================================================================

/// Bucket size of a trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Day,
    Month,
}

/// Fixed-length run of buckets ending at an anchor date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendWindow {
    pub granularity: Granularity,
    pub length: usize,
}

impl TrendWindow {
    pub fn new(granularity: Granularity, length: usize) -> Self {
        Self {
            granularity,
            length,
        }
    }

    /// Seven daily buckets labelled by weekday
    pub fn last_7_days() -> Self {
        Self::new(Granularity::Day, 7)
    }

    /// Twelve monthly buckets labelled by month
    pub fn last_12_months() -> Self {
        Self::new(Granularity::Month, 12)
    }

    /// Buckets between `date` and the anchor's bucket, 0 for the anchor's own
    ///
    /// Negative when `date` lies after the anchor's bucket.
    pub fn offset_from_anchor(&self, date: NaiveDate, anchor: NaiveDate) -> i64 {
        match self.granularity {
            Granularity::Day => (anchor - date).num_days(),
            Granularity::Month => month_index(anchor) - month_index(date),
        }
    }

    /// First day of the bucket `offset` steps before the anchor's
    fn bucket_start(&self, anchor: NaiveDate, offset: usize) -> Option<NaiveDate> {
        match self.granularity {
            Granularity::Day => anchor.checked_sub_days(Days::new(offset as u64)),
            Granularity::Month => {
                let index = month_index(anchor) - offset as i64;
                let year = i32::try_from(index.div_euclid(12)).ok()?;
                let month = u32::try_from(index.rem_euclid(12) + 1).ok()?;
                NaiveDate::from_ymd_opt(year, month, 1)
            }
        }
    }

    fn label(&self, start: NaiveDate) -> String {
        match self.granularity {
            Granularity::Day => start.format("%a").to_string(),
            Granularity::Month => start.format("%b").to_string(),
        }
    }
}

fn month_index(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}

/// One bucket of a trend series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub label: String,
    pub start: NaiveDate,
    pub value: f64,
}

/// Sum `value_fn` per bucket of `window`, oldest bucket first
///
/// Always returns `window.length` points; empty buckets are 0. Records
/// without a date, or dated outside the window, are ignored.
pub fn trend<R>(
    records: &[R],
    date_fn: impl Fn(&R) -> Option<NaiveDate>,
    value_fn: impl Fn(&R) -> f64,
    window: TrendWindow,
    anchor: NaiveDate,
) -> Vec<TrendPoint> {
    let mut totals = vec![0.0; window.length];
    for record in records {
        let Some(date) = date_fn(record) else {
            continue;
        };
        let offset = window.offset_from_anchor(date, anchor);
        let Ok(offset) = usize::try_from(offset) else {
            continue;
        };
        let value = value_fn(record);
        if offset < window.length && value.is_finite() {
            totals[offset] += value;
        }
    }

    (0..window.length)
        .rev()
        .map(|offset| {
            // Buckets before the first representable date start at the anchor
            let start = window.bucket_start(anchor, offset).unwrap_or(anchor);
            TrendPoint {
                label: window.label(start),
                start,
                value: totals[offset],
            }
        })
        .collect()
}

/// Sums over the window ending at `anchor` and over the window right before it
pub fn period_totals<R>(
    records: &[R],
    date_fn: impl Fn(&R) -> Option<NaiveDate>,
    value_fn: impl Fn(&R) -> f64,
    window: TrendWindow,
    anchor: NaiveDate,
) -> (f64, f64) {
    let length = window.length as i64;
    let mut current = 0.0;
    let mut previous = 0.0;
    for record in records {
        let Some(date) = date_fn(record) else {
            continue;
        };
        let value = value_fn(record);
        if !value.is_finite() {
            continue;
        }
        let offset = window.offset_from_anchor(date, anchor);
        if (0..length).contains(&offset) {
            current += value;
        } else if (length..2 * length).contains(&offset) {
            previous += value;
        }
    }
    (current, previous)
}

// ============================================================================
// Growth and rates
// ============================================================================

/// Period-over-period change
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Growth {
    /// Signed percentage change
    Percent(f64),
    /// The previous period is zero (or unusable), so no ratio exists
    NoPriorData,
}

impl Growth {
    pub fn percent(&self) -> Option<f64> {
        match self {
            Growth::Percent(p) => Some(*p),
            Growth::NoPriorData => None,
        }
    }

    pub fn is_positive(&self) -> bool {
        self.percent().is_some_and(|p| p > 0.0)
    }
}

impl fmt::Display for Growth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Growth::Percent(p) => write!(f, "{:+.1}%", p),
            Growth::NoPriorData => f.write_str("n/a"),
        }
    }
}

/// `(current - previous) / previous * 100`
///
/// With a negative `previous` the sign follows the formula as is: going from
/// -100 to -50 reports -50%.
pub fn growth(current: f64, previous: f64) -> Growth {
    if !current.is_finite() || !previous.is_finite() || previous == 0.0 {
        return Growth::NoPriorData;
    }
    let change = (current - previous) / previous * 100.0;
    if change.is_finite() {
        Growth::Percent(change)
    } else {
        Growth::NoPriorData
    }
}

/// `numerator / denominator * 100` rounded to two decimals, 0 when undefined
pub fn rate(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 || !numerator.is_finite() || !denominator.is_finite() {
        return 0.0;
    }
    let value = (numerator / denominator * 10_000.0).round() / 100.0;
    if value.is_finite() { value } else { 0.0 }
}

// ============================================================================
// Snapshots
// ============================================================================

/// Named aggregate values for one dashboard, recomputed on every call
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateSnapshot {
    pub entity_type: String,
    pub totals: IndexMap<String, f64>,
    pub counts: IndexMap<String, usize>,
    pub breakdowns: IndexMap<String, Vec<Share>>,
    pub trends: IndexMap<String, Vec<TrendPoint>>,
    pub growth: IndexMap<String, Growth>,
    pub rates: IndexMap<String, f64>,
}

impl AggregateSnapshot {
    pub fn builder(entity_type: impl Into<String>) -> SnapshotBuilder {
        SnapshotBuilder::new(entity_type)
    }

    pub fn total(&self, name: &str) -> Option<f64> {
        self.totals.get(name).copied()
    }

    pub fn count(&self, name: &str) -> Option<usize> {
        self.counts.get(name).copied()
    }

    pub fn breakdown(&self, name: &str) -> Option<&[Share]> {
        self.breakdowns.get(name).map(Vec::as_slice)
    }

    pub fn trend(&self, name: &str) -> Option<&[TrendPoint]> {
        self.trends.get(name).map(Vec::as_slice)
    }

    pub fn growth(&self, name: &str) -> Option<Growth> {
        self.growth.get(name).copied()
    }

    pub fn rate(&self, name: &str) -> Option<f64> {
        self.rates.get(name).copied()
    }
}

/// Builder for [`AggregateSnapshot`]
#[derive(Debug, Clone, Default)]
pub struct SnapshotBuilder {
    snapshot: AggregateSnapshot,
}

impl SnapshotBuilder {
    pub fn new(entity_type: impl Into<String>) -> Self {
        Self {
            snapshot: AggregateSnapshot {
                entity_type: entity_type.into(),
                ..AggregateSnapshot::default()
            },
        }
    }

    pub fn total(mut self, name: impl Into<String>, value: f64) -> Self {
        self.snapshot.totals.insert(name.into(), value);
        self
    }

    pub fn count(mut self, name: impl Into<String>, value: usize) -> Self {
        self.snapshot.counts.insert(name.into(), value);
        self
    }

    pub fn breakdown(mut self, name: impl Into<String>, shares: Vec<Share>) -> Self {
        self.snapshot.breakdowns.insert(name.into(), shares);
        self
    }

    pub fn trend(mut self, name: impl Into<String>, points: Vec<TrendPoint>) -> Self {
        self.snapshot.trends.insert(name.into(), points);
        self
    }

    pub fn growth(mut self, name: impl Into<String>, growth: Growth) -> Self {
        self.snapshot.growth.insert(name.into(), growth);
        self
    }

    pub fn rate(mut self, name: impl Into<String>, value: f64) -> Self {
        self.snapshot.rates.insert(name.into(), value);
        self
    }

    pub fn build(self) -> AggregateSnapshot {
        self.snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_sum_and_count() {
        let amounts = [9.99, 4.99, f64::NAN, 15.0];
        assert!((sum(&amounts, |a| *a) - 29.98).abs() < 1e-9);
        assert_eq!(count(&amounts, |a| *a > 5.0), 2);
        assert_eq!(sum(&[] as &[f64], |a| *a), 0.0);
    }

    #[test]
    fn test_percentages_match_rounding_when_it_sums() {
        assert_eq!(percentages(&[50.0, 30.0, 20.0]), vec![50, 30, 20]);
        assert_eq!(percentages(&[1.0, 3.0]), vec![25, 75]);
    }

    #[test]
    fn test_percentages_always_sum_to_100() {
        // 33.33 each: plain rounding gives 99
        assert_eq!(percentages(&[1.0, 1.0, 1.0]), vec![34, 33, 33]);
        // 16.67 each: plain rounding gives 102
        let sixths = percentages(&[1.0; 6]);
        assert_eq!(sixths.iter().sum::<u32>(), 100);
    }

    #[test]
    fn test_percentages_zero_total() {
        assert_eq!(percentages(&[0.0, 0.0]), vec![0, 0]);
        assert_eq!(percentages(&[-5.0, 0.0]), vec![0, 0]);
        assert!(percentages(&[]).is_empty());
    }

    #[test]
    fn test_breakdown_keeps_first_appearance_order() {
        let payments = [("card", 60.0), ("paypal", 25.0), ("card", 15.0)];
        let shares = breakdown(&payments, |p| p.0, |p| p.1);
        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].group, "card");
        assert_eq!(shares[0].value, 75.0);
        assert_eq!(shares[0].percentage, 75);
        assert_eq!(shares[1].percentage, 25);
    }

    #[test]
    fn test_count_by() {
        let statuses = ["open", "closed", "open", "open"];
        let shares = count_by(&statuses, |s| *s);
        assert_eq!(shares[0].value, 3.0);
        assert_eq!(shares[0].percentage, 75);
    }

    #[test]
    fn test_daily_trend_is_zero_filled_and_chronological() {
        let anchor = date(2024, 6, 2); // a Sunday
        let plays = [(date(2024, 6, 2), 5.0), (date(2024, 5, 27), 2.0), (date(2024, 5, 1), 9.0)];
        let series = trend(&plays, |p| Some(p.0), |p| p.1, TrendWindow::last_7_days(), anchor);

        assert_eq!(series.len(), 7);
        assert_eq!(series[0].start, date(2024, 5, 27));
        assert_eq!(series[0].label, "Mon");
        assert_eq!(series[0].value, 2.0);
        assert_eq!(series[6].label, "Sun");
        assert_eq!(series[6].value, 5.0);
        assert_eq!(series[1..6].iter().map(|p| p.value).sum::<f64>(), 0.0);
    }

    #[test]
    fn test_monthly_trend_crosses_year_boundary() {
        let anchor = date(2024, 2, 15);
        let revenue = [(date(2023, 3, 31), 10.0), (date(2024, 1, 5), 20.0), (date(2023, 2, 28), 99.0)];
        let series = trend(&revenue, |r| Some(r.0), |r| r.1, TrendWindow::last_12_months(), anchor);

        assert_eq!(series.len(), 12);
        assert_eq!(series[0].start, date(2023, 3, 1));
        assert_eq!(series[0].label, "Mar");
        assert_eq!(series[0].value, 10.0);
        assert_eq!(series[10].label, "Jan");
        assert_eq!(series[10].value, 20.0);
        assert_eq!(series[11].start, date(2024, 2, 1));
    }

    #[test]
    fn test_trend_ignores_future_and_undated() {
        let anchor = date(2024, 6, 2);
        let rows = [(Some(date(2024, 6, 3)), 1.0), (None, 1.0)];
        let series = trend(&rows, |r| r.0, |r| r.1, TrendWindow::last_7_days(), anchor);
        assert!(series.iter().all(|p| p.value == 0.0));
    }

    #[test]
    fn test_trend_keeps_length_at_calendar_start() {
        let rows: [(NaiveDate, f64); 1] = [(NaiveDate::MIN, 4.0)];
        let daily = trend(&rows, |r| Some(r.0), |r| r.1, TrendWindow::last_7_days(), NaiveDate::MIN);
        assert_eq!(daily.len(), 7);
        assert_eq!(daily[6].value, 4.0);

        let monthly = trend(&rows, |r| Some(r.0), |r| r.1, TrendWindow::last_12_months(), NaiveDate::MIN);
        assert_eq!(monthly.len(), 12);
        assert_eq!(monthly[11].value, 4.0);
    }

    #[test]
    fn test_period_totals() {
        let anchor = date(2024, 6, 15);
        let rows = [(date(2024, 6, 1), 30.0), (date(2024, 5, 20), 20.0), (date(2024, 3, 1), 100.0)];
        let window = TrendWindow::new(Granularity::Month, 1);
        assert_eq!(period_totals(&rows, |r| Some(r.0), |r| r.1, window, anchor), (30.0, 20.0));
    }

    #[test]
    fn test_growth() {
        assert_eq!(growth(150.0, 100.0), Growth::Percent(50.0));
        assert_eq!(growth(50.0, 100.0), Growth::Percent(-50.0));
        assert_eq!(growth(10.0, 0.0), Growth::NoPriorData);
        assert_eq!(growth(0.0, 0.0), Growth::NoPriorData);
        assert_eq!(growth(f64::INFINITY, 1.0), Growth::NoPriorData);
    }

    #[test]
    fn test_growth_from_negative_base() {
        assert_eq!(growth(-50.0, -100.0), Growth::Percent(-50.0));
        assert_eq!(growth(-150.0, -100.0), Growth::Percent(50.0));
    }

    #[test]
    fn test_growth_display() {
        assert_eq!(Growth::Percent(12.5).to_string(), "+12.5%");
        assert_eq!(Growth::Percent(-3.0).to_string(), "-3.0%");
        assert_eq!(Growth::NoPriorData.to_string(), "n/a");
    }

    #[test]
    fn test_rate() {
        assert_eq!(rate(1.0, 3.0), 33.33);
        assert_eq!(rate(50.0, 1000.0), 5.0);
        assert_eq!(rate(0.0, 1000.0), 0.0);
        assert_eq!(rate(5.0, 0.0), 0.0);
    }

    #[test]
    fn test_snapshot_builder() {
        let snapshot = AggregateSnapshot::builder("transaction")
            .total("gross_revenue", 1000.0)
            .count("transactions", 4)
            .rate("refund_rate", 0.0)
            .growth("revenue_mom", Growth::NoPriorData)
            .build();
        assert_eq!(snapshot.entity_type, "transaction");
        assert_eq!(snapshot.total("gross_revenue"), Some(1000.0));
        assert_eq!(snapshot.count("transactions"), Some(4));
        assert_eq!(snapshot.rate("refund_rate"), Some(0.0));
        assert_eq!(snapshot.growth("revenue_mom"), Some(Growth::NoPriorData));
        assert!(snapshot.breakdown("by_method").is_none());

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["growth"]["revenue_mom"], "no_prior_data");
    }
}
