//! Validated, chronologically ordered price/NAV series

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// A single observation: the closing price or NAV on a date
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub value: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// An immutable, non-empty sequence of [`PricePoint`]s
///
/// Construction guarantees:
/// - at least one point
/// - every value is finite and strictly positive
/// - dates are strictly ascending (no duplicates)
///
/// Deserializing goes through the same validation.
///
/// # Example
///
/// ```
/// use advisor_analysis::Series;
/// use chrono::NaiveDate;
///
/// let d = |y| NaiveDate::from_ymd_opt(y, 1, 1).unwrap();
/// let series = Series::from_pairs([(d(2020), 100.0), (d(2021), 110.0)]).unwrap();
/// assert_eq!(series.len(), 2);
/// assert!((series.returns()[0] - 0.10).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PricePoint>", into = "Vec<PricePoint>")]
pub struct Series {
    points: Vec<PricePoint>,
}

impl Series {
    /// Validate and wrap a list of points
    pub fn new(points: Vec<PricePoint>) -> Result<Self> {
        if points.is_empty() {
            return Err(AnalysisError::invalid("series is empty"));
        }

        for (index, point) in points.iter().enumerate() {
            if !point.value.is_finite() || point.value <= 0.0 {
                return Err(AnalysisError::invalid(format!(
                    "value at index {index} ({}) must be a positive finite number, got {}",
                    point.date, point.value
                )));
            }
        }

        if let Some(index) = points
            .windows(2)
            .position(|pair| pair[1].date <= pair[0].date)
        {
            return Err(AnalysisError::invalid(format!(
                "timestamps must be strictly ascending: {} follows {} at index {}",
                points[index + 1].date,
                points[index].date,
                index + 1
            )));
        }

        Ok(Self { points })
    }

    /// Build a series from `(date, value)` pairs
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (NaiveDate, f64)>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(date, value)| PricePoint::new(date, value))
                .collect(),
        )
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; a constructed series holds at least one point
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Earliest observation
    pub fn first(&self) -> &PricePoint {
        &self.points[0]
    }

    /// Latest observation
    pub fn last(&self) -> &PricePoint {
        &self.points[self.points.len() - 1]
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.value)
    }

    /// Calendar days between the first and last observation
    pub fn span_days(&self) -> i64 {
        (self.last().date - self.first().date).num_days()
    }

    /// Elapsed span in years for the given day-count basis
    pub fn span_years(&self, days_per_year: f64) -> f64 {
        self.span_days() as f64 / days_per_year
    }

    /// Simple periodic returns `(v[i] - v[i-1]) / v[i-1]`
    pub fn returns(&self) -> Vec<f64> {
        self.points
            .windows(2)
            .map(|pair| (pair[1].value - pair[0].value) / pair[0].value)
            .collect()
    }

    /// Median gap between consecutive observations, in calendar days
    ///
    /// `None` for a single-point series.
    pub fn median_spacing_days(&self) -> Option<f64> {
        let mut gaps: Vec<i64> = self
            .points
            .windows(2)
            .map(|pair| (pair[1].date - pair[0].date).num_days())
            .collect();
        if gaps.is_empty() {
            return None;
        }
        gaps.sort_unstable();

        let mid = gaps.len() / 2;
        let median = if gaps.len() % 2 == 0 {
            (gaps[mid - 1] + gaps[mid]) as f64 / 2.0
        } else {
            gaps[mid] as f64
        };
        Some(median)
    }

    /// The trailing part of the series starting at `cutoff` (inclusive)
    ///
    /// `None` when every point precedes the cutoff.
    pub fn tail_since(&self, cutoff: NaiveDate) -> Option<Self> {
        let start = self.points.partition_point(|p| p.date < cutoff);
        if start == self.points.len() {
            return None;
        }
        Some(Self {
            points: self.points[start..].to_vec(),
        })
    }
}

impl TryFrom<Vec<PricePoint>> for Series {
    type Error = AnalysisError;

    fn try_from(points: Vec<PricePoint>) -> Result<Self> {
        Self::new(points)
    }
}

impl From<Series> for Vec<PricePoint> {
    fn from(series: Series) -> Self {
        series.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_valid_series() {
        let series = Series::from_pairs([
            (date(2024, 1, 1), 100.0),
            (date(2024, 1, 2), 101.0),
            (date(2024, 1, 5), 99.0),
        ])
        .unwrap();

        assert_eq!(series.len(), 3);
        assert!(!series.is_empty());
        assert_eq!(series.first().value, 100.0);
        assert_eq!(series.last().date, date(2024, 1, 5));
        assert_eq!(series.span_days(), 4);
    }

    #[test]
    fn test_empty_series_rejected() {
        let err = Series::new(Vec::new()).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_non_positive_values_rejected() {
        let zero = Series::from_pairs([(date(2024, 1, 1), 100.0), (date(2024, 1, 2), 0.0)]);
        assert!(zero.unwrap_err().to_string().contains("index 1"));

        let negative = Series::from_pairs([(date(2024, 1, 1), -5.0)]);
        assert!(negative.is_err());

        let nan = Series::from_pairs([(date(2024, 1, 1), f64::NAN)]);
        assert!(nan.is_err());
    }

    #[test]
    fn test_unordered_and_duplicate_dates_rejected() {
        let unordered = Series::from_pairs([
            (date(2024, 1, 3), 100.0),
            (date(2024, 1, 2), 101.0),
        ]);
        assert!(unordered.unwrap_err().to_string().contains("strictly ascending"));

        let duplicate = Series::from_pairs([
            (date(2024, 1, 2), 100.0),
            (date(2024, 1, 2), 101.0),
        ]);
        assert!(duplicate.is_err());
    }

    #[test]
    fn test_single_point_series_is_allowed() {
        let series = Series::from_pairs([(date(2024, 1, 1), 42.0)]).unwrap();
        assert_eq!(series.len(), 1);
        assert!(series.returns().is_empty());
        assert_eq!(series.median_spacing_days(), None);
        assert_eq!(series.span_days(), 0);
    }

    #[test]
    fn test_returns() {
        let series = Series::from_pairs([
            (date(2024, 1, 1), 100.0),
            (date(2024, 1, 2), 110.0),
            (date(2024, 1, 3), 99.0),
        ])
        .unwrap();

        let returns = series.returns();
        assert_eq!(returns.len(), 2);
        assert!((returns[0] - 0.10).abs() < 1e-12);
        assert!((returns[1] + 0.10).abs() < 1e-12);
    }

    #[test]
    fn test_median_spacing_ignores_weekend_gaps() {
        // Thu, Fri, Mon, Tue, Wed
        let series = Series::from_pairs([
            (date(2024, 3, 7), 1.0),
            (date(2024, 3, 8), 1.0),
            (date(2024, 3, 11), 1.0),
            (date(2024, 3, 12), 1.0),
            (date(2024, 3, 13), 1.0),
        ])
        .unwrap();
        assert_eq!(series.median_spacing_days(), Some(1.0));
    }

    #[test]
    fn test_median_spacing_even_count() {
        let series = Series::from_pairs([
            (date(2024, 1, 1), 1.0),
            (date(2024, 1, 2), 1.0),
            (date(2024, 1, 5), 1.0),
        ])
        .unwrap();
        assert_eq!(series.median_spacing_days(), Some(2.0));
    }

    #[test]
    fn test_tail_since() {
        let series = Series::from_pairs([
            (date(2020, 1, 1), 1.0),
            (date(2021, 1, 1), 2.0),
            (date(2022, 1, 1), 3.0),
        ])
        .unwrap();

        let tail = series.tail_since(date(2020, 6, 1)).unwrap();
        assert_eq!(tail.len(), 2);
        assert_eq!(tail.first().value, 2.0);

        assert_eq!(series.tail_since(date(2019, 1, 1)).unwrap(), series);
        assert!(series.tail_since(date(2023, 1, 1)).is_none());
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Series = serde_json::from_str(
            r#"[{"date":"2024-01-01","value":10.0},{"date":"2024-01-02","value":11.0}]"#,
        )
        .unwrap();
        assert_eq!(ok.len(), 2);

        let bad = serde_json::from_str::<Series>(
            r#"[{"date":"2024-01-02","value":10.0},{"date":"2024-01-01","value":11.0}]"#,
        );
        assert!(bad.is_err());
    }
}
