//! Grouping and per-partition aggregation.

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::AnalysisResult;
use crate::types::{Dataset, ParsedCell, is_missing};

/// Group key used for rows whose key cell is missing.
pub const EMPTY_GROUP_KEY: &str = "(empty)";

/// Numeric aggregates over one partition's aggregation column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GroupNumericSummary {
    /// Sum of the partition's numeric values.
    pub sum: f64,
    /// Mean of the partition's numeric values.
    pub mean: f64,
    /// Smallest numeric value.
    pub min: f64,
    /// Largest numeric value.
    pub max: f64,
}

/// Aggregate record for one group partition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupAggregate {
    /// Number of rows in the partition (including rows whose aggregation
    /// cell is non-numeric).
    pub count: usize,
    /// Numeric aggregates; `None` when no aggregation column was requested
    /// or when no row in the partition has a numeric value for it.
    pub numeric: Option<GroupNumericSummary>,
}

/// Mapping from group key to aggregate, in first-seen key order.
pub type GroupResult = IndexMap<String, GroupAggregate>;

/// Partition rows by `key_column`, optionally aggregating `agg_column`.
///
/// Missing key cells collapse into the single [`EMPTY_GROUP_KEY`] group.
/// When `agg_column` is given, only numeric-parseable cells within each
/// partition feed sum/mean/min/max; a partition with zero such cells reports
/// only its row count.
///
/// Both the key column and the aggregation column (when given) must exist;
/// an unknown name fails with [`crate::AnalysisError::UnknownColumn`] rather
/// than silently degrading to a plain count.
pub fn group_by(
    dataset: &Dataset,
    key_column: &str,
    agg_column: Option<&str>,
) -> AnalysisResult<GroupResult> {
    let key_idx = dataset.require_column(key_column)?;
    let agg_idx = agg_column
        .map(|col| dataset.require_column(col))
        .transpose()?;

    // Streaming accumulator per group; one pass over the rows.
    #[derive(Default)]
    struct Acc {
        count: usize,
        n: usize,
        sum: f64,
        min: f64,
        max: f64,
    }

    let mut groups: IndexMap<String, Acc> = IndexMap::new();
    for row in &dataset.rows {
        let raw_key = row[key_idx].as_str();
        let key = if is_missing(raw_key) {
            EMPTY_GROUP_KEY.to_string()
        } else {
            raw_key.to_string()
        };
        let acc = groups.entry(key).or_default();
        acc.count += 1;

        if let Some(idx) = agg_idx {
            if let Some(v) = ParsedCell::from_raw(&row[idx]).as_number() {
                if acc.n == 0 {
                    acc.min = v;
                    acc.max = v;
                } else {
                    acc.min = acc.min.min(v);
                    acc.max = acc.max.max(v);
                }
                acc.n += 1;
                acc.sum += v;
            }
        }
    }

    Ok(groups
        .into_iter()
        .map(|(key, acc)| {
            let numeric = (acc.n > 0).then(|| GroupNumericSummary {
                sum: acc.sum,
                mean: acc.sum / acc.n as f64,
                min: acc.min,
                max: acc.max,
            });
            (
                key,
                GroupAggregate {
                    count: acc.count,
                    numeric,
                },
            )
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::{EMPTY_GROUP_KEY, group_by};
    use crate::error::AnalysisError;
    use crate::types::Dataset;

    fn sample_dataset() -> Dataset {
        Dataset::new(
            vec!["city".into(), "sales".into()],
            vec![
                vec!["a".into(), "10".into()],
                vec!["b".into(), "20".into()],
                vec!["a".into(), "30".into()],
                vec!["".into(), "5".into()],
            ],
        )
    }

    #[test]
    fn counts_per_group_with_empty_sentinel() {
        let ds = sample_dataset();
        let result = group_by(&ds, "city", None).unwrap();

        assert_eq!(result.len(), 3);
        assert_eq!(result["a"].count, 2);
        assert_eq!(result["b"].count, 1);
        assert_eq!(result[EMPTY_GROUP_KEY].count, 1);
        assert!(result["a"].numeric.is_none());
    }

    #[test]
    fn key_order_is_first_seen() {
        let ds = sample_dataset();
        let result = group_by(&ds, "city", None).unwrap();
        let keys: Vec<_> = result.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "b", EMPTY_GROUP_KEY]);
    }

    #[test]
    fn aggregates_numeric_column_per_partition() {
        let ds = sample_dataset();
        let result = group_by(&ds, "city", Some("sales")).unwrap();

        let a = result["a"].numeric.unwrap();
        assert_eq!(result["a"].count, 2);
        assert_eq!(a.sum, 40.0);
        assert_eq!(a.mean, 20.0);
        assert_eq!(a.min, 10.0);
        assert_eq!(a.max, 30.0);

        let b = result["b"].numeric.unwrap();
        assert_eq!(b.sum, 20.0);
        assert_eq!(b.min, 20.0);
        assert_eq!(b.max, 20.0);
    }

    #[test]
    fn partition_without_numeric_values_reports_count_only() {
        let ds = Dataset::new(
            vec!["k".into(), "v".into()],
            vec![
                vec!["a".into(), "x".into()],
                vec!["a".into(), "".into()],
                vec!["b".into(), "3".into()],
            ],
        );
        let result = group_by(&ds, "k", Some("v")).unwrap();
        assert_eq!(result["a"].count, 2);
        assert!(result["a"].numeric.is_none());
        assert_eq!(result["b"].numeric.unwrap().sum, 3.0);
    }

    #[test]
    fn unknown_key_column_is_an_error() {
        let ds = sample_dataset();
        assert!(matches!(
            group_by(&ds, "nope", None),
            Err(AnalysisError::UnknownColumn { .. })
        ));
    }

    #[test]
    fn unknown_agg_column_is_an_error_not_a_silent_fallback() {
        let ds = sample_dataset();
        let err = group_by(&ds, "city", Some("nope")).unwrap_err();
        assert!(matches!(err, AnalysisError::UnknownColumn { .. }));
        assert!(err.to_string().contains("'nope'"));
    }
}
