//! Single-column predicate filtering.

use std::str::FromStr;

use serde::Serialize;

use crate::error::{AnalysisError, AnalysisResult};
use crate::types::{Dataset, ParsedCell};

/// Filter comparison operators.
///
/// Relational operators only apply when the cell is numeric-parseable;
/// `Contains` is a case-insensitive substring test on raw text; `Eq` matches
/// on raw text equality or numeric equality when both sides parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FilterOp {
    /// Raw text equality, or numeric equality when both sides parse.
    Eq,
    /// Raw text inequality.
    Ne,
    /// Numeric greater-than.
    Gt,
    /// Numeric less-than.
    Lt,
    /// Numeric greater-or-equal.
    Ge,
    /// Numeric less-or-equal.
    Le,
    /// Case-insensitive substring match.
    Contains,
}

impl FromStr for FilterOp {
    type Err = AnalysisError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "eq" => Ok(Self::Eq),
            "ne" => Ok(Self::Ne),
            "gt" => Ok(Self::Gt),
            "lt" => Ok(Self::Lt),
            "ge" => Ok(Self::Ge),
            "le" => Ok(Self::Le),
            "contains" => Ok(Self::Contains),
            _ => Err(AnalysisError::UnknownOperator {
                token: token.to_string(),
            }),
        }
    }
}

/// Returns a new [`Dataset`] containing only rows whose `column` cell
/// matches `op literal`, preserving original row order.
///
/// Fails with [`AnalysisError::UnknownColumn`] for a bad column name. The
/// operator token is validated by [`FilterOp::from_str`] before any row is
/// scanned, so an unknown operator never produces partial output.
///
/// Relational operators (`gt`/`lt`/`ge`/`le`) match nothing when either the
/// cell or the literal is not numeric-parseable.
///
/// ```
/// use rust_data_analysis::processing::{filter, FilterOp};
/// use rust_data_analysis::types::Dataset;
///
/// let ds = Dataset::new(
///     vec!["age".into()],
///     vec![vec!["30".into()], vec!["17".into()], vec!["n/a".into()]],
/// );
/// let adults = filter(&ds, "age", FilterOp::Ge, "18").unwrap();
/// assert_eq!(adults.rows, vec![vec!["30".to_string()]]);
/// ```
pub fn filter(
    dataset: &Dataset,
    column: &str,
    op: FilterOp,
    literal: &str,
) -> AnalysisResult<Dataset> {
    let idx = dataset.require_column(column)?;
    let literal_number = ParsedCell::from_raw(literal).as_number();
    let literal_lower = literal.to_lowercase();

    Ok(dataset.filter_rows(|row| {
        let cell = row[idx].as_str();
        let cell_number = ParsedCell::from_raw(cell).as_number();

        match op {
            FilterOp::Eq => {
                cell == literal
                    || matches!((cell_number, literal_number), (Some(c), Some(l)) if c == l)
            }
            FilterOp::Ne => cell != literal,
            FilterOp::Gt | FilterOp::Lt | FilterOp::Ge | FilterOp::Le => {
                match (cell_number, literal_number) {
                    (Some(c), Some(l)) => match op {
                        FilterOp::Gt => c > l,
                        FilterOp::Lt => c < l,
                        FilterOp::Ge => c >= l,
                        FilterOp::Le => c <= l,
                        _ => unreachable!("relational op handled above"),
                    },
                    _ => false,
                }
            }
            FilterOp::Contains => cell.to_lowercase().contains(&literal_lower),
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::{FilterOp, filter};
    use crate::error::AnalysisError;
    use crate::types::Dataset;

    fn sample_dataset() -> Dataset {
        Dataset::new(
            vec!["name".into(), "age".into()],
            vec![
                vec!["Ada".into(), "36".into()],
                vec!["Grace".into(), "45".into()],
                vec!["Alan".into(), "".into()],
                vec!["Edsger".into(), "36.0".into()],
            ],
        )
    }

    #[test]
    fn operator_tokens_parse() {
        for (token, op) in [
            ("eq", FilterOp::Eq),
            ("ne", FilterOp::Ne),
            ("gt", FilterOp::Gt),
            ("lt", FilterOp::Lt),
            ("ge", FilterOp::Ge),
            ("le", FilterOp::Le),
            ("contains", FilterOp::Contains),
        ] {
            assert_eq!(token.parse::<FilterOp>().unwrap(), op);
        }
        assert!(matches!(
            "between".parse::<FilterOp>(),
            Err(AnalysisError::UnknownOperator { .. })
        ));
    }

    #[test]
    fn eq_matches_raw_text_or_numeric_value() {
        let ds = sample_dataset();
        // "36" matches both the raw "36" and the numerically-equal "36.0".
        let out = filter(&ds, "age", FilterOp::Eq, "36").unwrap();
        assert_eq!(out.row_count(), 2);
        assert_eq!(out.rows[0][0], "Ada");
        assert_eq!(out.rows[1][0], "Edsger");
    }

    #[test]
    fn ne_compares_raw_text_only() {
        let ds = sample_dataset();
        // "36.0" is raw-unequal to "36" even though numerically equal.
        let out = filter(&ds, "age", FilterOp::Ne, "36").unwrap();
        assert_eq!(out.row_count(), 3);
    }

    #[test]
    fn relational_ops_skip_non_numeric_cells() {
        let ds = sample_dataset();
        let out = filter(&ds, "age", FilterOp::Gt, "30").unwrap();
        // The empty cell never matches.
        assert_eq!(out.row_count(), 3);

        let none = filter(&ds, "age", FilterOp::Lt, "30").unwrap();
        assert_eq!(none.row_count(), 0);
    }

    #[test]
    fn relational_ops_with_non_numeric_literal_match_nothing() {
        let ds = sample_dataset();
        let out = filter(&ds, "age", FilterOp::Ge, "abc").unwrap();
        assert_eq!(out.row_count(), 0);
    }

    #[test]
    fn contains_is_case_insensitive() {
        let ds = sample_dataset();
        let out = filter(&ds, "name", FilterOp::Contains, "GRA").unwrap();
        assert_eq!(out.row_count(), 1);
        assert_eq!(out.rows[0][0], "Grace");
    }

    #[test]
    fn filter_preserves_row_order_and_original_dataset() {
        let ds = sample_dataset();
        let out = filter(&ds, "age", FilterOp::Ge, "36").unwrap();
        let names: Vec<_> = out.rows.iter().map(|r| r[0].as_str()).collect();
        assert_eq!(names, vec!["Ada", "Grace", "Edsger"]);
        assert_eq!(ds.row_count(), 4);
    }

    #[test]
    fn unknown_column_is_an_error() {
        let ds = sample_dataset();
        assert!(matches!(
            filter(&ds, "salary", FilterOp::Eq, "1"),
            Err(AnalysisError::UnknownColumn { .. })
        ));
    }
}
