//! Splitting a dataset into response and predictors.

use tracing::{debug, instrument};

use crate::IoError;
use crate::domain::{Dataset, PredictorMatrix, ResponseVector};

/// Column reserved as the training target.
pub const RESPONSE_COLUMN: &str = "response";

/// Split `dataset` into the `response` column and every other column.
///
/// Predictor columns keep their header order.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::MissingResponseColumn`] | no column is named `response` |
/// | [`IoError::NoPredictorColumns`] | `response` is the only column |
#[instrument(skip_all, fields(n_rows = dataset.n_rows(), n_columns = dataset.n_columns()))]
pub fn select_features(dataset: Dataset) -> Result<(ResponseVector, PredictorMatrix), IoError> {
    let Some(response_idx) = dataset.column_index(RESPONSE_COLUMN) else {
        return Err(IoError::MissingResponseColumn {
            column: RESPONSE_COLUMN.to_string(),
        });
    };
    if dataset.n_columns() == 1 {
        return Err(IoError::NoPredictorColumns {
            column: RESPONSE_COLUMN.to_string(),
        });
    }

    let (mut names, rows) = dataset.into_parts();
    names.remove(response_idx);

    let mut response = Vec::with_capacity(rows.len());
    let predictors: Vec<_> = rows
        .into_iter()
        .map(|mut row| {
            response.push(row.remove(response_idx));
            row
        })
        .collect();

    debug!(n_predictors = names.len(), "separated response from predictors");

    Ok((
        ResponseVector { values: response },
        PredictorMatrix {
            names,
            rows: predictors,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Value;

    fn dataset(columns: &[&str], rows: Vec<Vec<Value>>) -> Dataset {
        Dataset::new(columns.iter().map(|c| c.to_string()).collect(), rows)
    }

    #[test]
    fn response_in_middle_is_removed() {
        let ds = dataset(
            &["a", "response", "b"],
            vec![
                vec![Value::Numeric(1.0), Value::Numeric(0.0), Value::Numeric(2.0)],
                vec![Value::Numeric(3.0), Value::Numeric(1.0), Value::Numeric(4.0)],
            ],
        );
        let (response, predictors) = select_features(ds).unwrap();
        assert_eq!(predictors.names(), &["a", "b"]);
        assert_eq!(predictors.rows()[1], vec![Value::Numeric(3.0), Value::Numeric(4.0)]);
        assert_eq!(response.values(), &[Value::Numeric(0.0), Value::Numeric(1.0)]);
    }

    #[test]
    fn empty_dataset_selects_empty_vectors() {
        let ds = dataset(&["a", "response"], Vec::new());
        let (response, predictors) = select_features(ds).unwrap();
        assert!(response.is_empty());
        assert_eq!(predictors.n_rows(), 0);
        assert_eq!(predictors.n_columns(), 1);
    }

    #[test]
    fn missing_response_rejected() {
        let ds = dataset(&["a", "b"], vec![vec![Value::Numeric(1.0), Value::Numeric(2.0)]]);
        assert!(matches!(
            select_features(ds),
            Err(IoError::MissingResponseColumn { .. })
        ));
    }

    #[test]
    fn response_only_rejected() {
        let ds = dataset(&["response"], vec![vec![Value::Numeric(1.0)]]);
        assert!(matches!(
            select_features(ds),
            Err(IoError::NoPredictorColumns { .. })
        ));
    }
}
