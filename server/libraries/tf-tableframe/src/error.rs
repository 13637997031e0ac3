//
// Copyright 2025 Tabs Data Inc.
//

use itertools::Itertools;
use std::fmt::{Display, Formatter};
use tf_error::tf_error;

/// Column names, displayed quoted and comma separated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames(pub Vec<String>);

impl Display for ColumnNames {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().map(|c| format!("'{c}'")).join(", "))
    }
}

#[tf_error]
#[derive(Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Payload is empty")]
    EmptyPayload = 0,
    #[error("Payload is not valid UTF-8 text: {0}")]
    InvalidUtf8(String) = 1,
    #[error("Payload is not valid CSV: {0}")]
    InvalidCsv(String) = 2,
    #[error("Payload is not a valid spreadsheet: {0}")]
    InvalidSpreadsheet(String) = 3,
    #[error("Spreadsheet has no worksheets")]
    NoWorksheet = 4,
    #[error("Could not build column '{0}': {1}")]
    InvalidColumn(String, String) = 5,
}

#[tf_error]
#[derive(Clone, PartialEq)]
pub enum FrameError {
    #[error("Column '{0}' has a value that is not a date: '{1}'")]
    InvalidDate(String, String) = 0,
    #[error("Column '{0}' is not numeric")]
    NotNumeric(String) = 1,
    #[error("Invalid range, min {0} is greater than max {1}")]
    InvalidRange(f64, f64) = 2,
    #[error("Column '{0}' not found")]
    ColumnNotFound(String) = 1000,
    #[error("Columns not found: {0}")]
    ColumnsNotFound(ColumnNames) = 1001,
    #[error("Dataset '{0}' not found, available datasets: {1}")]
    DatasetNotFound(String, String) = 1002,
    #[error("Table operation failed: {0}")]
    Polars(String) = 5000,
}

impl From<polars::prelude::PolarsError> for FrameError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        FrameError::Polars(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tf_error::{ErrorClass, TfDomainError};

    #[test]
    fn test_column_names_display() {
        let names = ColumnNames(vec!["year".to_string(), "co2_ppm".to_string()]);
        assert_eq!(names.to_string(), "'year', 'co2_ppm'");
    }

    #[test]
    fn test_error_classes() {
        assert_eq!(DecodeError::EmptyPayload.class(), ErrorClass::InputError);
        assert_eq!(
            FrameError::ColumnNotFound("year".to_string()).class(),
            ErrorClass::NotFound
        );
        assert_eq!(
            FrameError::Polars("boom".to_string()).code(),
            "FrameError::5000"
        );
    }
}
