//
// Copyright 2025 Tabs Data Inc.
//

use crate::error::FrameError;
use indexmap::IndexMap;
use polars::prelude::{AnyValue, Column, DataFrame};
use std::fmt::{Display, Formatter};

/// A row of a [`TabularDataset`], column name to value, in column order.
pub type Row<'a> = IndexMap<String, AnyValue<'a>>;

/// An in-memory table: ordered rows of named columns.
///
/// Column names and their order are fixed when the dataset is decoded.
#[derive(Debug, Clone, Default)]
pub struct TabularDataset {
    frame: DataFrame,
}

impl TabularDataset {
    pub fn new(frame: DataFrame) -> Self {
        Self { frame }
    }

    /// A dataset with no columns and no rows, what callers show when a fetch failed.
    pub fn empty() -> Self {
        Self::new(DataFrame::empty())
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn into_frame(self) -> DataFrame {
        self.frame
    }

    pub fn columns(&self) -> Vec<&str> {
        self.frame
            .get_column_names()
            .into_iter()
            .map(|name| name.as_str())
            .collect()
    }

    pub fn column(&self, name: &str) -> Result<&Column, FrameError> {
        self.frame
            .column(name)
            .map_err(|_| FrameError::ColumnNotFound(name.to_string()))
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn width(&self) -> usize {
        self.frame.width()
    }

    pub fn is_empty(&self) -> bool {
        self.height() == 0
    }

    /// Returns the row at `idx`, `None` if out of bounds.
    pub fn row(&self, idx: usize) -> Option<Row<'_>> {
        let values = self.frame.get(idx)?;
        Some(
            self.columns()
                .into_iter()
                .map(str::to_string)
                .zip(values)
                .collect(),
        )
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        (0..self.height()).filter_map(|idx| self.row(idx))
    }

    /// First `n` rows.
    pub fn head(&self, n: usize) -> Self {
        Self::new(self.frame.head(Some(n)))
    }
}

impl From<DataFrame> for TabularDataset {
    fn from(frame: DataFrame) -> Self {
        Self::new(frame)
    }
}

impl PartialEq for TabularDataset {
    fn eq(&self, other: &Self) -> bool {
        self.frame.schema() == other.frame.schema() && self.frame.equals_missing(&other.frame)
    }
}

impl Display for TabularDataset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    fn climate() -> TabularDataset {
        df!(
            "year" => [1990i64, 2000, 2010],
            "co2_ppm" => [354.0f64, 370.0, 390.0]
        )
        .unwrap()
        .into()
    }

    #[test]
    fn test_shape_and_columns() {
        let dataset = climate();
        assert_eq!(dataset.columns(), vec!["year", "co2_ppm"]);
        assert_eq!(dataset.height(), 3);
        assert_eq!(dataset.width(), 2);
        assert!(!dataset.is_empty());
    }

    #[test]
    fn test_row_keeps_column_order() {
        let dataset = climate();
        let row = dataset.row(1).unwrap();
        assert_eq!(row.keys().collect::<Vec<_>>(), vec!["year", "co2_ppm"]);
        assert_eq!(row["year"], AnyValue::Int64(2000));
        assert_eq!(row["co2_ppm"], AnyValue::Float64(370.0));
        assert!(dataset.row(3).is_none());
    }

    #[test]
    fn test_rows() {
        let years: Vec<i64> = climate()
            .rows()
            .map(|row| row["year"].extract::<i64>().unwrap())
            .collect();
        assert_eq!(years, vec![1990, 2000, 2010]);
    }

    #[test]
    fn test_empty() {
        let dataset = TabularDataset::empty();
        assert!(dataset.is_empty());
        assert_eq!(dataset.width(), 0);
        assert_eq!(dataset, TabularDataset::default());
    }

    #[test]
    fn test_equality_checks_types() {
        let ints: TabularDataset = df!("year" => [1990i64]).unwrap().into();
        let floats: TabularDataset = df!("year" => [1990.0f64]).unwrap().into();
        assert_eq!(ints, ints.clone());
        assert_ne!(ints, floats);
    }

    #[test]
    fn test_head() {
        let dataset = climate().head(2);
        assert_eq!(dataset.height(), 2);
        assert_eq!(dataset.columns(), vec!["year", "co2_ppm"]);
    }

    #[test]
    fn test_missing_column() {
        assert_eq!(
            climate().column("sea_level").unwrap_err(),
            FrameError::ColumnNotFound("sea_level".to_string())
        );
    }
}
