//
// Copyright 2025 Tabs Data Inc.
//

//! Static datasets shipped with tabfetch.

use crate::dataset::TabularDataset;
use crate::error::FrameError;
use itertools::Itertools;
use polars::df;
use polars::prelude::PolarsResult;
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum BuiltinDataset {
    /// Yearly climate indicators.
    Climate,
    /// Yearly college entry and graduate employment rates.
    Education,
    /// Jobs expected to grow with the energy transition.
    GreenJobs,
    /// Jobs at risk from the energy transition.
    AtRiskJobs,
}

impl BuiltinDataset {
    pub fn dataset(&self) -> Result<TabularDataset, FrameError> {
        let frame = match self {
            BuiltinDataset::Climate => climate(),
            BuiltinDataset::Education => education(),
            BuiltinDataset::GreenJobs => green_jobs(),
            BuiltinDataset::AtRiskJobs => at_risk_jobs(),
        }?;
        Ok(frame.into())
    }
}

fn climate() -> PolarsResult<polars::prelude::DataFrame> {
    df!(
        "year" => [1990i64, 2000, 2010, 2020, 2023],
        "co2_ppm" => [354.0f64, 370.0, 390.0, 412.0, 419.0],
        "sea_level_rise_mm" => [0.0f64, 2.0, 6.0, 12.0, 15.0],
        "sea_temperature_c" => [14.0f64, 14.3, 14.7, 15.0, 15.1],
        "ocean_ph" => [8.2f64, 8.15, 8.1, 8.05, 8.03]
    )
}

fn education() -> PolarsResult<polars::prelude::DataFrame> {
    df!(
        "year" => [2018i64, 2019, 2020, 2021, 2022, 2023],
        "college_entry_rate" => [70.1f64, 71.3, 72.5, 73.0, 73.8, 74.6],
        "employment_rate" => [65.0f64, 66.2, 65.8, 67.1, 68.0, 70.3]
    )
}

fn green_jobs() -> PolarsResult<polars::prelude::DataFrame> {
    df!(
        "job" => [
            "Climate Data Analyst",
            "Carbon Credit Specialist",
            "Renewable Energy Developer",
            "ESG Consultant"
        ],
        "growth_score" => [95i64, 90, 88, 85]
    )
}

fn at_risk_jobs() -> PolarsResult<polars::prelude::DataFrame> {
    df!(
        "job" => [
            "Thermal Power Plant Technician",
            "Combustion Engine Engineer",
            "Petrochemical Plant Operator"
        ],
        "risk_score" => [90i64, 85, 80]
    )
}

/// Names of the built-in datasets.
pub fn names() -> Vec<String> {
    BuiltinDataset::iter().map(|d| d.to_string()).collect()
}

/// Looks up a built-in dataset by name.
pub fn dataset(name: &str) -> Result<TabularDataset, FrameError> {
    BuiltinDataset::from_str(name)
        .map_err(|_| FrameError::DatasetNotFound(name.to_string(), names().iter().join(", ")))?
        .dataset()
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::AnyValue;

    #[test]
    fn test_names() {
        assert_eq!(
            names(),
            vec!["climate", "education", "green-jobs", "at-risk-jobs"]
        );
    }

    #[test]
    fn test_every_dataset_builds() {
        for name in names() {
            assert!(!dataset(&name).unwrap().is_empty(), "{name} is empty");
        }
    }

    #[test]
    fn test_climate() {
        let climate = dataset("climate").unwrap();
        assert_eq!(
            climate.columns(),
            vec![
                "year",
                "co2_ppm",
                "sea_level_rise_mm",
                "sea_temperature_c",
                "ocean_ph"
            ]
        );
        let last = climate.row(4).unwrap();
        assert_eq!(last["year"], AnyValue::Int64(2023));
        assert_eq!(last["co2_ppm"], AnyValue::Float64(419.0));
    }

    #[test]
    fn test_jobs() {
        assert_eq!(dataset("green-jobs").unwrap().height(), 4);
        assert_eq!(dataset("at-risk-jobs").unwrap().height(), 3);
    }

    #[test]
    fn test_unknown_dataset() {
        assert_eq!(
            dataset("weather").unwrap_err(),
            FrameError::DatasetNotFound(
                "weather".to_string(),
                "climate, education, green-jobs, at-risk-jobs".to_string()
            )
        );
    }
}
