//
// Copyright 2025 Tabs Data Inc.
//

//! Table transformations applied to fetched datasets before they are displayed.

use crate::dataset::TabularDataset;
use crate::error::{ColumnNames, FrameError};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use polars::prelude::*;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Keeps the rows whose `date_column` is not after today, in local time.
pub fn remove_future_rows_today(
    dataset: &TabularDataset,
    date_column: &str,
) -> Result<TabularDataset, FrameError> {
    remove_future_rows(dataset, date_column, Local::now().date_naive())
}

/// Keeps the rows whose `date_column` is on or before `today`.
///
/// The column is rewritten as a `Date` column. Rows with a null date are dropped, values that
/// cannot be read as dates are an error.
pub fn remove_future_rows(
    dataset: &TabularDataset,
    date_column: &str,
    today: NaiveDate,
) -> Result<TabularDataset, FrameError> {
    let days = epoch_days(dataset.column(date_column)?)?;
    let today = days_since_epoch(today);
    let mask: BooleanChunked = days
        .iter()
        .map(|day| Some(day.is_some_and(|day| day <= today)))
        .collect();

    let mut frame = dataset.frame().clone();
    frame.with_column(Column::new(date_column.into(), days).cast(&DataType::Date)?)?;
    Ok(frame.filter(&mask)?.into())
}

fn days_since_epoch(date: NaiveDate) -> i32 {
    (date - DateTime::UNIX_EPOCH.date_naive()).num_days() as i32
}

fn epoch_days(column: &Column) -> Result<Vec<Option<i32>>, FrameError> {
    match column.dtype() {
        DataType::Date => Ok(column.cast(&DataType::Int32)?.i32()?.into_iter().collect()),
        DataType::Datetime(_, _) => Ok(column
            .cast(&DataType::Date)?
            .cast(&DataType::Int32)?
            .i32()?
            .into_iter()
            .collect()),
        DataType::String => column
            .str()?
            .into_iter()
            .map(|value| {
                value
                    .map(|value| {
                        parse_date(value).map(days_since_epoch).ok_or_else(|| {
                            FrameError::InvalidDate(column.name().to_string(), value.to_string())
                        })
                    })
                    .transpose()
            })
            .collect(),
        dtype => Err(FrameError::InvalidDate(
            column.name().to_string(),
            dtype.to_string(),
        )),
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.len() == 4 && value.chars().all(|c| c.is_ascii_digit()) {
        return value
            .parse()
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1));
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
                .map(|datetime| datetime.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|datetime| datetime.date_naive())
        })
}

fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Keeps the rows whose numeric `column` lies within `[min, max]`, both ends included.
pub fn filter_range(
    dataset: &TabularDataset,
    column: &str,
    min: f64,
    max: f64,
) -> Result<TabularDataset, FrameError> {
    if min > max {
        return Err(FrameError::InvalidRange(min, max));
    }
    if !is_numeric(dataset.column(column)?.dtype()) {
        return Err(FrameError::NotNumeric(column.to_string()));
    }
    let value = col(column).cast(DataType::Float64);
    let frame = dataset
        .frame()
        .clone()
        .lazy()
        .filter(value.clone().gt_eq(lit(min)).and(value.lt_eq(lit(max))))
        .collect()?;
    Ok(frame.into())
}

/// Reshapes a wide dataset into a long one.
///
/// Every column not in `id_columns` becomes rows of `var_name` (the column name) and
/// `value_name` (its value). Values are `Float64` when all melted columns are numeric,
/// `String` otherwise.
pub fn melt(
    dataset: &TabularDataset,
    id_columns: &[&str],
    var_name: &str,
    value_name: &str,
) -> Result<TabularDataset, FrameError> {
    let columns = dataset.columns();
    let missing: Vec<String> = id_columns
        .iter()
        .filter(|id| !columns.contains(*id))
        .map(|id| id.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(FrameError::ColumnsNotFound(ColumnNames(missing)));
    }

    let value_columns: Vec<&str> = columns
        .iter()
        .copied()
        .filter(|name| !id_columns.contains(name))
        .collect();
    let value_type = if value_columns
        .iter()
        .map(|name| dataset.column(name))
        .collect::<Result<Vec<_>, _>>()?
        .iter()
        .all(|column| is_numeric(column.dtype()))
    {
        DataType::Float64
    } else {
        DataType::String
    };

    let ids = id_columns.iter().map(|id| col(*id));
    let frame = dataset.frame().clone().lazy();
    let long = if value_columns.is_empty() {
        frame
            .select(
                ids.chain([
                    lit(NULL).cast(DataType::String).alias(var_name),
                    lit(NULL).cast(value_type).alias(value_name),
                ])
                .collect::<Vec<_>>(),
            )
            .limit(0)
    } else {
        let parts: Vec<LazyFrame> = value_columns
            .iter()
            .map(|name| {
                frame.clone().select(
                    ids.clone()
                        .chain([
                            lit(*name).alias(var_name),
                            col(*name).cast(value_type.clone()).alias(value_name),
                        ])
                        .collect::<Vec<_>>(),
                )
            })
            .collect();
        concat(parts, UnionArgs::default())?
    };
    Ok(long.collect()?.into())
}
