//
// Copyright 2025 Tabs Data Inc.
//

//! Decoding of raw payloads into [`TabularDataset`]s.

use crate::dataset::TabularDataset;
use crate::error::DecodeError;
use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};
use chrono::NaiveDate;
use polars::prelude::{Column, CsvReadOptions, DataFrame, DataType, SerReader};
use std::collections::HashMap;
use std::io::Cursor;
use strum::{Display, EnumIter};
use tracing::debug;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

// Days between the spreadsheet epoch (1899-12-30) and the unix epoch.
const SPREADSHEET_EPOCH_OFFSET_DAYS: i64 = 25_569;

/// Supported encodings of a remote table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum TabularFormat {
    /// Comma separated text, first line is the header.
    Csv,
    /// Legacy or modern spreadsheet workbook (xls, xlsx, xlsb, ods).
    Spreadsheet,
}

impl TabularFormat {
    pub fn decode(&self, bytes: &[u8]) -> Result<TabularDataset, DecodeError> {
        match self {
            TabularFormat::Csv => decode_csv(bytes),
            TabularFormat::Spreadsheet => decode_spreadsheet(bytes),
        }
    }
}

/// Decodes a UTF-8 CSV payload with a header line.
pub fn decode_csv(bytes: &[u8]) -> Result<TabularDataset, DecodeError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let text = std::str::from_utf8(bytes).map_err(|e| DecodeError::InvalidUtf8(e.to_string()))?;
    if text.trim().is_empty() {
        return Err(DecodeError::EmptyPayload);
    }

    let mut frame = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
        .finish()
        .map_err(|e| DecodeError::InvalidCsv(e.to_string()))?;
    let names = csv_header_names(bytes)?;
    if names.len() != frame.width() {
        return Err(DecodeError::InvalidCsv(format!(
            "header has {} fields but {} columns were read",
            names.len(),
            frame.width()
        )));
    }
    frame
        .set_column_names(names)
        .map_err(|e| DecodeError::InvalidCsv(e.to_string()))?;
    debug!(
        "Decoded CSV payload into {} rows and {} columns",
        frame.height(),
        frame.width()
    );
    Ok(frame.into())
}

// Header line read as text, named the same way as spreadsheet headers.
fn csv_header_names(bytes: &[u8]) -> Result<Vec<String>, DecodeError> {
    let header = CsvReadOptions::default()
        .with_has_header(false)
        .with_n_rows(Some(1))
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
        .finish()
        .map_err(|e| DecodeError::InvalidCsv(e.to_string()))?;
    let names = header
        .get_columns()
        .iter()
        .map(|column| {
            column
                .str()
                .ok()
                .and_then(|values| values.get(0))
                .map(str::to_string)
        })
        .collect::<Vec<_>>();
    Ok(unique_names(names))
}

/// Decodes the first worksheet of a spreadsheet workbook, using its first row as the header.
pub fn decode_spreadsheet(bytes: &[u8]) -> Result<TabularDataset, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::EmptyPayload);
    }
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| DecodeError::InvalidSpreadsheet(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(DecodeError::NoWorksheet)?
        .map_err(|e| DecodeError::InvalidSpreadsheet(e.to_string()))?;
    let dataset = range_to_dataset(&range)?;
    debug!(
        "Decoded spreadsheet payload into {} rows and {} columns",
        dataset.height(),
        dataset.width()
    );
    Ok(dataset)
}

fn range_to_dataset(range: &Range<Data>) -> Result<TabularDataset, DecodeError> {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(TabularDataset::empty());
    };
    let names = header_names(header);

    let mut body: Vec<&[Data]> = rows.collect();
    while body
        .last()
        .is_some_and(|row| row.iter().all(|cell| matches!(cell, Data::Empty)))
    {
        body.pop();
    }

    let columns = names
        .into_iter()
        .enumerate()
        .map(|(idx, name)| {
            let cells: Vec<&Data> = body
                .iter()
                .map(|row| row.get(idx).unwrap_or(&Data::Empty))
                .collect();
            build_column(&name, &cells)
        })
        .collect::<Result<Vec<_>, _>>()?;

    DataFrame::new(columns)
        .map(TabularDataset::from)
        .map_err(|e| DecodeError::InvalidSpreadsheet(e.to_string()))
}

fn header_names(header: &[Data]) -> Vec<String> {
    unique_names(header.iter().map(|cell| match cell {
        Data::Empty => None,
        Data::Float(f) if f.fract() == 0.0 => Some(format!("{}", *f as i64)),
        cell => Some(cell.to_string()),
    }))
}

// Blank names become `Unnamed: <idx>`, repeated ones get a `.<n>` suffix.
fn unique_names(names: impl IntoIterator<Item = Option<String>>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    names
        .into_iter()
        .enumerate()
        .map(|(idx, name)| {
            let name = match name {
                Some(name) if !name.trim().is_empty() => name,
                _ => format!("Unnamed: {idx}"),
            };
            let count = seen.entry(name.clone()).or_insert(0);
            let unique = if *count == 0 {
                name
            } else {
                format!("{name}.{count}")
            };
            *count += 1;
            unique
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKind {
    Int,
    Float,
    Bool,
    Date,
    Text,
}

fn cell_kind(cell: &Data) -> Option<CellKind> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::Int(_) => Some(CellKind::Int),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Some(CellKind::Int),
        Data::Float(_) => Some(CellKind::Float),
        Data::Bool(_) => Some(CellKind::Bool),
        Data::DateTime(_) => Some(CellKind::Date),
        Data::DateTimeIso(s) if iso_date(s).is_some() => Some(CellKind::Date),
        _ => Some(CellKind::Text),
    }
}

fn column_kind(cells: &[&Data]) -> CellKind {
    let mut kinds = cells.iter().filter_map(|cell| cell_kind(cell));
    let Some(first) = kinds.next() else {
        return CellKind::Text;
    };
    kinds.fold(first, |acc, kind| match (acc, kind) {
        (a, b) if a == b => a,
        (CellKind::Int, CellKind::Float) | (CellKind::Float, CellKind::Int) => CellKind::Float,
        _ => CellKind::Text,
    })
}

fn iso_date(value: &str) -> Option<NaiveDate> {
    value
        .get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

fn epoch_days(cell: &Data) -> Option<i32> {
    match cell {
        Data::DateTime(dt) => {
            i32::try_from(dt.as_f64().floor() as i64 - SPREADSHEET_EPOCH_OFFSET_DAYS).ok()
        }
        Data::DateTimeIso(s) => iso_date(s).and_then(|date| {
            let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)?;
            i32::try_from((date - epoch).num_days()).ok()
        }),
        _ => None,
    }
}

fn build_column(name: &str, cells: &[&Data]) -> Result<Column, DecodeError> {
    let column = match column_kind(cells) {
        CellKind::Int => {
            let values: Vec<Option<i64>> = cells
                .iter()
                .map(|cell| match cell {
                    Data::Int(i) => Some(*i),
                    Data::Float(f) => Some(*f as i64),
                    _ => None,
                })
                .collect();
            Column::new(name.into(), values)
        }
        CellKind::Float => {
            let values: Vec<Option<f64>> = cells
                .iter()
                .map(|cell| match cell {
                    Data::Int(i) => Some(*i as f64),
                    Data::Float(f) => Some(*f),
                    _ => None,
                })
                .collect();
            Column::new(name.into(), values)
        }
        CellKind::Bool => {
            let values: Vec<Option<bool>> = cells
                .iter()
                .map(|cell| match cell {
                    Data::Bool(b) => Some(*b),
                    _ => None,
                })
                .collect();
            Column::new(name.into(), values)
        }
        CellKind::Date => {
            let values: Vec<Option<i32>> = cells.iter().map(|cell| epoch_days(cell)).collect();
            Column::new(name.into(), values)
                .cast(&DataType::Date)
                .map_err(|e| DecodeError::InvalidColumn(name.to_string(), e.to_string()))?
        }
        CellKind::Text => {
            let values: Vec<Option<String>> = cells
                .iter()
                .map(|cell| match cell {
                    Data::Empty | Data::Error(_) => None,
                    cell => Some(cell.to_string()),
                })
                .collect();
            Column::new(name.into(), values)
        }
    };
    Ok(column)
}
