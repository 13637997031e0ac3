//
// Copyright 2025 Tabs Data Inc.
//

use strum::IntoEnumIterator;
use tf_fetch::format::{CSV_SUFFIXES, SPREADSHEET_SUFFIXES};
use tf_tableframe::catalog;
use tf_tableframe::decode::TabularFormat;

fn main() {
    println!("Name.......: {}", env!("CARGO_PKG_NAME"));
    println!("Version....: {}", env!("CARGO_PKG_VERSION"));
    println!("Description: {}", env!("CARGO_PKG_DESCRIPTION"));
    println!("Formats....: {}", formats());
    println!("Catalog....: {}", catalog::names().join(", "));
}

fn formats() -> String {
    TabularFormat::iter()
        .map(|format| match format {
            TabularFormat::Csv => format!("{format} ({})", CSV_SUFFIXES.join(", ")),
            TabularFormat::Spreadsheet => {
                format!("{format} ({}, default)", SPREADSHEET_SUFFIXES.join(", "))
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}
