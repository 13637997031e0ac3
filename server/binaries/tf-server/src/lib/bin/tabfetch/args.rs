//
// Copyright 2025 Tabs Data Inc.
//

use clap_derive::{Args, Subcommand};

pub const DEFAULT_RANGE_COLUMN: &str = "year";

#[derive(Debug, Clone, Args)]
pub struct TabfetchParams {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Fetch a remote CSV or spreadsheet and print it as a table
    Fetch(FetchArgs),
    /// List the built-in datasets, or print one of them
    Catalog(CatalogArgs),
}

#[derive(Debug, Clone, Args)]
pub struct FetchArgs {
    #[arg(help = "HTTP(S) URL of the table, '.csv' URLs are read as CSV, any other as spreadsheet")]
    pub url: String,

    #[arg(long, help = "Print only the first N rows")]
    pub head: Option<usize>,

    #[arg(
        long = "not-after-column",
        help = "Date column, rows dated after today are dropped"
    )]
    pub not_after_column: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct CatalogArgs {
    #[arg(help = "Built-in dataset to print, all names are listed if missing")]
    pub name: Option<String>,

    #[arg(long, requires = "name", help = "Drop rows whose range column is below this value")]
    pub from: Option<f64>,

    #[arg(long, requires = "name", help = "Drop rows whose range column is above this value")]
    pub to: Option<f64>,

    #[arg(
        long = "range-column",
        default_value = DEFAULT_RANGE_COLUMN,
        help = "Numeric column used by --from and --to"
    )]
    pub range_column: String,

    #[arg(
        long,
        requires = "name",
        help = "Print in long format, one row per range column value and indicator"
    )]
    pub long: bool,
}
