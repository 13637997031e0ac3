//
// Copyright 2025 Tabs Data Inc.
//

use crate::bin::tabfetch::args::{CatalogArgs, Command, FetchArgs, TabfetchParams};
use tf_common::cli::Cli;
use tf_common::logging;
use tf_common::status::ExitStatus;
use tf_error::TfError;
use tf_fetch::config::FetcherConfig;
use tf_fetch::fetcher::{RemoteTabularFetcher, TabularFetcher};
use tf_tableframe::catalog;
use tf_tableframe::frame::{filter_range, melt, remove_future_rows_today};
use tracing::{Level, error, info};

const CONFIG_NAME: &str = "tabfetch";

const VARIABLE_COLUMN: &str = "indicator";
const VALUE_COLUMN: &str = "value";

/// Run tabfetch. This function is the entry point for the `tabfetch` binary.
///
/// Logging starts before the configuration is loaded, configuration failures are logged too.
pub fn run() {
    logging::start(Level::INFO, None);
    Cli::<FetcherConfig, TabfetchParams>::exec_async(CONFIG_NAME, |config, params| async move {
        let Some(command) = params.command else {
            println!("Nothing to do, run 'tabfetch fetch <URL>' or 'tabfetch catalog'");
            return ExitStatus::NoAction;
        };
        match run_impl(config, command).await {
            Ok(output) => {
                println!("{output}");
                ExitStatus::Success
            }
            Err(e) => {
                error!("tabfetch failed: {e}");
                eprintln!("{e}");
                ExitStatus::TabfetchError
            }
        }
    });
}

async fn run_impl(config: FetcherConfig, command: Command) -> Result<String, TfError> {
    match command {
        Command::Fetch(args) => {
            let fetcher = RemoteTabularFetcher::new(config)?;
            fetch(&fetcher, args).await
        }
        Command::Catalog(args) => show_catalog(args),
    }
}

async fn fetch(fetcher: &dyn TabularFetcher, args: FetchArgs) -> Result<String, TfError> {
    let mut dataset = fetcher.fetch(&args.url).await?;
    if let Some(column) = &args.not_after_column {
        let before = dataset.height();
        dataset = remove_future_rows_today(&dataset, column)?;
        info!(
            "Dropped {} rows dated after today in column '{column}'",
            before - dataset.height()
        );
    }
    if let Some(n) = args.head {
        dataset = dataset.head(n);
    }
    Ok(dataset.to_string())
}

fn show_catalog(args: CatalogArgs) -> Result<String, TfError> {
    let Some(name) = &args.name else {
        return Ok(catalog::names().join("\n"));
    };
    let mut dataset = catalog::dataset(name)?;
    if args.from.is_some() || args.to.is_some() {
        dataset = filter_range(
            &dataset,
            &args.range_column,
            args.from.unwrap_or(f64::NEG_INFINITY),
            args.to.unwrap_or(f64::INFINITY),
        )?;
    }
    if args.long {
        dataset = melt(
            &dataset,
            &[args.range_column.as_str()],
            VARIABLE_COLUMN,
            VALUE_COLUMN,
        )?;
    }
    Ok(dataset.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bin::tabfetch::args::DEFAULT_RANGE_COLUMN;
    use mockito::Server;
    use tf_error::ErrorClass;
    use tf_fetch::error::FetchError;
    use tf_tableframe::error::FrameError;
    use tf_test::fixtures::SAMPLE_CSV;

    fn fetch_args(url: String) -> FetchArgs {
        FetchArgs {
            url,
            head: None,
            not_after_column: None,
        }
    }

    fn catalog_args(name: Option<&str>) -> CatalogArgs {
        CatalogArgs {
            name: name.map(str::to_string),
            from: None,
            to: None,
            range_column: DEFAULT_RANGE_COLUMN.to_string(),
            long: false,
        }
    }

    #[tokio::test]
    async fn test_fetch_prints_table() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/emissions.csv")
            .with_body(SAMPLE_CSV)
            .create_async()
            .await;

        let fetcher = RemoteTabularFetcher::new(FetcherConfig::default()).unwrap();
        let output = fetch(&fetcher, fetch_args(format!("{}/emissions.csv", server.url())))
            .await
            .unwrap();
        assert!(output.contains("co2_ppm"));
        assert!(output.contains("370.5"));
    }

    #[tokio::test]
    async fn test_fetch_head_and_future_rows() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/readings.csv")
            .with_body("date,reading\n2001-01-01,1\n2002-01-01,2\n2003-01-01,3\n9999-01-01,4\n")
            .create_async()
            .await;

        let fetcher = RemoteTabularFetcher::new(FetcherConfig::default()).unwrap();
        let mut args = fetch_args(format!("{}/readings.csv", server.url()));
        args.head = Some(2);
        args.not_after_column = Some("date".to_string());
        let output = fetch(&fetcher, args).await.unwrap();
        assert!(output.contains("2001-01-01"));
        assert!(output.contains("2002-01-01"));
        assert!(!output.contains("2003-01-01"));
        assert!(!output.contains("9999-01-01"));
    }

    #[tokio::test]
    async fn test_fetch_failure_is_reported() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/missing.csv")
            .with_status(404)
            .create_async()
            .await;

        let fetcher = RemoteTabularFetcher::new(FetcherConfig::default()).unwrap();
        let err = fetch(&fetcher, fetch_args(format!("{}/missing.csv", server.url())))
            .await
            .unwrap_err();
        assert_eq!(err.class(), ErrorClass::RemoteError);
        assert!(matches!(
            err.domain_err::<FetchError>(),
            Some(FetchError::HttpStatus(_, 404))
        ));
    }

    #[tokio::test]
    async fn test_run_impl_invalid_url() {
        let command = Command::Fetch(fetch_args("nowhere".to_string()));
        let err = run_impl(FetcherConfig::default(), command)
            .await
            .unwrap_err();
        assert!(matches!(
            err.domain_err::<FetchError>(),
            Some(FetchError::InvalidUrl(..))
        ));
    }

    #[test]
    fn test_catalog_names() {
        let output = show_catalog(catalog_args(None)).unwrap();
        assert_eq!(output, "climate\neducation\ngreen-jobs\nat-risk-jobs");
    }

    #[test]
    fn test_catalog_range() {
        let mut args = catalog_args(Some("education"));
        args.from = Some(2022.0);
        let output = show_catalog(args).unwrap();
        assert!(output.contains("2022"));
        assert!(output.contains("2023"));
        assert!(!output.contains("2021"));
    }

    #[test]
    fn test_catalog_long() {
        let mut args = catalog_args(Some("climate"));
        args.long = true;
        let output = show_catalog(args).unwrap();
        assert!(output.contains(VARIABLE_COLUMN));
        assert!(output.contains("ocean_ph"));
    }

    #[test]
    fn test_catalog_unknown() {
        let err = show_catalog(catalog_args(Some("weather"))).unwrap_err();
        assert_eq!(err.class(), ErrorClass::NotFound);
        assert!(matches!(
            err.domain_err::<FrameError>(),
            Some(FrameError::DatasetNotFound(..))
        ));
    }

    #[test]
    fn test_catalog_range_on_text_column() {
        let mut args = catalog_args(Some("green-jobs"));
        args.range_column = "job".to_string();
        args.to = Some(1.0);
        let err = show_catalog(args).unwrap_err();
        assert_eq!(err.class(), ErrorClass::InputError);
    }
}
