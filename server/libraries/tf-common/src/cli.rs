//
// Copyright 2025 Tabs Data Inc.
//

use crate::config::{Config, load_config};
use crate::env::get_current_dir;
use crate::status::ExitStatus;
use clap::Parser;
use clap_derive::{Args, ValueEnum};
use serde::{Deserialize, Serialize};
use std::env::args;
use std::future::Future;
use std::marker::PhantomData;
use std::path::PathBuf;
use tracing::{error, trace};

/// Trait that must be implemented by the CLI parameters struct, which itself it must be a Clap Args struct.
pub trait Params: clap::Args + Sync + Send + Clone {}

impl<A: Sync + Send + clap::Args + Clone> Params for A {}

/// Default configuration struct for CLI commands that do not have configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoConfig {}

impl Config for NoConfig {
    fn as_yaml(&self) -> String {
        "# This command does not have configuration".to_string()
    }
}

/// Default parameters struct for CLI commands that do not have parameters.
#[derive(Debug, Clone, Args)]
pub struct NoParams {}

#[derive(Debug, Clone, ValueEnum)]
enum ConfigArg {
    Default,
    Current,
}

#[derive(Debug, clap_derive::Parser)]
#[command(version)]
struct CliParser<P: Params> {
    #[arg(
        value_enum,
        required = false,
        exclusive = true,
        long,
        help = "Print the current or default configuration"
    )]
    config: Option<ConfigArg>,
    #[arg(
        long = "config-dir",
        help = "Folder with the configuration files, defaults to the current folder"
    )]
    config_dir: Option<PathBuf>,
    #[command(flatten)]
    params: P,
    #[arg(
        long = "stdin-config",
        help = "Whether to ingest additional config from stdin"
    )]
    stdin_config: Option<bool>,
}

/// Entry point for all CLI commands.
///
/// The configuration must be a struct implementing the [Config] trait, thus supporting layered configuration.
///
/// The parameters must be a struct implementing the [Params] trait.
///
/// It supports sync and async environments.
pub struct Cli<C: Config, P: Params> {
    params: PhantomData<P>,
    config: PhantomData<C>,
}

impl<C: Config, P: Params> Cli<C, P> {
    fn print_config(config_name: &str, config_type: &str, config: &C) {
        println!();
        println!("# {config_type} configuration for {config_name}");
        println!("#--------------------------------------------");
        println!("{}", config.as_yaml());
        println!("#--------------------------------------------");
        println!();
    }

    fn load(config_name: &str, parser: &CliParser<P>) -> Result<C, ExitStatus> {
        let stdin_config = parser.stdin_config.unwrap_or(false);
        load_config(config_name, parser.config_dir.clone(), stdin_config).map_err(|e| {
            error!("Failed to load '{config_name}' configuration: {e}");
            ExitStatus::ConfigError
        })
    }

    fn exec_impl(
        config_name: &str,
        parser: CliParser<P>,
        app: impl FnOnce(C, P) -> ExitStatus,
    ) -> ExitStatus {
        match parser.config {
            Some(ConfigArg::Default) => {
                Self::print_config(config_name, "Default", &C::default());
                ExitStatus::Success
            }
            Some(ConfigArg::Current) => match Self::load(config_name, &parser) {
                Ok(config) => {
                    Self::print_config(config_name, "Current", &config);
                    ExitStatus::Success
                }
                Err(status) => status,
            },
            None => match Self::load(config_name, &parser) {
                Ok(config) => app(config, parser.params),
                Err(status) => status,
            },
        }
    }

    fn exec_async_impl<R>(
        config_name: &str,
        parser: CliParser<P>,
        app: impl FnOnce(C, P) -> R,
    ) -> ExitStatus
    where
        R: Future<Output = ExitStatus>,
    {
        let app = move |config: C, params: P| {
            match tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime.block_on(app(config, params)),
                Err(e) => {
                    error!("Failed to start async runtime: {e}");
                    ExitStatus::GeneralError
                }
            }
        };
        Self::exec_impl(config_name, parser, app)
    }

    #[cfg(not(test))]
    fn exit(exit_status: ExitStatus) {
        std::process::exit(exit_status.code());
    }

    #[cfg(test)]
    fn exit(_result: ExitStatus) {
        // no-op
    }

    /// Execute the app function providing the configuration and CLI parameters.
    pub fn exec(config_name: &str, app: impl FnOnce(C, P) -> ExitStatus) {
        Self::log_parameters();
        let result = Self::exec_impl(config_name, CliParser::parse(), app);
        Self::exit(result);
    }

    /// Execute the app function within Tokio's async environment, providing the configuration and CLI parameters.
    pub fn exec_async<R>(config_name: &str, app: impl FnOnce(C, P) -> R)
    where
        R: Future<Output = ExitStatus>,
    {
        Self::log_parameters();
        let result = Self::exec_async_impl(config_name, CliParser::parse(), app);
        Self::exit(result);
    }

    /// Logs input arguments and current directory.
    fn log_parameters() {
        let args: Vec<String> = args().collect();
        trace!("Using args: '{}'", args.join(" "));

        let current_dir = get_current_dir();
        trace!("Starting @ folder: '{:?}'", current_dir);
    }
}
