//
// Copyright 2025 Tabs Data Inc.
//

use crate::env::{TABFETCH_HOME_DIR, get_current_dir, get_home_dir, get_user_name};
use config::{File, FileFormat};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "Invalid config name '{0}', it must be an alphanumeric word, it may have '-' dashes"
    )]
    InvalidConfigName(String),
    #[error("Could not serialize default config: {0}")]
    CouldNotSerializeDefaults(#[source] config::ConfigError),
    #[error("Could not read config from stdin: {0}")]
    CouldNotReadStdin(#[source] std::io::Error),
    #[error("Could not build config: {0}")]
    CouldNotBuild(#[source] config::ConfigError),
    #[error("Could not deserialize config: {0}")]
    CouldNotDeserialize(#[source] config::ConfigError),
}

/// Marker trait to define a configuration.
pub trait Config: Sized + Default + Serialize + for<'a> Deserialize<'a> {
    /// Returns the configuration as a YAML string.
    fn as_yaml(&self) -> String {
        match serde_yaml::to_string(self) {
            Ok(s) if s.starts_with("{}") => String::from("\n"),
            Ok(s) => s,
            Err(e) => format!("# Could not create YAML for config: {e}\n"),
        }
    }
}

/// Validates the configuration name. It must be an alphanumeric word,
/// and it can have hyphens '-' in it.
fn check_config_name(config_name: &str) -> Result<(), ConfigError> {
    if config_name.is_empty() || !config_name.chars().all(|c| c.is_alphanumeric() || c == '-') {
        return Err(ConfigError::InvalidConfigName(config_name.to_string()));
    }
    Ok(())
}

const CONFIG: &str = "config";

const EXTENSION: &str = "yaml";

/// Loads a configuration.
///
/// The configuration is created with the following order, where the last one has precedence:
/// - 1. Built-in default values ([`Default`] trait).
/// - 2. 'config.yaml' file in the config directory (optional).
/// - 3. 'config_<username>.yaml' file in the config directory (optional).
/// - 4. '<homedir>/.tabfetch/<config_name>.yaml' file (optional).
/// - 5. Environment variables with the prefix `<CONFIG_NAME>_` (optional).
/// - 6. YAML read from stdin, if `stdin` is set.
///
/// The config directory is `config_folder` if given, the current directory otherwise.
///
/// For environment variables lookups, names are fully uppercased and hyphens '-' are
/// replaced with underscores '_'.
pub fn load_config<T: Config>(
    config_name: &str,
    config_folder: Option<PathBuf>,
    stdin: bool,
) -> Result<T, ConfigError> {
    check_config_name(config_name)?;

    let config_dir = config_folder.unwrap_or_else(get_current_dir);

    let app_config_file = config_dir.join(CONFIG).with_extension(EXTENSION);

    // user's name, replacing ' ' spaces with '-' hyphens.
    let user_name = get_user_name().replace(' ', "-");

    let app_user_config_file = config_dir
        .join(format!("{CONFIG}_{user_name}"))
        .with_extension(EXTENSION);

    let app_env_prefix = config_name.replace('-', "_").to_uppercase();

    let mut config_builder = config::Config::builder()
        .add_source(
            config::Config::try_from(&T::default()).map_err(ConfigError::CouldNotSerializeDefaults)?,
        )
        .add_source(File::from(app_config_file).required(false))
        .add_source(File::from(app_user_config_file).required(false));

    match get_home_dir() {
        Ok(home_dir) => {
            let home_dir_config_file = home_dir
                .join(TABFETCH_HOME_DIR)
                .join(config_name)
                .with_extension(EXTENSION);
            config_builder =
                config_builder.add_source(File::from(home_dir_config_file).required(false));
        }
        Err(e) => debug!("Skipping home directory config: {e}"),
    }

    config_builder =
        config_builder.add_source(config::Environment::with_prefix(&app_env_prefix));

    if stdin {
        info!("Reading from stdin as an additional source of configuration");
        let mut stdin_config = String::new();
        std::io::stdin()
            .read_to_string(&mut stdin_config)
            .map_err(ConfigError::CouldNotReadStdin)?;
        config_builder =
            config_builder.add_source(File::from_str(&stdin_config, FileFormat::Yaml));
    }

    config_builder
        .build()
        .map_err(ConfigError::CouldNotBuild)?
        .try_deserialize()
        .map_err(ConfigError::CouldNotDeserialize)
}

#[cfg(test)]
mod tests {
    use crate::config::{Config, ConfigError, check_config_name, load_config};
    use crate::env::{create_tabfetch_home_dir, get_current_dir};
    use getset::Getters;
    use serde::{Deserialize, Serialize};
    use std::path::Path;

    #[derive(Debug, Clone, Serialize, Deserialize, Getters)]
    #[getset(get = "pub")]
    pub struct MyConfig {
        name: String,
        timeout_secs: u64,
    }

    impl Default for MyConfig {
        fn default() -> Self {
            Self {
                name: String::from("default_name"),
                timeout_secs: 10,
            }
        }
    }

    impl Config for MyConfig {}

    fn write_config_file(file: &Path, config: &MyConfig) {
        std::fs::write(file, config.as_yaml()).expect("Failed to write config file");
    }

    #[test]
    fn test_default_as_yaml() {
        let yaml = MyConfig::default().as_yaml();
        assert!(yaml.contains("name: default_name"));
        assert!(yaml.contains("timeout_secs: 10"));
    }

    #[test]
    fn test_invalid_config_names() {
        assert!(matches!(
            check_config_name("invalid name"),
            Err(ConfigError::InvalidConfigName(_))
        ));
        assert!(matches!(
            check_config_name("invalid_name"),
            Err(ConfigError::InvalidConfigName(_))
        ));
        assert!(check_config_name("valid-name").is_ok());
    }

    #[test]
    fn test_load_config_no_files() {
        let config = load_config::<MyConfig>("my-config", None, false).unwrap();
        assert_eq!(config.name(), "default_name");
        assert_eq!(config.timeout_secs(), &10u64);
    }

    #[test]
    fn test_load_config_app_file() {
        write_config_file(
            &get_current_dir().join("config").with_extension("yaml"),
            &MyConfig {
                name: "app_config_name".to_string(),
                timeout_secs: 2,
            },
        );

        let config = load_config::<MyConfig>("my-config", None, false).unwrap();
        assert_eq!(config.name(), "app_config_name");
        assert_eq!(config.timeout_secs(), &2u64);
    }

    #[test]
    fn test_load_config_app_file_and_user_app_file() {
        write_config_file(
            &get_current_dir().join("config").with_extension("yaml"),
            &MyConfig {
                name: "app_config_name".to_string(),
                timeout_secs: 2,
            },
        );
        write_config_file(
            &get_current_dir()
                .join("config_test-user")
                .with_extension("yaml"),
            &MyConfig {
                name: "user_config_name".to_string(),
                timeout_secs: 3,
            },
        );

        let config = load_config::<MyConfig>("my-config", None, false).unwrap();
        assert_eq!(config.name(), "user_config_name");
        assert_eq!(config.timeout_secs(), &3u64);
    }

    #[test]
    fn test_load_config_home_dir_wins_over_current_dir() {
        let home = create_tabfetch_home_dir().unwrap();

        write_config_file(
            &get_current_dir().join("config").with_extension("yaml"),
            &MyConfig {
                name: "app_config_name".to_string(),
                timeout_secs: 2,
            },
        );
        write_config_file(
            &home.join("my-config").with_extension("yaml"),
            &MyConfig {
                name: "home_dir_config_name".to_string(),
                timeout_secs: 4,
            },
        );

        let config = load_config::<MyConfig>("my-config", None, false).unwrap();
        assert_eq!(config.name(), "home_dir_config_name");
        assert_eq!(config.timeout_secs(), &4u64);
    }

    #[test]
    fn test_load_config_explicit_folder() {
        let folder = get_current_dir().join("elsewhere");
        std::fs::create_dir_all(&folder).unwrap();
        write_config_file(
            &folder.join("config").with_extension("yaml"),
            &MyConfig {
                name: "folder_config_name".to_string(),
                timeout_secs: 6,
            },
        );

        let config = load_config::<MyConfig>("my-config", Some(folder), false).unwrap();
        assert_eq!(config.name(), "folder_config_name");
        assert_eq!(config.timeout_secs(), &6u64);
    }

    #[test]
    fn test_load_config_env() {
        // SAFETY: the variables are unique to this test.
        unsafe {
            std::env::set_var("MY_CONFIG_ENV_NAME", "env_config_name");
            std::env::set_var("MY_CONFIG_ENV_TIMEOUT_SECS", "5");
        }

        let config = load_config::<MyConfig>("my-config-env", None, false).unwrap();

        assert_eq!(config.name(), "env_config_name");
        assert_eq!(config.timeout_secs(), &5u64);
    }
}
