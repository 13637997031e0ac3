//
// Copyright 2025 Tabs Data Inc.
//

use std::env::current_dir;
use std::path::{Path, PathBuf};
use std::{fs, io};
use thiserror::Error;

pub const TABFETCH_HOME_DIR: &str = ".tabfetch";

#[derive(Debug, Error)]
pub enum EnvironmentError {
    #[error("Current directory cannot be determined: {cause}")]
    UndeterminedCurrentDir {
        #[source]
        cause: io::Error,
    },
    #[error("Home directory of the current user cannot be determined")]
    UndeterminedHomeDir,
    #[error("An error occurred running file system operations: {0}")]
    IOError(#[from] io::Error),
}

/// Converts a path from relative to absolute, without making it canonical.
pub fn to_absolute(path: &Path) -> Result<PathBuf, EnvironmentError> {
    Ok(match path.is_absolute() {
        true => path.to_path_buf(),
        false => current_dir()
            .map_err(|cause| EnvironmentError::UndeterminedCurrentDir { cause })?
            .join(path),
    })
}

/// Retrieves the current working directory.
///
/// Falls back to `.` if the current working directory cannot be retrieved.
///
/// # Test Configuration
/// In test mode, it creates and returns a temporary test directory for isolation.
#[cfg(not(any(test, feature = "mock-env")))]
pub fn get_current_dir() -> PathBuf {
    current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

#[cfg(any(test, feature = "mock-env"))]
pub fn get_current_dir() -> PathBuf {
    let dir = testdir::testdir!().join("current_dir");
    fs::create_dir_all(&dir).expect("Failed to create test current dir");
    dir
}

/// Retrieves the home directory of the current user.
///
/// # Test Configuration
/// In test mode, it creates and returns a temporary test home directory for isolation.
#[cfg(not(any(test, feature = "mock-env")))]
pub fn get_home_dir() -> Result<PathBuf, EnvironmentError> {
    homedir::my_home()
        .ok()
        .flatten()
        .ok_or(EnvironmentError::UndeterminedHomeDir)
}

#[cfg(any(test, feature = "mock-env"))]
pub fn get_home_dir() -> Result<PathBuf, EnvironmentError> {
    let dir = testdir::testdir!().join("home");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Retrieves the username of the current user.
///
/// # Test Configuration
/// In test mode, it returns a fixed test username.
#[cfg(not(any(test, feature = "mock-env")))]
pub fn get_user_name() -> String {
    whoami::username()
}

#[cfg(any(test, feature = "mock-env"))]
pub fn get_user_name() -> String {
    String::from("test user")
}

/// Retrieves the `.tabfetch` directory path inside the user's home directory.
pub fn get_tabfetch_home_dir() -> Result<PathBuf, EnvironmentError> {
    Ok(get_home_dir()?.join(TABFETCH_HOME_DIR))
}

/// Creates the `.tabfetch` directory inside the user's home directory if it doesn't exist.
pub fn create_tabfetch_home_dir() -> Result<PathBuf, EnvironmentError> {
    let path = get_tabfetch_home_dir()?;
    if !path.exists() {
        fs::create_dir_all(&path)?;
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_absolute_keeps_absolute_paths() {
        let path = get_current_dir().join("data.csv");
        assert_eq!(to_absolute(&path).unwrap(), path);
    }

    #[test]
    fn test_to_absolute_relative_path() {
        let path = PathBuf::from("work").join("log");
        let absolute = to_absolute(&path).unwrap();
        assert!(absolute.is_absolute());
        assert!(absolute.ends_with("work/log"));
    }

    #[test]
    fn test_create_tabfetch_home_dir() {
        let dir = create_tabfetch_home_dir().unwrap();
        assert!(dir.exists());
        assert!(dir.ends_with(TABFETCH_HOME_DIR));
        // idempotent
        assert_eq!(create_tabfetch_home_dir().unwrap(), dir);
    }

    #[test]
    fn test_mock_user_name() {
        assert_eq!(get_user_name(), "test user");
    }
}
