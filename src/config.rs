use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = ".caimanconfig.json";

/// Runtime configuration, persisted as JSON in the user's home directory.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_url: String,
    pub current_user_name: Option<String>,
}

#[derive(Debug)]
pub enum ConfigError {
    IoError { msg: String },
    FormatError { msg: String },
    MissingHomeDir,
}

impl Config {
    pub fn read() -> Result<Config, ConfigError> {
        Self::read_from(&config_file_path()?)
    }

    pub fn read_from(path: &Path) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|error| ConfigError::IoError {
            msg: format!("{:?}", error),
        })?;

        serde_json::from_str(&contents).map_err(|error| ConfigError::FormatError {
            msg: format!("{:?}", error),
        })
    }

    pub fn write(&self) -> Result<(), ConfigError> {
        self.write_to(&config_file_path()?)
    }

    pub fn write_to(&self, path: &Path) -> Result<(), ConfigError> {
        let contents =
            serde_json::to_string_pretty(self).map_err(|error| ConfigError::FormatError {
                msg: format!("{:?}", error),
            })?;

        fs::write(path, contents).map_err(|error| ConfigError::IoError {
            msg: format!("{:?}", error),
        })
    }

    /// Makes `name` the current user and persists the change.
    pub fn set_user(&mut self, name: &str) -> Result<(), ConfigError> {
        self.current_user_name = Some(name.to_string());
        self.write()
    }
}

fn config_file_path() -> Result<PathBuf, ConfigError> {
    let home = env::var("HOME").map_err(|_| ConfigError::MissingHomeDir)?;

    Ok(PathBuf::from(home).join(CONFIG_FILE_NAME))
}
