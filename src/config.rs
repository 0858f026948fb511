use crate::difficulty::Difficulty;
use crate::util::{data_dir, expand_tilde, APP_DIR_NAME};
use serde::Deserialize;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use thiserror::Error;

const HISTORY_FILE_NAME: &str = "history.json";
const LOG_FILE_NAME: &str = "gridsnake.log";

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Difficulty highlighted when the startup screen opens
    #[serde(default)]
    pub(crate) difficulty: Difficulty,

    /// Settings about data files
    #[serde(default)]
    pub(crate) files: FileConfig,

    #[serde(default)]
    pub(crate) logging: LoggingConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join(APP_DIR_NAME).join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read the configuration file at the default path, if there is one
    pub(crate) fn load_default() -> Result<Config, ConfigError> {
        Config::load(&Config::default_path()?, true)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// Return the filepath at which session history should be stored: the
    /// file given in the configuration or, if that is not set, the default
    /// history file path.  Return `None` if saving history is disabled or if
    /// no path is configured and the default path could not be computed.
    pub(crate) fn history_file(&self) -> Option<Cow<'_, Path>> {
        if !self.files.save_history {
            return None;
        }
        self.files
            .history_file
            .as_deref()
            .map(Cow::from)
            .or_else(|| data_dir().map(|p| Cow::from(p.join(HISTORY_FILE_NAME))))
    }

    /// Return the filepath to which log messages should be written, if any
    pub(crate) fn log_file(&self) -> Option<Cow<'_, Path>> {
        self.files
            .log_file
            .as_deref()
            .map(Cow::from)
            .or_else(|| data_dir().map(|p| Cow::from(p.join(LOG_FILE_NAME))))
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(try_from = "RawFileConfig")]
pub(crate) struct FileConfig {
    /// Path at which session history should be stored
    history_file: Option<PathBuf>,

    /// Whether to load & save session history in a file
    save_history: bool,

    /// Path to which log messages are appended
    log_file: Option<PathBuf>,
}

impl Default for FileConfig {
    fn default() -> FileConfig {
        FileConfig {
            history_file: None,
            save_history: true,
            log_file: None,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawFileConfig {
    history_file: Option<String>,
    save_history: bool,
    log_file: Option<String>,
}

impl Default for RawFileConfig {
    fn default() -> RawFileConfig {
        RawFileConfig {
            history_file: None,
            save_history: true,
            log_file: None,
        }
    }
}

impl TryFrom<RawFileConfig> for FileConfig {
    type Error = std::io::Error;

    fn try_from(value: RawFileConfig) -> Result<FileConfig, std::io::Error> {
        Ok(FileConfig {
            history_file: value.history_file.map(expand_tilde).transpose()?,
            save_history: value.save_history,
            log_file: value.log_file.map(expand_tilde).transpose()?,
        })
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default)]
pub(crate) struct LoggingConfig {
    /// A `tracing` filter directive, e.g. `"info"` or `"gridsnake=debug"`
    pub(crate) level: String,
}

impl Default for LoggingConfig {
    fn default() -> LoggingConfig {
        LoggingConfig {
            level: String::from("info"),
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn empty_config() {
        let cfg = toml::from_str::<Config>("").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.difficulty, Difficulty::Normal);
        assert!(cfg.files.save_history);
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn full_config() {
        let cfg = toml::from_str::<Config>(concat!(
            "difficulty = \"hard\"\n",
            "\n",
            "[files]\n",
            "history-file = \"/srv/snake/history.json\"\n",
            "save-history = true\n",
            "log-file = \"/srv/snake/snake.log\"\n",
            "\n",
            "[logging]\n",
            "level = \"debug\"\n",
        ))
        .unwrap();
        assert_eq!(cfg.difficulty, Difficulty::Hard);
        assert_eq!(
            cfg.history_file().as_deref(),
            Some(Path::new("/srv/snake/history.json"))
        );
        assert_eq!(
            cfg.log_file().as_deref(),
            Some(Path::new("/srv/snake/snake.log"))
        );
        assert_eq!(cfg.logging.level, "debug");
    }

    #[test]
    fn history_disabled() {
        let cfg = toml::from_str::<Config>(concat!(
            "[files]\n",
            "history-file = \"/srv/snake/history.json\"\n",
            "save-history = false\n",
        ))
        .unwrap();
        assert_eq!(cfg.history_file(), None);
    }

    #[test]
    fn bad_difficulty() {
        assert!(toml::from_str::<Config>("difficulty = \"nightmare\"").is_err());
    }

    #[test]
    fn load_missing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert_eq!(Config::load(&path, true).unwrap(), Config::default());
        assert!(matches!(
            Config::load(&path, false),
            Err(ConfigError::Read(_))
        ));
    }

    #[test]
    fn load_invalid() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs_err::write(&path, "difficulty = [").unwrap();
        assert!(matches!(
            Config::load(&path, true),
            Err(ConfigError::Parse(_))
        ));
    }
}
