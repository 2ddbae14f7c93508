use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const ENV_STORE_URL: &str = "PIECELOG_STORE_URL";
pub const ENV_API_KEY: &str = "PIECELOG_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Spreadsheet web-app endpoint.
    #[serde(default)]
    pub store_url: String,
    #[serde(default)]
    pub api_key: String,
    /// Local SQLite journal of submitted records.
    #[serde(default = "default_journal")]
    pub journal: String,
    /// Civil timezone for "today" and registration timestamps.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_worker: Option<String>,
}

fn default_journal() -> String {
    Config::journal_file().to_string_lossy().to_string()
}

fn default_timezone() -> String {
    "Asia/Tokyo".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_url: String::new(),
            api_key: String::new(),
            journal: default_journal(),
            timezone: default_timezone(),
            default_worker: None,
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("piecelog")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".piecelog")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("piecelog.conf")
    }

    /// Return the full path of the SQLite journal
    pub fn journal_file() -> PathBuf {
        Self::config_dir().join("piecelog.sqlite")
    }

    /// Load configuration from file (defaults when absent), then apply
    /// environment overrides.
    pub fn load() -> AppResult<Self> {
        let mut cfg = Self::load_from(&Self::config_file())?;
        cfg.apply_env();
        Ok(cfg)
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    fn apply_env(&mut self) {
        if let Ok(url) = env::var(ENV_STORE_URL)
            && !url.trim().is_empty()
        {
            self.store_url = url;
        }
        if let Ok(key) = env::var(ENV_API_KEY)
            && !key.is_empty()
        {
            self.api_key = key;
        }
    }

    pub fn tz(&self) -> AppResult<chrono_tz::Tz> {
        self.timezone
            .parse::<chrono_tz::Tz>()
            .map_err(|_| AppError::Config(format!("unknown timezone '{}'", self.timezone)))
    }

    /// Same configuration with the api key hidden, for printing.
    pub fn masked(&self) -> Self {
        let mut shown = self.clone();
        if !shown.api_key.is_empty() {
            shown.api_key = "********".to_string();
        }
        shown
    }

    /// Initialize configuration file and journal location.
    /// Returns the journal path that was configured.
    pub fn init_all(custom_journal: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let journal_path = match custom_journal {
            Some(name) => {
                let p = Path::new(&name);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    dir.join(p)
                }
            }
            None => Self::journal_file(),
        };

        // Keep endpoint settings from an existing file.
        let mut config = Self::load_from(&Self::config_file()).unwrap_or_default();
        config.journal = journal_path.to_string_lossy().to_string();

        if !is_test {
            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        if let Some(parent) = journal_path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(journal_path)
    }
}
