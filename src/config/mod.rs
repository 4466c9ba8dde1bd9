use crate::db::pool::DEFAULT_BUSY_TIMEOUT_MS;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    /// Shared admin password; `None` leaves every command open.
    #[serde(default)]
    pub shared_password: Option<String>,
    #[serde(default)]
    pub currency_symbol: String,
    #[serde(default = "default_busy_timeout")]
    pub busy_timeout_ms: u64,
}

fn default_busy_timeout() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            shared_password: None,
            currency_symbol: String::new(),
            busy_timeout_ms: default_busy_timeout(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("teamledger")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".teamledger")
        }
    }

    /// Return the full path of the default config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("teamledger.conf")
    }

    /// Return the full path of the default SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("teamledger.sqlite")
    }

    /// Load configuration from `path` (or the default file), falling back to
    /// defaults when the file does not exist.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::config_file);

        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
        let mut cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;

        cfg.database = expand_tilde(&cfg.database).to_string_lossy().to_string();
        tracing::debug!(config = %path.display(), database = %cfg.database, "configuration loaded");
        Ok(cfg)
    }

    /// Write the configuration as YAML.
    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let yaml = serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)?;
        fs::write(path, yaml).map_err(|_| AppError::ConfigSave)?;
        Ok(())
    }

    /// Prepare configuration and database file for `init`.
    ///
    /// Returns the database path that was configured. In test mode the
    /// configuration file is left untouched.
    /// A relative `database` is placed inside the configuration directory.
    pub fn init_all(
        database: &str,
        config_path: Option<&Path>,
        is_test: bool,
    ) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let db_path = {
            let p = expand_tilde(database);
            if p.is_absolute() { p } else { dir.join(p) }
        };

        if !is_test {
            let conf_path = config_path
                .map(Path::to_path_buf)
                .unwrap_or_else(Self::config_file);

            // Keep settings such as the shared password across re-inits.
            let mut config = Self::load(Some(&conf_path))?;
            config.database = db_path.to_string_lossy().to_string();
            config.save(&conf_path)?;
            success(format!("Config file: {}", conf_path.display()));
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        success(format!("Database:    {}", db_path.display()));

        Ok(db_path)
    }
}
