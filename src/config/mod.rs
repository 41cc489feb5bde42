use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    /// Longest wait for another writer's lock before failing as retryable.
    #[serde(default = "default_lock_timeout_ms")]
    pub lock_timeout_ms: u64,
    /// Role assumed when `--role` is not given.
    #[serde(default = "default_role")]
    pub default_role: String,
    /// User id assumed when `--user` is not given.
    #[serde(default = "default_user")]
    pub default_user: i64,
    /// Decimals shown for hour values in tables.
    #[serde(default = "default_hours_decimals")]
    pub hours_decimals: usize,
}

fn default_lock_timeout_ms() -> u64 {
    5000
}
fn default_role() -> String {
    "admin".to_string()
}
fn default_user() -> i64 {
    1
}
fn default_hours_decimals() -> usize {
    2
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file())
    }
}

impl Config {
    fn with_database(db_path: PathBuf) -> Self {
        Self {
            database: db_path.to_string_lossy().to_string(),
            lock_timeout_ms: default_lock_timeout_ms(),
            default_role: default_role(),
            default_user: default_user(),
            hours_decimals: default_hours_decimals(),
        }
    }

    /// Configuration directory: `~/.hourledger` (current dir if no home).
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".hourledger")
    }

    /// Full path of the config file.
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("hourledger.conf")
    }

    /// Full path of the default SQLite database.
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("hourledger.sqlite")
    }

    /// Database path given with `--db`: absolute as is, relative under the
    /// config directory. Every command resolves it the same way.
    pub fn resolve_db_path(name: &str) -> PathBuf {
        let p = Path::new(name);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            Self::config_dir().join(p)
        }
    }

    pub fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.lock_timeout_ms)
    }

    /// Load configuration from file, or return defaults if not found.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("cannot parse {}: {e}", path.display())))
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Create the config directory, the config file (unless `is_test`) and
    /// an empty database file. Returns the config that was written.
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided (relative to the config dir) or default
        let db_path = match custom_db {
            Some(name) => Self::resolve_db_path(name),
            None => Self::database_file(),
        };

        let config = Self::with_database(db_path.clone());

        if !is_test {
            let yaml = config.to_yaml()?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            success(format!("Config file: {}", Self::config_file().display()));
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: Config = serde_yaml::from_str("database: /tmp/x.sqlite\n").unwrap();
        assert_eq!(cfg.database, "/tmp/x.sqlite");
        assert_eq!(cfg.lock_timeout_ms, 5000);
        assert_eq!(cfg.default_role, "admin");
        assert_eq!(cfg.default_user, 1);
        assert_eq!(cfg.hours_decimals, 2);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let cfg = Config::load_from(Path::new("/definitely/not/here.conf")).unwrap();
        assert!(cfg.database.ends_with("hourledger.sqlite"));
    }

    #[test]
    fn relative_db_lives_in_config_dir() {
        assert_eq!(
            Config::resolve_db_path("foo.sqlite"),
            Config::config_dir().join("foo.sqlite")
        );
        assert_eq!(
            Config::resolve_db_path("/tmp/foo.sqlite"),
            PathBuf::from("/tmp/foo.sqlite")
        );
    }

    #[test]
    fn yaml_round_trips() {
        let cfg = Config {
            lock_timeout_ms: 250,
            ..Config::default()
        };
        let back: Config = serde_yaml::from_str(&cfg.to_yaml().unwrap()).unwrap();
        assert_eq!(back.lock_timeout_ms, 250);
        assert_eq!(back.lock_timeout(), Duration::from_millis(250));
    }
}
