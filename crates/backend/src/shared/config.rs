use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Verbose logging, including SQL statements
    #[serde(default)]
    pub debug: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// SQLite file, relative paths resolve against the executable directory
    pub path: String,
    /// Full connection URL; takes precedence over `path`
    #[serde(default)]
    pub url: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 8000
debug = false

[database]
path = "target/db/tracker.db"
"#;

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Embedded,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Embedded => f.write_str("embedded default"),
        }
    }
}

/// Load configuration from config.toml
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Current working directory
/// 3. Falls back to embedded default config
///
/// Environment overrides are applied last, see [`apply_env_overrides`].
/// Runs before logging is set up, so it reports its source instead of logging.
pub fn load_config() -> anyhow::Result<(Config, ConfigSource)> {
    let mut candidates = Vec::new();
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.push(exe_dir.join("config.toml"));
        }
    }
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd.join("config.toml"));
    }

    let (mut config, source) = match candidates.into_iter().find(|p| p.exists()) {
        Some(config_path) => {
            let contents = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&contents)?;
            (config, ConfigSource::File(config_path))
        }
        None => (toml::from_str(DEFAULT_CONFIG)?, ConfigSource::Embedded),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    Ok((config, source))
}

/// `DATABASE_URL`, `TRACKER_PORT` and `TRACKER_DEBUG` override the file values.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> anyhow::Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup("DATABASE_URL").filter(|u| !u.is_empty()) {
        config.database.url = Some(url);
    }
    if let Some(port) = lookup("TRACKER_PORT") {
        config.server.port = port
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid TRACKER_PORT '{}': {}", port, e))?;
    }
    if let Some(debug) = lookup("TRACKER_DEBUG") {
        config.server.debug = matches!(debug.to_lowercase().as_str(), "1" | "true" | "yes");
    }
    Ok(())
}

/// Get the database file path from configuration
/// Resolves relative paths relative to the executable directory
pub fn get_database_path(config: &Config) -> anyhow::Result<PathBuf> {
    let db_path_str = &config.database.path;
    let db_path = Path::new(db_path_str);

    // If absolute path, use as is
    if db_path.is_absolute() {
        return Ok(db_path.to_path_buf());
    }

    // If relative path, resolve it relative to the executable directory
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let resolved_path = exe_dir.join(db_path);
            return Ok(resolved_path);
        }
    }

    // Fallback: use relative to current directory
    Ok(PathBuf::from(db_path_str))
}
