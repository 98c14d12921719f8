use clap::Parser;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Name of the optional config file inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default SQLite database file name
const DEFAULT_DATABASE: &str = "locallibrary.db";

/// Configuration for the Local Library server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// URL (file path) of the SQLite database
    pub database_url: String,
    /// Address the HTTP server binds to
    pub host: String,
    /// Port the HTTP server listens on
    pub port: u16,
}

/// Update structure for Config with all fields optional
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ConfigUpdate {
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Command line arguments for the server
#[derive(Parser, Debug, Default)]
#[clap(name = "locallibrary", about = "Local Library catalog server")]
pub struct CliArgs {
    /// Database URL
    #[clap(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Address to bind to
    #[clap(long, env = "LOCALLIBRARY_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[clap(long, env = "LOCALLIBRARY_PORT")]
    pub port: Option<u16>,

    /// Directory for rolling JSON log files
    #[clap(long, env = "LOCALLIBRARY_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Debug mode
    #[clap(long, env = "LOCALLIBRARY_DEBUG", default_value_t = false)]
    pub debug: bool,
}

impl Config {
    /// Applies a config update to the current configuration
    pub fn apply_update(self, update: ConfigUpdate) -> Self {
        Self {
            database_url: update.database_url.unwrap_or(self.database_url),
            host: update.host.unwrap_or(self.host),
            port: update.port.unwrap_or(self.port),
        }
    }

    /// Returns the `host:port` pair to bind the listener to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Returns the base (default) configuration
///
/// When a config directory is known the database lives next to the config
/// file, otherwise in the working directory.
pub fn base_config(config_dir: Option<&Path>) -> Config {
    let database_url = config_dir.map_or(DEFAULT_DATABASE.to_string(), |dir| {
        dir.join(DEFAULT_DATABASE).to_string_lossy().to_string()
    });

    Config {
        database_url,
        host: "127.0.0.1".to_string(),
        port: 3000,
    }
}

/// Loads configuration from a TOML file
///
/// A missing path or missing file yields an empty update.
pub fn config_from_file(config_path: Option<&Path>) -> Result<ConfigUpdate, ConfigError> {
    let Some(config_path) = config_path else {
        return Ok(ConfigUpdate::default());
    };

    if !config_path.exists() {
        info!("Config file not found at {:?}, using defaults", config_path);
        return Ok(ConfigUpdate::default());
    }

    let content = fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
        path: config_path.to_path_buf(),
        source,
    })?;
    let update = toml::from_str::<ConfigUpdate>(&content)?;

    info!("Loaded configuration from {:?}", config_path);
    Ok(update)
}

/// Loads configuration from command line arguments
pub fn config_from_args(args: &CliArgs) -> ConfigUpdate {
    ConfigUpdate {
        database_url: args.database_url.clone(),
        host: args.host.clone(),
        port: args.port,
    }
}

/// Gets the complete configuration by combining defaults with
/// values from the config file, environment variables, and command line
/// arguments in order of increasing precedence
pub fn get_config(args: &CliArgs) -> Config {
    let config_dir = match ProjectDirs::from("com", "locallibrary", "locallibrary") {
        Some(proj_dirs) => Some(proj_dirs.config_dir().to_path_buf()),
        None => {
            warn!("Could not determine config directory, skipping config file");
            None
        }
    };

    let config_dir = config_dir.filter(|dir| {
        let exists = dir.exists();
        if !exists {
            info!("Config directory not found at {:?}, using defaults", dir);
        }
        exists
    });

    load_config(config_dir.as_deref(), args)
}

/// Resolves the configuration against an explicit config directory
pub fn load_config(config_dir: Option<&Path>, args: &CliArgs) -> Config {
    let config_file = config_dir.map(|dir| dir.join(CONFIG_FILE_NAME));

    let file_update = config_from_file(config_file.as_deref()).unwrap_or_else(|e| {
        warn!("{}", e);
        ConfigUpdate::default()
    });

    let config = base_config(config_dir)
        .apply_update(file_update)
        .apply_update(config_from_args(args));

    info!(
        "Final configuration: database_url={}, bind_address={}",
        config.database_url,
        config.bind_address()
    );

    config
}
