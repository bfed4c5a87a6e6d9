use std::net::SocketAddr;
use std::path::PathBuf;

/// Server configuration from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    /// JSON array of flights used to seed the store. Built-in data when unset.
    pub seed_path: Option<PathBuf>,
    /// Allowed CORS origins. Empty means any origin.
    pub cors_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    /// FLIGHTBOARD_LISTEN_ADDR defaults to "0.0.0.0:3000"
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            std::env::var("FLIGHTBOARD_LISTEN_ADDR").ok().as_deref(),
            std::env::var("FLIGHTBOARD_SEED_PATH").ok().as_deref(),
            std::env::var("FLIGHTBOARD_CORS_ORIGINS").ok().as_deref(),
        )
    }

    /// Build a configuration from raw variable values, `None` meaning unset.
    pub fn from_vars(
        listen_addr: Option<&str>,
        seed_path: Option<&str>,
        cors_origins: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let listen_addr = listen_addr
            .unwrap_or("0.0.0.0:3000")
            .trim()
            .parse()
            .map_err(|_| {
                ConfigError::Invalid("FLIGHTBOARD_LISTEN_ADDR", "must be a valid socket address")
            })?;

        let seed_path = seed_path
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        let cors_origins = match cors_origins {
            Some(s) => Self::parse_origins(s)?,
            None => Vec::new(),
        };

        Ok(Config {
            listen_addr,
            seed_path,
            cors_origins,
        })
    }

    /// Parse a comma-separated origin list. Empty entries are skipped and
    /// trailing slashes dropped.
    pub fn parse_origins(origins_str: &str) -> Result<Vec<String>, ConfigError> {
        let mut origins = Vec::new();
        for origin in origins_str.split(',') {
            let origin = origin.trim();
            if origin.is_empty() {
                continue;
            }
            // Expected format: scheme://host[:port], e.g. "http://localhost:5173"
            if !origin.starts_with("http://") && !origin.starts_with("https://") {
                return Err(ConfigError::Invalid(
                    "FLIGHTBOARD_CORS_ORIGINS",
                    "origins must start with http:// or https://",
                ));
            }
            origins.push(origin.trim_end_matches('/').to_string());
        }

        Ok(origins)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Invalid(&'static str, &'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Invalid(var, msg) => write!(f, "Invalid value for {}: {}", var, msg),
        }
    }
}

impl std::error::Error for ConfigError {}
