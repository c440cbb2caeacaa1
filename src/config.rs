use crate::error::{config::ConfigError, AppError};

pub struct Config {
    pub database_url: String,
    pub discord_bot_token: String,
    /// When true, entities that expired while the process was down are
    /// announced during startup catch-up instead of finalized silently.
    pub announce_startup_catchup: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?,
            discord_bot_token: std::env::var("DISCORD_BOT_TOKEN")
                .map_err(|_| ConfigError::MissingEnvVar("DISCORD_BOT_TOKEN".to_string()))?,
            announce_startup_catchup: match std::env::var("ANNOUNCE_STARTUP_CATCHUP") {
                Ok(value) => value.parse::<bool>().map_err(|_| ConfigError::InvalidEnvVar {
                    name: "ANNOUNCE_STARTUP_CATCHUP".to_string(),
                    value,
                })?,
                Err(_) => false,
            },
        })
    }
}
