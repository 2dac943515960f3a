//! Configuration for the estate API

use core_config::{app_info, media::MediaConfig, server::ServerConfig, AppInfo, FromEnv};
use database::mongodb::MongoConfig;

pub use core_config::Environment;

/// Application configuration, read once at startup
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub media: MediaConfig,
    pub environment: Environment,
}

impl Config {
    /// Fails when `MONGO_URI` (or `MONGODB_URL`) is unset or a value does not parse.
    pub fn from_env() -> eyre::Result<Self> {
        Ok(Self {
            app: app_info!(),
            mongodb: MongoConfig::from_env()?,
            server: ServerConfig::from_env()?,
            media: MediaConfig::from_env()?,
            environment: Environment::from_env(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_connection_string_fails() {
        temp_env::with_vars_unset(["MONGO_URI", "MONGODB_URL"], || {
            assert!(Config::from_env().is_err());
        });
    }

    #[test]
    fn test_from_env() {
        temp_env::with_vars(
            [
                ("MONGO_URI", Some("mongodb://localhost:27017/estate")),
                ("MONGODB_URL", None),
                ("MONGO_DATABASE", None),
                ("PORT", Some("4100")),
                ("CLOUDINARY_NAME", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.mongodb.database(), "estate");
                assert_eq!(config.server.port, 4100);
                assert!(!config.media.is_configured());
                assert_eq!(config.app.name, "estate_api");
            },
        );
    }
}
