//! Database connectors for the estate API.
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB client, configuration and health checks
//! - `config` - `core_config::FromEnv` for the connection settings
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{MongoConfig, connect_from_config};
//! use core_config::FromEnv;
//!
//! let config = MongoConfig::from_env()?;
//! let client = connect_from_config(&config).await?;
//! let db = client.database(config.database());
//! ```

#[cfg(feature = "mongodb")]
pub mod mongodb;

#[cfg(feature = "mongodb")]
pub use self::mongodb::MongoError;
