//! MongoDB database connector and utilities
//!
//! Provides connection management and MongoDB-specific helpers.

mod config;
mod connector;
mod health;
mod id;

pub use config::{DEFAULT_DATABASE, MongoConfig};
pub use connector::{MongoError, connect, connect_from_config, disconnect};
pub use health::{HealthStatus, check_health, check_health_detailed};
pub use id::{id_filter, uuid_as_string};

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
