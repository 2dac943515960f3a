#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_optional, env_parse_or};

/// Database used when neither `MONGO_DATABASE` nor the URI names one
pub const DEFAULT_DATABASE: &str = "real_estate";

/// MongoDB database configuration
///
/// Constructed manually or loaded from environment variables (with `config` feature).
///
/// # Example
///
/// ```ignore
/// use database::mongodb::MongoConfig;
///
/// let config = MongoConfig::new("mongodb://localhost:27017/estate");
/// assert_eq!(config.database(), "estate");
///
/// let config = MongoConfig::with_database("mongodb://localhost:27017", "mydb");
/// ```
#[derive(Clone)]
pub struct MongoConfig {
    /// Format: mongodb://[username:password@]host[:port][/database][?options]
    pub url: String,

    pub database: String,

    /// Optional application name for server logs
    pub app_name: Option<String>,

    pub max_pool_size: u32,

    pub min_pool_size: u32,

    pub connect_timeout_secs: u64,

    pub server_selection_timeout_secs: u64,
}

impl MongoConfig {
    /// Config for `url`, using the database named in the URI path or [`DEFAULT_DATABASE`].
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        let database =
            database_from_uri(&url).unwrap_or_else(|| DEFAULT_DATABASE.to_string());
        Self::with_database(url, database)
    }

    pub fn with_database(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            app_name: None,
            max_pool_size: 100,
            min_pool_size: 5,
            connect_timeout_secs: 10,
            server_selection_timeout_secs: 30,
        }
    }

    /// Set the application name for server logs
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    /// The URL with any password replaced by `***`, safe to log.
    pub fn redacted_url(&self) -> String {
        redact_uri(&self.url)
    }
}

// Credentials stay out of Debug output too.
impl std::fmt::Debug for MongoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MongoConfig")
            .field("url", &self.redacted_url())
            .field("database", &self.database)
            .field("app_name", &self.app_name)
            .field("max_pool_size", &self.max_pool_size)
            .field("min_pool_size", &self.min_pool_size)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field(
                "server_selection_timeout_secs",
                &self.server_selection_timeout_secs,
            )
            .finish()
    }
}

/// Database name from the path segment of a connection string, if any.
///
/// `mongodb+srv://u:p@cluster.net/estate?retryWrites=true` yields `estate`.
pub(crate) fn database_from_uri(uri: &str) -> Option<String> {
    let rest = uri.split_once("://").map_or(uri, |(_, rest)| rest);
    let (_, path) = rest.split_once('/')?;
    let name = path.split('?').next().unwrap_or_default().trim();

    (!name.is_empty()).then(|| name.to_string())
}

fn redact_uri(uri: &str) -> String {
    let Some((scheme, rest)) = uri.split_once("://") else {
        return uri.to_string();
    };
    let host_end = rest.find('/').unwrap_or(rest.len());
    let Some(at) = rest[..host_end].rfind('@') else {
        return uri.to_string();
    };

    let credentials = &rest[..at];
    let user = credentials
        .split_once(':')
        .map_or(credentials, |(user, _)| user);

    format!("{}://{}:***@{}", scheme, user, &rest[at + 1..])
}

/// Load MongoConfig from environment variables
///
/// Environment variables:
/// - `MONGO_URI` or `MONGODB_URL` (required) - MongoDB connection string
/// - `MONGO_DATABASE` (optional) - defaults to the URI's database, then `real_estate`
/// - `MONGODB_APP_NAME` (optional) - Application name for server logs
/// - `MONGODB_MAX_POOL_SIZE` (optional, default: 100)
/// - `MONGODB_MIN_POOL_SIZE` (optional, default: 5)
/// - `MONGODB_CONNECT_TIMEOUT_SECS` (optional, default: 10)
/// - `MONGODB_SERVER_SELECTION_TIMEOUT_SECS` (optional, default: 30)
#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = env_optional("MONGO_URI")
            .or_else(|| env_optional("MONGODB_URL"))
            .ok_or_else(|| ConfigError::MissingEnvVar("MONGO_URI or MONGODB_URL".to_string()))?;

        let mut config = match env_optional("MONGO_DATABASE") {
            Some(database) => Self::with_database(url, database),
            None => Self::new(url),
        };

        config.app_name = env_optional("MONGODB_APP_NAME");
        config.max_pool_size = env_parse_or("MONGODB_MAX_POOL_SIZE", config.max_pool_size)?;
        config.min_pool_size = env_parse_or("MONGODB_MIN_POOL_SIZE", config.min_pool_size)?;
        config.connect_timeout_secs =
            env_parse_or("MONGODB_CONNECT_TIMEOUT_SECS", config.connect_timeout_secs)?;
        config.server_selection_timeout_secs = env_parse_or(
            "MONGODB_SERVER_SELECTION_TIMEOUT_SECS",
            config.server_selection_timeout_secs,
        )?;

        Ok(config)
    }
}
