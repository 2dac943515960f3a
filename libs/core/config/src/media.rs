use crate::{env_optional, ConfigError, FromEnv};
use std::fmt;

/// Image hosting credentials.
///
/// Built once at startup and handed to the services that need it. Every field
/// is optional so the API can run without a hosting account; uploads are not
/// performed by this service.
#[derive(Clone, Default)]
pub struct MediaConfig {
    pub cloud_name: Option<String>,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
}

impl MediaConfig {
    pub fn new(
        cloud_name: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            cloud_name: Some(cloud_name.into()),
            api_key: Some(api_key.into()),
            api_secret: Some(api_secret.into()),
        }
    }

    /// All three credentials are present
    pub fn is_configured(&self) -> bool {
        self.cloud_name.is_some() && self.api_key.is_some() && self.api_secret.is_some()
    }

    /// Names of the variables that are still unset
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.cloud_name.is_none() {
            missing.push("CLOUDINARY_NAME");
        }
        if self.api_key.is_none() {
            missing.push("CLOUDINARY_API_KEY");
        }
        if self.api_secret.is_none() {
            missing.push("CLOUDINARY_API_SECRET");
        }
        missing
    }
}

// The secret never reaches the logs.
impl fmt::Debug for MediaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &self.api_secret.as_ref().map(|_| "***"))
            .finish()
    }
}

impl FromEnv for MediaConfig {
    /// Reads CLOUDINARY_NAME, CLOUDINARY_API_KEY and CLOUDINARY_API_SECRET.
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            cloud_name: env_optional("CLOUDINARY_NAME"),
            api_key: env_optional("CLOUDINARY_API_KEY"),
            api_secret: env_optional("CLOUDINARY_API_SECRET"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_config_from_env_complete() {
        temp_env::with_vars(
            [
                ("CLOUDINARY_NAME", Some("estate")),
                ("CLOUDINARY_API_KEY", Some("key")),
                ("CLOUDINARY_API_SECRET", Some("secret")),
            ],
            || {
                let config = MediaConfig::from_env().unwrap();
                assert!(config.is_configured());
                assert!(config.missing().is_empty());
                assert_eq!(config.cloud_name.as_deref(), Some("estate"));
            },
        );
    }

    #[test]
    fn test_media_config_from_env_partial() {
        temp_env::with_vars(
            [
                ("CLOUDINARY_NAME", Some("estate")),
                ("CLOUDINARY_API_KEY", None::<&str>),
                ("CLOUDINARY_API_SECRET", None::<&str>),
            ],
            || {
                let config = MediaConfig::from_env().unwrap();
                assert!(!config.is_configured());
                assert_eq!(
                    config.missing(),
                    vec!["CLOUDINARY_API_KEY", "CLOUDINARY_API_SECRET"]
                );
            },
        );
    }

    #[test]
    fn test_media_config_debug_redacts_secret() {
        let config = MediaConfig::new("estate", "key", "top-secret");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("top-secret"));
        assert!(rendered.contains("***"));
    }
}
