//! Image references for listings.
//!
//! Uploading happens client-side; the API only records URLs and derives the
//! host's public id from each one.

use core_config::media::MediaConfig;
use tracing::debug;

use crate::models::Image;

/// Image host settings handed to the product service at construction.
#[derive(Debug, Clone, Default)]
pub struct MediaLibrary {
    config: MediaConfig,
}

impl MediaLibrary {
    pub fn new(config: MediaConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MediaConfig {
        &self.config
    }

    /// Whether `url` points into the configured cloud
    pub fn is_hosted(&self, url: &str) -> bool {
        match self.config.cloud_name.as_deref() {
            Some(cloud) => url.contains(&format!("res.cloudinary.com/{}/", cloud)),
            None => false,
        }
    }

    pub fn image_from_url(&self, url: &str) -> Image {
        if !self.is_hosted(url) {
            debug!(url, "Image is not served from the configured cloud");
        }
        Image::from_url(url)
    }
}
