//! Deployment configuration for the ingestion pipeline

use chrono_tz::Tz;
use serde::Deserialize;
use std::path::PathBuf;

/// Settings the pipeline needs from the deployment.
///
/// Loadable from a config file via serde; the timezone fields and image
/// limits default sensibly so a minimal config only names the monitored
/// inbox and the storage layout.
#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    /// The monitored inbox address used for direction classification.
    pub inbox_address: String,

    /// Root directory that extracted attachments are written under.
    pub media_root: PathBuf,

    /// URL prefix joined onto relative attachment paths (should end in `/`).
    pub media_url: String,

    /// Timezone that naive container timestamps are assumed to be in.
    #[serde(default = "default_timezone")]
    pub local_timezone: Tz,

    /// Timezone used for the human-readable date string.
    #[serde(default = "default_timezone")]
    pub display_timezone: Tz,

    /// Bounds applied to extracted image attachments.
    #[serde(default)]
    pub image: ImageLimits,
}

impl ParserConfig {
    /// Build a config with default timezones and image limits.
    pub fn new(
        inbox_address: impl Into<String>,
        media_root: impl Into<PathBuf>,
        media_url: impl Into<String>,
    ) -> Self {
        Self {
            inbox_address: inbox_address.into(),
            media_root: media_root.into(),
            media_url: media_url.into(),
            local_timezone: default_timezone(),
            display_timezone: default_timezone(),
            image: ImageLimits::default(),
        }
    }
}

/// Size and dimension bounds for image resizing
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ImageLimits {
    /// Images at or under this many megabytes are stored untouched.
    pub max_size_mb: u64,

    /// Neither output dimension may exceed this many pixels.
    pub max_dimension: u32,

    /// JPEG quality used when re-encoding (1-100).
    pub quality: u8,
}

impl ImageLimits {
    /// The byte threshold above which an image is resized.
    #[must_use]
    pub const fn max_size_bytes(&self) -> u64 {
        self.max_size_mb * 1024 * 1024
    }
}

impl Default for ImageLimits {
    fn default() -> Self {
        Self {
            max_size_mb: 2,
            max_dimension: 2048,
            quality: 85,
        }
    }
}

const fn default_timezone() -> Tz {
    Tz::Europe__London
}
