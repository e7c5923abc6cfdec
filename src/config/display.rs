//! # Display Configuration
//!
//! Hardware characteristics of the slot display and how to reach it.
//!
//! | Property | Default |
//! |----------|---------|
//! | Canvas | 240 × 240 px |
//! | Encoding | JPEG, quality 70 |
//! | Slots | 1–5 |
//! | Base URL | `http://192.168.10.154` |
//! | Timeout | 10 s (connectivity check: 5 s) |

use serde::Deserialize;

/// Default device address on the local network
pub const DEFAULT_BASE_URL: &str = "http://192.168.10.154";

/// Number of addressable image slots on the device
pub const SLOT_COUNT: u8 = 5;

/// # Display Configuration
///
/// The canvas size is fixed by the device; it is configurable only so that
/// tests and previews can use other geometries.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Device base URL (no trailing slash needed)
    pub base_url: String,

    /// Upload request timeout in seconds
    pub timeout_secs: u64,

    /// Connectivity check timeout in seconds
    pub check_timeout_secs: u64,

    /// Canvas width in pixels
    pub width: u32,

    /// Canvas height in pixels
    pub height: u32,

    /// JPEG encoder quality (1-100)
    pub jpeg_quality: u8,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
            check_timeout_secs: 5,
            width: 240,
            height: 240,
            jpeg_quality: 70,
        }
    }
}

impl DisplayConfig {
    /// Same configuration pointed at another device.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Upload endpoint
    pub fn upload_url(&self) -> String {
        format!("{}/upload", self.base_url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_url_strips_trailing_slash() {
        let config = DisplayConfig::default().with_base_url("http://10.0.0.2/");
        assert_eq!(config.upload_url(), "http://10.0.0.2/upload");
    }

    #[test]
    fn test_defaults() {
        let config = DisplayConfig::default();
        assert_eq!((config.width, config.height), (240, 240));
        assert_eq!(config.jpeg_quality, 70);
        assert_eq!(config.upload_url(), "http://192.168.10.154/upload");
    }
}
