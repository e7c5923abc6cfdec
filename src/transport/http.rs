//! # HTTP Transport
//!
//! Talks to the display firmware's web server.
//!
//! ## Example
//!
//! ```no_run
//! use slotframe::config::DisplayConfig;
//! use slotframe::transport::{DisplayClient, Slot};
//!
//! # async fn demo(jpeg: Vec<u8>) -> Result<(), slotframe::error::SlotframeError> {
//! let client = DisplayClient::new(DisplayConfig::default())?;
//! if client.check_connection().await {
//!     client.upload(Slot::new(1)?, jpeg).await?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! An upload succeeds only on HTTP `200`. Any other status becomes
//! [`SlotframeError::Upload`]; connection failures and timeouts become
//! [`SlotframeError::Transport`].

use std::time::Duration;

use log::{debug, info};
use reqwest::multipart::{Form, Part};

use crate::config::DisplayConfig;
use crate::error::SlotframeError;
use crate::transport::Slot;

/// Acknowledgement of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    pub slot: Slot,
    pub filename: String,
    pub status: u16,
    /// Response body as sent by the device
    pub message: String,
}

/// HTTP client bound to one display.
#[derive(Debug, Clone)]
pub struct DisplayClient {
    http: reqwest::Client,
    config: DisplayConfig,
}

impl DisplayClient {
    pub fn new(config: DisplayConfig) -> Result<Self, SlotframeError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("slotframe/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .no_proxy()
            .build()
            .map_err(|e| SlotframeError::Transport(format!("HTTP client error: {}", e)))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Upload JPEG bytes into `slot`.
    pub async fn upload(&self, slot: Slot, jpeg: Vec<u8>) -> Result<UploadReceipt, SlotframeError> {
        let filename = slot.filename();
        let size = jpeg.len();
        let part = Part::bytes(jpeg)
            .file_name(filename.clone())
            .mime_str("image/jpeg")
            .map_err(|e| SlotframeError::Transport(format!("Invalid part: {}", e)))?;
        let form = Form::new().part("imageFile", part);

        let url = self.config.upload_url();
        info!("Uploading {} ({} bytes) to {}", filename, size, url);

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.transport_error(&url, e))?;

        let status = response.status().as_u16();
        let message = match response.text().await {
            Ok(body) => body,
            Err(e) if status == 200 => return Err(self.transport_error(&url, e)),
            Err(e) => {
                debug!("Unreadable {} response body from {}: {}", status, url, e);
                String::new()
            }
        };
        debug!("Device answered {}: {}", status, message);

        if status != 200 {
            return Err(SlotframeError::Upload { status, message });
        }
        Ok(UploadReceipt {
            slot,
            filename,
            status,
            message,
        })
    }

    /// Upload several frames in order, one result per slot.
    pub async fn upload_batch(
        &self,
        frames: Vec<(Slot, Vec<u8>)>,
    ) -> Vec<(Slot, Result<UploadReceipt, SlotframeError>)> {
        let mut results = Vec::with_capacity(frames.len());
        for (slot, jpeg) in frames {
            let result = self.upload(slot, jpeg).await;
            results.push((slot, result));
        }
        results
    }

    /// True if the device answers `GET {base}` with `200`.
    pub async fn check_connection(&self) -> bool {
        let timeout = Duration::from_secs(self.config.check_timeout_secs);
        match self.http.get(&self.config.base_url).timeout(timeout).send().await {
            Ok(response) => response.status().as_u16() == 200,
            Err(e) => {
                debug!("Connectivity check failed: {}", e);
                false
            }
        }
    }

    fn transport_error(&self, url: &str, e: reqwest::Error) -> SlotframeError {
        if e.is_timeout() {
            SlotframeError::Transport(format!(
                "{} timed out after {}s",
                url, self.config.timeout_secs
            ))
        } else {
            SlotframeError::Transport(format!("{}: {}", url, e))
        }
    }
}
