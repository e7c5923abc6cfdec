//! # Display Transport Layer
//!
//! Delivers encoded frames to the display over its HTTP interface.
//!
//! ## Available Transports
//!
//! - [`http`]: Multipart upload and connectivity check (reqwest)
//!
//! ## Wire Format
//!
//! | Request | Details |
//! |---------|---------|
//! | `POST {base}/upload` | multipart field `imageFile`, filename `file{slot}.jpg`, `image/jpeg` |
//! | `GET {base}` | connectivity check, healthy iff `200` |

pub mod http;

use std::fmt;

use crate::config::display::SLOT_COUNT;
use crate::error::SlotframeError;

pub use http::{DisplayClient, UploadReceipt};

/// One of the display's image slots, numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot(u8);

impl Slot {
    pub fn new(number: u8) -> Result<Self, SlotframeError> {
        if (1..=SLOT_COUNT).contains(&number) {
            Ok(Self(number))
        } else {
            Err(SlotframeError::InvalidSlot(number))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Name of the uploaded file as the firmware expects it.
    pub fn filename(self) -> String {
        format!("file{}.jpg", self.0)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for Slot {
    type Error = SlotframeError;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Slot::new(number)
    }
}
