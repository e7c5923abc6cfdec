//! # Slotframe - Text Frames for a Slot Display
//!
//! Slotframe renders short, lightly formatted text into 240×240 JPEG frames
//! and uploads them to one of the five image slots of a small Wi-Fi display.
//! It provides:
//!
//! - **Markup**: `<b>`, `<i>`, `<u>` inline styles
//! - **Layout**: Greedy word wrap, auto font sizing, four alignments
//! - **Rendering**: Solid or gradient backgrounds, outlined text
//! - **Transport**: Multipart HTTP upload and connectivity check
//!
//! ## Quick Start
//!
//! ```no_run
//! use slotframe::{
//!     config::Config,
//!     fonts::FontSet,
//!     render::{self, TextFrame, encode},
//!     transport::{DisplayClient, Slot},
//! };
//!
//! # async fn demo() -> Result<(), slotframe::SlotframeError> {
//! let config = Config::default();
//! let fonts = FontSet::discover(None)?;
//!
//! let frame = render::generate(&TextFrame::new("<b>Hello</b> world"), &config, &fonts)?;
//! let jpeg = encode::to_jpeg(&frame.image, config.display.jpeg_quality)?;
//!
//! let client = DisplayClient::new(config.display.clone())?;
//! client.upload(Slot::new(1)?, jpeg).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`markup`] | Tag parsing into styled runs |
//! | [`layout`] | Word wrap, font sizing, line placement |
//! | [`fonts`] | TrueType and built-in bitmap faces |
//! | [`render`] | Colours, canvas drawing, JPEG encoding |
//! | [`transport`] | HTTP upload to the display |
//! | [`config`] | Device and layout settings |
//! | [`error`] | Error types |

pub mod config;
pub mod error;
pub mod fonts;
pub mod layout;
pub mod markup;
pub mod render;
pub mod transport;

// Re-exports for convenience
pub use config::Config;
pub use error::SlotframeError;
pub use fonts::FontSet;
pub use render::{Frame, TextFrame};
pub use transport::{DisplayClient, Slot};
