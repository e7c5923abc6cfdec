//! # Encoding
//!
//! Converts rendered canvases and existing image files into the JPEG bytes
//! the display accepts, and keeps optional local copies.
//!
//! Files are normalised the way the device expects them:
//!
//! 1. Decode (any format the `image` crate reads; HEIC/HEIF with the `heif` feature)
//! 2. Apply the EXIF orientation
//! 3. Centre-crop to the canvas aspect ratio
//! 4. Lanczos resize to the canvas size
//!
//! Steps 3 and 4 are skipped when the image already has the canvas size.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageDecoder, ImageReader, RgbImage};
use log::debug;

use crate::error::SlotframeError;
use crate::transport::Slot;

/// Encode an RGB canvas as baseline JPEG.
pub fn to_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>, SlotframeError> {
    let mut buf = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    image
        .write_with_encoder(encoder)
        .map_err(|e| SlotframeError::Image(format!("JPEG encoding failed: {}", e)))?;
    Ok(buf)
}

/// Read an image file and fit it to a `width` × `height` canvas.
pub fn prepare_file(path: &Path, width: u32, height: u32) -> Result<RgbImage, SlotframeError> {
    let data = std::fs::read(path)?;
    let image = decode(&data, path)?;
    debug!(
        "Decoded {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(fit_to_canvas(image, width, height))
}

/// Centre-crop to the target aspect ratio, then resize.
pub fn fit_to_canvas(image: DynamicImage, width: u32, height: u32) -> RgbImage {
    let rgb = image.into_rgb8();
    if rgb.dimensions() == (width, height) {
        return rgb;
    }

    let (w, h) = rgb.dimensions();
    let crop_w = w.min((h as u64 * width as u64 / height as u64) as u32).max(1);
    let crop_h = h.min((w as u64 * height as u64 / width as u64) as u32).max(1);
    let x = (w - crop_w) / 2;
    let y = (h - crop_h) / 2;

    let cropped = image::imageops::crop_imm(&rgb, x, y, crop_w, crop_h).to_image();
    image::imageops::resize(&cropped, width, height, FilterType::Lanczos3)
}

fn decode(data: &[u8], path: &Path) -> Result<DynamicImage, SlotframeError> {
    if is_heic(data) || has_heif_extension(path) {
        return decode_heic(data);
    }

    let failed = |e: &dyn std::fmt::Display| {
        SlotframeError::Image(format!("Failed to decode {}: {}", path.display(), e))
    };
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| failed(&e))?;
    let mut decoder = reader.into_decoder().map_err(|e| failed(&e))?;
    let orientation = decoder.orientation().map_err(|e| failed(&e))?;
    let mut image = DynamicImage::from_decoder(decoder).map_err(|e| failed(&e))?;
    image.apply_orientation(orientation);
    Ok(image)
}

fn has_heif_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("heic") || e.eq_ignore_ascii_case("heif"))
}

/// Check the ISO-BMFF `ftyp` box for a HEIF brand.
fn is_heic(data: &[u8]) -> bool {
    if data.len() < 12 || &data[4..8] != b"ftyp" {
        return false;
    }
    matches!(
        &data[8..12],
        b"heic" | b"heix" | b"hevc" | b"hevx" | b"heim" | b"heis" | b"hevm" | b"hevs" | b"mif1" | b"msf1"
    )
}

#[cfg(feature = "heif")]
fn decode_heic(data: &[u8]) -> Result<DynamicImage, SlotframeError> {
    use libheif_rs::{ColorSpace, HeifContext, LibHeif, RgbChroma};

    let failed = |what: &str, e: &dyn std::fmt::Display| {
        SlotframeError::Image(format!("{}: {}", what, e))
    };
    let lib_heif = LibHeif::new();
    let ctx = HeifContext::read_from_bytes(data).map_err(|e| failed("Failed to read HEIC", &e))?;
    let handle = ctx
        .primary_image_handle()
        .map_err(|e| failed("Failed to get primary image", &e))?;
    let image = lib_heif
        .decode(&handle, ColorSpace::Rgb(RgbChroma::Rgb), None)
        .map_err(|e| failed("Failed to decode HEIC image", &e))?;

    let planes = image.planes();
    let interleaved = planes
        .interleaved
        .ok_or_else(|| SlotframeError::Image("No interleaved RGB data in HEIC".to_string()))?;

    let (width, height) = (image.width(), image.height());
    let stride = interleaved.stride;
    let data = interleaved.data;

    let rgb = RgbImage::from_fn(width, height, |x, y| {
        let offset = y as usize * stride + x as usize * 3;
        match data.get(offset..offset + 3) {
            Some(px) => image::Rgb([px[0], px[1], px[2]]),
            None => image::Rgb([0, 0, 0]),
        }
    });
    Ok(DynamicImage::ImageRgb8(rgb))
}

#[cfg(not(feature = "heif"))]
fn decode_heic(_data: &[u8]) -> Result<DynamicImage, SlotframeError> {
    Err(SlotframeError::Image(
        "HEIC/HEIF support is not enabled (build with --features heif)".to_string(),
    ))
}

/// `img_slot{N}_{YYYYmmdd_HHMMSS}.jpg`
pub fn local_filename(slot: Slot, timestamp: NaiveDateTime) -> String {
    format!("img_slot{}_{}.jpg", slot, timestamp.format("%Y%m%d_%H%M%S"))
}

/// Write JPEG bytes into `dir` (created if missing) and return the path.
pub fn save_locally(jpeg: &[u8], dir: &Path, slot: Slot) -> Result<PathBuf, SlotframeError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(local_filename(slot, chrono::Local::now().naive_local()));
    std::fs::write(&path, jpeg)?;
    Ok(path)
}
