//! Image I/O for the compositor

use crate::constants::RESAVE_JPEG_QUALITY;
use crate::layout::Size;
use crate::types::*;
use image::codecs::jpeg::{JpegEncoder, PixelDensity};
use image::{DynamicImage, ImageFormat, ImageReader, RgbImage};
use log::{debug, warn};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Load and decode a single image
pub async fn load_image(path: impl AsRef<Path>) -> Result<DynamicImage> {
    let path = path.as_ref().to_owned();
    tokio::task::spawn_blocking(move || decode(&path)).await?
}

/// Load and decode several images concurrently, preserving input order
pub async fn load_images(paths: &[impl AsRef<Path>]) -> Result<Vec<DynamicImage>> {
    let handles: Vec<_> = paths
        .iter()
        .map(|path| {
            let path = path.as_ref().to_owned();
            tokio::task::spawn_blocking(move || decode(&path))
        })
        .collect();

    let mut images = Vec::with_capacity(handles.len());
    for handle in handles {
        images.push(handle.await??);
    }
    Ok(images)
}

/// Read image dimensions from file headers without decoding pixels
pub async fn read_dimensions(paths: &[impl AsRef<Path>]) -> Result<Vec<Size>> {
    let paths: Vec<PathBuf> = paths.iter().map(|p| p.as_ref().to_owned()).collect();

    tokio::task::spawn_blocking(move || {
        paths
            .iter()
            .map(|path| {
                image::image_dimensions(path)
                    .map(|(width, height)| Size::new(width, height))
                    .map_err(|source| CollageError::Decode {
                        path: path.clone(),
                        source,
                    })
            })
            .collect()
    })
    .await?
}

fn decode(path: &Path) -> Result<DynamicImage> {
    let image = ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(|source| CollageError::Decode {
            path: path.to_owned(),
            source,
        })?;

    debug!(
        "Decoded {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(image)
}

/// How the finished canvas is written
#[derive(Debug, Clone, Copy)]
pub struct EncodeSettings {
    /// JPEG quality (1-100)
    pub quality: u8,
    /// Resolution stored in the file header
    pub dpi: u16,
    /// Read the file back and re-save if its dimensions are off
    pub verify: bool,
    /// Filter used if the re-save has to resize
    pub filter: ResampleFilter,
}

/// Encode the canvas by output extension and write it to `path`
pub async fn save_canvas(
    canvas: RgbImage,
    path: impl AsRef<Path>,
    settings: EncodeSettings,
) -> Result<()> {
    let path = path.as_ref().to_owned();
    let format = output_format(&path);
    let expected = (canvas.width(), canvas.height());

    let bytes = {
        let path = path.clone();
        tokio::task::spawn_blocking(move || {
            encode(&canvas, format, settings.quality, settings.dpi, &path)
        })
        .await??
    };
    tokio::fs::write(&path, bytes).await?;

    if settings.verify {
        if !verify_output(&path, format, expected, settings).await? {
            debug!("Verified {}", path.display());
        }
    }

    Ok(())
}

/// Check the written file and re-save it at `expected` if it differs.
///
/// Returns whether the file was re-saved.
pub(crate) async fn verify_output(
    path: &Path,
    format: ImageFormat,
    expected: (u32, u32),
    settings: EncodeSettings,
) -> Result<bool> {
    let target = path.to_owned();
    let path = path.to_owned();

    let resaved = tokio::task::spawn_blocking(move || -> Result<Option<Vec<u8>>> {
        let written = image::image_dimensions(&path).map_err(|source| CollageError::Decode {
            path: path.clone(),
            source,
        })?;
        if written == expected {
            return Ok(None);
        }

        warn!(
            "{} is {}x{}, expected {}x{}; re-saving",
            path.display(),
            written.0,
            written.1,
            expected.0,
            expected.1
        );

        let image = decode(&path)?
            .resize_exact(expected.0, expected.1, settings.filter.into())
            .to_rgb8();
        encode(&image, format, RESAVE_JPEG_QUALITY, settings.dpi, &path).map(Some)
    })
    .await??;

    match resaved {
        Some(bytes) => {
            tokio::fs::write(&target, bytes).await?;
            Ok(true)
        }
        None => Ok(false),
    }
}

fn encode(
    image: &RgbImage,
    format: ImageFormat,
    quality: u8,
    dpi: u16,
    path: &Path,
) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let encoded = match format {
        ImageFormat::Jpeg => {
            let mut encoder = JpegEncoder::new_with_quality(&mut buf, quality);
            encoder.set_pixel_density(PixelDensity::dpi(dpi));
            encoder.encode_image(image)
        }
        _ => image.write_to(&mut Cursor::new(&mut buf), format),
    };

    encoded.map_err(|source| CollageError::Encode {
        path: path.to_owned(),
        source,
    })?;
    Ok(buf)
}

/// Output format from the file extension, JPEG when unknown
pub fn output_format(path: &Path) -> ImageFormat {
    match ImageFormat::from_path(path) {
        Ok(format) if format.writing_enabled() => format,
        _ => {
            warn!(
                "Cannot infer a writable format for {}, writing JPEG",
                path.display()
            );
            ImageFormat::Jpeg
        }
    }
}
