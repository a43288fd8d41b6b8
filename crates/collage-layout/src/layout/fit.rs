//! Aspect-preserving fitting

use crate::types::{CollageError, Result};

use super::Size;

/// Largest size with the aspect ratio of `native` that fits inside `bounds`.
///
/// The binding side takes the full bound and the other side is derived
/// from the ratio, truncated to whole pixels. The result never exceeds
/// `bounds` in either dimension.
///
/// # Errors
/// `DegenerateImage` when `native` has zero area. The error reports index 0;
/// callers that know the image's position should re-tag it.
pub fn fit_within(native: Size, bounds: Size) -> Result<Size> {
    if native.is_empty() {
        return Err(CollageError::DegenerateImage {
            index: 0,
            width: native.width,
            height: native.height,
        });
    }

    let ratio = native.aspect_ratio();
    let bounds_ratio = bounds.width as f64 / bounds.height as f64;

    let fitted = if ratio > bounds_ratio {
        // Width is the binding constraint
        Size::new(bounds.width, (bounds.width as f64 / ratio) as u32)
    } else {
        // Height is the binding constraint
        Size::new((bounds.height as f64 * ratio) as u32, bounds.height)
    };

    Ok(Size::new(
        fitted.width.min(bounds.width),
        fitted.height.min(bounds.height),
    ))
}

/// Reject zero-area images, reporting the first offender's position.
pub fn ensure_non_degenerate(sizes: &[Size]) -> Result<()> {
    match sizes.iter().position(Size::is_empty) {
        Some(index) => Err(CollageError::DegenerateImage {
            index,
            width: sizes[index].width,
            height: sizes[index].height,
        }),
        None => Ok(()),
    }
}
