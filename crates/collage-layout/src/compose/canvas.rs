//! Canvas rendering

use crate::constants::BACKGROUND_RGB;
use crate::layout::LayoutPlan;
use crate::types::*;
use image::{DynamicImage, Rgb, RgbImage, imageops};
use log::{debug, warn};

/// Paint every planned image onto a fresh white page.
///
/// Images are resampled to their planned size and pasted in placement
/// order. `sources` must be in input order.
pub fn render_canvas(
    sources: &[DynamicImage],
    plan: &LayoutPlan,
    filter: ResampleFilter,
) -> Result<RgbImage> {
    if sources.len() != plan.placements.len() {
        return Err(CollageError::InvalidInputCount(sources.len()));
    }

    let page = plan.page();
    let mut canvas = RgbImage::from_pixel(page.width_px, page.height_px, Rgb(BACKGROUND_RGB));

    for placement in &plan.placements {
        let source = sources
            .get(placement.index)
            .ok_or(CollageError::InvalidIndex {
                index: placement.index,
                count: sources.len(),
            })?;

        if placement.size.is_empty() {
            warn!("Skipping image {}: scaled to zero area", placement.index);
            continue;
        }

        let resized = source
            .resize_exact(placement.size.width, placement.size.height, filter.into())
            .to_rgb8();
        debug!(
            "Pasting image {} ({}x{}) at ({}, {})",
            placement.index,
            resized.width(),
            resized.height(),
            placement.x,
            placement.y
        );
        imageops::replace(&mut canvas, &resized, placement.x as i64, placement.y as i64);
    }

    Ok(canvas)
}
