//! Page geometry
//!
//! Converts physical paper sizes into pixel pages and derives the
//! content area left inside the margins. Every function takes its inputs
//! explicitly; nothing here reads shared state.

use crate::constants::mm_to_px;
use crate::types::{CollageError, Orientation, Result};

use super::{Frame, PageSpec, Size};

// =============================================================================
// Page Size
// =============================================================================

/// Convert a paper size in millimetres to a pixel page.
///
/// `paper_mm` is given in its natural (portrait) order; landscape swaps the
/// pair before conversion. Each side is `round(mm * dpi / 25.4)`.
///
/// # Arguments
/// * `paper_mm` - (width, height) of the paper in millimetres
/// * `dpi` - Print resolution; callers guarantee it is non-zero
/// * `orientation` - Portrait keeps the pair, landscape swaps it
pub fn page_size(paper_mm: (f32, f32), dpi: u32, orientation: Orientation) -> PageSpec {
    let (width_mm, height_mm) = match orientation {
        Orientation::Portrait => paper_mm,
        Orientation::Landscape => (paper_mm.1, paper_mm.0),
    };

    PageSpec {
        width_px: mm_to_px(width_mm, dpi),
        height_px: mm_to_px(height_mm, dpi),
    }
}

// =============================================================================
// Content Area
// =============================================================================

/// Space left for images once `margin` is removed from every side.
///
/// Fails with `InvalidConfiguration` when the margins consume the page.
pub fn available_area(page: PageSpec, margin: u32) -> Result<Size> {
    let both = margin as u64 * 2;
    let width = page.width_px as u64;
    let height = page.height_px as u64;

    if both >= width || both >= height {
        return Err(CollageError::InvalidConfiguration(format!(
            "margin of {margin}px leaves no room on a {}x{} page",
            page.width_px, page.height_px
        )));
    }

    Ok(Size::new((width - both) as u32, (height - both) as u32))
}

/// Build the content frame for a page and margin.
pub fn frame(page: PageSpec, margin: u32) -> Result<Frame> {
    let area = available_area(page, margin)?;
    Ok(Frame { page, margin, area })
}

/// Offset that centers `extent` inside `available`.
///
/// Extents larger than the available span are pinned to the start.
pub fn center_offset(available: u32, extent: u32) -> u32 {
    available.saturating_sub(extent) / 2
}

// =============================================================================
// Tests
// =============================================================================
