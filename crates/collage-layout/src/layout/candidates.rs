//! Layout candidate generation
//!
//! Enumerates the structurally distinct arrangements for a set of scaled
//! images and scores each one by how much of the content area it leaves
//! unused:
//! - 4 images: large-top, large-left and the classic 2x2 grid
//! - 5 images: the fixed 2-over-3 grid

use crate::constants::{FIVE_UP, FOUR_UP};
use crate::types::{CollageError, Result};

use super::fit::{ensure_non_degenerate, fit_within};
use super::{Gaps, LayoutCandidate, LayoutKind, Size};

// =============================================================================
// Four Images
// =============================================================================

/// Generate every feasible 4-image arrangement, best first.
///
/// # Arguments
/// * `sizes` - Scaled size of each image, in input order
/// * `emphasis` - Index of the enlarged image
/// * `area` - Available content area
/// * `padding` - Gap between images and between bands
///
/// # Errors
/// `NoFeasibleLayout` when nothing fits, so the caller can retry smaller.
pub fn generate_candidates(
    sizes: &[Size],
    emphasis: usize,
    area: Size,
    padding: u32,
) -> Result<Vec<LayoutCandidate>> {
    if sizes.len() != FOUR_UP {
        return Err(CollageError::InvalidInputCount(sizes.len()));
    }
    if emphasis >= sizes.len() {
        return Err(CollageError::InvalidIndex {
            index: emphasis,
            count: sizes.len(),
        });
    }

    let candidates = feasible_candidates(sizes, emphasis, area, padding);
    if candidates.is_empty() {
        return Err(CollageError::NoFeasibleLayout);
    }
    Ok(candidates)
}

/// Feasible 4-image arrangements sorted by descending score.
///
/// Ties keep declaration order (large-top, large-left, classic grid).
/// Callers guarantee `emphasis < sizes.len()`.
pub(crate) fn feasible_candidates(
    sizes: &[Size],
    emphasis: usize,
    area: Size,
    padding: u32,
) -> Vec<LayoutCandidate> {
    let large = sizes[emphasis];
    let smalls: Vec<Size> = others(sizes, emphasis).map(|(_, size)| size).collect();

    let mut candidates = Vec::with_capacity(3);

    let large_top = large_top_box(large, &smalls, padding);
    if large_top.fits_within(area) {
        candidates.push(scored(LayoutKind::LargeTop, Some(emphasis), large_top, area));
    }

    let large_left = large_left_box(large, &smalls, padding);
    if large_left.fits_within(area) {
        candidates.push(scored(LayoutKind::LargeLeft, Some(emphasis), large_left, area));
    }

    let cell = grid_cell(area, padding);
    if sizes.iter().all(|size| size.fits_within(cell)) {
        // The grid claims the whole content area
        candidates.push(LayoutCandidate {
            kind: LayoutKind::ClassicGrid,
            emphasis: Some(emphasis),
            bounding_box: area,
            score: 0,
        });
    }

    // Stable sort keeps declaration order among equal scores
    candidates.sort_by(|a, b| b.score.cmp(&a.score));
    candidates
}

/// Every image except the emphasized one, with its input index
pub(crate) fn others(sizes: &[Size], emphasis: usize) -> impl Iterator<Item = (usize, Size)> + '_ {
    sizes
        .iter()
        .copied()
        .enumerate()
        .filter(move |(index, _)| *index != emphasis)
}

/// Space taken by the gaps between `count` images
pub(crate) fn gap_total(count: usize, gap: u32) -> u32 {
    let gaps = u32::try_from(count.saturating_sub(1)).unwrap_or(u32::MAX);
    gap.saturating_mul(gaps)
}

/// Emphasized image above a single row of the others.
///
/// Sums saturate at `u32::MAX`, which no content area can hold, so
/// oversized images are infeasible rather than wrapping around.
fn large_top_box(large: Size, smalls: &[Size], padding: u32) -> Size {
    let row_width = row_extent(smalls, padding);
    let row_height = smalls.iter().map(|s| s.height).max().unwrap_or(0);

    Size::new(
        large.width.max(row_width),
        large.height.saturating_add(row_height).saturating_add(padding),
    )
}

/// Large-top with the roles of width and height swapped
fn large_left_box(large: Size, smalls: &[Size], padding: u32) -> Size {
    let transposed: Vec<Size> = smalls.iter().map(Size::transposed).collect();
    large_top_box(large.transposed(), &transposed, padding).transposed()
}

/// One cell of the 2x2 grid
pub(crate) fn grid_cell(area: Size, padding: u32) -> Size {
    Size::new(
        area.width.saturating_sub(padding) / 2,
        area.height.saturating_sub(padding) / 2,
    )
}

fn scored(kind: LayoutKind, emphasis: Option<usize>, bounding_box: Size, area: Size) -> LayoutCandidate {
    LayoutCandidate {
        kind,
        emphasis,
        bounding_box,
        score: area.area() as i64 - bounding_box.area() as i64,
    }
}

// =============================================================================
// Five Images
// =============================================================================

/// Size the five images for the 2-over-3 grid.
///
/// Both rows get height `(avail_h - row_gap) / 2`. Every image is fitted into
/// the same cell, whose width is the narrower of a top-row slot and a
/// bottom-row slot, so both rows fit side by side.
///
/// Returns the single candidate and the fitted size of each image.
pub fn two_over_three(
    natives: &[Size],
    area: Size,
    gaps: &Gaps,
) -> Result<(LayoutCandidate, Vec<Size>)> {
    if natives.len() != FIVE_UP {
        return Err(CollageError::InvalidInputCount(natives.len()));
    }
    ensure_non_degenerate(natives)?;

    let cell = two_over_three_cell(area, gaps);
    let sizes = natives
        .iter()
        .map(|native| fit_within(*native, cell))
        .collect::<Result<Vec<_>>>()?;

    if sizes.iter().any(Size::is_empty) {
        return Err(CollageError::NoFeasibleLayout);
    }

    let top = row_extent(&sizes[..2], gaps.image);
    let bottom = row_extent(&sizes[2..], gaps.bottom_image);
    let bounding_box = Size::new(
        top.max(bottom),
        cell.height.saturating_mul(2).saturating_add(gaps.row),
    );

    if !bounding_box.fits_within(area) {
        return Err(CollageError::NoFeasibleLayout);
    }

    Ok((
        scored(LayoutKind::TwoOverThree, None, bounding_box, area),
        sizes,
    ))
}

/// Cell every image of the 2-over-3 grid is fitted into
pub(crate) fn two_over_three_cell(area: Size, gaps: &Gaps) -> Size {
    let row_height = area.height.saturating_sub(gaps.row) / 2;
    let top_width = area.width.saturating_sub(gaps.image) / 2;
    let bottom_width = area.width.saturating_sub(gaps.bottom_image.saturating_mul(2)) / 3;

    Size::new(top_width.min(bottom_width), row_height)
}

/// Width of a row of images separated by `gap`, saturating at `u32::MAX`
pub(crate) fn row_extent(sizes: &[Size], gap: u32) -> u32 {
    sizes
        .iter()
        .fold(gap_total(sizes.len(), gap), |width, s| width.saturating_add(s.width))
}

// =============================================================================
// Tests
// =============================================================================
