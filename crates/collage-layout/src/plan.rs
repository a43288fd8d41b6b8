//! Layout planning
//!
//! Joins page geometry, the scale search, candidate selection and placement
//! into a single pure step from native image sizes to a [`LayoutPlan`].

use log::{info, warn};

use crate::constants::FOUR_UP;
use crate::layout::{self, Frame, Gaps, LayoutPlan, Size};
use crate::options::CollageOptions;
use crate::select::LayoutSelector;
use crate::types::{CollageError, Result};

/// Plan a collage from the native size of each input image.
///
/// No pixels are touched; the plan says where every image goes and how
/// large it is drawn.
///
/// # Errors
/// Configuration and index problems are reported before any search runs,
/// followed by `DegenerateImage` for zero-area inputs.
pub fn plan_layout(
    dims: &[Size],
    options: &CollageOptions,
    selector: &dyn LayoutSelector,
) -> Result<LayoutPlan> {
    options.validate_for(dims.len())?;
    layout::ensure_non_degenerate(dims)?;

    let page = options.page();
    let frame = layout::frame(page, options.margin_px())?;
    let gaps = options.gaps();

    info!(
        "Page {}x{} px, content area {}x{} px",
        page.width_px, page.height_px, frame.area.width, frame.area.height
    );

    if dims.len() == FOUR_UP {
        plan_four(dims, options, selector, frame, gaps)
    } else {
        plan_five(dims, options, frame, gaps)
    }
}

fn plan_four(
    dims: &[Size],
    options: &CollageOptions,
    selector: &dyn LayoutSelector,
    frame: Frame,
    gaps: Gaps,
) -> Result<LayoutPlan> {
    let emphasis = options.emphasis();
    let outcome = layout::search_scale(dims, emphasis, frame.area, gaps.image, &options.search)?;

    let choice = selector.select(&outcome.candidates)?;
    let candidate = outcome
        .candidates
        .get(choice)
        .cloned()
        .ok_or(CollageError::InvalidSelection {
            index: choice,
            available: outcome.candidates.len(),
        })?;

    if choice != 0 {
        info!("Using '{}' instead of '{}'", candidate.kind, outcome.candidate.kind);
    }

    let placements = layout::calculate_placements(&candidate, &outcome.sizes, &frame, &gaps)?;

    Ok(LayoutPlan {
        frame,
        candidate,
        candidates: outcome.candidates,
        scale: Some(outcome.scale),
        multiplier: Some(outcome.multiplier),
        sizes: outcome.sizes,
        placements,
    })
}

fn plan_five(dims: &[Size], options: &CollageOptions, frame: Frame, gaps: Gaps) -> Result<LayoutPlan> {
    if let Some(index) = options.emphasis_index {
        warn!("Emphasis index {index} has no effect on the 2-over-3 grid");
    }

    let (candidate, sizes) = layout::two_over_three(dims, frame.area, &gaps)?;
    let placements = layout::calculate_placements(&candidate, &sizes, &frame, &gaps)?;

    info!("Using '{}'", candidate.kind);

    Ok(LayoutPlan {
        frame,
        candidates: vec![candidate.clone()],
        candidate,
        scale: None,
        multiplier: None,
        sizes,
        placements,
    })
}
