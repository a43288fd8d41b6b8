//! Layout calculation modules for collage composition
//!
//! This module handles all the geometric calculations for a collage page:
//! - Page geometry (paper size to pixels, content area inside margins)
//! - Aspect-preserving fitting
//! - Candidate arrangements and their utilization scores
//! - The global scale search for the emphasized 4-image layouts
//! - Image placement (centering, padding, quadrant anchors)

pub mod candidates;
pub mod fit;
pub mod geometry;
pub mod placement;
pub mod search;
mod types;

pub use candidates::{generate_candidates, two_over_three};
pub use fit::{ensure_non_degenerate, fit_within};
pub use geometry::{available_area, center_offset, frame, page_size};
pub use placement::{calculate_placements, validate_placements};
pub use search::{SearchOutcome, sample_scales, scaled_sizes, search_scale};
pub use types::*;
