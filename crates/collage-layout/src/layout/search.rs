//! Global scale search for the 4-image layouts
//!
//! Sweeps a uniform scale factor over a fixed set of samples, scaling the
//! emphasized image by an extra multiplier, and keeps the sample whose best
//! candidate wins under the configured objective. When no sample admits any
//! candidate the sweep is repeated with progressively smaller multipliers.

use log::{debug, info};

use crate::constants::FOUR_UP;
use crate::options::SearchOptions;
use crate::types::{CollageError, Result, SearchObjective};

use super::candidates::feasible_candidates;
use super::fit::ensure_non_degenerate;
use super::{LayoutCandidate, Size};

/// Winning sample of the scale search
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Global scale factor applied to every image
    pub scale: f64,
    /// Extra factor applied to the emphasized image
    pub multiplier: f64,
    /// Scaled size of every image, in input order
    pub sizes: Vec<Size>,
    /// Best candidate at this sample
    pub candidate: LayoutCandidate,
    /// Every feasible candidate at this sample, best first
    pub candidates: Vec<LayoutCandidate>,
}

/// Evenly spaced scale samples from `min` to `max`, both included.
///
/// A single step samples `min` only.
pub fn sample_scales(min: f64, max: f64, steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![min],
        _ => {
            let step = (max - min) / (steps - 1) as f64;
            (0..steps)
                .map(|i| if i == steps - 1 { max } else { min + i as f64 * step })
                .collect()
        }
    }
}

/// Scale every image by `scale`, and the emphasized one by `scale * multiplier`
pub fn scaled_sizes(natives: &[Size], emphasis: usize, scale: f64, multiplier: f64) -> Vec<Size> {
    natives
        .iter()
        .enumerate()
        .map(|(index, native)| {
            if index == emphasis {
                native.scaled(scale * multiplier)
            } else {
                native.scaled(scale)
            }
        })
        .collect()
}

/// Find the scale and arrangement for four images.
///
/// # Arguments
/// * `natives` - Native pixel size of each image
/// * `emphasis` - Index of the enlarged image
/// * `area` - Available content area
/// * `padding` - Gap between images and between bands
/// * `options` - Scale range, multipliers and objective
///
/// # Errors
/// `DegenerateImage` before any sampling when an image has zero area, and
/// `NoFeasibleLayout` once every multiplier has been tried.
pub fn search_scale(
    natives: &[Size],
    emphasis: usize,
    area: Size,
    padding: u32,
    options: &SearchOptions,
) -> Result<SearchOutcome> {
    if natives.len() != FOUR_UP {
        return Err(CollageError::InvalidInputCount(natives.len()));
    }
    if emphasis >= natives.len() {
        return Err(CollageError::InvalidIndex {
            index: emphasis,
            count: natives.len(),
        });
    }
    ensure_non_degenerate(natives)?;

    let scales = sample_scales(options.min_scale, options.max_scale, options.steps);

    // Fallbacks only ever shrink the emphasized image
    let multipliers = std::iter::once(options.multiplier).chain(
        options
            .fallback_multipliers
            .iter()
            .copied()
            .filter(|m| *m < options.multiplier),
    );

    for multiplier in multipliers {
        let found = sweep(natives, emphasis, area, padding, &scales, multiplier, options.objective);

        if let Some(outcome) = found {
            if multiplier != options.multiplier {
                info!(
                    "No layout fits with multiplier {}, fell back to {}",
                    options.multiplier, multiplier
                );
            }
            info!(
                "Scale {:.3} x{} selects '{}' (score {})",
                outcome.scale, outcome.multiplier, outcome.candidate.kind, outcome.candidate.score
            );
            return Ok(outcome);
        }

        debug!("No sample admits a layout with multiplier {multiplier}");
    }

    Err(CollageError::NoFeasibleLayout)
}

/// One full pass over the scale samples at a fixed multiplier.
///
/// Only a strictly better key replaces the current best, so ties keep the
/// earliest (smallest) scale.
fn sweep(
    natives: &[Size],
    emphasis: usize,
    area: Size,
    padding: u32,
    scales: &[f64],
    multiplier: f64,
    objective: SearchObjective,
) -> Option<SearchOutcome> {
    let mut best: Option<SearchOutcome> = None;

    for &scale in scales {
        let sizes = scaled_sizes(natives, emphasis, scale, multiplier);
        if sizes.iter().any(Size::is_empty) {
            continue;
        }

        let candidates = feasible_candidates(&sizes, emphasis, area, padding);
        let Some(top) = candidates.first().cloned() else {
            debug!("scale {scale:.3}: nothing fits");
            continue;
        };

        debug!(
            "scale {scale:.3}: {} candidate(s), best '{}' score {}",
            candidates.len(),
            top.kind,
            top.score
        );

        let improves = best
            .as_ref()
            .is_none_or(|b| objective.key(top.score) > objective.key(b.candidate.score));

        if improves {
            best = Some(SearchOutcome {
                scale,
                multiplier,
                sizes,
                candidate: top,
                candidates,
            });
        }
    }

    best
}

// =============================================================================
// Tests
// =============================================================================
