//! Collage composition - turning input images into a print-ready page
//!
//! This module orchestrates a full run:
//! 1. Validate options and input paths
//! 2. Decode the inputs concurrently
//! 3. Plan the layout (scale search, selection, placement)
//! 4. Render the canvas and encode it to disk

mod canvas;
mod io;

pub use canvas::render_canvas;
pub use io::{EncodeSettings, load_image, load_images, output_format, read_dimensions, save_canvas};

use crate::layout::{LayoutKind, LayoutPlan, PageSpec, Size};
use crate::options::CollageOptions;
use crate::plan::plan_layout;
use crate::select::LayoutSelector;
use crate::types::*;
use log::info;
use std::path::PathBuf;

/// Summary of a finished run
#[derive(Debug, Clone, PartialEq)]
pub struct CollageReport {
    /// File the collage was written to
    pub output: PathBuf,
    /// Pixel size of the written page
    pub page: PageSpec,
    /// Arrangement that was rendered
    pub layout: LayoutKind,
    /// Global scale factor (4-image layouts only)
    pub scale: Option<f64>,
    /// Emphasis multiplier actually used (4-image layouts only)
    pub multiplier: Option<f64>,
}

/// Main composition function
pub async fn compose(
    options: &CollageOptions,
    selector: &dyn LayoutSelector,
) -> Result<CollageReport> {
    options.validate()?;
    check_paths(&options.input_files).await?;

    let sources = load_images(&options.input_files).await?;
    let dims: Vec<Size> = sources
        .iter()
        .map(|image| Size::new(image.width(), image.height()))
        .collect();

    let plan = plan_layout(&dims, options, selector)?;
    let report = CollageReport {
        output: options.output_file.clone(),
        page: plan.page(),
        layout: plan.candidate.kind,
        scale: plan.scale,
        multiplier: plan.multiplier,
    };

    let filter = options.filter;
    let canvas =
        tokio::task::spawn_blocking(move || render_canvas(&sources, &plan, filter)).await??;

    let settings = EncodeSettings {
        quality: options.quality,
        // Validation caps DPI at u16::MAX
        dpi: u16::try_from(options.dpi).unwrap_or(u16::MAX),
        verify: options.verify_output,
        filter: options.filter,
    };
    save_canvas(canvas, &options.output_file, settings).await?;

    info!(
        "Saved {} ({}x{} px)",
        report.output.display(),
        report.page.width_px,
        report.page.height_px
    );
    Ok(report)
}

/// Plan a collage from image headers only, without decoding pixels
pub async fn plan_files(
    options: &CollageOptions,
    selector: &dyn LayoutSelector,
) -> Result<LayoutPlan> {
    options.validate()?;
    check_paths(&options.input_files).await?;

    let dims = read_dimensions(&options.input_files).await?;
    plan_layout(&dims, options, selector)
}

async fn check_paths(paths: &[PathBuf]) -> Result<()> {
    for path in paths {
        let is_file = tokio::fs::metadata(path)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false);
        if !is_file {
            return Err(CollageError::InvalidPath(path.clone()));
        }
    }
    Ok(())
}
