use crate::constants::*;
use crate::layout::{Gaps, PageSpec, geometry};
use crate::types::*;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters of the global scale sweep
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchOptions {
    /// Smallest scale factor sampled
    pub min_scale: f64,
    /// Largest scale factor sampled
    pub max_scale: f64,
    /// Number of evenly spaced samples, both ends included
    pub steps: usize,
    /// Extra scale applied to the emphasized image
    pub multiplier: f64,
    /// Smaller multipliers retried in order when nothing fits
    pub fallback_multipliers: Vec<f64>,
    /// Which sample wins
    pub objective: SearchObjective,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            steps: DEFAULT_SCALE_STEPS,
            multiplier: DEFAULT_EMPHASIS_MULTIPLIER,
            fallback_multipliers: FALLBACK_MULTIPLIERS.to_vec(),
            objective: SearchObjective::default(),
        }
    }
}

impl SearchOptions {
    fn validate(&self) -> Result<()> {
        if !(self.min_scale.is_finite() && self.min_scale > 0.0) {
            return Err(CollageError::InvalidConfiguration(format!(
                "minimum scale must be positive, got {}",
                self.min_scale
            )));
        }
        if !self.max_scale.is_finite() || self.max_scale < self.min_scale {
            return Err(CollageError::InvalidConfiguration(format!(
                "scale range {}..{} is empty",
                self.min_scale, self.max_scale
            )));
        }
        if self.steps == 0 {
            return Err(CollageError::InvalidConfiguration(
                "scale search needs at least one step".to_string(),
            ));
        }

        let multipliers = std::iter::once(&self.multiplier).chain(&self.fallback_multipliers);
        if let Some(bad) = multipliers.copied().find(|m| !(m.is_finite() && *m > 0.0)) {
            return Err(CollageError::InvalidConfiguration(format!(
                "emphasis multipliers must be positive, got {bad}"
            )));
        }

        Ok(())
    }
}

/// Comprehensive collage configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CollageOptions {
    // Input
    pub input_files: Vec<PathBuf>,
    /// Image drawn larger in the 4-image layouts (`None` means the first)
    pub emphasis_index: Option<usize>,

    // Output
    pub output_file: PathBuf,
    pub paper_size: PaperSize,
    pub orientation: Orientation,
    pub dpi: u32,

    // Spacing
    pub spacing: Spacing,

    // Scale search
    pub search: SearchOptions,

    // Rendering and encoding
    pub filter: ResampleFilter,
    pub quality: u8,
    /// Read the written file back and re-save if its size is off
    pub verify_output: bool,
}

impl Default for CollageOptions {
    fn default() -> Self {
        Self {
            input_files: Vec::new(),
            emphasis_index: None,
            output_file: PathBuf::from("collage.jpg"),
            paper_size: PaperSize::A4,
            orientation: Orientation::Portrait,
            dpi: DEFAULT_DPI,
            spacing: Spacing::default(),
            search: SearchOptions::default(),
            filter: ResampleFilter::default(),
            quality: DEFAULT_JPEG_QUALITY,
            verify_output: true,
        }
    }
}

impl CollageOptions {
    /// Landscape page with wider gaps, the usual setup for five images
    pub fn five_up() -> Self {
        Self {
            orientation: Orientation::Landscape,
            spacing: Spacing {
                margin_mm: FIVE_UP_MARGIN_MM,
                padding_mm: FIVE_UP_PADDING_MM,
                ..Spacing::default()
            },
            ..Self::default()
        }
    }

    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes).map_err(|e| {
            CollageError::InvalidConfiguration(format!("Failed to parse config: {}", e))
        })?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            CollageError::InvalidConfiguration(format!("Failed to serialize config: {}", e))
        })?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options against the configured input files
    pub fn validate(&self) -> Result<()> {
        self.validate_for(self.input_files.len())
    }

    /// Validate the options for a run over `count` images
    pub fn validate_for(&self, count: usize) -> Result<()> {
        if count != FOUR_UP && count != FIVE_UP {
            return Err(CollageError::InvalidInputCount(count));
        }

        if let Some(index) = self.emphasis_index {
            if index >= count {
                return Err(CollageError::InvalidIndex { index, count });
            }
        }

        if self.dpi == 0 || self.dpi > u16::MAX as u32 {
            return Err(CollageError::InvalidConfiguration(format!(
                "DPI must be between 1 and {}, got {}",
                u16::MAX,
                self.dpi
            )));
        }

        if !(1..=100).contains(&self.quality) {
            return Err(CollageError::InvalidConfiguration(format!(
                "JPEG quality must be between 1 and 100, got {}",
                self.quality
            )));
        }

        if !self.spacing.is_valid() {
            return Err(CollageError::InvalidConfiguration(
                "spacing values must be finite and non-negative".to_string(),
            ));
        }

        let (width_mm, height_mm) = self.paper_size.dimensions_mm();
        if !(width_mm.is_finite() && height_mm.is_finite() && width_mm > 0.0 && height_mm > 0.0)
        {
            return Err(CollageError::InvalidConfiguration(format!(
                "paper size must be positive, got {width_mm}x{height_mm}mm"
            )));
        }

        self.search.validate()?;

        // Margins must leave room for content
        geometry::available_area(self.page(), self.margin_px())?;

        Ok(())
    }

    /// Emphasized image for the 4-image layouts
    pub fn emphasis(&self) -> usize {
        self.emphasis_index.unwrap_or(0)
    }

    /// Output page in pixels
    pub fn page(&self) -> PageSpec {
        geometry::page_size(self.paper_size.dimensions_mm(), self.dpi, self.orientation)
    }

    /// Page margin in pixels
    pub fn margin_px(&self) -> u32 {
        mm_to_px(self.spacing.margin_mm, self.dpi)
    }

    /// Gaps between images in pixels
    pub fn gaps(&self) -> Gaps {
        Gaps {
            image: mm_to_px(self.spacing.padding_mm, self.dpi),
            row: mm_to_px(self.spacing.resolved_row_gap_mm(), self.dpi),
            bottom_image: mm_to_px(self.spacing.resolved_bottom_padding_mm(), self.dpi),
        }
    }
}
