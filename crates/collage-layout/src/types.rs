use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::layout::LayoutKind;

#[derive(Error, Debug)]
pub enum CollageError {
    #[error("Expected 4 or 5 images, got {0}")]
    InvalidInputCount(usize),
    #[error("Image path does not exist or is not a file: {}", .0.display())]
    InvalidPath(PathBuf),
    #[error("Emphasis index {index} is out of range for {count} images")]
    InvalidIndex { index: usize, count: usize },
    #[error("Orientation must be 'portrait' or 'landscape', got '{0}'")]
    InvalidOrientation(String),
    #[error("Image {index} has zero area ({width}x{height})")]
    DegenerateImage {
        index: usize,
        width: u32,
        height: u32,
    },
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Could not find a layout that fits these images on the page")]
    NoFeasibleLayout,
    #[error("Layout '{0}' does not fit these images on the page")]
    LayoutUnavailable(LayoutKind),
    #[error("Selected layout {index} but only {available} are available")]
    InvalidSelection { index: usize, available: usize },
    #[error("Failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Failed to encode {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, CollageError>;

/// Paper orientation
///
/// Config files and the command line both go through [`FromStr`], so an
/// unknown value is always reported as `InvalidOrientation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub enum Orientation {
    /// Portrait: height > width (default for most paper sizes)
    #[default]
    Portrait,
    /// Landscape: width > height
    Landscape,
}

impl FromStr for Orientation {
    type Err = CollageError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "portrait" => Ok(Orientation::Portrait),
            "landscape" => Ok(Orientation::Landscape),
            _ => Err(CollageError::InvalidOrientation(s.to_string())),
        }
    }
}

impl TryFrom<String> for Orientation {
    type Error = CollageError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Orientation> for String {
    fn from(orientation: Orientation) -> Self {
        orientation.to_string()
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        })
    }
}

/// Standard paper sizes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum PaperSize {
    A3,
    #[default]
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
    Custom { width_mm: f32, height_mm: f32 },
}

impl PaperSize {
    /// Get base dimensions (always portrait: width < height for standard sizes)
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
            PaperSize::Tabloid => (279.4, 431.8),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }
}

/// Resampling filter used when scaling source images onto the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ResampleFilter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    /// High-quality windowed sinc
    #[default]
    Lanczos3,
}

impl From<ResampleFilter> for image::imageops::FilterType {
    fn from(filter: ResampleFilter) -> Self {
        match filter {
            ResampleFilter::Nearest => Self::Nearest,
            ResampleFilter::Triangle => Self::Triangle,
            ResampleFilter::CatmullRom => Self::CatmullRom,
            ResampleFilter::Gaussian => Self::Gaussian,
            ResampleFilter::Lanczos3 => Self::Lanczos3,
        }
    }
}

/// What the scale sweep optimizes for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum SearchObjective {
    /// Keep the sample whose best candidate has the highest utilization score
    #[default]
    Score,
    /// Keep the sample whose best candidate leaves the least unused area
    LargestFit,
}

impl SearchObjective {
    /// Comparison key for a candidate score; larger keys win.
    pub fn key(self, score: i64) -> i64 {
        match self {
            SearchObjective::Score => score,
            SearchObjective::LargestFit => -score,
        }
    }
}

/// Page spacing in millimetres
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spacing {
    /// Margin on every side of the page
    pub margin_mm: f32,
    /// Gap between neighbouring images
    pub padding_mm: f32,
    /// Gap between the two rows of the 2-over-3 grid (defaults to padding)
    pub row_gap_mm: Option<f32>,
    /// Gap between images in the bottom row of the 2-over-3 grid (defaults to padding)
    pub bottom_padding_mm: Option<f32>,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            margin_mm: crate::constants::DEFAULT_MARGIN_MM,
            padding_mm: crate::constants::DEFAULT_PADDING_MM,
            row_gap_mm: None,
            bottom_padding_mm: None,
        }
    }
}

impl Spacing {
    pub fn resolved_row_gap_mm(&self) -> f32 {
        self.row_gap_mm.unwrap_or(self.padding_mm)
    }

    pub fn resolved_bottom_padding_mm(&self) -> f32 {
        self.bottom_padding_mm.unwrap_or(self.padding_mm)
    }

    fn values(&self) -> [f32; 4] {
        [
            self.margin_mm,
            self.padding_mm,
            self.resolved_row_gap_mm(),
            self.resolved_bottom_padding_mm(),
        ]
    }

    /// All spacing values are finite and non-negative
    pub fn is_valid(&self) -> bool {
        self.values().iter().all(|v| v.is_finite() && *v >= 0.0)
    }
}
