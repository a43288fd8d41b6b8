//! Shared constants for collage layout
//!
//! This module centralizes magic numbers and constants used throughout
//! the layout and compositing process.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Millimetres per inch
pub const MM_PER_INCH: f32 = 25.4;

/// Convert millimetres to whole pixels at the given resolution
#[inline]
pub fn mm_to_px(mm: f32, dpi: u32) -> u32 {
    (mm * dpi as f32 / MM_PER_INCH).round().max(0.0) as u32
}

/// Convert pixels back to millimetres at the given resolution
#[inline]
pub fn px_to_mm(px: u32, dpi: u32) -> f32 {
    px as f32 * MM_PER_INCH / dpi as f32
}

// =============================================================================
// Page Defaults
// =============================================================================

/// Print resolution used when none is configured
pub const DEFAULT_DPI: u32 = 300;

/// Page margin (0.8" = 240 px at 300 DPI)
pub const DEFAULT_MARGIN_MM: f32 = 20.32;

/// Gap between images (0.1" = 30 px at 300 DPI)
pub const DEFAULT_PADDING_MM: f32 = 2.54;

/// Margin of the landscape 2-over-3 preset (0.6" = 180 px at 300 DPI)
pub const FIVE_UP_MARGIN_MM: f32 = 15.24;

/// Gap of the landscape 2-over-3 preset (0.2" = 60 px at 300 DPI)
pub const FIVE_UP_PADDING_MM: f32 = 5.08;

/// Canvas background
pub const BACKGROUND_RGB: [u8; 3] = [255, 255, 255];

// =============================================================================
// Scale Search
// =============================================================================

/// Smallest global scale factor sampled
pub const DEFAULT_MIN_SCALE: f64 = 0.1;

/// Largest global scale factor sampled
pub const DEFAULT_MAX_SCALE: f64 = 2.0;

/// Number of evenly spaced samples between min and max (inclusive)
pub const DEFAULT_SCALE_STEPS: usize = 20;

/// How much larger the emphasized image is drawn than the others
pub const DEFAULT_EMPHASIS_MULTIPLIER: f64 = 1.5;

/// Multipliers retried, in order, when nothing fits at the primary one
pub const FALLBACK_MULTIPLIERS: [f64; 4] = [1.4, 1.3, 1.2, 1.1];

// =============================================================================
// Output
// =============================================================================

/// JPEG quality for the first save
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// JPEG quality used when re-saving after a dimension mismatch
pub const RESAVE_JPEG_QUALITY: u8 = 100;

/// Number of images in the dynamic emphasized layouts
pub const FOUR_UP: usize = 4;

/// Number of images in the 2-over-3 grid
pub const FIVE_UP: usize = 5;
