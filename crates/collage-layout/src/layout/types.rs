//! Layout data types for collage composition
//!
//! These types represent the intermediate layout calculations between
//! image decoding and canvas compositing. All sizes and coordinates are
//! whole pixels with the origin at the top-left corner of the page.

use std::fmt;

/// A width/height pair in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Area in square pixels
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// True when either dimension is zero
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether this size fits inside `bounds` in both dimensions
    pub fn fits_within(&self, bounds: Size) -> bool {
        self.width <= bounds.width && self.height <= bounds.height
    }

    /// Multiply both dimensions by `factor`, truncating to whole pixels
    pub fn scaled(&self, factor: f64) -> Size {
        Size::new(
            (self.width as f64 * factor) as u32,
            (self.height as f64 * factor) as u32,
        )
    }

    /// Width divided by height
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Swap width and height
    pub fn transposed(&self) -> Size {
        Size::new(self.height, self.width)
    }
}

/// Pixel dimensions of the output page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageSpec {
    pub width_px: u32,
    pub height_px: u32,
}

impl PageSpec {
    pub fn size(&self) -> Size {
        Size::new(self.width_px, self.height_px)
    }

    pub fn area(&self) -> u64 {
        self.size().area()
    }
}

/// The page together with the content area left inside its margins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub page: PageSpec,
    /// Margin applied on every side, in pixels
    pub margin: u32,
    /// Available content area (page minus margins)
    pub area: Size,
}

impl Frame {
    /// The content area as a rectangle in page coordinates
    pub fn content_rect(&self) -> Rect {
        Rect::new(self.margin, self.margin, self.area.width, self.area.height)
    }
}

/// Gaps between images, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gaps {
    /// Between neighbouring images (and between bands in the 4-image layouts)
    pub image: u32,
    /// Between the two rows of the 2-over-3 grid
    pub row: u32,
    /// Between neighbouring images of the 2-over-3 bottom row
    pub bottom_image: u32,
}

impl Gaps {
    /// Use the same gap everywhere
    pub fn uniform(gap: u32) -> Self {
        Self {
            image: gap,
            row: gap,
            bottom_image: gap,
        }
    }
}

/// A rectangular area in pixels, top-left origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate (exclusive)
    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge y coordinate (exclusive)
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Whether the two rectangles share any pixel
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Whether `other` lies entirely inside this rectangle
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// Structural arrangement of the images on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum LayoutKind {
    /// Emphasized image on top, three smaller images in a row below
    LargeTop,
    /// Emphasized image on the left, three smaller images stacked to its right
    LargeLeft,
    /// Four images tiled 2x2
    ClassicGrid,
    /// Two images in a top row, three in a bottom row
    TwoOverThree,
}

impl LayoutKind {
    /// Human-readable name
    pub fn name(self) -> &'static str {
        match self {
            LayoutKind::LargeTop => "Large top with 3 small below",
            LayoutKind::LargeLeft => "Large left with 3 small right",
            LayoutKind::ClassicGrid => "Classic 2x2 grid",
            LayoutKind::TwoOverThree => "2 above, 3 below",
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A structurally distinct arrangement evaluated against the content area
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutCandidate {
    pub kind: LayoutKind,
    /// Which input image is enlarged, if any
    pub emphasis: Option<usize>,
    /// Space the arrangement needs
    pub bounding_box: Size,
    /// Available area minus bounding-box area (higher ranks first)
    pub score: i64,
}

impl LayoutCandidate {
    /// Score relative to the whole page area, for display
    pub fn efficiency(&self, page: &PageSpec) -> f64 {
        if page.area() == 0 {
            return 0.0;
        }
        self.score as f64 / page.area() as f64
    }
}

/// Final position of one input image on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    /// Index into the input list
    pub index: usize,
    /// Left edge in pixels
    pub x: u32,
    /// Top edge in pixels
    pub y: u32,
    /// Size the image is resampled to
    pub size: Size,
}

impl Placement {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.size.width, self.size.height)
    }
}

/// Everything needed to render a collage
#[derive(Debug, Clone)]
pub struct LayoutPlan {
    pub frame: Frame,
    /// The arrangement being rendered
    pub candidate: LayoutCandidate,
    /// Every feasible arrangement at the chosen sizes, best first
    pub candidates: Vec<LayoutCandidate>,
    /// Global scale factor chosen by the search (4-image layouts only)
    pub scale: Option<f64>,
    /// Emphasis multiplier actually used (4-image layouts only)
    pub multiplier: Option<f64>,
    /// Target size of every input image, in input order
    pub sizes: Vec<Size>,
    /// One placement per input image, in input order
    pub placements: Vec<Placement>,
}

impl LayoutPlan {
    pub fn page(&self) -> PageSpec {
        self.frame.page
    }
}
