//! Placement calculation
//!
//! Turns a chosen arrangement and final image sizes into top-left anchors
//! on the page. Rows are centered along their axis and every image is
//! centered across its band. Results are always returned in input order.

use log::{debug, warn};

use crate::types::{CollageError, Result};

use super::candidates::{grid_cell, others, row_extent, two_over_three_cell};
use super::geometry::center_offset;
use super::{Frame, Gaps, LayoutCandidate, LayoutKind, Placement, Size};

/// Compute one placement per image for the given arrangement.
///
/// # Arguments
/// * `candidate` - Arrangement to lay out
/// * `sizes` - Final size of every image, in input order
/// * `frame` - Page, margin and content area
/// * `gaps` - Spacing between images and rows
pub fn calculate_placements(
    candidate: &LayoutCandidate,
    sizes: &[Size],
    frame: &Frame,
    gaps: &Gaps,
) -> Result<Vec<Placement>> {
    let emphasis = candidate.emphasis.unwrap_or(0);
    if emphasis >= sizes.len() {
        return Err(CollageError::InvalidIndex {
            index: emphasis,
            count: sizes.len(),
        });
    }

    let mut placements = match candidate.kind {
        LayoutKind::LargeTop => large_top(sizes, emphasis, frame.margin, frame.area, gaps.image),
        LayoutKind::LargeLeft => large_left(sizes, emphasis, frame.margin, frame.area, gaps.image),
        LayoutKind::ClassicGrid => classic_grid(sizes, emphasis, frame.margin, frame.area, gaps.image),
        LayoutKind::TwoOverThree => two_over_three(sizes, frame.margin, frame.area, gaps),
    };
    placements.sort_by_key(|p| p.index);

    for p in &placements {
        debug!(
            "image {} at ({}, {}) size {}x{}",
            p.index, p.x, p.y, p.size.width, p.size.height
        );
    }

    validate_placements(candidate.kind, &placements, frame)?;
    Ok(placements)
}

/// Check that placements stay inside the content area and never overlap.
///
/// Zero-area placements cover no pixels and are ignored.
pub fn validate_placements(
    kind: LayoutKind,
    placements: &[Placement],
    frame: &Frame,
) -> Result<()> {
    let content = frame.content_rect();

    for (i, a) in placements.iter().enumerate() {
        if a.size.is_empty() {
            continue;
        }

        let rect = a.rect();
        if !content.contains(&rect) {
            warn!("'{kind}' puts image {} outside the content area: {rect:?}", a.index);
            return Err(CollageError::LayoutUnavailable(kind));
        }

        for b in placements[i + 1..].iter().filter(|b| !b.size.is_empty()) {
            if rect.intersects(&b.rect()) {
                warn!("'{kind}' overlaps images {} and {}", a.index, b.index);
                return Err(CollageError::LayoutUnavailable(kind));
            }
        }
    }

    Ok(())
}

// =============================================================================
// Four Images
// =============================================================================

/// Emphasized image centered above a centered row of the others; the whole
/// block is centered vertically in the content area.
fn large_top(sizes: &[Size], emphasis: usize, margin: u32, area: Size, padding: u32) -> Vec<Placement> {
    let large = sizes[emphasis];
    let smalls: Vec<(usize, Size)> = others(sizes, emphasis).collect();

    let row: Vec<Size> = smalls.iter().map(|(_, size)| *size).collect();
    let row_width = row_extent(&row, padding);
    let row_height = row.iter().map(|s| s.height).max().unwrap_or(0);

    let block_height = large.height + padding + row_height;
    let top = margin + center_offset(area.height, block_height);

    let mut placements = Vec::with_capacity(sizes.len());
    placements.push(Placement {
        index: emphasis,
        x: margin + center_offset(area.width, large.width),
        y: top,
        size: large,
    });

    let row_y = top + large.height + padding;
    let mut x = margin + center_offset(area.width, row_width);
    for (index, size) in smalls {
        placements.push(Placement {
            index,
            x,
            y: row_y + center_offset(row_height, size.height),
            size,
        });
        x += size.width + padding;
    }

    placements
}

/// Large-top computed on the transposed page, then swapped back
fn large_left(sizes: &[Size], emphasis: usize, margin: u32, area: Size, padding: u32) -> Vec<Placement> {
    let transposed: Vec<Size> = sizes.iter().map(Size::transposed).collect();

    large_top(&transposed, emphasis, margin, area.transposed(), padding)
        .into_iter()
        .map(|p| Placement {
            index: p.index,
            x: p.y,
            y: p.x,
            size: p.size.transposed(),
        })
        .collect()
}

/// Fixed quadrant anchors. The emphasized image always takes the top-left
/// quadrant and the rest fill the others in input order.
fn classic_grid(sizes: &[Size], emphasis: usize, margin: u32, area: Size, padding: u32) -> Vec<Placement> {
    let cell = grid_cell(area, padding);
    let right = margin + cell.width + padding;
    let lower = margin + cell.height + padding;
    let anchors = [(margin, margin), (right, margin), (margin, lower), (right, lower)];

    std::iter::once((emphasis, sizes[emphasis]))
        .chain(others(sizes, emphasis))
        .zip(anchors)
        .map(|((index, size), (x, y))| Placement { index, x, y, size })
        .collect()
}

// =============================================================================
// Five Images
// =============================================================================

/// Two images in the top row, three below; each row centered on its own
fn two_over_three(sizes: &[Size], margin: u32, area: Size, gaps: &Gaps) -> Vec<Placement> {
    let row_height = two_over_three_cell(area, gaps).height;
    let split = 2.min(sizes.len());

    let mut placements = centered_row(&sizes[..split], 0, margin, area.width, margin, row_height, gaps.image);
    placements.extend(centered_row(
        &sizes[split..],
        split,
        margin,
        area.width,
        margin + row_height + gaps.row,
        row_height,
        gaps.bottom_image,
    ));
    placements
}

/// Lay `sizes` out left to right, centered horizontally in `width` and
/// vertically within a band of `row_height` starting at `y`.
fn centered_row(
    sizes: &[Size],
    first_index: usize,
    margin: u32,
    width: u32,
    y: u32,
    row_height: u32,
    gap: u32,
) -> Vec<Placement> {
    let mut x = margin + center_offset(width, row_extent(sizes, gap));

    sizes
        .iter()
        .enumerate()
        .map(|(i, size)| {
            let placement = Placement {
                index: first_index + i,
                x,
                y: y + center_offset(row_height, size.height),
                size: *size,
            };
            x += size.width + gap;
            placement
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{PageSpec, candidates, geometry};

    fn a4_frame() -> Frame {
        let page = PageSpec {
            width_px: 2480,
            height_px: 3508,
        };
        geometry::frame(page, 240).unwrap()
    }

    fn sizes() -> Vec<Size> {
        vec![
            Size::new(600, 600),
            Size::new(300, 300),
            Size::new(300, 200),
            Size::new(300, 300),
        ]
    }

    fn candidate(kind: LayoutKind, sizes: &[Size], frame: &Frame) -> LayoutCandidate {
        candidates::generate_candidates(sizes, 0, frame.area, 30)
            .unwrap()
            .into_iter()
            .find(|c| c.kind == kind)
            .unwrap()
    }

    fn anchors(placements: &[Placement]) -> Vec<(u32, u32)> {
        placements.iter().map(|p| (p.x, p.y)).collect()
    }

    #[test]
    fn test_large_top_anchors() {
        let frame = a4_frame();
        let sizes = sizes();
        let chosen = candidate(LayoutKind::LargeTop, &sizes, &frame);
        let placements = calculate_placements(&chosen, &sizes, &frame, &Gaps::uniform(30)).unwrap();

        assert_eq!(
            anchors(&placements),
            vec![(940, 1289), (760, 1919), (1090, 1969), (1420, 1919)]
        );
    }

    #[test]
    fn test_large_left_anchors() {
        let frame = a4_frame();
        let sizes = sizes();
        let chosen = candidate(LayoutKind::LargeLeft, &sizes, &frame);
        let placements = calculate_placements(&chosen, &sizes, &frame, &Gaps::uniform(30)).unwrap();

        assert_eq!(
            anchors(&placements),
            vec![(775, 1454), (1405, 1324), (1405, 1654), (1405, 1884)]
        );
        assert_eq!(placements[2].size, Size::new(300, 200));
    }

    #[test]
    fn test_grid_puts_emphasis_top_left() {
        let frame = a4_frame();
        let mut sizes = sizes();
        sizes.swap(0, 2);
        let chosen = LayoutCandidate {
            kind: LayoutKind::ClassicGrid,
            emphasis: Some(2),
            bounding_box: frame.area,
            score: 0,
        };
        let placements = calculate_placements(&chosen, &sizes, &frame, &Gaps::uniform(30)).unwrap();

        // Cell is (985, 1499)
        assert_eq!(
            anchors(&placements),
            vec![(1255, 240), (240, 1769), (240, 240), (1255, 1769)]
        );
    }

    #[test]
    fn test_two_over_three_rows_center_independently() {
        let page = PageSpec {
            width_px: 3508,
            height_px: 2480,
        };
        let frame = geometry::frame(page, 180).unwrap();
        let gaps = Gaps::uniform(60);
        let sizes = vec![
            Size::new(900, 1030),
            Size::new(1000, 800),
            Size::new(600, 1030),
            Size::new(1009, 500),
            Size::new(700, 1030),
        ];
        let chosen = LayoutCandidate {
            kind: LayoutKind::TwoOverThree,
            emphasis: None,
            bounding_box: frame.area,
            score: 0,
        };
        let placements = calculate_placements(&chosen, &sizes, &frame, &gaps).unwrap();

        // Top row: 900 + 60 + 1000 = 1960 wide in 3148
        assert_eq!(anchors(&placements[..2]), vec![(774, 180), (1734, 295)]);
        // Bottom row: 600 + 1009 + 700 + 120 = 2429 wide, starting below the gap
        assert_eq!(
            anchors(&placements[2..]),
            vec![(539, 1270), (1199, 1535), (2268, 1270)]
        );
    }

    #[test]
    fn test_overlap_is_rejected() {
        let frame = a4_frame();
        let placements = [
            Placement {
                index: 0,
                x: 300,
                y: 300,
                size: Size::new(100, 100),
            },
            Placement {
                index: 1,
                x: 350,
                y: 350,
                size: Size::new(100, 100),
            },
        ];
        assert!(matches!(
            validate_placements(LayoutKind::ClassicGrid, &placements, &frame),
            Err(CollageError::LayoutUnavailable(LayoutKind::ClassicGrid))
        ));
    }

    #[test]
    fn test_margin_intrusion_is_rejected() {
        let frame = a4_frame();
        let placements = [Placement {
            index: 0,
            x: 239,
            y: 300,
            size: Size::new(100, 100),
        }];
        assert!(validate_placements(LayoutKind::LargeTop, &placements, &frame).is_err());
    }
}
