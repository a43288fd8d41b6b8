use collage_layout::layout::{self, LayoutKind, Placement, Size};
use collage_layout::*;

/// Aspect ratios seen in practice: phone, camera, square, panorama
fn mixed_sets() -> Vec<Vec<Size>> {
    vec![
        vec![Size::new(1000, 1000); 4],
        vec![
            Size::new(4032, 3024),
            Size::new(3024, 4032),
            Size::new(1080, 1920),
            Size::new(6000, 2000),
        ],
        vec![
            Size::new(1200, 3000),
            Size::new(800, 600),
            Size::new(1920, 1080),
            Size::new(1000, 1000),
        ],
        vec![
            Size::new(5000, 1000),
            Size::new(5000, 1000),
            Size::new(5000, 1000),
            Size::new(1000, 1000),
        ],
    ]
}

fn assert_well_placed(placements: &[Placement], options: &CollageOptions) {
    let page = options.page();
    let margin = options.margin_px();

    for p in placements {
        assert!(p.x >= margin && p.y >= margin, "{p:?} intrudes on the margin");
        assert!(p.x + p.size.width <= page.width_px - margin, "{p:?} overflows right");
        assert!(p.y + p.size.height <= page.height_px - margin, "{p:?} overflows bottom");
    }

    for (i, a) in placements.iter().enumerate() {
        for b in &placements[i + 1..] {
            assert!(!a.rect().intersects(&b.rect()), "{a:?} overlaps {b:?}");
        }
    }
}

#[test]
fn test_fit_within_respects_box_and_ratio() {
    let natives = [
        Size::new(1000, 1000),
        Size::new(4032, 3024),
        Size::new(1080, 1920),
        Size::new(6000, 2000),
        Size::new(1, 3),
    ];
    let boxes = [
        Size::new(500, 500),
        Size::new(300, 900),
        Size::new(1200, 400),
        Size::new(646, 1499),
    ];

    for native in natives {
        for bounds in boxes {
            let fitted = layout::fit_within(native, bounds).unwrap();
            assert!(fitted.fits_within(bounds), "{native:?} in {bounds:?} gave {fitted:?}");

            // Truncating one side moves the ratio by less than one pixel's worth
            let ratio = native.aspect_ratio();
            let error = (fitted.aspect_ratio() - ratio).abs() / ratio;
            let tolerance = 1.0 / fitted.width.min(fitted.height) as f64 + 1e-9;
            assert!(error <= tolerance, "{native:?} in {bounds:?} gave {fitted:?}");
        }
    }
}

#[test]
fn test_every_feasible_layout_is_well_placed() {
    let options = CollageOptions {
        search: SearchOptions {
            objective: SearchObjective::LargestFit,
            ..SearchOptions::default()
        },
        ..CollageOptions::default()
    };

    for dims in mixed_sets() {
        for emphasis in 0..dims.len() {
            let options = CollageOptions {
                emphasis_index: Some(emphasis),
                ..options.clone()
            };
            let best = plan_layout(&dims, &options, &HighestScore).unwrap();

            for candidate in &best.candidates {
                let plan = plan_layout(&dims, &options, &PreferredLayout(candidate.kind)).unwrap();
                assert_eq!(plan.candidate.kind, candidate.kind);
                assert_eq!(plan.placements.len(), 4);
                assert_well_placed(&plan.placements, &options);
            }
        }
    }
}

#[test]
fn test_placements_follow_input_order() {
    let dims = &mixed_sets()[1];
    let options = CollageOptions {
        emphasis_index: Some(2),
        ..CollageOptions::default()
    };
    let plan = plan_layout(dims, &options, &HighestScore).unwrap();

    let indices: Vec<_> = plan.placements.iter().map(|p| p.index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3]);
    for (placement, size) in plan.placements.iter().zip(&plan.sizes) {
        assert_eq!(placement.size, *size);
    }
}

#[test]
fn test_search_is_deterministic() {
    let options = CollageOptions::default();
    for dims in mixed_sets() {
        let first = plan_layout(&dims, &options, &HighestScore).unwrap();
        let second = plan_layout(&dims, &options, &HighestScore).unwrap();
        assert_eq!(first.scale, second.scale);
        assert_eq!(first.candidate, second.candidate);
        assert_eq!(first.placements, second.placements);
    }
}

#[test]
fn test_orientation_swaps_available_area() {
    for dpi in [72, 150, 300, 600] {
        let portrait = layout::page_size((210.0, 297.0), dpi, Orientation::Portrait);
        let landscape = layout::page_size((210.0, 297.0), dpi, Orientation::Landscape);
        let margin = constants::mm_to_px(constants::DEFAULT_MARGIN_MM, dpi);

        let a = layout::available_area(portrait, margin).unwrap();
        let b = layout::available_area(landscape, margin).unwrap();
        assert_eq!(a, b.transposed());
    }
}

#[test]
fn test_emphasis_boundaries() {
    let dims = vec![Size::new(1000, 1000); 4];

    let first = CollageOptions {
        emphasis_index: Some(0),
        ..CollageOptions::default()
    };
    let last = CollageOptions {
        emphasis_index: Some(3),
        ..CollageOptions::default()
    };
    let first = plan_layout(&dims, &first, &HighestScore).unwrap();
    let last = plan_layout(&dims, &last, &HighestScore).unwrap();

    assert_ne!(first.placements, last.placements);
    assert!(first.sizes[0].width > first.sizes[3].width);
    assert!(last.sizes[3].width > last.sizes[0].width);

    let out_of_range = CollageOptions {
        emphasis_index: Some(4),
        ..CollageOptions::default()
    };
    assert!(matches!(
        plan_layout(&dims, &out_of_range, &HighestScore),
        Err(CollageError::InvalidIndex { index: 4, count: 4 })
    ));
}

#[test]
fn test_scenario_four_squares() {
    let dims = vec![Size::new(1000, 1000); 4];
    let plan = plan_layout(&dims, &CollageOptions::default(), &HighestScore).unwrap();

    assert_eq!((plan.page().width_px, plan.page().height_px), (2480, 3508));
    assert!(matches!(
        plan.candidate.kind,
        LayoutKind::LargeTop | LayoutKind::LargeLeft
    ));

    let large = plan.sizes[0];
    for small in &plan.sizes[1..] {
        assert!(large.width > small.width || large.height > small.height);
    }
}

#[test]
fn test_scenario_zero_area_image() {
    let dims = vec![
        Size::new(1000, 1000),
        Size::new(0, 800),
        Size::new(1000, 1000),
        Size::new(1000, 1000),
    ];
    assert!(matches!(
        plan_layout(&dims, &CollageOptions::default(), &HighestScore),
        Err(CollageError::DegenerateImage { index: 1, .. })
    ));
}

#[test]
fn test_huge_header_dimensions_are_infeasible() {
    // Headers can declare sides near 2^31; scaled sums must not wrap
    let dims = vec![Size::new(2_000_000_000, 2_000_000_000); 4];
    assert!(matches!(
        plan_layout(&dims, &CollageOptions::default(), &HighestScore),
        Err(CollageError::NoFeasibleLayout)
    ));
}

#[test]
fn test_scenario_five_images_rows_center_independently() {
    let dims = vec![
        Size::new(4032, 3024),
        Size::new(1080, 1920),
        Size::new(1000, 1000),
        Size::new(6000, 2000),
        Size::new(1200, 3000),
    ];
    let options = CollageOptions {
        orientation: Orientation::Landscape,
        ..CollageOptions::default()
    };
    let plan = plan_layout(&dims, &options, &HighestScore).unwrap();

    assert_eq!(plan.candidate.kind, LayoutKind::TwoOverThree);
    assert_eq!(plan.page().width_px, 3508);
    assert_well_placed(&plan.placements, &options);

    let page_width = plan.page().width_px;
    for row in [&plan.placements[..2], &plan.placements[2..]] {
        let left = row[0].x;
        let last = row[row.len() - 1];
        let right = page_width - (last.x + last.size.width);
        assert!(left.abs_diff(right) <= 1, "row {row:?} is off-center");
    }

    // Rows are laid out independently, so their left edges differ
    assert_ne!(plan.placements[0].x, plan.placements[2].x);
    assert!(plan.placements[2].y > plan.placements[0].y);
}

#[test]
fn test_unavailable_preferred_layout() {
    // At the largest feasible scale only large-left fits
    let dims = vec![Size::new(1000, 1000); 4];
    let options = CollageOptions {
        search: SearchOptions {
            objective: SearchObjective::LargestFit,
            ..SearchOptions::default()
        },
        ..CollageOptions::default()
    };
    let result = plan_layout(&dims, &options, &PreferredLayout(LayoutKind::ClassicGrid));
    assert!(matches!(
        result,
        Err(CollageError::LayoutUnavailable(LayoutKind::ClassicGrid))
    ));
}
