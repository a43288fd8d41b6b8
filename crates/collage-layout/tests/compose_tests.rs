use collage_layout::layout::{LayoutKind, Size};
use collage_layout::*;
use image::{Rgb, RgbImage};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const COLORS: [[u8; 3]; 5] = [
    [200, 0, 0],
    [0, 200, 0],
    [0, 0, 200],
    [200, 200, 0],
    [0, 200, 200],
];

/// Write one solid-colored PNG per size and return their paths
fn write_inputs(dir: &Path, sizes: &[(u32, u32)]) -> Vec<PathBuf> {
    sizes
        .iter()
        .enumerate()
        .map(|(i, &(width, height))| {
            let path = dir.join(format!("input{i}.png"));
            RgbImage::from_pixel(width, height, Rgb(COLORS[i]))
                .save(&path)
                .unwrap();
            path
        })
        .collect()
}

/// Small pages keep the tests fast: A4 at 50 DPI is 413x585
fn test_options(inputs: Vec<PathBuf>, output: PathBuf) -> CollageOptions {
    CollageOptions {
        input_files: inputs,
        output_file: output,
        dpi: 50,
        filter: ResampleFilter::Nearest,
        ..CollageOptions::default()
    }
}

#[tokio::test]
async fn test_load_images_preserves_order() {
    let dir = TempDir::new().unwrap();
    let paths = write_inputs(dir.path(), &[(30, 20), (10, 40), (25, 25)]);

    let images = compose::load_images(&paths).await.unwrap();
    let dims: Vec<_> = images.iter().map(|i| (i.width(), i.height())).collect();
    assert_eq!(dims, vec![(30, 20), (10, 40), (25, 25)]);

    let headers = compose::read_dimensions(&paths).await.unwrap();
    assert_eq!(
        headers,
        vec![Size::new(30, 20), Size::new(10, 40), Size::new(25, 25)]
    );
}

#[tokio::test]
async fn test_compose_four_png() {
    let dir = TempDir::new().unwrap();
    let inputs = write_inputs(dir.path(), &[(400, 300), (300, 400), (200, 200), (600, 200)]);
    let output = dir.path().join("collage.png");
    let options = test_options(inputs, output.clone());

    let report = compose(&options, &HighestScore).await.unwrap();
    assert_eq!(report.output, output);
    assert_eq!((report.page.width_px, report.page.height_px), (413, 585));
    assert!(report.scale.is_some());

    let canvas = image::open(&output).unwrap().to_rgb8();
    assert_eq!(canvas.dimensions(), (413, 585));
    assert_eq!(canvas.get_pixel(0, 0), &Rgb([255, 255, 255]));

    // Every image lands where the plan says, in its own color
    let plan = plan_files(&options, &HighestScore).await.unwrap();
    assert_eq!(plan.candidate.kind, report.layout);
    for placement in &plan.placements {
        let cx = placement.x + placement.size.width / 2;
        let cy = placement.y + placement.size.height / 2;
        assert_eq!(canvas.get_pixel(cx, cy), &Rgb(COLORS[placement.index]));
    }
}

#[tokio::test]
async fn test_compose_five_jpeg() {
    let dir = TempDir::new().unwrap();
    let inputs = write_inputs(
        dir.path(),
        &[(400, 300), (300, 400), (200, 200), (600, 200), (150, 450)],
    );
    let output = dir.path().join("collage.jpg");
    let options = CollageOptions {
        orientation: Orientation::Landscape,
        ..test_options(inputs, output.clone())
    };

    let report = compose(&options, &HighestScore).await.unwrap();
    assert_eq!(report.layout, LayoutKind::TwoOverThree);
    assert_eq!(report.scale, None);

    let written = image::image_dimensions(&output).unwrap();
    assert_eq!(written, (585, 413));
    assert_eq!(written.0, report.page.width_px);
    assert_eq!(jfif_density(&output), (1, 50, 50));
}

#[tokio::test]
async fn test_preferred_layout_is_rendered() {
    let dir = TempDir::new().unwrap();
    let inputs = write_inputs(dir.path(), &[(100, 100); 4]);
    let output = dir.path().join("grid.png");
    let options = test_options(inputs, output);

    let report = compose(&options, &PreferredLayout(LayoutKind::ClassicGrid))
        .await
        .unwrap();
    assert_eq!(report.layout, LayoutKind::ClassicGrid);
}

#[tokio::test]
async fn test_missing_input_is_invalid_path() {
    let dir = TempDir::new().unwrap();
    let mut inputs = write_inputs(dir.path(), &[(50, 50); 3]);
    let missing = dir.path().join("missing.png");
    inputs.push(missing.clone());
    let options = test_options(inputs, dir.path().join("out.png"));

    match compose(&options, &HighestScore).await {
        Err(CollageError::InvalidPath(path)) => assert_eq!(path, missing),
        other => panic!("Expected InvalidPath, got {other:?}"),
    }
    assert!(!dir.path().join("out.png").exists());
}

#[tokio::test]
async fn test_directory_is_invalid_path() {
    let dir = TempDir::new().unwrap();
    let mut inputs = write_inputs(dir.path(), &[(50, 50); 3]);
    inputs.push(dir.path().to_path_buf());
    let options = test_options(inputs, dir.path().join("out.png"));

    assert!(matches!(
        compose(&options, &HighestScore).await,
        Err(CollageError::InvalidPath(_))
    ));
}

#[tokio::test]
async fn test_undecodable_input() {
    let dir = TempDir::new().unwrap();
    let mut inputs = write_inputs(dir.path(), &[(50, 50); 3]);
    let broken = dir.path().join("broken.png");
    std::fs::write(&broken, b"definitely not a png").unwrap();
    inputs.push(broken.clone());
    let options = test_options(inputs, dir.path().join("out.png"));

    match compose(&options, &HighestScore).await {
        Err(CollageError::Decode { path, .. }) => assert_eq!(path, broken),
        other => panic!("Expected Decode, got {other:?}"),
    }
}

#[tokio::test]
async fn test_validation_runs_before_io() {
    // Nothing exists on disk, but the count is checked first
    let options = test_options(
        vec![PathBuf::from("a.png"), PathBuf::from("b.png")],
        PathBuf::from("out.png"),
    );
    assert!(matches!(
        compose(&options, &HighestScore).await,
        Err(CollageError::InvalidInputCount(2))
    ));
}

#[tokio::test]
async fn test_save_canvas_writes_page_size() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("blank.jpg");
    let canvas = RgbImage::from_pixel(120, 80, Rgb([255, 255, 255]));
    let settings = compose::EncodeSettings {
        quality: 90,
        dpi: 300,
        verify: true,
        filter: ResampleFilter::Lanczos3,
    };

    compose::save_canvas(canvas, &path, settings).await.unwrap();
    assert_eq!(image::image_dimensions(&path).unwrap(), (120, 80));
    assert_eq!(jfif_density(&path), (1, 300, 300));
}

/// Density unit and x/y density from the JFIF APP0 segment
fn jfif_density(path: &Path) -> (u8, u16, u16) {
    let bytes = std::fs::read(path).unwrap();
    let at = bytes
        .windows(5)
        .position(|w| w == b"JFIF\0")
        .expect("no JFIF segment");
    // Identifier, then 2 version bytes, unit, x density, y density
    let unit = bytes[at + 7];
    let x = u16::from_be_bytes([bytes[at + 8], bytes[at + 9]]);
    let y = u16::from_be_bytes([bytes[at + 10], bytes[at + 11]]);
    (unit, x, y)
}

#[test]
fn test_output_format_from_extension() {
    use image::ImageFormat;

    assert_eq!(compose::output_format(Path::new("a.jpg")), ImageFormat::Jpeg);
    assert_eq!(compose::output_format(Path::new("a.jpeg")), ImageFormat::Jpeg);
    assert_eq!(compose::output_format(Path::new("a.png")), ImageFormat::Png);
    assert_eq!(compose::output_format(Path::new("collage")), ImageFormat::Jpeg);
}
