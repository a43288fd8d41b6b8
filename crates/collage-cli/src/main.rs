mod logger;
mod prompt;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use collage_layout::layout::{LayoutKind, LayoutPlan};
use collage_layout::{
    CollageOptions, HighestScore, LayoutSelector, Orientation, PreferredLayout, constants,
};
use logger::StderrLogger;
use prompt::InteractivePrompt;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "collage", about = "Print-ready image collages", version)]
struct Cli {
    /// Increase log detail (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Arrange 4 or 5 images on one page
    Compose(ComposeArgs),

    /// Write the default options as JSON
    InitConfig {
        /// Where to write the config file
        path: PathBuf,

        /// Write the landscape 2-over-3 preset instead
        #[arg(long)]
        five_up: bool,
    },
}

#[derive(clap::Args)]
struct ComposeArgs {
    /// Input images (4 or 5)
    #[arg(short, long, num_args = 1..)]
    input: Vec<PathBuf>,

    /// Output image; the extension picks the format
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Load options from a JSON file; flags given here override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Index of the image drawn larger (4 images only)
    #[arg(long)]
    large: Option<usize>,

    /// Page orientation (portrait or landscape)
    #[arg(long)]
    orientation: Option<Orientation>,

    /// Paper size
    #[arg(long, value_enum)]
    paper: Option<PaperArg>,

    /// Print resolution
    #[arg(long)]
    dpi: Option<u32>,

    /// Page margin in mm
    #[arg(long)]
    margin_mm: Option<f32>,

    /// Gap between images in mm
    #[arg(long)]
    padding_mm: Option<f32>,

    /// Gap between the two rows of the 5-image grid in mm
    #[arg(long)]
    row_gap_mm: Option<f32>,

    /// Gap between bottom-row images of the 5-image grid in mm
    #[arg(long)]
    bottom_padding_mm: Option<f32>,

    /// How much larger the emphasized image is drawn
    #[arg(long)]
    multiplier: Option<f64>,

    /// What the scale search optimizes for
    #[arg(long, value_enum)]
    objective: Option<ObjectiveArg>,

    /// Force a layout instead of taking the best-scored one
    #[arg(long, value_enum, conflicts_with = "interactive")]
    layout: Option<LayoutArg>,

    /// Choose the layout from a list
    #[arg(long)]
    interactive: bool,

    /// Resampling filter
    #[arg(long, value_enum)]
    filter: Option<FilterArg>,

    /// JPEG quality (1-100)
    #[arg(long)]
    quality: Option<u8>,

    /// Skip reading the output back to check its size
    #[arg(long)]
    no_verify: bool,

    /// Print the layout without decoding or writing images
    #[arg(long)]
    plan_only: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
}

#[derive(Clone, Copy, ValueEnum)]
enum ObjectiveArg {
    Score,
    LargestFit,
}

#[derive(Clone, Copy, ValueEnum)]
enum LayoutArg {
    LargeTop,
    LargeLeft,
    Grid,
}

#[derive(Clone, Copy, ValueEnum)]
enum FilterArg {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl From<PaperArg> for collage_layout::PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A3 => Self::A3,
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
            PaperArg::Tabloid => Self::Tabloid,
        }
    }
}

impl From<ObjectiveArg> for collage_layout::SearchObjective {
    fn from(arg: ObjectiveArg) -> Self {
        match arg {
            ObjectiveArg::Score => Self::Score,
            ObjectiveArg::LargestFit => Self::LargestFit,
        }
    }
}

impl From<LayoutArg> for LayoutKind {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::LargeTop => Self::LargeTop,
            LayoutArg::LargeLeft => Self::LargeLeft,
            LayoutArg::Grid => Self::ClassicGrid,
        }
    }
}

impl From<FilterArg> for collage_layout::ResampleFilter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::Nearest => Self::Nearest,
            FilterArg::Triangle => Self::Triangle,
            FilterArg::CatmullRom => Self::CatmullRom,
            FilterArg::Gaussian => Self::Gaussian,
            FilterArg::Lanczos3 => Self::Lanczos3,
        }
    }
}

impl ComposeArgs {
    /// Start from the config file (or defaults) and apply the flags given
    async fn options(&self) -> Result<CollageOptions> {
        let mut options = match &self.config {
            Some(path) => CollageOptions::load(path)
                .await
                .with_context(|| format!("loading {}", path.display()))?,
            None => CollageOptions::default(),
        };

        if !self.input.is_empty() {
            options.input_files = self.input.clone();
        }
        if let Some(output) = &self.output {
            options.output_file = output.clone();
        }
        if let Some(large) = self.large {
            options.emphasis_index = Some(large);
        }
        if let Some(orientation) = self.orientation {
            options.orientation = orientation;
        }
        if let Some(paper) = self.paper {
            options.paper_size = paper.into();
        }
        if let Some(dpi) = self.dpi {
            options.dpi = dpi;
        }
        if let Some(margin) = self.margin_mm {
            options.spacing.margin_mm = margin;
        }
        if let Some(padding) = self.padding_mm {
            options.spacing.padding_mm = padding;
        }
        if let Some(gap) = self.row_gap_mm {
            options.spacing.row_gap_mm = Some(gap);
        }
        if let Some(gap) = self.bottom_padding_mm {
            options.spacing.bottom_padding_mm = Some(gap);
        }
        if let Some(multiplier) = self.multiplier {
            options.search.multiplier = multiplier;
        }
        if let Some(objective) = self.objective {
            options.search.objective = objective.into();
        }
        if let Some(filter) = self.filter {
            options.filter = filter.into();
        }
        if let Some(quality) = self.quality {
            options.quality = quality;
        }
        if self.no_verify {
            options.verify_output = false;
        }

        Ok(options)
    }

    fn selector(&self, options: &CollageOptions) -> Box<dyn LayoutSelector> {
        if self.interactive {
            Box::new(InteractivePrompt::new(options.page()))
        } else if let Some(layout) = self.layout {
            Box::new(PreferredLayout(layout.into()))
        } else {
            Box::new(HighestScore)
        }
    }
}

fn print_plan(plan: &LayoutPlan, dpi: u32) {
    let page = plan.page();
    println!("Layout: {}", plan.candidate.kind);
    println!("  Page: {}x{} px", page.width_px, page.height_px);
    if let (Some(scale), Some(multiplier)) = (plan.scale, plan.multiplier) {
        println!("  Scale: {:.3} (emphasis x{})", scale, multiplier);
    }
    for p in &plan.placements {
        println!(
            "  Image {}: {}x{} px ({:.1}x{:.1} mm) at ({}, {})",
            p.index,
            p.size.width,
            p.size.height,
            constants::px_to_mm(p.size.width, dpi),
            constants::px_to_mm(p.size.height, dpi),
            p.x,
            p.y
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    StderrLogger::from_verbosity(cli.verbose).init()?;

    match cli.command {
        Commands::Compose(args) => {
            let options = args.options().await?;
            let selector = args.selector(&options);

            if args.plan_only {
                let plan = collage_layout::plan_files(&options, selector.as_ref()).await?;
                print_plan(&plan, options.dpi);
                return Ok(());
            }

            let report = collage_layout::compose(&options, selector.as_ref()).await?;
            println!(
                "Collage saved → {} ({}x{} px, {})",
                report.output.display(),
                report.page.width_px,
                report.page.height_px,
                report.layout
            );
        }

        Commands::InitConfig { path, five_up } => {
            let options = if five_up {
                CollageOptions::five_up()
            } else {
                CollageOptions::default()
            };
            options.save(&path).await?;
            println!("Default options written → {}", path.display());
        }
    }

    Ok(())
}
