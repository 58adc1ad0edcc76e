use clap::Parser;
use foundation::math::ProjectedPoint;
use foundation::time::Time;
use render::{CanvasSurface, GlobeRenderer, RenderFrame, SurfaceSize};
use runtime::{DEFAULT_START_MILES, ScrollMetrics, distance_readout, progress_css_value};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Render one globe frame to a JSON display list")]
struct Args {
    /// Layout width in CSS pixels
    #[arg(long)]
    width: f64,

    /// Layout height in CSS pixels
    #[arg(long)]
    height: f64,

    /// Device pixel ratio (clamped to 1..=2)
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,

    /// Scroll progress in [0, 1]; ignored when --scroll-height is given
    #[arg(long, default_value_t = 0.0)]
    progress: f64,

    /// Derive progress from a scroll position instead
    #[arg(long)]
    scroll_top: Option<f64>,

    #[arg(long, requires = "viewport_height")]
    scroll_height: Option<f64>,

    #[arg(long, requires = "scroll_height")]
    viewport_height: Option<f64>,

    /// Animation timestamp in milliseconds
    #[arg(long, default_value_t = 0.0)]
    time_ms: f64,

    /// Print derived geometry instead of the full command list
    #[arg(long)]
    summary: bool,
}

#[derive(Debug, Serialize)]
struct MarkerSummary {
    x: f64,
    y: f64,
    front_facing: bool,
}

impl From<ProjectedPoint> for MarkerSummary {
    fn from(p: ProjectedPoint) -> Self {
        Self {
            x: p.x,
            y: p.y,
            front_facing: p.is_front_facing(),
        }
    }
}

#[derive(Debug, Serialize)]
struct FrameSummary {
    backing: SurfaceSize,
    progress: f64,
    css_progress: String,
    distance: String,
    commands: usize,
    ellipses: usize,
    radius: Option<f64>,
    rotation: Option<f64>,
    arc_lift: Option<f64>,
    arc_drawn: bool,
    k: Option<MarkerSummary>,
    m: Option<MarkerSummary>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    let args = Args::parse();
    let out = run(&args)?;
    println!("{out}");
    Ok(())
}

fn resolve_progress(args: &Args) -> Result<f64, String> {
    match (args.scroll_height, args.viewport_height) {
        (Some(scroll_height), Some(viewport_height)) => {
            let metrics = ScrollMetrics::new(
                args.scroll_top.unwrap_or(0.0),
                scroll_height,
                viewport_height,
            );
            Ok(metrics.progress())
        }
        _ if args.progress.is_finite() => Ok(args.progress.clamp(0.0, 1.0)),
        _ => Err(format!("--progress must be a number, got {}", args.progress)),
    }
}

fn run(args: &Args) -> Result<String, String> {
    if !(args.width.is_finite() && args.height.is_finite()) || args.width < 0.0 || args.height < 0.0
    {
        return Err(format!(
            "--width/--height must be non-negative, got {}x{}",
            args.width, args.height
        ));
    }
    if !args.time_ms.is_finite() {
        return Err(format!("--time-ms must be finite, got {}", args.time_ms));
    }

    let progress = resolve_progress(args)?;
    let renderer = GlobeRenderer::default();
    let mut surface = CanvasSurface::new(renderer.config().max_device_pixel_ratio);
    surface.revalidate(args.width, args.height, args.dpr);
    let size = surface.size();

    let frame = renderer.render(size, progress, Time(args.time_ms));
    info!(
        width = size.width,
        height = size.height,
        progress,
        commands = frame.commands.len(),
        "rendered frame"
    );

    let json = if args.summary {
        serde_json::to_string_pretty(&summarize(size, progress, &frame))
    } else {
        serde_json::to_string_pretty(&frame)
    };
    json.map_err(|e| format!("serialize: {e}"))
}

fn summarize(backing: SurfaceSize, progress: f64, frame: &RenderFrame) -> FrameSummary {
    let geometry = frame.geometry;
    FrameSummary {
        backing,
        progress,
        css_progress: progress_css_value(progress),
        distance: distance_readout(DEFAULT_START_MILES, progress).text,
        commands: frame.commands.len(),
        ellipses: frame.ellipse_count(),
        radius: geometry.map(|g| g.radius),
        rotation: geometry.map(|g| g.rotation),
        arc_lift: geometry.map(|g| g.arc_lift),
        arc_drawn: frame.has_arc(),
        k: geometry.map(|g| g.k.into()),
        m: geometry.map(|g| g.m.into()),
    }
}
