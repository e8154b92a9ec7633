use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "retrospect", version)]
struct Cli {
    /// Site config JSON; defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one backdrop frame as a PNG.
    Frame(FrameArgs),
    /// Scroll through the landing page and print a snapshot per event.
    Tour(TourArgs),
    /// Submit an address to the waitlist store.
    Join(JoinArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Viewport width; the config viewport is used when omitted.
    #[arg(long)]
    width: Option<f64>,

    /// Viewport height; the config viewport is used when omitted.
    #[arg(long)]
    height: Option<f64>,

    /// Scroll offset in pixels.
    #[arg(long, default_value_t = 0.0)]
    scroll: f64,

    /// Leave the background transparent instead of black.
    #[arg(long, default_value_t = false)]
    transparent: bool,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct TourArgs {
    /// Viewport width; the config viewport is used when omitted.
    #[arg(long)]
    width: Option<f64>,

    /// Viewport height; the config viewport is used when omitted.
    #[arg(long)]
    height: Option<f64>,

    /// Scroll distance between events.
    #[arg(long, default_value_t = 120.0)]
    step: f64,

    /// JSON array of viewport events to replay instead of a full scroll sweep.
    #[arg(long)]
    events: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct JoinArgs {
    /// Address to register.
    #[arg(long)]
    email: String,

    /// Store file; overrides the config and `RETROSPECT_STORE_PATH`.
    #[arg(long)]
    store: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    match cli.cmd {
        Command::Frame(args) => cmd_frame(&config, args),
        Command::Tour(args) => cmd_tour(&config, args),
        Command::Join(args) => cmd_join(&config, args),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<retrospect::SiteConfig> {
    let config = match path {
        Some(p) => retrospect::SiteConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display()))?,
        None => retrospect::SiteConfig::default(),
    };
    Ok(config.with_env_overrides())
}

fn cmd_frame(config: &retrospect::SiteConfig, args: FrameArgs) -> anyhow::Result<()> {
    let state = retrospect::ViewportState::new(
        args.width.unwrap_or(config.viewport.width),
        args.height.unwrap_or(config.viewport.height),
        args.scroll,
    );
    if !state.is_measured() {
        anyhow::bail!("viewport {}x{} has no area", state.width, state.height);
    }
    let (w, h) = state.pixel_size();
    let background = (!args.transparent).then_some(retrospect::Rgba::BLACK);
    let mut surface = retrospect::CpuSurface::new(
        w,
        h,
        retrospect::CpuSurfaceOpts::default().with_background(background),
    )?;
    let renderer = retrospect::RadialFieldRenderer::new(config.field)?;
    let outcome = renderer.redraw(&state, &mut surface);
    tracing::info!(?outcome, width = w, height = h, "frame rendered");

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let frame = surface.frame().to_straight();
    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_tour(config: &retrospect::SiteConfig, args: TourArgs) -> anyhow::Result<()> {
    let mut config = config.clone();
    if let Some(width) = args.width {
        config.viewport.width = width;
    }
    if let Some(height) = args.height {
        config.viewport.height = height;
    }
    let mut page = retrospect::LandingPage::new(&config, retrospect::RecordingSurface::default())?;
    let mut events = match &args.events {
        Some(p) => {
            let raw = std::fs::read_to_string(p)
                .with_context(|| format!("read events '{}'", p.display()))?;
            retrospect::ScriptedEvents::from_json_str(&raw)?
        }
        None => retrospect::ScriptedEvents::scroll_sweep(0.0, page.max_scroll(), args.step)
            .context("build scroll sweep")?,
    };

    print_snapshot(&page)?;
    while let Some(event) = retrospect::EventSource::next_event(&mut events) {
        page.handle(event)?;
        print_snapshot(&page)?;
    }

    let stats = page.stats();
    eprintln!(
        "{} events, {} frames drawn, {} skipped",
        stats.events, stats.drawn, stats.skipped
    );
    Ok(())
}

fn print_snapshot<S: retrospect::Surface>(
    page: &retrospect::LandingPage<S>,
) -> anyhow::Result<()> {
    let line = serde_json::to_string(&page.snapshot()).context("serialize page snapshot")?;
    println!("{line}");
    Ok(())
}

fn cmd_join(config: &retrospect::SiteConfig, args: JoinArgs) -> anyhow::Result<()> {
    let path = args.store.unwrap_or_else(|| config.store_path.clone());
    let mut store = retrospect::JsonFileStore::open(&path)?;
    let response =
        retrospect::add_email(&mut store, &retrospect::SubmissionRequest::post_email(&args.email));
    println!(
        "{}",
        serde_json::to_string_pretty(&response).context("serialize response")?
    );
    if !response.is_success() {
        anyhow::bail!(
            "waitlist rejected the address (status {})",
            response.status
        );
    }
    Ok(())
}
