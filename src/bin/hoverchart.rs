use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use hoverchart::viz::{self, PointerEvent};
use hoverchart::{ChartConfig, ChartController, Loader, Page, create_plot};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "hoverchart",
    version,
    about = "Render time-series JSON documents as charts with a hover tooltip"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one chart to an SVG file.
    Render(RenderArgs),
    /// Write an HTML page with the chart mounted in a named container.
    Page(PageArgs),
    /// Print the tooltip labels for a pointer position.
    Probe(ProbeArgs),
}

#[derive(Args, Debug)]
struct Common {
    /// Path or http(s) URL of the series document.
    source: String,
    /// Container width in pixels.
    #[arg(long, default_value_t = 600)]
    width: u32,
    /// Optional TOML file with margins, tick counts and radii.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    common: Common,
    /// Id of the root svg element.
    #[arg(long, default_value = "chart")]
    id: String,
    /// Output file.
    #[arg(long, default_value = "chart.svg")]
    out: PathBuf,
    /// Show the tooltip as if the pointer were at this plot-area x.
    #[arg(long)]
    hover_x: Option<f64>,
}

#[derive(Args, Debug)]
struct PageArgs {
    #[command(flatten)]
    common: Common,
    /// Chart title; also the id of the chart's svg element.
    #[arg(long, default_value = "chart")]
    title: String,
    /// Id of the container the chart mounts into.
    #[arg(long, default_value = "plot")]
    container: String,
    /// Output file.
    #[arg(long, default_value = "page.html")]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct ProbeArgs {
    #[command(flatten)]
    common: Common,
    /// Pointer x in plot-area pixels.
    #[arg(long, allow_hyphen_values = true)]
    x: f64,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Page(args) => cmd_page(args),
        Command::Probe(args) => cmd_probe(args),
    }
}

fn load_config(common: &Common) -> Result<ChartConfig> {
    ChartConfig::load_or_default(common.config.as_deref()).context("loading chart config")
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let config = load_config(&args.common)?;
    let chart = viz::render_to_file(
        &args.common.source,
        &args.id,
        args.common.width,
        args.hover_x,
        config,
        &args.out,
    )?;
    let (w, h) = chart.surface().size();
    eprintln!("Wrote {}x{} chart to {}", w, h, args.out.display());
    Ok(())
}

fn cmd_page(args: PageArgs) -> Result<()> {
    let config = load_config(&args.common)?;
    let mut page = Page::new(args.title.clone()).with_container(&args.container, args.common.width);
    let outcome = create_plot(
        &mut page,
        &args.container,
        &Loader::default(),
        &args.common.source,
        &args.title,
        config,
    );
    // The page is written either way; a failed chart shows its error state.
    page.write_html(&args.out)?;
    eprintln!("Wrote page to {}", args.out.display());
    outcome.with_context(|| format!("chart `{}` could not be created", args.title))
}

fn cmd_probe(args: ProbeArgs) -> Result<()> {
    let config = load_config(&args.common)?;
    let mut chart = ChartController::load(
        &Loader::default(),
        &args.common.source,
        "probe",
        args.common.width,
        config,
    )?;
    chart.handle(PointerEvent::Enter);
    match chart.handle(PointerEvent::Move { x: args.x }) {
        Some(sample) => {
            println!("value={}", chart.value_label_text());
            println!("date={}", chart.date_label_text());
            println!(
                "sample={} {}",
                sample.timestamp.format(hoverchart::models::DATE_FORMAT),
                sample.value
            );
        }
        None => println!("no sample"),
    }
    Ok(())
}
