use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use figlayout::{FigureConfig, LayoutReport, Side, storage};

#[derive(Parser, Debug)]
#[command(
    name = "figlayout",
    version,
    about = "Solve figure layouts and render scatter figures"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the plotting rectangle (and optionally save a report).
    Layout(LayoutArgs),
    /// Render a configured figure to PNG or SVG.
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct FigureArgs {
    /// JSON figure configuration.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Canvas width in pixels (overrides the config).
    #[arg(long)]
    width: Option<f64>,
    /// Canvas height in pixels (overrides the config).
    #[arg(long)]
    height: Option<f64>,
    /// Minimum aspect ratio (width / height).
    #[arg(long)]
    min_aspect: Option<f64>,
    /// Maximum aspect ratio (width / height).
    #[arg(long)]
    max_aspect: Option<f64>,
    /// Figure title.
    #[arg(long)]
    title: Option<String>,
    /// Extra top padding in pixels (repeatable).
    #[arg(long = "top")]
    top: Vec<f64>,
    /// Extra bottom padding in pixels (repeatable).
    #[arg(long = "bottom")]
    bottom: Vec<f64>,
    /// Extra left padding in pixels (repeatable).
    #[arg(long = "left")]
    left: Vec<f64>,
    /// Extra right padding in pixels (repeatable).
    #[arg(long = "right")]
    right: Vec<f64>,
}

#[derive(Args, Debug)]
struct LayoutArgs {
    #[command(flatten)]
    figure: FigureArgs,
    /// Save the layout report (format from extension: .csv or .json).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    figure: FigureArgs,
    /// Output image (.png or .svg).
    #[arg(short, long)]
    out: PathBuf,
}

fn load_config(args: &FigureArgs) -> Result<FigureConfig> {
    let mut cfg = match &args.config {
        Some(path) => FigureConfig::from_path(path)?,
        None => FigureConfig::default(),
    };
    if let Some(w) = args.width {
        cfg.width = w;
    }
    if let Some(h) = args.height {
        cfg.height = h;
    }
    if args.min_aspect.is_some() {
        cfg.model.min_aspect_ratio = args.min_aspect;
    }
    if args.max_aspect.is_some() {
        cfg.model.max_aspect_ratio = args.max_aspect;
    }
    if let Some(t) = &args.title {
        cfg.model.title = t.clone();
    }
    for (side, paddings) in [
        (Side::Top, &args.top),
        (Side::Bottom, &args.bottom),
        (Side::Left, &args.left),
        (Side::Right, &args.right),
    ] {
        for p in paddings {
            cfg.decorators.push(figlayout::config::DecoratorConfig {
                side,
                padding: *p,
            });
        }
    }
    Ok(cfg)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Layout(args) => cmd_layout(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn cmd_layout(args: LayoutArgs) -> Result<()> {
    let cfg = load_config(&args.figure)?;
    let figure = cfg.build().context("building figure")?;
    let layout = figure.layout().context("solving layout")?;
    let g = layout.geometry;
    println!(
        "width={} height={} x={} y={}",
        g.width, g.height, g.x, g.y
    );

    if let Some(path) = args.out.as_ref() {
        let report = LayoutReport::new(figure.canvas(), figure.model(), &layout);
        storage::save_report(&[report], path)?;
        eprintln!("Saved layout report to {}", path.display());
    }
    Ok(())
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let cfg = load_config(&args.figure)?;
    let mut figure = cfg.build().context("building figure")?;
    figure.flush_animations();

    let ext = args
        .out
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("png")
        .to_ascii_lowercase();
    match ext.as_str() {
        "svg" => {
            let svg = figure.render_svg()?;
            std::fs::write(&args.out, svg)
                .with_context(|| format!("writing {}", args.out.display()))?;
        }
        "png" => figure.rasterize()?.save_png(&args.out)?,
        other => anyhow::bail!("unsupported image format: {}", other),
    }
    eprintln!("Wrote figure to {}", args.out.display());
    Ok(())
}
