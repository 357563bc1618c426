use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "leatherband", version)]
struct Cli {
    /// Log verbosity written to stderr (error, warn, info, debug, trace).
    #[arg(long, global = true, default_value = "error")]
    log_level: tracing::Level,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a band preset to a PNG.
    Render(RenderArgs),
    /// Report the name-plate region detected in a background image.
    Detect(DetectArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Band preset JSON. Relative image paths resolve against its directory.
    #[arg(long)]
    preset: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Name to print on the plate.
    #[arg(long)]
    name: Option<String>,

    /// TrueType/OpenType font used for the name (required with `--name`).
    #[arg(long)]
    font: Option<PathBuf>,

    /// Name font size in pixels.
    #[arg(long, default_value_t = leatherband::DEFAULT_NAME_SIZE_PX)]
    font_size: u32,
}

#[derive(Parser, Debug)]
struct DetectArgs {
    /// Background image to analyze.
    #[arg(long)]
    background: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(cli.log_level)
        .init();

    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Detect(args) => cmd_detect(args),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let band = leatherband::BandConfig::from_path(&args.preset)?;
    band.validate()?;

    let root = args.preset.parent().unwrap_or_else(|| Path::new("."));
    let source = leatherband::FsImageSource::with_root(root);

    let mut font = match (&args.name, &args.font) {
        (Some(name), Some(font)) if !name.is_empty() => Some(
            leatherband::NameFont::from_path(font)
                .with_context(|| format!("load font '{}'", font.display()))?,
        ),
        (Some(name), None) if !name.is_empty() => {
            anyhow::bail!("--name requires --font");
        }
        _ => None,
    };

    let name = match (&args.name, font.as_mut()) {
        (Some(text), Some(font)) => Some(leatherband::NameRequest {
            text,
            font,
            size_px: args.font_size,
        }),
        _ => None,
    };

    let rendered = leatherband::render(&band, &source, name)?;
    for warning in &rendered.warnings {
        eprintln!("warning: {warning}");
    }
    if rendered.overflows_top() {
        eprintln!(
            "warning: badge stack overflows the top edge (next_y = {})",
            rendered.next_y
        );
    }

    rendered.save_png(&args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_detect(args: DetectArgs) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.background)
        .with_context(|| format!("read background '{}'", args.background.display()))?;
    let background = leatherband::decode_image(&bytes)?;

    match leatherband::detect(&background) {
        Some(region) => {
            let b = region.bbox;
            println!(
                "name plate: x0={} y0={} x1={} y1={} ({}x{})",
                b.x0,
                b.y0,
                b.x1,
                b.y1,
                b.width(),
                b.height()
            );
        }
        None => println!("no name plate found"),
    }
    Ok(())
}
