use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "maskblend", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite a base image through a mask and write a PNG.
    Composite(CompositeArgs),
    /// Print the default parameter JSON.
    Params,
}

#[derive(Parser, Debug)]
struct CompositeArgs {
    /// Base (color) image.
    #[arg(long)]
    base: PathBuf,

    /// Mask image; its alpha channel drives opacity.
    #[arg(long)]
    mask: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Parameter JSON; omitted fields use defaults.
    #[arg(long)]
    params: Option<PathBuf>,

    /// Override the blend mode from the parameter file.
    #[arg(long, value_enum)]
    blend: Option<BlendChoice>,

    /// Stage preset.
    #[arg(long, value_enum, default_value_t = PresetChoice::Optimized)]
    preset: PresetChoice,

    /// Worker threads; enables row-parallel compositing.
    #[arg(long)]
    threads: Option<usize>,

    /// Write straight (unpremultiplied) alpha instead of premultiplied.
    #[arg(long)]
    straight_alpha: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PresetChoice {
    Fast,
    Optimized,
    Quality,
}

impl From<PresetChoice> for maskblend::Preset {
    fn from(choice: PresetChoice) -> Self {
        match choice {
            PresetChoice::Fast => maskblend::Preset::Fast,
            PresetChoice::Optimized => maskblend::Preset::Optimized,
            PresetChoice::Quality => maskblend::Preset::Quality,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BlendChoice {
    Normal,
    Multiply,
    Screen,
    Overlay,
}

impl From<BlendChoice> for maskblend::BlendMode {
    fn from(choice: BlendChoice) -> Self {
        match choice {
            BlendChoice::Normal => maskblend::BlendMode::Normal,
            BlendChoice::Multiply => maskblend::BlendMode::Multiply,
            BlendChoice::Screen => maskblend::BlendMode::Screen,
            BlendChoice::Overlay => maskblend::BlendMode::Overlay,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Composite(args) => cmd_composite(args),
        Command::Params => cmd_params(),
    }
}

fn cmd_composite(args: CompositeArgs) -> anyhow::Result<()> {
    let mut params = match &args.params {
        Some(path) => maskblend::CompositeParams::from_json_file(path)?,
        None => maskblend::CompositeParams::default(),
    };
    if let Some(blend) = args.blend {
        params.blend_mode = blend.into();
    }

    let base = maskblend::load_image(&args.base)
        .with_context(|| format!("load base '{}'", args.base.display()))?;
    let mask = maskblend::load_image(&args.mask)
        .with_context(|| format!("load mask '{}'", args.mask.display()))?;

    let threading = match args.threads {
        Some(n) => maskblend::Threading::parallel(Some(n)),
        None => maskblend::Threading::default(),
    };
    let out = maskblend::composite_with(&base, &mask, &params, args.preset.into(), &threading)?;

    let alpha = if args.straight_alpha {
        tracing::warn!("unpremultiplying output; fully transparent pixels lose their color");
        maskblend::AlphaExport::Straight
    } else {
        maskblend::AlphaExport::Premultiplied
    };
    maskblend::save_png(&args.out, &out, alpha)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_params() -> anyhow::Result<()> {
    let json = maskblend::CompositeParams::default().to_json_pretty()?;
    println!("{json}");
    Ok(())
}
