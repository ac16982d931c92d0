use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use progressive_blur::{
    BackendKind, BackendSettings, BlurConfig, BlurType, BlurWorker, BlurWorkerOpts, Ease,
    SAMPLE_HEIGHT, SAMPLE_WIDTH, create_backend, list_easings, load_image, sample_image,
    save_png,
};

#[derive(Parser, Debug)]
#[command(name = "progblur", version, about = "Progressive vertical blur for images")]
struct Cli {
    /// Log kernel statistics and per-request details.
    #[arg(long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Blur an image (or the built-in sample) and write a PNG.
    Blur(BlurArgs),
    /// Write the built-in sample image as a PNG.
    Sample(SampleArgs),
    /// List easing identifiers, one per line.
    Easings,
    /// Print the default blur config as JSON.
    Config,
}

#[derive(Parser, Debug)]
struct BlurArgs {
    /// Input image. The built-in sample is used when omitted.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Blur config JSON. Flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Kernel shape: none, linear or gaussian.
    #[arg(long)]
    blur_type: Option<BlurType>,

    /// Top of the ramp as a fraction of the height.
    #[arg(long)]
    start: Option<f64>,

    /// Bottom of the ramp as a fraction of the height.
    #[arg(long)]
    end: Option<f64>,

    /// Kernel width at the bottom of the ramp (1..=499).
    #[arg(long)]
    max_kernel_size: Option<u32>,

    /// Ramp curve: linear, easeIn, easeOut or easeInOut.
    #[arg(long)]
    easing: Option<Ease>,

    /// Blur color weighted by alpha.
    #[arg(long, default_value_t = false)]
    premultiply_alpha: bool,

    /// Pass the image through untouched.
    #[arg(long, default_value_t = false)]
    disable: bool,

    /// Override rayon worker threads.
    #[arg(long)]
    threads: Option<usize>,

    /// Run both passes on a single thread.
    #[arg(long, default_value_t = false)]
    serial: bool,
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Sample width in pixels.
    #[arg(long, default_value_t = SAMPLE_WIDTH)]
    width: u32,

    /// Sample height in pixels.
    #[arg(long, default_value_t = SAMPLE_HEIGHT)]
    height: u32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Blur(args) => cmd_blur(args),
        Command::Sample(args) => cmd_sample(args),
        Command::Easings => {
            for id in list_easings() {
                println!("{id}");
            }
            Ok(())
        }
        Command::Config => {
            let json = serde_json::to_string_pretty(&BlurConfig::default())
                .context("serialize default config")?;
            println!("{json}");
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn resolve_config(args: &BlurArgs) -> anyhow::Result<BlurConfig> {
    let mut config = match &args.config {
        Some(path) => BlurConfig::from_path(path)?,
        None => BlurConfig::default(),
    };
    if let Some(t) = args.blur_type {
        config.blur_type = t;
    }
    if let Some(v) = args.start {
        config.start_point = v;
    }
    if let Some(v) = args.end {
        config.end_point = v;
    }
    if let Some(v) = args.max_kernel_size {
        config.max_kernel_size = v;
    }
    if let Some(e) = args.easing {
        config.easing = e;
    }
    if args.premultiply_alpha {
        config.premultiply_alpha = true;
    }
    if args.disable {
        config.enabled = false;
    }
    Ok(config)
}

fn cmd_blur(args: BlurArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args)?;
    let src = match &args.in_path {
        Some(path) => load_image(path)?,
        None => sample_image(SAMPLE_WIDTH, SAMPLE_HEIGHT)?,
    };

    let kind = if args.serial {
        BackendKind::CpuSerial
    } else {
        BackendKind::Cpu
    };
    let backend = create_backend(
        kind,
        &BackendSettings {
            threads: args.threads,
        },
    )?;
    let mut worker = BlurWorker::spawn(backend, BlurWorkerOpts::default())?;

    let started = Instant::now();
    worker.submit(src, config)?;
    let out = worker.wait_latest()?;
    tracing::info!(
        width = out.width(),
        height = out.height(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "blur finished"
    );

    save_png(&args.out, &out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let img = sample_image(args.width, args.height)?;
    save_png(&args.out, &img)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}
