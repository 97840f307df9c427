use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "atomreel", version, about = "Render the atomic models animation")]
struct Cli {
    /// Log at DEBUG level.
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the full video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StyleArg {
    Classic,
    Enhanced,
}

impl From<StyleArg> for atomreel::Style {
    fn from(s: StyleArg) -> Self {
        match s {
            StyleArg::Classic => Self::Classic,
            StyleArg::Enhanced => Self::Enhanced,
        }
    }
}

#[derive(Parser, Debug)]
struct ConfigArgs {
    /// Visual style; overrides the config file.
    #[arg(long, value_enum)]
    style: Option<StyleArg>,

    /// JSON config overlay.
    #[arg(long)]
    config: Option<PathBuf>,
}

impl ConfigArgs {
    fn load(&self) -> anyhow::Result<atomreel::VideoConfig> {
        let mut cfg = match &self.config {
            Some(path) => atomreel::VideoConfig::from_json_path(path)
                .with_context(|| format!("load config '{}'", path.display()))?,
            None => atomreel::VideoConfig::default(),
        };
        if let Some(style) = self.style {
            cfg.style = style.into();
        }
        Ok(cfg)
    }
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Background audio file.
    #[arg(long)]
    audio: Option<PathBuf>,

    /// Output MP4 path.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Render chunk size.
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
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

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut cfg = args.config.load()?;
    if let Some(audio) = args.audio {
        cfg.audio_path = audio;
    }
    if let Some(out) = args.out {
        cfg.out_path = Some(out);
    }

    let threading = atomreel::RenderThreading {
        parallel: args.parallel,
        chunk_size: args.chunk_size,
        threads: args.threads,
    };
    let report = atomreel::run(&cfg, &atomreel::FfmpegEncoder, &threading)
        .context("render video")?;

    println!("{}", cfg.style.completion_message(&report.out_path));
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = args.config.load()?;
    let frame = atomreel::render_still(&cfg, atomreel::FrameIndex(args.frame))?;
    let rgba = unpremultiply(&frame);

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &rgba,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn unpremultiply(frame: &atomreel::FrameRGBA) -> Vec<u8> {
    let mut out = frame.data.clone();
    if !frame.premultiplied {
        return out;
    }
    for px in out.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
    out
}
