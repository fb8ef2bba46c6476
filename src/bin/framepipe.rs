use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use framepipe::{
    AudioFormat, ColourProducer, Fps, Frame, FrameResult, Image, ImageFormat, ImageRequest,
    Profile, sample_calculator, sample_calculator_to_now, samples_before,
};

#[derive(Parser, Debug)]
#[command(name = "framepipe", version)]
struct Cli {
    /// Log pipeline activity to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the image and audio format codes.
    Formats,
    /// Print per-frame audio sample counts.
    Samples(SamplesArgs),
    /// Resolve one test-pattern frame and write its image as a PNG.
    Frame(FrameArgs),
    /// Render a test-pattern frame's audio as a waveform PNG.
    Waveform(WaveformArgs),
}

#[derive(Parser, Debug)]
struct SamplesArgs {
    /// Frame rate, e.g. `25`, `30000/1001` or `29.97`.
    #[arg(long, default_value = "25")]
    fps: Fps,

    /// Audio sample rate in Hz.
    #[arg(long, default_value_t = 48_000)]
    frequency: u32,

    /// First frame position.
    #[arg(long, default_value_t = 0)]
    start: i64,

    /// Number of frames.
    #[arg(long, default_value_t = 10)]
    count: u32,

    /// Emit JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Frame position.
    #[arg(long, default_value_t = 0)]
    position: i64,

    /// Pixel layout to resolve the frame in before writing it out.
    #[arg(long, default_value = "yuv422")]
    format: ImageFormat,

    /// Fill colour as `r,g,b,a`.
    #[arg(long, default_value = "32,96,160,255", value_parser = parse_rgba)]
    colour: [u8; 4],

    /// Profile JSON; PAL defaults when omitted.
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct WaveformArgs {
    /// Frame position.
    #[arg(long, default_value_t = 0)]
    position: i64,

    /// Tone frequency in Hz.
    #[arg(long, default_value_t = 440.0)]
    tone: f64,

    /// Tone amplitude in `[0, 1]`.
    #[arg(long, default_value_t = 0.8)]
    amplitude: f64,

    /// Image width.
    #[arg(long, default_value_t = 720)]
    width: u32,

    /// Image height.
    #[arg(long, default_value_t = 200)]
    height: u32,

    /// Profile JSON; PAL defaults when omitted.
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(serde::Serialize)]
struct SampleRow {
    position: i64,
    samples: u32,
    start: i64,
    total: i64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    }
    match cli.cmd {
        Command::Formats => cmd_formats(),
        Command::Samples(args) => cmd_samples(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Waveform(args) => cmd_waveform(args),
    }
}

fn parse_rgba(s: &str) -> Result<[u8; 4], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [r, g, b, a] = parts.as_slice() else {
        return Err(format!("expected r,g,b,a, got '{s}'"));
    };
    let channel = |v: &str| v.parse::<u8>().map_err(|e| format!("bad channel '{v}': {e}"));
    Ok([channel(*r)?, channel(*g)?, channel(*b)?, channel(*a)?])
}

fn load_profile(path: Option<&Path>) -> anyhow::Result<Profile> {
    match path {
        Some(path) => Profile::from_path(path)
            .with_context(|| format!("load profile '{}'", path.display())),
        None => Ok(Profile::default()),
    }
}

fn ensure_parent(out: &Path) -> anyhow::Result<()> {
    if let Some(parent) = out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_formats() -> anyhow::Result<()> {
    println!("image formats:");
    for format in ImageFormat::ALL {
        println!("  {:>2}  {format}", format.code());
    }
    println!("audio formats:");
    for format in AudioFormat::ALL {
        println!(
            "  {:>2}  {:<7} {} bytes/sample{}",
            format.code(),
            format.name(),
            format.bytes_per_sample(),
            if format.is_planar() { ", planar" } else { "" }
        );
    }
    Ok(())
}

fn cmd_samples(args: SamplesArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.frequency > 0, "frequency must be non-zero");
    let rows: Vec<SampleRow> = (0..i64::from(args.count))
        .map(|i| {
            let position = args.start + i;
            SampleRow {
                position,
                samples: sample_calculator(args.fps, args.frequency, position),
                start: samples_before(args.fps, args.frequency, position),
                total: sample_calculator_to_now(args.fps, args.frequency, position),
            }
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!(
        "fps {} ({:.3} ms/frame) @ {} Hz",
        args.fps,
        args.fps.frame_duration_secs() * 1000.0,
        args.frequency
    );
    println!("{:>10} {:>8} {:>12} {:>12}", "position", "samples", "start", "total");
    for row in &rows {
        println!(
            "{:>10} {:>8} {:>12} {:>12}",
            row.position, row.samples, row.start, row.total
        );
    }
    Ok(())
}

/// Test-pattern filter: darkens the lower half of whatever sits below it on the stack.
fn push_lower_half_shade(frame: &mut Frame) {
    frame.push_get_image(|frame: &mut Frame, request: &ImageRequest| -> FrameResult<Image> {
        let mut image = frame.get_image(&ImageRequest {
            format: ImageFormat::Rgb24a,
            ..*request
        })?;
        let (w, h) = (image.width as usize, image.height as usize);
        for px in image.data_mut()[(h / 2) * w * 4..].chunks_exact_mut(4) {
            for c in &mut px[..3] {
                *c /= 2;
            }
        }
        Ok(image)
    });
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let profile = load_profile(args.profile.as_deref())?;
    let producer = Arc::new(ColourProducer::new(profile, args.colour));
    let mut frame = producer.get_frame(args.position);
    push_lower_half_shade(&mut frame);

    let mut resolved = frame
        .get_image(&ImageRequest::new(args.format))
        .with_context(|| format!("resolve frame {} as {}", args.position, args.format))?;
    frame.convert_image(&mut resolved, ImageFormat::Rgb24a)?;
    frame.close();

    ensure_parent(&args.out)?;
    let (width, height) = (resolved.width, resolved.height);
    let rgba = image::RgbaImage::from_raw(width, height, resolved.into_data())
        .context("image buffer does not match its size")?;
    rgba.save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_waveform(args: WaveformArgs) -> anyhow::Result<()> {
    let profile = load_profile(args.profile.as_deref())?;
    let producer =
        Arc::new(ColourProducer::new(profile, [0, 0, 0, 255]).with_tone(args.tone, args.amplitude));
    let mut frame = producer.get_frame(args.position);

    let waveform = frame
        .get_waveform(args.width, args.height)
        .with_context(|| format!("render waveform of frame {}", args.position))?;

    ensure_parent(&args.out)?;
    waveform
        .save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
