//! # Slotframe CLI
//!
//! Command-line interface for rendering and uploading display frames.
//!
//! ## Usage
//!
//! ```bash
//! # Render text into slot 2 with an automatic font size
//! slotframe --slot 2 --text "Hello <b>world</b>"
//!
//! # Fixed size, coloured, outlined, left aligned
//! slotframe --text "Gate 4" --font-size large --font-color red --text-stroke --text-align left
//!
//! # Gradient background from the scheme colour to navy
//! slotframe --text "Welcome" --color-scheme blue --gradient --gradient-end navy
//!
//! # Upload an existing photo (cropped and resized to 240x240)
//! slotframe --slot 3 --file photo.jpg
//!
//! # Render and keep a local copy without touching the device
//! slotframe --text "Preview" --dry-run --save-local
//!
//! # Is the display reachable?
//! slotframe --check
//!
//! # Legacy forms
//! slotframe 1 photo.png
//! slotframe 1 text "Hello"
//! ```

use clap::Parser;
use log::{info, warn};
use std::path::PathBuf;

use slotframe::{
    SlotframeError,
    config::{ColorScheme, Config, Padding, named_font_size},
    fonts::FontSet,
    layout::{Align, SizeMode},
    render::{
        self, Background, ColorResolver, GradientDirection, GradientSpec, StrokeRequest,
        TextFrame, encode,
    },
    transport::{DisplayClient, Slot},
};

/// File extensions accepted by the legacy `<slot> <file>` form
const LEGACY_EXTENSIONS: [&str; 5] = [".jpg", ".jpeg", ".png", ".gif", ".bmp"];

/// Slotframe - Generate and upload images to a slot display
#[derive(Parser, Debug)]
#[command(name = "slotframe")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Display slot number
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=5))]
    slot: u8,

    /// Text to display (supports <b>, <i>, <u>)
    #[arg(long, conflicts_with = "file", required_unless_present_any = ["file", "check"])]
    text: Option<String>,

    /// Image file to upload instead of text
    #[arg(long, value_name = "IMAGE")]
    file: Option<PathBuf>,

    /// Font size: auto, a number, or small/medium/large/xlarge
    #[arg(long, default_value = "auto")]
    font_size: String,

    /// TrueType font file (bold/italic variants are looked up beside it)
    #[arg(long, value_name = "TTF")]
    font: Option<PathBuf>,

    /// Text color (name, #RRGGBB, or r,g,b)
    #[arg(long)]
    font_color: Option<String>,

    /// Background and default text colors
    #[arg(long, value_enum, default_value_t = ColorScheme::Default)]
    color_scheme: ColorScheme,

    /// Text alignment
    #[arg(long, value_enum, default_value_t = Align::Center)]
    text_align: Align,

    #[arg(long, value_enum, hide = true)]
    alignment: Option<Align>,

    /// Outline the text
    #[arg(long)]
    text_stroke: bool,

    /// Outline width in pixels (0 = automatic)
    #[arg(
        long,
        default_value_t = 0,
        value_parser = clap::value_parser!(u32).range(0..=render::MAX_STROKE_WIDTH as i64)
    )]
    stroke_width: u32,

    /// Outline color (name, #RRGGBB, or r,g,b)
    #[arg(long)]
    stroke_color: Option<String>,

    /// Never add an outline automatically
    #[arg(long)]
    no_auto_stroke: bool,

    /// Parse <b>, <i>, <u> tags even when none is detected
    #[arg(long)]
    html: bool,

    /// Padding on all four sides
    #[arg(long)]
    padding: Option<u32>,

    #[arg(long)]
    padding_top: Option<u32>,

    #[arg(long)]
    padding_bottom: Option<u32>,

    #[arg(long)]
    padding_left: Option<u32>,

    #[arg(long)]
    padding_right: Option<u32>,

    /// Gradient background (scheme background to --gradient-end)
    #[arg(long)]
    gradient: bool,

    /// Gradient end color
    #[arg(long)]
    gradient_end: Option<String>,

    #[arg(long, value_enum, default_value_t = GradientDirection::Vertical)]
    gradient_direction: GradientDirection,

    /// Save the JPEG locally before uploading
    #[arg(long)]
    save_local: bool,

    /// Directory for --save-local
    #[arg(long, default_value = "generated_images")]
    save_dir: PathBuf,

    /// Display device URL
    #[arg(long)]
    base_url: Option<String>,

    /// JSON configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Render without uploading
    #[arg(long)]
    dry_run: bool,

    /// Only check that the display is reachable
    #[arg(long)]
    check: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), SlotframeError> {
    let args: Vec<String> = std::env::args().collect();
    let cli = match legacy_argv(args.get(1..).unwrap_or_default()) {
        Some(argv) => {
            info!("Legacy invocation, running as: {}", argv[1..].join(" "));
            Cli::parse_from(argv)
        }
        None => Cli::parse(),
    };

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(url) = &cli.base_url {
        config.display = config.display.with_base_url(url.as_str());
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(execute(cli, config))
}

async fn execute(cli: Cli, config: Config) -> Result<(), SlotframeError> {
    let client = DisplayClient::new(config.display.clone())?;

    if cli.check {
        return if client.check_connection().await {
            println!("Display at {} is reachable", config.display.base_url);
            Ok(())
        } else {
            Err(SlotframeError::Transport(format!(
                "Display at {} is not reachable",
                config.display.base_url
            )))
        };
    }

    let slot = Slot::new(cli.slot)?;
    let jpeg = if let Some(path) = &cli.file {
        let image = encode::prepare_file(path, config.display.width, config.display.height)?;
        encode::to_jpeg(&image, config.display.jpeg_quality)?
    } else {
        let text = cli.text.as_deref().unwrap_or_default();
        let font_path = cli.font.as_deref().or(config.image.font_path.as_deref());
        let fonts = FontSet::discover(font_path)?;
        let frame = render::generate(&text_frame(&cli, text, &config)?, &config, &fonts)?;
        encode::to_jpeg(&frame.image, config.display.jpeg_quality)?
    };

    if cli.save_local {
        let path = encode::save_locally(&jpeg, &cli.save_dir, slot)?;
        println!("Image saved locally: {}", path.display());
    }

    if cli.dry_run {
        println!("Dry run: not uploading ({} bytes for slot {})", jpeg.len(), slot);
        return Ok(());
    }

    let receipt = client.upload(slot, jpeg).await?;
    println!("Success: uploaded {} to slot {}", receipt.filename, receipt.slot);
    println!("  Status: {}", receipt.status);
    println!("  Response: {}", receipt.message);
    Ok(())
}

fn text_frame(cli: &Cli, text: &str, config: &Config) -> Result<TextFrame, SlotframeError> {
    let resolver = ColorResolver::default();
    let scheme = cli.color_scheme;

    let text_color = match &cli.font_color {
        Some(spec) => resolver.resolve(spec)?,
        None => scheme.text(),
    };

    let background = match (cli.gradient, &cli.gradient_end) {
        (true, Some(end)) => Background::Gradient(GradientSpec {
            start: scheme.background(),
            end: resolver.resolve(end)?,
            direction: cli.gradient_direction,
        }),
        (true, None) => {
            warn!("--gradient needs --gradient-end; using a solid background");
            Background::Solid(scheme.background())
        }
        (false, _) => Background::Solid(scheme.background()),
    };

    let stroke = StrokeRequest {
        enabled: cli.text_stroke,
        width: cli.stroke_width,
        color: cli
            .stroke_color
            .as_deref()
            .map(|spec| resolver.resolve(spec))
            .transpose()?,
        auto: !cli.no_auto_stroke,
    };

    let mut frame = TextFrame::new(text)
        .with_size(parse_size_mode(&cli.font_size, config.image.default_font_size))
        .with_align(cli.alignment.unwrap_or(cli.text_align))
        .with_colors(text_color, background)
        .with_stroke(stroke)
        .with_padding(resolve_padding(cli, config.image.padding));
    frame.force_markup = cli.html;
    Ok(frame)
}

/// `auto`, `default`, a named size, or an integer. Anything else falls
/// back to auto sizing with a warning.
fn parse_size_mode(value: &str, default_size: u32) -> SizeMode {
    let value = value.trim().to_ascii_lowercase();
    if value == "auto" {
        return SizeMode::Auto;
    }
    if value == "default" {
        return SizeMode::Fixed(default_size);
    }
    if let Some(size) = named_font_size(&value) {
        return SizeMode::Fixed(size);
    }
    match value.parse::<u32>() {
        Ok(size) => SizeMode::Fixed(size),
        Err(_) => {
            warn!("Invalid font size '{}', using auto", value);
            SizeMode::Auto
        }
    }
}

/// `--padding` sets every side; individual flags win over it.
fn resolve_padding(cli: &Cli, base: Padding) -> Padding {
    let base = cli.padding.map(Padding::uniform).unwrap_or(base);
    Padding {
        top: cli.padding_top.unwrap_or(base.top),
        bottom: cli.padding_bottom.unwrap_or(base.bottom),
        left: cli.padding_left.unwrap_or(base.left),
        right: cli.padding_right.unwrap_or(base.right),
    }
}

/// Rewrite `<slot> <image>` and `<slot> text "<text>"` into flag form.
fn legacy_argv(args: &[String]) -> Option<Vec<String>> {
    let slot = args.first()?;
    if slot.starts_with("--") || !slot.parse::<u8>().is_ok_and(|n| (1..=5).contains(&n)) {
        return None;
    }

    let mut argv = vec!["slotframe".to_string(), "--slot".to_string(), slot.clone()];
    match args {
        [_, file] if has_legacy_extension(file) => {
            argv.extend(["--file".to_string(), file.clone()]);
        }
        [_, keyword, text] if keyword == "text" => {
            argv.extend([
                "--text".to_string(),
                text.clone(),
                "--font-size".to_string(),
                "default".to_string(),
            ]);
        }
        _ => return None,
    }
    Some(argv)
}

fn has_legacy_extension(file: &str) -> bool {
    let lower = file.to_ascii_lowercase();
    LEGACY_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}
