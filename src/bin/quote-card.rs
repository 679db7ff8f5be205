use std::{io::Read as _, path::PathBuf};

use anyhow::Context as _;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "quote-card", version, about = "Render a chat message as a quote card PNG")]
struct Cli {
    /// Output PNG path.
    out: PathBuf,

    /// Input request JSON (defaults to stdin).
    #[arg(long = "input")]
    input: Option<PathBuf>,

    /// Regular font file (falls back to $QUOTE_CARD_FONT).
    #[arg(long)]
    font: Option<PathBuf>,

    /// Bold font file (falls back to $QUOTE_CARD_BOLD_FONT).
    #[arg(long)]
    bold_font: Option<PathBuf>,

    /// Monospace font for code spans (falls back to $QUOTE_CARD_MONO_FONT).
    #[arg(long)]
    mono_font: Option<PathBuf>,

    /// Keep the composed size instead of fitting into `width x width`.
    #[arg(long, default_value_t = false)]
    no_fit: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let json = read_input(cli.input.as_deref())?;
    let request = quote_card::QuoteRequest::from_json(&json)?;

    let fonts = quote_card::FontConfig::resolve(
        cli.font.as_deref(),
        cli.bold_font.as_deref(),
        cli.mono_font.as_deref(),
    )?;
    let mut text = quote_card::ParleyTextRenderer::new(fonts)?;

    let card = quote_card::generate(&request, &mut text, &quote_card::FsAvatarLoader)?;
    let card = if cli.no_fit {
        card
    } else {
        let side = quote_card::RenderOptions::from_request(&request).width;
        card.scaled_to_fit(side, side)?
    };

    if let Some(parent) = cli.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let img = card.to_rgba_image()?;
    image::save_buffer_with_format(
        &cli.out,
        img.as_raw(),
        img.width(),
        img.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", cli.out.display()))?;

    eprintln!("wrote {} ({}x{})", cli.out.display(), img.width(), img.height());
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

fn read_input(path: Option<&std::path::Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("read input '{}'", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("read request from stdin")?;
            Ok(buf)
        }
    }
}
