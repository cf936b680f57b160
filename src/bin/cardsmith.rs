use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "cardsmith", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Photo card: photo on top, gradient, logo, styled text and a source caption.
    Gradient(GradientArgs),
    /// Text-only card: centered uppercase lines, accented after the first empty line.
    Title(TitleArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Assets root (fonts and template images). Ignored when `--config` sets one.
    #[arg(long, default_value = ".")]
    assets: PathBuf,

    /// JSON studio config overriding the built-in card layout.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Template text, markup included.
    #[arg(long, conflicts_with = "template_file", required_unless_present = "template_file")]
    template: Option<String>,

    /// Read the template text from a file.
    #[arg(long)]
    template_file: Option<PathBuf>,

    /// Output PNG path. Defaults to `<out-dir>/card_<unix-millis>.png`.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Directory for timestamped output when `--out` is not given.
    #[arg(long, default_value = "cards")]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct GradientArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// User photo (PNG, JPEG, WebP, ...).
    #[arg(long)]
    photo: PathBuf,

    /// Source caption, e.g. "Photo: Channel One".
    #[arg(long, default_value = "")]
    caption: String,
}

#[derive(Args, Debug)]
struct TitleArgs {
    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Gradient(args) => cmd_gradient(args),
        Command::Title(args) => cmd_title(args),
    }
}

fn cmd_gradient(args: GradientArgs) -> anyhow::Result<()> {
    let photo = std::fs::read(&args.photo)
        .with_context(|| format!("read photo '{}'", args.photo.display()))?;
    let template = read_template(&args.common)?;
    let request = cardsmith::CardRequest::gradient(photo, template, args.caption);
    run(&args.common, &request)
}

fn cmd_title(args: TitleArgs) -> anyhow::Result<()> {
    let template = read_template(&args.common)?;
    run(&args.common, &cardsmith::CardRequest::title(template))
}

fn run(common: &CommonArgs, request: &cardsmith::CardRequest) -> anyhow::Result<()> {
    let config = match &common.config {
        Some(path) => cardsmith::StudioConfig::from_path(path)?,
        None => cardsmith::StudioConfig::with_root(&common.assets),
    };
    let studio = cardsmith::CardStudio::open(config)?;

    let path = match &common.out {
        Some(out) => {
            let card = studio.generate(request)?;
            cardsmith::write_png_atomic(out, &card.png)?;
            out.clone()
        }
        None => studio.generate_to_dir(request, &common.out_dir)?,
    };

    eprintln!("wrote {}", path.display());
    Ok(())
}

fn read_template(common: &CommonArgs) -> anyhow::Result<String> {
    match (&common.template, &common.template_file) {
        (Some(text), _) => Ok(text.clone()),
        (None, Some(path)) => read_text(path),
        (None, None) => anyhow::bail!("either --template or --template-file is required"),
    }
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read template '{}'", path.display()))
}
