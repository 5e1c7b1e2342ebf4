//! Thin binary wrapper speaking pandoc's JSON filter protocol.
//!
//! Pandoc pipes the document through a filter as JSON on stdin/stdout and
//! passes the target output format as the sole positional argument. All
//! logic lives in the library; this wrapper only parses the command line,
//! sets up logging, and moves the bytes.
//!
//! Use with pandoc:
//!
//! ```sh
//! pandoc notes.md --filter longan -o notes.docx
//! ```
//!
//! or as a bare pipe stage:
//!
//! ```sh
//! pandoc -t json notes.md | longan | pandoc -f json -o notes.docx
//! ```
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};

use longan::ast::Pandoc;
use longan::{FailureMode, MathRenderer, RenderOptions, render_math_images};

#[derive(Parser)]
#[command(
    name = "longan",
    version,
    about = "Pandoc filter that rasterizes display math into PNG images",
    long_about = "Reads a pandoc JSON document on stdin, replaces every display-math \
                  node with a reference to a rendered PNG, and writes the document to \
                  stdout. Requires a LaTeX engine with the `preview` package and an \
                  ImageMagick-style converter on PATH."
)]
struct Cli {
    /// Target output format, passed by pandoc when invoked via --filter.
    /// Empty when running as a bare pipe stage.
    format: Option<String>,

    /// Directory rendered images are stored in, relative to the current
    /// working directory. Never cleaned up; entries accumulate.
    #[arg(long, default_value = "latex_images")]
    output_dir: PathBuf,

    /// Rasterization density in DPI
    #[arg(long, default_value_t = 600)]
    density: u32,

    /// PNG compression quality
    #[arg(long, default_value_t = 100)]
    quality: u32,

    /// Trim the rendered image to its content box
    #[arg(long)]
    trim: bool,

    /// What to do when an equation fails to render
    #[arg(long, value_enum, default_value = "abort")]
    on_error: OnError,

    /// LaTeX engine executable
    #[arg(long, env = "LONGAN_LATEX", default_value = "pdflatex")]
    latex: String,

    /// Rasterizer executable
    #[arg(long, env = "LONGAN_RASTERIZER", default_value = "convert")]
    rasterizer: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OnError {
    /// Fail the whole run on the first broken equation
    Abort,
    /// Keep broken equations as math nodes
    Keep,
    /// Replace broken equations with a code placeholder
    Placeholder,
}

impl From<OnError> for FailureMode {
    fn from(mode: OnError) -> Self {
        match mode {
            OnError::Abort => FailureMode::Abort,
            OnError::Keep => FailureMode::Keep,
            OnError::Placeholder => FailureMode::Placeholder,
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Diagnostics must stay on stderr; stdout carries the document.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    log::info!("longan {}", env!("CARGO_PKG_VERSION"));

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("reading document from stdin")?;
    let mut doc: Pandoc =
        serde_json::from_str(&input).context("parsing pandoc JSON from stdin")?;

    let options = RenderOptions::new()
        .with_density(cli.density)
        .with_quality(cli.quality)
        .with_trim(cli.trim)
        .with_latex_program(cli.latex)
        .with_rasterizer_program(cli.rasterizer)
        .with_output_dir(cli.output_dir);
    let renderer = MathRenderer::new(options);

    let format = cli.format.as_deref().unwrap_or("");
    render_math_images(&mut doc, format, &renderer, cli.on_error.into())
        .context("rewriting display math")?;

    let stdout = io::stdout().lock();
    let mut stdout = io::BufWriter::new(stdout);
    serde_json::to_writer(&mut stdout, &doc).context("writing document to stdout")?;
    stdout.flush().context("flushing stdout")?;
    Ok(())
}
