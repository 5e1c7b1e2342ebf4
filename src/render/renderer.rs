//! Lazy, cached rendering of display math through external tools.
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use crate::errors::{Error, Result};
use crate::filter::MathResolver;

use super::cache;
use super::options::RenderOptions;
use super::template;

/// Fixed name of the LaTeX source file inside the temporary render
/// directory. The engine derives the PDF name from the same stem.
const TEX_FILE: &str = "equation.tex";
const PDF_FILE: &str = "equation.pdf";

/// How many trailing lines of tool output to keep in an error.
const DIAGNOSTIC_TAIL: usize = 20;

/// Maps display-math source deterministically to a rendered PNG on disk.
///
/// `resolve` is idempotent: the first call for a given (source, options)
/// pair runs the external pipeline, every later call finds the file already
/// present and returns immediately. The returned path is relative to the
/// directory the process was invoked from, which is what a document
/// referencing the image needs regardless of where rendering happened.
///
/// # Examples
///
/// ```rust,no_run
/// use longan::render::{MathRenderer, RenderOptions};
///
/// # fn main() -> Result<(), longan::Error> {
/// let renderer = MathRenderer::new(RenderOptions::default());
/// let path = renderer.resolve("x^2 + y^2 = z^2")?;
/// assert!(path.to_string_lossy().ends_with(".png"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MathRenderer {
    options: RenderOptions,
}

impl MathRenderer {
    /// Create a renderer with the given options.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Resolve math source to the path of its rendered image, rendering on
    /// a cache miss.
    ///
    /// Rendering runs in a fresh private temporary directory which is
    /// removed on success and failure alike; the process working directory
    /// is left alone. Tool failures surface as [`Error::ToolNotFound`],
    /// [`Error::ToolFailed`] or [`Error::MissingOutput`].
    pub fn resolve(&self, source: &str) -> Result<PathBuf> {
        let document = template::wrap_display_math(source);
        let rasterizer_args = self.options.rasterizer_args();

        let key = cache::cache_key(&document, &rasterizer_args);
        let relative = cache::relative_path(&self.options.output_dir, &key);
        cache::ensure_output_dir(&self.options.output_dir)?;

        // The rasterizer needs an absolute target since it runs with the
        // temp dir as its working directory.
        let target = env::current_dir()?.join(&relative);
        if target.is_file() {
            log::debug!("cache hit for {}", relative.display());
            return Ok(relative);
        }

        self.render(&document, &rasterizer_args, &target)?;
        log::info!("created image {}", relative.display());
        Ok(relative)
    }

    /// Run the LaTeX engine and the rasterizer for one equation.
    fn render(&self, document: &str, rasterizer_args: &[String], target: &Path) -> Result<()> {
        let workdir = tempfile::tempdir()?;

        fs::write(workdir.path().join(TEX_FILE), document)?;

        let mut latex = Command::new(&self.options.latex_program);
        latex.arg(TEX_FILE).current_dir(workdir.path());
        run_tool(&mut latex)?;

        // The engine can exit zero without producing a page, e.g. when the
        // source is empty; catch that before handing a stale path on.
        let pdf = workdir.path().join(PDF_FILE);
        if !pdf.is_file() {
            return Err(Error::MissingOutput(pdf));
        }

        let mut rasterizer = Command::new(&self.options.rasterizer_program);
        rasterizer
            .args(rasterizer_args)
            .arg(PDF_FILE)
            .arg(target)
            .current_dir(workdir.path());
        run_tool(&mut rasterizer)?;

        if !target.is_file() {
            return Err(Error::MissingOutput(target.to_path_buf()));
        }
        Ok(())
    }
}

impl MathResolver for MathRenderer {
    fn resolve(&self, source: &str) -> Result<PathBuf> {
        MathRenderer::resolve(self, source)
    }
}

/// Invoke one external tool, capturing its output.
///
/// Stdout is forwarded to the diagnostic stream through the logger; stdout
/// proper stays reserved for the transformed document. A missing executable
/// and an unsuccessful exit are distinct errors, with the interesting tail
/// of the tool's chatter attached to the latter (TeX engines report errors
/// on stdout, not stderr).
fn run_tool(command: &mut Command) -> Result<Output> {
    let program = command.get_program().to_string_lossy().into_owned();

    let output = command.output().map_err(|err| {
        if err.kind() == ErrorKind::NotFound {
            Error::ToolNotFound(program.clone())
        } else {
            Error::Io(err)
        }
    })?;

    if !output.stdout.is_empty() {
        log::debug!(
            "{program} output:\n{}",
            String::from_utf8_lossy(&output.stdout).trim_end()
        );
    }

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        let chatter = if stderr.trim().is_empty() { stdout } else { stderr };
        return Err(Error::ToolFailed {
            program,
            status: output.status,
            detail: tail(&chatter, DIAGNOSTIC_TAIL),
        });
    }
    Ok(output)
}

/// The last `lines` lines of a tool transcript.
fn tail(text: &str, lines: usize) -> String {
    let all: Vec<&str> = text.trim_end().lines().collect();
    let skip = all.len().saturating_sub(lines);
    all[skip..].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Options whose tools can never run, pointed at a private output dir.
    fn unrunnable_options(output_dir: &Path) -> RenderOptions {
        RenderOptions::new()
            .with_latex_program("longan-test-no-such-latex")
            .with_rasterizer_program("longan-test-no-such-convert")
            .with_output_dir(output_dir)
    }

    #[test]
    fn test_cache_hit_runs_no_tools() {
        let tmp = tempfile::tempdir().unwrap();
        let options = unrunnable_options(&tmp.path().join("images"));
        let renderer = MathRenderer::new(options.clone());

        // Seed the cache with the exact file resolve will look for
        let document = template::wrap_display_math("a+b");
        let key = cache::cache_key(&document, &options.rasterizer_args());
        let seeded = cache::relative_path(&options.output_dir, &key);
        fs::create_dir_all(&options.output_dir).unwrap();
        fs::write(&seeded, b"png bytes").unwrap();

        // With nonexistent tool binaries, success proves no subprocess ran
        let resolved = renderer.resolve("a+b").unwrap();
        assert_eq!(resolved, seeded);
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let tmp = tempfile::tempdir().unwrap();
        let options = unrunnable_options(&tmp.path().join("images"));
        let renderer = MathRenderer::new(options.clone());

        let document = template::wrap_display_math("e^{i\\pi}+1=0");
        let key = cache::cache_key(&document, &options.rasterizer_args());
        let seeded = cache::relative_path(&options.output_dir, &key);
        fs::create_dir_all(&options.output_dir).unwrap();
        fs::write(&seeded, b"png bytes").unwrap();

        let first = renderer.resolve("e^{i\\pi}+1=0").unwrap();
        let second = renderer.resolve("e^{i\\pi}+1=0").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_option_change_misses_cache() {
        let tmp = tempfile::tempdir().unwrap();
        let options = unrunnable_options(&tmp.path().join("images"));

        // Seed under the default density, then resolve under another one
        let document = template::wrap_display_math("a+b");
        let key = cache::cache_key(&document, &options.rasterizer_args());
        fs::create_dir_all(&options.output_dir).unwrap();
        fs::write(cache::relative_path(&options.output_dir, &key), b"png").unwrap();

        let changed = MathRenderer::new(options.with_density(72));
        let err = changed.resolve("a+b").unwrap_err();
        assert!(matches!(err, Error::ToolNotFound(_)), "got {err:?}");
    }

    #[test]
    fn test_missing_engine_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let renderer = MathRenderer::new(unrunnable_options(&tmp.path().join("images")));

        let err = renderer.resolve("x").unwrap_err();
        let Error::ToolNotFound(program) = err else {
            panic!("expected ToolNotFound, got {err:?}");
        };
        assert_eq!(program, "longan-test-no-such-latex");
    }

    #[test]
    fn test_failing_engine_is_reported_with_detail() {
        let tmp = tempfile::tempdir().unwrap();
        // `false` exists everywhere and fails with empty output
        let options = RenderOptions::new()
            .with_latex_program("false")
            .with_output_dir(tmp.path().join("images"));
        let renderer = MathRenderer::new(options);

        let err = renderer.resolve("x").unwrap_err();
        assert!(matches!(err, Error::ToolFailed { .. }), "got {err:?}");
    }

    #[test]
    fn test_engine_without_pdf_is_missing_output() {
        let tmp = tempfile::tempdir().unwrap();
        // `true` succeeds but produces no PDF
        let options = RenderOptions::new()
            .with_latex_program("true")
            .with_output_dir(tmp.path().join("images"));
        let renderer = MathRenderer::new(options);

        let err = renderer.resolve("x").unwrap_err();
        let Error::MissingOutput(path) = err else {
            panic!("expected MissingOutput, got {err:?}");
        };
        assert!(path.ends_with(PDF_FILE));
    }

    #[test]
    fn test_tail_keeps_last_lines() {
        let transcript = (1..=30).map(|n| n.to_string()).collect::<Vec<_>>().join("\n");
        let kept = tail(&transcript, 20);
        assert!(kept.starts_with("11"));
        assert!(kept.ends_with("30"));
    }
}
