//! Configuration for equation rendering.
use std::path::PathBuf;

/// Configuration options for rendering display math to images.
///
/// All options participate in the cache key, directly or through the
/// rasterizer argument list, so changing any of them re-renders affected
/// equations instead of serving stale images.
///
/// # Examples
///
/// ```rust
/// use longan::render::RenderOptions;
///
/// // Create with defaults
/// let options = RenderOptions::default();
///
/// // Or customize
/// let options = RenderOptions::new()
///     .with_density(300)
///     .with_quality(90)
///     .with_output_dir("equations");
/// ```
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Rasterization density in DPI
    pub density: u32,
    /// PNG compression quality
    pub quality: u32,
    /// Whether to pass `-trim` to the rasterizer. Off by default: trimmed
    /// images lose the preview margin and tend to over-expand on the page.
    pub trim: bool,
    /// LaTeX engine executable
    pub latex_program: String,
    /// Rasterizer executable
    pub rasterizer_program: String,
    /// Directory rendered images are stored in, relative to the directory
    /// the filter process was invoked from
    pub output_dir: PathBuf,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            density: 600,
            quality: 100,
            trim: false,
            latex_program: "pdflatex".to_string(),
            rasterizer_program: "convert".to_string(),
            output_dir: PathBuf::from("latex_images"),
        }
    }
}

impl RenderOptions {
    /// Create a new `RenderOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rasterization density in DPI.
    #[inline]
    pub fn with_density(mut self, density: u32) -> Self {
        self.density = density;
        self
    }

    /// Set the PNG compression quality.
    #[inline]
    pub fn with_quality(mut self, quality: u32) -> Self {
        self.quality = quality;
        self
    }

    /// Enable or disable trimming the rendered image to its content box.
    #[inline]
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Set the LaTeX engine executable.
    #[inline]
    pub fn with_latex_program(mut self, program: impl Into<String>) -> Self {
        self.latex_program = program.into();
        self
    }

    /// Set the rasterizer executable.
    #[inline]
    pub fn with_rasterizer_program(mut self, program: impl Into<String>) -> Self {
        self.rasterizer_program = program.into();
        self
    }

    /// Set the directory rendered images are stored in.
    #[inline]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// The option list passed to the rasterizer, in invocation order.
    ///
    /// This list is also hashed into the cache key, so its exact textual
    /// form matters: two configurations producing the same list share cache
    /// entries.
    pub(crate) fn rasterizer_args(&self) -> Vec<String> {
        let mut args = vec![
            "-density".to_string(),
            self.density.to_string(),
            "-quality".to_string(),
            self.quality.to_string(),
        ];
        if self.trim {
            args.push("-trim".to_string());
        }
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = RenderOptions::default();
        assert_eq!(options.density, 600);
        assert_eq!(options.quality, 100);
        assert!(!options.trim);
        assert_eq!(options.latex_program, "pdflatex");
        assert_eq!(options.rasterizer_program, "convert");
        assert_eq!(options.output_dir, PathBuf::from("latex_images"));
    }

    #[test]
    fn test_rasterizer_args_order() {
        let args = RenderOptions::new().with_density(300).rasterizer_args();
        assert_eq!(args, ["-density", "300", "-quality", "100"]);
    }

    #[test]
    fn test_trim_appends_flag() {
        let args = RenderOptions::new().with_trim(true).rasterizer_args();
        assert_eq!(args.last().map(String::as_str), Some("-trim"));
    }
}
