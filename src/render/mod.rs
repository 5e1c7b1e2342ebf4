//! Equation rendering and the content-addressed image cache.
//!
//! The renderer maps a raw display-math source string deterministically to a
//! PNG file on disk, rendering lazily: the image filename is a SHA-1 digest
//! of the fully formatted LaTeX document plus the rasterizer option list, so
//! a cache hit means the exact same pipeline already ran and nothing needs
//! to be done.
//!
//! A cache miss runs two external tools, a LaTeX engine and a rasterizer,
//! inside a private temporary directory that is removed on every exit path.
//! The process working directory is never changed; children are launched
//! with their own working directory and the final image path is passed to
//! the rasterizer as an absolute path into the stable output directory.
//!
//! # Example
//!
//! ```rust,no_run
//! use longan::render::{MathRenderer, RenderOptions};
//!
//! # fn main() -> Result<(), longan::Error> {
//! let renderer = MathRenderer::new(RenderOptions::new().with_density(300));
//! let path = renderer.resolve(r"\int_0^1 x^2 \, dx")?;
//! println!("rendered to {}", path.display());
//! # Ok(())
//! # }
//! ```

mod cache;
mod options;
mod renderer;
mod template;

pub use options::RenderOptions;
pub use renderer::MathRenderer;
