//! Longan - a pandoc filter that rasterizes display math into PNG images
//!
//! This library implements a [pandoc JSON filter](https://pandoc.org/filters.html):
//! it reads a pandoc document tree, replaces every display-math node with an
//! image reference pointing at a rendered PNG of the equation, and leaves the
//! rest of the document untouched. Rendering is delegated to an external LaTeX
//! engine (`pdflatex` by default) and an ImageMagick-style rasterizer
//! (`convert` by default), and memoized through a content-addressed cache on
//! disk so each distinct equation is rendered at most once.
//!
//! # Features
//!
//! - **Typed document tree**: the pandoc AST is modeled as exhaustive sum
//!   types, so node kinds added by a newer pandoc fail loudly instead of
//!   being silently mangled
//! - **Content-addressed cache**: image filenames are derived from a SHA-1
//!   digest of the full rendered LaTeX document plus the rasterizer options,
//!   so identical input always maps to the identical file
//! - **Isolated rendering**: every cache miss is rendered inside a private
//!   temporary directory that is cleaned up on all exit paths; the process
//!   working directory is never changed
//! - **Explicit failure handling**: external tool failures are captured as
//!   typed errors and handled per a configurable policy instead of being
//!   ignored
//!
//! # Example - filtering a document in memory
//!
//! ```rust,no_run
//! use longan::ast::Pandoc;
//! use longan::{FailureMode, MathRenderer, RenderOptions, render_math_images};
//!
//! # fn main() -> Result<(), longan::Error> {
//! let json = std::fs::read_to_string("document.json")?;
//! let mut doc: Pandoc = serde_json::from_str(&json)?;
//!
//! let renderer = MathRenderer::new(RenderOptions::default());
//! render_math_images(&mut doc, "", &renderer, FailureMode::Abort)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example - as a pandoc filter
//!
//! The binary target wires the library to stdin/stdout the way pandoc
//! expects:
//!
//! ```sh
//! pandoc document.md --filter longan -o document.docx
//! ```
//!
//! Rendered images land in `latex_images/` relative to the directory pandoc
//! was invoked from. The directory is never cleaned up by the filter.
#![forbid(unsafe_code)]

/// Typed model of the pandoc document tree and its traversal machinery.
pub mod ast;

mod errors;

/// The filter engine: walks a document and rewrites display math to images.
pub mod filter;

/// Equation rendering and the content-addressed image cache.
pub mod render;

// Re-export commonly used types for convenience
pub use errors::{Error, Result};
pub use filter::{FailureMode, MathImageFilter, MathResolver, render_math_images};
pub use render::{MathRenderer, RenderOptions};
