//! The filter engine: rewrites display math into image references.
//!
//! The engine walks a document and, for every math node whose type is
//! `DisplayMath`, asks a [`MathResolver`] for the path of a rendered image
//! and replaces the node with an image reference carrying an empty caption
//! and empty attributes. Everything else, inline math included, passes
//! through untouched; leaving a node alone is the normal outcome for almost
//! every node in a document.
//!
//! Resolution failures are handled per [`FailureMode`]: abort the whole run,
//! keep the math node as it was, or substitute a literal placeholder. The
//! two non-abort modes isolate failures per equation, so one broken formula
//! cannot take down an otherwise valid document.
use std::path::PathBuf;

use crate::ast::{Inline, MathType, MutVisitor, Pandoc};
use crate::errors::Result;

/// Maps display-math source text to the path of a rendered image.
///
/// [`crate::render::MathRenderer`] is the production implementation; tests
/// substitute their own so the engine can be exercised without a TeX
/// installation.
pub trait MathResolver {
    /// Resolve math source to an image path, rendering if necessary.
    fn resolve(&self, source: &str) -> Result<PathBuf>;
}

/// What to do when resolving an equation fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureMode {
    /// Fail the whole filter run on the first broken equation
    #[default]
    Abort,
    /// Leave the math node unchanged and continue
    Keep,
    /// Replace the math node with a literal code placeholder carrying the
    /// source, and continue
    Placeholder,
}

/// The visitor that performs the math-to-image rewrite.
///
/// # Example
///
/// ```rust,no_run
/// use longan::ast::{MutVisitor, Pandoc};
/// use longan::{MathImageFilter, MathRenderer, RenderOptions};
///
/// # fn main() -> Result<(), longan::Error> {
/// # let json = r#"{"pandoc-api-version":[1,23,1],"meta":{},"blocks":[]}"#;
/// let mut doc: Pandoc = serde_json::from_str(json)?;
/// let renderer = MathRenderer::new(RenderOptions::default());
///
/// let mut filter = MathImageFilter::new(&renderer, "docx");
/// filter.visit_pandoc(&mut doc);
/// filter.finish()?;
/// # Ok(())
/// # }
/// ```
pub struct MathImageFilter<'a> {
    resolver: &'a dyn MathResolver,
    /// Output format pandoc is producing, or empty when running as a bare
    /// pipe stage. Accepted for the filter contract but not branched on
    /// yet: a future version could emit raw LaTeX instead of an image when
    /// the target format typesets math natively.
    #[allow(dead_code)]
    format: String,
    failure_mode: FailureMode,
    failed: Option<crate::errors::Error>,
}

impl<'a> MathImageFilter<'a> {
    /// Create a filter using the given resolver and output-format hint.
    pub fn new(resolver: &'a dyn MathResolver, format: impl Into<String>) -> Self {
        let format = format.into();
        if !format.is_empty() {
            log::debug!("filtering for output format {format}");
        }
        Self {
            resolver,
            format,
            failure_mode: FailureMode::default(),
            failed: None,
        }
    }

    /// Set the failure handling mode.
    #[inline]
    pub fn with_failure_mode(mut self, mode: FailureMode) -> Self {
        self.failure_mode = mode;
        self
    }

    /// Consume the filter, reporting the first error encountered under
    /// [`FailureMode::Abort`].
    pub fn finish(self) -> Result<()> {
        match self.failed {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl MutVisitor for MathImageFilter<'_> {
    fn visit_inline(&mut self, inline: &mut Inline) {
        // Once aborted, stop rendering; the document is discarded anyway.
        if self.failed.is_some() {
            return;
        }

        let Inline::Math(MathType::DisplayMath, source) = inline else {
            self.walk_inline(inline);
            return;
        };

        match self.resolver.resolve(source) {
            Ok(path) => {
                *inline = Inline::image_reference(path.to_string_lossy());
            }
            Err(err) => match self.failure_mode {
                FailureMode::Abort => self.failed = Some(err),
                FailureMode::Keep => {
                    log::warn!("keeping unrendered equation: {err}");
                }
                FailureMode::Placeholder => {
                    log::warn!("replacing unrendered equation with placeholder: {err}");
                    let source = std::mem::take(source);
                    *inline =
                        Inline::Code((String::new(), vec!["math".to_string()], Vec::new()), source);
                }
            },
        }
    }
}

/// Rewrite every display-math node of a document into an image reference.
///
/// This is the complete filter pass: metadata and body are walked, display
/// math is resolved through `resolver`, and failures are handled per
/// `failure_mode`. The `format` hint is the output-format name pandoc hands
/// a filter, empty when there is none.
pub fn render_math_images(
    doc: &mut Pandoc,
    format: &str,
    resolver: &dyn MathResolver,
    failure_mode: FailureMode,
) -> Result<()> {
    let mut filter = MathImageFilter::new(resolver, format).with_failure_mode(failure_mode);
    filter.visit_pandoc(doc);
    filter.finish()
}
