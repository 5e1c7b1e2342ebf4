//! The standalone LaTeX document each equation is compiled from.
//!
//! The `preview` package with `active,tightpage` crops the typeset output to
//! the bounding box of the previewed environment, which is what turns a full
//! `article` page into a single tightly cropped equation.

/// Document skeleton the equation source is spliced into. The `equation*`
/// environment must match the `\PreviewEnvironment` declaration.
const DOCUMENT_TEMPLATE: &str = r"\documentclass{article}
\usepackage{amsmath}
\usepackage[active,tightpage]{preview}
\PreviewEnvironment{equation*}
\begin{document}
\begin{equation*}
<<equation>>
\end{equation*}
\end{document}";

/// Wrap raw display-math source into a complete standalone document.
///
/// The source is dedented and trimmed first, so equations indented inside
/// the surrounding markup hash identically to their flush-left form.
/// Deterministic: equal input always yields the equal document text, which
/// the cache key depends on.
pub(crate) fn wrap_display_math(source: &str) -> String {
    let code = dedent(source);
    DOCUMENT_TEMPLATE.replace("<<equation>>", code.trim())
}

/// Remove the longest common leading whitespace from all non-blank lines.
fn dedent(text: &str) -> String {
    let margin = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut out = String::with_capacity(text.len());
    for (index, line) in text.lines().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        if !line.trim().is_empty() {
            out.push_str(strip_margin(line, margin));
        }
    }
    out
}

/// Strip up to `margin` bytes of leading whitespace, stopping at the first
/// non-whitespace character so multi-byte whitespace never splits.
fn strip_margin(line: &str, margin: usize) -> &str {
    let mut rest = line;
    let mut stripped = 0;
    while stripped < margin {
        match rest.chars().next() {
            Some(c) if c.is_whitespace() => {
                stripped += c.len_utf8();
                rest = &rest[c.len_utf8()..];
            }
            _ => break,
        }
    }
    rest
}
