//! Typed model of the pandoc document tree.
//!
//! Pandoc exchanges documents with its JSON filters as a single JSON value:
//! a top-level [`Pandoc`] object holding metadata and a list of blocks, where
//! every node is encoded as `{"t": <constructor>, "c": <content>}`. This
//! module mirrors that encoding with adjacently tagged serde enums, so a
//! document deserializes into real sum types and reserializes into exactly
//! the shape pandoc expects.
//!
//! The schema itself belongs to pandoc; this module only models it. Node
//! kinds are matched exhaustively throughout, which means a pandoc release
//! that introduces a new constructor surfaces as a deserialization error and
//! a compile error in the traversal code, never as a silently dropped node.
//!
//! # Example
//!
//! ```rust
//! use longan::ast::{Inline, MathType};
//!
//! let json = r#"{"t":"Math","c":[{"t":"DisplayMath"},"x^2+y^2=z^2"]}"#;
//! let node: Inline = serde_json::from_str(json).unwrap();
//! assert!(matches!(node, Inline::Math(MathType::DisplayMath, _)));
//! ```

mod types;
mod walk;

pub use types::{
    Alignment, Attr, Block, Caption, Cell, Citation, CitationMode, ColSpec, ColWidth, Format,
    Inline, ListAttributes, ListNumberDelim, ListNumberStyle, MathType, MetaValue, Pandoc,
    QuoteType, Row, Target, TableBody, TableFoot, TableHead,
};
pub use walk::MutVisitor;
