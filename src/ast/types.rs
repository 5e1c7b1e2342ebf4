//! Node types of the pandoc document tree.
//!
//! Every enum here uses serde's adjacently tagged representation with the
//! `"t"`/`"c"` field names pandoc uses on the wire. Tuple variants become
//! JSON arrays under `"c"`, unit variants omit `"c"` entirely, both exactly
//! as pandoc serializes them.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Attributes attached to a node: identifier, classes, key/value pairs.
///
/// Serialized as a three-element array, e.g. `["fig1", ["wide"], []]`.
pub type Attr = (String, Vec<String>, Vec<(String, String)>);

/// Link or image target: URL and title.
pub type Target = (String, String);

/// A raw content format name, e.g. `"html"` or `"latex"`.
pub type Format = String;

/// Ordered list attributes: start number, numbering style, delimiter.
pub type ListAttributes = (i64, ListNumberStyle, ListNumberDelim);

/// Table or figure caption: optional short form plus the full caption blocks.
pub type Caption = (Option<Vec<Inline>>, Vec<Block>);

/// Column specification: alignment and width.
pub type ColSpec = (Alignment, ColWidth);

/// A table row: attributes and cells.
pub type Row = (Attr, Vec<Cell>);

/// A table cell: attributes, alignment, row span, column span, contents.
pub type Cell = (Attr, Alignment, i64, i64, Vec<Block>);

/// The head of a table.
pub type TableHead = (Attr, Vec<Row>);

/// A body of a table: attributes, row-head column count, intermediate head
/// rows, body rows.
pub type TableBody = (Attr, i64, Vec<Row>, Vec<Row>);

/// The foot of a table.
pub type TableFoot = (Attr, Vec<Row>);

/// A complete pandoc document.
///
/// This is the top-level value read from stdin and written to stdout by a
/// JSON filter. The API version is carried through untouched so the output
/// is accepted by the same pandoc that produced the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pandoc {
    /// Version of the pandoc-types API the document was serialized with
    #[serde(rename = "pandoc-api-version")]
    pub pandoc_api_version: Vec<i64>,
    /// Document metadata (title, authors, arbitrary fields)
    pub meta: BTreeMap<String, MetaValue>,
    /// Document body
    pub blocks: Vec<Block>,
}

/// A metadata value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t", content = "c")]
pub enum MetaValue {
    MetaMap(BTreeMap<String, MetaValue>),
    MetaList(Vec<MetaValue>),
    MetaBool(bool),
    MetaString(String),
    MetaInlines(Vec<Inline>),
    MetaBlocks(Vec<Block>),
}

/// A block-level element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t", content = "c")]
pub enum Block {
    /// Plain text, not a paragraph
    Plain(Vec<Inline>),
    /// Paragraph
    Para(Vec<Inline>),
    /// Multiple non-breaking lines
    LineBlock(Vec<Vec<Inline>>),
    /// Code block with attributes
    CodeBlock(Attr, String),
    /// Raw block in a given format
    RawBlock(Format, String),
    /// Block quote
    BlockQuote(Vec<Block>),
    /// Ordered list: attributes and items, each item a list of blocks
    OrderedList(ListAttributes, Vec<Vec<Block>>),
    /// Bullet list
    BulletList(Vec<Vec<Block>>),
    /// Definition list: each entry pairs a term with one or more definitions
    DefinitionList(Vec<(Vec<Inline>, Vec<Vec<Block>>)>),
    /// Header with level and attributes
    Header(i64, Attr, Vec<Inline>),
    HorizontalRule,
    /// Table: caption, column specs, head, bodies, foot
    Table(Attr, Caption, Vec<ColSpec>, TableHead, Vec<TableBody>, TableFoot),
    /// Figure with caption and content
    Figure(Attr, Caption, Vec<Block>),
    /// Generic block container with attributes
    Div(Attr, Vec<Block>),
}

/// An inline element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t", content = "c")]
pub enum Inline {
    /// Literal text
    Str(String),
    Emph(Vec<Inline>),
    Underline(Vec<Inline>),
    Strong(Vec<Inline>),
    Strikeout(Vec<Inline>),
    Superscript(Vec<Inline>),
    Subscript(Vec<Inline>),
    SmallCaps(Vec<Inline>),
    /// Quoted text with quote type
    Quoted(QuoteType, Vec<Inline>),
    /// Citation group with its rendered text
    Cite(Vec<Citation>, Vec<Inline>),
    /// Inline code with attributes
    Code(Attr, String),
    /// Inter-word space
    Space,
    SoftBreak,
    LineBreak,
    /// TeX math with its math type and source text
    Math(MathType, String),
    /// Raw inline content in a given format
    RawInline(Format, String),
    /// Hyperlink: attributes, link text, target
    Link(Attr, Vec<Inline>, Target),
    /// Image: attributes, caption inlines, target
    Image(Attr, Vec<Inline>, Target),
    /// Footnote or endnote
    Note(Vec<Block>),
    /// Generic inline container with attributes
    Span(Attr, Vec<Inline>),
}

/// Whether a math element is set inline or as its own display block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "t", content = "c")]
pub enum MathType {
    DisplayMath,
    InlineMath,
}

/// Quote style of a [`Inline::Quoted`] element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "t", content = "c")]
pub enum QuoteType {
    SingleQuote,
    DoubleQuote,
}

/// A single citation inside a [`Inline::Cite`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Citation {
    pub citation_id: String,
    pub citation_prefix: Vec<Inline>,
    pub citation_suffix: Vec<Inline>,
    pub citation_mode: CitationMode,
    pub citation_note_num: i64,
    pub citation_hash: i64,
}

/// How a citation is rendered in the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "t", content = "c")]
pub enum CitationMode {
    AuthorInText,
    SuppressAuthor,
    NormalCitation,
}

/// Numbering style of an ordered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "t", content = "c")]
pub enum ListNumberStyle {
    DefaultStyle,
    Example,
    Decimal,
    LowerRoman,
    UpperRoman,
    LowerAlpha,
    UpperAlpha,
}

/// Delimiter following an ordered-list number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "t", content = "c")]
pub enum ListNumberDelim {
    DefaultDelim,
    Period,
    OneParen,
    TwoParens,
}

/// Horizontal alignment of a table column or cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "t", content = "c")]
pub enum Alignment {
    AlignLeft,
    AlignRight,
    AlignCenter,
    AlignDefault,
}

/// Width of a table column, as a fraction of the text width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t", content = "c")]
pub enum ColWidth {
    ColWidth(f64),
    ColWidthDefault,
}

impl Inline {
    /// Convenience constructor for an image node with empty attributes and
    /// an empty caption, the shape a math replacement uses.
    pub fn image_reference(url: impl Into<String>) -> Self {
        Inline::Image(
            (String::new(), Vec::new(), Vec::new()),
            Vec::new(),
            (url.into(), String::new()),
        )
    }
}
