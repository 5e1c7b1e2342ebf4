//! In-place traversal of the document tree.
//!
//! [`MutVisitor`] visits every node of a document in document order, with
//! mutable access so a visitor can rewrite nodes as it goes. The `walk_*`
//! methods carry the recursion; a visitor overrides one of the `visit_*`
//! hooks, handles the nodes it cares about, and delegates the rest back to
//! the default walk.
//!
//! The matches in the walk methods are exhaustive on purpose. When a pandoc
//! release adds a constructor, the corresponding variant gets added to the
//! types in this module and every walker fails to compile until it handles
//! the new shape.
use std::collections::BTreeMap;

use super::types::{Block, Caption, Inline, MetaValue, Pandoc, Row};

/// Depth-first, in-place visitor over a pandoc document.
///
/// # Example
///
/// A visitor that upper-cases every string in a document:
///
/// ```rust
/// use longan::ast::{Inline, MutVisitor, Pandoc};
///
/// struct Shout;
///
/// impl MutVisitor for Shout {
///     fn visit_inline(&mut self, inline: &mut Inline) {
///         if let Inline::Str(text) = inline {
///             *text = text.to_uppercase();
///         }
///         self.walk_inline(inline);
///     }
/// }
///
/// # let json = r#"{"pandoc-api-version":[1,23,1],"meta":{},"blocks":[]}"#;
/// let mut doc: Pandoc = serde_json::from_str(json).unwrap();
/// Shout.visit_pandoc(&mut doc);
/// ```
pub trait MutVisitor {
    /// Visit one inline node. Override this to rewrite inlines.
    fn visit_inline(&mut self, inline: &mut Inline) {
        self.walk_inline(inline);
    }

    /// Visit one block node. Override this to rewrite blocks.
    fn visit_block(&mut self, block: &mut Block) {
        self.walk_block(block);
    }

    /// Visit one metadata value.
    fn visit_meta_value(&mut self, meta: &mut MetaValue) {
        self.walk_meta_value(meta);
    }

    /// Visit an entire document: metadata first, then the body.
    fn visit_pandoc(&mut self, doc: &mut Pandoc) {
        self.walk_meta(&mut doc.meta);
        self.walk_blocks(&mut doc.blocks);
    }

    /// Recurse into the children of an inline node.
    fn walk_inline(&mut self, inline: &mut Inline) {
        match inline {
            // Leaves: nothing to recurse into
            Inline::Str(_)
            | Inline::Code(_, _)
            | Inline::Space
            | Inline::SoftBreak
            | Inline::LineBreak
            | Inline::Math(_, _)
            | Inline::RawInline(_, _) => {}
            Inline::Emph(inlines)
            | Inline::Underline(inlines)
            | Inline::Strong(inlines)
            | Inline::Strikeout(inlines)
            | Inline::Superscript(inlines)
            | Inline::Subscript(inlines)
            | Inline::SmallCaps(inlines)
            | Inline::Quoted(_, inlines)
            | Inline::Span(_, inlines)
            | Inline::Link(_, inlines, _)
            | Inline::Image(_, inlines, _) => self.walk_inlines(inlines),
            Inline::Cite(citations, inlines) => {
                for citation in citations {
                    self.walk_inlines(&mut citation.citation_prefix);
                    self.walk_inlines(&mut citation.citation_suffix);
                }
                self.walk_inlines(inlines);
            }
            Inline::Note(blocks) => self.walk_blocks(blocks),
        }
    }

    /// Recurse into the children of a block node.
    fn walk_block(&mut self, block: &mut Block) {
        match block {
            Block::CodeBlock(_, _) | Block::RawBlock(_, _) | Block::HorizontalRule => {}
            Block::Plain(inlines) | Block::Para(inlines) => self.walk_inlines(inlines),
            Block::LineBlock(lines) => {
                for line in lines {
                    self.walk_inlines(line);
                }
            }
            Block::BlockQuote(blocks) | Block::Div(_, blocks) => self.walk_blocks(blocks),
            Block::OrderedList(_, items) | Block::BulletList(items) => {
                for item in items {
                    self.walk_blocks(item);
                }
            }
            Block::DefinitionList(entries) => {
                for (term, definitions) in entries {
                    self.walk_inlines(term);
                    for definition in definitions {
                        self.walk_blocks(definition);
                    }
                }
            }
            Block::Header(_, _, inlines) => self.walk_inlines(inlines),
            Block::Table(_, caption, _, head, bodies, foot) => {
                self.walk_caption(caption);
                self.walk_rows(&mut head.1);
                for body in bodies {
                    self.walk_rows(&mut body.2);
                    self.walk_rows(&mut body.3);
                }
                self.walk_rows(&mut foot.1);
            }
            Block::Figure(_, caption, blocks) => {
                self.walk_caption(caption);
                self.walk_blocks(blocks);
            }
        }
    }

    /// Recurse into a metadata value.
    fn walk_meta_value(&mut self, meta: &mut MetaValue) {
        match meta {
            MetaValue::MetaBool(_) | MetaValue::MetaString(_) => {}
            MetaValue::MetaMap(map) => self.walk_meta(map),
            MetaValue::MetaList(values) => {
                for value in values {
                    self.visit_meta_value(value);
                }
            }
            MetaValue::MetaInlines(inlines) => self.walk_inlines(inlines),
            MetaValue::MetaBlocks(blocks) => self.walk_blocks(blocks),
        }
    }

    /// Visit each inline of a sequence.
    fn walk_inlines(&mut self, inlines: &mut Vec<Inline>) {
        for inline in inlines {
            self.visit_inline(inline);
        }
    }

    /// Visit each block of a sequence.
    fn walk_blocks(&mut self, blocks: &mut Vec<Block>) {
        for block in blocks {
            self.visit_block(block);
        }
    }

    /// Visit each value of a metadata map.
    fn walk_meta(&mut self, meta: &mut BTreeMap<String, MetaValue>) {
        for value in meta.values_mut() {
            self.visit_meta_value(value);
        }
    }

    /// Visit the contents of a caption.
    fn walk_caption(&mut self, caption: &mut Caption) {
        if let Some(short) = &mut caption.0 {
            self.walk_inlines(short);
        }
        self.walk_blocks(&mut caption.1);
    }

    /// Visit the cell contents of a sequence of table rows.
    fn walk_rows(&mut self, rows: &mut Vec<Row>) {
        for (_, cells) in rows {
            for cell in cells {
                self.walk_blocks(&mut cell.4);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::MathType;

    /// Counts Str leaves and collects math sources, to prove coverage.
    #[derive(Default)]
    struct Census {
        strings: usize,
        math: Vec<String>,
    }

    impl MutVisitor for Census {
        fn visit_inline(&mut self, inline: &mut Inline) {
            match inline {
                Inline::Str(_) => self.strings += 1,
                Inline::Math(_, source) => self.math.push(source.clone()),
                _ => {}
            }
            self.walk_inline(inline);
        }
    }

    fn parse_doc(json: &str) -> Pandoc {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_walk_reaches_nested_inlines() {
        let mut doc = parse_doc(
            r#"{
            "pandoc-api-version": [1, 23, 1],
            "meta": {"title": {"t": "MetaInlines", "c": [{"t": "Str", "c": "t"}]}},
            "blocks": [
                {"t": "Para", "c": [
                    {"t": "Emph", "c": [{"t": "Str", "c": "a"}]},
                    {"t": "Note", "c": [
                        {"t": "Para", "c": [{"t": "Math", "c": [{"t": "DisplayMath"}, "e=mc^2"]}]}
                    ]}
                ]},
                {"t": "BulletList", "c": [
                    [{"t": "Plain", "c": [{"t": "Str", "c": "b"}]}]
                ]}
            ]
        }"#,
        );

        let mut census = Census::default();
        census.visit_pandoc(&mut doc);
        // "t" from metadata, "a" from the Emph, "b" from the list item
        assert_eq!(census.strings, 3);
        assert_eq!(census.math, vec!["e=mc^2"]);
    }

    #[test]
    fn test_walk_reaches_table_cells() {
        let mut doc = parse_doc(
            r#"{
            "pandoc-api-version": [1, 23, 1],
            "meta": {},
            "blocks": [{"t":"Table","c":[
                ["",[],[]],
                [null,[{"t":"Plain","c":[{"t":"Str","c":"caption"}]}]],
                [[{"t":"AlignDefault"},{"t":"ColWidthDefault"}]],
                [["",[],[]],[[["",[],[]],[[["",[],[]],{"t":"AlignDefault"},1,1,[{"t":"Plain","c":[{"t":"Str","c":"head"}]}]]]]]],
                [[["",[],[]],0,[],[[["",[],[]],[[["",[],[]],{"t":"AlignDefault"},1,1,[{"t":"Plain","c":[{"t":"Math","c":[{"t":"InlineMath"},"n!"]}]}]]]]]]],
                [["",[],[]],[]]
            ]}]
        }"#,
        );

        let mut census = Census::default();
        census.visit_pandoc(&mut doc);
        assert_eq!(census.strings, 2);
        assert_eq!(census.math, vec!["n!"]);
    }

    #[test]
    fn test_visitor_can_rewrite_in_place() {
        struct Promote;
        impl MutVisitor for Promote {
            fn visit_inline(&mut self, inline: &mut Inline) {
                if let Inline::Math(MathType::InlineMath, source) = inline {
                    *inline = Inline::Math(MathType::DisplayMath, std::mem::take(source));
                }
                self.walk_inline(inline);
            }
        }

        let mut doc = parse_doc(
            r#"{
            "pandoc-api-version": [1, 23, 1],
            "meta": {},
            "blocks": [{"t": "Para", "c": [{"t": "Math", "c": [{"t": "InlineMath"}, "a+b"]}]}]
        }"#,
        );
        Promote.visit_pandoc(&mut doc);

        let Block::Para(inlines) = &doc.blocks[0] else {
            panic!("expected Para");
        };
        assert_eq!(
            inlines[0],
            Inline::Math(MathType::DisplayMath, "a+b".to_string())
        );
    }
}
