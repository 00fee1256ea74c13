//! Markdown parser
//!
//! Folds the pulldown-cmark event stream into an [`mdast`](crate::mdast)
//! tree. Inline content is complete before the enclosing block is closed,
//! and blocks are emitted in document order.

use crate::mdast::{
    Block, Code, Image, Inline, Link, List, ListItem, Root, Table, TableCell, TableRow,
};
use pulldown_cmark::{CodeBlockKind, Event, LinkType, Options, Parser, Tag};
use std::ops::Range;

/// Parse Markdown text into a construct tree
///
/// Tables and strikethrough are recognized. Parsing never fails: anything
/// the tree has no variant for is skipped.
///
/// Text keeps its source spelling: entity references and backslash escapes
/// are not decoded, so rendering the tree back does not change meaning.
pub fn parse_markdown(source: &str) -> Root {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let mut builder = TreeBuilder::new(source);
    for (event, range) in Parser::new_ext(source, options).into_offset_iter() {
        builder.event(event, range);
    }
    builder.finish()
}

/// Open construct waiting for its end event
enum Frame {
    Paragraph(Vec<Inline>),
    Heading(u8, Vec<Inline>),
    Blockquote(Vec<Block>),
    Code {
        info: Option<String>,
        value: String,
    },
    Html(String),
    List {
        ordered: bool,
        items: Vec<ListItem>,
    },
    /// Tight items hold inline content directly, without a paragraph
    Item {
        blocks: Vec<Block>,
        inlines: Vec<Inline>,
    },
    Table(Vec<TableRow>),
    TableRow(Vec<TableCell>),
    TableCell(Vec<Inline>),
    Emphasis(Vec<Inline>),
    Strong(Vec<Inline>),
    Strikethrough(Vec<Inline>),
    Link {
        url: String,
        title: Option<String>,
        autolink: bool,
        children: Vec<Inline>,
    },
    Image {
        url: String,
        title: Option<String>,
        children: Vec<Inline>,
    },
    /// Container with no tree counterpart; its blocks go to the parent
    Transparent(Vec<Block>),
}

struct TreeBuilder<'a> {
    source: &'a str,
    root: Vec<Block>,
    stack: Vec<Frame>,
    /// End offset of the last text event
    last_text_end: usize,
}

impl<'a> TreeBuilder<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            root: Vec::new(),
            stack: Vec::new(),
            last_text_end: 0,
        }
    }

    fn event(&mut self, event: Event<'_>, range: Range<usize>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(_) => self.end(),
            Event::Text(text) => {
                self.text(&text, range.clone());
                self.last_text_end = range.end;
            }
            Event::Code(code) => self.push_inline(Inline::InlineCode(code.to_string())),
            Event::Html(html) => match self.stack.last_mut() {
                Some(Frame::Html(value)) => value.push_str(&html),
                _ => self.push_block(Block::html(strip_line_end(html.to_string()))),
            },
            Event::InlineHtml(html) => self.push_inline(Inline::Html(html.to_string())),
            Event::SoftBreak => self.push_inline(Inline::SoftBreak),
            Event::HardBreak => self.push_inline(Inline::Break),
            Event::Rule => self.push_block(Block::ThematicBreak),
            other => tracing::trace!(event = ?other, "skipping unsupported markdown event"),
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        let frame = match tag {
            Tag::Paragraph => Frame::Paragraph(Vec::new()),
            Tag::Heading { level, .. } => Frame::Heading(level as u8, Vec::new()),
            Tag::BlockQuote(_) => Frame::Blockquote(Vec::new()),
            Tag::CodeBlock(kind) => Frame::Code {
                info: match kind {
                    CodeBlockKind::Fenced(info) => Some(info.to_string()),
                    CodeBlockKind::Indented => None,
                },
                value: String::new(),
            },
            Tag::HtmlBlock => Frame::Html(String::new()),
            Tag::List(start) => Frame::List {
                ordered: start.is_some(),
                items: Vec::new(),
            },
            Tag::Item => Frame::Item {
                blocks: Vec::new(),
                inlines: Vec::new(),
            },
            Tag::Table(_) => Frame::Table(Vec::new()),
            // The header row has no row tag of its own
            Tag::TableHead | Tag::TableRow => Frame::TableRow(Vec::new()),
            Tag::TableCell => Frame::TableCell(Vec::new()),
            Tag::Emphasis => Frame::Emphasis(Vec::new()),
            Tag::Strong => Frame::Strong(Vec::new()),
            Tag::Strikethrough => Frame::Strikethrough(Vec::new()),
            Tag::Link {
                link_type,
                dest_url,
                title,
                ..
            } => Frame::Link {
                url: dest_url.to_string(),
                title: non_empty(&title),
                autolink: matches!(link_type, LinkType::Autolink | LinkType::Email),
                children: Vec::new(),
            },
            Tag::Image {
                dest_url, title, ..
            } => Frame::Image {
                url: dest_url.to_string(),
                title: non_empty(&title),
                children: Vec::new(),
            },
            _ => Frame::Transparent(Vec::new()),
        };
        self.stack.push(frame);
    }

    fn end(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        match frame {
            Frame::Paragraph(children) => self.push_block(Block::paragraph(children)),
            Frame::Heading(depth, children) => self.push_block(Block::heading(depth, children)),
            Frame::Blockquote(children) => self.push_block(Block::blockquote(children)),
            Frame::Code { info, value } => self.push_block(Block::Code(Code {
                info,
                value: strip_line_end(value),
            })),
            Frame::Html(value) => self.push_block(Block::html(strip_line_end(value))),
            Frame::List { ordered, items } => self.push_block(Block::List(List {
                ordered,
                children: items,
            })),
            Frame::Item {
                mut blocks,
                mut inlines,
            } => {
                flush_inlines(&mut blocks, &mut inlines);
                if let Some(Frame::List { items, .. }) = self.stack.last_mut() {
                    items.push(ListItem { children: blocks });
                }
            }
            Frame::Table(rows) => self.push_block(Block::Table(Table { children: rows })),
            Frame::TableRow(cells) => {
                if let Some(Frame::Table(rows)) = self.stack.last_mut() {
                    rows.push(TableRow { children: cells });
                }
            }
            Frame::TableCell(children) => {
                if let Some(Frame::TableRow(cells)) = self.stack.last_mut() {
                    cells.push(TableCell { children });
                }
            }
            Frame::Emphasis(children) => self.push_inline(Inline::Emphasis(children)),
            Frame::Strong(children) => self.push_inline(Inline::Strong(children)),
            Frame::Strikethrough(children) => self.push_inline(Inline::Strikethrough(children)),
            Frame::Link {
                url,
                title,
                autolink,
                children,
            } => {
                if autolink {
                    self.push_inline(Inline::Autolink(url));
                } else {
                    self.push_inline(Inline::Link(Link {
                        url,
                        title,
                        children,
                    }));
                }
            }
            Frame::Image {
                url,
                title,
                children,
            } => self.push_inline(Inline::Image(Image {
                url,
                title,
                alt: plain_text(&children),
            })),
            Frame::Transparent(blocks) => {
                for block in blocks {
                    self.push_block(block);
                }
            }
        }
    }

    fn text(&mut self, text: &str, range: Range<usize>) {
        match self.stack.last_mut() {
            Some(Frame::Code { value, .. }) | Some(Frame::Html(value)) => value.push_str(text),
            _ => {
                let raw = self.source_text(text, range);
                self.push_inline(Inline::text(raw));
            }
        }
    }

    /// Undo the decoding the parser applied to an inline text event
    ///
    /// An entity reference is its own event spanning `&...;` in the source.
    /// An escaped character starts a new event right after its backslash,
    /// unless that backslash already belongs to the previous text event.
    fn source_text(&self, text: &str, range: Range<usize>) -> String {
        let spelled = self.source.get(range.clone()).unwrap_or(text);
        if spelled != text && spelled.starts_with('&') && spelled.ends_with(';') {
            return spelled.to_string();
        }

        let escaped = range.start > 0
            && self.source.as_bytes()[range.start - 1] == b'\\'
            && self.last_text_end != range.start
            && text.starts_with(|c: char| c.is_ascii_punctuation());
        if escaped {
            format!("\\{}", text)
        } else {
            text.to_string()
        }
    }

    fn push_inline(&mut self, inline: Inline) {
        match self.stack.last_mut() {
            Some(
                Frame::Paragraph(children)
                | Frame::Heading(_, children)
                | Frame::TableCell(children)
                | Frame::Emphasis(children)
                | Frame::Strong(children)
                | Frame::Strikethrough(children)
                | Frame::Link { children, .. }
                | Frame::Image { children, .. },
            ) => children.push(inline),
            Some(Frame::Item { inlines, .. }) => inlines.push(inline),
            _ => tracing::trace!(inline = ?inline, "dropping inline outside of a block"),
        }
    }

    /// Attach a block to the innermost open block container
    fn push_block(&mut self, block: Block) {
        for frame in self.stack.iter_mut().rev() {
            match frame {
                Frame::Blockquote(children) | Frame::Transparent(children) => {
                    children.push(block);
                    return;
                }
                Frame::Item { blocks, inlines } => {
                    flush_inlines(blocks, inlines);
                    blocks.push(block);
                    return;
                }
                _ => {}
            }
        }
        self.root.push(block);
    }

    fn finish(mut self) -> Root {
        // Close anything left open by a truncated event stream
        while !self.stack.is_empty() {
            self.end();
        }
        Root::new(self.root)
    }
}

fn flush_inlines(blocks: &mut Vec<Block>, inlines: &mut Vec<Inline>) {
    if !inlines.is_empty() {
        blocks.push(Block::paragraph(std::mem::take(inlines)));
    }
}

/// Drop the line terminator the parser leaves on block content
fn strip_line_end(mut value: String) -> String {
    if value.ends_with('\n') {
        value.pop();
        if value.ends_with('\r') {
            value.pop();
        }
    }
    value
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Text content of inline nodes, without markup
fn plain_text(nodes: &[Inline]) -> String {
    let mut result = String::new();
    for node in nodes {
        match node {
            Inline::Text(s) | Inline::InlineCode(s) => result.push_str(s),
            Inline::Strong(children)
            | Inline::Emphasis(children)
            | Inline::Strikethrough(children) => result.push_str(&plain_text(children)),
            Inline::Link(link) => result.push_str(&plain_text(&link.children)),
            Inline::Image(img) => result.push_str(&img.alt),
            Inline::Break | Inline::SoftBreak => result.push(' '),
            Inline::Autolink(_) | Inline::Html(_) => {}
        }
    }
    result
}
