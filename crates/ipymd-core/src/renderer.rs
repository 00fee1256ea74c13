//! Markdown tree to notebook cells
//!
//! Rendering is split in two:
//! - pure functions ([`render_inline`], [`render_block`]) turn constructs
//!   into Markdown text, used for content nested inside another construct
//! - [`NotebookRenderer`] visits top-level blocks in document order and
//!   appends one cell per block it keeps

use crate::mdast::{
    Block, Blockquote, Code, Heading, Html, Inline, List, ListItem, Paragraph, Root, Table,
};
use ipymd_nbformat::{DEFAULT_LANGUAGE, NotebookWriter};

/// One method per block construct
pub trait BlockVisitor {
    fn visit_heading(&mut self, heading: &Heading);
    fn visit_paragraph(&mut self, paragraph: &Paragraph);
    fn visit_blockquote(&mut self, blockquote: &Blockquote);
    fn visit_code(&mut self, code: &Code);
    fn visit_html(&mut self, html: &Html);
    fn visit_list(&mut self, list: &List);
    fn visit_thematic_break(&mut self);
    fn visit_table(&mut self, table: &Table);
}

impl Block {
    pub fn accept<V: BlockVisitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Block::Heading(h) => visitor.visit_heading(h),
            Block::Paragraph(p) => visitor.visit_paragraph(p),
            Block::Blockquote(b) => visitor.visit_blockquote(b),
            Block::Code(c) => visitor.visit_code(c),
            Block::Html(h) => visitor.visit_html(h),
            Block::List(l) => visitor.visit_list(l),
            Block::ThematicBreak => visitor.visit_thematic_break(),
            Block::Table(t) => visitor.visit_table(t),
        }
    }
}

impl Root {
    /// Visit top-level blocks in document order
    pub fn accept<V: BlockVisitor + ?Sized>(&self, visitor: &mut V) {
        for block in &self.children {
            block.accept(visitor);
        }
    }
}

/// Render one inline construct as Markdown text
pub fn render_inline(node: &Inline) -> String {
    match node {
        Inline::Text(text) => text.clone(),
        Inline::InlineCode(code) => render_code_span(code),
        Inline::Strong(children) => format!("**{}**", render_inlines(children)),
        Inline::Emphasis(children) => format!("*{}*", render_inlines(children)),
        Inline::Strikethrough(children) => format!("~~{}~~", render_inlines(children)),
        Inline::Image(img) => {
            let label = img.title.as_deref().unwrap_or(&img.alt);
            format!("![{}]({})", label, img.url)
        }
        Inline::Link(link) => {
            let content = render_inlines(&link.children);
            let label = if content.is_empty() {
                link.title.clone().unwrap_or_default()
            } else {
                content
            };
            format!("[{}]({})", label, link.url)
        }
        // Autolinks are not carried over
        Inline::Autolink(_) => String::new(),
        Inline::Break | Inline::SoftBreak => "\n".to_string(),
        Inline::Html(html) => html.clone(),
    }
}

/// Render a sequence of inline constructs
pub fn render_inlines(nodes: &[Inline]) -> String {
    nodes.iter().map(render_inline).collect()
}

/// Render a block construct as Markdown text
///
/// Thematic breaks and tables render to an empty string.
pub fn render_block(block: &Block) -> String {
    match block {
        Block::Heading(h) => render_heading(h),
        Block::Paragraph(p) => render_inlines(&p.children),
        Block::Blockquote(b) => render_blockquote(b),
        Block::Code(c) => render_fence(c),
        Block::Html(h) => h.value.clone(),
        Block::List(l) => render_list(l),
        Block::ThematicBreak | Block::Table(_) => String::new(),
    }
}

/// Wrap inline code in a backtick run longer than any run it contains
///
/// Content touching the delimiters gets one space of padding on each side,
/// which the parser strips again.
fn render_code_span(code: &str) -> String {
    let mut longest = 0;
    let mut run = 0;
    for c in code.chars() {
        if c == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }

    let fence = "`".repeat(longest + 1);
    let touches = |c: char| c == '`' || c == ' ';
    let padded = !code.chars().all(|c| c == ' ')
        && (code.starts_with(touches) || code.ends_with(touches));
    if padded {
        format!("{fence} {code} {fence}")
    } else {
        format!("{fence}{code}{fence}")
    }
}

fn render_heading(heading: &Heading) -> String {
    format!(
        "{} {}",
        "#".repeat(heading.depth as usize),
        render_inlines(&heading.children)
    )
}

fn render_blockquote(blockquote: &Blockquote) -> String {
    let text = render_blocks(&blockquote.children, "\n\n");
    text.split('\n')
        .map(|line| format!("> {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Re-wrap a code block in a fence, keeping its info string
fn render_fence(code: &Code) -> String {
    format!(
        "```{}\n{}\n```",
        code.info.as_deref().unwrap_or(""),
        code.value
    )
}

/// Render a list, one item per line
///
/// Item boundaries are recovered by splitting the rendered body on line
/// breaks, so an item whose text spans several lines becomes several items.
fn render_list(list: &List) -> String {
    let body: String = list
        .children
        .iter()
        .map(|item| render_list_item(item) + "\n")
        .collect();

    let items = body.trim().split('\n');
    if list.ordered {
        items
            .enumerate()
            .map(|(i, item)| format!("{}. {}", i + 1, item))
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        items
            .map(|item| format!("* {}", item))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn render_list_item(item: &ListItem) -> String {
    render_blocks(&item.children, "\n")
}

/// Render blocks, skipping those with no text, joined by `separator`
fn render_blocks(blocks: &[Block], separator: &str) -> String {
    blocks
        .iter()
        .map(render_block)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Options for Markdown to notebook rendering
#[derive(Debug, Clone)]
pub struct RendererOptions {
    /// Fence language whose blocks become code cells
    pub code_language: String,
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            code_language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

/// Builds notebook cells from top-level Markdown blocks
///
/// [`NotebookRenderer::finish`] consumes the renderer and hands over the
/// writer holding the cells.
pub struct NotebookRenderer {
    options: RendererOptions,
    writer: NotebookWriter,
}

impl NotebookRenderer {
    pub fn new(options: RendererOptions, writer: NotebookWriter) -> Self {
        Self { options, writer }
    }

    /// Append cells for every top-level block of `root`
    pub fn render(&mut self, root: &Root) {
        root.accept(self);
    }

    pub fn finish(self) -> NotebookWriter {
        self.writer
    }
}

impl BlockVisitor for NotebookRenderer {
    fn visit_heading(&mut self, heading: &Heading) {
        self.writer.append_markdown(render_heading(heading));
    }

    fn visit_paragraph(&mut self, paragraph: &Paragraph) {
        self.writer.append_markdown(render_inlines(&paragraph.children));
    }

    fn visit_blockquote(&mut self, blockquote: &Blockquote) {
        self.writer.append_markdown(render_blockquote(blockquote));
    }

    fn visit_code(&mut self, code: &Code) {
        if code.lang() == Some(self.options.code_language.as_str()) {
            self.writer.append_code(code.value.clone());
        } else {
            self.writer.append_markdown(render_fence(code));
        }
    }

    fn visit_html(&mut self, html: &Html) {
        self.writer.append_markdown(html.value.clone());
    }

    fn visit_list(&mut self, list: &List) {
        self.writer.append_markdown(render_list(list));
    }

    fn visit_thematic_break(&mut self) {
        tracing::trace!("dropping thematic break");
    }

    fn visit_table(&mut self, table: &Table) {
        tracing::trace!(rows = table.children.len(), "dropping unsupported table");
    }
}

#[cfg(test)]
mod tests;
