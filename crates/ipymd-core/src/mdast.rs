//! Markdown construct tree
//!
//! A closed set of the block and inline constructs the notebook renderer
//! distinguishes. Built from the Markdown parser's event stream by
//! [`crate::parser::parse_markdown`].

/// Root of a parsed Markdown document
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Root {
    pub children: Vec<Block>,
}

/// Block-level construct
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading(Heading),
    Paragraph(Paragraph),
    Blockquote(Blockquote),
    Code(Code),
    /// Raw block-level markup
    Html(Html),
    List(List),
    ThematicBreak,
    Table(Table),
}

/// Inline construct
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text(String),
    InlineCode(String),
    Strong(Vec<Inline>),
    Emphasis(Vec<Inline>),
    Strikethrough(Vec<Inline>),
    Image(Image),
    Link(Link),
    /// `<http://...>` or `<user@host>`
    Autolink(String),
    /// Hard line break
    Break,
    SoftBreak,
    /// Inline raw tag
    Html(String),
}

/// Heading node (# to ######)
#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    pub depth: u8,
    pub children: Vec<Inline>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub children: Vec<Inline>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Blockquote {
    pub children: Vec<Block>,
}

/// Code block node
#[derive(Debug, Clone, PartialEq)]
pub struct Code {
    /// Full info string of a fenced block; `None` for indented blocks
    pub info: Option<String>,
    /// Block content without the final line terminator
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Html {
    pub value: String,
}

/// List node (ordered or unordered)
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    pub ordered: bool,
    pub children: Vec<ListItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    pub children: Vec<Block>,
}

/// Table node, header row first
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub children: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub children: Vec<TableCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    pub children: Vec<Inline>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub url: String,
    pub title: Option<String>,
    pub children: Vec<Inline>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub url: String,
    pub title: Option<String>,
    pub alt: String,
}

impl Code {
    /// Language tag: the first word of the info string
    pub fn lang(&self) -> Option<&str> {
        self.info.as_deref().and_then(|info| info.split_whitespace().next())
    }
}

impl Root {
    pub fn new(children: Vec<Block>) -> Self {
        Self { children }
    }
}

// Convenience constructors
impl Block {
    pub fn heading(depth: u8, children: Vec<Inline>) -> Self {
        Block::Heading(Heading { depth, children })
    }

    pub fn paragraph(children: Vec<Inline>) -> Self {
        Block::Paragraph(Paragraph { children })
    }

    pub fn blockquote(children: Vec<Block>) -> Self {
        Block::Blockquote(Blockquote { children })
    }

    pub fn code(info: Option<&str>, value: impl Into<String>) -> Self {
        Block::Code(Code {
            info: info.map(str::to_string),
            value: value.into(),
        })
    }

    pub fn html(value: impl Into<String>) -> Self {
        Block::Html(Html {
            value: value.into(),
        })
    }

    pub fn list(ordered: bool, items: Vec<Vec<Block>>) -> Self {
        Block::List(List {
            ordered,
            children: items
                .into_iter()
                .map(|children| ListItem { children })
                .collect(),
        })
    }
}

impl Inline {
    pub fn text(s: impl Into<String>) -> Self {
        Inline::Text(s.into())
    }

    pub fn image(url: impl Into<String>, alt: impl Into<String>) -> Self {
        Inline::Image(Image {
            url: url.into(),
            title: None,
            alt: alt.into(),
        })
    }
}
