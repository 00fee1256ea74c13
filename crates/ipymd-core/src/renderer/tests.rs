use super::*;
use crate::mdast::Image;
use crate::parser::parse_markdown;
use ipymd_nbformat::{Cell, NotebookConfig};

fn render_with(markdown: &str, options: RendererOptions) -> Vec<Cell> {
    let writer = NotebookWriter::new(NotebookConfig::default()).unwrap();
    let mut renderer = NotebookRenderer::new(options, writer);
    renderer.render(&parse_markdown(markdown));
    renderer.finish().cells().to_vec()
}

fn render(markdown: &str) -> Vec<Cell> {
    render_with(markdown, RendererOptions::default())
}

#[test]
fn test_heading_cell() {
    assert_eq!(render("## Title"), vec![Cell::markdown("## Title")]);
}

#[test]
fn test_heading_levels() {
    for depth in 1..=6 {
        let prefix = "#".repeat(depth);
        let cells = render(&format!("{} Title", prefix));
        assert_eq!(cells, vec![Cell::markdown(format!("{} Title", prefix))]);
    }
}

#[test]
fn test_setext_heading_becomes_atx() {
    assert_eq!(render("Title\n=====\n"), vec![Cell::markdown("# Title")]);
}

#[test]
fn test_paragraph_cell() {
    assert_eq!(
        render("Hello *world*, **bold** `code` ~~old~~."),
        vec![Cell::markdown("Hello *world*, **bold** `code` ~~old~~.")]
    );
}

#[test]
fn test_paragraph_soft_break_kept() {
    assert_eq!(
        render("first line\nsecond line"),
        vec![Cell::markdown("first line\nsecond line")]
    );
}

#[test]
fn test_hard_break() {
    assert_eq!(render("a  \nb"), vec![Cell::markdown("a\nb")]);
}

#[test]
fn test_one_cell_per_block() {
    let cells = render("# Title\n\nFirst.\n\nSecond.\n");
    assert_eq!(
        cells,
        vec![
            Cell::markdown("# Title"),
            Cell::markdown("First."),
            Cell::markdown("Second."),
        ]
    );
}

#[test]
fn test_python_fence_becomes_code_cell() {
    assert_eq!(
        render("```python\nx = 1\n```\n"),
        vec![Cell::code("x = 1")]
    );
}

#[test]
fn test_multiline_code_cell() {
    assert_eq!(
        render("```python\nimport os\n\nprint(os.getcwd())\n```\n"),
        vec![Cell::code("import os\n\nprint(os.getcwd())")]
    );
}

#[test]
fn test_other_fence_stays_markdown() {
    assert_eq!(
        render("```r\nx <- 1\n```\n"),
        vec![Cell::markdown("```r\nx <- 1\n```")]
    );
}

#[test]
fn test_untagged_fence_stays_markdown() {
    assert_eq!(
        render("```\nplain\n```\n"),
        vec![Cell::markdown("```\nplain\n```")]
    );
}

#[test]
fn test_indented_code_stays_markdown() {
    assert_eq!(
        render("    indented\n"),
        vec![Cell::markdown("```\nindented\n```")]
    );
}

#[test]
fn test_declared_language() {
    let options = RendererOptions {
        code_language: "r".to_string(),
    };
    let cells = render_with("```r\nx <- 1\n```\n\n```python\ny = 2\n```\n", options);
    assert_eq!(
        cells,
        vec![
            Cell::code("x <- 1"),
            Cell::markdown("```python\ny = 2\n```"),
        ]
    );
}

#[test]
fn test_fence_language_is_first_word() {
    assert_eq!(
        render("```python {.numberLines}\nx = 1\n```\n"),
        vec![Cell::code("x = 1")]
    );
}

#[test]
fn test_blockquote() {
    assert_eq!(
        render("> hello\n> world\n"),
        vec![Cell::markdown("> hello\n> world")]
    );
}

#[test]
fn test_blockquote_paragraphs() {
    assert_eq!(
        render("> one\n>\n> two\n"),
        vec![Cell::markdown("> one\n> \n> two")]
    );
}

#[test]
fn test_blockquote_nested_blocks_append_one_cell() {
    let cells = render("> # Quoted\n> text\n");
    assert_eq!(cells, vec![Cell::markdown("> # Quoted\n> \n> text")]);
}

#[test]
fn test_html_block() {
    assert_eq!(
        render("<div>\n<b>hi</b>\n</div>\n"),
        vec![Cell::markdown("<div>\n<b>hi</b>\n</div>")]
    );
}

#[test]
fn test_inline_html() {
    assert_eq!(
        render("some <b>bold</b> text"),
        vec![Cell::markdown("some <b>bold</b> text")]
    );
}

#[test]
fn test_unordered_list() {
    assert_eq!(render("* a\n* b\n"), vec![Cell::markdown("* a\n* b")]);
    assert_eq!(render("- a\n- b\n"), vec![Cell::markdown("* a\n* b")]);
}

#[test]
fn test_ordered_list_numbers_from_one() {
    assert_eq!(render("1. a\n2. b\n"), vec![Cell::markdown("1. a\n2. b")]);
    assert_eq!(render("5. a\n6. b\n"), vec![Cell::markdown("1. a\n2. b")]);
}

#[test]
fn test_loose_list() {
    assert_eq!(render("* a\n\n* b\n"), vec![Cell::markdown("* a\n* b")]);
}

#[test]
fn test_list_item_inline_markup() {
    assert_eq!(
        render("* **a** and [b](http://b.example)\n"),
        vec![Cell::markdown("* **a** and [b](http://b.example)")]
    );
}

// Known boundary: items are recovered one per line, so multi-line items
// are split into several items.
#[test]
fn test_multiline_list_item_is_split() {
    assert_eq!(
        render("* first\n  continued\n* second\n"),
        vec![Cell::markdown("* first\n* continued\n* second")]
    );
}

#[test]
fn test_nested_list_is_flattened() {
    assert_eq!(
        render("* a\n  * b\n* c\n"),
        vec![Cell::markdown("* a\n* * b\n* c")]
    );
}

#[test]
fn test_thematic_break_dropped() {
    assert_eq!(
        render("before\n\n---\n\nafter\n"),
        vec![Cell::markdown("before"), Cell::markdown("after")]
    );
}

#[test]
fn test_table_dropped() {
    let cells = render("Intro\n\n| a | b |\n|---|---|\n| 1 | 2 |\n\nOutro\n");
    assert_eq!(cells, vec![Cell::markdown("Intro"), Cell::markdown("Outro")]);
}

#[test]
fn test_only_table() {
    assert!(render("| a |\n|---|\n| 1 |\n").is_empty());
}

#[test]
fn test_link_rendering() {
    assert_eq!(
        render("[docs](https://docs.example)"),
        vec![Cell::markdown("[docs](https://docs.example)")]
    );
}

#[test]
fn test_autolink_renders_empty() {
    assert_eq!(
        render("see <https://x.example> now"),
        vec![Cell::markdown("see  now")]
    );
}

#[test]
fn test_image_uses_title_over_alt() {
    assert_eq!(
        render("![alt text](img.png)"),
        vec![Cell::markdown("![alt text](img.png)")]
    );
    assert_eq!(
        render("![alt text](img.png \"Title\")"),
        vec![Cell::markdown("![Title](img.png)")]
    );
}

#[test]
fn test_render_inline_pure() {
    assert_eq!(render_inline(&Inline::InlineCode("x".into())), "`x`");
    assert_eq!(
        render_inline(&Inline::Strong(vec![Inline::text("b")])),
        "**b**"
    );
    assert_eq!(
        render_inline(&Inline::Emphasis(vec![Inline::text("i")])),
        "*i*"
    );
    assert_eq!(render_inline(&Inline::Break), "\n");
    assert_eq!(render_inline(&Inline::Autolink("http://a".into())), "");
    assert_eq!(
        render_inline(&Inline::Image(Image {
            url: "a.png".into(),
            title: None,
            alt: "alt".into(),
        })),
        "![alt](a.png)"
    );
}

#[test]
fn test_code_span_with_backticks() {
    assert_eq!(render_inline(&Inline::InlineCode("a`b".into())), "``a`b``");
    assert_eq!(render_inline(&Inline::InlineCode("`x`".into())), "`` `x` ``");
    assert_eq!(render_inline(&Inline::InlineCode(" y ".into())), "`  y  `");
    assert_eq!(render_inline(&Inline::InlineCode(" ".into())), "` `");
}

#[test]
fn test_code_span_cell_keeps_content() {
    assert_eq!(
        render("Run `` `cmd` `` now"),
        vec![Cell::markdown("Run `` `cmd` `` now")]
    );
}

#[test]
fn test_escapes_and_entities_in_cells() {
    assert_eq!(
        render("# 1\\. not a list &amp; more"),
        vec![Cell::markdown("# 1\\. not a list &amp; more")]
    );
    assert_eq!(
        render("* \\*literal\\*"),
        vec![Cell::markdown("* \\*literal\\*")]
    );
}

#[test]
fn test_link_falls_back_to_title() {
    let link = Inline::Link(crate::mdast::Link {
        url: "http://a".into(),
        title: Some("A".into()),
        children: vec![],
    });
    assert_eq!(render_inline(&link), "[A](http://a)");
}

#[test]
fn test_render_block_pure() {
    assert_eq!(render_block(&Block::ThematicBreak), "");
    assert_eq!(
        render_block(&Block::list(
            true,
            vec![
                vec![Block::paragraph(vec![Inline::text("a")])],
                vec![Block::paragraph(vec![Inline::text("b")])],
            ]
        )),
        "1. a\n2. b"
    );
    assert_eq!(
        render_block(&Block::code(Some("sh"), "ls")),
        "```sh\nls\n```"
    );
}

#[test]
fn test_document_order() {
    let cells = render("# A\n\n```python\na = 1\n```\n\ntext\n\n```python\nb = 2\n```\n");
    let kinds: Vec<&str> = cells.iter().map(Cell::cell_type).collect();
    assert_eq!(kinds, vec!["markdown", "code", "markdown", "code"]);
}

struct CountingVisitor {
    blocks: Vec<&'static str>,
}

impl BlockVisitor for CountingVisitor {
    fn visit_heading(&mut self, _: &Heading) {
        self.blocks.push("heading");
    }
    fn visit_paragraph(&mut self, _: &Paragraph) {
        self.blocks.push("paragraph");
    }
    fn visit_blockquote(&mut self, _: &Blockquote) {
        self.blocks.push("blockquote");
    }
    fn visit_code(&mut self, _: &Code) {
        self.blocks.push("code");
    }
    fn visit_html(&mut self, _: &Html) {
        self.blocks.push("html");
    }
    fn visit_list(&mut self, _: &List) {
        self.blocks.push("list");
    }
    fn visit_thematic_break(&mut self) {
        self.blocks.push("rule");
    }
    fn visit_table(&mut self, _: &Table) {
        self.blocks.push("table");
    }
}

#[test]
fn test_visitor_dispatch() {
    let root = parse_markdown(
        "# h\n\np\n\n> q\n\n```\nc\n```\n\n<div>\nx\n</div>\n\n* l\n\n---\n\n| t |\n|---|\n| 1 |\n",
    );
    let mut visitor = CountingVisitor { blocks: Vec::new() };
    root.accept(&mut visitor);
    assert_eq!(
        visitor.blocks,
        vec![
            "heading",
            "paragraph",
            "blockquote",
            "code",
            "html",
            "list",
            "rule",
            "table"
        ]
    );
}
