//! Block structure: paragraphs, headings, rules, lists, tables, indents and
//! verbatim blocks.

use wikicreole::to_xhtml;

fn html(input: &str) -> String {
    to_xhtml(input).expect("conversion failed")
}

// === Paragraphs ===

#[test]
fn empty_input() {
    assert_eq!(html(""), "");
    assert_eq!(html("\n\n"), "");
}

#[test]
fn blank_line_separates_paragraphs() {
    assert_eq!(html("a\n\nb"), "<p>a</p>\n<p>b</p>\n");
}

#[test]
fn line_break_joins_paragraph_lines() {
    assert_eq!(html("a\nb\nc"), "<p>a b c</p>\n");
}

// === Headings and rules ===

#[test]
fn heading_levels() {
    assert_eq!(html("= A\n== B\n= C"), "<h1>A</h1>\n<h2>B</h2>\n<h1>C</h1>\n");
}

#[test]
fn heading_with_inline_markup() {
    assert_eq!(
        html("== **bold** head =="),
        "<h2><strong>bold</strong> head</h2>\n"
    );
}

#[test]
fn heading_escaped_trailing_equals() {
    assert_eq!(html("= H ~=\n"), "<h1>H =</h1>\n");
}

#[test]
fn horizontal_rule() {
    assert_eq!(html("----"), "<hr />\n");
    assert_eq!(html("text\n----\nmore"), "<p>text</p>\n<hr />\n<p>more</p>\n");
    assert_eq!(html("= A\n----"), "<h1>A</h1>\n<hr />\n");
}

// === Lists ===

#[test]
fn unordered_list() {
    assert_eq!(html("* one\n* two"), "<ul>\n<li>one</li>\n<li>two</li>\n</ul>\n");
}

#[test]
fn nested_unordered_list() {
    assert_eq!(
        html("* a\n** b\n*** c\n* d"),
        "<ul>\n<li>a\n<ul>\n<li>b\n<ul>\n<li>c</li>\n</ul>\n</li>\n</ul>\n</li>\n<li>d</li>\n</ul>\n"
    );
}

#[test]
fn nested_ordered_list() {
    assert_eq!(
        html("# a\n## b\n# c"),
        "<ol>\n<li>a\n<ol>\n<li>b</li>\n</ol>\n</li>\n<li>c</li>\n</ol>\n"
    );
}

#[test]
fn list_kind_switch_at_same_level() {
    assert_eq!(html("* a\n# b"), "<ul>\n<li>a</li>\n</ul>\n<ol>\n<li>b</li>\n</ol>\n");
    assert_eq!(
        html("# a\n; b : c"),
        "<ol>\n<li>a</li>\n</ol>\n<dl>\n<dt>b</dt>\n<dd>c</dd>\n</dl>\n"
    );
}

#[test]
fn definition_list() {
    assert_eq!(
        html("; term : def\n; t2\n: d2"),
        "<dl>\n<dt>term</dt>\n<dd>def</dd>\n<dt>t2</dt>\n<dd>d2</dd>\n</dl>\n"
    );
    assert_eq!(html("; a\n: b"), "<dl>\n<dt>a</dt>\n<dd>b</dd>\n</dl>\n");
}

#[test]
fn blank_line_ends_list() {
    assert_eq!(
        html("* a\n\n* b"),
        "<ul>\n<li>a</li>\n</ul>\n<ul>\n<li>b</li>\n</ul>\n"
    );
}

/// A single star at paragraph start is a list marker, a double one is bold.
#[test]
fn star_at_line_start() {
    assert_eq!(html("*bold*"), "<ul>\n<li>bold*</li>\n</ul>\n");
    assert_eq!(
        html("**bold**\n* item"),
        "<p><strong>bold</strong></p>\n<ul>\n<li>item</li>\n</ul>\n"
    );
}

#[test]
fn phrase_closed_at_list_item_end() {
    assert_eq!(
        html("* a **b\n* c"),
        "<ul>\n<li>a <strong>b</strong></li>\n<li>c</li>\n</ul>\n"
    );
}

// === Tables ===

#[test]
fn table_with_header_cells() {
    assert_eq!(
        html("|= a |= b |\n| 1 | 2 |"),
        "<table>\n<tr><th>a</th><th>b</th></tr>\n<tr><td>1</td><td>2</td></tr>\n</table>\n"
    );
}

#[test]
fn table_rows_without_closing_bar() {
    assert_eq!(
        html("|= h\n|x"),
        "<table>\n<tr><th>h</th></tr>\n<tr><td>x</td></tr>\n</table>\n"
    );
}

#[test]
fn table_cell_closes_phrases() {
    assert_eq!(
        html("| a | **b\n| c |"),
        "<table>\n<tr><td>a</td><td><strong>b</strong></td></tr>\n<tr><td>c</td></tr>\n</table>\n"
    );
}

#[test]
fn table_ends_at_blank_line() {
    assert_eq!(
        html("|a|b|\n\ntext"),
        "<table>\n<tr><td>a</td><td>b</td></tr>\n</table>\n<p>text</p>\n"
    );
}

// === Indents ===

#[test]
fn indented_paragraphs() {
    assert_eq!(
        html("> quoted\n> more"),
        "<div style=\"margin-left:2em\">\n<p>quoted</p>\n<p>more</p>\n</div>\n"
    );
}

#[test]
fn indent_continues_on_plain_line() {
    assert_eq!(
        html("> a\nb"),
        "<div style=\"margin-left:2em\">\n<p>a b</p>\n</div>\n"
    );
}

#[test]
fn indent_line_starting_with_strong() {
    assert_eq!(
        html("> a\n** |\nb"),
        "<div style=\"margin-left:2em\">\n<p>a <strong> | b</strong></p>\n</div>\n"
    );
}

// === Verbatim ===

#[test]
fn verbatim_block() {
    assert_eq!(html("{{{\ncode <x>\n}}}"), "<pre>code &lt;x&gt;</pre>\n");
}

#[test]
fn verbatim_indented_terminator_is_content() {
    assert_eq!(
        html("{{{\nline\n }}}\n}}}"),
        "<pre>line\n&#125;&#125;&#125;</pre>\n"
    );
}

#[test]
fn verbatim_nested_opener_is_content() {
    assert_eq!(html("{{{\n{{{\n}}}\n"), "<pre>&#123;&#123;&#123;</pre>\n");
}

#[test]
fn stray_nowiki_close_is_text() {
    assert_eq!(html("}}}"), "<p>&#125;&#125;&#125;</p>\n");
}
