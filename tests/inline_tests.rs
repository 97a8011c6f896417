//! Inline markup: phrases, escapes, line breaks, nowiki, URLs and entities.

use wikicreole::to_xhtml;

fn html(input: &str) -> String {
    to_xhtml(input).expect("conversion failed")
}

// === Phrases ===

#[test]
fn phrase_strong_and_emphasis() {
    assert_eq!(
        html("= Title =\n**bold** and //italic//"),
        "<h1>Title</h1>\n<p><strong>bold</strong> and <em>italic</em></p>\n"
    );
}

#[test]
fn phrase_other_kinds() {
    assert_eq!(
        html("a ##mono## ^^sup^^ ,,sub,, __u__"),
        "<p>a <tt>mono</tt> <sup>sup</sup> <sub>sub</sub> <span class=\"underline\">u</span></p>\n"
    );
}

#[test]
fn phrase_unsupported_markers_are_text() {
    assert_eq!(
        html("--(del)-- ++ins++ ??cite??"),
        "<p>--(del)-- ++ins++ ??cite??</p>\n"
    );
}

/// A marker that does not match the innermost open phrase is printed as text.
#[test]
fn phrase_mismatched_close_is_literal() {
    assert_eq!(
        html("**bold //both** end"),
        "<p><strong>bold <em>both** end</em></strong></p>\n"
    );
}

/// Open phrases are closed at the end of the paragraph.
#[test]
fn phrase_closed_at_paragraph_end() {
    assert_eq!(
        html("**a\n\nb**"),
        "<p><strong>a</strong></p>\n<p>b<strong></strong></p>\n"
    );
}

// === Escapes and breaks ===

#[test]
fn tilde_escapes_markup() {
    assert_eq!(html("~**not bold~**"), "<p>**not bold**</p>\n");
    assert_eq!(html("~http://a.b/"), "<p>http://a.b/</p>\n");
    assert_eq!(html("~~"), "<p>~</p>\n");
}

#[test]
fn tilde_before_blank_is_kept() {
    assert_eq!(html("~ x"), "<p>~ x</p>\n");
}

#[test]
fn tilde_escapes_whole_character() {
    assert_eq!(html("~é"), "<p>é</p>\n");
}

#[test]
fn forced_line_break() {
    assert_eq!(html("line\\\\break"), "<p>line<br />\nbreak</p>\n");
}

// === Nowiki ===

#[test]
fn inline_nowiki_is_code() {
    assert_eq!(
        html("{{{inline <b>}}} text"),
        "<p><code>inline &lt;b&gt;</code> text</p>\n"
    );
}

#[test]
fn unterminated_nowiki_is_text() {
    assert_eq!(
        html("{{{unterminated"),
        "<p>&#123;&#123;&#123;unterminated</p>\n"
    );
}

// === Bare URLs ===

#[test]
fn bare_url_drops_trailing_punctuation() {
    assert_eq!(
        html("see http://example.org/docs. and more"),
        "<p>see <a href=\"http://example.org/docs\">http://example.org/docs</a>. and more</p>\n"
    );
}

#[test]
fn bare_url_keeps_inner_punctuation() {
    assert_eq!(
        html("see http://example.org/a,b"),
        "<p>see <a href=\"http://example.org/a,b\">http://example.org/a,b</a></p>\n"
    );
}

// === Entities, placeholders and blanks ===

#[test]
fn entity_references() {
    assert_eq!(
        html("&amp; &copy; &bogus; &#169; &#xA9; & x"),
        "<p>&amp; &copy; &amp;bogus; &#169; &#xA9; &amp; x</p>\n"
    );
}

#[test]
fn placeholder_is_escaped_text() {
    assert_eq!(html("<<<raw <b>>>>"), "<p>raw &lt;b&gt;</p>\n");
}

#[test]
fn outer_blanks_are_dropped() {
    assert_eq!(
        html("  leading  spaces   collapse  "),
        "<p>leading  spaces   collapse</p>\n"
    );
}

#[test]
fn unterminated_link_is_text() {
    assert_eq!(html("[[a|b"), "<p>[[a|b</p>\n");
}

#[test]
fn line_endings_are_normalized() {
    assert_eq!(html("a\r\nb\rc"), html("a\nb\nc"));
}
