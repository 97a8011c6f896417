//! Escaping for the four output contexts.
//!
//! Fast-path optimized: scans for the first escapable byte with a lookup
//! table, then bulk-copies the segments between escapes.
//!
//! - element content: [`escape_text_into`], entity references pass through
//! - code content: [`escape_code_into`], every `&` is escaped
//! - URI: [`escape_uri_into`]
//! - page and asset names: [`escape_name_into`]

const HEX: &[u8; 16] = b"0123456789ABCDEF";

/// Bytes that are replaced in element and code content.
const MARKUP_ESCAPE_TABLE: [bool; 256] = {
    let mut table = [false; 256];
    table[b'&' as usize] = true;
    table[b'<' as usize] = true;
    table[b'>' as usize] = true;
    table[b'"' as usize] = true;
    table[b'\'' as usize] = true;
    table[b'\\' as usize] = true;
    table[b'{' as usize] = true;
    table[b'}' as usize] = true;
    table
};

/// Bytes allowed verbatim in a URI. `%` and `&` are handled separately.
const URI_SAFE_TABLE: [bool; 256] = {
    let mut table = [false; 256];
    let mut b = 0;
    while b < 256 {
        let c = b as u8;
        table[b] = c.is_ascii_alphanumeric();
        b += 1;
    }
    let extra = b"_~-.=+$,:@/;?#";
    let mut i = 0;
    while i < extra.len() {
        table[extra[i] as usize] = true;
        i += 1;
    }
    table
};

/// Bytes allowed verbatim in a page or asset name.
const NAME_SAFE_TABLE: [bool; 256] = {
    let mut table = [false; 256];
    let mut b = 0;
    while b < 256 {
        let c = b as u8;
        table[b] = c.is_ascii_alphanumeric();
        b += 1;
    }
    table[b'_' as usize] = true;
    table[b'.' as usize] = true;
    table[b'-' as usize] = true;
    table[b':' as usize] = true;
    table[b'/' as usize] = true;
    table
};

#[inline]
fn markup_entity(b: u8) -> &'static str {
    match b {
        b'&' => "&amp;",
        b'<' => "&lt;",
        b'>' => "&gt;",
        b'"' => "&quot;",
        b'\'' => "&#39;",
        b'\\' => "&#92;",
        b'{' => "&#123;",
        b'}' => "&#125;",
        _ => "",
    }
}

/// Escape element content into `out`.
///
/// `&` is kept when it starts a character reference: a named entity known
/// to HTML, `&#` followed by one to five digits, or `&#x` followed by two
/// to four hex digits, each terminated by `;`. Entity-shaped text with a
/// name HTML does not define, such as `&foo_bar;`, is not passed through:
/// its `&` becomes `&amp;` so the output never carries an undefined entity.
///
/// # Example
/// ```
/// use wikicreole::escape::escape_text_into;
///
/// let mut out = String::new();
/// escape_text_into(&mut out, "a &amp; b & {c}");
/// assert_eq!(out, "a &amp; b &amp; &#123;c&#125;");
/// ```
pub fn escape_text_into(out: &mut String, input: &str) {
    let bytes = input.as_bytes();
    let mut start = 0;
    let mut pos = 0;
    while pos < bytes.len() {
        let b = bytes[pos];
        if !MARKUP_ESCAPE_TABLE[b as usize] {
            pos += 1;
            continue;
        }
        out.push_str(&input[start..pos]);
        if b == b'&' {
            if let Some(len) = reference_len(&bytes[pos + 1..]) {
                out.push_str(&input[pos..pos + 1 + len]);
                pos += 1 + len;
                start = pos;
                continue;
            }
        }
        out.push_str(markup_entity(b));
        pos += 1;
        start = pos;
    }
    out.push_str(&input[start..]);
}

/// Escape code content into `out`. Every special byte is replaced,
/// including the `&` of existing references.
pub fn escape_code_into(out: &mut String, input: &str) {
    let bytes = input.as_bytes();
    let first = match bytes.iter().position(|&b| MARKUP_ESCAPE_TABLE[b as usize]) {
        Some(p) => p,
        None => {
            out.push_str(input);
            return;
        }
    };
    out.push_str(&input[..first]);

    let mut start = first;
    for (pos, &b) in bytes.iter().enumerate().skip(first) {
        if MARKUP_ESCAPE_TABLE[b as usize] {
            out.push_str(&input[start..pos]);
            out.push_str(markup_entity(b));
            start = pos + 1;
        }
    }
    out.push_str(&input[start..]);
}

/// Escape a URI for an attribute value.
///
/// Valid `%XX` escapes are kept, a stray `%` becomes `%25`, `&` and
/// `&amp;` both become `&amp;`, and every other byte outside the safe set
/// is percent-encoded.
pub fn escape_uri_into(out: &mut String, input: &str) {
    let bytes = input.as_bytes();
    let mut pos = 0;
    while pos < bytes.len() {
        let b = bytes[pos];
        match b {
            b'%' => {
                if is_hex_pair(&bytes[pos + 1..]) {
                    out.push_str(&input[pos..pos + 3]);
                    pos += 3;
                } else {
                    out.push_str("%25");
                    pos += 1;
                }
            }
            b'&' => {
                out.push_str("&amp;");
                pos += if bytes[pos + 1..].starts_with(b"amp;") { 5 } else { 1 };
            }
            _ if URI_SAFE_TABLE[b as usize] => {
                out.push(b as char);
                pos += 1;
            }
            _ => {
                push_percent(out, b);
                pos += 1;
            }
        }
    }
}

/// Percent-encode everything outside letters, digits and `_.-:/`.
pub fn escape_name_into(out: &mut String, input: &str) {
    for &b in input.as_bytes() {
        if NAME_SAFE_TABLE[b as usize] {
            out.push(b as char);
        } else {
            push_percent(out, b);
        }
    }
}

/// Escape element content into a new string.
pub fn escape_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + input.len() / 8);
    escape_text_into(&mut out, input);
    out
}

/// Escape code content into a new string.
pub fn escape_code(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + input.len() / 8);
    escape_code_into(&mut out, input);
    out
}

/// Escape a URI into a new string.
pub fn escape_uri(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    escape_uri_into(&mut out, input);
    out
}

/// Escape a page or asset name into a new string.
pub fn escape_name(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    escape_name_into(&mut out, input);
    out
}

#[inline]
fn push_percent(out: &mut String, b: u8) {
    out.push('%');
    out.push(HEX[(b >> 4) as usize] as char);
    out.push(HEX[(b & 0xF) as usize] as char);
}

#[inline]
fn is_hex_pair(rest: &[u8]) -> bool {
    rest.len() >= 2 && rest[0].is_ascii_hexdigit() && rest[1].is_ascii_hexdigit()
}

/// Length of a character reference body following `&`, including the `;`.
fn reference_len(rest: &[u8]) -> Option<usize> {
    match rest.first()? {
        b'#' => {
            let (digits, offset) = match rest.get(1) {
                Some(b'x') => (count_while(&rest[2..], u8::is_ascii_hexdigit), 2),
                _ => (count_while(&rest[1..], u8::is_ascii_digit), 1),
            };
            let allowed = if offset == 2 { 2..=4 } else { 1..=5 };
            let semi = offset + digits;
            (allowed.contains(&digits) && rest.get(semi) == Some(&b';')).then_some(semi + 1)
        }
        b if b.is_ascii_alphabetic() || *b == b'_' => {
            let name = 1 + count_while(&rest[1..], |c| c.is_ascii_alphanumeric() || *c == b'_');
            if rest.get(name) != Some(&b';') {
                return None;
            }
            is_known_entity(&rest[..=name]).then_some(name + 1)
        }
        _ => None,
    }
}

/// Whether `name;` is a named entity that HTML decoders recognize.
fn is_known_entity(name_semi: &[u8]) -> bool {
    let Ok(name) = std::str::from_utf8(name_semi) else {
        return false;
    };
    let reference = format!("&{name}");
    let decoded = html_escape::decode_html_entities(&reference);
    decoded != reference && decoded.chars().count() <= 2
}

#[inline]
fn count_while(bytes: &[u8], pred: impl Fn(&u8) -> bool) -> usize {
    bytes.iter().take_while(|b| pred(b)).count()
}
