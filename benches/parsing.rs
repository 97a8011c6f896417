//! Performance benchmarks for wikicreole
//!
//! Run with: cargo bench

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

use wikicreole::{Options, OutputMode};

/// Sample wiki documents of various sizes
mod samples {
    pub const TINY: &str = "Hello, **world**!";

    pub const SMALL: &str = r#"= Heading =

This is a paragraph with //emphasis// and **strong** text.

* Item 1
* Item 2
** Nested item

[[Some Page|a link]] and {{{inline code}}}.
"#;

    pub const MEDIUM: &str = r#"= Project Page =

This page demonstrates various WikiCreole features.

== Features ==

* Single pass
* Table-driven state machine
** No parse tree
** No regex

=== Code Example ===

{{{
fn main() {
    println!("Hello, world!");
}
}}}

== Tables ==

|= Name |= Value |
| alpha | 1 |
| beta | **2** |

> A quoted paragraph with some //emphasized// text.

; Term : Definition
; Other term
: Its description

See http://example.org/docs and [[Main Page]]. {{logo.png|Logo}}
"#;

    /// Generate a large document by repeating sections
    pub fn large() -> String {
        let section = r#"
== Section Title ==

This paragraph contains inline elements like //emphasis//, **strong**,
##monospace##, ^^super^^, ,,sub,, and [[Links|links]].

* First bullet with **bold** text
* Second bullet with //italic// text
## Ordered, nested
## Again

|= a |= b |
| 1 | 2 |

{{{
verbatim
  block
}}}

Another paragraph with a bare URL http://example.com/page and an escape ~** here.
"#;
        section.repeat(50)
    }

    /// Many unbalanced phrase markers
    pub fn pathological_phrases() -> String {
        "**a //b ".repeat(1000) + &"c** ".repeat(1000)
    }

    /// Deep list nesting up and down
    pub fn pathological_lists() -> String {
        (1..=60)
            .chain((1..60).rev())
            .map(|depth| format!("{} item\n", "*".repeat(depth)))
            .collect()
    }
}

fn bench_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("conversion");

    group.throughput(Throughput::Bytes(samples::TINY.len() as u64));
    group.bench_function("tiny", |b| {
        b.iter(|| wikicreole::to_xhtml(black_box(samples::TINY)))
    });

    group.throughput(Throughput::Bytes(samples::SMALL.len() as u64));
    group.bench_function("small", |b| {
        b.iter(|| wikicreole::to_xhtml(black_box(samples::SMALL)))
    });

    group.throughput(Throughput::Bytes(samples::MEDIUM.len() as u64));
    group.bench_function("medium", |b| {
        b.iter(|| wikicreole::to_xhtml(black_box(samples::MEDIUM)))
    });

    let large = samples::large();
    group.throughput(Throughput::Bytes(large.len() as u64));
    group.bench_function("large", |b| {
        b.iter(|| wikicreole::to_xhtml(black_box(&large)))
    });

    let template = Options {
        mode: OutputMode::Template,
        toc: true,
        ..Options::default()
    };
    group.bench_function("large_template_toc", |b| {
        b.iter(|| wikicreole::to_html_with_options(black_box(&large), &template))
    });

    group.finish();
}

fn bench_lexing(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexing");

    let src = wikicreole::lexer::normalize(&samples::large());
    group.throughput(Throughput::Bytes(src.len() as u64));
    group.bench_function("large_tokens", |b| {
        b.iter(|| wikicreole::lexer::Lexer::new(black_box(&src)).count())
    });

    group.finish();
}

fn bench_escaping(c: &mut Criterion) {
    let mut group = c.benchmark_group("escaping");

    // Plain text (no escaping needed)
    let plain = "Hello, this is plain text without any special characters. ".repeat(100);
    group.throughput(Throughput::Bytes(plain.len() as u64));
    group.bench_function("plain_text", |b| {
        b.iter(|| {
            let mut out = String::with_capacity(plain.len());
            wikicreole::escape::escape_text_into(&mut out, black_box(&plain));
            out
        })
    });

    // Text with markup and entity references
    let heavy = "<script>alert('x')</script> &amp; more {braces} & &copy; here! ".repeat(100);
    group.throughput(Throughput::Bytes(heavy.len() as u64));
    group.bench_function("markup_heavy", |b| {
        b.iter(|| {
            let mut out = String::with_capacity(heavy.len() * 2);
            wikicreole::escape::escape_text_into(&mut out, black_box(&heavy));
            out
        })
    });

    group.finish();
}

fn bench_pathological(c: &mut Criterion) {
    let mut group = c.benchmark_group("pathological");
    group.sample_size(20);

    let phrases = samples::pathological_phrases();
    group.throughput(Throughput::Bytes(phrases.len() as u64));
    group.bench_function("unbalanced_phrases", |b| {
        b.iter(|| wikicreole::to_xhtml(black_box(&phrases)))
    });

    let lists = samples::pathological_lists();
    group.throughput(Throughput::Bytes(lists.len() as u64));
    group.bench_function("deep_lists", |b| {
        b.iter(|| wikicreole::to_xhtml(black_box(&lists)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_conversion,
    bench_lexing,
    bench_escaping,
    bench_pathological
);
criterion_main!(benches);
