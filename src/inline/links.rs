//! Links, images and plugin calls.
//!
//! Targets are handed to the resolvers in [`Scope`](crate::Scope). Anything
//! that cannot be resolved, or that would produce a `script:` URL, is
//! printed as its source markup.

use log::debug;

use crate::convert::Converter;
use crate::escape::{escape_text_into, escape_uri_into};
use crate::resolve::{is_script_url, Anchor, Image, PluginOutput, Scope};
use crate::OutputMode;

/// Split the inside of `[[...]]` or `{{...}}` at the first `|`.
///
/// Both parts are trimmed of blanks; the second is `None` without a `|`.
fn split_target(inner: &str) -> (&str, Option<&str>) {
    const BLANKS: [char; 2] = [' ', '\t'];
    match inner.split_once('|') {
        Some((target, text)) => (target.trim_matches(BLANKS), Some(text.trim_matches(BLANKS))),
        None => (inner.trim_matches(BLANKS), None),
    }
}

fn push_attr(out: &mut String, name: &str, value: Option<&str>) {
    if let Some(value) = value {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        escape_text_into(out, value);
        out.push('"');
    }
}

fn anchor_markup(out: &mut String, anchor: &Anchor) {
    out.push_str("<a");
    if let Some(href) = anchor.href.as_deref() {
        out.push_str(" href=\"");
        escape_uri_into(out, href);
        out.push('"');
    }
    push_attr(out, "id", anchor.id.as_deref());
    push_attr(out, "name", anchor.name.as_deref());
    push_attr(out, "class", anchor.class.as_deref());
    push_attr(out, "rel", anchor.rel.as_deref());
    push_attr(out, "rev", anchor.rev.as_deref());
    push_attr(out, "title", anchor.title.as_deref());
    out.push('>');
    escape_text_into(out, &anchor.text);
    out.push_str("</a>");
}

fn image_markup(out: &mut String, image: &Image) {
    out.push_str("<img src=\"");
    escape_uri_into(out, &image.src);
    out.push('"');
    push_attr(out, "id", image.id.as_deref());
    push_attr(out, "class", image.class.as_deref());
    push_attr(out, "alt", image.alt.as_deref());
    push_attr(out, "title", image.title.as_deref());
    out.push_str(" />");
}

impl Converter<'_, '_> {
    /// Bare URL: links to itself.
    pub(crate) fn insert_freestand(&mut self, data: &str) {
        self.insert_anchor(data, data, data);
    }

    /// `[[target|text]]`
    pub(crate) fn insert_link(&mut self, data: &str) {
        let Some(inner) = data.strip_prefix("[[").and_then(|s| s.strip_suffix("]]")) else {
            self.out.text(data);
            return;
        };
        let (target, text) = split_target(inner);
        self.insert_anchor(data, target, text.unwrap_or(target));
    }

    fn insert_anchor(&mut self, source: &str, target: &str, text: &str) {
        let scope = self.scope;
        if is_script_url(target) {
            debug!("rejected script link target {target:?}");
            self.out.text(source);
            return;
        }
        let resolved = scope.resolvers().link().resolve_link(target, text, &scope);
        let Some(anchor) = resolved.filter(Anchor::is_link) else {
            debug!("link target {target:?} not resolved");
            self.out.text(source);
            return;
        };
        if anchor.href.as_deref().is_some_and(is_script_url) {
            debug!("rejected script href for link target {target:?}");
            self.out.text(source);
            return;
        }

        let mut html = String::with_capacity(target.len() * 2 + text.len() + 32);
        html.push_str(anchor.before.as_deref().unwrap_or(""));
        match anchor.template_tag.as_deref() {
            Some(tag) if scope.mode() == OutputMode::Template => {
                html.push_str("{% ");
                html.push_str(tag);
                html.push_str(" '");
                escape_uri_into(&mut html, target);
                html.push_str("','");
                escape_text_into(&mut html, text);
                html.push_str("' %}");
            }
            _ => anchor_markup(&mut html, &anchor),
        }
        html.push_str(anchor.after.as_deref().unwrap_or(""));
        self.out.raw(&html);
    }

    /// `{{target|alt}}`
    pub(crate) fn insert_image(&mut self, data: &str) {
        let Some(inner) = data.strip_prefix("{{").and_then(|s| s.strip_suffix("}}")) else {
            self.out.text(data);
            return;
        };
        let (target, alt) = split_target(inner);
        let scope = self.scope;
        if is_script_url(target) {
            debug!("rejected script image target {target:?}");
            self.out.text(data);
            return;
        }
        let resolved = scope
            .resolvers()
            .image()
            .resolve_image(target, alt.unwrap_or(""), &scope);
        let image = match resolved {
            Some(image) if !is_script_url(&image.src) => image,
            _ => {
                debug!("image target {target:?} not resolved");
                self.out.text(data);
                return;
            }
        };
        let mut html = String::with_capacity(image.src.len() + 32);
        image_markup(&mut html, &image);
        self.out.raw(&html);
    }

    /// `<< call >>`. Calls made while a plugin is being expanded are dropped.
    pub(crate) fn insert_plugin(&mut self, call: &str) {
        if self.scope.expanding_plugin() {
            return;
        }
        let nested = Scope::new(self.scope.options(), self.scope.resolvers(), true);
        let Some(output) = nested.resolvers().plugin().resolve_plugin(call, &nested) else {
            return;
        };
        match output {
            PluginOutput::TemplateTag(body) => {
                let mut html = String::from("{% ");
                escape_text_into(&mut html, &body);
                html.push_str(" %}");
                self.out.raw(&html);
            }
            PluginOutput::TemplateExpression(body) => {
                let mut html = String::from("{{ ");
                escape_text_into(&mut html, &body);
                html.push_str(" }}");
                self.out.raw(&html);
            }
            PluginOutput::Text(text) => self.out.text(&text),
            PluginOutput::Markup(text) => self.out.code(&text),
            PluginOutput::Raw(html) => self.out.raw(&html),
        }
    }
}
