//! Link, image and plugin resolution.
//!
//! Resolvers are optional capabilities handed to [`convert`](crate::convert).
//! Each receives the raw target text and a [`Scope`] describing the
//! conversion in progress. Whatever is not supplied falls back to
//! [`DefaultResolver`].

use crate::error::Result;
use crate::escape::escape_name;
use crate::{OutputMode, Options};

/// Anchor produced for a link.
///
/// A link needs at least an `href` or a `name`; an anchor with neither is
/// treated as a rejection and the source text is printed instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Anchor {
    pub href: Option<String>,
    pub name: Option<String>,
    /// Link text, escaped on output.
    pub text: String,
    pub id: Option<String>,
    pub class: Option<String>,
    pub rel: Option<String>,
    pub rev: Option<String>,
    pub title: Option<String>,
    /// Written unescaped before the anchor.
    pub before: Option<String>,
    /// Written unescaped after the anchor.
    pub after: Option<String>,
    /// Template mode only: emit `{% tag 'target','text' %}` instead of `<a>`.
    pub template_tag: Option<String>,
}

impl Anchor {
    /// Anchor pointing at `href` with the given text.
    pub fn to(href: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
            text: text.into(),
            ..Self::default()
        }
    }

    /// Named anchor without an `href`.
    pub fn named(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_template_tag(mut self, tag: impl Into<String>) -> Self {
        self.template_tag = Some(tag.into());
        self
    }

    pub(crate) fn is_link(&self) -> bool {
        self.href.is_some() || self.name.is_some()
    }
}

/// Image produced for a `{{...}}` reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Image {
    pub src: String,
    pub id: Option<String>,
    pub class: Option<String>,
    pub alt: Option<String>,
    pub title: Option<String>,
}

impl Image {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            ..Self::default()
        }
    }

    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }
}

/// Output of a plugin call. Each variant is escaped for its own context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginOutput {
    /// `{% ... %}`, body escaped as text.
    TemplateTag(String),
    /// `{{ ... }}`, body escaped as text.
    TemplateExpression(String),
    /// Escaped as element content.
    Text(String),
    /// Escaped as code content, so references are not kept.
    Markup(String),
    /// Written as is.
    Raw(String),
}

pub trait LinkResolver {
    /// Resolve `target` (the raw link text) shown as `text`.
    /// `None` prints the source text instead of a link.
    fn resolve_link(&self, target: &str, text: &str, scope: &Scope<'_, '_>) -> Option<Anchor>;
}

pub trait ImageResolver {
    /// Resolve an image `target` with alternative text `alt`.
    fn resolve_image(&self, target: &str, alt: &str, scope: &Scope<'_, '_>) -> Option<Image>;
}

pub trait PluginResolver {
    /// Expand the body of a `<< ... >>` call. `None` produces no output.
    fn resolve_plugin(&self, call: &str, scope: &Scope<'_, '_>) -> Option<PluginOutput>;
}

/// The resolvers used for one conversion.
#[derive(Clone, Copy, Default)]
pub struct Resolvers<'r> {
    pub link: Option<&'r dyn LinkResolver>,
    pub image: Option<&'r dyn ImageResolver>,
    pub plugin: Option<&'r dyn PluginResolver>,
}

impl<'r> Resolvers<'r> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_link(mut self, resolver: &'r dyn LinkResolver) -> Self {
        self.link = Some(resolver);
        self
    }

    pub fn with_image(mut self, resolver: &'r dyn ImageResolver) -> Self {
        self.image = Some(resolver);
        self
    }

    pub fn with_plugin(mut self, resolver: &'r dyn PluginResolver) -> Self {
        self.plugin = Some(resolver);
        self
    }

    pub(crate) fn link(&self) -> &'r dyn LinkResolver {
        self.link.unwrap_or(&DefaultResolver)
    }

    pub(crate) fn image(&self) -> &'r dyn ImageResolver {
        self.image.unwrap_or(&DefaultResolver)
    }

    pub(crate) fn plugin(&self) -> &'r dyn PluginResolver {
        self.plugin.unwrap_or(&DefaultResolver)
    }
}

impl std::fmt::Debug for Resolvers<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolvers")
            .field("link", &self.link.is_some())
            .field("image", &self.image.is_some())
            .field("plugin", &self.plugin.is_some())
            .finish()
    }
}

/// The conversion a resolver is called from.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'s, 'r> {
    options: &'s Options,
    resolvers: &'s Resolvers<'r>,
    expanding_plugin: bool,
}

impl<'s, 'r> Scope<'s, 'r> {
    pub(crate) fn new(options: &'s Options, resolvers: &'s Resolvers<'r>, expanding_plugin: bool) -> Self {
        Self {
            options,
            resolvers,
            expanding_plugin,
        }
    }

    #[inline]
    pub fn mode(&self) -> OutputMode {
        self.options.mode
    }

    #[inline]
    pub fn options(&self) -> &'s Options {
        self.options
    }

    #[inline]
    pub(crate) fn resolvers(&self) -> &'s Resolvers<'r> {
        self.resolvers
    }

    /// True while a plugin call is being expanded. Plugin calls seen in
    /// this state produce nothing.
    #[inline]
    pub fn expanding_plugin(&self) -> bool {
        self.expanding_plugin
    }

    /// Qualify a page name against the link base.
    pub fn qualify_link(&self, target: &str) -> String {
        format!("{}{}", self.options.link_base, escape_name(target))
    }

    /// Qualify an asset name against the asset base.
    pub fn qualify_asset(&self, target: &str) -> String {
        format!("{}{}", self.options.asset_base, escape_name(target))
    }

    /// Convert nested markup with the same options and resolvers.
    ///
    /// Meant for plugins that include other content. Plugin calls inside the
    /// nested markup are suppressed.
    pub fn render(&self, source: &str) -> Result<String> {
        crate::convert::run(source, self.options, self.resolvers, true)
    }
}

/// Resolution used when no resolver is supplied.
///
/// - links: absolute URLs and `#fragments` are kept, other targets are page
///   names under [`Options::link_base`]; in template mode page links become
///   `wiki_link` template tags
/// - images: `http(s)` URLs are kept, other targets are assets under
///   [`Options::asset_base`]
/// - plugins: `{% wiki_plugin ... %}` in template mode, nothing otherwise
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultResolver;

impl LinkResolver for DefaultResolver {
    fn resolve_link(&self, target: &str, text: &str, scope: &Scope<'_, '_>) -> Option<Anchor> {
        if is_absolute_link(target) {
            return Some(Anchor::to(target, text));
        }
        let anchor = Anchor::to(scope.qualify_link(target), text);
        Some(match scope.mode() {
            OutputMode::Template => anchor.with_template_tag("wiki_link"),
            OutputMode::Xhtml => anchor,
        })
    }
}

impl ImageResolver for DefaultResolver {
    fn resolve_image(&self, target: &str, alt: &str, scope: &Scope<'_, '_>) -> Option<Image> {
        let src = if starts_with_any(target, &["http://", "https://"]) {
            target.to_string()
        } else {
            scope.qualify_asset(target)
        };
        Some(Image::new(src).with_alt(alt))
    }
}

impl PluginResolver for DefaultResolver {
    fn resolve_plugin(&self, call: &str, scope: &Scope<'_, '_>) -> Option<PluginOutput> {
        match scope.mode() {
            OutputMode::Template => Some(PluginOutput::TemplateTag(format!("wiki_plugin {call}"))),
            OutputMode::Xhtml => None,
        }
    }
}

/// `http(s)://`, `ftp(s)://` or a `#fragment`.
pub fn is_absolute_link(target: &str) -> bool {
    target.starts_with('#') || starts_with_any(target, &["http://", "https://", "ftp://", "ftps://"])
}

/// Whether `target` contains `script:` in any letter case.
pub fn is_script_url(target: &str) -> bool {
    const NEEDLE: &[u8] = b"script:";
    target
        .as_bytes()
        .windows(NEEDLE.len())
        .any(|w| w.eq_ignore_ascii_case(NEEDLE))
}

fn starts_with_any(s: &str, prefixes: &[&str]) -> bool {
    prefixes.iter().any(|p| s.starts_with(p))
}
