//! `<link>` tags.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use super::consts::rel;
use super::error::ValidationError;
use super::markup::{Markup, TagWriter};
use super::value::{OneOrMany, non_empty};
use crate::host::{ResolveError, StaticResolver};

/// Separator for list-valued `rel` and `blocking`.
const TOKEN_SEP: &str = " ";

fn default_rel() -> OneOrMany {
    OneOrMany::from(rel::STYLESHEET)
}

/// Unvalidated link attributes, as written by callers or in `hip.toml`.
///
/// `rel` defaults to `stylesheet`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkAttrs {
    pub href: String,
    #[serde(default = "default_rel")]
    pub rel: OneOrMany,
    /// `href` is a logical static-asset path, resolved at render time.
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(rename = "as")]
    pub destination: Option<String>,
    #[serde(rename = "type")]
    pub mime: Option<String>,
    #[serde(rename = "referrerpolicy")]
    pub referrer_policy: Option<String>,
    #[serde(rename = "fetchpriority")]
    pub fetch_priority: Option<String>,
    pub integrity: Option<String>,
    #[serde(rename = "crossorigin")]
    pub cross_origin: Option<String>,
    pub sizes: Option<String>,
    pub media: Option<String>,
    /// Rendered as `hreflang`.
    pub lang: Option<String>,
    pub title: Option<String>,
    pub blocking: Option<OneOrMany>,
    #[serde(default)]
    pub disabled: bool,
}

impl LinkAttrs {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            rel: default_rel(),
            is_static: false,
            destination: None,
            mime: None,
            referrer_policy: None,
            fetch_priority: None,
            integrity: None,
            cross_origin: None,
            sizes: None,
            media: None,
            lang: None,
            title: None,
            blocking: None,
            disabled: false,
        }
    }

    pub fn rel(mut self, rel: impl Into<OneOrMany>) -> Self {
        self.rel = rel.into();
        self
    }

    pub fn static_asset(mut self, on: bool) -> Self {
        self.is_static = on;
        self
    }

    /// The `as` attribute.
    pub fn destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    pub fn mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    pub fn referrer_policy(mut self, policy: impl Into<String>) -> Self {
        self.referrer_policy = Some(policy.into());
        self
    }

    pub fn fetch_priority(mut self, priority: impl Into<String>) -> Self {
        self.fetch_priority = Some(priority.into());
        self
    }

    pub fn integrity(mut self, hash: impl Into<String>) -> Self {
        self.integrity = Some(hash.into());
        self
    }

    pub fn cross_origin(mut self, mode: impl Into<String>) -> Self {
        self.cross_origin = Some(mode.into());
        self
    }

    pub fn sizes(mut self, sizes: impl Into<String>) -> Self {
        self.sizes = Some(sizes.into());
        self
    }

    pub fn media(mut self, media: impl Into<String>) -> Self {
        self.media = Some(media.into());
        self
    }

    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn blocking(mut self, blocking: impl Into<OneOrMany>) -> Self {
        self.blocking = Some(blocking.into());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

impl From<&str> for LinkAttrs {
    fn from(href: &str) -> Self {
        Self::new(href)
    }
}

impl From<String> for LinkAttrs {
    fn from(href: String) -> Self {
        Self::new(href)
    }
}

/// A validated `<link … />` tag.
#[derive(Debug, Clone)]
pub struct Link {
    href: String,
    rel: String,
    is_static: bool,
    destination: Option<String>,
    mime: Option<String>,
    referrer_policy: Option<String>,
    fetch_priority: Option<String>,
    integrity: Option<String>,
    cross_origin: Option<String>,
    sizes: Option<String>,
    media: Option<String>,
    lang: Option<String>,
    title: Option<String>,
    blocking: Option<String>,
    disabled: bool,
    cache: OnceLock<Markup>,
}

impl Link {
    /// Build a link, failing when `rel` is exactly `preload` without `as`.
    pub fn new(attrs: impl Into<LinkAttrs>) -> Result<Self, ValidationError> {
        let attrs = attrs.into();
        let joined_rel = attrs.rel.join(TOKEN_SEP);
        let destination = non_empty(attrs.destination);

        if joined_rel == rel::PRELOAD && destination.is_none() {
            return Err(ValidationError::PreloadWithoutAs { href: attrs.href });
        }

        Ok(Self {
            href: attrs.href,
            rel: joined_rel,
            is_static: attrs.is_static,
            destination,
            mime: non_empty(attrs.mime),
            referrer_policy: non_empty(attrs.referrer_policy),
            fetch_priority: non_empty(attrs.fetch_priority),
            integrity: non_empty(attrs.integrity),
            cross_origin: non_empty(attrs.cross_origin),
            sizes: non_empty(attrs.sizes),
            media: non_empty(attrs.media),
            lang: non_empty(attrs.lang),
            title: non_empty(attrs.title),
            blocking: non_empty(attrs.blocking.map(|b| b.join(TOKEN_SEP))),
            disabled: attrs.disabled,
            cache: OnceLock::new(),
        })
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    pub fn rel(&self) -> &str {
        &self.rel
    }

    pub fn destination(&self) -> Option<&str> {
        self.destination.as_deref()
    }

    pub const fn is_static(&self) -> bool {
        self.is_static
    }

    /// `as` only means something for preload-style relations.
    fn emits_destination(&self) -> bool {
        self.rel == rel::PRELOAD || self.rel == rel::MODULE_PRELOAD
    }

    /// HTML representation.
    ///
    /// A static `href` is resolved on every call; other links are rendered
    /// once and memoized.
    pub fn render(&self, statics: &dyn StaticResolver) -> Result<Markup, ResolveError> {
        if self.is_static {
            return self.build(statics);
        }
        if let Some(cached) = self.cache.get() {
            return Ok(cached.clone());
        }
        let markup = self.build(statics)?;
        Ok(self.cache.get_or_init(|| markup).clone())
    }

    fn build(&self, statics: &dyn StaticResolver) -> Result<Markup, ResolveError> {
        let href = if self.is_static {
            statics.resolve(&self.href)?
        } else {
            self.href.clone()
        };

        let destination = self
            .destination
            .as_deref()
            .filter(|_| self.emits_destination());

        Ok(TagWriter::open("link")
            .attr("href", &href)
            .attr("rel", &self.rel)
            .opt_attr("as", destination)
            .opt_attr("type", self.mime.as_deref())
            .opt_attr("crossorigin", self.cross_origin.as_deref())
            .opt_attr("integrity", self.integrity.as_deref())
            .opt_attr("referrerpolicy", self.referrer_policy.as_deref())
            .opt_attr("fetchpriority", self.fetch_priority.as_deref())
            .opt_attr("sizes", self.sizes.as_deref())
            .opt_attr("media", self.media.as_deref())
            .opt_attr("hreflang", self.lang.as_deref())
            .opt_attr("title", self.title.as_deref())
            // `blocking` renders as `block`
            .opt_attr("block", self.blocking.as_deref())
            .flag("disabled", self.disabled)
            .close(" />"))
    }
}
