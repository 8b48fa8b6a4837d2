//! `<script>` tags.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use super::markup::{Markup, TagWriter};
use super::value::non_empty;
use crate::host::{ResolveError, StaticResolver};

/// Script attributes, as written by callers or in `hip.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptAttrs {
    pub src: String,
    #[serde(rename = "type")]
    pub mime: Option<String>,
    /// `src` is a logical static-asset path, resolved at render time.
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default, rename = "async")]
    pub is_async: bool,
    #[serde(default)]
    pub defer: bool,
    #[serde(default)]
    pub nomodule: bool,
    #[serde(rename = "referrerpolicy")]
    pub referrer_policy: Option<String>,
    #[serde(rename = "fetchpriority")]
    pub fetch_priority: Option<String>,
    pub integrity: Option<String>,
    #[serde(rename = "crossorigin")]
    pub cross_origin: Option<String>,
}

impl ScriptAttrs {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            ..Self::default()
        }
    }

    pub fn mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    pub fn static_asset(mut self, on: bool) -> Self {
        self.is_static = on;
        self
    }

    pub fn asynchronous(mut self) -> Self {
        self.is_async = true;
        self
    }

    pub fn defer(mut self) -> Self {
        self.defer = true;
        self
    }

    pub fn nomodule(mut self) -> Self {
        self.nomodule = true;
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
}

impl From<&str> for ScriptAttrs {
    fn from(src: &str) -> Self {
        Self::new(src)
    }
}

impl From<String> for ScriptAttrs {
    fn from(src: String) -> Self {
        Self::new(src)
    }
}

/// A `<script src="…"></script>` tag.
///
/// Attributes render in a fixed order: `src`, `type`, `async`, `defer`,
/// `nomodule`, `referrerpolicy`, `fetchpriority`, `integrity`, `crossorigin`.
#[derive(Debug, Clone)]
pub struct Script {
    attrs: ScriptAttrs,
    cache: OnceLock<Markup>,
}

impl Script {
    pub fn new(attrs: impl Into<ScriptAttrs>) -> Self {
        let mut attrs = attrs.into();
        attrs.mime = non_empty(attrs.mime);
        attrs.referrer_policy = non_empty(attrs.referrer_policy);
        attrs.fetch_priority = non_empty(attrs.fetch_priority);
        attrs.integrity = non_empty(attrs.integrity);
        attrs.cross_origin = non_empty(attrs.cross_origin);
        Self {
            attrs,
            cache: OnceLock::new(),
        }
    }

    pub fn attrs(&self) -> &ScriptAttrs {
        &self.attrs
    }

    pub fn src(&self) -> &str {
        &self.attrs.src
    }

    pub const fn is_static(&self) -> bool {
        self.attrs.is_static
    }

    /// HTML representation.
    ///
    /// Static sources go through `statics` on every call, so a swapped or
    /// refreshed resolver shows up in the next render. Plain sources are
    /// rendered once and memoized.
    pub fn render(&self, statics: &dyn StaticResolver) -> Result<Markup, ResolveError> {
        if self.attrs.is_static {
            return self.build(statics);
        }
        if let Some(cached) = self.cache.get() {
            return Ok(cached.clone());
        }
        let markup = self.build(statics)?;
        Ok(self.cache.get_or_init(|| markup).clone())
    }

    fn build(&self, statics: &dyn StaticResolver) -> Result<Markup, ResolveError> {
        let a = &self.attrs;
        let src = if a.is_static {
            statics.resolve(&a.src)?
        } else {
            a.src.clone()
        };

        Ok(TagWriter::open("script")
            .attr("src", &src)
            .opt_attr("type", a.mime.as_deref())
            .flag("async", a.is_async)
            .flag("defer", a.defer)
            .flag("nomodule", a.nomodule)
            .opt_attr("referrerpolicy", a.referrer_policy.as_deref())
            .opt_attr("fetchpriority", a.fetch_priority.as_deref())
            .opt_attr("integrity", a.integrity.as_deref())
            .opt_attr("crossorigin", a.cross_origin.as_deref())
            .close("></script>"))
    }
}
