//! Per-application tag registry.
//!
//! [`Hip`] keeps three ordered sequences (metas, scripts, links) in insertion
//! order. Duplicates are allowed and nothing is ever removed. Each sequence
//! is an immutable `Vec` behind an `ArcSwap`: an append publishes a new
//! sequence in one atomic swap, and readers get a read-only snapshot that
//! never holds up registration.
//!
//! # Example
//!
//! ```ignore
//! let hip = Hip::new();
//! hip.meta(MetaAttrs::new().charset("utf-8"))?;
//! hip.static_link("css/main.css")?;
//! hip.static_script(ScriptAttrs::new("js/app.js").defer());
//! println!("{}", hip.render_head()?);
//! ```

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::debug;
use crate::host::{ResolveError, SharedResolver, StaticResolver};
use crate::tag::{
    Link, LinkAttrs, Markup, Meta, MetaAttrs, OneOrMany, Script, ScriptAttrs, ValidationError,
};

/// The tag registry of one application.
#[derive(Debug, Default)]
pub struct Hip {
    metas: ArcSwap<Vec<Meta>>,
    scripts: ArcSwap<Vec<Script>>,
    links: ArcSwap<Vec<Link>>,
    /// Serializes appends so none is lost between load and store.
    append: Mutex<()>,
    /// Resolver used for `static` tags. Swapped in by `init_app`.
    statics: ArcSwap<SharedResolver>,
}

impl Hip {
    /// Empty registry resolving static paths under `/static`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_static_resolver(resolver: impl StaticResolver + 'static) -> Self {
        let hip = Self::new();
        hip.set_static_resolver(resolver);
        hip
    }

    pub fn set_static_resolver(&self, resolver: impl StaticResolver + 'static) {
        self.set_shared_resolver(SharedResolver::new(resolver));
    }

    pub fn set_shared_resolver(&self, resolver: SharedResolver) {
        self.statics.store(Arc::new(resolver));
    }

    pub fn static_resolver(&self) -> SharedResolver {
        SharedResolver::clone(&self.statics.load())
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Add a `<meta>` tag.
    pub fn meta(&self, attrs: MetaAttrs) -> Result<(), ValidationError> {
        self.push_meta(Meta::new(attrs)?);
        Ok(())
    }

    /// Add a `<meta http-equiv>` tag. Without content it renders `content=""`.
    pub fn http_equiv(
        &self,
        name: impl Into<String>,
        content: Option<impl Into<OneOrMany>>,
    ) -> Result<(), ValidationError> {
        let attrs = MetaAttrs::new().name(name).http_equiv(true);
        match content {
            Some(content) => self.meta(attrs.content(content)),
            None => self.meta(attrs),
        }
    }

    /// Add a `<script>` tag.
    pub fn script(&self, attrs: impl Into<ScriptAttrs>) {
        self.push_script(Script::new(attrs));
    }

    /// Add a `<script>` whose `src` is a static-asset path.
    pub fn static_script(&self, attrs: impl Into<ScriptAttrs>) {
        self.script(attrs.into().static_asset(true));
    }

    /// Add a `<link>` tag (`rel` defaults to `stylesheet`).
    pub fn link(&self, attrs: impl Into<LinkAttrs>) -> Result<(), ValidationError> {
        self.push_link(Link::new(attrs)?);
        Ok(())
    }

    /// Add a `<link>` whose `href` is a static-asset path.
    pub fn static_link(&self, attrs: impl Into<LinkAttrs>) -> Result<(), ValidationError> {
        self.link(attrs.into().static_asset(true))
    }

    /// `<noscript>{message}</noscript>`, returned for inline use and never stored.
    pub fn noscript(&self, message: &str) -> Markup {
        Markup::from_trusted(format!("<noscript>{message}</noscript>"))
    }

    pub fn push_meta(&self, meta: Meta) {
        debug!("hip"; "meta {}", meta.name().or(meta.charset_value()).unwrap_or_default());
        self.append_to(&self.metas, meta);
    }

    pub fn push_script(&self, script: Script) {
        debug!("hip"; "script {}", script.src());
        self.append_to(&self.scripts, script);
    }

    pub fn push_link(&self, link: Link) {
        debug!("hip"; "link {} ({})", link.href(), link.rel());
        self.append_to(&self.links, link);
    }

    fn append_to<T: Clone>(&self, seq: &ArcSwap<Vec<T>>, item: T) {
        let _guard = self.append.lock();
        let mut next = Vec::clone(&seq.load());
        next.push(item);
        seq.store(Arc::new(next));
    }

    // ========================================================================
    // Access
    // ========================================================================

    /// Snapshot of the registered metas, in insertion order.
    ///
    /// Later registrations do not show up in a snapshot already taken.
    pub fn metas(&self) -> Arc<Vec<Meta>> {
        self.metas.load_full()
    }

    /// Snapshot of the registered scripts, in insertion order.
    pub fn scripts(&self) -> Arc<Vec<Script>> {
        self.scripts.load_full()
    }

    /// Snapshot of the registered links, in insertion order.
    pub fn links(&self) -> Arc<Vec<Link>> {
        self.links.load_full()
    }

    /// Total number of registered tags.
    pub fn len(&self) -> usize {
        self.metas.load().len() + self.scripts.load().len() + self.links.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    pub fn rendered_metas(&self) -> Vec<Markup> {
        self.metas.load().iter().map(Meta::render).collect()
    }

    pub fn rendered_scripts(&self) -> Result<Vec<Markup>, ResolveError> {
        let statics = self.statics.load();
        self.scripts
            .load()
            .iter()
            .map(|script| script.render(&**statics))
            .collect()
    }

    pub fn rendered_links(&self) -> Result<Vec<Markup>, ResolveError> {
        let statics = self.statics.load();
        self.links
            .load()
            .iter()
            .map(|link| link.render(&**statics))
            .collect()
    }

    /// All tags as a `<head>` fragment: metas, then links, then scripts,
    /// one per line.
    pub fn render_head(&self) -> Result<String, ResolveError> {
        let mut lines = self.rendered_metas();
        lines.extend(self.rendered_links()?);
        lines.extend(self.rendered_scripts()?);
        Ok(lines
            .iter()
            .map(Markup::as_str)
            .collect::<Vec<_>>()
            .join("\n"))
    }
}
