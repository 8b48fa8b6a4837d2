//! Hip - a per-application registry of `<meta>`, `<script>` and `<link>` tags.
//!
//! Application code registers tags from anywhere; a page template renders
//! them all together through `macros.hip_metas()`, `macros.hip_links()` and
//! `macros.hip_scripts()`.
//!
//! ```ignore
//! let mut app = App::new("blog");
//! let hip = Hip::attach(&mut app);
//! hip.meta(MetaAttrs::new().charset("utf-8"))?;
//! hip.static_script(ScriptAttrs::new("js/app.js").defer());
//! let page = app.render_template("<head>{{ macros.hip_scripts() }}</head>")?;
//! ```

// Macros first so every later module can use them
pub mod logger;

pub mod cli;
pub mod config;
pub mod host;
pub mod registry;
pub mod tag;
mod utils;

pub use config::{HipConfig, StaticConfig};
pub use host::{
    App, BaseUrlResolver, PrefixResolver, ResolveError, SharedResolver, StaticResolver,
    TemplateError, TemplateGlobals, VersionedResolver,
};
pub use registry::Hip;
pub use tag::{
    Link, LinkAttrs, Markup, Meta, MetaAttrs, OneOrMany, Script, ScriptAttrs, ValidationError,
};
