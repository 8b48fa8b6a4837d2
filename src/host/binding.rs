//! Binding a registry to a host application.
//!
//! [`App`] stands in for the host framework's application object: it owns
//! the static resolver, an extension map and the template globals.
//! [`Hip::init_app`] attaches a registry to it and exposes the three tag
//! sequences to templates as `macros.hip_metas()`, `macros.hip_links()` and
//! `macros.hip_scripts()`.

use std::any::Any;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::resolve::{SharedResolver, StaticResolver};
use super::template::{TemplateError, TemplateGlobals};
use crate::debug;
use crate::registry::Hip;

/// Key the registry is stored under in [`App`] extensions.
pub const EXTENSION_NAME: &str = "hip";

/// Namespace the template functions are registered in.
pub const TEMPLATE_NAMESPACE: &str = "macros";

/// Template function names, in the order they are registered.
pub const TEMPLATE_FUNCTIONS: [&str; 3] = ["hip_scripts", "hip_links", "hip_metas"];

type Extension = Arc<dyn Any + Send + Sync>;

/// A host application.
pub struct App {
    name: String,
    statics: SharedResolver,
    extensions: FxHashMap<&'static str, Extension>,
    globals: TemplateGlobals,
}

impl App {
    /// Application serving static files under `/static`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            statics: SharedResolver::default(),
            extensions: FxHashMap::default(),
            globals: TemplateGlobals::new(),
        }
    }

    pub fn with_static_resolver(self, resolver: impl StaticResolver + 'static) -> Self {
        self.with_shared_resolver(SharedResolver::new(resolver))
    }

    pub fn with_shared_resolver(mut self, resolver: SharedResolver) -> Self {
        self.statics = resolver;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn static_resolver(&self) -> &SharedResolver {
        &self.statics
    }

    /// Store an extension, replacing any previous one of the same name.
    pub fn register_extension<T: Any + Send + Sync>(&mut self, name: &'static str, ext: Arc<T>) {
        self.extensions.insert(name, ext);
    }

    pub fn has_extension(&self, name: &str) -> bool {
        self.extensions.contains_key(name)
    }

    /// Fetch an extension by name, if it exists and has type `T`.
    pub fn extension<T: Any + Send + Sync>(&self, name: &str) -> Option<Arc<T>> {
        self.extensions.get(name).cloned()?.downcast::<T>().ok()
    }

    /// The registry attached by [`Hip::init_app`], if any.
    pub fn hip(&self) -> Option<Arc<Hip>> {
        self.extension::<Hip>(EXTENSION_NAME)
    }

    pub fn globals(&self) -> &TemplateGlobals {
        &self.globals
    }

    pub fn globals_mut(&mut self) -> &mut TemplateGlobals {
        &mut self.globals
    }

    /// Expand template function calls in `template`.
    pub fn render_template(&self, template: &str) -> Result<String, TemplateError> {
        self.globals.render(template)
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut extensions: Vec<&&str> = self.extensions.keys().collect();
        extensions.sort_unstable();
        f.debug_struct("App")
            .field("name", &self.name)
            .field("extensions", &extensions)
            .field("globals", &self.globals)
            .finish()
    }
}

impl Hip {
    /// Create a registry and attach it to `app`.
    pub fn attach(app: &mut App) -> Arc<Self> {
        let hip = Arc::new(Self::new());
        hip.init_app(app);
        hip
    }

    /// Attach this registry to `app`.
    ///
    /// Registers the `hip` extension, adopts the app's static resolver and
    /// exposes the tag sequences as template functions. Calling it again
    /// (or on another app) rebinds: the latest app's resolver wins.
    pub fn init_app(self: &Arc<Self>, app: &mut App) {
        app.register_extension(EXTENSION_NAME, Arc::clone(self));
        self.set_shared_resolver(app.static_resolver().clone());

        let [scripts, links, metas] = TEMPLATE_FUNCTIONS;
        let globals = app.globals_mut();

        let hip = Arc::clone(self);
        globals.register(TEMPLATE_NAMESPACE, scripts, move || hip.rendered_scripts());

        let hip = Arc::clone(self);
        globals.register(TEMPLATE_NAMESPACE, links, move || hip.rendered_links());

        let hip = Arc::clone(self);
        globals.register(TEMPLATE_NAMESPACE, metas, move || Ok(hip.rendered_metas()));

        debug!("hip"; "attached to app `{}`", app.name());
    }
}
