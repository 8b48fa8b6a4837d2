//! Template globals.
//!
//! Functions are grouped in namespaces and called without arguments from a
//! template as `{{ namespace.name() }}`. This is the surface a template
//! engine binds to; [`TemplateGlobals::render`] is a minimal expander for
//! pages that need nothing more than these calls.

use std::sync::{Arc, LazyLock};

use regex::{Captures, Regex};
use rustc_hash::FxHashMap;
use thiserror::Error;

use super::ResolveError;
use crate::tag::Markup;

/// A zero-argument template function producing a sequence of markup.
pub type TemplateFn = Arc<dyn Fn() -> Result<Vec<Markup>, ResolveError> + Send + Sync>;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("unknown template function `{namespace}.{name}`")]
    UnknownFunction { namespace: String, name: String },

    #[error("template function `{namespace}.{name}` failed")]
    Call {
        namespace: String,
        name: String,
        #[source]
        source: ResolveError,
    },
}

/// `{{ ns.name() }}` with optional inner whitespace.
static CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{[ \t]*([A-Za-z_][A-Za-z0-9_]*)\.([A-Za-z_][A-Za-z0-9_]*)\(\)[ \t]*\}\}").unwrap()
});

/// Namespaced template functions.
#[derive(Default, Clone)]
pub struct TemplateGlobals {
    namespaces: FxHashMap<String, FxHashMap<String, TemplateFn>>,
}

impl TemplateGlobals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `namespace.name`, creating the namespace if needed.
    /// An existing function of the same name is replaced.
    pub fn register<F>(&mut self, namespace: &str, name: &str, f: F)
    where
        F: Fn() -> Result<Vec<Markup>, ResolveError> + Send + Sync + 'static,
    {
        self.namespaces
            .entry(namespace.to_string())
            .or_default()
            .insert(name.to_string(), Arc::new(f));
    }

    pub fn contains(&self, namespace: &str, name: &str) -> bool {
        self.get(namespace, name).is_some()
    }

    pub fn get(&self, namespace: &str, name: &str) -> Option<&TemplateFn> {
        self.namespaces.get(namespace)?.get(name)
    }

    /// Names registered in `namespace`, sorted.
    pub fn names(&self, namespace: &str) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .namespaces
            .get(namespace)
            .map(|ns| ns.keys().map(String::as_str).collect())
            .unwrap_or_default();
        names.sort_unstable();
        names
    }

    pub fn call(&self, namespace: &str, name: &str) -> Result<Vec<Markup>, TemplateError> {
        let f = self
            .get(namespace, name)
            .ok_or_else(|| TemplateError::UnknownFunction {
                namespace: namespace.to_string(),
                name: name.to_string(),
            })?;
        (**f)().map_err(|source| TemplateError::Call {
            namespace: namespace.to_string(),
            name: name.to_string(),
            source,
        })
    }

    /// Expand every `{{ ns.name() }}` in `template`, one markup per line.
    pub fn render(&self, template: &str) -> Result<String, TemplateError> {
        let mut out = String::with_capacity(template.len());
        let mut last = 0;

        for caps in CALL.captures_iter(template) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            out.push_str(&template[last..whole.start()]);
            out.push_str(&self.expand(&caps)?);
            last = whole.end();
        }
        out.push_str(&template[last..]);
        Ok(out)
    }

    fn expand(&self, caps: &Captures<'_>) -> Result<String, TemplateError> {
        let items = self.call(&caps[1], &caps[2])?;
        Ok(items
            .iter()
            .map(Markup::as_str)
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

impl std::fmt::Debug for TemplateGlobals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (ns, funcs) in &self.namespaces {
            let mut names: Vec<&String> = funcs.keys().collect();
            names.sort_unstable();
            map.entry(ns, &names);
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn globals() -> TemplateGlobals {
        let mut g = TemplateGlobals::new();
        g.register("macros", "greeting", || {
            Ok(vec![
                Markup::from_trusted("<b>hi</b>"),
                Markup::from_trusted("<i>there</i>"),
            ])
        });
        g.register("macros", "nothing", || Ok(Vec::new()));
        g
    }

    #[test]
    fn test_register_and_call() {
        let g = globals();
        assert!(g.contains("macros", "greeting"));
        assert!(!g.contains("macros", "missing"));
        assert!(!g.contains("other", "greeting"));
        assert_eq!(g.call("macros", "greeting").unwrap().len(), 2);
        assert_eq!(g.names("macros"), vec!["greeting", "nothing"]);
    }

    #[test]
    fn test_unknown_function() {
        let g = globals();
        let err = g.call("macros", "missing").unwrap_err();
        assert!(matches!(err, TemplateError::UnknownFunction { .. }));
        assert_eq!(err.to_string(), "unknown template function `macros.missing`");
    }

    #[test]
    fn test_render_expands_calls() {
        let g = globals();
        let page = g
            .render("<head>\n{{ macros.greeting() }}\n{{macros.nothing()}}</head>")
            .unwrap();
        assert_eq!(page, "<head>\n<b>hi</b>\n<i>there</i>\n</head>");
    }

    #[test]
    fn test_render_leaves_other_text() {
        let g = globals();
        assert_eq!(g.render("{{ title }} {x}").unwrap(), "{{ title }} {x}");
    }

    #[test]
    fn test_render_unknown_fails() {
        let g = globals();
        assert!(g.render("{{ macros.missing() }}").is_err());
    }

    #[test]
    fn test_call_error_is_wrapped() {
        let mut g = TemplateGlobals::new();
        g.register("macros", "broken", || {
            Err(ResolveError::NotFound("x.js".to_string()))
        });
        let err = g.call("macros", "broken").unwrap_err();
        assert!(matches!(err, TemplateError::Call { .. }));
    }
}
