//! Host application integration.
//!
//! | Module     | Purpose                                            |
//! |------------|----------------------------------------------------|
//! | `resolve`  | Static asset URL resolvers                         |
//! | `template` | Namespaced template functions and a tiny expander  |
//! | `binding`  | `App` and registering the registry on it           |

mod binding;
mod resolve;
mod template;

pub use binding::{App, EXTENSION_NAME, TEMPLATE_FUNCTIONS, TEMPLATE_NAMESPACE};
pub use resolve::{
    BaseUrlResolver, DEFAULT_STATIC_PREFIX, PrefixResolver, ResolveError, SharedResolver,
    StaticResolver, VersionedResolver,
};
pub use template::{TemplateError, TemplateFn, TemplateGlobals};
