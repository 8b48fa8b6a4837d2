//! Tag value objects.
//!
//! | Module   | Purpose                                          |
//! |----------|--------------------------------------------------|
//! | `meta`   | `<meta>` (charset, name/content, http-equiv)     |
//! | `script` | `<script src>`                                   |
//! | `link`   | `<link>` (stylesheets, preloads, icons, …)       |
//! | `markup` | Rendered HTML and the attribute writer           |
//! | `consts` | Well-known attribute values                      |
//!
//! Every tag is immutable once built and memoizes its rendering.

pub mod consts;
mod error;
mod link;
mod markup;
mod meta;
mod script;
mod value;

pub use error::ValidationError;
pub use link::{Link, LinkAttrs};
pub use markup::Markup;
pub use meta::{Meta, MetaAttrs};
pub use script::{Script, ScriptAttrs};
pub use value::OneOrMany;
