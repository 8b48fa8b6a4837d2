//! Rendered markup and the attribute writer shared by all tag kinds.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use serde::{Serialize, Serializer};

use crate::utils::html::escape_attr;

/// Trusted, already-rendered HTML.
///
/// Templates embed it without further escaping. Cloning is cheap, which lets
/// tags hand out their memoized rendering freely.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Markup(Arc<str>);

impl Markup {
    /// Wrap a string that is already valid HTML.
    pub fn from_trusted(html: impl Into<Arc<str>>) -> Self {
        Self(html.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for Markup {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Markup {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for Markup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for Markup {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for Markup {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

/// Incremental writer for a single element's opening tag.
///
/// Attributes are emitted in call order, so each tag kind fixes its output
/// order simply by the order of its writer calls.
pub(crate) struct TagWriter {
    buf: String,
}

impl TagWriter {
    pub fn open(tag: &str) -> Self {
        let mut buf = String::with_capacity(64);
        buf.push('<');
        buf.push_str(tag);
        Self { buf }
    }

    /// ` name="value"`
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.buf.push(' ');
        self.buf.push_str(name);
        self.buf.push_str("=\"");
        self.buf.push_str(&escape_attr(value));
        self.buf.push('"');
        self
    }

    /// ` name="value"` when the value is present.
    pub fn opt_attr(self, name: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    /// Bare boolean token (` async`) when set.
    pub fn flag(mut self, name: &str, on: bool) -> Self {
        if on {
            self.buf.push(' ');
            self.buf.push_str(name);
        }
        self
    }

    /// Append the closing text (`>`, ` />`, `></script>`) and finish.
    pub fn close(mut self, tail: &str) -> Markup {
        self.buf.push_str(tail);
        Markup(Arc::from(self.buf))
    }
}
