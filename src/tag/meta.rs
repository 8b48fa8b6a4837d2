//! `<meta>` tags.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use super::error::ValidationError;
use super::markup::{Markup, TagWriter};
use super::value::{OneOrMany, non_empty};

/// Separator for list-valued meta content.
const CONTENT_SEP: &str = ", ";

/// Unvalidated meta attributes, as written by callers or in `hip.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaAttrs {
    pub name: Option<String>,
    pub content: Option<OneOrMany>,
    pub charset: Option<String>,
    /// Emit `http-equiv="name"` instead of `name="name"`.
    #[serde(default, rename = "http-equiv")]
    pub http_equiv: bool,
}

impl MetaAttrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn content(mut self, content: impl Into<OneOrMany>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }

    pub fn http_equiv(mut self, on: bool) -> Self {
        self.http_equiv = on;
        self
    }
}

/// A validated `<meta>` tag.
///
/// Either the charset form (`<meta charset="utf-8">`) or the name/content
/// form. When both a name and a charset are given, the charset form wins.
#[derive(Debug, Clone)]
pub struct Meta {
    name: Option<String>,
    content: Option<String>,
    charset: Option<String>,
    http_equiv: bool,
    cache: OnceLock<Markup>,
}

impl Meta {
    /// Build a meta tag, failing when neither `name` nor `charset` is set.
    pub fn new(attrs: MetaAttrs) -> Result<Self, ValidationError> {
        let name = non_empty(attrs.name);
        let charset = non_empty(attrs.charset);

        if name.is_none() && charset.is_none() {
            return Err(ValidationError::MissingNameOrCharset);
        }

        Ok(Self {
            name,
            content: attrs.content.map(|c| c.join(CONTENT_SEP)),
            charset,
            http_equiv: attrs.http_equiv,
            cache: OnceLock::new(),
        })
    }

    /// `<meta charset="…">`
    pub fn charset(charset: impl Into<String>) -> Result<Self, ValidationError> {
        Self::new(MetaAttrs::new().charset(charset))
    }

    /// `<meta name="…" content="…">`
    pub fn named(
        name: impl Into<String>,
        content: impl Into<OneOrMany>,
    ) -> Result<Self, ValidationError> {
        Self::new(MetaAttrs::new().name(name).content(content))
    }

    /// `<meta http-equiv="…" content="…">`
    pub fn http_equiv(
        name: impl Into<String>,
        content: impl Into<OneOrMany>,
    ) -> Result<Self, ValidationError> {
        Self::new(MetaAttrs::new().name(name).content(content).http_equiv(true))
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn charset_value(&self) -> Option<&str> {
        self.charset.as_deref()
    }

    pub const fn is_http_equiv(&self) -> bool {
        self.http_equiv
    }

    /// HTML representation, computed once.
    pub fn render(&self) -> Markup {
        self.cache.get_or_init(|| self.build()).clone()
    }

    fn build(&self) -> Markup {
        let writer = TagWriter::open("meta");

        if let Some(charset) = &self.charset {
            return writer.attr("charset", charset).close(">");
        }

        let key = if self.http_equiv { "http-equiv" } else { "name" };
        writer
            .attr(key, self.name.as_deref().unwrap_or_default())
            .attr("content", self.content.as_deref().unwrap_or_default())
            .close(">")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::consts::{http_equiv, meta_name};

    #[test]
    fn test_charset() {
        let meta = Meta::charset("utf-8").unwrap();
        assert_eq!(meta.render(), r#"<meta charset="utf-8">"#);
    }

    #[test]
    fn test_named() {
        let meta = Meta::named(meta_name::DESCRIPTION, "A small site").unwrap();
        assert_eq!(
            meta.render(),
            r#"<meta name="description" content="A small site">"#
        );
    }

    #[test]
    fn test_http_equiv() {
        let meta = Meta::http_equiv(http_equiv::REFRESH, "30").unwrap();
        assert_eq!(meta.render(), r#"<meta http-equiv="refresh" content="30">"#);
    }

    #[test]
    fn test_list_content_joined() {
        let meta = Meta::named(meta_name::KEYWORDS, ["rust", "html", "head"]).unwrap();
        assert_eq!(meta.content(), Some("rust, html, head"));
        assert_eq!(
            meta.render(),
            r#"<meta name="keywords" content="rust, html, head">"#
        );
    }

    #[test]
    fn test_missing_name_and_charset() {
        let err = Meta::new(MetaAttrs::new()).unwrap_err();
        assert_eq!(err, ValidationError::MissingNameOrCharset);

        let err = Meta::new(MetaAttrs::new().content("orphan")).unwrap_err();
        assert_eq!(err, ValidationError::MissingNameOrCharset);
    }

    #[test]
    fn test_empty_name_counts_as_missing() {
        let err = Meta::new(MetaAttrs::new().name("").charset("")).unwrap_err();
        assert_eq!(err, ValidationError::MissingNameOrCharset);
    }

    #[test]
    fn test_charset_wins_over_name() {
        let meta = Meta::new(MetaAttrs::new().name("viewport").charset("utf-8")).unwrap();
        assert_eq!(meta.render(), r#"<meta charset="utf-8">"#);
    }

    #[test]
    fn test_missing_content_renders_empty() {
        let meta = Meta::new(MetaAttrs::new().name("darkreader-lock")).unwrap();
        assert_eq!(meta.render(), r#"<meta name="darkreader-lock" content="">"#);
    }

    #[test]
    fn test_render_is_stable() {
        let meta = Meta::named("viewport", "width=device-width, initial-scale=1").unwrap();
        let first = meta.render();
        let second = meta.render();
        assert_eq!(first, second);
        assert_eq!(first.as_str(), second.as_str());
    }

    #[test]
    fn test_deserialize_attrs() {
        let attrs: MetaAttrs = toml::from_str(
            r#"
name = "content-security-policy"
content = ["default-src 'self'", "img-src *"]
http-equiv = true
"#,
        )
        .unwrap();
        let meta = Meta::new(attrs).unwrap();
        assert_eq!(
            meta.render(),
            r#"<meta http-equiv="content-security-policy" content="default-src 'self', img-src *">"#
        );
    }
}
