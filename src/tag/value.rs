//! Scalar-or-list attribute input.

use serde::{Deserialize, Serialize};

/// An attribute given either as one string or as an ordered list of tokens.
///
/// Normalized to a single string at tag construction. Meta `content` joins
/// with `", "`, link `rel` and `blocking` join with a single space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    /// Flatten into a single string, joining list items with `sep`.
    pub fn join(self, sep: &str) -> String {
        match self {
            Self::One(value) => value,
            Self::Many(values) => values.join(sep),
        }
    }
}

impl From<&str> for OneOrMany {
    fn from(value: &str) -> Self {
        Self::One(value.to_owned())
    }
}

impl From<String> for OneOrMany {
    fn from(value: String) -> Self {
        Self::One(value)
    }
}

impl From<&String> for OneOrMany {
    fn from(value: &String) -> Self {
        Self::One(value.clone())
    }
}

impl<S: Into<String>> From<Vec<S>> for OneOrMany {
    fn from(values: Vec<S>) -> Self {
        Self::Many(values.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for OneOrMany {
    fn from(values: [S; N]) -> Self {
        Self::Many(values.into_iter().map(Into::into).collect())
    }
}

/// Treat empty strings as absent.
#[inline]
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_one() {
        assert_eq!(OneOrMany::from("width=device-width").join(", "), "width=device-width");
    }

    #[test]
    fn test_join_many_preserves_order() {
        let tokens = OneOrMany::from(["preload", "prefetch"]);
        assert_eq!(tokens.join(" "), "preload prefetch");

        let keywords = OneOrMany::from(vec!["rust", "html", "head"]);
        assert_eq!(keywords.join(", "), "rust, html, head");
    }

    #[test]
    fn test_deserialize_untagged() {
        #[derive(Deserialize)]
        struct Wrap {
            v: OneOrMany,
        }
        let one: Wrap = toml::from_str(r#"v = "a""#).unwrap();
        assert_eq!(one.v, OneOrMany::One("a".into()));
        let many: Wrap = toml::from_str(r#"v = ["a", "b"]"#).unwrap();
        assert_eq!(many.v, OneOrMany::Many(vec!["a".into(), "b".into()]));
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(Some("x".into())), Some("x".into()));
        assert_eq!(non_empty(None), None);
    }
}
