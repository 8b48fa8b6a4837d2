//! Tag construction errors.

use thiserror::Error;

/// Raised when a tag is built with an invalid attribute combination.
///
/// A tag that fails validation never enters the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("meta tag must have a name or a charset")]
    MissingNameOrCharset,

    #[error("preload link `{href}` must have an `as` attribute")]
    PreloadWithoutAs { href: String },
}

impl ValidationError {
    /// Suggested fix, shown alongside config diagnostics.
    pub fn hint(&self) -> &'static str {
        match self {
            Self::MissingNameOrCharset => "set `name` (with `content`) or `charset`",
            Self::PreloadWithoutAs { .. } => {
                "set `as` to the preloaded resource kind, e.g. as = \"style\""
            }
        }
    }
}
