//! Static asset URL resolution.
//!
//! A logical path such as `css/main.css` becomes the URL the host serves it
//! from. Three resolvers are provided:
//!
//! - [`PrefixResolver`]: `/static/css/main.css`
//! - [`BaseUrlResolver`]: `https://cdn.example.com/assets/css/main.css`
//! - [`VersionedResolver`]: wraps either and appends `?v=<hash>` from the
//!   file content for cache busting.

use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use thiserror::Error;
use url::Url;

use crate::debug;
use crate::utils::hash;

/// Default static endpoint.
pub const DEFAULT_STATIC_PREFIX: &str = "/static";

/// Everything except RFC 3986 unreserved characters gets encoded.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Static resolution failures.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("static asset `{0}` not found")]
    NotFound(String),

    #[error("invalid static path `{path}`: {reason}")]
    InvalidPath { path: String, reason: &'static str },

    #[error("cannot join `{path}` onto static base URL")]
    Url {
        path: String,
        #[source]
        source: url::ParseError,
    },

    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),
}

/// Maps a logical static-asset path to the URL it is served from.
pub trait StaticResolver: Send + Sync {
    fn resolve(&self, path: &str) -> Result<String, ResolveError>;
}

impl<F> StaticResolver for F
where
    F: Fn(&str) -> Result<String, ResolveError> + Send + Sync,
{
    fn resolve(&self, path: &str) -> Result<String, ResolveError> {
        self(path)
    }
}

/// A cloneable, type-erased resolver shared between an app and its registry.
#[derive(Clone)]
pub struct SharedResolver(Arc<dyn StaticResolver>);

impl SharedResolver {
    pub fn new(resolver: impl StaticResolver + 'static) -> Self {
        Self(Arc::new(resolver))
    }
}

impl Default for SharedResolver {
    fn default() -> Self {
        Self::new(PrefixResolver::default())
    }
}

impl StaticResolver for SharedResolver {
    fn resolve(&self, path: &str) -> Result<String, ResolveError> {
        self.0.resolve(path)
    }
}

impl fmt::Debug for SharedResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedResolver(..)")
    }
}

/// Split a logical path into clean segments.
///
/// Leading `/` and `./` are ignored; `..` is rejected so a path can never
/// leave the static root.
fn segments(path: &str) -> Result<Vec<&str>, ResolveError> {
    let parts: Vec<&str> = path
        .split(['/', '\\'])
        .filter(|s| !s.is_empty() && *s != ".")
        .collect();

    if parts.contains(&"..") {
        return Err(ResolveError::InvalidPath {
            path: path.to_string(),
            reason: "`..` segments escape the static root",
        });
    }
    if parts.is_empty() {
        return Err(ResolveError::InvalidPath {
            path: path.to_string(),
            reason: "empty path",
        });
    }
    Ok(parts)
}

fn encode_segments(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

// ============================================================================
// PrefixResolver
// ============================================================================

/// Serves static files under a fixed URL path prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixResolver {
    prefix: String,
}

impl PrefixResolver {
    /// `prefix` is normalized to a leading slash and no trailing slash
    /// (`static/` → `/static`, `/` → ``).
    pub fn new(prefix: impl AsRef<str>) -> Self {
        let trimmed = prefix.as_ref().trim().trim_matches('/');
        let prefix = if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        };
        Self { prefix }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for PrefixResolver {
    fn default() -> Self {
        Self::new(DEFAULT_STATIC_PREFIX)
    }
}

impl StaticResolver for PrefixResolver {
    fn resolve(&self, path: &str) -> Result<String, ResolveError> {
        let parts = segments(path)?;
        Ok(format!("{}/{}", self.prefix, encode_segments(&parts)))
    }
}

// ============================================================================
// BaseUrlResolver
// ============================================================================

/// Serves static files from an absolute base URL (typically a CDN).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrlResolver {
    base: Url,
}

impl BaseUrlResolver {
    /// The base always gets a trailing slash so joins append rather than
    /// replace its last segment.
    pub fn new(mut base: Url) -> Self {
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Self { base }
    }

    pub fn parse(base: &str) -> Result<Self, url::ParseError> {
        Url::parse(base).map(Self::new)
    }

    pub fn base(&self) -> &Url {
        &self.base
    }
}

impl StaticResolver for BaseUrlResolver {
    fn resolve(&self, path: &str) -> Result<String, ResolveError> {
        let parts = segments(path)?;
        let joined = self
            .base
            .join(&encode_segments(&parts))
            .map_err(|source| ResolveError::Url {
                path: path.to_string(),
                source,
            })?;
        Ok(joined.into())
    }
}

// ============================================================================
// VersionedResolver
// ============================================================================

/// Appends `?v=<8 hex>` derived from the file content under `root`.
///
/// Versions are computed once per logical path and cached; call
/// [`refresh`](Self::refresh) after the file changes.
#[derive(Debug)]
pub struct VersionedResolver<R> {
    inner: R,
    root: PathBuf,
    versions: DashMap<String, String>,
}

impl<R: StaticResolver> VersionedResolver<R> {
    pub fn new(inner: R, root: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            root: root.into(),
            versions: DashMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Recompute the version for `path`. Returns whether it changed.
    pub fn refresh(&self, path: &str) -> Result<bool, ResolveError> {
        let fresh = self.compute(path)?;
        let changed = self
            .versions
            .get(path)
            .is_none_or(|old| *old != fresh);
        self.versions.insert(path.to_string(), fresh);
        Ok(changed)
    }

    fn version(&self, path: &str) -> Result<String, ResolveError> {
        if let Some(v) = self.versions.get(path) {
            return Ok(v.clone());
        }
        let v = self.compute(path)?;
        debug!("static"; "versioned {} -> {}", path, v);
        self.versions.insert(path.to_string(), v.clone());
        Ok(v)
    }

    fn compute(&self, path: &str) -> Result<String, ResolveError> {
        let file = self.root.join(segments(path)?.join("/"));
        let reader = File::open(&file).map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => ResolveError::NotFound(path.to_string()),
            _ => ResolveError::Io(file.clone(), err),
        })?;
        let h = hash::compute_reader(reader).map_err(|err| ResolveError::Io(file, err))?;
        Ok(hash::to_fingerprint(h))
    }
}

impl<R: StaticResolver> StaticResolver for VersionedResolver<R> {
    fn resolve(&self, path: &str) -> Result<String, ResolveError> {
        let url = self.inner.resolve(path)?;
        let version = self.version(path)?;
        let sep = if url.contains('?') { '&' } else { '?' };
        Ok(format!("{url}{sep}v={version}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_prefix_basic() {
        let r = PrefixResolver::default();
        assert_eq!(r.resolve("app.js").unwrap(), "/static/app.js");
        assert_eq!(r.resolve("css/main.css").unwrap(), "/static/css/main.css");
    }

    #[test]
    fn test_prefix_normalization() {
        assert_eq!(PrefixResolver::new("assets/").prefix(), "/assets");
        assert_eq!(PrefixResolver::new("/").prefix(), "");
        assert_eq!(PrefixResolver::new("/").resolve("a.js").unwrap(), "/a.js");
    }

    #[test]
    fn test_prefix_cleans_path() {
        let r = PrefixResolver::default();
        assert_eq!(r.resolve("/js//app.js").unwrap(), "/static/js/app.js");
        assert_eq!(r.resolve("./js/./app.js").unwrap(), "/static/js/app.js");
    }

    #[test]
    fn test_prefix_encodes_segments() {
        let r = PrefixResolver::default();
        assert_eq!(
            r.resolve("fonts/My Font.woff2").unwrap(),
            "/static/fonts/My%20Font.woff2"
        );
        assert_eq!(r.resolve("img/café.png").unwrap(), "/static/img/caf%C3%A9.png");
    }

    #[test]
    fn test_rejects_parent_segments() {
        let r = PrefixResolver::default();
        assert!(matches!(
            r.resolve("../secret.txt"),
            Err(ResolveError::InvalidPath { .. })
        ));
        assert!(matches!(r.resolve(""), Err(ResolveError::InvalidPath { .. })));
    }

    #[test]
    fn test_base_url() {
        let r = BaseUrlResolver::parse("https://cdn.example.com/assets").unwrap();
        assert_eq!(r.base().as_str(), "https://cdn.example.com/assets/");
        assert_eq!(
            r.resolve("css/main.css").unwrap(),
            "https://cdn.example.com/assets/css/main.css"
        );
        assert_eq!(
            r.resolve("/app.js").unwrap(),
            "https://cdn.example.com/assets/app.js"
        );
    }

    #[test]
    fn test_shared_resolver_delegates() {
        let shared = SharedResolver::new(PrefixResolver::new("/assets"));
        let copy = shared.clone();
        assert_eq!(copy.resolve("a.js").unwrap(), "/assets/a.js");
        assert_eq!(SharedResolver::default().resolve("a.js").unwrap(), "/static/a.js");
    }

    #[test]
    fn test_closure_resolver() {
        let r = |path: &str| -> Result<String, ResolveError> { Ok(format!("/s/{path}")) };
        assert_eq!(r.resolve("x.js").unwrap(), "/s/x.js");
    }

    #[test]
    fn test_versioned_appends_hash() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("css")).unwrap();
        fs::write(dir.path().join("css/main.css"), "body { color: red; }").unwrap();

        let r = VersionedResolver::new(PrefixResolver::default(), dir.path());
        let url = r.resolve("css/main.css").unwrap();
        let (base, version) = url.split_once("?v=").unwrap();
        assert_eq!(base, "/static/css/main.css");
        assert_eq!(version.len(), 8);
        assert_eq!(url, r.resolve("css/main.css").unwrap());
    }

    #[test]
    fn test_versioned_refresh() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("app.js");
        fs::write(&file, "console.log(1)").unwrap();

        let r = VersionedResolver::new(PrefixResolver::default(), dir.path());
        let before = r.resolve("app.js").unwrap();

        // Cached until refreshed
        fs::write(&file, "console.log(2)").unwrap();
        assert_eq!(r.resolve("app.js").unwrap(), before);

        assert!(r.refresh("app.js").unwrap());
        assert!(!r.refresh("app.js").unwrap());
        assert_ne!(r.resolve("app.js").unwrap(), before);
    }

    #[test]
    fn test_versioned_missing_file() {
        let dir = TempDir::new().unwrap();
        let r = VersionedResolver::new(PrefixResolver::default(), dir.path());
        assert!(matches!(
            r.resolve("nope.js"),
            Err(ResolveError::NotFound(p)) if p == "nope.js"
        ));
    }

    #[test]
    fn test_versioned_keeps_existing_query() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.js"), "x").unwrap();
        let inner = |path: &str| -> Result<String, ResolveError> { Ok(format!("/s/{path}?t=1")) };
        let r = VersionedResolver::new(inner, dir.path());
        assert!(r.resolve("a.js").unwrap().starts_with("/s/a.js?t=1&v="));
    }
}
