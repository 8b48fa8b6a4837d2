//! `hip.toml` configuration.
//!
//! | Section      | Purpose                                        |
//! |--------------|------------------------------------------------|
//! | `[static]`   | Static URL prefix or CDN base, versioning      |
//! | `[[meta]]`   | `<meta>` tags, in file order                   |
//! | `[[script]]` | `<script>` tags, in file order                 |
//! | `[[link]]`   | `<link>` tags, in file order                   |
//!
//! Unknown keys are reported as warnings and otherwise ignored.

mod error;

pub use error::{ConfigDiagnostic, ConfigDiagnostics, ConfigError};

use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};
use url::Url;

use crate::host::{
    BaseUrlResolver, DEFAULT_STATIC_PREFIX, PrefixResolver, SharedResolver, StaticResolver,
    VersionedResolver,
};
use crate::registry::Hip;
use crate::tag::consts::rel;
use crate::tag::{Link, LinkAttrs, Meta, MetaAttrs, Script, ScriptAttrs};
use crate::{debug, log};

/// Default config file name.
pub const CONFIG_FILE: &str = "hip.toml";

// ============================================================================
// [static]
// ============================================================================

/// `[static]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticConfig {
    /// Path prefix (`/static`) or absolute base URL (`https://cdn.example.com/`).
    pub url: String,
    /// Directory holding the files, relative to the config file.
    pub dir: PathBuf,
    /// Append `?v=<content hash>` to static URLs.
    pub version: bool,
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_STATIC_PREFIX.to_string(),
            dir: PathBuf::from("static"),
            version: false,
        }
    }
}

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing hip.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HipConfig {
    /// Directory containing the config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(rename = "static")]
    pub statics: StaticConfig,

    pub meta: Vec<MetaAttrs>,
    pub script: Vec<ScriptAttrs>,
    pub link: Vec<LinkAttrs>,
}

/// Tags built from a config, ready to register.
#[derive(Debug, Default)]
pub struct ConfigTags {
    pub metas: Vec<Meta>,
    pub scripts: Vec<Script>,
    pub links: Vec<Link>,
}

impl ConfigTags {
    pub fn len(&self) -> usize {
        self.metas.len() + self.scripts.len() + self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromStr for HipConfig {
    type Err = ConfigError;

    /// Parse configuration from TOML string
    fn from_str(content: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(content)?)
    }
}

impl HipConfig {
    /// Load configuration from file path with unknown field detection.
    ///
    /// The config's root becomes the file's parent directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (mut config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        config.root = path.parent().map(Path::to_path_buf).unwrap_or_default();
        debug!(
            "config";
            "loaded {} ({} metas, {} scripts, {} links)",
            path.display(),
            config.meta.len(),
            config.script.len(),
            config.link.len()
        );
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            log!("warning"; "- {}", field);
        }
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Construct every tag, collecting failures instead of stopping at the first.
    pub fn tags(&self) -> Result<ConfigTags, ConfigDiagnostics> {
        let mut diag = ConfigDiagnostics::new();
        let tags = self.build_tags(&mut diag);
        diag.into_result().map(|()| tags)
    }

    /// Check the whole config.
    ///
    /// Errors: tags that fail construction, and (with versioning on) static
    /// files missing from the static dir. Warnings: attributes that will be
    /// ignored when rendering.
    pub fn validate(&self) -> ConfigDiagnostics {
        let mut diag = ConfigDiagnostics::new();
        self.build_tags(&mut diag);

        for (i, attrs) in self.link.iter().enumerate() {
            let has_destination = attrs.destination.as_deref().is_some_and(|d| !d.is_empty());
            let joined_rel = attrs.rel.clone().join(" ");
            if has_destination && !matches!(joined_rel.as_str(), rel::PRELOAD | rel::MODULE_PRELOAD)
            {
                diag.warn(
                    format!("link[{i}]"),
                    format!("`as` is ignored for rel=\"{joined_rel}\""),
                );
            }
        }

        if self.statics.version {
            let statics = self.static_dir();
            let sources = self
                .script
                .iter()
                .enumerate()
                .filter(|(_, s)| s.is_static)
                .map(|(i, s)| (format!("script[{i}]"), s.src.as_str()));
            let hrefs = self
                .link
                .iter()
                .enumerate()
                .filter(|(_, l)| l.is_static)
                .map(|(i, l)| (format!("link[{i}]"), l.href.as_str()));

            for (field, path) in sources.chain(hrefs) {
                if !statics.join(path.trim_start_matches('/')).is_file() {
                    diag.error_with_hint(
                        field,
                        format!("static file `{path}` not found"),
                        format!("versioning reads files from `{}`", statics.display()),
                    );
                }
            }
        }

        diag
    }

    fn build_tags(&self, diag: &mut ConfigDiagnostics) -> ConfigTags {
        let mut tags = ConfigTags::default();

        for (i, attrs) in self.meta.iter().enumerate() {
            match Meta::new(attrs.clone()) {
                Ok(meta) => tags.metas.push(meta),
                Err(err) => diag.error_with_hint(format!("meta[{i}]"), err.to_string(), err.hint()),
            }
        }

        tags.scripts = self.script.iter().cloned().map(Script::new).collect();

        for (i, attrs) in self.link.iter().enumerate() {
            match Link::new(attrs.clone()) {
                Ok(link) => tags.links.push(link),
                Err(err) => diag.error_with_hint(format!("link[{i}]"), err.to_string(), err.hint()),
            }
        }

        tags
    }

    // ========================================================================
    // Installation
    // ========================================================================

    /// Directory static files are read from.
    pub fn static_dir(&self) -> PathBuf {
        self.root.join(&self.statics.dir)
    }

    /// Build the static resolver described by `[static]`.
    ///
    /// `url` is a CDN base when it parses as an absolute URL, a path prefix
    /// otherwise. With `version = true` files are hashed from `root/dir`.
    pub fn resolver(&self, root: &Path) -> SharedResolver {
        let url = self.statics.url.trim();
        match Url::parse(url) {
            Ok(base) if !base.cannot_be_a_base() => {
                self.versioned(BaseUrlResolver::new(base), root)
            }
            _ => self.versioned(PrefixResolver::new(url), root),
        }
    }

    fn versioned(&self, inner: impl StaticResolver + 'static, root: &Path) -> SharedResolver {
        if self.statics.version {
            SharedResolver::new(VersionedResolver::new(inner, root.join(&self.statics.dir)))
        } else {
            SharedResolver::new(inner)
        }
    }

    /// Register every entry into `hip` (metas, scripts, links, each in file
    /// order) and install the configured resolver.
    ///
    /// Nothing is registered unless every entry is valid.
    pub fn install(&self, hip: &Hip) -> Result<usize, ConfigError> {
        let tags = self.tags()?;
        let count = tags.len();

        hip.set_shared_resolver(self.resolver(&self.root));
        tags.metas.into_iter().for_each(|m| hip.push_meta(m));
        tags.scripts.into_iter().for_each(|s| hip.push_script(s));
        tags.links.into_iter().for_each(|l| hip.push_link(l));

        debug!("config"; "installed {} tags", count);
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::OneOrMany;
    use std::fs;
    use std::str::FromStr;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
[static]
url = "/assets"

[[meta]]
charset = "utf-8"

[[meta]]
name = "keywords"
content = ["rust", "html"]

[[meta]]
name = "refresh"
content = "30"
http-equiv = true

[[script]]
src = "js/app.js"
static = true
defer = true

[[script]]
src = "https://cdn.example.com/lib.js"
async = true
crossorigin = "anonymous"

[[link]]
href = "css/main.css"
static = true

[[link]]
href = "fonts/a.woff2"
rel = "preload"
as = "font"
crossorigin = "anonymous"
"#;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = HipConfig::from_str("").unwrap();
        assert_eq!(config.statics, StaticConfig::default());
        assert_eq!(config.statics.url, "/static");
        assert!(config.meta.is_empty());
        assert!(config.script.is_empty());
        assert!(config.link.is_empty());
    }

    #[test]
    fn test_parse_through_from_str() {
        let config: HipConfig = "[static]\nurl = \"/s\"".parse().unwrap();
        assert_eq!(config.statics.url, "/s");
    }

    #[test]
    fn test_from_str_invalid_toml() {
        assert!(matches!(
            HipConfig::from_str("[static\nurl = 1"),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_parse_sample() {
        let config = HipConfig::from_str(SAMPLE).unwrap();
        assert_eq!(config.statics.url, "/assets");
        assert_eq!(config.meta.len(), 3);
        assert!(config.meta[2].http_equiv);
        assert_eq!(config.script.len(), 2);
        assert!(config.script[0].is_static && config.script[0].defer);
        assert!(config.script[1].is_async);
        assert_eq!(config.link[0].rel, OneOrMany::from("stylesheet"));
        assert_eq!(config.link[1].destination.as_deref(), Some("font"));
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[static]\nurl = \"/s\"\ncolour = 1\n[[link]]\nhref = \"a.css\"\nhreflang = \"en\"";
        let (config, ignored) = HipConfig::parse_with_ignored(content).unwrap();
        assert_eq!(config.statics.url, "/s");
        assert_eq!(config.link.len(), 1);
        assert!(ignored.iter().any(|f| f.contains("colour")));
        assert!(ignored.iter().any(|f| f.contains("hreflang")));
    }

    #[test]
    fn test_no_unknown_fields() {
        let (_, ignored) = HipConfig::parse_with_ignored(SAMPLE).unwrap();
        assert!(ignored.is_empty(), "{ignored:?}");
    }

    #[test]
    fn test_load_sets_root() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, SAMPLE);
        let config = HipConfig::load(&path).unwrap();
        assert_eq!(config.root, dir.path());
        assert_eq!(config.static_dir(), dir.path().join("static"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = HipConfig::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(..)));
    }

    #[test]
    fn test_validate_reports_every_entry() {
        let content = r#"
[[meta]]
content = "orphan"

[[link]]
href = "ok.css"

[[link]]
href = "font.woff2"
rel = "preload"
"#;
        let diag = HipConfig::from_str(content).unwrap().validate();
        assert_eq!(diag.len(), 2);
        assert_eq!(diag.errors()[0].field, "meta[0]");
        assert_eq!(diag.errors()[1].field, "link[1]");
        assert!(diag.errors()[1].hint.is_some());
    }

    #[test]
    fn test_validate_warns_on_ignored_as() {
        let content = "[[link]]\nhref = \"a.css\"\nas = \"style\"";
        let diag = HipConfig::from_str(content).unwrap().validate();
        assert!(!diag.has_errors());
        assert_eq!(diag.warnings().len(), 1);
        assert_eq!(diag.warnings()[0].0, "link[0]");
    }

    #[test]
    fn test_validate_missing_versioned_file() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("static/css")).unwrap();
        fs::write(dir.path().join("static/css/main.css"), "body{}").unwrap();
        let path = write_config(
            &dir,
            r#"
[static]
version = true

[[link]]
href = "css/main.css"
static = true

[[script]]
src = "js/missing.js"
static = true
"#,
        );

        let diag = HipConfig::load(&path).unwrap().validate();
        assert_eq!(diag.len(), 1);
        assert_eq!(diag.errors()[0].field, "script[0]");
    }

    #[test]
    fn test_resolver_prefix_and_base_url() {
        let root = Path::new(".");
        let prefix = HipConfig::from_str("[static]\nurl = \"assets\"").unwrap();
        assert_eq!(prefix.resolver(root).resolve("a.js").unwrap(), "/assets/a.js");

        let cdn = HipConfig::from_str("[static]\nurl = \"https://cdn.example.com/v1\"").unwrap();
        assert_eq!(
            cdn.resolver(root).resolve("a.js").unwrap(),
            "https://cdn.example.com/v1/a.js"
        );
    }

    #[test]
    fn test_resolver_versioned() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("static")).unwrap();
        fs::write(dir.path().join("static/app.js"), "console.log(1)").unwrap();

        let config = HipConfig::from_str("[static]\nversion = true").unwrap();
        let url = config.resolver(dir.path()).resolve("app.js").unwrap();
        assert!(url.starts_with("/static/app.js?v="), "{url}");
        assert_eq!(url.len(), "/static/app.js?v=".len() + 8);
    }

    #[test]
    fn test_install_preserves_file_order() {
        let hip = Hip::new();
        let config = HipConfig::from_str(SAMPLE).unwrap();
        assert_eq!(config.install(&hip).unwrap(), 7);

        assert_eq!(
            hip.rendered_metas(),
            vec![
                r#"<meta charset="utf-8">"#,
                r#"<meta name="keywords" content="rust, html">"#,
                r#"<meta http-equiv="refresh" content="30">"#,
            ]
        );
        assert_eq!(
            hip.rendered_scripts().unwrap(),
            vec![
                r#"<script src="/assets/js/app.js" defer></script>"#,
                r#"<script src="https://cdn.example.com/lib.js" async crossorigin="anonymous"></script>"#,
            ]
        );
        assert_eq!(
            hip.rendered_links().unwrap(),
            vec![
                r#"<link href="/assets/css/main.css" rel="stylesheet" />"#,
                r#"<link href="fonts/a.woff2" rel="preload" as="font" crossorigin="anonymous" />"#,
            ]
        );
    }

    #[test]
    fn test_install_is_all_or_nothing() {
        let hip = Hip::new();
        let config = HipConfig::from_str("[[meta]]\ncharset = \"utf-8\"\n[[meta]]\ncontent = \"x\"").unwrap();
        let err = config.install(&hip).unwrap_err();
        assert!(matches!(err, ConfigError::Diagnostics(_)));
        assert!(hip.is_empty());
    }
}
