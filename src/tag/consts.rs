//! Well-known attribute values.
//!
//! These are a convenience for callers and are never enforced: any string is
//! accepted wherever a constant is offered.

/// `crossorigin` values.
pub mod cross_origin {
    pub const ANONYMOUS: &str = "anonymous";
    pub const USE_CREDENTIALS: &str = "use-credentials";
}

/// `fetchpriority` values.
pub mod fetch_priority {
    pub const HIGH: &str = "high";
    pub const LOW: &str = "low";
    pub const AUTO: &str = "auto";
}

/// `referrerpolicy` values.
pub mod referrer_policy {
    pub const NO_REFERRER: &str = "no-referrer";
    pub const NO_REFERRER_WHEN_DOWNGRADE: &str = "no-referrer-when-downgrade";
    pub const ORIGIN: &str = "origin";
    pub const ORIGIN_WHEN_CROSS_ORIGIN: &str = "origin-when-cross-origin";
    pub const SAME_ORIGIN: &str = "same-origin";
    pub const STRICT_ORIGIN: &str = "strict-origin";
    pub const STRICT_ORIGIN_WHEN_CROSS_ORIGIN: &str = "strict-origin-when-cross-origin";
    pub const UNSAFE_URL: &str = "unsafe-url";
}

/// Meta `name` values.
pub mod meta_name {
    pub const APPLICATION_NAME: &str = "application-name";
    pub const AUTHOR: &str = "author";
    pub const DESCRIPTION: &str = "description";
    pub const GENERATOR: &str = "generator";
    pub const KEYWORDS: &str = "keywords";
    pub const VIEWPORT: &str = "viewport";
}

/// Meta `http-equiv` names.
pub mod http_equiv {
    pub const CONTENT_SECURITY_POLICY: &str = "content-security-policy";
    pub const CONTENT_TYPE: &str = "content-type";
    pub const DEFAULT_STYLE: &str = "default-style";
    pub const REFRESH: &str = "refresh";
}

/// Meta `charset` values.
pub mod charset {
    pub const UTF8: &str = "utf-8";
}

/// Script `type` values.
pub mod script_type {
    pub const JAVASCRIPT: &str = "text/javascript";
    pub const IMPORTMAP: &str = "importmap";
    pub const MODULE: &str = "module";
    pub const SPECULATION_RULES: &str = "speculationrules";
}

/// Link `rel` values.
pub mod rel {
    pub const ALTERNATE: &str = "alternate";
    pub const AUTHOR: &str = "author";
    pub const CANONICAL: &str = "canonical";
    pub const DNS_PREFETCH: &str = "dns-prefetch";
    pub const HELP: &str = "help";
    pub const ICON: &str = "icon";
    pub const LICENSE: &str = "license";
    pub const MANIFEST: &str = "manifest";
    pub const ME: &str = "me";
    pub const MODULE_PRELOAD: &str = "modulepreload";
    pub const NEXT: &str = "next";
    pub const PINGBACK: &str = "pingback";
    pub const PRECONNECT: &str = "preconnect";
    pub const PREFETCH: &str = "prefetch";
    pub const PRELOAD: &str = "preload";
    pub const PRERENDER: &str = "prerender";
    pub const PREV: &str = "prev";
    pub const PRIVACY_POLICY: &str = "privacy-policy";
    pub const SEARCH: &str = "search";
    pub const STYLESHEET: &str = "stylesheet";
    pub const TERMS_OF_SERVICE: &str = "terms-of-service";
    pub const TOS: &str = TERMS_OF_SERVICE;
}

/// Link `as` values (preload destinations).
pub mod destination {
    pub const AUDIO: &str = "audio";
    pub const DOCUMENT: &str = "document";
    pub const EMBED: &str = "embed";
    pub const FETCH: &str = "fetch";
    pub const FONT: &str = "font";
    pub const IMAGE: &str = "image";
    pub const OBJECT: &str = "object";
    pub const SCRIPT: &str = "script";
    pub const STYLE: &str = "style";
    pub const TRACK: &str = "track";
    pub const VIDEO: &str = "video";
    pub const WORKER: &str = "worker";
}

/// Link `type` values.
pub mod link_type {
    pub const ATOM: &str = "application/atom+xml";
    pub const CSS: &str = "text/css";
    pub const GIF: &str = "image/gif";
    pub const HTML: &str = "text/html";
    pub const JPEG: &str = "image/jpeg";
    pub const PDF: &str = "application/pdf";
    pub const PNG: &str = "image/png";
    pub const RSS: &str = "application/rss+xml";
    pub const SVG: &str = "image/svg+xml";
    pub const WOFF2: &str = "font/woff2";
}

/// Link `blocking` values.
pub mod blocking {
    pub const RENDER: &str = "render";
}
