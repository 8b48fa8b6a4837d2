//! Check command - validate the config without rendering.

use anyhow::{Result, bail};

use crate::config::HipConfig;
use crate::log;

/// Run the check command
pub fn run_check(config: &HipConfig) -> Result<()> {
    let diag = config.validate();
    diag.print_warnings();

    if diag.has_errors() {
        bail!(diag);
    }

    log!(
        "check";
        "ok: {} metas, {} scripts, {} links",
        config.meta.len(),
        config.script.len(),
        config.link.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_check_valid() {
        let config = HipConfig::from_str("[[meta]]\ncharset = \"utf-8\"").unwrap();
        assert!(run_check(&config).is_ok());
    }

    #[test]
    fn test_check_invalid() {
        let config = HipConfig::from_str("[[link]]\nhref = \"a.woff2\"\nrel = \"preload\"").unwrap();
        let err = run_check(&config).unwrap_err();
        assert!(err.to_string().contains("link[0]"));
    }
}
