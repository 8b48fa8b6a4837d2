//! Common utilities shared across CLI commands.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::HipConfig;
use crate::host::App;
use crate::log;
use crate::registry::Hip;

/// Application name shown in logs: the config directory's name.
fn app_name(config: &HipConfig) -> String {
    config
        .root
        .canonicalize()
        .ok()
        .and_then(|root| root.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "hip".to_string())
}

/// Build an app from `config` and attach a registry holding its tags.
pub fn bind(config: &HipConfig) -> Result<(App, Arc<Hip>)> {
    let mut app = App::new(app_name(config)).with_shared_resolver(config.resolver(&config.root));
    let hip = Hip::attach(&mut app);
    config.install(&hip)?;
    Ok((app, hip))
}

/// Write `content` to `output`, or stdout when absent.
pub fn write_output(content: &str, output: Option<&Path>, module: &str) -> Result<()> {
    match output {
        Some(path) => {
            let mut file = fs::File::create(path)
                .with_context(|| format!("failed to create `{}`", path.display()))?;
            writeln!(file, "{content}")?;
            log!(module; "wrote output to {}", path.display());
        }
        None => println!("{content}"),
    }
    Ok(())
}
