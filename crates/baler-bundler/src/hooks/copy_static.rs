//! Static directory copying, afterEmit.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use walkdir::WalkDir;

use crate::context::BuildContext;
use crate::error::{Error, Result};
use crate::hooks::{parse_hook_options, Hook};
use crate::naming::content_hash;
use crate::output::Emitter;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, default)]
struct CopyStaticOptions {
    /// Source directory, relative to the project root.
    from: PathBuf,
    /// Paths (relative to `from`) matching this pattern are skipped;
    /// typically the HTML shell template, which the `html` hook owns.
    exclude: Option<String>,
}

impl Default for CopyStaticOptions {
    fn default() -> Self {
        Self {
            from: PathBuf::from("public"),
            exclude: None,
        }
    }
}

/// Copies a static directory tree verbatim into the output root.
///
/// These assets are not reachable from the entry graph; they keep their
/// relative paths and are recorded in the manifest under `static/` keys.
pub struct CopyStaticHook {
    from: PathBuf,
    exclude: Option<Regex>,
}

impl CopyStaticHook {
    pub fn from_options(options: &Value) -> Result<Self> {
        let options: CopyStaticOptions = parse_hook_options("copy-static", options)?;
        let exclude = options
            .exclude
            .as_deref()
            .map(Regex::new)
            .transpose()
            .map_err(|e| Error::InvalidPluginOptions {
                plugin: "copy-static".to_string(),
                message: e.to_string(),
            })?;
        Ok(Self {
            from: options.from,
            exclude,
        })
    }
}

impl Hook for CopyStaticHook {
    fn name(&self) -> &str {
        "copy-static"
    }

    fn after_emit(&self, ctx: &mut BuildContext, emitter: &Emitter) -> anyhow::Result<()> {
        let source = ctx.root.join(&self.from);
        if !source.is_dir() {
            anyhow::bail!("static directory '{}' not found", source.display());
        }

        let mut copied = 0usize;
        for entry in WalkDir::new(&source) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(&source)
                .expect("walked path under source")
                .to_string_lossy()
                .replace(std::path::MAIN_SEPARATOR, "/");
            if let Some(exclude) = &self.exclude {
                if exclude.is_match(&relative) {
                    continue;
                }
            }

            let content = fs::read(entry.path())
                .with_context(|| format!("failed to read '{}'", entry.path().display()))?;
            ctx.manifest.lock().record(
                format!("static/{relative}"),
                relative.as_str(),
                content_hash(&content),
            )?;
            emitter.emit(&relative, &content)?;
            copied += 1;
        }

        tracing::debug!(files = copied, from = %source.display(), "copied static assets");
        Ok(())
    }
}
