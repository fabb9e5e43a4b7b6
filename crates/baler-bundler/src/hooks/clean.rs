//! Output root cleaning, beforeBuild.

use std::fs;

use serde::Deserialize;
use serde_json::Value;

use crate::context::BuildContext;
use crate::error::Result;
use crate::hooks::{parse_hook_options, Hook};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct CleanOptions {}

/// Deletes stale output from a previous build before the new one begins.
///
/// The directory itself is kept so concurrent watchers of the output root
/// do not lose their handle.
pub struct CleanHook;

impl CleanHook {
    pub fn from_options(options: &Value) -> Result<Self> {
        let _options: CleanOptions = parse_hook_options("clean", options)?;
        Ok(Self)
    }
}

impl Hook for CleanHook {
    fn name(&self) -> &str {
        "clean"
    }

    fn before_build(&self, ctx: &mut BuildContext) -> anyhow::Result<()> {
        if !ctx.out_dir.exists() {
            return Ok(());
        }
        let mut removed = 0usize;
        for entry in fs::read_dir(&ctx.out_dir)? {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type()?.is_dir() {
                fs::remove_dir_all(&path)?;
            } else {
                fs::remove_file(&path)?;
            }
            removed += 1;
        }
        tracing::debug!(entries = removed, dir = %ctx.out_dir.display(), "cleaned output root");
        Ok(())
    }
}
