//! Environment definition injection.
//!
//! Freezes selected process environment variables (plus inline values)
//! into the build context at beforeBuild, then substitutes them into
//! script sources as literals once the graph is resolved and before any
//! pipeline runs. Later stages only ever see literal values, never live
//! lookups.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use baler_graph::{AssetGraph, AssetKind};

use crate::context::BuildContext;
use crate::error::Result;
use crate::hooks::{parse_hook_options, Hook};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
struct DefineEnvOptions {
    /// Process environment variables to freeze; unset keys are skipped.
    keys: Vec<String>,
    /// Inline definitions, overriding the process environment on clashes.
    values: IndexMap<String, String>,
}

pub struct DefineEnvHook {
    options: DefineEnvOptions,
}

impl DefineEnvHook {
    pub fn from_options(options: &Value) -> Result<Self> {
        let options: DefineEnvOptions = parse_hook_options("define-env", options)?;
        Ok(Self { options })
    }
}

impl Hook for DefineEnvHook {
    fn name(&self) -> &str {
        "define-env"
    }

    fn before_build(&self, ctx: &mut BuildContext) -> anyhow::Result<()> {
        for key in &self.options.keys {
            match std::env::var(key) {
                Ok(value) => ctx.define(key.clone(), value)?,
                Err(_) => {
                    tracing::debug!(key = key.as_str(), "environment variable unset; skipped")
                }
            }
        }
        for (key, value) in &self.options.values {
            ctx.define(key.clone(), value.clone())?;
        }
        Ok(())
    }

    fn after_graph_resolved(
        &self,
        ctx: &mut BuildContext,
        graph: &mut AssetGraph,
    ) -> anyhow::Result<()> {
        // Longest key first so API_URL is never shadowed by API.
        let mut definitions: Vec<(&String, &String)> = ctx.definitions().iter().collect();
        definitions.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(b.0)));
        if definitions.is_empty() {
            return Ok(());
        }

        graph.for_each_mut(|node| {
            if node.kind != AssetKind::Script {
                return;
            }
            let Ok(text) = std::str::from_utf8(&node.content) else {
                return;
            };
            let mut text = text.to_string();
            let mut touched = false;
            for (key, value) in &definitions {
                let needle = format!("process.env.{key}");
                if text.contains(&needle) {
                    let literal = Value::String((*value).clone()).to_string();
                    text = text.replace(&needle, &literal);
                    touched = true;
                }
            }
            if touched {
                tracing::trace!(asset = node.relative.as_str(), "substituted definitions");
                node.content = text.into_bytes();
            }
        });
        Ok(())
    }
}
