//! Lifecycle hooks.
//!
//! Hooks observe or mutate build state at a fixed set of events:
//! beforeBuild, afterGraphResolved, beforeEmit, afterEmit, buildComplete.
//! Registrations are plain data records (kind + options + order) resolved
//! to built-in implementations at build start; within an event, hooks run
//! in registration order (explicit `order` values first, declaration order
//! breaking ties).
//!
//! A failing hook aborts the build unless its registration is marked
//! best-effort, in which case the failure is logged and the build
//! continues.

mod clean;
mod copy_static;
mod define_env;
mod html;

pub use clean::CleanHook;
pub use copy_static::CopyStaticHook;
pub use define_env::DefineEnvHook;
pub use html::HtmlShellHook;

use baler_config::PluginOptions;
use baler_graph::AssetGraph;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::artifact::Artifact;
use crate::context::BuildContext;
use crate::error::{Error, Result};
use crate::output::Emitter;

/// A lifecycle extension point.
///
/// Default implementations are no-ops so a hook only overrides the events
/// it cares about.
pub trait Hook: Send + Sync {
    fn name(&self) -> &str;

    fn before_build(&self, _ctx: &mut BuildContext) -> anyhow::Result<()> {
        Ok(())
    }

    fn after_graph_resolved(
        &self,
        _ctx: &mut BuildContext,
        _graph: &mut AssetGraph,
    ) -> anyhow::Result<()> {
        Ok(())
    }

    fn before_emit(
        &self,
        _ctx: &mut BuildContext,
        _artifacts: &mut Vec<Artifact>,
    ) -> anyhow::Result<()> {
        Ok(())
    }

    fn after_emit(&self, _ctx: &mut BuildContext, _emitter: &Emitter) -> anyhow::Result<()> {
        Ok(())
    }

    fn build_complete(&self, _ctx: &mut BuildContext) -> anyhow::Result<()> {
        Ok(())
    }
}

struct Registration {
    hook: Box<dyn Hook>,
    label: String,
    best_effort: bool,
}

/// Ordered hook registrations for one build.
#[derive(Default)]
pub struct HookRegistry {
    registrations: Vec<Registration>,
}

macro_rules! dispatch {
    ($self:ident, $event:literal, $invoke:expr) => {{
        for registration in &$self.registrations {
            let result: anyhow::Result<()> = $invoke(&registration.hook);
            if let Err(err) = result {
                if registration.best_effort {
                    tracing::warn!(
                        hook = registration.label.as_str(),
                        event = $event,
                        error = %err,
                        "best-effort hook failed; continuing"
                    );
                    continue;
                }
                return Err(Error::Plugin {
                    hook: registration.label.clone(),
                    message: err.to_string(),
                });
            }
        }
        Ok(())
    }};
}

impl HookRegistry {
    /// Instantiate built-in hooks from configuration.
    ///
    /// Disabled registrations are skipped; unknown kinds and invalid
    /// option shapes fail here, before the build starts.
    pub fn from_options(plugins: &[PluginOptions]) -> Result<Self> {
        let mut indexed: Vec<(i32, usize, Registration)> = Vec::new();
        for (index, plugin) in plugins.iter().enumerate() {
            if !plugin.enabled {
                continue;
            }
            let hook = instantiate(plugin)?;
            indexed.push((
                plugin.order,
                index,
                Registration {
                    hook,
                    label: plugin.label().to_string(),
                    best_effort: plugin.best_effort,
                },
            ));
        }
        indexed.sort_by_key(|(order, index, _)| (*order, *index));
        Ok(Self {
            registrations: indexed.into_iter().map(|(_, _, r)| r).collect(),
        })
    }

    /// Register a hook directly (library and test use).
    pub fn add(&mut self, hook: Box<dyn Hook>, best_effort: bool) {
        let label = hook.name().to_string();
        self.registrations.push(Registration {
            hook,
            label,
            best_effort,
        });
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    pub fn before_build(&self, ctx: &mut BuildContext) -> Result<()> {
        dispatch!(self, "beforeBuild", |hook: &Box<dyn Hook>| hook
            .before_build(ctx))
    }

    pub fn after_graph_resolved(
        &self,
        ctx: &mut BuildContext,
        graph: &mut AssetGraph,
    ) -> Result<()> {
        dispatch!(self, "afterGraphResolved", |hook: &Box<dyn Hook>| hook
            .after_graph_resolved(ctx, graph))
    }

    pub fn before_emit(&self, ctx: &mut BuildContext, artifacts: &mut Vec<Artifact>) -> Result<()> {
        dispatch!(self, "beforeEmit", |hook: &Box<dyn Hook>| hook
            .before_emit(ctx, artifacts))
    }

    pub fn after_emit(&self, ctx: &mut BuildContext, emitter: &Emitter) -> Result<()> {
        dispatch!(self, "afterEmit", |hook: &Box<dyn Hook>| hook
            .after_emit(ctx, emitter))
    }

    pub fn build_complete(&self, ctx: &mut BuildContext) -> Result<()> {
        dispatch!(self, "buildComplete", |hook: &Box<dyn Hook>| hook
            .build_complete(ctx))
    }
}

fn instantiate(options: &PluginOptions) -> Result<Box<dyn Hook>> {
    match options.kind.as_str() {
        "clean" => Ok(Box::new(CleanHook::from_options(&options.options)?)),
        "copy-static" => Ok(Box::new(CopyStaticHook::from_options(&options.options)?)),
        "html" => Ok(Box::new(HtmlShellHook::from_options(&options.options)?)),
        "define-env" => Ok(Box::new(DefineEnvHook::from_options(&options.options)?)),
        other => Err(Error::UnknownPluginKind {
            kind: other.to_string(),
        }),
    }
}

pub(crate) fn parse_hook_options<T: DeserializeOwned + Default>(
    kind: &str,
    value: &Value,
) -> Result<T> {
    if value.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(value.clone()).map_err(|e| Error::InvalidPluginOptions {
        plugin: kind.to_string(),
        message: e.to_string(),
    })
}
