//! Built-in pipeline stages.
//!
//! Concrete transpilation and preprocessing are external collaborators;
//! the built-ins own classification, validation, and emission placement.

use baler_graph::AssetKind;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::pipeline::{PipelineStage, StageContext, StagePayload};

/// Instantiate a built-in stage by configured name.
pub fn build_stage(name: &str, options: &Value) -> Result<Box<dyn PipelineStage>> {
    match name {
        "script" => {
            let _options: ScriptOptions = parse_options(name, options)?;
            Ok(Box::new(ScriptStage))
        }
        "style" => {
            let options: StyleOptions = parse_options(name, options)?;
            Ok(Box::new(StyleStage { options }))
        }
        "asset" => {
            let options: AssetOptions = parse_options(name, options)?;
            Ok(Box::new(AssetStage { options }))
        }
        "raw" => {
            let options: RawOptions = parse_options(name, options)?;
            Ok(Box::new(RawStage { options }))
        }
        other => Err(Error::UnknownStage {
            stage: other.to_string(),
        }),
    }
}

fn parse_options<T: DeserializeOwned + Default>(stage: &str, value: &Value) -> Result<T> {
    if value.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(value.clone()).map_err(|e| Error::InvalidStageOptions {
        stage: stage.to_string(),
        message: e.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScriptOptions {}

/// Script sources pass through; transpilation is an external concern.
/// The stage asserts the source is text and pins the emitted kind.
#[derive(Debug)]
struct ScriptStage;

impl PipelineStage for ScriptStage {
    fn name(&self) -> &'static str {
        "script"
    }

    fn apply(&self, ctx: &StageContext<'_>, mut payload: StagePayload) -> anyhow::Result<StagePayload> {
        if std::str::from_utf8(&payload.content).is_err() {
            anyhow::bail!("'{}' is not valid UTF-8 script source", ctx.relative);
        }
        payload.kind = AssetKind::Script;
        payload.ext = "js".to_string();
        payload.dir = String::new();
        payload.include_name = true;
        Ok(payload)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, default)]
struct StyleOptions {
    /// Emit the stylesheet as a separate file under `dir`; when false the
    /// sheet lands in the output root next to the entries.
    extract: bool,
    dir: String,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            extract: true,
            dir: "assets".to_string(),
        }
    }
}

#[derive(Debug)]
struct StyleStage {
    options: StyleOptions,
}

impl PipelineStage for StyleStage {
    fn name(&self) -> &'static str {
        "style"
    }

    fn apply(&self, ctx: &StageContext<'_>, mut payload: StagePayload) -> anyhow::Result<StagePayload> {
        if std::str::from_utf8(&payload.content).is_err() {
            anyhow::bail!("'{}' is not valid UTF-8 stylesheet source", ctx.relative);
        }
        payload.kind = AssetKind::Stylesheet;
        payload.ext = "css".to_string();
        payload.dir = if self.options.extract {
            self.options.dir.clone()
        } else {
            String::new()
        };
        payload.include_name = true;
        Ok(payload)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, default)]
struct AssetOptions {
    /// Placement directory for the emitted file.
    dir: String,
    /// Keep the source stem in front of the content hash.
    include_name: bool,
}

impl Default for AssetOptions {
    fn default() -> Self {
        Self {
            dir: "assets".to_string(),
            include_name: false,
        }
    }
}

/// Binary passthrough with content-addressed placement (images, fonts).
#[derive(Debug)]
struct AssetStage {
    options: AssetOptions,
}

impl PipelineStage for AssetStage {
    fn name(&self) -> &'static str {
        "asset"
    }

    fn apply(&self, _ctx: &StageContext<'_>, mut payload: StagePayload) -> anyhow::Result<StagePayload> {
        payload.dir = self.options.dir.clone();
        payload.include_name = self.options.include_name;
        Ok(payload)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
struct RawOptions {
    /// Exact output path; overwrites between builds. Two assets routed to
    /// the same fixed name with different content collide fatally.
    name: Option<String>,
}

/// Byte passthrough, no interpretation at all.
#[derive(Debug)]
struct RawStage {
    options: RawOptions,
}

impl PipelineStage for RawStage {
    fn name(&self) -> &'static str {
        "raw"
    }

    fn apply(&self, _ctx: &StageContext<'_>, mut payload: StagePayload) -> anyhow::Result<StagePayload> {
        if self.options.name.is_some() {
            payload.fixed_path = self.options.name.clone();
        }
        Ok(payload)
    }
}
