//! HTML shell generation, afterEmit.
//!
//! Reads a shell template (or falls back to a built-in one) and injects
//! the final emitted filenames: stylesheet links before `</head>`, entry
//! scripts before `</body>`. Runs after emission because only then are
//! content-addressed names known.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use serde::Deserialize;
use serde_json::Value;

use crate::context::BuildContext;
use crate::error::Result;
use crate::hooks::{parse_hook_options, Hook};
use crate::naming::content_hash;
use crate::output::Emitter;

const DEFAULT_TEMPLATE: &str = "<!doctype html>\n<html lang=\"en\">\n<head>\n  <meta charset=\"utf-8\">\n  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n  <title>Baler App</title>\n</head>\n<body>\n</body>\n</html>\n";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, default)]
struct HtmlShellOptions {
    /// Shell template, relative to the project root; built-in when unset.
    template: Option<PathBuf>,
    /// Output filename.
    filename: String,
    /// Whether to inject links/scripts for emitted artifacts.
    inject: bool,
    /// Replaces the template's `<title>` content when set.
    title: Option<String>,
}

impl Default for HtmlShellOptions {
    fn default() -> Self {
        Self {
            template: None,
            filename: "index.html".to_string(),
            inject: true,
            title: None,
        }
    }
}

pub struct HtmlShellHook {
    options: HtmlShellOptions,
}

impl HtmlShellHook {
    pub fn from_options(options: &Value) -> Result<Self> {
        let options: HtmlShellOptions = parse_hook_options("html", options)?;
        Ok(Self { options })
    }

    fn render(&self, ctx: &BuildContext) -> anyhow::Result<String> {
        let mut html = match &self.options.template {
            Some(template) => {
                let path = ctx.root.join(template);
                fs::read_to_string(&path)
                    .with_context(|| format!("failed to read template '{}'", path.display()))?
            }
            None => DEFAULT_TEMPLATE.to_string(),
        };

        if let Some(title) = &self.options.title {
            html = replace_title(&html, title);
        }

        if self.options.inject {
            let (head_tags, body_tags) = self.collect_tags(ctx);
            html = inject_before(&html, "</head>", &head_tags);
            html = inject_before(&html, "</body>", &body_tags);
        }

        Ok(html)
    }

    /// Links for every emitted stylesheet, scripts for every entry bundle.
    fn collect_tags(&self, ctx: &BuildContext) -> (String, String) {
        let manifest = ctx.manifest.lock();
        let mut head_tags = String::new();
        let mut body_tags = String::new();
        for (key, entry) in manifest.iter() {
            if key.starts_with("static/") {
                continue;
            }
            if entry.path.ends_with(".css") {
                head_tags.push_str(&format!("  <link rel=\"stylesheet\" href=\"{}\">\n", entry.path));
            } else if entry.path.ends_with(".js") && ctx.entry_names.contains(key) {
                body_tags.push_str(&format!("  <script defer src=\"{}\"></script>\n", entry.path));
            }
        }
        (head_tags, body_tags)
    }
}

impl Hook for HtmlShellHook {
    fn name(&self) -> &str {
        "html"
    }

    fn after_emit(&self, ctx: &mut BuildContext, emitter: &Emitter) -> anyhow::Result<()> {
        let html = self.render(ctx)?;
        let content = html.into_bytes();

        ctx.manifest.lock().record(
            self.options.filename.clone(),
            self.options.filename.clone(),
            content_hash(&content),
        )?;
        emitter.emit(&self.options.filename, &content)?;
        tracing::debug!(file = self.options.filename.as_str(), "emitted html shell");
        Ok(())
    }
}

/// Insert `insertion` directly before `marker`, or append when the marker
/// is missing (malformed templates still get working references).
fn inject_before(html: &str, marker: &str, insertion: &str) -> String {
    if insertion.is_empty() {
        return html.to_string();
    }
    match html.find(marker) {
        Some(pos) => {
            let mut out = String::with_capacity(html.len() + insertion.len());
            out.push_str(&html[..pos]);
            out.push_str(insertion);
            out.push_str(&html[pos..]);
            out
        }
        None => {
            let mut out = html.to_string();
            out.push_str(insertion);
            out
        }
    }
}

fn replace_title(html: &str, title: &str) -> String {
    let Some(open) = html.find("<title>") else {
        return html.to_string();
    };
    let start = open + "<title>".len();
    let Some(close) = html[start..].find("</title>") else {
        return html.to_string();
    };
    let mut out = String::with_capacity(html.len() + title.len());
    out.push_str(&html[..start]);
    out.push_str(title);
    out.push_str(&html[start + close..]);
    out
}
