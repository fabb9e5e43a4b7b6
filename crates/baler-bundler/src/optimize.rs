//! Post-transform optimization pass.
//!
//! Runs on final content before hash computation and name assignment, so
//! content-addressed filenames never go stale. Minification is
//! best-effort: input a backend cannot parse is left untouched with a
//! warning rather than failing the build.
//!
//! Uses oxc for scripts and lightningcss for stylesheets; markup gets a
//! conservative whitespace pass.

use baler_config::OptimizationOptions;
use baler_graph::AssetKind;
use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};
use oxc::allocator::Allocator;
use oxc::codegen::{Codegen, CodegenOptions, CommentOptions};
use oxc::mangler::MangleOptions;
use oxc::minifier::{CompressOptions, Minifier, MinifierOptions};
use oxc::parser::Parser;
use oxc::span::SourceType;

pub struct Optimizer {
    options: OptimizationOptions,
}

impl Optimizer {
    pub fn new(options: OptimizationOptions) -> Self {
        Self { options }
    }

    pub fn enabled(&self) -> bool {
        self.options.enabled
    }

    /// Optimize `content` for its kind.
    ///
    /// Returns replacement bytes, or `None` to keep the original.
    pub fn optimize(&self, kind: AssetKind, label: &str, content: &[u8]) -> Option<Vec<u8>> {
        if !self.options.enabled {
            return None;
        }
        let source = std::str::from_utf8(content).ok()?;
        let minified = match kind {
            AssetKind::Script if self.options.scripts => minify_js(source),
            AssetKind::Stylesheet if self.options.styles => minify_css(source),
            AssetKind::Markup if self.options.markup => Some(collapse_markup(source)),
            _ => return None,
        };
        match minified {
            Some(out) => Some(out.into_bytes()),
            None => {
                tracing::warn!(asset = label, "minifier could not parse input; leaving as-is");
                None
            }
        }
    }
}

/// Minify JavaScript source code.
fn minify_js(source: &str) -> Option<String> {
    let allocator = Allocator::default();
    let source_type = SourceType::mjs();
    let ret = Parser::new(&allocator, source, source_type).parse();
    if !ret.errors.is_empty() {
        return None;
    }
    let mut program = ret.program;
    let options = MinifierOptions {
        mangle: Some(MangleOptions::default()),
        compress: Some(CompressOptions::smallest()),
    };
    let ret = Minifier::new(options).minify(&allocator, &mut program);
    let code = Codegen::new()
        .with_options(CodegenOptions {
            minify: true,
            comments: CommentOptions::disabled(),
            ..CodegenOptions::default()
        })
        .with_scoping(ret.scoping)
        .build(&program)
        .code;
    Some(code)
}

/// Minify CSS source code.
fn minify_css(source: &str) -> Option<String> {
    let stylesheet = StyleSheet::parse(source, ParserOptions::default()).ok()?;
    let result = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            ..PrinterOptions::default()
        })
        .ok()?;
    Some(result.code)
}

/// Conservative markup pass: strip trailing whitespace and blank lines.
fn collapse_markup(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    for line in source.lines() {
        let trimmed = line.trim_end();
        if trimmed.is_empty() {
            continue;
        }
        out.push_str(trimmed);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn optimizer(enabled: bool) -> Optimizer {
        Optimizer::new(OptimizationOptions {
            enabled,
            ..OptimizationOptions::default()
        })
    }

    #[test]
    fn disabled_optimizer_is_a_no_op() {
        let out = optimizer(false).optimize(AssetKind::Script, "a.js", b"const  x  =  1 ;");
        assert!(out.is_none());
    }

    #[test]
    fn minifies_scripts() {
        let source = b"const answer = 40 + 2;\nexport { answer };\n";
        let out = optimizer(true)
            .optimize(AssetKind::Script, "a.js", source)
            .unwrap();
        assert!(out.len() < source.len());
    }

    #[test]
    fn minifies_stylesheets() {
        let source = b"body {\n    color : red ;\n}\n";
        let out = optimizer(true)
            .optimize(AssetKind::Stylesheet, "a.css", source)
            .unwrap();
        assert!(out.len() < source.len());
        assert!(String::from_utf8(out).unwrap().contains("color:red"));
    }

    #[test]
    fn unparseable_script_is_left_untouched() {
        let out = optimizer(true).optimize(AssetKind::Script, "a.js", b"const = = broken");
        assert!(out.is_none());
    }

    #[test]
    fn markup_keeps_content_lines() {
        let out = optimizer(true)
            .optimize(AssetKind::Markup, "index.html", b"<html>   \n\n  <body></body>\n</html>\n")
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "<html>\n  <body></body>\n</html>\n");
    }

    #[test]
    fn binary_kinds_are_skipped() {
        let out = optimizer(true).optimize(AssetKind::Image, "a.png", &[0xff, 0xd8]);
        assert!(out.is_none());
    }
}
