//! Asset nodes and kind detection.

use std::path::{Path, PathBuf};

/// Coarse asset classification, detected from the file extension.
///
/// The kind drives reference scanning (which syntaxes to look for) and the
/// optimizer (which minifier applies). It is advisory for rules, which
/// match on paths, not kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Script,
    Stylesheet,
    Markup,
    Image,
    Font,
    Other,
}

impl AssetKind {
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("js" | "mjs" | "cjs" | "jsx" | "ts" | "tsx") => AssetKind::Script,
            Some("css" | "scss" | "sass" | "less") => AssetKind::Stylesheet,
            Some("html" | "htm") => AssetKind::Markup,
            Some("png" | "jpg" | "jpeg" | "gif" | "webp" | "avif" | "svg" | "ico") => {
                AssetKind::Image
            }
            Some("woff" | "woff2" | "ttf" | "otf" | "eot") => AssetKind::Font,
            _ => AssetKind::Other,
        }
    }

    /// Text kinds get scanned for references and substituted into.
    pub fn is_text(self) -> bool {
        matches!(
            self,
            AssetKind::Script | AssetKind::Stylesheet | AssetKind::Markup
        )
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AssetKind::Script => "script",
            AssetKind::Stylesheet => "stylesheet",
            AssetKind::Markup => "markup",
            AssetKind::Image => "image",
            AssetKind::Font => "font",
            AssetKind::Other => "other",
        };
        write!(f, "{name}")
    }
}

/// One asset in the graph, keyed by its resolved absolute path.
///
/// Nodes are created during traversal and treated as immutable once their
/// transform pipeline has run.
#[derive(Debug, Clone)]
pub struct AssetNode {
    /// Resolved absolute path; graph identity.
    pub path: PathBuf,

    /// Path relative to the project root, used for rule matching and
    /// output naming. Always forward-slashed.
    pub relative: String,

    pub kind: AssetKind,

    /// Raw file content as read from disk.
    pub content: Vec<u8>,

    /// Raw reference strings found in the source, in document order.
    pub references: Vec<String>,

    /// Resolved dependency paths, parallel to `references`.
    pub dependencies: Vec<PathBuf>,

    /// Entry name when this node is a configured entry point.
    pub entry: Option<String>,
}

impl AssetNode {
    /// Stem of the file name, used for `[name]` in naming templates.
    pub fn stem(&self) -> &str {
        Path::new(&self.relative)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("asset")
    }

    /// File extension without the dot, for `[ext]`.
    pub fn extension(&self) -> &str {
        Path::new(&self.relative)
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_detection() {
        assert_eq!(AssetKind::from_path(Path::new("a/b.mjs")), AssetKind::Script);
        assert_eq!(
            AssetKind::from_path(Path::new("style.SCSS")),
            AssetKind::Stylesheet
        );
        assert_eq!(AssetKind::from_path(Path::new("logo.png")), AssetKind::Image);
        assert_eq!(
            AssetKind::from_path(Path::new("font.woff2")),
            AssetKind::Font
        );
        assert_eq!(AssetKind::from_path(Path::new("README")), AssetKind::Other);
    }
}
