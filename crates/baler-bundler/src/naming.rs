//! Output naming: templates and content-addressed names.
//!
//! A template without `[contenthash]` yields static names that overwrite
//! between builds; with it, any content change produces a new filename,
//! which is what makes long-term caching safe.

use crate::error::{Error, Result};

/// Hex digits of the blake3 hash embedded in filenames.
const HASH_LEN: usize = 16;

/// Content hash of the final bytes, truncated for filenames.
pub fn content_hash(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex()[..HASH_LEN].to_string()
}

/// Hashed name under a directory: `dir/[name.]hash.ext`.
pub fn hashed_path(dir: &str, name: Option<&str>, hash: &str, ext: &str) -> String {
    let mut file = String::new();
    if let Some(name) = name {
        file.push_str(name);
        file.push('.');
    }
    file.push_str(hash);
    if !ext.is_empty() {
        file.push('.');
        file.push_str(ext);
    }
    if dir.is_empty() {
        file
    } else {
        format!("{dir}/{file}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Name,
    ContentHash,
    Ext,
    Query,
}

/// Parsed output naming template.
#[derive(Debug, Clone)]
pub struct FilenameTemplate {
    source: String,
    parts: Vec<Part>,
}

#[derive(Debug, Clone)]
enum Part {
    Literal(String),
    Placeholder(Token),
}

impl FilenameTemplate {
    pub fn parse(template: &str) -> Result<Self> {
        let mut parts = Vec::new();
        let mut rest = template;
        while let Some(open) = rest.find('[') {
            if open > 0 {
                parts.push(Part::Literal(rest[..open].to_string()));
            }
            let after = &rest[open + 1..];
            let close = after.find(']').ok_or_else(|| Error::InvalidTemplate {
                template: template.to_string(),
                message: "unterminated placeholder".to_string(),
            })?;
            let token = match &after[..close] {
                "name" => Token::Name,
                "contenthash" => Token::ContentHash,
                "ext" => Token::Ext,
                "query" => Token::Query,
                other => {
                    return Err(Error::InvalidTemplate {
                        template: template.to_string(),
                        message: format!("unknown placeholder '[{other}]'"),
                    })
                }
            };
            parts.push(Part::Placeholder(token));
            rest = &after[close + 1..];
        }
        if !rest.is_empty() {
            parts.push(Part::Literal(rest.to_string()));
        }
        Ok(Self {
            source: template.to_string(),
            parts,
        })
    }

    /// Whether names depend on content (cache-busting mode).
    pub fn content_addressed(&self) -> bool {
        self.parts
            .iter()
            .any(|p| matches!(p, Part::Placeholder(Token::ContentHash)))
    }

    pub fn render(&self, name: &str, hash: &str, ext: &str) -> String {
        let mut out = String::with_capacity(self.source.len() + name.len() + hash.len());
        for part in &self.parts {
            match part {
                Part::Literal(lit) => out.push_str(lit),
                Part::Placeholder(Token::Name) => out.push_str(name),
                Part::Placeholder(Token::ContentHash) => out.push_str(hash),
                Part::Placeholder(Token::Ext) => out.push_str(ext),
                // Queries only exist on references, never on disk.
                Part::Placeholder(Token::Query) => {}
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_static_template() {
        let t = FilenameTemplate::parse("[name].js").unwrap();
        assert!(!t.content_addressed());
        assert_eq!(t.render("main", "abc", "js"), "main.js");
    }

    #[test]
    fn renders_hashed_template() {
        let t = FilenameTemplate::parse("[name].[contenthash].[ext]").unwrap();
        assert!(t.content_addressed());
        assert_eq!(t.render("main", "deadbeef", "js"), "main.deadbeef.js");
    }

    #[test]
    fn rejects_unknown_placeholder() {
        assert!(matches!(
            FilenameTemplate::parse("[name].[chunkhash].js"),
            Err(Error::InvalidTemplate { .. })
        ));
    }

    #[test]
    fn rejects_unterminated_placeholder() {
        assert!(matches!(
            FilenameTemplate::parse("[name"),
            Err(Error::InvalidTemplate { .. })
        ));
    }

    #[test]
    fn hash_is_stable_and_content_sensitive() {
        let a = content_hash(b"hello");
        let b = content_hash(b"hello");
        let c = content_hash(b"hello!");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 16);
    }

    #[test]
    fn hashed_path_shapes() {
        assert_eq!(
            hashed_path("assets", Some("styles"), "aaaa", "css"),
            "assets/styles.aaaa.css"
        );
        assert_eq!(
            hashed_path("assets/images", None, "bbbb", "png"),
            "assets/images/bbbb.png"
        );
        assert_eq!(hashed_path("", None, "cccc", ""), "cccc");
    }
}
