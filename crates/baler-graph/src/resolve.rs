//! Reference resolution: alias table plus extension candidates.
//!
//! Aliases are rewritten into a prefix table once at construction; lookups
//! try the longest alias first, then fall back to path resolution relative
//! to the referencing asset. Resolution order for each candidate is the
//! exact path first, then each configured extension appended in order.

use std::path::{Path, PathBuf};

use path_clean::PathClean;

use crate::error::GraphError;

pub struct Resolver {
    root: PathBuf,
    aliases: Vec<(String, PathBuf)>,
    extensions: Vec<String>,
}

impl Resolver {
    pub fn new(
        root: impl Into<PathBuf>,
        aliases: Vec<(String, PathBuf)>,
        extensions: Vec<String>,
    ) -> Self {
        let mut aliases = aliases;
        // Longest prefix wins, so "@ui/icons" beats "@ui".
        aliases.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        Self {
            root: root.into(),
            aliases,
            extensions,
        }
    }

    /// Resolve `specifier` as referenced from the asset at `from`.
    ///
    /// Query strings and fragments are stripped before resolution but left
    /// intact in the caller's raw reference. A specifier that matches no
    /// existing file is fatal.
    pub fn resolve(&self, specifier: &str, from: &Path) -> Result<PathBuf, GraphError> {
        let spec = strip_query(specifier);
        let base = self.candidate_base(spec, from);
        self.try_candidates(&base)
            .ok_or_else(|| GraphError::UnresolvedDependency {
                from: from.to_path_buf(),
                specifier: specifier.to_string(),
            })
    }

    fn candidate_base(&self, spec: &str, from: &Path) -> PathBuf {
        for (alias, target) in &self.aliases {
            if spec == alias {
                return self.root.join(target);
            }
            if let Some(rest) = spec.strip_prefix(&format!("{alias}/")) {
                return self.root.join(target).join(rest);
            }
        }

        // Leading slash means the project root, not the filesystem root.
        if let Some(rest) = spec.strip_prefix('/') {
            return self.root.join(rest);
        }

        from.parent().unwrap_or(&self.root).join(spec)
    }

    fn try_candidates(&self, base: &Path) -> Option<PathBuf> {
        let base = base.clean();
        if base.is_file() {
            return Some(base);
        }
        for ext in &self.extensions {
            let with_ext = PathBuf::from(format!("{}{}", base.display(), ext));
            if with_ext.is_file() {
                return Some(with_ext);
            }
        }
        None
    }
}

fn strip_query(specifier: &str) -> &str {
    specifier
        .split(['?', '#'])
        .next()
        .unwrap_or(specifier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &TempDir, rel: &str) -> PathBuf {
        let path = dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"x").unwrap();
        path
    }

    #[test]
    fn resolves_relative_with_extension() {
        let dir = TempDir::new().unwrap();
        let helper = touch(&dir, "src/utils/helper.js");
        let from = touch(&dir, "src/index.js");

        let resolver = Resolver::new(dir.path(), vec![], vec![".js".to_string()]);
        let resolved = resolver.resolve("./utils/helper", &from).unwrap();
        assert_eq!(resolved, helper);
    }

    #[test]
    fn exact_file_beats_extension_candidates() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "src/data.js");
        let exact = touch(&dir, "src/data");
        let from = touch(&dir, "src/index.js");

        let resolver = Resolver::new(dir.path(), vec![], vec![".js".to_string()]);
        assert_eq!(resolver.resolve("./data", &from).unwrap(), exact);
    }

    #[test]
    fn resolves_alias_prefix() {
        let dir = TempDir::new().unwrap();
        let target = touch(&dir, "src/utils/math.js");
        let from = touch(&dir, "src/deep/nested/mod.js");

        let resolver = Resolver::new(
            dir.path(),
            vec![("@utils".to_string(), PathBuf::from("src/utils"))],
            vec![".js".to_string()],
        );
        assert_eq!(resolver.resolve("@utils/math", &from).unwrap(), target);
    }

    #[test]
    fn longest_alias_wins() {
        let dir = TempDir::new().unwrap();
        let icons = touch(&dir, "src/ui/icons/star.svg");
        touch(&dir, "src/ui/star.svg");
        let from = touch(&dir, "src/index.js");

        let resolver = Resolver::new(
            dir.path(),
            vec![
                ("@ui".to_string(), PathBuf::from("src/ui")),
                ("@ui/icons".to_string(), PathBuf::from("src/ui/icons")),
            ],
            vec![],
        );
        assert_eq!(resolver.resolve("@ui/icons/star.svg", &from).unwrap(), icons);
    }

    #[test]
    fn strips_query_and_fragment() {
        let dir = TempDir::new().unwrap();
        let font = touch(&dir, "fonts/icons.woff2");
        let from = touch(&dir, "styles/main.css");

        let resolver = Resolver::new(dir.path(), vec![], vec![]);
        assert_eq!(
            resolver.resolve("../fonts/icons.woff2?v=3#iefix", &from).unwrap(),
            font
        );
    }

    #[test]
    fn unresolved_names_asset_and_specifier() {
        let dir = TempDir::new().unwrap();
        let from = touch(&dir, "src/index.js");

        let resolver = Resolver::new(dir.path(), vec![], vec![".js".to_string()]);
        let err = resolver.resolve("@missing/foo.js", &from).unwrap_err();
        match err {
            GraphError::UnresolvedDependency { from: f, specifier } => {
                assert_eq!(f, from);
                assert_eq!(specifier, "@missing/foo.js");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
