//! Pluggable config validation strategies.
//!
//! Separates schema validation (shape and patterns, no filesystem access)
//! from filesystem validation (CLI use: do the referenced paths exist).
//! Every check here runs before the first asset is read, so a bad config
//! never produces partial output.

use std::path::Path;

use crate::build::BuildOptions;
use crate::error::{ConfigError, Result};

/// Placeholders the output naming template may use.
const KNOWN_PLACEHOLDERS: &[&str] = &["name", "contenthash", "ext", "query"];

/// Trait for pluggable config validation strategies.
pub trait ConfigValidator {
    fn validate(&self, options: &BuildOptions) -> Result<()>;
}

/// Schema-only validation (no filesystem checks).
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, options: &BuildOptions) -> Result<()> {
        if options.entry.is_empty() {
            return Err(ConfigError::NoEntries);
        }

        for rule in &options.rules {
            compile_check(&rule.test)?;
            if let Some(exclude) = &rule.exclude {
                compile_check(exclude)?;
            }
            if rule.pipeline.is_empty() {
                return Err(ConfigError::EmptyPipeline(rule.test.clone()));
            }
        }

        for plugin in &options.plugins {
            if plugin.kind.trim().is_empty() {
                return Err(ConfigError::EmptyPluginKind);
            }
        }

        validate_template(&options.output.filename)?;

        Ok(())
    }
}

/// Filesystem validator (for CLI use).
///
/// Runs schema validation first, then checks that entry points exist and
/// alias targets are directories.
pub struct FsValidator {
    root: std::path::PathBuf,
}

impl FsValidator {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl ConfigValidator for FsValidator {
    fn validate(&self, options: &BuildOptions) -> Result<()> {
        SchemaValidator.validate(options)?;

        for (_, entry) in options.entry.named() {
            let path = self.root.join(&entry);
            if !path.is_file() {
                return Err(ConfigError::EntryNotFound(entry));
            }
        }

        for (alias, target) in &options.resolve.alias {
            let path = self.root.join(target);
            if !path.is_dir() {
                return Err(ConfigError::AliasTargetMissing {
                    alias: alias.clone(),
                    target: target.clone(),
                });
            }
        }

        Ok(())
    }
}

fn compile_check(pattern: &str) -> Result<()> {
    regex::Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })?;
    Ok(())
}

/// Reject unknown `[placeholder]` names in the naming template.
fn validate_template(template: &str) -> Result<()> {
    let mut rest = template;
    while let Some(open) = rest.find('[') {
        let after = &rest[open + 1..];
        let Some(close) = after.find(']') else {
            return Err(ConfigError::UnknownPlaceholder(after.to_string()));
        };
        let name = &after[..close];
        if !KNOWN_PLACEHOLDERS.contains(&name) {
            return Err(ConfigError::UnknownPlaceholder(name.to_string()));
        }
        rest = &after[close + 1..];
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::{EntryOptions, RuleOptions};

    fn minimal() -> BuildOptions {
        BuildOptions {
            entry: EntryOptions::Single("src/index.js".into()),
            ..BuildOptions::default()
        }
    }

    #[test]
    fn empty_entries_rejected() {
        let options = BuildOptions::default();
        assert!(matches!(
            SchemaValidator.validate(&options),
            Err(ConfigError::NoEntries)
        ));
    }

    #[test]
    fn bad_rule_pattern_rejected() {
        let mut options = minimal();
        options.rules.push(RuleOptions {
            test: "(".to_string(),
            exclude: None,
            pipeline: vec!["script".to_string()],
            options: serde_json::Value::Null,
        });
        assert!(matches!(
            SchemaValidator.validate(&options),
            Err(ConfigError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn empty_pipeline_rejected() {
        let mut options = minimal();
        options.rules.push(RuleOptions {
            test: "\\.css$".to_string(),
            exclude: None,
            pipeline: vec![],
            options: serde_json::Value::Null,
        });
        assert!(matches!(
            SchemaValidator.validate(&options),
            Err(ConfigError::EmptyPipeline(_))
        ));
    }

    #[test]
    fn unknown_placeholder_rejected() {
        let mut options = minimal();
        options.output.filename = "[name].[chunkhash].js".to_string();
        assert!(matches!(
            SchemaValidator.validate(&options),
            Err(ConfigError::UnknownPlaceholder(name)) if name == "chunkhash"
        ));
    }

    #[test]
    fn known_placeholders_accepted() {
        let mut options = minimal();
        options.output.filename = "[name].[contenthash].[ext]".to_string();
        assert!(SchemaValidator.validate(&options).is_ok());
    }
}
