//! Rule matching: path patterns to transform pipelines.
//!
//! Matching is an explicit ordered scan with early exit; the first rule
//! whose include pattern matches (and whose exclude pattern, if any, does
//! not) wins and the rest are skipped. Selection is deterministic for a
//! fixed rule list and path.

use baler_config::{DefaultPolicy, RuleOptions};
use regex::Regex;

use crate::error::{Error, Result};
use crate::pipeline::TransformPipeline;

#[derive(Debug)]
pub struct CompiledRule {
    test: Regex,
    exclude: Option<Regex>,
    pub pipeline: TransformPipeline,
}

impl CompiledRule {
    fn matches(&self, relative: &str) -> bool {
        if !self.test.is_match(relative) {
            return false;
        }
        match &self.exclude {
            Some(exclude) => !exclude.is_match(relative),
            None => true,
        }
    }
}

#[derive(Debug)]
pub struct RuleSet {
    rules: Vec<CompiledRule>,
    pub default_policy: DefaultPolicy,
}

impl RuleSet {
    /// Compile configured rules, building each pipeline up front so stage
    /// validation happens before any asset is read.
    pub fn compile(rules: &[RuleOptions], default_policy: DefaultPolicy) -> Result<Self> {
        let mut compiled = Vec::with_capacity(rules.len());
        for rule in rules {
            let test = compile_pattern(&rule.test)?;
            let exclude = rule.exclude.as_deref().map(compile_pattern).transpose()?;
            let pipeline = TransformPipeline::from_names(&rule.pipeline, &rule.options)?;
            compiled.push(CompiledRule {
                test,
                exclude,
                pipeline,
            });
        }
        Ok(Self {
            rules: compiled,
            default_policy,
        })
    }

    /// First matching rule for a root-relative, forward-slashed path.
    pub fn matched(&self, relative: &str) -> Option<&CompiledRule> {
        self.rules.iter().find(|rule| rule.matches(relative))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn compile_pattern(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| {
        Error::Config(baler_config::ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(test: &str, exclude: Option<&str>, pipeline: &[&str]) -> RuleOptions {
        RuleOptions {
            test: test.to_string(),
            exclude: exclude.map(String::from),
            pipeline: pipeline.iter().map(|s| s.to_string()).collect(),
            options: serde_json::Value::Null,
        }
    }

    #[test]
    fn first_match_wins_in_order() {
        let set = RuleSet::compile(
            &[rule("\\.css$", None, &["style"]), rule(".", None, &["raw"])],
            DefaultPolicy::Copy,
        )
        .unwrap();

        // The css rule is checked first and wins for stylesheets.
        assert!(set.matched("src/styles.css").is_some());
        let reversed = RuleSet::compile(
            &[rule(".", None, &["raw"]), rule("\\.css$", None, &["style"])],
            DefaultPolicy::Copy,
        )
        .unwrap();
        // With the catch-all first, the css rule is unreachable.
        assert!(std::ptr::eq(
            reversed.matched("src/styles.css").unwrap(),
            reversed.matched("src/index.js").unwrap()
        ));
    }

    #[test]
    fn exclude_rejects_the_rule() {
        let set = RuleSet::compile(
            &[rule("\\.m?js$", Some("node_modules"), &["script"])],
            DefaultPolicy::Copy,
        )
        .unwrap();

        assert!(set.matched("src/index.js").is_some());
        assert!(set.matched("node_modules/lib/index.js").is_none());
    }

    #[test]
    fn selection_is_stable_across_calls() {
        let set = RuleSet::compile(
            &[rule("\\.css$", None, &["style"]), rule(".", None, &["raw"])],
            DefaultPolicy::Copy,
        )
        .unwrap();
        let a = set.matched("a.css").unwrap() as *const CompiledRule;
        let b = set.matched("a.css").unwrap() as *const CompiledRule;
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn unknown_stage_fails_at_compile() {
        let err = RuleSet::compile(
            &[rule("\\.js$", None, &["transpile"])],
            DefaultPolicy::Copy,
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnknownStage { .. }));
    }
}
