//! Default values for a minimal configuration.

use std::path::PathBuf;

use baler_config::{BalerConfig, BuildMode, DefaultPolicy};
use serde_json::json;

#[test]
fn minimal_config_gets_defaults() {
    let config = BalerConfig::from_value(json!({ "entry": "src/index.js" })).unwrap();

    assert_eq!(config.mode, BuildMode::Development);
    assert_eq!(config.build.output.dir, PathBuf::from("dist"));
    assert_eq!(config.build.output.filename, "[name].js");
    assert!(config.build.output.manifest);
    assert_eq!(config.build.resolve.extensions, vec![".js".to_string()]);
    assert!(config.build.resolve.alias.is_empty());
    assert!(config.build.rules.is_empty());
    assert!(config.build.plugins.is_empty());
    assert!(!config.build.optimization.enabled);
    assert_eq!(config.build.default_policy, DefaultPolicy::Copy);
    assert_eq!(config.build.transform_timeout_ms, 30_000);
}

#[test]
fn optimization_sub_switches_default_on() {
    let config =
        BalerConfig::from_value(json!({ "entry": "a.js", "optimization": { "enabled": true } }))
            .unwrap();

    assert!(config.build.optimization.enabled);
    assert!(config.build.optimization.scripts);
    assert!(config.build.optimization.styles);
    assert!(config.build.optimization.markup);
}
