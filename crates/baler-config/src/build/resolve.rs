use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::build::helpers::default_extensions;

/// Reference resolution options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveOptions {
    /// Extensions appended to extensionless specifiers, in order.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Alias table mapping a specifier prefix to a directory root
    /// (e.g. `"@utils" = "src/utils"`).
    ///
    /// Aliases are rewritten once at config load into a prefix table;
    /// longest prefix wins at lookup time.
    #[serde(default)]
    pub alias: IndexMap<String, PathBuf>,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            alias: IndexMap::new(),
        }
    }
}
