use std::path::PathBuf;

// Helper defaults
pub(crate) fn default_true() -> bool {
    true
}

pub(crate) fn default_output_dir() -> PathBuf {
    PathBuf::from("dist")
}

pub(crate) fn default_filename() -> String {
    "[name].js".to_string()
}

pub(crate) fn default_extensions() -> Vec<String> {
    vec![".js".to_string()]
}

pub(crate) fn default_transform_timeout_ms() -> u64 {
    30_000
}
