//! Atomic, contained file writing for build output.
//!
//! Every path is validated to stay inside the output root (traversal via
//! `..` or absolute paths is rejected), and every write goes through a
//! temp file renamed into place. On most filesystems `rename()` is atomic,
//! so readers never observe partial contents and an aborted build leaves
//! no half-written files behind.

use std::fs;
use std::path::{Path, PathBuf};

use path_clean::PathClean;

use crate::error::{Error, Result};

pub struct Emitter {
    out_dir: PathBuf,
}

impl Emitter {
    /// Normalize the output root and create it if missing.
    pub fn new(dir: &Path) -> Result<Self> {
        let out_dir = normalize_dir(dir)?;
        fs::create_dir_all(&out_dir).map_err(|e| {
            Error::WriteFailure(format!(
                "failed to create output directory '{}': {e}",
                out_dir.display()
            ))
        })?;
        Ok(Self { out_dir })
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Write `content` at `relative` inside the output root, creating
    /// intermediate directories as needed. Returns the absolute path.
    pub fn emit(&self, relative: &str, content: &[u8]) -> Result<PathBuf> {
        let target = self.contained_path(relative)?;

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::WriteFailure(format!(
                    "failed to create directory '{}': {e}",
                    parent.display()
                ))
            })?;
        }

        let file_name = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let tmp = target.with_file_name(format!("{file_name}.tmp"));

        fs::write(&tmp, content).map_err(|e| {
            Error::WriteFailure(format!("failed to write '{}': {e}", tmp.display()))
        })?;
        fs::rename(&tmp, &target).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            Error::WriteFailure(format!(
                "failed to rename '{}' to '{}': {e}",
                tmp.display(),
                target.display()
            ))
        })?;

        tracing::debug!(path = %target.display(), bytes = content.len(), "emitted");
        Ok(target)
    }

    /// Resolve `relative` against the output root, rejecting escapes.
    fn contained_path(&self, relative: &str) -> Result<PathBuf> {
        if relative.is_empty() {
            return Err(Error::InvalidOutputPath("empty output path".to_string()));
        }
        if relative.contains('\0') {
            return Err(Error::InvalidOutputPath(
                "output path contains a null byte".to_string(),
            ));
        }
        let candidate = Path::new(relative);
        if candidate.is_absolute() {
            return Err(Error::InvalidOutputPath(format!(
                "'{relative}' is absolute; output paths are relative to the output root"
            )));
        }

        let full = self.out_dir.join(candidate).clean();
        if !full.starts_with(&self.out_dir) {
            return Err(Error::InvalidOutputPath(format!(
                "'{}' escapes the output root '{}'",
                relative,
                self.out_dir.display()
            )));
        }
        Ok(full)
    }
}

fn normalize_dir(dir: &Path) -> Result<PathBuf> {
    let cleaned = dir.clean();
    if cleaned.is_absolute() {
        return Ok(cleaned);
    }
    let cwd = std::env::current_dir().map_err(|e| {
        Error::InvalidOutputPath(format!("cannot determine working directory: {e}"))
    })?;
    Ok(cwd.join(cleaned).clean())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn emitter(dir: &TempDir) -> Emitter {
        Emitter::new(&dir.path().join("dist")).unwrap()
    }

    #[test]
    fn writes_nested_paths() {
        let dir = TempDir::new().unwrap();
        let emitter = emitter(&dir);
        let path = emitter.emit("assets/images/logo.png", b"png").unwrap();
        assert_eq!(fs::read(path).unwrap(), b"png");
    }

    #[test]
    fn overwrites_atomically() {
        let dir = TempDir::new().unwrap();
        let emitter = emitter(&dir);
        emitter.emit("main.js", b"v1").unwrap();
        let path = emitter.emit("main.js", b"v2").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"v2");
        // No stray temp files remain.
        let names: Vec<_> = fs::read_dir(path.parent().unwrap())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["main.js"]);
    }

    #[test]
    fn rejects_traversal() {
        let dir = TempDir::new().unwrap();
        let emitter = emitter(&dir);
        assert!(matches!(
            emitter.emit("../escape.js", b"x"),
            Err(Error::InvalidOutputPath(_))
        ));
        assert!(matches!(
            emitter.emit("safe/../../../escape.js", b"x"),
            Err(Error::InvalidOutputPath(_))
        ));
    }

    #[test]
    fn rejects_absolute_and_null() {
        let dir = TempDir::new().unwrap();
        let emitter = emitter(&dir);
        assert!(emitter.emit("/etc/passwd", b"x").is_err());
        assert!(emitter.emit("a\0b.js", b"x").is_err());
        assert!(emitter.emit("", b"x").is_err());
    }
}
