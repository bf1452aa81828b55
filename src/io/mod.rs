pub mod output;

pub use output::{create_writer, JsonWriter, OutputFormat, OutputWriter, SourceWriter};

use crate::core::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io_at(path, e))
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| Error::io_at(path, e))
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| Error::io_at(path, e))?;
    }
    Ok(())
}

/// Output paths may be derived from qualified names; drop the `global::`
/// marker so it never ends up on disk
pub fn normalize_output_path(path: &Path) -> PathBuf {
    PathBuf::from(path.to_string_lossy().replace("global::", ""))
}

/// Write generated text, creating the parent directory when needed.
/// Returns the path actually written.
pub fn write_output(path: &Path, content: &str) -> Result<PathBuf> {
    let path = normalize_output_path(path);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    write_file(&path, content)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_normalize_output_path() {
        assert_eq!(
            normalize_output_path(Path::new("out/global::Generated.cs")),
            PathBuf::from("out/Generated.cs")
        );
    }

    #[test]
    fn test_write_output_creates_directories() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("deep").join("nested").join("Generated.cs");

        let written = write_output(&target, "// generated").unwrap();
        assert_eq!(written, target);
        assert_eq!(read_file(&written).unwrap(), "// generated");
    }
}
