//! Project file manifest collection.
//!
//! Produces the ordered list of relative file paths fed into the stack
//! detection prompt. Captured once at startup; a failure here aborts the
//! wizard before the terminal is touched.

use anyhow::{Context, Result};
use std::path::Path;

/// Collects every regular file under `root` as a `/`-separated relative path.
///
/// Dotfiles and dot-directories at the top level are excluded (build output,
/// VCS metadata, editor state). Hidden entries nested below a visible
/// directory are kept. The result is sorted so the detection prompt is
/// deterministic for a given tree.
pub fn collect(root: &Path) -> Result<Vec<String>> {
    let mut files = Vec::new();

    let entries = std::fs::read_dir(root)
        .with_context(|| format!("Failed to read project directory {}", root.display()))?;

    for entry in entries {
        let entry = entry.context("Failed to read project directory entry")?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }

        let path = entry.path();
        if path.is_dir() {
            walk(&path, &name, &mut files)?;
        } else {
            files.push(name);
        }
    }

    files.sort();
    tracing::debug!(count = files.len(), "collected project manifest");
    Ok(files)
}

fn walk(dir: &Path, prefix: &str, files: &mut Vec<String>) -> Result<()> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?;

    for entry in entries {
        let entry = entry.context("Failed to read directory entry")?;
        let name = entry.file_name().to_string_lossy().into_owned();
        let rel = format!("{}/{}", prefix, name);

        let path = entry.path();
        if path.is_dir() {
            walk(&path, &rel, files)?;
        } else {
            files.push(rel);
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "tests/manifest_tests.rs"]
mod tests;
