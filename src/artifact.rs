//! Workflow artifact persistence.
//!
//! Writes the generated workflow to `.github/workflows/` with a name that is
//! unique even when two runs land in the same second.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub const WORKFLOWS_DIR: &str = ".github/workflows";

/// Writes `artifact` under `<root>/.github/workflows/`, creating the
/// directory if needed. Returns the path of the written file.
pub fn write_workflow(root: &Path, artifact: &str) -> Result<PathBuf> {
    let dir = root.join(WORKFLOWS_DIR);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    let path = unique_path(&dir, &format!("specter-{}", stamp));

    std::fs::write(&path, artifact)
        .with_context(|| format!("Failed to write workflow file {}", path.display()))?;
    Ok(path)
}

/// Picks `<base>.yml`, or `<base>-N.yml` for the first N that does not
/// collide with an existing file.
fn unique_path(dir: &Path, base: &str) -> PathBuf {
    let candidate = dir.join(format!("{}.yml", base));
    if !candidate.exists() {
        return candidate;
    }
    let mut n = 1u32;
    loop {
        let candidate = dir.join(format!("{}-{}.yml", base, n));
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn writes_workflow_under_github_workflows() {
        let dir = tempdir().unwrap();
        let path = write_workflow(dir.path(), "name: ci\n").unwrap();

        assert!(path.starts_with(dir.path().join(WORKFLOWS_DIR)));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "name: ci\n");
    }

    #[test]
    fn repeated_writes_in_the_same_second_get_distinct_names() {
        let dir = tempdir().unwrap();
        let first = write_workflow(dir.path(), "a").unwrap();
        let second = write_workflow(dir.path(), "b").unwrap();
        let third = write_workflow(dir.path(), "c").unwrap();

        assert_ne!(first, second);
        assert_ne!(second, third);
        assert_eq!(std::fs::read_to_string(&second).unwrap(), "b");
    }

    #[test]
    fn write_fails_when_workflows_dir_is_a_file() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".github")).unwrap();
        std::fs::write(dir.path().join(WORKFLOWS_DIR), "not a dir").unwrap();

        assert!(write_workflow(dir.path(), "x").is_err());
    }
}
