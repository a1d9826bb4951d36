//! Append-only run log.
//!
//! The TUI owns the terminal, so diagnostics go to a per-run file under
//! `.specter/` instead of stderr. Logging is best-effort; a failed append is
//! never allowed to disturb the wizard.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct RunLog {
    path: Option<PathBuf>,
}

impl RunLog {
    /// Creates the log directory and names the log after the run start time.
    /// Returns a disabled logger when the directory cannot be created.
    pub fn new(root: &Path) -> Self {
        let dir = root.join(".specter");
        if std::fs::create_dir_all(&dir).is_err() {
            return Self { path: None };
        }
        let run_id = chrono::Local::now().format("%Y%m%d-%H%M%S");
        Self {
            path: Some(dir.join(format!("specter-{}.log", run_id))),
        }
    }

    #[cfg(test)]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn line(&self, message: &str) {
        let Some(ref path) = self.path else {
            return;
        };
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(path) {
            let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
            let _ = writeln!(f, "[{}] {}", timestamp, message);
        }
    }
}
