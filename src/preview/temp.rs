//! Temporary files created for previews

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

/// Set of pulled preview files, removed together on teardown
#[derive(Debug, Default)]
pub struct TempFiles {
    paths: HashSet<PathBuf>,
}

impl TempFiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(&mut self, path: impl Into<PathBuf>) {
        self.paths.insert(path.into());
    }

    #[cfg(test)]
    pub fn contains(&self, path: &std::path::Path) -> bool {
        self.paths.contains(path)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Remove every tracked file. Missing files and errors are ignored, and the
    /// set is emptied so a second call does nothing.
    pub fn cleanup(&mut self) {
        for path in self.paths.drain() {
            match fs::remove_file(&path) {
                Ok(()) => log::debug!("removed preview file {}", path.display()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => log::debug!("could not remove {}: {}", path.display(), e),
            }
        }
    }
}

impl Drop for TempFiles {
    fn drop(&mut self) {
        self.cleanup();
    }
}
