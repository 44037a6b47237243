//! Filesystem existence checks
//!
//! The engine never touches the filesystem itself; it asks a probe. Probes
//! must answer synchronously and quickly.

use std::path::Path;

pub trait FileSystemProbe {
    fn dir_exists(&self, path: &str) -> bool;
    fn file_exists(&self, path: &str) -> bool;
}

/// Probe backed by `std::fs` metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl FileSystemProbe for LocalFileSystem {
    fn dir_exists(&self, path: &str) -> bool {
        Path::new(path).is_dir()
    }

    fn file_exists(&self, path: &str) -> bool {
        Path::new(path).is_file()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_file_system() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("notes.txt");
        std::fs::write(&file, "x").unwrap();

        let probe = LocalFileSystem;
        let dir_str = dir.path().to_string_lossy();
        let file_str = file.to_string_lossy();

        assert!(probe.dir_exists(&dir_str));
        assert!(!probe.file_exists(&dir_str));
        assert!(probe.file_exists(&file_str));
        assert!(!probe.dir_exists(&file_str));
    }
}
