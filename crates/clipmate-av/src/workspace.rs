//! Scratch workspace for cut execution.

use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary directory holding extracted segment files and the concat list.
///
/// Dropping the workspace removes everything in it (best-effort, as `TempDir`
/// swallows deletion failures). After a failed assembly, call [`retain`]
/// instead so the pieces stay on disk for inspection.
///
/// [`retain`]: Workspace::retain
pub struct Workspace {
    temp_dir: TempDir,
}

impl Workspace {
    /// Create a fresh workspace.
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new().map_err(|e| Error::Workspace(e.to_string()))?;
        Ok(Self { temp_dir })
    }

    /// Path of the workspace directory.
    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path for the Nth extracted segment file.
    pub fn segment_file(&self, index: usize) -> PathBuf {
        self.temp_dir
            .path()
            .join(format!("segment_{:03}.mp4", index))
    }

    /// Path for the concat demuxer file list.
    pub fn list_file(&self) -> PathBuf {
        self.temp_dir.path().join("filelist.txt")
    }

    /// Keep the directory on disk and return its path.
    pub fn retain(self) -> PathBuf {
        self.temp_dir.keep()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_and_list_paths() {
        let ws = Workspace::new().unwrap();
        let seg = ws.segment_file(3);
        assert!(seg.starts_with(ws.dir()));
        assert_eq!(seg.file_name().unwrap(), "segment_003.mp4");
        assert_eq!(ws.list_file().file_name().unwrap(), "filelist.txt");
    }

    #[test]
    fn test_drop_removes_dir() {
        let path;
        {
            let ws = Workspace::new().unwrap();
            path = ws.dir().to_path_buf();
            assert!(path.exists());
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_retain_keeps_dir() {
        let ws = Workspace::new().unwrap();
        let kept = ws.retain();
        assert!(kept.exists());
        std::fs::remove_dir_all(&kept).unwrap();
    }
}
