use crate::domain::ports::SourceTree;
use crate::utils::error::{GenError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// 本機檔案系統上的輸出目錄（只讀）
#[derive(Debug, Clone)]
pub struct LocalSourceTree {
    root: PathBuf,
}

impl LocalSourceTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `out` is relative to the directory protoc/buf was started from.
    /// An absolute `out` is used as-is.
    pub fn from_out_dir(out: &str) -> Self {
        let root = match std::env::current_dir() {
            Ok(cwd) => cwd.join(out),
            Err(e) => {
                tracing::warn!("Cannot determine working directory ({}), using '{}' as-is", e, out);
                PathBuf::from(out)
            }
        };
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl SourceTree for LocalSourceTree {
    fn resolve(&self, relative: &str) -> PathBuf {
        relative
            .split('/')
            .filter(|segment| !segment.is_empty())
            .fold(self.root.clone(), |path, segment| path.join(segment))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|source| GenError::ReadError {
            path: path.display().to_string(),
            source,
        })
    }
}
