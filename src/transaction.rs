//! Atomic publish of a rendered tree via a temp-dir → rename protocol.
use crate::util;
use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tempfile::{Builder, TempDir};

pub struct Transaction {
    stage: TempDir,
    out: PathBuf,
}

impl Transaction {
    /// Create a fresh staging directory next to `out`, on the same filesystem.
    pub fn begin(out: &Path) -> Result<Self> {
        let parent = match out.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)
            .with_context(|| format!("create output parent {}", parent.display()))?;

        let stage = Builder::new()
            .prefix(".stage.")
            .tempdir_in(parent)
            .context("create staging dir")?;

        Ok(Self {
            stage,
            out: out.to_path_buf(),
        })
    }

    /// Path callers write rendered files into.
    #[inline]
    pub fn stage(&self) -> &Path {
        self.stage.path()
    }

    /// Replace `out` with the staged tree.
    pub fn commit(self) -> Result<()> {
        // Keep the stage on every error path below; it is never half-deleted.
        let stage_path = self.stage.keep();

        if fs::symlink_metadata(&self.out).is_ok() {
            util::remove_any(&self.out).context("remove previous output")?;
        }

        fs::rename(&stage_path, &self.out).context("rename stage -> output")
    }
}
