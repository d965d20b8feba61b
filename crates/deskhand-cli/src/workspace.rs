//! Working folder bookkeeping for the batch commands.
//!
//! Both batch commands run against a folder tree under one root:
//! incoming PDFs wait in the unprocessed folders, outputs land in the
//! invoices and reports folders, and consumed PDFs move to the
//! processed folders so a rerun never double-bills.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info};

use deskhand_core::models::config::FolderConfig;

/// The folder tree the batch commands operate in.
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Absolute path of a named working folder.
    pub fn folder(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Create every working folder that does not exist yet.
    pub fn ensure_folders(&self, folders: &FolderConfig) -> anyhow::Result<()> {
        for name in [
            &folders.unprocessed_jobs,
            &folders.processed_jobs,
            &folders.unprocessed_statements,
            &folders.processed_statements,
            &folders.invoices,
            &folders.reports,
        ] {
            let path = self.folder(name);
            if !path.exists() {
                fs::create_dir_all(&path)
                    .with_context(|| format!("creating folder {}", path.display()))?;
                info!("Created folder {}", path.display());
            }
        }
        Ok(())
    }

    /// PDF files inside a working folder, sorted by name.
    pub fn pdf_files(&self, name: &str) -> anyhow::Result<Vec<PathBuf>> {
        let dir = self.folder(name);
        let mut files = Vec::new();

        for entry in
            fs::read_dir(&dir).with_context(|| format!("reading folder {}", dir.display()))?
        {
            let path = entry?.path();
            let is_pdf = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
            if path.is_file() && is_pdf {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }

    /// Move a file into a working folder, keeping its name.
    pub fn move_into(&self, file: &Path, name: &str) -> anyhow::Result<PathBuf> {
        let file_name = file
            .file_name()
            .with_context(|| format!("no file name in {}", file.display()))?;
        let target = self.folder(name).join(file_name);

        // Rename fails across filesystems; fall back to copy + remove.
        if fs::rename(file, &target).is_err() {
            fs::copy(file, &target)
                .with_context(|| format!("copying {} to {}", file.display(), target.display()))?;
            fs::remove_file(file)
                .with_context(|| format!("removing {}", file.display()))?;
        }

        debug!("Moved {} to {}", file.display(), target.display());
        Ok(target)
    }
}
