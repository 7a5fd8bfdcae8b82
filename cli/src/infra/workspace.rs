//! Filesystem implementation of the `Workspace` port.
//!
//! `DiskWorkspace` owns the runtime directory tree under
//! `catalina_base`: the four disposable runtime directories are wiped
//! and recreated on every preparation, while `conf/` is populated by a
//! one-way merge from the home installation that never overwrites a
//! file the user has already customized.

use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::Workspace;

/// Runtime directories recreated empty on every `start`/`restart`.
pub const RUNTIME_DIRS: [&str; 4] = ["webapps", "logs", "temp", "work"];

/// Workspace-relative path of the generated deployment descriptor.
pub const DESCRIPTOR_PATH: &str = "conf/Catalina/localhost/ROOT.xml";

/// Production `Workspace` backed by the local filesystem.
pub struct DiskWorkspace;

impl Workspace for DiskWorkspace {
    fn prepare(&self, home: &Path, base: &Path) -> Result<()> {
        for dir in RUNTIME_DIRS {
            remove_dir_if_present(&base.join(dir))?;
        }
        merge_missing(&home.join("conf"), &base.join("conf"))
            .with_context(|| format!("merging {} into workspace conf", home.join("conf").display()))?;
        for dir in RUNTIME_DIRS {
            let path = base.join(dir);
            std::fs::create_dir_all(&path)
                .with_context(|| format!("creating directory {}", path.display()))?;
        }
        Ok(())
    }

    fn write_descriptor(&self, base: &Path, descriptor: &str) -> Result<()> {
        let path = base.join(DESCRIPTOR_PATH);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }
        std::fs::write(&path, descriptor)
            .with_context(|| format!("writing descriptor {}", path.display()))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Delete a directory tree, treating "already absent" as success.
fn remove_dir_if_present(path: &Path) -> Result<()> {
    match std::fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => {
            Err(err).with_context(|| format!("removing directory {}", path.display()))
        }
    }
}

/// Recursively copy `src` into `dst`, preserving relative structure and
/// skipping any file that already exists at the destination.
///
/// The skip rule is what lets users hand-edit container configuration
/// once and keep their edits across repeated start cycles.
fn merge_missing(src: &Path, dst: &Path) -> Result<()> {
    std::fs::create_dir_all(dst)
        .with_context(|| format!("creating directory {}", dst.display()))?;
    let entries = std::fs::read_dir(src)
        .with_context(|| format!("reading directory {}", src.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("reading directory {}", src.display()))?;
        let target = dst.join(entry.file_name());
        let file_type = entry
            .file_type()
            .with_context(|| format!("inspecting {}", entry.path().display()))?;
        if file_type.is_dir() {
            merge_missing(&entry.path(), &target)?;
        } else if !target.exists() {
            std::fs::copy(entry.path(), &target).with_context(|| {
                format!("copying {} to {}", entry.path().display(), target.display())
            })?;
        }
    }
    Ok(())
}
