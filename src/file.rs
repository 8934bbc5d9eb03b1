// src/file.rs

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::progress::Progress;

/// One rendered file of the published tree, relative to the output root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    pub rel_path: String,
    pub contents: String,
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::config(format!(
            "Path exists but is not a directory: {}",
            dir.display()
        )));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

/// Write `contents` next to `path` and rename it into place, so readers see
/// either the old file or the new one, never a partial write.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    stage(path, contents)?.persist(path)?;
    Ok(())
}

/// Write every document under `out_dir`. Returns the paths written, in order.
///
/// All documents are first written to temp files beside their targets; only
/// when every one of them is on disk are they renamed into place. A failure
/// while staging leaves every published file as it was.
pub fn write_documents(
    out_dir: &Path,
    docs: &[Document],
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> Result<Vec<PathBuf>> {
    ensure_directory(out_dir)?;

    let mut staged = Vec::with_capacity(docs.len());
    for doc in docs {
        let path = out_dir.join(&doc.rel_path);
        let tmp = stage(&path, doc.contents.as_bytes())?;
        staged.push((tmp, path));
    }

    let mut written = Vec::with_capacity(staged.len());
    for (tmp, path) in staged {
        tmp.persist(&path)?;
        if let Some(p) = progress.as_deref_mut() {
            p.item_done(&path);
        }
        written.push(path);
    }
    Ok(written)
}

fn stage(path: &Path, contents: &[u8]) -> Result<NamedTempFile> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    ensure_directory(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(contents)?;
    tmp.flush()?;
    Ok(tmp)
}
