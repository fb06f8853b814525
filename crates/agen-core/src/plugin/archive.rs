//! Archive Extractor
//!
//! Unpacks a zip archive into a directory tree, preserving relative paths
//! and recorded permission bits.

use std::fs::{self, File};
use std::io;
use std::path::{Component, Path, PathBuf};

use zip::ZipArchive;

use crate::error::{AgenError, Result};

/// Extract `archive` into `dest`, creating `dest` if absent.
///
/// Files of the same relative path are overwritten. Extraction is not
/// atomic: a failure leaves `dest` partially populated.
pub fn extract_zip(archive: &Path, dest: &Path) -> Result<()> {
    let file = File::open(archive)
        .map_err(|e| AgenError::Extract(format!("open {}: {}", archive.display(), e)))?;
    let mut zip = ZipArchive::new(file)
        .map_err(|e| AgenError::Extract(format!("read {}: {}", archive.display(), e)))?;

    fs::create_dir_all(dest)
        .map_err(|e| AgenError::Extract(format!("create {}: {}", dest.display(), e)))?;

    for i in 0..zip.len() {
        let mut entry = zip
            .by_index(i)
            .map_err(|e| AgenError::Extract(format!("read entry {}: {}", i, e)))?;

        let raw = entry.name().replace('\\', "/");
        let relative = sanitize_entry_path(Path::new(&raw))?;
        let out = dest.join(&relative);

        if entry.is_dir() {
            fs::create_dir_all(&out)
                .map_err(|e| AgenError::Extract(format!("create {}: {}", out.display(), e)))?;
        } else {
            if let Some(parent) = out.parent() {
                fs::create_dir_all(parent).map_err(|e| {
                    AgenError::Extract(format!("create {}: {}", parent.display(), e))
                })?;
            }
            let mut out_file = File::create(&out)
                .map_err(|e| AgenError::Extract(format!("create {}: {}", out.display(), e)))?;
            io::copy(&mut entry, &mut out_file)
                .map_err(|e| AgenError::Extract(format!("write {}: {}", out.display(), e)))?;
        }

        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&out, fs::Permissions::from_mode(mode))
                .map_err(|e| AgenError::Extract(format!("chmod {}: {}", out.display(), e)))?;
        }
    }

    Ok(())
}

/// Reject entries that would land outside the destination
fn sanitize_entry_path(path: &Path) -> Result<PathBuf> {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::ParentDir => {
                return Err(AgenError::Extract(format!(
                    "entry escapes destination: {}",
                    path.display()
                )));
            }
            Component::CurDir => {}
            Component::Normal(part) => cleaned.push(part),
        }
    }

    if cleaned.as_os_str().is_empty() {
        return Err(AgenError::Extract("entry has an empty path".to_string()));
    }

    Ok(cleaned)
}
