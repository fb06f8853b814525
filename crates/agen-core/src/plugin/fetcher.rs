//! Plugin Fetcher
//!
//! Materializes a resolved plugin source as a staged directory on disk.
//! Git sources clone/pull into the plugin store, archive URLs download and
//! extract through a temporary staging area, local paths are used in place.

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{AgenError, Result};
use crate::plugin::archive::extract_zip;
use crate::plugin::metadata::MANIFEST_FILE;
use crate::plugin::source::PluginSource;

/// Recognized archive extension for URL sources
pub const ARCHIVE_EXT: &str = ".zip";

/// Narrow git capability used by the fetcher, swappable for tests
pub trait GitOps {
    /// Shallow, single-branch clone of `reference` into `target`
    fn clone_repo(&self, url: &str, reference: &str, target: &Path) -> Result<()>;

    /// Update an existing clone in `target` against `reference`
    fn pull(&self, target: &Path, reference: &str) -> Result<()>;
}

/// Production git implementation shelling out to the `git` binary
pub struct GitCli;

impl GitOps for GitCli {
    fn clone_repo(&self, url: &str, reference: &str, target: &Path) -> Result<()> {
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }

        let output = Command::new("git")
            .args(["clone", "--depth", "1", "--single-branch", "--branch", reference, url])
            .arg(target)
            .output()
            .map_err(|e| AgenError::Fetch(format!("failed to run git: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AgenError::Fetch(format!("git clone failed: {}", stderr)));
        }

        Ok(())
    }

    fn pull(&self, target: &Path, reference: &str) -> Result<()> {
        let output = Command::new("git")
            .arg("-C")
            .arg(target)
            .args(["pull", "--ff-only", "origin", reference])
            .output()
            .map_err(|e| AgenError::Fetch(format!("failed to run git: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AgenError::Fetch(format!("git pull failed: {}", stderr)));
        }

        Ok(())
    }
}

/// Plugin Fetcher - stages plugin sources under the plugin store
pub struct PluginFetcher {
    store_dir: PathBuf,
    git: Box<dyn GitOps>,
}

impl PluginFetcher {
    /// Create a fetcher rooted at the plugin store directory
    pub fn new(store_dir: &Path) -> Self {
        Self::with_git(store_dir, Box::new(GitCli))
    }

    /// Create with a custom git implementation (for testing)
    pub fn with_git(store_dir: &Path, git: Box<dyn GitOps>) -> Self {
        Self {
            store_dir: store_dir.to_path_buf(),
            git,
        }
    }

    /// Get the plugin store directory
    pub fn store_dir(&self) -> &Path {
        &self.store_dir
    }

    /// Fetch a resolved source, returning its staged directory
    pub fn fetch(&self, source: &PluginSource) -> Result<PathBuf> {
        match source {
            PluginSource::Git {
                owner,
                repo,
                reference,
            } => self.fetch_git(owner, repo, reference),
            PluginSource::ArchiveUrl { url, filename } => self.fetch_archive_url(url, filename),
            PluginSource::Local { path } => self.fetch_local(path),
        }
    }

    // ========== Git Strategy ==========

    fn fetch_git(&self, owner: &str, repo: &str, reference: &str) -> Result<PathBuf> {
        let url = format!("https://github.com/{}/{}.git", owner, repo);
        let target = self.store_dir.join(repo);

        debug!(url = %url, reference = reference, "fetching git source");
        if target.exists() {
            self.git.pull(&target, reference)?;
        } else {
            self.git.clone_repo(&url, reference, &target)?;
        }

        Ok(target)
    }

    // ========== Archive URL Strategy ==========

    fn fetch_archive_url(&self, url: &str, filename: &str) -> Result<PathBuf> {
        // TempDir removes the download/extraction area on every exit path
        let temp = tempfile::tempdir()?;
        let archive_path = temp.path().join(filename);
        self.download(url, &archive_path)?;

        let Some(stem) = filename.strip_suffix(ARCHIVE_EXT) else {
            return Err(AgenError::UnsupportedFormat {
                filename: filename.to_string(),
            });
        };

        let extract_dir = temp.path().join("extract");
        extract_zip(&archive_path, &extract_dir)?;
        let staged = plugin_root(&extract_dir)?;

        let target = self.store_dir.join(stem);
        copy_dir_recursive(&staged, &target)?;

        Ok(target)
    }

    fn download(&self, url: &str, dest: &Path) -> Result<()> {
        debug!(url = url, "downloading archive");
        let mut response = reqwest::blocking::get(url)
            .map_err(|e| AgenError::Fetch(format!("GET {} failed: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(AgenError::Fetch(format!(
                "GET {} returned {}",
                url,
                response.status()
            )));
        }

        let mut file = fs::File::create(dest)?;
        io::copy(&mut response, &mut file)
            .map_err(|e| AgenError::Fetch(format!("GET {} failed mid-body: {}", url, e)))?;
        Ok(())
    }

    // ========== Local Strategy ==========

    fn fetch_local(&self, path: &Path) -> Result<PathBuf> {
        if !path.exists() {
            return Err(AgenError::PathNotFound {
                path: path.to_path_buf(),
            });
        }
        if !path.is_dir() {
            return Err(AgenError::NotADirectory {
                path: path.to_path_buf(),
            });
        }

        // used in place, the store is not populated for local sources
        Ok(fs::canonicalize(path)?)
    }
}

/// Plugin root inside an extracted archive. Among the extraction root's
/// entries sorted by name: a directory containing a manifest wins, then the
/// first directory, then the extraction root itself.
fn plugin_root(extract_dir: &Path) -> Result<PathBuf> {
    let mut dirs: Vec<PathBuf> = fs::read_dir(extract_dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();

    if let Some(with_manifest) = dirs.iter().find(|d| d.join(MANIFEST_FILE).exists()) {
        return Ok(with_manifest.clone());
    }

    Ok(dirs
        .into_iter()
        .next()
        .unwrap_or_else(|| extract_dir.to_path_buf()))
}

// ========== Directory Copy ==========

/// Recursively copy a directory tree, preserving structure and file
/// permission bits. `.git` directories are skipped. Symbolic links and
/// special files are not copied.
pub(crate) fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst)?;

    let walker = WalkDir::new(src)
        .into_iter()
        .filter_entry(|e| e.file_name() != OsStr::new(".git"));

    for entry in walker {
        let entry = entry.map_err(io::Error::from)?;
        let src_path = entry.path();
        let relative = src_path.strip_prefix(src).unwrap();
        if relative.as_os_str().is_empty() {
            continue;
        }

        let dst_path = dst.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&dst_path)?;
        } else if file_type.is_file() {
            if let Some(parent) = dst_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(src_path, &dst_path)?;
        }
    }

    Ok(())
}
