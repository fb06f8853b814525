//! Source Resolver
//!
//! Classifies an opaque source string into one of three fetch strategies.
//! Pure string classification; no network or filesystem access happens here.

use std::path::PathBuf;

use crate::error::{AgenError, Result};

/// Ref used when a GitHub source omits one
pub const DEFAULT_GIT_REF: &str = "main";

/// Filename used when an archive URL has no final path segment
pub const DEFAULT_ARCHIVE_NAME: &str = "plugin.zip";

const GITHUB_PREFIX: &str = "github.com/";

/// Fetch strategy for a plugin source reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginSource {
    /// GitHub repository: `github.com/<owner>/<repo>[@ref]`
    Git {
        owner: String,
        repo: String,
        reference: String,
    },
    /// Downloadable archive: `http://` or `https://`
    ArchiveUrl { url: String, filename: String },
    /// Local filesystem path (absolute or relative)
    Local { path: PathBuf },
}

impl PluginSource {
    /// Classify a raw source string
    pub fn resolve(raw: &str) -> Result<Self> {
        if let Some(rest) = raw.strip_prefix(GITHUB_PREFIX) {
            return resolve_github(raw, rest);
        }

        if raw.starts_with("http://") || raw.starts_with("https://") {
            return Ok(Self::ArchiveUrl {
                url: raw.to_string(),
                filename: archive_filename(raw),
            });
        }

        Ok(Self::Local {
            path: PathBuf::from(raw),
        })
    }
}

fn resolve_github(raw: &str, rest: &str) -> Result<PluginSource> {
    let (repo_path, reference) = match rest.split_once('@') {
        Some((path, r)) => (path, r.to_string()),
        None => (rest, DEFAULT_GIT_REF.to_string()),
    };

    let segments: Vec<&str> = repo_path.split('/').collect();
    if segments.len() < 2 || segments[0].is_empty() || segments[1].is_empty() {
        return Err(AgenError::InvalidSource {
            input: raw.to_string(),
            reason: "expected github.com/<owner>/<repo>[@ref]".to_string(),
        });
    }

    Ok(PluginSource::Git {
        owner: segments[0].to_string(),
        repo: segments[1].to_string(),
        reference,
    })
}

/// Final path segment of a URL, stripped of query/fragment
fn archive_filename(url: &str) -> String {
    let without_scheme = url.split_once("://").map(|(_, r)| r).unwrap_or(url);
    let path = without_scheme.split_once('/').map(|(_, p)| p).unwrap_or("");
    let segment = path.rsplit('/').next().unwrap_or("");
    let name = segment.split(['?', '#']).next().unwrap_or("");

    if name.is_empty() {
        DEFAULT_ARCHIVE_NAME.to_string()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_github_with_ref() {
        let source = PluginSource::resolve("github.com/acme/widgets@v2").unwrap();
        assert_eq!(
            source,
            PluginSource::Git {
                owner: "acme".to_string(),
                repo: "widgets".to_string(),
                reference: "v2".to_string(),
            }
        );
    }

    #[test]
    fn test_resolve_github_defaults_to_main() {
        let source = PluginSource::resolve("github.com/acme/widgets").unwrap();
        match source {
            PluginSource::Git { repo, reference, .. } => {
                assert_eq!(repo, "widgets");
                assert_eq!(reference, DEFAULT_GIT_REF);
            }
            other => panic!("expected git source, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_github_missing_repo() {
        let result = PluginSource::resolve("github.com/acme");
        assert!(matches!(result, Err(AgenError::InvalidSource { .. })));

        let result = PluginSource::resolve("github.com/acme/");
        assert!(matches!(result, Err(AgenError::InvalidSource { .. })));
    }

    #[test]
    fn test_resolve_url_filename() {
        let source = PluginSource::resolve("https://example.com/dl/widgets.zip").unwrap();
        assert_eq!(
            source,
            PluginSource::ArchiveUrl {
                url: "https://example.com/dl/widgets.zip".to_string(),
                filename: "widgets.zip".to_string(),
            }
        );
    }

    #[test]
    fn test_resolve_url_empty_segment_defaults() {
        for url in ["https://example.com/", "https://example.com", "https://example.com/dl/"] {
            match PluginSource::resolve(url).unwrap() {
                PluginSource::ArchiveUrl { filename, .. } => {
                    assert_eq!(filename, DEFAULT_ARCHIVE_NAME, "url: {}", url);
                }
                other => panic!("expected archive url, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_resolve_url_strips_query() {
        match PluginSource::resolve("https://example.com/widgets.zip?token=abc").unwrap() {
            PluginSource::ArchiveUrl { filename, .. } => assert_eq!(filename, "widgets.zip"),
            other => panic!("expected archive url, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_anything_else_is_local() {
        for raw in ["./myplugin", "/tmp/plugins/x", "plugins/demo", "ftp://host/file"] {
            match PluginSource::resolve(raw).unwrap() {
                PluginSource::Local { path } => assert_eq!(path, PathBuf::from(raw)),
                other => panic!("expected local path for {}, got {:?}", raw, other),
            }
        }
    }
}
