//! Downloading selected emoji and writing `pack.json` manifests.
//!
//! Output layout:
//!
//! ```text
//! <output_dir>/<category>/<shortcode><ext>
//! <output_dir>/<category>/pack.json
//! ```
//!
//! Uncategorized emoji go straight into `<output_dir>`. Files that already
//! exist are not downloaded again, and a failed download never stops the
//! batch. Every emoji gets its manifest entry before its download is
//! attempted, so a manifest may name a file whose download failed.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use url::Url;

use crate::emoji::{Emoji, UrlPreference};
use crate::error::{Error, Result};
use crate::fetch::Fetch;

pub const MANIFEST_FILE: &str = "pack.json";

/// Contents of one `pack.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackManifest {
    /// Shortcode to file name, relative to the manifest.
    pub files: BTreeMap<String, String>,
    pub pack: PackMeta,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackMeta {
    pub description: Option<String>,
    pub homepage: String,
    #[serde(rename = "share-files")]
    pub share_files: bool,
}

impl PackManifest {
    /// An empty manifest crediting `homepage`.
    pub fn new(homepage: impl Into<String>) -> Self {
        Self {
            files: BTreeMap::new(),
            pack: PackMeta {
                description: None,
                homepage: homepage.into(),
                share_files: true,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct DownloadOptions {
    pub output_dir: PathBuf,
    pub preference: UrlPreference,
    /// Written as `pack.homepage` in every manifest.
    pub homepage: String,
}

/// Where one emoji comes from and where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    pub url: String,
    pub filename: String,
    pub target: PathBuf,
}

/// Resolve the source URL and target path for `emoji`.
///
/// Returns `None` only for an emoji without any URL, which normalization
/// never produces.
pub fn plan(emoji: &Emoji, options: &DownloadOptions) -> Option<PlannedFile> {
    let url = emoji.url(options.preference)?;
    let filename = format!(
        "{}{}",
        sanitize_component(&emoji.shortcode),
        file_extension(url)
    );
    let target = category_dir(&options.output_dir, emoji.category.as_deref()).join(&filename);
    Some(PlannedFile {
        url: url.to_string(),
        filename,
        target,
    })
}

/// Extension of the last path segment of `url`, including the dot.
///
/// Query strings and fragments are ignored. Dotfiles, extensionless names
/// and URLs without a path yield an empty string.
pub fn file_extension(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return String::new();
    };
    let name = parsed
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or_default();
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => format!(".{}", ext),
        _ => String::new(),
    }
}

fn category_dir(output_dir: &Path, category: Option<&str>) -> PathBuf {
    match category {
        Some(category) => output_dir.join(sanitize_component(category)),
        None => output_dir.to_path_buf(),
    }
}

/// Names come from remote servers; keep them inside the output directory.
///
/// Separators, NUL and `%` itself are percent-encoded, so distinct names
/// stay distinct on disk.
fn sanitize_component(name: &str) -> String {
    match name {
        "" => "_".to_string(),
        "." => "%2E".to_string(),
        ".." => "%2E%2E".to_string(),
        _ => {
            let mut out = String::with_capacity(name.len());
            for c in name.chars() {
                match c {
                    '%' => out.push_str("%25"),
                    '/' => out.push_str("%2F"),
                    '\\' => out.push_str("%5C"),
                    '\0' => out.push_str("%00"),
                    c => out.push(c),
                }
            }
            out
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadReport {
    pub downloaded: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Manifests written, in category order.
    pub manifests: Vec<PathBuf>,
}

/// Download every emoji in `selection`, then write one manifest per
/// category.
///
/// Only manifest write failures are returned as errors.
pub fn download_all<'e>(
    http: &dyn Fetch,
    selection: impl IntoIterator<Item = &'e Emoji>,
    options: &DownloadOptions,
) -> Result<DownloadReport> {
    let mut report = DownloadReport::default();
    let mut manifests: BTreeMap<Option<String>, PackManifest> = BTreeMap::new();
    let mut claimed: HashSet<PathBuf> = HashSet::new();

    for emoji in selection {
        let Some(planned) = plan(emoji, options) else {
            warn!("Missing URL for emoji {}", emoji.shortcode);
            report.failed += 1;
            continue;
        };

        if !claimed.insert(planned.target.clone()) {
            warn!(
                "Skipping {}: {} is already used by another emoji in this batch",
                emoji.shortcode,
                planned.target.display()
            );
            report.failed += 1;
            continue;
        }

        manifests
            .entry(emoji.category.clone())
            .or_insert_with(|| PackManifest::new(options.homepage.as_str()))
            .files
            .insert(emoji.shortcode.clone(), planned.filename.clone());

        if planned.target.exists() {
            info!("{}... already downloaded", emoji.shortcode);
            report.skipped += 1;
            continue;
        }

        match http.download(&planned.url, &planned.target) {
            Ok(()) => {
                info!("{}... ✓", emoji.shortcode);
                report.downloaded += 1;
            }
            Err(e) => {
                info!("{}... ✗", emoji.shortcode);
                warn!("Server returned error: {}", e);
                report.failed += 1;
            }
        }
    }

    info!("Writing {} files...", MANIFEST_FILE);
    for (category, manifest) in &manifests {
        let dir = category_dir(&options.output_dir, category.as_deref());
        report.manifests.push(write_manifest(&dir, manifest)?);
    }

    Ok(report)
}

/// Write `manifest` to `<dir>/pack.json`, replacing any existing file.
pub fn write_manifest(dir: &Path, manifest: &PackManifest) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    let path = dir.join(MANIFEST_FILE);
    let json = serde_json::to_string_pretty(manifest)
        .map_err(|e| Error::io(&path, std::io::Error::other(e)))?;
    std::fs::write(&path, json).map_err(|e| Error::io(&path, e))?;
    Ok(path)
}
