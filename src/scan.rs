//! Content discovery and manifest generation.
//!
//! Stage 1 of the build pipeline. Walks the `blog/` and `projects/` sections
//! of the content root, parses each entry's front-matter, and normalizes it
//! into the canonical metadata every later artifact is derived from.
//!
//! ## Directory Structure
//!
//! ```text
//! content/
//! ├── config.toml
//! ├── public/                      # Copied verbatim (not scanned)
//! ├── blog/
//! │   ├── consistent-hashing/
//! │   │   └── page.mdx             # Slug = directory name
//! │   └── [slug]/                  # Skipped: dynamic route folder
//! └── projects/
//!     └── gastronome/
//!         └── page.md              # page.md accepted when page.mdx is absent
//! ```
//!
//! ## Normalization
//!
//! Posts and projects share one front-matter vocabulary but read it
//! differently:
//!
//! | Field | Post | Project |
//! |-------|------|---------|
//! | title | `title` → `repo` | `repo` → `title` |
//! | text | `summary` → `description` | `description` → `summary` |
//! | date | `date` (required) | `period.start` (required), `period.end` |
//!
//! ## Ordering
//!
//! - Posts: newest `date` first.
//! - Projects: newest `period.end` first, ongoing projects by `period.start`.
//!
//! Ties are broken by slug so output is stable across filesystems.
//!
//! ## Failure
//!
//! A content directory without a page file, malformed YAML, a missing required
//! field, or an unparseable date aborts the scan. Nothing is skipped silently.

use crate::config::{self, SiteConfig};
use crate::dates;
use crate::frontmatter::{self, FrontMatter};
use crate::metadata::resolve;
use crate::types::{Period, PostMeta, ProjectMeta, Section, SourceInfo};
use chrono::{DateTime, Utc};
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("No page.mdx or page.md in content directory: {0}")]
    MissingPage(PathBuf),
    #[error("Invalid front-matter in {path}: {source}")]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("Missing required field '{field}' in {path}")]
    MissingField { path: PathBuf, field: &'static str },
    #[error("Invalid date for '{field}' in {path}: {value}")]
    InvalidDate {
        path: PathBuf,
        field: &'static str,
        value: String,
    },
}

/// Manifest output from the scan stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub posts: Vec<PostMeta>,
    pub projects: Vec<ProjectMeta>,
    pub config: SiteConfig,
}

impl Manifest {
    /// Posts flagged `featured`, newest first.
    pub fn featured_posts(&self) -> Vec<&PostMeta> {
        self.posts.iter().filter(|p| p.featured).collect()
    }

    /// Projects flagged `featured`, most-starred first.
    ///
    /// The sort is stable, so projects with equal stars keep date order.
    pub fn featured_projects(&self) -> Vec<&ProjectMeta> {
        let mut featured: Vec<&ProjectMeta> =
            self.projects.iter().filter(|p| p.featured).collect();
        featured.sort_by(|a, b| b.stars.cmp(&a.stars));
        featured
    }
}

/// Page file names, in priority order.
const PAGE_FILES: &[&str] = &["page.mdx", "page.md"];

/// Scan the content root, loading `config.toml` from it.
pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    let config = config::load_config(root)?;
    scan_with_config(root, config)
}

/// Scan the content root with an already-resolved config.
pub fn scan_with_config(root: &Path, config: SiteConfig) -> Result<Manifest, ScanError> {
    let mut posts = read_section(root, Section::Blog)?
        .into_iter()
        .map(build_post)
        .collect::<Result<Vec<_>, _>>()?;
    posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));

    let mut projects = read_section(root, Section::Projects)?
        .into_iter()
        .map(build_project)
        .collect::<Result<Vec<_>, _>>()?;
    projects.sort_by(|a, b| {
        b.sort_date()
            .cmp(&a.sort_date())
            .then_with(|| a.slug.cmp(&b.slug))
    });

    debug!(
        "scanned {} posts and {} projects in {}",
        posts.len(),
        projects.len(),
        root.display()
    );

    Ok(Manifest {
        posts,
        projects,
        config,
    })
}

/// A content entry as read from disk, before normalization.
struct RawEntry {
    slug: String,
    page_path: PathBuf,
    front: FrontMatter,
    source: SourceInfo,
}

/// Read every entry of a section in parallel.
fn read_section(root: &Path, section: Section) -> Result<Vec<RawEntry>, ScanError> {
    let dirs = entry_dirs(&root.join(section.dir_name()))?;
    dirs.par_iter().map(|dir| read_entry(root, dir)).collect()
}

/// List content directories of a section, sorted by name.
///
/// A missing section directory means the section is empty.
fn entry_dirs(section_dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
    if !section_dir.is_dir() {
        debug!("no section directory at {}", section_dir.display());
        return Ok(Vec::new());
    }
    let mut dirs: Vec<PathBuf> = fs::read_dir(section_dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir() && !is_skipped(p))
        .collect();
    dirs.sort();
    Ok(dirs)
}

/// Hidden directories and dynamic route folders (`[slug]`) are not content.
fn is_skipped(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy())
        .is_none_or(|name| name.starts_with('.') || name.starts_with('['))
}

fn find_page(dir: &Path) -> Option<PathBuf> {
    PAGE_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.is_file())
}

fn read_entry(root: &Path, dir: &Path) -> Result<RawEntry, ScanError> {
    let page_path = find_page(dir).ok_or_else(|| ScanError::MissingPage(dir.to_path_buf()))?;
    let raw = fs::read_to_string(&page_path)?;
    let (front, _body) =
        frontmatter::parse(&raw).map_err(|source| ScanError::FrontMatter {
            path: page_path.clone(),
            source,
        })?;
    let modified: DateTime<Utc> = fs::metadata(&page_path)?.modified()?.into();
    let date = optional_date(&page_path, "date", front.date.as_deref())?;
    let last_modified = optional_date(&page_path, "lastModified", front.last_modified.as_deref())?;

    let slug = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(RawEntry {
        slug,
        source: SourceInfo {
            path: relative_path(root, &page_path),
            content_hash: content_hash(raw.as_bytes()),
            modified,
            date,
            last_modified,
        },
        page_path,
        front,
    })
}

fn build_post(entry: RawEntry) -> Result<PostMeta, ScanError> {
    let fm = &entry.front;
    let title = resolve(&[fm.title.as_deref(), fm.repo.as_deref()]).ok_or_else(|| {
        ScanError::MissingField {
            path: entry.page_path.clone(),
            field: "title",
        }
    })?;
    let date = entry.source.date.ok_or_else(|| ScanError::MissingField {
        path: entry.page_path.clone(),
        field: "date",
    })?;

    Ok(PostMeta {
        title,
        summary: resolve(&[fm.summary.as_deref(), fm.description.as_deref()]).unwrap_or_default(),
        date,
        featured: fm.featured,
        tags: fm.tag_list(),
        cover: resolve(&[fm.cover.as_deref()]),
        slug: entry.slug,
        source: entry.source,
    })
}

fn build_project(entry: RawEntry) -> Result<ProjectMeta, ScanError> {
    let fm = &entry.front;
    let title = resolve(&[fm.repo.as_deref(), fm.title.as_deref()]).ok_or_else(|| {
        ScanError::MissingField {
            path: entry.page_path.clone(),
            field: "repo",
        }
    })?;
    let period = fm.period.clone().unwrap_or_default();
    let start = required_date(&entry.page_path, "period.start", period.start.as_deref())?;
    let end = optional_date(&entry.page_path, "period.end", period.end.as_deref())?;

    Ok(ProjectMeta {
        title,
        description: resolve(&[fm.description.as_deref(), fm.summary.as_deref()])
            .unwrap_or_default(),
        stars: fm.stars.unwrap_or(0),
        language: resolve(&[fm.language.as_deref()]),
        tags: fm.tag_list(),
        cover: resolve(&[fm.cover.as_deref()]),
        featured: fm.featured,
        period: Period { start, end },
        slug: entry.slug,
        source: entry.source,
    })
}

fn required_date(
    path: &Path,
    field: &'static str,
    value: Option<&str>,
) -> Result<DateTime<Utc>, ScanError> {
    optional_date(path, field, value)?.ok_or_else(|| ScanError::MissingField {
        path: path.to_path_buf(),
        field,
    })
}

/// An absent or blank value is `None`; a present but unparseable one is an error.
fn optional_date(
    path: &Path,
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<DateTime<Utc>>, ScanError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => dates::parse_date(v)
            .map(Some)
            .ok_or_else(|| ScanError::InvalidDate {
                path: path.to_path_buf(),
                field,
                value: v.to_string(),
            }),
    }
}

/// SHA-256 of the raw file contents, lowercase hex.
pub fn content_hash(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// `/`-separated path relative to the content root.
fn relative_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
