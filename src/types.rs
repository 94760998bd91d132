//! Shared types serialized between pipeline stages.
//!
//! The scan stage writes these into `manifest.json`; the generate stage reads
//! them back. Dates are stored as RFC 3339 strings via chrono's serde support.

use crate::dates;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Content section: each maps to a directory under the content root and to a
/// URL prefix on the generated site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Blog,
    Projects,
}

impl Section {
    /// Directory name under the content root, and URL path prefix.
    pub fn dir_name(self) -> &'static str {
        match self {
            Section::Blog => "blog",
            Section::Projects => "projects",
        }
    }

    /// Site-relative URL path for an entry, e.g. `/blog/my-post`.
    ///
    /// The slug is a directory name, so it is percent-encoded as a path segment.
    pub fn entry_path(self, slug: &str) -> String {
        format!("/{}/{}", self.dir_name(), urlencoding::encode(slug))
    }
}

/// Where an entry came from, for sitemap `lastmod` and change hashes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceInfo {
    /// Path relative to the content root, `/`-separated.
    pub path: String,
    /// SHA-256 of the raw file, lowercase hex.
    pub content_hash: String,
    /// File modification time.
    pub modified: DateTime<Utc>,
    /// Front-matter `date`, when given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    /// Front-matter `lastModified`, when given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
}

/// Canonical blog post metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostMeta {
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub date: DateTime<Utc>,
    /// Shown on the home page.
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    pub source: SourceInfo,
}

impl PostMeta {
    pub fn path(&self) -> String {
        Section::Blog.entry_path(&self.slug)
    }
}

/// A project's activity window. `end: None` means ongoing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Period {
    pub start: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
}

/// Canonical project metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMeta {
    pub slug: String,
    /// GitHub repository path, e.g. `ada-example/gastronome`.
    pub title: String,
    pub description: String,
    pub stars: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// URL or site-relative path of the cover image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    pub featured: bool,
    pub period: Period,
    pub source: SourceInfo,
}

impl ProjectMeta {
    pub fn path(&self) -> String {
        Section::Projects.entry_path(&self.slug)
    }

    /// Sort key: end date, or start date while ongoing.
    pub fn sort_date(&self) -> DateTime<Utc> {
        self.period.end.unwrap_or(self.period.start)
    }

    /// `Sep 2024 - Dec 2024`, or `Sep 2024 - Present` while ongoing.
    pub fn period_label(&self) -> String {
        let start = dates::display_month(&self.period.start);
        match &self.period.end {
            Some(end) => format!("{} - {}", start, dates::display_month(end)),
            None => format!("{} - Present", start),
        }
    }

    pub fn repo_url(&self) -> String {
        format!("https://github.com/{}", self.title)
    }
}
