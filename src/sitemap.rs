//! `sitemap.xml` with per-page content hashes.
//!
//! Every content page carries a short SHA-256 of its source file in a custom
//! `xhash` namespace, so crawlers can tell a page changed even when its date
//! did not. Top-level listing pages have no single source file and carry no
//! hash.
//!
//! ```xml
//! <url>
//!   <loc>https://example.com/blog/raft-in-practice</loc>
//!   <lastmod>2025-01-15</lastmod>
//!   <xhash:sha256>3f2a9c01be</xhash:sha256>
//! </url>
//! ```

use crate::dates;
use crate::scan::Manifest;
use crate::types::SourceInfo;
use chrono::{DateTime, Utc};
use std::fmt::Write as _;

/// Length of the hash published in the sitemap.
pub const SHORT_HASH_LEN: usize = 10;

/// Top-level pages, in sitemap order.
const TOP_LEVEL_PATHS: &[&str] = &["", "/projects", "/blog"];

/// A single `<url>` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlEntry {
    pub loc: String,
    /// `YYYY-MM-DD`
    pub lastmod: String,
    pub sha: Option<String>,
}

/// First [`SHORT_HASH_LEN`] hex characters of a full content hash.
pub fn short_hash(full_hex: &str) -> String {
    full_hex.chars().take(SHORT_HASH_LEN).collect()
}

/// XML-escape text and attribute values.
pub fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Collect sitemap entries: top-level pages, then posts, then projects.
///
/// Top-level pages use `build_date` as `lastmod`. Content pages use the
/// front-matter `date`, then `lastModified`, then the file mtime.
pub fn collect(manifest: &Manifest, build_date: DateTime<Utc>) -> Vec<UrlEntry> {
    let base = manifest.config.base_url();
    let today = dates::iso_date(&build_date);

    let top_level = TOP_LEVEL_PATHS.iter().map(|path| UrlEntry {
        loc: format!("{base}{path}"),
        lastmod: today.clone(),
        sha: None,
    });

    let posts = manifest.posts.iter().map(|post| UrlEntry {
        loc: format!("{base}{}", post.path()),
        lastmod: dates::iso_date(&post.date),
        sha: Some(short_hash(&post.source.content_hash)),
    });

    let projects = manifest.projects.iter().map(|project| UrlEntry {
        loc: format!("{base}{}", project.path()),
        lastmod: dates::iso_date(&source_date(&project.source)),
        sha: Some(short_hash(&project.source.content_hash)),
    });

    top_level.chain(posts).chain(projects).collect()
}

fn source_date(source: &SourceInfo) -> DateTime<Utc> {
    source
        .date
        .or(source.last_modified)
        .unwrap_or(source.modified)
}

/// Render entries as a sitemap document.
pub fn render_sitemap(entries: &[UrlEntry], base_url: &str) -> String {
    let mut urls = String::new();
    for entry in entries {
        write!(
            urls,
            "\n  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>",
            xml_escape(&entry.loc),
            entry.lastmod
        )
        .ok();
        if let Some(sha) = &entry.sha {
            write!(urls, "\n    <xhash:sha256>{sha}</xhash:sha256>").ok();
        }
        urls.push_str("\n  </url>");
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset
  xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"
  xmlns:xhash="{base}/ns/hash">
{urls}
</urlset>"#,
        base = xml_escape(base_url.trim_end_matches('/')),
    )
}
