//! Shared test utilities for the simple-folio test suite.
//!
//! Provides fixture setup, content writers for ad-hoc trees, lookup helpers
//! that panic with a useful message on miss, and small in-memory samples for
//! tests that never touch the filesystem.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let manifest = scan(tmp.path()).unwrap();
//!
//! let post = find_post(&manifest, "raft-in-practice");
//! assert!(post.featured);
//! ```

use chrono::{DateTime, TimeZone, Utc};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::config::SiteConfig;
use crate::dates;
use crate::scan::{Manifest, content_hash};
use crate::types::{Period, PostMeta, ProjectMeta, SourceInfo};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Write `blog/<slug>/page.mdx` with the given front-matter YAML.
pub fn write_post(root: &Path, slug: &str, yaml: &str) {
    write_entry(root, "blog", slug, yaml);
}

/// Write `projects/<slug>/page.mdx` with the given front-matter YAML.
pub fn write_project(root: &Path, slug: &str, yaml: &str) {
    write_entry(root, "projects", slug, yaml);
}

fn write_entry(root: &Path, section: &str, slug: &str, yaml: &str) {
    let dir = root.join(section).join(slug);
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("page.mdx"),
        format!("---\n{yaml}\n---\n\nBody of {slug}.\n"),
    )
    .unwrap();
}

// =========================================================================
// Manifest lookups, panicking with a clear message on miss
// =========================================================================

/// Find a post by slug. Panics if not found.
pub fn find_post<'a>(manifest: &'a Manifest, slug: &str) -> &'a PostMeta {
    manifest
        .posts
        .iter()
        .find(|p| p.slug == slug)
        .unwrap_or_else(|| panic!("post '{slug}' not found. Available: {:?}", post_slugs(manifest)))
}

/// Find a project by slug. Panics if not found.
pub fn find_project<'a>(manifest: &'a Manifest, slug: &str) -> &'a ProjectMeta {
    manifest
        .projects
        .iter()
        .find(|p| p.slug == slug)
        .unwrap_or_else(|| {
            panic!(
                "project '{slug}' not found. Available: {:?}",
                project_slugs(manifest)
            )
        })
}

/// Post slugs in manifest order.
pub fn post_slugs(manifest: &Manifest) -> Vec<&str> {
    manifest.posts.iter().map(|p| p.slug.as_str()).collect()
}

/// Project slugs in manifest order.
pub fn project_slugs(manifest: &Manifest) -> Vec<&str> {
    manifest.projects.iter().map(|p| p.slug.as_str()).collect()
}

// =========================================================================
// In-memory samples
// =========================================================================

/// Fixed "now" for artifacts that stamp the build date.
pub fn build_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap()
}

fn sample_source(path: String) -> SourceInfo {
    SourceInfo {
        content_hash: content_hash(path.as_bytes()),
        path,
        modified: Utc.with_ymd_and_hms(2025, 2, 2, 12, 0, 0).unwrap(),
        date: None,
        last_modified: None,
    }
}

/// A featured post tagged `consensus` and `raft`, without a cover.
pub fn sample_post(slug: &str, date: &str) -> PostMeta {
    PostMeta {
        slug: slug.to_string(),
        title: format!("Post {slug}"),
        summary: format!("Summary of {slug}"),
        date: dates::parse_date(date).unwrap(),
        featured: true,
        tags: vec!["consensus".to_string(), "raft".to_string()],
        cover: None,
        source: sample_source(format!("blog/{slug}/page.mdx")),
    }
}

/// A featured Rust project titled `me/<slug>` with a local cover.
pub fn sample_project(slug: &str, stars: u32, start: &str, end: Option<&str>) -> ProjectMeta {
    ProjectMeta {
        slug: slug.to_string(),
        title: format!("me/{slug}"),
        description: format!("Description of {slug}"),
        stars,
        language: Some("Rust".to_string()),
        tags: vec!["rust".to_string()],
        cover: Some(format!("/covers/{slug}.png")),
        featured: true,
        period: Period {
            start: dates::parse_date(start).unwrap(),
            end: end.and_then(dates::parse_date),
        },
        source: sample_source(format!("projects/{slug}/page.mdx")),
    }
}

/// Two posts (`newer`, `older`) and one project (`tinykv`) on
/// `https://folio.example.org`, authored by Ada Example.
pub fn sample_manifest() -> Manifest {
    let mut config = SiteConfig::default();
    config.site.url = "https://folio.example.org".to_string();
    config.site.title = "Ada Example".to_string();
    config.author.name = "Ada Example".to_string();

    let mut newer = sample_post("newer", "2025-06-01");
    newer.title = "Newer post".to_string();
    let mut older = sample_post("older", "2024-11-20");
    older.title = "Older post".to_string();
    older.featured = false;

    Manifest {
        posts: vec![newer, older],
        projects: vec![sample_project("tinykv", 120, "2024-01-01", None)],
        config,
    }
}
