//! CLI output formatting for all pipeline stages.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every entry (post, project) is its semantic identity (positional index
//! and title), with filesystem paths shown as secondary context via indented
//! `Source:` lines.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Posts
//! 001 Raft in Practice (Mar 2, 2025) [featured]
//!     Source: blog/raft-in-practice/page.mdx
//!     Leader election and log replication, with...
//! 002 Consistent Hashing (Jan 15, 2025)
//!     Source: blog/consistent-hashing/page.mdx
//!
//! Projects
//! 001 ada-example/pathfinder (May 2025 - Present, 12 stars)
//!     Source: projects/pathfinder/page.mdx
//!
//! Config
//!     config.toml
//!     public/
//! ```
//!
//! ## Generate
//!
//! ```text
//! Home → index.html
//! Blog → blog/index.html
//!     001 Raft in Practice → blog/raft-in-practice/index.html
//! Projects → projects/index.html
//!     001 ada-example/pathfinder → projects/pathfinder/index.html
//!
//! Feed → feed.xml
//! Sitemap → sitemap.xml
//! Robots → robots.txt
//!
//! Generated 3 posts, 3 projects, 2 assets
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::dates;
use crate::generate::GenerateReport;
use crate::scan::Manifest;
use std::path::Path;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Format an entity header: positional index + title, with optional detail.
///
/// ```text
/// 001 Raft in Practice (Mar 2, 2025)
/// 001 Raft in Practice
/// ```
fn entity_header(index: usize, title: &str, detail: Option<&str>) -> String {
    match detail {
        Some(d) => format!("{} {} ({})", format_index(index), title, d),
        None => format!("{} {}", format_index(index), title),
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    }
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{} {}", n, word)
    } else {
        format!("{} {}s", n, word)
    }
}

// ============================================================================
// Stage 1: Scan output
// ============================================================================

/// Format scan stage output showing discovered content.
pub fn format_scan_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Posts".to_string());
    for (i, post) in manifest.posts.iter().enumerate() {
        let date = dates::display_day(&post.date);
        let featured = if post.featured { " [featured]" } else { "" };
        lines.push(format!(
            "{}{}",
            entity_header(i + 1, &post.title, Some(&date)),
            featured
        ));
        lines.push(format!("    Source: {}", post.source.path));
        let summary = truncate_desc(post.summary.trim(), 60);
        if !summary.is_empty() {
            lines.push(format!("    {}", summary));
        }
    }

    lines.push(String::new());
    lines.push("Projects".to_string());
    for (i, project) in manifest.projects.iter().enumerate() {
        let detail = format!(
            "{}, {}",
            project.period_label(),
            plural(project.stars as usize, "star")
        );
        let featured = if project.featured { " [featured]" } else { "" };
        lines.push(format!(
            "{}{}",
            entity_header(i + 1, &project.title, Some(&detail)),
            featured
        ));
        lines.push(format!("    Source: {}", project.source.path));
        let description = truncate_desc(project.description.trim(), 60);
        if !description.is_empty() {
            lines.push(format!("    {}", description));
        }
    }

    // Config section
    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join("config.toml").exists() {
        lines.push("    config.toml".to_string());
    }
    if source_root.join("public").is_dir() {
        lines.push("    public/".to_string());
    }

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    for line in format_scan_output(manifest, source_root) {
        println!("{}", line);
    }
}

/// One-line validity summary for `check`.
pub fn format_check_output(manifest: &Manifest) -> Vec<String> {
    vec![format!(
        "Content OK: {}, {}",
        plural(manifest.posts.len(), "post"),
        plural(manifest.projects.len(), "project")
    )]
}

/// Print check output to stdout.
pub fn print_check_output(manifest: &Manifest) {
    for line in format_check_output(manifest) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 2: Generate output
// ============================================================================

/// Format generate stage output showing written files.
///
/// Entries lead with their positional index and title, followed by `→` and
/// the output path. Only files present in the report are listed.
pub fn format_generate_output(manifest: &Manifest, report: &GenerateReport) -> Vec<String> {
    let written = |rel: &str| report.files.iter().any(|f| f == rel);
    let mut lines = Vec::new();

    if written("index.html") {
        lines.push("Home \u{2192} index.html".to_string());
    }

    if written("blog/index.html") {
        lines.push("Blog \u{2192} blog/index.html".to_string());
    }
    for (i, post) in manifest.posts.iter().enumerate() {
        let rel = format!("blog/{}/index.html", post.slug);
        if written(&rel) {
            lines.push(format!(
                "    {} \u{2192} {}",
                entity_header(i + 1, &post.title, None),
                rel
            ));
        }
    }

    if written("projects/index.html") {
        lines.push("Projects \u{2192} projects/index.html".to_string());
    }
    for (i, project) in manifest.projects.iter().enumerate() {
        let rel = format!("projects/{}/index.html", project.slug);
        if written(&rel) {
            lines.push(format!(
                "    {} \u{2192} {}",
                entity_header(i + 1, &project.title, None),
                rel
            ));
        }
    }

    lines.push(String::new());
    for (label, rel) in [
        ("Feed", "feed.xml"),
        ("Sitemap", "sitemap.xml"),
        ("Robots", "robots.txt"),
    ] {
        if written(rel) {
            lines.push(format!("{} \u{2192} {}", label, rel));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {}, {}",
        plural(manifest.posts.len(), "post"),
        plural(manifest.projects.len(), "project"),
        plural(report.assets_copied, "asset")
    ));

    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(manifest: &Manifest, report: &GenerateReport) {
    for line in format_generate_output(manifest, report) {
        println!("{}", line);
    }
}
