//! # Simple Folio
//!
//! A static site generator for a personal portfolio: a blog, a list of
//! software projects, and the metadata that makes both discoverable. Your
//! filesystem is the data source: each directory under `blog/` or
//! `projects/` is one entry, described by YAML front-matter.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Scan      content/  →  manifest.json    (front-matter → canonical metadata)
//! 2. Generate  manifest  →  dist/            (HTML + feed.xml + sitemap.xml)
//! ```
//!
//! The manifest is human-readable JSON. Every artifact (pages, SEO tags,
//! JSON-LD, RSS, sitemap) is derived from the same normalized metadata, so a
//! post's title or date can never disagree between the page and the feed.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: walks the content sections, normalizes front-matter, produces the manifest |
//! | [`generate`] | Stage 2: renders HTML pages with Maud and writes feed, sitemap, robots.txt |
//! | [`config`] | `config.toml` loading, stock-default merging, validation, color CSS |
//! | [`frontmatter`] | Splits `---` YAML blocks from bodies and parses them |
//! | [`dates`] | Front-matter date parsing and the display/ISO/RFC 2822 formats |
//! | [`types`] | Shared types serialized in the manifest (`PostMeta`, `ProjectMeta`) |
//! | [`metadata`] | Field resolution, OpenGraph/SEO tags, schema.org JSON-LD |
//! | [`markdown`] | MDX body → HTML (ESM stripped, GitHub extensions) |
//! | [`feed`] | RSS 2.0 with full-content items |
//! | [`sitemap`] | `sitemap.xml` with per-page SHA-256 prefixes |
//! | [`output`] | CLI output formatting for each stage |
//!
//! # Design Decisions
//!
//! ## Fail Loudly
//!
//! A content directory without a page file, malformed YAML, a post without a
//! date, or a date that does not parse stops the build with the offending
//! path. A portfolio has a handful of entries; silently dropping one is worse
//! than a failed build.
//!
//! ## Deterministic Output
//!
//! Date-only values are UTC midnight, ties in date order break by slug, and
//! the only wall-clock input ("today" for the top-level sitemap entries and
//! the copyright year) is passed in as `build_date`.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time HTML
//! macro system. Templates are Rust expressions, interpolation is auto-escaped,
//! and there is no template directory to ship.

pub mod config;
pub mod dates;
pub mod feed;
pub mod frontmatter;
pub mod generate;
pub mod markdown;
pub mod metadata;
pub mod output;
pub mod scan;
pub mod sitemap;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
