//! HTML site generation.
//!
//! Stage 2 of the simple-folio build pipeline. Takes the scan manifest and
//! writes the final static site.
//!
//! ## Generated Files
//!
//! ```text
//! dist/
//! ├── index.html                 # Home: hero, about, featured repos and posts
//! ├── blog/
//! │   ├── index.html             # All posts, newest first
//! │   └── raft-in-practice/
//! │       └── index.html         # Post page
//! ├── projects/
//! │   ├── index.html             # All projects with period and GitHub link
//! │   └── gastronome/
//! │       └── index.html         # Project page
//! ├── feed.xml                   # RSS 2.0
//! ├── sitemap.xml                # With content hashes
//! ├── robots.txt
//! └── covers/...                 # Everything from content/public/
//! ```
//!
//! Every page gets the site JSON-LD graph, an RSS discovery link and inline
//! CSS built from the configured colors plus `static/style.css`. Content pages
//! additionally get OpenGraph tags and their own JSON-LD node.
//!
//! ## Bodies
//!
//! Post and project bodies are re-read from the content root and rendered
//! in parallel. The manifest holds metadata only, so `generate` needs the same
//! source root the scan ran against.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping.

use crate::config::{self, SiteConfig};
use crate::dates;
use crate::feed;
use crate::frontmatter;
use crate::markdown;
use crate::metadata::{self, PageMetadata};
use crate::scan::Manifest;
use crate::sitemap;
use crate::types::{PostMeta, ProjectMeta, Section};
use chrono::{DateTime, Datelike, Utc};
use log::{debug, info, warn};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to copy public assets: {0}")]
    Walk(#[from] walkdir::Error),
}

/// What a generate run wrote.
#[derive(Debug, Default)]
pub struct GenerateReport {
    pub output_dir: PathBuf,
    /// Generated files, relative to the output directory, in write order.
    pub files: Vec<String>,
    /// Number of files copied from `public/`.
    pub assets_copied: usize,
}

const CSS_STATIC: &str = include_str!("../static/style.css");

/// Cover shown for projects without one.
pub const PLACEHOLDER_COVER: &str = "https://placehold.co/600x338";

const NAV_ITEMS: &[(&str, &str)] = &[("Home", "/"), ("Projects", "/projects"), ("Blog", "/blog")];

/// Generate the site from a manifest file.
pub fn generate(
    manifest_path: &Path,
    source_root: &Path,
    output_dir: &Path,
    build_date: DateTime<Utc>,
) -> Result<GenerateReport, GenerateError> {
    let manifest_content = fs::read_to_string(manifest_path)?;
    let manifest: Manifest = serde_json::from_str(&manifest_content)?;
    generate_site(&manifest, source_root, output_dir, build_date)
}

/// Generate the site from an in-memory manifest.
pub fn generate_site(
    manifest: &Manifest,
    source_root: &Path,
    output_dir: &Path,
    build_date: DateTime<Utc>,
) -> Result<GenerateReport, GenerateError> {
    let config = &manifest.config;
    let mut report = GenerateReport {
        output_dir: output_dir.to_path_buf(),
        ..Default::default()
    };

    fs::create_dir_all(output_dir)?;

    // Public assets first so generated files win on collision
    report.assets_copied = copy_public(&source_root.join("public"), output_dir)?;

    let bodies = render_bodies(manifest, source_root)?;

    let color_css = config::generate_color_css(&config.colors);
    let ctx = PageContext {
        config,
        css: format!("{}\n\n{}", color_css, CSS_STATIC),
        graph: metadata::json_ld_script(&metadata::site_graph(config)),
        year: build_date.year(),
    };

    let index_html = render_index(manifest, &ctx);
    write_file(output_dir, "index.html", &index_html.into_string(), &mut report)?;

    let blog_html = render_blog_index(&manifest.posts, &ctx);
    write_file(output_dir, "blog/index.html", &blog_html.into_string(), &mut report)?;

    for post in &manifest.posts {
        let body = bodies.posts.get(&post.slug).map(String::as_str).unwrap_or_default();
        let mut meta = PageMetadata::for_post(post, config);
        apply_cover_size(&mut meta, source_root, post.cover.as_deref());
        let html = render_post_page(post, &meta, body, &ctx);
        write_file(
            output_dir,
            &format!("blog/{}/index.html", post.slug),
            &html.into_string(),
            &mut report,
        )?;
    }

    let projects_html = render_projects_index(&manifest.projects, &ctx);
    write_file(
        output_dir,
        "projects/index.html",
        &projects_html.into_string(),
        &mut report,
    )?;

    for project in &manifest.projects {
        let body = bodies
            .projects
            .get(&project.slug)
            .map(String::as_str)
            .unwrap_or_default();
        let mut meta = PageMetadata::for_project(project, config);
        apply_cover_size(&mut meta, source_root, project.cover.as_deref());
        let html = render_project_page(project, &meta, body, &ctx);
        write_file(
            output_dir,
            &format!("projects/{}/index.html", project.slug),
            &html.into_string(),
            &mut report,
        )?;
    }

    let rss = feed::render_rss(&manifest.posts, &bodies.posts, config, build_date);
    write_file(output_dir, "feed.xml", &rss, &mut report)?;

    let entries = sitemap::collect(manifest, build_date);
    let sitemap_xml = sitemap::render_sitemap(&entries, config.base_url());
    write_file(output_dir, "sitemap.xml", &sitemap_xml, &mut report)?;

    write_file(output_dir, "robots.txt", &robots_txt(config), &mut report)?;

    info!(
        "generated {} files and copied {} assets into {}",
        report.files.len(),
        report.assets_copied,
        output_dir.display()
    );
    Ok(report)
}

fn write_file(
    output_dir: &Path,
    rel: &str,
    contents: &str,
    report: &mut GenerateReport,
) -> Result<(), GenerateError> {
    let path = output_dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, contents)?;
    debug!("wrote {}", path.display());
    report.files.push(rel.to_string());
    Ok(())
}

/// Copy `public/` verbatim into the output root. Returns the file count.
fn copy_public(public_dir: &Path, output_dir: &Path) -> Result<usize, GenerateError> {
    if !public_dir.is_dir() {
        return Ok(0);
    }
    let mut copied = 0;
    for entry in WalkDir::new(public_dir) {
        let entry = entry?;
        let Ok(rel) = entry.path().strip_prefix(public_dir) else {
            continue;
        };
        let dst = output_dir.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&dst)?;
        } else {
            fs::copy(entry.path(), &dst)?;
            copied += 1;
        }
    }
    Ok(copied)
}

fn robots_txt(config: &SiteConfig) -> String {
    format!(
        "User-agent: *\nAllow: /\n\nSitemap: {}/sitemap.xml\n",
        config.base_url()
    )
}

// ============================================================================
// Bodies and covers
// ============================================================================

/// Rendered HTML bodies keyed by slug.
struct Bodies {
    posts: BTreeMap<String, String>,
    projects: BTreeMap<String, String>,
}

fn render_bodies(manifest: &Manifest, source_root: &Path) -> Result<Bodies, GenerateError> {
    let jobs: Vec<(Section, &str, &str)> = manifest
        .posts
        .iter()
        .map(|p| (Section::Blog, p.slug.as_str(), p.source.path.as_str()))
        .chain(
            manifest
                .projects
                .iter()
                .map(|p| (Section::Projects, p.slug.as_str(), p.source.path.as_str())),
        )
        .collect();

    let rendered = jobs
        .par_iter()
        .map(|&(section, slug, path)| -> Result<_, GenerateError> {
            let raw = fs::read_to_string(source_root.join(path))?;
            let (_, body) = frontmatter::split_front_matter(&raw);
            Ok((section, slug.to_string(), markdown::mdx_to_html(body)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut bodies = Bodies {
        posts: BTreeMap::new(),
        projects: BTreeMap::new(),
    };
    for (section, slug, html) in rendered {
        match section {
            Section::Blog => bodies.posts.insert(slug, html),
            Section::Projects => bodies.projects.insert(slug, html),
        };
    }
    Ok(bodies)
}

/// Pixel size of a site-relative cover that lives under `public/`.
///
/// Remote covers and unreadable images yield `None`.
fn cover_dimensions(source_root: &Path, cover: &str) -> Option<(u32, u32)> {
    let rel = cover.strip_prefix('/')?;
    let path = source_root.join("public").join(rel);
    if !path.is_file() {
        debug!("cover {} not found under public/", cover);
        return None;
    }
    match image::image_dimensions(&path) {
        Ok(dims) => Some(dims),
        Err(e) => {
            warn!("Could not read dimensions of {}: {}", path.display(), e);
            None
        }
    }
}

fn apply_cover_size(meta: &mut PageMetadata, source_root: &Path, cover: Option<&str>) {
    let (Some(cover), Some(image)) = (cover, meta.open_graph.images.first_mut()) else {
        return;
    };
    if let Some((width, height)) = cover_dimensions(source_root, cover) {
        image.width = Some(width);
        image.height = Some(height);
    }
}

// ============================================================================
// HTML Components
// ============================================================================

/// Shared per-site rendering state.
struct PageContext<'a> {
    config: &'a SiteConfig,
    css: String,
    /// Site JSON-LD, identical on every page.
    graph: Markup,
    year: i32,
}

/// Renders the base HTML document structure
fn base_document(
    ctx: &PageContext,
    title: &str,
    current_path: &str,
    head: Markup,
    content: Markup,
) -> Markup {
    let config = ctx.config;
    html! {
        (DOCTYPE)
        html lang=(config.site.language) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                (head)
                link rel="alternate" type="application/rss+xml" title=(config.rss.title) href="/feed.xml";
                (ctx.graph)
                style { (PreEscaped(&ctx.css)) }
            }
            body {
                (site_header(config, current_path))
                (content)
                (site_footer(config, ctx.year))
            }
        }
    }
}

/// Renders the site header with name and section navigation
fn site_header(config: &SiteConfig, current_path: &str) -> Markup {
    html! {
        header.site-header {
            a.site-name href="/" { (config.author.name) }
            nav.site-nav {
                @for (label, href) in NAV_ITEMS {
                    @let active = is_current(href, current_path);
                    a href=(href) class=[active.then_some("current")] { (label) }
                }
            }
        }
    }
}

fn is_current(href: &str, current_path: &str) -> bool {
    if href == "/" {
        return current_path == "/";
    }
    current_path == href || current_path.starts_with(&format!("{href}/"))
}

fn site_footer(config: &SiteConfig, year: i32) -> Markup {
    html! {
        footer.site-footer {
            p.footer-links {
                a href="/feed.xml" { "RSS" }
                a href="/robots.txt" { "robots.txt" }
                a href="/sitemap.xml" { "Sitemap" }
            }
            p.copyright { (config.copyright(year)) }
        }
    }
}

fn tag_list(tags: &[String]) -> Markup {
    html! {
        @if !tags.is_empty() {
            ul.tags {
                @for tag in tags {
                    li.tag { (tag) }
                }
            }
        }
    }
}

fn post_list(posts: &[&PostMeta]) -> Markup {
    html! {
        ul.post-list {
            @for post in posts {
                li.post-item {
                    a.post-title href=(post.path()) { (post.title) }
                    time datetime=(dates::iso_date(&post.date)) { (dates::display_day(&post.date)) }
                    @if !post.summary.is_empty() {
                        p.post-summary { (post.summary) }
                    }
                }
            }
        }
    }
}

/// Project card for the home page and the projects index
fn project_card(project: &ProjectMeta) -> Markup {
    let cover = project.cover.as_deref().unwrap_or(PLACEHOLDER_COVER);
    html! {
        article.project-card {
            img.project-cover src=(cover) alt=(project.title) loading="lazy";
            div.project-body {
                h3.project-title {
                    a href=(project.repo_url()) target="_blank" rel="noopener" { (project.title) }
                }
                p.project-period { (project.period_label()) }
                p.project-stats {
                    @if let Some(language) = &project.language {
                        span.language { (language) }
                        " · "
                    }
                    span.stars { "★ " (project.stars) }
                }
                p.project-description { (project.description) }
                (tag_list(&project.tags))
                a.details-link href=(project.path()) { "Go into Details" }
            }
        }
    }
}

fn contact_list(config: &SiteConfig) -> Markup {
    let author = &config.author;
    let social = author.social.entries();
    html! {
        @if author.email.is_some() || !social.is_empty() {
            section.contact {
                h2 { "Contact" }
                ul.contact-list {
                    @if let Some(email) = &author.email {
                        li { a href={ "mailto:" (email) } { (email) } }
                    }
                    @for (label, url) in &social {
                        li { a href=(url) target="_blank" rel="noopener" { (label) } }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the home page
fn render_index(manifest: &Manifest, ctx: &PageContext) -> Markup {
    let config = ctx.config;
    let author = &config.author;
    let meta = PageMetadata::for_listing(&config.site.title, &config.site.description, "/", config);
    let featured_projects = manifest.featured_projects();
    let featured_posts = manifest.featured_posts();

    let content = html! {
        main.home-page {
            section.hero {
                @if let Some(image) = &author.image {
                    img.portrait src=(image.src) alt=(image.alt) width=[image.width] height=[image.height];
                }
                h1 { (author.name) }
                @if let Some(job) = &author.job_title {
                    p.job-title { (job) }
                }
                p.tagline { (config.site.description) }
            }
            @if !author.education.is_empty() {
                section.about {
                    h2 { "About" }
                    ul.education {
                        @for school in &author.education {
                            li { (school) }
                        }
                    }
                }
            }
            @if !featured_projects.is_empty() {
                section.featured-projects {
                    h2 { "Featured Repositories" }
                    div.project-grid {
                        @for project in &featured_projects {
                            (project_card(project))
                        }
                    }
                    a.more-link href="/projects" { "All projects" }
                }
            }
            @if !featured_posts.is_empty() {
                section.featured-posts {
                    h2 { "Featured Posts" }
                    (post_list(&featured_posts))
                    a.more-link href="/blog" { "All posts" }
                }
            }
            (contact_list(config))
        }
    };

    base_document(ctx, &config.site.title, "/", metadata::meta_tags(&meta), content)
}

/// Renders the blog index
fn render_blog_index(posts: &[PostMeta], ctx: &PageContext) -> Markup {
    let config = ctx.config;
    let meta = PageMetadata::for_listing(&config.rss.title, &config.rss.description, "/blog", config);
    let all: Vec<&PostMeta> = posts.iter().collect();

    let content = html! {
        main.blog-page {
            h1 { (config.rss.title) }
            @if all.is_empty() {
                p.empty { "No posts yet." }
            } @else {
                (post_list(&all))
            }
        }
    };

    let title = page_title(&config.rss.title, config);
    base_document(ctx, &title, "/blog", metadata::meta_tags(&meta), content)
}

/// Renders a blog post page
fn render_post_page(post: &PostMeta, meta: &PageMetadata, body: &str, ctx: &PageContext) -> Markup {
    let config = ctx.config;
    let head = html! {
        (metadata::meta_tags(meta))
        (metadata::json_ld_script(&metadata::blog_posting(post, config)))
    };

    let content = html! {
        main.post-page {
            article.post {
                header.post-header {
                    h1 { (post.title) }
                    p.post-meta {
                        time datetime=(dates::iso_date(&post.date)) { (dates::display_day(&post.date)) }
                    }
                    (tag_list(&post.tags))
                }
                div.post-body {
                    (PreEscaped(body))
                }
            }
            a.back-link href="/blog" { "← All posts" }
        }
    };

    base_document(ctx, &page_title(&post.title, config), &post.path(), head, content)
}

/// Renders the projects index
fn render_projects_index(projects: &[ProjectMeta], ctx: &PageContext) -> Markup {
    let config = ctx.config;
    let meta = PageMetadata::for_listing(
        "Projects",
        &format!("Projects by {}", config.author.name),
        "/projects",
        config,
    );

    let content = html! {
        main.projects-page {
            h1 { "Projects" }
            @if projects.is_empty() {
                p.empty { "No projects yet." }
            } @else {
                div.project-grid {
                    @for project in projects {
                        (project_card(project))
                    }
                }
            }
        }
    };

    base_document(ctx, &page_title("Projects", config), "/projects", metadata::meta_tags(&meta), content)
}

/// Renders a project detail page
fn render_project_page(
    project: &ProjectMeta,
    meta: &PageMetadata,
    body: &str,
    ctx: &PageContext,
) -> Markup {
    let config = ctx.config;
    let head = html! {
        (metadata::meta_tags(meta))
        (metadata::json_ld_script(&metadata::software_source_code(project, config)))
    };

    let content = html! {
        main.project-page {
            article.project {
                header.project-header {
                    h1 {
                        a href=(project.repo_url()) target="_blank" rel="noopener" { (project.title) }
                    }
                    p.project-period { (project.period_label()) }
                    p.project-stats {
                        @if let Some(language) = &project.language {
                            span.language { (language) }
                            " · "
                        }
                        span.stars { "★ " (project.stars) }
                    }
                    (tag_list(&project.tags))
                }
                @if let Some(cover) = &project.cover {
                    img.project-hero src=(cover) alt=(project.title);
                }
                div.project-body {
                    (PreEscaped(body))
                }
            }
            a.back-link href="/projects" { "← All projects" }
        }
    };

    base_document(ctx, &page_title(&project.title, config), &project.path(), head, content)
}

fn page_title(title: &str, config: &SiteConfig) -> String {
    format!("{} | {}", title, config.site.title)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn context(config: &SiteConfig) -> PageContext<'_> {
        PageContext {
            config,
            css: String::new(),
            graph: metadata::json_ld_script(&metadata::site_graph(config)),
            year: 2026,
        }
    }

    fn build_fixtures() -> (TempDir, TempDir, GenerateReport) {
        let content = setup_fixtures();
        let out = TempDir::new().unwrap();
        let manifest = scan::scan(content.path()).unwrap();
        let report = generate_site(&manifest, content.path(), out.path(), build_date()).unwrap();
        (content, out, report)
    }

    fn read(out: &TempDir, rel: &str) -> String {
        fs::read_to_string(out.path().join(rel)).unwrap()
    }

    #[test]
    fn nav_marks_current_section() {
        let config = SiteConfig::default();
        let html = site_header(&config, "/blog/raft").into_string();
        assert!(html.contains(r#"<a href="/blog" class="current">Blog</a>"#));
        assert!(html.contains(r#"<a href="/">Home</a>"#));
    }

    #[test]
    fn home_is_current_only_on_root() {
        assert!(is_current("/", "/"));
        assert!(!is_current("/", "/projects"));
        assert!(is_current("/projects", "/projects/tinykv"));
        assert!(!is_current("/projects", "/projectsx"));
    }

    #[test]
    fn base_document_includes_doctype_feed_link_and_graph() {
        let config = SiteConfig::default();
        let ctx = context(&config);
        let doc = base_document(&ctx, "Test", "/", html! {}, html! { p { "test" } }).into_string();

        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains(r#"<html lang="en">"#));
        assert!(doc.contains(r#"type="application/rss+xml""#));
        assert!(doc.contains(r#"href="/feed.xml""#));
        assert!(doc.contains(r#"<script type="application/ld+json">"#));
        assert!(doc.contains("© 2026 Anonymous"));
    }

    #[test]
    fn footer_uses_configured_copyright() {
        let mut config = SiteConfig::default();
        config.rss.copyright = Some("CC BY 4.0".to_string());
        let html = site_footer(&config, 2026).into_string();
        assert!(html.contains(r#"<p class="copyright">CC BY 4.0</p>"#));
        assert!(!html.contains("© 2026"));
    }

    #[test]
    fn css_is_not_escaped() {
        let config = SiteConfig::default();
        let mut ctx = context(&config);
        ctx.css = "nav > a { color: red; }".to_string();
        let doc = base_document(&ctx, "T", "/", html! {}, html! {}).into_string();
        assert!(doc.contains("nav > a { color: red; }"));
    }

    #[test]
    fn project_card_uses_placeholder_without_cover() {
        let mut project = sample_project("tinykv", 3, "2024-01-01", None);
        project.cover = None;
        let html = project_card(&project).into_string();
        assert!(html.contains(PLACEHOLDER_COVER));
        assert!(html.contains("https://github.com/me/tinykv"));
        assert!(html.contains(r#"href="/projects/tinykv""#));
        assert!(html.contains("Go into Details"));
        assert!(html.contains("Jan 2024 - Present"));
    }

    #[test]
    fn post_list_formats_dates() {
        let post = sample_post("raft", "2025-01-05");
        let html = post_list(&[&post]).into_string();
        assert!(html.contains(r#"<time datetime="2025-01-05">Jan 5, 2025</time>"#));
        assert!(html.contains(r#"href="/blog/raft""#));
    }

    #[test]
    fn html_escape_in_titles() {
        let mut post = sample_post("xss", "2025-01-05");
        post.title = "<script>alert('xss')</script>".to_string();
        let html = post_list(&[&post]).into_string();
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn contact_list_hidden_without_links() {
        let config = SiteConfig::default();
        assert!(contact_list(&config).into_string().is_empty());
    }

    #[test]
    fn contact_list_renders_email_and_social() {
        let mut config = SiteConfig::default();
        config.author.email = Some("ada@example.org".to_string());
        config.author.social.github = Some("https://github.com/ada".to_string());
        let html = contact_list(&config).into_string();
        assert!(html.contains("mailto:ada@example.org"));
        assert!(html.contains(">GitHub</a>"));
    }

    #[test]
    fn robots_points_at_sitemap() {
        let manifest = sample_manifest();
        assert_eq!(
            robots_txt(&manifest.config),
            "User-agent: *\nAllow: /\n\nSitemap: https://folio.example.org/sitemap.xml\n"
        );
    }

    #[test]
    fn generates_every_page_and_artifact() {
        let (_content, out, report) = build_fixtures();

        for rel in [
            "index.html",
            "blog/index.html",
            "blog/raft-in-practice/index.html",
            "blog/consistent-hashing/index.html",
            "blog/hello-world/index.html",
            "projects/index.html",
            "projects/pathfinder/index.html",
            "projects/gastronome/index.html",
            "projects/tinykv/index.html",
            "feed.xml",
            "sitemap.xml",
            "robots.txt",
        ] {
            assert!(out.path().join(rel).is_file(), "missing {rel}");
            assert!(report.files.iter().any(|f| f == rel), "unreported {rel}");
        }
    }

    #[test]
    fn public_assets_copied() {
        let (_content, out, report) = build_fixtures();
        assert!(out.path().join("covers/tinykv.png").is_file());
        assert!(out.path().join("humans.txt").is_file());
        assert_eq!(report.assets_copied, 2);
    }

    #[test]
    fn home_shows_featured_content_in_order() {
        let (_content, out, _) = build_fixtures();
        let html = read(&out, "index.html");

        let tinykv = html.find("/projects/tinykv").unwrap();
        let gastronome = html.find("/projects/gastronome").unwrap();
        assert!(tinykv < gastronome);
        assert!(!html.contains("/projects/pathfinder"));

        assert!(html.contains("/blog/raft-in-practice"));
        assert!(html.contains("/blog/hello-world"));
        assert!(!html.contains("/blog/consistent-hashing"));
    }

    #[test]
    fn post_page_has_body_metadata_and_json_ld() {
        let (_content, out, _) = build_fixtures();
        let html = read(&out, "blog/raft-in-practice/index.html");

        assert!(html.contains("<h1>Raft in Practice</h1>"));
        assert!(html.contains("<strong>leader</strong>"));
        assert!(!html.contains("import Callout"));
        assert!(html.contains(r#"<meta property="og:type" content="article">"#));
        assert!(html.contains(
            r#"<link rel="canonical" href="https://folio.example.org/blog/raft-in-practice">"#
        ));
        assert!(html.contains(r#""@type":"BlogPosting""#));
    }

    #[test]
    fn project_page_has_source_code_json_ld_and_cover_size() {
        let (_content, out, _) = build_fixtures();
        let html = read(&out, "projects/tinykv/index.html");

        assert!(html.contains(r#""@type":"SoftwareSourceCode""#));
        assert!(html.contains(r#""codeRepository":"https://github.com/ada-example/tinykv""#));
        assert!(html.contains(r#"<meta property="og:image:width" content="4">"#));
        assert!(html.contains(r#"<meta property="og:image:height" content="3">"#));
    }

    #[test]
    fn remote_cover_has_no_probed_size() {
        let (_content, out, _) = build_fixtures();
        let html = read(&out, "projects/gastronome/index.html");
        assert!(html.contains("og:image"));
        assert!(!html.contains("og:image:width"));
    }

    #[test]
    fn projects_index_lists_all_with_placeholder() {
        let (_content, out, _) = build_fixtures();
        let html = read(&out, "projects/index.html");
        assert!(html.contains("/projects/pathfinder"));
        assert!(html.contains(PLACEHOLDER_COVER));
        assert!(html.contains(" - Present"));
    }

    #[test]
    fn generate_reads_manifest_file() {
        let content = setup_fixtures();
        let out = TempDir::new().unwrap();
        let manifest = scan::scan(content.path()).unwrap();
        let manifest_path = content.path().join("manifest.json");
        fs::write(&manifest_path, serde_json::to_string_pretty(&manifest).unwrap()).unwrap();

        let report = generate(&manifest_path, content.path(), out.path(), build_date()).unwrap();
        assert_eq!(report.output_dir, out.path());
        assert!(out.path().join("sitemap.xml").is_file());
    }

    #[test]
    fn missing_source_file_is_error() {
        let content = setup_fixtures();
        let out = TempDir::new().unwrap();
        let manifest = scan::scan(content.path()).unwrap();
        fs::remove_file(content.path().join("blog/hello-world/page.mdx")).unwrap();

        let result = generate_site(&manifest, content.path(), out.path(), build_date());
        assert!(matches!(result, Err(GenerateError::Io(_))));
    }
}
