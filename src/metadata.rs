//! Page metadata: SEO tags, OpenGraph, and JSON-LD structured data.
//!
//! Every content page gets two kinds of machine-readable metadata, both
//! derived from the canonical [`PostMeta`] / [`ProjectMeta`] produced by the
//! scan stage:
//!
//! - **[`PageMetadata`]**: title, description, keywords, OpenGraph and the
//!   canonical URL. Rendered into `<head>` as `<meta>` tags by [`meta_tags`].
//! - **JSON-LD**: a schema.org `BlogPosting` for posts, `SoftwareSourceCode`
//!   for projects, plus a site-wide `Person` + `WebSite` graph. Rendered as
//!   `<script type="application/ld+json">` by [`json_ld_script`].
//!
//! ## Field resolution
//!
//! Posts and projects name the same concept differently (`title` vs `repo`,
//! `summary` vs `description`). [`resolve`] picks the first non-empty value
//! from a priority list; the scan stage uses it so every artifact sees one
//! canonical title and description.

use crate::config::SiteConfig;
use crate::dates;
use crate::types::{PostMeta, ProjectMeta};
use maud::{Markup, PreEscaped, html};
use serde::Serialize;
use serde_json::{Value, json};

/// Resolve a metadata field from multiple sources.
///
/// Takes a list of optional values in priority order and returns the first
/// non-None, non-empty (after trimming) value.
///
/// ```text
/// post title:          resolve(&[title, repo])
/// project description: resolve(&[description, summary])
/// ```
pub fn resolve(sources: &[Option<&str>]) -> Option<String> {
    sources
        .iter()
        .filter_map(|opt| {
            opt.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        })
        .next()
}

/// Make a URL absolute against the site base. Absolute URLs pass through.
pub fn absolute_url(config: &SiteConfig, path_or_url: &str) -> String {
    if path_or_url.starts_with("http://") || path_or_url.starts_with("https://") {
        path_or_url.to_string()
    } else if path_or_url.starts_with('/') {
        format!("{}{}", config.base_url(), path_or_url)
    } else {
        format!("{}/{}", config.base_url(), path_or_url)
    }
}

/// SEO metadata for one page, shaped like a Next.js `Metadata` object so the
/// JSON form is familiar.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    pub open_graph: OpenGraph,
    pub alternates: Alternates,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub site_name: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_time: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<OgImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OgImage {
    pub url: String,
    pub alt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alternates {
    pub canonical: String,
}

impl PageMetadata {
    /// Metadata for a blog post page.
    pub fn for_post(post: &PostMeta, config: &SiteConfig) -> Self {
        let mut meta = Self::article(
            &post.title,
            &post.summary,
            &post.path(),
            &post.tags,
            post.cover.as_deref(),
            config,
        );
        meta.open_graph.published_time = Some(dates::iso_timestamp(&post.date));
        meta
    }

    /// Metadata for a project detail page.
    pub fn for_project(project: &ProjectMeta, config: &SiteConfig) -> Self {
        Self::article(
            &project.title,
            &project.description,
            &project.path(),
            &project.tags,
            project.cover.as_deref(),
            config,
        )
    }

    /// Metadata for index pages (home, blog, projects).
    pub fn for_listing(title: &str, description: &str, path: &str, config: &SiteConfig) -> Self {
        let url = absolute_url(config, path);
        Self {
            title: title.to_string(),
            description: description.to_string(),
            keywords: Vec::new(),
            open_graph: OpenGraph {
                title: title.to_string(),
                description: description.to_string(),
                kind: "website".to_string(),
                site_name: config.og_site_name().to_string(),
                url: url.clone(),
                published_time: None,
                tags: Vec::new(),
                images: Vec::new(),
            },
            alternates: Alternates { canonical: url },
        }
    }

    fn article(
        title: &str,
        description: &str,
        path: &str,
        tags: &[String],
        cover: Option<&str>,
        config: &SiteConfig,
    ) -> Self {
        let url = absolute_url(config, path);
        let images = cover
            .map(|c| OgImage {
                url: absolute_url(config, c),
                alt: title.to_string(),
                width: None,
                height: None,
            })
            .into_iter()
            .collect();

        Self {
            title: title.to_string(),
            description: description.to_string(),
            keywords: tags.to_vec(),
            open_graph: OpenGraph {
                title: title.to_string(),
                description: description.to_string(),
                kind: "article".to_string(),
                site_name: config.og_site_name().to_string(),
                url: url.clone(),
                published_time: None,
                tags: tags.to_vec(),
                images,
            },
            alternates: Alternates { canonical: url },
        }
    }
}

/// Render metadata as `<head>` tags.
pub fn meta_tags(meta: &PageMetadata) -> Markup {
    let og = &meta.open_graph;
    let card = if og.images.is_empty() {
        "summary"
    } else {
        "summary_large_image"
    };
    html! {
        meta name="description" content=(meta.description);
        @if !meta.keywords.is_empty() {
            meta name="keywords" content=(meta.keywords.join(", "));
        }
        link rel="canonical" href=(meta.alternates.canonical);
        meta property="og:title" content=(og.title);
        meta property="og:description" content=(og.description);
        meta property="og:type" content=(og.kind);
        meta property="og:site_name" content=(og.site_name);
        meta property="og:url" content=(og.url);
        @if let Some(published) = &og.published_time {
            meta property="article:published_time" content=(published);
        }
        @for tag in &og.tags {
            meta property="article:tag" content=(tag);
        }
        @for image in &og.images {
            meta property="og:image" content=(image.url);
            meta property="og:image:alt" content=(image.alt);
            @if let Some(w) = image.width {
                meta property="og:image:width" content=(w);
            }
            @if let Some(h) = image.height {
                meta property="og:image:height" content=(h);
            }
        }
        meta name="twitter:card" content=(card);
        meta name="twitter:title" content=(og.title);
        meta name="twitter:description" content=(og.description);
    }
}

// ============================================================================
// JSON-LD
// ============================================================================

/// Embed a JSON-LD value in a script tag.
///
/// `</` is escaped so string content can never close the script element.
pub fn json_ld_script(value: &Value) -> Markup {
    let json = value.to_string().replace("</", "<\\/");
    html! {
        script type="application/ld+json" { (PreEscaped(json)) }
    }
}

fn author_ref(config: &SiteConfig) -> Value {
    json!({
        "@type": "Person",
        "name": config.author.name,
        "url": config.base_url(),
    })
}

/// schema.org `BlogPosting` for a post page.
pub fn blog_posting(post: &PostMeta, config: &SiteConfig) -> Value {
    let mut ld = json!({
        "@context": "https://schema.org",
        "@type": "BlogPosting",
        "headline": post.title,
        "description": post.summary,
        "author": author_ref(config),
        "url": absolute_url(config, &post.path()),
        "datePublished": dates::iso_date(&post.date),
    });
    if !post.tags.is_empty() {
        ld["keywords"] = json!(post.tags);
    }
    if let Some(cover) = &post.cover {
        ld["image"] = json!(absolute_url(config, cover));
    }
    ld
}

/// schema.org `SoftwareSourceCode` for a project page.
pub fn software_source_code(project: &ProjectMeta, config: &SiteConfig) -> Value {
    let mut ld = json!({
        "@context": "https://schema.org",
        "@type": "SoftwareSourceCode",
        "name": project.title,
        "description": project.description,
        "author": author_ref(config),
        "url": absolute_url(config, &project.path()),
        "codeRepository": project.repo_url(),
    });
    if let Some(cover) = &project.cover {
        ld["image"] = json!(absolute_url(config, cover));
    }
    if !project.tags.is_empty() {
        ld["keywords"] = json!(project.tags);
    }
    if let Some(language) = &project.language {
        ld["programmingLanguage"] = json!(language);
    }
    ld
}

/// Site-wide `Person` + `WebSite` graph, embedded on every page.
pub fn site_graph(config: &SiteConfig) -> Value {
    let author = &config.author;
    let mut person = json!({
        "@context": "https://schema.org",
        "@type": "Person",
        "name": author.name,
        "url": config.base_url(),
    });
    if let Some(image) = &author.image {
        person["image"] = json!(absolute_url(config, &image.src));
    }
    if let Some(job) = &author.job_title {
        person["jobTitle"] = json!(job);
    }
    if !author.education.is_empty() {
        person["alumniOf"] = author
            .education
            .iter()
            .map(|name| json!({ "@type": "CollegeOrUniversity", "name": name }))
            .collect();
    }
    let same_as: Vec<&str> = author.social.entries().into_iter().map(|(_, u)| u).collect();
    if !same_as.is_empty() {
        person["sameAs"] = json!(same_as);
    }

    json!([
        person,
        {
            "@context": "https://schema.org",
            "@type": "WebSite",
            "name": config.site.title,
            "url": config.base_url(),
        }
    ])
}
