//! RSS 2.0 feed for the blog.
//!
//! Items carry the full rendered post body in `content:encoded`, so readers
//! can show whole articles. Free text (titles, summaries, bodies) goes in
//! CDATA sections; URLs and config values are entity-escaped.

use crate::config::SiteConfig;
use crate::dates;
use crate::sitemap::xml_escape;
use crate::types::PostMeta;
use chrono::{DateTime, Datelike, Utc};
use std::collections::BTreeMap;
use std::fmt::Write as _;

const RSS_DOCS: &str = "https://validator.w3.org/feed/docs/rss2.html";

/// Wrap text in a CDATA section. A literal `]]>` is split across two
/// sections so it cannot terminate the block early.
pub fn cdata(text: &str) -> String {
    format!("<![CDATA[{}]]>", text.replace("]]>", "]]]]><![CDATA[>"))
}

/// Render the feed.
///
/// `posts` must already be newest first (the manifest order). `bodies` maps
/// slug to rendered HTML; posts without an entry get no `content:encoded`.
/// `lastBuildDate` is the newest post date, or `build_date` with no posts.
pub fn render_rss(
    posts: &[PostMeta],
    bodies: &BTreeMap<String, String>,
    config: &SiteConfig,
    build_date: DateTime<Utc>,
) -> String {
    let site = config.base_url();
    let updated = posts.first().map(|p| p.date).unwrap_or(build_date);
    let copyright = config.copyright(build_date.year());

    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    xml.push_str(
        "<rss version=\"2.0\" xmlns:dc=\"http://purl.org/dc/elements/1.1/\" \
         xmlns:content=\"http://purl.org/rss/1.0/modules/content/\" \
         xmlns:atom=\"http://www.w3.org/2005/Atom\">\n",
    );
    xml.push_str("    <channel>\n");
    writeln!(xml, "        <title>{}</title>", xml_escape(&config.rss.title)).ok();
    writeln!(xml, "        <link>{}</link>", xml_escape(site)).ok();
    writeln!(
        xml,
        "        <description>{}</description>",
        xml_escape(&config.rss.description)
    )
    .ok();
    writeln!(
        xml,
        "        <lastBuildDate>{}</lastBuildDate>",
        dates::rfc2822(&updated)
    )
    .ok();
    writeln!(xml, "        <docs>{RSS_DOCS}</docs>").ok();
    writeln!(
        xml,
        "        <generator>simple-folio {}</generator>",
        env!("CARGO_PKG_VERSION")
    )
    .ok();
    writeln!(
        xml,
        "        <language>{}</language>",
        xml_escape(&config.site.language)
    )
    .ok();
    writeln!(xml, "        <ttl>{}</ttl>", config.rss.ttl).ok();
    writeln!(xml, "        <copyright>{}</copyright>", xml_escape(&copyright)).ok();
    writeln!(
        xml,
        "        <atom:link href=\"{}/feed.xml\" rel=\"self\" type=\"application/rss+xml\"/>",
        xml_escape(site)
    )
    .ok();

    for post in posts {
        render_item(&mut xml, post, bodies.get(&post.slug), site, config);
    }

    xml.push_str("    </channel>\n");
    xml.push_str("</rss>");
    xml
}

fn render_item(
    xml: &mut String,
    post: &PostMeta,
    body: Option<&String>,
    site: &str,
    config: &SiteConfig,
) {
    let url = xml_escape(&format!("{site}{}", post.path()));
    xml.push_str("        <item>\n");
    writeln!(xml, "            <title>{}</title>", cdata(&post.title)).ok();
    writeln!(xml, "            <link>{url}</link>").ok();
    writeln!(xml, "            <guid isPermaLink=\"false\">{url}</guid>").ok();
    writeln!(
        xml,
        "            <pubDate>{}</pubDate>",
        dates::rfc2822(&post.date)
    )
    .ok();
    writeln!(
        xml,
        "            <description>{}</description>",
        cdata(&post.summary)
    )
    .ok();
    if let Some(html) = body {
        writeln!(
            xml,
            "            <content:encoded>{}</content:encoded>",
            cdata(html)
        )
        .ok();
    }
    writeln!(
        xml,
        "            <dc:creator>{}</dc:creator>",
        cdata(&config.author.name)
    )
    .ok();
    for tag in &post.tags {
        writeln!(xml, "            <category>{}</category>", xml_escape(tag)).ok();
    }
    xml.push_str("        </item>\n");
}
