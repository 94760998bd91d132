//! YAML front-matter parsing.
//!
//! Content files open with a fenced YAML block:
//!
//! ```text
//! ---
//! title: Consistent Hashing in Practice
//! summary: Ring placement, virtual nodes, and rebalancing.
//! date: 2025-01-15
//! tags: [distributed-systems, hashing]
//! featured: true
//! ---
//!
//! Body in Markdown / MDX...
//! ```
//!
//! Blog posts and projects share one [`FrontMatter`] shape; each section reads
//! the keys it cares about. Values are kept raw here (dates as strings, tags as
//! written); normalization into canonical metadata happens in [`crate::scan`].

use serde::{Deserialize, Deserializer};

/// Raw front-matter fields. Every key is optional; unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(deserialize_with = "scalar_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub summary: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub date: Option<String>,
    #[serde(alias = "lastModified", deserialize_with = "scalar_string")]
    pub last_modified: Option<String>,
    #[serde(deserialize_with = "truthy")]
    pub featured: bool,
    /// GitHub repository path (`owner/name`); the display title of a project.
    #[serde(deserialize_with = "scalar_string")]
    pub repo: Option<String>,
    pub stars: Option<u32>,
    #[serde(deserialize_with = "scalar_string")]
    pub language: Option<String>,
    /// Written as a list or a bare scalar; always read into a list.
    #[serde(deserialize_with = "tag_values")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub cover: Option<String>,
    pub period: Option<Period>,
}

impl FrontMatter {
    /// Non-blank tags, in written order.
    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .iter()
            .filter(|tag| !tag.trim().is_empty())
            .cloned()
            .collect()
    }
}

/// Project activity window. A missing `end` means the project is ongoing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Period {
    #[serde(deserialize_with = "scalar_string")]
    pub start: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub end: Option<String>,
}

/// Split a document into its YAML front-matter and body.
///
/// The opening `---` must be the first line. Returns an empty YAML block and
/// the untouched input when there is no (closed) front-matter fence.
pub fn split_front_matter(raw: &str) -> (&str, &str) {
    let text = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let Some(rest) = text.strip_prefix("---") else {
        return ("", raw);
    };
    let Some(rest) = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))
    else {
        return ("", raw);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return (&rest[..offset], &rest[offset + line.len()..]);
        }
        offset += line.len();
    }
    ("", raw)
}

/// Parse a document into its front-matter and body.
pub fn parse(raw: &str) -> Result<(FrontMatter, &str), serde_yaml::Error> {
    let (yaml, body) = split_front_matter(raw);
    if yaml.trim().is_empty() {
        return Ok((FrontMatter::default(), body));
    }
    let fm: FrontMatter = serde_yaml::from_str(yaml)?;
    Ok((fm, body))
}

/// Text of a YAML scalar; `None` for null, sequences and mappings.
fn scalar_text(value: serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Accept any YAML scalar as a string. `date: 2025` and `date: "2025-01-15"`
/// both land as text; parsing happens later.
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_yaml::Value>::deserialize(deserializer)?;
    Ok(value.and_then(scalar_text))
}

/// `tags: [go, 2024]`, `tags: rust` and `tags: 2024` all read as text lists.
fn tag_values<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_yaml::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_yaml::Value::Sequence(items)) => {
            items.into_iter().filter_map(scalar_text).collect()
        }
        Some(other) => scalar_text(other).into_iter().collect(),
        None => Vec::new(),
    })
}

/// JavaScript-style truthiness for flags like `featured`.
fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_yaml::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_yaml::Value::Bool(b)) => b,
        Some(serde_yaml::Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(serde_yaml::Value::String(s)) => !s.is_empty(),
        Some(serde_yaml::Value::Sequence(_)) | Some(serde_yaml::Value::Mapping(_)) => true,
        _ => false,
    })
}
