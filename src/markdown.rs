//! MDX/Markdown body rendering.
//!
//! Content bodies are Markdown with optional MDX module syntax. The site has
//! no JavaScript runtime, so ESM blocks (`import` / `export` paragraphs) are
//! dropped before the rest is rendered as CommonMark with GitHub extensions.
//! Raw HTML in the body passes through unchanged.

use pulldown_cmark::{Options, Parser, html as md_html};

/// Remove top-level MDX `import` / `export` blocks.
///
/// An ESM block starts with a line beginning `import ` or `export ` at column
/// zero and runs to the next blank line, so multi-line imports go with it.
/// Lines inside fenced code blocks are never touched.
pub fn strip_esm(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut fence: Option<Fence> = None;
    let mut in_esm = false;

    for line in body.split_inclusive('\n') {
        let content = line.trim_end_matches(['\n', '\r']);

        if let Some(open) = fence {
            if open.is_closed_by(content) {
                fence = None;
            }
            out.push_str(line);
            continue;
        }

        if in_esm {
            if content.trim().is_empty() {
                in_esm = false;
            }
            continue;
        }

        if is_esm_start(content) {
            in_esm = true;
            continue;
        }

        fence = Fence::open(content);
        out.push_str(line);
    }
    out
}

fn is_esm_start(line: &str) -> bool {
    ["import ", "import{", "export ", "export{"]
        .iter()
        .any(|prefix| line.starts_with(prefix))
}

/// An open fenced code block: its marker character and run length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fence {
    marker: char,
    len: usize,
}

impl Fence {
    /// Fence opened by `line`, allowing up to three spaces of indent.
    fn open(line: &str) -> Option<Fence> {
        let (marker, len, rest) = marker_run(line)?;
        if marker == '`' && rest.contains('`') {
            return None;
        }
        Some(Fence { marker, len })
    }

    /// A closing fence uses the same character, is at least as long, and
    /// carries no info string.
    fn is_closed_by(self, line: &str) -> bool {
        marker_run(line).is_some_and(|(marker, len, rest)| {
            marker == self.marker && len >= self.len && rest.trim().is_empty()
        })
    }
}

/// Leading run of three or more `` ` `` or `~`, and the text after it.
fn marker_run(line: &str) -> Option<(char, usize, &str)> {
    let indent = line.len() - line.trim_start_matches(' ').len();
    if indent > 3 {
        return None;
    }
    let trimmed = &line[indent..];
    let marker = trimmed.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let len = trimmed.chars().take_while(|c| *c == marker).count();
    (len >= 3).then(|| (marker, len, &trimmed[len..]))
}

/// Render an MDX body to HTML.
pub fn mdx_to_html(body: &str) -> String {
    let source = strip_esm(body);
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(&source, options);
    let mut html = String::new();
    md_html::push_html(&mut html, parser);
    html
}
