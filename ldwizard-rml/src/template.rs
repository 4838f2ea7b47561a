//! String templates of the form `prefix{column}`
//!
//! The configuration model only understands single-placeholder templates:
//! an IRI prefix followed by one `{column}` group. [`parse`] splits such a
//! template and [`render`] builds one. Text after the first closing brace is
//! discarded by [`parse`].
//!
//! General templates with several placeholders are still executed by the
//! materializer; [`placeholders`] lists the columns they reference.
//!
//! ```
//! use ldwizard_rml::template::{self, Template};
//!
//! let text = template::render("http://ex.org/", "id");
//! assert_eq!(text, "http://ex.org/{id}");
//! assert_eq!(
//!     template::parse(&text),
//!     Some(Template::new("http://ex.org/", "id"))
//! );
//! assert_eq!(template::parse("noBraceHere"), None);
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^}]+)\}").expect("valid regex"));

/// A parsed `prefix{variable}` template
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Template {
    /// Text before the first `{`
    pub prefix: String,
    /// Content of the first `{...}` group
    pub variable: String,
}

impl Template {
    pub fn new(prefix: impl Into<String>, variable: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            variable: variable.into(),
        }
    }

    /// Render back to `prefix{variable}`
    pub fn render(&self) -> String {
        render(&self.prefix, &self.variable)
    }
}

impl std::fmt::Display for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{{{}}}", self.prefix, self.variable)
    }
}

/// Split a template at its first `{...}` group.
///
/// Returns `None` when there is no `{` followed by a `}`.
pub fn parse(text: &str) -> Option<Template> {
    let open = text.find('{')?;
    let close = open + 1 + text[open + 1..].find('}')?;
    Some(Template::new(&text[..open], &text[open + 1..close]))
}

/// Build `prefix{variable}`.
pub fn render(prefix: &str, variable: &str) -> String {
    let mut out = String::with_capacity(prefix.len() + variable.len() + 2);
    out.push_str(prefix);
    out.push('{');
    out.push_str(variable);
    out.push('}');
    out
}

/// Every `{column}` reference in `text`, in order of appearance.
pub fn placeholders(text: &str) -> Vec<&str> {
    PLACEHOLDER_RE
        .captures_iter(text)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// A template split into literal text and column references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Column(String),
}

/// Split `text` into alternating literal and column segments.
pub fn segments(text: &str) -> Vec<Segment> {
    let mut out = Vec::new();
    let mut last = 0;
    for cap in PLACEHOLDER_RE.captures_iter(text) {
        let (Some(whole), Some(column)) = (cap.get(0), cap.get(1)) else {
            continue;
        };
        if whole.start() > last {
            out.push(Segment::Text(text[last..whole.start()].to_string()));
        }
        out.push(Segment::Column(column.as_str().to_string()));
        last = whole.end();
    }
    if last < text.len() {
        out.push(Segment::Text(text[last..].to_string()));
    }
    out
}
