use regex::Regex;

/// Wildcard marker inside a message template.
pub const WILDCARD: &str = "%s";

/// A compiled message template.
///
/// The template is split on `%s`; every literal segment must appear verbatim
/// and in order, each `%s` matches any (possibly empty) run of characters, and
/// the whole text must be consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    pattern: String,
    segments: Vec<String>,
}

impl MessageTemplate {
    pub fn compile(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let segments = pattern.split(WILDCARD).map(String::from).collect();
        Self { pattern, segments }
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    pub fn has_wildcards(&self) -> bool {
        self.segments.len() > 1
    }

    pub fn matches(&self, text: &str) -> bool {
        let parts = &self.segments;
        let first = parts[0].as_str();
        if parts.len() == 1 {
            return first == text;
        }

        // First part must be a prefix
        if !text.starts_with(first) {
            return false;
        }
        let mut pos = first.len();

        // Last part must be a suffix that does not overlap the prefix
        let last = parts[parts.len() - 1].as_str();
        if !text.ends_with(last) || pos + last.len() > text.len() {
            return false;
        }
        let end = text.len() - last.len();

        // Middle parts must appear in order
        for part in &parts[1..parts.len() - 1] {
            if part.is_empty() {
                continue;
            }
            match text[pos..end].find(part.as_str()) {
                Some(found) => pos += found + part.len(),
                None => return false,
            }
        }

        true
    }
}

/// Check whether `text` satisfies `template`.
pub fn matches(template: &str, text: &str) -> bool {
    MessageTemplate::compile(template).matches(text)
}

/// Extracts `(code, text)` from messages of the form `KEY-####: text`.
#[derive(Debug, Clone)]
pub struct CodeParser {
    key: String,
    regex: Regex,
}

impl CodeParser {
    pub fn new(key: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!(r"^{}-([0-9]{{4}}): (.*)$", regex::escape(key)))?;
        Ok(Self {
            key: key.to_string(),
            regex,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns `None` for messages that do not follow the convention for this key.
    pub fn parse<'t>(&self, raw: &'t str) -> Option<(u16, &'t str)> {
        let captures = self.regex.captures(raw)?;
        let code = captures.get(1)?.as_str().parse().ok()?;
        let text = captures.get(2)?.as_str();
        Some((code, text))
    }
}
