//! Parsed path templates such as `/users/{id}/posts/{post_id}`.

/// One piece of a path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text copied verbatim into the URL.
    Literal(String),
    /// A `{name}` placeholder, stored without braces.
    Placeholder(String),
}

/// A path template split into literals and placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl PathTemplate {
    /// Parse a template. Returns `None` for unbalanced, nested or empty braces.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = raw.chars();

        while let Some(c) = chars.next() {
            match c {
                '{' => {
                    let mut name = String::new();
                    loop {
                        match chars.next()? {
                            '}' => break,
                            '{' => return None,
                            other => name.push(other),
                        }
                    }
                    if name.is_empty() {
                        return None;
                    }
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Placeholder(name));
                }
                '}' => return None,
                other => literal.push(other),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Some(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// The template as written in the description.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Placeholder names in template order.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Rename every occurrence of a placeholder. Used to align placeholder
    /// spelling with the declared parameter when matching is case-insensitive.
    pub(crate) fn rename_placeholder(&mut self, from: &str, to: &str) {
        for segment in &mut self.segments {
            if let Segment::Placeholder(name) = segment {
                if name == from {
                    *name = to.to_string();
                }
            }
        }
    }
}

impl std::fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}
