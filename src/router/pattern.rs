//! Path template compilation.
//!
//! Route paths are written with named placeholders (`/products/{id}`) and
//! compiled once, at registration, into an anchored regex with one unnamed
//! capturing group per placeholder. Captures are handed to handlers
//! positionally, so the left-to-right order of the placeholders is the order
//! of the handler's arguments.

use regex::Regex;
use smallvec::SmallVec;
use std::fmt;

use super::RouteError;

/// Maximum number of path arguments before heap allocation.
/// MVC routes rarely carry more than two or three placeholders.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Captured placeholder values in left-to-right order.
pub type PathArgs = SmallVec<[String; MAX_INLINE_PARAMS]>;

/// What a placeholder is allowed to match: one or more ASCII alphanumerics.
const PLACEHOLDER_CAPTURE: &str = "([0-9a-zA-Z]+)";

/// A compiled path template.
#[derive(Debug, Clone)]
pub struct PathPattern {
    source: String,
    regex: Regex,
    names: Vec<String>,
}

impl PathPattern {
    /// Compile a path template.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::InvalidPattern`] when the template does not start
    /// with `/`, has unbalanced braces, an empty/invalid/repeated placeholder
    /// name, or two placeholders with no literal text between them.
    pub fn compile(pattern: &str) -> Result<Self, RouteError> {
        if !pattern.starts_with('/') {
            return Err(RouteError::pattern(pattern, "must start with '/'"));
        }

        let mut source = String::with_capacity(pattern.len() + 16);
        source.push('^');
        let mut names: Vec<String> = Vec::with_capacity(pattern.matches('{').count());
        let mut rest = pattern;
        let mut after_placeholder = false;

        while let Some(idx) = rest.find(['{', '}']) {
            let (literal, tail) = rest.split_at(idx);
            if tail.starts_with('}') {
                return Err(RouteError::pattern(pattern, "'}' without matching '{'"));
            }

            if !literal.is_empty() {
                source.push_str(&regex::escape(literal));
            } else if after_placeholder {
                return Err(RouteError::pattern(
                    pattern,
                    "adjacent placeholders need literal text between them",
                ));
            }

            let close = tail
                .find('}')
                .ok_or_else(|| RouteError::pattern(pattern, "unclosed '{'"))?;
            let name = &tail[1..close];
            validate_name(pattern, name)?;
            if names.iter().any(|n| n == name) {
                return Err(RouteError::pattern(
                    pattern,
                    format!("placeholder {{{name}}} appears more than once"),
                ));
            }

            source.push_str(PLACEHOLDER_CAPTURE);
            names.push(name.to_string());
            after_placeholder = true;
            rest = &tail[close + 1..];
        }

        source.push_str(&regex::escape(rest));
        source.push('$');

        let regex = Regex::new(&source).map_err(|source| RouteError::Regex {
            pattern: pattern.to_string(),
            source,
        })?;

        Ok(Self {
            source: pattern.to_string(),
            regex,
            names,
        })
    }

    /// The template as it was registered.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The anchored regex the template compiled to.
    #[must_use]
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Placeholder names in left-to-right order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn placeholder_count(&self) -> usize {
        self.names.len()
    }

    /// Match `path` against the whole template and return the captures.
    ///
    /// The whole-match group is dropped; the result holds exactly one value
    /// per placeholder, in placeholder order.
    #[must_use]
    pub fn captures(&self, path: &str) -> Option<PathArgs> {
        let caps = self.regex.captures(path)?;
        Some(
            caps.iter()
                .skip(1)
                .flatten()
                .map(|m| m.as_str().to_string())
                .collect(),
        )
    }

    #[must_use]
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn validate_name(pattern: &str, name: &str) -> Result<(), RouteError> {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Err(RouteError::pattern(pattern, "empty placeholder name"));
    };
    let valid = (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(RouteError::pattern(
            pattern,
            format!("invalid placeholder name {name:?}"),
        ))
    }
}
