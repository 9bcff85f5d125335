//! Compound selectors (`tag.class#id`, comma separated lists).
//!
//! Only single-element selectors are supported: no descendant or child
//! combinators, no attribute or pseudo-class matchers.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::node::Node;

/// Errors produced while parsing a selector string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// The selector (or one of its comma separated parts) was empty.
    #[error("Empty selector")]
    Empty,

    /// A character that cannot start or continue a selector part.
    #[error("Unexpected character '{ch}' at offset {offset} in selector '{selector}'")]
    UnexpectedChar {
        selector: String,
        ch: char,
        offset: usize,
    },

    /// `.` or `#` with no name after it.
    #[error("Missing name after '{marker}' in selector '{selector}'")]
    MissingName { selector: String, marker: char },

    /// Descendant or child combinators.
    #[error("Combinators are not supported in selector '{0}'")]
    Combinator(String),
}

/// One compound part: an optional tag, an optional id and any number of classes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn matches(&self, node: &Node) -> bool {
        if let Some(tag) = &self.tag {
            if !node.tag().eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if node.attribute("id") != Some(id.as_str()) {
                return false;
            }
        }
        self.classes.iter().all(|class| node.has_class(class))
    }
}

/// A parsed selector. Matches a node if any of its comma separated parts match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    alternatives: Vec<Compound>,
}

impl Selector {
    /// Parse a selector string.
    pub fn parse(source: &str) -> Result<Self, SelectorError> {
        let mut alternatives = Vec::new();
        for part in source.split(',') {
            alternatives.push(parse_compound(source, part.trim())?);
        }
        Ok(Self {
            source: source.to_string(),
            alternatives,
        })
    }

    /// Selector matching any element with the given class.
    pub fn class(class: impl Into<String>) -> Self {
        let class = class.into();
        Self {
            source: format!(".{class}"),
            alternatives: vec![Compound {
                classes: vec![class],
                ..Default::default()
            }],
        }
    }

    /// Selector matching any element with the given tag name.
    pub fn tag(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        Self {
            source: tag.clone(),
            alternatives: vec![Compound {
                tag: Some(tag),
                ..Default::default()
            }],
        }
    }

    /// Check whether a node matches this selector.
    pub fn matches(&self, node: &Node) -> bool {
        self.alternatives.iter().any(|c| c.matches(node))
    }

    /// The selector text as given (or synthesized for the shorthand constructors).
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn parse_compound(selector: &str, part: &str) -> Result<Compound, SelectorError> {
    if part.is_empty() {
        return Err(SelectorError::Empty);
    }
    if part.contains(|c: char| c.is_whitespace() || c == '>' || c == '+' || c == '~') {
        return Err(SelectorError::Combinator(selector.to_string()));
    }

    let mut compound = Compound::default();
    let chars: Vec<(usize, char)> = part.char_indices().collect();
    let mut i = 0;

    // Leading tag name or universal selector
    if chars[0].1 == '*' {
        i = 1;
    } else {
        let start = i;
        while i < chars.len() && is_name_char(chars[i].1) {
            i += 1;
        }
        if i > start {
            compound.tag = Some(collect(&chars[start..i]));
        }
    }

    while i < chars.len() {
        let (offset, marker) = chars[i];
        if marker != '.' && marker != '#' {
            return Err(SelectorError::UnexpectedChar {
                selector: selector.to_string(),
                ch: marker,
                offset,
            });
        }
        i += 1;
        let start = i;
        while i < chars.len() && is_name_char(chars[i].1) {
            i += 1;
        }
        if i == start {
            return Err(SelectorError::MissingName {
                selector: selector.to_string(),
                marker,
            });
        }
        let name = collect(&chars[start..i]);
        if marker == '.' {
            compound.classes.push(name);
        } else {
            compound.id = Some(name);
        }
    }

    Ok(compound)
}

fn collect(chars: &[(usize, char)]) -> String {
    chars.iter().map(|(_, c)| *c).collect()
}
