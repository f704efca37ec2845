//! Slash-delimited regex literals
//!
//! Pattern records store their regex as `/body/flags` text. A literal is
//! parsed into a body and a flag set only when two differing patterns have to
//! be combined, and written back out once.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex_lite::Regex;

use crate::error::LiteralError;

/// Flags assumed for a literal that carries none.
pub const DEFAULT_FLAGS: &str = "gi";

/// Flag characters accepted by the ECMAScript regex engine.
pub const SUPPORTED_FLAGS: &[char] = &['d', 'g', 'i', 'm', 's', 'u', 'v', 'y'];

/// Supported flags as one string, e.g. for error messages.
pub fn supported_flags() -> String {
    SUPPORTED_FLAGS.iter().collect()
}

fn literal_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Greedy body: the flag suffix starts after the last slash.
    RE.get_or_init(|| Regex::new(r"^/(?s:(.*))/([A-Za-z]*)$").unwrap())
}

/// Ordered, de-duplicated set of regex flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flags(Vec<char>);

impl Flags {
    /// Parse a flag suffix, rejecting characters the engine does not know.
    pub fn parse(raw: &str) -> Result<Self, LiteralError> {
        let mut flags = Flags::default();
        for flag in raw.chars() {
            if !SUPPORTED_FLAGS.contains(&flag) {
                return Err(LiteralError::UnsupportedFlag(flag));
            }
            flags.insert(flag);
        }
        Ok(flags)
    }

    /// Insert a flag, returning false if it was already present.
    pub fn insert(&mut self, flag: char) -> bool {
        if self.0.contains(&flag) {
            return false;
        }
        self.0.push(flag);
        true
    }

    /// Union in first-seen order: `self`'s flags, then new flags from `other`.
    pub fn union(&self, other: &Flags) -> Flags {
        let mut merged = self.clone();
        for &flag in &other.0 {
            merged.insert(flag);
        }
        merged
    }

    pub fn contains(&self, flag: char) -> bool {
        self.0.contains(&flag)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for flag in &self.0 {
            write!(f, "{}", flag)?;
        }
        Ok(())
    }
}

/// A regex literal split into body and flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegexLiteral {
    body: String,
    flags: Flags,
}

impl RegexLiteral {
    pub fn new(body: impl Into<String>, flags: Flags) -> Self {
        Self {
            body: body.into(),
            flags,
        }
    }

    /// Parse `/body/flags`.
    ///
    /// Text without a closing delimiter is not an error: everything after an
    /// optional leading `/` becomes the body. A missing or empty flag suffix
    /// falls back to [`DEFAULT_FLAGS`].
    pub fn parse(text: &str) -> Result<Self, LiteralError> {
        let (body, raw_flags) = match literal_re().captures(text) {
            Some(caps) => (
                caps.get(1).map_or("", |m| m.as_str()),
                caps.get(2).map_or("", |m| m.as_str()),
            ),
            None => (text.strip_prefix('/').unwrap_or(text), ""),
        };

        let flags = if raw_flags.is_empty() {
            Flags::parse(DEFAULT_FLAGS)?
        } else {
            Flags::parse(raw_flags)?
        };

        Ok(Self::new(body, flags))
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn flags(&self) -> &Flags {
        &self.flags
    }

    /// Alternation matching either literal: `(a)|(b)` with unioned flags.
    pub fn union(&self, other: &RegexLiteral) -> RegexLiteral {
        RegexLiteral {
            body: format!("({})|({})", self.body, other.body),
            flags: self.flags.union(&other.flags),
        }
    }
}

impl FromStr for RegexLiteral {
    type Err = LiteralError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RegexLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.body, self.flags)
    }
}
