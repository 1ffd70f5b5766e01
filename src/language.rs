//! Language tags identifying the source and target of a translation run.

use anyhow::{bail, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

static TAG_REGEX: OnceLock<Regex> = OnceLock::new();

fn tag_regex() -> &'static Regex {
    TAG_REGEX.get_or_init(|| {
        Regex::new(r"^[A-Za-z]{2,3}(-[A-Za-z0-9]{1,8})*$").expect("language tag pattern is valid")
    })
}

/// A BCP-47-style language tag such as `en`, `es` or `zh-TW`.
///
/// Only the shape is checked (a 2-3 letter primary subtag followed by
/// optional alphanumeric subtags). Whether the translation service supports
/// the language is left to the service.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageTag(String);

impl LanguageTag {
    /// Parse and validate a tag.
    pub fn parse(tag: &str) -> Result<Self> {
        let tag = tag.trim();
        if tag.is_empty() {
            bail!("Language tag is empty");
        }
        if !tag_regex().is_match(tag) {
            bail!("Invalid language tag: '{}'", tag);
        }
        Ok(Self(tag.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for LanguageTag {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
