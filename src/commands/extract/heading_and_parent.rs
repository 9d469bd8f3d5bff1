use anyhow::{Context, Result};
use regex::Regex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct HeadingMatch {
    pub(super) section_id: String,
    pub(super) title: Option<String>,
}

#[derive(Debug)]
pub(super) struct HeadingMatcher {
    numeric_section: Regex,
}

impl HeadingMatcher {
    pub(super) fn new() -> Result<Self> {
        Ok(Self {
            numeric_section: Regex::new(r"^(\d+(?:\.\d+)*)\s*(.*)$")
                .context("failed to compile numeric section heading regex")?,
        })
    }

    // Any line that starts with a digit run is a heading, ids are not checked for order.
    pub(super) fn match_heading(&self, text: &str) -> Option<HeadingMatch> {
        let captures = self.numeric_section.captures(text)?;
        let section_id = captures.get(1)?.as_str().to_string();
        let title = captures
            .get(2)
            .map(|m| m.as_str().trim())
            .filter(|trailing| !trailing.is_empty())
            .map(ToOwned::to_owned);

        Some(HeadingMatch { section_id, title })
    }
}

pub(super) fn compute_parent_section(section_id: &str) -> String {
    match section_id.rsplit_once('.') {
        Some((parent, _)) => parent.to_string(),
        None => String::new(),
    }
}
