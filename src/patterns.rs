use anyhow::{Context, Result};
use regex::Regex;
use tracing::info;

use crate::stats::Browser;

/// Case-sensitive image suffixes, anchored at the end of the resource path.
const IMAGE_PATTERN: &str = r"^.*\.(?:jpg|png|gif)$";

/// User-agent tokens in alternation order. The leftmost token in the
/// user-agent string wins; at the same position the earlier entry wins.
pub const BROWSER_TOKENS: [(&str, Browser); 4] = [
    ("Firefox", Browser::Firefox),
    ("Chrome", Browser::Chrome),
    ("MSIE", Browser::InternetExplorer),
    ("Safari", Browser::Safari),
];

#[derive(Debug, Clone)]
pub struct Patterns {
    image: Regex,
    browser: Regex,
}

impl Patterns {
    pub fn compile() -> Result<Self> {
        let image = Regex::new(IMAGE_PATTERN).context("Failed to compile image pattern")?;

        let alternation = BROWSER_TOKENS
            .iter()
            .map(|(token, _)| regex::escape(token))
            .collect::<Vec<_>>()
            .join("|");
        let browser = Regex::new(&alternation).context("Failed to compile browser pattern")?;

        info!(
            action = "compiled",
            component = "patterns",
            browser_pattern = %browser,
            "Compiled classification patterns"
        );
        Ok(Self { image, browser })
    }

    pub fn is_image(&self, path: &str) -> bool {
        self.image.is_match(path)
    }

    pub fn classify_browser(&self, user_agent: &str) -> Option<Browser> {
        let matched = self.browser.find(user_agent)?.as_str();
        BROWSER_TOKENS
            .iter()
            .find(|(token, _)| *token == matched)
            .map(|(_, browser)| *browser)
    }
}
