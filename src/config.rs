use log::warn;
use serde::Deserialize;

use crate::options::{Options, RawEntrySequence, segment};

pub const DEFAULT_CONFIG_PATH: &str = "crawlopts.toml";

/// Raw option strings as written in the TOML config file.
///
/// Each list entry is one value as the user typed it, e.g.
/// `"--proxy-bypass-list=a.com,b.com,--headless"`. Entries are segmented on
/// [`list_separator`](Self::list_separator) (headers, arguments) or
/// [`line_separator`](Self::line_separator) (cookies) before parsing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    pub custom_headers: Vec<String>,
    pub headless_optional_arguments: Vec<String>,
    pub load_cookies_browser: Vec<String>,

    pub list_separator: char,
    pub line_separator: char,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            custom_headers: Vec::new(),
            headless_optional_arguments: Vec::new(),
            load_cookies_browser: Vec::new(),

            list_separator: ',',
            line_separator: '\n',
        }
    }
}

impl CrawlConfig {
    pub fn from_file(path: &str) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                warn!("Fail to read {path}: {err}");
                warn!("Fall back to default config");
                return CrawlConfig::default();
            }
        };

        Self::from_toml(&content).unwrap_or_else(|err| {
            warn!("Fail to deserialize config file {path}: {err}");
            warn!("Fall back to default config");
            CrawlConfig::default()
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<CrawlConfig>(content)
    }

    /// Segments the raw strings into the fragment sequences the parsers expect.
    pub fn to_options(&self) -> Options {
        let fragments = |values: &[String], separator: char| -> RawEntrySequence {
            segment(values, separator).map(str::to_string).collect()
        };

        Options {
            custom_headers: fragments(&self.custom_headers, self.list_separator),
            headless_optional_arguments: fragments(
                &self.headless_optional_arguments,
                self.list_separator,
            ),
            load_cookies_browser: fragments(&self.load_cookies_browser, self.line_separator),
        }
    }
}
