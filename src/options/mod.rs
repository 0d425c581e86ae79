use serde::Serialize;

pub mod arguments;
pub mod cookies;
pub mod error;
pub mod headers;

use arguments::ArgumentMap;
use cookies::CookieRecord;
use headers::HeaderMap;

/// Ordered fragments of user input, already split on top-level separators.
pub type RawEntrySequence = Vec<String>;

/// Splits every raw value on each occurrence of `separator`, in order.
///
/// This is the default segmentation step feeding the parsers. It knows
/// nothing about quoting, which is why [`arguments`] has to merge values
/// that contained the separator. An empty value yields one empty fragment.
pub fn segment<'a, S>(values: &'a [S], separator: char) -> impl Iterator<Item = &'a str> + 'a
where
    S: AsRef<str>,
{
    values
        .iter()
        .flat_map(move |value| value.as_ref().split(separator))
}

/// Raw option values as collected from the command line or a config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    pub custom_headers: RawEntrySequence,
    pub headless_optional_arguments: RawEntrySequence,
    pub load_cookies_browser: RawEntrySequence,
}

impl Options {
    pub fn parse_custom_headers(&self) -> HeaderMap {
        headers::parse_custom_headers(&self.custom_headers)
    }

    pub fn parse_headless_optional_arguments(&self) -> ArgumentMap {
        arguments::parse_headless_optional_arguments(&self.headless_optional_arguments)
    }

    pub fn parse_load_cookies_browser(&self) -> Vec<CookieRecord> {
        cookies::parse_load_cookies_browser(&self.load_cookies_browser)
    }

    pub fn parse_all(&self) -> ParsedOptions {
        ParsedOptions {
            headless_optional_arguments: self.parse_headless_optional_arguments(),
            custom_headers: self.parse_custom_headers(),
            cookies: self.parse_load_cookies_browser(),
        }
    }
}

/// Typed result of all three option parsers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedOptions {
    pub custom_headers: HeaderMap,
    pub headless_optional_arguments: ArgumentMap,
    pub cookies: Vec<CookieRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_splits_every_separator() {
        let values = vec!["a:b,c:d".to_string(), "e:f".to_string()];
        let fragments: Vec<&str> = segment(&values, ',').collect();
        assert_eq!(fragments, vec!["a:b", "c:d", "e:f"]);
    }

    #[test]
    fn segment_keeps_empty_fragment() {
        let fragments: Vec<&str> = segment(&[""], ',').collect();
        assert_eq!(fragments, vec![""]);
    }
}
