//! Custom HTTP headers supplied on the command line.
//!
//! Each fragment has the shape `name:value` and is split on the first `:`.
//! Names and values are kept as raw strings, case-sensitive as given, without
//! validation of which headers are allowed.
//!
//! Headers are stored in an ordered map so that serializing them back yields
//! the same order the user typed them in.

use std::fmt;

use indexmap::IndexMap;
use log::debug;
use serde::Serialize;

const HEADER_SEPARATOR: char = ':';

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HeaderMap {
    headers: IndexMap<String, String>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self {
            headers: IndexMap::new(),
        }
    }

    pub fn set_raw(&mut self, name: &str, value: &str) {
        self.headers.insert(name.to_string(), value.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&String> {
        self.headers.get(name)
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.headers.iter()
    }
}

/// Renders the headers back into `name:value` fragments joined by `,`.
impl fmt::Display for HeaderMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.headers.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{name}{HEADER_SEPARATOR}{value}")?;
        }
        Ok(())
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for HeaderMap {
    fn from_iter<T: IntoIterator<Item = (&'a str, &'a str)>>(iter: T) -> Self {
        let mut map = HeaderMap::new();
        for (name, value) in iter {
            map.set_raw(name, value);
        }
        map
    }
}

/// Builds a [`HeaderMap`] from `name:value` fragments.
///
/// Empty fragments and fragments without a `:` are skipped. Spaces around the
/// name and the value are trimmed; an empty value is kept.
pub fn parse_custom_headers<I, S>(fragments: I) -> HeaderMap
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut headers = HeaderMap::new();

    for fragment in fragments {
        let fragment = fragment.as_ref();
        if fragment.is_empty() {
            continue;
        }

        let Some((name, value)) = fragment.split_once(HEADER_SEPARATOR) else {
            debug!("skipping header fragment without separator: {fragment:?}");
            continue;
        };

        headers.set_raw(name.trim_matches(' '), value.trim_matches(' '));
    }

    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fragment_gives_empty_map() {
        assert!(parse_custom_headers([""]).is_empty());
        assert!(parse_custom_headers(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn splits_on_first_separator_only() {
        let headers = parse_custom_headers(["Referer:https://example.com:8443/a"]);
        assert_eq!(
            headers.get("Referer").map(String::as_str),
            Some("https://example.com:8443/a")
        );
    }

    #[test]
    fn keeps_empty_value() {
        let headers = parse_custom_headers(["a:"]);
        assert_eq!(headers, HeaderMap::from_iter([("a", "")]));
    }

    #[test]
    fn trims_spaces_and_keeps_case() {
        let headers = parse_custom_headers(["X-Token: abc ", "x-token:def"]);
        assert_eq!(headers.get("X-Token").map(String::as_str), Some("abc"));
        assert_eq!(headers.get("x-token").map(String::as_str), Some("def"));
    }

    #[test]
    fn skips_fragment_without_separator() {
        let headers = parse_custom_headers(["garbage", "a:b"]);
        assert_eq!(headers, HeaderMap::from_iter([("a", "b")]));
    }

    #[test]
    fn iterates_in_first_insertion_order() {
        let headers = parse_custom_headers(["b:1", "a:2", "b:3"]);
        let pairs: Vec<(&str, &str)> = headers
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect();
        assert_eq!(pairs, vec![("b", "3"), ("a", "2")]);
    }

    #[test]
    fn stringify_preserves_insertion_order() {
        let headers = parse_custom_headers(["c:d", "a:b"]);
        assert_eq!(headers.to_string(), "c:d,a:b");
    }
}
