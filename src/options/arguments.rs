//! Optional arguments forwarded to the headless browser.
//!
//! The raw option string is split on every `,` before it reaches this module,
//! including commas that belong to a flag value such as
//! `--proxy-bypass-list=a.com,b.com`. [`ArgumentMerger`] walks the fragments
//! once and glues continuation fragments back onto the value they were cut
//! from.
//!
//! A fragment is classified by its shape alone:
//!
//! - `key=value` opens a new entry (key and value are trimmed, both must be
//!   non-empty);
//! - `--flag` without `=` is a boolean flag with an empty value;
//! - anything else continues the value of the entry being accumulated.
//!
//! The flag marker is only recognised at the start of a fragment, so a value
//! like `c/d--z--n--m/a` is a continuation. A continuation that itself
//! contains `=` cannot be told apart from a new entry and opens one.

use std::fmt;

use indexmap::IndexMap;
use log::debug;
use serde::Serialize;

const FLAG_MARKER: &str = "--";
const KEY_VALUE_SEPARATOR: char = '=';
const VALUE_SEPARATOR: char = ',';

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ArgumentMap {
    arguments: IndexMap<String, String>,
}

impl ArgumentMap {
    pub fn new() -> Self {
        Self {
            arguments: IndexMap::new(),
        }
    }

    /// Inserts or replaces an argument. Later values win.
    pub fn set(&mut self, key: &str, value: &str) {
        self.arguments.insert(key.to_string(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.arguments.get(key)
    }

    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.arguments.iter()
    }
}

/// Renders `key=value` fragments, or a bare `key` for boolean flags, joined by `,`.
impl fmt::Display for ArgumentMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.arguments.iter().enumerate() {
            if i > 0 {
                write!(f, "{VALUE_SEPARATOR}")?;
            }
            if value.is_empty() {
                f.write_str(key)?;
            } else {
                write!(f, "{key}{KEY_VALUE_SEPARATOR}{value}")?;
            }
        }
        Ok(())
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for ArgumentMap {
    fn from_iter<T: IntoIterator<Item = (&'a str, &'a str)>>(iter: T) -> Self {
        let mut map = ArgumentMap::new();
        for (key, value) in iter {
            map.set(key, value);
        }
        map
    }
}

#[derive(Debug, PartialEq)]
enum MergeState {
    Idle,
    Accumulating { key: String, value: String },
}

/// Effect a single fragment had on the merger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentOutcome {
    /// A `key=value` entry was opened and now accepts continuations.
    Opened,
    /// A boolean flag was recorded.
    Flag,
    /// The fragment was appended to the pending value.
    Continued,
    /// The fragment was empty, malformed, or had nothing to continue.
    Dropped,
}

/// Single-pass state machine rebuilding an [`ArgumentMap`] from fragments.
pub struct ArgumentMerger {
    state: MergeState,
    arguments: ArgumentMap,
}

impl Default for ArgumentMerger {
    fn default() -> Self {
        Self::new()
    }
}

impl ArgumentMerger {
    pub fn new() -> Self {
        Self {
            state: MergeState::Idle,
            arguments: ArgumentMap::new(),
        }
    }

    pub fn is_accumulating(&self) -> bool {
        matches!(self.state, MergeState::Accumulating { .. })
    }

    /// Moves the pending entry, if any, into the map and returns to idle.
    fn flush(&mut self) {
        if let MergeState::Accumulating { key, value } =
            std::mem::replace(&mut self.state, MergeState::Idle)
        {
            self.arguments.set(&key, &value);
        }
    }

    pub fn feed(&mut self, fragment: &str) -> FragmentOutcome {
        if fragment.is_empty() {
            return FragmentOutcome::Dropped;
        }

        if let Some((key, value)) = fragment.split_once(KEY_VALUE_SEPARATOR) {
            self.flush();

            let key = key.trim();
            let value = value.trim();
            let bare_key = key.strip_prefix(FLAG_MARKER).unwrap_or(key);
            if bare_key.is_empty() || value.is_empty() {
                debug!("dropping argument with empty key or value: {fragment:?}");
                return FragmentOutcome::Dropped;
            }

            self.state = MergeState::Accumulating {
                key: key.to_string(),
                value: value.to_string(),
            };
            return FragmentOutcome::Opened;
        }

        if fragment.trim_start().starts_with(FLAG_MARKER) {
            self.flush();

            let flag = fragment.trim();
            if flag == FLAG_MARKER {
                debug!("dropping bare flag marker");
                return FragmentOutcome::Dropped;
            }

            self.arguments.set(flag, "");
            return FragmentOutcome::Flag;
        }

        match &mut self.state {
            MergeState::Accumulating { value, .. } => {
                value.push(VALUE_SEPARATOR);
                value.push_str(fragment);
                FragmentOutcome::Continued
            }
            MergeState::Idle => {
                debug!("dropping argument fragment with nothing to continue: {fragment:?}");
                FragmentOutcome::Dropped
            }
        }
    }

    pub fn finish(mut self) -> ArgumentMap {
        self.flush();
        self.arguments
    }
}

/// Rebuilds headless browser arguments from comma-split fragments.
pub fn parse_headless_optional_arguments<I, S>(fragments: I) -> ArgumentMap
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut merger = ArgumentMerger::new();
    for fragment in fragments {
        merger.feed(fragment.as_ref());
    }
    merger.finish()
}
