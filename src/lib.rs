//! Parsers turning comma/newline-separated command-line values into typed
//! crawler options: custom HTTP headers, headless browser arguments and
//! preloaded browser cookies.
//!
//! All parsers are pure functions over an already segmented fragment
//! sequence (see [`options::segment`]). Malformed fragments are dropped and
//! logged through the [`log`] facade, never returned as errors.

pub mod config;
pub mod options;

pub use options::arguments::{ArgumentMap, parse_headless_optional_arguments};
pub use options::cookies::{CookieRecord, SameSite, parse_cookie_line, parse_load_cookies_browser};
pub use options::error::OptionError;
pub use options::headers::{HeaderMap, parse_custom_headers};
pub use options::{Options, ParsedOptions, RawEntrySequence, segment};
