use thiserror::Error;

/// Failure signal for a single cookie line or attribute.
///
/// The option parsers never surface these to their callers directly: the
/// offending line or attribute is logged and dropped. [`parse_cookie_line`]
/// exposes them for callers that want to know why a line was rejected.
///
/// [`parse_cookie_line`]: crate::options::cookies::parse_cookie_line
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionError {
    #[error("cookie line {0:?} has no name=value pair")]
    MissingNameValue(String),

    #[error("invalid Expires date {0:?}")]
    InvalidExpires(String),

    #[error("invalid SameSite policy {0:?}")]
    InvalidSameSite(String),
}
