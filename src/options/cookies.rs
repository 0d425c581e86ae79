//! Cookies preloaded into the headless browser.
//!
//! Every input line is one `Set-Cookie`-like string:
//!
//! ```text
//! foo=bar; Domain=example.com; Expires=Wed, 21 Oct 2015 07:28:00 GMT; Path=/; Secure; HttpOnly; SameSite=Lax
//! ```
//!
//! The first `;`-separated token is the mandatory `name=value` pair. The
//! remaining tokens are looked up by lowercased attribute name in
//! a static table that maps each known attribute to a typed setter.
//! Unknown attributes are ignored. A value that a setter cannot interpret is
//! logged and skipped, the rest of the line is still applied.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::UNIX_EPOCH;

use log::{debug, warn};
use once_cell::sync::Lazy;
use serde::Serialize;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::options::error::OptionError;

const ATTRIBUTE_SEPARATOR: char = ';';
const NAME_VALUE_SEPARATOR: char = '=';

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum SameSite {
    #[default]
    Unset,
    None,
    Lax,
    Strict,
}

impl SameSite {
    pub fn is_unset(&self) -> bool {
        *self == SameSite::Unset
    }

    pub fn as_str(&self) -> &str {
        match self {
            SameSite::Unset => "",
            SameSite::None => "None",
            SameSite::Lax => "Lax",
            SameSite::Strict => "Strict",
        }
    }
}

/// Policy names are matched case-sensitively.
impl FromStr for SameSite {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "None" => Ok(SameSite::None),
            "Lax" => Ok(SameSite::Lax),
            "Strict" => Ok(SameSite::Strict),
            _ => Err(OptionError::InvalidSameSite(s.to_string())),
        }
    }
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CookieRecord {
    pub name: String,
    pub value: String,
    pub domain: String,
    /// Seconds since the Unix epoch, 0 when the line carries no `Expires`.
    pub expires: i64,
    pub path: String,
    pub secure: bool,
    pub http_only: bool,
    #[serde(skip_serializing_if = "SameSite::is_unset")]
    pub same_site: SameSite,
}

impl CookieRecord {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            ..Default::default()
        }
    }
}

/// Renders the record as a cookie line, omitting empty attributes.
impl fmt::Display for CookieRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)?;
        if !self.domain.is_empty() {
            write!(f, "; Domain={}", self.domain)?;
        }
        if self.expires != 0 {
            write!(f, "; Expires={}", format_expires(self.expires)?)?;
        }
        if !self.path.is_empty() {
            write!(f, "; Path={}", self.path)?;
        }
        if self.secure {
            f.write_str("; Secure")?;
        }
        if self.http_only {
            f.write_str("; HttpOnly")?;
        }
        if !self.same_site.is_unset() {
            write!(f, "; SameSite={}", self.same_site)?;
        }
        Ok(())
    }
}

/// Typed setter for one cookie attribute.
enum AttributeSetter {
    Text(fn(&mut CookieRecord) -> &mut String),
    Epoch(fn(&mut CookieRecord) -> &mut i64),
    Flag(fn(&mut CookieRecord) -> &mut bool),
    Policy(fn(&mut CookieRecord) -> &mut SameSite),
}

impl AttributeSetter {
    fn apply(&self, cookie: &mut CookieRecord, value: Option<&str>) -> Result<(), OptionError> {
        let value = value.unwrap_or_default();
        match self {
            AttributeSetter::Text(field) => *field(cookie) = value.to_string(),
            AttributeSetter::Epoch(field) => *field(cookie) = parse_expires(value)?,
            AttributeSetter::Flag(field) => *field(cookie) = true,
            AttributeSetter::Policy(field) => *field(cookie) = value.parse()?,
        }
        Ok(())
    }
}

fn domain(c: &mut CookieRecord) -> &mut String {
    &mut c.domain
}

fn path(c: &mut CookieRecord) -> &mut String {
    &mut c.path
}

fn expires(c: &mut CookieRecord) -> &mut i64 {
    &mut c.expires
}

fn secure(c: &mut CookieRecord) -> &mut bool {
    &mut c.secure
}

fn http_only(c: &mut CookieRecord) -> &mut bool {
    &mut c.http_only
}

fn same_site(c: &mut CookieRecord) -> &mut SameSite {
    &mut c.same_site
}

/// Known attributes keyed by lowercased name.
static ATTRIBUTES: Lazy<HashMap<&'static str, AttributeSetter>> = Lazy::new(|| {
    HashMap::from([
        ("domain", AttributeSetter::Text(domain)),
        ("expires", AttributeSetter::Epoch(expires)),
        ("path", AttributeSetter::Text(path)),
        ("secure", AttributeSetter::Flag(secure)),
        ("httponly", AttributeSetter::Flag(http_only)),
        ("samesite", AttributeSetter::Policy(same_site)),
    ])
});

/// Parses an `Expires` date into epoch seconds.
///
/// HTTP dates (IMF-fixdate, RFC 850, asctime) go through `httpdate`. Anything
/// it rejects is retried as an RFC 1123 date with any zone, an unchecked
/// weekday, and years before 1970.
fn parse_expires(value: &str) -> Result<i64, OptionError> {
    let http_date = httpdate::parse_http_date(value)
        .ok()
        .and_then(|expires| expires.duration_since(UNIX_EPOCH).ok())
        .and_then(|since_epoch| i64::try_from(since_epoch.as_secs()).ok());

    http_date
        .or_else(|| parse_rfc1123(value))
        .ok_or_else(|| OptionError::InvalidExpires(value.to_string()))
}

fn parse_rfc1123(value: &str) -> Option<i64> {
    let date = value.split_once(',').map_or(value, |(_, rest)| rest).trim();
    let (date_time, zone) = date.rsplit_once(' ')?;

    let offset = zone_offset(zone)?;
    let date_time = PrimitiveDateTime::parse(
        date_time.trim_end(),
        format_description!("[day] [month repr:short] [year] [hour]:[minute]:[second]"),
    )
    .ok()?;

    Some(date_time.assume_offset(offset).unix_timestamp())
}

/// Numeric `+hhmm` offsets, US zone names, and any other alphabetic zone as UTC.
fn zone_offset(zone: &str) -> Option<UtcOffset> {
    if zone.starts_with(['+', '-']) {
        return UtcOffset::parse(
            zone,
            format_description!("[offset_hour sign:mandatory][offset_minute]"),
        )
        .ok();
    }

    let hours = match zone {
        "EDT" => -4,
        "EST" | "CDT" => -5,
        "CST" | "MDT" => -6,
        "MST" | "PDT" => -7,
        "PST" => -8,
        _ if !zone.is_empty() && zone.chars().all(|c| c.is_ascii_alphabetic()) => 0,
        _ => return None,
    };
    UtcOffset::from_hms(hours, 0, 0).ok()
}

/// Formats epoch seconds as an IMF-fixdate, including dates before 1970.
fn format_expires(expires: i64) -> Result<String, fmt::Error> {
    OffsetDateTime::from_unix_timestamp(expires)
        .map_err(|_| fmt::Error)?
        .format(format_description!(
            "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
        ))
        .map_err(|_| fmt::Error)
}

/// Parses one cookie line into a [`CookieRecord`].
///
/// Fails only when the first token has no `=`. Attribute errors are logged
/// and leave the corresponding field at its default.
pub fn parse_cookie_line(line: &str) -> Result<CookieRecord, OptionError> {
    let mut tokens = line.split(ATTRIBUTE_SEPARATOR).map(str::trim);

    let (name, value) = tokens
        .next()
        .and_then(|token| token.split_once(NAME_VALUE_SEPARATOR))
        .ok_or_else(|| OptionError::MissingNameValue(line.to_string()))?;
    let mut cookie = CookieRecord::new(name, value);

    for token in tokens.filter(|token| !token.is_empty()) {
        let (attribute, value) = match token.split_once(NAME_VALUE_SEPARATOR) {
            Some((attribute, value)) => (attribute.trim(), Some(value.trim())),
            None => (token, None),
        };

        let Some(setter) = ATTRIBUTES.get(attribute.to_ascii_lowercase().as_str()) else {
            debug!("ignoring unknown cookie attribute {attribute:?}");
            continue;
        };

        if let Err(err) = setter.apply(&mut cookie, value) {
            warn!("cookie {:?}: {err}, attribute ignored", cookie.name);
        }
    }

    Ok(cookie)
}

/// Parses one cookie per non-empty line, preserving input order.
pub fn parse_load_cookies_browser<I, S>(lines: I) -> Vec<CookieRecord>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut cookies = Vec::new();

    for line in lines {
        let line = line.as_ref();
        if line.trim().is_empty() {
            continue;
        }

        match parse_cookie_line(line) {
            Ok(cookie) => cookies.push(cookie),
            Err(err) => debug!("dropping cookie line: {err}"),
        }
    }

    cookies
}
