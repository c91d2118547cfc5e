//! Strict URL syntax and scheme checking.
//!
//! WHATWG-style parsers accept a surprising amount of garbage
//! (`http:sdg.sdfg/` parses, whitespace gets percent-encoded away, empty
//! DNS labels slide through). This module layers structural rejection
//! rules on top of [`url::Url`] so that superficially scheme-like junk is
//! turned away before any network work happens. No I/O is performed here.

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::config::Options;

/// Leading scheme token, per RFC 3986 (`ALPHA *( ALPHA / DIGIT / "+" / "-" / "." ) ":"`)
static SCHEME_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").expect("scheme token pattern"));

/// A candidate string that survived the syntax checks.
///
/// Ephemeral: produced per validation call, never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedUrl {
    url: Url,
    scheme: String,
}

impl ParsedUrl {
    /// Scheme exactly as written in the candidate. The parser lowercases
    /// the scheme on its copy; scheme matching is case-sensitive, so the
    /// original spelling is kept alongside.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        // check() rejected host-less URLs before constructing this
        self.url.host_str().unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

/// Why the syntax checker turned a candidate away. Every variant maps to
/// the `invalid_url` error key; the distinction exists for logging and
/// tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxRejection {
    /// Embedded whitespace or control character
    Whitespace,
    /// Structurally malformed despite scheme-like tokens
    Malformed,
    /// Did not parse as an absolute URL
    Unparseable,
    /// Parsed, but without a non-empty host
    MissingHost,
    /// Host contains an empty DNS label (consecutive dots)
    EmptyHostLabel,
    /// Scheme is not in the configured allow-list
    SchemeNotAllowed,
}

/// Check a raw candidate string against the configured syntax rules.
pub fn check(raw: &str, options: &Options) -> Result<ParsedUrl, SyntaxRejection> {
    if raw
        .chars()
        .any(|c| c.is_whitespace() || c.is_ascii_control())
    {
        return Err(SyntaxRejection::Whitespace);
    }

    if !structurally_sound(raw) {
        return Err(SyntaxRejection::Malformed);
    }

    if has_empty_authority_label(raw) {
        return Err(SyntaxRejection::EmptyHostLabel);
    }

    let (url, scheme) = match Url::parse(raw) {
        Ok(url) => {
            let scheme = raw_scheme(raw).unwrap_or_else(|| url.scheme().to_string());
            (url, scheme)
        }
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            // Bare host/path; retry with the default scheme when configured
            let Some(default) = options.default_scheme() else {
                return Err(SyntaxRejection::Unparseable);
            };
            let retried = format!("{default}://{raw}");
            if !structurally_sound(&retried) {
                return Err(SyntaxRejection::Malformed);
            }
            if has_empty_authority_label(&retried) {
                return Err(SyntaxRejection::EmptyHostLabel);
            }
            debug!("retrying parse with default scheme: {retried}");
            let url = Url::parse(&retried).map_err(|_| SyntaxRejection::Unparseable)?;
            (url, default.to_string())
        }
        Err(err) => {
            debug!("URL parse failed: {err}");
            return Err(SyntaxRejection::Unparseable);
        }
    };

    if url.host_str().filter(|h| !h.is_empty()).is_none() {
        return Err(SyntaxRejection::MissingHost);
    }

    // Match against the scheme as written, not the parser's lowercased copy
    if !options.scheme_allowed(&scheme) {
        return Err(SyntaxRejection::SchemeNotAllowed);
    }

    Ok(ParsedUrl { url, scheme })
}

/// The scheme token exactly as it appears in the candidate, without the
/// trailing colon.
fn raw_scheme(candidate: &str) -> Option<String> {
    SCHEME_TOKEN
        .find(candidate)
        .map(|token| candidate[..token.end() - 1].to_string())
}

/// Structural rules a permissive parser would let slide: at most one `://`
/// separator, and any leading scheme token must be followed by `//`.
fn structurally_sound(candidate: &str) -> bool {
    if candidate.matches("://").count() > 1 {
        return false;
    }

    if let Some(token) = SCHEME_TOKEN.find(candidate) {
        let after_colon = &candidate[token.end()..];
        if !after_colon.starts_with("//") {
            return false;
        }
    }

    true
}

/// Consecutive dots in the authority produce an empty DNS label. The parser
/// normalizes rather than rejects these, so catch them on the raw text.
fn has_empty_authority_label(candidate: &str) -> bool {
    match candidate.split_once("://") {
        Some((_, rest)) => {
            let authority = rest.split(['/', '?', '#']).next().unwrap_or("");
            authority.contains("..")
        }
        None => false,
    }
}
