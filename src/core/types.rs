use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::fmt;

/// Symbolic error key describing why a value was rejected.
///
/// Keys are reported to the host framework as-is; mapping them to human
/// readable text (and localizing it) is the host's responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorKey {
    /// The value does not parse as a URL, or its scheme is not allowed
    InvalidUrl,
    /// Host reachability was requested and the transport got no response
    UrlNotAccessible,
    /// A response was received but its status code is unacceptable
    UrlInvalidResponse,
}

impl ErrorKey {
    /// The snake_case key the host framework interpolates into messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKey::InvalidUrl => "invalid_url",
            ErrorKey::UrlNotAccessible => "url_not_accessible",
            ErrorKey::UrlInvalidResponse => "url_invalid_response",
        }
    }
}

impl fmt::Display for ErrorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a single validation call.
#[derive(Debug, Clone, Copy, Eq)]
pub enum Outcome {
    /// The value was accepted
    Valid,
    /// The value was rejected with the given error key
    Invalid(ErrorKey),
}

impl Outcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, Outcome::Valid)
    }

    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    /// The error key for a rejection, `None` when the value was accepted.
    pub fn error_key(&self) -> Option<ErrorKey> {
        match self {
            Outcome::Valid => None,
            Outcome::Invalid(key) => Some(*key),
        }
    }
}

impl PartialEq for Outcome {
    fn eq(&self, other: &Self) -> bool {
        self.error_key() == other.error_key()
    }
}

impl Ord for Outcome {
    fn cmp(&self, other: &Self) -> Ordering {
        self.error_key().cmp(&other.error_key())
    }
}

impl PartialOrd for Outcome {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Valid => f.write_str("valid"),
            Outcome::Invalid(key) => write!(f, "invalid ({key})"),
        }
    }
}

/// Boundary through which the engine reports `(attribute, error key)` pairs.
///
/// The host record/object framework implements this to accumulate named
/// errors per field; [`Errors`] is a ready-made map-backed implementation.
pub trait ErrorSink {
    fn add(&mut self, attribute: &str, key: ErrorKey);
}

/// Map-backed error collector, keyed by attribute name.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Errors {
    entries: FxHashMap<String, Vec<ErrorKey>>,
}

impl Errors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys accumulated against one attribute, in insertion order.
    pub fn of(&self, attribute: &str) -> &[ErrorKey] {
        self.entries
            .get(attribute)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total number of accumulated error keys across all attributes.
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl ErrorSink for Errors {
    fn add(&mut self, attribute: &str, key: ErrorKey) {
        self.entries
            .entry(attribute.to_string())
            .or_default()
            .push(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_key_as_str() {
        assert_eq!(ErrorKey::InvalidUrl.as_str(), "invalid_url");
        assert_eq!(ErrorKey::UrlNotAccessible.as_str(), "url_not_accessible");
        assert_eq!(ErrorKey::UrlInvalidResponse.as_str(), "url_invalid_response");
    }

    #[test]
    fn test_error_key_display() {
        assert_eq!(ErrorKey::InvalidUrl.to_string(), "invalid_url");
    }

    #[test]
    fn test_outcome_accessors() {
        assert!(Outcome::Valid.is_valid());
        assert!(!Outcome::Valid.is_invalid());
        assert_eq!(Outcome::Valid.error_key(), None);

        let rejected = Outcome::Invalid(ErrorKey::InvalidUrl);
        assert!(rejected.is_invalid());
        assert_eq!(rejected.error_key(), Some(ErrorKey::InvalidUrl));
    }

    #[test]
    fn test_outcome_equality() {
        assert_eq!(Outcome::Valid, Outcome::Valid);
        assert_eq!(
            Outcome::Invalid(ErrorKey::UrlNotAccessible),
            Outcome::Invalid(ErrorKey::UrlNotAccessible)
        );
        assert_ne!(
            Outcome::Invalid(ErrorKey::UrlNotAccessible),
            Outcome::Invalid(ErrorKey::UrlInvalidResponse)
        );
        assert_ne!(Outcome::Valid, Outcome::Invalid(ErrorKey::InvalidUrl));
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(Outcome::Valid.to_string(), "valid");
        assert_eq!(
            Outcome::Invalid(ErrorKey::UrlInvalidResponse).to_string(),
            "invalid (url_invalid_response)"
        );
    }

    #[test]
    fn test_errors_accumulate_per_attribute() {
        let mut errors = Errors::new();
        assert!(errors.is_empty());
        assert_eq!(errors.of("field"), &[]);

        errors.add("field", ErrorKey::InvalidUrl);
        errors.add("field", ErrorKey::UrlNotAccessible);
        errors.add("other", ErrorKey::InvalidUrl);

        assert!(!errors.is_empty());
        assert_eq!(errors.len(), 3);
        assert_eq!(
            errors.of("field"),
            &[ErrorKey::InvalidUrl, ErrorKey::UrlNotAccessible]
        );
        assert_eq!(errors.of("other"), &[ErrorKey::InvalidUrl]);
        assert_eq!(errors.of("missing"), &[]);
    }

    #[test]
    fn test_errors_clear() {
        let mut errors = Errors::new();
        errors.add("field", ErrorKey::InvalidUrl);
        errors.clear();

        assert!(errors.is_empty());
        assert_eq!(errors.of("field"), &[]);
    }
}
