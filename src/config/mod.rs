//! Validator options: an immutable, validated bundle of configuration.
//!
//! Options are resolved fully at construction time, either through the
//! typed [`OptionsBuilder`] or from a TOML file. Nothing is re-interpreted
//! between validation calls.

use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::core::{Result, UrlValidatorError};
use crate::response::ResponseSpec;
use crate::transport::Request;

/// Hook invoked with the outgoing request immediately before it is sent.
pub type RequestCallback = Arc<dyn Fn(&Request) + Send + Sync>;

/// Scheme allow-list: unrestricted, or an ordered set of scheme names
/// matched case-sensitively against the parsed scheme.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SchemeList {
    #[default]
    Any,
    Of(Vec<String>),
}

impl SchemeList {
    pub fn allows(&self, scheme: &str) -> bool {
        match self {
            SchemeList::Any => true,
            SchemeList::Of(schemes) => schemes.iter().any(|s| s == scheme),
        }
    }
}

impl From<&str> for SchemeList {
    fn from(scheme: &str) -> Self {
        SchemeList::Of(vec![scheme.to_string()])
    }
}

impl From<String> for SchemeList {
    fn from(scheme: String) -> Self {
        SchemeList::Of(vec![scheme])
    }
}

impl From<Vec<String>> for SchemeList {
    fn from(schemes: Vec<String>) -> Self {
        SchemeList::Of(schemes)
    }
}

impl From<Vec<&str>> for SchemeList {
    fn from(schemes: Vec<&str>) -> Self {
        SchemeList::Of(schemes.into_iter().map(String::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for SchemeList {
    fn from(schemes: [&str; N]) -> Self {
        SchemeList::Of(schemes.iter().map(|s| s.to_string()).collect())
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawSchemeList {
    One(String),
    Many(Vec<String>),
}

impl<'de> Deserialize<'de> for SchemeList {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(match RawSchemeList::deserialize(deserializer)? {
            RawSchemeList::One(scheme) => SchemeList::from(scheme),
            RawSchemeList::Many(schemes) => SchemeList::Of(schemes),
        })
    }
}

/// Host reachability policy: never probe, always probe, or probe only for
/// URLs whose scheme is in the given set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HostCheck {
    #[default]
    Never,
    Always,
    Schemes(Vec<String>),
}

impl HostCheck {
    /// Whether host reachability should be asserted for this scheme.
    pub fn wants(&self, scheme: &str) -> bool {
        match self {
            HostCheck::Never => false,
            HostCheck::Always => true,
            HostCheck::Schemes(schemes) => schemes.iter().any(|s| s == scheme),
        }
    }

    /// Whether this policy scopes probing to a scheme subset.
    pub fn is_scheme_scoped(&self) -> bool {
        matches!(self, HostCheck::Schemes(_))
    }
}

impl From<bool> for HostCheck {
    fn from(flag: bool) -> Self {
        if flag { HostCheck::Always } else { HostCheck::Never }
    }
}

impl From<&str> for HostCheck {
    fn from(scheme: &str) -> Self {
        HostCheck::Schemes(vec![scheme.to_string()])
    }
}

impl From<Vec<String>> for HostCheck {
    fn from(schemes: Vec<String>) -> Self {
        HostCheck::Schemes(schemes)
    }
}

impl From<Vec<&str>> for HostCheck {
    fn from(schemes: Vec<&str>) -> Self {
        HostCheck::Schemes(schemes.into_iter().map(String::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for HostCheck {
    fn from(schemes: [&str; N]) -> Self {
        HostCheck::Schemes(schemes.iter().map(|s| s.to_string()).collect())
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawHostCheck {
    Flag(bool),
    One(String),
    Many(Vec<String>),
}

impl<'de> Deserialize<'de> for HostCheck {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(match RawHostCheck::deserialize(deserializer)? {
            RawHostCheck::Flag(flag) => HostCheck::from(flag),
            RawHostCheck::One(scheme) => HostCheck::Schemes(vec![scheme]),
            RawHostCheck::Many(schemes) => HostCheck::Schemes(schemes),
        })
    }
}

/// The full option set recognized by the engine.
#[derive(Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Host-record field(s) this validator is attached to; owned by the
    /// host framework, stored and exposed as-is
    attributes: Vec<String>,

    /// Accept a nil value without further checks
    allow_nil: bool,

    /// Accept an empty/whitespace-only value without further checks
    allow_blank: bool,

    /// Scheme allow-list
    scheme: SchemeList,

    /// Scheme to retry with when the input parses as a bare host/path
    default_scheme: Option<String>,

    /// Host reachability policy
    check_host: HostCheck,

    /// Response acceptability specification; `None` disables path checks
    check_path: Option<ResponseSpec>,

    /// Probe with HEAD instead of GET
    use_head_requests: bool,

    /// Transport adapter identifier; defaults to the reqwest adapter
    adapter: Option<String>,

    /// Pre-send inspection hook; not loadable from a file
    #[serde(skip)]
    request_callback: Option<RequestCallback>,
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("attributes", &self.attributes)
            .field("allow_nil", &self.allow_nil)
            .field("allow_blank", &self.allow_blank)
            .field("scheme", &self.scheme)
            .field("default_scheme", &self.default_scheme)
            .field("check_host", &self.check_host)
            .field("check_path", &self.check_path)
            .field("use_head_requests", &self.use_head_requests)
            .field("adapter", &self.adapter)
            .field(
                "request_callback",
                &self.request_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl Options {
    pub fn builder() -> OptionsBuilder {
        OptionsBuilder::default()
    }

    /// Load options from a TOML file. Unknown keys are rejected, and the
    /// loaded values go through the same validation as the builder.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let options: Options = toml::from_str(&content)?;
        options.validate()?;
        Ok(options)
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn allow_nil(&self) -> bool {
        self.allow_nil
    }

    pub fn allow_blank(&self) -> bool {
        self.allow_blank
    }

    pub fn scheme(&self) -> &SchemeList {
        &self.scheme
    }

    pub fn default_scheme(&self) -> Option<&str> {
        self.default_scheme.as_deref()
    }

    pub fn check_host(&self) -> &HostCheck {
        &self.check_host
    }

    pub fn check_path(&self) -> Option<&ResponseSpec> {
        self.check_path.as_ref()
    }

    pub fn use_head_requests(&self) -> bool {
        self.use_head_requests
    }

    pub fn adapter(&self) -> Option<&str> {
        self.adapter.as_deref()
    }

    pub fn request_callback(&self) -> Option<&RequestCallback> {
        self.request_callback.as_ref()
    }

    /// Whether the parsed scheme passes the allow-list.
    pub fn scheme_allowed(&self, scheme: &str) -> bool {
        self.scheme.allows(scheme)
    }

    /// Whether host reachability should be asserted for this scheme.
    pub fn should_check_host(&self, scheme: &str) -> bool {
        self.check_host.wants(scheme)
    }

    fn validate(&self) -> Result<()> {
        if let SchemeList::Of(schemes) = &self.scheme {
            if schemes.is_empty() {
                return Err(UrlValidatorError::Config(
                    "scheme list must not be empty".to_string(),
                ));
            }
            for scheme in schemes {
                if !is_scheme_token(scheme) {
                    return Err(UrlValidatorError::Config(format!(
                        "invalid scheme name: {scheme:?}"
                    )));
                }
            }
        }

        if let HostCheck::Schemes(schemes) = &self.check_host {
            if schemes.is_empty() {
                return Err(UrlValidatorError::Config(
                    "check_host scheme list must not be empty".to_string(),
                ));
            }
        }

        if let Some(scheme) = &self.default_scheme
            && !is_scheme_token(scheme)
        {
            return Err(UrlValidatorError::Config(format!(
                "invalid default_scheme: {scheme:?}"
            )));
        }

        Ok(())
    }
}

/// A scheme name per RFC 3986: ALPHA followed by ALPHA / DIGIT / "+" / "-" / "."
fn is_scheme_token(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        _ => false,
    }
}

/// Typed builder enumerating every recognized option with its default.
#[derive(Default)]
pub struct OptionsBuilder {
    options: Options,
}

impl OptionsBuilder {
    pub fn attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.attributes = attributes.into_iter().map(Into::into).collect();
        self
    }

    pub fn allow_nil(mut self, allow: bool) -> Self {
        self.options.allow_nil = allow;
        self
    }

    pub fn allow_blank(mut self, allow: bool) -> Self {
        self.options.allow_blank = allow;
        self
    }

    pub fn scheme<S: Into<SchemeList>>(mut self, scheme: S) -> Self {
        self.options.scheme = scheme.into();
        self
    }

    pub fn default_scheme<S: Into<String>>(mut self, scheme: S) -> Self {
        self.options.default_scheme = Some(scheme.into());
        self
    }

    pub fn check_host<H: Into<HostCheck>>(mut self, check: H) -> Self {
        self.options.check_host = check.into();
        self
    }

    pub fn check_path<S: Into<ResponseSpec>>(mut self, spec: S) -> Self {
        self.options.check_path = Some(spec.into());
        self
    }

    pub fn use_head_requests(mut self, use_head: bool) -> Self {
        self.options.use_head_requests = use_head;
        self
    }

    pub fn adapter<S: Into<String>>(mut self, id: S) -> Self {
        self.options.adapter = Some(id.into());
        self
    }

    pub fn request_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Request) + Send + Sync + 'static,
    {
        self.options.request_callback = Some(Arc::new(callback));
        self
    }

    /// Validate and freeze the option set.
    pub fn build(self) -> Result<Options> {
        self.options.validate()?;
        Ok(self.options)
    }
}
