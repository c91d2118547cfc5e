use log::debug;
use std::sync::Arc;

use crate::config::Options;
use crate::core::{ErrorKey, ErrorSink, Outcome, Result};
use crate::syntax;
use crate::transport::{self, Transport};
use crate::validation::reachability;

/// The validation engine.
///
/// Immutable after construction; a single instance may serve concurrent
/// `validate` calls from multiple tasks. The transport adapter is resolved
/// once, at construction, so an unknown adapter identifier fails fast
/// instead of surfacing mid-validation.
pub struct UrlValidator {
    options: Options,
    transport: Arc<dyn Transport>,
}

impl UrlValidator {
    pub fn new(options: Options) -> Result<Self> {
        let adapter = options.adapter().unwrap_or(transport::DEFAULT_ADAPTER);
        let transport = transport::resolve(adapter)?;

        Ok(Self { options, transport })
    }

    /// Construct with an explicit transport, bypassing the registry.
    pub fn with_transport(options: Options, transport: Arc<dyn Transport>) -> Self {
        Self { options, transport }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Validate one candidate value. `None` models a nil field.
    pub async fn validate(&self, value: Option<&str>) -> Outcome {
        if value.is_none() && self.options.allow_nil() {
            return Outcome::Valid;
        }

        let raw = value.unwrap_or_default();
        let blank = raw.trim().is_empty();
        if blank && self.options.allow_blank() {
            return Outcome::Valid;
        }

        let parsed = match syntax::check(raw, &self.options) {
            Ok(parsed) => parsed,
            Err(rejection) => {
                debug!("rejected {raw:?}: {rejection:?}");
                return Outcome::Invalid(ErrorKey::InvalidUrl);
            }
        };

        match reachability::check(&parsed, &self.options, self.transport.as_ref()).await {
            Some(key) => Outcome::Invalid(key),
            None => Outcome::Valid,
        }
    }

    /// Validate and report any rejection as an `(attribute, error key)`
    /// pair to the host's error collector.
    pub async fn validate_each<S: ErrorSink>(
        &self,
        errors: &mut S,
        attribute: &str,
        value: Option<&str>,
    ) -> Outcome {
        let outcome = self.validate(value).await;
        if let Some(key) = outcome.error_key() {
            errors.add(attribute, key);
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Errors;
    use crate::core::UrlValidatorError;
    use crate::transport::{Request, TransportError};
    use async_trait::async_trait;
    use serial_test::serial;

    struct NoTransport;

    #[async_trait]
    impl Transport for NoTransport {
        async fn send(&self, _request: &Request) -> std::result::Result<u16, TransportError> {
            panic!("no network request expected");
        }
    }

    fn offline_validator(options: Options) -> UrlValidator {
        UrlValidator::with_transport(options, Arc::new(NoTransport))
    }

    #[tokio::test]
    async fn test_allow_nil() {
        let validator =
            offline_validator(Options::builder().allow_nil(true).build().unwrap());

        assert!(validator.validate(None).await.is_valid());
    }

    #[tokio::test]
    async fn test_nil_without_allow_nil_is_invalid_url() {
        let validator = offline_validator(Options::builder().build().unwrap());

        assert_eq!(
            validator.validate(None).await,
            Outcome::Invalid(ErrorKey::InvalidUrl)
        );
    }

    #[tokio::test]
    async fn test_allow_blank() {
        let validator =
            offline_validator(Options::builder().allow_blank(true).build().unwrap());

        assert!(validator.validate(Some("")).await.is_valid());
        assert!(validator.validate(Some("   ")).await.is_valid());
        // Blank covers nil as well
        assert!(validator.validate(None).await.is_valid());
    }

    #[tokio::test]
    async fn test_blank_without_allow_blank_is_invalid_url() {
        let validator = offline_validator(Options::builder().build().unwrap());

        assert_eq!(
            validator.validate(Some("")).await,
            Outcome::Invalid(ErrorKey::InvalidUrl)
        );
    }

    #[tokio::test]
    async fn test_syntax_failure_stops_before_reachability() {
        // NoTransport panics on any request, so this also proves no
        // network call happens for a syntactically invalid value
        let validator = offline_validator(
            Options::builder()
                .check_host(true)
                .check_path(404)
                .build()
                .unwrap(),
        );

        assert_eq!(
            validator.validate(Some("http://foo bar baz")).await,
            Outcome::Invalid(ErrorKey::InvalidUrl)
        );
    }

    #[tokio::test]
    async fn test_no_check_host_means_no_request() {
        let validator = offline_validator(Options::builder().build().unwrap());

        assert!(
            validator
                .validate(Some("http://www.invalid.tld"))
                .await
                .is_valid()
        );
    }

    #[tokio::test]
    async fn test_validate_each_reports_to_sink() {
        let validator = offline_validator(Options::builder().build().unwrap());
        let mut errors = Errors::new();

        let outcome = validator
            .validate_each(&mut errors, "field", Some("not a url"))
            .await;

        assert!(outcome.is_invalid());
        assert_eq!(errors.of("field"), &[ErrorKey::InvalidUrl]);
    }

    #[tokio::test]
    async fn test_validate_each_leaves_sink_untouched_on_success() {
        let validator = offline_validator(Options::builder().build().unwrap());
        let mut errors = Errors::new();

        let outcome = validator
            .validate_each(&mut errors, "field", Some("http://www.apple.com"))
            .await;

        assert!(outcome.is_valid());
        assert!(errors.is_empty());
    }

    #[test]
    #[serial]
    fn test_new_resolves_default_adapter() {
        let validator = UrlValidator::new(Options::builder().build().unwrap());
        assert!(validator.is_ok());
    }

    #[test]
    #[serial]
    fn test_new_rejects_unknown_adapter() {
        let options = Options::builder().adapter("httpi").build().unwrap();
        let result = UrlValidator::new(options);

        assert!(matches!(result, Err(UrlValidatorError::UnknownAdapter(_))));
    }
}
