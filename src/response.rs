//! Response acceptability matching for path checks.
//!
//! A path-check specification describes which HTTP status codes should
//! fail validation. The heterogeneous shapes accepted in configuration
//! (boolean, code, symbolic name, range, or a mixed collection) collapse
//! into the [`ResponseSpec`] tagged union; matching is a pure function of
//! the received status code.

use serde::Deserialize;
use std::ops::RangeInclusive;

use crate::core::status::{CLIENT_ERROR_FLOOR, SERVER_ERROR_CEILING, code_for_name};
use crate::core::{Result, UrlValidatorError};

/// Specification of unacceptable response codes for a path check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseSpec {
    /// Any 4xx or 5xx status is unacceptable (the boolean `true` form)
    ClientOrServerError,
    /// Exactly this status code is unacceptable
    Code(u16),
    /// Any status within this inclusive range is unacceptable
    Range(RangeInclusive<u16>),
    /// Unacceptable when any element matches; codes, names, and ranges mix freely
    AnyOf(Vec<ResponseSpec>),
}

impl ResponseSpec {
    /// Resolve a symbolic status name (`"not_found"`, `"unauthorized"`, ...)
    /// to a concrete [`ResponseSpec::Code`].
    pub fn named(name: &str) -> Result<Self> {
        code_for_name(name)
            .map(ResponseSpec::Code)
            .ok_or_else(|| UrlValidatorError::UnknownStatusName(name.to_string()))
    }

    /// Whether `status` should fail validation under this specification.
    pub fn unacceptable(&self, status: u16) -> bool {
        match self {
            ResponseSpec::ClientOrServerError => {
                (CLIENT_ERROR_FLOOR..=SERVER_ERROR_CEILING).contains(&status)
            }
            ResponseSpec::Code(code) => status == *code,
            ResponseSpec::Range(range) => range.contains(&status),
            ResponseSpec::AnyOf(specs) => specs.iter().any(|spec| spec.unacceptable(status)),
        }
    }
}

impl From<u16> for ResponseSpec {
    fn from(code: u16) -> Self {
        ResponseSpec::Code(code)
    }
}

impl From<RangeInclusive<u16>> for ResponseSpec {
    fn from(range: RangeInclusive<u16>) -> Self {
        ResponseSpec::Range(range)
    }
}

impl From<Vec<ResponseSpec>> for ResponseSpec {
    fn from(specs: Vec<ResponseSpec>) -> Self {
        ResponseSpec::AnyOf(specs)
    }
}

impl<const N: usize> From<[ResponseSpec; N]> for ResponseSpec {
    fn from(specs: [ResponseSpec; N]) -> Self {
        ResponseSpec::AnyOf(specs.into())
    }
}

/// Raw configuration-file shapes, mirrored from the option surface:
/// `true`, `404`, `"not_found"`, `{ min = 400, max = 499 }`, or an array
/// mixing any of those.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawSpec {
    Flag(bool),
    Code(u16),
    Name(String),
    Range { min: u16, max: u16 },
    Many(Vec<RawSpec>),
}

impl TryFrom<RawSpec> for ResponseSpec {
    type Error = UrlValidatorError;

    fn try_from(raw: RawSpec) -> Result<Self> {
        match raw {
            RawSpec::Flag(true) => Ok(ResponseSpec::ClientOrServerError),
            RawSpec::Flag(false) => Err(UrlValidatorError::Config(
                "check_path = false is not a valid specification; omit the key to disable path checks"
                    .to_string(),
            )),
            RawSpec::Code(code) => Ok(ResponseSpec::Code(code)),
            RawSpec::Name(name) => ResponseSpec::named(&name),
            RawSpec::Range { min, max } => Ok(ResponseSpec::Range(min..=max)),
            RawSpec::Many(raw_specs) => raw_specs
                .into_iter()
                .map(ResponseSpec::try_from)
                .collect::<Result<Vec<_>>>()
                .map(ResponseSpec::AnyOf),
        }
    }
}

impl<'de> Deserialize<'de> for ResponseSpec {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawSpec::deserialize(deserializer)?;
        ResponseSpec::try_from(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolean_form_matches_4xx_and_5xx() {
        let spec = ResponseSpec::ClientOrServerError;

        assert!(spec.unacceptable(400));
        assert!(spec.unacceptable(404));
        assert!(spec.unacceptable(500));
        assert!(spec.unacceptable(599));

        assert!(!spec.unacceptable(200));
        assert!(!spec.unacceptable(301));
        assert!(!spec.unacceptable(399));
        assert!(!spec.unacceptable(600));
    }

    #[test]
    fn test_single_code_matches_only_that_code() {
        let spec = ResponseSpec::from(404);

        assert!(spec.unacceptable(404));
        assert!(!spec.unacceptable(405));
        assert!(!spec.unacceptable(200));
    }

    #[test]
    fn test_named_code_resolves_to_standard_number() {
        let spec = ResponseSpec::named("not_found").unwrap();
        assert_eq!(spec, ResponseSpec::Code(404));

        let spec = ResponseSpec::named("unauthorized").unwrap();
        assert!(spec.unacceptable(401));
        assert!(!spec.unacceptable(404));
    }

    #[test]
    fn test_named_code_rejects_unknown_name() {
        let result = ResponseSpec::named("definitely_not_a_status");
        assert!(matches!(
            result,
            Err(UrlValidatorError::UnknownStatusName(_))
        ));
    }

    #[test]
    fn test_range_is_inclusive() {
        let spec = ResponseSpec::from(400..=499);

        assert!(spec.unacceptable(400));
        assert!(spec.unacceptable(450));
        assert!(spec.unacceptable(499));
        assert!(!spec.unacceptable(399));
        assert!(!spec.unacceptable(500));
    }

    #[test]
    fn test_collection_matches_any_element() {
        let spec = ResponseSpec::from(vec![ResponseSpec::from(404), ResponseSpec::from(405)]);

        assert!(spec.unacceptable(404));
        assert!(spec.unacceptable(405));
        assert!(!spec.unacceptable(406));
    }

    #[test]
    fn test_collection_mixes_codes_names_and_ranges() {
        let spec = ResponseSpec::from(vec![
            ResponseSpec::named("moved_permanently").unwrap(),
            ResponseSpec::from(500..=599),
        ]);

        assert!(spec.unacceptable(301));
        assert!(spec.unacceptable(503));
        assert!(!spec.unacceptable(404));
    }

    #[test]
    fn test_empty_collection_matches_nothing() {
        let spec = ResponseSpec::AnyOf(vec![]);
        assert!(!spec.unacceptable(404));
        assert!(!spec.unacceptable(500));
    }

    #[test]
    fn test_deserialize_boolean_true() {
        #[derive(Deserialize)]
        struct Wrapper {
            check_path: ResponseSpec,
        }

        let wrapper: Wrapper = toml::from_str("check_path = true").unwrap();
        assert_eq!(wrapper.check_path, ResponseSpec::ClientOrServerError);
    }

    #[test]
    fn test_deserialize_boolean_false_is_rejected() {
        #[derive(Deserialize)]
        #[allow(dead_code)]
        struct Wrapper {
            check_path: ResponseSpec,
        }

        let result: std::result::Result<Wrapper, _> = toml::from_str("check_path = false");
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_code_name_range_and_mixture() {
        #[derive(Deserialize)]
        struct Wrapper {
            check_path: ResponseSpec,
        }

        let wrapper: Wrapper = toml::from_str("check_path = 404").unwrap();
        assert_eq!(wrapper.check_path, ResponseSpec::Code(404));

        let wrapper: Wrapper = toml::from_str(r#"check_path = "not_found""#).unwrap();
        assert_eq!(wrapper.check_path, ResponseSpec::Code(404));

        let wrapper: Wrapper = toml::from_str("check_path = { min = 400, max = 499 }").unwrap();
        assert_eq!(wrapper.check_path, ResponseSpec::Range(400..=499));

        let wrapper: Wrapper =
            toml::from_str(r#"check_path = [404, "unauthorized", { min = 500, max = 599 }]"#)
                .unwrap();
        assert!(wrapper.check_path.unacceptable(404));
        assert!(wrapper.check_path.unacceptable(401));
        assert!(wrapper.check_path.unacceptable(502));
        assert!(!wrapper.check_path.unacceptable(301));
    }
}
