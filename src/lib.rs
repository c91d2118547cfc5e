//! Embeddable URL validation engine.
//!
//! Given a candidate string, decides whether it is a syntactically valid
//! URL, optionally restricted to specific schemes, and optionally confirms
//! the URL is network-reachable. Rejections carry a symbolic error key
//! (`invalid_url`, `url_not_accessible`, `url_invalid_response`) that the
//! host framework maps to user-facing text.
//!
//! # Example
//!
//! ```no_run
//! use url_validator::{Errors, Options, ResponseSpec, UrlValidator};
//!
//! # async fn run() -> url_validator::Result<()> {
//! let validator = UrlValidator::new(
//!     Options::builder()
//!         .scheme(["http", "https"])
//!         .check_host(true)
//!         .check_path(ResponseSpec::ClientOrServerError)
//!         .build()?,
//! )?;
//!
//! let mut errors = Errors::new();
//! validator
//!     .validate_each(&mut errors, "homepage", Some("https://example.com"))
//!     .await;
//! assert!(errors.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod logging;
pub mod response;
pub mod syntax;
pub mod transport;
pub mod validation;

// Re-export the public surface at the crate root
pub use crate::config::{HostCheck, Options, OptionsBuilder, RequestCallback, SchemeList};
pub use crate::core::{ErrorKey, ErrorSink, Errors, Outcome, Result, UrlValidatorError};
pub use crate::response::ResponseSpec;
pub use crate::syntax::ParsedUrl;
pub use crate::transport::{Method, ReqwestTransport, Request, Transport, TransportError};
pub use crate::validation::UrlValidator;
