//! Pluggable HTTP transport boundary.
//!
//! The engine needs exactly one capability from a transport: send a
//! GET-equivalent request and report back a status code or a transport
//! failure. Concrete adapters are selected by identifier through a
//! process-global registry, so hosts can swap the HTTP stack without
//! touching the engine.

pub mod adapter;

pub use adapter::ReqwestTransport;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use crate::core::{Result, UrlValidatorError};

/// Identifier of the adapter used when the options name none.
pub const DEFAULT_ADAPTER: &str = "reqwest";

/// HTTP method for the probe request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Head,
}

/// The outgoing probe request handed to the transport.
///
/// Request callbacks receive a shared reference for inspection; the
/// callback's return value is ignored and it cannot alter dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: Method,
    url: String,
}

impl Request {
    pub fn get<S: Into<String>>(url: S) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
        }
    }

    pub fn head<S: Into<String>>(url: S) -> Self {
        Self {
            method: Method::Head,
            url: url.into(),
        }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Transport-level failure: connection refused, timeout, DNS failure, or
/// any other error that prevented a status code from being observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    description: String,
}

impl TransportError {
    pub fn new<S: Into<String>>(description: S) -> Self {
        Self {
            description: description.into(),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transport failure: {}", self.description)
    }
}

impl std::error::Error for TransportError {}

/// A concrete HTTP transport.
///
/// Implementations must be safe for concurrent use; a single instance is
/// shared by every validation call of a validator.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform the request, returning the response status code or a
    /// transport failure. Redirect and timeout policy are the adapter's
    /// business; the engine imposes none of its own.
    async fn send(&self, request: &Request) -> std::result::Result<u16, TransportError>;
}

type TransportFactory = Arc<dyn Fn() -> Result<Arc<dyn Transport>> + Send + Sync>;

static REGISTRY: Lazy<RwLock<FxHashMap<String, TransportFactory>>> = Lazy::new(|| {
    let mut adapters: FxHashMap<String, TransportFactory> = FxHashMap::default();
    adapters.insert(
        DEFAULT_ADAPTER.to_string(),
        Arc::new(|| Ok(Arc::new(ReqwestTransport::new()?) as Arc<dyn Transport>)),
    );
    RwLock::new(adapters)
});

/// Register an adapter factory under an identifier, replacing any previous
/// registration with the same name.
pub fn register<F>(id: &str, factory: F)
where
    F: Fn() -> Result<Arc<dyn Transport>> + Send + Sync + 'static,
{
    let mut adapters = REGISTRY.write().unwrap_or_else(|e| e.into_inner());
    adapters.insert(id.to_string(), Arc::new(factory));
}

/// Produce a transport for the given adapter identifier.
///
/// Unknown identifiers are a configuration fault, surfaced at validator
/// construction rather than as a validation outcome.
pub fn resolve(id: &str) -> Result<Arc<dyn Transport>> {
    let factory = {
        let adapters = REGISTRY.read().unwrap_or_else(|e| e.into_inner());
        adapters.get(id).cloned()
    };

    match factory {
        Some(factory) => factory(),
        None => Err(UrlValidatorError::UnknownAdapter(id.to_string())),
    }
}
