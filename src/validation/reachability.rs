//! Host reachability and path-response checking.
//!
//! At most one network request is made per validated value; its status
//! code feeds both the host check and the path check.

use log::debug;

use crate::config::Options;
use crate::core::ErrorKey;
use crate::syntax::ParsedUrl;
use crate::transport::{Request, Transport};

/// Probe the URL per the configured host/path policy.
///
/// Returns `None` when the engine has no opinion (no check requested, or
/// the requested checks passed), otherwise the error key to report.
pub(crate) async fn check(
    parsed: &ParsedUrl,
    options: &Options,
    transport: &dyn Transport,
) -> Option<ErrorKey> {
    let scheme = parsed.scheme();

    // A scheme-scoped host check gates the request entirely: outside the
    // scope no probe happens, so a path check is skipped too
    if options.check_host().is_scheme_scoped() && !options.should_check_host(scheme) {
        debug!("skipping reachability: {scheme} outside check_host scope");
        return None;
    }

    let asserting_host = options.should_check_host(scheme);

    if !asserting_host && options.check_path().is_none() {
        return None;
    }

    let request = if options.use_head_requests() {
        Request::head(parsed.as_str())
    } else {
        Request::get(parsed.as_str())
    };
    if let Some(callback) = options.request_callback() {
        callback(&request);
    }

    match transport.send(&request).await {
        Ok(status) => {
            // Any response at all satisfies the host check
            debug!("{} responded with {status}", parsed.as_str());
            if let Some(spec) = options.check_path()
                && spec.unacceptable(status)
            {
                return Some(ErrorKey::UrlInvalidResponse);
            }
            None
        }
        Err(err) => {
            debug!("{} unreachable: {err}", parsed.as_str());
            if asserting_host {
                Some(ErrorKey::UrlNotAccessible)
            } else {
                // Host accessibility was not asserted; a path check that
                // never saw a response is skipped, not failed
                None
            }
        }
    }
}
