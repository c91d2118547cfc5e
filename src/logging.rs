use crate::config::Options;
use crate::core::Outcome;
use log::{debug, info, warn};

/// Initialize the logger with appropriate level based on verbosity
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Off
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Off // Only show structured logs in verbose mode
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    debug!("Logger initialized with level: {level:?}");
}

/// Log the resolved option set of a validator
pub fn log_options_info(options: &Options) {
    info!(
        "Options: allow_nil={}, allow_blank={}, scheme={:?}, default_scheme={:?}",
        options.allow_nil(),
        options.allow_blank(),
        options.scheme(),
        options.default_scheme()
    );
    info!(
        "Reachability: check_host={:?}, check_path={:?}, adapter={}",
        options.check_host(),
        options.check_path(),
        options.adapter().unwrap_or("reqwest")
    );
}

/// Log one validation outcome
pub fn log_outcome(value: &str, outcome: &Outcome) {
    match outcome.error_key() {
        None => debug!("✓ {value}"),
        Some(key) => warn!("✗ {value} -> {key}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ErrorKey;

    #[test]
    fn test_logger_initialization_verbose() {
        // Logger can only be initialized once per process, so we use
        // panic::catch_unwind
        std::panic::catch_unwind(|| init_logger(true, false)).ok();
    }

    #[test]
    fn test_logger_initialization_quiet() {
        std::panic::catch_unwind(|| init_logger(false, true)).ok();
    }

    #[test]
    fn test_log_helpers_do_not_panic() {
        let options = Options::builder().scheme("http").build().unwrap();
        log_options_info(&options);
        log_outcome("http://example.com", &Outcome::Valid);
        log_outcome(
            "http://unreachable.example",
            &Outcome::Invalid(ErrorKey::UrlNotAccessible),
        );
    }
}
