//! Log subscriber for the `benchkit` binary.
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use benchkit::config::RunSettings;

/// Checked before `RUST_LOG` so the kit's verbosity can be set on its own.
const BENCHKIT_LOG_ENV: &str = "BENCHKIT_LOG";
const RUST_LOG_ENV: &str = "RUST_LOG";

/// Directive applied when neither variable holds a valid filter.
const fn default_directive(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

/// First valid directive among the given candidates, or the default level.
fn resolve_filter<I>(candidates: I, verbose: bool) -> EnvFilter
where
    I: IntoIterator<Item = Option<String>>,
{
    candidates
        .into_iter()
        .flatten()
        .find_map(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(default_directive(verbose)))
}

/// Install the global subscriber for a run. Later calls keep the first one.
pub fn init_logging(settings: &RunSettings) {
    let filter = resolve_filter(
        [
            std::env::var(BENCHKIT_LOG_ENV).ok(),
            std::env::var(RUST_LOG_ENV).ok(),
        ],
        settings.verbose,
    );

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_ansi(!settings.no_color)
        .with_target(false)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Logging already initialised, keeping it: {}", err);
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use benchkit::args::Command;

    use super::*;

    fn settings(verbose: bool) -> RunSettings {
        RunSettings {
            command: Command::Time,
            steps: 1,
            repetitions: 1,
            step_ms: 1,
            alloc_bytes: 1,
            percentiles: Vec::new(),
            charts_path: None::<PathBuf>,
            verbose,
            no_color: true,
        }
    }

    #[test]
    fn kit_variable_wins_over_rust_log() {
        let filter = resolve_filter(
            [Some("trace".to_owned()), Some("warn".to_owned())],
            false,
        );
        assert_eq!(filter.to_string(), "trace");
    }

    #[test]
    fn invalid_directive_falls_through() {
        let filter = resolve_filter(
            [Some("benchkit=loudest".to_owned()), Some("warn".to_owned())],
            false,
        );
        assert_eq!(filter.to_string(), "warn");
    }

    #[test]
    fn verbose_selects_debug_when_unset() {
        assert_eq!(resolve_filter([None, None], true).to_string(), "debug");
        assert_eq!(resolve_filter([None, None], false).to_string(), "info");
    }

    #[test]
    fn init_logging_is_idempotent() {
        init_logging(&settings(true));
        init_logging(&settings(false));
    }
}
