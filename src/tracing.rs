use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "sitefeed=info,tower_http=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber. `RUST_LOG` overrides the default filter;
/// the `tracing_json` and `tracing_noansi` features pick the output format.
pub fn setup_tracing() -> Result<(), SetGlobalDefaultError> {
    if cfg!(feature = "tracing_json") {
        let json_subs = tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter())
            .finish();
        return tracing::subscriber::set_global_default(json_subs);
    }

    let fmt_subs = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(!cfg!(feature = "tracing_noansi"))
        .finish();
    tracing::subscriber::set_global_default(fmt_subs)
}
