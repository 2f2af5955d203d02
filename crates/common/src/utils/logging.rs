use std::io;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "info,tower_http=info,axum=info";

/// `RUST_LOG` when set and parseable, otherwise `DEFAULT_FILTER`. Shared by both formats.
fn env_filter() -> EnvFilter {
    filter_from(std::env::var(EnvFilter::DEFAULT_ENV).ok())
}

fn filter_from(directives: Option<String>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize tracing subscriber with sensible defaults and stdout writer.
/// - Respects `RUST_LOG` if set
/// - Falls back to `info,tower_http=info,axum=info`
/// - Writes to stdout to improve visibility in environments that hide stderr
pub fn init_logging_default() {
    let _ = fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}

/// Initialize tracing subscriber with JSON structured output.
/// Same filter as the compact format; raise store detail with
/// `RUST_LOG`, e.g. `RUST_LOG=info,service=debug`.
pub fn init_logging_json() {
    let _ = fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .json()
        .with_writer(io::stdout)
        .try_init();
}

/// Pick the subscriber from `LOG_FORMAT` (`json` or anything else for compact).
pub fn init_logging_from_env() {
    match std::env::var("LOG_FORMAT") {
        Ok(f) if f.eq_ignore_ascii_case("json") => init_logging_json(),
        _ => init_logging_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_falls_back_to_default_directives() {
        let default = EnvFilter::new(DEFAULT_FILTER).to_string();
        assert_eq!(filter_from(None).to_string(), default);
        assert_eq!(filter_from(Some("warn,service=trace".into())).to_string(), EnvFilter::new("warn,service=trace").to_string());
        // unparseable RUST_LOG is ignored rather than silencing everything
        assert_eq!(filter_from(Some("service=notalevel".into())).to_string(), default);
    }
}
