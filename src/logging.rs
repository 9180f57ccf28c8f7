use crate::config::LoggingSettings;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber
///
/// `RUST_LOG` wins over the configured level. `format = "pretty"` selects the
/// multi-line formatter, anything else the compact one.
pub fn init(settings: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    let result = if settings.format == "pretty" {
        subscriber.pretty().try_init()
    } else {
        subscriber.compact().try_init()
    };

    if let Err(e) = result {
        eprintln!("Logging already initialized: {}", e);
    }
}
