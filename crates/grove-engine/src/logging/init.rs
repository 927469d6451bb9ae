use std::sync::Once;

/// Filter used when neither the config nor `RUST_LOG` names one.
///
/// Keeps lifecycle events from the engine visible while leaving per-object
/// descriptor and device traffic at `debug`.
pub const DEFAULT_FILTER: &str = "info";

/// How the global logger is installed.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `env_logger` filter directives such as `grove_engine::descriptor=debug`.
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
    /// Prefix records with a millisecond timestamp.
    pub timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
            timestamps: true,
        }
    }
}

impl LoggingConfig {
    /// Config with an explicit filter string, overriding `RUST_LOG`.
    pub fn with_filter(filter: impl Into<String>) -> Self {
        Self {
            env_filter: Some(filter.into()),
            ..Self::default()
        }
    }

    /// Drops timestamps, for output that is diffed between runs.
    pub fn without_timestamps(mut self) -> Self {
        self.timestamps = false;
        self
    }

    fn filter(&self) -> String {
        self.env_filter
            .clone()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| DEFAULT_FILTER.to_owned())
    }
}

static INIT: Once = Once::new();

/// Installs the global logger.
///
/// Only the first call has any effect.
/// Filter precedence: `config.env_filter`, then `RUST_LOG`, then [`DEFAULT_FILTER`].
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();
        builder
            .parse_filters(&config.filter())
            .write_style(config.write_style);
        if config.timestamps {
            builder.format_timestamp_millis();
        } else {
            builder.format_timestamp(None);
        }

        // A test harness or host may already own the logger.
        if builder.try_init().is_err() {
            return;
        }

        log::debug!("logging initialized");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_twice_is_harmless() {
        init_logging(LoggingConfig::with_filter("warn"));
        init_logging(LoggingConfig::default());
        log::warn!("still alive");
    }

    #[test]
    fn explicit_filter_wins() {
        let cfg = LoggingConfig::with_filter("grove_engine=debug");
        assert_eq!(cfg.filter(), "grove_engine=debug");
        assert!(cfg.timestamps);
    }

    #[test]
    fn timestamps_can_be_dropped() {
        assert!(!LoggingConfig::default().without_timestamps().timestamps);
    }
}
