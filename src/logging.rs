use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::info;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file_enabled: bool,
    pub console_enabled: bool,
    pub max_files: usize,
    pub log_directory: PathBuf,
    pub include_spans: bool,
    pub include_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file_enabled: false,
            console_enabled: true,
            max_files: 5,
            log_directory: PathBuf::from("logs"),
            include_spans: false,
            include_targets: true,
        }
    }
}

/// Initialize logging system
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let span_events = if config.include_spans {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let mut layers = Vec::new();

    // Console layer; stdout carries command output, so logs go to stderr
    if config.console_enabled {
        let console_layer = fmt::layer()
            .with_target(config.include_targets)
            .with_span_events(span_events.clone())
            .with_writer(std::io::stderr)
            .boxed();

        layers.push(console_layer);
    }

    // File layer
    if config.file_enabled {
        std::fs::create_dir_all(&config.log_directory)?;

        let file_appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("stringkit")
            .filename_suffix("log")
            .max_log_files(config.max_files)
            .build(&config.log_directory)?;

        let file_layer = fmt::layer()
            .with_ansi(false)
            .with_target(config.include_targets)
            .with_span_events(span_events)
            .with_writer(file_appender)
            .boxed();

        layers.push(file_layer);
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layers)
        .try_init()?;

    info!("Logging system initialized");
    info!("Log level: {}", config.level);
    if config.file_enabled {
        info!("Log directory: {}", config.log_directory.display());
    }

    Ok(())
}

/// Structured logging context
#[derive(Debug, Clone, Serialize)]
pub struct LogContext {
    pub component: String,
    pub operation: String,
    pub mode: Option<String>,
    pub duration_us: Option<u64>,
    pub status: Option<String>,
    pub error_category: Option<String>,
    pub additional_fields: HashMap<String, serde_json::Value>,
}

impl LogContext {
    pub fn new(component: impl Into<String>, operation: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            operation: operation.into(),
            mode: None,
            duration_us: None,
            status: None,
            error_category: None,
            additional_fields: HashMap::new(),
        }
    }

    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    pub fn with_duration(mut self, duration: std::time::Duration) -> Self {
        self.duration_us = Some(duration.as_micros() as u64);
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_error_category(mut self, category: impl Into<String>) -> Self {
        self.error_category = Some(category.into());
        self
    }

    pub fn with_string_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.additional_fields.insert(key.into(), serde_json::Value::String(value.into()));
        self
    }

    pub fn with_number_field(mut self, key: impl Into<String>, value: impl Into<i64>) -> Self {
        self.additional_fields.insert(key.into(), serde_json::Value::Number(serde_json::Number::from(value.into())));
        self
    }

    pub fn with_bool_field(mut self, key: impl Into<String>, value: bool) -> Self {
        self.additional_fields.insert(key.into(), serde_json::Value::Bool(value));
        self
    }
}

/// Structured logging macro
#[macro_export]
macro_rules! log_debug {
    ($context:expr, $message:expr) => {
        tracing::debug!(
            component = $context.component,
            operation = $context.operation,
            mode = $context.mode,
            additional_fields = ?$context.additional_fields,
            $message
        );
    };
}

/// Times one operation and logs the elapsed time when finished
pub struct PerformanceLogger {
    context: LogContext,
    start_time: std::time::Instant,
}

impl PerformanceLogger {
    pub fn new(context: LogContext) -> Self {
        Self {
            context,
            start_time: std::time::Instant::now(),
        }
    }

    pub fn finish(self, message: &str) {
        let duration = self.start_time.elapsed();
        let context = self.context.with_duration(duration).with_status("ok");
        tracing::debug!(
            component = context.component,
            operation = context.operation,
            mode = context.mode,
            duration_us = context.duration_us,
            status = context.status,
            additional_fields = ?context.additional_fields,
            "{}", message
        );
    }

    pub fn finish_with_error(self, message: &str, error: &crate::error::StringKitError) {
        let duration = self.start_time.elapsed();
        let context = self.context
            .with_duration(duration)
            .with_status("error")
            .with_error_category(error.category());
        tracing::error!(
            component = context.component,
            operation = context.operation,
            mode = context.mode,
            duration_us = context.duration_us,
            status = context.status,
            error_category = context.error_category,
            additional_fields = ?context.additional_fields,
            error = %error,
            "{}", message
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_context_creation() {
        let context = LogContext::new("truncate", "limit_words")
            .with_mode("code_point")
            .with_number_field("limit", 3)
            .with_bool_field("truncated", true)
            .with_string_field("custom", "value");

        assert_eq!(context.component, "truncate");
        assert_eq!(context.operation, "limit_words");
        assert_eq!(context.mode, Some("code_point".to_string()));
        assert_eq!(context.additional_fields.len(), 3);
        assert_eq!(context.additional_fields["limit"], serde_json::json!(3));
    }

    #[test]
    fn test_context_duration_and_status() {
        let context = LogContext::new("slug", "filter")
            .with_duration(std::time::Duration::from_millis(2))
            .with_status("ok");

        assert_eq!(context.duration_us, Some(2000));
        assert_eq!(context.status.as_deref(), Some("ok"));
    }

    #[test]
    fn test_logging_config_defaults_fill_missing_fields() {
        let config: LoggingConfig = toml::from_str("level = \"debug\"").unwrap();
        assert_eq!(config.level, "debug");
        assert!(config.console_enabled);
        assert!(!config.file_enabled);
    }

    #[test]
    fn test_performance_logger_finishes_without_subscriber() {
        let logger = PerformanceLogger::new(LogContext::new("pattern", "like"));
        logger.finish("done");

        let logger = PerformanceLogger::new(LogContext::new("pattern", "like"));
        logger.finish_with_error("failed", &crate::error::StringKitError::pattern("*", "test"));
    }
}
