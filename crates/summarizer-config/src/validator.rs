//! Configuration validation.

use std::ops::RangeInclusive;

use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    fn check_range<T>(&mut self, path: &str, value: T, range: RangeInclusive<T>)
    where
        T: PartialOrd + std::fmt::Display + Copy,
    {
        if !range.contains(&value) {
            self.add_error(ValidationError::new(
                path,
                format!(
                    "must be between {} and {} (got {})",
                    range.start(),
                    range.end(),
                    value
                ),
            ));
        }
    }
}

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_chrome(config, &mut result);
        Self::validate_ollama(config, &mut result);
        Self::validate_feeds(config, &mut result);
        Self::validate_lock(config, &mut result);
        Self::validate_processor(config, &mut result);

        result
    }

    fn validate_chrome(config: &Config, result: &mut ValidationResult) {
        let chrome = &config.chrome;

        if chrome.host.trim().is_empty() {
            result.add_error(ValidationError::new("chrome.host", "Host cannot be empty"));
        }

        if chrome.port == 0 {
            result.add_error(ValidationError::new(
                "chrome.port",
                "Port must be between 1 and 65535",
            ));
        }

        result.check_range("chrome.settle_delay_secs", chrome.settle_delay_secs, 0..=120);
        result.check_range("chrome.message_timeout_secs", chrome.message_timeout_secs, 1..=600);
        result.check_range("chrome.attempt_timeout_secs", chrome.attempt_timeout_secs, 1..=3600);
        result.check_range("chrome.max_retries", chrome.max_retries, 1..=10);
        result.check_range("chrome.retry_delay_secs", chrome.retry_delay_secs, 0..=60);

        if chrome.attempt_timeout_secs <= chrome.settle_delay_secs {
            result.add_warning(ValidationWarning::new(
                "chrome.attempt_timeout_secs",
                "attempt timeout does not leave room for the settle delay, every attempt will time out",
            ));
        }
    }

    fn validate_ollama(config: &Config, result: &mut ValidationResult) {
        let ollama = &config.ollama;

        match url::Url::parse(&ollama.url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            Ok(_) => result.add_error(ValidationError::new(
                "ollama.url",
                "url must start with http:// or https://",
            )),
            Err(e) => result.add_error(ValidationError::new(
                "ollama.url",
                format!("Invalid URL: {}", e),
            )),
        }

        if ollama.model.trim().is_empty() {
            result.add_error(ValidationError::new(
                "ollama.model",
                "Model name cannot be empty",
            ));
        }

        result.check_range("ollama.timeout_secs", ollama.timeout_secs, 1..=3600);
        result.check_range(
            "ollama.prompt_length_limit",
            ollama.prompt_length_limit,
            1024..=32768,
        );
        result.check_range("ollama.context_length", ollama.context_length, 1024..=32768);

        if ollama.prompt_template.trim().is_empty() {
            result.add_error(ValidationError::new(
                "ollama.prompt_template",
                "Prompt template cannot be empty",
            ));
        }

        if ollama.options.contains_key("num_ctx") {
            result.add_warning(ValidationWarning::new(
                "ollama.options.num_ctx",
                "num_ctx is set explicitly and takes precedence over ollama.context_length",
            ));
        }
    }

    fn validate_feeds(config: &Config, result: &mut ValidationResult) {
        let selected = &config.feeds.selected;
        for (i, id) in selected.iter().enumerate() {
            if selected[..i].contains(id) {
                result.add_warning(ValidationWarning::new(
                    "feeds.selected",
                    format!("Feed {} is listed more than once", id),
                ));
            }
        }
    }

    fn validate_lock(config: &Config, result: &mut ValidationResult) {
        if config.lock.path.as_os_str().is_empty() {
            result.add_error(ValidationError::new("lock.path", "Lock path cannot be empty"));
            return;
        }

        if let Some(parent) = config.lock.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                result.add_warning(ValidationWarning::new(
                    "lock.path",
                    format!("Lock directory does not exist: {:?}", parent),
                ));
            }
        }
    }

    fn validate_processor(config: &Config, result: &mut ValidationResult) {
        if config.processor.default_selector.trim().is_empty() {
            result.add_error(ValidationError::new(
                "processor.default_selector",
                "Default selector cannot be empty",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
