//! Configuration loader.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ConfigError;
use crate::schema::{summarizer_dir, Config};

static ENV_VAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([^}]+)\}").unwrap_or_else(|e| panic!("invalid env var pattern: {e}"))
});

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Default config file location.
    pub fn default_path() -> PathBuf {
        summarizer_dir().join("config.toml")
    }

    /// Load and validate configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::NotFound(_)) => Config::default().validated(),
            other => other,
        }
    }

    /// Load and validate configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let mut config: Config = toml::from_str(&expanded)?;
        config.lock.path = Self::expand_lock_path(&config.lock.path)?;
        config.validated()
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();

        for cap in ENV_VAR.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    fn expand_lock_path(path: &Path) -> Result<PathBuf, ConfigError> {
        let raw = path.to_str().ok_or_else(|| ConfigError::InvalidValue {
            field: "lock.path".to_string(),
            message: format!("path is not valid UTF-8: {:?}", path),
        })?;
        Ok(PathBuf::from(Self::expand_path(raw)))
    }

    /// Expand shell-style paths (e.g., `~/.config`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_empty_config() {
        let config = ConfigLoader::load_str("").unwrap();
        assert_eq!(config.chrome.port, 9222);
        assert_eq!(config.ollama.model, "llama3");
    }

    #[test]
    fn test_load_basic_config() {
        let content = r#"
            [chrome]
            host = "browser"
            port = 9333

            [ollama]
            url = "http://gpu-box:11434"
            model = "mistral"
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.chrome.host, "browser");
        assert_eq!(config.chrome.port, 9333);
        assert_eq!(config.ollama.url, "http://gpu-box:11434");
        assert_eq!(config.ollama.model, "mistral");
    }

    #[test]
    fn test_load_full_config() {
        let content = r#"
            [chrome]
            settle_delay_secs = 5
            max_retries = 5
            retry_delay_secs = 1

            [ollama]
            prompt_length_limit = 16384
            context_length = 8192
            prompt_template = "Summarize:"

            [ollama.options]
            temperature = 0.2
            seed = 42

            [feeds]
            selected = [3, 7]

            [lock]
            path = "/tmp/summarizer-test.lock"

            [processor]
            default_selector = "main"
            debug_attributes = true
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.chrome.settle_delay_secs, 5);
        assert_eq!(config.chrome.max_retries, 5);
        assert_eq!(config.ollama.prompt_length_limit, 16384);
        assert_eq!(config.ollama.context_length, 8192);
        assert_eq!(config.ollama.prompt_template, "Summarize:");
        assert_eq!(config.ollama.options["seed"], serde_json::json!(42));
        assert_eq!(config.feeds.selected, vec![3, 7]);
        assert_eq!(config.lock.path, PathBuf::from("/tmp/summarizer-test.lock"));
        assert_eq!(config.processor.default_selector, "main");
        assert!(config.processor.debug_attributes);
    }

    #[test]
    fn test_load_rejects_out_of_range_values() {
        let content = r#"
            [ollama]
            prompt_length_limit = 100
        "#;
        match ConfigLoader::load_str(content) {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].path, "ollama.prompt_length_limit");
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_rejects_port_overflow() {
        let content = r#"
            [chrome]
            port = 70000
        "#;
        assert!(matches!(
            ConfigLoader::load_str(content),
            Err(ConfigError::TomlParse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[chrome]").unwrap();
        writeln!(file, "port = 9555").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.chrome.port, 9555);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load(Path::new("/nonexistent/path/config.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config =
            ConfigLoader::load_or_default(Path::new("/nonexistent/path/config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_or_default_propagates_parse_errors() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "invalid = [unclosed").unwrap();
        assert!(ConfigLoader::load_or_default(file.path()).is_err());
    }

    #[test]
    fn test_load_invalid_toml() {
        let content = "invalid = [unclosed";
        let result = ConfigLoader::load_str(content);
        assert!(result.is_err());
    }

    #[test]
    fn test_lock_path_tilde_expanded() {
        let content = r#"
            [lock]
            path = "~/summarizer.lock"
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert!(!config.lock.path.to_string_lossy().starts_with('~'));
        assert!(config.lock.path.ends_with("summarizer.lock"));
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: the variable name is only used by this test
        unsafe {
            std::env::set_var("SUMMARIZER_TEST_MODEL", "qwen2");
        }
        let content = "[ollama]\nmodel = \"${SUMMARIZER_TEST_MODEL}\"";
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.ollama.model, "qwen2");
        unsafe {
            std::env::remove_var("SUMMARIZER_TEST_MODEL");
        }
    }

    #[test]
    fn test_expand_env_vars_not_set() {
        let content = "value = \"${NONEXISTENT_TEST_VAR_12345}\"";
        let result = ConfigLoader::expand_env_vars(content);
        assert!(matches!(result, Err(ConfigError::EnvVarNotSet(name)) if name == "NONEXISTENT_TEST_VAR_12345"));
    }

    #[test]
    fn test_expand_env_vars_no_vars() {
        let content = "value = \"no variables here\"";
        let expanded = ConfigLoader::expand_env_vars(content).unwrap();
        assert_eq!(expanded, content);
    }

    #[test]
    fn test_expand_path_no_tilde() {
        let path = "/usr/local/bin";
        assert_eq!(ConfigLoader::expand_path(path), path);
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = ConfigLoader::expand_path("~/test");
        assert!(!expanded.starts_with('~'));
        assert!(expanded.ends_with("/test"));
    }

    #[test]
    fn test_default_path() {
        let path = ConfigLoader::default_path();
        assert!(path.ends_with(".ollama-summarizer/config.toml"));
    }
}
