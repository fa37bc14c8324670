//! SDK configuration.
//!
//! Values come from the environment by default. [`AccountingConfig::from_lookup`]
//! takes any key lookup so tests and embedding applications can supply values
//! without touching the process environment.

use std::time::Duration;

use accounting::AccountingError;

/// Base URL of the accounting service, e.g. `https://accounting.example.org/api`.
pub const ENV_BASE_URL: &str = "ACCOUNTING_BASE_URL";

/// Set to `1` to hand out null sessions instead of contacting the service.
pub const ENV_DISABLED: &str = "ACCOUNTING_DISABLED";

/// Per-request timeout in whole seconds.
pub const ENV_TIMEOUT_SECS: &str = "ACCOUNTING_TIMEOUT_SECS";

/// Request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Settings shared by the async and blocking session factories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountingConfig {
    /// Accounting service root. Endpoint paths are appended to it.
    pub base_url: String,
    /// When `true`, sessions never contact the service.
    pub disabled: bool,
    /// Timeout for each reservation or usage request.
    pub timeout: Duration,
}

impl Default for AccountingConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            disabled: false,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl AccountingConfig {
    /// Reads the configuration from `ACCOUNTING_*` environment variables.
    pub fn from_env() -> Result<Self, AccountingError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// Only the exact value `"1"` disables accounting. A timeout that is not a
    /// whole number of seconds is a configuration error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AccountingError> {
        let base_url = lookup(ENV_BASE_URL).unwrap_or_default();
        let disabled = lookup(ENV_DISABLED).as_deref() == Some("1");
        let timeout = match lookup(ENV_TIMEOUT_SECS) {
            Some(raw) => {
                let secs = raw
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| AccountingError::Configuration {
                        message: format!("{ENV_TIMEOUT_SECS} must be a whole number, got '{raw}'"),
                    })?;
                Duration::from_secs(secs)
            }
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            base_url,
            disabled,
            timeout,
        })
    }

    /// Overrides the accounting service root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Switches between real and null sessions.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Overrides the per-request timeout. Must be non-zero.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Checks the configuration and normalises the base URL.
    ///
    /// An enabled configuration needs a base URL; a disabled one does not.
    /// The timeout must be non-zero in both cases.
    pub fn validate(mut self) -> Result<Self, AccountingError> {
        if self.timeout.is_zero() {
            return Err(AccountingError::Configuration {
                message: "request timeout must be greater than zero".to_string(),
            });
        }
        let trimmed = self.base_url.trim().trim_end_matches('/');
        self.base_url = trimmed.to_string();
        if !self.disabled && self.base_url.is_empty() {
            return Err(AccountingError::Configuration {
                message: format!("{ENV_BASE_URL} must be set"),
            });
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn reads_all_variables() {
        let config = AccountingConfig::from_lookup(lookup(&[
            (ENV_BASE_URL, "http://accounting:8100/"),
            (ENV_DISABLED, "0"),
            (ENV_TIMEOUT_SECS, "30"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://accounting:8100/");
        assert!(!config.disabled);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn only_one_disables() {
        for value in ["true", "yes", "", "01"] {
            let config = AccountingConfig::from_lookup(lookup(&[(ENV_DISABLED, value)])).unwrap();
            assert!(!config.disabled, "{value:?} must not disable accounting");
        }
        let config = AccountingConfig::from_lookup(lookup(&[(ENV_DISABLED, "1")])).unwrap();
        assert!(config.disabled);
    }

    #[test]
    fn bad_timeout_is_a_configuration_error() {
        let err = AccountingConfig::from_lookup(lookup(&[(ENV_TIMEOUT_SECS, "soon")])).unwrap_err();
        assert!(matches!(err, AccountingError::Configuration { .. }));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let config = AccountingConfig::from_lookup(lookup(&[
            (ENV_BASE_URL, "http://accounting:8100"),
            (ENV_TIMEOUT_SECS, "0"),
        ]))
        .unwrap();
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: request timeout must be greater than zero"
        );

        let err = AccountingConfig::default()
            .with_disabled(true)
            .with_timeout(Duration::ZERO)
            .validate()
            .unwrap_err();
        assert!(matches!(err, AccountingError::Configuration { .. }));
    }

    #[test]
    fn validate_strips_trailing_slashes() {
        let config = AccountingConfig::default()
            .with_base_url("http://accounting:8100//")
            .validate()
            .unwrap();
        assert_eq!(config.base_url, "http://accounting:8100");
    }

    #[test]
    fn enabled_config_requires_base_url() {
        let err = AccountingConfig::default().validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: ACCOUNTING_BASE_URL must be set"
        );
        assert!(AccountingConfig::default().with_disabled(true).validate().is_ok());
    }
}
