/// CLI configuration
use rider_client::{ClientConfig, DEFAULT_API_URL, DEFAULT_TOKEN_TYPE};
use rider_core::validation::SignInForm;
use rider_core::{Preferences, PrivilegedGuard, RedirectConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Default configuration file, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "rider.toml";

/// Environment variable prefix (`RIDER_API_URL`, `RIDER_CREDENTIALS_EMAIL`, ...)
pub const ENV_PREFIX: &str = "RIDER";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

// Keys are single words so that `_` can separate the levels of
// environment variable names.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default = "default_api")]
    pub api: ApiSettings,

    #[serde(default)]
    pub credentials: CredentialSettings,

    #[serde(default = "default_preferences")]
    pub preferences: PreferenceSettings,

    #[serde(default = "default_guard")]
    pub guard: GuardSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiSettings {
    #[serde(default = "default_url")]
    pub url: String,

    /// Authorization scheme sent before the token
    #[serde(default = "default_scheme")]
    pub scheme: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CredentialSettings {
    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PreferenceSettings {
    #[serde(default = "default_locale")]
    pub locale: String,

    /// First day of the calendar week (0 = Sunday)
    #[serde(default = "default_weekday")]
    pub weekday: u8,

    /// Rows per listing page
    #[serde(default = "default_rows")]
    pub rows: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GuardSettings {
    /// Where anonymous users are sent
    #[serde(default = "default_signin")]
    pub signin: String,

    /// Where non-privileged users are sent, `{id}` is their user id
    #[serde(default = "default_denied")]
    pub denied: String,
}

impl CliConfig {
    /// Load configuration from `path` (or `rider.toml` if it exists) and
    /// the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    fn load_with_env(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            // An explicitly requested file must exist
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (prefixed with RIDER_)
        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("_")
                .source(env),
        );

        Ok(settings.build()?.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let url = self.api.url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "API URL must start with http:// or https:// (got {:?})",
                self.api.url
            )));
        }

        if self.api.scheme.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "Authorization scheme must not be empty".to_string(),
            ));
        }

        if self.api.timeout == 0 {
            return Err(ConfigError::Invalid(
                "Timeout must be at least one second".to_string(),
            ));
        }

        if self.preferences.rows == 0 {
            return Err(ConfigError::Invalid(
                "Rows per page must be at least 1".to_string(),
            ));
        }

        if self.preferences.weekday > 6 {
            return Err(ConfigError::Invalid(format!(
                "Weekday must be between 0 and 6 (got {})",
                self.preferences.weekday
            )));
        }

        Ok(())
    }

    /// Credentials, or an error naming the variables to set
    pub fn require_credentials(&self) -> Result<(&str, &str)> {
        if self.credentials.email.is_empty() || self.credentials.password.is_empty() {
            return Err(ConfigError::Invalid(
                "Credentials are required (set RIDER_CREDENTIALS_EMAIL and RIDER_CREDENTIALS_PASSWORD)"
                    .to_string(),
            ));
        }

        SignInForm {
            email: self.credentials.email.clone(),
            password: self.credentials.password.clone(),
        }
        .validate()
        .map_err(|e| ConfigError::Invalid(format!("Invalid credentials: {}", e)))?;

        Ok((&self.credentials.email, &self.credentials.password))
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api.url.trim()).token_type(self.api.scheme.trim())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout)
    }

    pub fn preferences(&self) -> Preferences {
        Preferences::new(
            self.preferences.locale.clone(),
            self.preferences.weekday,
            self.preferences.rows,
        )
    }

    pub fn guard(&self) -> PrivilegedGuard {
        PrivilegedGuard::new(RedirectConfig {
            sign_in: self.guard.signin.clone(),
            own_trips: self.guard.denied.clone(),
        })
    }
}

// Default values
fn default_api() -> ApiSettings {
    ApiSettings {
        url: default_url(),
        scheme: default_scheme(),
        timeout: default_timeout(),
    }
}

fn default_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_scheme() -> String {
    DEFAULT_TOKEN_TYPE.to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_preferences() -> PreferenceSettings {
    let defaults = Preferences::default();
    PreferenceSettings {
        locale: defaults.locale().to_string(),
        weekday: defaults.weekday(),
        rows: defaults.rows_per_page(),
    }
}

fn default_locale() -> String {
    default_preferences().locale
}

fn default_weekday() -> u8 {
    default_preferences().weekday
}

fn default_rows() -> usize {
    default_preferences().rows
}

fn default_guard() -> GuardSettings {
    let redirects = RedirectConfig::default();
    GuardSettings {
        signin: redirects.sign_in,
        denied: redirects.own_trips,
    }
}

fn default_signin() -> String {
    default_guard().signin
}

fn default_denied() -> String {
    default_guard().denied
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            api: default_api(),
            credentials: CredentialSettings::default(),
            preferences: default_preferences(),
            guard: default_guard(),
        }
    }
}
