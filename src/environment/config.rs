use std::path::PathBuf;
use std::time::Duration;

/// Base URL of the REST backend. Can be baked in at compile time
/// via `SIX_CITIES_API_URL`
pub const BACKEND_URL: &str = match option_env!("SIX_CITIES_API_URL") {
    Some(url) => url,
    None => "https://14.design.htmlacademy.pro/six-cities",
};

pub const REQUEST_TIMEOUT: Duration = Duration::from_millis(5000);

const ENV_API_URL: &str = "SIX_CITIES_API_URL";
const ENV_TIMEOUT: &str = "SIX_CITIES_TIMEOUT_MS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub base_url: String,
    pub timeout: Duration,
    /// Overrides where the session token is stored. `None` uses the
    /// platform config directory
    pub token_directory: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: BACKEND_URL.to_string(),
            timeout: REQUEST_TIMEOUT,
            token_directory: None,
        }
    }
}

impl AppConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// The defaults, overridden by whatever is set in the environment
    pub fn from_env() -> Result<Self, String> {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(ENV_API_URL) {
            config.base_url = url;
        }
        if let Ok(timeout) = std::env::var(ENV_TIMEOUT) {
            let millis: u64 = timeout
                .trim()
                .parse()
                .map_err(|e| format!("Invalid {ENV_TIMEOUT} {timeout:?}: {e:?}"))?;
            config.timeout = Duration::from_millis(millis);
        }
        config.validate()?;
        Ok(config)
    }

    pub fn with_token_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.token_directory = Some(directory.into());
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| format!("Invalid base url {}: {e:?}", self.base_url))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(format!("Unsupported scheme in {}", self.base_url));
        }
        if self.timeout.is_zero() {
            return Err("The request timeout must not be zero".to_string());
        }
        Ok(())
    }

    /// `base_url` joined with an endpoint path, without doubled slashes
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
