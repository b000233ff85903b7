/// API endpoint configuration
///
/// The backend origin is the only configuration surface of the client.
/// It is read from the `GIF_EXPRESSIONS_API_URL` environment variable,
/// falling back to a local development backend on port 8000.

/// Default backend origin when no override is set
const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Resolved location of the expressions backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    /// Resolve the backend origin from the environment,
    /// falling back to the local default
    pub fn from_env() -> Self {
        let base = std::env::var("GIF_EXPRESSIONS_API_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self::with_base(base)
    }

    /// Build a config from an explicit origin (used by tests)
    pub fn with_base(base: impl Into<String>) -> Self {
        let mut base_url = base.into();

        // Normalize away a trailing slash so joined paths stay clean
        while base_url.ends_with('/') {
            base_url.pop();
        }

        ApiConfig { base_url }
    }

    /// URL of the expressions collection endpoint
    pub fn expressions_url(&self) -> String {
        format!("{}/api/expressions", self.base_url)
    }

    /// URL of a single expression record
    pub fn expression_url(&self, id: &str) -> String {
        format!("{}/api/expressions/{}", self.base_url, id)
    }

    /// URL of the processed-GIF download endpoint for a record
    pub fn download_url(&self, id: &str) -> String {
        format!("{}/api/expressions/{}/download", self.base_url, id)
    }
}
