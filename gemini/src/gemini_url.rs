const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Clone)]
pub struct GeminiUrl(String);

impl AsRef<str> for GeminiUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Default for GeminiUrl {
    fn default() -> Self {
        Self(DEFAULT_BASE_URL.to_string())
    }
}

impl GeminiUrl {
    /// Creates a URL rooted at a custom base, used to point the client at a
    /// stub server in tests.
    pub fn with_base(base: impl Into<String>) -> Self {
        Self(base.into())
    }

    /// Append the given path to the URL.
    pub fn append_path(&self, path: &str) -> Self {
        let trimmed_url = self.0.trim_end_matches('/');
        let trimmed_path = path.trim_start_matches('/');
        Self(format!("{}/{}", trimmed_url, trimmed_path))
    }

    /// Full `generateContent` endpoint for the given model, with the API key
    /// as a query parameter.
    pub fn generate_content(&self, model: &str, api_key: &str) -> Self {
        let with_path = self.append_path(&format!("v1beta/models/{}:generateContent", model));
        Self(format!("{}?key={}", with_path.0, api_key))
    }
}
