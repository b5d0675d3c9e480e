use thiserror::Error;
use uuid::Uuid;

/// How the client authenticates against the upstream API.
#[derive(Debug, Clone)]
pub enum UpstreamAuth {
    Bearer(String),
    Basic { username: String, password: String },
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    /// Every endpoint/subscription/filter path is scoped to this project.
    pub project_id: Uuid,
    pub auth: Option<UpstreamAuth>,
    pub timeout_ms: u64,
}

#[derive(Debug, Error)]
pub enum ClientConfigError {
    #[error("RECONCILER_PROJECT_ID is required")]
    MissingProjectId,
    #[error("RECONCILER_PROJECT_ID must be a UUID")]
    InvalidProjectId,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ClientConfigError> {
        let base_url = std::env::var("RECONCILER_UPSTREAM_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:5005/api/v1".to_string());

        let raw_project_id = std::env::var("RECONCILER_PROJECT_ID")
            .map_err(|_| ClientConfigError::MissingProjectId)?;
        let project_id = Uuid::parse_str(raw_project_id.trim())
            .map_err(|_| ClientConfigError::InvalidProjectId)?;

        let auth = if let Ok(token) = std::env::var("RECONCILER_UPSTREAM_TOKEN")
            && !token.trim().is_empty()
        {
            Some(UpstreamAuth::Bearer(token.trim().to_string()))
        } else if let Ok(username) = std::env::var("RECONCILER_UPSTREAM_BASIC_USER")
            && let Ok(password) = std::env::var("RECONCILER_UPSTREAM_BASIC_PASSWORD")
        {
            Some(UpstreamAuth::Basic { username, password })
        } else {
            None
        };

        let mut timeout_ms: u64 = 30_000;
        if let Ok(value) = std::env::var("RECONCILER_UPSTREAM_TIMEOUT_MS")
            && let Ok(parsed) = value.parse::<u64>()
        {
            timeout_ms = parsed.max(1);
        }

        Ok(Self {
            base_url,
            project_id,
            auth,
            timeout_ms,
        })
    }
}
