//! Typed client for the study-platform REST API.
//!
//! One [`ApiClient`] per configured backend. Endpoint modules add the
//! resource calls:
//! - [`study_sessions`]: submit and query study sessions
//! - [`scores`]: score records and client-side totals
//! - [`disciplines`]: discipline instances, to resolve the course id

pub mod disciplines;
pub mod scores;
pub mod study_sessions;

pub use disciplines::DisciplineInstance;
pub use scores::{sum_points, ScoreRecord};
pub use study_sessions::{CreateStudySession, StudySessionRecord};

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::auth;
use crate::error::ApiError;
use crate::storage::Config;

/// HTTP client bound to one backend base URL.
///
/// Requests attach `Authorization: Bearer <token>` when a token is present;
/// an unauthenticated client is fine against a local backend.
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Build a client for `base_url` (e.g. `http://localhost:8080/api/v1`).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        Url::parse(base_url)?;
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Client configured from `[api]` settings, with the stored bearer
    /// token when the keyring has one.
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let mut client = Self::new(
            &config.api.base_url,
            Duration::from_secs(config.api.timeout_secs),
        )?;
        if let Some(token) = auth::token().ok().flatten() {
            client = client.with_token(token);
        }
        Ok(client)
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Url::parse(&format!("{}{}", self.base_url, path)).map_err(ApiError::from)
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn check_status(path: &str, resp: Response) -> Result<Response, ApiError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let message = resp.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            path: path.to_string(),
            message,
        })
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        let resp = self.authorize(self.http.get(url)).send().await?;
        let resp = Self::check_status(path, resp).await?;
        Ok(resp.json().await?)
    }

    pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        let resp = self
            .authorize(self.http.post(url))
            .json(body)
            .send()
            .await?;
        let resp = Self::check_status(path, resp).await?;
        Ok(resp.json().await?)
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.endpoint(path)?;
        let resp = self.authorize(self.http.delete(url)).send().await?;
        Self::check_status(path, resp).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_append_to_the_base_path() {
        let client = ApiClient::new("http://localhost:8080/api/v1", Duration::from_secs(10))
            .expect("valid base url");
        let url = client.endpoint("/study-sessions").expect("valid endpoint");
        assert_eq!(url.as_str(), "http://localhost:8080/api/v1/study-sessions");
    }

    #[test]
    fn a_trailing_slash_on_the_base_is_tolerated() {
        let client = ApiClient::new("http://localhost:8080/api/v1/", Duration::from_secs(10))
            .expect("valid base url");
        let url = client.endpoint("/me").expect("valid endpoint");
        assert_eq!(url.as_str(), "http://localhost:8080/api/v1/me");
    }

    #[test]
    fn invalid_base_urls_are_rejected() {
        let result = ApiClient::new("not a url", Duration::from_secs(10));
        assert!(matches!(result, Err(ApiError::Url(_))));
    }
}
