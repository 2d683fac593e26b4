//! The transport wrapper: every authenticated HTTP call goes through
//! [`ApiClient::execute`], which attaches the bearer token and normalizes
//! success and failure shapes.

use std::sync::Arc;

use reqwest::{Client as HttpClient, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::models::{
    CurrentUser, ItemPayload, LoginRequest, LoginResponse, PortfolioItem, ProfileUpdate,
    RegisterRequest, UploadResponse,
};
use crate::token::TokenStore;

/// Backend base path used when `PORTFOLIO_API_URL` is not set at build time.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000/api/v1";

/// Scheme + host + port of an API base URL, used to absolutize relative
/// image URLs returned by the backend.
pub fn origin_of(base_url: &str) -> String {
    let Some(scheme_end) = base_url.find("://") else {
        return base_url.trim_end_matches('/').to_string();
    };
    let rest = &base_url[scheme_end + 3..];
    match rest.find('/') {
        Some(slash) => base_url[..scheme_end + 3 + slash].to_string(),
        None => base_url.to_string(),
    }
}

/// REST client for the portfolio backend.
///
/// Cheap to clone: the HTTP client and the token store are shared.
#[derive(Clone)]
pub struct ApiClient {
    http: HttpClient,
    base_url: String,
    origin: String,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    pub fn new(base_url: &str, tokens: Arc<dyn TokenStore>) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        let origin = origin_of(&base_url);
        Self {
            http: HttpClient::new(),
            base_url,
            origin,
            tokens,
        }
    }

    /// Client wired to the platform-appropriate token store and the
    /// compile-time configured base URL.
    pub fn from_env() -> Self {
        let base = option_env!("PORTFOLIO_API_URL").unwrap_or(DEFAULT_API_BASE);
        #[cfg(target_arch = "wasm32")]
        let tokens: Arc<dyn TokenStore> = Arc::new(crate::token::BrowserStore::new());
        #[cfg(not(target_arch = "wasm32"))]
        let tokens: Arc<dyn TokenStore> = Arc::new(crate::token::MemoryStore::new());
        Self::new(base, tokens)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Backend origin (no API path), e.g. `http://localhost:8000`.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Whether a credential is currently stored.
    pub fn has_token(&self) -> bool {
        self.tokens.get().is_some()
    }

    /// Drop the stored credential. Navigation back to the landing page is
    /// the caller's job.
    pub fn logout(&self) {
        self.tokens.clear();
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.http.request(method, &url);
        if let Some(token) = self.tokens.get() {
            req = req.bearer_auth(token);
        }
        req
    }

    /// Send a request and normalize the outcome.
    ///
    /// Returns the parsed JSON body, or `None` when the body is empty
    /// (e.g. a 204 from DELETE). A 401 clears the stored token before
    /// surfacing [`ApiError::Unauthorized`].
    async fn execute(&self, req: RequestBuilder) -> ApiResult<Option<Value>> {
        let response = req.send().await.map_err(|err| {
            tracing::debug!("request failed before a response arrived: {err}");
            ApiError::Network
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            self.tokens.clear();
            let message = backend_message(response).await.unwrap_or_else(|| {
                "Неверное имя пользователя или пароль".to_string()
            });
            return Err(ApiError::Unauthorized(message));
        }

        if !status.is_success() {
            let message = backend_message(response).await.unwrap_or_else(|| {
                format!(
                    "Ошибка {}: {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("неизвестная ошибка")
                )
            });
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await.map_err(|_| ApiError::Network)?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&body)?))
    }

    async fn fetch<T: DeserializeOwned>(&self, req: RequestBuilder) -> ApiResult<T> {
        let value = self.execute(req).await?.unwrap_or(Value::Null);
        Ok(serde_json::from_value(value)?)
    }

    // --- auth ---

    /// `POST /auth/register`
    pub async fn register(
        &self,
        email: &str,
        username: &str,
        password: &str,
        full_name: Option<String>,
    ) -> ApiResult<CurrentUser> {
        let body = RegisterRequest {
            email: email.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            full_name,
        };
        self.fetch(self.request(Method::POST, "/auth/register").json(&body))
            .await
    }

    /// `POST /auth/login-json` — persists the returned token. A 2xx
    /// response without an `access_token` field is treated as an error
    /// and nothing is stored.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<()> {
        let body = LoginRequest { username, password };
        let response: LoginResponse = self
            .fetch(self.request(Method::POST, "/auth/login-json").json(&body))
            .await?;
        let Some(token) = response.access_token.filter(|t| !t.is_empty()) else {
            return Err(ApiError::NoToken);
        };
        self.tokens.set(&token);
        Ok(())
    }

    // --- profile ---

    /// `GET /users/me`
    pub async fn current_user(&self) -> ApiResult<CurrentUser> {
        self.fetch(self.request(Method::GET, "/users/me")).await
    }

    /// `PUT /users/me` with the full profile (cleared optionals as null).
    pub async fn update_profile(&self, update: &ProfileUpdate) -> ApiResult<CurrentUser> {
        self.fetch(self.request(Method::PUT, "/users/me").json(update))
            .await
    }

    /// `PUT /users/me` carrying only the password field.
    pub async fn change_password(&self, password: &str) -> ApiResult<CurrentUser> {
        let body = serde_json::json!({ "password": password });
        self.fetch(self.request(Method::PUT, "/users/me").json(&body))
            .await
    }

    // --- portfolio ---

    /// `GET /portfolio`
    pub async fn list_portfolio(&self) -> ApiResult<Vec<PortfolioItem>> {
        self.fetch(self.request(Method::GET, "/portfolio")).await
    }

    /// `POST /portfolio`
    pub async fn create_item(&self, payload: &ItemPayload) -> ApiResult<PortfolioItem> {
        self.fetch(self.request(Method::POST, "/portfolio").json(payload))
            .await
    }

    /// `PUT /portfolio/{id}`
    pub async fn update_item(&self, id: i64, payload: &ItemPayload) -> ApiResult<PortfolioItem> {
        self.fetch(
            self.request(Method::PUT, &format!("/portfolio/{id}"))
                .json(payload),
        )
        .await
    }

    /// `DELETE /portfolio/{id}`
    pub async fn delete_item(&self, id: i64) -> ApiResult<()> {
        self.execute(self.request(Method::DELETE, &format!("/portfolio/{id}")))
            .await?;
        Ok(())
    }

    /// `POST /portfolio/upload-image` — multipart with a single `file`
    /// field. Bypasses the JSON content type but still runs through the
    /// shared error normalization.
    pub async fn upload_image(
        &self,
        file_name: &str,
        mime: &str,
        bytes: Vec<u8>,
    ) -> ApiResult<String> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime)
            .map_err(|_| ApiError::Upload)?;
        let form = reqwest::multipart::Form::new().part("file", part);
        let response: UploadResponse = self
            .fetch(
                self.request(Method::POST, "/portfolio/upload-image")
                    .multipart(form),
            )
            .await?;
        Ok(response.image_url)
    }
}

/// Pull a human-readable message out of a backend error body
/// (`detail` or `message`), if there is one.
async fn backend_message(response: reqwest::Response) -> Option<String> {
    let body = response.text().await.ok()?;
    let value: Value = serde_json::from_str(&body).ok()?;
    value
        .get("detail")
        .or_else(|| value.get("message"))
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::MemoryStore;

    #[test]
    fn test_origin_of_strips_api_path() {
        assert_eq!(
            origin_of("http://localhost:8000/api/v1"),
            "http://localhost:8000"
        );
        assert_eq!(
            origin_of("https://folio.example.com/api/v1/"),
            "https://folio.example.com"
        );
        assert_eq!(origin_of("http://localhost:8000"), "http://localhost:8000");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new(
            "http://localhost:8000/api/v1/",
            Arc::new(MemoryStore::new()),
        );
        assert_eq!(client.base_url(), "http://localhost:8000/api/v1");
        assert_eq!(client.origin(), "http://localhost:8000");
    }
}
