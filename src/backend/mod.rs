//! Client for the external REST backend.
//!
//! Every backend response is a `{success, data, message}` envelope. The
//! backend authenticates with its own session cookie, which we keep in our
//! encrypted cookie session and forward on each call.

pub mod endpoints;

use std::fmt;

use reqwest::{Method, StatusCode, header};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

#[derive(Debug)]
pub enum BackendError {
    Transport(reqwest::Error),
    /// The backend rejected our session cookie (HTTP 401).
    Unauthorized,
    Status { status: u16, message: String },
    /// 2xx response with `success: false`.
    Rejected(String),
    Decode(String),
}

impl BackendError {
    /// Message suitable for a flash or an inline form error.
    pub fn user_message(&self) -> String {
        match self {
            BackendError::Transport(_) => "The server could not be reached. Please try again.".to_string(),
            BackendError::Unauthorized => "Your session has expired. Please sign in again.".to_string(),
            BackendError::Status { message, .. } | BackendError::Rejected(message) => message.clone(),
            BackendError::Decode(_) => "The server returned an unexpected response.".to_string(),
        }
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Transport(e) => write!(f, "Backend transport error: {e}"),
            BackendError::Unauthorized => write!(f, "Backend session rejected"),
            BackendError::Status { status, message } => {
                write!(f, "Backend returned {status}: {message}")
            }
            BackendError::Rejected(msg) => write!(f, "Backend rejected request: {msg}"),
            BackendError::Decode(e) => write!(f, "Backend response decode error: {e}"),
        }
    }
}

impl std::error::Error for BackendError {}

impl From<reqwest::Error> for BackendError {
    fn from(e: reqwest::Error) -> Self {
        BackendError::Transport(e)
    }
}

#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn into_data(self) -> Result<T, BackendError> {
        self.data
            .ok_or_else(|| BackendError::Decode("envelope has no data".to_string()))
    }
}

/// Parsed login response: the employee record plus the cookie to forward.
#[derive(Debug)]
pub struct LoginResponse<T> {
    pub data: T,
    pub cookie: Option<String>,
}

#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and unwrap the envelope. Fails on transport errors,
    /// non-2xx statuses and `success: false`.
    pub async fn request<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        cookie: Option<&str>,
    ) -> Result<Envelope<T>, BackendError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut req = self
            .http
            .request(method.clone(), self.url(path))
            .header(header::ACCEPT, "application/json");
        if let Some(cookie) = cookie {
            req = req.header(header::COOKIE, cookie);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        log::debug!("backend {} {}", method, path);
        let resp = req.send().await?;
        read_envelope(resp).await
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        cookie: Option<&str>,
    ) -> Result<T, BackendError> {
        self.request::<(), T>(Method::GET, path, None, cookie)
            .await?
            .into_data()
    }

    /// Fetch a list, logging and returning an empty list on any failure.
    /// Used by dashboard widgets where a missing list is not fatal.
    pub async fn get_list_or_empty<T: DeserializeOwned>(
        &self,
        path: &str,
        cookie: Option<&str>,
    ) -> Vec<T> {
        match self.get::<Vec<T>>(path, cookie).await {
            Ok(items) => items,
            Err(e) => {
                log::warn!("GET {path} failed, showing empty list: {e}");
                Vec::new()
            }
        }
    }

    /// Send a mutation and return the backend's message (if any). The `data`
    /// field is ignored.
    pub async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        cookie: Option<&str>,
    ) -> Result<Option<String>, BackendError> {
        let envelope = self
            .request::<B, serde_json::Value>(method, path, body, cookie)
            .await?;
        Ok(envelope.message)
    }

    pub async fn delete(&self, path: &str, cookie: Option<&str>) -> Result<Option<String>, BackendError> {
        self.send::<()>(Method::DELETE, path, None, cookie).await
    }

    /// POST credentials and capture the backend's session cookie from
    /// `Set-Cookie` so it can be forwarded later.
    pub async fn login<B, T>(&self, path: &str, body: &B) -> Result<LoginResponse<T>, BackendError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self
            .http
            .post(self.url(path))
            .header(header::ACCEPT, "application/json")
            .json(body)
            .send()
            .await?;

        let cookie = collect_cookies(resp.headers());
        let data = read_envelope::<T>(resp).await?.into_data()?;
        Ok(LoginResponse { data, cookie })
    }
}

async fn read_envelope<T: DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<Envelope<T>, BackendError> {
    let status = resp.status();
    let body = resp.text().await?;

    if status == StatusCode::UNAUTHORIZED {
        return Err(BackendError::Unauthorized);
    }
    if !status.is_success() {
        return Err(BackendError::Status {
            status: status.as_u16(),
            message: error_message(&body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            }),
        });
    }

    let envelope: Envelope<T> =
        serde_json::from_str(&body).map_err(|e| BackendError::Decode(e.to_string()))?;
    if !envelope.success {
        return Err(BackendError::Rejected(
            envelope
                .message
                .unwrap_or_else(|| "Request failed".to_string()),
        ));
    }
    Ok(envelope)
}

/// Pull `message` out of an error body, if it is a JSON envelope.
fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("message")?
        .as_str()
        .map(String::from)
}

/// Reduce `Set-Cookie` headers to a `Cookie` request header value.
fn collect_cookies(headers: &header::HeaderMap) -> Option<String> {
    let pairs: Vec<&str> = headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .collect();
    if pairs.is_empty() {
        None
    } else {
        Some(pairs.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderMap, HeaderValue, SET_COOKIE};

    #[test]
    fn test_collect_cookies() {
        let mut headers = HeaderMap::new();
        headers.append(SET_COOKIE, HeaderValue::from_static("token=abc; Path=/; HttpOnly"));
        headers.append(SET_COOKIE, HeaderValue::from_static("role=hr; Path=/"));
        assert_eq!(collect_cookies(&headers).as_deref(), Some("token=abc; role=hr"));
        assert_eq!(collect_cookies(&HeaderMap::new()), None);
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            error_message(r#"{"success":false,"message":"Email already exists"}"#).as_deref(),
            Some("Email already exists")
        );
        assert_eq!(error_message("<html>Bad Gateway</html>"), None);
    }
}
