use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{
    normalize_page, normalize_posts, CreatePersonPayload, Page, Person, Post, PostPayload, Role,
    SigninRequest, SigninResponse, UpdatePersonPayload,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Everything that can go wrong talking to the backend. Each variant maps to
/// one branch of the user-facing failure handling: auth failures end the
/// session, everything else is scoped to the action that triggered it.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not signed in")]
    SessionMissing,

    #[error("{0}")]
    AuthFailed(String),

    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("connection failure: {0}")]
    Unreachable(String),

    #[error("invalid response from server: {0}")]
    Parse(String),

    #[error("invalid server URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// True when the backend rejected our credentials; the session is dead.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, ApiError::AuthFailed(_) | ApiError::SessionMissing)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Parse(err.to_string())
        } else {
            // Connect errors, timeouts and everything transport-shaped share
            // the "connection failure" path.
            ApiError::Unreachable(err.to_string())
        }
    }
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let base = sanitize_base_url(base_url.into())?;
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| ApiError::Unreachable(err.to_string()))?;
        Ok(Self {
            base_url: base,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_base_url(&mut self, base_url: impl Into<String>) -> Result<(), ApiError> {
        self.base_url = sanitize_base_url(base_url.into())?;
        Ok(())
    }

    pub fn signin(&self, username: &str, password: &str) -> Result<SigninResponse, ApiError> {
        let url = self.url("/user/signin")?;
        let request = SigninRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response = self.client.post(url).json(&request).send()?;
        read_json(response)
    }

    /// Self-registration; the same endpoint as admin create but unauthenticated.
    pub fn register(&self, payload: &CreatePersonPayload) -> Result<(), ApiError> {
        let url = self.url("/user")?;
        let response = self.client.post(url).json(payload).send()?;
        expect_success(response)
    }

    pub fn list_persons(
        &self,
        token: &str,
        role: Role,
        page: u32,
        size: usize,
    ) -> Result<Page<Person>, ApiError> {
        let url = self.url(&format!("/person/role/{}", role.as_str()))?;
        let response = self
            .client
            .get(url)
            .query(&[("page", page.to_string()), ("size", size.to_string())])
            .bearer_auth(token)
            .send()?;
        let value: serde_json::Value = read_json(response)?;
        normalize_page(value, size).map_err(|err| ApiError::Parse(err.to_string()))
    }

    pub fn create_person(
        &self,
        token: &str,
        payload: &CreatePersonPayload,
    ) -> Result<(), ApiError> {
        let url = self.url("/user")?;
        let response = self
            .client
            .post(url)
            .json(payload)
            .bearer_auth(token)
            .send()?;
        expect_success(response)
    }

    pub fn update_person(
        &self,
        token: &str,
        user_id: i64,
        payload: &UpdatePersonPayload,
    ) -> Result<(), ApiError> {
        let url = self.url(&format!("/user/{user_id}"))?;
        let response = self
            .client
            .put(url)
            .json(payload)
            .bearer_auth(token)
            .send()?;
        expect_success(response)
    }

    pub fn delete_person(&self, token: &str, user_id: i64) -> Result<(), ApiError> {
        let url = self.url(&format!("/user/{user_id}"))?;
        let response = self.client.delete(url).bearer_auth(token).send()?;
        expect_success(response)
    }

    pub fn list_posts(&self, token: &str) -> Result<Vec<Post>, ApiError> {
        let url = self.url("/posts")?;
        let response = self.client.get(url).bearer_auth(token).send()?;
        let value: serde_json::Value = read_json(response)?;
        normalize_posts(value).map_err(|err| ApiError::Parse(err.to_string()))
    }

    pub fn create_post(&self, token: &str, payload: &PostPayload) -> Result<(), ApiError> {
        let url = self.url("/posts")?;
        let response = self
            .client
            .post(url)
            .json(payload)
            .bearer_auth(token)
            .send()?;
        expect_success(response)
    }

    pub fn update_post(
        &self,
        token: &str,
        post_id: &str,
        payload: &PostPayload,
    ) -> Result<(), ApiError> {
        let url = self.url(&format!("/posts/{post_id}"))?;
        let response = self
            .client
            .put(url)
            .json(payload)
            .bearer_auth(token)
            .send()?;
        expect_success(response)
    }

    pub fn delete_post(&self, token: &str, post_id: &str) -> Result<(), ApiError> {
        let url = self.url(&format!("/posts/{post_id}"))?;
        let response = self.client.delete(url).bearer_auth(token).send()?;
        expect_success(response)
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|err| ApiError::InvalidUrl(err.to_string()))?;
        url.set_path(path.trim_start_matches('/'));
        Ok(url)
    }
}

fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if status.is_success() {
        response.json().map_err(|err| ApiError::Parse(err.to_string()))
    } else {
        Err(error_from_response(status, response))
    }
}

fn expect_success(response: Response) -> Result<(), ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(error_from_response(status, response))
    }
}

/// Non-2xx responses carry their explanation in a JSON `message` field when
/// the backend bothered to provide one.
fn error_from_response(status: StatusCode, response: Response) -> ApiError {
    let body = response.text().unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| format!("request failed with status {}", status.as_u16()));

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::AuthFailed(message),
        _ => ApiError::Server {
            status: status.as_u16(),
            message,
        },
    }
}

fn sanitize_base_url(mut base: String) -> Result<String, ApiError> {
    if base.trim().is_empty() {
        return Err(ApiError::InvalidUrl("URL cannot be empty".into()));
    }
    if !base.starts_with("http://") && !base.starts_with("https://") {
        base = format!("http://{base}");
    }
    while base.ends_with('/') {
        base.pop();
    }
    // Validate once
    let _ = Url::parse(&base).map_err(|err| ApiError::InvalidUrl(err.to_string()))?;
    Ok(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let client = ApiClient::new("http://localhost:8080///").expect("valid url");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn bare_host_gets_a_scheme() {
        let client = ApiClient::new("10.0.2.2:8080").expect("valid url");
        assert_eq!(client.base_url(), "http://10.0.2.2:8080");
    }

    #[test]
    fn empty_url_is_rejected() {
        assert!(matches!(
            ApiClient::new(""),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn auth_errors_are_distinguished() {
        assert!(ApiError::SessionMissing.is_auth_error());
        assert!(ApiError::AuthFailed("nope".into()).is_auth_error());
        assert!(!ApiError::Unreachable("refused".into()).is_auth_error());
        assert!(!ApiError::Server {
            status: 500,
            message: "boom".into()
        }
        .is_auth_error());
    }
}
