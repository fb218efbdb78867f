//! HTTP client for the ControlMonkey API.
//!
//! Every request is signed with the bearer token resolved from the
//! configured [`Credentials`].

mod request;

pub use request::Request;

use std::sync::Arc;

use reqwest::header::{
    ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT,
};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::Config;
use crate::credentials::Credentials;
use crate::session::Session;
use crate::{Error, Result};

#[derive(Clone, Debug)]
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
    credentials: Arc<Credentials>,
    user_agent: Option<String>,
    content_type: Option<String>,
}

impl Client {
    pub fn new(config: &Config) -> Result<Self> {
        let base_url = config
            .base_url
            .clone()
            .ok_or_else(|| Error::Config("base URL not set".into()))?;
        let credentials = config
            .credentials
            .clone()
            .ok_or_else(|| Error::Config("credentials not set".into()))?;
        let http = config
            .http_client
            .clone()
            .ok_or_else(|| Error::Config("HTTP client not set".into()))?;

        Ok(Self {
            http,
            base_url,
            credentials,
            user_agent: config.user_agent.clone(),
            content_type: config.content_type.clone(),
        })
    }

    pub fn from_session(session: &Session) -> Result<Self> {
        Self::new(&session.config)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn credentials(&self) -> &Arc<Credentials> {
        &self.credentials
    }

    /// Send `request` with its object wrapped as `{"entity": ...}`.
    pub async fn execute(&self, request: Request) -> Result<reqwest::Response> {
        self.send(request, true).await
    }

    /// Send `request` with its object as the body as-is.
    pub async fn execute_raw(&self, request: Request) -> Result<reqwest::Response> {
        self.send(request, false).await
    }

    /// Send and decode the JSON response.
    pub async fn execute_json<T: DeserializeOwned>(&self, request: Request) -> Result<T> {
        let response = self.execute(request).await?;
        Self::decode(response).await
    }

    async fn send(&self, request: Request, wrap_entity: bool) -> Result<reqwest::Response> {
        let url = self.url(&request)?;
        let headers = self.headers(&request).await?;
        let body = request.encode_body(wrap_entity)?;

        tracing::debug!(method = %request.method, url = %url, "Sending request");

        let mut builder = self
            .http
            .request(request.method.clone(), url.clone())
            .headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        tracing::debug!(
            method = %request.method,
            url = %url,
            status = response.status().as_u16(),
            "Received response"
        );
        Self::require_ok(response).await
    }

    fn url(&self, request: &Request) -> Result<Url> {
        let mut url = self.base_url.join(&request.path)?;
        if !request.params.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.params);
        }
        Ok(url)
    }

    async fn headers(&self, request: &Request) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        for (name, value) in &request.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| Error::InvalidRequest(format!("header name {}: {}", name, e)))?;
            headers.append(name, header_value(value)?);
        }

        let creds = self.credentials.get().await?;
        if !creds.token.is_empty() {
            let mut auth = header_value(&format!("Bearer {}", creds.token))?;
            auth.set_sensitive(true);
            headers.insert(AUTHORIZATION, auth);
        }

        if let Some(content_type) = &self.content_type {
            let value = header_value(content_type)?;
            headers.insert(CONTENT_TYPE, value.clone());
            headers.append(ACCEPT, value);
        }
        if let Some(user_agent) = &self.user_agent {
            headers.insert(USER_AGENT, header_value(user_agent)?);
        }
        Ok(headers)
    }

    /// Map a non-2xx response to [`Error::Api`].
    pub async fn require_ok(response: reqwest::Response) -> Result<reqwest::Response> {
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                message: text,
                status: Some(status),
            });
        }
        Ok(response)
    }

    pub async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| Error::InvalidRequest(format!("invalid header value: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config::new()
            .with_base_url(Url::parse("https://api.example.com/").unwrap())
            .with_http_client(reqwest::Client::new())
            .with_credentials(Credentials::from_static("token"))
            .with_user_agent("test/1.0")
            .with_content_type("application/json")
    }

    #[test]
    fn test_new_requires_base_url() {
        let mut cfg = config();
        cfg.base_url = None;
        assert!(matches!(Client::new(&cfg), Err(Error::Config(_))));
    }

    #[test]
    fn test_new_requires_credentials() {
        let mut cfg = config();
        cfg.credentials = None;
        assert!(matches!(Client::new(&cfg), Err(Error::Config(_))));
    }

    #[test]
    fn test_url_with_params() {
        let client = Client::new(&config()).unwrap();
        let url = client
            .url(&Request::get("/stack").param("namespaceId", "ns-1"))
            .unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/stack?namespaceId=ns-1");

        let url = client.url(&Request::get("/stack")).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/stack");
    }

    #[tokio::test]
    async fn test_headers() {
        let client = Client::new(&config()).unwrap();
        let headers = client
            .headers(&Request::get("/stack").header("X-Trace", "abc"))
            .await
            .unwrap();

        assert_eq!(headers[AUTHORIZATION], "Bearer token");
        assert!(headers[AUTHORIZATION].is_sensitive());
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert_eq!(headers[ACCEPT], "application/json");
        assert_eq!(headers[USER_AGENT], "test/1.0");
        assert_eq!(headers["x-trace"], "abc");
    }

    #[tokio::test]
    async fn test_credentials_error_propagates() {
        let cfg = config().with_credentials(Credentials::from_static(""));
        let client = Client::new(&cfg).unwrap();
        let err = client.headers(&Request::get("/stack")).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Credentials(crate::credentials::CredentialsError::Empty)
        ));
    }
}
