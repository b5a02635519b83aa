use std::sync::Arc;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::ApiErrorBody;
use tokio::sync::watch;
use tracing::{debug, warn};
use url::Url;

use crate::error::{Error, Result};
use crate::token_store::TokenStore;

pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// HTTP transport bound to one backend.
///
/// Every request reads the [`TokenStore`] afresh and carries the token as a
/// bearer credential when one is stored. A 401 or 403 answer clears the store
/// and fires the rejection signal, then the status error is returned as is.
/// The session is left alone on that path.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    tokens: TokenStore,
    rejected: Arc<watch::Sender<()>>,
}

impl ApiClient {
    pub fn new(base_url: Url, tokens: TokenStore) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, tokens)
    }

    pub fn with_client(http: reqwest::Client, base_url: Url, tokens: TokenStore) -> Self {
        let (rejected, _) = watch::channel(());
        Self {
            http,
            base_url,
            tokens,
            rejected: Arc::new(rejected),
        }
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Signal fired each time the backend refuses the stored credential.
    pub fn rejections(&self) -> watch::Receiver<()> {
        self.rejected.subscribe()
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let raw = format!(
            "{base}/{path}",
            base = self.base_url.as_str().trim_end_matches('/'),
            path = path.trim_start_matches('/'),
        );
        Ok(Url::parse(&raw)?)
    }

    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.endpoint(path)?;
        let builder = self.http.request(method, url);
        Ok(match self.tokens.read() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    pub async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.map_err(|error| {
            if error.is_builder() {
                warn!(error = %error, "Request could not be built, nothing was sent");
                Error::Request(error)
            } else {
                warn!(error = %error, "Request failed without a response");
                Error::Network(error)
            }
        })?;
        let status = response.status();
        debug!(status = %status, url = %response.url(), "Response received");

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            warn!(status = %status, "Credentials rejected, clearing stored token");
            self.tokens.clear();
            self.rejected.send_replace(());
        }

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ApiErrorBody>(&body) {
            Ok(payload) => payload.error,
            Err(_) if body.trim().is_empty() => status.canonical_reason().unwrap_or_default().to_owned(),
            Err(_) => body,
        };
        Err(Error::Status { status, message })
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.execute(self.request(Method::GET, path)?).await?;
        response.json::<T>().await.map_err(Error::Body)
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path)?.json(body);
        let response = self.execute(request).await?;
        response.json::<T>().await.map_err(Error::Body)
    }

    /// Like [`ApiClient::post_json`] for endpoints whose answer is not used.
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        let request = self.request(Method::POST, path)?.json(body);
        self.execute(request).await?;
        Ok(())
    }

    pub async fn patch<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        let request = self.request(Method::PATCH, path)?.json(body);
        self.execute(request).await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        self.execute(self.request(Method::DELETE, path)?).await?;
        Ok(())
    }
}
