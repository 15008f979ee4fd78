use crate::api::HttpTransportConfig;
use crate::error::{Result, RulerError};
use crate::traits::{FetchRequest, FetchResponse, HttpMethod, RulerTransport};
use crate::transport::remote_common::{check_http_status, resolve_api_key};
use async_trait::async_trait;
use reqwest::{Client, Method};

/// Transport that sends ruler requests over HTTP with reqwest.
///
/// Relative request URLs are appended to the configured `base_url`. When
/// `api_key_env` is set, the token it names is sent as a bearer
/// `Authorization` header.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpTransport {
    pub fn new(config: &HttpTransportConfig) -> Result<Self> {
        Self::with_client(config, Client::new())
    }

    /// Build a transport around an existing reqwest client, e.g. one with
    /// custom TLS or timeout settings.
    pub fn with_client(config: &HttpTransportConfig, client: Client) -> Result<Self> {
        config.validate()?;
        let api_key = config
            .api_key_env
            .as_deref()
            .map(resolve_api_key)
            .transpose()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn absolute_url(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else if url.starts_with('/') {
            format!("{}{}", self.base_url, url)
        } else {
            format!("{}/{}", self.base_url, url)
        }
    }
}

#[async_trait]
impl RulerTransport for HttpTransport {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse> {
        let method = match request.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Delete => Method::DELETE,
        };
        let url = self.absolute_url(&request.url);
        tracing::debug!(method = %request.method, url = %url, "Sending ruler request");

        let mut builder = self.client.request(method, &url);
        if !request.params.is_empty() {
            builder = builder.query(&request.params);
        }
        if let Some(data) = &request.data {
            builder = builder.json(data);
        }
        if let Some(api_key) = &self.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| RulerError::Network(e.to_string()))?;
        check_http_status(response).await
    }
}
