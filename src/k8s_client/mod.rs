pub mod api;
#[cfg(test)]
mod fixture;
mod source;

use crate::k8s_client::api::{
    cluster_config::{AuthMethod, ClusterConfig},
    ApiStatus, K8sApiError,
};
use api::ApiGetter;
use reqwest::{
    header::{self, HeaderMap, HeaderValue},
    Certificate, Identity, Method, Request, Response, Url,
};
pub use source::{CrdSource, DiscoverySource};
use std::{str::FromStr, time::Duration};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct K8sClient {
    base_url: Url,
    client: reqwest::Client,
}

#[derive(Debug, thiserror::Error)]
pub enum K8sClientError {
    #[error("Request error {:?}", _0)]
    Reqwest(#[from] reqwest::Error),
    #[error("Url parse error {:?}", _0)]
    UrlParse(#[from] url::ParseError),
    #[error("{}", _0)]
    K8sApi(#[from] K8sApiError),
    #[error("Could not create identity: {:?}", _0)]
    Identity(reqwest::Error),
    #[error("Could not create certificate: {:?}", _0)]
    Certificate(reqwest::Error),
    #[error("Invalid token: {:?}", _0)]
    InvalidToken(header::InvalidHeaderValue),
}

impl K8sClientError {
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::K8sApi(err) => err.status() == Some(reqwest::StatusCode::NOT_FOUND),
            _ => false,
        }
    }
}

impl K8sClient {
    pub fn new(config: &ClusterConfig, timeout: Option<Duration>) -> Result<Self, K8sClientError> {
        let mut builder = reqwest::Client::builder()
            .use_rustls_tls() // identity from PEM only works in rustls
            .danger_accept_invalid_certs(config.insecure_skip_tls_verify);
        if let Some(cacert) = &config.cacert {
            let cacert = Certificate::from_pem(cacert).map_err(K8sClientError::Certificate)?;
            builder = builder.add_root_certificate(cacert);
        }
        match &config.auth {
            AuthMethod::Identity(pem) => {
                let identity = Identity::from_pem(pem).map_err(K8sClientError::Identity)?;
                builder = builder.identity(identity);
            }
            AuthMethod::Token(token) => {
                let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(K8sClientError::InvalidToken)?;
                value.set_sensitive(true);
                let mut headers = HeaderMap::new();
                headers.insert(header::AUTHORIZATION, value);
                builder = builder.default_headers(headers);
            }
            AuthMethod::None => {}
        }
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(K8sClientError::Reqwest)?;
        let base_url = reqwest::Url::from_str(&config.server).map_err(K8sClientError::UrlParse)?;
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn send(&self, method: &Method, uri: &str) -> Result<Response, K8sClientError> {
        let url = self.base_url.join(uri)?;
        debug!(%method, %url, "sending request");
        Ok(self.client.execute(Request::new(method.clone(), url)).await?)
    }

    pub async fn get<T: ApiGetter>(&self, getter: &T) -> Result<T::Output, K8sClientError> {
        let req = getter.get();
        let resp = self.send(&req.method, &req.relative_url).await?;
        let status = resp.status();
        if !(req.status_check)(status) {
            let url = resp.url().to_string();
            // the body is a metav1.Status for most API errors
            let message = resp
                .bytes()
                .await
                .ok()
                .and_then(|bytes| serde_json::from_slice::<ApiStatus>(&bytes).ok())
                .and_then(|status| status.message);
            return Err(K8sClientError::K8sApi(K8sApiError::UnexpectedStatus { status, url, message }));
        }
        let bytes = resp.bytes().await?;
        let result = (req.response)(&bytes)?;
        Ok(result)
    }
}
