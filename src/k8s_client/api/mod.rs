mod api_group;
mod api_resource;
mod api_version;
pub mod cluster_config;
mod crd;
mod group_version;

use self::api_version::ApiVersions;
use api_group::ApiGroupList;
pub use api_resource::{ApiResource, ApiResourceList};
pub use crd::{CrdNames, CrdSpec, CrdVersion, CustomResourceDefinition, CustomResourceValidation, Metadata};
pub use group_version::{GroupVersion, GroupVersionKind, GvkError};
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use std::fmt;

pub trait ApiGetter: Clone {
    type Output;
    fn get(&self) -> Req<Self::Output>;
}

#[derive(Debug, thiserror::Error)]
pub enum K8sApiError {
    #[error("Unexpected status [{}] from {}{}", .status, .url, message_suffix(.message))]
    UnexpectedStatus {
        status: StatusCode,
        url: String,
        message: Option<String>,
    },
    #[error("Deserialization error: {:?}", _0)]
    Deserialize(#[from] serde_json::Error),
}

fn message_suffix(message: &Option<String>) -> String {
    match message {
        Some(message) => format!(": {}", message),
        None => String::new(),
    }
}

impl K8sApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::Deserialize(_) => None,
        }
    }
}

/// `metav1.Status`, returned by the API server alongside error codes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiStatus {
    pub message: Option<String>,
}

#[derive(Clone)]
pub struct Req<T> {
    pub method: Method,
    pub relative_url: String,
    pub status_check: fn(StatusCode) -> bool,
    pub response: fn(&[u8]) -> Result<T, K8sApiError>,
}

impl<T> fmt::Debug for Req<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Req")
            .field("method", &self.method)
            .field("relative_url", &self.relative_url)
            .field("response", &"fn(...)")
            .finish()
    }
}

impl<T> Req<T> {
    fn get<S: Into<String>>(relative_url: S, f: fn(&[u8]) -> Result<T, K8sApiError>) -> Self {
        Self {
            method: Method::GET,
            relative_url: relative_url.into(),
            status_check: |status_code| status_code == StatusCode::OK,
            response: f,
        }
    }
}

/// Resources of one group-version. The core group lives under `/api`.
#[derive(Debug, Clone)]
pub struct ApiResourceListGetter<'a> {
    pub group: Option<&'a str>,
    pub version: &'a str,
}
impl<'a> ApiGetter for ApiResourceListGetter<'a> {
    type Output = ApiResourceList;
    fn get(&self) -> Req<Self::Output> {
        let path = match self.group {
            Some(group) => format!("/apis/{}/{}", group, self.version),
            None => format!("/api/{}", self.version),
        };

        Req::get(path, |resp| Ok(serde_json::from_slice(resp)?))
    }
}

#[derive(Debug, Clone)]
pub struct ApiGroupListGetter;
impl ApiGetter for ApiGroupListGetter {
    type Output = ApiGroupList;
    fn get(&self) -> Req<Self::Output> {
        Req::get("/apis", |resp| Ok(serde_json::from_slice(resp)?))
    }
}

#[derive(Debug, Clone)]
pub struct ApiVersionListGetter;
impl ApiGetter for ApiVersionListGetter {
    type Output = ApiVersions;
    fn get(&self) -> Req<Self::Output> {
        Req::get("/api", |resp| Ok(serde_json::from_slice(resp)?))
    }
}

#[derive(Debug, Clone)]
pub struct CrdGetter<'a> {
    pub name: &'a str,
}
impl<'a> ApiGetter for CrdGetter<'a> {
    type Output = CustomResourceDefinition;
    fn get(&self) -> Req<Self::Output> {
        Req::get(
            format!("/apis/apiextensions.k8s.io/v1/customresourcedefinitions/{}", self.name),
            |resp| Ok(serde_json::from_slice(resp)?),
        )
    }
}
