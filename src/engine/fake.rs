//! In-memory cluster used by the engine tests.

use crate::k8s_client::{
    api::{
        ApiResource, ApiResourceList, CrdNames, CrdSpec, CrdVersion, CustomResourceDefinition,
        CustomResourceValidation, K8sApiError, Metadata,
    },
    CrdSource, DiscoverySource, K8sClientError,
};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

pub const ALL_VERBS: &[&str] = &["create", "delete", "get", "list", "patch", "update", "watch"];

#[derive(Debug, Default)]
pub struct FakeCluster {
    pub lists: Vec<ApiResourceList>,
    pub crds: Vec<CustomResourceDefinition>,
    pub unreachable: bool,
}

fn status_error(status: StatusCode, path: &str) -> K8sClientError {
    K8sClientError::K8sApi(K8sApiError::UnexpectedStatus {
        status,
        url: format!("https://fake.cluster{}", path),
        message: None,
    })
}

#[async_trait]
impl DiscoverySource for FakeCluster {
    async fn api_resource_lists(&self) -> Result<Vec<ApiResourceList>, K8sClientError> {
        if self.unreachable {
            return Err(status_error(StatusCode::SERVICE_UNAVAILABLE, "/apis"));
        }
        Ok(self.lists.clone())
    }
}

#[async_trait]
impl CrdSource for FakeCluster {
    async fn custom_resource_definition(&self, name: &str) -> Result<CustomResourceDefinition, K8sClientError> {
        let path = format!("/apis/apiextensions.k8s.io/v1/customresourcedefinitions/{}", name);
        if self.unreachable {
            return Err(status_error(StatusCode::SERVICE_UNAVAILABLE, &path));
        }
        self.crds
            .iter()
            .find(|crd| crd.metadata.name == name)
            .cloned()
            .ok_or_else(|| status_error(StatusCode::NOT_FOUND, &path))
    }
}

pub fn resource(name: &str, kind: &str, verbs: &[&str]) -> ApiResource {
    ApiResource {
        kind: kind.to_string(),
        name: name.to_string(),
        namespaced: true,
        verbs: verbs.iter().map(|v| v.to_string()).collect(),
        ..Default::default()
    }
}

pub fn list(group_version: &str, resources: Vec<ApiResource>) -> ApiResourceList {
    ApiResourceList {
        group_version: group_version.to_string(),
        resources,
    }
}

/// `widgets.example.com` with one entry per `(version, schema)`
pub fn widget_crd(versions: Vec<(&str, Option<Value>)>) -> CustomResourceDefinition {
    CustomResourceDefinition {
        api_version: "apiextensions.k8s.io/v1".to_string(),
        kind: "CustomResourceDefinition".to_string(),
        metadata: Metadata {
            name: "widgets.example.com".to_string(),
            ..Default::default()
        },
        spec: CrdSpec {
            group: "example.com".to_string(),
            names: CrdNames {
                kind: "Widget".to_string(),
                plural: "widgets".to_string(),
                singular: Some("widget".to_string()),
            },
            scope: "Namespaced".to_string(),
            versions: versions
                .into_iter()
                .map(|(name, schema)| CrdVersion {
                    name: name.to_string(),
                    served: true,
                    storage: false,
                    schema: Some(CustomResourceValidation {
                        open_api_v3_schema: schema,
                    }),
                })
                .collect(),
        },
    }
}
