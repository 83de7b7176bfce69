use super::{
    api::{ApiGroupListGetter, ApiResourceList, ApiResourceListGetter, ApiVersionListGetter, CrdGetter, CustomResourceDefinition},
    K8sClient, K8sClientError,
};
use async_trait::async_trait;
use tracing::debug;

/// Everything the cluster serves, one entry per group-version.
#[async_trait]
pub trait DiscoverySource {
    async fn api_resource_lists(&self) -> Result<Vec<ApiResourceList>, K8sClientError>;
}

#[async_trait]
pub trait CrdSource {
    async fn custom_resource_definition(&self, name: &str) -> Result<CustomResourceDefinition, K8sClientError>;
}

#[async_trait]
impl DiscoverySource for K8sClient {
    async fn api_resource_lists(&self) -> Result<Vec<ApiResourceList>, K8sClientError> {
        let mut lists = Vec::new();

        let api_versions = self.get(&ApiVersionListGetter).await?;
        for version in api_versions.versions {
            let list = self
                .get(&ApiResourceListGetter {
                    group: None,
                    version: &version,
                })
                .await?;
            debug!(group_version = %list.group_version, resources = list.resources.len(), "discovered core resources");
            lists.push(list);
        }

        let group_list = self.get(&ApiGroupListGetter).await?;
        for group in group_list.groups {
            for version in group.versions {
                let list = self
                    .get(&ApiResourceListGetter {
                        group: Some(group.name.as_str()),
                        version: &version.version,
                    })
                    .await?;
                debug!(group_version = %list.group_version, resources = list.resources.len(), "discovered resources");
                lists.push(list);
            }
        }
        Ok(lists)
    }
}

#[async_trait]
impl CrdSource for K8sClient {
    async fn custom_resource_definition(&self, name: &str) -> Result<CustomResourceDefinition, K8sClientError> {
        self.get(&CrdGetter { name }).await
    }
}
