use crate::k8s_client::{
    api::{ApiResourceList, GroupVersion, GroupVersionKind},
    DiscoverySource, K8sClientError,
};
use tracing::{debug, warn};

/// The discovery record a GVK resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    pub api_group: String,
    pub api_group_version: String,
    pub resource_name: String,
    pub kind: String,
}

impl ResourceDescriptor {
    /// CustomResourceDefinitions are named `<plural>.<group>`
    pub fn crd_name(&self) -> String {
        format!("{}.{}", self.resource_name, self.api_group)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(ResourceDescriptor),
    NotFound,
}

impl Resolution {
    pub fn into_found(self, gvk: &GroupVersionKind) -> Result<ResourceDescriptor, ResolveError> {
        match self {
            Resolution::Found(descriptor) => Ok(descriptor),
            Resolution::NotFound => Err(ResolveError::NotFound(gvk.clone())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("Discovery failed: {}", _0)]
    Discovery(#[from] K8sClientError),
    #[error("the server doesn't have a resource type for {}", _0)]
    NotFound(GroupVersionKind),
    #[error("{} matches more than one resource: {}", gvk, candidates.join(", "))]
    Ambiguous {
        gvk: GroupVersionKind,
        candidates: Vec<String>,
    },
}

/// What to do when several discovery entries match the same GVK.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPolicy {
    /// The last match in discovery order is used.
    LastWins,
    /// More than one match is an error.
    Strict,
}

impl MatchPolicy {
    fn select(
        self,
        gvk: &GroupVersionKind,
        mut candidates: Vec<ResourceDescriptor>,
    ) -> Result<Resolution, ResolveError> {
        if candidates.len() > 1 {
            let names: Vec<String> = candidates.iter().map(ResourceDescriptor::crd_name).collect();
            match self {
                MatchPolicy::Strict => {
                    return Err(ResolveError::Ambiguous {
                        gvk: gvk.clone(),
                        candidates: names,
                    })
                }
                MatchPolicy::LastWins => {
                    warn!(%gvk, candidates = ?names, "several resources match, using the last one");
                }
            }
        }
        Ok(match candidates.pop() {
            Some(descriptor) => Resolution::Found(descriptor),
            None => Resolution::NotFound,
        })
    }
}

pub fn resolve_entries(
    lists: &[ApiResourceList],
    gvk: &GroupVersionKind,
    policy: MatchPolicy,
) -> Result<Resolution, ResolveError> {
    let mut candidates = Vec::new();
    for list in lists {
        if list.resources.is_empty() {
            continue;
        }
        let gv: GroupVersion = match list.group_version.parse() {
            Ok(gv) => gv,
            Err(err) => {
                debug!(group_version = %list.group_version, %err, "skipping discovery entry");
                continue;
            }
        };
        if gv.group != gvk.group || gv.version != gvk.version {
            continue;
        }
        for resource in &list.resources {
            // no verbs means nothing can be done with it
            if resource.verbs.is_empty() || resource.is_subresource() {
                continue;
            }
            if resource.kind == gvk.kind {
                candidates.push(ResourceDescriptor {
                    api_group: gv.group.clone(),
                    api_group_version: gv.to_string(),
                    resource_name: resource.name.clone(),
                    kind: resource.kind.clone(),
                });
            }
        }
    }
    policy.select(gvk, candidates)
}

pub async fn resolve<S: DiscoverySource>(
    source: &S,
    gvk: &GroupVersionKind,
    policy: MatchPolicy,
) -> Result<Resolution, ResolveError> {
    let lists = source.api_resource_lists().await?;
    resolve_entries(&lists, gvk, policy)
}
