use crate::{
    engine::{output::OutputError, resolver::ResolveError, schema::SchemaError},
    k8s_client::{
        api::{cluster_config::ClusterConfigError, GvkError},
        K8sClientError,
    },
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid arguments: {}", _0)]
    Gvk(#[from] GvkError),
    #[error("Could not obtain cluster config: {}", _0)]
    ClusterConfig(#[from] ClusterConfigError),
    #[error("Kubernetes client error: {}", _0)]
    K8sClient(#[from] K8sClientError),
    #[error("{}", _0)]
    Resolve(#[from] ResolveError),
    #[error("{}", _0)]
    Schema(#[from] SchemaError),
    #[error("{}", _0)]
    Output(#[from] OutputError),
    #[error("Cancelled")]
    Cancelled,
}
