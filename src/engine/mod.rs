#[cfg(test)]
mod fake;
pub mod output;
pub mod resolver;
pub mod schema;

use crate::{
    error::Error,
    k8s_client::{api::GroupVersionKind, CrdSource, DiscoverySource},
};
pub use resolver::MatchPolicy;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct Request {
    pub gvk: GroupVersionKind,
    pub output: Option<PathBuf>,
    pub policy: MatchPolicy,
}

/// Resolves the request's GVK, fetches its CRD schema and writes it to disk.
/// Returns the path of the written file.
pub async fn extract<S>(source: &S, request: &Request) -> Result<PathBuf, Error>
where
    S: DiscoverySource + CrdSource,
{
    let gvk = &request.gvk;
    let descriptor = resolver::resolve(source, gvk, request.policy)
        .await?
        .into_found(gvk)?;
    info!(crd = %descriptor.crd_name(), group_version = %descriptor.api_group_version, "resolved resource");

    let json = schema::extract(source, &descriptor, &gvk.version).await?;

    let path = output::output_path(request.output.as_deref(), gvk);
    output::write_schema(&path, &json)?;
    info!(path = %path.display(), bytes = json.len(), "wrote schema");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{
        fake::{list, resource, widget_crd, FakeCluster, ALL_VERBS},
        resolver::ResolveError,
        schema::SchemaError,
    };
    use serde_json::{json, Value};
    use std::fs;

    fn widget_cluster() -> FakeCluster {
        let schema = json!({
            "type": "object",
            "properties": {
                "spec": {"type": "object", "properties": {"size": {"type": "integer"}}}
            }
        });
        FakeCluster {
            lists: vec![
                list("v1", vec![resource("configmaps", "ConfigMap", ALL_VERBS)]),
                list(
                    "example.com/v1",
                    vec![
                        resource("widgets", "Widget", ALL_VERBS),
                        resource("widgets/status", "Widget", &["get", "patch", "update"]),
                    ],
                ),
            ],
            crds: vec![widget_crd(vec![("v1", Some(schema))])],
            unreachable: false,
        }
    }

    fn request(out: &std::path::Path, version: &str) -> Request {
        Request {
            gvk: GroupVersionKind::gvk("example.com", version, "Widget"),
            output: Some(out.to_path_buf()),
            policy: MatchPolicy::LastWins,
        }
    }

    #[test]
    fn writes_schema_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = tokio_test::block_on(extract(&widget_cluster(), &request(dir.path(), "v1"))).unwrap();
        assert_eq!(path, dir.path().join("example.com/v1/widget.json"));

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.ends_with("}\n"));
        assert!(text.contains("\n  \"properties\": {\n"));
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["properties"]["spec"]["properties"]["size"]["type"], "integer");
    }

    #[test]
    fn unknown_kind_fails_before_fetching() {
        let dir = tempfile::tempdir().unwrap();
        let mut req = request(dir.path(), "v1");
        req.gvk.kind = "Gadget".to_string();
        let err = tokio_test::block_on(extract(&widget_cluster(), &req)).unwrap_err();
        assert!(matches!(err, Error::Resolve(ResolveError::NotFound(_))));
        assert!(!dir.path().join("example.com").exists());
    }

    #[test]
    fn unserved_version_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut cluster = widget_cluster();
        // discovery serves v2 but the CRD object does not define it
        cluster.lists.push(list("example.com/v2", vec![resource("widgets", "Widget", ALL_VERBS)]));
        let err = tokio_test::block_on(extract(&cluster, &request(dir.path(), "v2"))).unwrap_err();
        assert!(matches!(err, Error::Schema(SchemaError::VersionNotFound { .. })));
        assert!(!dir.path().join("example.com/v2/widget.json").exists());
    }
}
