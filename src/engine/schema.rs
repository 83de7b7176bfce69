use super::resolver::ResourceDescriptor;
use crate::k8s_client::{
    api::{CrdVersion, CustomResourceDefinition},
    CrdSource, K8sClientError,
};
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("CustomResourceDefinition \"{}\" not found", name)]
    CrdNotFound { name: String },
    #[error("Could not get CustomResourceDefinition \"{}\": {}", name, err)]
    Fetch { name: String, err: K8sClientError },
    #[error("CustomResourceDefinition \"{}\" has no version \"{}\" (available: {})", name, version, available.join(", "))]
    VersionNotFound {
        name: String,
        version: String,
        available: Vec<String>,
    },
    #[error("CustomResourceDefinition \"{}\" version \"{}\" has no openAPIV3Schema", name, version)]
    SchemaMissing { name: String, version: String },
    #[error("Could not serialize schema: {:?}", _0)]
    Serialize(#[from] serde_json::Error),
}

/// The last version entry named `version`, mirroring how discovery duplicates are handled.
pub fn select_version<'a>(crd: &'a CustomResourceDefinition, version: &str) -> Option<&'a CrdVersion> {
    crd.spec.versions.iter().filter(|v| v.name == version).last()
}

/// Two-space indented JSON with a trailing newline. Object keys come out sorted.
pub fn to_json(schema: &Value) -> Result<Vec<u8>, SchemaError> {
    let mut buf = serde_json::to_vec_pretty(schema)?;
    buf.push(b'\n');
    Ok(buf)
}

pub async fn extract<S: CrdSource>(
    source: &S,
    descriptor: &ResourceDescriptor,
    version: &str,
) -> Result<Vec<u8>, SchemaError> {
    let name = descriptor.crd_name();
    let crd = match source.custom_resource_definition(&name).await {
        Ok(crd) => crd,
        Err(err) if err.is_not_found() => return Err(SchemaError::CrdNotFound { name }),
        Err(err) => return Err(SchemaError::Fetch { name, err }),
    };

    let selected = select_version(&crd, version).ok_or_else(|| SchemaError::VersionNotFound {
        name: name.clone(),
        version: version.to_string(),
        available: crd.spec.versions.iter().map(|v| v.name.clone()).collect(),
    })?;
    let schema = selected
        .schema
        .as_ref()
        .and_then(|s| s.open_api_v3_schema.as_ref())
        .ok_or_else(|| SchemaError::SchemaMissing {
            name: name.clone(),
            version: version.to_string(),
        })?;
    to_json(schema)
}
