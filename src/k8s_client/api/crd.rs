use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The subset of `apiextensions.k8s.io/v1` CustomResourceDefinition we read.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CustomResourceDefinition {
    #[serde(rename = "apiVersion", default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    pub metadata: Metadata,
    pub spec: CrdSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Metadata {
    pub name: String,
    #[serde(rename = "resourceVersion", default)]
    pub resource_version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CrdSpec {
    pub group: String,
    pub names: CrdNames,
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub versions: Vec<CrdVersion>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CrdNames {
    pub kind: String,
    pub plural: String,
    #[serde(default)]
    pub singular: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CrdVersion {
    pub name: String,
    #[serde(default)]
    pub served: bool,
    #[serde(default)]
    pub storage: bool,
    pub schema: Option<CustomResourceValidation>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CustomResourceValidation {
    #[serde(rename = "openAPIV3Schema")]
    pub open_api_v3_schema: Option<Value>,
}
