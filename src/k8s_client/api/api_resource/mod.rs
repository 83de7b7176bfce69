use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiResource {
    pub categories: Option<Vec<String>>,
    pub group: Option<String>,
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub namespaced: bool,
    #[serde(rename = "shortNames")]
    pub short_names: Option<Vec<String>>,
    #[serde(rename = "singularName", default)]
    pub singular_name: String,
    #[serde(rename = "storageVersionHash")]
    pub storage_version_hash: Option<String>,
    #[serde(default)]
    pub verbs: Vec<String>,
    pub version: Option<String>,
}

impl ApiResource {
    /// `widgets/status`, `pods/log` and friends share the parent's kind
    pub fn is_subresource(&self) -> bool {
        self.name.contains('/')
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiResourceList {
    #[serde(rename = "groupVersion")]
    pub group_version: String,
    #[serde(default)]
    pub resources: Vec<ApiResource>,
}
