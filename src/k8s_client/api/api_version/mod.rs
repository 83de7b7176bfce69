use serde::{Deserialize, Serialize};

/// Response of `GET /api`: the versions served by the core group.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiVersions {
    #[serde(default)]
    pub kind: String,
    pub versions: Vec<String>,
}
