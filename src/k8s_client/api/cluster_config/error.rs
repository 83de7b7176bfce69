use std::{io, path::PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ClusterConfigError {
    #[error("Could not open file \"{}\": {:?}", path.display(), err)]
    FileOpen { path: PathBuf, err: io::Error },
    #[error("Could not read file \"{}\": {:?}", path.display(), err)]
    FileRead { path: PathBuf, err: io::Error },
    #[error("Could not deserialize yaml \"{}\": {:?}", path.display(), err)]
    FileDeserialize { path: PathBuf, err: serde_yaml::Error },
    #[error("Could not detect cluster config (no --kubeconfig, KUBECONFIG, service account or ~/.kube/config)")]
    Detect,
    #[error("No current context set in kubeconfig and no --context given")]
    NoCurrentContext,
    #[error("Missing context \"{}\"", _0)]
    MissingContext(String),
    #[error("Missing cluster \"{}\"", _0)]
    MissingCluster(String),
    #[error("Missing user \"{}\"", _0)]
    MissingUser(String),
    #[error("Invalid base64 in \"client-certificate-data\": {:?}", _0)]
    InvalidBase64Cert(base64::DecodeError),
    #[error("Invalid base64 in \"client-key-data\": {:?}", _0)]
    InvalidBase64Key(base64::DecodeError),
    #[error("Invalid base64 in \"certificate-authority-data\": {:?}", _0)]
    InvalidBase64Cacert(base64::DecodeError),
}
