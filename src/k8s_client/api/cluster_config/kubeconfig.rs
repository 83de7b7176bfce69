use super::error::ClusterConfigError;
use serde::Deserialize;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct Kubeconfig {
    #[serde(default)]
    pub clusters: Vec<NamedCluster>,
    #[serde(default)]
    pub users: Vec<NamedUser>,
    #[serde(default)]
    pub contexts: Vec<NamedContext>,
    #[serde(rename = "current-context", default)]
    pub current_context: Option<String>,
    /// directory relative file references are resolved against
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NamedCluster {
    pub name: String,
    pub cluster: Cluster,
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct Cluster {
    pub server: String,
    #[serde(rename = "certificate-authority")]
    pub certificate_authority: Option<PathBuf>,
    #[serde(rename = "certificate-authority-data")]
    pub certificate_authority_data: Option<String>,
    #[serde(rename = "insecure-skip-tls-verify", default)]
    pub insecure_skip_tls_verify: bool,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NamedUser {
    pub name: String,
    #[serde(default)]
    pub user: User,
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct User {
    #[serde(rename = "client-certificate")]
    pub client_certificate: Option<PathBuf>,
    #[serde(rename = "client-certificate-data")]
    pub client_certificate_data: Option<String>,
    #[serde(rename = "client-key")]
    pub client_key: Option<PathBuf>,
    #[serde(rename = "client-key-data")]
    pub client_key_data: Option<String>,
    pub token: Option<String>,
    #[serde(rename = "tokenFile")]
    pub token_file: Option<PathBuf>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NamedContext {
    pub name: String,
    pub context: Context,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Context {
    pub cluster: String,
    #[serde(default)]
    pub user: String,
    pub namespace: Option<String>,
}

impl Kubeconfig {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Kubeconfig, ClusterConfigError> {
        let path = path.as_ref();
        let file = fs::File::open(path).map_err(|err| ClusterConfigError::FileOpen {
            path: path.into(),
            err,
        })?;
        let mut kubeconfig: Kubeconfig =
            serde_yaml::from_reader(file).map_err(|err| ClusterConfigError::FileDeserialize {
                path: path.into(),
                err,
            })?;
        kubeconfig.base_dir = path.parent().map(Path::to_path_buf);
        Ok(kubeconfig)
    }

    pub fn from_default_path() -> Option<Result<Kubeconfig, ClusterConfigError>> {
        let homedir = dirs::home_dir()?;
        let path = homedir.join(".kube").join("config");
        match fs::metadata(&path) {
            Ok(_) => Some(Self::from_path(path)),
            Err(err) => match err.kind() {
                io::ErrorKind::NotFound => None,
                _ => Some(Err(ClusterConfigError::FileOpen { path, err })),
            },
        }
    }

    /// Only the first entry of a `KUBECONFIG` path list is read; files are not merged.
    pub fn from_env() -> Option<Result<Self, ClusterConfigError>> {
        let paths = std::env::var_os("KUBECONFIG")?;
        let path = std::env::split_paths(&paths).find(|p| !p.as_os_str().is_empty())?;
        Some(Self::from_path(path))
    }

    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}
