mod error;
mod flags;
mod kubeconfig;

pub use error::ClusterConfigError;
pub use flags::ConfigFlags;
use kubeconfig::{Kubeconfig, User};
use std::{fs, io, path::Path};
use tracing::debug;
use ClusterConfigError as Error;

const DEFAULT_NAMESPACE: &str = "default";

#[derive(Debug, Clone, PartialEq)]
pub enum AuthMethod {
    /// PEM encoded private key followed by the client certificate
    Identity(Vec<u8>),
    Token(String),
    None,
}

/// Everything needed to talk to one API server. Built explicitly from flags,
/// never read from global state after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterConfig {
    pub server: String,
    pub cacert: Option<Vec<u8>>,
    pub auth: AuthMethod,
    pub insecure_skip_tls_verify: bool,
    /// Resolved like kubectl does so `-n` and context namespaces are accepted.
    /// CRDs are cluster-scoped, so no request is scoped by it.
    pub namespace: String,
}

fn read_file(path: &Path) -> Result<Vec<u8>, Error> {
    fs::read(path).map_err(|err| Error::FileRead { path: path.into(), err })
}

impl ClusterConfig {
    pub fn in_cluster() -> Option<Result<Self, Error>> {
        const TOKEN_PATH: &str = "/var/run/secrets/kubernetes.io/serviceaccount/token";
        const CACERT_PATH: &str = "/var/run/secrets/kubernetes.io/serviceaccount/ca.crt";
        const NAMESPACE_PATH: &str = "/var/run/secrets/kubernetes.io/serviceaccount/namespace";

        let token = match fs::read_to_string(TOKEN_PATH) {
            Ok(token) => token,
            Err(err) => match err.kind() {
                io::ErrorKind::NotFound => return None,
                _ => {
                    return Some(Err(Error::FileRead {
                        path: TOKEN_PATH.into(),
                        err,
                    }))
                }
            },
        };
        return Some(in_cluster_inner(token));

        fn in_cluster_inner(token: String) -> Result<ClusterConfig, Error> {
            let cacert = read_file(Path::new(CACERT_PATH))?;
            let namespace = fs::read_to_string(NAMESPACE_PATH)
                .map(|ns| ns.trim().to_string())
                .unwrap_or_else(|_| DEFAULT_NAMESPACE.to_string());
            let server = match (
                std::env::var("KUBERNETES_SERVICE_HOST"),
                std::env::var("KUBERNETES_SERVICE_PORT"),
            ) {
                (Ok(host), Ok(port)) => format!("https://{}:{}", host, port),
                _ => "https://kubernetes.default.svc:443".into(),
            };
            Ok(ClusterConfig {
                server,
                cacert: Some(cacert),
                auth: AuthMethod::Token(token.trim().to_string()),
                insecure_skip_tls_verify: false,
                namespace,
            })
        }
    }

    pub fn from_kubeconfig(k: Kubeconfig, flags: &ConfigFlags) -> Result<Self, Error> {
        let current_context = flags
            .context
            .clone()
            .or_else(|| k.current_context.clone())
            .filter(|c| !c.is_empty())
            .ok_or(Error::NoCurrentContext)?;
        let context = match k.contexts.iter().find(|c| c.name == current_context) {
            None => Err(()),
            Some(c) => Ok(c),
        }
        .map_err(|_| Error::MissingContext(current_context.clone()))?
        .context
        .clone();
        let current_cluster = flags.cluster.clone().unwrap_or(context.cluster);
        let current_user = flags.user.clone().unwrap_or(context.user);

        let cluster = match k.clusters.iter().find(|c| c.name == current_cluster) {
            None => Err(()),
            Some(c) => Ok(c),
        }
        .map_err(|_| Error::MissingCluster(current_cluster.clone()))?
        .cluster
        .clone();

        let user = if current_user.is_empty() {
            User::default()
        } else {
            match k.users.iter().find(|u| u.name == current_user) {
                None => Err(()),
                Some(u) => Ok(u),
            }
            .map_err(|_| Error::MissingUser(current_user.clone()))?
            .user
            .clone()
        };
        debug!(context = %current_context, cluster = %current_cluster, user = %current_user, "using kubeconfig context");

        let cacert = match (cluster.certificate_authority_data, cluster.certificate_authority) {
            (Some(data), _) => Some(base64::decode(data).map_err(Error::InvalidBase64Cacert)?),
            (None, Some(path)) => Some(read_file(&k.resolve_path(&path))?),
            (None, None) => None,
        };

        Ok(Self {
            server: cluster.server,
            cacert,
            auth: Self::auth_from_user(&k, user)?,
            insecure_skip_tls_verify: cluster.insecure_skip_tls_verify,
            namespace: context.namespace.unwrap_or_else(|| DEFAULT_NAMESPACE.to_string()),
        })
    }

    fn auth_from_user(k: &Kubeconfig, user: User) -> Result<AuthMethod, Error> {
        if let Some(token) = user.token {
            return Ok(AuthMethod::Token(token));
        }
        if let Some(path) = user.token_file {
            let token = read_file(&k.resolve_path(&path))?;
            return Ok(AuthMethod::Token(String::from_utf8_lossy(&token).trim().to_string()));
        }
        let cert = match (user.client_certificate_data, user.client_certificate) {
            (Some(data), _) => Some(base64::decode(data).map_err(Error::InvalidBase64Cert)?),
            (None, Some(path)) => Some(read_file(&k.resolve_path(&path))?),
            (None, None) => None,
        };
        let key = match (user.client_key_data, user.client_key) {
            (Some(data), _) => Some(base64::decode(data).map_err(Error::InvalidBase64Key)?),
            (None, Some(path)) => Some(read_file(&k.resolve_path(&path))?),
            (None, None) => None,
        };
        match (key, cert) {
            (Some(mut pem), Some(cert)) => {
                pem.push(b'\n');
                pem.extend_from_slice(&cert);
                Ok(AuthMethod::Identity(pem))
            }
            _ => Ok(AuthMethod::None),
        }
    }

    fn from_flags(flags: &ConfigFlags) -> Option<Self> {
        let server = flags.server.clone()?;
        Some(Self {
            server,
            cacert: None,
            auth: AuthMethod::None,
            insecure_skip_tls_verify: false,
            namespace: DEFAULT_NAMESPACE.to_string(),
        })
    }

    /// Explicit flags win over whatever the detected source provided.
    fn apply_overrides(mut self, flags: &ConfigFlags) -> Result<Self, Error> {
        if let Some(server) = &flags.server {
            self.server = server.clone();
        }
        if let Some(token) = &flags.token {
            self.auth = AuthMethod::Token(token.clone());
        }
        if let Some(path) = &flags.certificate_authority {
            self.cacert = Some(read_file(path)?);
        }
        if flags.insecure_skip_tls_verify {
            self.insecure_skip_tls_verify = true;
        }
        if let Some(namespace) = &flags.namespace {
            self.namespace = namespace.clone();
        }
        Ok(self)
    }

    /// Lookup order: `--kubeconfig`, `KUBECONFIG`, in-cluster service account,
    /// `~/.kube/config`, and finally a bare `--server`.
    pub fn load(flags: &ConfigFlags) -> Result<Self, Error> {
        let cc = match &flags.kubeconfig {
            Some(path) => Self::from_kubeconfig(Kubeconfig::from_path(path)?, flags)?,
            None => Self::detect(flags)?,
        };
        let cc = cc.apply_overrides(flags)?;
        debug!(server = %cc.server, namespace = %cc.namespace, "loaded cluster config");
        Ok(cc)
    }

    fn detect(flags: &ConfigFlags) -> Result<Self, Error> {
        let cc = match Kubeconfig::from_env() {
            Some(r) => Self::from_kubeconfig(r?, flags)?,
            None => match Self::in_cluster() {
                Some(cc) => cc?,
                None => match Kubeconfig::from_default_path() {
                    Some(r) => Self::from_kubeconfig(r?, flags)?,
                    None => match Self::from_flags(flags) {
                        Some(cc) => cc,
                        None => return Err(Error::Detect),
                    },
                },
            },
        };
        Ok(cc)
    }
}
