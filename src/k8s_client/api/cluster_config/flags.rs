use std::{path::PathBuf, time::Duration};
use structopt::StructOpt;

/// Cluster connection flags, named after their kubectl counterparts.
#[derive(Debug, Clone, Default, StructOpt)]
pub struct ConfigFlags {
    /// Path to the kubeconfig file to use
    #[structopt(long, parse(from_os_str))]
    pub kubeconfig: Option<PathBuf>,
    /// The name of the kubeconfig context to use
    #[structopt(long)]
    pub context: Option<String>,
    /// The name of the kubeconfig cluster to use
    #[structopt(long)]
    pub cluster: Option<String>,
    /// The name of the kubeconfig user to use
    #[structopt(long)]
    pub user: Option<String>,
    /// Accepted for kubectl compatibility. CRD lookups are cluster-scoped
    #[structopt(short = "n", long)]
    pub namespace: Option<String>,
    /// The address and port of the Kubernetes API server
    #[structopt(short = "s", long)]
    pub server: Option<String>,
    /// Bearer token for authentication to the API server
    #[structopt(long)]
    pub token: Option<String>,
    /// Path to a cert file for the certificate authority
    #[structopt(long, parse(from_os_str))]
    pub certificate_authority: Option<PathBuf>,
    /// If true, the server's certificate will not be checked for validity
    #[structopt(long)]
    pub insecure_skip_tls_verify: bool,
    /// How long to wait for a single server request (e.g. 30s, 1m). 0 means no timeout
    #[structopt(long, parse(try_from_str = parse_timeout))]
    pub request_timeout: Option<Duration>,
}

impl ConfigFlags {
    pub fn timeout(&self) -> Option<Duration> {
        self.request_timeout.filter(|d| !d.is_zero())
    }
}

fn parse_timeout(s: &str) -> Result<Duration, String> {
    let (value, unit) = match s.find(|c: char| !c.is_ascii_digit()) {
        Some(idx) => s.split_at(idx),
        None => (s, "s"),
    };
    let value: u64 = value
        .parse()
        .map_err(|_| format!("invalid duration \"{}\"", s))?;
    let secs = match unit {
        "s" => Some(value),
        "m" => value.checked_mul(60),
        "h" => value.checked_mul(60 * 60),
        _ => return Err(format!("invalid duration unit in \"{}\", expected s, m or h", s)),
    };
    secs.map(Duration::from_secs)
        .ok_or_else(|| format!("duration \"{}\" is too large", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_kubectl_style_timeouts() {
        assert_eq!(parse_timeout("0"), Ok(Duration::ZERO));
        assert_eq!(parse_timeout("15"), Ok(Duration::from_secs(15)));
        assert_eq!(parse_timeout("30s"), Ok(Duration::from_secs(30)));
        assert_eq!(parse_timeout("2m"), Ok(Duration::from_secs(120)));
        assert_eq!(parse_timeout("1h"), Ok(Duration::from_secs(3600)));
        assert!(parse_timeout("s").is_err());
        assert!(parse_timeout("10d").is_err());
        assert!(parse_timeout("").is_err());
    }

    #[test]
    fn rejects_overflowing_timeouts() {
        assert_eq!(
            parse_timeout("99999999999999999h"),
            Err("duration \"99999999999999999h\" is too large".to_string())
        );
        assert!(parse_timeout("999999999999999999m").is_err());
        // fits in seconds, no multiplication
        assert_eq!(parse_timeout("99999999999999999s"), Ok(Duration::from_secs(99999999999999999)));
    }

    #[test]
    fn zero_timeout_means_none() {
        let flags = ConfigFlags {
            request_timeout: Some(Duration::ZERO),
            ..Default::default()
        };
        assert_eq!(flags.timeout(), None);
        let flags = ConfigFlags {
            request_timeout: Some(Duration::from_secs(5)),
            ..Default::default()
        };
        assert_eq!(flags.timeout(), Some(Duration::from_secs(5)));
    }
}
