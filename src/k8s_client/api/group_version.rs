use std::{fmt, str::FromStr};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GvkError {
    #[error("unexpected group/version string \"{}\"", _0)]
    InvalidGroupVersion(String),
    #[error("expected <group>/<version>, got \"{}\"", _0)]
    MissingSeparator(String),
    #[error("version must not be empty")]
    EmptyVersion,
    #[error("kind must not be empty")]
    EmptyKind,
}

/// A group-version as reported by discovery. The core group is the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct GroupVersion {
    pub group: String,
    pub version: String,
}

impl GroupVersion {
    pub fn new<G: Into<String>, V: Into<String>>(group: G, version: V) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
        }
    }
}

impl FromStr for GroupVersion {
    type Err = GvkError;

    /// `""` and `"/"` are the empty group-version, `"v1"` is the core group,
    /// `"apps/v1"` splits once. Anything with more slashes is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s == "/" {
            return Ok(Self::default());
        }
        match s.split_once('/') {
            None => Ok(Self::new("", s)),
            Some((group, version)) if !version.contains('/') => Ok(Self::new(group, version)),
            Some(_) => Err(GvkError::InvalidGroupVersion(s.to_string())),
        }
    }
}

impl fmt::Display for GroupVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.group.is_empty() {
            write!(f, "{}", self.version)
        } else {
            write!(f, "{}/{}", self.group, self.version)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupVersionKind {
    pub group: String,
    pub version: String,
    pub kind: String,
}

impl GroupVersionKind {
    pub fn gvk(group: &str, version: &str, kind: &str) -> Self {
        Self {
            group: group.to_string(),
            version: version.to_string(),
            kind: kind.to_string(),
        }
    }

    /// Builds a GVK from the command line form: `<group>/<version>` and `<kind>`.
    /// The separator is mandatory, so the core group is written `/v1`.
    pub fn from_args(group_version: &str, kind: &str) -> Result<Self, GvkError> {
        let (group, version) = group_version
            .split_once('/')
            .ok_or_else(|| GvkError::MissingSeparator(group_version.to_string()))?;
        if version.is_empty() {
            return Err(GvkError::EmptyVersion);
        }
        if kind.is_empty() {
            return Err(GvkError::EmptyKind);
        }
        Ok(Self::gvk(group, version, kind))
    }

    pub fn group_version(&self) -> GroupVersion {
        GroupVersion::new(self.group.as_str(), self.version.as_str())
    }
}

impl fmt::Display for GroupVersionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, Kind={}", self.group_version(), self.kind)
    }
}
