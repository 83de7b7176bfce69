use crate::k8s_client::api::GroupVersionKind;
use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("Could not create directory \"{}\": {:?}", path.display(), err)]
    CreateDir { path: PathBuf, err: io::Error },
    #[error("Could not create file \"{}\": {:?}", path.display(), err)]
    CreateFile { path: PathBuf, err: io::Error },
    #[error("Could not write file \"{}\": {:?}", path.display(), err)]
    Write { path: PathBuf, err: io::Error },
}

/// `<group>/<version>/<kind>.json`, lower-cased. The core group has no directory of its own.
pub fn output_path(base: Option<&Path>, gvk: &GroupVersionKind) -> PathBuf {
    let mut path = base.map(Path::to_path_buf).unwrap_or_default();
    if !gvk.group.is_empty() {
        path.push(gvk.group.to_lowercase());
    }
    path.push(gvk.version.to_lowercase());
    path.push(format!("{}.json", gvk.kind.to_lowercase()));
    path
}

pub fn write_schema(path: &Path, data: &[u8]) -> Result<(), OutputError> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|err| OutputError::CreateDir { path: dir.into(), err })?;
    }
    let mut file = fs::File::create(path).map_err(|err| OutputError::CreateFile { path: path.into(), err })?;
    file.write_all(data)
        .map_err(|err| OutputError::Write { path: path.into(), err })?;
    Ok(())
}
