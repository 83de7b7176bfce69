use crate::{
    engine::{MatchPolicy, Request},
    k8s_client::api::{cluster_config::ConfigFlags, GroupVersionKind, GvkError},
};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "kubectl-crd_extractor",
    about = "Extracts CRD to JSON Schema",
    after_help = "EXAMPLES:\n    # extracts the v1 Widget schema to ./example.com/v1/widget.json\n    kubectl crd-extractor example.com/v1 Widget\n\n    # core group resources use an empty group\n    kubectl crd-extractor /v1 ConfigMap --output schemas"
)]
pub struct Args {
    /// API group and version, e.g. example.com/v1
    pub group_version: String,
    /// Resource kind, e.g. Widget
    pub kind: String,
    /// Output base directory
    #[structopt(long, parse(from_os_str))]
    pub output: Option<PathBuf>,
    /// Fail if discovery reports more than one resource for the kind
    #[structopt(long)]
    pub strict: bool,
    #[structopt(flatten)]
    pub config: ConfigFlags,
}

impl Args {
    pub fn request(&self) -> Result<Request, GvkError> {
        Ok(Request {
            gvk: GroupVersionKind::from_args(&self.group_version, &self.kind)?,
            output: self.output.clone(),
            policy: if self.strict {
                MatchPolicy::Strict
            } else {
                MatchPolicy::LastWins
            },
        })
    }
}

pub fn parse() -> Args {
    Args::from_args()
}
