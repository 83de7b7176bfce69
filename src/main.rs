mod args;
mod engine;
mod error;
mod k8s_client;

use args::Args;
use error::Error;
use k8s_client::{api::cluster_config::ClusterConfig, K8sClient};
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_log();
    let args = args::parse();
    if let Err(err) = run(args).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn init_log() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .with_env_var("CRD_EXTRACTOR_LOG")
                .from_env_lossy(),
        )
        .init();
}

async fn run(args: Args) -> Result<(), Error> {
    // argument errors surface before anything touches the cluster
    let request = args.request()?;
    let config = ClusterConfig::load(&args.config)?;
    let client = K8sClient::new(&config, args.config.timeout())?;
    info!(server = %client.base_url(), gvk = %request.gvk, "extracting schema");

    tokio::select! {
        res = engine::extract(&client, &request) => {
            res?;
            Ok(())
        }
        _ = tokio::signal::ctrl_c() => Err(Error::Cancelled),
    }
}
