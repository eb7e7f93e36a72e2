use clap::Parser;
use opts::CliArgs;
use tracing::error;
use tracing_subscriber::EnvFilter;

mod common;
mod deploy;
mod helm;
mod opts;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let opts = CliArgs::parse();
    if let Err(error) = deploy::run(&opts).await {
        error!(%error, "Helm deployment failed");
        std::process::exit(1);
    }
}
