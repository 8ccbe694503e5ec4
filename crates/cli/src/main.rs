pub(crate) mod error;
pub(crate) mod log_args;

use error::Error;
use log_args::LogArgs;

use clap::Parser;
use sift_classifier::{classify, ClassifyArgs};

#[derive(Debug, Parser)]
#[clap(
    name = "sift",
    version,
    about = "Sift classifies Ethereum transactions into semantically meaningful intents.",
    after_help = "For more information, read the README: https://github.com/sift-rs/sift"
)]
pub struct Arguments {
    #[clap(flatten)]
    pub classify: ClassifyArgs,

    #[clap(flatten)]
    logs: LogArgs,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let mut args = Arguments::parse();

    // setup logging
    let _ = args.logs.init_tracing();

    // if the user has not specified a rpc url or api key, use the environment
    if args.classify.rpc_url.is_empty() {
        args.classify.rpc_url = std::env::var("RPC_URL").unwrap_or_default();
    }
    if args.classify.etherscan_api_key.is_empty() {
        args.classify.etherscan_api_key = std::env::var("ETHERSCAN_API_KEY").unwrap_or_default();
    }

    let result = classify(args.classify)
        .await
        .map_err(|e| Error::Generic(format!("failed to classify transaction: {}", e)))?;

    println!("{}", serde_json::to_string_pretty(&result).map_err(Error::SerdeError)?);

    Ok(())
}
