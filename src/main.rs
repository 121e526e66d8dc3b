use clap::Parser;
use quay_client::cli::{Args, Runner};
use quay_client::logging::Logger;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match Runner::new(args).run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            Logger::new(false).error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
