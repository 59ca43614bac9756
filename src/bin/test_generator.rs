use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use rand::rngs::StdRng;
use rand::SeedableRng;

use gelf_test_generator::endpoint::Endpoint;
use gelf_test_generator::error::GeneratorError;
use gelf_test_generator::init::{build_loggers, init_tracing};
use gelf_test_generator::scenarios::run_all;

/// Send test log events to three GELF TCP inputs.
#[derive(Parser, Debug)]
#[command(name = "test_generator", version, long_about = None)]
struct Cli {
    /// Address for first graylog cluster node
    node1: String,
    /// Address for second graylog cluster node
    node2: String,
    /// Address for third graylog cluster node
    node3: String,
    /// Input port
    port: u16,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();

    if std::env::args_os().len() <= 1 {
        // Usage, not an error.
        if let Err(e) = Cli::command().print_help() {
            tracing::warn!(error = %e, "failed to print usage");
        }
        return ExitCode::SUCCESS;
    }
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "test generator failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), GeneratorError> {
    let endpoints = [cli.node1, cli.node2, cli.node3]
        .iter()
        .map(|node| Endpoint::new(node, cli.port))
        .collect::<Result<Vec<_>, _>>()?;

    let loggers = build_loggers(&endpoints);
    let mut rng = StdRng::from_entropy();

    run_all(&loggers, &mut rng).await?;

    for logger in &loggers {
        logger.flush().await;
    }
    Ok(())
}
