use std::env;

use clap::Parser;
use nivesh::NiveshError;
use nivesh::api::{Cli, run_cli, run_http_server};

#[tokio::main]
async fn main() {
    env_logger::init();

    let raw_args: Vec<String> = env::args().collect();
    let outcome = if raw_args.get(1).map(|s| s.as_str()) == Some("serve") {
        match parse_port(raw_args.get(2)) {
            Ok(port) => run_http_server(port).await,
            Err(e) => Err(e),
        }
    } else {
        run_cli(&Cli::parse())
    };

    if let Err(e) = outcome {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn parse_port(raw: Option<&String>) -> Result<u16, NiveshError> {
    match raw {
        None => Ok(8080),
        Some(s) => s
            .parse::<u16>()
            .map_err(|_| NiveshError::InvalidPort(s.clone())),
    }
}
