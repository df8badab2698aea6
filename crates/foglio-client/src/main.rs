//! foglio-cli: command-line client for the Foglio blog API.

mod args;
mod handlers;
mod print;

use clap::Parser;

use args::{Cli, Commands};
use foglio_client::api::{Api, ClientError};

#[tokio::main]
async fn main() -> Result<(), ClientError> {
    let cli = Cli::parse();
    let api = build_api(&cli)?;

    match cli.command {
        Commands::Posts(cmd) => handlers::posts::handle(&api, cmd.action).await?,
    }

    Ok(())
}

fn build_api(cli: &Cli) -> Result<Api, ClientError> {
    let base = cli.api.clone().ok_or(ClientError::MissingApiUrl)?;
    Api::new(&base)
}
