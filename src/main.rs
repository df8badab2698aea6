use std::{process, sync::Arc};

use foglio::{
    application::{error::AppError, posts::PostService},
    config,
    infra::{
        error::InfraError,
        gateway::AirtableGateway,
        http::{self, ApiState},
        telemetry,
    },
};
use tracing::{Dispatch, Level, dispatcher, error};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli().map_err(|err| {
        AppError::from(InfraError::configuration(format!(
            "failed to load configuration: {err}"
        )))
    })?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let gateway = AirtableGateway::new(&settings.gateway)
        .map_err(|err| AppError::unexpected(format!("failed to build gateway client: {err}")))?;

    let state = ApiState {
        posts: Arc::new(PostService::new(Arc::new(gateway))),
    };

    let router = http::build_api_router(state);
    http::serve(&settings.server, router)
        .await
        .map_err(AppError::from)
}
