mod error;
mod input;
mod logging;
mod model;
mod pipeline;
mod report;
mod server;

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};

use crate::model::loader::{DEFAULT_MODEL_PATH, load_classifier};
use crate::model::{Classifier, ModelError};
use crate::pipeline::run_pipeline;
use crate::report::{ResponseStyle, render_outcome};
use crate::server::{AppState, CorsPolicy, build_router};

#[derive(Debug, Parser)]
#[command(
    name = "tdah-screen",
    version,
    about = "ADHD screening inference from Stroop/CPT/SST assessment results"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve `POST /predict` over HTTP.
    Serve(ServeArgs),
    /// Run one evaluation file through the pipeline and print the response body.
    Predict(PredictArgs),
}

#[derive(Debug, Args)]
struct ModelArgs {
    /// Serialized voting classifier (JSON, optionally .gz).
    #[arg(long, env = "MODEL_PATH", default_value = DEFAULT_MODEL_PATH)]
    model: PathBuf,
    #[arg(long, env = "RESPONSE_STYLE", value_enum, default_value_t = ResponseStyle::Enveloped)]
    response_style: ResponseStyle,
}

#[derive(Debug, Args)]
struct ServeArgs {
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    host: IpAddr,
    #[arg(long, env = "PORT", default_value_t = 5000)]
    port: u16,
    #[arg(long, env = "CORS_POLICY", value_enum, default_value_t = CorsPolicy::Any)]
    cors: CorsPolicy,
    #[command(flatten)]
    model: ModelArgs,
}

#[derive(Debug, Args)]
struct PredictArgs {
    /// Evaluation payload (JSON, optionally .gz).
    #[arg(long)]
    input: PathBuf,
    #[command(flatten)]
    model: ModelArgs,
}

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to render response: {0}")]
    Render(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, AppError> {
    match cli.command {
        Command::Serve(args) => run_serve(args),
        Command::Predict(args) => run_predict(args),
    }
}

fn run_serve(args: ServeArgs) -> Result<ExitCode, AppError> {
    let classifier: Arc<dyn Classifier> = Arc::new(load_classifier(&args.model.model)?);
    let state = AppState {
        classifier,
        style: args.model.response_style,
    };
    let router = build_router(state, args.cors);
    let addr = SocketAddr::new(args.host, args.port);
    tracing::info!(cors = ?args.cors, style = ?args.model.response_style, "starting server");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(server::serve(addr, router))?;
    Ok(ExitCode::SUCCESS)
}

fn run_predict(args: PredictArgs) -> Result<ExitCode, AppError> {
    let classifier = load_classifier(&args.model.model)?;
    let body = input::reader::read_to_bytes(&args.input)?;

    let outcome = run_pipeline(&classifier, &body);
    println!("{}", render_outcome(&outcome, args.model.response_style)?);
    Ok(ExitCode::from(exit_status_for(&outcome)))
}

/// 0 on success, 2 when the evaluation was rejected, 1 on internal failure.
fn exit_status_for<T>(outcome: &Result<T, error::ServiceError>) -> u8 {
    match outcome {
        Ok(_) => 0,
        Err(err) if err.is_client_error() => {
            tracing::warn!(kind = err.code(), "{err}");
            2
        }
        Err(err) => {
            tracing::error!(kind = err.code(), "{err}");
            1
        }
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/support.rs"]
mod test_support;

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
