//! session-todos binary entry point.

use std::process::ExitCode;

use session_todos::cli::{self, Args};
use session_todos::config::Config;
use session_todos::{logging, web, AppState};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!("Run with --help for usage.");
            return ExitCode::FAILURE;
        }
    };

    if args.help {
        cli::print_help();
        return ExitCode::SUCCESS;
    }
    if args.version {
        cli::print_version();
        return ExitCode::SUCCESS;
    }

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(args)?;
    logging::init_with_filter(config.log_filter())?;

    info!("session-todos v{}", env!("CARGO_PKG_VERSION"));

    let server_config = config.to_server_config()?;
    let session_config = config.to_session_config()?;
    info!(
        cookie = %session_config.cookie_name,
        idle_timeout_secs = session_config.idle_timeout.as_secs(),
        "Session store initialized"
    );

    web::serve(server_config, AppState::with_config(session_config)).await?;

    info!("Server stopped");
    Ok(())
}
