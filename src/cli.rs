//! Command-line interface for session-todos.
//!
//! Uses lexopt for minimal binary size overhead.

use std::ffi::OsString;
use std::net::IpAddr;
use std::path::PathBuf;

/// Command-line arguments.
///
/// Options left unset fall back to the environment, the config file, or
/// the built-in defaults, in that order.
#[derive(Debug, Clone, Default)]
pub struct Args {
    /// Host address to bind to.
    pub host: Option<IpAddr>,
    /// Port to listen on.
    pub port: Option<u16>,
    /// Path to configuration file.
    pub config: Option<PathBuf>,
    /// Session idle timeout in seconds.
    pub session_ttl: Option<u64>,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: Option<String>,
    /// Show version and exit.
    pub version: bool,
    /// Show help and exit.
    pub help: bool,
}

/// Parse command-line arguments.
pub fn parse_args() -> Result<Args, ArgsError> {
    parse_args_from(std::env::args_os())
}

/// Parse arguments from an iterator (for testing).
pub fn parse_args_from<I>(args: I) -> Result<Args, ArgsError>
where
    I: IntoIterator<Item = OsString>,
{
    use lexopt::prelude::*;

    let mut result = Args::default();
    let mut parser = lexopt::Parser::from_iter(args);

    while let Some(arg) = parser.next()? {
        match arg {
            Short('h') | Long("help") => {
                result.help = true;
            }
            Short('V') | Long("version") => {
                result.version = true;
            }
            Short('H') | Long("host") => {
                let value: String = parser.value()?.parse()?;
                result.host = Some(
                    value
                        .parse()
                        .map_err(|_| ArgsError::InvalidValue("host", value))?,
                );
            }
            Short('p') | Long("port") => {
                let value: String = parser.value()?.parse()?;
                result.port = Some(
                    value
                        .parse()
                        .map_err(|_| ArgsError::InvalidValue("port", value))?,
                );
            }
            Short('c') | Long("config") => {
                result.config = Some(parser.value()?.parse()?);
            }
            Short('t') | Long("session-ttl") => {
                let value: String = parser.value()?.parse()?;
                result.session_ttl = Some(
                    value
                        .parse()
                        .map_err(|_| ArgsError::InvalidValue("session-ttl", value))?,
                );
            }
            Short('l') | Long("log-level") => {
                result.log_level = Some(parser.value()?.parse()?);
            }
            Value(val) => {
                return Err(ArgsError::UnexpectedArgument(val.to_string_lossy().into()));
            }
            _ => return Err(arg.unexpected().into()),
        }
    }

    Ok(result)
}

/// Print help message.
pub fn print_help() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        r#"session-todos {version}
Session-backed todo list manager

USAGE:
    session-todos [OPTIONS]

OPTIONS:
    -H, --host <ADDR>         Host address to bind [default: 127.0.0.1]
    -p, --port <PORT>         Port to listen on [default: 4567]
    -c, --config <FILE>       Path to configuration file (JSON)
    -t, --session-ttl <SECS>  Session idle timeout [default: 3600]
    -l, --log-level <LVL>     Log level (error, warn, info, debug, trace)
    -h, --help                Print help
    -V, --version             Print version

ENVIRONMENT VARIABLES:
    SESSION_TODOS_HOST          Host address (overrides config)
    SESSION_TODOS_PORT          Port number (overrides config)
    SESSION_TODOS_SESSION_TTL   Session idle timeout (overrides config)
    SESSION_TODOS_LOG_LEVEL     Log level (overrides config)
    RUST_LOG                    Alternative log level setting

EXAMPLES:
    # Start with defaults (localhost:4567)
    session-todos

    # Listen on all interfaces with 10-minute sessions
    session-todos -H 0.0.0.0 -p 8080 -t 600

    # Start with config file
    session-todos -c /etc/session-todos/config.json
"#
    );
}

/// Print version.
pub fn print_version() {
    println!("session-todos {}", env!("CARGO_PKG_VERSION"));
}

/// Argument parsing errors.
#[derive(Debug, thiserror::Error)]
pub enum ArgsError {
    /// Lexopt parsing error.
    #[error("{0}")]
    Lexopt(#[from] lexopt::Error),
    /// Invalid argument value.
    #[error("invalid value for --{0}: '{1}'")]
    InvalidValue(&'static str, String),
    /// Unexpected positional argument.
    #[error("unexpected argument: '{0}'")]
    UnexpectedArgument(String),
}
