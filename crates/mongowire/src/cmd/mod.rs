use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Subcommand};

use crate::exit::{CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod ping;
pub mod send;
pub mod start;
pub mod status;
pub mod stop;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start a local replica set of mongod processes.
    Start(StartArgs),
    /// Stop the local replica set members.
    Stop(StopArgs),
    /// Fetch and print rs.status() from a member.
    Status(StatusArgs),
    /// Send a pre-encoded command document over the wire protocol.
    Send(SendArgs),
    /// Send a canned ping command and report latency.
    Ping(PingArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Start(args) => start::run(args),
        Command::Stop(args) => stop::run(args),
        Command::Status(args) => status::run(args, format),
        Command::Send(args) => send::run(args, format),
        Command::Ping(args) => ping::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct StartArgs {
    /// Keep existing member data directories instead of wiping them.
    #[arg(long)]
    pub persistent: bool,
    /// Member ports, one mongod per port (comma-separated).
    #[arg(long, value_delimiter = ',', default_values_t = [27105u16, 27106, 27107])]
    pub ports: Vec<u16>,
    /// Replica set name.
    #[arg(long, default_value = "rs0")]
    pub replset: String,
    /// Root directory for member data.
    #[arg(long, value_name = "DIR", default_value = "data")]
    pub data_root: PathBuf,
}

#[derive(Args, Debug)]
pub struct StopArgs {
    /// Member ports to shut down (comma-separated).
    #[arg(long, value_delimiter = ',', default_values_t = [27105u16, 27106, 27107])]
    pub ports: Vec<u16>,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Member port to query.
    #[arg(long, default_value_t = 27105)]
    pub port: u16,
}

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Member addresses (host:port, comma-separated).
    #[arg(long, value_delimiter = ',', required = true)]
    pub nodes: Vec<String>,
    /// File holding the pre-encoded (BSON) command document.
    #[arg(long, value_name = "FILE")]
    pub body: PathBuf,
    /// Files holding pre-encoded documents for the bulk sequence.
    #[arg(long = "seq", value_name = "FILE")]
    pub sequence: Vec<PathBuf>,
    /// Dial timeout (e.g. 5s, 500ms).
    #[arg(long, default_value = "5s")]
    pub timeout: String,
}

#[derive(Args, Debug)]
pub struct PingArgs {
    /// Member addresses (host:port, comma-separated).
    #[arg(long, value_delimiter = ',', required = true)]
    pub nodes: Vec<String>,
    /// Dial timeout (e.g. 5s, 500ms).
    #[arg(long, default_value = "5s")]
    pub timeout: String,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

pub(crate) fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(USAGE, "duration must not be empty"));
    }

    let (number, unit) = if let Some(num) = input.strip_suffix("ms") {
        (num, "ms")
    } else if let Some(num) = input.strip_suffix('s') {
        (num, "s")
    } else {
        (input, "s")
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid duration value: {input}")))?;

    if value == 0 {
        return Err(CliError::new(USAGE, "duration must be greater than zero"));
    }

    Ok(match unit {
        "ms" => Duration::from_millis(value),
        _ => Duration::from_secs(value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_seconds_and_milliseconds() {
        assert_eq!(parse_duration("5s").unwrap(), Duration::from_secs(5));
        assert_eq!(parse_duration("500ms").unwrap(), Duration::from_millis(500));
        assert_eq!(parse_duration("3").unwrap(), Duration::from_secs(3));
    }

    #[test]
    fn rejects_empty_zero_and_garbage_durations() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("0s").is_err());
        assert!(parse_duration("fast").is_err());
    }
}
