mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "mongowire", version, about = "MongoDB wire protocol CLI")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::run(cli.command, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_start_subcommand() {
        let cli = Cli::try_parse_from(["mongowire", "start", "--persistent"])
            .expect("start args should parse");
        assert!(matches!(cli.command, Command::Start(_)));
    }

    #[test]
    fn parses_send_subcommand() {
        let cli = Cli::try_parse_from([
            "mongowire",
            "send",
            "--nodes",
            "127.0.0.1:27105,127.0.0.1:27106",
            "--body",
            "/tmp/command.bson",
        ])
        .expect("send args should parse");

        match cli.command {
            Command::Send(args) => {
                assert_eq!(args.nodes.len(), 2);
                assert!(args.sequence.is_empty());
            }
            other => panic!("expected send, got {other:?}"),
        }
    }

    #[test]
    fn send_requires_nodes() {
        let err = Cli::try_parse_from(["mongowire", "send", "--body", "/tmp/command.bson"])
            .expect_err("missing --nodes should fail");
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn parses_ping_subcommand() {
        let cli = Cli::try_parse_from([
            "mongowire",
            "ping",
            "--nodes",
            "127.0.0.1:27105",
            "--timeout",
            "500ms",
        ])
        .expect("ping args should parse");
        assert!(matches!(cli.command, Command::Ping(_)));
    }

    #[test]
    fn parses_status_with_default_port() {
        let cli = Cli::try_parse_from(["mongowire", "status"]).expect("status args should parse");
        match cli.command {
            Command::Status(args) => assert_eq!(args.port, 27105),
            other => panic!("expected status, got {other:?}"),
        }
    }
}
