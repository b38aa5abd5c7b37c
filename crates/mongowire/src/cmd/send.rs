use std::fs;

use bytes::Bytes;
use mongowire_replset::{Replset, ReplsetConfig};
use tracing::warn;

use crate::cmd::{parse_duration, SendArgs};
use crate::exit::{io_error, replset_error, CliResult, SUCCESS};
use crate::output::{print_response, OutputFormat};

pub fn run(args: SendArgs, format: OutputFormat) -> CliResult<i32> {
    let dial_timeout = parse_duration(&args.timeout)?;

    let body = fs::read(&args.body)
        .map_err(|err| io_error(&format!("failed reading {}", args.body.display()), err))?;

    let mut documents = Vec::with_capacity(args.sequence.len());
    for path in &args.sequence {
        let doc = fs::read(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err))?;
        documents.push(Bytes::from(doc));
    }

    let replset = Replset::with_config(
        args.nodes.clone(),
        ReplsetConfig {
            dial_timeout,
            ..ReplsetConfig::default()
        },
    );

    replset
        .connect()
        .map_err(|err| replset_error("connect failed", err))?;

    let result = replset
        .send_command(body, &documents)
        .map_err(|err| replset_error("send failed", err));

    if let Err(err) = replset.disconnect() {
        warn!(%err, "disconnect failed");
    }

    let response = result?;
    print_response(&response, &args.nodes, format);
    Ok(SUCCESS)
}
