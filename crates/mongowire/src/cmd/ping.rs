use std::time::Instant;

use mongowire_replset::{Replset, ReplsetConfig};
use tracing::warn;

use crate::cmd::{parse_duration, PingArgs};
use crate::exit::{CliError, CliResult, HEALTH_CHECK_FAILED, SUCCESS};
use crate::output::{print_ping, OutputFormat};

/// Pre-encoded BSON for `{"ping": 1, "$db": "admin"}`.
///
/// Documents are opaque to the wire client, so the health check ships its
/// one command as a constant instead of pulling in a BSON encoder.
const PING_COMMAND: &[u8] = &[
    0x1e, 0x00, 0x00, 0x00, // document length (30)
    0x10, b'p', b'i', b'n', b'g', 0x00, 0x01, 0x00, 0x00, 0x00, // int32 ping: 1
    0x02, b'$', b'd', b'b', 0x00, 0x06, 0x00, 0x00, 0x00, // string $db
    b'a', b'd', b'm', b'i', b'n', 0x00, // "admin"
    0x00, // document terminator
];

pub fn run(args: PingArgs, format: OutputFormat) -> CliResult<i32> {
    let dial_timeout = parse_duration(&args.timeout)?;

    let replset = Replset::with_config(
        args.nodes.clone(),
        ReplsetConfig {
            dial_timeout,
            ..ReplsetConfig::default()
        },
    );

    replset
        .connect()
        .map_err(|err| CliError::new(HEALTH_CHECK_FAILED, format!("connect failed: {err}")))?;

    let started = Instant::now();
    let result = replset
        .send_command(PING_COMMAND, &[])
        .map_err(|err| CliError::new(HEALTH_CHECK_FAILED, format!("ping failed: {err}")));
    let latency_ms = started.elapsed().as_secs_f64() * 1000.0;

    if let Err(err) = replset.disconnect() {
        warn!(%err, "disconnect failed");
    }

    let response = result?;
    print_ping(&args.nodes, response.len(), latency_ms, format);
    Ok(SUCCESS)
}
