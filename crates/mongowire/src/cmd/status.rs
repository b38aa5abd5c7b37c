use mongowire_cluster::{ClusterConfig, LocalCluster};

use crate::cmd::StatusArgs;
use crate::exit::{cluster_error, CliResult, SUCCESS};
use crate::output::{print_status, OutputFormat};

pub fn run(args: StatusArgs, format: OutputFormat) -> CliResult<i32> {
    let cluster = LocalCluster::new(ClusterConfig {
        ports: vec![args.port],
        ..ClusterConfig::default()
    });

    let status = cluster
        .status(args.port)
        .map_err(|err| cluster_error("status failed", err))?;

    print_status(&status, format);
    Ok(SUCCESS)
}
