use mongowire_cluster::{ClusterConfig, LocalCluster};

use crate::cmd::StartArgs;
use crate::exit::{cluster_error, CliResult, SUCCESS};

pub fn run(args: StartArgs) -> CliResult<i32> {
    let cluster = LocalCluster::new(ClusterConfig {
        replset_name: args.replset,
        ports: args.ports,
        data_root: args.data_root,
        ..ClusterConfig::default()
    });

    cluster
        .start(args.persistent)
        .map_err(|err| cluster_error("start failed", err))?;

    Ok(SUCCESS)
}
