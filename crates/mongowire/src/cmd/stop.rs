use mongowire_cluster::{ClusterConfig, LocalCluster};

use crate::cmd::StopArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: StopArgs) -> CliResult<i32> {
    let cluster = LocalCluster::new(ClusterConfig {
        ports: args.ports,
        ..ClusterConfig::default()
    });

    // Best-effort by design; members that never started are logged and skipped.
    cluster.stop();
    Ok(SUCCESS)
}
