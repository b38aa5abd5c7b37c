use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{info, warn};

use crate::error::{ClusterError, Result};
use crate::runner::{run, run_with_output};

/// Configuration for a locally supervised replica set.
#[derive(Debug, Clone)]
pub struct ClusterConfig {
    /// Replica set name passed as `--replSet` and used in member dbpaths.
    pub replset_name: String,
    /// One `mongod` member per port.
    pub ports: Vec<u16>,
    /// Root directory for member data directories.
    pub data_root: PathBuf,
    /// Address members bind and advertise.
    pub bind_ip: String,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            replset_name: "rs0".to_string(),
            ports: vec![27105, 27106, 27107],
            data_root: PathBuf::from("data"),
            bind_ip: "127.0.0.1".to_string(),
        }
    }
}

/// A locally supervised replica set of `mongod` processes.
///
/// Members are forked into the background (`mongod --fork`), so this type
/// holds no process handles; stop and status go through `mongosh` on the
/// member ports.
pub struct LocalCluster {
    config: ClusterConfig,
}

impl LocalCluster {
    pub fn new(config: ClusterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    /// Bring up every member, then initiate the replica set.
    ///
    /// Each member's dbpath is wiped first unless `persistent`. On any
    /// failure, already-started members are shut down best-effort before the
    /// error is returned.
    pub fn start(&self, persistent: bool) -> Result<()> {
        if self.config.ports.is_empty() {
            return Err(ClusterError::NoMembers);
        }

        for (index, &port) in self.config.ports.iter().enumerate() {
            let instance = format!("{}-{}", self.config.replset_name, index);
            if let Err(err) = self.start_member(&instance, port, persistent) {
                self.stop();
                return Err(err);
            }
        }

        if let Err(err) = self.initiate() {
            self.stop();
            return Err(err);
        }

        info!(
            replset = %self.config.replset_name,
            members = self.config.ports.len(),
            "replica set started"
        );
        Ok(())
    }

    fn start_member(&self, instance: &str, port: u16, persistent: bool) -> Result<()> {
        let dbpath = self.config.data_root.join(instance);
        prepare_dbpath(&dbpath, persistent)?;

        let logpath = dbpath.join("mongod.log");
        let args = vec![
            "--replSet".to_string(),
            self.config.replset_name.clone(),
            "--port".to_string(),
            port.to_string(),
            "--dbpath".to_string(),
            dbpath.display().to_string(),
            "--bind_ip".to_string(),
            self.config.bind_ip.clone(),
            "--fork".to_string(),
            "--logpath".to_string(),
            logpath.display().to_string(),
        ];

        info!(%instance, port, "starting mongod");
        run("mongod", &args)
    }

    fn initiate(&self) -> Result<()> {
        let Some(&first_port) = self.config.ports.first() else {
            return Err(ClusterError::NoMembers);
        };

        let script = initiate_script(
            &self.config.replset_name,
            &self.config.bind_ip,
            &self.config.ports,
        );
        run(
            "mongosh",
            &[
                "--port".to_string(),
                first_port.to_string(),
                "--eval".to_string(),
                script,
            ],
        )
    }

    /// Shut down every member through the admin shutdown command.
    ///
    /// Best-effort: failures (e.g. a member that never started) are logged
    /// and the remaining members are still attempted.
    pub fn stop(&self) {
        for &port in &self.config.ports {
            info!(port, "stopping mongod");
            let result = run(
                "mongosh",
                &[
                    "--port".to_string(),
                    port.to_string(),
                    "--eval".to_string(),
                    r#"db.adminCommand({ "shutdown": 1, "force": true })"#.to_string(),
                ],
            );
            if let Err(err) = result {
                warn!(port, %err, "failed to stop mongod");
            }
        }
    }

    /// Fetch `rs.status()` from the member on `port` and parse it.
    pub fn status(&self, port: u16) -> Result<Value> {
        let output = run_with_output(
            "mongosh",
            &[
                "--port".to_string(),
                port.to_string(),
                "--eval".to_string(),
                "JSON.stringify(rs.status())".to_string(),
            ],
        )?;
        parse_status(&output)
    }
}

/// Create a member data directory, wiping any previous contents unless
/// `persistent`.
fn prepare_dbpath(path: &Path, persistent: bool) -> Result<()> {
    if !persistent {
        match fs::remove_dir_all(path) {
            Ok(()) => {}
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(source) => {
                return Err(ClusterError::DataDir {
                    path: path.to_path_buf(),
                    source,
                })
            }
        }
    }
    fs::create_dir_all(path).map_err(|source| ClusterError::DataDir {
        path: path.to_path_buf(),
        source,
    })
}

/// The `rs.initiate` script listing every member in port order.
fn initiate_script(replset_name: &str, bind_ip: &str, ports: &[u16]) -> String {
    let members: Vec<String> = ports
        .iter()
        .enumerate()
        .map(|(index, port)| format!(r#"{{ _id: {index}, host: "{bind_ip}:{port}" }}"#))
        .collect();

    format!(
        r#"rs.initiate({{ _id: "{replset_name}", members: [{}] }})"#,
        members.join(", ")
    )
}

/// Parse captured `rs.status()` output, keeping the raw output in the error
/// when the shell printed something other than JSON.
fn parse_status(raw: &[u8]) -> Result<Value> {
    serde_json::from_slice(raw).map_err(|source| ClusterError::StatusParse {
        source,
        output: String::from_utf8_lossy(raw).into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_a_three_member_local_set() {
        let config = ClusterConfig::default();
        assert_eq!(config.replset_name, "rs0");
        assert_eq!(config.ports, vec![27105, 27106, 27107]);
        assert_eq!(config.data_root, PathBuf::from("data"));
        assert_eq!(config.bind_ip, "127.0.0.1");
    }

    #[test]
    fn initiate_script_lists_members_in_port_order() {
        let script = initiate_script("rs0", "127.0.0.1", &[27105, 27106]);
        assert_eq!(
            script,
            r#"rs.initiate({ _id: "rs0", members: [{ _id: 0, host: "127.0.0.1:27105" }, { _id: 1, host: "127.0.0.1:27106" }] })"#
        );
    }

    #[test]
    fn start_with_no_ports_is_rejected() {
        let cluster = LocalCluster::new(ClusterConfig {
            ports: Vec::new(),
            ..ClusterConfig::default()
        });
        assert!(matches!(cluster.start(false), Err(ClusterError::NoMembers)));
    }

    #[test]
    fn parse_status_accepts_rs_status_json() {
        let raw = br#"{"set": "rs0", "ok": 1, "members": [{"name": "127.0.0.1:27105", "stateStr": "PRIMARY"}]}"#;
        let status = parse_status(raw).unwrap();
        assert_eq!(status["set"], "rs0");
        assert_eq!(status["members"][0]["stateStr"], "PRIMARY");
    }

    #[test]
    fn parse_status_keeps_raw_output_on_failure() {
        let err = parse_status(b"MongoNetworkError: connect ECONNREFUSED").unwrap_err();
        assert!(matches!(err, ClusterError::StatusParse { output, .. }
            if output.contains("ECONNREFUSED")));
    }

    #[test]
    fn prepare_dbpath_wipes_unless_persistent() {
        let root = std::env::temp_dir().join(format!(
            "mongowire-cluster-test-{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .expect("time should be after epoch")
                .as_nanos()
        ));
        let dbpath = root.join("rs0-0");

        prepare_dbpath(&dbpath, false).unwrap();
        let marker = dbpath.join("stale.wt");
        fs::write(&marker, b"stale").unwrap();

        prepare_dbpath(&dbpath, true).unwrap();
        assert!(marker.exists(), "persistent start must keep data");

        prepare_dbpath(&dbpath, false).unwrap();
        assert!(!marker.exists(), "fresh start must wipe data");

        let _ = fs::remove_dir_all(&root);
    }
}
