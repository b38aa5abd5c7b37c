use std::process::{Command, Stdio};

use crate::error::{ClusterError, Result};

/// Run an external command, streaming its output to this process.
pub(crate) fn run(program: &str, args: &[String]) -> Result<()> {
    let status = Command::new(program)
        .args(args)
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|source| ClusterError::Spawn {
            command: program.to_string(),
            source,
        })?;

    if !status.success() {
        return Err(ClusterError::CommandFailed {
            command: program.to_string(),
            status,
        });
    }
    Ok(())
}

/// Run an external command and capture its stdout.
pub(crate) fn run_with_output(program: &str, args: &[String]) -> Result<Vec<u8>> {
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|source| ClusterError::Spawn {
            command: program.to_string(),
            source,
        })?;

    if !output.status.success() {
        return Err(ClusterError::CommandFailed {
            command: program.to_string(),
            status: output.status,
        });
    }
    Ok(output.stdout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_binary_is_a_spawn_error() {
        let err = run("mongowire-test-no-such-binary", &[]).unwrap_err();
        assert!(matches!(err, ClusterError::Spawn { command, .. }
            if command == "mongowire-test-no-such-binary"));
    }

    #[test]
    fn nonzero_exit_is_a_command_failure() {
        let err = run("false", &[]).unwrap_err();
        assert!(matches!(err, ClusterError::CommandFailed { .. }));
    }

    #[test]
    fn captures_stdout() {
        let out = run_with_output("echo", &["status-output".to_string()]).unwrap();
        assert_eq!(String::from_utf8_lossy(&out).trim(), "status-output");
    }
}
