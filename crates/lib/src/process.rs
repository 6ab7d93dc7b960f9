//! Host process liveness detection.
//!
//! "Not running" is a normal answer. Only a failure to run the OS query
//! itself is an error, since the hot-reload pipeline cannot safely decide
//! whether to purge files without knowing.

use std::io;
use std::process::{Command, Output};

use thiserror::Error;
use tracing::debug;

use crate::platform::LivenessStrategy;

#[derive(Debug, Error)]
pub enum ProbeError {
  #[error("Failed to run process query `{program}`")]
  Spawn {
    program: &'static str,
    #[source]
    source: io::Error,
  },

  #[error("Process query `{program}` failed with exit code {code:?}")]
  QueryFailed { program: &'static str, code: Option<i32> },
}

/// Answers whether a process with the given executable name is running.
pub trait ProcessProbe {
  fn is_running(&self, executable_name: &str) -> Result<bool, ProbeError>;
}

/// Queries the live OS process list using the platform's strategy.
#[derive(Debug, Clone, Copy)]
pub struct SystemProbe {
  strategy: LivenessStrategy,
}

impl SystemProbe {
  pub fn new(strategy: LivenessStrategy) -> Self {
    Self { strategy }
  }
}

impl ProcessProbe for SystemProbe {
  fn is_running(&self, executable_name: &str) -> Result<bool, ProbeError> {
    let running = match self.strategy {
      LivenessStrategy::Tasklist => {
        let filter = format!("imagename eq {executable_name}");
        let output = query("TASKLIST", &["/NH", "/FI", filter.as_str()])?;
        if !output.status.success() {
          return Err(ProbeError::QueryFailed {
            program: "TASKLIST",
            code: output.status.code(),
          });
        }
        tasklist_reports(&String::from_utf8_lossy(&output.stdout), executable_name)
      }
      LivenessStrategy::Pgrep => {
        let output = query("pgrep", &["-f", executable_name])?;
        // pgrep exits 1 when nothing matched, >= 2 on its own errors
        match output.status.code() {
          Some(0 | 1) => pgrep_reports(&String::from_utf8_lossy(&output.stdout)),
          code => {
            return Err(ProbeError::QueryFailed {
              program: "pgrep",
              code,
            });
          }
        }
      }
    };

    debug!(executable = %executable_name, running, "process liveness");
    Ok(running)
  }
}

fn query(program: &'static str, args: &[&str]) -> Result<Output, ProbeError> {
  Command::new(program)
    .args(args)
    .output()
    .map_err(|source| ProbeError::Spawn { program, source })
}

/// TASKLIST prints an informational line instead of a row when nothing matches.
fn tasklist_reports(stdout: &str, executable_name: &str) -> bool {
  stdout.contains(executable_name)
}

fn pgrep_reports(stdout: &str) -> bool {
  !stdout.trim().is_empty()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn tasklist_match_on_image_name() {
    let row = "game_hot_reload.exe          4242 Console                    1     52,100 K\r\n";
    assert!(tasklist_reports(row, "game_hot_reload.exe"));
  }

  #[test]
  fn tasklist_no_tasks_message_is_not_running() {
    let info = "INFO: No tasks are running which match the specified criteria.\r\n";
    assert!(!tasklist_reports(info, "game_hot_reload.exe"));
  }

  #[test]
  fn pgrep_output_means_running() {
    assert!(pgrep_reports("4242\n"));
    assert!(!pgrep_reports(""));
    assert!(!pgrep_reports("\n"));
  }

  #[test]
  #[cfg(unix)]
  fn pgrep_unknown_process_is_not_running() {
    // Skip quietly on hosts without pgrep; the spawn error path is covered below
    let probe = SystemProbe::new(LivenessStrategy::Pgrep);
    match probe.is_running("hotbuild-no-such-process-7f3a9c") {
      Ok(running) => assert!(!running),
      Err(ProbeError::Spawn { .. }) => {}
      Err(other) => panic!("unexpected error: {other}"),
    }
  }

  #[test]
  fn missing_query_program_is_an_error() {
    let err = query("hotbuild-definitely-missing-binary", &[]).unwrap_err();
    assert!(matches!(err, ProbeError::Spawn { .. }));
  }
}
