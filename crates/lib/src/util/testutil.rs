//! Test utilities for hotbuild-lib.
//!
//! Scripted stand-ins for the compiler and the OS process query, so the
//! build pipelines can be exercised on any host without a real toolchain.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use crate::process::{ProbeError, ProcessProbe};
use crate::toolchain::{CompileJob, Toolchain, ToolchainError};

/// Records every job and writes the rendered command line to its output path.
///
/// A `-pdb-name:<path>` flag also produces an empty file at `<path>`, as the
/// real compiler would.
#[derive(Debug, Default)]
pub struct RecordingToolchain {
  jobs: RefCell<Vec<CompileJob>>,
  fail_on: Option<usize>,
  watch: Option<PathBuf>,
  observed: RefCell<Vec<Option<String>>>,
}

impl RecordingToolchain {
  pub fn new() -> Self {
    Self::default()
  }

  /// Fail the `index`-th job (0-based) with exit code 1, without writing output.
  pub fn failing_on(index: usize) -> Self {
    Self {
      fail_on: Some(index),
      ..Self::default()
    }
  }

  /// Capture the contents of `path` at the start of every job.
  pub fn watching(path: impl Into<PathBuf>) -> Self {
    Self {
      watch: Some(path.into()),
      ..Self::default()
    }
  }

  pub fn jobs(&self) -> Vec<CompileJob> {
    self.jobs.borrow().clone()
  }

  pub fn observed(&self) -> Vec<Option<String>> {
    self.observed.borrow().clone()
  }
}

impl Toolchain for RecordingToolchain {
  fn compile(&self, job: &CompileJob) -> Result<(), ToolchainError> {
    if let Some(watch) = &self.watch {
      self
        .observed
        .borrow_mut()
        .push(std::fs::read_to_string(watch).ok());
    }

    let index = self.jobs.borrow().len();
    self.jobs.borrow_mut().push(job.clone());

    if self.fail_on == Some(index) {
      return Err(ToolchainError::Failed {
        command: format!("odin {job}"),
        code: Some(1),
      });
    }

    if let Some(parent) = job.output.parent() {
      std::fs::create_dir_all(parent).expect("create output parent");
    }
    std::fs::write(&job.output, job.to_string()).expect("write fake artifact");
    for pdb in job.flags.iter().filter_map(|flag| flag.strip_prefix("-pdb-name:")) {
      std::fs::write(pdb, b"").expect("write fake symbol file");
    }
    Ok(())
  }
}

/// A process probe with a fixed answer.
#[derive(Debug, Clone, Copy)]
pub enum ScriptedProbe {
  Running,
  NotRunning,
  Broken,
}

impl ProcessProbe for ScriptedProbe {
  fn is_running(&self, _executable_name: &str) -> Result<bool, ProbeError> {
    match self {
      ScriptedProbe::Running => Ok(true),
      ScriptedProbe::NotRunning => Ok(false),
      ScriptedProbe::Broken => Err(ProbeError::QueryFailed {
        program: "pgrep",
        code: Some(3),
      }),
    }
  }
}

/// Write an executable shell script that behaves like the compiler.
///
/// It exits with `exit_code`; on success it writes its arguments to the
/// `-out:` path.
#[cfg(unix)]
pub fn fake_compiler(dir: &Path, exit_code: i32) -> PathBuf {
  use std::os::unix::fs::PermissionsExt;

  let path = dir.join("fake-odin");
  let script = format!(
    r#"#!/bin/sh
for arg in "$@"; do
  case "$arg" in
    -out:*) out="${{arg#-out:}}" ;;
  esac
done
if [ {exit_code} -ne 0 ]; then
  exit {exit_code}
fi
mkdir -p "$(dirname "$out")"
echo "$*" > "$out"
"#
  );
  std::fs::write(&path, script).unwrap();
  std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
  path
}
