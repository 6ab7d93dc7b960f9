//! Compiler invocation.
//!
//! The compiler is an opaque subprocess. Any non-zero exit is reported with
//! the full command line and treated as fatal by the caller; there is no
//! retry and no cleanup of partial output.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::Command;

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ToolchainError {
  #[error("Failed running: {command} (exit code {code:?})")]
  Failed { command: String, code: Option<i32> },

  #[error("Failed to start compiler `{command}`")]
  Spawn {
    command: String,
    #[source]
    source: io::Error,
  },
}

/// One compiler run: a source package, an output path and extra flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileJob {
  pub target: PathBuf,
  pub output: PathBuf,
  pub flags: Vec<String>,
}

impl CompileJob {
  pub fn new(target: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
    Self {
      target: target.into(),
      output: output.into(),
      flags: Vec::new(),
    }
  }

  pub fn flag(mut self, flag: impl Into<String>) -> Self {
    self.flags.push(flag.into());
    self
  }

  pub fn flag_if(self, condition: bool, flag: impl Into<String>) -> Self {
    if condition { self.flag(flag) } else { self }
  }

  /// Arguments after the compiler binary: `build <target> -out:<output> <flags...>`
  pub fn args(&self) -> Vec<String> {
    let mut args = vec![
      "build".to_string(),
      self.target.display().to_string(),
      format!("-out:{}", self.output.display()),
    ];
    args.extend(self.flags.iter().cloned());
    args
  }

  pub fn has_flag(&self, flag: &str) -> bool {
    self.flags.iter().any(|f| f == flag)
  }
}

impl fmt::Display for CompileJob {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.args().join(" "))
  }
}

/// Something that can turn a [`CompileJob`] into an artifact on disk.
pub trait Toolchain {
  fn compile(&self, job: &CompileJob) -> Result<(), ToolchainError>;
}

/// The Odin compiler, run synchronously with inherited stdio.
///
/// Job paths are passed through unchanged, so they resolve against the
/// orchestrator's own working directory.
#[derive(Debug, Clone)]
pub struct OdinToolchain {
  compiler: PathBuf,
}

impl OdinToolchain {
  pub fn new(compiler: impl Into<PathBuf>) -> Self {
    Self {
      compiler: compiler.into(),
    }
  }

  fn command_line(&self, job: &CompileJob) -> String {
    format!("{} {}", self.compiler.display(), job)
  }
}

impl Toolchain for OdinToolchain {
  fn compile(&self, job: &CompileJob) -> Result<(), ToolchainError> {
    let command = self.command_line(job);
    debug!(command = %command, "spawning compiler");

    let status = Command::new(&self.compiler)
      .args(job.args())
      .status()
      .map_err(|source| ToolchainError::Spawn {
        command: command.clone(),
        source,
      })?;

    if !status.success() {
      return Err(ToolchainError::Failed {
        command,
        code: status.code(),
      });
    }

    Ok(())
  }
}
