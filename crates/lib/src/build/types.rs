use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::platform::PlatformError;
use crate::process::ProbeError;
use crate::symbols::SymbolError;
use crate::toolchain::ToolchainError;

/// Which pipeline an invocation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildMode {
  /// Optimized standalone executable in a freshly wiped directory.
  Release,
  /// Shared library the running host can swap in, plus the host itself when not running.
  HotReload,
}

impl BuildMode {
  pub fn as_str(&self) -> &'static str {
    match self {
      BuildMode::Release => "release",
      BuildMode::HotReload => "hot-reload",
    }
  }
}

impl fmt::Display for BuildMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Terminal state of a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
  /// A runnable executable was produced.
  Artifact(PathBuf),
  /// The library was rebuilt under a live host; there is nothing new to launch.
  Reloaded,
}

impl BuildOutcome {
  pub fn artifact(&self) -> Option<&Path> {
    match self {
      BuildOutcome::Artifact(path) => Some(path),
      BuildOutcome::Reloaded => None,
    }
  }
}

/// Every failure is fatal to the run; nothing is retried.
#[derive(Debug, Error)]
pub enum BuildError {
  #[error(transparent)]
  Platform(#[from] PlatformError),

  #[error(transparent)]
  Probe(#[from] ProbeError),

  #[error(transparent)]
  Toolchain(#[from] ToolchainError),

  #[error(transparent)]
  Symbols(#[from] SymbolError),

  #[error("Failed to {action} {}", path.display())]
  Io {
    action: &'static str,
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

impl BuildError {
  pub(crate) fn io(action: &'static str, path: &Path) -> impl FnOnce(io::Error) -> Self {
    let path = path.to_path_buf();
    move |source| BuildError::Io { action, path, source }
  }
}
