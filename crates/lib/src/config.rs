//! Immutable configuration for a single orchestrator invocation.

use std::path::PathBuf;

use thiserror::Error;

use crate::build::BuildMode;
use crate::consts::{COMPILER_ENV, DEFAULT_COMPILER, PRODUCT_NAME};

/// Invalid flag combinations, detected before any build step runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
  #[error("You must use one of: -hot-reload, -release")]
  NoBuildMode,

  #[error("Can only use one of: -hot-reload, -release.")]
  ConflictingBuildModes,
}

impl BuildMode {
  /// Resolve the build mode from the two mutually exclusive flags.
  pub fn from_flags(hot_reload: bool, release: bool) -> Result<Self, ConfigError> {
    match (hot_reload, release) {
      (true, false) => Ok(BuildMode::HotReload),
      (false, true) => Ok(BuildMode::Release),
      (true, true) => Err(ConfigError::ConflictingBuildModes),
      (false, false) => Err(ConfigError::NoBuildMode),
    }
  }
}

/// Everything the controller needs to know about this invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
  pub mode: BuildMode,
  /// Build debuggable, unoptimized artifacts.
  pub debug: bool,
  /// Directory containing `source/`; all output paths are relative to it.
  pub project_root: PathBuf,
  /// Base name of the produced artifacts.
  pub product: String,
  /// Compiler binary to invoke.
  pub compiler: PathBuf,
}

impl BuildConfig {
  pub fn new(mode: BuildMode, debug: bool, project_root: impl Into<PathBuf>) -> Self {
    Self {
      mode,
      debug,
      project_root: project_root.into(),
      product: PRODUCT_NAME.to_string(),
      compiler: compiler_from_env(),
    }
  }

  pub fn with_compiler(mut self, compiler: impl Into<PathBuf>) -> Self {
    self.compiler = compiler.into();
    self
  }
}

/// Returns the compiler binary, honoring `HOTBUILD_COMPILER` when set and non-empty.
pub fn compiler_from_env() -> PathBuf {
  std::env::var(COMPILER_ENV)
    .ok()
    .filter(|value| !value.trim().is_empty())
    .map(PathBuf::from)
    .unwrap_or_else(|| PathBuf::from(DEFAULT_COMPILER))
}
