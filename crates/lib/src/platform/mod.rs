//! Platform profile: the handful of OS-specific facts the build needs.
//!
//! The profile is resolved once at startup. Downstream code reads its fields
//! instead of branching on the host OS, which also lets tests drive the
//! Windows pipeline from any host.

pub mod os;

use thiserror::Error;

pub use os::PlatformKind;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlatformError {
  #[error("Unsupported platform: {0}")]
  Unsupported(String),
}

/// How to ask the OS whether a process is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LivenessStrategy {
  /// `TASKLIST /NH /FI "imagename eq <name>"`, match on image name.
  Tasklist,
  /// `pgrep -f <name>`, match on full command line.
  Pgrep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformProfile {
  pub kind: PlatformKind,
  /// Suffix of built executables, including the dot.
  pub executable_suffix: &'static str,
  /// Suffix of built shared libraries, including the dot.
  pub shared_library_suffix: &'static str,
  pub liveness: LivenessStrategy,
  /// Build the library to a staging path and rename it into place.
  ///
  /// Needed wherever the loader does not lock mapped libraries against overwrite.
  pub stages_library: bool,
  /// Give every library build a fresh debug-symbol file name.
  pub versions_symbols: bool,
  /// Give the host executable its own fixed symbol file.
  pub host_symbol_file: bool,
  /// Subsystem flag for optimized release executables.
  pub release_subsystem: Option<&'static str>,
}

impl PlatformProfile {
  /// Resolve the profile for the host OS.
  pub fn detect() -> Result<Self, PlatformError> {
    PlatformKind::current()
      .map(Self::for_kind)
      .ok_or_else(|| PlatformError::Unsupported(std::env::consts::OS.to_string()))
  }

  pub const fn for_kind(kind: PlatformKind) -> Self {
    match kind {
      PlatformKind::Windows => Self {
        kind,
        executable_suffix: ".exe",
        shared_library_suffix: ".dll",
        liveness: LivenessStrategy::Tasklist,
        stages_library: false,
        versions_symbols: true,
        host_symbol_file: true,
        release_subsystem: Some("-subsystem:windows"),
      },
      PlatformKind::MacOs => Self {
        kind,
        executable_suffix: ".bin",
        shared_library_suffix: ".dylib",
        liveness: LivenessStrategy::Pgrep,
        stages_library: true,
        versions_symbols: false,
        host_symbol_file: false,
        release_subsystem: None,
      },
      PlatformKind::Linux => Self {
        kind,
        executable_suffix: ".bin",
        shared_library_suffix: ".so",
        liveness: LivenessStrategy::Pgrep,
        stages_library: true,
        versions_symbols: false,
        host_symbol_file: false,
        release_subsystem: None,
      },
    }
  }
}
