//! Implementation of the build command.
//!
//! Resolves the build mode from the flags, runs the selected pipeline and
//! optionally launches the produced executable.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

use hotbuild_lib::{BuildConfig, BuildMode, BuildOutcome, build};

use crate::output::{OutputFormat, format_duration, print_info, print_json, print_stat, print_success};

pub struct BuildOptions {
  pub hot_reload: bool,
  pub release: bool,
  pub run: bool,
  pub debug: bool,
  pub output: OutputFormat,
}

#[derive(Debug, Serialize)]
struct BuildReport {
  mode: BuildMode,
  artifact: Option<PathBuf>,
  reloaded: bool,
  duration_ms: u128,
}

/// Execute a release or hot-reload build.
///
/// Flag validation happens before anything touches the filesystem. With
/// `run`, the executable is launched only when the build produced one; a
/// hot reload into a running game has nothing new to start.
pub fn cmd_build(options: &BuildOptions) -> Result<()> {
  let mode = BuildMode::from_flags(options.hot_reload, options.release)?;
  let config = BuildConfig::new(mode, options.debug, ".");
  debug!(compiler = %config.compiler.display(), "resolved configuration");

  let start = Instant::now();
  let outcome = build(&config)?;
  let elapsed = start.elapsed();

  if options.output.is_json() {
    print_json(&BuildReport {
      mode,
      artifact: outcome.artifact().map(Path::to_path_buf),
      reloaded: outcome == BuildOutcome::Reloaded,
      duration_ms: elapsed.as_millis(),
    })?;
  } else {
    match &outcome {
      BuildOutcome::Artifact(path) => print_success(&format!("Built {}", path.display())),
      BuildOutcome::Reloaded => print_success("Hot reload successful"),
    }
    print_stat("Mode", mode.as_str());
    print_stat("Duration", &format_duration(elapsed));
  }

  if let Some(path) = launch_target(&outcome, options.run) {
    if options.output.is_text() {
      print_info(&format!("Starting {}", path.display()));
    }
    launch(path)?;
  }

  Ok(())
}

/// The executable `-run` should start, if any.
fn launch_target(outcome: &BuildOutcome, run: bool) -> Option<&Path> {
  if run { outcome.artifact() } else { None }
}

/// Start the executable without waiting for it.
fn launch(path: &Path) -> Result<()> {
  let child = Command::new(path)
    .spawn()
    .with_context(|| format!("Failed to start {}", path.display()))?;
  debug!(pid = child.id(), "launched");
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn run_launches_built_artifact() {
    let outcome = BuildOutcome::Artifact(PathBuf::from("build/release/game_release.bin"));
    assert_eq!(launch_target(&outcome, true), Some(Path::new("build/release/game_release.bin")));
  }

  #[test]
  fn nothing_launches_without_run() {
    let outcome = BuildOutcome::Artifact(PathBuf::from("build/release/game_release.bin"));
    assert_eq!(launch_target(&outcome, false), None);
  }

  #[test]
  fn live_reload_never_launches() {
    assert_eq!(launch_target(&BuildOutcome::Reloaded, true), None);
  }
}
