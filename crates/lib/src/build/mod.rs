//! Build mode controller.
//!
//! Sequences the platform profile, path resolution, liveness query, symbol
//! versioning and compiler runs into one of two pipelines:
//!
//! - **Release**: wipe `build/release`, compile the release entry point
//!   straight to its final path.
//! - **Hot reload**: compile the game library (staged and renamed where the
//!   platform needs it), then compile the host executable only if it is not
//!   already running. A live host picks the new library up by itself.

mod types;

use tracing::{debug, info};

pub use types::*;

use crate::config::BuildConfig;
use crate::consts::{HOST_SOURCE, LIBRARY_SOURCE, RELEASE_SOURCE, SYMBOL_FILE_SUFFIX};
use crate::paths::{ArtifactSpec, HostExecutable, ensure_dir, recreate_dir};
use crate::platform::PlatformProfile;
use crate::process::{ProcessProbe, SystemProbe};
use crate::symbols::{SymbolStore, purge_session};
use crate::toolchain::{CompileJob, OdinToolchain, Toolchain};

/// Build with the host's platform profile, the configured compiler and the OS process list.
pub fn build(config: &BuildConfig) -> Result<BuildOutcome, BuildError> {
  let profile = PlatformProfile::detect()?;
  let toolchain = OdinToolchain::new(&config.compiler);
  let probe = SystemProbe::new(profile.liveness);
  Builder::new(config, profile, &toolchain, &probe).run()
}

pub struct Builder<'a, T, P> {
  config: &'a BuildConfig,
  profile: PlatformProfile,
  toolchain: &'a T,
  probe: &'a P,
}

impl<'a, T: Toolchain, P: ProcessProbe> Builder<'a, T, P> {
  pub fn new(config: &'a BuildConfig, profile: PlatformProfile, toolchain: &'a T, probe: &'a P) -> Self {
    Self {
      config,
      profile,
      toolchain,
      probe,
    }
  }

  pub fn run(&self) -> Result<BuildOutcome, BuildError> {
    debug!(debug = self.config.debug, compiler = %self.config.compiler.display(), "starting build");
    match self.config.mode {
      BuildMode::Release => self.build_release(),
      BuildMode::HotReload => self.build_hot_reload(),
    }
  }

  fn build_release(&self) -> Result<BuildOutcome, BuildError> {
    info!("Start release build");
    let spec = ArtifactSpec::release(self.config, &self.profile);
    trace_spec(&spec);

    recreate_dir(&spec.output_dir).map_err(BuildError::io("recreate", &spec.output_dir))?;

    let optimize = !self.config.debug;
    let mut job = CompileJob::new(self.config.project_root.join(RELEASE_SOURCE), &spec.final_name)
      .flag("-strict-style")
      .flag("-vet")
      .flag_if(optimize, "-no-bounds-check")
      .flag_if(optimize, "-o:speed");
    if optimize && let Some(subsystem) = self.profile.release_subsystem {
      job = job.flag(subsystem);
    }
    let job = job.flag_if(self.config.debug, "-debug");

    info!("Building {}...", spec.final_name.display());
    self.toolchain.compile(&job)?;

    Ok(BuildOutcome::Artifact(spec.final_name))
  }

  fn build_hot_reload(&self) -> Result<BuildOutcome, BuildError> {
    let spec = ArtifactSpec::hot_reload(self.config, &self.profile);
    trace_spec(&spec);
    let host = HostExecutable::resolve(self.config, &self.profile);

    ensure_dir(&spec.output_dir).map_err(BuildError::io("create", &spec.output_dir))?;

    let host_running = self.probe.is_running(&host.name)?;
    debug!(host = %host.name, running = host_running, "host liveness");

    let mut job = CompileJob::new(self.config.project_root.join(LIBRARY_SOURCE), spec.build_target())
      .flag("-build-mode:dll")
      .flag_if(self.config.debug, "-debug");

    if self.profile.versions_symbols {
      let symbols = SymbolStore::new(
        spec.symbol_dir(),
        format!("{}_", self.config.product),
        SYMBOL_FILE_SUFFIX,
      );

      // A live host still has the current library and its symbols mapped
      if !host_running {
        let removed = purge_session(&spec.output_dir, self.profile.shared_library_suffix, &symbols)
          .map_err(BuildError::io("purge", &spec.output_dir))?;
        debug!(removed, "reset reload session");
      }

      let version = symbols.next_version()?;
      job = job.flag(format!("-pdb-name:{}", symbols.file_for(version).display()));
    }

    info!("Building {}...", spec.final_name.display());
    self.toolchain.compile(&job)?;

    if let Some(staging) = &spec.staging_name {
      std::fs::rename(staging, &spec.final_name).map_err(BuildError::io("rename", staging))?;
    }

    if host_running {
      info!("Hot reload successful");
      return Ok(BuildOutcome::Reloaded);
    }

    let job = CompileJob::new(self.config.project_root.join(HOST_SOURCE), &host.path)
      .flag("-strict-style")
      .flag("-vet")
      .flag_if(
        self.profile.host_symbol_file,
        format!("-pdb-name:{}", host.symbol_file.display()),
      )
      .flag_if(self.config.debug, "-debug");

    info!("Building {}...", host.path.display());
    self.toolchain.compile(&job)?;

    Ok(BuildOutcome::Artifact(host.path))
  }
}

fn trace_spec(spec: &ArtifactSpec) {
  debug!(
    mode = %spec.mode,
    platform = %spec.platform,
    target = %spec.build_target().display(),
    final_name = %spec.final_name.display(),
    "resolved artifact"
  );
}
