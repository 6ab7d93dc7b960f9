//! Artifact path resolution.
//!
//! Every path is computed from the project root, the product name and the
//! platform profile. Nothing here touches the filesystem except the two
//! directory preparation helpers at the bottom.

use std::io;
use std::path::{Path, PathBuf};

use crate::build::BuildMode;
use crate::config::BuildConfig;
use crate::consts::{
  HOST_EXE_NAME, HOST_SYMBOL_FILE, HOT_RELOAD_DIR, RELEASE_DIR, RELEASE_SUFFIX, STAGING_INFIX, SYMBOL_DIR_NAME,
};
use crate::platform::{PlatformKind, PlatformProfile};

/// Where a build writes its primary artifact.
///
/// `final_name` always lives under `output_dir`. When `staging_name` is set the
/// compiler writes there first and the file is renamed over `final_name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSpec {
  pub mode: BuildMode,
  pub platform: PlatformKind,
  pub output_dir: PathBuf,
  pub final_name: PathBuf,
  pub staging_name: Option<PathBuf>,
}

impl ArtifactSpec {
  pub fn resolve(config: &BuildConfig, profile: &PlatformProfile) -> Self {
    match config.mode {
      BuildMode::Release => Self::release(config, profile),
      BuildMode::HotReload => Self::hot_reload(config, profile),
    }
  }

  /// `build/release/<product>_release<exe>`
  pub fn release(config: &BuildConfig, profile: &PlatformProfile) -> Self {
    let output_dir = config.project_root.join(RELEASE_DIR);
    let final_name = output_dir.join(format!(
      "{}{}{}",
      config.product, RELEASE_SUFFIX, profile.executable_suffix
    ));

    Self {
      mode: BuildMode::Release,
      platform: profile.kind,
      output_dir,
      final_name,
      staging_name: None,
    }
  }

  /// `build/hot_reload/<product><lib>`, staged through `<product>_tmp<lib>` where needed.
  pub fn hot_reload(config: &BuildConfig, profile: &PlatformProfile) -> Self {
    let output_dir = config.project_root.join(HOT_RELOAD_DIR);
    let final_name = output_dir.join(format!("{}{}", config.product, profile.shared_library_suffix));
    let staging_name = profile.stages_library.then(|| {
      output_dir.join(format!(
        "{}{}{}",
        config.product, STAGING_INFIX, profile.shared_library_suffix
      ))
    });

    Self {
      mode: BuildMode::HotReload,
      platform: profile.kind,
      output_dir,
      final_name,
      staging_name,
    }
  }

  /// The path the compiler should write to.
  pub fn build_target(&self) -> &Path {
    self.staging_name.as_deref().unwrap_or(&self.final_name)
  }

  /// Directory holding versioned debug-symbol files for the library.
  pub fn symbol_dir(&self) -> PathBuf {
    self.output_dir.join(SYMBOL_DIR_NAME)
  }
}

/// The long-running executable that loads the hot-reload library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostExecutable {
  /// Image name, as matched by the liveness query.
  pub name: String,
  /// Output path, in the project root.
  pub path: PathBuf,
  /// Fixed symbol file for the host (Windows only).
  pub symbol_file: PathBuf,
}

impl HostExecutable {
  pub fn resolve(config: &BuildConfig, profile: &PlatformProfile) -> Self {
    let name = format!("{}{}", HOST_EXE_NAME, profile.executable_suffix);
    Self {
      path: config.project_root.join(&name),
      symbol_file: config.project_root.join(HOT_RELOAD_DIR).join(HOST_SYMBOL_FILE),
      name,
    }
  }
}

/// Remove `dir` with everything in it and create it again, empty.
pub fn recreate_dir(dir: &Path) -> io::Result<()> {
  if dir.exists() {
    std::fs::remove_dir_all(dir)?;
  }
  std::fs::create_dir_all(dir)
}

/// Create `dir` (and parents) unless it already exists.
pub fn ensure_dir(dir: &Path) -> io::Result<()> {
  if !dir.exists() {
    std::fs::create_dir_all(dir)?;
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  fn config(mode: BuildMode) -> BuildConfig {
    BuildConfig::new(mode, false, "proj").with_compiler("odin")
  }

  #[test]
  fn release_paths() {
    let profile = PlatformProfile::for_kind(PlatformKind::Linux);
    let spec = ArtifactSpec::resolve(&config(BuildMode::Release), &profile);

    assert_eq!(spec.mode, BuildMode::Release);
    assert_eq!(spec.platform, PlatformKind::Linux);
    assert_eq!(spec.output_dir, PathBuf::from("proj/build/release"));
    assert_eq!(spec.final_name, PathBuf::from("proj/build/release/game_release.bin"));
    assert_eq!(spec.staging_name, None);
    assert_eq!(spec.build_target(), spec.final_name.as_path());
  }

  #[test]
  fn windows_release_uses_exe_suffix() {
    let profile = PlatformProfile::for_kind(PlatformKind::Windows);
    let spec = ArtifactSpec::release(&config(BuildMode::Release), &profile);
    assert_eq!(spec.final_name, PathBuf::from("proj/build/release/game_release.exe"));
  }

  #[test]
  fn hot_reload_stages_on_linux() {
    let profile = PlatformProfile::for_kind(PlatformKind::Linux);
    let spec = ArtifactSpec::resolve(&config(BuildMode::HotReload), &profile);

    assert_eq!(spec.final_name, PathBuf::from("proj/build/hot_reload/game.so"));
    assert_eq!(
      spec.staging_name,
      Some(PathBuf::from("proj/build/hot_reload/game_tmp.so"))
    );
    assert_eq!(spec.build_target(), Path::new("proj/build/hot_reload/game_tmp.so"));
    assert!(spec.final_name.starts_with(&spec.output_dir));
  }

  #[test]
  fn hot_reload_on_macos_uses_dylib() {
    let profile = PlatformProfile::for_kind(PlatformKind::MacOs);
    let spec = ArtifactSpec::hot_reload(&config(BuildMode::HotReload), &profile);
    assert_eq!(spec.final_name, PathBuf::from("proj/build/hot_reload/game.dylib"));
    assert_eq!(
      spec.staging_name,
      Some(PathBuf::from("proj/build/hot_reload/game_tmp.dylib"))
    );
  }

  #[test]
  fn hot_reload_on_windows_writes_final_path_directly() {
    let profile = PlatformProfile::for_kind(PlatformKind::Windows);
    let spec = ArtifactSpec::hot_reload(&config(BuildMode::HotReload), &profile);

    assert_eq!(spec.mode, BuildMode::HotReload);
    assert_eq!(spec.platform, PlatformKind::Windows);
    assert_eq!(spec.final_name, PathBuf::from("proj/build/hot_reload/game.dll"));
    assert_eq!(spec.staging_name, None);
    assert_eq!(spec.symbol_dir(), PathBuf::from("proj/build/hot_reload/game_pdbs"));
  }

  #[test]
  fn host_executable_lives_in_project_root() {
    let profile = PlatformProfile::for_kind(PlatformKind::Windows);
    let host = HostExecutable::resolve(&config(BuildMode::HotReload), &profile);

    assert_eq!(host.name, "game_hot_reload.exe");
    assert_eq!(host.path, PathBuf::from("proj/game_hot_reload.exe"));
    assert_eq!(
      host.symbol_file,
      PathBuf::from("proj/build/hot_reload/main_hot_reload.pdb")
    );
  }

  #[test]
  fn recreate_dir_discards_previous_contents() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("build/release");
    std::fs::create_dir_all(dir.join("nested")).unwrap();
    std::fs::write(dir.join("stale.bin"), b"old").unwrap();

    recreate_dir(&dir).unwrap();

    assert!(dir.is_dir());
    assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);
  }

  #[test]
  fn ensure_dir_keeps_existing_contents() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("build/hot_reload");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("keep.pdb"), b"x").unwrap();

    ensure_dir(&dir).unwrap();

    assert!(dir.join("keep.pdb").exists());
  }
}
