//! Versioned debug-symbol file names.
//!
//! Debuggers cache symbol files by name, so every library build gets a
//! symbol file named `<prefix><N><suffix>` with `N` one past the highest
//! version already present. Versions are never reused within a session,
//! even when older files have been deleted.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SymbolError {
  #[error("Failed to access symbol directory {}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Symbol versions exhausted in {}", .0.display())]
  Exhausted(PathBuf),
}

/// A directory of versioned symbol files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolStore {
  dir: PathBuf,
  prefix: String,
  suffix: String,
}

impl SymbolStore {
  pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
    Self {
      dir: dir.into(),
      prefix: prefix.into(),
      suffix: suffix.into(),
    }
  }

  pub fn dir(&self) -> &Path {
    &self.dir
  }

  /// Compute the next unused version, creating the directory if it is missing.
  ///
  /// A fresh directory starts at `1`. File names that do not match
  /// `<prefix><integer><suffix>` are ignored.
  pub fn next_version(&self) -> Result<u64, SymbolError> {
    if !self.dir.exists() {
      std::fs::create_dir_all(&self.dir).map_err(|source| self.io_error(source))?;
      return Ok(1);
    }

    let mut highest = 0;
    for entry in std::fs::read_dir(&self.dir).map_err(|source| self.io_error(source))? {
      let entry = entry.map_err(|source| self.io_error(source))?;
      let name = entry.file_name();
      let Some(digits) = name.to_str().and_then(|name| self.version_digits(name)) else {
        continue;
      };
      // A well-formed name past u64::MAX must still never be reused
      let version: u64 = digits
        .parse()
        .map_err(|_| SymbolError::Exhausted(self.dir.clone()))?;
      highest = highest.max(version);
    }

    let next = highest
      .checked_add(1)
      .ok_or_else(|| SymbolError::Exhausted(self.dir.clone()))?;
    debug!(dir = %self.dir.display(), highest, next, "symbol version");
    Ok(next)
  }

  /// Extract `N` from `<prefix>N<suffix>`.
  pub fn parse_version(&self, file_name: &str) -> Option<u64> {
    self.version_digits(file_name)?.parse().ok()
  }

  fn version_digits<'n>(&self, file_name: &'n str) -> Option<&'n str> {
    let digits = file_name.strip_prefix(&self.prefix)?.strip_suffix(&self.suffix)?;
    (!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())).then_some(digits)
  }

  pub fn file_for(&self, version: u64) -> PathBuf {
    self.dir.join(format!("{}{}{}", self.prefix, version, self.suffix))
  }

  fn io_error(&self, source: io::Error) -> SymbolError {
    SymbolError::Io {
      path: self.dir.clone(),
      source,
    }
  }
}

/// Start a new reload session: delete every shared library in `output_dir`
/// and the whole symbol directory.
///
/// Returns the number of library files removed.
pub fn purge_session(output_dir: &Path, library_suffix: &str, symbols: &SymbolStore) -> io::Result<usize> {
  let mut removed = 0;
  for entry in std::fs::read_dir(output_dir)? {
    let entry = entry?;
    let path = entry.path();
    let is_library = entry
      .file_name()
      .to_str()
      .is_some_and(|name| name.ends_with(library_suffix));
    if is_library && entry.file_type()?.is_file() {
      debug!(path = %path.display(), "removing stale library");
      std::fs::remove_file(&path)?;
      removed += 1;
    }
  }

  if symbols.dir().exists() {
    debug!(dir = %symbols.dir().display(), "removing symbol history");
    std::fs::remove_dir_all(symbols.dir())?;
  }

  Ok(removed)
}
