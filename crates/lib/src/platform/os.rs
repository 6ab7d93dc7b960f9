use std::fmt;

/// Host operating systems the orchestrator can build on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformKind {
  Windows,
  MacOs,
  Linux,
}

impl PlatformKind {
  /// Detect the current operating system at runtime
  ///
  /// Returns `None` if the OS is not supported
  pub fn current() -> Option<Self> {
    Self::from_os_str(std::env::consts::OS)
  }

  /// Map a `std::env::consts::OS` identifier to a supported platform
  pub fn from_os_str(os: &str) -> Option<Self> {
    match os {
      "windows" => Some(Self::Windows),
      "macos" => Some(Self::MacOs),
      "linux" => Some(Self::Linux),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Windows => "windows",
      Self::MacOs => "macos",
      Self::Linux => "linux",
    }
  }
}

impl fmt::Display for PlatformKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
