//! hotbuild-lib: build orchestration for a hot-reloadable game project
//!
//! The compiler itself is an external tool. This crate decides what to build
//! and where, and keeps rebuilt libraries safe to swap into a running host:
//! - `platform`: OS-specific suffixes and process query strategy
//! - `paths`: artifact layout per build mode
//! - `process`: is the host executable running?
//! - `symbols`: never-reused debug-symbol file names
//! - `toolchain`: compiler invocation
//! - `build`: the release and hot-reload pipelines

pub mod build;
pub mod config;
pub mod consts;
pub mod paths;
pub mod platform;
pub mod process;
pub mod symbols;
pub mod toolchain;
pub mod util;

pub use build::{BuildError, BuildMode, BuildOutcome, Builder, build};
pub use config::{BuildConfig, ConfigError};
