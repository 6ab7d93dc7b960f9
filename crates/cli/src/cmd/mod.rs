mod build;

pub use build::{BuildOptions, cmd_build};
