use std::ffi::OsString;
use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use tracing_subscriber::EnvFilter;

mod cmd;
mod output;

use output::{OutputFormat, print_error};

/// Long flags that may also be spelled with a single dash (`-hot-reload`).
const LONG_FLAGS: &[&str] = &["hot-reload", "release", "run", "debug", "verbose", "output", "help", "version"];

/// hotbuild - release and hot-reload builds for the game project
#[derive(Parser)]
#[command(name = "hotbuild")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Build the hot reload game library. Also builds the host executable if the
  /// game is not already running; a running game picks up the new library itself.
  #[arg(long = "hot-reload")]
  hot_reload: bool,

  /// Build the release executable. Deletes everything in build/release first.
  #[arg(long)]
  release: bool,

  /// Run the executable after compiling it.
  #[arg(long)]
  run: bool,

  /// Create debuggable artifacts. Comes with a performance penalty.
  #[arg(long)]
  debug: bool,

  /// Enable verbose output
  #[arg(short, long)]
  verbose: bool,

  /// Output format
  #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
  output: OutputFormat,
}

fn main() -> ExitCode {
  let cli = match Cli::try_parse_from(normalize_args(std::env::args_os())) {
    Ok(cli) => cli,
    Err(err) => match err.kind() {
      ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
      _ => {
        let _ = err.print();
        return ExitCode::FAILURE;
      }
    },
  };

  init_tracing(cli.verbose);

  let options = cmd::BuildOptions {
    hot_reload: cli.hot_reload,
    release: cli.release,
    run: cli.run,
    debug: cli.debug,
    output: cli.output,
  };

  match cmd::cmd_build(&options) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&format!("{err:#}"));
      ExitCode::FAILURE
    }
  }
}

fn init_tracing(verbose: bool) {
  let default_directives = if verbose {
    "hotbuild=debug,hotbuild_lib=debug"
  } else {
    "hotbuild_lib=info"
  };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_ansi(std::io::stderr().is_terminal())
    .with_target(false)
    .without_time()
    .init();
}

/// Rewrite `-release` style flags to `--release` so clap accepts them.
fn normalize_args(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
  args
    .into_iter()
    .map(|arg| {
      let rewritten = arg.to_str().and_then(|s| {
        let rest = s.strip_prefix('-').filter(|rest| !rest.starts_with('-'))?;
        let name = rest.split('=').next().unwrap_or(rest);
        LONG_FLAGS.contains(&name).then(|| OsString::from(format!("-{s}")))
      });
      rewritten.unwrap_or(arg)
    })
    .collect()
}
