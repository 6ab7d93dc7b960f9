//! Fixed names for the game project layout.

/// Base name of every artifact the project produces.
pub const PRODUCT_NAME: &str = "game";

/// Release output directory. Wiped on every release build.
pub const RELEASE_DIR: &str = "build/release";

/// Hot-reload output directory. Persists across builds within a session.
pub const HOT_RELOAD_DIR: &str = "build/hot_reload";

/// Suffix of debug-symbol files. Library symbol files are named `<product>_<N>.pdb`.
pub const SYMBOL_FILE_SUFFIX: &str = ".pdb";

/// Symbol-file directory name, nested under [`HOT_RELOAD_DIR`].
pub const SYMBOL_DIR_NAME: &str = "game_pdbs";

/// Infix appended to the library stem while it is being written.
pub const STAGING_INFIX: &str = "_tmp";

/// Base name of the host executable that loads the game library.
pub const HOST_EXE_NAME: &str = "game_hot_reload";

/// Fixed symbol file of the host executable, inside [`HOT_RELOAD_DIR`].
pub const HOST_SYMBOL_FILE: &str = "main_hot_reload.pdb";

/// Suffix of the release executable stem (`game_release`).
pub const RELEASE_SUFFIX: &str = "_release";

/// Source package compiled into the game library.
pub const LIBRARY_SOURCE: &str = "source";

/// Entry point package of the hot-reload host executable.
pub const HOST_SOURCE: &str = "source/main_hot_reload";

/// Entry point package of the release executable.
pub const RELEASE_SOURCE: &str = "source/main_release";

/// Environment variable overriding the compiler binary.
pub const COMPILER_ENV: &str = "HOTBUILD_COMPILER";

/// Compiler binary used when [`COMPILER_ENV`] is unset.
pub const DEFAULT_COMPILER: &str = "odin";
