pub mod error;
pub mod fs;
pub mod path;
pub mod process;

pub use error::{exit_code, Result, ZapError};
pub use fs::{ensure_dir_exists, is_dir, is_file, remove_dir_if_exists};
pub use path::{expand_path, resolve_path};
pub use process::ProcessExecutor;
