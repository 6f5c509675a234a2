pub mod activation;
pub mod locator;
pub mod shell;
pub mod venv;
pub mod version;

pub use activation::ShellKind;
pub use locator::{Interpreter, InterpreterLocator};
pub use shell::ShellLauncher;
pub use venv::{StdlibVenv, VenvCreator, VENV_MARKER};
