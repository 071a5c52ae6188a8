pub mod cli;
pub mod config;
pub mod model;
pub mod transpiler;

// Re-export commonly used types
pub use config::Config;
pub use model::{Module, Strictness};
pub use transpiler::{translate, Cp3Error, ErrorKind, Translation, Translator};
