pub mod args;
pub mod commands;

pub use commands::{run, translate_file, FileOutcome};
