pub mod codegen;
pub mod lexer;
pub mod parser;
pub mod validation;

pub use parser::Translator;
pub use validation::errors::{Cp3Error, ErrorKind, Result};

use crate::config::Config;
use crate::model::Module;
use std::path::{Path, PathBuf};

/// Extension of module sources.
pub const MODULE_EXT: &str = "cp3";
/// Secondary extension for standard module sources.
pub const STD_MODULE_EXT: &str = "mpp";
pub const HEADER_EXT: &str = "h";
pub const IMPLEMENTATION_EXT: &str = "cpp";
pub const DEPENDENCIES_EXT: &str = "dep";

/// Output of translating one module source.
#[derive(Debug)]
pub struct Translation {
    pub module_name: String,
    pub header: String,
    pub implementation: String,
    pub dependencies: Vec<String>,
    pub module: Module,
}

impl Translation {
    /// Manifest text: one dependency per line, empty when there are none.
    pub fn manifest(&self) -> String {
        self.dependencies
            .iter()
            .map(|dependency| format!("{dependency}\n"))
            .collect()
    }
}

/// Convenience function to translate module source text in memory.
pub fn translate(source: &str, file_name: &str, config: &Config) -> Result<Translation> {
    let mut translator = Translator::new(source, file_name, Vec::new(), Vec::new(), config.strictness)?
        .with_standard_headers(config.standard_headers());
    translator.process()?;

    let (header, implementation, module) = translator.into_outputs();
    Ok(Translation {
        module_name: module.name().to_string(),
        header: String::from_utf8_lossy(&header).into_owned(),
        implementation: String::from_utf8_lossy(&implementation).into_owned(),
        dependencies: module.dependencies().to_vec(),
        module,
    })
}

/// True for `.cp3` and `.mpp` sources.
pub fn is_module_source(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == MODULE_EXT || ext == STD_MODULE_EXT)
}

/// Rewrites a module source name to the header it produces; other names pass through.
pub fn header_name_for(file_name: &str) -> String {
    let path = Path::new(file_name);
    if is_module_source(path) {
        path.with_extension(HEADER_EXT).to_string_lossy().into_owned()
    } else {
        file_name.to_string()
    }
}

/// Generated files for one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub header: PathBuf,
    pub implementation: PathBuf,
    pub dependencies: PathBuf,
}

impl OutputPaths {
    pub fn for_input(input: &Path) -> Self {
        Self {
            header: input.with_extension(HEADER_EXT),
            implementation: input.with_extension(IMPLEMENTATION_EXT),
            dependencies: input.with_extension(DEPENDENCIES_EXT),
        }
    }
}
