use crate::cli::args::{Cli, Commands};
use crate::config::Config;
use crate::model::Module;
use crate::transpiler::{
    is_module_source, Cp3Error, OutputPaths, Translator, DEPENDENCIES_EXT, HEADER_EXT,
    IMPLEMENTATION_EXT, MODULE_EXT, STD_MODULE_EXT,
};
use anyhow::{anyhow, Result};
use clap::Parser;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// What happened to one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Not a module source.
    Skipped,
    /// Both outputs are newer than the input.
    UpToDate,
    Translated(OutputPaths),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::from_env().with_verbose(cli.verbose);

    match cli.command {
        Commands::Translate {
            inputs,
            force,
            level,
            extra_std_headers,
        } => {
            let config = config
                .with_force(force)
                .with_level(level)
                .with_extra_headers(extra_std_headers);
            translate_command(&inputs, &config)
        }
        Commands::Check {
            input,
            level,
            dump_model,
        } => check_command(&input, dump_model, &config.with_level(level)),
        Commands::Info => info_command(),
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "info" } else { "warn" };
    // A subscriber may already be installed when embedded in another tool.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(io::stderr)
        .try_init();
}

fn translate_command(inputs: &[PathBuf], config: &Config) -> Result<()> {
    if config.verbose {
        println!(
            "Force: {}\tStrict level: {}\n",
            if config.force { "yes" } else { "no" },
            config.strictness
        );
    }

    for input in inputs {
        match translate_file(input, config)? {
            FileOutcome::Skipped => println!("Skipped( '{}' ).", input.display()),
            FileOutcome::UpToDate => {
                let paths = OutputPaths::for_input(input);
                println!(
                    "Skipping '{}' due to '{}' and '{}' being up to date.",
                    input.display(),
                    paths.header.display(),
                    paths.implementation.display()
                );
            }
            FileOutcome::Translated(paths) => {
                println!("Done( '{}' ).", paths.implementation.display())
            }
        }
    }

    Ok(())
}

/// Translates one file next to itself: `.h`, `.cpp` and, when there are
/// dependencies, `.dep`.
pub fn translate_file(input: &Path, config: &Config) -> Result<FileOutcome> {
    if !is_module_source(input) {
        return Ok(FileOutcome::Skipped);
    }

    let paths = OutputPaths::for_input(input);
    if !config.force && is_up_to_date(input, &paths) {
        return Ok(FileOutcome::UpToDate);
    }

    let source = fs::read_to_string(input)
        .map_err(|e| anyhow!("Failed to read input file {}: {}", input.display(), e))?;

    let header = create_output(&paths.header)?;
    let implementation = create_output(&paths.implementation)?;

    println!("Processing( '{}' )...", input.display());
    let module = match run_translator(input, &source, header, implementation, config) {
        Ok(module) => module,
        Err(error) => {
            // Partial outputs would look up to date on the next run.
            let _ = fs::remove_file(&paths.header);
            let _ = fs::remove_file(&paths.implementation);
            return Err(error);
        }
    };

    if module.dependencies().is_empty() {
        // A manifest left by an earlier run would contradict the new outputs.
        if paths.dependencies.exists() {
            fs::remove_file(&paths.dependencies).map_err(|e| {
                anyhow!("Failed to remove {}: {}", paths.dependencies.display(), e)
            })?;
        }
    } else {
        let manifest: String = module
            .dependencies()
            .iter()
            .map(|dependency| format!("{dependency}\n"))
            .collect();
        fs::write(&paths.dependencies, manifest).map_err(|e| {
            anyhow!("Failed to write {}: {}", paths.dependencies.display(), e)
        })?;
    }

    info!(
        module = module.name(),
        dependencies = module.dependencies().len(),
        "module translated"
    );
    Ok(FileOutcome::Translated(paths))
}

fn check_command(input: &Path, dump_model: bool, config: &Config) -> Result<()> {
    if config.verbose {
        println!("Checking module file: {} ({})", input.display(), config.strictness);
    }

    let source = fs::read_to_string(input)
        .map_err(|e| anyhow!("Failed to read input file {}: {}", input.display(), e))?;

    let module = run_translator(input, &source, io::sink(), io::sink(), config)?;
    println!("Module '{}' passed all checks", module.name());

    if dump_model {
        println!("{}", serde_json::to_string_pretty(&module)?);
    }

    Ok(())
}

fn info_command() -> Result<()> {
    println!("{} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    println!("{}", env!("CARGO_PKG_DESCRIPTION"));
    println!("Accepted sources: .{MODULE_EXT}, .{STD_MODULE_EXT}");
    println!("Outputs: .{HEADER_EXT}, .{IMPLEMENTATION_EXT}, .{DEPENDENCIES_EXT}");
    Ok(())
}

fn create_output(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path)
        .map_err(|e| anyhow!("Failed to create output file {}: {}", path.display(), e))?;
    Ok(BufWriter::new(file))
}

/// Both outputs exist and are at least as new as the input.
fn is_up_to_date(input: &Path, paths: &OutputPaths) -> bool {
    let modified = |path: &Path| fs::metadata(path).and_then(|meta| meta.modified()).ok();

    match (
        modified(input),
        modified(&paths.header),
        modified(&paths.implementation),
    ) {
        (Some(input), Some(header), Some(implementation)) => {
            header >= input && implementation >= input
        }
        _ => false,
    }
}

fn run_translator<H: Write, I: Write>(
    input: &Path,
    source: &str,
    header: H,
    implementation: I,
    config: &Config,
) -> Result<Module> {
    let file_name = input.to_string_lossy();
    let mut translator = Translator::new(
        source,
        &file_name,
        header,
        implementation,
        config.strictness,
    )?
    .with_standard_headers(config.standard_headers());

    if let Err(error) = translator.process() {
        return Err(anyhow!(error_report(&file_name, &translator, &error)));
    }

    let (_, _, module) = translator.into_outputs();
    Ok(module)
}

/// `file: Kind error at line,col`, the offending line, then `file:line: 'message'`.
fn error_report<H: Write, I: Write>(
    file_name: &str,
    translator: &Translator<H, I>,
    error: &Cp3Error,
) -> String {
    let (line, column, source_line) = match error {
        Cp3Error::Syntax {
            line,
            column,
            source_line,
            ..
        } => (*line, *column, source_line.clone()),
        _ => (
            translator.line(),
            translator.column(),
            translator.current_line(),
        ),
    };

    format!(
        "{file_name}: {} at {line},{column}\n\t{}\n\t{file_name}:{line}: '{error}'",
        error.label(),
        source_line.trim()
    )
}
