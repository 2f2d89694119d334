//! CLI logic for the Tessel model validator.
//!
//! Loads JSON AST files into a [`ModelManager`], validates the model, and
//! optionally lists every element with its decorators.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use log::info;

use tessel::{Decorated, Decorator, ModelManager, TesselError, ValidationReport};

/// Run the Tessel CLI application, listing to standard output.
///
/// # Errors
///
/// Returns `TesselError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed ASTs and failing decorator factories
/// - Illegal models
pub fn run(args: &Args) -> Result<ValidationReport, TesselError> {
    let stdout = io::stdout();
    run_with_output(args, &mut stdout.lock())
}

/// Run the Tessel CLI application, writing the `--list` output to `out`.
///
/// # Errors
///
/// See [`run`].
pub fn run_with_output(args: &Args, out: &mut impl Write) -> Result<ValidationReport, TesselError> {
    info!(inputs = args.inputs.len(); "Processing model");

    let app_config = config::load_config(args.config.as_ref())?;
    let mut manager = ModelManager::new(app_config);

    for input in &args.inputs {
        let path = Path::new(input);
        let ast_json = fs::read_to_string(path)?;
        let name = path
            .file_name()
            .map_or_else(|| input.clone(), |name| name.to_string_lossy().into_owned());
        manager.add_model_file(name, &ast_json)?;
    }

    let report = manager.validate()?;

    if args.list {
        write_listing(out, &manager)?;
    }

    info!(
        files = report.files(),
        decorators = report.decorators();
        "Model validated successfully"
    );

    Ok(report)
}

/// Write every element of every model file with its decorators, indented
/// by nesting level.
pub fn write_listing(out: &mut impl Write, manager: &ModelManager) -> io::Result<()> {
    for file in manager.files() {
        writeln!(out, "namespace {} ({})", file.namespace(), file.name())?;
        write_decorators(out, file.decorators(), 1)?;

        for declaration in file.declarations() {
            write!(out, "  {} {}", declaration.kind().as_str(), declaration.name())?;
            if let Some(super_type) = declaration.super_type() {
                write!(out, " extends {super_type}")?;
            }
            writeln!(out)?;
            write_decorators(out, declaration.decorators(), 2)?;

            for property in declaration.properties() {
                write!(out, "    {}", property.name())?;
                if let Some(type_name) = property.type_name() {
                    write!(out, ": {type_name}")?;
                    if property.is_array() {
                        write!(out, "[]")?;
                    }
                }
                if property.is_optional() {
                    write!(out, " optional")?;
                }
                writeln!(out)?;
                write_decorators(out, property.decorators(), 3)?;
            }
        }
    }
    Ok(())
}

fn write_decorators(
    out: &mut impl Write,
    decorators: &[Box<dyn Decorator>],
    depth: usize,
) -> io::Result<()> {
    for decorator in decorators {
        writeln!(out, "{:indent$}{}", "", format_decorator(&**decorator), indent = depth * 2)?;
    }
    Ok(())
}

fn format_decorator(decorator: &dyn Decorator) -> String {
    let arguments = decorator.arguments();
    if arguments.is_empty() {
        return format!("@{}", decorator.name());
    }

    let arguments: Vec<String> = arguments.iter().map(ToString::to_string).collect();
    format!("@{}({})", decorator.name(), arguments.join(", "))
}
