//! gomust driver
//!
//! Command-line entry point: loads one Go package, scans it for tagged
//! functions, and writes the generated must-wrapper file to stdout or next
//! to the package. Any error at any stage prints to stderr and exits
//! non-zero; there is no partial output.

mod format;
mod loader;

use clap::Parser;
use gomust_codegen::{scan_package, tag_match, Generator, TagMatch, DEFAULT_MARKER};
use gomust_common::GenError;
use gomust_frontend::Package;
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gomust")]
#[command(about = "Generates must-variants of error-returning Go functions")]
#[command(version = "0.1.0")]
struct Cli {
    /// Go source files, or a single package directory
    inputs: Vec<PathBuf>,

    /// Output file, resolved next to the input package. Default is stdout
    #[arg(short, long, default_value = "-")]
    out: String,

    /// Marker comment that opts a function into generation
    #[arg(long, default_value = DEFAULT_MARKER)]
    marker: String,

    /// Only generate wrappers for these original function names
    #[arg(long, value_delimiter = ',')]
    only: Vec<String>,

    /// Print tag matches as JSON instead of generating
    #[arg(long)]
    dump_tags: bool,

    /// Skip the gofmt canonicalization pass
    #[arg(long)]
    no_format: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), GenError> {
    let pkg = loader::load_package(&cli.inputs)?;

    if cli.dump_tags {
        return dump_tags(&pkg, &cli.marker);
    }

    let mut generator = Generator::new();
    generator.header(&pkg.name);

    let mut matched: BTreeSet<String> = BTreeSet::new();
    scan_package(&pkg, &cli.marker, |target, decl| {
        matched.insert(decl.name.clone());
        if cli.only.is_empty() || cli.only.iter().any(|name| name == &decl.name) {
            generator.must_fn(target, decl)
        } else {
            Ok(())
        }
    })?;
    for name in &cli.only {
        if !matched.contains(name) {
            return Err(GenError::FunctionNotFound {
                function: name.clone(),
            });
        }
    }

    let mut output = generator.into_source();
    if !cli.no_format {
        output = format::gofmt(&output)?;
    }

    match resolve_out(&cli.inputs, &cli.out) {
        None => print!("{}", output),
        Some(path) => {
            fs::write(&path, output)?;
            log::info!("wrote {}", path.display());
        }
    }
    Ok(())
}

/// List every tag match as JSON, without generating anything
fn dump_tags(pkg: &Package, marker: &str) -> Result<(), GenError> {
    let mut matches = Vec::new();
    for file in &pkg.files {
        for decl in &file.funcs {
            if let Some(target) = tag_match(decl, marker) {
                matches.push(TagMatch {
                    file: file.filename.clone(),
                    function: decl.name.clone(),
                    target,
                });
            }
        }
    }
    let rendered = serde_json::to_string_pretty(&matches).map_err(|err| GenError::Io {
        message: err.to_string(),
    })?;
    println!("{}", rendered);
    Ok(())
}

/// Resolve the output destination: stdout for "-", otherwise a file named
/// by `out` next to the input package (the directory argument itself, or
/// the directory of the first input file)
fn resolve_out(inputs: &[PathBuf], out: &str) -> Option<PathBuf> {
    if out.is_empty() || out == "-" {
        return None;
    }
    let first = inputs.first()?;
    let dir = if inputs.len() == 1 && first.is_dir() {
        first.clone()
    } else {
        first.parent().map(PathBuf::from).unwrap_or_default()
    };
    Some(dir.join(out))
}
