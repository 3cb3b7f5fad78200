//! Go must-wrapper generator - Signature Analysis and Synthesis
//!
//! This crate is the generation core. It consumes a loaded package from
//! the frontend and produces the generated source text:
//!
//! - Type reconstruction (closed-set variant dispatch)
//! - Signature extraction (declaration/usage text pairs)
//! - Tag scanning (marker discovery and target naming)
//! - Wrapper synthesis (the output buffer)

pub mod generator;
pub mod scan;
pub mod signature;
pub mod type_text;


pub use generator::Generator;
pub use scan::{must_name, scan_package, tag_match, TagMatch, DEFAULT_MARKER};
pub use signature::{
    param_pieces, receiver_pieces, result_pieces, type_param_pieces, Pieces, ResultPieces,
};
pub use type_text::type_text;

use gomust_common::GenError;
use gomust_frontend::Package;

/// Generate the complete wrapper file for one loaded package: header plus
/// one wrapper per tag match, in file-then-declaration order
pub fn generate(pkg: &Package, marker: &str) -> Result<String, GenError> {
    let mut generator = Generator::new();
    generator.header(&pkg.name);
    scan_package(pkg, marker, |target, decl| generator.must_fn(target, decl))?;
    Ok(generator.into_source())
}
