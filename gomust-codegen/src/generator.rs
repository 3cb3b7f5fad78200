//! Wrapper synthesis
//!
//! Composes the signature pieces into complete generated functions. The
//! generator owns the single append-only output buffer; wrappers land in
//! it in scan order and the text is immutable once written.

use crate::signature::{param_pieces, receiver_pieces, result_pieces, type_param_pieces};
use gomust_common::GenError;
use gomust_frontend::FuncDecl;

/// Accumulates the generated source for one run
pub struct Generator {
    buf: String,
}

impl Generator {
    pub fn new() -> Self {
        Self {
            buf: String::with_capacity(1024),
        }
    }

    /// Emit the generated-file banner and package clause
    pub fn header(&mut self, package_name: &str) {
        self.buf.push_str("// Code generated - DO NOT EDIT.\n");
        self.buf.push_str(
            "// This file is auto generated by gomust and any manual changes will be lost.\n\n",
        );
        self.buf.push_str(&format!("package {}\n\n", package_name));
    }

    /// Emit one wrapper function for `decl` under the resolved `target`
    /// name: the signature minus the trailing error result, a forwarding
    /// call, a panic on non-nil error, and the remaining returns.
    pub fn must_fn(&mut self, target: &str, decl: &FuncDecl) -> Result<(), GenError> {
        let type_params = type_param_pieces(&decl.type_params)?;
        let recv = receiver_pieces(decl.recv.as_ref())?;
        let params = param_pieces(&decl.params)?;
        let results = result_pieces(&decl.name, &decl.results, &decl.span.start)?;

        self.buf.push_str(&format!(
            "// {} has the behavior of {}, except it panics any error\n",
            target, decl.name
        ));

        let wrapper_results = &results.types[..results.types.len() - 1];
        let result_decl = if wrapper_results.is_empty() {
            String::new()
        } else {
            format!(" ({})", wrapper_results.join(", "))
        };
        if recv.decl.is_empty() {
            self.buf.push_str(&format!(
                "func {}{}({}){} {{\n",
                target, type_params.decl, params.decl, result_decl
            ));
        } else {
            self.buf.push_str(&format!(
                "func {} {}{}({}){} {{\n",
                recv.decl, target, type_params.decl, params.decl, result_decl
            ));
        }

        self.buf.push_str(&format!(
            "\t{} := {}{}{}({})\n",
            results.vars.join(", "),
            recv.usage,
            decl.name,
            type_params.usage,
            params.usage
        ));
        self.buf.push_str("\tif err != nil {\n\t\tpanic(err)\n\t}\n");

        let returned = &results.vars[..results.vars.len() - 1];
        if !returned.is_empty() {
            self.buf
                .push_str(&format!("\treturn {}\n", returned.join(", ")));
        }
        self.buf.push_str("}\n\n");

        Ok(())
    }

    /// Finish the run and hand back the buffer
    pub fn into_source(self) -> String {
        self.buf
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}
