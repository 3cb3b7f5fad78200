//! Tag scanning
//!
//! Finds the functions that opted into wrapper generation. The only
//! comment ever considered for a declaration is the first one lexically
//! inside its body, and it only qualifies when it sits before the first
//! executable token. Non-matching declarations are silently skipped;
//! errors raised by the sink abort the whole scan.

use gomust_common::GenError;
use gomust_frontend::{CommentKind, FuncDecl, Package};
use serde::{Deserialize, Serialize};

/// Default marker comment that opts a function into generation
pub const DEFAULT_MARKER: &str = "@gen_must";

/// The outcome of scanning one declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagMatch {
    pub file: String,
    pub function: String,
    pub target: String,
}

/// Derive the default wrapper name from the original function name,
/// following its exported/unexported casing: `DoThing` becomes
/// `MustDoThing`, `doThing` becomes `mustDoThing`.
pub fn must_name(name: &str) -> String {
    let mut chars = name.chars();
    let first = match chars.next() {
        Some(ch) => ch,
        None => return String::new(),
    };
    if first.to_uppercase().to_string() == first.to_string() {
        format!("Must{}", name)
    } else {
        format!("must{}{}", first.to_uppercase(), chars.as_str())
    }
}

/// Check one declaration for the marker, returning the resolved target
/// name on a hit.
///
/// The comment text after the marker decides the name: a `:` prefix gives
/// an explicit name verbatim, an empty remainder derives one from the
/// original, and anything else (`@gen_mustard`) is not a hit at all.
pub fn tag_match(decl: &FuncDecl, marker: &str) -> Option<String> {
    let body = decl.body.as_ref()?;
    let comment = body.comments.first()?;

    if let Some(first_stmt) = &body.first_stmt {
        if !comment.span.start.is_before(first_stmt) {
            return None;
        }
    }
    if comment.kind != CommentKind::Line {
        return None;
    }

    let rest = comment.text.strip_prefix(marker)?;
    if let Some(explicit) = rest.strip_prefix(':') {
        return Some(explicit.trim().to_string());
    }
    if rest.trim().is_empty() {
        Some(must_name(&decl.name))
    } else {
        None
    }
}

/// Walk every function declaration of every file in order, invoking the
/// sink for each tag match. The first sink error aborts the walk.
pub fn scan_package<F>(pkg: &Package, marker: &str, mut sink: F) -> Result<(), GenError>
where
    F: FnMut(&str, &FuncDecl) -> Result<(), GenError>,
{
    for file in &pkg.files {
        for decl in &file.funcs {
            if let Some(target) = tag_match(decl, marker) {
                log::debug!("{}: {} -> {}", file.filename, decl.name, target);
                sink(&target, decl)?;
            }
        }
    }
    Ok(())
}
