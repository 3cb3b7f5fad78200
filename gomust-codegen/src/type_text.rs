//! Type-expression reconstruction
//!
//! Turns a parsed type expression back into Go source text. The variant
//! set is closed; anything the parser carried as `Unsupported` fails here
//! with `UnknownFieldType` rather than guessing at a rendering.

use gomust_common::{GenError, SourceLocation};
use gomust_frontend::TypeExpr;

/// Type-level operators valid in a binary type expression. Go constraint
/// unions only ever use `|`.
fn is_type_operator(op: &str) -> bool {
    op == "|"
}

/// Reconstruct the Go source text of a type expression. `at` locates the
/// enclosing field for errors on nodes that carry no span of their own.
pub fn type_text(ty: &TypeExpr, at: &SourceLocation) -> Result<String, GenError> {
    match ty {
        TypeExpr::Pointer(elem) => Ok(format!("*{}", type_text(elem, at)?)),
        TypeExpr::Ident(name) => Ok(name.clone()),
        TypeExpr::Ellipsis(elem) => Ok(format!("...{}", type_text(elem, at)?)),
        TypeExpr::Binary { op, left, right } => {
            if !is_type_operator(op) {
                return Err(GenError::UnknownFieldType {
                    location: at.clone(),
                });
            }
            Ok(format!(
                "{} {} {}",
                type_text(left, at)?,
                op,
                type_text(right, at)?
            ))
        }
        // The operand reconstructs recursively, same as every other rule
        TypeExpr::Unary { op, operand } => Ok(format!("{}{}", op, type_text(operand, at)?)),
        TypeExpr::Index { base, index } => Ok(format!(
            "{}[{}]",
            type_text(base, at)?,
            type_text(index, at)?
        )),
        TypeExpr::IndexList { base, indices } => {
            let args = indices
                .iter()
                .map(|index| type_text(index, at))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(format!("{}[{}]", type_text(base, at)?, args.join(", ")))
        }
        TypeExpr::Unsupported { span, .. } => Err(GenError::UnknownFieldType {
            location: span.start.clone(),
        }),
    }
}
