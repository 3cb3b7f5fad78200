//! Signature extraction
//!
//! Four pure functions, one per signature part, each producing the text a
//! wrapper needs twice: once as written in its own declaration, once as
//! written when forwarding to the original. Nothing here mutates the
//! declaration or touches any shared state.

use crate::type_text::type_text;
use gomust_common::{GenError, SourceLocation};
use gomust_frontend::Field;

/// Placeholder name given to unnamed or discarded receivers so the
/// generated body can still qualify the forwarded call
const RECEIVER_PLACEHOLDER: &str = "t";

/// A signature fragment rendered two ways
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pieces {
    pub decl: String,
    pub usage: String,
}

/// Reconstructed result positions: parallel type and variable-name lists.
/// The last variable is always `err`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultPieces {
    pub types: Vec<String>,
    pub vars: Vec<String>,
}

/// Extract receiver declaration text `(name Type)` and usage text `name.`.
/// Absent receivers yield empty text on both sides.
pub fn receiver_pieces(recv: Option<&Field>) -> Result<Pieces, GenError> {
    let Some(field) = recv else {
        return Ok(Pieces::default());
    };

    let name = match field.names.first().map(String::as_str) {
        Some("_") | None => RECEIVER_PLACEHOLDER,
        Some(name) => name,
    };
    let ty = type_text(&field.ty, &field.span.start)?;
    Ok(Pieces {
        decl: format!("({} {})", name, ty),
        usage: format!("{}.", name),
    })
}

/// Extract parameter declaration text (`name Type` pairs, grouped names
/// expanded) and usage text (bare names in declared order, the forwarding
/// argument list). Unnamed parameters get synthesized `argN` names.
pub fn param_pieces(params: &[Field]) -> Result<Pieces, GenError> {
    let mut decls = Vec::new();
    let mut names = Vec::new();

    for field in params {
        let ty = type_text(&field.ty, &field.span.start)?;
        if field.names.is_empty() {
            let name = format!("arg{}", names.len());
            decls.push(format!("{} {}", name, ty));
            names.push(name);
        } else {
            for name in &field.names {
                decls.push(format!("{} {}", name, ty));
                names.push(name.clone());
            }
        }
    }

    Ok(Pieces {
        decl: decls.join(", "),
        usage: names.join(", "),
    })
}

/// Extract type-parameter declaration text `[T Constraint, ...]` and usage
/// text `[T, ...]`; both empty when the declaration has none
pub fn type_param_pieces(type_params: &[Field]) -> Result<Pieces, GenError> {
    if type_params.is_empty() {
        return Ok(Pieces::default());
    }

    let mut decls = Vec::new();
    let mut names = Vec::new();
    for field in type_params {
        let constraint = type_text(&field.ty, &field.span.start)?;
        for name in &field.names {
            decls.push(format!("{} {}", name, constraint));
            names.push(name.clone());
        }
    }

    Ok(Pieces {
        decl: format!("[{}]", decls.join(", ")),
        usage: format!("[{}]", names.join(", ")),
    })
}

/// Extract result positions. Every position gets a fresh variable
/// (`var0`, `var1`, ...) except the last, which is renamed `err` and must
/// reconstruct to the literal error type.
pub fn result_pieces(
    function: &str,
    results: &[Field],
    at: &SourceLocation,
) -> Result<ResultPieces, GenError> {
    let mut types = Vec::new();
    for field in results {
        let ty = type_text(&field.ty, &field.span.start)?;
        let positions = field.names.len().max(1);
        for _ in 0..positions {
            types.push(ty.clone());
        }
    }

    if types.is_empty() {
        return Err(GenError::NoReturnValues {
            function: function.to_string(),
            location: at.clone(),
        });
    }
    if types[types.len() - 1] != "error" {
        return Err(GenError::NoErrorReturn {
            function: function.to_string(),
            location: at.clone(),
        });
    }

    let mut vars: Vec<String> = (0..types.len()).map(|i| format!("var{}", i)).collect();
    let last = vars.len() - 1;
    vars[last] = "err".to_string();

    Ok(ResultPieces { types, vars })
}
