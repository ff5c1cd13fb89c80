//! Argument-forwarding fragments.
//!
//! Given the `args` slot of a component record, build a tuple expression
//! that re-invokes with the same argument names: `(x, y...)` for
//! `args = [x, y::Vararg]`. Used by wrapper-generating macros that
//! forward a captured call to an inner definition.

use crate::expr::Expr;

/// The identifier a parameter binds, looking through ascriptions,
/// defaults and splats. `None` for anonymous `::T` parameters.
pub fn arg_name(arg: &Expr) -> Option<&str> {
    match arg {
        Expr::Symbol(name) => Some(name),
        Expr::Ascribe {
            value: Some(value), ..
        } => arg_name(value),
        Expr::Ascribe { value: None, .. } => None,
        Expr::Kw(name, _) => arg_name(name),
        Expr::Splat(inner) => arg_name(inner),
        _ => None,
    }
}

/// Build a tuple that forwards the given parameters by name.
///
/// Variadic parameters (splatted, or ascribed with a `Vararg` type) are
/// re-splatted so the forwarded call expands them. Parameters without a
/// usable name forward as the `_` placeholder.
pub fn args_tuple(args: &[Expr]) -> Expr {
    let forwarded = args
        .iter()
        .map(|arg| {
            let name = Expr::symbol(arg_name(arg).unwrap_or("_"));
            if is_variadic(arg) {
                Expr::Splat(Box::new(name))
            } else {
                name
            }
        })
        .collect();
    Expr::Tuple(forwarded)
}

/// Whether a parameter accepts a variable-length argument sequence.
fn is_variadic(arg: &Expr) -> bool {
    match arg {
        Expr::Splat(_) => true,
        Expr::Ascribe { ty, .. } => is_vararg_type(ty),
        Expr::Kw(name, _) => is_variadic(name),
        _ => false,
    }
}

/// Whether a type fragment names `Vararg`, bare or instantiated.
fn is_vararg_type(ty: &Expr) -> bool {
    match ty {
        Expr::Symbol(name) => name == "Vararg",
        Expr::Curly(children) => children.first().is_some_and(is_vararg_type),
        Expr::Where { body, .. } => is_vararg_type(body),
        _ => false,
    }
}
