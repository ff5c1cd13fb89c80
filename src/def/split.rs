//! Splitting a function-definition tree into its named components.
//!
//! This is a pure pattern match over tree shapes. The accepted surface
//! forms are the long form (`function f(x) ... end`), the short form
//! (`f(x) = ...`), the arrow form (`x -> ...`) and a named binding of an
//! anonymous definition (`f = x -> ...`). Anonymous parameter lists may
//! be tuple-shaped (`(x, y)`), block-shaped when a semicolon separates
//! positionals from keywords (`(x; k = 1)` without a trailing comma), or
//! a single bare parameter on arrow forms.

use crate::error::SplitError;
use crate::expr::Expr;

use super::parts::{DefKind, FunctionParts};

/// Split a function definition into its components.
///
/// Rejects trees whose top-level head is not a definition form, and
/// definition trees with malformed signatures. See [`try_split_def`] for
/// the non-throwing variant.
pub fn split_def(ex: &Expr) -> Result<FunctionParts, SplitError> {
    let head = match ex {
        Expr::Function(_) => DefKind::Function,
        Expr::Assign(_, _) => DefKind::Assign,
        Expr::Arrow(_, _) => DefKind::Arrow,
        other => return Err(SplitError::NotADefinition(other.head_name().to_string())),
    };

    if let Expr::Function(children) = ex {
        // Forward declaration: `function f end`
        if let [name @ (Expr::Symbol(_) | Expr::Path(_, _))] = children.as_slice() {
            return Ok(FunctionParts {
                head,
                name: Some(name.clone()),
                ..FunctionParts::default()
            });
        }
        if children.len() != 2 {
            return Err(SplitError::WrongArgumentCount {
                expected: 2,
                found: children.len(),
            });
        }
    }

    // Named binding of an anonymous definition: `f = x -> x` or
    // `f = function (x) x end`. The outer head and name win over
    // anything the inner definition carries.
    if let Expr::Assign(lhs, rhs) = ex {
        if lhs.as_symbol().is_some()
            && matches!(rhs.as_ref(), Expr::Function(_) | Expr::Arrow(_, _))
        {
            let mut parts = split_def(rhs)?;
            parts.anon_head = Some(parts.head);
            parts.head = DefKind::Assign;
            parts.name = Some(lhs.as_ref().clone());
            return Ok(parts);
        }
    }

    let (sig, body) = match ex {
        Expr::Function(children) => (&children[0], &children[1]),
        Expr::Assign(l, r) | Expr::Arrow(l, r) => (l.as_ref(), r.as_ref()),
        _ => unreachable!("head already validated"),
    };

    let mut parts = FunctionParts {
        head,
        body: Some(body.clone()),
        ..FunctionParts::default()
    };

    // Strip nested `where` wrappers outside-in; the flattened constraint
    // list keeps the outermost clause's constraints first.
    let mut whereparams = Vec::new();
    let mut work = sig;
    while let Expr::Where { body, constraints } = work {
        whereparams.extend(constraints.iter().cloned());
        work = body.as_ref();
    }
    if !whereparams.is_empty() {
        parts.whereparams = Some(whereparams);
    }

    // Return-type annotation. Arrow forms cannot carry one: `x::T -> b`
    // ascribes the parameter, not the result.
    if head != DefKind::Arrow {
        if let Expr::Ascribe {
            value: Some(value),
            ty,
        } = work
        {
            parts.rtype = Some(ty.as_ref().clone());
            work = value.as_ref();
        }
    }

    let anonymous = head == DefKind::Arrow
        || (head == DefKind::Function && !matches!(work, Expr::Call(_)));

    if anonymous {
        split_anonymous_params(work, head, &mut parts)?;
    } else {
        split_call_signature(work, &mut parts)?;
    }

    Ok(parts)
}

/// Non-throwing splitting: `None` exactly when [`split_def`] would error.
///
/// Lets batch-scanning callers probe "is this a function definition?"
/// without error-driven control flow.
pub fn try_split_def(ex: &Expr) -> Option<FunctionParts> {
    split_def(ex).ok()
}

/// Extract name, type parameters and the parameter list from a call-shaped
/// signature `f(args...)`, `Foo{T}(args...)` or `Base.f(args...)`.
fn split_call_signature(work: &Expr, parts: &mut FunctionParts) -> Result<(), SplitError> {
    let Expr::Call(children) = work else {
        return Err(SplitError::InvalidParameters(format!(
            "expected a call signature, found `{}`",
            work.head_name()
        )));
    };
    let Some((callee, rest)) = children.split_first() else {
        return Err(SplitError::InvalidParameters(
            "call signature has no callee".to_string(),
        ));
    };

    // Constructor-style generics attach type parameters to the name.
    match callee {
        Expr::Curly(curly) => {
            let Some((name, type_params)) = curly.split_first() else {
                return Err(SplitError::InvalidParameters(
                    "generic instantiation has no name".to_string(),
                ));
            };
            parts.name = Some(name.clone());
            parts.params = Some(type_params.to_vec());
        }
        other => parts.name = Some(other.clone()),
    }

    let (kwargs, args) = take_keyword_marker(rest);
    parts.kwargs = kwargs;
    if !args.is_empty() {
        parts.args = Some(args);
    }
    Ok(())
}

/// Extract the parameter list of an anonymous definition.
fn split_anonymous_params(
    work: &Expr,
    head: DefKind,
    parts: &mut FunctionParts,
) -> Result<(), SplitError> {
    match work {
        // `(x, y) -> ...`, `function (x; k = 1) ... end`
        Expr::Tuple(children) => {
            let (kwargs, args) = take_keyword_marker(children);
            parts.kwargs = kwargs;
            if !args.is_empty() {
                parts.args = Some(args);
            }
            Ok(())
        }
        // `(x; k = 1)` without a trailing comma parses as a block with
        // at most two structural groups: one positional, one keyword.
        Expr::Block(children) => {
            let groups: Vec<&Expr> = children.iter().filter(|c| !c.is_line()).collect();
            match groups.as_slice() {
                [positional] => {
                    parts.args = Some(vec![(*positional).clone()]);
                    // Semicolon present but no keyword item: record an
                    // explicitly empty keyword block.
                    parts.kwargs = Some(Vec::new());
                    Ok(())
                }
                [positional, keyword] => {
                    parts.args = Some(vec![(*positional).clone()]);
                    parts.kwargs = Some(vec![normalize_keyword(keyword)]);
                    Ok(())
                }
                groups => Err(SplitError::InvalidParameterBlock(groups.len())),
            }
        }
        // `x -> ...`, `x::Int -> ...`: the whole tree is the parameter.
        _ if head == DefKind::Arrow => {
            parts.args = Some(vec![work.clone()]);
            Ok(())
        }
        other => Err(SplitError::InvalidParameters(format!(
            "unrecognized anonymous parameter list `{}`",
            other.head_name()
        ))),
    }
}

/// Split a parameter list into its keyword block (if the list starts
/// with a `Parameters` marker) and the positional remainder.
fn take_keyword_marker(children: &[Expr]) -> (Option<Vec<Expr>>, Vec<Expr>) {
    match children.split_first() {
        Some((Expr::Parameters(kws), rest)) => (Some(kws.clone()), rest.to_vec()),
        _ => (None, children.to_vec()),
    }
}

/// Inside a block-shaped parameter list, a defaulted keyword parses as a
/// plain assignment; normalize it into the keyword-with-default shape
/// the combiner and downstream mutators expect.
fn normalize_keyword(item: &Expr) -> Expr {
    match item {
        Expr::Assign(name, default) => Expr::Kw(name.clone(), default.clone()),
        other => other.clone(),
    }
}
