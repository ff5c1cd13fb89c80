//! Rebuilding a function-definition tree from its components.
//!
//! The inverse of splitting, total over well-formed records. Two
//! normalizations are deliberate: constraints collected from nested
//! `where` levels are re-wrapped as a single combined `where`, and an
//! explicitly empty keyword block is rebuilt in tuple shape rather than
//! the block shape it may have been parsed from.

use crate::error::CombineError;
use crate::expr::Expr;

use super::parts::{DefKind, FunctionParts};

/// Reassemble a definition tree from a component record.
///
/// Errors only on records mutated into an invalid shape: structural
/// slots without a body, bodyless records without a name, or bodyless
/// `=`/`->` records (only `function f end` can be bodyless).
pub fn combine_def(parts: &FunctionParts) -> Result<Expr, CombineError> {
    let head = parts.head;

    // Displayed name: constructor-style type parameters re-attach to the
    // name by generic instantiation.
    let name = parts.name.clone().map(|name| match &parts.params {
        Some(type_params) => {
            let mut children = Vec::with_capacity(type_params.len() + 1);
            children.push(name);
            children.extend(type_params.iter().cloned());
            Expr::Curly(children)
        }
        None => name,
    });

    // Named binding of an anonymous definition: rebuild the inner
    // definition under its own head and bind it to the name.
    if let Some(anon_head) = parts.anon_head {
        let Some(name) = name else {
            return Err(CombineError::MissingName { head });
        };
        let mut inner = parts.clone();
        inner.head = anon_head;
        inner.anon_head = None;
        inner.name = None;
        let inner_tree = combine_def(&inner)?;
        return Ok(build_def(head, name, inner_tree));
    }

    if parts.body.is_none() {
        if let Some(slot) = parts.structural_slot() {
            return Err(CombineError::StructureWithoutBody { slot });
        }
    }

    // Parameter-list children: the keyword block precedes positionals,
    // matching the parsed `Parameters`-marker-first layout.
    let mut sig_children = Vec::new();
    if let Some(kwargs) = &parts.kwargs {
        sig_children.push(Expr::Parameters(kwargs.clone()));
    }
    if let Some(args) = &parts.args {
        sig_children.extend(args.iter().cloned());
    }

    let mut sig = match &name {
        Some(name) => {
            let mut children = Vec::with_capacity(sig_children.len() + 1);
            children.push(name.clone());
            children.extend(sig_children);
            Expr::Call(children)
        }
        None => {
            // A one-parameter arrow without keywords keeps its bare
            // parameter rather than a degenerate single-item tuple.
            if head == DefKind::Arrow && parts.kwargs.is_none() && sig_children.len() == 1 {
                match sig_children.pop() {
                    Some(single) => single,
                    None => unreachable!("length checked above"),
                }
            } else {
                Expr::Tuple(sig_children)
            }
        }
    };

    if let Some(rtype) = &parts.rtype {
        sig = Expr::Ascribe {
            value: Some(Box::new(sig)),
            ty: Box::new(rtype.clone()),
        };
    }

    // All collected constraints go into one combined `where` level.
    if let Some(whereparams) = &parts.whereparams {
        if !whereparams.is_empty() {
            sig = Expr::Where {
                body: Box::new(sig),
                constraints: whereparams.clone(),
            };
        }
    }

    match &parts.body {
        Some(body) => Ok(build_def(head, sig, body.clone())),
        None => {
            let Some(name) = name else {
                return Err(CombineError::MissingName { head });
            };
            if head != DefKind::Function {
                return Err(CombineError::MissingBody { head });
            }
            Ok(Expr::Function(vec![name]))
        }
    }
}

fn build_def(head: DefKind, sig: Expr, body: Expr) -> Expr {
    match head {
        DefKind::Function => Expr::Function(vec![sig, body]),
        DefKind::Assign => Expr::Assign(Box::new(sig), Box::new(body)),
        DefKind::Arrow => Expr::Arrow(Box::new(sig), Box::new(body)),
    }
}
