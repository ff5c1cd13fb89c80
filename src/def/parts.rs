//! The component record produced by splitting a function definition.

use serde::{Deserialize, Serialize};

use crate::expr::Expr;

/// The three surface forms a function definition can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DefKind {
    /// Long form: `function f(x) ... end`
    #[default]
    Function,
    /// Short form: `f(x) = ...`
    Assign,
    /// Arrow form: `x -> ...`
    Arrow,
}

impl std::fmt::Display for DefKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DefKind::Function => write!(f, "function"),
            DefKind::Assign => write!(f, "="),
            DefKind::Arrow => write!(f, "->"),
        }
    }
}

/// The named components of a function definition.
///
/// Produced by [`split_def`](crate::def::split_def) and
/// [`signature_parts`](crate::signature::signature_parts), consumed by
/// [`combine_def`](crate::def::combine_def). Every slot except `head` is
/// optional; an absent slot means the definition had no such component.
/// Callers may freely edit slots between splitting and combining.
///
/// Invariant: a record without `body` is a forward declaration and must
/// not carry `args`, `kwargs`, `rtype` or `whereparams`. `combine_def`
/// rejects records violating this.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FunctionParts {
    /// Which definition form the tree used (or should use when combined).
    pub head: DefKind,
    /// The function name, possibly module-qualified. Absent for
    /// anonymous definitions.
    pub name: Option<Expr>,
    /// The inner definition form when a name is bound to an anonymous
    /// definition by assignment (`f = x -> x`).
    pub anon_head: Option<DefKind>,
    /// Type parameters attached to the name by generic instantiation,
    /// as in constructor definitions `Foo{T}(x) = ...`.
    pub params: Option<Vec<Expr>>,
    /// Positional parameters, in declaration order.
    pub args: Option<Vec<Expr>>,
    /// Keyword parameters, in declaration order. `Some(vec![])` records
    /// an explicitly empty keyword block (`f(x;) = ...`), which is
    /// distinct from having no semicolon at all.
    pub kwargs: Option<Vec<Expr>>,
    /// Explicit return-type annotation. Never present on arrow forms.
    pub rtype: Option<Expr>,
    /// Type-variable constraints, flattened across nested `where`
    /// clauses, outermost clause first.
    pub whereparams: Option<Vec<Expr>>,
    /// The function body.
    pub body: Option<Expr>,
}

impl FunctionParts {
    /// The first structural slot present on a bodyless record, if any.
    /// Used by the combiner's invariant check.
    pub(crate) fn structural_slot(&self) -> Option<&'static str> {
        if self.args.is_some() {
            Some("args")
        } else if self.kwargs.is_some() {
            Some("kwargs")
        } else if self.rtype.is_some() {
            Some("rtype")
        } else if self.whereparams.is_some() {
            Some("whereparams")
        } else {
            None
        }
    }
}
