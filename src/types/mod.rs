//! Resolved type descriptors.
//!
//! The signature extractor consumes types that the reflection subsystem
//! has already resolved. `TypeDescriptor` is the closed variant set it
//! operates over: nominal generic types, tuple types, unions, bounded
//! type variables, the deferred-parameter (`where`) wrapper, variadic
//! wrappers and literal constants in type-parameter position.
//!
//! # Sub-modules
//!
//! - `params`: ordered type-parameter extraction
//! - `render`: conversion back into syntax-tree fragments, with an
//!   opt-in hygiene mode

mod params;
mod render;

pub use params::type_parameters;
pub use render::{bound_expr, render_type, render_type_hygienic, VarRenamer};

use serde::{Deserialize, Serialize};

use crate::expr::Literal;

/// The visibility-qualified name of a nominal type.
///
/// `exported` answers "is this name visible unqualified from a neutral
/// reference scope?" — exported names render bare, the rest render as a
/// fully module-qualified path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeName {
    /// Owning module path, outermost first (e.g. `["Base", "Iterators"]`).
    pub modules: Vec<String>,
    /// The type's own name.
    pub name: String,
    /// Whether the name resolves without qualification.
    pub exported: bool,
}

impl TypeName {
    /// A name visible unqualified (exported or from the root scope).
    pub fn exported(name: impl Into<String>) -> Self {
        Self {
            modules: Vec::new(),
            name: name.into(),
            exported: true,
        }
    }

    /// A name only reachable through its module path.
    pub fn qualified(modules: Vec<String>, name: impl Into<String>) -> Self {
        Self {
            modules,
            name: name.into(),
            exported: false,
        }
    }
}

impl std::fmt::Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.exported {
            for module in &self.modules {
                write!(f, "{}.", module)?;
            }
        }
        write!(f, "{}", self.name)
    }
}

/// A type variable with optional lower and upper bounds.
///
/// Covers the four declaration shapes `T`, `T<:Upper`, `T>:Lower` and
/// `Lower<:T<:Upper`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeVar {
    /// The variable's name.
    pub name: String,
    /// Optional lower bound: `name >: lower`.
    #[serde(default)]
    pub lower: Option<Box<TypeDescriptor>>,
    /// Optional upper bound: `name <: upper`.
    #[serde(default)]
    pub upper: Option<Box<TypeDescriptor>>,
}

impl TypeVar {
    /// An unbounded type variable.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lower: None,
            upper: None,
        }
    }

    /// A variable with an upper bound: `T <: upper`.
    pub fn with_upper(name: impl Into<String>, upper: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            lower: None,
            upper: Some(Box::new(upper)),
        }
    }

    /// A variable with a lower bound: `T >: lower`.
    pub fn with_lower(name: impl Into<String>, lower: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            lower: Some(Box::new(lower)),
            upper: None,
        }
    }

    /// A variable bounded on both sides: `lower <: T <: upper`.
    pub fn with_bounds(
        name: impl Into<String>,
        lower: TypeDescriptor,
        upper: TypeDescriptor,
    ) -> Self {
        Self {
            name: name.into(),
            lower: Some(Box::new(lower)),
            upper: Some(Box::new(upper)),
        }
    }
}

/// A resolved type, as handed over by the reflection subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeDescriptor {
    /// The universal top type `Any`.
    Any,
    /// A nominal (possibly generic) type: `Int64`, `Vector{T}`, `Foo.Bar`.
    Nominal {
        name: TypeName,
        params: Vec<TypeDescriptor>,
    },
    /// A concrete tuple type with known element types: `Tuple{A, B}`.
    /// `Tuple` with unknown arity is `Nominal` with no parameters.
    Tuple(Vec<TypeDescriptor>),
    /// A union of member types. Construct through
    /// [`TypeDescriptor::union`] to get the canonical member order.
    Union(Vec<TypeDescriptor>),
    /// A reference to a type variable bound by an enclosing
    /// deferred-parameter wrapper.
    Var(TypeVar),
    /// The deferred-parameter wrapper: `body where var`.
    UnionAll {
        var: TypeVar,
        body: Box<TypeDescriptor>,
    },
    /// Variadic wrapper: `Vararg{T}` or `Vararg{T, N}`.
    Vararg {
        element: Box<TypeDescriptor>,
        count: Option<Box<TypeDescriptor>>,
    },
    /// A literal value in type-parameter position, e.g. the `2` in
    /// `Array{Float64, 2}`.
    Constant(Literal),
}

impl TypeDescriptor {
    /// A nominal type with no parameters.
    pub fn nominal(name: impl Into<String>) -> Self {
        TypeDescriptor::Nominal {
            name: TypeName::exported(name),
            params: Vec::new(),
        }
    }

    /// A generic instantiation of an exported nominal type.
    pub fn generic(name: impl Into<String>, params: Vec<TypeDescriptor>) -> Self {
        TypeDescriptor::Nominal {
            name: TypeName::exported(name),
            params,
        }
    }

    /// Build a union in canonical form: nested unions are flattened,
    /// duplicate members dropped, first-encounter order kept. The order
    /// carries no semantic meaning but is deterministic for a given
    /// member multiset, which is all callers may rely on.
    ///
    /// A single distinct member collapses to that member; zero members
    /// produce the empty union (the bottom type).
    pub fn union(members: Vec<TypeDescriptor>) -> Self {
        fn flatten(members: Vec<TypeDescriptor>, out: &mut Vec<TypeDescriptor>) {
            for member in members {
                match member {
                    TypeDescriptor::Union(inner) => flatten(inner, out),
                    other => {
                        if !out.contains(&other) {
                            out.push(other);
                        }
                    }
                }
            }
        }

        let mut canonical = Vec::new();
        flatten(members, &mut canonical);
        if canonical.len() == 1 {
            match canonical.pop() {
                Some(single) => single,
                None => unreachable!("length checked above"),
            }
        } else {
            TypeDescriptor::Union(canonical)
        }
    }

    /// Replace every reference to the type variable `var_name` with
    /// `replacement`. A `UnionAll` binding the same name shadows it
    /// inside its body, which is left untouched; the binder's own bounds
    /// belong to the enclosing scope and are substituted.
    pub fn substitute(&self, var_name: &str, replacement: &TypeDescriptor) -> TypeDescriptor {
        let subst = |ty: &TypeDescriptor| ty.substitute(var_name, replacement);
        let subst_box = |ty: &Box<TypeDescriptor>| Box::new(ty.substitute(var_name, replacement));

        match self {
            TypeDescriptor::Var(var) if var.name == var_name => replacement.clone(),
            TypeDescriptor::Var(var) => TypeDescriptor::Var(TypeVar {
                name: var.name.clone(),
                lower: var.lower.as_ref().map(subst_box),
                upper: var.upper.as_ref().map(subst_box),
            }),
            TypeDescriptor::Nominal { name, params } => TypeDescriptor::Nominal {
                name: name.clone(),
                params: params.iter().map(subst).collect(),
            },
            TypeDescriptor::Tuple(elements) => {
                TypeDescriptor::Tuple(elements.iter().map(subst).collect())
            }
            TypeDescriptor::Union(members) => {
                TypeDescriptor::Union(members.iter().map(subst).collect())
            }
            TypeDescriptor::UnionAll { var, body } => {
                // The binder's bounds are evaluated in the enclosing
                // scope, so substitution reaches them even when the
                // binder shadows `var_name` inside its body.
                let var = TypeVar {
                    name: var.name.clone(),
                    lower: var.lower.as_ref().map(subst_box),
                    upper: var.upper.as_ref().map(subst_box),
                };
                let body = if var.name == var_name {
                    body.clone()
                } else {
                    subst_box(body)
                };
                TypeDescriptor::UnionAll { var, body }
            }
            TypeDescriptor::Vararg { element, count } => TypeDescriptor::Vararg {
                element: subst_box(element),
                count: count.as_ref().map(subst_box),
            },
            TypeDescriptor::Any | TypeDescriptor::Constant(_) => self.clone(),
        }
    }
}

impl std::fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", render_type(self))
    }
}

impl std::fmt::Display for TypeVar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", bound_expr(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_union_flattens_and_deduplicates() {
        let int64 = TypeDescriptor::nominal("Int64");
        let float64 = TypeDescriptor::nominal("Float64");
        let nested = TypeDescriptor::union(vec![
            int64.clone(),
            TypeDescriptor::Union(vec![float64.clone(), int64.clone()]),
        ]);
        assert_eq!(nested, TypeDescriptor::Union(vec![int64, float64]));
    }

    #[test]
    fn test_union_is_deterministic_for_equal_values() {
        let members = || {
            vec![
                TypeDescriptor::nominal("Int64"),
                TypeDescriptor::nominal("String"),
                TypeDescriptor::nominal("Int64"),
            ]
        };
        assert_eq!(
            TypeDescriptor::union(members()),
            TypeDescriptor::union(members())
        );
    }

    #[test]
    fn test_union_of_single_member_collapses() {
        let int64 = TypeDescriptor::nominal("Int64");
        assert_eq!(
            TypeDescriptor::union(vec![int64.clone(), int64.clone()]),
            int64
        );
    }

    #[test]
    fn test_empty_union_is_bottom() {
        assert_eq!(
            TypeDescriptor::union(vec![]),
            TypeDescriptor::Union(vec![])
        );
    }

    #[test]
    fn test_substitute_replaces_matching_var() {
        let vector_t = TypeDescriptor::generic(
            "Vector",
            vec![TypeDescriptor::Var(TypeVar::new("T"))],
        );
        let vector_int = vector_t.substitute("T", &TypeDescriptor::nominal("Int64"));
        assert_eq!(
            vector_int,
            TypeDescriptor::generic("Vector", vec![TypeDescriptor::nominal("Int64")])
        );
    }

    #[test]
    fn test_substitute_respects_shadowing() {
        // (Vector{T} where T) is closed over T; substituting T from
        // outside must not reach inside.
        let closed = TypeDescriptor::UnionAll {
            var: TypeVar::new("T"),
            body: Box::new(TypeDescriptor::generic(
                "Vector",
                vec![TypeDescriptor::Var(TypeVar::new("T"))],
            )),
        };
        assert_eq!(
            closed.substitute("T", &TypeDescriptor::nominal("Int64")),
            closed
        );
    }

    #[test]
    fn test_substitute_reaches_shadowing_binder_bounds() {
        // (Vector{T} where T <: T) rebinds T inside its body, but the
        // upper bound refers to the outer T.
        let shadowing = TypeDescriptor::UnionAll {
            var: TypeVar::with_upper("T", TypeDescriptor::Var(TypeVar::new("T"))),
            body: Box::new(TypeDescriptor::generic(
                "Vector",
                vec![TypeDescriptor::Var(TypeVar::new("T"))],
            )),
        };
        let substituted = shadowing.substitute("T", &TypeDescriptor::nominal("Int64"));
        assert_eq!(
            substituted,
            TypeDescriptor::UnionAll {
                var: TypeVar::with_upper("T", TypeDescriptor::nominal("Int64")),
                body: Box::new(TypeDescriptor::generic(
                    "Vector",
                    vec![TypeDescriptor::Var(TypeVar::new("T"))],
                )),
            }
        );
    }

    #[test]
    fn test_type_name_display_qualification() {
        assert_eq!(TypeName::exported("Int64").to_string(), "Int64");
        assert_eq!(
            TypeName::qualified(vec!["Base".into(), "Iterators".into()], "Zip").to_string(),
            "Base.Iterators.Zip"
        );
    }
}
