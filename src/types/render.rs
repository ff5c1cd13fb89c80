//! Rendering resolved types back into syntax-tree fragments.
//!
//! The signature extractor uses this to rebuild source-shaped parameter
//! annotations (`x::Vector{T}`) and where-clause constraints from
//! reflection data. Nested deferred-parameter wrappers flatten into a
//! single `where` level for readability: `Foo{T, A} where {T, A}` rather
//! than `(Foo{T, A} where A) where T`.

use crate::expr::{Expr, Literal};

use super::{TypeDescriptor, TypeName, TypeVar};

/// Convert a resolved type into an equivalent syntax-tree fragment.
///
/// Total over the descriptor variant set. Variable names are kept
/// as-is; see [`render_type_hygienic`] when two independently
/// introduced variables may collide.
pub fn render_type(ty: &TypeDescriptor) -> Expr {
    match ty {
        TypeDescriptor::Any => Expr::symbol("Any"),
        TypeDescriptor::Var(var) => Expr::symbol(var.name.clone()),
        // Quote symbol constants so they re-parse as literals rather
        // than identifiers.
        TypeDescriptor::Constant(Literal::Sym(name)) => {
            Expr::Quote(Box::new(Expr::symbol(name.clone())))
        }
        TypeDescriptor::Constant(lit) => Expr::Literal(lit.clone()),
        TypeDescriptor::Nominal { name, params } => {
            if params.is_empty() {
                name_expr(name)
            } else {
                curly(name_expr(name), params)
            }
        }
        // A concrete empty tuple type keeps its braces; only the
        // unparameterized `Tuple` nominal renders bare.
        TypeDescriptor::Tuple(elements) => curly(Expr::symbol("Tuple"), elements),
        TypeDescriptor::Union(members) => curly(Expr::symbol("Union"), members),
        TypeDescriptor::Vararg { element, count } => {
            let mut params = vec![element.as_ref().clone()];
            if let Some(count) = count {
                params.push(count.as_ref().clone());
            }
            curly(Expr::symbol("Vararg"), &params)
        }
        TypeDescriptor::UnionAll { .. } => {
            // Unwrap nested wrappers outside-in, one constraint per
            // layer, into a single flattened where.
            let mut constraints = Vec::new();
            let mut inner = ty;
            while let TypeDescriptor::UnionAll { var, body } = inner {
                constraints.push(bound_expr(var));
                inner = body.as_ref();
            }
            Expr::Where {
                body: Box::new(render_type(inner)),
                constraints,
            }
        }
    }
}

/// The constraint expression declaring a type variable: `T`, `T <: U`,
/// `T >: L` or `L <: T <: U`.
pub fn bound_expr(var: &TypeVar) -> Expr {
    let name = Expr::symbol(var.name.clone());
    match (&var.lower, &var.upper) {
        (None, None) => name,
        (None, Some(upper)) => {
            Expr::SubtypeOf(Box::new(name), Box::new(render_type(upper)))
        }
        (Some(lower), None) => {
            Expr::SupertypeOf(Box::new(name), Box::new(render_type(lower)))
        }
        (Some(lower), Some(upper)) => Expr::Comparison(vec![
            render_type(lower),
            Expr::symbol("<:"),
            name,
            Expr::symbol("<:"),
            render_type(upper),
        ]),
    }
}

/// Fresh-name generator for the hygiene rendering mode.
///
/// Names are the original base with a monotonically increasing suffix,
/// so `T` becomes `T1`, `T2`, ... across one renamer's lifetime.
#[derive(Debug, Default)]
pub struct VarRenamer {
    counter: u64,
}

impl VarRenamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The next fresh name derived from `base`.
    pub fn fresh(&mut self, base: &str) -> String {
        self.counter += 1;
        format!("{}{}", base, self.counter)
    }
}

/// Render with every bound type variable renamed to a fresh name.
///
/// Two independently introduced variables with accidentally identical
/// names inside nested deferred-parameter wrappers produce ambiguous
/// output under [`render_type`]; this mode trades round-trip name
/// fidelity for a disambiguation guarantee. Opt-in: default rendering
/// stays name-stable so structural round-trip tests keep passing.
pub fn render_type_hygienic(ty: &TypeDescriptor, renamer: &mut VarRenamer) -> Expr {
    render_type(&rename_bound_vars(ty, renamer))
}

fn rename_bound_vars(ty: &TypeDescriptor, renamer: &mut VarRenamer) -> TypeDescriptor {
    match ty {
        TypeDescriptor::UnionAll { var, body } => {
            let fresh = renamer.fresh(&var.name);
            // Bounds belong to the enclosing scope; rename them before
            // the body sees the fresh variable.
            let renamed_var = TypeVar {
                name: fresh.clone(),
                lower: var
                    .lower
                    .as_ref()
                    .map(|b| Box::new(rename_bound_vars(b, renamer))),
                upper: var
                    .upper
                    .as_ref()
                    .map(|b| Box::new(rename_bound_vars(b, renamer))),
            };
            let rebound = body.substitute(&var.name, &TypeDescriptor::Var(TypeVar::new(fresh)));
            TypeDescriptor::UnionAll {
                var: renamed_var,
                body: Box::new(rename_bound_vars(&rebound, renamer)),
            }
        }
        TypeDescriptor::Nominal { name, params } => TypeDescriptor::Nominal {
            name: name.clone(),
            params: params
                .iter()
                .map(|p| rename_bound_vars(p, renamer))
                .collect(),
        },
        TypeDescriptor::Tuple(elements) => TypeDescriptor::Tuple(
            elements
                .iter()
                .map(|e| rename_bound_vars(e, renamer))
                .collect(),
        ),
        TypeDescriptor::Union(members) => TypeDescriptor::Union(
            members
                .iter()
                .map(|m| rename_bound_vars(m, renamer))
                .collect(),
        ),
        TypeDescriptor::Vararg { element, count } => TypeDescriptor::Vararg {
            element: Box::new(rename_bound_vars(element, renamer)),
            count: count.as_ref().map(|c| Box::new(rename_bound_vars(c, renamer))),
        },
        leaf => leaf.clone(),
    }
}

/// A nominal name as a syntax fragment: bare when visible unqualified,
/// otherwise the full module path.
fn name_expr(name: &TypeName) -> Expr {
    if name.exported || name.modules.is_empty() {
        return Expr::symbol(name.name.clone());
    }
    let mut modules = name.modules.iter();
    let mut base = match modules.next() {
        Some(first) => Expr::symbol(first.clone()),
        None => unreachable!("emptiness checked above"),
    };
    for module in modules {
        base = Expr::Path(Box::new(base), module.clone());
    }
    Expr::Path(Box::new(base), name.name.clone())
}

fn curly(name: Expr, params: &[TypeDescriptor]) -> Expr {
    let mut children = Vec::with_capacity(params.len() + 1);
    children.push(name);
    children.extend(params.iter().map(render_type));
    Expr::Curly(children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn var_ref(name: &str) -> TypeDescriptor {
        TypeDescriptor::Var(TypeVar::new(name))
    }

    #[test]
    fn test_render_bare_nominal() {
        assert_eq!(
            render_type(&TypeDescriptor::nominal("Int64")),
            Expr::symbol("Int64")
        );
    }

    #[test]
    fn test_render_qualified_nominal() {
        let ty = TypeDescriptor::Nominal {
            name: TypeName::qualified(vec!["Base".into(), "Iterators".into()], "Zip"),
            params: vec![],
        };
        let expected = Expr::Path(
            Box::new(Expr::Path(
                Box::new(Expr::symbol("Base")),
                "Iterators".to_string(),
            )),
            "Zip".to_string(),
        );
        assert_eq!(render_type(&ty), expected);
    }

    #[test]
    fn test_render_generic_instantiation() {
        let ty = TypeDescriptor::generic("Vector", vec![var_ref("T")]);
        assert_eq!(
            render_type(&ty),
            Expr::Curly(vec![Expr::symbol("Vector"), Expr::symbol("T")])
        );
    }

    #[test]
    fn test_render_empty_tuple_type_keeps_braces() {
        // Tuple{} stays distinct from the unparameterized Tuple.
        assert_eq!(
            render_type(&TypeDescriptor::Tuple(vec![])),
            Expr::Curly(vec![Expr::symbol("Tuple")])
        );
        assert_eq!(
            render_type(&TypeDescriptor::nominal("Tuple")),
            Expr::symbol("Tuple")
        );
    }

    #[test]
    fn test_render_union() {
        let ty = TypeDescriptor::union(vec![
            TypeDescriptor::nominal("Int64"),
            TypeDescriptor::nominal("Missing"),
        ]);
        assert_eq!(
            render_type(&ty),
            Expr::Curly(vec![
                Expr::symbol("Union"),
                Expr::symbol("Int64"),
                Expr::symbol("Missing"),
            ])
        );
    }

    #[test]
    fn test_render_nested_union_all_flattens_where() {
        // UnionAll(T, UnionAll(A, Foo{T, A})) -> Foo{T, A} where {T, A}
        let ty = TypeDescriptor::UnionAll {
            var: TypeVar::new("T"),
            body: Box::new(TypeDescriptor::UnionAll {
                var: TypeVar::new("A"),
                body: Box::new(TypeDescriptor::generic(
                    "Foo",
                    vec![var_ref("T"), var_ref("A")],
                )),
            }),
        };
        let rendered = render_type(&ty);
        let Expr::Where { body, constraints } = &rendered else {
            panic!("expected a single where level, got {:?}", rendered);
        };
        assert_eq!(constraints, &vec![Expr::symbol("T"), Expr::symbol("A")]);
        assert_eq!(
            body.as_ref(),
            &Expr::Curly(vec![
                Expr::symbol("Foo"),
                Expr::symbol("T"),
                Expr::symbol("A"),
            ])
        );
        assert_eq!(rendered.to_string(), "Foo{T, A} where {T, A}");
    }

    #[test]
    fn test_render_symbol_constant_quoted() {
        let ty = TypeDescriptor::generic(
            "Val",
            vec![TypeDescriptor::Constant(Literal::Sym("size".to_string()))],
        );
        assert_eq!(
            render_type(&ty),
            Expr::Curly(vec![
                Expr::symbol("Val"),
                Expr::Quote(Box::new(Expr::symbol("size"))),
            ])
        );
    }

    #[test]
    fn test_bound_expr_shapes() {
        let number = TypeDescriptor::nominal("Number");
        let integer = TypeDescriptor::nominal("Integer");

        assert_eq!(bound_expr(&TypeVar::new("T")), Expr::symbol("T"));
        assert_eq!(
            bound_expr(&TypeVar::with_upper("T", number.clone())),
            Expr::SubtypeOf(Box::new(Expr::symbol("T")), Box::new(Expr::symbol("Number")))
        );
        assert_eq!(
            bound_expr(&TypeVar::with_lower("T", integer.clone())),
            Expr::SupertypeOf(
                Box::new(Expr::symbol("T")),
                Box::new(Expr::symbol("Integer"))
            )
        );
        assert_eq!(
            bound_expr(&TypeVar::with_bounds("T", integer, number)),
            Expr::Comparison(vec![
                Expr::symbol("Integer"),
                Expr::symbol("<:"),
                Expr::symbol("T"),
                Expr::symbol("<:"),
                Expr::symbol("Number"),
            ])
        );
    }

    #[test]
    fn test_hygienic_rendering_disambiguates_shadowed_names() {
        // Two independent variables both named T.
        let ty = TypeDescriptor::UnionAll {
            var: TypeVar::new("T"),
            body: Box::new(TypeDescriptor::UnionAll {
                var: TypeVar::new("T"),
                body: Box::new(TypeDescriptor::generic("Pair", vec![var_ref("T"), var_ref("T")])),
            }),
        };
        let mut renamer = VarRenamer::new();
        let rendered = render_type_hygienic(&ty, &mut renamer);
        let Expr::Where { constraints, body } = &rendered else {
            panic!("expected where, got {:?}", rendered);
        };
        assert_eq!(constraints, &vec![Expr::symbol("T1"), Expr::symbol("T2")]);
        // Inner references follow the innermost (shadowing) binder.
        assert_eq!(
            body.as_ref(),
            &Expr::Curly(vec![
                Expr::symbol("Pair"),
                Expr::symbol("T2"),
                Expr::symbol("T2"),
            ])
        );
    }

    #[test]
    fn test_hygienic_rendering_renames_outer_reference_in_inner_bound() {
        // Pair{T} where {T, T <: T}: the inner T's upper bound refers to
        // the outer T. Both binders and the bound must land on declared
        // fresh names.
        let ty = TypeDescriptor::UnionAll {
            var: TypeVar::new("T"),
            body: Box::new(TypeDescriptor::UnionAll {
                var: TypeVar::with_upper("T", var_ref("T")),
                body: Box::new(TypeDescriptor::generic("Pair", vec![var_ref("T")])),
            }),
        };
        let mut renamer = VarRenamer::new();
        let rendered = render_type_hygienic(&ty, &mut renamer);
        let Expr::Where { constraints, body } = &rendered else {
            panic!("expected where, got {:?}", rendered);
        };
        assert_eq!(
            constraints,
            &vec![
                Expr::symbol("T1"),
                Expr::SubtypeOf(Box::new(Expr::symbol("T2")), Box::new(Expr::symbol("T1"))),
            ]
        );
        assert_eq!(
            body.as_ref(),
            &Expr::Curly(vec![Expr::symbol("Pair"), Expr::symbol("T2")])
        );
    }

    #[test]
    fn test_default_rendering_is_name_stable() {
        let ty = TypeDescriptor::UnionAll {
            var: TypeVar::new("T"),
            body: Box::new(TypeDescriptor::generic("Vector", vec![var_ref("T")])),
        };
        assert_eq!(render_type(&ty).to_string(), "Vector{T} where T");
    }
}
