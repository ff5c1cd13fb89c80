//! Ordered type-parameter extraction.

use super::TypeDescriptor;

/// The ordered type arguments of a resolved type.
///
/// Deferred-parameter wrappers unwrap to their body first, so
/// `Vector{T} where T` reports `[T]`, the parameters of the underlying
/// `Vector` instantiation. Union members come back in the union's
/// canonical order, which is deterministic for a given type value but
/// carries no semantic meaning. Leaves (`Any`, variables, constants)
/// have no parameters.
pub fn type_parameters(ty: &TypeDescriptor) -> Vec<TypeDescriptor> {
    match ty {
        TypeDescriptor::UnionAll { body, .. } => type_parameters(body),
        TypeDescriptor::Nominal { params, .. } => params.clone(),
        TypeDescriptor::Tuple(elements) => elements.clone(),
        TypeDescriptor::Union(members) => members.clone(),
        TypeDescriptor::Vararg { element, count } => {
            let mut params = vec![element.as_ref().clone()];
            if let Some(count) = count {
                params.push(count.as_ref().clone());
            }
            params
        }
        TypeDescriptor::Any | TypeDescriptor::Var(_) | TypeDescriptor::Constant(_) => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Literal;
    use crate::types::TypeVar;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_nominal_parameters_in_order() {
        let pair = TypeDescriptor::generic(
            "Pair",
            vec![
                TypeDescriptor::nominal("Int64"),
                TypeDescriptor::nominal("String"),
            ],
        );
        assert_eq!(
            type_parameters(&pair),
            vec![
                TypeDescriptor::nominal("Int64"),
                TypeDescriptor::nominal("String"),
            ]
        );
    }

    #[test]
    fn test_union_all_unwraps_to_body() {
        let ty = TypeDescriptor::UnionAll {
            var: TypeVar::new("T"),
            body: Box::new(TypeDescriptor::generic(
                "Vector",
                vec![TypeDescriptor::Var(TypeVar::new("T"))],
            )),
        };
        assert_eq!(
            type_parameters(&ty),
            vec![TypeDescriptor::Var(TypeVar::new("T"))]
        );
    }

    #[test]
    fn test_tuple_reports_element_types() {
        let ty = TypeDescriptor::Tuple(vec![
            TypeDescriptor::nominal("Int64"),
            TypeDescriptor::Any,
        ]);
        assert_eq!(
            type_parameters(&ty),
            vec![TypeDescriptor::nominal("Int64"), TypeDescriptor::Any]
        );
    }

    #[test]
    fn test_union_members_stable_across_calls() {
        let ty = TypeDescriptor::union(vec![
            TypeDescriptor::nominal("Int64"),
            TypeDescriptor::nominal("Float64"),
            TypeDescriptor::nominal("Int64"),
        ]);
        assert_eq!(type_parameters(&ty), type_parameters(&ty));
        assert_eq!(type_parameters(&ty).len(), 2);
    }

    #[test]
    fn test_vararg_reports_element_and_count() {
        let ty = TypeDescriptor::Vararg {
            element: Box::new(TypeDescriptor::nominal("Int64")),
            count: Some(Box::new(TypeDescriptor::Constant(Literal::Int(3)))),
        };
        assert_eq!(
            type_parameters(&ty),
            vec![
                TypeDescriptor::nominal("Int64"),
                TypeDescriptor::Constant(Literal::Int(3)),
            ]
        );
    }

    #[test]
    fn test_leaves_have_no_parameters() {
        assert_eq!(type_parameters(&TypeDescriptor::Any), vec![]);
        assert_eq!(
            type_parameters(&TypeDescriptor::Var(TypeVar::new("T"))),
            vec![]
        );
        assert_eq!(
            type_parameters(&TypeDescriptor::Constant(Literal::Int(2))),
            vec![]
        );
    }
}
