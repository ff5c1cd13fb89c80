//! Signature extraction from resolved method records.
//!
//! Reconstructs the component record a splitter would have produced from
//! source, starting from reflection data instead: resolved parameter
//! types, parameter slot names and keyword metadata. The output feeds
//! the same mutation/combination pipeline as split records do, with
//! documented fidelity limits: keyword defaults, keyword constraints,
//! return types and the originating surface form are not recoverable
//! from a resolved record, so they are omitted rather than guessed.

use crate::def::FunctionParts;
use crate::error::SignatureError;
use crate::expr::Expr;
use crate::types::{bound_expr, render_type, TypeDescriptor, TypeVar};

/// Slot name the reflection subsystem reports for unused parameters.
const UNUSED_SLOT: &str = "_";

/// The boundary interface the reflection subsystem implements.
///
/// The core never touches a runtime's internal compiled representation;
/// it only reads this view of one compiled method.
pub trait MethodRecord {
    /// The method's name as bound in its owning scope.
    fn name(&self) -> &str;

    /// Ordered parameter slot names. The first slot is the reserved
    /// implicit receiver (the function value itself) and is skipped.
    fn slot_names(&self) -> &[String];

    /// The resolved signature: a tuple type of the callee type followed
    /// by the parameter types, possibly wrapped in deferred-parameter
    /// layers for generic methods.
    fn signature_type(&self) -> &TypeDescriptor;

    /// Names of keyword parameters, empty when the method accepts none.
    fn keyword_names(&self) -> &[String];
}

/// A plain, owned method record.
///
/// Reflection subsystems with their own method representation implement
/// [`MethodRecord`] directly; this struct exists so tests and
/// non-reflective callers can assemble records by hand.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ResolvedMethod {
    pub name: String,
    pub slot_names: Vec<String>,
    pub signature_type: TypeDescriptor,
    pub keyword_names: Vec<String>,
}

impl MethodRecord for ResolvedMethod {
    fn name(&self) -> &str {
        &self.name
    }

    fn slot_names(&self) -> &[String] {
        &self.slot_names
    }

    fn signature_type(&self) -> &TypeDescriptor {
        &self.signature_type
    }

    fn keyword_names(&self) -> &[String] {
        &self.keyword_names
    }
}

/// Reconstruct a component record from a resolved method record.
///
/// Produces `name`, `args`, `whereparams`, `params` for constructor
/// methods, and keyword names (without defaults or constraints). `head`
/// is always the long form: the true originating form is not recoverable
/// from a resolved record. `body` and `rtype` are never produced.
///
/// Errors only when the record itself is inconsistent, which indicates a
/// broken reflection provider rather than an unsupported method.
pub fn signature_parts(method: &impl MethodRecord) -> Result<FunctionParts, SignatureError> {
    // Unwrap deferred-parameter layers outside-in; this is the same
    // flattening the splitter applies to nested where clauses.
    let mut type_vars: Vec<&TypeVar> = Vec::new();
    let mut sig = method.signature_type();
    while let TypeDescriptor::UnionAll { var, body } = sig {
        type_vars.push(var);
        sig = body.as_ref();
    }

    let TypeDescriptor::Tuple(param_types) = sig else {
        return Err(SignatureError::MalformedSignature(format!(
            "signature type is not a tuple: {}",
            sig
        )));
    };
    let Some((callee_ty, arg_types)) = param_types.split_first() else {
        return Err(SignatureError::MalformedSignature(
            "signature tuple has no callee type".to_string(),
        ));
    };

    let slots = method.slot_names();
    if slots.len() < param_types.len() {
        return Err(SignatureError::MalformedSignature(format!(
            "{} parameter types but only {} slot names",
            param_types.len(),
            slots.len()
        )));
    }

    let mut parts = FunctionParts::default();

    // Constructor methods carry their name inside the callee type:
    // `Tuple{Type{Foo{T}}, T}` defines `Foo{T}(...)`.
    match constructor_target(callee_ty) {
        Some(TypeDescriptor::Nominal { name, params }) => {
            parts.name = Some(render_type(&TypeDescriptor::Nominal {
                name: name.clone(),
                params: Vec::new(),
            }));
            if !params.is_empty() {
                parts.params = Some(params.iter().map(render_type).collect());
            }
        }
        Some(other) => parts.name = Some(render_type(other)),
        None => parts.name = Some(Expr::symbol(method.name())),
    }

    let args: Vec<Expr> = slots[1..]
        .iter()
        .zip(arg_types)
        .map(|(slot, ty)| arg_expr(slot, ty))
        .collect();
    if !args.is_empty() {
        parts.args = Some(args);
    }

    if !type_vars.is_empty() {
        parts.whereparams = Some(type_vars.into_iter().map(bound_expr).collect());
    }

    // Only names are recoverable for keywords; absence of metadata means
    // the slot is omitted entirely, unlike the splitter's explicit-empty
    // list for semicolon-only blocks.
    let keyword_names = method.keyword_names();
    if !keyword_names.is_empty() {
        parts.kwargs = Some(keyword_names.iter().map(Expr::symbol).collect());
    }

    Ok(parts)
}

/// One parameter fragment from a slot name and its resolved type.
///
/// An `Any` parameter with a real name needs no annotation; unused
/// slots keep only their annotation.
fn arg_expr(slot: &str, ty: &TypeDescriptor) -> Expr {
    let unused = slot == UNUSED_SLOT || slot.is_empty();
    match ty {
        TypeDescriptor::Any if !unused => Expr::symbol(slot),
        _ if unused => Expr::Ascribe {
            value: None,
            ty: Box::new(render_type(ty)),
        },
        _ => Expr::Ascribe {
            value: Some(Box::new(Expr::symbol(slot))),
            ty: Box::new(render_type(ty)),
        },
    }
}

/// The instantiated type a `Type{...}` callee constructs, if any.
fn constructor_target(callee: &TypeDescriptor) -> Option<&TypeDescriptor> {
    match callee {
        TypeDescriptor::Nominal { name, params }
            if name.name == "Type" && params.len() == 1 =>
        {
            match &params[0] {
                TypeDescriptor::UnionAll { body, .. } => Some(unwrap_union_all(body)),
                target => Some(target),
            }
        }
        TypeDescriptor::UnionAll { body, .. } => constructor_target(body),
        _ => None,
    }
}

fn unwrap_union_all(ty: &TypeDescriptor) -> &TypeDescriptor {
    match ty {
        TypeDescriptor::UnionAll { body, .. } => unwrap_union_all(body),
        other => other,
    }
}
