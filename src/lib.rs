//! Structural decomposition and reconstruction of Julia function
//! definitions.
//!
//! Macro authors and code generators use this crate to take a function
//! definition apart into named components, edit them, and reassemble a
//! valid definition, without hand-writing a pattern for every surface
//! form Julia's definition grammar allows. The same component record can
//! also be reconstructed from a compiled method's reflection data, so
//! the editing pipeline works on reflected functions as well as parsed
//! source.
//!
//! Syntax trees arrive pre-parsed as [`Expr`] values and leave the same
//! way; parsing text and evaluating the result belong to the parser and
//! runtime, not this crate.
//!
//! ```
//! use subset_julia_vm_exprtools::{combine_def, split_def, Expr};
//!
//! // f(x) = 2 * x
//! let def = Expr::Assign(
//!     Box::new(Expr::call(Expr::symbol("f"), vec![Expr::symbol("x")])),
//!     Box::new(Expr::call(
//!         Expr::symbol("*"),
//!         vec![Expr::int(2), Expr::symbol("x")],
//!     )),
//! );
//!
//! let mut parts = split_def(&def)?;
//! assert_eq!(parts.name, Some(Expr::symbol("f")));
//!
//! // Rename and rebuild.
//! parts.name = Some(Expr::symbol("double"));
//! assert_eq!(combine_def(&parts)?.to_string(), "double(x) = 2 * x");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Syntax-tree representation
pub mod expr;

// Definition splitting, combining and argument forwarding
pub mod def;

// Resolved type descriptors, parameter extraction and rendering
pub mod types;

// Signature extraction from compiled method records
pub mod signature;

// Error types
pub mod error;

pub use def::{arg_name, args_tuple, combine_def, split_def, try_split_def, DefKind, FunctionParts};
pub use error::{CombineError, SignatureError, SplitError};
pub use expr::{Expr, Literal};
pub use signature::{signature_parts, MethodRecord, ResolvedMethod};
pub use types::{
    bound_expr, render_type, render_type_hygienic, type_parameters, TypeDescriptor, TypeName,
    TypeVar, VarRenamer,
};
