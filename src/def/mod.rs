//! Function-definition decomposition and reconstruction.
//!
//! [`split_def`] takes a definition tree apart into a [`FunctionParts`]
//! record, [`combine_def`] reassembles a record into a tree, and
//! [`args_tuple`] builds an argument-forwarding fragment from a
//! parameter list. Splitting and combining round-trip structurally,
//! modulo line markers and two documented normalizations (nested `where`
//! levels collapse into one, and semicolon-only anonymous parameter
//! blocks are rebuilt in tuple shape).

mod combine;
mod forward;
mod parts;
mod split;


pub use combine::combine_def;
pub use forward::{arg_name, args_tuple};
pub use parts::{DefKind, FunctionParts};
pub use split::{split_def, try_split_def};
