//! Error types for splitting, combining and signature extraction.
//!
//! Splitting has a dual-mode contract: `split_def` returns these errors
//! directly, while `try_split_def` degrades every rejection to `None` so
//! batch callers can probe trees without error-driven control flow.
//! Combining and signature extraction have no non-throwing mode; their
//! failures indicate caller bugs or a broken reflection provider.

use thiserror::Error;

use crate::def::DefKind;

/// Rejection of a tree that is not a well-formed function definition.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SplitError {
    /// The top-level head is not `function`, `=` or `->`.
    #[error("expression with head `{0}` is not a function definition")]
    NotADefinition(String),

    /// A definition head with the wrong number of children.
    #[error("function definition has {found} arguments, expected {expected}")]
    WrongArgumentCount { expected: usize, found: usize },

    /// The signature fragment has an unrecognized shape.
    #[error("invalid or missing parameters: {0}")]
    InvalidParameters(String),

    /// A semicolon-delimited anonymous parameter block with too many
    /// groups. At most one positional group and one keyword group are
    /// representable in this form.
    #[error("anonymous parameter block has {0} groups, at most 2 are supported")]
    InvalidParameterBlock(usize),
}

/// Rejection of a component record that cannot be reassembled.
///
/// These are always errors: a record in one of these shapes was mutated
/// into an invalid state by the caller, not produced by the splitter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CombineError {
    /// Structural slots without a body. A bodyless record is a forward
    /// declaration and must carry nothing but `head` and `name`.
    #[error("definition parts include `{slot}` but no body")]
    StructureWithoutBody { slot: &'static str },

    /// A bodyless record with no name cannot produce any tree.
    #[error("a bodyless `{head}` definition cannot be rebuilt without a name")]
    MissingName { head: DefKind },

    /// Only long-form definitions can be bodyless; `=` and `->` trees
    /// always carry a right-hand side.
    #[error("`{head}` definitions require a body")]
    MissingBody { head: DefKind },
}

/// A resolved method record whose reflection data is inconsistent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignatureError {
    /// The record's signature type or slot names do not describe a
    /// callable: not a tuple type, empty, or shorter than the slot list
    /// requires.
    #[error("malformed method record: {0}")]
    MalformedSignature(String),
}
