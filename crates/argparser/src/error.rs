//! Error tiers for schema construction, parsing and value access.
//!
//! - [`SchemaError`]: the schema itself is wrong (a programming mistake).
//! - [`ParseError`]: the command line does not fit the schema (user input).
//! - [`AccessError`]: a lookup does not fit the schema (a programming mistake).

use thiserror::Error;

use crate::value::ArgumentType;

/// A registration was rejected by [`Registry::add`](crate::Registry::add).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Flags take no values; every other type takes at least one.
    #[error("argument `{identifier}` of type `{kind}` cannot take {arity} value(s)")]
    ArityMismatch {
        identifier: String,
        kind: ArgumentType,
        arity: usize,
    },

    #[error("argument `{identifier}` needs at least one alias")]
    NoAliases { identifier: String },

    #[error("argument `{identifier}` has an empty alias")]
    EmptyAlias { identifier: String },

    #[error("argument `{identifier}` is already registered")]
    DuplicateIdentifier { identifier: String },

    #[error("alias `{alias}` of `{identifier}` is already used by `{existing}`")]
    AliasConflict {
        alias: String,
        existing: String,
        identifier: String,
    },
}

/// The token vector could not be matched against the registered schema.
///
/// Positions are indices into the vector passed to
/// [`Registry::parse`](crate::Registry::parse), so the program name is
/// position 0 and the first real argument is position 1.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown argument `{token}` at position `{position}`")]
    UnknownArgument { token: String, position: usize },

    #[error("redefinition of argument `{identifier}` at position `{position}`")]
    DuplicateArgument { identifier: String, position: usize },

    #[error("missing value for argument `{identifier}` at position {position}")]
    MissingValue { identifier: String, position: usize },

    #[error("invalid {kind} value `{token}` for argument `{identifier}` at position {position}")]
    InvalidValue {
        identifier: String,
        token: String,
        position: usize,
        kind: ArgumentType,
    },

    /// Every required argument that was absent, in registration order.
    #[error("{}", format_missing_required(identifiers))]
    MissingRequired { identifiers: Vec<String> },
}

impl ParseError {
    /// Position of the offending token, when the error is tied to one.
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::UnknownArgument { position, .. }
            | Self::DuplicateArgument { position, .. }
            | Self::MissingValue { position, .. }
            | Self::InvalidValue { position, .. } => Some(*position),
            Self::MissingRequired { .. } => None,
        }
    }

    /// Identifier of the implicated argument, if any.
    ///
    /// For [`ParseError::MissingRequired`] this is the first missing one.
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Self::UnknownArgument { .. } => None,
            Self::DuplicateArgument { identifier, .. }
            | Self::MissingValue { identifier, .. }
            | Self::InvalidValue { identifier, .. } => Some(identifier),
            Self::MissingRequired { identifiers } => identifiers.first().map(String::as_str),
        }
    }
}

fn format_missing_required(identifiers: &[String]) -> String {
    let quoted: Vec<String> = identifiers.iter().map(|id| format!("`{id}`")).collect();
    if quoted.len() == 1 {
        format!("missing required argument {}", quoted[0])
    } else {
        format!("missing required arguments {}", quoted.join(", "))
    }
}

/// A typed lookup did not match the registered schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("argument `{0}` not found")]
    UnknownIdentifier(String),

    #[error("index {index} is out of range for argument `{identifier}` (count {arity})")]
    IndexOutOfRange {
        identifier: String,
        index: usize,
        arity: usize,
    },

    #[error("argument `{identifier}` holds {stored} values, not {requested}")]
    TypeMismatch {
        identifier: String,
        stored: ArgumentType,
        requested: ArgumentType,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown argument type `{0}`")]
pub struct UnknownTypeName(pub String);

/// Any error produced by this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Access(#[from] AccessError),
}

pub type Result<T> = std::result::Result<T, Error>;
