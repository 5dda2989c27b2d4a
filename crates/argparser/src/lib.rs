//! Declarative command-line argument parsing with typed, fixed-arity values.
//!
//! Arguments are registered on a [`Registry`] up front, then a raw argument
//! vector is parsed against it once:
//!
//! ```
//! use argparser::{ArgumentType, ParseOutcome, Registry};
//!
//! let mut registry = Registry::new("prog", ["-c <count>"]);
//! registry
//!     .add("count", "Number of items", true, 1, ArgumentType::U64, ["--count", "-c"])
//!     .unwrap();
//!
//! let outcome = registry.parse(&["prog", "-c", "5", "input.txt"]).unwrap();
//! assert_eq!(outcome, ParseOutcome::Parsed);
//! assert_eq!(registry.get_u64("count", 0), Ok(5));
//! assert_eq!(registry.positionals(), ["input.txt"]);
//! ```
//!
//! The library never prints or exits: `--help` comes back as
//! [`ParseOutcome::Help`] and bad input as a [`ParseError`], leaving process
//! policy to the caller.

pub mod argument;
pub mod config;
pub mod error;
pub mod parse;
pub mod registry;
pub mod schema;
mod usage;
pub mod value;

pub use argument::{Argument, ArgumentDefinition, ArgumentState};
pub use config::{ByteCoercion, ParserConfig};
pub use error::{AccessError, Error, ParseError, Result, SchemaError};
pub use parse::ParseOutcome;
pub use registry::{HELP_IDENTIFIER, Registry};
pub use schema::{ArgumentDescriptor, SchemaDescriptor};
pub use value::{ArgumentType, Scalar, Value};
