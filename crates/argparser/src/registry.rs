//! The argument schema registry and its typed accessors.

use indexmap::IndexMap;
use tracing::debug;

use crate::argument::{Argument, ArgumentDefinition};
use crate::config::ParserConfig;
use crate::error::{AccessError, SchemaError};
use crate::value::{ArgumentType, Scalar, Value};

/// Identifier of the implicit help flag.
pub const HELP_IDENTIFIER: &str = "help";

const HELP_DESCRIPTION: &str = "prints the usage for the program";
const HELP_ALIASES: [&str; 2] = ["--help", "-h"];

/// Ordered argument definitions, their parse state and the positional leftovers.
///
/// A registry is built once, parsed once and then queried. Parse state is not
/// reset between calls to [`Registry::parse`]; use a fresh registry per parse.
#[derive(Debug, Clone)]
pub struct Registry {
    pub(crate) program_name: String,
    pub(crate) usages: Vec<String>,
    pub(crate) config: ParserConfig,
    pub(crate) arguments: IndexMap<String, Argument>,
    pub(crate) positionals: Vec<String>,
}

impl Registry {
    /// Create a registry with the default [`ParserConfig`].
    ///
    /// The `help` flag (`--help`, `-h`) is registered first.
    pub fn new<I, S>(program_name: impl Into<String>, usages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_config(program_name, usages, ParserConfig::default())
    }

    pub fn with_config<I, S>(program_name: impl Into<String>, usages: I, config: ParserConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self {
            program_name: program_name.into(),
            usages: usages.into_iter().map(Into::into).collect(),
            config,
            arguments: IndexMap::new(),
            positionals: Vec::new(),
        };

        let help = ArgumentDefinition {
            identifier: HELP_IDENTIFIER.to_string(),
            description: HELP_DESCRIPTION.to_string(),
            aliases: HELP_ALIASES.iter().map(|s| s.to_string()).collect(),
            required: false,
            kind: ArgumentType::None,
            arity: 0,
        };
        registry
            .arguments
            .insert(HELP_IDENTIFIER.to_string(), Argument::new(help));
        registry
    }

    /// Register an argument.
    ///
    /// `arity` must be 0 exactly when `kind` is [`ArgumentType::None`], at
    /// least one alias is needed, and neither the identifier nor any alias
    /// may already be taken (the help aliases included).
    pub fn add<I, S>(
        &mut self,
        identifier: &str,
        description: &str,
        required: bool,
        arity: usize,
        kind: ArgumentType,
        aliases: I,
    ) -> Result<(), SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if !kind.accepts_arity(arity) {
            return Err(SchemaError::ArityMismatch {
                identifier: identifier.to_string(),
                kind,
                arity,
            });
        }
        if self.arguments.contains_key(identifier) {
            return Err(SchemaError::DuplicateIdentifier {
                identifier: identifier.to_string(),
            });
        }

        let mut own: Vec<String> = Vec::new();
        for alias in aliases {
            let alias = alias.as_ref();
            if alias.is_empty() {
                return Err(SchemaError::EmptyAlias {
                    identifier: identifier.to_string(),
                });
            }
            if let Some(existing) = self.owner_of(alias) {
                return Err(SchemaError::AliasConflict {
                    alias: alias.to_string(),
                    existing: existing.to_string(),
                    identifier: identifier.to_string(),
                });
            }
            if !own.iter().any(|a| a == alias) {
                own.push(alias.to_string());
            }
        }
        if own.is_empty() {
            return Err(SchemaError::NoAliases {
                identifier: identifier.to_string(),
            });
        }

        debug!(identifier, %kind, arity, required, aliases = ?own, "registered argument");
        let definition = ArgumentDefinition {
            identifier: identifier.to_string(),
            description: description.to_string(),
            aliases: own,
            required,
            kind,
            arity,
        };
        self.arguments
            .insert(identifier.to_string(), Argument::new(definition));
        Ok(())
    }

    fn owner_of(&self, alias: &str) -> Option<&str> {
        self.arguments
            .values()
            .find(|arg| arg.definition.matches(alias))
            .map(|arg| arg.definition.identifier.as_str())
    }

    pub fn program_name(&self) -> &str {
        &self.program_name
    }

    /// Usage lines in the order they were supplied.
    pub fn usages(&self) -> &[String] {
        &self.usages
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Registered arguments in registration order (`help` first).
    pub fn arguments(&self) -> impl Iterator<Item = &Argument> {
        self.arguments.values()
    }

    pub fn argument(&self, identifier: &str) -> Option<&Argument> {
        self.arguments.get(identifier)
    }

    /// Tokens that matched no alias, in order of appearance.
    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }

    fn lookup(&self, identifier: &str) -> Result<&Argument, AccessError> {
        self.arguments
            .get(identifier)
            .ok_or_else(|| AccessError::UnknownIdentifier(identifier.to_string()))
    }

    /// Whether the argument appeared on the command line.
    pub fn found(&self, identifier: &str) -> Result<bool, AccessError> {
        Ok(self.lookup(identifier)?.state.found)
    }

    /// State of a flag argument. Fails for value-bearing arguments.
    pub fn flag(&self, identifier: &str) -> Result<bool, AccessError> {
        let argument = self.lookup(identifier)?;
        if !argument.definition.kind.is_flag() {
            return Err(AccessError::TypeMismatch {
                identifier: identifier.to_string(),
                stored: argument.definition.kind,
                requested: ArgumentType::None,
            });
        }
        Ok(argument.state.found)
    }

    /// All value slots of an argument; zero-valued when it was not found.
    pub fn values(&self, identifier: &str) -> Result<&[Value], AccessError> {
        Ok(&self.lookup(identifier)?.state.values)
    }

    /// Typed value at `index`.
    pub fn get<'a, T: Scalar<'a>>(&'a self, identifier: &str, index: usize) -> Result<T, AccessError> {
        let argument = self.lookup(identifier)?;
        let definition = &argument.definition;
        if index >= definition.arity {
            return Err(AccessError::IndexOutOfRange {
                identifier: identifier.to_string(),
                index,
                arity: definition.arity,
            });
        }
        let mismatch = || AccessError::TypeMismatch {
            identifier: identifier.to_string(),
            stored: definition.kind,
            requested: T::KIND,
        };
        if definition.kind != T::KIND {
            return Err(mismatch());
        }
        T::from_value(&argument.state.values[index]).ok_or_else(mismatch)
    }

    pub fn get_str(&self, identifier: &str, index: usize) -> Result<&str, AccessError> {
        self.get::<&str>(identifier, index)
    }
}

macro_rules! typed_getters {
    ($($name:ident => $ty:ty),* $(,)?) => {
        impl Registry {
            $(
                pub fn $name(&self, identifier: &str, index: usize) -> Result<$ty, AccessError> {
                    self.get::<$ty>(identifier, index)
                }
            )*
        }
    };
}

typed_getters! {
    get_u64 => u64,
    get_i64 => i64,
    get_f64 => f64,
    get_u32 => u32,
    get_i32 => i32,
    get_f32 => f32,
    get_u16 => u16,
    get_i16 => i16,
    get_u8 => u8,
    get_i8 => i8,
    get_bool => bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Registry {
        Registry::new("prog", ["-c <count>"])
    }

    #[test]
    fn help_is_registered_first() {
        let r = registry();
        let first = r.arguments().next().expect("help should exist");
        assert_eq!(first.definition().identifier(), HELP_IDENTIFIER);
        assert_eq!(first.definition().aliases(), ["--help", "-h"]);
        assert_eq!(first.definition().kind(), ArgumentType::None);
        assert!(!first.definition().required());
    }

    #[test]
    fn add_keeps_registration_order_and_zeroes_values() {
        let mut r = registry();
        r.add("count", "items", true, 2, ArgumentType::U64, ["--count", "-c"])
            .unwrap();
        r.add("verbose", "chatty", false, 0, ArgumentType::None, ["-v"])
            .unwrap();

        let ids: Vec<&str> = r.arguments().map(|a| a.definition().identifier()).collect();
        assert_eq!(ids, ["help", "count", "verbose"]);
        assert_eq!(r.values("count").unwrap(), [Value::U64(0), Value::U64(0)]);
        assert!(r.values("verbose").unwrap().is_empty());
        assert_eq!(r.found("count"), Ok(false));
    }

    #[test]
    fn add_rejects_value_type_without_arity() {
        let mut r = registry();
        let err = r
            .add("count", "items", true, 0, ArgumentType::U64, ["--count"])
            .unwrap_err();
        assert!(matches!(err, SchemaError::ArityMismatch { arity: 0, .. }));
    }

    #[test]
    fn add_rejects_flag_with_arity() {
        let mut r = registry();
        let err = r
            .add("verbose", "chatty", false, 2, ArgumentType::None, ["-v"])
            .unwrap_err();
        assert!(matches!(
            err,
            SchemaError::ArityMismatch {
                kind: ArgumentType::None,
                arity: 2,
                ..
            }
        ));
    }

    #[test]
    fn add_rejects_empty_alias_list() {
        let mut r = registry();
        let err = r
            .add("count", "items", true, 1, ArgumentType::U64, Vec::<&str>::new())
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::NoAliases {
                identifier: "count".to_string()
            }
        );
        assert!(r.argument("count").is_none());
    }

    #[test]
    fn add_rejects_colliding_aliases() {
        let mut r = registry();
        let err = r
            .add("height", "", false, 1, ArgumentType::U32, ["--height", "-h"])
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::AliasConflict {
                alias: "-h".to_string(),
                existing: "help".to_string(),
                identifier: "height".to_string(),
            }
        );

        r.add("name", "", false, 1, ArgumentType::String, ["-n"]).unwrap();
        assert!(matches!(
            r.add("name", "", false, 1, ArgumentType::String, ["--name"]),
            Err(SchemaError::DuplicateIdentifier { .. })
        ));
    }

    #[test]
    fn repeated_alias_within_one_argument_is_kept_once() {
        let mut r = registry();
        r.add("count", "", false, 1, ArgumentType::U64, ["-c", "-c", "--count"])
            .unwrap();
        assert_eq!(r.argument("count").unwrap().definition().aliases(), ["-c", "--count"]);
    }

    #[test]
    fn accessors_report_programming_errors() {
        let mut r = registry();
        r.add("count", "", false, 1, ArgumentType::U64, ["-c"]).unwrap();

        assert_eq!(
            r.get_u64("missing", 0),
            Err(AccessError::UnknownIdentifier("missing".to_string()))
        );
        assert!(matches!(
            r.get_u64("count", 1),
            Err(AccessError::IndexOutOfRange { index: 1, arity: 1, .. })
        ));
        assert!(matches!(
            r.get_i64("count", 0),
            Err(AccessError::TypeMismatch {
                stored: ArgumentType::U64,
                requested: ArgumentType::I64,
                ..
            })
        ));
        assert!(matches!(r.flag("count"), Err(AccessError::TypeMismatch { .. })));
        assert_eq!(r.flag("help"), Ok(false));
        assert_eq!(r.get_u64("count", 0), Ok(0));
    }
}
