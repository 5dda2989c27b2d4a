//! The parse engine: one left-to-right pass over the token vector.

use tracing::{debug, trace};

use crate::error::ParseError;
use crate::registry::{HELP_IDENTIFIER, Registry};
use crate::value::coerce;

/// Successful result of [`Registry::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Every token was consumed; query the registry for values.
    Parsed,
    /// `--help`/`-h` was seen. Carries the rendered usage text.
    Help(String),
}

impl Registry {
    /// Parse `argv` against the registered schema.
    ///
    /// `argv[0]` is the program invocation name and is skipped. Found flags,
    /// values and positionals are recorded on the registry; on error the
    /// registry is left partially filled and should be dropped.
    pub fn parse<S: AsRef<str>>(&mut self, argv: &[S]) -> Result<ParseOutcome, ParseError> {
        let bytes = self.config.byte_coercion;
        let prefix = self.config.flag_prefix;

        let mut i = 1usize;
        while i < argv.len() {
            let token = argv[i].as_ref();

            let Some(index) = self
                .arguments
                .values()
                .position(|arg| arg.definition.matches(token))
            else {
                if token.starts_with(prefix) {
                    return Err(ParseError::UnknownArgument {
                        token: token.to_string(),
                        position: i,
                    });
                }
                trace!(position = i, token, "positional");
                self.positionals.push(token.to_string());
                i += 1;
                continue;
            };

            let argument = &mut self.arguments[index];
            let identifier = argument.definition.identifier.as_str();
            if argument.state.found {
                return Err(ParseError::DuplicateArgument {
                    identifier: identifier.to_string(),
                    position: i,
                });
            }

            if identifier == HELP_IDENTIFIER {
                argument.state.found = true;
                debug!(position = i, "help requested");
                return Ok(ParseOutcome::Help(self.usage()));
            }

            let kind = argument.definition.kind;
            let arity = argument.definition.arity;
            for slot in 0..arity {
                let position = i + 1 + slot;
                let Some(raw) = argv.get(position) else {
                    return Err(ParseError::MissingValue {
                        identifier: identifier.to_string(),
                        position,
                    });
                };
                let raw = raw.as_ref();
                let Some(value) = coerce(kind, raw, bytes) else {
                    return Err(ParseError::InvalidValue {
                        identifier: identifier.to_string(),
                        token: raw.to_string(),
                        position,
                        kind,
                    });
                };
                argument.state.values[slot] = value;
            }

            trace!(position = i, identifier, arity, "matched");
            argument.state.found = true;
            i += 1 + arity;
        }

        let missing: Vec<String> = self
            .arguments
            .values()
            .filter(|arg| arg.definition.required && !arg.state.found)
            .map(|arg| arg.definition.identifier.clone())
            .collect();
        if !missing.is_empty() {
            return Err(ParseError::MissingRequired {
                identifiers: missing,
            });
        }

        debug!(
            tokens = argv.len().saturating_sub(1),
            positionals = self.positionals.len(),
            "parsed arguments"
        );
        Ok(ParseOutcome::Parsed)
    }
}
