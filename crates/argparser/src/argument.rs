use crate::value::{ArgumentType, Value};

/// Display and matching metadata for one registered argument.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentDefinition {
    pub(crate) identifier: String,
    pub(crate) description: String,
    pub(crate) aliases: Vec<String>,
    pub(crate) required: bool,
    pub(crate) kind: ArgumentType,
    pub(crate) arity: usize,
}

impl ArgumentDefinition {
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Tokens that select this argument, in registration order.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn required(&self) -> bool {
        self.required
    }

    pub fn kind(&self) -> ArgumentType {
        self.kind
    }

    /// Number of value tokens consumed after the alias.
    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn matches(&self, token: &str) -> bool {
        self.aliases.iter().any(|alias| alias == token)
    }
}

/// Per-argument results of a parse.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentState {
    pub(crate) found: bool,
    pub(crate) values: Vec<Value>,
}

impl ArgumentState {
    /// Zero-valued slots for `arity` values of `kind`.
    pub(crate) fn zeroed(kind: ArgumentType, arity: usize) -> Self {
        let values = kind
            .zero_value()
            .map(|zero| vec![zero; arity])
            .unwrap_or_default();
        Self {
            found: false,
            values,
        }
    }

    pub fn found(&self) -> bool {
        self.found
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

/// A definition together with its parse state.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub(crate) definition: ArgumentDefinition,
    pub(crate) state: ArgumentState,
}

impl Argument {
    pub(crate) fn new(definition: ArgumentDefinition) -> Self {
        let state = ArgumentState::zeroed(definition.kind, definition.arity);
        Self { definition, state }
    }

    pub fn definition(&self) -> &ArgumentDefinition {
        &self.definition
    }

    pub fn state(&self) -> &ArgumentState {
        &self.state
    }
}
