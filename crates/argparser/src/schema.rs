//! Serializable snapshot of a registry's schema.
//!
//! Only display metadata is exported; parse state is not part of the schema.

use serde::{Deserialize, Serialize};

use crate::argument::ArgumentDefinition;
use crate::registry::Registry;
use crate::value::ArgumentType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ArgumentDescriptor {
    pub identifier: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub aliases: Vec<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(rename = "type")]
    pub kind: ArgumentType,
    #[serde(default)]
    pub arity: usize,
}

impl From<&ArgumentDefinition> for ArgumentDescriptor {
    fn from(def: &ArgumentDefinition) -> Self {
        Self {
            identifier: def.identifier.clone(),
            description: def.description.clone(),
            aliases: def.aliases.clone(),
            required: def.required,
            kind: def.kind,
            arity: def.arity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SchemaDescriptor {
    pub program_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub usages: Vec<String>,
    pub arguments: Vec<ArgumentDescriptor>,
}

impl Registry {
    pub fn schema(&self) -> SchemaDescriptor {
        SchemaDescriptor {
            program_name: self.program_name.clone(),
            usages: self.usages.clone(),
            arguments: self
                .arguments
                .values()
                .map(|arg| ArgumentDescriptor::from(&arg.definition))
                .collect(),
        }
    }
}
