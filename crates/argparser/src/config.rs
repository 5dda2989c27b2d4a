use serde::{Deserialize, Serialize};

/// How 8-bit integer tokens are coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ByteCoercion {
    /// Base-10 like every other integer width.
    #[default]
    Decimal,
    /// The numeric code of the token's first byte (`0` for an empty token).
    /// Remaining bytes are ignored.
    FirstChar,
}

/// Parser-wide behavior knobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ParserConfig {
    pub byte_coercion: ByteCoercion,
    /// Unmatched tokens starting with this are unknown arguments, not positionals.
    pub flag_prefix: char,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            byte_coercion: ByteCoercion::Decimal,
            flag_prefix: '-',
        }
    }
}

impl ParserConfig {
    pub fn byte_coercion(mut self, mode: ByteCoercion) -> Self {
        self.byte_coercion = mode;
        self
    }

    pub fn flag_prefix(mut self, prefix: char) -> Self {
        self.flag_prefix = prefix;
        self
    }
}
