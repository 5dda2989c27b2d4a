//! Scalar kinds, tagged values and token coercion.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ByteCoercion;
use crate::error::UnknownTypeName;

/// The closed set of scalar kinds an argument can hold.
///
/// `None` marks a flag: it carries no value and must have an arity of 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArgumentType {
    None,
    U64,
    I64,
    F64,
    U32,
    I32,
    F32,
    U16,
    I16,
    U8,
    I8,
    Bool,
    String,
}

impl ArgumentType {
    pub const ALL: [ArgumentType; 13] = [
        Self::None,
        Self::U64,
        Self::I64,
        Self::F64,
        Self::U32,
        Self::I32,
        Self::F32,
        Self::U16,
        Self::I16,
        Self::U8,
        Self::I8,
        Self::Bool,
        Self::String,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::U64 => "u64",
            Self::I64 => "i64",
            Self::F64 => "f64",
            Self::U32 => "u32",
            Self::I32 => "i32",
            Self::F32 => "f32",
            Self::U16 => "u16",
            Self::I16 => "i16",
            Self::U8 => "u8",
            Self::I8 => "i8",
            Self::Bool => "bool",
            Self::String => "string",
        }
    }

    pub fn is_flag(self) -> bool {
        self == Self::None
    }

    /// Whether `arity` is legal for this type: 0 for flags, at least 1 otherwise.
    pub fn accepts_arity(self, arity: usize) -> bool {
        if self.is_flag() { arity == 0 } else { arity >= 1 }
    }

    /// The value a slot holds before parsing fills it. Flags have no slots.
    pub fn zero_value(self) -> Option<Value> {
        let value = match self {
            Self::None => return None,
            Self::U64 => Value::U64(0),
            Self::I64 => Value::I64(0),
            Self::F64 => Value::F64(0.0),
            Self::U32 => Value::U32(0),
            Self::I32 => Value::I32(0),
            Self::F32 => Value::F32(0.0),
            Self::U16 => Value::U16(0),
            Self::I16 => Value::I16(0),
            Self::U8 => Value::U8(0),
            Self::I8 => Value::I8(0),
            Self::Bool => Value::Bool(false),
            Self::String => Value::Str(String::new()),
        };
        Some(value)
    }
}

impl fmt::Display for ArgumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ArgumentType {
    type Err = UnknownTypeName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownTypeName(s.to_string()))
    }
}

/// One coerced value slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    U64(u64),
    I64(i64),
    F64(f64),
    U32(u32),
    I32(i32),
    F32(f32),
    U16(u16),
    I16(i16),
    U8(u8),
    I8(i8),
    Bool(bool),
    Str(String),
}

impl Value {
    pub fn kind(&self) -> ArgumentType {
        match self {
            Self::U64(_) => ArgumentType::U64,
            Self::I64(_) => ArgumentType::I64,
            Self::F64(_) => ArgumentType::F64,
            Self::U32(_) => ArgumentType::U32,
            Self::I32(_) => ArgumentType::I32,
            Self::F32(_) => ArgumentType::F32,
            Self::U16(_) => ArgumentType::U16,
            Self::I16(_) => ArgumentType::I16,
            Self::U8(_) => ArgumentType::U8,
            Self::I8(_) => ArgumentType::I8,
            Self::Bool(_) => ArgumentType::Bool,
            Self::Str(_) => ArgumentType::String,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::U64(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
            Self::U32(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{v}"),
            Self::U16(v) => write!(f, "{v}"),
            Self::I16(v) => write!(f, "{v}"),
            Self::U8(v) => write!(f, "{v}"),
            Self::I8(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Str(v) => f.write_str(v),
        }
    }
}

/// A Rust type that can be read out of a [`Value`] slot.
///
/// Implemented for every scalar kind except flags; `&str` borrows string slots.
pub trait Scalar<'a>: Sized {
    const KIND: ArgumentType;

    fn from_value(value: &'a Value) -> Option<Self>;
}

macro_rules! copy_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl<'a> Scalar<'a> for $ty {
                const KIND: ArgumentType = ArgumentType::$variant;

                fn from_value(value: &'a Value) -> Option<Self> {
                    match value {
                        Value::$variant(v) => Some(*v),
                        _ => None,
                    }
                }
            }
        )*
    };
}

copy_scalar! {
    u64 => U64,
    i64 => I64,
    f64 => F64,
    u32 => U32,
    i32 => I32,
    f32 => F32,
    u16 => U16,
    i16 => I16,
    u8 => U8,
    i8 => I8,
    bool => Bool,
}

impl<'a> Scalar<'a> for &'a str {
    const KIND: ArgumentType = ArgumentType::String;

    fn from_value(value: &'a Value) -> Option<Self> {
        match value {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

/// Convert one raw token into a value of `kind`.
///
/// Integers parse the whole token in base 10 as a 64-bit number and narrower
/// widths keep the low bits. Returns `None` when the token does not fit.
pub(crate) fn coerce(kind: ArgumentType, token: &str, bytes: ByteCoercion) -> Option<Value> {
    let value = match kind {
        ArgumentType::None => return None,
        ArgumentType::U64 => Value::U64(token.parse::<u64>().ok()?),
        ArgumentType::I64 => Value::I64(token.parse::<i64>().ok()?),
        ArgumentType::F64 => Value::F64(token.parse::<f64>().ok()?),
        ArgumentType::U32 => Value::U32(token.parse::<u64>().ok()? as u32),
        ArgumentType::I32 => Value::I32(token.parse::<i64>().ok()? as i32),
        ArgumentType::F32 => Value::F32(token.parse::<f32>().ok()?),
        ArgumentType::U16 => Value::U16(token.parse::<u64>().ok()? as u16),
        ArgumentType::I16 => Value::I16(token.parse::<i64>().ok()? as i16),
        ArgumentType::U8 => Value::U8(match bytes {
            ByteCoercion::Decimal => token.parse::<u64>().ok()? as u8,
            ByteCoercion::FirstChar => first_byte(token),
        }),
        ArgumentType::I8 => Value::I8(match bytes {
            ByteCoercion::Decimal => token.parse::<i64>().ok()? as i8,
            ByteCoercion::FirstChar => first_byte(token) as i8,
        }),
        ArgumentType::Bool => match token {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ => return None,
        },
        ArgumentType::String => Value::Str(token.to_string()),
    };
    Some(value)
}

fn first_byte(token: &str) -> u8 {
    token.bytes().next().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decimal(kind: ArgumentType, token: &str) -> Option<Value> {
        coerce(kind, token, ByteCoercion::Decimal)
    }

    #[test]
    fn valid_literals_keep_their_value() {
        assert_eq!(decimal(ArgumentType::U64, "42"), Some(Value::U64(42)));
        assert_eq!(decimal(ArgumentType::I64, "-7"), Some(Value::I64(-7)));
        assert_eq!(decimal(ArgumentType::F64, "3.5"), Some(Value::F64(3.5)));
        assert_eq!(decimal(ArgumentType::F32, "1e3"), Some(Value::F32(1000.0)));
        assert_eq!(decimal(ArgumentType::U16, "+9"), Some(Value::U16(9)));
        assert_eq!(decimal(ArgumentType::I8, "-12"), Some(Value::I8(-12)));
        assert_eq!(decimal(ArgumentType::Bool, "false"), Some(Value::Bool(false)));
        assert_eq!(
            decimal(ArgumentType::String, "-not-a-flag"),
            Some(Value::Str("-not-a-flag".to_string()))
        );
    }

    #[test]
    fn narrow_integers_truncate_the_wide_parse() {
        assert_eq!(decimal(ArgumentType::U32, "4294967297"), Some(Value::U32(1)));
        assert_eq!(decimal(ArgumentType::I16, "65535"), Some(Value::I16(-1)));
        assert_eq!(decimal(ArgumentType::U8, "258"), Some(Value::U8(2)));
    }

    #[test]
    fn trailing_garbage_is_rejected() {
        assert_eq!(decimal(ArgumentType::U64, "12abc"), None);
        assert_eq!(decimal(ArgumentType::I32, " 5"), None);
        assert_eq!(decimal(ArgumentType::F64, "1.5x"), None);
        assert_eq!(decimal(ArgumentType::U64, ""), None);
        assert_eq!(decimal(ArgumentType::U64, "-1"), None);
        assert_eq!(decimal(ArgumentType::U64, "18446744073709551616"), None);
    }

    #[test]
    fn bool_is_case_sensitive() {
        assert_eq!(decimal(ArgumentType::Bool, "true"), Some(Value::Bool(true)));
        assert_eq!(decimal(ArgumentType::Bool, "True"), None);
        assert_eq!(decimal(ArgumentType::Bool, "1"), None);
    }

    #[test]
    fn first_char_mode_reads_the_leading_byte() {
        let bytes = ByteCoercion::FirstChar;
        assert_eq!(coerce(ArgumentType::U8, "A", bytes), Some(Value::U8(65)));
        assert_eq!(coerce(ArgumentType::U8, "42", bytes), Some(Value::U8(b'4')));
        assert_eq!(coerce(ArgumentType::I8, "", bytes), Some(Value::I8(0)));
        // Other widths are unaffected by the byte mode.
        assert_eq!(coerce(ArgumentType::U16, "42", bytes), Some(Value::U16(42)));
    }

    #[test]
    fn flags_never_coerce() {
        assert_eq!(decimal(ArgumentType::None, "anything"), None);
    }

    #[test]
    fn type_names_round_trip() {
        for kind in ArgumentType::ALL {
            assert_eq!(kind.name().parse::<ArgumentType>(), Ok(kind));
            assert_eq!(kind.zero_value().map(|v| v.kind()), (!kind.is_flag()).then_some(kind));
        }
        assert!("uint64_t".parse::<ArgumentType>().is_err());
    }

    #[test]
    fn arity_rules() {
        assert!(ArgumentType::None.accepts_arity(0));
        assert!(!ArgumentType::None.accepts_arity(2));
        assert!(!ArgumentType::U64.accepts_arity(0));
        assert!(ArgumentType::String.accepts_arity(3));
    }

    #[test]
    fn scalar_reads_matching_slots_only() {
        let v = Value::Str("hi".to_string());
        assert_eq!(<&str as Scalar>::from_value(&v), Some("hi"));
        assert_eq!(<u64 as Scalar>::from_value(&v), None);
        assert_eq!(<bool as Scalar>::from_value(&Value::Bool(true)), Some(true));
    }
}
