//! Scalar values exchanged between record fields and cells

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared type of a record field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    Integer,
    Long,
    Float,
    Double,
    Decimal,
    Boolean,
    Text,
}

impl ScalarKind {
    /// Kinds written as numeric cells
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            ScalarKind::Integer
                | ScalarKind::Long
                | ScalarKind::Float
                | ScalarKind::Double
                | ScalarKind::Decimal
        )
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalarKind::Integer => "int",
            ScalarKind::Long => "long",
            ScalarKind::Float => "float",
            ScalarKind::Double => "double",
            ScalarKind::Decimal => "decimal",
            ScalarKind::Boolean => "boolean",
            ScalarKind::Text => "string",
        };
        f.write_str(name)
    }
}

/// A typed field value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Decimal(Decimal),
    Boolean(bool),
    Text(String),
}

impl Value {
    pub fn kind(&self) -> ScalarKind {
        match self {
            Value::Integer(_) => ScalarKind::Integer,
            Value::Long(_) => ScalarKind::Long,
            Value::Float(_) => ScalarKind::Float,
            Value::Double(_) => ScalarKind::Double,
            Value::Decimal(_) => ScalarKind::Decimal,
            Value::Boolean(_) => ScalarKind::Boolean,
            Value::Text(_) => ScalarKind::Text,
        }
    }

    /// Numeric cell representation.
    ///
    /// Cells hold numbers as `f64`, so `Long` values beyond 2^53 and
    /// `Decimal` values with more than ~15 significant digits lose
    /// precision here. Near `i64::MAX` the rounded value no longer fits an
    /// `i64` at all, which is why cell assignment refuses such `Long`s.
    /// Returns `None` for non-numeric kinds.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(v) => Some(f64::from(*v)),
            Value::Long(v) => Some(*v as f64),
            Value::Float(v) => Some(f64::from(*v)),
            Value::Double(v) => Some(*v),
            Value::Decimal(v) => v.to_f64(),
            Value::Boolean(_) | Value::Text(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{}", v),
            Value::Long(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{}", v),
            Value::Decimal(v) => write!(f, "{}", v),
            Value::Boolean(v) => write!(f, "{}", v),
            Value::Text(v) => f.write_str(v),
        }
    }
}

/// Rust types that can back a mapped record field.
///
/// Implemented for the seven supported scalars and for `Option` of each.
/// `Option` fields receive `None` from blank cells; plain fields keep
/// whatever value they already hold.
pub trait Scalar: Sized {
    const KIND: ScalarKind;

    fn to_value(&self) -> Option<Value>;

    fn from_value(value: Value) -> Result<Self, Value>;

    /// Value stored when a blank cell is assigned, if any.
    fn absent() -> Option<Self> {
        None
    }

    /// Store `value` into `slot`, handing back a value of the wrong kind.
    fn assign(slot: &mut Self, value: Option<Value>) -> Result<(), Value> {
        match value {
            Some(value) => *slot = Self::from_value(value)?,
            None => {
                if let Some(absent) = Self::absent() {
                    *slot = absent;
                }
            }
        }
        Ok(())
    }
}

macro_rules! impl_scalar {
    ($ty:ty, $kind:ident) => {
        impl Scalar for $ty {
            const KIND: ScalarKind = ScalarKind::$kind;

            fn to_value(&self) -> Option<Value> {
                Some(Value::$kind(self.clone()))
            }

            fn from_value(value: Value) -> Result<Self, Value> {
                match value {
                    Value::$kind(v) => Ok(v),
                    other => Err(other),
                }
            }
        }
    };
}

impl_scalar!(i32, Integer);
impl_scalar!(i64, Long);
impl_scalar!(f32, Float);
impl_scalar!(f64, Double);
impl_scalar!(Decimal, Decimal);
impl_scalar!(bool, Boolean);
impl_scalar!(String, Text);

impl<T: Scalar> Scalar for Option<T> {
    const KIND: ScalarKind = T::KIND;

    fn to_value(&self) -> Option<Value> {
        self.as_ref().and_then(T::to_value)
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        T::from_value(value).map(Some)
    }

    fn absent() -> Option<Self> {
        Some(None)
    }
}
