//! Tagged scalar values and checked conversion between them

use serde::Serialize;

use super::schema::ColumnKind;
use crate::error::{Error, Result};

/// A single numeric value carrying its runtime kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Int8(i8),
    UInt8(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Float32(f32),
    Float64(f64),
}

macro_rules! cast_scalar {
    ($scalar:expr, $t:ty) => {
        match $scalar {
            Scalar::Int8(v) => v as $t,
            Scalar::UInt8(v) => v as $t,
            Scalar::Int16(v) => v as $t,
            Scalar::UInt16(v) => v as $t,
            Scalar::Int32(v) => v as $t,
            Scalar::UInt32(v) => v as $t,
            Scalar::Float32(v) => v as $t,
            Scalar::Float64(v) => v as $t,
        }
    };
}

impl Scalar {
    pub fn kind(&self) -> ColumnKind {
        match self {
            Scalar::Int8(_) => ColumnKind::Int8,
            Scalar::UInt8(_) => ColumnKind::UInt8,
            Scalar::Int16(_) => ColumnKind::Int16,
            Scalar::UInt16(_) => ColumnKind::UInt16,
            Scalar::Int32(_) => ColumnKind::Int32,
            Scalar::UInt32(_) => ColumnKind::UInt32,
            Scalar::Float32(_) => ColumnKind::Float32,
            Scalar::Float64(_) => ColumnKind::Float64,
        }
    }

    /// Widen to f64
    pub fn to_f64(self) -> f64 {
        cast_scalar!(self, f64)
    }

    /// Narrow (or widen) to another kind using `as` semantics
    pub fn cast(self, kind: ColumnKind) -> Scalar {
        match kind {
            ColumnKind::Int8 => Scalar::Int8(cast_scalar!(self, i8)),
            ColumnKind::UInt8 => Scalar::UInt8(cast_scalar!(self, u8)),
            ColumnKind::Int16 => Scalar::Int16(cast_scalar!(self, i16)),
            ColumnKind::UInt16 => Scalar::UInt16(cast_scalar!(self, u16)),
            ColumnKind::Int32 => Scalar::Int32(cast_scalar!(self, i32)),
            ColumnKind::UInt32 => Scalar::UInt32(cast_scalar!(self, u32)),
            ColumnKind::Float32 => Scalar::Float32(cast_scalar!(self, f32)),
            ColumnKind::Float64 => Scalar::Float64(cast_scalar!(self, f64)),
        }
    }
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::Int8(v) => write!(f, "{}", v),
            Scalar::UInt8(v) => write!(f, "{}", v),
            Scalar::Int16(v) => write!(f, "{}", v),
            Scalar::UInt16(v) => write!(f, "{}", v),
            Scalar::Int32(v) => write!(f, "{}", v),
            Scalar::UInt32(v) => write!(f, "{}", v),
            Scalar::Float32(v) => write!(f, "{}", v),
            Scalar::Float64(v) => write!(f, "{}", v),
        }
    }
}

/// Types a stored value can be read back as
pub trait FromScalar: Sized {
    fn from_scalar(value: Scalar) -> Result<Self>;
}

/// Types that can be written into a column of a given kind
pub trait IntoScalar {
    fn into_scalar(self, kind: ColumnKind) -> Result<Scalar>;
}

macro_rules! impl_numeric {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$t> for Scalar {
                fn from(v: $t) -> Self {
                    Scalar::$variant(v)
                }
            }

            impl IntoScalar for $t {
                fn into_scalar(self, kind: ColumnKind) -> Result<Scalar> {
                    Ok(Scalar::$variant(self).cast(kind))
                }
            }
        )*
    };
}

impl_numeric!(
    i8 => Int8,
    u8 => UInt8,
    i16 => Int16,
    u16 => UInt16,
    i32 => Int32,
    u32 => UInt32,
    f32 => Float32,
    f64 => Float64,
);

macro_rules! impl_from_scalar {
    ($($t:ty),* $(,)?) => {
        $(
            impl FromScalar for $t {
                // Numeric to numeric never fails; precision loss is accepted.
                fn from_scalar(value: Scalar) -> Result<Self> {
                    Ok(cast_scalar!(value, $t))
                }
            }
        )*
    };
}

impl_from_scalar!(i8, u8, i16, u16, i32, u32, i64, u64, usize, f32, f64);

impl FromScalar for String {
    fn from_scalar(value: Scalar) -> Result<Self> {
        Ok(value.to_string())
    }
}

impl IntoScalar for Scalar {
    fn into_scalar(self, kind: ColumnKind) -> Result<Scalar> {
        Ok(self.cast(kind))
    }
}

impl IntoScalar for &str {
    fn into_scalar(self, kind: ColumnKind) -> Result<Scalar> {
        let text = self.trim();
        let parsed = if kind.is_integer() {
            text.parse::<i64>()
                .ok()
                .map(|v| v as f64)
                .or_else(|| {
                    text.parse::<f64>()
                        .ok()
                        .filter(|v| v.is_finite())
                        .map(f64::trunc)
                })
        } else {
            text.parse::<f64>().ok()
        };

        parsed
            .map(|v| Scalar::Float64(v).cast(kind))
            .ok_or_else(|| Error::Conversion {
                value: text.to_string(),
                kind,
            })
    }
}

impl IntoScalar for String {
    fn into_scalar(self, kind: ColumnKind) -> Result<Scalar> {
        self.as_str().into_scalar(kind)
    }
}

impl IntoScalar for &String {
    fn into_scalar(self, kind: ColumnKind) -> Result<Scalar> {
        self.as_str().into_scalar(kind)
    }
}
