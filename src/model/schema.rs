//! Column kinds and typed column storage

use serde::{Deserialize, Serialize};

use super::value::{FromScalar, IntoScalar, Scalar};
use crate::error::{Error, Result};

/// Fixed-width numeric kind of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Float32,
    Float64,
}

impl ColumnKind {
    /// All kinds in declaration order
    pub const ALL: [ColumnKind; 8] = [
        ColumnKind::Int8,
        ColumnKind::UInt8,
        ColumnKind::Int16,
        ColumnKind::UInt16,
        ColumnKind::Int32,
        ColumnKind::UInt32,
        ColumnKind::Float32,
        ColumnKind::Float64,
    ];

    /// Whether values of this kind are integers
    pub fn is_integer(self) -> bool {
        !matches!(self, ColumnKind::Float32 | ColumnKind::Float64)
    }

    /// Bytes per element
    pub fn size_of(self) -> usize {
        match self {
            ColumnKind::Int8 | ColumnKind::UInt8 => 1,
            ColumnKind::Int16 | ColumnKind::UInt16 => 2,
            ColumnKind::Int32 | ColumnKind::UInt32 | ColumnKind::Float32 => 4,
            ColumnKind::Float64 => 8,
        }
    }
}

impl std::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnKind::Int8 => write!(f, "int8"),
            ColumnKind::UInt8 => write!(f, "uint8"),
            ColumnKind::Int16 => write!(f, "int16"),
            ColumnKind::UInt16 => write!(f, "uint16"),
            ColumnKind::Int32 => write!(f, "int32"),
            ColumnKind::UInt32 => write!(f, "uint32"),
            ColumnKind::Float32 => write!(f, "float32"),
            ColumnKind::Float64 => write!(f, "float64"),
        }
    }
}

impl std::str::FromStr for ColumnKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "int8" | "i8" | "char" => Ok(ColumnKind::Int8),
            "uint8" | "u8" | "uchar" => Ok(ColumnKind::UInt8),
            "int16" | "i16" | "short" => Ok(ColumnKind::Int16),
            "uint16" | "u16" | "ushort" => Ok(ColumnKind::UInt16),
            "int32" | "i32" | "int" => Ok(ColumnKind::Int32),
            "uint32" | "u32" | "uint" => Ok(ColumnKind::UInt32),
            "float32" | "f32" | "float" => Ok(ColumnKind::Float32),
            "float64" | "f64" | "double" => Ok(ColumnKind::Float64),
            _ => Err(format!("Unknown column kind: {}", s)),
        }
    }
}

/// Homogeneous buffer of one of the eight column kinds
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Int8(Vec<i8>),
    UInt8(Vec<u8>),
    Int16(Vec<i16>),
    UInt16(Vec<u16>),
    Int32(Vec<i32>),
    UInt32(Vec<u32>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
}

/// Run `$body` with `$values` bound to the inner `Vec` of whichever variant is present
macro_rules! with_values {
    ($data:expr, $values:ident => $body:expr) => {
        match $data {
            ColumnData::Int8($values) => $body,
            ColumnData::UInt8($values) => $body,
            ColumnData::Int16($values) => $body,
            ColumnData::UInt16($values) => $body,
            ColumnData::Int32($values) => $body,
            ColumnData::UInt32($values) => $body,
            ColumnData::Float32($values) => $body,
            ColumnData::Float64($values) => $body,
        }
    };
}

impl ColumnData {
    /// Build a buffer of `kind` from widened values, narrowing each with `as` semantics
    pub fn from_f64_values(kind: ColumnKind, values: &[f64]) -> Self {
        match kind {
            ColumnKind::Int8 => ColumnData::Int8(values.iter().map(|&v| v as i8).collect()),
            ColumnKind::UInt8 => ColumnData::UInt8(values.iter().map(|&v| v as u8).collect()),
            ColumnKind::Int16 => ColumnData::Int16(values.iter().map(|&v| v as i16).collect()),
            ColumnKind::UInt16 => ColumnData::UInt16(values.iter().map(|&v| v as u16).collect()),
            ColumnKind::Int32 => ColumnData::Int32(values.iter().map(|&v| v as i32).collect()),
            ColumnKind::UInt32 => ColumnData::UInt32(values.iter().map(|&v| v as u32).collect()),
            ColumnKind::Float32 => ColumnData::Float32(values.iter().map(|&v| v as f32).collect()),
            ColumnKind::Float64 => ColumnData::Float64(values.to_vec()),
        }
    }

    /// Runtime kind tag
    pub fn kind(&self) -> ColumnKind {
        match self {
            ColumnData::Int8(_) => ColumnKind::Int8,
            ColumnData::UInt8(_) => ColumnKind::UInt8,
            ColumnData::Int16(_) => ColumnKind::Int16,
            ColumnData::UInt16(_) => ColumnKind::UInt16,
            ColumnData::Int32(_) => ColumnKind::Int32,
            ColumnData::UInt32(_) => ColumnKind::UInt32,
            ColumnData::Float32(_) => ColumnKind::Float32,
            ColumnData::Float64(_) => ColumnKind::Float64,
        }
    }

    pub fn len(&self) -> usize {
        with_values!(self, values => values.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read one element as a tagged scalar
    pub fn get(&self, index: usize) -> Option<Scalar> {
        match self {
            ColumnData::Int8(values) => values.get(index).copied().map(Scalar::Int8),
            ColumnData::UInt8(values) => values.get(index).copied().map(Scalar::UInt8),
            ColumnData::Int16(values) => values.get(index).copied().map(Scalar::Int16),
            ColumnData::UInt16(values) => values.get(index).copied().map(Scalar::UInt16),
            ColumnData::Int32(values) => values.get(index).copied().map(Scalar::Int32),
            ColumnData::UInt32(values) => values.get(index).copied().map(Scalar::UInt32),
            ColumnData::Float32(values) => values.get(index).copied().map(Scalar::Float32),
            ColumnData::Float64(values) => values.get(index).copied().map(Scalar::Float64),
        }
    }

    /// Read one element widened to f64
    pub fn get_f64(&self, index: usize) -> Option<f64> {
        with_values!(self, values => values.get(index).map(|&v| v as f64))
    }

    /// Copy the whole buffer widened to f64
    pub fn to_f64_vec(&self) -> Vec<f64> {
        with_values!(self, values => values.iter().map(|&v| v as f64).collect())
    }

    /// Store a scalar, narrowing it to this buffer's kind
    pub fn set(&mut self, index: usize, value: Scalar) -> Result<()> {
        let len = self.len();
        with_values!(self, values => {
            let slot = values
                .get_mut(index)
                .ok_or_else(|| Error::row_out_of_range(index, len))?;
            *slot = FromScalar::from_scalar(value)?;
        });
        Ok(())
    }
}

macro_rules! impl_from_vec {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<Vec<$t>> for ColumnData {
                fn from(values: Vec<$t>) -> Self {
                    ColumnData::$variant(values)
                }
            }
        )*
    };
}

impl_from_vec!(
    i8 => Int8,
    u8 => UInt8,
    i16 => Int16,
    u16 => UInt16,
    i32 => Int32,
    u32 => UInt32,
    f32 => Float32,
    f64 => Float64,
);

/// A named, homogeneously typed column
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    data: ColumnData,
}

impl Column {
    /// Create a column from a name and any supported `Vec`
    pub fn new(name: impl Into<String>, data: impl Into<ColumnData>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ColumnKind {
        self.data.kind()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Underlying typed buffer
    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    /// Read a value and convert it to `T`
    pub fn value_as<T: FromScalar>(&self, index: usize) -> Result<T> {
        let scalar = self
            .data
            .get(index)
            .ok_or_else(|| Error::row_out_of_range(index, self.len()))?;
        T::from_scalar(scalar)
    }

    /// Write a value, narrowing it to the column kind
    pub fn set_value<V: IntoScalar>(&mut self, index: usize, value: V) -> Result<()> {
        if index >= self.len() {
            return Err(Error::row_out_of_range(index, self.len()));
        }
        let scalar = value.into_scalar(self.kind())?;
        self.data.set(index, scalar)
    }

    /// Read a value widened to f64
    pub fn get_f64(&self, index: usize) -> Option<f64> {
        self.data.get_f64(index)
    }

    /// Iterate all values widened to f64
    pub fn f64_values(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len()).filter_map(move |i| self.data.get_f64(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_through_display() {
        for kind in ColumnKind::ALL {
            assert_eq!(kind.to_string().parse::<ColumnKind>(), Ok(kind));
        }
        assert_eq!("uchar".parse::<ColumnKind>(), Ok(ColumnKind::UInt8));
        assert!("string".parse::<ColumnKind>().is_err());
    }

    #[test]
    fn test_kind_sizes() {
        assert_eq!(ColumnKind::Int8.size_of(), 1);
        assert_eq!(ColumnKind::UInt16.size_of(), 2);
        assert_eq!(ColumnKind::Float32.size_of(), 4);
        assert_eq!(ColumnKind::Float64.size_of(), 8);
        assert!(ColumnKind::UInt32.is_integer());
        assert!(!ColumnKind::Float32.is_integer());
    }

    #[test]
    fn test_set_narrows_to_column_kind() {
        let mut column = Column::new("red", vec![0u8, 0, 0]);
        column.set_value(0, 300.7f64).unwrap();
        column.set_value(1, -5i32).unwrap();
        column.set_value(2, 42.9f32).unwrap();

        assert_eq!(column.data(), &ColumnData::UInt8(vec![255, 251, 42]));
    }

    #[test]
    fn test_set_from_text() {
        let mut column = Column::new("count", vec![0i16; 2]);
        column.set_value(0, " 17 ").unwrap();
        column.set_value(1, "2.9").unwrap();
        assert_eq!(column.data(), &ColumnData::Int16(vec![17, 2]));

        let err = column.set_value(0, "abc").unwrap_err();
        assert!(matches!(err, Error::Conversion { kind: ColumnKind::Int16, .. }));
    }

    #[test]
    fn test_out_of_range_access() {
        let mut column = Column::new("x", vec![1.0f32]);
        assert!(matches!(
            column.value_as::<f64>(1),
            Err(Error::IndexOutOfRange { index: 1, len: 1, .. })
        ));
        assert!(column.set_value(3, 1.0f64).is_err());
    }

    #[test]
    fn test_from_f64_values() {
        let data = ColumnData::from_f64_values(ColumnKind::Int32, &[1.9, -2.5, 3.0]);
        assert_eq!(data, ColumnData::Int32(vec![1, -2, 3]));
        assert_eq!(data.to_f64_vec(), vec![1.0, -2.0, 3.0]);
    }
}
