//! Typed columnar data model

mod schema;
mod table;
mod value;

pub use schema::{Column, ColumnData, ColumnKind};
pub use table::{Row, Table};
pub use value::{FromScalar, IntoScalar, Scalar};
