//! Axis-aligned bounding boxes over row subsets

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::Table;

/// Per-dimension `(min, max)` bounds
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aabb {
    pub min: Vec<f64>,
    pub max: Vec<f64>,
}

impl Aabb {
    pub fn new(min: Vec<f64>, max: Vec<f64>) -> Self {
        Self { min, max }
    }

    /// Bounds of `indices` over the named coordinate columns.
    ///
    /// An empty `indices` yields the sentinel box (`+inf`, `-inf`) for which
    /// [`Aabb::is_empty`] is true.
    pub fn from_rows<S: AsRef<str>>(table: &Table, columns: &[S], indices: &[usize]) -> Result<Self> {
        let row_count = table.row_count();
        if let Some(&bad) = indices.iter().find(|&&i| i >= row_count) {
            return Err(Error::row_out_of_range(bad, row_count));
        }

        let mut min = Vec::with_capacity(columns.len());
        let mut max = Vec::with_capacity(columns.len());
        for name in columns {
            let column = table.column(name.as_ref())?;
            let mut lo = f64::INFINITY;
            let mut hi = f64::NEG_INFINITY;
            for v in indices.iter().filter_map(|&i| column.get_f64(i)) {
                lo = lo.min(v);
                hi = hi.max(v);
            }
            min.push(lo);
            max.push(hi);
        }

        Ok(Self { min, max })
    }

    pub fn dimensions(&self) -> usize {
        self.min.len()
    }

    /// True when some axis holds no value: the sentinel box from no rows, or an
    /// axis that is NaN on every given row
    pub fn is_empty(&self) -> bool {
        self.min.iter().zip(&self.max).any(|(lo, hi)| lo > hi)
    }

    /// `max - min` along `axis`
    pub fn extent(&self, axis: usize) -> Option<f64> {
        Some(self.max.get(axis)? - self.min.get(axis)?)
    }

    /// Axis with the greatest extent, lowest index on ties; `None` for zero dimensions
    pub fn largest_axis(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for axis in 0..self.dimensions() {
            let e = self.max[axis] - self.min[axis];
            if best.map_or(true, |(_, l)| e > l) {
                best = Some((axis, e));
            }
        }
        best.map(|(axis, _)| axis)
    }

    /// Extent along [`Aabb::largest_axis`]
    pub fn largest_extent(&self) -> Option<f64> {
        self.largest_axis().and_then(|axis| self.extent(axis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Column;

    fn points() -> Table {
        Table::new(vec![
            Column::new("x", vec![0.0f32, 4.0, -2.0, 1.0]),
            Column::new("y", vec![1.0f64, 1.5, 0.5, 9.0]),
            Column::new("z", vec![3i16, 3, 3, 3]),
        ])
        .unwrap()
    }

    #[test]
    fn test_bounds_over_subset() {
        let table = points();
        let aabb = Aabb::from_rows(&table, &["x", "y", "z"], &[0, 1, 2]).unwrap();
        assert_eq!(aabb.min, vec![-2.0, 0.5, 3.0]);
        assert_eq!(aabb.max, vec![4.0, 1.5, 3.0]);
        assert_eq!(aabb.largest_axis(), Some(0));
        assert_eq!(aabb.largest_extent(), Some(6.0));
        assert!(!aabb.is_empty());
    }

    #[test]
    fn test_largest_axis_follows_subset() {
        let table = points();
        let aabb = Aabb::from_rows(&table, &["x", "y"], &[0, 3]).unwrap();
        assert_eq!(aabb.largest_axis(), Some(1));
        assert_eq!(aabb.largest_extent(), Some(8.0));
    }

    #[test]
    fn test_empty_indices_give_sentinel() {
        let table = points();
        let aabb = Aabb::from_rows(&table, &["x"], &[]).unwrap();
        assert!(aabb.is_empty());
        assert_eq!(aabb.min, vec![f64::INFINITY]);
        assert_eq!(aabb.max, vec![f64::NEG_INFINITY]);
    }

    #[test]
    fn test_nan_values_are_skipped() {
        let table = Table::new(vec![
            Column::new("x", vec![1.0f64, f64::NAN, 4.0]),
            Column::new("y", vec![f64::NAN; 3]),
        ])
        .unwrap();
        let aabb = Aabb::from_rows(&table, &["x", "y"], &[0, 1, 2]).unwrap();
        assert_eq!(aabb.min[0], 1.0);
        assert_eq!(aabb.max[0], 4.0);
        assert!(aabb.is_empty());
        assert_eq!(aabb.largest_axis(), Some(0));
    }

    #[test]
    fn test_zero_dimensions() {
        let aabb = Aabb::new(vec![], vec![]);
        assert_eq!(aabb.largest_axis(), None);
        assert_eq!(aabb.largest_extent(), None);
    }

    #[test]
    fn test_errors() {
        let table = points();
        assert!(matches!(
            Aabb::from_rows(&table, &["w"], &[0]),
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            Aabb::from_rows(&table, &["x"], &[4]),
            Err(Error::IndexOutOfRange { index: 4, .. })
        ));
    }
}
