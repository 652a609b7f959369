//! Balanced k-d tree over table rows
//!
//! The tree snapshots the coordinate columns at build time and never changes
//! afterwards. Mutating the source table does not update it; rebuild instead.
//!
//! Splitting cycles through the dimensions by depth (`depth % D`) and each
//! node holds the median point of its subset along that axis, so the tree is
//! balanced regardless of how the points are distributed.

use tracing::debug;

use crate::error::{Error, Result};
use crate::model::Table;
use crate::select::select_nth_by;

/// Arena id of a node
pub type NodeId = usize;

/// A node of the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdNode {
    /// Row index this node represents
    pub point: usize,
    /// Number of points in the subtree rooted here
    pub count: usize,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
}

/// Result of a nearest-neighbor query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearest {
    /// Row of the closest accepted point, `None` if nothing was accepted
    pub index: Option<usize>,
    /// Squared distance to that point, `f64::INFINITY` when `index` is `None`
    pub distance_sq: f64,
    /// Number of nodes visited
    pub visited: usize,
}

impl Nearest {
    fn empty() -> Self {
        Self {
            index: None,
            distance_sq: f64::INFINITY,
            visited: 0,
        }
    }
}

/// Immutable k-d tree
#[derive(Debug, Clone)]
pub struct KdTree {
    dimensions: usize,
    /// Row-major coordinate snapshot, `dimensions` values per row
    points: Vec<f64>,
    nodes: Vec<KdNode>,
    root: Option<NodeId>,
}

impl KdTree {
    /// Index every column of `table` as one dimension
    pub fn from_table(table: &Table) -> Result<Self> {
        let names = table.column_names();
        Self::build(table, &names)
    }

    /// Index the rows of `table` as points over the named coordinate columns
    pub fn build<S: AsRef<str>>(table: &Table, columns: &[S]) -> Result<Self> {
        if columns.is_empty() {
            return Err(Error::Validation(
                "k-d tree needs at least one coordinate column".to_string(),
            ));
        }

        let dimensions = columns.len();
        let rows = table.row_count();
        let coords = columns
            .iter()
            .map(|name| table.column(name.as_ref()).map(|c| c.data().to_f64_vec()))
            .collect::<Result<Vec<_>>>()?;

        let mut points = Vec::with_capacity(rows * dimensions);
        for row in 0..rows {
            points.extend(coords.iter().map(|column| column[row]));
        }

        let mut tree = Self {
            dimensions,
            points,
            nodes: Vec::with_capacity(rows),
            root: None,
        };
        let mut indices: Vec<usize> = (0..rows).collect();
        tree.root = tree.build_node(&mut indices, 0);

        debug!(
            points = rows,
            dimensions,
            depth = tree.depth(),
            "k-d tree built"
        );
        Ok(tree)
    }

    fn build_node(&mut self, indices: &mut [usize], depth: usize) -> Option<NodeId> {
        if indices.is_empty() {
            return None;
        }

        let axis = depth % self.dimensions;
        let median = indices.len() / 2;
        {
            let points = &self.points;
            let dims = self.dimensions;
            select_nth_by(indices, median, |&a, &b| {
                points[a * dims + axis].total_cmp(&points[b * dims + axis])
            });
        }

        let point = indices[median];
        let (lower, rest) = indices.split_at_mut(median);
        let upper = &mut rest[1..];

        let left = self.build_node(lower, depth + 1);
        let right = self.build_node(upper, depth + 1);
        let count = 1 + self.subtree_count(left) + self.subtree_count(right);

        self.nodes.push(KdNode {
            point,
            count,
            left,
            right,
        });
        Some(self.nodes.len() - 1)
    }

    fn subtree_count(&self, node: Option<NodeId>) -> usize {
        node.map_or(0, |id| self.nodes[id].count)
    }

    /// Number of indexed points
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&KdNode> {
        self.nodes.get(id)
    }

    /// Snapshot coordinates of a row
    pub fn point(&self, row: usize) -> Option<&[f64]> {
        let start = row.checked_mul(self.dimensions)?;
        self.points.get(start..start + self.dimensions)
    }

    /// Height of the tree, 0 when empty
    pub fn depth(&self) -> usize {
        fn height(tree: &KdTree, node: Option<NodeId>) -> usize {
            match node {
                Some(id) => {
                    let n = &tree.nodes[id];
                    1 + height(tree, n.left).max(height(tree, n.right))
                }
                None => 0,
            }
        }
        height(self, self.root)
    }

    /// Closest indexed point to `query`
    pub fn find_nearest(&self, query: &[f64]) -> Result<Nearest> {
        self.search(query, None)
    }

    /// Closest indexed point to `query` among rows accepted by `filter`.
    ///
    /// `filter` must be pure; it may be called more than once per row.
    pub fn find_nearest_filtered<F>(&self, query: &[f64], filter: F) -> Result<Nearest>
    where
        F: Fn(usize) -> bool,
    {
        let filter: &dyn Fn(usize) -> bool = &filter;
        self.search(query, Some(filter))
    }

    fn search(&self, query: &[f64], filter: Option<&dyn Fn(usize) -> bool>) -> Result<Nearest> {
        if query.len() != self.dimensions {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions,
                actual: query.len(),
            });
        }

        let mut best = Nearest::empty();
        if let Some(root) = self.root {
            self.visit(root, 0, query, filter, &mut best);
        }
        Ok(best)
    }

    fn visit(
        &self,
        id: NodeId,
        depth: usize,
        query: &[f64],
        filter: Option<&dyn Fn(usize) -> bool>,
        best: &mut Nearest,
    ) {
        best.visited += 1;
        let node = &self.nodes[id];
        let start = node.point * self.dimensions;
        let point = &self.points[start..start + self.dimensions];

        // Rejected points still route the descent below them.
        if filter.map_or(true, |accept| accept(node.point)) {
            let distance_sq: f64 = point
                .iter()
                .zip(query)
                .map(|(p, q)| (p - q) * (p - q))
                .sum();
            if distance_sq < best.distance_sq {
                best.index = Some(node.point);
                best.distance_sq = distance_sq;
            }
        }

        let axis = depth % self.dimensions;
        let delta = query[axis] - point[axis];
        let (near, far) = if delta < 0.0 {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };

        if let Some(near) = near {
            self.visit(near, depth + 1, query, filter, best);
        }
        // A NaN split value orders nothing, so both sides stay candidates.
        if let Some(far) = far {
            if delta.is_nan() || delta * delta < best.distance_sq {
                self.visit(far, depth + 1, query, filter, best);
            }
        }
    }
}
