//! Spatial queries over static point clouds.
//!
//! [`PointIndex`] is a k-d tree over points: nodes split their point range at
//! the median along the longest axis of their bounding box, leaves hold small
//! buckets. It answers ball queries ("all points within radius r") with
//! bounding-box pruning, which is the only query the sample-elimination
//! algorithm needs.

use nalgebra::Point3;

/// Leaf bucket size of the tree.
const LEAF_SIZE: usize = 8;

#[derive(Debug, Clone, Copy)]
enum NodeKind {
    /// Range into the point permutation.
    Leaf { start: usize, end: usize },
    /// Child node indices.
    Split { left: usize, right: usize },
}

#[derive(Debug, Clone)]
struct Node {
    min: Point3<f64>,
    max: Point3<f64>,
    kind: NodeKind,
}

/// A k-d tree over a static point cloud, for radius ("ball") queries.
///
/// # Example
///
/// ```
/// use rove::sample::PointIndex;
/// use nalgebra::Point3;
///
/// let points = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(5.0, 0.0, 0.0),
/// ];
/// let index = PointIndex::build(&points);
///
/// let mut near = index.query_ball(&Point3::new(0.0, 0.0, 0.0), 1.5);
/// near.sort_unstable();
/// assert_eq!(near, vec![0, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct PointIndex {
    points: Vec<Point3<f64>>,
    /// Permutation of point indices; leaves own contiguous ranges of it.
    order: Vec<usize>,
    nodes: Vec<Node>,
}

impl PointIndex {
    /// Build an index over a point cloud.
    pub fn build(points: &[Point3<f64>]) -> Self {
        let mut index = Self {
            points: points.to_vec(),
            order: (0..points.len()).collect(),
            nodes: Vec::new(),
        };
        if !points.is_empty() {
            let len = points.len();
            index.build_node(0, len);
        }
        index
    }

    /// The number of indexed points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the index is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Collect the indices of all points within `radius` of `point`
    /// (inclusive).
    pub fn query_ball(&self, point: &Point3<f64>, radius: f64) -> Vec<usize> {
        let mut out = Vec::new();
        self.query_ball_into(point, radius, &mut out);
        out
    }

    /// [`query_ball`](Self::query_ball) into a reused buffer.
    ///
    /// The buffer is cleared first. Result order is deterministic but
    /// unsorted.
    pub fn query_ball_into(&self, point: &Point3<f64>, radius: f64, out: &mut Vec<usize>) {
        out.clear();
        if self.nodes.is_empty() || radius < 0.0 {
            return;
        }

        let r2 = radius * radius;
        let mut stack = vec![0usize];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];

            // Prune on the squared distance to the closest point of the box
            let mut d2 = 0.0;
            for axis in 0..3 {
                let c = point[axis].clamp(node.min[axis], node.max[axis]);
                d2 += (point[axis] - c) * (point[axis] - c);
            }
            if d2 > r2 {
                continue;
            }

            match node.kind {
                NodeKind::Leaf { start, end } => {
                    for &i in &self.order[start..end] {
                        if (self.points[i] - point).norm_squared() <= r2 {
                            out.push(i);
                        }
                    }
                }
                NodeKind::Split { left, right } => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
    }

    /// Build the node over `order[start..end]`, returning its index.
    fn build_node(&mut self, start: usize, end: usize) -> usize {
        let (min, max) = self.bounds(start, end);

        let id = self.nodes.len();
        self.nodes.push(Node {
            min,
            max,
            kind: NodeKind::Leaf { start, end },
        });

        if end - start <= LEAF_SIZE {
            return id;
        }

        // Median split along the longest axis; ties in coordinates are
        // broken by point index so the tree shape is deterministic.
        let extent = max - min;
        let axis = if extent.x >= extent.y && extent.x >= extent.z {
            0
        } else if extent.y >= extent.z {
            1
        } else {
            2
        };

        let points = &self.points;
        self.order[start..end].sort_unstable_by(|&a, &b| {
            points[a][axis]
                .partial_cmp(&points[b][axis])
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.cmp(&b))
        });

        let mid = (start + end) / 2;
        let left = self.build_node(start, mid);
        let right = self.build_node(mid, end);
        self.nodes[id].kind = NodeKind::Split { left, right };
        id
    }

    fn bounds(&self, start: usize, end: usize) -> (Point3<f64>, Point3<f64>) {
        let mut min = self.points[self.order[start]];
        let mut max = min;
        for &i in &self.order[start..end] {
            let p = &self.points[i];
            for axis in 0..3 {
                min[axis] = min[axis].min(p[axis]);
                max[axis] = max[axis].max(p[axis]);
            }
        }
        (min, max)
    }
}
