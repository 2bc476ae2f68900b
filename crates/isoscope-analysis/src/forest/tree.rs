//! Isolation tree: random axis-aligned partitioning of one subsample.
//!
//! Nodes live in a flat arena addressed by index, so the tree is a plain
//! owned value with no back-references. Construction uses an explicit
//! work stack bounded by the height limit.

use isoscope_core::errors::ForestError;
use rand::Rng;

use super::path_length::average_path_length;
use super::types::Dataset;

/// Redraws allowed before falling back to `max` as the split value.
const MAX_SPLIT_DRAWS: usize = 16;

/// A node in the arena.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Observations with `value < split` go left, the rest go right.
    Internal {
        dimension: usize,
        split: f64,
        left: usize,
        right: usize,
    },
    /// Observations that stopped here and the depth they stopped at.
    Leaf { depth: usize, members: Vec<usize> },
}

/// One ensemble member. Immutable after `build`.
#[derive(Debug, Clone)]
pub struct IsolationTree {
    nodes: Vec<Node>,
    dimensions: usize,
    height_limit: usize,
}

impl IsolationTree {
    /// Grow a tree over `sample` (indices into `dataset`).
    ///
    /// A node becomes a leaf when it holds at most one observation, sits at
    /// `height_limit`, or has no spread on the randomly chosen dimension.
    pub fn build<R: Rng + ?Sized>(
        dataset: &Dataset,
        sample: Vec<usize>,
        height_limit: usize,
        rng: &mut R,
    ) -> Result<Self, ForestError> {
        if sample.is_empty() {
            return Err(ForestError::InvalidState(
                "isolation tree built from an empty sample".to_string(),
            ));
        }

        let dimensions = dataset.dimensions();
        let mut nodes = vec![Node::Leaf {
            depth: 0,
            members: Vec::new(),
        }];
        let mut stack = vec![(0usize, sample, 0usize)];

        while let Some((slot, members, depth)) = stack.pop() {
            if members.is_empty() {
                return Err(ForestError::InvalidState(format!(
                    "empty partition at depth {depth}"
                )));
            }
            if members.len() <= 1 || depth >= height_limit {
                nodes[slot] = Node::Leaf { depth, members };
                continue;
            }

            let dimension = rng.gen_range(0..dimensions);
            let (min, max) = members.iter().fold(
                (f64::INFINITY, f64::NEG_INFINITY),
                |(lo, hi), &i| {
                    let v = dataset.value(i, dimension);
                    (lo.min(v), hi.max(v))
                },
            );
            if min >= max {
                // No spread on this dimension: nothing left to isolate.
                nodes[slot] = Node::Leaf { depth, members };
                continue;
            }

            let split = draw_split(min, max, rng);
            let (left_members, right_members): (Vec<usize>, Vec<usize>) = members
                .into_iter()
                .partition(|&i| dataset.value(i, dimension) < split);

            let left = nodes.len();
            let right = left + 1;
            nodes.push(Node::Leaf {
                depth: depth + 1,
                members: Vec::new(),
            });
            nodes.push(Node::Leaf {
                depth: depth + 1,
                members: Vec::new(),
            });
            nodes[slot] = Node::Internal {
                dimension,
                split,
                left,
                right,
            };

            stack.push((right, right_members, depth + 1));
            stack.push((left, left_members, depth + 1));
        }

        Ok(Self {
            nodes,
            dimensions,
            height_limit,
        })
    }

    /// Depth of the leaf `observation` lands in, plus `c(leaf size)` to
    /// account for the splits a height-limited leaf never made.
    pub fn path_length(&self, observation: &[f64]) -> f64 {
        debug_assert_eq!(observation.len(), self.dimensions);
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                Node::Internal {
                    dimension,
                    split,
                    left,
                    right,
                } => {
                    index = if observation[*dimension] < *split {
                        *left
                    } else {
                        *right
                    };
                }
                Node::Leaf { depth, members } => {
                    return *depth as f64 + average_path_length(members.len());
                }
            }
        }
    }

    pub fn height_limit(&self) -> usize {
        self.height_limit
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Leaves as `(depth, members)` in arena order.
    pub fn leaves(&self) -> impl Iterator<Item = (usize, &[usize])> + '_ {
        self.nodes.iter().filter_map(|node| match node {
            Node::Leaf { depth, members } => Some((*depth, members.as_slice())),
            Node::Internal { .. } => None,
        })
    }

    /// Deepest leaf depth.
    pub fn depth(&self) -> usize {
        self.leaves().map(|(depth, _)| depth).max().unwrap_or(0)
    }
}

/// Uniform draw from the open interval `(min, max)`.
///
/// Interpolates rather than adding `(max - min)` so extreme ranges cannot
/// overflow. A split of `max` is accepted as a fallback: both sides stay
/// non-empty as long as `split > min`.
fn draw_split<R: Rng + ?Sized>(min: f64, max: f64, rng: &mut R) -> f64 {
    for _ in 0..MAX_SPLIT_DRAWS {
        let t: f64 = rng.gen();
        let split = min * (1.0 - t) + max * t;
        if split > min && split <= max {
            return split;
        }
    }
    max
}
