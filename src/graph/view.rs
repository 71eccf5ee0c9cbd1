//! Undirected projection of a semantic model and shortest-path search on it.
//!
//! The projection never copies the graph: it borrows the model and walks
//! outgoing and incoming links alike. Parallel and reversed links stay
//! distinct, each with its own weight.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use petgraph::graph::{EdgeIndex, NodeIndex};

use super::{Link, NodeId, SemanticModel};

/// Read-only undirected view over a [`SemanticModel`].
#[derive(Debug, Clone, Copy)]
pub struct UndirectedView<'a> {
    model: &'a SemanticModel,
}

/// Heap entry for Dijkstra. Ordered as a min-heap on cost, then on push
/// sequence, so equal-cost entries pop in the order they were found.
#[derive(Debug, Clone, Copy)]
struct Frontier {
    cost: f64,
    seq: usize,
    node: NodeIndex,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<'a> UndirectedView<'a> {
    pub(crate) fn new(model: &'a SemanticModel) -> Self {
        Self { model }
    }

    /// The model this view projects.
    pub fn model(&self) -> &'a SemanticModel {
        self.model
    }

    /// Links touching `node` in either direction, paired with the node at the
    /// other end. Edge-index order; self-loops are excluded.
    pub fn neighbours(&self, node: &NodeId) -> Vec<(&'a Link, &'a NodeId)> {
        let Some(idx) = self.model.index_of(node) else {
            return vec![];
        };
        let graph = self.model.graph();
        self.adjacent(idx)
            .into_iter()
            .map(|(edge, other)| (&graph[edge], graph[other].id()))
            .collect()
    }

    fn adjacent(&self, node: NodeIndex) -> Vec<(EdgeIndex, NodeIndex)> {
        let graph = self.model.graph();
        self.model
            .incident_edges(node)
            .into_iter()
            .filter_map(|edge| {
                let (s, t) = graph.edge_endpoints(edge)?;
                let other = if s == node { t } else { s };
                (other != node).then_some((edge, other))
            })
            .collect()
    }

    /// Cheapest path between two nodes ignoring link direction.
    ///
    /// Returns the total cost and the links from `from` to `to`, or `None`
    /// if either node is missing or they are not connected. Among equal-cost
    /// paths the first one found wins: relaxation only replaces a strictly
    /// cheaper route, and neighbours are visited in edge-index order.
    pub fn shortest_path(&self, from: &NodeId, to: &NodeId) -> Option<(f64, Vec<&'a Link>)> {
        let start = self.model.index_of(from)?;
        let goal = self.model.index_of(to)?;
        if start == goal {
            return Some((0.0, vec![]));
        }

        let graph = self.model.graph();
        let bound = graph.node_count();
        let mut dist: Vec<Option<f64>> = vec![None; bound];
        let mut pred: Vec<Option<(EdgeIndex, NodeIndex)>> = vec![None; bound];
        let mut settled = vec![false; bound];
        let mut heap = BinaryHeap::new();
        let mut seq = 0usize;

        dist[start.index()] = Some(0.0);
        heap.push(Frontier {
            cost: 0.0,
            seq,
            node: start,
        });

        while let Some(Frontier { cost, node, .. }) = heap.pop() {
            if settled[node.index()] {
                continue;
            }
            settled[node.index()] = true;
            if node == goal {
                break;
            }
            for (edge, other) in self.adjacent(node) {
                if settled[other.index()] {
                    continue;
                }
                let next = cost + graph[edge].weight;
                let better = match dist[other.index()] {
                    Some(known) => next < known,
                    None => true,
                };
                if better {
                    dist[other.index()] = Some(next);
                    pred[other.index()] = Some((edge, node));
                    seq += 1;
                    heap.push(Frontier {
                        cost: next,
                        seq,
                        node: other,
                    });
                }
            }
        }

        let cost = dist[goal.index()]?;
        let mut links = Vec::new();
        let mut cursor = goal;
        while cursor != start {
            let (edge, prev) = pred[cursor.index()]?;
            links.push(&graph[edge]);
            cursor = prev;
        }
        links.reverse();
        Some((cost, links))
    }
}
