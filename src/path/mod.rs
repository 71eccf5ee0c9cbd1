//! Path index: shortest undirected paths between attribute pairs.
//!
//! For each model, every unordered pair of attribute nodes gets the cheapest
//! path between them in the model's undirected view, stored in a [`PathTable`]
//! under a [`PathKey`]. Disconnected pairs get an empty path.

pub mod index;
pub mod key;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::graph::{EdgeId, Link, Node, NodeId, NodeKind};

pub use index::index_shortest_paths;
pub use key::PathKey;

/// Path table: rendered [`PathKey`] → paths stored under it.
///
/// A `BTreeMap` so that iteration is in sorted key order, which is the order
/// reports list paths in.
pub type PathTable = BTreeMap<String, Vec<ShortestPath>>;

/// The cheapest undirected path between two attribute nodes of one model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortestPath {
    /// 1-based model index.
    pub model: usize,
    /// Start attribute.
    pub source: NodeId,
    /// End attribute.
    pub target: NodeId,
    /// Links from `source` to `target`. Empty when not connected.
    pub links: Vec<Link>,
    /// Nodes the path visits, in walk order.
    pub nodes: Vec<Node>,
    /// Total weight, `None` when not connected.
    pub cost: Option<f64>,
}

/// One oriented hop of a path, as presented to a reader.
///
/// A kind is `None` when the path's `nodes` do not list that endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathStep {
    pub from: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_kind: Option<NodeKind>,
    pub edge: EdgeId,
    pub to: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_kind: Option<NodeKind>,
}

impl ShortestPath {
    /// A path between two nodes that are not connected.
    pub fn disconnected(model: usize, source: NodeId, target: NodeId) -> Self {
        Self {
            model,
            source,
            target,
            links: vec![],
            nodes: vec![],
            cost: None,
        }
    }

    /// Whether a path was found.
    pub fn is_connected(&self) -> bool {
        self.cost.is_some()
    }

    /// Number of links.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether the path has no links.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Link ids in path order.
    pub fn edge_ids(&self) -> Vec<&EdgeId> {
        self.links.iter().map(|l| &l.id).collect()
    }

    fn kind_of(&self, id: &NodeId) -> Option<NodeKind> {
        self.nodes.iter().find(|n| n.id() == id).map(Node::kind)
    }

    /// Orient the stored links into a readable chain of steps.
    ///
    /// The first link reads source→target unless its source also appears in
    /// the second link; then it reads target→source so the shared node
    /// becomes the pivot. Every later link continues from the node the
    /// previous step ended on.
    pub fn steps(&self) -> Vec<PathStep> {
        let mut steps = Vec::with_capacity(self.links.len());
        let mut last: Option<&NodeId> = None;

        for (i, link) in self.links.iter().enumerate() {
            let (from, to) = match last {
                None => {
                    let flip = self
                        .links
                        .get(i + 1)
                        .is_some_and(|next| next.touches(&link.source));
                    if flip {
                        (&link.target, &link.source)
                    } else {
                        (&link.source, &link.target)
                    }
                }
                Some(prev) if link.source == *prev => (&link.source, &link.target),
                Some(prev) if link.target == *prev => (&link.target, &link.source),
                Some(_) => (&link.source, &link.target),
            };

            steps.push(PathStep {
                from: from.clone(),
                from_kind: self.kind_of(from),
                edge: link.id.clone(),
                to: to.clone(),
                to_kind: self.kind_of(to),
            });
            last = Some(to);
        }
        steps
    }

    /// Render as `(A)---e1---(I)---e2---(B)`; empty when not connected.
    pub fn render(&self) -> String {
        let steps = self.steps();
        let Some(first) = steps.first() else {
            return String::new();
        };
        let mut out = format!("({})", first.from);
        for step in &steps {
            out.push_str(&format!("---{}---({})", step.edge, step.to));
        }
        out
    }
}
