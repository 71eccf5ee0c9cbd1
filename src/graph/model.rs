//! Directed weighted multigraph holding one semantic model.
//!
//! Uses `petgraph` for the graph structure and id maps for O(1) lookups of
//! nodes and links by identifier.

use std::collections::{BTreeSet, HashMap};

use petgraph::Direction;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::error::GraphError;

use super::{EdgeId, Link, Node, NodeId, UndirectedView};

/// Result type for graph operations.
pub type GraphResult<T> = std::result::Result<T, GraphError>;

/// One candidate semantic model: a directed weighted multigraph over
/// [`Node`]s and [`Link`]s.
///
/// Nodes and links keep their insertion order; every enumeration
/// (`nodes`, `links`, `attribute_nodes`) follows it.
#[derive(Clone, Default)]
pub struct SemanticModel {
    graph: DiGraph<Node, Link>,
    node_index: HashMap<NodeId, NodeIndex>,
    edge_index: HashMap<EdgeId, EdgeIndex>,
}

impl SemanticModel {
    /// Create a new empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node, returning its index.
    ///
    /// Re-inserting an identical node returns the existing index. Re-using an
    /// id for a node of a different kind or label is an error.
    pub fn add_node(&mut self, node: Node) -> GraphResult<NodeIndex> {
        if let Some(&idx) = self.node_index.get(node.id()) {
            let existing = &self.graph[idx];
            if *existing != node {
                return Err(GraphError::ConflictingNode {
                    node_id: node.id().to_string(),
                    existing_kind: existing.kind().to_string(),
                });
            }
            return Ok(idx);
        }
        let id = node.id().clone();
        let idx = self.graph.add_node(node);
        self.node_index.insert(id, idx);
        Ok(idx)
    }

    /// Add a directed weighted link between two existing nodes.
    ///
    /// All checks run before the graph is touched, so a failed call leaves
    /// the model unchanged.
    pub fn add_edge(&mut self, link: Link) -> GraphResult<EdgeIndex> {
        if self.edge_index.contains_key(&link.id) {
            return Err(GraphError::DuplicateEdgeId {
                edge_id: link.id.to_string(),
            });
        }
        if !link.weight.is_finite() || link.weight < 0.0 {
            return Err(GraphError::InvalidWeight {
                edge_id: link.id.to_string(),
                weight: link.weight,
            });
        }
        let source = self.require_node(&link.source, &link.id)?;
        let target = self.require_node(&link.target, &link.id)?;

        let id = link.id.clone();
        let idx = self.graph.add_edge(source, target, link);
        self.edge_index.insert(id, idx);
        Ok(idx)
    }

    fn require_node(&self, node: &NodeId, edge: &EdgeId) -> GraphResult<NodeIndex> {
        self.node_index
            .get(node)
            .copied()
            .ok_or_else(|| GraphError::NodeNotFound {
                node_id: node.to_string(),
                edge_id: edge.to_string(),
            })
    }

    /// Look up a node by id.
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.node_index.get(id).map(|&idx| &self.graph[idx])
    }

    /// Look up a link by id.
    pub fn link(&self, id: &EdgeId) -> Option<&Link> {
        self.edge_index.get(id).map(|&idx| &self.graph[idx])
    }

    /// Whether a node with this id exists.
    pub fn has_node(&self, id: &NodeId) -> bool {
        self.node_index.contains_key(id)
    }

    /// All nodes, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.node_weights()
    }

    /// All links, in insertion order.
    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.graph.edge_weights()
    }

    /// The attribute (column) nodes, in insertion order.
    ///
    /// This is the universe of endpoints for pairwise path indexing.
    pub fn attribute_nodes(&self) -> Vec<&Node> {
        self.nodes().filter(|n| n.is_attribute()).collect()
    }

    /// Read-only undirected projection of this model.
    pub fn undirected_view(&self) -> UndirectedView<'_> {
        UndirectedView::new(self)
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of links.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether the model has no nodes.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Build a new model holding `ids` and every link of this model whose
    /// endpoints are both in `ids`.
    ///
    /// Nodes and links keep this model's relative order. Unknown ids are
    /// ignored.
    pub fn induced_subgraph<'a>(&self, ids: impl IntoIterator<Item = &'a NodeId>) -> SemanticModel {
        let selected: BTreeSet<NodeIndex> = ids
            .into_iter()
            .filter_map(|id| self.node_index.get(id).copied())
            .collect();

        let mut sub = SemanticModel::new();
        let mut remap: HashMap<NodeIndex, NodeIndex> = HashMap::with_capacity(selected.len());
        for &idx in &selected {
            let node = self.graph[idx].clone();
            let id = node.id().clone();
            let new_idx = sub.graph.add_node(node);
            sub.node_index.insert(id, new_idx);
            remap.insert(idx, new_idx);
        }
        for edge in self.graph.edge_references() {
            if let (Some(&s), Some(&t)) = (remap.get(&edge.source()), remap.get(&edge.target())) {
                let link = edge.weight().clone();
                let id = link.id.clone();
                let new_idx = sub.graph.add_edge(s, t, link);
                sub.edge_index.insert(id, new_idx);
            }
        }
        sub
    }

    /// The underlying petgraph graph.
    pub(crate) fn graph(&self) -> &DiGraph<Node, Link> {
        &self.graph
    }

    pub(crate) fn index_of(&self, id: &NodeId) -> Option<NodeIndex> {
        self.node_index.get(id).copied()
    }

    /// Every edge touching `node` in either direction, in edge-index order.
    ///
    /// Self-loops are listed once.
    pub(crate) fn incident_edges(&self, node: NodeIndex) -> Vec<EdgeIndex> {
        let edges: BTreeSet<EdgeIndex> = self
            .graph
            .edges_directed(node, Direction::Outgoing)
            .chain(self.graph.edges_directed(node, Direction::Incoming))
            .map(|e| e.id())
            .collect();
        edges.into_iter().collect()
    }
}

impl std::fmt::Debug for SemanticModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SemanticModel")
            .field("nodes", &self.node_count())
            .field("links", &self.edge_count())
            .finish()
    }
}
