//! Semantic model graphs: node and link types plus the multigraph container.
//!
//! A semantic model describes how the columns of a data source map onto
//! ontology classes. It is stored as a directed, weighted multigraph:
//!
//! - **Nodes** ([`Node`]): ontology class instances, source columns
//!   (attributes), and literal values
//! - **Links** ([`Link`]): directed, labeled, weighted edges; parallel and
//!   reversed links are distinct edges
//! - **Container** ([`SemanticModel`]): petgraph-backed, with id indexes
//! - **Undirected view** ([`UndirectedView`]): direction-agnostic projection
//!   used for shortest paths

pub mod model;
pub mod view;

use serde::{Deserialize, Serialize};

pub use model::{GraphResult, SemanticModel};
pub use view::UndirectedView;

/// Identifier of a node, unique within one semantic model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a node id from any string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Identifier of a link, unique within one semantic model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(String);

impl EdgeId {
    /// Create an edge id from any string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EdgeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for EdgeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Classification of a node, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// An ontology class instance.
    Internal,
    /// A source column (attribute).
    Column,
    /// A constant value.
    Literal,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKind::Internal => write!(f, "internal"),
            NodeKind::Column => write!(f, "column"),
            NodeKind::Literal => write!(f, "literal"),
        }
    }
}

/// A node of a semantic model.
///
/// Equality between nodes of the *same* model is decided by [`Node::id`];
/// the derived `PartialEq` compares the full payload and is used to detect
/// conflicting re-insertions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    /// An instance of an ontology class.
    Internal {
        /// Unique identifier.
        id: NodeId,
        /// Class label (usually the class URI).
        label: String,
    },
    /// A source column bound to the model. Always a leaf.
    Column {
        /// Unique identifier.
        id: NodeId,
        /// Name of the column in the source.
        column_name: String,
    },
    /// A literal value attached to a class.
    Literal {
        /// Unique identifier.
        id: NodeId,
        /// The constant value.
        value: String,
    },
}

impl Node {
    /// An ontology class instance.
    pub fn internal(id: impl Into<NodeId>, label: impl Into<String>) -> Self {
        Node::Internal {
            id: id.into(),
            label: label.into(),
        }
    }

    /// A column node. The column name defaults to the id.
    pub fn column(id: impl Into<NodeId>) -> Self {
        let id = id.into();
        let column_name = id.as_str().to_string();
        Node::Column { id, column_name }
    }

    /// A column node with an explicit column name.
    pub fn column_named(id: impl Into<NodeId>, column_name: impl Into<String>) -> Self {
        Node::Column {
            id: id.into(),
            column_name: column_name.into(),
        }
    }

    /// A literal node.
    pub fn literal(id: impl Into<NodeId>, value: impl Into<String>) -> Self {
        Node::Literal {
            id: id.into(),
            value: value.into(),
        }
    }

    pub fn id(&self) -> &NodeId {
        match self {
            Node::Internal { id, .. } | Node::Column { id, .. } | Node::Literal { id, .. } => id,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Internal { .. } => NodeKind::Internal,
            Node::Column { .. } => NodeKind::Column,
            Node::Literal { .. } => NodeKind::Literal,
        }
    }

    /// The kind-specific label: class label, column name, or literal value.
    pub fn label(&self) -> &str {
        match self {
            Node::Internal { label, .. } => label,
            Node::Column { column_name, .. } => column_name,
            Node::Literal { value, .. } => value,
        }
    }

    /// Whether this node is an attribute (column) node.
    pub fn is_attribute(&self) -> bool {
        matches!(self, Node::Column { .. })
    }
}

/// A directed, weighted, labeled link between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// Unique identifier within the model.
    pub id: EdgeId,
    /// Source node id.
    pub source: NodeId,
    /// Target node id.
    pub target: NodeId,
    /// Ontology property label. Defaults to the id.
    pub label: String,
    /// Shortest-path cost.
    pub weight: f64,
}

impl Link {
    /// Create a link with weight 1.0 whose label equals its id.
    pub fn new(id: impl Into<EdgeId>, source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        let id = id.into();
        let label = id.as_str().to_string();
        Self {
            id,
            source: source.into(),
            target: target.into(),
            label,
            weight: 1.0,
        }
    }

    /// Set the ontology property label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Whether `node` is one of this link's endpoints.
    pub fn touches(&self, node: &NodeId) -> bool {
        &self.source == node || &self.target == node
    }
}
