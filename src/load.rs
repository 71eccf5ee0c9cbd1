//! JSON service documents: the raw-graph supplier for the CLI and tests.
//!
//! ```json
//! {
//!   "name": "people",
//!   "description": "people source",
//!   "models": [
//!     {
//!       "nodes": [
//!         { "kind": "internal", "id": "Person1", "label": "foaf:Person" },
//!         { "kind": "column", "id": "name", "column_name": "name" }
//!       ],
//!       "links": [
//!         { "id": "e1", "source": "Person1", "target": "name", "label": "foaf:name" }
//!       ]
//!     }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::AlignConfig;
use crate::error::{AlignResult, LoadError};
use crate::graph::{EdgeId, Link, Node, NodeId, SemanticModel};
use crate::registry::ServiceModel;

/// A service and its candidate models, as read from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceDocument {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_with_prefix: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub models: Vec<ModelDocument>,
}

/// One candidate model: nodes first, then links between them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelDocument {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub links: Vec<LinkDocument>,
}

/// A link whose label and weight may be omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkDocument {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl From<LinkDocument> for Link {
    fn from(doc: LinkDocument) -> Self {
        let mut link = Link::new(doc.id, doc.source, doc.target);
        if let Some(label) = doc.label {
            link = link.with_label(label);
        }
        if let Some(weight) = doc.weight {
            link = link.with_weight(weight);
        }
        link
    }
}

impl ModelDocument {
    /// Build the semantic model, failing on the first structural error.
    pub fn into_model(self) -> AlignResult<SemanticModel> {
        let mut model = SemanticModel::new();
        for node in self.nodes {
            model.add_node(node)?;
        }
        for link in self.links {
            model.add_edge(link.into())?;
        }
        Ok(model)
    }
}

impl ServiceDocument {
    /// Parse a document from JSON text.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        serde_json::from_str(json).map_err(|e| LoadError::Parse {
            message: e.to_string(),
        })
    }

    /// Read and parse a document from a file.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| LoadError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_json(&content)
    }

    /// Build a [`ServiceModel`] holding every model of the document.
    ///
    /// Nothing is computed yet.
    pub fn into_service_model(self, config: AlignConfig) -> AlignResult<ServiceModel> {
        let mut service = ServiceModel::new(self.name, self.description).with_config(config);
        if let Some(prefixed) = self.name_with_prefix {
            service = service.with_name_with_prefix(prefixed);
        }
        for (i, doc) in self.models.into_iter().enumerate() {
            let model = doc.into_model()?;
            tracing::debug!(
                model = i + 1,
                nodes = model.node_count(),
                links = model.edge_count(),
                "loaded model"
            );
            service.add_model(model);
        }
        Ok(service)
    }
}
