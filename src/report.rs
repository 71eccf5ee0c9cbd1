//! Structured, label-resolved report of a service model.
//!
//! A report is plain data: the models as edge lists, every path-table entry
//! as oriented steps, and every matched pair. Callers choose whether to print
//! it (via `Display`), serialize it as JSON, or hand it to a renderer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::graph::{EdgeId, NodeId, NodeKind, SemanticModel};
use crate::path::PathStep;
use crate::registry::ServiceModel;

/// Report for one [`ServiceModel`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceReport {
    pub name: String,
    pub description: String,
    pub models: Vec<ModelSummary>,
    /// Path-table entries, sorted by key.
    pub paths: Vec<PathRecord>,
    pub matches: Vec<MatchRecord>,
}

/// One candidate model as a flat edge list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSummary {
    /// 1-based model index.
    pub index: usize,
    pub nodes: usize,
    pub attributes: usize,
    pub edges: Vec<EdgeRecord>,
}

/// A link with its endpoints classified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub id: EdgeId,
    pub label: String,
    pub source: NodeId,
    pub source_kind: NodeKind,
    pub target: NodeId,
    pub target_kind: NodeKind,
    pub weight: f64,
}

/// One stored path under a path-table key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathRecord {
    pub key: String,
    pub model: usize,
    pub source: NodeId,
    pub target: NodeId,
    pub connected: bool,
    pub cost: Option<f64>,
    pub steps: Vec<PathStep>,
}

/// One matched pair of fragments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    /// 1-based position in the matched list.
    pub index: usize,
    pub left: Vec<EdgeRecord>,
    pub right: Vec<EdgeRecord>,
    pub node_pairs: Vec<(NodeId, NodeId)>,
}

fn edge_records(model: &SemanticModel) -> Vec<EdgeRecord> {
    model
        .links()
        .filter_map(|link| {
            let source = model.node(&link.source)?;
            let target = model.node(&link.target)?;
            Some(EdgeRecord {
                id: link.id.clone(),
                label: link.label.clone(),
                source: link.source.clone(),
                source_kind: source.kind(),
                target: link.target.clone(),
                target_kind: target.kind(),
                weight: link.weight,
            })
        })
        .collect()
}

impl ServiceReport {
    /// Snapshot the current state of `service`.
    ///
    /// Paths and matches reflect the last compute calls; nothing is
    /// recomputed here.
    pub fn from_service(service: &ServiceModel) -> Self {
        let models = service
            .models()
            .iter()
            .enumerate()
            .map(|(i, m)| ModelSummary {
                index: i + 1,
                nodes: m.node_count(),
                attributes: m.attribute_nodes().len(),
                edges: edge_records(m),
            })
            .collect();

        let paths = service
            .shortest_paths()
            .iter()
            .flat_map(|(key, paths)| {
                paths.iter().map(move |p| PathRecord {
                    key: key.clone(),
                    model: p.model,
                    source: p.source.clone(),
                    target: p.target.clone(),
                    connected: p.is_connected(),
                    cost: p.cost,
                    steps: p.steps(),
                })
            })
            .collect();

        let matches = service
            .matched_subgraphs()
            .iter()
            .enumerate()
            .map(|(i, m)| MatchRecord {
                index: i + 1,
                left: edge_records(&m.left),
                right: edge_records(&m.right),
                node_pairs: m.node_pairs.clone(),
            })
            .collect();

        Self {
            name: service.name().to_string(),
            description: service.description().to_string(),
            models,
            paths,
            matches,
        }
    }
}

fn write_edges(f: &mut fmt::Formatter<'_>, edges: &[EdgeRecord], indent: &str) -> fmt::Result {
    for e in edges {
        writeln!(f, "{indent}({})---{}---({})", e.source, e.id, e.target)?;
    }
    Ok(())
}

impl fmt::Display for ServiceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f)?;

        for model in &self.models {
            writeln!(
                f,
                "model {} ({} nodes, {} attributes):",
                model.index, model.nodes, model.attributes
            )?;
            write_edges(f, &model.edges, "\t")?;
        }
        writeln!(f)?;

        for path in &self.paths {
            writeln!(f, "{}: ", path.key)?;
            let Some(first) = path.steps.first() else {
                writeln!(f, "\t(not connected)")?;
                continue;
            };
            write!(f, "\t({})", first.from)?;
            for step in &path.steps {
                write!(f, "---{}---({})", step.edge, step.to)?;
            }
            writeln!(f)?;
        }

        if !self.matches.is_empty() {
            writeln!(f)?;
            for m in &self.matches {
                writeln!(f, "matched pair {}:", m.index)?;
                writeln!(f, "  model 1:")?;
                write_edges(f, &m.left, "\t")?;
                writeln!(f, "  model 2:")?;
                write_edges(f, &m.right, "\t")?;
            }
        }
        Ok(())
    }
}
