// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # model-align
//!
//! Structural comparison of candidate semantic models: directed weighted
//! multigraphs that map the columns of a data source onto ontology concepts.
//!
//! ## Architecture
//!
//! - **Graph model** (`graph`): tagged node kinds, labeled weighted links, a
//!   petgraph-backed multigraph and its undirected view
//! - **Path index** (`path`): shortest undirected path between every pair of
//!   attribute nodes, keyed `"<attrA>--><attrB> (m<N>)"`
//! - **Subgraph matcher** (`matcher`): matched fragments between exactly two
//!   models, behind a swappable strategy trait
//! - **Registry** (`registry`): the models of one service and their derived
//!   path table and matches
//! - **Report** (`report`): structured output for printing or export
//!
//! ## Library usage
//!
//! ```no_run
//! use model_align::graph::{Link, Node, SemanticModel};
//! use model_align::registry::ServiceModel;
//!
//! let mut model = SemanticModel::new();
//! model.add_node(Node::internal("Person1", "foaf:Person")).unwrap();
//! model.add_node(Node::column("name")).unwrap();
//! model.add_node(Node::column("email")).unwrap();
//! model.add_edge(Link::new("e1", "Person1", "name")).unwrap();
//! model.add_edge(Link::new("e2", "Person1", "email")).unwrap();
//!
//! let mut service = ServiceModel::new("contacts", "contact list");
//! service.add_model(model);
//! service.compute_shortest_paths();
//! println!("{}", service.report());
//! ```

pub mod config;
pub mod error;
pub mod graph;
pub mod load;
pub mod matcher;
pub mod path;
pub mod registry;
pub mod report;
