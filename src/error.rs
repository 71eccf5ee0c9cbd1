//! Rich diagnostic error types for the model-align engine.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes and help text so callers know exactly which invariant
//! was violated and how to fix the input.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for the model-align engine.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain (error codes, help text, sources) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum AlignError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Match(#[from] MatchError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Load(#[from] LoadError),
}

// ---------------------------------------------------------------------------
// Graph errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum GraphError {
    #[error("duplicate edge id: {edge_id}")]
    #[diagnostic(
        code(align::graph::duplicate_edge_id),
        help(
            "Edge identifiers must be unique within one semantic model. \
             Rename the second link or drop it; the model was left unchanged."
        )
    )]
    DuplicateEdgeId { edge_id: String },

    #[error("conflicting node: {node_id} already exists as a different {existing_kind} node")]
    #[diagnostic(
        code(align::graph::conflicting_node),
        help(
            "Node identity is by identifier. A node id may only be re-added \
             with exactly the same kind and label."
        )
    )]
    ConflictingNode {
        node_id: String,
        existing_kind: String,
    },

    #[error("edge {edge_id} references unknown node {node_id}")]
    #[diagnostic(
        code(align::graph::node_not_found),
        help("Add both endpoint nodes to the model before adding the link.")
    )]
    NodeNotFound { node_id: String, edge_id: String },

    #[error("edge {edge_id} has invalid weight {weight}")]
    #[diagnostic(
        code(align::graph::invalid_weight),
        help(
            "Link weights are shortest-path costs and must be finite and \
             non-negative."
        )
    )]
    InvalidWeight { edge_id: String, weight: f64 },
}

// ---------------------------------------------------------------------------
// Path errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum PathError {
    #[error("malformed path key: {key}")]
    #[diagnostic(
        code(align::path::malformed_key),
        help("Path keys have the form `<attrA>--><attrB> (m<N>)` with N >= 1.")
    )]
    MalformedKey { key: String },
}

// ---------------------------------------------------------------------------
// Match errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum MatchError {
    #[error("subgraph matching needs exactly 2 models, registry holds {count}")]
    #[diagnostic(
        code(align::matcher::unsupported_cardinality),
        help(
            "Matched subgraphs are only computed between two competing models. \
             The matched-pair list was left empty."
        )
    )]
    UnsupportedMatchCardinality { count: usize },
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config {path}")]
    #[diagnostic(
        code(align::config::read),
        help("Check that the config file exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write config {path}")]
    #[diagnostic(
        code(align::config::write),
        help("Check that the parent directory is writable.")
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {message}")]
    #[diagnostic(
        code(align::config::parse),
        help(
            "The config is TOML. Known keys are `attribute_prefix` and \
             `[matcher] min_fragment_edges`."
        )
    )]
    Parse { path: String, message: String },

    #[error("failed to serialize config for {path}: {message}")]
    #[diagnostic(
        code(align::config::serialize),
        help("Integer settings must fit in a TOML integer (i64).")
    )]
    Serialize { path: String, message: String },
}

// ---------------------------------------------------------------------------
// Load errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum LoadError {
    #[error("failed to read service document {path}")]
    #[diagnostic(
        code(align::load::read),
        help("Check that the document exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid service document: {message}")]
    #[diagnostic(
        code(align::load::parse),
        help(
            "A service document is JSON with `name`, `description` and a \
             `models` array of `{{ nodes, links }}` objects."
        )
    )]
    Parse { message: String },
}

/// Convenience alias for functions returning model-align results.
pub type AlignResult<T> = std::result::Result<T, AlignError>;
