//! Service model registry: the competing semantic models of one source.
//!
//! A [`ServiceModel`] owns its candidate models, the attribute path table
//! computed over them, and the matched subgraphs between them. Derived data
//! is only computed on explicit calls and is always fully recomputed.

use crate::config::AlignConfig;
use crate::error::MatchError;
use crate::graph::SemanticModel;
use crate::matcher::{GreedyFragmentMatcher, MatchedSubgraphs, SubgraphMatcher};
use crate::path::{PathTable, ShortestPath, index_shortest_paths};
use crate::report::ServiceReport;

/// The candidate semantic models for one named service or source.
///
/// Compute calls take `&mut self`, so no model can change while an index or
/// a match run is in progress.
#[derive(Debug, Clone)]
pub struct ServiceModel {
    name: String,
    name_with_prefix: Option<String>,
    description: String,
    config: AlignConfig,
    models: Vec<SemanticModel>,
    paths: PathTable,
    matched: Vec<MatchedSubgraphs>,
}

impl ServiceModel {
    /// Create an empty registry entry with the default config.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            name_with_prefix: None,
            description: description.into(),
            config: AlignConfig::default(),
            models: Vec::new(),
            paths: PathTable::new(),
            matched: Vec::new(),
        }
    }

    /// Use the given config for later compute calls.
    pub fn with_config(mut self, config: AlignConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the prefixed name consumers use as a file-name stem.
    pub fn with_name_with_prefix(mut self, name: impl Into<String>) -> Self {
        self.name_with_prefix = Some(name.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The prefixed name, falling back to the plain name.
    pub fn name_with_prefix(&self) -> &str {
        self.name_with_prefix.as_deref().unwrap_or(&self.name)
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn config(&self) -> &AlignConfig {
        &self.config
    }

    /// Append a candidate model. Nothing is recomputed.
    pub fn add_model(&mut self, model: SemanticModel) {
        self.models.push(model);
    }

    /// The candidate models, in registration order.
    pub fn models(&self) -> &[SemanticModel] {
        &self.models
    }

    /// Rebuild the attribute path table over all models.
    ///
    /// The new table is built completely before it replaces the old one.
    /// Returns the number of keys.
    pub fn compute_shortest_paths(&mut self) -> usize {
        let table = index_shortest_paths(&self.models, self.config.attribute_prefix());
        self.paths = table;
        self.paths.len()
    }

    /// The path table, keyed `"<attrA>--><attrB> (m<N>)"`.
    pub fn shortest_paths(&self) -> &PathTable {
        &self.paths
    }

    /// Paths stored under one key.
    pub fn paths_for(&self, key: &str) -> &[ShortestPath] {
        self.paths.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Match the two registered models with the default matcher.
    ///
    /// With any other number of models the matched list is cleared and
    /// [`MatchError::UnsupportedMatchCardinality`] is returned. Returns the
    /// number of matched pairs.
    pub fn compute_matched_subgraphs(&mut self) -> Result<usize, MatchError> {
        let matcher = GreedyFragmentMatcher::new(&self.config.matcher);
        self.compute_matched_subgraphs_with(&matcher)
    }

    /// Match the two registered models with a caller-chosen strategy.
    pub fn compute_matched_subgraphs_with(
        &mut self,
        matcher: &dyn SubgraphMatcher,
    ) -> Result<usize, MatchError> {
        let [a, b] = self.models.as_slice() else {
            self.matched.clear();
            tracing::warn!(
                service = %self.name,
                models = self.models.len(),
                "subgraph matching skipped: needs exactly two models"
            );
            return Err(MatchError::UnsupportedMatchCardinality {
                count: self.models.len(),
            });
        };

        let matched = matcher.match_subgraphs(a, b);
        tracing::info!(
            service = %self.name,
            pairs = matched.len(),
            "matched subgraphs computed"
        );
        self.matched = matched;
        Ok(self.matched.len())
    }

    /// The matched pairs, in discovery order.
    pub fn matched_subgraphs(&self) -> &[MatchedSubgraphs] {
        &self.matched
    }

    /// Structured report of the models, paths and matches.
    pub fn report(&self) -> ServiceReport {
        ServiceReport::from_service(self)
    }
}
