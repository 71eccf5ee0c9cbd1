//! Matched-subgraph discovery between two competing semantic models.
//!
//! A [`SubgraphMatcher`] takes exactly two models and returns pairs of
//! fragments, one from each model, judged structurally equivalent. Every
//! implementation must uphold the same contract:
//!
//! - a node or link of either model appears in at most one matched pair
//! - each fragment is a connected induced subgraph of its parent
//! - the same inputs yield the same pairs in the same order
//! - an empty model yields no pairs
//!
//! [`GreedyFragmentMatcher`] is the default strategy.

pub mod greedy;

use crate::graph::{EdgeId, NodeId, SemanticModel};

pub use greedy::GreedyFragmentMatcher;

/// Two corresponding fragments, one from each input model.
#[derive(Debug, Clone)]
pub struct MatchedSubgraphs {
    /// Fragment of the first model.
    pub left: SemanticModel,
    /// Fragment of the second model.
    pub right: SemanticModel,
    /// Node correspondence `(left id, right id)`, in discovery order.
    pub node_pairs: Vec<(NodeId, NodeId)>,
    /// Link correspondence `(left id, right id)`, in left link order.
    pub edge_pairs: Vec<(EdgeId, EdgeId)>,
}

impl MatchedSubgraphs {
    /// Number of matched links.
    pub fn edge_count(&self) -> usize {
        self.edge_pairs.len()
    }

    /// The right-hand node matched to a left-hand node.
    pub fn counterpart(&self, left: &NodeId) -> Option<&NodeId> {
        self.node_pairs
            .iter()
            .find(|(l, _)| l == left)
            .map(|(_, r)| r)
    }
}

/// Strategy for discovering matched subgraphs between two models.
pub trait SubgraphMatcher {
    /// Return the matched fragment pairs between `a` and `b`.
    fn match_subgraphs(&self, a: &SemanticModel, b: &SemanticModel) -> Vec<MatchedSubgraphs>;
}

/// Match two models with the default [`GreedyFragmentMatcher`].
pub fn match_subgraphs(a: &SemanticModel, b: &SemanticModel) -> Vec<MatchedSubgraphs> {
    GreedyFragmentMatcher::default().match_subgraphs(a, b)
}
