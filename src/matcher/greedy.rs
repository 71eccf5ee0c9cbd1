//! Greedy fragment growth: the default subgraph matching strategy.
//!
//! Two nodes correspond when they have the same kind and label. Two links
//! correspond when they have the same label, the same direction, and
//! corresponding endpoints.
//!
//! Fragments are seeded from links of the left model in insertion order.
//! Every compatible link of the right model is tried as the seed's partner,
//! each candidate is grown breadth-first, and the largest fragment wins (the
//! earliest candidate on ties). A node pair is admitted only if the links between the
//! new node and the fragment pair up one-to-one on both sides, so every
//! fragment stays an induced subgraph of its parent. Nodes of an emitted
//! fragment are claimed and never reused.

use std::collections::{HashMap, HashSet};

use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::config::MatcherConfig;
use crate::graph::{Node, SemanticModel};

use super::{MatchedSubgraphs, SubgraphMatcher};

/// Deterministic greedy matcher.
#[derive(Debug, Clone)]
pub struct GreedyFragmentMatcher {
    min_fragment_edges: usize,
}

impl Default for GreedyFragmentMatcher {
    fn default() -> Self {
        Self::new(&MatcherConfig::default())
    }
}

impl GreedyFragmentMatcher {
    /// Create a matcher from config. A minimum of zero is treated as one.
    pub fn new(config: &MatcherConfig) -> Self {
        Self {
            min_fragment_edges: config.min_fragment_edges.max(1),
        }
    }
}

/// A fragment under construction.
#[derive(Debug, Default)]
struct Fragment {
    /// Admitted node pairs, in admission order.
    pairs: Vec<(NodeIndex, NodeIndex)>,
    left_to_right: HashMap<NodeIndex, NodeIndex>,
    right_nodes: HashSet<NodeIndex>,
    edges: Vec<(EdgeIndex, EdgeIndex)>,
}

impl Fragment {
    fn admit(&mut self, left: NodeIndex, right: NodeIndex, edges: Vec<(EdgeIndex, EdgeIndex)>) {
        self.pairs.push((left, right));
        self.left_to_right.insert(left, right);
        self.right_nodes.insert(right);
        self.edges.extend(edges);
    }
}

/// Tracks which nodes of each model already belong to an emitted fragment.
struct Claims {
    left: Vec<bool>,
    right: Vec<bool>,
}

fn same_signature(a: &Node, b: &Node) -> bool {
    a.kind() == b.kind() && a.label() == b.label()
}

/// The other endpoint of `edge` seen from `node`, and whether `edge` leaves
/// `node`.
fn other_end(model: &SemanticModel, edge: EdgeIndex, node: NodeIndex) -> Option<(NodeIndex, bool)> {
    let (s, t) = model.graph().edge_endpoints(edge)?;
    if s == node {
        Some((t, true))
    } else {
        Some((s, false))
    }
}

/// Links between `left` and the fragment (or itself), keyed by
/// (right-side partner, outgoing, label), sorted.
fn left_bindings<'a>(
    a: &'a SemanticModel,
    frag: &Fragment,
    left: NodeIndex,
    right: NodeIndex,
) -> Vec<((usize, bool, &'a str), EdgeIndex)> {
    let mut out: Vec<_> = a
        .incident_edges(left)
        .into_iter()
        .filter_map(|edge| {
            let (other, outgoing) = other_end(a, edge, left)?;
            let partner = if other == left {
                right
            } else {
                *frag.left_to_right.get(&other)?
            };
            Some(((partner.index(), outgoing, a.graph()[edge].label.as_str()), edge))
        })
        .collect();
    out.sort();
    out
}

fn right_bindings<'b>(
    b: &'b SemanticModel,
    frag: &Fragment,
    right: NodeIndex,
) -> Vec<((usize, bool, &'b str), EdgeIndex)> {
    let mut out: Vec<_> = b
        .incident_edges(right)
        .into_iter()
        .filter_map(|edge| {
            let (other, outgoing) = other_end(b, edge, right)?;
            if other != right && !frag.right_nodes.contains(&other) {
                return None;
            }
            Some(((other.index(), outgoing, b.graph()[edge].label.as_str()), edge))
        })
        .collect();
    out.sort();
    out
}

/// Links to add if `(left, right)` joins the fragment, or `None` if the
/// pair would break correspondence or inducedness.
fn try_admit(
    a: &SemanticModel,
    b: &SemanticModel,
    frag: &Fragment,
    left: NodeIndex,
    right: NodeIndex,
) -> Option<Vec<(EdgeIndex, EdgeIndex)>> {
    if !same_signature(&a.graph()[left], &b.graph()[right]) {
        return None;
    }
    let lhs = left_bindings(a, frag, left, right);
    let rhs = right_bindings(b, frag, right);
    if lhs.len() != rhs.len() || lhs.iter().zip(&rhs).any(|(l, r)| l.0 != r.0) {
        return None;
    }
    Some(lhs.into_iter().zip(rhs).map(|(l, r)| (l.1, r.1)).collect())
}

impl GreedyFragmentMatcher {
    /// Grow a fragment from `seed` against every compatible link of `b` and
    /// keep the one with the most links.
    fn seed(
        &self,
        a: &SemanticModel,
        b: &SemanticModel,
        seed: EdgeIndex,
        claims: &Claims,
    ) -> Option<Fragment> {
        let mut best: Option<Fragment> = None;
        for candidate in b.graph().edge_indices() {
            let Some(frag) = Self::pair_seed(a, b, seed, candidate, claims) else {
                continue;
            };
            let frag = self.grow(a, b, frag, claims);
            if best.as_ref().is_none_or(|kept| frag.edges.len() > kept.edges.len()) {
                best = Some(frag);
            }
        }
        best
    }

    /// The two-node fragment pairing `seed` with `candidate`, if they
    /// correspond.
    fn pair_seed(
        a: &SemanticModel,
        b: &SemanticModel,
        seed: EdgeIndex,
        candidate: EdgeIndex,
        claims: &Claims,
    ) -> Option<Fragment> {
        if b.graph()[candidate].label != a.graph()[seed].label {
            return None;
        }
        let (sa, ta) = a.graph().edge_endpoints(seed)?;
        let (sb, tb) = b.graph().edge_endpoints(candidate)?;
        if sb == tb || claims.right[sb.index()] || claims.right[tb.index()] {
            return None;
        }

        let mut frag = Fragment::default();
        let loops = try_admit(a, b, &frag, sa, sb)?;
        frag.admit(sa, sb, loops);
        let edges = try_admit(a, b, &frag, ta, tb)?;
        frag.admit(ta, tb, edges);
        Some(frag)
    }

    /// Grow `frag` until no neighbouring pair can be admitted.
    fn grow(&self, a: &SemanticModel, b: &SemanticModel, mut frag: Fragment, claims: &Claims) -> Fragment {
        loop {
            let mut next = None;
            'search: for &(pa, pb) in &frag.pairs {
                for ea in a.incident_edges(pa) {
                    let Some((oa, outgoing)) = other_end(a, ea, pa) else {
                        continue;
                    };
                    if oa == pa || claims.left[oa.index()] || frag.left_to_right.contains_key(&oa) {
                        continue;
                    }
                    let label = &a.graph()[ea].label;

                    for eb in b.incident_edges(pb) {
                        let Some((ob, out_b)) = other_end(b, eb, pb) else {
                            continue;
                        };
                        if out_b != outgoing || &b.graph()[eb].label != label {
                            continue;
                        }
                        if ob == pb || claims.right[ob.index()] || frag.right_nodes.contains(&ob) {
                            continue;
                        }
                        if let Some(edges) = try_admit(a, b, &frag, oa, ob) {
                            next = Some((oa, ob, edges));
                            break 'search;
                        }
                    }
                }
            }

            match next {
                Some((oa, ob, edges)) => frag.admit(oa, ob, edges),
                None => return frag,
            }
        }
    }

    fn finish(a: &SemanticModel, b: &SemanticModel, mut frag: Fragment) -> MatchedSubgraphs {
        frag.edges.sort();
        let ga = a.graph();
        let gb = b.graph();

        let left_ids: Vec<_> = frag.pairs.iter().map(|&(l, _)| ga[l].id().clone()).collect();
        let right_ids: Vec<_> = frag.pairs.iter().map(|&(_, r)| gb[r].id().clone()).collect();

        MatchedSubgraphs {
            left: a.induced_subgraph(&left_ids),
            right: b.induced_subgraph(&right_ids),
            node_pairs: left_ids.into_iter().zip(right_ids).collect(),
            edge_pairs: frag
                .edges
                .iter()
                .map(|&(l, r)| (ga[l].id.clone(), gb[r].id.clone()))
                .collect(),
        }
    }
}

impl SubgraphMatcher for GreedyFragmentMatcher {
    fn match_subgraphs(&self, a: &SemanticModel, b: &SemanticModel) -> Vec<MatchedSubgraphs> {
        if a.is_empty() || b.is_empty() {
            return vec![];
        }

        let mut claims = Claims {
            left: vec![false; a.node_count()],
            right: vec![false; b.node_count()],
        };
        let mut matched = Vec::new();

        for seed in a.graph().edge_indices() {
            let Some((s, t)) = a.graph().edge_endpoints(seed) else {
                continue;
            };
            if s == t || claims.left[s.index()] || claims.left[t.index()] {
                continue;
            }
            let Some(frag) = self.seed(a, b, seed, &claims) else {
                continue;
            };
            if frag.edges.len() < self.min_fragment_edges {
                tracing::debug!(
                    edges = frag.edges.len(),
                    min = self.min_fragment_edges,
                    "dropping small fragment"
                );
                continue;
            }

            for &(l, r) in &frag.pairs {
                claims.left[l.index()] = true;
                claims.right[r.index()] = true;
            }
            tracing::debug!(
                nodes = frag.pairs.len(),
                edges = frag.edges.len(),
                "matched fragment"
            );
            matched.push(Self::finish(a, b, frag));
        }

        matched
    }
}
