//! End-to-end tests for the model-align engine.
//!
//! These exercise the registry from model construction through path
//! indexing, subgraph matching and reporting, and check the structural
//! properties every run must satisfy.

use std::collections::{BTreeSet, HashSet};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use model_align::config::AlignConfig;
use model_align::error::MatchError;
use model_align::graph::{Link, Node, NodeId, SemanticModel};
use model_align::load::ServiceDocument;
use model_align::matcher::{GreedyFragmentMatcher, SubgraphMatcher, match_subgraphs};
use model_align::path::PathKey;
use model_align::registry::ServiceModel;

fn edge_ids(links: &[Link]) -> Vec<&str> {
    links.iter().map(|l| l.id.as_str()).collect()
}

fn link_ids(model: &SemanticModel) -> BTreeSet<String> {
    model.links().map(|l| l.id.to_string()).collect()
}

/// A random model: `classes` class nodes, `columns` column nodes, `links`
/// random links with labels from a small vocabulary.
fn random_model(seed: u64, classes: u64, columns: u64, links: u64) -> SemanticModel {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut m = SemanticModel::new();
    let mut ids = Vec::new();
    for c in 0..classes {
        let id = format!("I{c}");
        m.add_node(Node::internal(id.as_str(), format!("Class{}", c % 3)))
            .unwrap();
        ids.push(id);
    }
    for a in 0..columns {
        let id = format!("A{a}");
        m.add_node(Node::column(id.as_str())).unwrap();
        ids.push(id);
    }
    for e in 0..links {
        let s = &ids[rng.gen_range(0..ids.len())];
        let t = &ids[rng.gen_range(0..ids.len())];
        let label = format!("p{}", rng.gen_range(0..3));
        let weight = f64::from(rng.gen_range(0u8..4));
        m.add_edge(
            Link::new(format!("e{e}"), s.as_str(), t.as_str())
                .with_label(label)
                .with_weight(weight),
        )
        .unwrap();
    }
    m
}

/// Cheapest simple path between two nodes by exhaustive search.
fn brute_force_cost(model: &SemanticModel, from: &NodeId, to: &NodeId) -> Option<f64> {
    fn walk(
        model: &SemanticModel,
        at: &NodeId,
        to: &NodeId,
        cost: f64,
        seen: &mut HashSet<NodeId>,
        best: &mut Option<f64>,
    ) {
        if at == to {
            *best = Some(best.map_or(cost, |b| b.min(cost)));
            return;
        }
        for (link, next) in model.undirected_view().neighbours(at) {
            if seen.insert(next.clone()) {
                walk(model, next, to, cost + link.weight, seen, best);
                seen.remove(next);
            }
        }
    }

    let mut best = None;
    let mut seen = HashSet::from([from.clone()]);
    walk(model, from, to, 0.0, &mut seen, &mut best);
    best
}

/// Whether `model` is connected when link direction is ignored.
fn is_connected(model: &SemanticModel) -> bool {
    let Some(start) = model.nodes().next() else {
        return true;
    };
    let view = model.undirected_view();
    let mut seen = HashSet::from([start.id().clone()]);
    let mut stack = vec![start.id().clone()];
    while let Some(at) = stack.pop() {
        for (_, next) in view.neighbours(&at) {
            if seen.insert(next.clone()) {
                stack.push(next.clone());
            }
        }
    }
    seen.len() == model.node_count()
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn two_columns_one_link() {
    let mut m = SemanticModel::new();
    m.add_node(Node::column("A")).unwrap();
    m.add_node(Node::column("B")).unwrap();
    m.add_edge(Link::new("e1", "A", "B")).unwrap();

    let mut service = ServiceModel::new("s", "");
    service.add_model(m);
    service.compute_shortest_paths();

    let keys: Vec<&String> = service.shortest_paths().keys().collect();
    assert_eq!(keys, vec!["A-->B (m1)"]);
    let paths = service.paths_for("A-->B (m1)");
    assert_eq!(paths.len(), 1);
    assert_eq!(edge_ids(&paths[0].links), vec!["e1"]);
}

#[test]
fn three_columns_around_one_class() {
    let mut m = SemanticModel::new();
    m.add_node(Node::column("A")).unwrap();
    m.add_node(Node::column("B")).unwrap();
    m.add_node(Node::column("C")).unwrap();
    m.add_node(Node::internal("I", "Thing")).unwrap();
    m.add_edge(Link::new("IA", "I", "A")).unwrap();
    m.add_edge(Link::new("IB", "I", "B")).unwrap();
    m.add_edge(Link::new("IC", "I", "C")).unwrap();

    let mut service = ServiceModel::new("s", "");
    service.add_model(m);
    assert_eq!(service.compute_shortest_paths(), 3);

    let ac = &service.paths_for("A-->C (m1)")[0];
    assert_eq!(edge_ids(&ac.links), vec!["IA", "IC"]);
    assert_eq!(ac.cost, Some(2.0));

    let ab = &service.paths_for("A-->B (m1)")[0];
    assert_eq!(edge_ids(&ab.links), vec!["IA", "IB"]);
    assert_eq!(ab.cost, Some(2.0));
    assert_eq!(ab.render(), "(A)---IA---(I)---IB---(B)");
}

#[test]
fn disconnected_pair_stores_empty_path() {
    let mut m = SemanticModel::new();
    m.add_node(Node::column("A")).unwrap();
    m.add_node(Node::column("B")).unwrap();
    m.add_node(Node::internal("I", "Thing")).unwrap();
    m.add_edge(Link::new("IA", "I", "A")).unwrap();

    let mut service = ServiceModel::new("s", "");
    service.add_model(m);
    service.compute_shortest_paths();

    let paths = service.paths_for("A-->B (m1)");
    assert_eq!(paths.len(), 1);
    assert!(paths[0].links.is_empty());
    assert!(!paths[0].is_connected());
}

#[test]
fn three_models_leave_matches_empty() {
    let mut service = ServiceModel::new("s", "");
    for seed in 1..=3 {
        service.add_model(random_model(seed, 3, 3, 5));
    }
    assert!(matches!(
        service.compute_matched_subgraphs(),
        Err(MatchError::UnsupportedMatchCardinality { count: 3 })
    ));
    assert!(service.matched_subgraphs().is_empty());
}

#[test]
fn shared_fragment_is_the_only_match() {
    let mut a = SemanticModel::new();
    a.add_node(Node::internal("Org", "Organization")).unwrap();
    a.add_node(Node::internal("P", "Person")).unwrap();
    a.add_node(Node::column("name")).unwrap();
    a.add_node(Node::column("phone")).unwrap();
    a.add_edge(Link::new("worksFor", "P", "Org")).unwrap();
    a.add_edge(Link::new("hasName", "P", "name")).unwrap();
    a.add_edge(Link::new("hasPhone", "P", "phone")).unwrap();

    let mut b = SemanticModel::new();
    b.add_node(Node::internal("P", "Person")).unwrap();
    b.add_node(Node::column("name")).unwrap();
    b.add_node(Node::column("phone")).unwrap();
    b.add_node(Node::internal("Place", "Place")).unwrap();
    b.add_node(Node::column("city")).unwrap();
    b.add_edge(Link::new("hasName", "P", "name")).unwrap();
    b.add_edge(Link::new("hasPhone", "P", "phone")).unwrap();
    b.add_edge(Link::new("cityName", "Place", "city")).unwrap();

    let mut service = ServiceModel::new("s", "");
    service.add_model(a);
    service.add_model(b);
    assert_eq!(service.compute_matched_subgraphs().unwrap(), 1);

    let pair = &service.matched_subgraphs()[0];
    let shared: BTreeSet<String> = ["hasName", "hasPhone"].iter().map(|s| s.to_string()).collect();
    assert_eq!(link_ids(&pair.left), shared);
    assert_eq!(link_ids(&pair.right), shared);
    assert!(!pair.left.has_node(&"Org".into()));
    assert!(!pair.right.has_node(&"Place".into()));
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[test]
fn stored_paths_are_optimal() {
    for seed in 0..20 {
        let model = random_model(seed, 3, 4, 9);
        let mut service = ServiceModel::new("s", "");
        service.add_model(model.clone());
        service.compute_shortest_paths();

        for paths in service.shortest_paths().values() {
            let path = &paths[0];
            let expected = brute_force_cost(&model, &path.source, &path.target);
            match (path.cost, expected) {
                (Some(cost), Some(best)) => {
                    assert!(cost <= best + 1e-9, "seed {seed}: {cost} > {best}");
                    let total: f64 = path.links.iter().map(|l| l.weight).sum();
                    assert!((total - cost).abs() < 1e-9);
                    // The links must form a walk from source to target.
                    let mut at = path.source.clone();
                    for link in &path.links {
                        at = if link.source == at {
                            link.target.clone()
                        } else {
                            assert_eq!(link.target, at, "seed {seed}: broken walk");
                            link.source.clone()
                        };
                    }
                    assert_eq!(at, path.target);
                }
                (None, None) => assert!(path.links.is_empty()),
                (got, want) => panic!("seed {seed}: got {got:?}, brute force {want:?}"),
            }
        }
    }
}

#[test]
fn every_attribute_pair_is_indexed() {
    let mut service = ServiceModel::new("s", "");
    let sizes = [2u64, 5, 0, 1, 4];
    for (i, &k) in sizes.iter().enumerate() {
        service.add_model(random_model(i as u64, 2, k, 6));
    }
    service.compute_shortest_paths();

    for (i, &k) in sizes.iter().enumerate() {
        let model_no = i + 1;
        let count = service
            .shortest_paths()
            .keys()
            .filter(|key| key.parse::<PathKey>().unwrap().model == model_no)
            .count();
        assert_eq!(count as u64, k * k.saturating_sub(1) / 2, "model {model_no}");
    }
}

#[test]
fn recomputing_paths_is_idempotent() {
    let mut service = ServiceModel::new("s", "");
    service.add_model(random_model(7, 4, 5, 12));
    service.add_model(random_model(8, 4, 5, 12));

    service.compute_shortest_paths();
    let first = service.shortest_paths().clone();
    service.compute_shortest_paths();
    let second = service.shortest_paths();

    assert_eq!(
        first.keys().collect::<Vec<_>>(),
        second.keys().collect::<Vec<_>>()
    );
    for (key, paths) in &first {
        assert_eq!(paths.len(), second[key].len());
        assert_eq!(paths[0].cost, second[key][0].cost);
    }
}

#[test]
fn matched_pairs_never_overlap() {
    for seed in 0..20 {
        let a = random_model(seed, 4, 4, 10);
        let b = random_model(seed + 100, 4, 4, 10);
        let matches = match_subgraphs(&a, &b);

        let mut left_nodes = HashSet::new();
        let mut right_nodes = HashSet::new();
        let mut left_links = HashSet::new();
        let mut right_links = HashSet::new();

        for m in &matches {
            for node in m.left.nodes() {
                assert!(left_nodes.insert(node.id().clone()), "seed {seed}");
            }
            for node in m.right.nodes() {
                assert!(right_nodes.insert(node.id().clone()), "seed {seed}");
            }
            for link in m.left.links() {
                assert!(left_links.insert(link.id.clone()), "seed {seed}");
            }
            for link in m.right.links() {
                assert!(right_links.insert(link.id.clone()), "seed {seed}");
            }

            assert!(is_connected(&m.left), "seed {seed}");
            assert!(is_connected(&m.right), "seed {seed}");
            assert_eq!(m.left.edge_count(), m.right.edge_count());
            assert_eq!(m.left.edge_count(), m.edge_count());

            // Induced: every parent link between fragment nodes is present.
            let ids: Vec<NodeId> = m.left.nodes().map(|n| n.id().clone()).collect();
            assert_eq!(a.induced_subgraph(&ids).edge_count(), m.left.edge_count());
            let ids: Vec<NodeId> = m.right.nodes().map(|n| n.id().clone()).collect();
            assert_eq!(b.induced_subgraph(&ids).edge_count(), m.right.edge_count());
        }
    }
}

#[test]
fn matching_is_deterministic() {
    let a = random_model(42, 4, 5, 12);
    let b = random_model(43, 4, 5, 12);
    let matcher = GreedyFragmentMatcher::default();

    let first = matcher.match_subgraphs(&a, &b);
    let second = matcher.match_subgraphs(&a, &b);
    assert_eq!(first.len(), second.len());
    for (x, y) in first.iter().zip(&second) {
        assert_eq!(x.node_pairs, y.node_pairs);
        assert_eq!(x.edge_pairs, y.edge_pairs);
        assert_eq!(link_ids(&x.left), link_ids(&y.left));
        assert_eq!(link_ids(&x.right), link_ids(&y.right));
    }
}

#[test]
fn self_match_covers_connected_model() {
    let a = random_model(5, 3, 3, 8);
    let matches = match_subgraphs(&a, &a);
    assert!(!matches.is_empty());
    let matched: usize = matches.iter().map(|m| m.edge_count()).sum();
    assert!(matched <= a.edge_count());
}

// ---------------------------------------------------------------------------
// Documents and reports
// ---------------------------------------------------------------------------

#[test]
fn document_to_report() {
    let json = r#"{
        "name": "contacts",
        "name_with_prefix": "s07-contacts",
        "description": "two candidate models",
        "models": [
            {
                "nodes": [
                    { "kind": "internal", "id": "P", "label": "Person" },
                    { "kind": "column", "id": "att_name", "column_name": "name" },
                    { "kind": "column", "id": "att_mail", "column_name": "mail" }
                ],
                "links": [
                    { "id": "hasName", "source": "P", "target": "att_name" },
                    { "id": "hasMail", "source": "P", "target": "att_mail" }
                ]
            },
            {
                "nodes": [
                    { "kind": "internal", "id": "P", "label": "Person" },
                    { "kind": "internal", "id": "A", "label": "Account" },
                    { "kind": "column", "id": "att_name", "column_name": "name" },
                    { "kind": "column", "id": "att_mail", "column_name": "mail" }
                ],
                "links": [
                    { "id": "hasName", "source": "P", "target": "att_name" },
                    { "id": "holds", "source": "P", "target": "A" },
                    { "id": "hasMail", "source": "A", "target": "att_mail", "weight": 0.5 }
                ]
            }
        ]
    }"#;

    let dir = tempfile::TempDir::new().unwrap();
    let doc_path = dir.path().join("contacts.json");
    std::fs::write(&doc_path, json).unwrap();
    let config_path = dir.path().join("align.toml");
    std::fs::write(&config_path, "attribute_prefix = \"att_\"\n").unwrap();

    let config = AlignConfig::load(&config_path).unwrap();
    let mut service = ServiceDocument::from_path(&doc_path)
        .unwrap()
        .into_service_model(config)
        .unwrap();
    assert_eq!(service.name_with_prefix(), "s07-contacts");

    service.compute_shortest_paths();
    assert_eq!(service.compute_matched_subgraphs().unwrap(), 1);

    let report = service.report();
    let keys: Vec<&str> = report.paths.iter().map(|p| p.key.as_str()).collect();
    assert_eq!(keys, vec!["name-->mail (m1)", "name-->mail (m2)"]);
    assert_eq!(report.paths[1].cost, Some(2.5));
    assert_eq!(report.matches.len(), 1);
    assert_eq!(report.matches[0].left.len(), 1);

    let text = report.to_string();
    assert!(text.contains("name-->mail (m2): \n\t(att_name)---hasName---(P)---holds---(A)---hasMail---(att_mail)"));
}
