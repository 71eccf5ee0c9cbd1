//! All-pairs attribute path indexing over a list of semantic models.

use crate::graph::{Link, Node, SemanticModel};

use super::{PathKey, PathTable, ShortestPath};

/// Index the shortest undirected path between every attribute pair of every
/// model.
///
/// Models are numbered from 1 in slice order. Within a model, attribute
/// pairs `(i, j)` with `i < j` follow [`SemanticModel::attribute_nodes`]
/// order. Each model with `k` attributes contributes `k * (k - 1) / 2`
/// entries. Returns a fresh table; nothing is shared with earlier runs.
pub fn index_shortest_paths(models: &[SemanticModel], attribute_prefix: Option<&str>) -> PathTable {
    let mut table = PathTable::new();
    for (i, model) in models.iter().enumerate() {
        index_model(&mut table, model, i + 1, attribute_prefix);
    }
    tracing::info!(
        models = models.len(),
        keys = table.len(),
        "shortest path index built"
    );
    table
}

fn index_model(
    table: &mut PathTable,
    model: &SemanticModel,
    model_no: usize,
    attribute_prefix: Option<&str>,
) {
    let view = model.undirected_view();
    let attributes = model.attribute_nodes();
    let mut disconnected = 0usize;

    for (i, source) in attributes.iter().enumerate() {
        for target in &attributes[i + 1..] {
            let key = PathKey::new(
                source.id().as_str(),
                target.id().as_str(),
                model_no,
                attribute_prefix,
            );

            let path = match view.shortest_path(source.id(), target.id()) {
                Some((cost, links)) => {
                    let nodes = walk_nodes(model, source, &links);
                    ShortestPath {
                        model: model_no,
                        source: source.id().clone(),
                        target: target.id().clone(),
                        links: links.into_iter().cloned().collect(),
                        nodes,
                        cost: Some(cost),
                    }
                }
                None => {
                    disconnected += 1;
                    ShortestPath::disconnected(model_no, source.id().clone(), target.id().clone())
                }
            };

            table.entry(key.to_string()).or_default().push(path);
        }
    }

    tracing::debug!(
        model = model_no,
        attributes = attributes.len(),
        disconnected,
        "indexed model"
    );
}

/// Nodes visited when walking `links` from `start`.
fn walk_nodes(model: &SemanticModel, start: &Node, links: &[&Link]) -> Vec<Node> {
    let mut nodes = vec![start.clone()];
    let mut at = start.id();
    for link in links {
        let next = if &link.source == at { &link.target } else { &link.source };
        if let Some(node) = model.node(next) {
            nodes.push(node.clone());
        }
        at = next;
    }
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn star() -> SemanticModel {
        // Three columns hanging off one class node.
        let mut m = SemanticModel::new();
        m.add_node(Node::internal("I", "Thing")).unwrap();
        for c in ["A", "B", "C"] {
            m.add_node(Node::column(c)).unwrap();
            m.add_edge(Link::new(format!("I{c}"), "I", c)).unwrap();
        }
        m
    }

    #[test]
    fn one_entry_per_unordered_pair() {
        let table = index_shortest_paths(&[star()], None);
        let keys: Vec<&str> = table.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["A-->B (m1)", "A-->C (m1)", "B-->C (m1)"]);
        assert!(table.values().all(|v| v.len() == 1));
    }

    #[test]
    fn models_are_numbered_from_one() {
        let table = index_shortest_paths(&[star(), star()], None);
        assert_eq!(table.len(), 6);
        assert!(table.contains_key("B-->C (m2)"));
        assert_eq!(table["B-->C (m2)"][0].model, 2);
    }

    #[test]
    fn walk_nodes_follow_path() {
        let table = index_shortest_paths(&[star()], None);
        let path = &table["A-->C (m1)"][0];
        let ids: Vec<&str> = path.nodes.iter().map(|n| n.id().as_str()).collect();
        assert_eq!(ids, vec!["A", "I", "C"]);
        assert_eq!(path.cost, Some(2.0));
    }

    #[test]
    fn prefix_is_stripped_from_keys_only() {
        let mut m = SemanticModel::new();
        m.add_node(Node::column("att_a")).unwrap();
        m.add_node(Node::column("att_b")).unwrap();
        m.add_edge(Link::new("e", "att_a", "att_b")).unwrap();

        let table = index_shortest_paths(&[m], Some("att_"));
        let path = &table["a-->b (m1)"][0];
        assert_eq!(path.source.as_str(), "att_a");
    }

    #[test]
    fn colliding_keys_append() {
        // Stripping "p_" maps p_a and a onto the same id, so the pairs
        // (p_a, b) and (a, b) share the key "a-->b (m1)".
        let mut m = SemanticModel::new();
        for id in ["p_a", "a", "b"] {
            m.add_node(Node::column(id)).unwrap();
        }
        let table = index_shortest_paths(&[m], Some("p_"));
        assert_eq!(table.len(), 2);
        let shared = &table["a-->b (m1)"];
        assert_eq!(shared.len(), 2);
        assert_eq!(shared[0].source.as_str(), "p_a");
        assert_eq!(shared[1].source.as_str(), "a");
    }

    #[test]
    fn empty_models_produce_no_keys() {
        let table = index_shortest_paths(&[SemanticModel::new()], None);
        assert!(table.is_empty());
    }
}
