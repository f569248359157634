use std::collections::HashSet;

use crate::components::force_graph::{GraphData, GraphLink, GraphNode};
use crate::models::{Asset, QueryResultSet, Relation};

/// Projects the assets and relations of a result into a drawable graph.
///
/// Assets are de-duplicated by id and relations by `from-type-to`, first
/// occurrence wins. Only the first `max` assets are kept, only the first
/// `max` relations are considered, and a relation is dropped unless both of
/// its endpoints made it into the node set.
pub fn result_to_graph(result: &QueryResultSet, max: usize) -> GraphData {
	let assets = unique_by(result.assets(), |a: &Asset| a.id.clone());
	let relations = unique_by(result.relations(), Relation::key);

	let nodes: Vec<GraphNode> = assets.into_iter().take(max).map(asset_node).collect();
	let present: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();

	let links = relations
		.into_iter()
		.take(max)
		.filter(|r| present.contains(r.from_id.as_str()) && present.contains(r.to_id.as_str()))
		.map(relation_link)
		.collect();

	GraphData { nodes, links }
}

/// Finds the asset behind a rendered node id.
pub fn find_asset<'a>(result: &'a QueryResultSet, id: &str) -> Option<&'a Asset> {
	result.assets().find(|a| a.id == id)
}

fn asset_node(asset: &Asset) -> GraphNode {
	GraphNode {
		id: asset.id.clone(),
		label: asset.key.clone(),
		group: Some(asset.kind.clone()),
	}
}

fn relation_link(relation: &Relation) -> GraphLink {
	GraphLink {
		id: relation.key(),
		source: relation.from_id.clone(),
		target: relation.to_id.clone(),
		label: relation.kind.clone(),
	}
}

fn unique_by<'a, T, K, I>(items: I, key: K) -> Vec<&'a T>
where
	I: Iterator<Item = &'a T>,
	K: Fn(&T) -> String,
{
	let mut seen = HashSet::new();
	items.filter(|item| seen.insert(key(item))).collect()
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::models::{Cell, ColumnKind, ColumnType};

	fn asset(id: &str, kind: &str) -> Cell {
		Cell::Asset(Asset {
			id: id.into(),
			kind: kind.into(),
			key: format!("key-{}", id),
			sources: vec![],
		})
	}

	fn relation(id: &str, from: &str, to: &str) -> Cell {
		Cell::Relation(Relation {
			id: id.into(),
			kind: "linked".into(),
			from_id: from.into(),
			to_id: to.into(),
			sources: vec![],
		})
	}

	fn result(items: Vec<Vec<Cell>>) -> QueryResultSet {
		QueryResultSet {
			columns: vec![
				ColumnType {
					name: "a".into(),
					kind: ColumnKind::Asset,
				},
				ColumnType {
					name: "r".into(),
					kind: ColumnKind::Relation,
				},
				ColumnType {
					name: "b".into(),
					kind: ColumnKind::Asset,
				},
			],
			items,
			execution_time_ms: 0,
		}
	}

	#[test]
	fn test_assets_deduplicated_by_id() {
		let res = result(vec![
			vec![asset("1", "host"), relation("r1", "1", "2"), asset("2", "ip")],
			vec![asset("1", "host"), relation("r2", "1", "3"), asset("3", "ip")],
		]);
		let graph = result_to_graph(&res, 50);
		let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, vec!["1", "2", "3"]);
		assert_eq!(graph.nodes[0].label, "key-1");
		assert_eq!(graph.nodes[0].group.as_deref(), Some("host"));
	}

	#[test]
	fn test_relations_deduplicated_by_endpoints_and_type() {
		// Same endpoints and type under two different ids collapse into one link.
		let res = result(vec![
			vec![asset("1", "host"), relation("r1", "1", "2"), asset("2", "ip")],
			vec![asset("1", "host"), relation("r9", "1", "2"), asset("2", "ip")],
		]);
		let graph = result_to_graph(&res, 50);
		assert_eq!(graph.links.len(), 1);
		assert_eq!(graph.links[0].id, "1-linked-2");
		assert_eq!(graph.links[0].label, "linked");
	}

	#[test]
	fn test_relation_with_missing_endpoint_is_dropped() {
		let res = result(vec![vec![
			asset("1", "host"),
			relation("r1", "1", "404"),
			Cell::Property("x".into()),
		]]);
		let graph = result_to_graph(&res, 50);
		assert_eq!(graph.nodes.len(), 1);
		assert!(graph.links.is_empty());
	}

	#[test]
	fn test_node_cap() {
		let rows = (0..80)
			.map(|i| {
				let (a, b) = (format!("a{}", i), format!("b{}", i));
				vec![asset(&a, "host"), relation(&format!("r{}", i), &a, &b), asset(&b, "ip")]
			})
			.collect();
		let graph = result_to_graph(&result(rows), 50);
		assert_eq!(graph.nodes.len(), 50);
		// Every kept link must point at kept nodes.
		for link in &graph.links {
			assert!(graph.nodes.iter().any(|n| n.id == link.source));
			assert!(graph.nodes.iter().any(|n| n.id == link.target));
		}
		assert_eq!(graph.links.len(), 25);
	}

	#[test]
	fn test_self_loop_kept() {
		let res = result(vec![vec![asset("1", "host"), relation("r1", "1", "1"), asset("1", "host")]]);
		let graph = result_to_graph(&res, 50);
		assert_eq!(graph.nodes.len(), 1);
		assert!(graph.links[0].is_self_loop());
	}

	#[test]
	fn test_empty_result() {
		let graph = result_to_graph(&QueryResultSet::default(), 50);
		assert_eq!(graph, GraphData::default());
	}

	#[test]
	fn test_find_asset() {
		let res = result(vec![vec![asset("1", "host"), relation("r1", "1", "2"), asset("2", "ip")]]);
		assert_eq!(find_asset(&res, "2").map(|a| a.kind.as_str()), Some("ip"));
		assert!(find_asset(&res, "9").is_none());
	}
}
