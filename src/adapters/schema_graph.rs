use std::collections::HashSet;

use crate::components::force_graph::{GraphData, GraphLink, GraphNode};
use crate::models::SourceGraph;

/// One node per asset type, one link per relation type. Types are colored by
/// name so they match the instance graph.
pub fn schema_to_graph(schema: &SourceGraph) -> GraphData {
	let mut seen = HashSet::new();
	let nodes = schema
		.vertices
		.iter()
		.filter(|v| seen.insert(v.as_str()))
		.map(|v| GraphNode {
			id: v.clone(),
			label: v.clone(),
			group: Some(v.clone()),
		})
		.collect();

	let mut seen = HashSet::new();
	let links = schema
		.edges
		.iter()
		.map(|e| GraphLink {
			id: format!("{}-{}-{}", e.from_type, e.relation_type, e.to_type),
			source: e.from_type.clone(),
			target: e.to_type.clone(),
			label: e.relation_type.clone(),
		})
		.filter(|l| seen.insert(l.id.clone()))
		.collect();

	GraphData { nodes, links }
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::models::SourceEdge;

	#[test]
	fn test_schema_projection() {
		let schema = SourceGraph {
			vertices: vec!["host".into(), "ip".into(), "host".into()],
			edges: vec![
				SourceEdge {
					relation_type: "resolves".into(),
					from_type: "host".into(),
					to_type: "ip".into(),
				},
				SourceEdge {
					relation_type: "resolves".into(),
					from_type: "host".into(),
					to_type: "ip".into(),
				},
			],
		};
		let graph = schema_to_graph(&schema);
		assert_eq!(graph.nodes.len(), 2);
		assert_eq!(graph.nodes[1].label, "ip");
		assert_eq!(graph.links.len(), 1);
		assert_eq!(graph.links[0].id, "host-resolves-ip");
		assert_eq!(graph.links[0].label, "resolves");
	}
}
