use serde::Deserialize;

use super::null_as_empty;

/// A relation type between two asset types.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct SourceEdge {
	/// Relation type.
	pub relation_type: String,
	/// Asset type at the start of the relation.
	pub from_type: String,
	/// Asset type at the end of the relation.
	pub to_type: String,
}

/// Type-level summary of the graph contributed by a set of sources.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct SourceGraph {
	/// Asset types.
	#[serde(default, deserialize_with = "null_as_empty")]
	pub vertices: Vec<String>,
	/// Relation types between asset types.
	#[serde(default, deserialize_with = "null_as_empty")]
	pub edges: Vec<SourceEdge>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_null_lists_degrade_to_empty() {
		let graph: SourceGraph = serde_json::from_str(r#"{"vertices":null}"#).unwrap();
		assert!(graph.vertices.is_empty());
		assert!(graph.edges.is_empty());
	}
}
