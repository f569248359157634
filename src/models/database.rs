use serde::Deserialize;

/// Size of the knowledge graph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct DatabaseDetails {
	/// Number of assets.
	pub assets_count: u64,
	/// Number of relations.
	pub relations_count: u64,
}
