use serde::{Deserialize, Serialize};

use super::null_as_empty;

/// A vertex of the knowledge graph.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
	/// Database id.
	#[serde(rename = "_id")]
	pub id: String,
	/// Asset type, e.g. `ip` or `host`.
	#[serde(rename = "type")]
	pub kind: String,
	/// Value identifying the asset within its type.
	pub key: String,
	/// Provenance, only present when the query asked for it.
	#[serde(default, deserialize_with = "null_as_empty")]
	pub sources: Vec<String>,
}

/// One page of asset search hits.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SearchAssetResponse {
	/// Hits of this page.
	#[serde(default, deserialize_with = "null_as_empty")]
	pub assets: Vec<Asset>,
	/// Hits across all pages.
	#[serde(default)]
	pub total_hits: u64,
}
