use serde::{Deserialize, Serialize};

use super::null_as_empty;

/// A directed edge between two assets.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
	/// Database id.
	#[serde(rename = "_id")]
	pub id: String,
	/// Relation type.
	#[serde(rename = "type")]
	pub kind: String,
	/// Id of the source asset.
	pub from_id: String,
	/// Id of the target asset.
	pub to_id: String,
	/// Provenance, only present when the query asked for it.
	#[serde(default, deserialize_with = "null_as_empty")]
	pub sources: Vec<String>,
}

impl Relation {
	/// Identity used to collapse duplicates: `from-type-to`.
	pub fn key(&self) -> String {
		format!("{}-{}-{}", self.from_id, self.kind, self.to_id)
	}

	/// Whether the relation starts and ends on the same asset.
	pub fn is_self_loop(&self) -> bool {
		self.from_id == self.to_id
	}
}
