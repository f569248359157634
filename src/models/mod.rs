//! Wire types returned by the knowledge-graph API.

mod asset;
mod database;
mod query_result;
mod relation;
mod source_graph;

pub use asset::{Asset, SearchAssetResponse};
pub use database::DatabaseDetails;
pub use query_result::{
	Cell, ColumnKind, ColumnType, QueryResultSet, SourcesByIdResponse, property_text,
};
pub use relation::Relation;
pub use source_graph::{SourceEdge, SourceGraph};

/// The server encodes empty lists as `null`; treat them as empty.
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
	D: serde::Deserializer<'de>,
	T: serde::Deserialize<'de>,
{
	use serde::Deserialize;
	Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
