use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use super::{Asset, Relation, null_as_empty};

/// What a result column holds. Unknown kinds read as properties.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
	/// Graph vertices.
	Asset,
	/// Graph edges.
	Relation,
	/// Scalars or anything else.
	#[default]
	#[serde(other)]
	Property,
}

impl ColumnKind {
	/// Wire name of the kind.
	pub fn as_str(&self) -> &'static str {
		match self {
			ColumnKind::Asset => "asset",
			ColumnKind::Relation => "relation",
			ColumnKind::Property => "property",
		}
	}
}

/// Header of a result column.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ColumnType {
	/// Variable name from the `RETURN` clause.
	pub name: String,
	/// Content kind.
	#[serde(rename = "type", default)]
	pub kind: ColumnKind,
}

/// One cell of a result row, decoded against the type of its column.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
	/// Cell of an asset column.
	Asset(Asset),
	/// Cell of a relation column.
	Relation(Relation),
	/// Anything else, kept as raw JSON.
	Property(Value),
}

impl Cell {
	fn decode(kind: ColumnKind, value: Value) -> Self {
		match kind {
			ColumnKind::Asset => match serde_json::from_value(value.clone()) {
				Ok(asset) => Cell::Asset(asset),
				Err(_) => Cell::Property(value),
			},
			ColumnKind::Relation => match serde_json::from_value(value.clone()) {
				Ok(relation) => Cell::Relation(relation),
				Err(_) => Cell::Property(value),
			},
			ColumnKind::Property => Cell::Property(value),
		}
	}

	/// Plain-text rendering, used by the table export.
	pub fn to_text(&self) -> String {
		match self {
			Cell::Asset(a) => format!("{}: {}", a.kind, a.key),
			Cell::Relation(r) => r.kind.clone(),
			Cell::Property(v) => property_text(v),
		}
	}
}

/// Display text of a JSON value. Strings lose their quotes, null is empty.
pub fn property_text(value: &Value) -> String {
	match value {
		Value::Null => String::new(),
		Value::String(s) => s.clone(),
		other => other.to_string(),
	}
}

#[derive(Deserialize)]
struct RawQueryResultSet {
	#[serde(default, deserialize_with = "null_as_empty")]
	items: Vec<Vec<Value>>,
	#[serde(default, deserialize_with = "null_as_empty")]
	columns: Vec<ColumnType>,
	#[serde(default)]
	execution_time_ms: u64,
}

/// Tabular result of a graph query.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "RawQueryResultSet")]
pub struct QueryResultSet {
	/// Column headers.
	pub columns: Vec<ColumnType>,
	/// Rows, one cell per column.
	pub items: Vec<Vec<Cell>>,
	/// Server-side execution time.
	pub execution_time_ms: u64,
}

impl From<RawQueryResultSet> for QueryResultSet {
	fn from(raw: RawQueryResultSet) -> Self {
		let columns = raw.columns;
		let items = raw
			.items
			.into_iter()
			.map(|row| {
				row.into_iter()
					.enumerate()
					.map(|(i, value)| {
						let kind = columns.get(i).map(|c| c.kind).unwrap_or_default();
						Cell::decode(kind, value)
					})
					.collect()
			})
			.collect();
		Self {
			columns,
			items,
			execution_time_ms: raw.execution_time_ms,
		}
	}
}

impl QueryResultSet {
	/// Every asset cell, duplicates included.
	pub fn assets(&self) -> impl Iterator<Item = &Asset> {
		self.items.iter().flatten().filter_map(|c| match c {
			Cell::Asset(a) => Some(a),
			_ => None,
		})
	}

	/// Every relation cell, duplicates included.
	pub fn relations(&self) -> impl Iterator<Item = &Relation> {
		self.items.iter().flatten().filter_map(|c| match c {
			Cell::Relation(r) => Some(r),
			_ => None,
		})
	}
}

/// Reply of the `/api/query/{assets,relations}/sources` endpoints.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct SourcesByIdResponse {
	/// Sources keyed by asset or relation id.
	#[serde(default)]
	pub results: HashMap<String, Vec<String>>,
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	const RESPONSE: &str = r#"{
		"columns": [
			{"name": "n0", "type": "asset"},
			{"name": "r", "type": "relation"},
			{"name": "n1.value", "type": "property"}
		],
		"items": [
			[
				{"_id": "1", "type": "host", "key": "db01", "sources": ["csv"]},
				{"_id": "10", "type": "runs", "from_id": "1", "to_id": "2"},
				"postgres"
			]
		],
		"execution_time_ms": 12
	}"#;

	#[test]
	fn test_cells_follow_column_types() {
		let res: QueryResultSet = serde_json::from_str(RESPONSE).unwrap();
		assert_eq!(res.execution_time_ms, 12);
		assert_eq!(res.columns[1].kind, ColumnKind::Relation);

		let row = &res.items[0];
		assert!(matches!(&row[0], Cell::Asset(a) if a.key == "db01" && a.sources == vec!["csv"]));
		assert!(matches!(&row[1], Cell::Relation(r) if r.from_id == "1" && r.to_id == "2"));
		assert_eq!(row[2], Cell::Property(Value::String("postgres".into())));
	}

	#[test]
	fn test_malformed_cell_degrades_to_property() {
		let res: QueryResultSet = serde_json::from_str(
			r#"{"columns":[{"name":"a","type":"asset"}],"items":[[42]],"execution_time_ms":1}"#,
		)
		.unwrap();
		assert_eq!(res.items[0][0], Cell::Property(Value::from(42)));
		assert_eq!(res.items[0][0].to_text(), "42");
	}

	#[test]
	fn test_unknown_column_type_is_property() {
		let col: ColumnType = serde_json::from_str(r#"{"name":"x","type":"path"}"#).unwrap();
		assert_eq!(col.kind, ColumnKind::Property);
	}

	#[test]
	fn test_null_items() {
		let res: QueryResultSet =
			serde_json::from_str(r#"{"columns":null,"items":null,"execution_time_ms":0}"#).unwrap();
		assert!(res.items.is_empty());
		assert_eq!(res.assets().count(), 0);
	}
}
