use crate::models::{Cell, QueryResultSet, property_text};

/// Display form of one result cell.
#[derive(Clone, Debug, PartialEq)]
pub enum TableCell {
	/// Asset type, key (`(empty)` when blank) and sources.
	Asset {
		/// Asset type.
		kind: String,
		/// Asset key.
		key: String,
		/// Collectors that produced the asset.
		sources: Vec<String>,
	},
	/// Relation type and sources.
	Relation {
		/// Relation type.
		kind: String,
		/// Collectors that produced the relation.
		sources: Vec<String>,
	},
	/// Plain property value.
	Text(String),
}

impl TableCell {
	fn from_cell(cell: &Cell) -> Self {
		match cell {
			Cell::Asset(a) => TableCell::Asset {
				kind: a.kind.clone(),
				key: if a.key.is_empty() {
					"(empty)".to_string()
				} else {
					a.key.clone()
				},
				sources: a.sources.clone(),
			},
			Cell::Relation(r) => TableCell::Relation {
				kind: r.kind.clone(),
				sources: r.sources.clone(),
			},
			Cell::Property(v) => TableCell::Text(property_text(v)),
		}
	}

	/// Single-line text used in the CSV export.
	pub fn export_text(&self) -> String {
		match self {
			TableCell::Asset { kind, key, sources } if sources.is_empty() => {
				format!("{}: {}", kind, key)
			}
			TableCell::Asset { kind, key, sources } => {
				format!("{}: {} [{}]", kind, key, sources.join(", "))
			}
			TableCell::Relation { kind, sources } if sources.is_empty() => kind.clone(),
			TableCell::Relation { kind, sources } => format!("{} [{}]", kind, sources.join(", ")),
			TableCell::Text(text) => text.clone(),
		}
	}
}

/// Row/column view of a query result.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultsTable {
	/// Column titles, `name (type)`.
	pub columns: Vec<String>,
	/// Cells in result order.
	pub rows: Vec<Vec<TableCell>>,
}

/// Builds the table shown under the graph.
pub fn result_to_table(result: &QueryResultSet) -> ResultsTable {
	ResultsTable {
		columns: result
			.columns
			.iter()
			.map(|c| format!("{} ({})", c.name, c.kind.as_str()))
			.collect(),
		rows: result
			.items
			.iter()
			.map(|row| row.iter().map(TableCell::from_cell).collect())
			.collect(),
	}
}

impl ResultsTable {
	/// Number of pages of `page_size` rows. Zero for a zero page size.
	pub fn page_count(&self, page_size: usize) -> usize {
		if page_size == 0 {
			return 0;
		}
		self.rows.len().div_ceil(page_size)
	}

	/// Rows of the zero-based `page`. Out of range pages are empty.
	pub fn page(&self, page: usize, page_size: usize) -> &[Vec<TableCell>] {
		let start = page.saturating_mul(page_size).min(self.rows.len());
		let end = start.saturating_add(page_size).min(self.rows.len());
		&self.rows[start..end]
	}

	/// Whole table as CSV, header first. Ragged rows are padded to the
	/// widest record.
	pub fn to_csv(&self) -> Result<String, csv::Error> {
		let width = self
			.rows
			.iter()
			.map(Vec::len)
			.chain(std::iter::once(self.columns.len()))
			.max()
			.unwrap_or(0);
		let mut writer = csv::Writer::from_writer(Vec::new());
		let mut header = self.columns.clone();
		header.resize(width, String::new());
		writer.write_record(&header)?;
		for row in &self.rows {
			let mut record: Vec<String> = row.iter().map(TableCell::export_text).collect();
			record.resize(width, String::new());
			writer.write_record(&record)?;
		}
		let bytes = writer.into_inner().map_err(|e| csv::Error::from(e.into_error()))?;
		Ok(String::from_utf8_lossy(&bytes).into_owned())
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn sample() -> QueryResultSet {
		serde_json::from_str(
			r#"{
				"columns": [
					{"name": "a", "type": "asset"},
					{"name": "r", "type": "relation"},
					{"name": "count", "type": "property"}
				],
				"items": [
					[
						{"_id": "1", "type": "host", "key": "", "sources": ["csv"]},
						{"_id": "2", "type": "runs", "from_id": "1", "to_id": "1", "sources": ["csv", "scan"]},
						3
					]
				],
				"execution_time_ms": 4
			}"#,
		)
		.unwrap()
	}

	#[test]
	fn test_columns_and_cells() {
		let table = result_to_table(&sample());
		assert_eq!(table.columns, vec!["a (asset)", "r (relation)", "count (property)"]);
		assert_eq!(
			table.rows[0][0],
			TableCell::Asset {
				kind: "host".into(),
				key: "(empty)".into(),
				sources: vec!["csv".into()],
			}
		);
		assert_eq!(table.rows[0][2], TableCell::Text("3".into()));
	}

	#[test]
	fn test_paging() {
		let table = ResultsTable {
			columns: vec!["x (property)".into()],
			rows: (0..23).map(|i| vec![TableCell::Text(i.to_string())]).collect(),
		};
		assert_eq!(table.page_count(10), 3);
		assert_eq!(table.page(2, 10).len(), 3);
		assert_eq!(table.page(2, 10)[0], vec![TableCell::Text("20".into())]);
		assert!(table.page(5, 10).is_empty());
		assert_eq!(table.page_count(0), 0);
	}

	#[test]
	fn test_csv_export() {
		let csv = result_to_table(&sample()).to_csv().unwrap();
		let mut lines = csv.lines();
		assert_eq!(lines.next(), Some("a (asset),r (relation),count (property)"));
		assert_eq!(lines.next(), Some("host: (empty) [csv],\"runs [csv, scan]\",3"));
	}

	#[test]
	fn test_csv_export_ragged_rows() {
		let result: QueryResultSet = serde_json::from_str(
			r#"{"columns": [{"name": "a", "type": "property"}], "items": [[1, 2], []], "execution_time_ms": 0}"#,
		)
		.unwrap();
		let table = result_to_table(&result);
		assert_eq!(table.rows[0], vec![TableCell::Text("1".into()), TableCell::Text("2".into())]);

		let csv = table.to_csv().unwrap();
		assert_eq!(csv, "a (property),\n1,2\n,\n");
	}
}
