//! Query text synthesis and its round-trip through the page URL.

use std::borrow::Cow;

use crate::models::Asset;

/// Name of the URL parameter holding the submitted query.
pub const QUERY_PARAM: &str = "q";

/// Quotes a value for a single-quoted string literal.
fn quote(value: &str) -> String {
	value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Neighbourhood of an asset: the asset, its relations and the assets on
/// the other end.
pub fn neighbourhood_query(asset: &Asset) -> String {
	format!(
		"MATCH (a:{})-[r]-(n) WHERE a.value = '{}' RETURN a, r, n",
		asset.kind,
		quote(&asset.key)
	)
}

/// Assets whose value contains `text`.
pub fn search_query(text: &str) -> String {
	format!("MATCH (a) WHERE a.value CONTAINS '{}' RETURN a", quote(text))
}

/// Relative link that submits `query` when navigated to.
pub fn query_href(query: &str) -> String {
	format!("/?{}={}", QUERY_PARAM, urlencoding::encode(query))
}

/// Reads the submitted query back out of a raw `?a=b&q=...` query string.
pub fn query_from_search(search: &str) -> Option<String> {
	search
		.trim_start_matches('?')
		.split('&')
		.filter_map(|pair| pair.split_once('='))
		.find(|(key, _)| *key == QUERY_PARAM)
		.and_then(|(_, value)| {
			urlencoding::decode(&value.replace('+', " "))
				.ok()
				.map(Cow::into_owned)
		})
}

/// Zero-based (line, column) of a character offset in the editor text.
pub fn cursor_position(text: &str, offset: usize) -> (usize, usize) {
	text.chars().take(offset).fold((0, 0), |(line, col), c| {
		if c == '\n' { (line + 1, 0) } else { (line, col + 1) }
	})
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn asset(kind: &str, key: &str) -> Asset {
		Asset {
			id: "1".into(),
			kind: kind.into(),
			key: key.into(),
			sources: vec![],
		}
	}

	#[test]
	fn test_neighbourhood_query() {
		assert_eq!(
			neighbourhood_query(&asset("host", "db01")),
			"MATCH (a:host)-[r]-(n) WHERE a.value = 'db01' RETURN a, r, n"
		);
	}

	#[test]
	fn test_quotes_are_escaped() {
		assert_eq!(
			search_query("o'neil"),
			"MATCH (a) WHERE a.value CONTAINS 'o\\'neil' RETURN a"
		);
	}

	#[test]
	fn test_query_round_trips_through_url() {
		let query = "MATCH (a:host)-[r]-(n) WHERE a.value = 'x&y=z' RETURN a, r, n\nLIMIT 5";
		let href = query_href(query);
		let search = href.trim_start_matches('/');
		assert_eq!(query_from_search(search).as_deref(), Some(query));
	}

	#[test]
	fn test_missing_param() {
		assert_eq!(query_from_search("?other=1"), None);
		assert_eq!(query_from_search(""), None);
	}

	#[test]
	fn test_plus_is_space() {
		assert_eq!(query_from_search("?q=RETURN+1").as_deref(), Some("RETURN 1"));
	}

	#[test]
	fn test_param_after_others() {
		assert_eq!(
			query_from_search("?tab=graph&q=MATCH%20(a)%20RETURN+a").as_deref(),
			Some("MATCH (a) RETURN a")
		);
		// Invalid UTF-8 after decoding yields no query.
		assert_eq!(query_from_search("?q=%FF"), None);
	}

	#[test]
	fn test_cursor_position() {
		let text = "MATCH (a)\nRETURN a";
		assert_eq!(cursor_position(text, 0), (0, 0));
		assert_eq!(cursor_position(text, 5), (0, 5));
		assert_eq!(cursor_position(text, 10), (1, 0));
		assert_eq!(cursor_position(text, 13), (1, 3));
		assert_eq!(cursor_position(text, 500), (1, 8));
	}
}
